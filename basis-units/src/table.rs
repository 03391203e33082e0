//! Unit table - symbol lookup over an ordered list of unit entries

use std::collections::HashMap;
use serde::{Serialize, Deserialize};
use crate::{Dimension, DimensionalRecord, BASE_UNITS};

/// One row of the unit database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitEntry {
    /// Primary symbol (e.g. "km")
    pub symbol: String,
    /// Alternate spelling accepted on lookup (e.g. "Ohm" for "Ω")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate: Option<String>,
    /// Base-unit definition
    pub record: DimensionalRecord,
}

impl UnitEntry {
    pub fn new(symbol: &str, dimension: Dimension, coefficient: f64) -> Self {
        UnitEntry {
            symbol: symbol.to_string(),
            alternate: None,
            record: DimensionalRecord::new(dimension, coefficient),
        }
    }

    pub fn with_alternate(mut self, alternate: &str) -> Self {
        self.alternate = Some(alternate.to_string());
        self
    }
}

/// Read-only mapping from unit symbol to its dimensional record
///
/// Entries keep their database order. When two entries claim the same
/// symbol, the earlier one wins.
#[derive(Debug, Clone, Default)]
pub struct UnitTable {
    entries: Vec<UnitEntry>,
    index: HashMap<String, usize>,
}

impl UnitTable {
    pub fn new(entries: Vec<UnitEntry>) -> Self {
        let mut index = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            index.entry(entry.symbol.clone()).or_insert(i);
            if let Some(alternate) = &entry.alternate {
                index.entry(alternate.clone()).or_insert(i);
            }
        }
        UnitTable { entries, index }
    }

    /// The seven base units, each with coefficient 1
    pub fn base_units() -> Self {
        let entries = BASE_UNITS
            .iter()
            .enumerate()
            .map(|(i, symbol)| {
                let mut exponents = [0.0; 7];
                exponents[i] = 1.0;
                UnitEntry::new(symbol, Dimension::new(exponents), 1.0)
            })
            .collect();
        Self::new(entries)
    }

    /// Get an entry by primary or alternate symbol
    pub fn get(&self, symbol: &str) -> Option<&UnitEntry> {
        self.index.get(symbol).map(|&i| &self.entries[i])
    }

    /// Get the dimensional record for a symbol
    pub fn lookup(&self, symbol: &str) -> Option<&DimensionalRecord> {
        self.get(symbol).map(|entry| &entry.record)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    pub fn entries(&self) -> &[UnitEntry] {
        &self.entries
    }

    /// Primary symbols in table order
    pub fn symbols(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.symbol.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<UnitEntry> for UnitTable {
    fn from_iter<I: IntoIterator<Item = UnitEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

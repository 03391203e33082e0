//! Result renderer
//!
//! Renders a dimensional record (or a conversion error) as plain text or JSON.

use basis_core::{format_coefficient, ConvertError, ErrorReport};
use basis_units::DimensionalRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `Coefficient: ...` / `Base Units: ...` block (default)
    #[default]
    Text,
    /// One JSON object per result
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}', expected text or json", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// JSON shape of a record; exponents keep base-unit order
#[derive(Serialize)]
struct RecordView {
    coefficient: f64,
    exponents: ExponentView,
    dimensionless: bool,
}

#[derive(Serialize)]
struct ExponentView {
    s: f64,
    m: f64,
    kg: f64,
    mol: f64,
    #[serde(rename = "C")]
    coulomb: f64,
    #[serde(rename = "K")]
    kelvin: f64,
    cd: f64,
}

impl From<&DimensionalRecord> for RecordView {
    fn from(record: &DimensionalRecord) -> Self {
        // adding 0.0 turns -0.0 into 0.0
        let [s, m, kg, mol, coulomb, kelvin, cd] = record.dimension.exponents.map(|e| e + 0.0);
        RecordView {
            coefficient: record.coefficient + 0.0,
            exponents: ExponentView { s, m, kg, mol, coulomb, kelvin, cd },
            dimensionless: record.is_dimensionless(),
        }
    }
}

/// Result renderer
pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render a successful conversion
    pub fn render(&self, record: &DimensionalRecord) -> String {
        match self.format {
            OutputFormat::Text => format!(
                "Coefficient: {}\nBase Units:\n{}",
                format_coefficient(record.coefficient),
                record.dimension
            ),
            OutputFormat::Json => to_json(&RecordView::from(record)),
        }
    }

    /// Render a failed conversion
    pub fn render_error(&self, error: &ConvertError) -> String {
        match self.format {
            OutputFormat::Text => format!("Error: {}", error),
            OutputFormat::Json => to_json(&ErrorReport::from(error)),
        }
    }

    /// Render either outcome
    pub fn render_result(&self, result: &Result<DimensionalRecord, ConvertError>) -> String {
        match result {
            Ok(record) => self.render(record),
            Err(error) => self.render_error(error),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(OutputFormat::default())
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    // a plain struct of strings and finite floats always serialises
    serde_json::to_string(value).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}

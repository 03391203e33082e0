//! Dimensional analysis types
//!
//! A dimension is the vector of exponents over the seven base units
//! [s, m, kg, mol, C, K, cd]. Exponents are `f64` because a dimensionless
//! power such as `m^0.5` is allowed.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Base unit indices
pub const SECOND: usize = 0;
pub const METER: usize = 1;
pub const KILOGRAM: usize = 2;
pub const MOLE: usize = 3;
pub const COULOMB: usize = 4;
pub const KELVIN: usize = 5;
pub const CANDELA: usize = 6;

/// Base unit symbols, in exponent order
pub static BASE_UNITS: [&str; 7] = ["s", "m", "kg", "mol", "C", "K", "cd"];

/// Exponents of the 7 base units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    /// [s, m, kg, mol, C, K, cd]
    pub exponents: [f64; 7],
}

impl Dimension {
    /// Dimensionless quantity (all exponents zero)
    pub const DIMENSIONLESS: Dimension = Dimension { exponents: [0.0; 7] };

    /// Time [s]
    pub const TIME: Dimension = Dimension::base(SECOND);

    /// Length [m]
    pub const LENGTH: Dimension = Dimension::base(METER);

    /// Mass [kg]
    pub const MASS: Dimension = Dimension::base(KILOGRAM);

    /// Amount of substance [mol]
    pub const AMOUNT: Dimension = Dimension::base(MOLE);

    /// Electric charge [C]
    pub const CHARGE: Dimension = Dimension::base(COULOMB);

    /// Temperature [K]
    pub const TEMPERATURE: Dimension = Dimension::base(KELVIN);

    /// Luminous intensity [cd]
    pub const LUMINOSITY: Dimension = Dimension::base(CANDELA);

    /// Velocity [m s^-1]
    pub const VELOCITY: Dimension = Dimension { exponents: [-1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0] };

    /// Force [kg m s^-2]
    pub const FORCE: Dimension = Dimension { exponents: [-2.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0] };

    const fn base(index: usize) -> Dimension {
        let mut exponents = [0.0; 7];
        exponents[index] = 1.0;
        Dimension { exponents }
    }

    /// Create a new dimension from exponents
    pub fn new(exponents: [f64; 7]) -> Self {
        Dimension { exponents }
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.exponents.iter().all(|e| e.is_finite())
    }

    /// Exponent of the base unit with the given symbol
    pub fn exponent(&self, symbol: &str) -> Option<f64> {
        BASE_UNITS
            .iter()
            .position(|&s| s == symbol)
            .map(|i| self.exponents[i])
    }

    /// Multiply dimensions (add exponents)
    pub fn multiply(&self, other: &Dimension) -> Dimension {
        self.zip_with(other, |a, b| a + b)
    }

    /// Divide dimensions (subtract exponents)
    pub fn divide(&self, other: &Dimension) -> Dimension {
        self.zip_with(other, |a, b| a - b)
    }

    /// Raise to a power (scale exponents)
    pub fn power(&self, exp: f64) -> Dimension {
        Dimension { exponents: self.exponents.map(|e| e * exp) }
    }

    /// Non-zero `(symbol, exponent)` pairs in base-unit order
    pub fn terms(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        BASE_UNITS
            .iter()
            .zip(self.exponents.iter())
            .filter(|&(_, &exp)| exp != 0.0)
            .map(|(&symbol, &exp)| (symbol, exp))
    }

    fn zip_with(&self, other: &Dimension, op: impl Fn(f64, f64) -> f64) -> Dimension {
        let mut result = [0.0; 7];
        for i in 0..7 {
            result[i] = op(self.exponents[i], other.exponents[i]);
        }
        Dimension { exponents: result }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .terms()
            .map(|(symbol, exp)| {
                if exp == 1.0 {
                    symbol.to_string()
                } else {
                    format!("{}^{}", symbol, basis_core::format_exponent(exp))
                }
            })
            .collect();

        if parts.is_empty() {
            write!(f, "Dimensionless")
        } else {
            write!(f, "{}", parts.join(" * "))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensionless() {
        assert!(Dimension::DIMENSIONLESS.is_dimensionless());
        assert!(!Dimension::LENGTH.is_dimensionless());
    }

    #[test]
    fn test_divide() {
        let velocity = Dimension::LENGTH.divide(&Dimension::TIME);
        assert_eq!(velocity, Dimension::VELOCITY);
    }

    #[test]
    fn test_force() {
        let acceleration = Dimension::VELOCITY.divide(&Dimension::TIME);
        let force = Dimension::MASS.multiply(&acceleration);
        assert_eq!(force, Dimension::FORCE);
    }

    #[test]
    fn test_fractional_power() {
        let root = Dimension::LENGTH.power(2.0).power(0.5);
        assert_eq!(root, Dimension::LENGTH);
        assert_eq!(Dimension::TIME.power(-1.0).exponent("s"), Some(-1.0));
    }

    #[test]
    fn test_power_zero() {
        assert!(Dimension::FORCE.power(0.0).is_dimensionless());
    }

    #[test]
    fn test_exponent_lookup() {
        assert_eq!(Dimension::FORCE.exponent("kg"), Some(1.0));
        assert_eq!(Dimension::FORCE.exponent("K"), Some(0.0));
        assert_eq!(Dimension::FORCE.exponent("ft"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Dimension::DIMENSIONLESS), "Dimensionless");
        assert_eq!(format!("{}", Dimension::LENGTH), "m");
        assert_eq!(format!("{}", Dimension::VELOCITY), "s^-1 * m");
        assert_eq!(format!("{}", Dimension::LENGTH.power(0.5)), "m^0.5");
    }
}

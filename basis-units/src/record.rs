//! Dimensional record - a coefficient over a base-unit dimension

use std::fmt;
use serde::{Serialize, Deserialize};
use basis_core::{checked, format_coefficient, ConvertError, EvalError, NumberError};
use crate::Dimension;

/// A quantity reduced to base units: `coefficient * s^a * m^b * ...`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionalRecord {
    /// Exponents of the seven base units
    pub dimension: Dimension,
    /// Magnitude relative to the base units (km -> 1000)
    pub coefficient: f64,
}

impl DimensionalRecord {
    pub fn new(dimension: Dimension, coefficient: f64) -> Self {
        DimensionalRecord { dimension, coefficient }
    }

    /// A pure number
    pub fn scalar(coefficient: f64) -> Self {
        DimensionalRecord { dimension: Dimension::DIMENSIONLESS, coefficient }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// Multiply: exponents add, coefficients multiply
    pub fn multiply(&self, other: &DimensionalRecord) -> Result<DimensionalRecord, ConvertError> {
        let coefficient = self.coefficient * other.coefficient;
        let dimension = self.dimension.multiply(&other.dimension);
        Self::finite(dimension, coefficient, || format!("({}) * ({})", self, other))
    }

    /// Divide: exponents subtract, coefficients divide
    ///
    /// A divisor with a zero coefficient is rejected rather than producing infinity.
    pub fn divide(&self, other: &DimensionalRecord) -> Result<DimensionalRecord, ConvertError> {
        if other.coefficient == 0.0 {
            return Err(EvalError::DivisionByZero.into());
        }
        let coefficient = self.coefficient / other.coefficient;
        let dimension = self.dimension.divide(&other.dimension);
        Self::finite(dimension, coefficient, || format!("({}) / ({})", self, other))
    }

    /// Exponentiate: the exponent must be dimensionless; exponents scale by
    /// its coefficient and the coefficient is raised to it.
    pub fn power(&self, exponent: &DimensionalRecord) -> Result<DimensionalRecord, ConvertError> {
        if !exponent.is_dimensionless() {
            return Err(EvalError::NonDimensionlessExponent(exponent.to_string()).into());
        }
        let e = exponent.coefficient;
        let coefficient = self.coefficient.powf(e);
        let dimension = self.dimension.power(e);
        Self::finite(dimension, coefficient, || format!("({})^{}", self, e))
    }

    fn finite(
        dimension: Dimension,
        coefficient: f64,
        what: impl Fn() -> String,
    ) -> Result<DimensionalRecord, ConvertError> {
        let coefficient = checked(coefficient, &what)?;
        if !dimension.is_finite() {
            return Err(NumberError::NonFinite(what()).into());
        }
        Ok(DimensionalRecord { dimension, coefficient })
    }
}

impl fmt::Display for DimensionalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            write!(f, "{}", format_coefficient(self.coefficient))
        } else {
            write!(f, "{} {}", format_coefficient(self.coefficient), self.dimension)
        }
    }
}

//! Floating point values that survive the JSON wire form

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{name} must be {expected}, got {value}")]
pub struct InvalidNumber {
    pub name: &'static str,
    pub expected: &'static str,
    pub value: f64,
}

/// An `f64` that is neither NaN nor infinite. JSON has no encoding for
/// either, so results only carry finite doubles.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FiniteDouble(f64);

impl FiniteDouble {
    pub fn new(value: f64) -> Result<Self, InvalidNumber> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(InvalidNumber {
                name: "double",
                expected: "a finite number",
                value,
            })
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for FiniteDouble {
    type Error = InvalidNumber;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FiniteDouble> for f64 {
    fn from(value: FiniteDouble) -> Self {
        value.0
    }
}

impl fmt::Display for FiniteDouble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_values_are_rejected() {
        assert_eq!(FiniteDouble::new(0.5).unwrap().get(), 0.5);
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(FiniteDouble::new(value).is_err());
        }
    }

    #[test]
    fn test_wire_form_is_a_plain_number() {
        let value = FiniteDouble::new(41.5).unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), "41.5");
        assert_eq!(serde_json::from_str::<FiniteDouble>("41.5").unwrap(), value);
        assert!(serde_json::from_str::<FiniteDouble>("null").is_err());
    }
}

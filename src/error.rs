use std::fmt::{Display, Formatter};

use crate::quantity::units::Units;

/// Consumption value that the engine was asked to bill.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Input {
    /// Stand-alone consumption of a single meter.
    Units,

    MainMeter,

    /// Zero-based position in the submeter list.
    Submeter { index: usize },

    /// Free allowance override.
    FreeAllowance,
}

impl Input {
    /// Pass the consumption through if it is a non-negative finite number.
    pub fn check(self, units: Units) -> Result<Units, BillingError> {
        if units.is_finite() && units.is_non_negative() {
            Ok(units)
        } else {
            Err(BillingError::InvalidInput { input: self, value: units.0.0 })
        }
    }
}

impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Units => write!(f, "consumption"),
            Self::MainMeter => write!(f, "main meter consumption"),
            Self::Submeter { index } => write!(f, "consumption of submeter #{index}"),
            Self::FreeAllowance => write!(f, "free allowance"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    /// The caller passed a negative, NaN or infinite consumption.
    #[error("invalid {input}: `{value}` is not a non-negative finite number")]
    InvalidInput { input: Input, value: f64 },

    /// The consumption is valid, but the resulting amount does not fit into a finite number.
    #[error("{input} `{value}` is too large to bill")]
    Overflow { input: Input, value: f64 },

    /// The tariff tables are malformed.
    #[error("malformed tariff: {0}")]
    Configuration(String),
}

impl BillingError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

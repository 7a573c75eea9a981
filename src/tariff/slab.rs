use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::quantity::{rate::UnitRate, units::Units};

/// Contiguous consumption range billed at a single per-unit rate.
///
/// Bounds are inclusive and one-based: a `1–100` slab holds the first hundred units.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Slab {
    pub from: Units,

    /// Inclusive upper bound, `None` stands for an open-ended slab.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Units>,

    pub rate: UnitRate,
}

impl Slab {
    pub fn bounded(from: f64, to: f64, rate: f64) -> Self {
        Self { from: Units::from(from), to: Some(Units::from(to)), rate: UnitRate::from(rate) }
    }

    pub fn unbounded(from: f64, rate: f64) -> Self {
        Self { from: Units::from(from), to: None, rate: UnitRate::from(rate) }
    }

    /// The lowest slab is the only one the free allowance is applied to.
    #[must_use]
    pub fn is_lowest(&self) -> bool {
        self.from == Units::ONE
    }

    /// Part of the total consumption that falls into this slab.
    pub fn units_in(&self, consumption: Units) -> Units {
        let upper = self.to.map_or(consumption, |to| consumption.min(to));
        let lower = (self.from - Units::ONE).max(Units::ZERO);
        (upper - lower).max(Units::ZERO)
    }
}

impl Display for Slab {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.to {
            Some(to) => write!(f, "{}–{}", self.from.0, to.0),
            None => write!(f, "{}+", self.from.0),
        }
    }
}

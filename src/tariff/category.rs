use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{quantity::cost::Cost, tariff::schedule::Schedule};

#[derive(
    Copy, Clone, Debug, Hash, Eq, PartialEq, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Households.
    Domestic,

    /// Shops, offices and other non-residential connections.
    Commercial,
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domestic => write!(f, "Domestic"),
            Self::Commercial => write!(f, "Commercial"),
        }
    }
}

/// Everything billed to a connection of one usage category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryTariff {
    /// Flat service charge per bill, subject to the duty.
    pub fixed_charge: Cost,

    /// Whether the tariff-wide free allowance is granted to this category.
    #[serde(default)]
    pub free_allowance: bool,

    pub schedule: Schedule,
}

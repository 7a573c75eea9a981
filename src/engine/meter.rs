use std::fmt::{Display, Formatter};

use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::{
    engine::breakdown::BillBreakdown,
    error::Input,
    quantity::units::Units,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Meter {
    Main,

    /// Zero-based position in the submeter list.
    Submeter(usize),
}

impl Meter {
    #[must_use]
    pub const fn input(self) -> Input {
        match self {
            Self::Main => Input::MainMeter,
            Self::Submeter(index) => Input::Submeter { index },
        }
    }
}

impl Display for Meter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Main => write!(f, "Main Meter"),
            Self::Submeter(index) => write!(f, "Submeter {}", index + 1),
        }
    }
}

#[serde_as]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct MeterBill {
    #[serde(rename = "label")]
    #[serde_as(as = "DisplayFromStr")]
    pub meter: Meter,

    pub units: Units,

    pub breakdown: BillBreakdown,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MultiMeterBill {
    /// Share of the free allowance granted to each meter.
    pub per_meter_allowance: Units,

    /// Main meter first, then the submeters in their input order.
    pub per_meter: Vec<MeterBill>,

    pub aggregate: BillBreakdown,
}

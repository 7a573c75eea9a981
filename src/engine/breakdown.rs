use std::{iter::Sum, ops::Add};

use serde::Serialize;

use crate::quantity::{cost::Cost, percentage::Percentage};

/// Whether a bill carries the fixed charge and the electricity duty on top of the energy charge.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Surcharges {
    #[default]
    Excluded,
    Included,
}

impl From<bool> for Surcharges {
    fn from(included: bool) -> Self {
        if included { Self::Included } else { Self::Excluded }
    }
}

/// Bill line items. The optional ones are only present with [`Surcharges::Included`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[must_use]
pub struct BillBreakdown {
    pub energy_charge: Cost,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_charge: Option<Cost>,

    /// Energy plus fixed charge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<Cost>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duty: Option<Cost>,

    pub total: Cost,
}

impl BillBreakdown {
    pub const fn energy_only(energy_charge: Cost) -> Self {
        Self { energy_charge, fixed_charge: None, subtotal: None, duty: None, total: energy_charge }
    }

    /// The duty is levied once on the subtotal and never on itself.
    pub fn with_surcharges(energy_charge: Cost, fixed_charge: Cost, duty: Percentage) -> Self {
        let subtotal = energy_charge + fixed_charge;
        let duty = subtotal * duty;
        Self {
            energy_charge,
            fixed_charge: Some(fixed_charge),
            subtotal: Some(subtotal),
            duty: Some(duty),
            total: subtotal + duty,
        }
    }
}

/// Field-wise sum: nothing is recomputed, so the duty of a sum is the sum of the duties.
impl Add for BillBreakdown {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            energy_charge: self.energy_charge + rhs.energy_charge,
            fixed_charge: add_optional(self.fixed_charge, rhs.fixed_charge),
            subtotal: add_optional(self.subtotal, rhs.subtotal),
            duty: add_optional(self.duty, rhs.duty),
            total: self.total + rhs.total,
        }
    }
}

impl Sum for BillBreakdown {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(Add::add).unwrap_or_else(|| Self::energy_only(Cost::ZERO))
    }
}

fn add_optional(lhs: Option<Cost>, rhs: Option<Cost>) -> Option<Cost> {
    match (lhs, rhs) {
        (Some(lhs), Some(rhs)) => Some(lhs + rhs),
        (lhs, None) => lhs,
        (None, rhs) => rhs,
    }
}

pub mod category;
pub mod presets;
pub mod schedule;
pub mod slab;

use serde::{Deserialize, Serialize};

pub use self::{category::Category, presets::Preset};
use crate::{
    error::BillingError,
    quantity::{percentage::Percentage, units::Units},
    tariff::{category::CategoryTariff, slab::Slab},
};

/// Complete, immutable tariff configuration the engine bills against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    /// Units exempted from charge per bill, shared by all meters of a connection.
    #[serde(default = "Tariff::default_free_allowance")]
    pub free_allowance: Units,

    /// Electricity duty levied on the energy and fixed charges.
    #[serde(default = "Tariff::default_duty")]
    pub duty: Percentage,

    pub domestic: CategoryTariff,

    pub commercial: CategoryTariff,
}

impl Tariff {
    const fn default_free_allowance() -> Units {
        Units::HUNDRED
    }

    const fn default_duty() -> Percentage {
        Percentage(2.0)
    }

    #[must_use]
    pub const fn category(&self, category: Category) -> &CategoryTariff {
        match category {
            Category::Domestic => &self.domestic,
            Category::Commercial => &self.commercial,
        }
    }

    /// Slabs applicable to the given category and total consumption.
    ///
    /// # Errors
    ///
    /// [`BillingError::InvalidInput`] for a negative or non-finite consumption,
    /// and [`BillingError::Configuration`] when no tier covers it.
    pub fn slabs_for(
        &self,
        category: Category,
        total_units: Units,
    ) -> Result<&[Slab], BillingError> {
        self.category(category).schedule.slabs_for(total_units)
    }

    /// Check the tables for gaps, overlaps, ordering, rates and fallbacks.
    ///
    /// # Errors
    ///
    /// [`BillingError::Configuration`] describing the first problem found.
    pub fn validate(&self) -> Result<(), BillingError> {
        if !self.free_allowance.is_finite() || !self.free_allowance.is_non_negative() {
            return Err(BillingError::configuration("the free allowance must be non-negative"));
        }
        if !self.duty.0.is_finite() || self.duty.0 < 0.0 {
            return Err(BillingError::configuration("the duty must be non-negative"));
        }
        for category in [Category::Domestic, Category::Commercial] {
            let tariff = self.category(category);
            if !tariff.fixed_charge.is_finite() || !tariff.fixed_charge.is_non_negative() {
                return Err(BillingError::configuration(format!(
                    "{category}: the fixed charge must be non-negative",
                )));
            }
            tariff
                .schedule
                .validate()
                .map_err(|error| BillingError::configuration(format!("{category}: {error}")))?;
        }
        Ok(())
    }
}

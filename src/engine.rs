pub mod breakdown;
pub mod meter;

use std::iter::once;

use bon::Builder;
use itertools::Itertools;
use tracing::{debug, instrument, trace};

pub use self::{
    breakdown::{BillBreakdown, Surcharges},
    meter::{Meter, MeterBill, MultiMeterBill},
};
use crate::{
    error::{BillingError, Input},
    quantity::{cost::Cost, units::Units},
    tariff::{Category, Tariff, schedule::validate_slabs},
};

/// Bills consumption against a tariff.
///
/// The engine holds no state besides its configuration,
/// so the same instance may be shared between threads and calls.
#[derive(Builder)]
pub struct BillEngine<'a> {
    tariff: &'a Tariff,

    /// Overrides the tariff's free allowance.
    free_allowance: Option<Units>,

    #[builder(default)]
    surcharges: Surcharges,
}

impl BillEngine<'_> {
    #[must_use]
    pub fn free_allowance(&self) -> Units {
        self.free_allowance.unwrap_or(self.tariff.free_allowance)
    }

    /// Energy charge of a single meter with the full free allowance.
    ///
    /// # Errors
    ///
    /// [`BillingError::InvalidInput`] for a negative, NaN or infinite consumption,
    /// [`BillingError::Overflow`] when the charge is not finite,
    /// and [`BillingError::Configuration`] when the slabs do not cover the consumption.
    pub fn compute_energy_charge(
        &self,
        units: Units,
        category: Category,
    ) -> Result<Cost, BillingError> {
        self.compute_energy_charge_with_allowance(units, category, self.free_allowance())
    }

    /// Energy charge of a single meter with an explicit free allowance.
    ///
    /// # Errors
    ///
    /// [`BillingError::InvalidInput`] for a negative, NaN or infinite consumption or allowance.
    pub fn compute_energy_charge_with_allowance(
        &self,
        units: Units,
        category: Category,
        free_allowance: Units,
    ) -> Result<Cost, BillingError> {
        self.energy_charge(Input::Units, units, category, free_allowance)
    }

    /// Single-meter bill, including the fixed charge and duty if the engine is configured so.
    ///
    /// # Errors
    ///
    /// [`BillingError::InvalidInput`] for a negative, NaN or infinite consumption.
    #[instrument(skip_all, fields(%category, ?units))]
    pub fn compute_bill(
        &self,
        units: Units,
        category: Category,
    ) -> Result<BillBreakdown, BillingError> {
        self.bill(Input::Units, units, category, self.free_allowance())
    }

    /// Bill a main meter and its submeters, which share the free allowance evenly.
    ///
    /// All the readings are validated before anything is computed.
    ///
    /// # Errors
    ///
    /// [`BillingError::InvalidInput`] naming the first meter with an invalid reading.
    #[instrument(skip_all, fields(%category, ?main_units, n_submeters = submeter_units.len()))]
    pub fn compute_multi_meter_bill(
        &self,
        category: Category,
        main_units: Units,
        submeter_units: &[Units],
    ) -> Result<MultiMeterBill, BillingError> {
        let meters = once((Meter::Main, main_units))
            .chain(
                submeter_units
                    .iter()
                    .enumerate()
                    .map(|(index, units)| (Meter::Submeter(index), *units)),
            )
            .collect_vec();
        for (meter, units) in &meters {
            meter.input().check(*units)?;
        }

        #[expect(clippy::cast_precision_loss)]
        let per_meter_allowance = self.free_allowance() / meters.len() as f64;
        debug!(?per_meter_allowance, n_meters = meters.len(), "split the free allowance");

        let per_meter = meters
            .into_iter()
            .map(|(meter, units)| {
                let breakdown = self.bill(meter.input(), units, category, per_meter_allowance)?;
                Ok(MeterBill { meter, units, breakdown })
            })
            .collect::<Result<Vec<_>, BillingError>>()?;
        let aggregate = per_meter.iter().map(|meter_bill| meter_bill.breakdown).sum();

        Ok(MultiMeterBill { per_meter_allowance, per_meter, aggregate })
    }

    fn bill(
        &self,
        input: Input,
        units: Units,
        category: Category,
        free_allowance: Units,
    ) -> Result<BillBreakdown, BillingError> {
        let energy_charge = self.energy_charge(input, units, category, free_allowance)?;
        let breakdown = match self.surcharges {
            Surcharges::Excluded => BillBreakdown::energy_only(energy_charge),
            Surcharges::Included => BillBreakdown::with_surcharges(
                energy_charge,
                self.tariff.category(category).fixed_charge,
                self.tariff.duty,
            ),
        };
        ensure_finite(breakdown.total, input, units)?;
        Ok(breakdown)
    }

    /// Walk the applicable slabs and sum up the charges.
    ///
    /// The free allowance is only deducted from the lowest slab, the rest of it is lost.
    /// Slabs that leave a part of the consumption unbilled are a configuration error.
    fn energy_charge(
        &self,
        input: Input,
        units: Units,
        category: Category,
        free_allowance: Units,
    ) -> Result<Cost, BillingError> {
        let units = input.check(units)?;
        let tariff = self.tariff.category(category);
        let free_allowance = if tariff.free_allowance {
            Input::FreeAllowance.check(free_allowance)?
        } else {
            Units::ZERO
        };

        let slabs = tariff.schedule.slabs_for(units)?;
        validate_slabs(slabs, Some(units))
            .map_err(|error| BillingError::configuration(format!("{category}: {error}")))?;

        let charge: Cost = slabs
            .iter()
            .map(|slab| {
                let slab_units = slab.units_in(units);
                let chargeable_units = if slab.is_lowest() && free_allowance > Units::ZERO {
                    (slab_units - free_allowance).max(Units::ZERO)
                } else {
                    slab_units
                };
                let charge = chargeable_units * slab.rate;
                trace!(%slab, ?slab_units, ?chargeable_units, ?charge);
                charge
            })
            .sum();

        debug!(%input, ?units, ?free_allowance, ?charge, "calculated the energy charge");
        ensure_finite(charge, input, units)
    }
}

fn ensure_finite(cost: Cost, input: Input, units: Units) -> Result<Cost, BillingError> {
    if cost.is_finite() {
        Ok(cost)
    } else {
        Err(BillingError::Overflow { input, value: units.0.0 })
    }
}

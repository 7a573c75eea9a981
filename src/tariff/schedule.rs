use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    error::{BillingError, Input},
    quantity::units::Units,
    tariff::slab::Slab,
};

/// Rate table of a single usage category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
    /// The same slab list applies regardless of the total consumption.
    Flat(FlatSchedule),

    /// The total consumption picks a tier first, and the tier's slab list applies.
    Tiered(TieredSchedule),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlatSchedule {
    pub slabs: Vec<Slab>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TieredSchedule {
    pub tiers: Vec<Tier>,
}

/// Total-consumption bracket with its own slab rates.
///
/// Falling into a higher tier may raise the rates of the lower slabs as well.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Inclusive, `None` stands for the fallback tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_total_units: Option<Units>,

    pub slabs: Vec<Slab>,
}

impl Tier {
    #[must_use]
    pub fn covers(&self, total_units: Units) -> bool {
        self.max_total_units.is_none_or(|max_total_units| total_units <= max_total_units)
    }
}

impl Schedule {
    /// Slabs to walk for the given total consumption.
    pub fn slabs_for(&self, total_units: Units) -> Result<&[Slab], BillingError> {
        match self {
            Self::Flat(schedule) => Ok(&schedule.slabs),
            Self::Tiered(schedule) => Ok(&schedule.select_tier(total_units)?.slabs),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        match self {
            Self::Flat(schedule) => validate_slabs(&schedule.slabs, None),
            Self::Tiered(schedule) => schedule.validate(),
        }
    }
}

impl TieredSchedule {
    /// Select the first tier, in ascending order, that covers the total consumption.
    pub fn select_tier(&self, total_units: Units) -> Result<&Tier, BillingError> {
        let total_units = Input::Units.check(total_units)?;
        let tier = self.tiers.iter().find(|tier| tier.covers(total_units)).ok_or_else(|| {
            BillingError::configuration(format!("no tier covers {total_units}"))
        })?;
        tracing::trace!(?total_units, max_total_units = ?tier.max_total_units, "selected tier");
        Ok(tier)
    }

    fn validate(&self) -> Result<(), String> {
        let (last, preceding) = self.tiers.split_last().ok_or("no tiers")?;
        if last.max_total_units.is_some() {
            return Err("the last tier must be unbounded".to_string());
        }
        for (index, (tier, next)) in self.tiers.iter().tuple_windows().enumerate() {
            let max_total_units =
                tier.max_total_units.ok_or_else(|| format!("tier #{index} is unbounded"))?;
            if next.max_total_units.is_some_and(|next_max| next_max <= max_total_units) {
                return Err(format!("tier #{} is not above tier #{index}", index + 1));
            }
        }
        for (index, tier) in preceding.iter().chain([last]).enumerate() {
            validate_slabs(&tier.slabs, tier.max_total_units)
                .map_err(|error| format!("tier #{index}: {error}"))?;
        }
        Ok(())
    }
}

/// Check that the slabs start at the first unit, follow each other without gaps or overlaps,
/// and reach at least `cover` (or infinity, if `None`).
pub(crate) fn validate_slabs(slabs: &[Slab], cover: Option<Units>) -> Result<(), String> {
    let first = slabs.first().ok_or("no slabs")?;
    if !first.is_lowest() {
        return Err(format!("the first slab {first} does not start at 1"));
    }
    for slab in slabs {
        if !slab.rate.is_finite() || !slab.rate.is_non_negative() {
            return Err(format!("slab {slab} has an invalid rate"));
        }
        if slab.to.is_some_and(|to| to < slab.from) {
            return Err(format!("slab {slab} ends before it starts"));
        }
    }
    for (slab, next) in slabs.iter().tuple_windows() {
        let to = slab.to.ok_or_else(|| format!("slab {slab} is unbounded but not the last"))?;
        if next.from != to + Units::ONE {
            return Err(format!("slab {next} does not follow slab {slab}"));
        }
    }
    let last_to = slabs.last().and_then(|slab| slab.to);
    match (last_to, cover) {
        (None, _) => Ok(()),
        (Some(to), Some(cover)) if to >= cover => Ok(()),
        (Some(to), _) => Err(format!("the slabs end at {to}, higher consumption is unbilled")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiered() -> TieredSchedule {
        TieredSchedule {
            tiers: vec![
                Tier {
                    max_total_units: Some(Units::from(100.0)),
                    slabs: vec![Slab::bounded(1.0, 100.0, 0.0)],
                },
                Tier {
                    max_total_units: Some(Units::from(400.0)),
                    slabs: vec![
                        Slab::bounded(1.0, 100.0, 0.0),
                        Slab::bounded(101.0, 200.0, 2.35),
                        Slab::bounded(201.0, 400.0, 4.7),
                    ],
                },
                Tier {
                    max_total_units: None,
                    slabs: vec![Slab::bounded(1.0, 100.0, 0.0), Slab::unbounded(101.0, 6.3)],
                },
            ],
        }
    }

    #[test]
    fn test_select_tier() {
        let schedule = tiered();
        let select = |units: f64| schedule.select_tier(Units::from(units)).unwrap().max_total_units;
        assert_eq!(select(0.0), Some(Units::from(100.0)));
        assert_eq!(select(100.0), Some(Units::from(100.0)));
        assert_eq!(select(100.5), Some(Units::from(400.0)));
        assert_eq!(select(400.0), Some(Units::from(400.0)));
        assert_eq!(select(400.001), None);
        assert_eq!(select(1e9), None);
    }

    #[test]
    fn test_select_tier_rejects_invalid_input() {
        let schedule = tiered();
        for units in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                schedule.select_tier(Units::from(units)),
                Err(BillingError::InvalidInput { input: Input::Units, .. }),
            ));
        }
    }

    #[test]
    fn test_select_tier_without_fallback() {
        let mut schedule = tiered();
        schedule.tiers.pop();
        assert!(matches!(
            schedule.select_tier(Units::from(500.0)),
            Err(BillingError::Configuration(_)),
        ));
    }

    #[test]
    fn test_slabs_for_flat() {
        let slabs = vec![Slab::bounded(1.0, 100.0, 5.5), Slab::unbounded(101.0, 7.0)];
        let schedule = Schedule::Flat(FlatSchedule { slabs: slabs.clone() });
        assert_eq!(schedule.slabs_for(Units::from(5000.0)).unwrap(), slabs.as_slice());
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(Schedule::Tiered(tiered()).validate(), Ok(()));
    }

    #[test]
    fn test_validate_missing_fallback_tier() {
        let mut schedule = tiered();
        schedule.tiers.pop();
        assert!(Schedule::Tiered(schedule).validate().is_err());
    }

    #[test]
    fn test_validate_descending_tiers() {
        let mut schedule = tiered();
        schedule.tiers.swap(0, 1);
        assert!(Schedule::Tiered(schedule).validate().is_err());
    }

    #[test]
    fn test_validate_tier_not_covered() {
        let mut schedule = tiered();
        schedule.tiers[1].slabs.pop();
        assert!(Schedule::Tiered(schedule).validate().is_err());
    }

    #[test]
    fn test_validate_gap() {
        let slabs = vec![Slab::bounded(1.0, 100.0, 5.5), Slab::unbounded(150.0, 7.0)];
        assert!(validate_slabs(&slabs, None).is_err());
    }

    #[test]
    fn test_validate_overlap() {
        let slabs = vec![Slab::bounded(1.0, 100.0, 5.5), Slab::unbounded(90.0, 7.0)];
        assert!(validate_slabs(&slabs, None).is_err());
    }

    #[test]
    fn test_validate_flat_without_unbounded_slab() {
        let slabs = vec![Slab::bounded(1.0, 100.0, 5.5), Slab::bounded(101.0, 500.0, 7.0)];
        assert!(validate_slabs(&slabs, None).is_err());
    }

    #[test]
    fn test_validate_unbounded_slab_in_the_middle() {
        let slabs = vec![Slab::unbounded(1.0, 5.5), Slab::unbounded(101.0, 7.0)];
        assert!(validate_slabs(&slabs, None).is_err());
    }

    #[test]
    fn test_validate_negative_rate() {
        let slabs = vec![Slab::unbounded(1.0, -1.0)];
        assert!(validate_slabs(&slabs, None).is_err());
    }

    #[test]
    fn test_validate_not_starting_at_one() {
        let slabs = vec![Slab::unbounded(101.0, 1.0)];
        assert!(validate_slabs(&slabs, None).is_err());
    }
}

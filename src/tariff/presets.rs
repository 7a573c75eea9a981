use crate::{
    quantity::{cost::Cost, percentage::Percentage, units::Units},
    tariff::{
        Tariff,
        category::CategoryTariff,
        schedule::{FlatSchedule, Schedule, Tier, TieredSchedule},
        slab::Slab,
    },
};

/// Built-in tariff tables.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Preset {
    /// Four flat domestic slabs with the first hundred units free.
    Flat,

    /// Eight domestic tiers selected by the total consumption.
    Tiered,
}

impl Preset {
    pub fn tariff(self) -> Tariff {
        match self {
            Self::Flat => flat(),
            Self::Tiered => tiered(),
        }
    }
}

const DUTY: Percentage = Percentage(2.0);

fn flat() -> Tariff {
    Tariff {
        free_allowance: Units::HUNDRED,
        duty: DUTY,
        domestic: CategoryTariff {
            fixed_charge: Cost::from(20.0),
            free_allowance: true,
            schedule: Schedule::Flat(FlatSchedule {
                slabs: vec![
                    Slab::bounded(1.0, 100.0, 0.0),
                    Slab::bounded(101.0, 200.0, 2.5),
                    Slab::bounded(201.0, 500.0, 3.0),
                    Slab::unbounded(501.0, 5.0),
                ],
            }),
        },
        commercial: commercial(),
    }
}

/// The lowest slab of every tier is billed at the tier's next rate,
/// so it is the free allowance that makes the first hundred units free.
/// Submeters splitting the allowance pay for the rest of the lowest slab.
fn tiered() -> Tariff {
    let tier = |max_total_units: Option<f64>, slabs: Vec<Slab>| Tier {
        max_total_units: max_total_units.map(Units::from),
        slabs,
    };
    let up_to_500 = [
        Slab::bounded(1.0, 100.0, 2.35),
        Slab::bounded(101.0, 200.0, 2.35),
        Slab::bounded(201.0, 400.0, 4.7),
        Slab::bounded(401.0, 500.0, 6.3),
    ];
    let above_500 = [
        Slab::bounded(1.0, 100.0, 4.7),
        Slab::bounded(101.0, 400.0, 4.7),
        Slab::bounded(401.0, 500.0, 6.3),
        Slab::bounded(501.0, 600.0, 8.4),
        Slab::bounded(601.0, 800.0, 9.45),
        Slab::bounded(801.0, 1000.0, 10.5),
        Slab::unbounded(1001.0, 11.55),
    ];
    Tariff {
        free_allowance: Units::HUNDRED,
        duty: DUTY,
        domestic: CategoryTariff {
            fixed_charge: Cost::from(20.0),
            free_allowance: true,
            schedule: Schedule::Tiered(TieredSchedule {
                tiers: vec![
                    tier(Some(100.0), up_to_500[..1].to_vec()),
                    tier(Some(200.0), up_to_500[..2].to_vec()),
                    tier(Some(400.0), up_to_500[..3].to_vec()),
                    tier(Some(500.0), up_to_500.to_vec()),
                    tier(Some(600.0), above_500[..4].to_vec()),
                    tier(Some(800.0), above_500[..5].to_vec()),
                    tier(Some(1000.0), above_500[..6].to_vec()),
                    tier(None, above_500.to_vec()),
                ],
            }),
        },
        commercial: commercial(),
    }
}

fn commercial() -> CategoryTariff {
    CategoryTariff {
        fixed_charge: Cost::from(50.0),
        free_allowance: false,
        schedule: Schedule::Flat(FlatSchedule {
            slabs: vec![
                Slab::bounded(1.0, 100.0, 5.5),
                Slab::bounded(101.0, 500.0, 7.0),
                Slab::unbounded(501.0, 9.0),
            ],
        }),
    }
}

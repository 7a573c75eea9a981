use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use tneb::{
    engine::{BillBreakdown, MultiMeterBill},
    quantity::{cost::Cost, percentage::Percentage, units::Units},
    tariff::{
        category::CategoryTariff,
        schedule::{Schedule, Tier},
        slab::Slab,
    },
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn amount(cost: Cost) -> Cell {
    Cell::new(cost.round_to_paise()).set_alignment(CellAlignment::Right)
}

fn optional_amount(cost: Option<Cost>) -> Cell {
    cost.map_or_else(|| Cell::new("–").add_attribute(Attribute::Dim), amount)
}

pub fn build_breakdown_table(bill: &BillBreakdown, units: Units, duty: Percentage) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Item", "Amount"]);
    table.add_row(vec![Cell::new(format!("Energy charge ({units})")), amount(bill.energy_charge)]);
    if let Some(fixed_charge) = bill.fixed_charge {
        table.add_row(vec![Cell::new("Fixed charge"), amount(fixed_charge)]);
    }
    if let Some(subtotal) = bill.subtotal {
        table.add_row(vec![Cell::new("Subtotal").add_attribute(Attribute::Dim), amount(subtotal)]);
    }
    if let Some(duty_amount) = bill.duty {
        table.add_row(vec![Cell::new(format!("Electricity duty ({duty})")), amount(duty_amount)]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        amount(bill.total).add_attribute(Attribute::Bold).fg(Color::Blue),
    ]);
    table
}

pub fn build_multi_meter_table(bill: &MultiMeterBill) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Meter", "Units", "Free", "Energy", "Fixed", "Duty", "Total"]);
    for meter_bill in &bill.per_meter {
        table.add_row(vec![
            Cell::new(meter_bill.meter),
            Cell::new(meter_bill.units.0).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", bill.per_meter_allowance.0.0))
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            amount(meter_bill.breakdown.energy_charge),
            optional_amount(meter_bill.breakdown.fixed_charge),
            optional_amount(meter_bill.breakdown.duty),
            amount(meter_bill.breakdown.total),
        ]);
    }
    let total_units: Units = bill.per_meter.iter().map(|meter_bill| meter_bill.units).sum();
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(total_units.0).set_alignment(CellAlignment::Right),
        Cell::new(""),
        amount(bill.aggregate.energy_charge),
        optional_amount(bill.aggregate.fixed_charge),
        optional_amount(bill.aggregate.duty),
        amount(bill.aggregate.total).add_attribute(Attribute::Bold).fg(Color::Blue),
    ]);
    table
}

/// Render the slabs, with the tier selected by `selected` highlighted.
pub fn build_tariff_table(tariff: &CategoryTariff, selected: Option<&Tier>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Tier", "Slab", "Rate"]);
    match &tariff.schedule {
        Schedule::Flat(schedule) => {
            add_slab_rows(&mut table, "any", &schedule.slabs, Color::Reset);
        }
        Schedule::Tiered(schedule) => {
            for tier in &schedule.tiers {
                let label = tier
                    .max_total_units
                    .map_or_else(|| "above".to_string(), |max| format!("≤ {}", max.0));
                let color = if selected == Some(tier) { Color::Green } else { Color::Reset };
                add_slab_rows(&mut table, &label, &tier.slabs, color);
            }
        }
    }
    table.add_row(vec![
        Cell::new("Fixed charge").add_attribute(Attribute::Dim),
        Cell::new(""),
        amount(tariff.fixed_charge),
    ]);
    table
}

fn add_slab_rows(table: &mut Table, tier_label: &str, slabs: &[Slab], color: Color) {
    for (index, slab) in slabs.iter().enumerate() {
        table.add_row(vec![
            Cell::new(if index == 0 { tier_label } else { "" }).fg(color),
            Cell::new(slab).fg(color),
            Cell::new(slab.rate).set_alignment(CellAlignment::Right).fg(color),
        ]);
    }
}

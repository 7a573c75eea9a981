#![allow(clippy::doc_markdown)]

mod cli;
mod prelude;
mod tables;

use clap::{Parser, crate_version};
use tneb::{quantity::units::Units, tariff::schedule::Schedule};

use crate::{
    cli::{Args, BillArgs, Command, ShowTariffArgs, SplitArgs, TariffArgs},
    prelude::*,
    tables::{build_breakdown_table, build_multi_meter_table, build_tariff_table},
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let tariff_args = &args.tariff;

    match args.command {
        Command::Bill(args) => bill(&args, tariff_args)?,
        Command::Split(args) => split(&args, tariff_args)?,
        Command::Tariff(args) => show_tariff(&args, tariff_args)?,
    }

    info!("done!");
    Ok(())
}

#[instrument(skip_all)]
fn bill(args: &BillArgs, tariff_args: &TariffArgs) -> Result {
    let tariff = tariff_args.load()?;
    let units = Units::from(args.units);
    let bill = args
        .billing
        .engine(&tariff, tariff_args)
        .compute_bill(units, args.billing.category)
        .context("failed to calculate the bill")?;
    info!(total = %bill.total.round_to_paise(), "calculated");

    if args.billing.json {
        println!("{}", serde_json::to_string_pretty(&bill)?);
    } else {
        println!("{}", build_breakdown_table(&bill, units, tariff.duty));
    }
    Ok(())
}

#[instrument(skip_all)]
fn split(args: &SplitArgs, tariff_args: &TariffArgs) -> Result {
    let tariff = tariff_args.load()?;
    let submeters = args.submeters.iter().copied().map(Units::from).collect::<Vec<_>>();
    let bill = args
        .billing
        .engine(&tariff, tariff_args)
        .compute_multi_meter_bill(args.billing.category, Units::from(args.main), &submeters)
        .context("failed to split the bill")?;
    info!(
        n_meters = bill.per_meter.len(),
        per_meter_allowance = ?bill.per_meter_allowance,
        total = %bill.aggregate.total.round_to_paise(),
        "calculated",
    );

    if args.billing.json {
        println!("{}", serde_json::to_string_pretty(&bill)?);
    } else {
        println!("{}", build_multi_meter_table(&bill));
    }
    Ok(())
}

#[instrument(skip_all)]
fn show_tariff(args: &ShowTariffArgs, tariff_args: &TariffArgs) -> Result {
    let tariff = tariff_args.load()?;
    if args.toml {
        print!("{}", toml::to_string(&tariff)?);
        return Ok(());
    }

    let category_tariff = tariff.category(args.category);
    let selected = match (&category_tariff.schedule, args.units) {
        (Schedule::Tiered(schedule), Some(units)) => {
            Some(schedule.select_tier(Units::from(units))?)
        }
        (Schedule::Flat(_), Some(_)) => {
            warn!(category = %args.category, "the schedule is flat, nothing to highlight");
            None
        }
        (_, None) => None,
    };
    println!("{}", build_tariff_table(category_tariff, selected));
    println!("Free allowance: {}, electricity duty: {}", tariff.free_allowance, tariff.duty);
    Ok(())
}

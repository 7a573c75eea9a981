use std::{fs, path::PathBuf};

use clap::{Parser, Subcommand};
use tneb::{
    engine::{BillEngine, Surcharges},
    quantity::units::Units,
    tariff::{Category, Preset, Tariff},
};

use crate::prelude::*;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub tariff: TariffArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Bill a single meter.
    #[clap(name = "bill")]
    Bill(BillArgs),

    /// Bill a main meter and its submeters, sharing the free allowance between them.
    #[clap(name = "split")]
    Split(SplitArgs),

    /// Show the tariff tables.
    #[clap(name = "tariff")]
    Tariff(ShowTariffArgs),
}

#[derive(Parser)]
pub struct TariffArgs {
    /// TOML file with the tariff tables, takes precedence over the preset.
    #[clap(long = "tariff-file", env = "TARIFF_FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Built-in tariff tables.
    #[clap(long = "preset", env = "TARIFF_PRESET", default_value = "tiered", global = true)]
    pub preset: Preset,

    /// Override the tariff's free allowance, in units.
    #[clap(long = "free-allowance", env = "FREE_ALLOWANCE", global = true)]
    pub free_allowance: Option<f64>,
}

impl TariffArgs {
    #[instrument(skip_all)]
    pub fn load(&self) -> Result<Tariff> {
        let tariff = match &self.file {
            Some(path) => {
                info!(path = %path.display(), "loading the tariff…");
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read `{}`", path.display()))?;
                toml::from_str::<Tariff>(&text)
                    .with_context(|| format!("failed to parse `{}`", path.display()))?
            }
            None => {
                debug!(preset = ?self.preset, "using the built-in tariff");
                self.preset.tariff()
            }
        };
        tariff.validate()?;
        Ok(tariff)
    }

    pub fn free_allowance(&self) -> Option<Units> {
        self.free_allowance.map(Units::from)
    }
}

#[derive(Parser)]
pub struct BillingArgs {
    #[clap(long, env = "CATEGORY", default_value = "domestic")]
    pub category: Category,

    /// Add the fixed charge and the electricity duty.
    #[clap(long)]
    pub surcharges: bool,

    /// Print the bill as JSON instead of a table.
    #[clap(long)]
    pub json: bool,
}

impl BillingArgs {
    pub fn engine<'a>(&self, tariff: &'a Tariff, tariff_args: &TariffArgs) -> BillEngine<'a> {
        BillEngine::builder()
            .tariff(tariff)
            .maybe_free_allowance(tariff_args.free_allowance())
            .surcharges(Surcharges::from(self.surcharges))
            .build()
    }
}

#[derive(Parser)]
#[command(allow_negative_numbers = true)]
pub struct BillArgs {
    #[clap(flatten)]
    pub billing: BillingArgs,

    /// Consumed units.
    pub units: f64,
}

#[derive(Parser)]
#[command(allow_negative_numbers = true)]
pub struct SplitArgs {
    #[clap(flatten)]
    pub billing: BillingArgs,

    /// Units consumed by the main meter.
    pub main: f64,

    /// Units consumed by each submeter, in order.
    pub submeters: Vec<f64>,
}

#[derive(Parser)]
pub struct ShowTariffArgs {
    #[clap(long, env = "CATEGORY", default_value = "domestic")]
    pub category: Category,

    /// Highlight the tier selected for this consumption.
    #[clap(long)]
    pub units: Option<f64>,

    /// Dump the whole tariff as TOML, suitable for `--tariff-file`.
    #[clap(long)]
    pub toml: bool,
}

mod analyse;
mod compare;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use self::{
    analyse::{AnalyseArgs, analyse},
    compare::{CompareArgs, compare},
};
use crate::{
    core::{BatteryConfig, HedgeConfig},
    demand::DemandTier,
    emissions::EmissionFactors,
    error::Error,
    loader::PriceLoader,
    quantity::{energy::MegawattHours, price::MegawattHourPrice, proportions::Percentage},
    scenario::Scenario,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyse a single country, or custom price and demand files.
    #[clap(name = "analyse")]
    Analyse(Box<AnalyseArgs>),

    /// Compare up to four countries under the same scenario.
    #[clap(name = "compare")]
    Compare(Box<CompareArgs>),
}

#[derive(Clone, Parser)]
pub struct DataArgs {
    /// Root of the price archive and the emission table.
    #[clap(long = "data-dir", env = "DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Price file path relative to the data directory, `{country}` stands for the lower-cased name.
    #[clap(
        long = "price-file-pattern",
        env = "PRICE_FILE_PATTERN",
        default_value = "europe_prices/{country}_15_24.csv"
    )]
    pub price_file_pattern: String,

    /// Emission table path relative to the data directory.
    #[clap(long = "emission-file", env = "EMISSION_FILE", default_value = "co2/carbon.csv")]
    pub emission_file: PathBuf,
}

impl DataArgs {
    pub fn price_loader(&self) -> PriceLoader {
        PriceLoader::builder()
            .data_dir(self.data_dir.clone())
            .file_pattern(self.price_file_pattern.clone())
            .build()
    }

    pub fn emission_factors(&self) -> Result<EmissionFactors, Error> {
        EmissionFactors::from_path(&self.data_dir.join(&self.emission_file))
    }
}

#[derive(Copy, Clone, Parser)]
pub struct ScenarioArgs {
    #[clap(long, env = "YEAR", default_value = "2023")]
    pub year: i32,

    /// Constant hourly demand.
    #[clap(long = "demand", env = "DEMAND_TIER", default_value = "5-mwh")]
    pub demand_tier: DemandTier,

    #[clap(flatten)]
    pub battery: BatteryArgs,

    #[clap(flatten)]
    pub hedge: HedgeArgs,
}

impl ScenarioArgs {
    pub fn scenario(&self) -> Result<Scenario, Error> {
        Scenario::builder()
            .year(self.year)
            .demand_tier(self.demand_tier)
            .maybe_battery(self.battery.config(self.demand_tier))
            .hedge(self.hedge.config())
            .build()
            .validate()
    }
}

#[derive(Copy, Clone, Parser)]
pub struct BatteryArgs {
    /// Include the battery storage.
    #[clap(long = "battery", env = "BATTERY")]
    pub is_enabled: bool,

    /// Battery capacity, defaults to the one suggested for the demand tier.
    #[clap(long = "battery-capacity-mwh", env = "BATTERY_CAPACITY_MWH")]
    pub capacity: Option<MegawattHours>,

    /// Round-trip efficiency.
    #[clap(long = "battery-efficiency-percent", env = "BATTERY_EFFICIENCY_PERCENT", default_value = "90")]
    pub efficiency: Percentage,

    #[clap(long = "battery-dod-percent", env = "BATTERY_DOD_PERCENT", default_value = "80")]
    pub depth_of_discharge: Percentage,

    /// Number of charging and of discharging hours per day.
    #[clap(long = "storage-hours", env = "STORAGE_HOURS", default_value = "4")]
    pub storage_hours: u32,
}

impl BatteryArgs {
    pub fn config(&self, demand_tier: DemandTier) -> Option<BatteryConfig> {
        self.is_enabled.then(|| {
            BatteryConfig::builder()
                .capacity(self.capacity.unwrap_or_else(|| demand_tier.default_battery_capacity()))
                .efficiency(self.efficiency)
                .depth_of_discharge(self.depth_of_discharge)
                .storage_hours(self.storage_hours)
                .build()
        })
    }
}

#[derive(Copy, Clone, Parser)]
pub struct HedgeArgs {
    /// PPA strike price in euro per megawatt-hour.
    #[clap(long = "ppa-price", env = "PPA_PRICE", default_value = "40")]
    pub ppa_price: MegawattHourPrice,

    /// Hedged volume in megawatt-hours per day.
    #[clap(long = "hedge-volume-mwh", env = "HEDGE_VOLUME_MWH", default_value = "6")]
    pub daily_volume: MegawattHours,
}

impl HedgeArgs {
    pub fn config(&self) -> HedgeConfig {
        HedgeConfig::builder().ppa_price(self.ppa_price).daily_volume(self.daily_volume).build()
    }
}

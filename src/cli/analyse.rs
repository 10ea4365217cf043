use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::{
    cli::{DataArgs, ScenarioArgs},
    country::Country,
    export::export_hourly,
    loader::{load_custom_demand, load_custom_prices},
    prelude::*,
    scenario::evaluate,
    tables::{build_hourly_table, build_monthly_table, build_savings_table, build_summary_table},
};

#[derive(Parser)]
pub struct AnalyseArgs {
    /// Country as named in the emission table.
    #[clap(long, env = "COUNTRY", default_value = "Germany")]
    pub country: Country,

    /// Use these hourly prices instead of the country archive.
    #[clap(long = "price-file", env = "PRICE_FILE")]
    pub price_file: Option<PathBuf>,

    /// Use this hourly demand, in kilowatt-hours, instead of the demand tier.
    #[clap(long = "demand-file", env = "DEMAND_FILE")]
    pub demand_file: Option<PathBuf>,

    /// Print the hourly allocation of this day.
    #[clap(long)]
    pub day: Option<NaiveDate>,

    /// Print the daily battery arbitrage savings.
    #[clap(long)]
    pub savings: bool,

    /// Export the hourly allocation to this CSV file.
    #[clap(long = "hourly-csv")]
    pub hourly_csv: Option<PathBuf>,

    /// Print the result as JSON instead of tables.
    #[clap(long)]
    pub json: bool,

    #[clap(flatten)]
    pub data: DataArgs,

    #[clap(flatten)]
    pub scenario: ScenarioArgs,
}

#[instrument(skip_all, fields(country = args.country.name()))]
pub fn analyse(args: &AnalyseArgs) -> Result {
    let scenario = args.scenario.scenario()?;

    let prices = match &args.price_file {
        Some(path) => load_custom_prices(path)?,
        None => args.data.price_loader().load(&args.country, scenario.year)?,
    };
    let demand = match &args.demand_file {
        Some(path) => load_custom_demand(path)?,
        None => scenario.demand_tier.series(&prices),
    };
    info!(n_hours = prices.len(), "loaded");

    let emission_factor = args.data.emission_factors()?.resolve(&args.country, scenario.year);
    let result = evaluate(&prices, &demand, scenario.battery, &scenario.hedge, emission_factor)?;

    if let Some(path) = &args.hourly_csv {
        export_hourly(path, &result.hourly)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", build_summary_table(&result));
    println!("{}", build_monthly_table(&result));
    if args.savings {
        let arbitrage = result.arbitrage.as_ref().context("`--savings` requires `--battery`")?;
        println!("{}", build_savings_table(arbitrage));
    }
    if let Some(day) = args.day {
        let hours: Vec<_> =
            result.hourly.iter().filter(|allocation| allocation.timestamp.date_naive() == day).copied().collect();
        ensure!(!hours.is_empty(), "no hours on {day}");
        println!("{}", build_hourly_table(&hours));
    }
    Ok(())
}

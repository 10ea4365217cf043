use clap::Parser;

use crate::{
    cli::{DataArgs, ScenarioArgs},
    comparator::Comparator,
    country::Country,
    prelude::*,
    tables::build_comparison_table,
};

#[derive(Parser)]
pub struct CompareArgs {
    /// Countries to compare, as named in the emission table.
    #[clap(
        long = "with",
        env = "COUNTRIES",
        value_delimiter = ',',
        num_args = 1..,
        required = true,
    )]
    pub countries: Vec<Country>,

    /// Print the comparison as JSON instead of a table.
    #[clap(long)]
    pub json: bool,

    #[clap(flatten)]
    pub data: DataArgs,

    #[clap(flatten)]
    pub scenario: ScenarioArgs,
}

#[instrument(skip_all)]
pub fn compare(args: &CompareArgs) -> Result {
    let loader = args.data.price_loader();
    let emission_factors = args.data.emission_factors()?;
    let comparison = Comparator::builder()
        .loader(&loader)
        .emission_factors(&emission_factors)
        .build()
        .compare(&args.countries, &args.scenario.scenario()?)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        println!("{}", build_comparison_table(&comparison));
    }
    Ok(())
}

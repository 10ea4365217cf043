use itertools::Itertools;
use rayon::prelude::*;
use serde::{Serialize, Serializer};

use crate::{
    country::Country,
    emissions::EmissionFactors,
    error::Error,
    loader::PriceLoader,
    prelude::*,
    quantity::{
        cost::Cost,
        emissions::{GramsPerKilowattHour, Tonnes},
        energy::MegawattHours,
        price::MegawattHourPrice,
    },
    scenario::{Scenario, ScenarioResult, evaluate},
};

/// Runs one scenario over several countries.
#[derive(Copy, Clone, bon::Builder)]
pub struct Comparator<'a> {
    loader: &'a PriceLoader,
    emission_factors: &'a EmissionFactors,
}

impl Comparator<'_> {
    pub const MAX_COUNTRIES: usize = 4;

    /// Evaluate every distinct country in parallel, keeping the requested order.
    ///
    /// A failing country does not fail the comparison, its row keeps the error instead.
    #[instrument(skip_all, fields(year = scenario.year, n_countries = countries.len()))]
    pub fn compare(&self, countries: &[Country], scenario: &Scenario) -> Result<Comparison, Error> {
        let scenario = scenario.validate()?;
        let countries: Vec<&Country> = countries.iter().unique_by(|country| country.file_key()).collect();
        if countries.is_empty() {
            return Err(Error::InvalidConfig("no countries to compare".to_owned()));
        }
        if countries.len() > Self::MAX_COUNTRIES {
            return Err(Error::InvalidConfig(format!(
                "at most {} countries can be compared, got {}",
                Self::MAX_COUNTRIES,
                countries.len(),
            )));
        }

        let rows: Vec<ComparisonRow> = countries
            .into_par_iter()
            .map(|country| {
                let outcome = self.evaluate(country, &scenario);
                if let Err(error) = &outcome {
                    warn!(country = country.name(), kind = error.kind(), %error, "failed");
                }
                ComparisonRow { country: country.clone(), outcome }
            })
            .collect();
        info!(n_succeeded = rows.iter().filter(|row| row.outcome.is_ok()).count(), "compared");
        Ok(Comparison { scenario, rows })
    }

    fn evaluate(&self, country: &Country, scenario: &Scenario) -> Result<ScenarioResult, Error> {
        let prices = self.loader.load(country, scenario.year)?;
        let demand = scenario.demand_tier.series(&prices);
        let emission_factor = self.emission_factors.resolve(country, scenario.year);
        evaluate(&prices, &demand, scenario.battery, &scenario.hedge, emission_factor)
    }
}

#[must_use]
#[derive(Debug, Serialize)]
pub struct Comparison {
    pub scenario: Scenario,
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug)]
pub struct ComparisonRow {
    pub country: Country,
    pub outcome: Result<ScenarioResult, Error>,
}

impl ComparisonRow {
    pub fn result(&self) -> Option<&ScenarioResult> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&Error> {
        self.outcome.as_ref().err()
    }

    pub fn total_spot_cost(&self) -> Option<Cost> {
        self.result().map(|result| result.total_spot_cost)
    }

    pub fn total_battery_cost(&self) -> Option<Cost> {
        self.result().and_then(|result| result.total_battery_cost)
    }

    pub fn total_hybrid_cost(&self) -> Option<Cost> {
        self.result().map(|result| result.total_hybrid_cost)
    }

    pub fn total_ppa_cost(&self) -> Option<Cost> {
        self.result().map(|result| result.total_ppa_cost)
    }

    pub fn total_demand(&self) -> Option<MegawattHours> {
        self.result().map(|result| result.total_demand)
    }

    pub fn co2(&self) -> Option<Tonnes> {
        self.result().map(|result| result.co2)
    }

    pub fn emission_factor(&self) -> Option<GramsPerKilowattHour> {
        self.result().map(|result| result.emission_factor.intensity)
    }

    pub fn lcoe_spot(&self) -> Option<MegawattHourPrice> {
        self.result().and_then(|result| result.lcoe.spot)
    }

    pub fn lcoe_battery(&self) -> Option<MegawattHourPrice> {
        self.result().and_then(|result| result.lcoe.battery)
    }

    pub fn lcoe_hybrid(&self) -> Option<MegawattHourPrice> {
        self.result().and_then(|result| result.lcoe.hybrid)
    }
}

/// Flat row with `null` in place of the absent metrics.
#[derive(Serialize)]
struct FlatRow<'a> {
    country: &'a Country,
    iso_code: Option<&'static str>,
    error_kind: Option<&'static str>,
    error: Option<String>,
    total_spot_cost: Option<Cost>,
    total_battery_cost: Option<Cost>,
    total_hybrid_cost: Option<Cost>,
    total_hedge_settlement: Option<Cost>,
    total_ppa_cost: Option<Cost>,
    total_demand: Option<MegawattHours>,
    co2: Option<Tonnes>,
    emission_factor: Option<GramsPerKilowattHour>,
    emission_factor_is_fallback: Option<bool>,
    lcoe_spot: Option<MegawattHourPrice>,
    lcoe_battery: Option<MegawattHourPrice>,
    lcoe_hybrid: Option<MegawattHourPrice>,
    monthly_spot_costs: Option<[Cost; 12]>,
}

impl Serialize for ComparisonRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FlatRow {
            country: &self.country,
            iso_code: self.country.iso_code(),
            error_kind: self.error().map(Error::kind),
            error: self.error().map(ToString::to_string),
            total_spot_cost: self.total_spot_cost(),
            total_battery_cost: self.total_battery_cost(),
            total_hybrid_cost: self.total_hybrid_cost(),
            total_hedge_settlement: self.result().map(|result| result.total_hedge_settlement),
            total_ppa_cost: self.total_ppa_cost(),
            total_demand: self.total_demand(),
            co2: self.co2(),
            emission_factor: self.emission_factor(),
            emission_factor_is_fallback: self.result().map(|result| result.emission_factor.is_fallback),
            lcoe_spot: self.lcoe_spot(),
            lcoe_battery: self.lcoe_battery(),
            lcoe_hybrid: self.lcoe_hybrid(),
            monthly_spot_costs: self.result().map(|result| result.monthly_spot_costs),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use std::{fmt::Write, fs};

    use approx::assert_abs_diff_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::{core::HedgeConfig, demand::DemandTier};

    /// Data directory with a single day of Spanish prices in 2023.
    fn data_dir() -> Result<TempDir> {
        let data_dir = tempfile::tempdir()?;
        let prices_dir = data_dir.path().join("europe_prices");
        fs::create_dir_all(&prices_dir)?;
        let mut contents = String::from("timestamp,Grid_Price_EUR_per_MWh\n");
        for hour in 0..24 {
            let price = if hour < 20 { 10 } else { 100 };
            writeln!(contents, "2023-05-01 {hour:02}:00:00,{price}")?;
        }
        fs::write(prices_dir.join("spain_15_24.csv"), contents)?;
        Ok(data_dir)
    }

    fn scenario(year: i32) -> Scenario {
        Scenario::builder()
            .year(year)
            .demand_tier(DemandTier::FiveMegawattHours)
            .hedge(HedgeConfig::builder().ppa_price(MegawattHourPrice::from(50.0)).build())
            .build()
    }

    #[test]
    fn test_partial_failure() -> Result {
        let data_dir = data_dir()?;
        let loader = PriceLoader::builder().data_dir(data_dir.path()).build();
        let emission_factors = EmissionFactors::from_iter([("Spain", 2023, 100.0)]);
        let comparator = Comparator::builder().loader(&loader).emission_factors(&emission_factors).build();

        let countries = [Country::new("Spain"), Country::new("Atlantis"), Country::new("spain")];
        let comparison = comparator.compare(&countries, &scenario(2023))?;

        assert_eq!(comparison.rows.len(), 2);
        assert_eq!(comparison.rows[0].country.name(), "Spain");
        assert_abs_diff_eq!(comparison.rows[0].total_spot_cost().unwrap().0, 3000.0);
        assert_abs_diff_eq!(comparison.rows[0].co2().unwrap().0, 12.0);

        let atlantis = &comparison.rows[1];
        assert_eq!(atlantis.country.name(), "Atlantis");
        assert!(matches!(atlantis.error(), Some(Error::DataNotFound { .. })));
        assert!(atlantis.total_spot_cost().is_none());
        assert!(atlantis.lcoe_hybrid().is_none());

        let json = serde_json::to_value(&comparison)?;
        assert_eq!(json["rows"][1]["error_kind"], "data-not-found");
        assert!(json["rows"][1]["total_spot_cost"].is_null());
        assert!(json["rows"][0]["total_battery_cost"].is_null());
        assert_eq!(json["rows"][0]["iso_code"], "ES");
        Ok(())
    }

    #[test]
    fn test_empty_year() -> Result {
        let data_dir = data_dir()?;
        let loader = PriceLoader::builder().data_dir(data_dir.path()).build();
        let emission_factors = EmissionFactors::default();
        let comparator = Comparator::builder().loader(&loader).emission_factors(&emission_factors).build();
        let comparison = comparator.compare(&[Country::new("Spain")], &scenario(2019))?;
        assert!(matches!(comparison.rows[0].error(), Some(Error::EmptyRange { year: 2019, .. })));
        Ok(())
    }

    #[test]
    fn test_request_errors() {
        let loader = PriceLoader::builder().data_dir("/nonexistent").build();
        let emission_factors = EmissionFactors::default();
        let comparator = Comparator::builder().loader(&loader).emission_factors(&emission_factors).build();

        assert!(matches!(comparator.compare(&[], &scenario(2023)), Err(Error::InvalidConfig(_))));

        let countries: Vec<_> =
            ["Spain", "France", "Germany", "Italy", "Poland"].into_iter().map(Country::new).collect();
        assert!(matches!(comparator.compare(&countries, &scenario(2023)), Err(Error::InvalidConfig(_))));
    }
}

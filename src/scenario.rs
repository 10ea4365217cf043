use chrono::Datelike;
use serde::Serialize;

use crate::{
    core::{BatteryArbitrage, BatteryConfig, Dispatcher, HedgeConfig, HourlyAllocation},
    demand::DemandTier,
    emissions::EmissionFactor,
    error::Error,
    prelude::*,
    quantity::{cost::Cost, emissions::Tonnes, energy::MegawattHours, price::MegawattHourPrice},
    series::{DemandSeries, PriceSeries},
};

/// Parameters shared by every country of a comparison.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, bon::Builder)]
pub struct Scenario {
    pub year: i32,
    pub demand_tier: DemandTier,

    /// Battery participation is disabled when absent.
    pub battery: Option<BatteryConfig>,

    pub hedge: HedgeConfig,
}

impl Scenario {
    pub fn validate(self) -> Result<Self, Error> {
        if let Some(battery) = self.battery {
            battery.validate()?;
        }
        self.hedge.validate()?;
        Ok(self)
    }
}

/// Levelized cost of electricity per procurement strategy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct Lcoe {
    pub spot: Option<MegawattHourPrice>,
    pub battery: Option<MegawattHourPrice>,
    pub hybrid: Option<MegawattHourPrice>,
}

/// Annual totals of a single price/demand pair.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct ScenarioResult {
    /// Buying the whole demand on the spot market.
    pub total_spot_cost: Cost,

    /// Spot cost reduced by the standalone battery arbitrage, when the battery is enabled.
    pub total_battery_cost: Option<Cost>,

    /// Battery, hedge and spot combined.
    pub total_hybrid_cost: Cost,

    pub total_hedge_settlement: Cost,

    /// Buying the whole demand at the strike price.
    pub total_ppa_cost: Cost,

    pub total_demand: MegawattHours,
    pub co2: Tonnes,
    pub emission_factor: EmissionFactor,
    pub lcoe: Lcoe,

    /// Spot cost per calendar month, January first.
    pub monthly_spot_costs: [Cost; 12],

    #[serde(skip)]
    pub arbitrage: Option<BatteryArbitrage>,

    #[serde(skip)]
    pub hourly: Vec<HourlyAllocation>,
}

impl ScenarioResult {
    pub fn aggregate(
        hourly: Vec<HourlyAllocation>,
        arbitrage: Option<BatteryArbitrage>,
        emission_factor: EmissionFactor,
        hedge: &HedgeConfig,
    ) -> Self {
        let mut total_demand = MegawattHours::ZERO;
        let mut total_spot_cost = Cost::ZERO;
        let mut total_hybrid_cost = Cost::ZERO;
        let mut total_hedge_settlement = Cost::ZERO;
        let mut monthly_spot_costs = [Cost::ZERO; 12];

        for allocation in &hourly {
            let spot_cost = allocation.spot_price * allocation.demand;
            total_demand += allocation.demand;
            total_spot_cost += spot_cost;
            total_hybrid_cost += allocation.hourly_cost;
            total_hedge_settlement += allocation.hedge_settlement;
            monthly_spot_costs[allocation.timestamp.month0() as usize] += spot_cost;
        }

        let total_battery_cost =
            arbitrage.as_ref().map(|arbitrage| total_spot_cost - arbitrage.total_saving());
        let levelized = |cost: Cost| (total_demand > MegawattHours::ZERO).then(|| cost / total_demand);

        Self {
            total_spot_cost,
            total_battery_cost,
            total_hybrid_cost,
            total_hedge_settlement,
            total_ppa_cost: total_demand * hedge.ppa_price,
            total_demand,
            co2: total_demand * emission_factor.intensity,
            emission_factor,
            lcoe: Lcoe {
                spot: levelized(total_spot_cost),
                battery: total_battery_cost.and_then(levelized),
                hybrid: levelized(total_hybrid_cost),
            },
            monthly_spot_costs,
            arbitrage,
            hourly,
        }
    }
}

/// Run the dispatch, the battery arbitrage and the aggregation over one price/demand pair.
#[instrument(skip_all, fields(n_hours = prices.len(), has_battery = battery.is_some()))]
pub fn evaluate(
    prices: &PriceSeries,
    demand: &DemandSeries,
    battery: Option<BatteryConfig>,
    hedge: &HedgeConfig,
    emission_factor: EmissionFactor,
) -> Result<ScenarioResult, Error> {
    let hourly = Dispatcher::builder()
        .prices(prices)
        .demand(demand)
        .maybe_battery(battery)
        .hedge(*hedge)
        .build()
        .dispatch()?;
    let arbitrage = battery
        .map(|battery| BatteryArbitrage::evaluate(prices, demand, &battery))
        .transpose()?;
    let result = ScenarioResult::aggregate(hourly, arbitrage, emission_factor, hedge);
    debug!(
        total_spot_cost = %result.total_spot_cost,
        total_hybrid_cost = %result.total_hybrid_cost,
        "evaluated"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        quantity::{emissions::GramsPerKilowattHour, proportions::Percentage},
        series::{
            Series,
            tests::{hourly, price_series},
        },
    };

    fn hedge(ppa_price: f64, daily_volume: f64) -> HedgeConfig {
        HedgeConfig::builder()
            .ppa_price(MegawattHourPrice::from(ppa_price))
            .daily_volume(MegawattHours::from(daily_volume))
            .build()
    }

    fn two_level_day() -> PriceSeries {
        let mut prices = vec![10.0; 20];
        prices.extend([100.0; 4]);
        price_series(&prices)
    }

    fn ideal_battery() -> BatteryConfig {
        BatteryConfig::builder()
            .capacity(MegawattHours::from(4.0))
            .efficiency(Percentage::HUNDRED)
            .depth_of_discharge(Percentage::HUNDRED)
            .storage_hours(4)
            .build()
    }

    #[test]
    fn test_spot_only() -> Result {
        let prices = two_level_day();
        let demand = DemandTier::FiveMegawattHours.series(&prices);
        let result = evaluate(&prices, &demand, None, &hedge(50.0, 0.0), EmissionFactor::FALLBACK)?;
        assert_abs_diff_eq!(result.total_spot_cost.0, 3000.0);
        assert_abs_diff_eq!(result.total_hybrid_cost.0, 3000.0);
        assert_abs_diff_eq!(result.total_demand.0, 120.0);
        assert_abs_diff_eq!(result.lcoe.spot.unwrap().0, 25.0);
        assert_abs_diff_eq!(result.total_ppa_cost.0, 6000.0);
        assert!(result.total_battery_cost.is_none());
        assert!(result.lcoe.battery.is_none());
        assert_eq!(result.hourly.len(), 24);
        Ok(())
    }

    #[test]
    fn test_hedged() -> Result {
        let prices = two_level_day();
        let demand = DemandTier::FiveMegawattHours.series(&prices);
        let result = evaluate(&prices, &demand, None, &hedge(50.0, 24.0), EmissionFactor::FALLBACK)?;
        assert_abs_diff_eq!(result.total_spot_cost.0, 3000.0);
        assert_abs_diff_eq!(result.total_hybrid_cost.0, 3600.0);
        assert_abs_diff_eq!(result.lcoe.hybrid.unwrap().0, 30.0);
        // 20 × (50 − 10) + 4 × (50 − 100):
        assert_abs_diff_eq!(result.total_hedge_settlement.0, 600.0);
        Ok(())
    }

    #[test]
    fn test_battery_cost() -> Result {
        let prices = two_level_day();
        let demand = DemandTier::FiveMegawattHours.series(&prices);
        let result =
            evaluate(&prices, &demand, Some(ideal_battery()), &hedge(50.0, 0.0), EmissionFactor::FALLBACK)?;
        assert_abs_diff_eq!(result.total_battery_cost.unwrap().0, 2640.0);
        assert_abs_diff_eq!(result.lcoe.battery.unwrap().0, 22.0);
        assert_abs_diff_eq!(result.total_hybrid_cost.0, 2600.0);
        Ok(())
    }

    #[test]
    fn test_zero_demand() -> Result {
        let prices = two_level_day();
        let demand = prices.map(|_| MegawattHours::ZERO);
        let result =
            evaluate(&prices, &demand, Some(ideal_battery()), &hedge(50.0, 24.0), EmissionFactor::FALLBACK)?;
        assert_abs_diff_eq!(result.total_spot_cost.0, 0.0);
        assert_abs_diff_eq!(result.total_battery_cost.unwrap().0, 0.0);
        assert_abs_diff_eq!(result.total_hybrid_cost.0, 0.0);
        assert_eq!(result.lcoe, Lcoe::default());
        Ok(())
    }

    #[test]
    fn test_co2() -> Result {
        let prices = two_level_day();
        let demand = DemandTier::FiveMegawattHours.series(&prices);
        let factor = EmissionFactor::known(GramsPerKilowattHour::from(400.0));
        let result = evaluate(&prices, &demand, None, &hedge(50.0, 0.0), factor)?;
        assert_abs_diff_eq!(result.co2.0, 48.0);
        assert!(!result.emission_factor.is_fallback);
        Ok(())
    }

    #[test]
    fn test_hedge_never_raises_cost_below_spot() -> Result {
        let prices = price_series(
            &(0..96).map(|hour| 20.0 + f64::from((hour * 13) % 17) * 4.5).collect::<Vec<_>>(),
        );
        let demand = DemandTier::TenMegawattHours.series(&prices);
        let battery = BatteryConfig::builder().capacity(MegawattHours::from(13.89)).build();
        let baseline =
            evaluate(&prices, &demand, Some(battery), &hedge(15.0, 0.0), EmissionFactor::FALLBACK)?
                .total_hybrid_cost;
        for daily_volume in [6.0, 24.0, 120.0, 240.0, 1000.0] {
            let result =
                evaluate(&prices, &demand, Some(battery), &hedge(15.0, daily_volume), EmissionFactor::FALLBACK)?;
            assert!(result.total_hybrid_cost <= baseline, "{daily_volume}");
        }
        Ok(())
    }

    #[test]
    fn test_monthly_buckets() -> Result {
        let points = hourly(2024, 1, 31, 48)
            .into_iter()
            .map(|timestamp| (timestamp, MegawattHourPrice::from(10.0)))
            .collect();
        let prices = Series::try_from_points(points)?;
        let demand = DemandTier::FiveMegawattHours.series(&prices);
        let result = evaluate(&prices, &demand, None, &hedge(50.0, 0.0), EmissionFactor::FALLBACK)?;
        assert_abs_diff_eq!(result.monthly_spot_costs[0].0, 1200.0);
        assert_abs_diff_eq!(result.monthly_spot_costs[1].0, 1200.0);
        assert!(result.monthly_spot_costs[2..].iter().all(|cost| *cost == Cost::ZERO));
        Ok(())
    }

    #[test]
    fn test_scenario_validate() {
        let scenario = Scenario::builder()
            .year(2023)
            .demand_tier(DemandTier::FiveMegawattHours)
            .battery(BatteryConfig::builder().capacity(MegawattHours::from(6.0)).storage_hours(30).build())
            .hedge(hedge(40.0, 6.0))
            .build();
        assert!(matches!(scenario.validate(), Err(Error::InvalidConfig(_))));
    }
}

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    core::{BatteryConfig, DaySlots},
    error::Error,
    prelude::*,
    quantity::{cost::Cost, energy::MegawattHours, price::MegawattHourPrice, time::Hours},
    series::{DemandSeries, PriceSeries},
};

/// Battery arbitrage result of a single day.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct DailySaving {
    pub date: NaiveDate,

    /// Value of the energy sold back in the most expensive hours, after losses.
    pub discharge_value: Cost,

    /// Cost of charging in the cheapest hours.
    pub charge_cost: Cost,
}

impl DailySaving {
    pub fn saving(&self) -> Cost {
        self.discharge_value - self.charge_cost
    }
}

/// Standalone spot-plus-battery savings estimate.
///
/// Unlike [`crate::core::Dispatcher`], it costs the charging and assumes the full hourly power is
/// traded regardless of the demand.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BatteryArbitrage(Vec<DailySaving>);

impl BatteryArbitrage {
    #[instrument(skip_all, fields(storage_hours = battery.storage_hours))]
    pub fn evaluate(
        prices: &PriceSeries,
        demand: &DemandSeries,
        battery: &BatteryConfig,
    ) -> Result<Self, Error> {
        prices.ensure_aligned(demand)?;
        if !battery.is_active() || demand.values().sum::<MegawattHours>() <= MegawattHours::ZERO {
            return Ok(Self::default());
        }

        let hourly_energy = battery.hourly_power_limit() * Hours::ONE;
        let discharge_ratio = battery.efficiency.to_ratio() * battery.depth_of_discharge.to_ratio();

        let days = prices
            .days()
            .into_iter()
            .map(|(date, hours)| {
                let day_prices: Vec<MegawattHourPrice> =
                    prices.points()[hours].iter().map(|(_, price)| *price).collect();
                let slots = DaySlots::rank(&day_prices, battery.storage_hours as usize);
                let sum_prices =
                    |indices: &[usize]| indices.iter().map(|index| day_prices[*index]).sum::<MegawattHourPrice>();
                DailySaving {
                    date,
                    discharge_value: sum_prices(&slots.discharge) * hourly_energy * discharge_ratio,
                    charge_cost: sum_prices(&slots.charge) * hourly_energy,
                }
            })
            .collect();
        Ok(Self(days))
    }

    pub fn days(&self) -> &[DailySaving] {
        &self.0
    }

    pub fn total_saving(&self) -> Cost {
        self.0.iter().map(DailySaving::saving).sum()
    }
}

use bon::Builder;

use crate::{
    core::{BatteryConfig, BatteryMode, DaySlots, HedgeConfig, HourlyAllocation},
    error::Error,
    prelude::*,
    quantity::{energy::MegawattHours, time::Hours},
    series::{DemandSeries, PriceSeries},
};

/// Splits the hourly demand between the battery, the hedged volume and the spot market.
///
/// Every calendar day is handled on its own: the battery discharges in the day's most expensive
/// hours and charges in its cheapest ones, nothing is carried over to the next day.
#[derive(Builder)]
pub struct Dispatcher<'a> {
    prices: &'a PriceSeries,
    demand: &'a DemandSeries,
    battery: Option<BatteryConfig>,
    hedge: HedgeConfig,
}

impl Dispatcher<'_> {
    /// Allocate every hour, in the input order.
    #[instrument(skip_all, fields(n_hours = self.prices.len()))]
    pub fn dispatch(&self) -> Result<Vec<HourlyAllocation>, Error> {
        self.prices.ensure_aligned(self.demand)?;
        if let Some((timestamp, demand)) =
            self.demand.points().iter().find(|(_, demand)| !demand.is_finite() || *demand < MegawattHours::ZERO)
        {
            return Err(Error::InvalidSeries(format!("demand of {demand} at {timestamp}")));
        }

        // Without any demand there is nothing to serve and the battery stays idle:
        let total_demand: MegawattHours = self.demand.values().sum();
        let battery =
            self.battery.filter(|battery| battery.is_active() && total_demand > MegawattHours::ZERO);
        let hourly_hedge = self.hedge.hourly_volume();

        let mut allocations = Vec::with_capacity(self.prices.len());
        for (_, hours) in self.prices.days() {
            let prices = &self.prices.points()[hours.clone()];
            let demand = &self.demand.points()[hours];

            let slots = battery.map(|battery| {
                let day_prices: Vec<_> = prices.iter().map(|(_, price)| *price).collect();
                (battery, DaySlots::rank(&day_prices, battery.storage_hours as usize))
            });

            let mut state_of_charge = MegawattHours::ZERO;
            for (index, ((timestamp, spot_price), (_, demand))) in prices.iter().zip(demand).enumerate() {
                let (battery_mode, battery_flow, discharge) = match &slots {
                    Some((battery, slots)) => match slots.mode(index) {
                        BatteryMode::Discharge => {
                            let discharge = battery.discharge_per_hour().min(*demand);
                            (BatteryMode::Discharge, -discharge, discharge)
                        }
                        BatteryMode::Charge => (
                            BatteryMode::Charge,
                            battery.hourly_power_limit() * Hours::ONE,
                            MegawattHours::ZERO,
                        ),
                        BatteryMode::Idle => (BatteryMode::Idle, MegawattHours::ZERO, MegawattHours::ZERO),
                    },
                    None => (BatteryMode::Idle, MegawattHours::ZERO, MegawattHours::ZERO),
                };
                state_of_charge += battery_flow;

                let remaining = (*demand - discharge).max(MegawattHours::ZERO);
                let hedge = remaining.min(hourly_hedge);
                let spot = (remaining - hedge).max(MegawattHours::ZERO);
                let spot_cost = *spot_price * spot;

                allocations.push(HourlyAllocation {
                    timestamp: *timestamp,
                    demand: *demand,
                    spot_price: *spot_price,
                    battery_mode,
                    battery_flow,
                    discharge,
                    hedge,
                    spot,
                    spot_cost,
                    hedge_settlement: (self.hedge.ppa_price - *spot_price) * hedge,
                    hourly_cost: spot_cost + self.hedge.ppa_price * hedge,
                    state_of_charge,
                });
            }
        }

        debug!(n_allocations = allocations.len(), "dispatched");
        Ok(allocations)
    }
}

use std::fmt::{Display, Formatter};

use comfy_table::Color;
use serde::Serialize;

use crate::{
    quantity::{cost::Cost, energy::MegawattHours, price::MegawattHourPrice},
    series::Timestamp,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryMode {
    Idle,

    /// Drawing from the grid in one of the cheapest hours.
    Charge,

    /// Serving the demand in one of the most expensive hours.
    Discharge,
}

impl Display for BatteryMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Charge => write!(f, "Charge"),
            Self::Discharge => write!(f, "Discharge"),
        }
    }
}

impl BatteryMode {
    pub const fn color(self) -> Color {
        match self {
            Self::Charge => Color::Green,
            Self::Discharge => Color::Blue,
            Self::Idle => Color::Reset,
        }
    }
}

/// How the demand of a single hour is served and what it costs.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct HourlyAllocation {
    pub timestamp: Timestamp,
    pub demand: MegawattHours,
    pub spot_price: MegawattHourPrice,
    pub battery_mode: BatteryMode,

    /// Negative when discharging into the demand, positive when charging from the grid.
    pub battery_flow: MegawattHours,

    /// Demand served by the battery.
    pub discharge: MegawattHours,

    /// Demand served by the hedged volume.
    pub hedge: MegawattHours,

    /// Demand bought on the spot market.
    pub spot: MegawattHours,

    pub spot_cost: Cost,

    /// Contract-for-difference settlement, reported only.
    pub hedge_settlement: Cost,

    /// Spot purchase plus the hedged volume at the strike price.
    pub hourly_cost: Cost,

    /// Running sum of the battery flow since the start of the day.
    ///
    /// Charging is not capped by the demand while discharging is, so it need not return to zero.
    pub state_of_charge: MegawattHours,
}

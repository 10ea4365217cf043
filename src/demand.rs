use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    quantity::energy::MegawattHours,
    series::{DemandSeries, PriceSeries},
};

/// Fixed constant-load profiles offered for the analysis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, clap::ValueEnum)]
pub enum DemandTier {
    #[value(name = "600-kwh")]
    #[serde(rename = "600 kWh")]
    SixHundredKilowattHours,

    #[value(name = "5-mwh")]
    #[serde(rename = "5 MWh")]
    FiveMegawattHours,

    #[value(name = "10-mwh")]
    #[serde(rename = "10 MWh")]
    TenMegawattHours,

    #[value(name = "15-mwh")]
    #[serde(rename = "15 MWh")]
    FifteenMegawattHours,
}

impl DemandTier {
    /// Demand in every hour of the profile.
    pub fn hourly_demand(self) -> MegawattHours {
        MegawattHours::from_kilowatt_hours(match self {
            Self::SixHundredKilowattHours => 600.0,
            Self::FiveMegawattHours => 5_000.0,
            Self::TenMegawattHours => 10_000.0,
            Self::FifteenMegawattHours => 15_000.0,
        })
    }

    /// Battery capacity suggested when none is specified.
    pub fn default_battery_capacity(self) -> MegawattHours {
        MegawattHours::from(match self {
            Self::SixHundredKilowattHours => 0.6,
            Self::FiveMegawattHours => 6.0,
            Self::TenMegawattHours => 13.89,
            Self::FifteenMegawattHours => 20.83,
        })
    }

    /// Constant demand aligned one-to-one with the price timestamps.
    pub fn series(self, prices: &PriceSeries) -> DemandSeries {
        let demand = self.hourly_demand();
        prices.map(|_| demand)
    }
}

impl Display for DemandTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SixHundredKilowattHours => write!(f, "600 kWh"),
            Self::FiveMegawattHours => write!(f, "5 MWh"),
            Self::TenMegawattHours => write!(f, "10 MWh"),
            Self::FifteenMegawattHours => write!(f, "15 MWh"),
        }
    }
}

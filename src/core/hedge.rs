use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    quantity::{energy::MegawattHours, price::MegawattHourPrice},
};

/// Fixed-price contract-for-difference over a constant volume.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize, bon::Builder)]
pub struct HedgeConfig {
    /// Strike price.
    pub ppa_price: MegawattHourPrice,

    /// Contracted volume per day, spread evenly over the hours.
    #[builder(default)]
    pub daily_volume: MegawattHours,
}

impl HedgeConfig {
    pub fn validate(self) -> Result<Self, Error> {
        if !self.ppa_price.is_finite() {
            return Err(Error::InvalidConfig(format!("PPA price {} is not finite", self.ppa_price)));
        }
        if !self.daily_volume.is_finite() || self.daily_volume < MegawattHours::ZERO {
            return Err(Error::InvalidConfig(format!(
                "hedge volume {} must be non-negative",
                self.daily_volume,
            )));
        }
        Ok(self)
    }

    pub fn hourly_volume(&self) -> MegawattHours {
        self.daily_volume / 24.0
    }
}

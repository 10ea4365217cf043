use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    quantity::{energy::MegawattHours, power::Megawatts, proportions::Percentage, time::Hours},
};

/// Battery participating in the daily price arbitrage.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize, bon::Builder)]
pub struct BatteryConfig {
    /// Nominal capacity.
    pub capacity: MegawattHours,

    /// Round-trip efficiency.
    #[builder(default = Percentage(90.0))]
    pub efficiency: Percentage,

    #[builder(default = Percentage(80.0))]
    pub depth_of_discharge: Percentage,

    /// Number of charging hours and of discharging hours per day, `0` disables the battery.
    #[builder(default = 4)]
    pub storage_hours: u32,
}

impl BatteryConfig {
    pub const MAX_STORAGE_HOURS: u32 = 24;

    pub fn validate(self) -> Result<Self, Error> {
        if !self.capacity.is_finite() || self.capacity < MegawattHours::ZERO {
            return Err(Error::InvalidConfig(format!("battery capacity {} is negative", self.capacity)));
        }
        if !self.efficiency.is_valid() {
            return Err(Error::InvalidConfig(format!("efficiency {} is out of range", self.efficiency)));
        }
        if !self.depth_of_discharge.is_valid() {
            return Err(Error::InvalidConfig(format!(
                "depth of discharge {} is out of range",
                self.depth_of_discharge,
            )));
        }
        if self.storage_hours > Self::MAX_STORAGE_HOURS {
            return Err(Error::InvalidConfig(format!(
                "storage duration of {} hours exceeds a day",
                self.storage_hours,
            )));
        }
        Ok(self)
    }

    pub const fn is_active(&self) -> bool {
        self.storage_hours != 0
    }

    pub fn storage_duration(&self) -> Hours {
        Hours::from(f64::from(self.storage_hours))
    }

    /// Maximum charging or discharging power, only meaningful for an active battery.
    pub fn hourly_power_limit(&self) -> Megawatts {
        self.capacity / self.storage_duration()
    }

    /// Energy the battery can actually deliver per cycle.
    pub fn usable_energy(&self) -> MegawattHours {
        self.capacity * self.efficiency.to_ratio() * self.depth_of_discharge.to_ratio()
    }

    /// Energy available in a single discharging hour.
    pub fn discharge_per_hour(&self) -> MegawattHours {
        (self.hourly_power_limit() * Hours::ONE).min(self.usable_energy() / self.storage_duration().0)
    }
}

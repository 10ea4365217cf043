mod allocation;
mod arbitrage;
mod battery;
mod dispatch;
mod hedge;
mod slots;

pub use self::{
    allocation::{BatteryMode, HourlyAllocation},
    arbitrage::{BatteryArbitrage, DailySaving},
    battery::BatteryConfig,
    dispatch::Dispatcher,
    hedge::HedgeConfig,
    slots::DaySlots,
};

use itertools::Itertools;

use crate::{core::allocation::BatteryMode, quantity::price::MegawattHourPrice};

/// Battery charging and discharging hours of a single day.
///
/// Indices are relative to the day. Sorting is stable, so that the earlier of two equally
/// priced hours takes the slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DaySlots {
    /// The most expensive hours, most expensive first.
    pub discharge: Vec<usize>,

    /// The cheapest hours, cheapest first.
    pub charge: Vec<usize>,
}

impl DaySlots {
    /// Pick up to `n_slots` hours for each direction, days shorter than that use all their hours.
    pub fn rank(prices: &[MegawattHourPrice], n_slots: usize) -> Self {
        let discharge = prices
            .iter()
            .enumerate()
            .sorted_by(|(_, lhs), (_, rhs)| rhs.cmp(lhs))
            .take(n_slots)
            .map(|(index, _)| index)
            .collect();
        let charge = prices
            .iter()
            .enumerate()
            .sorted_by_key(|(_, price)| **price)
            .take(n_slots)
            .map(|(index, _)| index)
            .collect();
        Self { discharge, charge }
    }

    /// Discharging takes precedence when an hour falls into both sets.
    pub fn mode(&self, index: usize) -> BatteryMode {
        if self.discharge.contains(&index) {
            BatteryMode::Discharge
        } else if self.charge.contains(&index) {
            BatteryMode::Charge
        } else {
            BatteryMode::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices(values: &[f64]) -> Vec<MegawattHourPrice> {
        values.iter().copied().map(MegawattHourPrice::from).collect()
    }

    #[test]
    fn test_rank() {
        let slots = DaySlots::rank(&prices(&[30.0, 10.0, 50.0, 20.0, 40.0]), 2);
        assert_eq!(slots.discharge, [2, 4]);
        assert_eq!(slots.charge, [1, 3]);
        assert_eq!(slots.mode(0), BatteryMode::Idle);
        assert_eq!(slots.mode(2), BatteryMode::Discharge);
        assert_eq!(slots.mode(3), BatteryMode::Charge);
    }

    #[test]
    fn test_ties_go_to_earlier_hour() {
        let slots = DaySlots::rank(&prices(&[5.0, 5.0, 1.0, 1.0, 9.0, 9.0]), 1);
        assert_eq!(slots.discharge, [4]);
        assert_eq!(slots.charge, [2]);
    }

    #[test]
    fn test_short_day() {
        let slots = DaySlots::rank(&prices(&[5.0, 7.0, 6.0]), 4);
        assert_eq!(slots.discharge, [1, 2, 0]);
        assert_eq!(slots.charge, [0, 2, 1]);
        assert!((0..3).all(|index| slots.mode(index) == BatteryMode::Discharge));
    }
}

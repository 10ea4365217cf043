use std::{
    fmt::{Debug, Display, Formatter},
    ops::{Div, Mul},
};

use crate::quantity::{
    Quantity,
    cost::Cost,
    emissions::{GramsPerKilowattHour, Tonnes},
    power::Megawatts,
    price::MegawattHourPrice,
    time::Hours,
};

pub type MegawattHours = Quantity<1, 1, 0, 0>;

impl MegawattHours {
    pub fn from_kilowatt_hours(kilowatt_hours: f64) -> Self {
        Self(kilowatt_hours * 0.001)
    }

    pub const fn to_kilowatt_hours(self) -> f64 {
        self.0 * 1000.0
    }
}

impl Display for MegawattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} MWh", self.0)
    }
}

impl Debug for MegawattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}MWh", self.0)
    }
}

impl Mul<MegawattHourPrice> for MegawattHours {
    type Output = Cost;

    fn mul(self, rhs: MegawattHourPrice) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

impl Mul<GramsPerKilowattHour> for MegawattHours {
    type Output = Tonnes;

    /// Grams per kilowatt-hour are kilograms per megawatt-hour, hence the thousandth.
    fn mul(self, rhs: GramsPerKilowattHour) -> Self::Output {
        Quantity(self.to_kilowatt_hours() * rhs.0 / 1_000_000.0)
    }
}

impl Div<Hours> for MegawattHours {
    type Output = Megawatts;

    fn div(self, rhs: Hours) -> Self::Output {
        Quantity(self.0 / rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_from_kilowatt_hours() {
        assert_abs_diff_eq!(MegawattHours::from_kilowatt_hours(600.0).0, 0.6);
    }

    #[test]
    fn test_mul_price() {
        let cost = MegawattHours::from(5.0) * MegawattHourPrice::from(100.0);
        assert_abs_diff_eq!(cost.0, 500.0);
    }

    #[test]
    fn test_mul_emission_factor() {
        // 120 MWh at 400 g/kWh = 48 000 000 g = 48 t:
        let emissions = MegawattHours::from(120.0) * GramsPerKilowattHour::from(400.0);
        assert_abs_diff_eq!(emissions.0, 48.0);
    }
}

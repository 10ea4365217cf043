use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Metric tonnes of CO2-equivalent.
pub type Tonnes = Quantity<0, 0, 0, 1>;

/// Grid carbon intensity.
///
/// Numerically equal to kilograms per megawatt-hour; the scaling lives in the multiplication
/// with [`MegawattHours`][crate::quantity::energy::MegawattHours].
pub type GramsPerKilowattHour = Quantity<-1, -1, 0, 1>;

impl Display for Tonnes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} t", self.0)
    }
}

impl Debug for Tonnes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}t", self.0)
    }
}

impl Display for GramsPerKilowattHour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} g/kWh", self.0)
    }
}

impl Debug for GramsPerKilowattHour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}g/kWh", self.0)
    }
}

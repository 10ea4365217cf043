use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::quantity::{Quantity, cost::Cost, energy::MegawattHours};

/// Euro per megawatt-hour.
pub type MegawattHourPrice = Quantity<-1, -1, 1, 0>;

impl Display for MegawattHourPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} €/MWh", self.0)
    }
}

impl Debug for MegawattHourPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}€/MWh", self.0)
    }
}

impl Mul<MegawattHours> for MegawattHourPrice {
    type Output = Cost;

    fn mul(self, rhs: MegawattHours) -> Self::Output {
        rhs * self
    }
}

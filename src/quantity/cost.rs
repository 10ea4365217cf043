use std::{
    fmt::{Debug, Display, Formatter},
    ops::Div,
};

use crate::quantity::{Quantity, energy::MegawattHours, price::MegawattHourPrice};

/// Euro.
pub type Cost = Quantity<0, 0, 1, 0>;

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} €", self.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}€", self.0)
    }
}

/// Levelized cost: total cost spread over the delivered energy.
impl Div<MegawattHours> for Cost {
    type Output = MegawattHourPrice;

    fn div(self, rhs: MegawattHours) -> Self::Output {
        Quantity(self.0 / rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_levelized() {
        let lcoe = Cost::from(3000.0) / MegawattHours::from(120.0);
        assert_abs_diff_eq!(lcoe.0, 25.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Cost::from(1234.567).to_string(), "1234.57 €");
    }
}

use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, PartialOrd, Deserialize, Serialize, derive_more::FromStr)]
#[serde(transparent)]
pub struct Percentage(pub f64);

impl Percentage {
    pub const HUNDRED: Self = Self(100.0);

    /// Convert the percentage into `0.0..=1.0`.
    pub const fn to_ratio(self) -> f64 {
        0.01 * self.0
    }

    pub fn is_valid(self) -> bool {
        (0.0..=100.0).contains(&self.0)
    }
}

impl Display for Percentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} %", self.0)
    }
}

impl Debug for Percentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

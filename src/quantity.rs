pub mod cost;
pub mod emissions;
pub mod energy;
pub mod power;
pub mod price;
pub mod proportions;
pub mod time;

use std::{
    cmp::Ordering,
    ops::{Div, Mul},
};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Physical or monetary quantity backed by [`f64`].
///
/// The const parameters are the exponents of the base dimensions, so that only
/// dimensionally meaningful arithmetic compiles. The concrete units live in the submodules.
#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[serde(transparent)]
pub struct Quantity<const POWER: isize, const TIME: isize, const COST: isize, const MASS: isize>(
    pub f64,
);

impl<const POWER: isize, const TIME: isize, const COST: isize, const MASS: isize>
    Quantity<POWER, TIME, COST, MASS>
{
    pub const ZERO: Self = Self(0.0);

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl<const POWER: isize, const TIME: isize, const COST: isize, const MASS: isize> PartialEq
    for Quantity<POWER, TIME, COST, MASS>
{
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.0).eq(&OrderedFloat(other.0))
    }
}

impl<const POWER: isize, const TIME: isize, const COST: isize, const MASS: isize> Eq
    for Quantity<POWER, TIME, COST, MASS>
{
}

impl<const POWER: isize, const TIME: isize, const COST: isize, const MASS: isize> PartialOrd
    for Quantity<POWER, TIME, COST, MASS>
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const POWER: isize, const TIME: isize, const COST: isize, const MASS: isize> Ord
    for Quantity<POWER, TIME, COST, MASS>
{
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.0).cmp(&OrderedFloat(other.0))
    }
}

impl<const POWER: isize, const TIME: isize, const COST: isize, const MASS: isize> Mul<f64>
    for Quantity<POWER, TIME, COST, MASS>
{
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl<const POWER: isize, const TIME: isize, const COST: isize, const MASS: isize> Div<f64>
    for Quantity<POWER, TIME, COST, MASS>
{
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0 / rhs)
    }
}

/// Ratio of two quantities of the same dimension.
impl<const POWER: isize, const TIME: isize, const COST: isize, const MASS: isize> Div<Self>
    for Quantity<POWER, TIME, COST, MASS>
{
    type Output = f64;

    fn div(self, rhs: Self) -> Self::Output {
        self.0 / rhs.0
    }
}

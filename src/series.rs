use std::ops::Range;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta};
use itertools::Itertools;

use crate::{
    error::Error,
    quantity::{energy::MegawattHours, price::MegawattHourPrice},
};

pub type Timestamp = DateTime<FixedOffset>;

pub type Point<V> = (Timestamp, V);

pub type PriceSeries = Series<MegawattHourPrice>;

pub type DemandSeries = Series<MegawattHours>;

/// Hourly time series: strictly increasing, hour-aligned, without gaps.
#[must_use]
#[derive(Clone, Debug)]
pub struct Series<V>(Vec<Point<V>>);

impl<V> Series<V> {
    const STEP: TimeDelta = TimeDelta::hours(1);

    pub fn try_from_points(points: Vec<Point<V>>) -> Result<Self, Error> {
        if let Some((timestamp, _)) =
            points.iter().find(|(timestamp, _)| timestamp.timestamp() % 3600 != 0)
        {
            return Err(Error::InvalidSeries(format!("{timestamp} is not aligned to an hour")));
        }
        if let Some(((left, _), (right, _))) =
            points.iter().tuple_windows().find(|((left, _), (right, _))| *right - *left != Self::STEP)
        {
            let reason = if right <= left {
                format!("{right} does not follow {left}")
            } else {
                format!("missing hours between {left} and {right}")
            };
            return Err(Error::InvalidSeries(reason));
        }
        Ok(Self(points))
    }

    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn points(&self) -> &[Point<V>] {
        &self.0
    }

    pub fn timestamps(&self) -> impl Iterator<Item = Timestamp> {
        self.0.iter().map(|(timestamp, _)| *timestamp)
    }

    /// Build a series on the same timestamps.
    pub fn map<R>(&self, f: impl Fn(&V) -> R) -> Series<R> {
        Series(self.0.iter().map(|(timestamp, value)| (*timestamp, f(value))).collect())
    }

    /// Ensure that both series cover exactly the same hours.
    pub fn ensure_aligned<R>(&self, other: &Series<R>) -> Result<(), Error> {
        if self.len() != other.len() {
            return Err(Error::InvalidSeries(format!(
                "series lengths differ: {} vs {}",
                self.len(),
                other.len(),
            )));
        }
        match self.timestamps().zip(other.timestamps()).find(|(left, right)| left != right) {
            Some((left, right)) => {
                Err(Error::InvalidSeries(format!("timestamps differ: {left} vs {right}")))
            }
            None => Ok(()),
        }
    }

    /// Partition the series into local calendar days, yielding index ranges into [`Self::points`].
    pub fn days(&self) -> Vec<(NaiveDate, Range<usize>)> {
        self.0
            .iter()
            .enumerate()
            .chunk_by(|(_, (timestamp, _))| timestamp.date_naive())
            .into_iter()
            .filter_map(|(date, day)| {
                let (first, last) = day.map(|(index, _)| index).minmax().into_option()?;
                Some((date, first..(last + 1)))
            })
            .collect()
    }
}

impl<V: Copy> Series<V> {
    pub fn values(&self) -> impl Iterator<Item = V> {
        self.0.iter().map(|(_, value)| *value)
    }
}

/// Parse the timestamp formats seen in the price archives.
///
/// Timestamps without an offset are taken as UTC wall-clock time.
pub fn parse_timestamp(text: &str) -> Option<Timestamp> {
    const WITH_OFFSET: [&str; 2] = ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M%:z"];
    const NAIVE: [&str; 4] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

    let text = text.trim();
    DateTime::parse_from_rfc3339(text)
        .ok()
        .or_else(|| WITH_OFFSET.iter().find_map(|format| DateTime::parse_from_str(text, format).ok()))
        .or_else(|| {
            NAIVE
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|timestamp| timestamp.and_utc().fixed_offset())
        })
}

use std::path::{Path, PathBuf};

use chrono::Datelike;

use crate::{
    country::Country,
    error::Error,
    prelude::*,
    quantity::{energy::MegawattHours, price::MegawattHourPrice},
    series::{DemandSeries, Point, PriceSeries, Series, parse_timestamp},
};

const TIMESTAMP_COLUMN: &str = "timestamp";

/// Price column names in order of preference.
const PRICE_COLUMNS: [&str; 2] = ["Grid_Price_EUR_per_MWh", "price"];

const DEMAND_COLUMNS: [&str; 1] = ["demand_kWh"];

/// Reads the per-country hourly spot-price archive.
#[must_use]
#[derive(Clone, Debug, bon::Builder)]
pub struct PriceLoader {
    #[builder(into)]
    data_dir: PathBuf,

    /// Path relative to the data directory, `{country}` is replaced with the lower-cased name.
    #[builder(into, default = String::from("europe_prices/{country}_15_24.csv"))]
    file_pattern: String,
}

impl PriceLoader {
    pub fn path(&self, country: &Country) -> PathBuf {
        self.data_dir.join(self.file_pattern.replace("{country}", &country.file_key()))
    }

    /// Load the hourly prices of the calendar year.
    #[instrument(skip_all, fields(country = country.name(), year = year))]
    pub fn load(&self, country: &Country, year: i32) -> Result<PriceSeries, Error> {
        let path = self.path(country);
        if !path.is_file() {
            return Err(Error::DataNotFound { country: country.clone(), path });
        }
        let origin = format!("{} {year}", country.name());
        let points: Vec<_> = read_points(&path, &origin, &PRICE_COLUMNS)?
            .into_iter()
            .filter(|(timestamp, _)| timestamp.year() == year)
            .map(|(timestamp, price)| (timestamp, MegawattHourPrice::from(price)))
            .collect();
        if points.is_empty() {
            return Err(Error::EmptyRange { country: country.clone(), year });
        }
        let series = Series::try_from_points(points)?;
        debug!(n_hours = series.len(), "loaded");
        Ok(series)
    }
}

/// Load caller-provided prices as is, without year filtering.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_custom_prices(path: &Path) -> Result<PriceSeries, Error> {
    let points = read_points(path, &path.display().to_string(), &PRICE_COLUMNS)?
        .into_iter()
        .map(|(timestamp, price)| (timestamp, MegawattHourPrice::from(price)))
        .collect();
    Series::try_from_points(points)
}

/// Load a caller-provided demand profile given in kilowatt-hours.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_custom_demand(path: &Path) -> Result<DemandSeries, Error> {
    let points = read_points(path, &path.display().to_string(), &DEMAND_COLUMNS)?
        .into_iter()
        .map(|(timestamp, demand)| (timestamp, MegawattHours::from_kilowatt_hours(demand)))
        .collect();
    Series::try_from_points(points)
}

/// Read the timestamp column and the first present column of `value_columns`.
fn read_points(path: &Path, origin: &str, value_columns: &[&str]) -> Result<Vec<Point<f64>>, Error> {
    let schema = |reason: String| Error::Schema { origin: origin.to_owned(), reason };

    let mut reader = csv::Reader::from_path(path).map_err(Error::csv(path))?;
    let headers = reader.headers().map_err(Error::csv(path))?.clone();
    let column = |name: &str| headers.iter().position(|header| header.trim() == name);

    let timestamp_index =
        column(TIMESTAMP_COLUMN).ok_or_else(|| schema(format!("missing `{TIMESTAMP_COLUMN}` column")))?;
    let value_index = value_columns
        .iter()
        .find_map(|name| column(name))
        .ok_or_else(|| schema(format!("missing `{}` column", value_columns.join("` or `"))))?;

    reader
        .records()
        .enumerate()
        .map(|(index, record)| {
            let record = record.map_err(Error::csv(path))?;
            // The header is line 1:
            let line = index + 2;
            let timestamp = record
                .get(timestamp_index)
                .and_then(parse_timestamp)
                .ok_or_else(|| schema(format!("unparseable timestamp on line {line}")))?;
            let value = record
                .get(value_index)
                .and_then(|value| value.trim().parse::<f64>().ok())
                .filter(|value| value.is_finite())
                .ok_or_else(|| schema(format!("unparseable value on line {line}")))?;
            Ok((timestamp, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use approx::assert_abs_diff_eq;
    use tempfile::TempDir;

    use super::*;

    fn loader_with(country: &str, contents: &str) -> Result<(TempDir, PriceLoader)> {
        let data_dir = tempfile::tempdir()?;
        let path = data_dir.path().join("europe_prices").join(format!("{country}_15_24.csv"));
        fs::create_dir_all(path.parent().context("no parent")?)?;
        fs::write(path, contents)?;
        let loader = PriceLoader::builder().data_dir(data_dir.path()).build();
        Ok((data_dir, loader))
    }

    #[test]
    fn test_load_filters_year() -> Result {
        let (_data_dir, loader) = loader_with(
            "spain",
            "timestamp,price\n\
             2014-12-31 23:00:00,1.0\n\
             2015-01-01 00:00:00,10.5\n\
             2015-01-01 01:00:00,11.5\n",
        )?;
        let series = loader.load(&Country::new("Spain"), 2015)?;
        assert_eq!(series.len(), 2);
        assert_abs_diff_eq!(series.points()[0].1.0, 10.5);
        Ok(())
    }

    #[test]
    fn test_price_alias_preferred() -> Result {
        let (_data_dir, loader) = loader_with(
            "france",
            "timestamp,price,Grid_Price_EUR_per_MWh\n2020-01-01 00:00:00,1.0,42.0\n",
        )?;
        let series = loader.load(&Country::new("France"), 2020)?;
        assert_abs_diff_eq!(series.points()[0].1.0, 42.0);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let loader = PriceLoader::builder().data_dir("/nonexistent").build();
        let result = loader.load(&Country::new("Atlantis"), 2020);
        assert!(matches!(result, Err(Error::DataNotFound { .. })));
    }

    #[test]
    fn test_empty_range() -> Result {
        let (_data_dir, loader) = loader_with("spain", "timestamp,price\n2015-01-01 00:00:00,10.0\n")?;
        let result = loader.load(&Country::new("Spain"), 2016);
        assert!(matches!(result, Err(Error::EmptyRange { year: 2016, .. })));
        Ok(())
    }

    #[test]
    fn test_missing_price_column() -> Result {
        let (_data_dir, loader) = loader_with("spain", "timestamp,cost\n2015-01-01 00:00:00,10.0\n")?;
        let result = loader.load(&Country::new("Spain"), 2015);
        assert!(matches!(result, Err(Error::Schema { .. })));
        Ok(())
    }

    #[test]
    fn test_malformed_price_names_line() -> Result {
        let (_data_dir, loader) = loader_with(
            "spain",
            "timestamp,price\n2015-01-01 00:00:00,10.0\n2015-01-01 01:00:00,n/a\n",
        )?;
        match loader.load(&Country::new("Spain"), 2015) {
            Err(Error::Schema { origin, reason }) => {
                assert_eq!(origin, "Spain 2015");
                assert!(reason.ends_with("line 3"), "{reason}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_gap_is_invalid_series() -> Result {
        let (_data_dir, loader) = loader_with(
            "spain",
            "timestamp,price\n2015-01-01 00:00:00,10.0\n2015-01-01 02:00:00,10.0\n",
        )?;
        let result = loader.load(&Country::new("Spain"), 2015);
        assert!(matches!(result, Err(Error::InvalidSeries(_))));
        Ok(())
    }

    #[test]
    fn test_custom_demand_in_kilowatt_hours() -> Result {
        let file = tempfile::NamedTempFile::new()?;
        fs::write(
            file.path(),
            "timestamp,demand_kWh\n2024-06-01T00:00:00+02:00,1500\n2024-06-01T01:00:00+02:00,0\n",
        )?;
        let demand = load_custom_demand(file.path())?;
        assert_eq!(demand.len(), 2);
        assert_abs_diff_eq!(demand.points()[0].1.0, 1.5);
        Ok(())
    }

    #[test]
    fn test_custom_prices() -> Result {
        let file = tempfile::NamedTempFile::new()?;
        fs::write(file.path(), "timestamp,price\n2030-01-01 00:00,55.5\n")?;
        let prices = load_custom_prices(file.path())?;
        assert_abs_diff_eq!(prices.points()[0].1.0, 55.5);
        Ok(())
    }
}

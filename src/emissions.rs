use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::{country::Country, error::Error, prelude::*, quantity::emissions::GramsPerKilowattHour};

/// Row of the grid carbon-intensity reference table.
#[derive(Deserialize)]
struct Record {
    #[serde(rename = "Entity")]
    entity: String,

    #[serde(rename = "Year")]
    year: i32,

    /// Some entities have gaps in the table.
    #[serde(rename = "gCO2/kWh")]
    intensity: Option<f64>,
}

/// Preloaded grid carbon intensities keyed by country and year.
#[derive(Clone, Debug, Default)]
pub struct EmissionFactors(HashMap<(String, i32), GramsPerKilowattHour>);

/// Emission factor as used by a scenario.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct EmissionFactor {
    pub intensity: GramsPerKilowattHour,

    /// The table has no entry and the intensity is the zero placeholder.
    pub is_fallback: bool,
}

impl EmissionFactor {
    pub const FALLBACK: Self = Self { intensity: GramsPerKilowattHour::ZERO, is_fallback: true };

    pub const fn known(intensity: GramsPerKilowattHour) -> Self {
        Self { intensity, is_fallback: false }
    }
}

impl EmissionFactors {
    /// Read the reference table, a missing file leaves the table empty.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        if !path.is_file() {
            warn!("emission table is missing, every factor will fall back to zero");
            return Ok(Self::default());
        }
        let factors = csv::Reader::from_path(path)
            .map_err(Error::csv(path))?
            .deserialize::<Record>()
            .filter_map(|record| match record {
                Ok(Record { entity, year, intensity: Some(intensity) }) => {
                    Some(Ok((entity, year, intensity)))
                }
                Ok(_) => None,
                Err(error) => Some(Err(Error::csv(path)(error))),
            })
            .collect::<Result<Vec<_>, Error>>()?;
        let this = Self::from_iter(factors);
        debug!(n_entries = this.0.len(), "loaded");
        Ok(this)
    }

    pub fn lookup(&self, country: &Country, year: i32) -> Result<GramsPerKilowattHour, Error> {
        self.0
            .get(&(country.file_key(), year))
            .copied()
            .ok_or_else(|| Error::FactorNotFound { country: country.clone(), year })
    }

    /// Look the factor up, falling back to zero with a warning.
    pub fn resolve(&self, country: &Country, year: i32) -> EmissionFactor {
        match self.lookup(country, year) {
            Ok(intensity) => EmissionFactor::known(intensity),
            Err(error) => {
                warn!(%error, "using zero emissions");
                EmissionFactor::FALLBACK
            }
        }
    }
}

impl<S: AsRef<str>> FromIterator<(S, i32, f64)> for EmissionFactors {
    fn from_iter<T: IntoIterator<Item = (S, i32, f64)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(entity, year, intensity)| {
                    (
                        (Country::new(entity.as_ref()).file_key(), year),
                        GramsPerKilowattHour::from(intensity),
                    )
                })
                .collect(),
        )
    }
}

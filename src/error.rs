use std::path::PathBuf;

use thiserror::Error;

use crate::country::Country;

/// Domain errors of the loaders and the cost engine.
///
/// The comparator keeps them per country, so every variant must stay distinguishable
/// and carry enough context to be reported on its own.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no price data for {country} at `{}`", .path.display())]
    DataNotFound { country: Country, path: PathBuf },

    #[error("no price data for {country} in {year}")]
    EmptyRange { country: Country, year: i32 },

    #[error("malformed data ({origin}): {reason}")]
    Schema { origin: String, reason: String },

    #[error("invalid time series: {0}")]
    InvalidSeries(String),

    #[error("no emission factor for {country} in {year}")]
    FactorNotFound { country: Country, year: i32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("CSV error in `{}`", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Stable short name for logging.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DataNotFound { .. } => "data-not-found",
            Self::EmptyRange { .. } => "empty-range",
            Self::Schema { .. } => "schema",
            Self::InvalidSeries(_) => "invalid-series",
            Self::FactorNotFound { .. } => "factor-not-found",
            Self::InvalidConfig(_) => "invalid-config",
            Self::Csv { .. } => "csv",
            Self::Other(_) => "other",
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>) -> impl FnOnce(csv::Error) -> Self {
        let path = path.into();
        move |source| Self::Csv { path, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let error = Error::EmptyRange { country: Country::new("Spain"), year: 2015 };
        assert_eq!(error.kind(), "empty-range");
        assert_eq!(error.to_string(), "no price data for Spain (ES) in 2015");
    }
}

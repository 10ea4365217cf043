use std::{
    convert::Infallible,
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Countries for which the price archive is expected to carry data, with their ISO 3166 codes.
pub const KNOWN_COUNTRIES: [(&str, &str); 26] = [
    ("Austria", "AT"),
    ("Belgium", "BE"),
    ("Bulgaria", "BG"),
    ("Croatia", "HR"),
    ("Czechia", "CZ"),
    ("Denmark", "DK"),
    ("Estonia", "EE"),
    ("Finland", "FI"),
    ("France", "FR"),
    ("Germany", "DE"),
    ("Greece", "GR"),
    ("Hungary", "HU"),
    ("Italy", "IT"),
    ("Latvia", "LV"),
    ("Lithuania", "LT"),
    ("Luxembourg", "LU"),
    ("Netherlands", "NL"),
    ("Norway", "NO"),
    ("Poland", "PL"),
    ("Portugal", "PT"),
    ("Romania", "RO"),
    ("Slovakia", "SK"),
    ("Slovenia", "SI"),
    ("Spain", "ES"),
    ("Sweden", "SE"),
    ("Switzerland", "CH"),
];

/// Country as it is named in the emission table, for example `Germany`.
///
/// Any name is accepted: unknown countries simply have no data files.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Country(String);

impl Country {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_owned())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Price files are keyed by the lower-cased name.
    pub fn file_key(&self) -> String {
        self.0.to_lowercase()
    }

    pub fn iso_code(&self) -> Option<&'static str> {
        KNOWN_COUNTRIES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&self.0))
            .map(|(_, code)| *code)
    }
}

impl FromStr for Country {
    type Err = Infallible;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(name))
    }
}

impl Display for Country {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.iso_code() {
            Some(code) => write!(f, "{} ({code})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

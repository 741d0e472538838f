//! Locale tags.
//!
//! The site ships in exactly three languages. The set is closed: a lookup
//! outside it is a caller error, which the enum makes unrepresentable.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three supported content languages.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Russian (default site language).
    #[default]
    Ru,
    /// English.
    En,
    /// Kazakh.
    Kz,
}

impl Locale {
    /// All supported locales, in display order.
    pub const ALL: [Locale; 3] = [Locale::Ru, Locale::En, Locale::Kz];

    /// Returns the wire tag for this locale ("ru", "en", "kz").
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::En => "en",
            Locale::Kz => "kz",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ru" => Ok(Locale::Ru),
            "en" => Ok(Locale::En),
            "kz" => Ok(Locale::Kz),
            other => Err(Error::UnknownLocale(other.to_string())),
        }
    }
}

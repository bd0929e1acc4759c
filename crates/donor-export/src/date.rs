//! Locale-aware calendar-date rendering for exported date columns.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar-date layout used when exporting `date` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateLocale {
    /// `1/15/2024`
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    /// `15/01/2024`
    #[serde(rename = "en-GB")]
    EnGb,
    /// `15.1.2024`
    #[serde(rename = "he-IL")]
    HeIl,
    /// `2024-01-15`
    #[serde(rename = "iso")]
    Iso,
}

impl DateLocale {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateLocale::EnUs => "en-US",
            DateLocale::EnGb => "en-GB",
            DateLocale::HeIl => "he-IL",
            DateLocale::Iso => "iso",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            DateLocale::EnUs => "%-m/%-d/%Y",
            DateLocale::EnGb => "%d/%m/%Y",
            DateLocale::HeIl => "%-d.%-m.%Y",
            DateLocale::Iso => "%Y-%m-%d",
        }
    }

    pub fn format_date(self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }
}

impl fmt::Display for DateLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "en-us" | "en" => Ok(DateLocale::EnUs),
            "en-gb" => Ok(DateLocale::EnGb),
            "he-il" | "he" => Ok(DateLocale::HeIl),
            "iso" => Ok(DateLocale::Iso),
            _ => Err(format!("Unknown date locale: {s}")),
        }
    }
}

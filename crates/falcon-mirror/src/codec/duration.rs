//! `<unit>(<quantity>)` duration strings, e.g. `minutes(30)`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::MappingError;

static RE_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)\((\d+)\)$").unwrap());

/// A unit-encoded duration as used by process frequency, retry delay and
/// snapshot retention age limits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frequency {
    pub unit: String,
    pub quantity: u32,
}

impl Frequency {
    pub fn new(unit: impl Into<String>, quantity: u32) -> Self {
        Self {
            unit: unit.into(),
            quantity,
        }
    }

    pub fn minutes(quantity: u32) -> Self {
        Self::new("minutes", quantity)
    }

    pub fn hours(quantity: u32) -> Self {
        Self::new("hours", quantity)
    }

    pub fn days(quantity: u32) -> Self {
        Self::new("days", quantity)
    }

    pub fn encode(&self) -> String {
        format!("{}({})", self.unit, self.quantity)
    }

    pub fn decode(value: &str) -> Result<Self, MappingError> {
        let malformed = || MappingError::MalformedDuration {
            value: value.to_string(),
        };

        let caps = RE_DURATION.captures(value.trim()).ok_or_else(malformed)?;
        let quantity = caps[2].parse::<u32>().map_err(|_| malformed())?;

        Ok(Self {
            unit: caps[1].to_string(),
            quantity,
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.unit, self.quantity)
    }
}

impl FromStr for Frequency {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

use std::collections::HashMap;
use std::str::FromStr;

use crate::entity::ProcessEntity;
use crate::error::MappingError;

/// Value written to `drNotificationReceivers` when nobody is notified.
pub(crate) const NO_RECEIVERS: &str = "NA";

/// Name to value lookup over a process's properties. Later duplicates win.
pub(crate) struct PropertyMap {
    values: HashMap<String, String>,
}

impl PropertyMap {
    pub fn from_process(process: &ProcessEntity) -> Self {
        let values = process
            .properties()
            .into_iter()
            .map(|p| (p.name, p.value))
            .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// The property's value, empty when absent.
    pub fn string(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    /// Parses a numeric property. Absent or blank values yield `None`.
    pub fn number<T: FromStr>(&self, name: &str) -> Result<Option<T>, MappingError> {
        let Some(raw) = self.get(name) else {
            return Ok(None);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse()
            .map(Some)
            .map_err(|_| MappingError::InvalidNumber {
                field: name.to_string(),
                value: raw.to_string(),
            })
    }

    /// Splits a receivers list; `NA` and blank mean none.
    pub fn receivers(&self, name: &str) -> Vec<String> {
        split_receivers(self.get(name).unwrap_or_default())
    }
}

pub(crate) fn split_receivers(value: &str) -> Vec<String> {
    let value = value.trim();
    if value.is_empty() || value == NO_RECEIVERS {
        return Vec::new();
    }
    value.split(',').map(|s| s.trim().to_string()).collect()
}

/// Receivers value for `alerts`. A base value that still splits to the same
/// list is kept verbatim; otherwise an empty list writes `NA` over an existing
/// value and nothing when there is none.
pub(crate) fn join_receivers(alerts: &[String], base: Option<&str>) -> String {
    if let Some(raw) = base.filter(|raw| split_receivers(raw) == alerts) {
        return raw.to_string();
    }
    match (alerts.is_empty(), base) {
        (false, _) => alerts.join(","),
        (true, None) => String::new(),
        (true, Some(_)) => NO_RECEIVERS.to_string(),
    }
}

/// Rewrites a property present in the process; an absent one is appended
/// only for a non-empty value.
pub(crate) fn write_property(process: &mut ProcessEntity, name: &str, value: &str) {
    if value.is_empty() && !process.has_property(name) {
        return;
    }
    process.set_property(name, value);
}

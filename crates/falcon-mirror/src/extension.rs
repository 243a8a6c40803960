//! Properties submitted to the server's extension endpoint for snapshot jobs.

use std::fmt;

use crate::codec::date::export_instant;
use crate::codec::encode_tags;
use crate::error::MappingError;
use crate::model::common::default_timezone;
use crate::model::SnapshotUiModel;

/// Ordered `key=value` list, rendered one pair per line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtensionProperties {
    entries: Vec<(String, String)>,
}

impl ExtensionProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a key, replacing its value in place when already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the snapshot extension properties for a UI model.
    pub fn from_snapshot(ui: &SnapshotUiModel) -> Result<Self, MappingError> {
        if ui.name.is_empty() {
            return Err(MappingError::missing("jobName"));
        }
        let timezone = if ui.validity.timezone.is_empty() {
            default_timezone()
        } else {
            ui.validity.timezone.clone()
        };
        let start = ui
            .validity
            .start
            .as_ref()
            .ok_or_else(|| MappingError::missing("jobValidityStart"))?;
        let end = ui
            .validity
            .end
            .as_ref()
            .ok_or_else(|| MappingError::missing("jobValidityEnd"))?;

        let mut props = Self::new();
        props.insert("jobName", ui.name.as_str());
        props.insert("jobValidityStart", export_instant(start, &timezone)?);
        props.insert("jobValidityEnd", export_instant(end, &timezone)?);
        props.insert("jobFrequency", ui.frequency.encode());
        props.insert("jobTimezone", timezone.as_str());
        props.insert("jobTags", encode_tags(&ui.tags));
        props.insert("jobRetryPolicy", ui.retry.policy.as_str());
        props.insert("jobRetryDelay", ui.retry.delay.encode());
        props.insert("jobRetryAttempts", ui.retry.attempts.to_string());
        props.insert("jobAclOwner", ui.acl.owner.as_str());
        props.insert("jobAclGroup", ui.acl.group.as_str());
        props.insert("jobAclPermission", ui.acl.permission.as_str());

        props.insert("sourceCluster", ui.source.cluster.as_str());
        props.insert("sourceSnapshotDir", ui.source.directory_path.trim());
        props.insert("targetCluster", ui.target.cluster.as_str());
        props.insert("targetSnapshotDir", ui.target.directory_path.trim());
        props.insert("jobClusterName", ui.run_on_cluster());
        props.insert(
            "sourceSnapshotRetentionAgeLimit",
            ui.source.delete_frequency.encode(),
        );
        props.insert(
            "targetSnapshotRetentionAgeLimit",
            ui.target.delete_frequency.encode(),
        );
        props.insert(
            "sourceSnapshotRetentionNumber",
            ui.source.retention_number.to_string(),
        );
        props.insert(
            "targetSnapshotRetentionNumber",
            ui.target.retention_number.to_string(),
        );
        if let Some(max_maps) = ui.allocation.distcp_max_maps.filter(|v| *v > 0) {
            props.insert("distcpMaxMaps", max_maps.to_string());
        }
        if let Some(bandwidth) = ui.allocation.distcp_map_bandwidth.filter(|v| *v > 0) {
            props.insert("distcpMapBandwidth", bandwidth.to_string());
        }
        props.insert("tdeEncryptionEnabled", ui.tde_encryption_enabled.to_string());
        if !ui.alerts.is_empty() {
            props.insert("jobNotificationType", "email");
            props.insert("jobNotificationReceivers", ui.alerts.join(","));
        }

        Ok(props)
    }
}

impl fmt::Display for ExtensionProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.entries {
            writeln!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

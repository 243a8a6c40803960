//! Form model for HDFS snapshot replication jobs.

use serde::{Deserialize, Serialize};

use super::common::{Acl, Retry, RunOn, Validity};
use crate::codec::{Frequency, Tag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapshotEndpoint {
    pub cluster: String,
    pub directory_path: String,
    /// Age after which snapshots are deleted.
    pub delete_frequency: Frequency,
    /// Number of snapshots always retained.
    pub retention_number: u32,
}

impl Default for SnapshotEndpoint {
    fn default() -> Self {
        Self {
            cluster: String::new(),
            directory_path: String::new(),
            delete_frequency: Frequency::days(15),
            retention_number: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapshotAllocation {
    pub distcp_max_maps: Option<u32>,
    pub distcp_map_bandwidth: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapshotUiModel {
    pub name: String,
    pub run_on: RunOn,
    pub source: SnapshotEndpoint,
    pub target: SnapshotEndpoint,
    pub validity: Validity,
    pub frequency: Frequency,
    pub allocation: SnapshotAllocation,
    pub tde_encryption_enabled: bool,
    pub retry: Retry,
    pub acl: Acl,
    pub tags: Vec<Tag>,
    pub alerts: Vec<String>,
}

impl Default for SnapshotUiModel {
    fn default() -> Self {
        Self {
            name: String::new(),
            run_on: RunOn::Source,
            source: SnapshotEndpoint::default(),
            target: SnapshotEndpoint::default(),
            validity: Validity::default(),
            frequency: Frequency::hours(1),
            allocation: SnapshotAllocation::default(),
            tde_encryption_enabled: false,
            retry: Retry::default(),
            acl: Acl::default(),
            tags: Vec::new(),
            alerts: Vec::new(),
        }
    }
}

impl SnapshotUiModel {
    pub fn run_on_cluster(&self) -> &str {
        match self.run_on {
            RunOn::Source => &self.source.cluster,
            RunOn::Target => &self.target.cluster,
        }
    }
}

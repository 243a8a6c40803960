//! Form model for HDFS and HIVE mirroring jobs.

use serde::{Deserialize, Serialize};

use super::common::{Acl, Retry, RunOn, Validity};
use super::subtype::JobSubtype;
use crate::codec::{Frequency, LocationKind, Tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MirrorType {
    #[default]
    #[serde(rename = "HDFS")]
    Hdfs,
    #[serde(rename = "HIVE")]
    Hive,
}

impl From<MirrorType> for JobSubtype {
    fn from(value: MirrorType) -> Self {
        match value {
            MirrorType::Hdfs => JobSubtype::Hdfs,
            MirrorType::Hive => JobSubtype::Hive,
        }
    }
}

/// Whether a HIVE job replicates whole databases or selected tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HiveDatabaseType {
    #[default]
    Databases,
    Tables,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Endpoint {
    pub location: LocationKind,
    pub cluster: String,
    pub url: String,
    pub path: String,
    pub hive_metastore_uri: String,
    pub hive_metastore_kerberos_principal: String,
    pub hive2_kerberos_principal: String,
    /// HIVE selection, read on the source side only: a database list, or one
    /// database and a table list.
    pub hive_database_type: HiveDatabaseType,
    pub hive_databases: String,
    pub hive_database: String,
    pub hive_tables: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HiveSideOptions {
    pub staging_path: String,
    pub hive_server2_endpoint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HiveOptions {
    pub source: HiveSideOptions,
    pub target: HiveSideOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HdfsAllocation {
    pub max_maps: u32,
    pub max_bandwidth: u32,
}

impl Default for HdfsAllocation {
    fn default() -> Self {
        Self {
            max_maps: 5,
            max_bandwidth: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HiveAllocation {
    pub max_maps_distcp: u32,
    pub max_maps_mirror: u32,
    /// `-1` replicates all pending events.
    pub max_maps_events: i32,
    pub max_bandwidth: u32,
}

impl Default for HiveAllocation {
    fn default() -> Self {
        Self {
            max_maps_distcp: 1,
            max_maps_mirror: 5,
            max_maps_events: -1,
            max_bandwidth: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Allocation {
    pub hdfs: HdfsAllocation,
    pub hive: HiveAllocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetUiModel {
    pub name: String,
    pub form_type: MirrorType,
    pub run_on: RunOn,
    pub source: Endpoint,
    pub target: Endpoint,
    pub validity: Validity,
    pub frequency: Frequency,
    pub allocation: Allocation,
    pub hive_options: HiveOptions,
    pub retry: Retry,
    pub acl: Acl,
    pub tags: Vec<Tag>,
    pub alerts: Vec<String>,
}

impl Default for DatasetUiModel {
    fn default() -> Self {
        Self {
            name: String::new(),
            form_type: MirrorType::Hdfs,
            run_on: RunOn::Source,
            source: Endpoint::default(),
            target: Endpoint::default(),
            validity: Validity::default(),
            frequency: Frequency::minutes(5),
            allocation: Allocation::default(),
            hive_options: HiveOptions::default(),
            retry: Retry::default(),
            acl: Acl::default(),
            tags: Vec::new(),
            alerts: Vec::new(),
        }
    }
}

impl DatasetUiModel {
    pub fn new(form_type: MirrorType) -> Self {
        Self {
            form_type,
            ..Self::default()
        }
    }

    /// The endpoint the process runs on.
    pub fn run_on_endpoint(&self) -> &Endpoint {
        match self.run_on {
            RunOn::Source => &self.source,
            RunOn::Target => &self.target,
        }
    }

    /// Pins the counterpart to HDFS when one side is a cloud store; a cloud
    /// location cannot host the job.
    pub fn normalize_locations(&mut self) {
        if self.source.location != LocationKind::Hdfs {
            self.target.location = LocationKind::Hdfs;
            self.run_on = RunOn::Target;
        } else if self.target.location != LocationKind::Hdfs {
            self.source.location = LocationKind::Hdfs;
            self.run_on = RunOn::Source;
        }
    }
}

//! Flat form models bound to the console's wizard fields.

pub mod common;
pub mod dataset;
pub mod snapshot;
pub mod subtype;

use serde::{Deserialize, Serialize};

pub use common::{Acl, Retry, RunOn, Validity};
pub use dataset::{
    Allocation, DatasetUiModel, Endpoint, HdfsAllocation, HiveAllocation, HiveDatabaseType,
    HiveOptions, HiveSideOptions, MirrorType,
};
pub use snapshot::{SnapshotAllocation, SnapshotEndpoint, SnapshotUiModel};
pub use subtype::JobSubtype;

/// A UI model for any supported job sub-type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UiModel {
    Dataset(DatasetUiModel),
    Snapshot(SnapshotUiModel),
}

impl UiModel {
    /// A fresh model with console defaults.
    pub fn new(subtype: JobSubtype) -> Self {
        match subtype {
            JobSubtype::Hdfs => UiModel::Dataset(DatasetUiModel::new(MirrorType::Hdfs)),
            JobSubtype::Hive => UiModel::Dataset(DatasetUiModel::new(MirrorType::Hive)),
            JobSubtype::Snapshot => UiModel::Snapshot(SnapshotUiModel::default()),
        }
    }

    pub fn subtype(&self) -> JobSubtype {
        match self {
            UiModel::Dataset(m) => m.form_type.into(),
            UiModel::Snapshot(_) => JobSubtype::Snapshot,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            UiModel::Dataset(m) => &m.name,
            UiModel::Snapshot(m) => &m.name,
        }
    }

    pub fn acl_mut(&mut self) -> &mut Acl {
        match self {
            UiModel::Dataset(m) => &mut m.acl,
            UiModel::Snapshot(m) => &mut m.acl,
        }
    }

    pub fn validity_mut(&mut self) -> &mut Validity {
        match self {
            UiModel::Dataset(m) => &mut m.validity,
            UiModel::Snapshot(m) => &mut m.validity,
        }
    }
}

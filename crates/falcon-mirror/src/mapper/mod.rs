//! Projection between process entity documents and UI models.
//!
//! Both directions are pure: [`decode`] reads a process without touching it
//! and [`encode`] returns a new process derived from a base document. Each
//! job sub-type owns one property table in its own module.

mod common;
pub mod hdfs;
pub mod hive;
mod properties;
pub mod snapshot;

use tracing::{debug, info_span};

use crate::entity::{ClusterEntity, ProcessEntity};
use crate::error::MappingError;
use crate::model::{JobSubtype, MirrorType, UiModel};

/// How a loaded process populates the UI model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Keep the entity name.
    #[default]
    Edit,
    /// Start a new job from an existing one; the name is cleared.
    Clone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub mode: DecodeMode,
    /// Sub-type assumed when the tags carry no marker. `None` rejects such
    /// processes with [`MappingError::UnknownSubtype`].
    pub fallback: Option<JobSubtype>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            mode: DecodeMode::Edit,
            fallback: Some(JobSubtype::Hive),
        }
    }
}

impl DecodeOptions {
    pub fn clone_mode(mut self) -> Self {
        self.mode = DecodeMode::Clone;
        self
    }
}

/// Cluster definitions available while encoding, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct ClusterContext {
    clusters: Vec<ClusterEntity>,
}

impl ClusterContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cluster(mut self, cluster: ClusterEntity) -> Self {
        self.add(cluster);
        self
    }

    /// Adds a cluster, replacing one with the same name.
    pub fn add(&mut self, cluster: ClusterEntity) {
        self.clusters.retain(|c| c.name() != cluster.name());
        self.clusters.push(cluster);
    }

    pub fn get(&self, name: &str) -> Option<&ClusterEntity> {
        if name.is_empty() {
            return None;
        }
        self.clusters.iter().find(|c| c.name() == name)
    }

    /// Write interface endpoint of the named cluster.
    pub fn write_endpoint(&self, name: &str) -> Option<String> {
        self.get(name).and_then(ClusterEntity::write_endpoint)
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }
}

impl FromIterator<ClusterEntity> for ClusterContext {
    fn from_iter<I: IntoIterator<Item = ClusterEntity>>(iter: I) -> Self {
        let mut context = ClusterContext::new();
        for cluster in iter {
            context.add(cluster);
        }
        context
    }
}

/// Populates a UI model from a process document.
pub fn decode(process: &ProcessEntity, options: &DecodeOptions) -> Result<UiModel, MappingError> {
    let subtype = JobSubtype::resolve(&process.tags(), options.fallback)?;
    let _span = info_span!("mapper.decode", process = %process.name(), subtype = %subtype).entered();

    let header = common::decode_header(process, options.mode)?;
    let model = match subtype {
        JobSubtype::Hdfs => UiModel::Dataset(hdfs::decode(process, header)?),
        JobSubtype::Hive => UiModel::Dataset(hive::decode(process, header)?),
        JobSubtype::Snapshot => UiModel::Snapshot(snapshot::decode(process, header)?),
    };

    debug!(properties = process.properties().len(), "Decoded process");
    Ok(model)
}

/// Derives a process document from a UI model, starting from `base`.
///
/// Properties present in `base` are rewritten in place; unknown properties
/// and elements are carried over unchanged.
pub fn encode(
    ui: &UiModel,
    base: &ProcessEntity,
    clusters: &ClusterContext,
) -> Result<ProcessEntity, MappingError> {
    let _span = info_span!("mapper.encode", name = %ui.name(), subtype = %ui.subtype()).entered();

    let mut process = base.clone();
    match ui {
        UiModel::Dataset(model) => match model.form_type {
            MirrorType::Hdfs => hdfs::encode(model, &mut process, clusters)?,
            MirrorType::Hive => hive::encode(model, &mut process, clusters)?,
        },
        UiModel::Snapshot(model) => snapshot::encode(model, &mut process)?,
    }

    debug!(
        properties = process.properties().len(),
        clusters = clusters.len(),
        "Encoded process"
    );
    Ok(process)
}

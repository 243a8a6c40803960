//! Load, edit and save mirroring jobs against an entity store.

use tracing::{debug, info, instrument, warn};

use crate::client::{ApiResult, EntityStore};
use crate::codec::LocationKind;
use crate::config::Config;
use crate::entity::{default_process, ClusterEntity, EntityType, InterfaceKind, ProcessEntity};
use crate::error::Result;
use crate::extension::ExtensionProperties;
use crate::mapper::{self, ClusterContext, DecodeMode, DecodeOptions};
use crate::model::{DatasetUiModel, Endpoint, JobSubtype, MirrorType, UiModel};

/// A UI model together with the process document it will be encoded onto.
#[derive(Debug, Clone)]
pub struct Job {
    pub ui: UiModel,
    pub base: ProcessEntity,
}

pub struct MirrorService<S: EntityStore> {
    store: S,
    config: Config,
}

impl<S: EntityStore> MirrorService<S> {
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn decode_options(&self, mode: DecodeMode) -> DecodeOptions {
        DecodeOptions {
            mode,
            fallback: self.config.subtype_fallback,
        }
    }

    /// A fresh job of `subtype` with configured defaults applied.
    pub fn new_job(&self, subtype: JobSubtype) -> Job {
        let mut ui = UiModel::new(subtype);
        let defaults = &self.config.defaults;

        let acl = ui.acl_mut();
        acl.owner = defaults.owner.clone();
        acl.group = defaults.group.clone();
        acl.permission = defaults.permission.clone();
        ui.validity_mut().timezone = defaults.timezone.clone();

        Job {
            ui,
            base: default_process(subtype),
        }
    }

    /// Fetches a process and decodes it for editing or cloning.
    #[instrument(skip(self), err)]
    pub async fn load(&self, name: &str, mode: DecodeMode) -> Result<Job> {
        let xml = self
            .store
            .get_entity_definition(EntityType::Process, name)
            .await?;
        let base = ProcessEntity::parse(&xml)?;
        let ui = mapper::decode(&base, &self.decode_options(mode))?;

        info!(subtype = %ui.subtype(), "Loaded process");
        Ok(Job { ui, base })
    }

    #[instrument(skip(self), err)]
    pub async fn fetch_cluster(&self, name: &str) -> Result<ClusterEntity> {
        let xml = self
            .store
            .get_entity_definition(EntityType::Cluster, name)
            .await?;
        Ok(ClusterEntity::parse(&xml)?)
    }

    /// Fetches the named cluster definitions. Empty names are skipped.
    pub async fn cluster_context(&self, source: &str, target: &str) -> Result<ClusterContext> {
        let mut context = ClusterContext::new();
        for name in [source, target] {
            if name.is_empty() || context.get(name).is_some() {
                continue;
            }
            context.add(self.fetch_cluster(name).await?);
        }
        debug!(clusters = context.len(), "Resolved cluster context");
        Ok(context)
    }

    /// Fills empty endpoint fields of a dataset job from its cluster definitions.
    pub fn apply_cluster_defaults(ui: &mut DatasetUiModel, clusters: &ClusterContext) {
        let form_type = ui.form_type;
        let sides = [
            (&mut ui.source, &mut ui.hive_options.source),
            (&mut ui.target, &mut ui.hive_options.target),
        ];
        for (endpoint, hive) in sides {
            let Some(cluster) = clusters.get(&endpoint.cluster) else {
                continue;
            };
            match form_type {
                MirrorType::Hdfs => {
                    if endpoint.location == LocationKind::Hdfs && endpoint.url.is_empty() {
                        endpoint.url = cluster.write_endpoint().unwrap_or_default();
                    }
                }
                MirrorType::Hive => {
                    if hive.staging_path.is_empty() {
                        hive.staging_path = cluster.staging_path().unwrap_or_default();
                    }
                    if hive.hive_server2_endpoint.is_empty() {
                        hive.hive_server2_endpoint =
                            cluster.hive_server2_endpoint().unwrap_or_default();
                    }
                    if endpoint.hive_metastore_uri.is_empty() {
                        endpoint.hive_metastore_uri = cluster
                            .interface_endpoint(InterfaceKind::Registry)
                            .unwrap_or_default();
                    }
                }
            }
        }
    }

    /// Encodes a job onto its base. Dataset jobs resolve their HDFS clusters
    /// from the store first.
    pub async fn encode(&self, job: &Job) -> Result<ProcessEntity> {
        let clusters = match &job.ui {
            UiModel::Dataset(model) => {
                self.cluster_context(hdfs_cluster(&model.source), hdfs_cluster(&model.target))
                    .await?
            }
            UiModel::Snapshot(_) => ClusterContext::new(),
        };
        Ok(mapper::encode(&job.ui, &job.base, &clusters)?)
    }

    /// Asks the server to validate the encoded process without storing it.
    #[instrument(skip_all, fields(name = %job.ui.name()), err)]
    pub async fn validate(&self, job: &Job) -> Result<ApiResult> {
        let xml = self.encode(job).await?.to_xml()?;
        Ok(self.store.validate(EntityType::Process, &xml).await?)
    }

    /// Encodes and submits a job; `editing` updates the existing one instead.
    ///
    /// Dataset jobs are sent as process documents, snapshot jobs as
    /// extension properties.
    #[instrument(skip_all, fields(name = %job.ui.name(), subtype = %job.ui.subtype(), editing = editing), err)]
    pub async fn save(&self, job: &Job, editing: bool) -> Result<ApiResult> {
        let result = match &job.ui {
            UiModel::Dataset(_) => {
                let process = self.encode(job).await?;
                let xml = process.to_xml()?;
                if editing {
                    self.store
                        .update(EntityType::Process, process.name(), &xml)
                        .await?
                } else {
                    self.store.submit(EntityType::Process, &xml).await?
                }
            }
            UiModel::Snapshot(model) => {
                let properties = ExtensionProperties::from_snapshot(model)?.to_string();
                let extension = JobSubtype::Snapshot.extension_name();
                if editing {
                    self.store.update_extension(extension, &properties).await?
                } else {
                    self.store.submit_extension(extension, &properties).await?
                }
            }
        };

        if result.is_success() {
            info!(request_id = %result.request_id, "{}", result.message);
        } else {
            warn!(status = %result.status, "{}", result.message);
        }
        Ok(result)
    }
}

/// Cluster name of an endpoint that lives on HDFS.
fn hdfs_cluster(endpoint: &Endpoint) -> &str {
    match endpoint.location {
        LocationKind::Hdfs => &endpoint.cluster,
        LocationKind::S3 | LocationKind::Azure => "",
    }
}

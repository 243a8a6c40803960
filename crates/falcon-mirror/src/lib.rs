pub mod client;
pub mod codec;
pub mod config;
pub mod entity;
pub mod error;
pub mod extension;
pub mod mapper;
pub mod model;
pub mod service;
pub mod xml;

pub use client::{ApiResult, ClientError, EntityStore, FalconClient};
pub use codec::{Frequency, LocationKind, Tag};
pub use config::{load_config, load_or_default, Config};
pub use entity::{default_process, ClusterEntity, EntityType, ProcessEntity};
pub use error::{ConfigError, MappingError, MirrorError, Result, XmlError};
pub use extension::ExtensionProperties;
pub use mapper::{decode, encode, ClusterContext, DecodeMode, DecodeOptions};
pub use model::{DatasetUiModel, JobSubtype, SnapshotUiModel, UiModel};
pub use service::{Job, MirrorService};

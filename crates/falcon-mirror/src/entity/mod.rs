//! Views over the server's XML entity documents.

pub mod cluster;
pub mod kind;
pub mod process;
pub mod templates;

pub use cluster::{ClusterEntity, Interface, InterfaceKind, Location};
pub use kind::{EntityDocument, EntityType};
pub use process::{
    AclSpec, NotificationSpec, ProcessCluster, ProcessEntity, Property, RetrySpec, Workflow,
    PROCESS_XMLNS,
};
pub use templates::default_process;

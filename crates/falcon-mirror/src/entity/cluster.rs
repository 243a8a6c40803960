use crate::error::MirrorError;
use crate::xml::XmlElement;

use super::kind::{EntityDocument, EntityType};

/// HiveServer2 port substituted into the registry endpoint.
const HIVE_SERVER2_PORT: u16 = 10000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceKind {
    ReadOnly,
    Write,
    Execute,
    Workflow,
    Messaging,
    Registry,
}

impl InterfaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterfaceKind::ReadOnly => "readonly",
            InterfaceKind::Write => "write",
            InterfaceKind::Execute => "execute",
            InterfaceKind::Workflow => "workflow",
            InterfaceKind::Messaging => "messaging",
            InterfaceKind::Registry => "registry",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    pub kind: String,
    pub endpoint: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub name: String,
    pub path: String,
}

/// Read-only view over a `<cluster>` entity document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterEntity {
    root: XmlElement,
}

impl ClusterEntity {
    pub fn parse(xml_str: &str) -> Result<Self, MirrorError> {
        let doc = EntityDocument::parse(xml_str)?;
        Ok(Self::try_from(doc)?)
    }

    pub fn name(&self) -> &str {
        self.root.attr("name").unwrap_or_default()
    }

    pub fn colo(&self) -> &str {
        self.root.attr("colo").unwrap_or_default()
    }

    pub fn interfaces(&self) -> Vec<Interface> {
        let Some(interfaces) = self.root.child("interfaces") else {
            return Vec::new();
        };
        interfaces
            .children_named("interface")
            .map(|i| Interface {
                kind: i.attr("type").unwrap_or_default().to_string(),
                endpoint: i.attr("endpoint").unwrap_or_default().to_string(),
                version: i.attr("version").unwrap_or_default().to_string(),
            })
            .collect()
    }

    pub fn locations(&self) -> Vec<Location> {
        let Some(locations) = self.root.child("locations") else {
            return Vec::new();
        };
        locations
            .children_named("location")
            .map(|l| Location {
                name: l.attr("name").unwrap_or_default().to_string(),
                path: l.attr("path").unwrap_or_default().to_string(),
            })
            .collect()
    }

    /// Endpoint of the last interface of this kind.
    pub fn interface_endpoint(&self, kind: InterfaceKind) -> Option<String> {
        self.interfaces()
            .into_iter()
            .rev()
            .find(|i| i.kind == kind.as_str())
            .map(|i| i.endpoint)
    }

    pub fn write_endpoint(&self) -> Option<String> {
        self.interface_endpoint(InterfaceKind::Write)
    }

    /// Path of the last location with this name.
    pub fn location_path(&self, name: &str) -> Option<String> {
        self.locations()
            .into_iter()
            .rev()
            .find(|l| l.name == name)
            .map(|l| l.path)
    }

    pub fn staging_path(&self) -> Option<String> {
        self.location_path("staging")
    }

    /// HiveServer2 URI derived from the metastore registry endpoint:
    /// `thrift://host:9083` becomes `hive2://host:10000`.
    pub fn hive_server2_endpoint(&self) -> Option<String> {
        let registry = self.interface_endpoint(InterfaceKind::Registry)?;
        hive_server2_uri(&registry)
    }
}

pub(crate) fn hive_server2_uri(registry: &str) -> Option<String> {
    let host = registry.split(':').nth(1).filter(|h| !h.is_empty())?;
    Some(format!("hive2:{}:{}", host, HIVE_SERVER2_PORT))
}

impl TryFrom<EntityDocument> for ClusterEntity {
    type Error = crate::error::MappingError;

    fn try_from(doc: EntityDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            root: doc.expect(EntityType::Cluster)?,
        })
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{MappingError, MirrorError, XmlError};
use crate::xml::{self, XmlElement};

/// Entity types persisted by the server, named by their XML root element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Cluster,
    Feed,
    Process,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Cluster => "cluster",
            EntityType::Feed => "feed",
            EntityType::Process => "process",
        }
    }

    /// Identifies the entity type from a root element name.
    pub fn identify(root: &XmlElement) -> Option<Self> {
        root.name.parse().ok()
    }

    pub fn all() -> &'static [EntityType] {
        &[EntityType::Cluster, EntityType::Feed, EntityType::Process]
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cluster" => Ok(EntityType::Cluster),
            "feed" => Ok(EntityType::Feed),
            "process" => Ok(EntityType::Process),
            _ => Err(format!("Unknown entity type: {}", s)),
        }
    }
}

/// A parsed entity document of a known type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDocument {
    pub kind: EntityType,
    pub root: XmlElement,
}

impl EntityDocument {
    pub fn parse(xml_str: &str) -> Result<Self, MirrorError> {
        let root = xml::parse(xml_str)?;
        Self::from_root(root)
    }

    pub fn from_root(root: XmlElement) -> Result<Self, MirrorError> {
        let kind = EntityType::identify(&root).ok_or_else(|| {
            MappingError::UnexpectedEntityType {
                expected: "cluster, feed or process".to_string(),
                found: root.name.clone(),
            }
        })?;
        Ok(Self { kind, root })
    }

    pub fn name(&self) -> &str {
        self.root.attr("name").unwrap_or_default()
    }

    pub fn to_xml(&self) -> Result<String, XmlError> {
        xml::to_xml_string(&self.root)
    }

    pub(crate) fn expect(self, expected: EntityType) -> Result<XmlElement, MappingError> {
        if self.kind != expected {
            return Err(MappingError::UnexpectedEntityType {
                expected: expected.to_string(),
                found: self.kind.to_string(),
            });
        }
        Ok(self.root)
    }
}

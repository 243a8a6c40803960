//! Typed view over a `<process>` entity document.
//!
//! The underlying tree is kept intact, so elements this view does not know
//! about are written back exactly as they were read.

use crate::error::{MirrorError, XmlError};
use crate::xml::{self, XmlElement};

use super::kind::{EntityDocument, EntityType};

pub const PROCESS_XMLNS: &str = "uri:falcon:process:0.1";

/// Child element order of `<process>`.
const PROCESS_ELEMENT_ORDER: &[&str] = &[
    "tags",
    "pipelines",
    "clusters",
    "parallel",
    "order",
    "timeout",
    "frequency",
    "timezone",
    "inputs",
    "outputs",
    "properties",
    "workflow",
    "retry",
    "late-process",
    "ACL",
    "notification",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessCluster {
    pub name: String,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Workflow {
    pub name: String,
    pub engine: String,
    pub path: String,
    pub lib: String,
}

/// Raw `<retry>` attributes; values are validated by the mapper.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RetrySpec {
    pub policy: String,
    pub delay: String,
    pub attempts: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AclSpec {
    pub owner: String,
    pub group: String,
    pub permission: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationSpec {
    pub kind: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntity {
    root: XmlElement,
}

impl ProcessEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            root: XmlElement::new("process")
                .with_attr("xmlns", PROCESS_XMLNS)
                .with_attr("name", name),
        }
    }

    pub fn parse(xml_str: &str) -> Result<Self, MirrorError> {
        let doc = EntityDocument::parse(xml_str)?;
        Ok(Self::try_from(doc)?)
    }

    pub fn to_xml(&self) -> Result<String, XmlError> {
        xml::to_xml_string(&self.root)
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    pub fn name(&self) -> &str {
        self.root.attr("name").unwrap_or_default()
    }

    pub fn set_name(&mut self, name: &str) {
        self.root.set_attr("name", name);
    }

    pub fn tags(&self) -> String {
        self.text_of("tags").unwrap_or_default()
    }

    pub fn set_tags(&mut self, tags: &str) {
        self.set_text_of("tags", tags);
    }

    pub fn parallel(&self) -> Option<String> {
        self.text_of("parallel")
    }

    pub fn set_parallel(&mut self, parallel: &str) {
        self.set_text_of("parallel", parallel);
    }

    pub fn order(&self) -> Option<String> {
        self.text_of("order")
    }

    pub fn set_order(&mut self, order: &str) {
        self.set_text_of("order", order);
    }

    pub fn frequency(&self) -> Option<String> {
        self.text_of("frequency")
    }

    pub fn set_frequency(&mut self, frequency: &str) {
        self.set_text_of("frequency", frequency);
    }

    pub fn timezone(&self) -> Option<String> {
        self.text_of("timezone")
    }

    pub fn set_timezone(&mut self, timezone: &str) {
        self.set_text_of("timezone", timezone);
    }

    pub fn clusters(&self) -> Vec<ProcessCluster> {
        let Some(clusters) = self.root.child("clusters") else {
            return Vec::new();
        };
        clusters
            .children_named("cluster")
            .map(|c| {
                let validity = c.child("validity");
                ProcessCluster {
                    name: c.attr("name").unwrap_or_default().to_string(),
                    start: validity
                        .and_then(|v| v.attr("start"))
                        .unwrap_or_default()
                        .to_string(),
                    end: validity
                        .and_then(|v| v.attr("end"))
                        .unwrap_or_default()
                        .to_string(),
                }
            })
            .collect()
    }

    /// The first cluster, which the process runs on.
    pub fn primary_cluster(&self) -> Option<ProcessCluster> {
        self.clusters().into_iter().next()
    }

    /// Rewrites the first cluster, creating it when the process has none.
    pub fn set_primary_cluster(&mut self, cluster: &ProcessCluster) {
        let clusters = self.root.ensure_child("clusters", PROCESS_ELEMENT_ORDER);
        let target = clusters.ensure_child("cluster", &["cluster"]);
        target.set_attr("name", cluster.name.as_str());
        let validity = target.ensure_child("validity", &["validity"]);
        validity.set_attr("start", cluster.start.as_str());
        validity.set_attr("end", cluster.end.as_str());
    }

    pub fn properties(&self) -> Vec<Property> {
        let Some(properties) = self.root.child("properties") else {
            return Vec::new();
        };
        properties
            .children_named("property")
            .map(|p| Property {
                name: p.attr("name").unwrap_or_default().to_string(),
                value: p.attr("value").unwrap_or_default().to_string(),
            })
            .collect()
    }

    /// Value of the last property with the given name.
    pub fn property(&self, name: &str) -> Option<String> {
        self.properties()
            .into_iter()
            .rev()
            .find(|p| p.name == name)
            .map(|p| p.value)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.root.child("properties").is_some_and(|props| {
            props
                .children_named("property")
                .any(|p| p.attr("name") == Some(name))
        })
    }

    /// Rewrites every property with this name, appending one when absent.
    pub fn set_property(&mut self, name: &str, value: &str) {
        let properties = self.root.ensure_child("properties", PROCESS_ELEMENT_ORDER);
        let mut found = false;
        for property in properties.children_named_mut("property") {
            if property.attr("name") == Some(name) {
                property.set_attr("value", value);
                found = true;
            }
        }
        if !found {
            properties.push_child(
                XmlElement::new("property")
                    .with_attr("name", name)
                    .with_attr("value", value),
            );
        }
    }

    pub fn workflow(&self) -> Option<Workflow> {
        self.root.child("workflow").map(|w| Workflow {
            name: w.attr("name").unwrap_or_default().to_string(),
            engine: w.attr("engine").unwrap_or_default().to_string(),
            path: w.attr("path").unwrap_or_default().to_string(),
            lib: w.attr("lib").unwrap_or_default().to_string(),
        })
    }

    pub fn set_workflow(&mut self, workflow: &Workflow) {
        let element = self.root.ensure_child("workflow", PROCESS_ELEMENT_ORDER);
        element.set_attr("name", workflow.name.as_str());
        element.set_attr("engine", workflow.engine.as_str());
        element.set_attr("path", workflow.path.as_str());
        element.set_attr("lib", workflow.lib.as_str());
    }

    pub fn retry(&self) -> Option<RetrySpec> {
        self.root.child("retry").map(|r| RetrySpec {
            policy: r.attr("policy").unwrap_or_default().to_string(),
            delay: r.attr("delay").unwrap_or_default().to_string(),
            attempts: r.attr("attempts").unwrap_or_default().to_string(),
        })
    }

    pub fn set_retry(&mut self, retry: &RetrySpec) {
        let element = self.root.ensure_child("retry", PROCESS_ELEMENT_ORDER);
        element.set_attr("policy", retry.policy.as_str());
        element.set_attr("delay", retry.delay.as_str());
        element.set_attr("attempts", retry.attempts.as_str());
    }

    pub fn acl(&self) -> Option<AclSpec> {
        self.root.child("ACL").map(|a| AclSpec {
            owner: a.attr("owner").unwrap_or_default().to_string(),
            group: a.attr("group").unwrap_or_default().to_string(),
            permission: a.attr("permission").unwrap_or_default().to_string(),
        })
    }

    pub fn set_acl(&mut self, acl: &AclSpec) {
        let element = self.root.ensure_child("ACL", PROCESS_ELEMENT_ORDER);
        element.set_attr("owner", acl.owner.as_str());
        element.set_attr("group", acl.group.as_str());
        element.set_attr("permission", acl.permission.as_str());
    }

    pub fn notification(&self) -> Option<NotificationSpec> {
        self.root.child("notification").map(|n| NotificationSpec {
            kind: n.attr("type").unwrap_or_default().to_string(),
            to: n.attr("to").unwrap_or_default().to_string(),
        })
    }

    pub fn set_notification(&mut self, notification: &NotificationSpec) {
        let element = self
            .root
            .ensure_child("notification", PROCESS_ELEMENT_ORDER);
        element.set_attr("type", notification.kind.as_str());
        element.set_attr("to", notification.to.as_str());
    }

    fn text_of(&self, name: &str) -> Option<String> {
        self.root.child(name).map(|e| e.text().trim().to_string())
    }

    fn set_text_of(&mut self, name: &str, value: &str) {
        self.root
            .ensure_child(name, PROCESS_ELEMENT_ORDER)
            .set_text(value);
    }
}

impl TryFrom<EntityDocument> for ProcessEntity {
    type Error = crate::error::MappingError;

    fn try_from(doc: EntityDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            root: doc.expect(EntityType::Process)?,
        })
    }
}

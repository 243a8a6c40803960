//! In-memory entity store recording every call it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use falcon_mirror::entity::EntityDocument;
use falcon_mirror::{ApiResult, ClientError, EntityStore, EntityType};

/// A call made against the store, in order of arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Submit { kind: EntityType, name: String },
    Update { kind: EntityType, name: String },
    Validate { kind: EntityType },
    Schedule { kind: EntityType, name: String },
    Suspend { kind: EntityType, name: String },
    Resume { kind: EntityType, name: String },
    Delete { kind: EntityType, name: String },
    SubmitExtension { extension: String, properties: String },
    UpdateExtension { extension: String, properties: String },
}

#[derive(Default)]
pub struct InMemoryStore {
    entities: Mutex<HashMap<(EntityType, String), String>>,
    calls: Mutex<Vec<StoreCall>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity definition, keyed by the name in its XML.
    pub fn with_entity(self, xml: &str) -> Self {
        let doc = EntityDocument::parse(xml).unwrap();
        self.entities
            .lock()
            .unwrap()
            .insert((doc.kind, doc.name().to_string()), xml.to_string());
        self
    }

    pub fn definition(&self, kind: EntityType, name: &str) -> Option<String> {
        self.entities
            .lock()
            .unwrap()
            .get(&(kind, name.to_string()))
            .cloned()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn store(&self, kind: EntityType, xml: &str) -> Result<String, ClientError> {
        let doc = EntityDocument::parse(xml).map_err(|e| ClientError::Response(e.to_string()))?;
        if doc.kind != kind {
            return Err(ClientError::Server {
                status: 400,
                message: format!("expected {} but got {}", kind, doc.kind),
            });
        }
        let name = doc.name().to_string();
        self.entities
            .lock()
            .unwrap()
            .insert((kind, name.clone()), xml.to_string());
        Ok(name)
    }

    fn not_found(kind: EntityType, name: &str) -> ClientError {
        ClientError::Server {
            status: 404,
            message: format!("{} ({}) not found", name, kind),
        }
    }

    fn require(&self, kind: EntityType, name: &str) -> Result<(), ClientError> {
        if self.definition(kind, name).is_some() {
            Ok(())
        } else {
            Err(Self::not_found(kind, name))
        }
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn get_entity_definition(
        &self,
        kind: EntityType,
        name: &str,
    ) -> Result<String, ClientError> {
        self.definition(kind, name)
            .ok_or_else(|| Self::not_found(kind, name))
    }

    async fn validate(&self, kind: EntityType, xml: &str) -> Result<ApiResult, ClientError> {
        EntityDocument::parse(xml).map_err(|e| ClientError::Response(e.to_string()))?;
        self.record(StoreCall::Validate { kind });
        Ok(ApiResult::succeeded("Validated successfully"))
    }

    async fn submit(&self, kind: EntityType, xml: &str) -> Result<ApiResult, ClientError> {
        let name = EntityDocument::parse(xml)
            .map_err(|e| ClientError::Response(e.to_string()))?
            .name()
            .to_string();
        if self.definition(kind, &name).is_some() {
            return Err(ClientError::Server {
                status: 400,
                message: format!("{} ({}) already registered", name, kind),
            });
        }
        let name = self.store(kind, xml)?;
        self.record(StoreCall::Submit {
            kind,
            name: name.clone(),
        });
        Ok(ApiResult::succeeded(format!(
            "Submit successful ({}) {}",
            kind, name
        )))
    }

    async fn update(
        &self,
        kind: EntityType,
        name: &str,
        xml: &str,
    ) -> Result<ApiResult, ClientError> {
        self.require(kind, name)?;
        self.store(kind, xml)?;
        self.record(StoreCall::Update {
            kind,
            name: name.to_string(),
        });
        Ok(ApiResult::succeeded(format!(
            "Updated successfully ({}) {}",
            kind, name
        )))
    }

    async fn schedule(&self, kind: EntityType, name: &str) -> Result<ApiResult, ClientError> {
        self.require(kind, name)?;
        self.record(StoreCall::Schedule {
            kind,
            name: name.to_string(),
        });
        Ok(ApiResult::succeeded(format!("{}({}) scheduled", name, kind)))
    }

    async fn suspend(&self, kind: EntityType, name: &str) -> Result<ApiResult, ClientError> {
        self.require(kind, name)?;
        self.record(StoreCall::Suspend {
            kind,
            name: name.to_string(),
        });
        Ok(ApiResult::succeeded(format!("{}({}) suspended", name, kind)))
    }

    async fn resume(&self, kind: EntityType, name: &str) -> Result<ApiResult, ClientError> {
        self.require(kind, name)?;
        self.record(StoreCall::Resume {
            kind,
            name: name.to_string(),
        });
        Ok(ApiResult::succeeded(format!("{}({}) resumed", name, kind)))
    }

    async fn delete(&self, kind: EntityType, name: &str) -> Result<ApiResult, ClientError> {
        self.entities
            .lock()
            .unwrap()
            .remove(&(kind, name.to_string()))
            .ok_or_else(|| Self::not_found(kind, name))?;
        self.record(StoreCall::Delete {
            kind,
            name: name.to_string(),
        });
        Ok(ApiResult::succeeded(format!("{}({}) removed", name, kind)))
    }

    async fn submit_extension(
        &self,
        extension: &str,
        properties: &str,
    ) -> Result<ApiResult, ClientError> {
        self.record(StoreCall::SubmitExtension {
            extension: extension.to_string(),
            properties: properties.to_string(),
        });
        Ok(ApiResult::succeeded(format!(
            "Extension job submitted ({})",
            extension
        )))
    }

    async fn update_extension(
        &self,
        extension: &str,
        properties: &str,
    ) -> Result<ApiResult, ClientError> {
        self.record(StoreCall::UpdateExtension {
            extension: extension.to_string(),
            properties: properties.to_string(),
        });
        Ok(ApiResult::succeeded(format!(
            "Extension job updated ({})",
            extension
        )))
    }
}

//! Access to the server's entity and extension REST endpoints.

mod error;
mod falcon;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entity::EntityType;
use crate::xml;

pub use error::ClientError;
pub use falcon::FalconClient;

/// Status the server reports for a successful operation.
pub const STATUS_SUCCEEDED: &str = "SUCCEEDED";

/// The server's `<result>` reply to an entity operation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiResult {
    pub status: String,
    pub message: String,
    pub request_id: String,
}

impl ApiResult {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCEEDED.to_string(),
            message: message.into(),
            request_id: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCEEDED
    }

    /// Reads `<result><status/><message/><requestId/></result>`.
    pub fn parse(body: &str) -> Result<Self, ClientError> {
        let root = xml::parse(body).map_err(|e| ClientError::Response(e.to_string()))?;
        if root.name != "result" {
            return Err(ClientError::Response(format!(
                "expected <result>, found <{}>",
                root.name
            )));
        }
        let text = |name: &str| {
            root.child(name)
                .map(|e| e.text().trim().to_string())
                .unwrap_or_default()
        };
        Ok(Self {
            status: text("status"),
            message: text("message"),
            request_id: text("requestId"),
        })
    }
}

/// Entity store operations the mirror service depends on.
///
/// Implementations do not retry or cache.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Returns the entity's XML definition.
    async fn get_entity_definition(
        &self,
        kind: EntityType,
        name: &str,
    ) -> Result<String, ClientError>;

    async fn validate(&self, kind: EntityType, xml: &str) -> Result<ApiResult, ClientError>;

    async fn submit(&self, kind: EntityType, xml: &str) -> Result<ApiResult, ClientError>;

    async fn update(
        &self,
        kind: EntityType,
        name: &str,
        xml: &str,
    ) -> Result<ApiResult, ClientError>;

    async fn schedule(&self, kind: EntityType, name: &str) -> Result<ApiResult, ClientError>;

    async fn suspend(&self, kind: EntityType, name: &str) -> Result<ApiResult, ClientError>;

    async fn resume(&self, kind: EntityType, name: &str) -> Result<ApiResult, ClientError>;

    async fn delete(&self, kind: EntityType, name: &str) -> Result<ApiResult, ClientError>;

    /// Submits a job for `extension` described by `key=value` lines.
    async fn submit_extension(
        &self,
        extension: &str,
        properties: &str,
    ) -> Result<ApiResult, ClientError>;

    async fn update_extension(
        &self,
        extension: &str,
        properties: &str,
    ) -> Result<ApiResult, ClientError>;
}

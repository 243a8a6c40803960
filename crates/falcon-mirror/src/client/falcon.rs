//! reqwest-backed [`EntityStore`] talking to the Falcon REST API.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, Method, RequestBuilder, Url};

use super::{ApiResult, ClientError, EntityStore};
use crate::config::ServerConfig;
use crate::entity::EntityType;

/// Maximum length of a server error body kept in an error message.
const MAX_ERROR_BODY_LENGTH: usize = 500;

const TEXT_PLAIN: &str = "text/plain";

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_LENGTH) {
        Some((idx, _)) => format!("{}... (truncated)", &body[..idx]),
        None => body.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct FalconClient {
    client: Client,
    base_url: Url,
    user: String,
}

impl FalconClient {
    pub fn new(config: &ServerConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ClientError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                url: config.base_url.clone(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url,
            user: config.user.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/api/<segments...>?user.name=<user>`.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl {
                    url: self.base_url.to_string(),
                    reason: "URL cannot be used as a base".to_string(),
                })?;
            path.pop_if_empty().push("api").extend(segments);
        }
        if !self.user.is_empty() {
            url.query_pairs_mut().append_pair("user.name", &self.user);
        }
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        let url = self.endpoint(segments)?;
        debug!("{} {}", method, url);
        Ok(self.client.request(method, url))
    }

    async fn send_text(&self, request: RequestBuilder) -> Result<String, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match ApiResult::parse(&body) {
                Ok(result) if !result.message.is_empty() => result.message,
                _ => truncate_body(&body),
            };
            warn!("Request failed ({}): {}", status, message);
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    async fn send_result(&self, request: RequestBuilder) -> Result<ApiResult, ClientError> {
        let body = self.send_text(request).await?;
        let result = ApiResult::parse(&body)?;
        info!("{}: {}", result.status, result.message);
        Ok(result)
    }

    async fn post_text(&self, segments: &[&str], body: &str) -> Result<ApiResult, ClientError> {
        let request = self
            .request(Method::POST, segments)?
            .header(reqwest::header::CONTENT_TYPE, TEXT_PLAIN)
            .body(body.to_string());
        self.send_result(request).await
    }

    async fn entity_action(
        &self,
        method: Method,
        action: &str,
        kind: EntityType,
        name: &str,
    ) -> Result<ApiResult, ClientError> {
        let request = self.request(method, &["entities", action, kind.as_str(), name])?;
        self.send_result(request).await
    }
}

#[async_trait]
impl EntityStore for FalconClient {
    async fn get_entity_definition(
        &self,
        kind: EntityType,
        name: &str,
    ) -> Result<String, ClientError> {
        let request = self
            .request(Method::GET, &["entities", "definition", kind.as_str(), name])?
            .header(reqwest::header::ACCEPT, TEXT_PLAIN);
        self.send_text(request).await
    }

    async fn validate(&self, kind: EntityType, xml: &str) -> Result<ApiResult, ClientError> {
        self.post_text(&["entities", "validate", kind.as_str()], xml)
            .await
    }

    async fn submit(&self, kind: EntityType, xml: &str) -> Result<ApiResult, ClientError> {
        self.post_text(&["entities", "submit", kind.as_str()], xml)
            .await
    }

    async fn update(
        &self,
        kind: EntityType,
        name: &str,
        xml: &str,
    ) -> Result<ApiResult, ClientError> {
        self.post_text(&["entities", "update", kind.as_str(), name], xml)
            .await
    }

    async fn schedule(&self, kind: EntityType, name: &str) -> Result<ApiResult, ClientError> {
        self.entity_action(Method::POST, "schedule", kind, name)
            .await
    }

    async fn suspend(&self, kind: EntityType, name: &str) -> Result<ApiResult, ClientError> {
        self.entity_action(Method::POST, "suspend", kind, name)
            .await
    }

    async fn resume(&self, kind: EntityType, name: &str) -> Result<ApiResult, ClientError> {
        self.entity_action(Method::POST, "resume", kind, name)
            .await
    }

    async fn delete(&self, kind: EntityType, name: &str) -> Result<ApiResult, ClientError> {
        self.entity_action(Method::DELETE, "delete", kind, name)
            .await
    }

    async fn submit_extension(
        &self,
        extension: &str,
        properties: &str,
    ) -> Result<ApiResult, ClientError> {
        self.post_text(&["extension", "submit", extension], properties)
            .await
    }

    async fn update_extension(
        &self,
        extension: &str,
        properties: &str,
    ) -> Result<ApiResult, ClientError> {
        self.post_text(&["extension", "update", extension], properties)
            .await
    }
}

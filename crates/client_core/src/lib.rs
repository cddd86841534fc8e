use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use shared::{
    domain::{Collection, Conversation, GenerationService, PromptId, SystemPrompt},
    error::ApiError,
    protocol::{
        CollectionListResponse, CreateCollectionResponse, GenerationRequest, GenerationResponse,
        MaintenanceStatusResponse, MaintenanceToggleResponse, MessageResponse, NewCollection,
        PromptDraft,
    },
};
use tracing::{debug, warn};
use url::Url;

pub mod error;
pub mod forms;

pub use error::{DeskError, DeskResult};

/// The REST contract the page controllers talk to.
#[async_trait]
pub trait DeskApi: Send + Sync {
    async fn list_collections(&self) -> DeskResult<Vec<Collection>>;
    async fn create_collection(
        &self,
        collection: &NewCollection,
    ) -> DeskResult<CreateCollectionResponse>;
    async fn delete_collection(&self, name: &str) -> DeskResult<MessageResponse>;
    async fn maintenance_status(&self) -> DeskResult<bool>;
    async fn toggle_maintenance(&self) -> DeskResult<MaintenanceToggleResponse>;
    async fn list_system_prompts(&self) -> DeskResult<Vec<SystemPrompt>>;
    async fn get_system_prompt(&self, id: PromptId) -> DeskResult<SystemPrompt>;
    async fn create_system_prompt(&self, draft: &PromptDraft) -> DeskResult<SystemPrompt>;
    async fn update_system_prompt(
        &self,
        id: PromptId,
        draft: &PromptDraft,
    ) -> DeskResult<SystemPrompt>;
    async fn delete_system_prompt(&self, id: PromptId) -> DeskResult<()>;
    async fn clear_chat_history(&self) -> DeskResult<MessageResponse>;
    async fn generate(&self, request: &GenerationRequest) -> DeskResult<GenerationResponse>;
}

#[derive(Debug, Clone)]
pub struct DeskClient {
    http: Client,
    base_url: Url,
}

impl DeskClient {
    pub fn new(server_url: &str) -> DeskResult<Self> {
        Self::with_http_client(server_url, Client::new())
    }

    pub fn with_timeout(server_url: &str, timeout: Option<Duration>) -> DeskResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_http_client(server_url, builder.build()?)
    }

    pub fn with_http_client(server_url: &str, http: Client) -> DeskResult<Self> {
        let base_url = parse_base_url(server_url)?;
        Ok(Self { http, base_url })
    }

    /// Resolves an endpoint below the base url. Each segment is percent
    /// encoded, so collection names containing `/` or spaces stay one segment.
    pub fn endpoint(&self, segments: &[&str]) -> DeskResult<Url> {
        let mut url = self.base_url.clone();
        if segments.is_empty() {
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            return Ok(url);
        }
        url.path_segments_mut()
            .map_err(|()| DeskError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "url cannot be a base".into(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn parse_base_url(server_url: &str) -> DeskResult<Url> {
    let trimmed = server_url.trim();
    let url = Url::parse(trimmed).map_err(|err| DeskError::InvalidUrl {
        url: trimmed.to_string(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(DeskError::InvalidUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

/// Decodes a body only after the status was checked.
async fn expect_json<T: DeserializeOwned>(response: Response) -> DeskResult<T> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    serde_json::from_str(&body).map_err(|source| DeskError::Decode {
        status: status.as_u16(),
        source,
    })
}

/// Decodes a body whatever the status. Used where the server reports
/// failures as regular JSON payloads.
async fn decode_any_status<T: DeserializeOwned>(response: Response) -> DeskResult<T> {
    let status = response.status();
    let body = response.text().await?;
    match serde_json::from_str(&body) {
        Ok(value) => {
            if !status.is_success() {
                warn!(status = status.as_u16(), "server reported failure in body");
            }
            Ok(value)
        }
        Err(_) if !status.is_success() => Err(status_error(status, &body)),
        Err(source) => Err(DeskError::Decode {
            status: status.as_u16(),
            source,
        }),
    }
}

/// The `error` field the generation endpoint sends instead of a result.
#[derive(Deserialize)]
struct GenerationFailure {
    error: Option<String>,
}

/// A successful generation body. `generated_text` is required.
#[derive(Deserialize)]
struct GenerationReply {
    generated_text: String,
    #[serde(default)]
    citations: Vec<String>,
    #[serde(default)]
    conversations: Vec<Conversation>,
    #[serde(default)]
    selected_service: Option<GenerationService>,
}

impl From<GenerationReply> for GenerationResponse {
    fn from(reply: GenerationReply) -> Self {
        Self {
            generated_text: reply.generated_text,
            citations: reply.citations,
            conversations: reply.conversations,
            selected_service: reply.selected_service,
            error: None,
        }
    }
}

fn status_error(status: StatusCode, body: &str) -> DeskError {
    DeskError::Status {
        status: status.as_u16(),
        api: ApiError::from_response(status.as_u16(), body),
    }
}

#[async_trait]
impl DeskApi for DeskClient {
    async fn list_collections(&self) -> DeskResult<Vec<Collection>> {
        let url = self.endpoint(&["list_collections"])?;
        debug!(%url, "listing collections");
        let response = self.http.get(url).send().await?;
        let body: CollectionListResponse = expect_json(response).await?;
        Ok(body.collections)
    }

    async fn create_collection(
        &self,
        collection: &NewCollection,
    ) -> DeskResult<CreateCollectionResponse> {
        let form = forms::collection_form(collection)?;
        let url = self.endpoint(&["create_collection"])?;
        debug!(%url, title = %collection.title, files = collection.pdfs.len(), "creating collection");
        let response = self.http.post(url).multipart(form).send().await?;
        expect_json(response).await
    }

    async fn delete_collection(&self, name: &str) -> DeskResult<MessageResponse> {
        let url = self.endpoint(&["delete_collection", name])?;
        debug!(%url, "deleting collection");
        let response = self.http.post(url).send().await?;
        decode_any_status(response).await
    }

    async fn maintenance_status(&self) -> DeskResult<bool> {
        let url = self.endpoint(&["maintenance_status"])?;
        let response = self.http.get(url).send().await?;
        let body: MaintenanceStatusResponse = expect_json(response).await?;
        Ok(body.maintenance)
    }

    async fn toggle_maintenance(&self) -> DeskResult<MaintenanceToggleResponse> {
        let url = self.endpoint(&["toggle_maintenance"])?;
        debug!(%url, "toggling maintenance mode");
        let response = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        expect_json(response).await
    }

    async fn list_system_prompts(&self) -> DeskResult<Vec<SystemPrompt>> {
        let url = self.endpoint(&["system_prompts"])?;
        let response = self.http.get(url).send().await?;
        expect_json(response).await
    }

    async fn get_system_prompt(&self, id: PromptId) -> DeskResult<SystemPrompt> {
        let id = id.to_string();
        let url = self.endpoint(&["system_prompts", &id])?;
        let response = self.http.get(url).send().await?;
        expect_json(response).await
    }

    async fn create_system_prompt(&self, draft: &PromptDraft) -> DeskResult<SystemPrompt> {
        let url = self.endpoint(&["system_prompts"])?;
        debug!(%url, name = %draft.name, "creating system prompt");
        let response = self.http.post(url).json(draft).send().await?;
        expect_json(response).await
    }

    async fn update_system_prompt(
        &self,
        id: PromptId,
        draft: &PromptDraft,
    ) -> DeskResult<SystemPrompt> {
        let id = id.to_string();
        let url = self.endpoint(&["system_prompts", &id])?;
        debug!(%url, name = %draft.name, "updating system prompt");
        let response = self.http.put(url).json(draft).send().await?;
        expect_json(response).await
    }

    async fn delete_system_prompt(&self, id: PromptId) -> DeskResult<()> {
        let id = id.to_string();
        let url = self.endpoint(&["system_prompts", &id])?;
        debug!(%url, "deleting system prompt");
        let response = self.http.delete(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(status_error(status, &body));
        }
        Ok(())
    }

    async fn clear_chat_history(&self) -> DeskResult<MessageResponse> {
        let url = self.endpoint(&["clear_chat_history"])?;
        debug!(%url, "clearing chat history");
        let response = self.http.post(url).send().await?;
        decode_any_status(response).await
    }

    async fn generate(&self, request: &GenerationRequest) -> DeskResult<GenerationResponse> {
        let url = self.endpoint(&[])?;
        debug!(
            %url,
            collection = %request.collection_name,
            service = request.service.as_str(),
            "requesting generation"
        );
        let response = self
            .http
            .post(url)
            .multipart(forms::generation_form(request))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if let Ok(GenerationFailure { error: Some(error) }) = serde_json::from_str(&body) {
            return Err(DeskError::Application(error));
        }
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        let reply: GenerationReply =
            serde_json::from_str(&body).map_err(|source| DeskError::Decode {
                status: status.as_u16(),
                source,
            })?;
        Ok(reply.into())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::domain::{Collection, Conversation, GenerationService, PromptId};

pub const DEFAULT_LENGTH: &str = "mittel";
pub const DEFAULT_TONE: &str = "professionell";
pub const MAINTENANCE_TOGGLE_SUCCESS: &str = "success";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionListResponse {
    pub collections: Vec<Collection>,
}

/// Body shared by every endpoint that only reports a human readable outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCollectionResponse {
    pub message: String,
    #[serde(default)]
    pub processed_files: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceStatusResponse {
    pub maintenance: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceToggleResponse {
    pub status: String,
    pub maintenance: bool,
}

impl MaintenanceToggleResponse {
    pub fn is_success(&self) -> bool {
        self.status == MAINTENANCE_TOGGLE_SUCCESS
    }
}

/// JSON body for creating or updating a system prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptDraft {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCollection {
    pub title: String,
    pub pdfs: Vec<PdfUpload>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub collection_name: String,
    pub length: String,
    pub tone: String,
    pub service: GenerationService,
    pub system_prompt_id: Option<PromptId>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, collection_name: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            collection_name: collection_name.into(),
            length: DEFAULT_LENGTH.to_owned(),
            tone: DEFAULT_TONE.to_owned(),
            service: GenerationService::default(),
            system_prompt_id: None,
        }
    }

    /// Text fields in the order the generation form submits them.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("prompt", self.prompt.clone()),
            ("collection_name", self.collection_name.clone()),
            ("length", self.length.clone()),
            ("tone", self.tone.clone()),
            ("service", self.service.as_str().to_owned()),
        ];
        if let Some(id) = self.system_prompt_id {
            fields.push(("system_prompt_id", id.to_string()));
        }
        fields
    }
}

/// Generation result. Failures arrive as `{"error": "..."}` with every other
/// field absent, so all of them default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub generated_text: String,
    #[serde(default)]
    pub citations: Vec<String>,
    #[serde(default)]
    pub conversations: Vec<Conversation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_service: Option<GenerationService>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;

use std::{collections::HashSet, sync::Mutex};

use async_trait::async_trait;
use client_core::{DeskApi, DeskError, DeskResult};
use shared::{
    domain::{Collection, Conversation, PromptId, SystemPrompt},
    error::{ApiError, ErrorCode},
    protocol::{
        CreateCollectionResponse, GenerationRequest, GenerationResponse,
        MaintenanceToggleResponse, MessageResponse, NewCollection, PromptDraft,
    },
};

use crate::controller::interaction::Interaction;

/// In-memory server double. Records one entry per request, formatted as
/// `METHOD /path`.
pub struct FakeApi {
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<&'static str>>,
    pub collections: Mutex<Vec<Collection>>,
    pub prompts: Mutex<Vec<SystemPrompt>>,
    pub maintenance: Mutex<bool>,
    pub toggle_status: Mutex<String>,
    pub generation: Mutex<GenerationResponse>,
    pub drafts: Mutex<Vec<PromptDraft>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            collections: Mutex::new(vec![collection("handbuch"), collection("richtlinien")]),
            prompts: Mutex::new(vec![SystemPrompt {
                id: PromptId(1),
                name: "Formal".into(),
                content: "Antworte formell.".into(),
            }]),
            maintenance: Mutex::new(false),
            toggle_status: Mutex::new("success".into()),
            generation: Mutex::new(GenerationResponse::default()),
            drafts: Mutex::new(Vec::new()),
        }
    }
}

pub fn collection(name: &str) -> Collection {
    Collection {
        name: name.to_string(),
        description: format!("Beschreibung von {name}"),
        document_count: 1,
        chunk_count: 8,
        embedding_function: "Default".into(),
        max_tokens_per_chunk: 512,
        files: vec![format!("{name}.pdf")],
    }
}

pub fn conversation(input: &str, output: &str) -> Conversation {
    Conversation {
        input: input.to_string(),
        output: output.to_string(),
    }
}

impl FakeApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().expect("calls lock").clear();
    }

    /// Makes every request whose call label equals `call` fail with a 500.
    pub fn fail(&self, call: &'static str) {
        self.failing.lock().expect("failing lock").insert(call);
    }

    fn record(&self, call: impl Into<String>) -> DeskResult<()> {
        let call = call.into();
        self.calls.lock().expect("calls lock").push(call.clone());
        if self.failing.lock().expect("failing lock").contains(call.as_str()) {
            return Err(DeskError::Status {
                status: 500,
                api: ApiError::new(ErrorCode::Internal, format!("{call} failed")),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DeskApi for FakeApi {
    async fn list_collections(&self) -> DeskResult<Vec<Collection>> {
        self.record("GET /list_collections")?;
        Ok(self.collections.lock().expect("lock").clone())
    }

    async fn create_collection(
        &self,
        collection: &NewCollection,
    ) -> DeskResult<CreateCollectionResponse> {
        client_core::forms::validate_new_collection(collection)?;
        self.record("POST /create_collection")?;
        self.collections
            .lock()
            .expect("lock")
            .push(self::collection(&collection.title));
        Ok(CreateCollectionResponse {
            message: format!("Collection '{}' created successfully", collection.title),
            processed_files: collection
                .pdfs
                .iter()
                .map(|pdf| pdf.file_name.clone())
                .collect(),
        })
    }

    async fn delete_collection(&self, name: &str) -> DeskResult<MessageResponse> {
        self.record(format!("POST /delete_collection/{name}"))?;
        self.collections
            .lock()
            .expect("lock")
            .retain(|collection| collection.name != name);
        Ok(MessageResponse {
            message: format!("Collection \"{name}\" wurde erfolgreich gelöscht."),
        })
    }

    async fn maintenance_status(&self) -> DeskResult<bool> {
        self.record("GET /maintenance_status")?;
        Ok(*self.maintenance.lock().expect("lock"))
    }

    async fn toggle_maintenance(&self) -> DeskResult<MaintenanceToggleResponse> {
        self.record("POST /toggle_maintenance")?;
        let mut maintenance = self.maintenance.lock().expect("lock");
        *maintenance = !*maintenance;
        Ok(MaintenanceToggleResponse {
            status: self.toggle_status.lock().expect("lock").clone(),
            maintenance: *maintenance,
        })
    }

    async fn list_system_prompts(&self) -> DeskResult<Vec<SystemPrompt>> {
        self.record("GET /system_prompts")?;
        Ok(self.prompts.lock().expect("lock").clone())
    }

    async fn get_system_prompt(&self, id: PromptId) -> DeskResult<SystemPrompt> {
        self.record(format!("GET /system_prompts/{id}"))?;
        self.prompts
            .lock()
            .expect("lock")
            .iter()
            .find(|prompt| prompt.id == id)
            .cloned()
            .ok_or_else(|| DeskError::Status {
                status: 404,
                api: ApiError::new(ErrorCode::NotFound, "not found"),
            })
    }

    async fn create_system_prompt(&self, draft: &PromptDraft) -> DeskResult<SystemPrompt> {
        self.record("POST /system_prompts")?;
        self.drafts.lock().expect("lock").push(draft.clone());
        let mut prompts = self.prompts.lock().expect("lock");
        let id = PromptId(prompts.iter().map(|p| p.id.0).max().unwrap_or(0) + 1);
        let prompt = SystemPrompt {
            id,
            name: draft.name.clone(),
            content: draft.content.clone(),
        };
        prompts.push(prompt.clone());
        Ok(prompt)
    }

    async fn update_system_prompt(
        &self,
        id: PromptId,
        draft: &PromptDraft,
    ) -> DeskResult<SystemPrompt> {
        self.record(format!("PUT /system_prompts/{id}"))?;
        self.drafts.lock().expect("lock").push(draft.clone());
        let mut prompts = self.prompts.lock().expect("lock");
        let prompt = prompts
            .iter_mut()
            .find(|prompt| prompt.id == id)
            .ok_or_else(|| DeskError::Status {
                status: 404,
                api: ApiError::new(ErrorCode::NotFound, "not found"),
            })?;
        prompt.name = draft.name.clone();
        prompt.content = draft.content.clone();
        Ok(prompt.clone())
    }

    async fn delete_system_prompt(&self, id: PromptId) -> DeskResult<()> {
        self.record(format!("DELETE /system_prompts/{id}"))?;
        self.prompts
            .lock()
            .expect("lock")
            .retain(|prompt| prompt.id != id);
        Ok(())
    }

    async fn clear_chat_history(&self) -> DeskResult<MessageResponse> {
        self.record("POST /clear_chat_history")?;
        Ok(MessageResponse {
            message: "Chatverlauf wurde erfolgreich gelöscht.".into(),
        })
    }

    async fn generate(&self, _request: &GenerationRequest) -> DeskResult<GenerationResponse> {
        self.record("POST /")?;
        let response = self.generation.lock().expect("lock").clone();
        if let Some(error) = response.error {
            return Err(DeskError::Application(error));
        }
        Ok(response)
    }
}

#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    pub answer: bool,
    pub questions: Vec<String>,
    pub alerts: Vec<String>,
    pub reloads: usize,
}

impl ScriptedInteraction {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }
}

impl Interaction for ScriptedInteraction {
    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_string());
        self.answer
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }
}

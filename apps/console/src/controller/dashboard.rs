//! Dashboard page: collections, system prompts, chat history reset, and the
//! maintenance toggle.

use std::sync::Arc;

use client_core::{DeskApi, DeskError};
use shared::{
    domain::{Collection, PromptId, SystemPrompt},
    protocol::{NewCollection, PdfUpload, PromptDraft},
};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::{
    controller::{
        events::{report, UiErrorContext},
        interaction::Interaction,
    },
    labels::Labels,
    view::{render, ButtonTone, ModalKind, ModalState, TransientButton},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionForm {
    pub title: String,
    pub pdfs: Vec<PdfUpload>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptEditor {
    pub title: String,
    pub name: String,
    pub content: String,
    /// Set while editing an existing prompt, `None` while adding one.
    pub prompt_id: Option<PromptId>,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub collections: Vec<Collection>,
    pub collection_modal: ModalState<Collection>,
    pub collection_form: CollectionForm,
    pub message: String,
    pub spinner: bool,
    pub maintenance_button: TransientButton,
    pub prompts: Vec<SystemPrompt>,
    pub prompt_editor: ModalState<PromptEditor>,
}

impl DashboardState {
    fn new(labels: &Labels) -> Self {
        Self {
            collections: Vec::new(),
            collection_modal: ModalState::Hidden,
            collection_form: CollectionForm::default(),
            message: String::new(),
            spinner: false,
            maintenance_button: TransientButton::new(
                labels.maintenance_toggle.clone(),
                ButtonTone::Primary,
            ),
            prompts: Vec::new(),
            prompt_editor: ModalState::Hidden,
        }
    }
}

pub struct DashboardController<I: Interaction> {
    api: Arc<dyn DeskApi>,
    host: I,
    labels: Labels,
    state: DashboardState,
}

impl<I: Interaction> DashboardController<I> {
    pub fn new(api: Arc<dyn DeskApi>, host: I, labels: Labels) -> Self {
        let state = DashboardState::new(&labels);
        Self {
            api,
            host,
            labels,
            state,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn host(&self) -> &I {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut I {
        &mut self.host
    }

    pub fn render(&self) -> askama::Result<String> {
        render::dashboard(&self.state, &self.labels)
    }

    /// Initial page load. The three reads run concurrently; each result is
    /// applied independently.
    pub async fn load_page(&mut self) {
        let api = Arc::clone(&self.api);
        let (collections, prompts, maintenance) = futures::join!(
            api.list_collections(),
            api.list_system_prompts(),
            api.maintenance_status()
        );
        self.apply_collections(collections);
        self.apply_prompts(prompts);
        self.apply_maintenance_status(maintenance);
    }

    pub async fn load_collections(&mut self) {
        let result = self.api.list_collections().await;
        self.apply_collections(result);
    }

    fn apply_collections(&mut self, result: Result<Vec<Collection>, DeskError>) {
        match result {
            Ok(collections) => {
                debug!(count = collections.len(), "collections loaded");
                self.state.collections = collections;
            }
            Err(err) => {
                report(UiErrorContext::ListCollections, &err);
            }
        }
    }

    /// Opens the detail modal for a listed collection. Unknown names are
    /// ignored.
    pub fn open_collection(&mut self, name: &str) -> bool {
        let Some(collection) = self.state.collections.iter().find(|c| c.name == name) else {
            warn!(name, "collection not in current listing");
            return false;
        };
        self.state.collection_modal.show(collection.clone());
        true
    }

    pub fn close_collection_modal(&mut self) {
        self.state.collection_modal.close();
    }

    pub fn set_collection_form(&mut self, title: impl Into<String>, pdfs: Vec<PdfUpload>) {
        self.state.collection_form = CollectionForm {
            title: title.into(),
            pdfs,
        };
    }

    pub async fn submit_collection_form(&mut self) {
        let form = &self.state.collection_form;
        let collection = NewCollection {
            title: form.title.clone(),
            pdfs: form.pdfs.clone(),
        };

        self.state.spinner = true;
        self.state.message.clear();

        let result = self.api.create_collection(&collection).await;
        self.state.spinner = false;
        match result {
            Ok(response) => {
                info!(title = %collection.title, files = response.processed_files.len(), "collection created");
                self.state.message = response.message;
                self.state.collection_form = CollectionForm::default();
                self.load_collections().await;
            }
            Err(err) => {
                report(UiErrorContext::CreateCollection, &err);
                self.state.message = match err {
                    DeskError::Validation(message) => message,
                    _ => self.labels.create_collection_failed.clone(),
                };
            }
        }
    }

    pub async fn delete_selected_collection(&mut self) {
        let Some(name) = self
            .state
            .collection_modal
            .content()
            .map(|collection| collection.name.clone())
        else {
            warn!("delete requested without an open collection");
            return;
        };
        if !self
            .host
            .confirm(&self.labels.confirm_delete_collection(&name))
        {
            debug!(name, "collection deletion cancelled");
            return;
        }

        match self.api.delete_collection(&name).await {
            Ok(response) => {
                self.host.alert(&response.message);
                self.close_collection_modal();
                self.load_collections().await;
            }
            Err(err) => {
                report(UiErrorContext::DeleteCollection, &err);
                self.host.alert(&self.labels.delete_collection_failed);
            }
        }
    }

    pub async fn load_maintenance_status(&mut self) {
        let result = self.api.maintenance_status().await;
        self.apply_maintenance_status(result);
    }

    fn apply_maintenance_status(&mut self, result: Result<bool, DeskError>) {
        match result {
            Ok(maintenance) => self.show_maintenance(maintenance),
            Err(err) => {
                report(UiErrorContext::MaintenanceStatus, &err);
            }
        }
    }

    fn show_maintenance(&mut self, maintenance: bool) {
        let tone = if maintenance {
            ButtonTone::Danger
        } else {
            ButtonTone::Primary
        };
        self.state
            .maintenance_button
            .set(self.labels.maintenance_label(maintenance), tone);
    }

    pub async fn toggle_maintenance(&mut self) {
        let outcome = match self.api.toggle_maintenance().await {
            Ok(response) if response.is_success() => Ok(response.maintenance),
            Ok(response) => Err(DeskError::Application(format!(
                "unexpected toggle status '{}'",
                response.status
            ))),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(maintenance) => {
                info!(maintenance, "maintenance mode toggled");
                self.show_maintenance(maintenance);
                if maintenance {
                    self.host.alert(&self.labels.maintenance_now_active);
                    self.host.reload();
                }
            }
            Err(err) => {
                report(UiErrorContext::ToggleMaintenance, &err);
                self.state.maintenance_button.flash(
                    self.labels.maintenance_toggle_failed.clone(),
                    ButtonTone::Danger,
                    self.labels.maintenance_toggle.clone(),
                    ButtonTone::Primary,
                    Instant::now(),
                );
            }
        }
    }

    pub async fn load_system_prompts(&mut self) {
        let result = self.api.list_system_prompts().await;
        self.apply_prompts(result);
    }

    fn apply_prompts(&mut self, result: Result<Vec<SystemPrompt>, DeskError>) {
        match result {
            Ok(prompts) => self.state.prompts = prompts,
            Err(err) => {
                report(UiErrorContext::SystemPrompts, &err);
            }
        }
    }

    pub fn open_new_prompt(&mut self) {
        self.state.prompt_editor.show(PromptEditor {
            title: self.labels.add_prompt_title.clone(),
            name: String::new(),
            content: String::new(),
            prompt_id: None,
        });
    }

    pub async fn edit_prompt(&mut self, id: PromptId) {
        match self.api.get_system_prompt(id).await {
            Ok(prompt) => self.state.prompt_editor.show(PromptEditor {
                title: self.labels.edit_prompt_title.clone(),
                name: prompt.name,
                content: prompt.content,
                prompt_id: Some(prompt.id),
            }),
            Err(err) => {
                report(UiErrorContext::SystemPrompts, &err);
            }
        }
    }

    /// Updates the editor inputs. Has no effect while the editor is hidden.
    pub fn update_prompt_draft(&mut self, name: impl Into<String>, content: impl Into<String>) {
        if let Some(editor) = self.state.prompt_editor.content_mut() {
            editor.name = name.into();
            editor.content = content.into();
        }
    }

    pub fn close_prompt_editor(&mut self) {
        self.state.prompt_editor.close();
    }

    pub async fn save_prompt(&mut self) {
        let Some(editor) = self.state.prompt_editor.content() else {
            warn!("save requested without an open prompt editor");
            return;
        };
        let draft = PromptDraft {
            name: editor.name.clone(),
            content: editor.content.clone(),
        };
        let result = match editor.prompt_id {
            Some(id) => self.api.update_system_prompt(id, &draft).await,
            None => self.api.create_system_prompt(&draft).await,
        };

        match result {
            Ok(saved) => {
                info!(id = %saved.id, name = %saved.name, "system prompt saved");
                self.load_system_prompts().await;
                self.close_prompt_editor();
            }
            Err(err) => {
                report(UiErrorContext::SaveSystemPrompt, &err);
            }
        }
    }

    pub async fn delete_prompt(&mut self, id: PromptId) {
        if !self.host.confirm(&self.labels.delete_prompt_confirm) {
            debug!(%id, "prompt deletion cancelled");
            return;
        }
        match self.api.delete_system_prompt(id).await {
            Ok(()) => self.load_system_prompts().await,
            Err(err @ DeskError::Transport(_)) => {
                report(UiErrorContext::DeleteSystemPrompt, &err);
            }
            Err(err) => {
                // The server answered; its list is still worth refreshing.
                report(UiErrorContext::DeleteSystemPrompt, &err);
                self.load_system_prompts().await;
            }
        }
    }

    pub async fn clear_chat_history(&mut self) {
        if !self.host.confirm(&self.labels.clear_history_confirm) {
            return;
        }
        match self.api.clear_chat_history().await {
            Ok(response) => self.host.alert(&response.message),
            Err(err) => {
                report(UiErrorContext::ClearChatHistory, &err);
                self.host.alert(&self.labels.clear_history_failed);
            }
        }
    }

    /// A click landed outside the bounding element of modal `kind`.
    pub fn dismiss_outside(&mut self, kind: ModalKind) {
        match kind {
            ModalKind::Collection => self.close_collection_modal(),
            ModalKind::SystemPrompt => self.close_prompt_editor(),
            ModalKind::Conversation => {}
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.maintenance_button.revert_deadline()
    }

    pub fn tick(&mut self) -> bool {
        self.state.maintenance_button.tick(Instant::now())
    }
}

#[cfg(test)]
#[path = "../tests/dashboard_tests.rs"]
mod tests;

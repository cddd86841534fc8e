//! Generator page: prompt form, generated output, citations, chat history.

use std::sync::Arc;

use client_core::DeskApi;
use shared::{domain::Conversation, protocol::GenerationRequest};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::{
    clipboard::ClipboardSink,
    controller::events::{report, UiError, UiErrorCategory, UiErrorContext},
    labels::Labels,
    view::{earliest, render, ButtonTone, ModalKind, ModalState, TransientButton},
};

#[derive(Debug, Clone)]
pub struct GeneratorState {
    pub form: GenerationRequest,
    pub output: String,
    pub spinner: bool,
    pub copy_visible: bool,
    pub citations: Vec<String>,
    pub sources_expanded: bool,
    /// Most recent first.
    pub conversations: Vec<Conversation>,
    pub conversation_modal: ModalState<usize>,
    pub output_copy: TransientButton,
    pub modal_copy: TransientButton,
}

impl GeneratorState {
    fn new(labels: &Labels) -> Self {
        Self {
            form: GenerationRequest::new("", ""),
            output: String::new(),
            spinner: false,
            copy_visible: false,
            citations: Vec::new(),
            sources_expanded: false,
            conversations: Vec::new(),
            conversation_modal: ModalState::Hidden,
            output_copy: TransientButton::new(labels.copy_idle.clone(), ButtonTone::Primary),
            modal_copy: TransientButton::new(labels.copy_idle.clone(), ButtonTone::Primary),
        }
    }

    /// Display number of the conversation at `index`; the oldest entry is #1.
    /// `None` past the end of the history.
    pub fn conversation_number(&self, index: usize) -> Option<usize> {
        let total = self.conversations.len();
        (index < total).then(|| total - index)
    }

    pub fn open_conversation(&self) -> Option<(usize, &Conversation)> {
        let index = *self.conversation_modal.content()?;
        let number = self.conversation_number(index)?;
        self.conversations
            .get(index)
            .map(|conversation| (number, conversation))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Output,
    Conversation,
}

pub struct GeneratorController {
    api: Arc<dyn DeskApi>,
    labels: Labels,
    state: GeneratorState,
}

impl GeneratorController {
    pub fn new(api: Arc<dyn DeskApi>, labels: Labels) -> Self {
        let state = GeneratorState::new(&labels);
        Self { api, labels, state }
    }

    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    pub fn form_mut(&mut self) -> &mut GenerationRequest {
        &mut self.state.form
    }

    pub fn render(&self) -> askama::Result<String> {
        render::generator(&self.state)
    }

    /// Seeds the history from the JSON the server embeds into the page.
    /// Missing or malformed data leaves the history empty.
    pub fn load_initial_conversations(&mut self, raw: Option<&str>) {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return;
        };
        match serde_json::from_str::<Vec<Conversation>>(raw) {
            Ok(conversations) => {
                debug!(count = conversations.len(), "initial conversations loaded");
                self.state.conversations = conversations;
            }
            Err(err) => warn!("ignoring malformed conversation data: {err}"),
        }
    }

    pub async fn generate(&mut self) {
        self.state.spinner = true;
        self.state.copy_visible = false;

        let result = self.api.generate(&self.state.form).await;
        match result {
            Ok(response) => {
                info!(
                    citations = response.citations.len(),
                    conversations = response.conversations.len(),
                    "generation finished"
                );
                self.state.copy_visible = !response.generated_text.trim().is_empty();
                self.state.output = response.generated_text;
                self.state.citations = response.citations;
                self.state.sources_expanded = false;
                self.state.conversations = response.conversations;
                if let Some(index) = self.state.conversation_modal.content().copied() {
                    if index >= self.state.conversations.len() {
                        self.state.conversation_modal.close();
                    }
                }
            }
            Err(err) => {
                let ui_error = report(UiErrorContext::Generate, &err);
                self.state.output = format!(
                    "{}{}",
                    self.labels.generation_error_prefix,
                    ui_error.message()
                );
                self.state.copy_visible = false;
            }
        }
        self.state.spinner = false;
    }

    pub fn toggle_sources(&mut self) {
        self.state.sources_expanded = !self.state.sources_expanded;
    }

    /// Opens the detail modal. Returns `false` for an index outside the
    /// current history.
    pub fn open_conversation(&mut self, index: usize) -> bool {
        if index >= self.state.conversations.len() {
            warn!(index, "no conversation at index");
            return false;
        }
        self.state.conversation_modal.show(index);
        true
    }

    pub fn close_conversation(&mut self) {
        self.state.conversation_modal.close();
    }

    pub fn dismiss_outside(&mut self, kind: ModalKind) {
        if kind == ModalKind::Conversation {
            self.close_conversation();
        }
    }

    /// Plain text of the open conversation modal.
    pub fn conversation_text(&self) -> Option<String> {
        self.state
            .open_conversation()
            .map(|(_, conversation)| {
                format!(
                    "Input:\n{}\n\nOutput:\n{}",
                    conversation.input, conversation.output
                )
            })
    }

    pub fn copy(&mut self, target: CopyTarget, clipboard: &mut dyn ClipboardSink) -> bool {
        let text = match target {
            CopyTarget::Output => self
                .state
                .copy_visible
                .then(|| self.state.output.clone()),
            CopyTarget::Conversation => self.conversation_text(),
        };
        let Some(text) = text else {
            warn!(?target, "nothing to copy");
            return false;
        };

        let result = clipboard.set_text(&text);
        let labels = &self.labels;
        let button = match target {
            CopyTarget::Output => &mut self.state.output_copy,
            CopyTarget::Conversation => &mut self.state.modal_copy,
        };
        match result {
            Ok(()) => {
                button.flash(
                    labels.copied.clone(),
                    ButtonTone::Success,
                    labels.copy_idle.clone(),
                    ButtonTone::Primary,
                    Instant::now(),
                );
                true
            }
            Err(err) => {
                UiError::from_message(
                    UiErrorContext::Clipboard,
                    UiErrorCategory::Application,
                    err.to_string(),
                )
                .report();
                button.set(labels.copy_failed.clone(), ButtonTone::Danger);
                false
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([
            self.state.output_copy.revert_deadline(),
            self.state.modal_copy.revert_deadline(),
        ])
    }

    pub fn tick(&mut self) -> bool {
        let now = Instant::now();
        let output = self.state.output_copy.tick(now);
        let modal = self.state.modal_copy.tick(now);
        output || modal
    }
}

#[cfg(test)]
#[path = "../tests/generator_tests.rs"]
mod tests;

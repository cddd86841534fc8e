//! Routing of user actions onto the page controllers.

use shared::{domain::PromptId, protocol::PdfUpload};

use crate::controller::{
    dashboard::DashboardController, generator::GeneratorController, interaction::Interaction,
};

#[derive(Debug, Clone)]
pub enum DashboardAction {
    LoadPage,
    OpenCollection { name: String },
    CreateCollection { title: String, pdfs: Vec<PdfUpload> },
    DeleteCollection { name: String },
    ToggleMaintenance,
    AddPrompt { name: String, content: String },
    EditPrompt {
        id: PromptId,
        name: Option<String>,
        content: Option<String>,
    },
    DeletePrompt { id: PromptId },
    ClearHistory,
}

impl DashboardAction {
    fn name(&self) -> &'static str {
        match self {
            Self::LoadPage => "load_page",
            Self::OpenCollection { .. } => "open_collection",
            Self::CreateCollection { .. } => "create_collection",
            Self::DeleteCollection { .. } => "delete_collection",
            Self::ToggleMaintenance => "toggle_maintenance",
            Self::AddPrompt { .. } => "add_prompt",
            Self::EditPrompt { .. } => "edit_prompt",
            Self::DeletePrompt { .. } => "delete_prompt",
            Self::ClearHistory => "clear_history",
        }
    }
}

pub async fn dispatch_dashboard_action<I: Interaction>(
    controller: &mut DashboardController<I>,
    action: DashboardAction,
) {
    tracing::debug!(action = action.name(), "dispatching dashboard action");
    match action {
        DashboardAction::LoadPage => controller.load_page().await,
        DashboardAction::OpenCollection { name } => {
            if !controller.open_collection(&name) {
                controller.load_collections().await;
                controller.open_collection(&name);
            }
        }
        DashboardAction::CreateCollection { title, pdfs } => {
            controller.set_collection_form(title, pdfs);
            controller.submit_collection_form().await;
        }
        DashboardAction::DeleteCollection { name } => {
            if !controller.open_collection(&name) {
                controller.load_collections().await;
                if !controller.open_collection(&name) {
                    return;
                }
            }
            controller.delete_selected_collection().await;
        }
        DashboardAction::ToggleMaintenance => controller.toggle_maintenance().await,
        DashboardAction::AddPrompt { name, content } => {
            controller.open_new_prompt();
            controller.update_prompt_draft(name, content);
            controller.save_prompt().await;
        }
        DashboardAction::EditPrompt { id, name, content } => {
            controller.edit_prompt(id).await;
            let Some(editor) = controller.state().prompt_editor.content().cloned() else {
                return;
            };
            controller.update_prompt_draft(
                name.unwrap_or(editor.name),
                content.unwrap_or(editor.content),
            );
            controller.save_prompt().await;
        }
        DashboardAction::DeletePrompt { id } => controller.delete_prompt(id).await,
        DashboardAction::ClearHistory => controller.clear_chat_history().await,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorAction {
    Generate,
    ToggleSources,
    OpenConversation { index: usize },
}

impl GeneratorAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::ToggleSources => "toggle_sources",
            Self::OpenConversation { .. } => "open_conversation",
        }
    }
}

pub async fn dispatch_generator_action(controller: &mut GeneratorController, action: GeneratorAction) {
    tracing::debug!(action = action.name(), "dispatching generator action");
    match action {
        GeneratorAction::Generate => controller.generate().await,
        GeneratorAction::ToggleSources => controller.toggle_sources(),
        GeneratorAction::OpenConversation { index } => {
            controller.open_conversation(index);
        }
    }
}

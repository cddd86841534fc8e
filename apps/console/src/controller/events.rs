//! Failure classification for page actions.

use client_core::DeskError;
use shared::error::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Server,
    Application,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    ListCollections,
    CreateCollection,
    DeleteCollection,
    MaintenanceStatus,
    ToggleMaintenance,
    SystemPrompts,
    SaveSystemPrompt,
    DeleteSystemPrompt,
    ClearChatHistory,
    Generate,
    Clipboard,
}

impl UiErrorContext {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListCollections => "list_collections",
            Self::CreateCollection => "create_collection",
            Self::DeleteCollection => "delete_collection",
            Self::MaintenanceStatus => "maintenance_status",
            Self::ToggleMaintenance => "toggle_maintenance",
            Self::SystemPrompts => "system_prompts",
            Self::SaveSystemPrompt => "save_system_prompt",
            Self::DeleteSystemPrompt => "delete_system_prompt",
            Self::ClearChatHistory => "clear_chat_history",
            Self::Generate => "generate",
            Self::Clipboard => "clipboard",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_desk_error(context: UiErrorContext, err: &DeskError) -> Self {
        let category = match err {
            DeskError::Validation(_) | DeskError::InvalidUrl { .. } => UiErrorCategory::Validation,
            DeskError::Application(_) => UiErrorCategory::Application,
            DeskError::Transport(_) => UiErrorCategory::Transport,
            DeskError::Status { .. } | DeskError::Decode { .. } => match err.code() {
                ErrorCode::Unauthorized | ErrorCode::Forbidden => UiErrorCategory::Auth,
                ErrorCode::Unavailable => UiErrorCategory::Transport,
                _ => UiErrorCategory::Server,
            },
        };
        Self {
            category,
            context,
            message: err.user_message(),
        }
    }

    pub fn from_message(
        context: UiErrorContext,
        category: UiErrorCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    /// Logs the failure. Page actions never propagate errors further.
    pub fn report(&self) {
        tracing::error!(
            context = self.context.as_str(),
            category = ?self.category,
            "{}",
            self.message
        );
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Logs `err` under `context` and returns the classified error.
pub fn report(context: UiErrorContext, err: &DeskError) -> UiError {
    let ui_error = UiError::from_desk_error(context, err);
    ui_error.report();
    ui_error
}

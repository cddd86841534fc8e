use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

/// User-facing strings. Deployments override any subset from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub maintenance_enable: String,
    pub maintenance_disable: String,
    pub maintenance_toggle: String,
    pub maintenance_toggle_failed: String,
    pub maintenance_now_active: String,
    pub create_collection_failed: String,
    pub delete_collection_confirm: String,
    pub delete_collection_failed: String,
    pub clear_history_confirm: String,
    pub clear_history_failed: String,
    pub delete_prompt_confirm: String,
    pub add_prompt_title: String,
    pub edit_prompt_title: String,
    pub generation_error_prefix: String,
    pub copy_idle: String,
    pub copied: String,
    pub copy_failed: String,
    pub no_description: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            maintenance_enable: "Wartungsmodus einschalten".into(),
            maintenance_disable: "Wartungsmodus ausschalten".into(),
            maintenance_toggle: "Wartungsmodus umschalten".into(),
            maintenance_toggle_failed: "Fehler beim Umschalten".into(),
            maintenance_now_active: "Wartungsmodus ist jetzt aktiv. Die Seite wird neu geladen."
                .into(),
            create_collection_failed: "An error occurred. Please try again.".into(),
            delete_collection_confirm:
                "Are you sure you want to delete the collection \"{name}\"?".into(),
            delete_collection_failed: "An error occurred while deleting the collection.".into(),
            clear_history_confirm: "Are you sure you want to delete the entire chat history?"
                .into(),
            clear_history_failed: "An error occurred while deleting the chat history.".into(),
            delete_prompt_confirm: "Are you sure you want to delete this system prompt?".into(),
            add_prompt_title: "Add System Prompt".into(),
            edit_prompt_title: "Edit System Prompt".into(),
            generation_error_prefix: "Ein Fehler ist aufgetreten: ".into(),
            copy_idle: "Kopieren".into(),
            copied: "Kopiert!".into(),
            copy_failed: "Fehler beim Kopieren".into(),
            no_description: "Keine Beschreibung verfügbar".into(),
        }
    }
}

impl Labels {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read labels file '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse labels file '{}'", path.display()))
    }

    pub fn maintenance_label(&self, maintenance: bool) -> &str {
        if maintenance {
            &self.maintenance_disable
        } else {
            &self.maintenance_enable
        }
    }

    pub fn confirm_delete_collection(&self, name: &str) -> String {
        self.delete_collection_confirm.replace("{name}", name)
    }
}

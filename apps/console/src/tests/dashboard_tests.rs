use std::{sync::Arc, time::Duration};

use shared::{domain::PromptId, protocol::PdfUpload};

use super::DashboardController;
use crate::{
    controller::test_support::{FakeApi, ScriptedInteraction},
    labels::Labels,
    view::{ButtonTone, ModalKind},
};

fn controller(
    answer: bool,
) -> (Arc<FakeApi>, DashboardController<ScriptedInteraction>) {
    let api = Arc::new(FakeApi::default());
    let controller = DashboardController::new(
        api.clone(),
        ScriptedInteraction::answering(answer),
        Labels::default(),
    );
    (api, controller)
}

fn pdf(name: &str) -> PdfUpload {
    PdfUpload {
        file_name: name.to_string(),
        bytes: b"%PDF-1.4".to_vec(),
    }
}

#[tokio::test]
async fn page_load_fills_all_three_sections() {
    let (api, mut controller) = controller(true);
    *api.maintenance.lock().expect("lock") = true;

    controller.load_page().await;

    let state = controller.state();
    assert_eq!(state.collections.len(), 2);
    assert_eq!(state.prompts.len(), 1);
    assert_eq!(
        state.maintenance_button.label(),
        Labels::default().maintenance_disable
    );
    assert_eq!(state.maintenance_button.tone(), ButtonTone::Danger);

    let mut calls = api.calls();
    calls.sort();
    assert_eq!(
        calls,
        vec![
            "GET /list_collections",
            "GET /maintenance_status",
            "GET /system_prompts"
        ]
    );
}

#[tokio::test]
async fn failed_section_load_keeps_other_sections() {
    let (api, mut controller) = controller(true);
    api.fail("GET /list_collections");

    controller.load_page().await;

    assert!(controller.state().collections.is_empty());
    assert_eq!(controller.state().prompts.len(), 1);
}

#[tokio::test]
async fn created_collection_shows_message_and_refreshes_once() {
    let (api, mut controller) = controller(true);
    controller.set_collection_form("vertraege", vec![pdf("a.pdf"), pdf("b.pdf")]);

    controller.submit_collection_form().await;

    assert_eq!(
        api.calls(),
        vec!["POST /create_collection", "GET /list_collections"]
    );
    let state = controller.state();
    assert_eq!(state.message, "Collection 'vertraege' created successfully");
    assert!(!state.spinner);
    assert!(state.collection_form.title.is_empty());
    assert!(state.collections.iter().any(|c| c.name == "vertraege"));
}

#[tokio::test]
async fn invalid_collection_form_sends_nothing() {
    let (api, mut controller) = controller(true);

    controller.set_collection_form("  ", vec![pdf("a.pdf")]);
    controller.submit_collection_form().await;
    assert_eq!(controller.state().message, "Collection name is required");

    controller.set_collection_form("vertraege", vec![pdf("notes.txt")]);
    controller.submit_collection_form().await;
    assert_eq!(controller.state().message, "Invalid file: notes.txt");

    assert!(api.calls().is_empty());
    assert!(!controller.state().spinner);
}

#[tokio::test]
async fn failed_creation_shows_generic_message() {
    let (api, mut controller) = controller(true);
    api.fail("POST /create_collection");
    controller.set_collection_form("vertraege", vec![pdf("a.pdf")]);

    controller.submit_collection_form().await;

    assert_eq!(
        controller.state().message,
        Labels::default().create_collection_failed
    );
    assert_eq!(controller.state().collection_form.title, "vertraege");
    assert_eq!(api.calls(), vec!["POST /create_collection"]);
}

#[tokio::test]
async fn declined_deletion_sends_no_request() {
    let (api, mut controller) = controller(false);
    controller.load_collections().await;
    assert!(controller.open_collection("handbuch"));
    api.clear_calls();

    controller.delete_selected_collection().await;

    assert!(api.calls().is_empty());
    assert!(controller.state().collection_modal.is_shown());
    assert_eq!(
        controller.host().questions,
        vec!["Are you sure you want to delete the collection \"handbuch\"?"]
    );
}

#[tokio::test]
async fn confirmed_deletion_alerts_closes_and_refreshes() {
    let (api, mut controller) = controller(true);
    controller.load_collections().await;
    controller.open_collection("handbuch");
    api.clear_calls();

    controller.delete_selected_collection().await;

    assert_eq!(
        api.calls(),
        vec!["POST /delete_collection/handbuch", "GET /list_collections"]
    );
    assert!(!controller.state().collection_modal.is_shown());
    assert_eq!(controller.state().collections.len(), 1);
    assert_eq!(
        controller.host().alerts,
        vec!["Collection \"handbuch\" wurde erfolgreich gelöscht."]
    );
}

#[tokio::test]
async fn open_collection_ignores_unknown_names() {
    let (_api, mut controller) = controller(true);
    controller.load_collections().await;

    assert!(!controller.open_collection("fehlt"));
    assert!(!controller.state().collection_modal.is_shown());
}

#[tokio::test]
async fn enabling_maintenance_alerts_and_reloads() {
    let (_api, mut controller) = controller(true);

    controller.toggle_maintenance().await;

    assert_eq!(controller.host().reloads, 1);
    assert_eq!(
        controller.host().alerts,
        vec![Labels::default().maintenance_now_active]
    );
    assert_eq!(
        controller.state().maintenance_button.label(),
        Labels::default().maintenance_disable
    );
}

#[tokio::test]
async fn disabling_maintenance_does_not_reload() {
    let (api, mut controller) = controller(true);
    *api.maintenance.lock().expect("lock") = true;

    controller.toggle_maintenance().await;

    assert_eq!(controller.host().reloads, 0);
    assert!(controller.host().alerts.is_empty());
    assert_eq!(
        controller.state().maintenance_button.label(),
        Labels::default().maintenance_enable
    );
    assert_eq!(controller.state().maintenance_button.tone(), ButtonTone::Primary);
}

#[tokio::test(start_paused = true)]
async fn toggle_failure_flashes_then_reverts() {
    let (api, mut controller) = controller(true);
    api.fail("POST /toggle_maintenance");
    let labels = Labels::default();

    controller.toggle_maintenance().await;

    let button = &controller.state().maintenance_button;
    assert_eq!(button.label(), labels.maintenance_toggle_failed);
    assert_eq!(button.tone(), ButtonTone::Danger);
    assert!(controller.next_deadline().is_some());

    tokio::time::advance(Duration::from_millis(1999)).await;
    assert!(!controller.tick());

    tokio::time::advance(Duration::from_millis(1)).await;
    assert!(controller.tick());
    let button = &controller.state().maintenance_button;
    assert_eq!(button.label(), labels.maintenance_toggle);
    assert_eq!(button.tone(), ButtonTone::Primary);
    assert_eq!(controller.host().reloads, 0);
}

#[tokio::test]
async fn unexpected_toggle_status_is_a_failure() {
    let (api, mut controller) = controller(true);
    *api.toggle_status.lock().expect("lock") = "pending".into();

    controller.toggle_maintenance().await;

    assert_eq!(controller.host().reloads, 0);
    assert_eq!(
        controller.state().maintenance_button.label(),
        Labels::default().maintenance_toggle_failed
    );
}

#[tokio::test]
async fn new_prompt_is_posted_then_list_refreshes() {
    let (api, mut controller) = controller(true);

    controller.open_new_prompt();
    let editor = controller.state().prompt_editor.content().expect("editor");
    assert_eq!(editor.title, "Add System Prompt");
    assert!(editor.prompt_id.is_none());

    controller.update_prompt_draft("Kurz", "Antworte knapp.");
    controller.save_prompt().await;

    assert_eq!(api.calls(), vec!["POST /system_prompts", "GET /system_prompts"]);
    assert!(!controller.state().prompt_editor.is_shown());
    assert_eq!(controller.state().prompts.len(), 2);
}

#[tokio::test]
async fn edited_prompt_is_put_under_its_id() {
    let (api, mut controller) = controller(true);

    controller.edit_prompt(PromptId(1)).await;
    let editor = controller.state().prompt_editor.content().expect("editor");
    assert_eq!(editor.title, "Edit System Prompt");
    assert_eq!(editor.name, "Formal");
    assert_eq!(editor.prompt_id, Some(PromptId(1)));

    controller.update_prompt_draft("Formal", "Sehr formell.");
    controller.save_prompt().await;

    assert_eq!(
        api.calls(),
        vec![
            "GET /system_prompts/1",
            "PUT /system_prompts/1",
            "GET /system_prompts"
        ]
    );
    assert_eq!(controller.state().prompts[0].content, "Sehr formell.");
    assert!(!controller.state().prompt_editor.is_shown());
}

#[tokio::test]
async fn failed_save_keeps_editor_open() {
    let (api, mut controller) = controller(true);
    api.fail("POST /system_prompts");

    controller.open_new_prompt();
    controller.update_prompt_draft("Kurz", "Antworte knapp.");
    controller.save_prompt().await;

    assert_eq!(api.calls(), vec!["POST /system_prompts"]);
    assert!(controller.state().prompt_editor.is_shown());
}

#[tokio::test]
async fn prompt_deletion_requires_confirmation() {
    let (api, mut declined) = controller(false);
    declined.delete_prompt(PromptId(1)).await;
    assert!(api.calls().is_empty());

    let (api, mut confirmed) = controller(true);
    confirmed.delete_prompt(PromptId(1)).await;
    assert_eq!(
        api.calls(),
        vec!["DELETE /system_prompts/1", "GET /system_prompts"]
    );
    assert!(confirmed.state().prompts.is_empty());
}

#[tokio::test]
async fn server_side_delete_failure_still_refreshes() {
    let (api, mut controller) = controller(true);
    api.fail("DELETE /system_prompts/1");

    controller.delete_prompt(PromptId(1)).await;

    assert_eq!(
        api.calls(),
        vec!["DELETE /system_prompts/1", "GET /system_prompts"]
    );
}

#[tokio::test]
async fn clearing_history_alerts_server_message() {
    let (api, mut controller) = controller(true);

    controller.clear_chat_history().await;

    assert_eq!(api.calls(), vec!["POST /clear_chat_history"]);
    assert_eq!(
        controller.host().alerts,
        vec!["Chatverlauf wurde erfolgreich gelöscht."]
    );
}

#[tokio::test]
async fn failed_history_clear_alerts_generic_message() {
    let (api, mut controller) = controller(true);
    api.fail("POST /clear_chat_history");

    controller.clear_chat_history().await;

    assert_eq!(
        controller.host().alerts,
        vec![Labels::default().clear_history_failed]
    );
}

#[tokio::test]
async fn declined_history_clear_sends_nothing() {
    let (api, mut controller) = controller(false);

    controller.clear_chat_history().await;

    assert!(api.calls().is_empty());
    assert!(controller.host().alerts.is_empty());
}

#[tokio::test]
async fn outside_click_closes_only_the_matching_modal() {
    let (_api, mut controller) = controller(true);
    controller.load_collections().await;
    controller.open_collection("handbuch");
    controller.open_new_prompt();

    controller.dismiss_outside(ModalKind::SystemPrompt);
    assert!(!controller.state().prompt_editor.is_shown());
    assert!(controller.state().collection_modal.is_shown());

    controller.dismiss_outside(ModalKind::Collection);
    assert!(!controller.state().collection_modal.is_shown());
}

#[tokio::test]
async fn rendered_dashboard_lists_collections_and_prompts() {
    let (_api, mut controller) = controller(true);
    controller.load_page().await;

    let html = controller.render().expect("render");
    assert!(html.contains("handbuch"));
    assert!(html.contains("richtlinien"));
    assert!(html.contains("Formal"));
}

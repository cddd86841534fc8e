//! HTML fragments for both pages. Every value coming from the server goes
//! through askama's HTML escaping.

use askama::Template;
use shared::domain::{Collection, Conversation, SystemPrompt};

use crate::{
    controller::{dashboard::DashboardState, generator::GeneratorState},
    labels::Labels,
    view::{preview, TransientButton},
};

struct ButtonView {
    label: String,
    classes: &'static str,
}

impl From<&TransientButton> for ButtonView {
    fn from(button: &TransientButton) -> Self {
        Self {
            label: button.label().to_owned(),
            classes: button.tone().classes(),
        }
    }
}

#[derive(Template)]
#[template(
    source = r#"{% for collection in collections %}<div class="mb-4 p-3 border border-gray-300 dark:border-gray-600 rounded-lg cursor-pointer hover:bg-gray-100 dark:hover:bg-gray-700 transition duration-300 ease-in-out" data-collection="{{ collection.name }}">
    <strong class="text-gray-700 dark:text-gray-300">Text Basis Name:</strong> <span class="text-gray-600 dark:text-gray-400">{{ collection.name }}</span>
    <br>
    <strong class="text-gray-700 dark:text-gray-300">Documents:</strong> <span class="text-gray-600 dark:text-gray-400">{{ collection.document_count }}</span>
    <br>
    <strong class="text-gray-700 dark:text-gray-300">Chunks:</strong> <span class="text-gray-600 dark:text-gray-400">{{ collection.chunk_count }}</span>
</div>
{% endfor %}"#,
    ext = "html"
)]
struct CollectionListTemplate {
    collections: Vec<Collection>,
}

#[derive(Template)]
#[template(
    source = r#"<h2 id="modalTitle">Collection: {{ collection.name }}</h2>
<div id="modalContent">
    <p><strong>Description:</strong> {{ description }}</p>
    <p><strong>Number of Documents:</strong> {{ collection.document_count }}</p>
    <p><strong>Number of Chunks:</strong> {{ collection.chunk_count }}</p>
    <p><strong>Embedding Function:</strong> {{ collection.embedding_function }}</p>
    <p><strong>Max Tokens per Chunk:</strong> {{ collection.max_tokens_per_chunk }}</p>
    <p><strong>Files:</strong></p>
    <ul>{% for file in collection.files %}<li>{{ file }}</li>{% endfor %}</ul>
</div>"#,
    ext = "html"
)]
struct CollectionModalTemplate {
    collection: Collection,
    description: String,
}

#[derive(Template)]
#[template(
    source = r#"{% for prompt in prompts %}<div class="flex justify-between items-center p-2 border rounded">
    <span>{{ prompt.name }}</span>
    <div>
        <button class="edit-prompt bg-blue-500 hover:bg-blue-700 text-white font-bold py-1 px-2 rounded mr-2" data-id="{{ prompt.id }}">Edit</button>
        <button class="delete-prompt bg-red-500 hover:bg-red-700 text-white font-bold py-1 px-2 rounded" data-id="{{ prompt.id }}">Delete</button>
    </div>
</div>
{% endfor %}"#,
    ext = "html"
)]
struct PromptListTemplate {
    prompts: Vec<SystemPrompt>,
}

#[derive(Template)]
#[template(
    source = r#"<div class="min-h-screen p-6 dark:bg-gray-900">
  <section id="collections">
    <form id="collectionForm">
      <input type="text" name="title" value="{{ form_title }}">
      <input type="file" name="pdfs" accept=".pdf" multiple>
      <p class="text-sm text-gray-500">{{ form_files }}</p>
    </form>
    <div id="spinner" class="{% if !spinner %}hidden{% endif %}"></div>
    <div id="message">{{ message }}</div>
    <div id="collectionList">{{ collection_list|safe }}</div>
  </section>
  <section id="maintenance">
    <button id="maintenanceButton" class="{{ maintenance.classes }} text-white font-bold py-2 px-4 rounded">{{ maintenance.label }}</button>
    <button id="clearChatHistory" class="bg-red-500 hover:bg-red-700 text-white font-bold py-2 px-4 rounded">Clear chat history</button>
  </section>
  <section id="systemPrompts">
    <button id="addSystemPrompt" class="bg-blue-500 hover:bg-blue-700 text-white font-bold py-2 px-4 rounded">Add</button>
    <div id="systemPromptList">{{ prompt_list|safe }}</div>
  </section>
  <div id="collectionModal" class="fixed inset-0 bg-gray-600 bg-opacity-50{% if !collection_modal_shown %} hidden{% endif %}">
    <div class="relative top-20 mx-auto p-5 border w-96 shadow-lg rounded-md bg-white dark:bg-gray-800">
      {{ collection_modal|safe }}
      <button id="deleteCollection" class="bg-red-500 hover:bg-red-700 text-white font-bold py-2 px-4 rounded">Delete</button>
      <button id="closeCollectionModal" class="bg-gray-500 hover:bg-gray-700 text-white font-bold py-2 px-4 rounded">Close</button>
    </div>
  </div>
  <div id="systemPromptModal" class="fixed inset-0 bg-gray-600 bg-opacity-50{% if !prompt_editor_shown %} hidden{% endif %}">
    <div class="relative top-20 mx-auto p-5 border w-96 shadow-lg rounded-md bg-white dark:bg-gray-800">
      <h2 id="systemPromptModalTitle">{{ prompt_editor_title }}</h2>
      <input id="systemPromptName" type="text" value="{{ prompt_editor_name }}">
      <textarea id="systemPromptContent">{{ prompt_editor_content }}</textarea>
      <button id="saveSystemPrompt" class="bg-blue-500 hover:bg-blue-700 text-white font-bold py-2 px-4 rounded">Save</button>
      <button id="closeSystemPromptModal" class="bg-gray-500 hover:bg-gray-700 text-white font-bold py-2 px-4 rounded">Close</button>
    </div>
  </div>
</div>"#,
    ext = "html"
)]
struct DashboardTemplate {
    form_title: String,
    form_files: String,
    spinner: bool,
    message: String,
    collection_list: String,
    maintenance: ButtonView,
    prompt_list: String,
    collection_modal_shown: bool,
    collection_modal: String,
    prompt_editor_shown: bool,
    prompt_editor_title: String,
    prompt_editor_name: String,
    prompt_editor_content: String,
}

#[derive(Template)]
#[template(
    source = r#"{% for citation in citations %}<p>{{ citation }}</p>{% endfor %}"#,
    ext = "html"
)]
struct CitationsTemplate {
    citations: Vec<String>,
}

struct HistoryRow {
    index: usize,
    number: usize,
    input_preview: String,
    output_preview: String,
}

#[derive(Template)]
#[template(
    source = r#"{% for row in rows %}<div class="mb-4 p-3 border border-gray-300 dark:border-gray-600 rounded-lg cursor-pointer hover:bg-gray-100 dark:hover:bg-gray-700 transition duration-300 ease-in-out" data-conversation-index="{{ row.index }}">
    <span class="text-gray-500 dark:text-gray-400 float-right">#{{ row.number }}</span>
    <strong>Input:</strong> <span class="text-gray-600 dark:text-gray-400">{{ row.input_preview }}</span><br>
    <strong>Output:</strong> <span class="text-gray-600 dark:text-gray-400">{{ row.output_preview }}</span>
</div>
{% endfor %}"#,
    ext = "html"
)]
struct HistoryTemplate {
    rows: Vec<HistoryRow>,
}

#[derive(Template)]
#[template(
    source = r#"<h2 id="modalTitle">Conversation {{ number }}</h2>
<div id="modalContent">
    <div class="text-left">
        <p class="font-bold mb-2">Input:</p>
        <p class="mb-4">{{ conversation.input }}</p>
        <p class="font-bold mb-2">Output:</p>
        <div class="max-h-[40vh] overflow-y-auto border p-2 rounded">{{ conversation.output }}</div>
    </div>
</div>"#,
    ext = "html"
)]
struct ConversationModalTemplate {
    number: usize,
    conversation: Conversation,
}

#[derive(Template)]
#[template(
    source = r#"<div class="min-h-screen p-6 dark:bg-gray-900">
  <form id="inputForm">
    <textarea id="prompt" name="prompt">{{ prompt }}</textarea>
    <input type="hidden" id="collection_name" name="collection_name" value="{{ collection_name }}">
    <input type="hidden" name="length" value="{{ length }}">
    <input type="hidden" name="tone" value="{{ tone }}">
    <input type="hidden" name="service" value="{{ service }}">
    <button id="generateButton" type="submit" class="bg-blue-500 hover:bg-blue-700 text-white font-bold py-2 px-4 rounded">Generate</button>
  </form>
  <div id="spinner" class="{% if !spinner %}hidden{% endif %}"></div>
  <div id="outputContainer">
    <div id="output">{{ output }}</div>
    <div id="copyButtonContainer" class="{% if !copy_visible %}hidden{% endif %}">
      <button id="copyButton" class="copy-button {{ output_copy.classes }} text-white font-bold py-2 px-4 rounded">{{ output_copy.label }}</button>
    </div>
  </div>
  <div id="sources">
    <button id="toggleSources"><svg class="{% if sources_expanded %}rotate-180{% endif %}"></svg></button>
    <div id="sourcesContent" class="{% if !sources_expanded %}hidden{% endif %}">
      <div id="citationsContainer">{{ citations|safe }}</div>
    </div>
  </div>
  <div id="chatHistory">{{ history|safe }}</div>
  <div id="chatModal" class="fixed inset-0 bg-gray-600 bg-opacity-50{% if !modal_shown %} hidden{% endif %}">
    <div class="relative top-20 mx-auto p-5 border w-3/4 shadow-lg rounded-md bg-white dark:bg-gray-800">
      {{ modal|safe }}
      <button id="modalCopyButton" class="copy-button {{ modal_copy.classes }} text-white font-bold py-2 px-4 rounded">{{ modal_copy.label }}</button>
      <button id="closeModal" class="bg-gray-500 hover:bg-gray-700 text-white font-bold py-2 px-4 rounded">Close</button>
    </div>
  </div>
</div>"#,
    ext = "html"
)]
struct GeneratorTemplate {
    prompt: String,
    collection_name: String,
    length: String,
    tone: String,
    service: &'static str,
    spinner: bool,
    output: String,
    copy_visible: bool,
    output_copy: ButtonView,
    sources_expanded: bool,
    citations: String,
    history: String,
    modal_shown: bool,
    modal: String,
    modal_copy: ButtonView,
}

pub fn collection_list(collections: &[Collection]) -> askama::Result<String> {
    CollectionListTemplate {
        collections: collections.to_vec(),
    }
    .render()
}

pub fn collection_modal(collection: &Collection, labels: &Labels) -> askama::Result<String> {
    let description = if collection.description.trim().is_empty() {
        labels.no_description.clone()
    } else {
        collection.description.clone()
    };
    CollectionModalTemplate {
        collection: collection.clone(),
        description,
    }
    .render()
}

pub fn prompt_list(prompts: &[SystemPrompt]) -> askama::Result<String> {
    PromptListTemplate {
        prompts: prompts.to_vec(),
    }
    .render()
}

pub fn dashboard(state: &DashboardState, labels: &Labels) -> askama::Result<String> {
    let collection_modal = match state.collection_modal.content() {
        Some(collection) => collection_modal(collection, labels)?,
        None => String::new(),
    };
    let editor = state.prompt_editor.content();
    DashboardTemplate {
        form_title: state.collection_form.title.clone(),
        form_files: state
            .collection_form
            .pdfs
            .iter()
            .map(|pdf| pdf.file_name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        spinner: state.spinner,
        message: state.message.clone(),
        collection_list: collection_list(&state.collections)?,
        maintenance: ButtonView::from(&state.maintenance_button),
        prompt_list: prompt_list(&state.prompts)?,
        collection_modal_shown: state.collection_modal.is_shown(),
        collection_modal,
        prompt_editor_shown: editor.is_some(),
        prompt_editor_title: editor.map(|e| e.title.clone()).unwrap_or_default(),
        prompt_editor_name: editor.map(|e| e.name.clone()).unwrap_or_default(),
        prompt_editor_content: editor.map(|e| e.content.clone()).unwrap_or_default(),
    }
    .render()
}

pub fn citations(citations: &[String]) -> askama::Result<String> {
    CitationsTemplate {
        citations: citations.to_vec(),
    }
    .render()
}

/// History list, most recent first, numbered so the oldest entry is #1.
pub fn chat_history(conversations: &[Conversation]) -> askama::Result<String> {
    let total = conversations.len();
    let rows = conversations
        .iter()
        .enumerate()
        .map(|(index, conversation)| HistoryRow {
            index,
            number: total - index,
            input_preview: preview(&conversation.input),
            output_preview: preview(&conversation.output),
        })
        .collect();
    HistoryTemplate { rows }.render()
}

pub fn conversation_modal(number: usize, conversation: &Conversation) -> askama::Result<String> {
    ConversationModalTemplate {
        number,
        conversation: conversation.clone(),
    }
    .render()
}

pub fn generator(state: &GeneratorState) -> askama::Result<String> {
    let modal = match state.open_conversation() {
        Some((number, conversation)) => conversation_modal(number, conversation)?,
        None => String::new(),
    };
    GeneratorTemplate {
        prompt: state.form.prompt.clone(),
        collection_name: state.form.collection_name.clone(),
        length: state.form.length.clone(),
        tone: state.form.tone.clone(),
        service: state.form.service.as_str(),
        spinner: state.spinner,
        output: state.output.clone(),
        copy_visible: state.copy_visible,
        output_copy: ButtonView::from(&state.output_copy),
        sources_expanded: state.sources_expanded,
        citations: citations(&state.citations)?,
        history: chat_history(&state.conversations)?,
        modal_shown: state.conversation_modal.is_shown(),
        modal,
        modal_copy: ButtonView::from(&state.modal_copy),
    }
    .render()
}

#[cfg(test)]
#[path = "../tests/render_tests.rs"]
mod tests;

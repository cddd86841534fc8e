use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(PromptId);

/// A named group of ingested documents together with its chunking metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub document_count: u64,
    #[serde(default)]
    pub chunk_count: u64,
    #[serde(default)]
    pub embedding_function: String,
    #[serde(default)]
    pub max_tokens_per_chunk: u64,
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemPrompt {
    pub id: PromptId,
    pub name: String,
    pub content: String,
}

/// One input/output exchange of the chat history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationService {
    #[default]
    Azure,
    Ollama,
}

impl GenerationService {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Azure => "azure",
            Self::Ollama => "ollama",
        }
    }
}

impl std::str::FromStr for GenerationService {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "azure" => Ok(Self::Azure),
            "ollama" => Ok(Self::Ollama),
            other => Err(format!("unknown generation service '{other}'")),
        }
    }
}

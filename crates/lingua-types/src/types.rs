use serde::{Deserialize, Serialize};

/// What the user asked for on a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "definir")]
    Define,
    #[serde(rename = "simplifier")]
    Simplify,
    #[serde(rename = "traduire")]
    Translate,
}

impl Action {
    /// Label shown while the request is in flight
    pub fn label(&self) -> &'static str {
        match self {
            Action::Define => "Définition",
            Action::Simplify => "Simplification",
            Action::Translate => "Traduction",
        }
    }

    /// Value of the `data-action` attribute on action bar buttons
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Define => "definir",
            Action::Simplify => "simplifier",
            Action::Translate => "traduire",
        }
    }
}

/// One learned word. JSON keys match the `lb_vocab` storage layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub word: String,
    #[serde(default)]
    pub definition: String,
    #[serde(rename = "traduction", default)]
    pub translation: String,
    pub lang: String,
    #[serde(default)]
    pub date: String,
}

/// Floating surfaces that can own an in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Panel,
    Tooltip,
}

/// Identifies the request that currently owns a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub surface: SurfaceKind,
    pub generation: u64,
}

/// Body sent by the page host to the proxy endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    pub prompt: String,
    pub system_prompt: String,
    #[serde(default, alias = "langue", skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
}

/// Body returned by the proxy endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProxyResponse {
    pub fn ok(result: impl Into<String>) -> Self {
        Self {
            result: Some(result.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

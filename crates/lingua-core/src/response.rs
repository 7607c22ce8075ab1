//! Model answers arrive as JSON, sometimes wrapped in a markdown code fence.

use serde::Deserialize;
use serde::de::DeserializeOwned;

const FENCE: &str = "```";

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("empty response")]
    Empty,

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Answer to a word lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DefinitionPayload {
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub exemple: Option<String>,
    #[serde(default)]
    pub traduction: String,
}

/// Answer to a translation request
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TranslationPayload {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub traduction: String,
}

/// Remove an optional leading fence (with optional `json` tag) and trailing fence
pub fn strip_fences(raw: &str) -> &str {
    let mut text = raw;

    if let Some(rest) = text.strip_prefix(FENCE) {
        let rest = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
        text = rest.trim_start();
    }

    let trimmed = text.trim_end();
    if let Some(rest) = trimmed.strip_suffix(FENCE) {
        text = rest;
    }

    text.trim()
}

/// Parse a model answer into a JSON value
pub fn parse(raw: &str) -> Result<serde_json::Value, ParseError> {
    parse_as(raw)
}

/// Parse a model answer into a typed payload
pub fn parse_as<T: DeserializeOwned>(raw: &str) -> Result<T, ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let cleaned = strip_fences(raw);
    Ok(serde_json::from_str(cleaned)?)
}

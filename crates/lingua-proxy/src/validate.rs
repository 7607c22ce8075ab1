use serde_json::Value;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Corps de requête invalide")]
    InvalidBody,

    #[error("Champ \"prompt\" manquant ou vide")]
    MissingPrompt,

    #[error("Champ \"systemPrompt\" manquant")]
    MissingSystemPrompt,

    #[error("Texte trop long (max {0} caractères)")]
    TooLong(usize),
}

#[derive(Debug)]
pub struct PromptRequest {
    pub prompt: String,
    pub system_prompt: String,
}

/// Check a raw request body. Extra fields (`targetLanguage`, `langue`) are ignored.
pub fn validate(body: &[u8], max_prompt_chars: usize) -> Result<PromptRequest, ValidationError> {
    let Ok(Value::Object(mut fields)) = serde_json::from_slice::<Value>(body) else {
        return Err(ValidationError::InvalidBody);
    };

    let prompt = match fields.remove("prompt") {
        Some(Value::String(p)) if !p.trim().is_empty() => p,
        _ => return Err(ValidationError::MissingPrompt),
    };

    let system_prompt = match fields.remove("systemPrompt") {
        Some(Value::String(s)) if !s.is_empty() => s,
        _ => return Err(ValidationError::MissingSystemPrompt),
    };

    if prompt.chars().count() > max_prompt_chars {
        return Err(ValidationError::TooLong(max_prompt_chars));
    }

    Ok(PromptRequest {
        prompt,
        system_prompt,
    })
}

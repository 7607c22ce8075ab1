use lingua_types::Action;

/// User prompt plus system prompt sent to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub prompt: String,
    pub system_prompt: String,
}

impl Prompt {
    /// Prompt for `action` applied to `text`, translating into `lang` where relevant
    pub fn for_action(action: Action, text: &str, lang: &str) -> Self {
        match action {
            Action::Define => definition(text, lang),
            Action::Simplify => simplification(text),
            Action::Translate => translation(text, lang),
        }
    }
}

/// A1 definition, example sentence and translation of one word
pub fn definition(word: &str, lang: &str) -> Prompt {
    let system_prompt = format!(
        "Tu es un assistant pour apprenants de français langue étrangère niveau A1.
Pour le mot donné, fournis :
1. Une définition en français ultra-simple (max 1 phrase, mots courants)
2. Une phrase d'exemple courte en français (niveau A1-A2) qui utilise le mot naturellement. La phrase doit être entièrement en français, ne remplace jamais le mot par sa traduction
3. La traduction du mot en {lang}
Format JSON : {{ \"definition\": \"...\", \"exemple\": \"...\", \"traduction\": \"...\" }}"
    );

    Prompt {
        prompt: word.to_string(),
        system_prompt,
    }
}

/// FALC rewrite at A2 level, plain text answer
pub fn simplification(text: &str) -> Prompt {
    let system_prompt = "Tu es un expert en FALC (Facile à Lire et à Comprendre).
Réécris le texte suivant en français niveau A2 maximum.
Conserve toute l'information. Phrases courtes. Vocabulaire courant.
Ne traduis pas. Retourne uniquement le texte simplifié."
        .to_string();

    Prompt {
        prompt: text.to_string(),
        system_prompt,
    }
}

pub fn translation(text: &str, lang: &str) -> Prompt {
    let system_prompt = format!(
        "Traduis le texte suivant en {lang}.
Retourne un JSON : {{ \"original\": \"...\", \"traduction\": \"...\" }}
Ne modifie pas le texte original."
    );

    Prompt {
        prompt: text.to_string(),
        system_prompt,
    }
}

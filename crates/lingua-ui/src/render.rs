//! HTML fragments for the panel, the action bar and the hover tooltip.

use lingua_core::languages;
use lingua_core::response::{DefinitionPayload, TranslationPayload};
use lingua_core::selection::{find_case_insensitive, match_len};
use lingua_types::Action;

use crate::escape::Markup;

pub const RETRY_MESSAGE: &str = "Réessaie dans un instant";
pub const TRANSLATION_ERROR_MESSAGE: &str = "Erreur lors de la traduction";

/// A word lookup ready to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionView {
    pub word: String,
    pub definition: String,
    /// Model example, else the page sentence; empty when neither exists
    pub example: String,
    pub translation: String,
    pub is_new: bool,
    pub revealed: bool,
}

impl DefinitionView {
    pub fn new(word: &str, payload: DefinitionPayload, page_sentence: &str, is_new: bool) -> Self {
        let example = payload
            .exemple
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| page_sentence.to_string());

        Self {
            word: word.to_string(),
            definition: payload.definition,
            example,
            translation: payload.traduction,
            is_new,
            revealed: false,
        }
    }
}

pub fn loading(action: Action) -> Markup {
    let mut m = Markup::new();
    m.raw(concat!(
        "<div class=\"lb-loading-wrapper\">",
        "<div class=\"lb-loading\"><span></span><span></span><span></span></div>",
        "<div class=\"lb-loading-label\">"
    ))
    .text(action.label())
    .raw(" en cours…</div></div>");
    m
}

/// `compact` drops the example block, for the hover tooltip
pub fn definition(view: &DefinitionView, compact: bool) -> Markup {
    let mut m = Markup::new();

    m.raw("<div class=\"lb-def-header\"><div class=\"lb-def-word\">")
        .text(&view.word)
        .raw("</div>");
    if view.is_new {
        m.raw("<span class=\"lb-saved-badge lb-saved-new\" title=\"Ajouté au carnet\">＋</span>");
    } else {
        m.raw("<span class=\"lb-saved-badge\" title=\"Déjà dans le carnet\">✓</span>");
    }
    m.raw("</div>");

    m.raw("<div class=\"lb-def-definition\">")
        .text(&view.definition)
        .raw("</div>");

    if !compact && !view.example.is_empty() {
        m.raw(concat!(
            "<div class=\"lb-def-context\">",
            "<div class=\"lb-context-label\">Exemple</div>",
            "<blockquote class=\"lb-def-sentence\">"
        ))
        .nest(&highlight(&view.example, &view.word))
        .raw("</blockquote></div>");
    }

    m.raw("<div class=\"lb-challenge\"><div class=\"lb-challenge-label\">Traduction</div>");
    if view.revealed {
        m.raw("<span class=\"lb-traduction\">");
    } else {
        m.raw("<span class=\"lb-traduction lb-hidden\">");
    }
    m.text(&view.translation).raw("</span>");
    if !view.revealed {
        m.raw("<button class=\"lb-reveal-btn\">Révéler ↓</button>");
    }
    m.raw("</div>");

    m
}

/// Sentence with the first case-insensitive occurrence of `word` marked
pub fn highlight(sentence: &str, word: &str) -> Markup {
    let mut m = Markup::new();

    let Some(start) = find_case_insensitive(sentence, word) else {
        m.text(sentence);
        return m;
    };
    let end = start + match_len(sentence, start, word);

    m.text(&sentence[..start])
        .raw("<mark class=\"lb-word-highlight\">")
        .text(&sentence[start..end])
        .raw("</mark>")
        .text(&sentence[end..]);
    m
}

pub fn simplification(result: &str, original: &str) -> Markup {
    let mut m = Markup::new();
    m.raw(concat!(
        "<div class=\"lb-result-header\">",
        "<div class=\"lb-result-title\">✦ Texte simplifié</div>",
        "<button class=\"lb-copy-btn\" data-copy=\""
    ))
    .attr(result)
    .raw("\" title=\"Copier\">⎘</button></div>")
    .raw("<div class=\"lb-result-body\">")
    .text(result)
    .raw(concat!(
        "</div>",
        "<details class=\"lb-original-toggle\"><summary>Texte original</summary>",
        "<div class=\"lb-original-text\">"
    ))
    .text(original)
    .raw("</div></details>");
    m
}

/// Bilingual view; the target column is right-to-left for RTL languages
pub fn translation(payload: &TranslationPayload, lang: &str) -> Markup {
    let rtl = languages::is_rtl(lang);

    let mut m = Markup::new();
    m.raw(concat!(
        "<div class=\"lb-result-header\">",
        "<div class=\"lb-result-title\">⇄ Traduction</div>",
        "<button class=\"lb-copy-btn\" data-copy=\""
    ))
    .attr(&payload.traduction)
    .raw("\" title=\"Copier\">⎘</button></div>")
    .raw(concat!(
        "<div class=\"lb-bilingual\">",
        "<div class=\"lb-col\"><div class=\"lb-col-label\">Français</div>",
        "<div class=\"lb-col-text\">"
    ))
    .text(&payload.original)
    .raw("</div></div>");

    if rtl {
        m.raw("<div class=\"lb-col lb-col--rtl\"><div class=\"lb-col-label\">");
    } else {
        m.raw("<div class=\"lb-col\"><div class=\"lb-col-label\">");
    }
    m.text(languages::native_name(lang)).raw("</div>");

    if rtl {
        m.raw("<div dir=\"rtl\" class=\"lb-col-text lb-rtl\">");
    } else {
        m.raw("<div class=\"lb-col-text\">");
    }
    m.text(&payload.traduction).raw("</div></div></div>");
    m
}

/// Generic failure card. Never carries the underlying error text.
pub fn error(action: Action) -> Markup {
    let mut m = Markup::new();
    m.raw("<div class=\"lb-error\">");
    match action {
        Action::Translate => m.text(TRANSLATION_ERROR_MESSAGE),
        Action::Define | Action::Simplify => m.text(RETRY_MESSAGE),
    };
    m.raw("</div>");
    m
}

pub fn welcome() -> Markup {
    let mut m = Markup::new();
    m.raw(concat!(
        "<div class=\"lb-welcome\">",
        "<div class=\"lb-welcome-icon\">⬡</div>",
        "<div class=\"lb-welcome-title\">Prêt</div>",
        "<div class=\"lb-welcome-text\">Surligne un mot pour le définir.<br>",
        "Surligne une phrase pour la simplifier ou la traduire.</div>",
        "</div>"
    ));
    m
}

/// Side panel chrome around `content`
pub fn panel(content: &Markup) -> String {
    let mut m = Markup::new();
    m.raw(concat!(
        "<div id=\"lb-panel\" role=\"complementary\" aria-label=\"LinguaBridge\">",
        "<div id=\"lb-panel-header\">",
        "<span id=\"lb-panel-logo\">LinguaBridge</span>",
        "<button id=\"lb-panel-close\" title=\"Fermer (Échap)\" aria-label=\"Fermer\">✕</button>",
        "</div>",
        "<div id=\"lb-panel-content\">"
    ))
    .nest(content)
    .raw("</div></div>");
    m.into_string()
}

pub fn tooltip(content: &Markup) -> String {
    let mut m = Markup::new();
    m.raw("<div id=\"lb-tooltip\" role=\"tooltip\">")
        .nest(content)
        .raw("</div>");
    m.into_string()
}

pub fn action_bar() -> String {
    let mut m = Markup::new();
    m.raw("<div id=\"lb-action-bar\" role=\"toolbar\">");
    for (action, title, icon) in [
        (Action::Simplify, "Simplifier (FALC A2)", "✦"),
        (Action::Translate, "Traduire", "⇄"),
    ] {
        m.raw("<button class=\"lb-action-btn\" data-action=\"")
            .attr(action.as_str())
            .raw("\" title=\"")
            .attr(title)
            .raw("\"><span class=\"lb-icon\">")
            .text(icon)
            .raw("</span></button>");
    }
    m.raw("</div>");
    m.into_string()
}

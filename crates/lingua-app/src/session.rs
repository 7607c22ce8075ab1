//! Per-page dispatcher. Handlers are synchronous and return the effects the
//! page loop has to carry out (UI updates, proxy calls, clipboard writes).

use std::sync::Arc;

use lingua_core::prompts::Prompt;
use lingua_core::response::{self, DefinitionPayload, TranslationPayload};
use lingua_core::selection;
use lingua_core::vocab::VocabStore;
use lingua_translator::ProxyError;
use lingua_types::{
    Action, CopyState, PageEvent, RuntimeMessage, RuntimeReply, Ticket, UiUpdate, Viewport,
};
use lingua_ui::{DefinitionView, PanelContent, Surfaces};

use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq)]
pub enum RequestKind {
    Definition { word: String, sentence: String },
    Simplification { original: String },
    Translation,
}

impl RequestKind {
    fn action(&self) -> Action {
        match self {
            RequestKind::Definition { .. } => Action::Define,
            RequestKind::Simplification { .. } => Action::Simplify,
            RequestKind::Translation => Action::Translate,
        }
    }
}

/// A proxy call owned by a surface ticket
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub kind: RequestKind,
    pub prompt: Prompt,
    /// Target language at the time of the request
    pub lang: String,
}

/// A finished proxy call
#[derive(Debug)]
pub struct Completion {
    pub request: PendingRequest,
    pub result: Result<String, ProxyError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Ui(UiUpdate),
    Request(PendingRequest),
    /// Copy `text`; feedback goes to the panel of `generation`
    Copy { text: String, generation: u64 },
    /// Revert the copy button of panel `generation` after the feedback delay
    ScheduleCopyReset { generation: u64 },
}

pub struct Session {
    lang: String,
    hover_tooltip: bool,
    surfaces: Surfaces,
    vocab: Arc<VocabStore>,
    settings: Arc<Settings>,
}

impl Session {
    pub fn new(
        lang: String,
        hover_tooltip: bool,
        vocab: Arc<VocabStore>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            lang,
            hover_tooltip,
            surfaces: Surfaces::new(),
            vocab,
            settings,
        }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn surfaces(&self) -> &Surfaces {
        &self.surfaces
    }

    pub fn handle(&mut self, event: PageEvent) -> Vec<Effect> {
        match event {
            PageEvent::MouseUp {
                text,
                x,
                y,
                viewport,
                inside_ui,
                anchor_text,
            } => {
                if inside_ui {
                    return Vec::new();
                }
                self.on_mouse_up(&text, x, y, viewport, anchor_text.as_deref())
            }
            PageEvent::Action { action } => self.on_action(action),
            PageEvent::KeyDown { key } => self.on_key(&key),
            PageEvent::Click { inside_ui } => self.on_click(inside_ui),
            PageEvent::ClosePanel => ui(self.surfaces.close_panel()),
            PageEvent::Reveal { surface } => ui(self.surfaces.reveal(surface)),
            PageEvent::Copy { text } => self.on_copy(text),
            PageEvent::Message { message } => self.on_message(message),
        }
    }

    pub fn on_mouse_up(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        viewport: Viewport,
        anchor_text: Option<&str>,
    ) -> Vec<Effect> {
        let Some(selection) = selection::classify(text, x, y) else {
            return ui(self.surfaces.remove_action_bar());
        };

        let mut effects = Vec::new();

        if let Some(word) = selection.lookup_word() {
            let sentence = anchor_text
                .map(|t| selection::sentence_containing(t, word))
                .unwrap_or_default();

            let (ticket, update) = if self.hover_tooltip {
                self.surfaces
                    .begin_tooltip(Action::Define, x, y, viewport)
            } else {
                self.surfaces.begin_panel(Action::Define)
            };

            effects.push(Effect::Ui(update));
            effects.push(Effect::Request(PendingRequest {
                ticket,
                prompt: Prompt::for_action(Action::Define, word, &self.lang),
                kind: RequestKind::Definition {
                    word: word.to_string(),
                    sentence,
                },
                lang: self.lang.clone(),
            }));
        }

        if selection.wants_action_bar() {
            let update = self
                .surfaces
                .show_action_bar(&selection.raw_text, x, y, viewport);
            effects.push(Effect::Ui(update));
        } else if let Some(update) = self.surfaces.remove_action_bar() {
            effects.push(Effect::Ui(update));
        }

        effects
    }

    /// Action bar button
    pub fn on_action(&mut self, action: Action) -> Vec<Effect> {
        let Some(text) = self.surfaces.action_bar_text().map(str::to_string) else {
            tracing::debug!("Action {:?} without an action bar", action);
            return Vec::new();
        };

        let kind = match action {
            Action::Simplify => RequestKind::Simplification {
                original: text.clone(),
            },
            Action::Translate => RequestKind::Translation,
            Action::Define => {
                let Some(word) = selection::classify(&text, 0, 0)
                    .and_then(|s| s.lookup_word().map(str::to_string))
                else {
                    return Vec::new();
                };
                RequestKind::Definition {
                    word,
                    sentence: text.clone(),
                }
            }
        };

        let subject = match &kind {
            RequestKind::Definition { word, .. } => word.clone(),
            _ => text,
        };

        let mut effects = ui(self.surfaces.remove_action_bar());
        let (ticket, update) = self.surfaces.begin_panel(action);
        effects.push(Effect::Ui(update));
        effects.push(Effect::Request(PendingRequest {
            ticket,
            prompt: Prompt::for_action(action, &subject, &self.lang),
            kind,
            lang: self.lang.clone(),
        }));
        effects
    }

    pub fn on_key(&mut self, key: &str) -> Vec<Effect> {
        if key != "Escape" {
            return Vec::new();
        }
        self.surfaces.close_all().into_iter().map(Effect::Ui).collect()
    }

    pub fn on_click(&mut self, inside_ui: bool) -> Vec<Effect> {
        if inside_ui {
            return Vec::new();
        }
        self.surfaces
            .dismiss_transient()
            .into_iter()
            .map(Effect::Ui)
            .collect()
    }

    pub fn on_copy(&mut self, text: String) -> Vec<Effect> {
        match self.surfaces.panel_generation() {
            Some(generation) => vec![Effect::Copy { text, generation }],
            None => Vec::new(),
        }
    }

    /// Clipboard write finished for the panel of `generation`
    pub fn copy_finished(&mut self, generation: u64, ok: bool) -> Vec<Effect> {
        if self.surfaces.panel_generation() != Some(generation) {
            return Vec::new();
        }

        let state = if ok { CopyState::Done } else { CopyState::Failed };
        vec![
            Effect::Ui(copy_feedback(state)),
            Effect::ScheduleCopyReset { generation },
        ]
    }

    pub fn copy_reset(&mut self, generation: u64) -> Vec<Effect> {
        if self.surfaces.panel_generation() != Some(generation) {
            return Vec::new();
        }
        vec![Effect::Ui(copy_feedback(CopyState::Idle))]
    }

    pub fn on_message(&mut self, message: RuntimeMessage) -> Vec<Effect> {
        match message {
            RuntimeMessage::ExportVocab => {
                let entries = self.vocab.load();
                let reply = RuntimeReply::Export {
                    csv: lingua_core::vocab::to_csv(&entries),
                    count: entries.len(),
                };
                vec![Effect::Ui(UiUpdate::Reply { reply })]
            }
            RuntimeMessage::GetVocabCount => vec![Effect::Ui(UiUpdate::Reply {
                reply: RuntimeReply::Count {
                    count: self.vocab.count(),
                },
            })],
            RuntimeMessage::OpenPanel => ui(self.surfaces.show_welcome()),
            RuntimeMessage::LangueChanged { langue } => {
                self.on_language_changed(langue);
                Vec::new()
            }
            RuntimeMessage::SetLangue { langue } => {
                match self.settings.set_language(&langue) {
                    Ok(()) => self.on_language_changed(langue),
                    Err(e) => tracing::warn!("Language not changed: {}", e),
                }
                Vec::new()
            }
        }
    }

    pub fn on_language_changed(&mut self, lang: String) {
        if lang != self.lang {
            tracing::debug!("Session language {} -> {}", self.lang, lang);
            self.lang = lang;
        }
    }

    pub fn on_completed(&mut self, completion: Completion) -> Vec<Effect> {
        let Completion { request, result } = completion;

        // Stale: no render, no vocabulary write
        if !self.surfaces.is_live(request.ticket) {
            tracing::debug!(
                "Discarding {:?} result for replaced surface",
                request.kind.action()
            );
            return Vec::new();
        }

        let action = request.kind.action();
        let content = match result {
            Ok(raw) => self.content_for(request.kind, &raw, &request.lang),
            Err(e) => {
                tracing::warn!("{} request failed: {}", action.label(), e);
                PanelContent::Error(action)
            }
        };

        ui(self.surfaces.resolve(request.ticket, content))
    }

    fn content_for(&self, kind: RequestKind, raw: &str, lang: &str) -> PanelContent {
        match kind {
            RequestKind::Definition { word, sentence } => {
                match response::parse_as::<DefinitionPayload>(raw) {
                    Ok(payload) => {
                        let is_new =
                            self.vocab
                                .save(&word, &payload.definition, &payload.traduction, lang);
                        PanelContent::Definition(DefinitionView::new(
                            &word, payload, &sentence, is_new,
                        ))
                    }
                    Err(e) => {
                        tracing::warn!("Unreadable definition: {}", e);
                        PanelContent::Error(Action::Define)
                    }
                }
            }
            RequestKind::Simplification { original } => {
                let result = response::strip_fences(raw);
                if result.is_empty() {
                    PanelContent::Error(Action::Simplify)
                } else {
                    PanelContent::Simplification {
                        result: result.to_string(),
                        original,
                    }
                }
            }
            RequestKind::Translation => match response::parse_as::<TranslationPayload>(raw) {
                Ok(payload) => PanelContent::Translation {
                    payload,
                    lang: lang.to_string(),
                },
                Err(e) => {
                    tracing::warn!("Unreadable translation: {}", e);
                    PanelContent::Error(Action::Translate)
                }
            },
        }
    }
}

fn ui(update: Option<UiUpdate>) -> Vec<Effect> {
    update.into_iter().map(Effect::Ui).collect()
}

fn copy_feedback(state: CopyState) -> UiUpdate {
    UiUpdate::CopyFeedback {
        state,
        symbol: state.symbol().to_string(),
    }
}

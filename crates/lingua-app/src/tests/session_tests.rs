use lingua_translator::ProxyError;
use lingua_types::{
    Action, CopyState, PageEvent, RuntimeMessage, RuntimeReply, SurfaceKind, UiUpdate, Viewport,
};

use super::{html, session, updates};
use crate::session::{Completion, Effect, PendingRequest, RequestKind, Session};

fn mouse_up(session: &mut Session, text: &str) -> Vec<Effect> {
    session.on_mouse_up(text, 100, 200, Viewport::default(), None)
}

fn request(effects: &[Effect]) -> PendingRequest {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::Request(r) => Some(r.clone()),
            _ => None,
        })
        .expect("no request effect")
}

fn complete(session: &mut Session, request: PendingRequest, raw: &str) -> Vec<Effect> {
    session.on_completed(Completion {
        request,
        result: Ok(raw.to_string()),
    })
}

fn has_action_bar(effects: &[Effect]) -> bool {
    updates(effects)
        .iter()
        .any(|u| matches!(u, UiUpdate::ActionBar { .. }))
}

#[test]
fn test_short_selection_does_nothing() {
    let (mut s, _, _) = session("en", false);
    assert!(mouse_up(&mut s, "").is_empty());
    assert!(mouse_up(&mut s, " a ").is_empty());

    // An open action bar is cleared
    mouse_up(&mut s, "le chat noir");
    let effects = mouse_up(&mut s, "x");
    assert_eq!(effects, vec![Effect::Ui(UiUpdate::ActionBarRemoved)]);
}

#[test]
fn test_single_word_lookup_without_action_bar() {
    let (mut s, _, _) = session("en", false);
    let effects = mouse_up(&mut s, "  Bonjour ");

    assert!(html(updates(&effects)[0]).contains("Définition en cours…"));
    assert!(!has_action_bar(&effects));

    let req = request(&effects);
    assert_eq!(req.prompt.prompt, "Bonjour");
    assert_eq!(req.lang, "en");
    assert!(matches!(req.kind, RequestKind::Definition { ref word, .. } if word == "Bonjour"));
}

#[test]
fn test_multi_word_lookup_and_action_bar() {
    let (mut s, _, _) = session("en", false);
    let effects = mouse_up(&mut s, "Le chat dort.");

    assert!(has_action_bar(&effects));
    assert_eq!(request(&effects).prompt.prompt, "Le");
    assert_eq!(s.surfaces().action_bar_text(), Some("Le chat dort."));
}

#[test]
fn test_punctuation_first_token_skips_lookup() {
    let (mut s, _, _) = session("en", false);
    let effects = mouse_up(&mut s, "« Bonjour » dit-il");

    assert!(has_action_bar(&effects));
    assert!(!effects.iter().any(|e| matches!(e, Effect::Request(_))));
    assert!(!s.surfaces().has_panel());
}

#[test]
fn test_selection_inside_ui_is_ignored() {
    let (mut s, _, _) = session("en", false);
    let effects = s.handle(PageEvent::MouseUp {
        text: "Bonjour".into(),
        x: 0,
        y: 0,
        viewport: Viewport::default(),
        inside_ui: true,
        anchor_text: None,
    });
    assert!(effects.is_empty());
}

#[test]
fn test_bonjour_scenario() {
    let (mut s, vocab, _) = session("en", false);
    let effects = s.on_mouse_up(
        "Bonjour",
        10,
        10,
        Viewport::default(),
        Some("Le matin, il dit bonjour à tous. Puis il part."),
    );

    let req = request(&effects);
    let effects = complete(
        &mut s,
        req,
        r#"{"definition":"Un mot pour dire salut.","traduction":"Hello"}"#,
    );

    let panel = html(updates(&effects)[0]);
    assert!(panel.contains("Un mot pour dire salut."));
    assert!(panel.contains("<span class=\"lb-traduction lb-hidden\">Hello</span>"));
    assert!(panel.contains("lb-reveal-btn"));
    assert!(panel.contains("Ajouté au carnet"));
    // No model example: the page sentence is used
    assert!(panel.contains("Le matin, il dit <mark class=\"lb-word-highlight\">bonjour</mark> à tous."));

    let entries = vocab.load();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].word, "bonjour");
    assert_eq!(entries[0].lang, "en");
    assert_eq!(entries[0].translation, "Hello");

    let revealed = s.handle(PageEvent::Reveal {
        surface: SurfaceKind::Panel,
    });
    let panel = html(updates(&revealed)[0]);
    assert!(panel.contains("<span class=\"lb-traduction\">Hello</span>"));
    assert!(!panel.contains("lb-reveal-btn"));

    // Reveal is one-way
    assert!(s
        .handle(PageEvent::Reveal {
            surface: SurfaceKind::Panel
        })
        .is_empty());
}

#[test]
fn test_known_word_badge() {
    let (mut s, vocab, _) = session("en", false);
    vocab.save("bonjour", "x", "Hello", "en");

    let req = request(&mouse_up(&mut s, "Bonjour"));
    let effects = complete(&mut s, req, r#"{"definition":"d","traduction":"Hello"}"#);
    assert!(html(updates(&effects)[0]).contains("Déjà dans le carnet"));
    assert_eq!(vocab.count(), 1);
}

#[test]
fn test_stale_completion_is_discarded() {
    let (mut s, vocab, _) = session("en", false);
    let first = request(&mouse_up(&mut s, "chat"));
    let second = request(&mouse_up(&mut s, "chien"));

    let effects = complete(&mut s, first, r#"{"definition":"a","traduction":"cat"}"#);
    assert!(effects.is_empty());
    assert_eq!(vocab.count(), 0);

    let effects = complete(&mut s, second, r#"{"definition":"b","traduction":"dog"}"#);
    assert!(html(updates(&effects)[0]).contains("dog"));
    assert_eq!(vocab.load()[0].word, "chien");
}

#[test]
fn test_closed_panel_discards_completion() {
    let (mut s, vocab, _) = session("en", false);
    let req = request(&mouse_up(&mut s, "chat"));

    let closed = s.handle(PageEvent::KeyDown {
        key: "Escape".into(),
    });
    assert_eq!(closed, vec![Effect::Ui(UiUpdate::PanelClosed)]);

    assert!(complete(&mut s, req, r#"{"definition":"a","traduction":"cat"}"#).is_empty());
    assert_eq!(vocab.count(), 0);
}

#[test]
fn test_errors_never_show_details() {
    let (mut s, vocab, _) = session("en", false);
    let req = request(&mouse_up(&mut s, "chat"));

    let effects = s.on_completed(Completion {
        request: req,
        result: Err(ProxyError::Upstream("Clé secrète invalide".into())),
    });
    let panel = html(updates(&effects)[0]);
    assert!(panel.contains("Réessaie dans un instant"));
    assert!(!panel.contains("secrète"));
    assert_eq!(vocab.count(), 0);

    let req = request(&mouse_up(&mut s, "chat"));
    let effects = complete(&mut s, req, "not json");
    assert!(html(updates(&effects)[0]).contains("Réessaie dans un instant"));
}

#[test]
fn test_simplification_flow() {
    let (mut s, _, _) = session("en", false);
    mouse_up(&mut s, "Le chat dort sur le canapé.");

    let effects = s.handle(PageEvent::Action {
        action: Action::Simplify,
    });
    assert_eq!(effects[0], Effect::Ui(UiUpdate::ActionBarRemoved));
    assert!(html(updates(&effects)[1]).contains("Simplification en cours…"));

    let req = request(&effects);
    assert_eq!(req.prompt.prompt, "Le chat dort sur le canapé.");
    assert!(req.prompt.system_prompt.contains("FALC"));

    let effects = complete(&mut s, req, "```\nLe chat dort.\n```");
    let panel = html(updates(&effects)[0]);
    assert!(panel.contains("<div class=\"lb-result-body\">Le chat dort.</div>"));
    assert!(panel.contains("data-copy=\"Le chat dort.\""));
    assert!(panel.contains("Le chat dort sur le canapé."));
}

#[test]
fn test_blank_simplification_is_an_error() {
    let (mut s, _, _) = session("en", false);
    mouse_up(&mut s, "deux mots");
    let req = request(&s.on_action(Action::Simplify));

    let effects = complete(&mut s, req, "```\n  \n```");
    assert!(html(updates(&effects)[0]).contains("Réessaie dans un instant"));
}

#[test]
fn test_action_without_bar_is_ignored() {
    let (mut s, _, _) = session("en", false);
    assert!(s.on_action(Action::Translate).is_empty());
}

#[test]
fn test_translation_rtl() {
    let (mut s, _, _) = session("ar", false);
    mouse_up(&mut s, "Bonjour à tous");

    let req = request(&s.on_action(Action::Translate));
    assert_eq!(req.lang, "ar");
    assert!(req.prompt.system_prompt.contains("Traduis le texte suivant en ar."));

    let effects = complete(
        &mut s,
        req,
        r#"```json
{"original":"Bonjour à tous","traduction":"مرحبا بالجميع"}
```"#,
    );
    let panel = html(updates(&effects)[0]);
    assert!(panel.contains("dir=\"rtl\""));
    assert!(panel.contains("العربية"));
    assert!(panel.contains("data-copy=\"مرحبا بالجميع\""));
}

#[test]
fn test_translation_error_message() {
    let (mut s, _, _) = session("es", false);
    mouse_up(&mut s, "Bonjour à tous");
    let req = request(&s.on_action(Action::Translate));

    let effects = complete(&mut s, req, "{broken");
    assert!(html(updates(&effects)[0]).contains("Erreur lors de la traduction"));
}

#[test]
fn test_language_change_applies_to_next_request() {
    let (mut s, vocab, _) = session("en", false);
    let before = request(&mouse_up(&mut s, "chat"));

    s.handle(PageEvent::Message {
        message: RuntimeMessage::LangueChanged {
            langue: "es".into(),
        },
    });
    assert_eq!(s.lang(), "es");

    // The in-flight request keeps the language it was made with
    complete(&mut s, before, r#"{"definition":"a","traduction":"cat"}"#);
    assert_eq!(vocab.load()[0].lang, "en");

    let after = request(&mouse_up(&mut s, "chat"));
    assert_eq!(after.lang, "es");
    assert!(after.prompt.system_prompt.contains("La traduction du mot en es"));
}

#[test]
fn test_set_langue_persists() {
    let (mut s, _, settings) = session("en", false);
    s.on_message(RuntimeMessage::SetLangue {
        langue: "de".into(),
    });
    assert_eq!(s.lang(), "de");
    assert_eq!(settings.language(), "de");

    s.on_message(RuntimeMessage::SetLangue {
        langue: "klingon".into(),
    });
    assert_eq!(s.lang(), "de");
}

#[test]
fn test_escape_and_click_outside() {
    let (mut s, _, _) = session("en", false);
    mouse_up(&mut s, "Le chat dort");

    // Click outside: the panel stays
    let effects = s.on_click(false);
    assert_eq!(effects, vec![Effect::Ui(UiUpdate::ActionBarRemoved)]);
    assert!(s.surfaces().has_panel());

    assert!(s.on_click(true).is_empty());

    let effects = s.on_key("Escape");
    assert_eq!(effects, vec![Effect::Ui(UiUpdate::PanelClosed)]);
    assert!(s.on_key("Enter").is_empty());
}

#[test]
fn test_close_button() {
    let (mut s, _, _) = session("en", false);
    mouse_up(&mut s, "chat");
    assert_eq!(
        s.handle(PageEvent::ClosePanel),
        vec![Effect::Ui(UiUpdate::PanelClosed)]
    );
    assert!(s.handle(PageEvent::ClosePanel).is_empty());
}

#[test]
fn test_runtime_messages() {
    let (mut s, vocab, _) = session("en", false);

    let effects = s.on_message(RuntimeMessage::ExportVocab);
    assert_eq!(
        effects,
        vec![Effect::Ui(UiUpdate::Reply {
            reply: RuntimeReply::Export {
                csv: String::new(),
                count: 0
            }
        })]
    );

    vocab.save("chat", "Un animal.", "cat", "en");
    let effects = s.on_message(RuntimeMessage::GetVocabCount);
    assert_eq!(
        effects,
        vec![Effect::Ui(UiUpdate::Reply {
            reply: RuntimeReply::Count { count: 1 }
        })]
    );

    match &s.on_message(RuntimeMessage::ExportVocab)[0] {
        Effect::Ui(UiUpdate::Reply {
            reply: RuntimeReply::Export { csv, count },
        }) => {
            assert_eq!(*count, 1);
            assert_eq!(csv.lines().count(), 2);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_open_panel_shows_welcome_once() {
    let (mut s, _, _) = session("en", false);
    let effects = s.on_message(RuntimeMessage::OpenPanel);
    assert!(html(updates(&effects)[0]).contains("Prêt"));
    assert!(s.on_message(RuntimeMessage::OpenPanel).is_empty());
}

#[test]
fn test_copy_feedback_cycle() {
    let (mut s, _, _) = session("en", false);
    assert!(s.on_copy("rien".into()).is_empty());

    s.on_message(RuntimeMessage::OpenPanel);
    let generation = s.surfaces().panel_generation().unwrap();

    let effects = s.on_copy("Le chat dort.".into());
    assert_eq!(
        effects,
        vec![Effect::Copy {
            text: "Le chat dort.".into(),
            generation
        }]
    );

    let effects = s.copy_finished(generation, true);
    assert_eq!(
        effects,
        vec![
            Effect::Ui(UiUpdate::CopyFeedback {
                state: CopyState::Done,
                symbol: "✓".into()
            }),
            Effect::ScheduleCopyReset { generation }
        ]
    );

    let effects = s.copy_reset(generation);
    assert_eq!(
        effects,
        vec![Effect::Ui(UiUpdate::CopyFeedback {
            state: CopyState::Idle,
            symbol: "⎘".into()
        })]
    );

    let failed = s.copy_finished(generation, false);
    assert!(matches!(
        &failed[0],
        Effect::Ui(UiUpdate::CopyFeedback {
            state: CopyState::Failed,
            ..
        })
    ));
}

#[test]
fn test_copy_reset_for_replaced_panel_is_dropped() {
    let (mut s, _, _) = session("en", false);
    s.on_message(RuntimeMessage::OpenPanel);
    let old = s.surfaces().panel_generation().unwrap();

    mouse_up(&mut s, "chat");
    assert!(s.copy_reset(old).is_empty());
    assert!(s.copy_finished(old, true).is_empty());
}

#[test]
fn test_hover_tooltip_takes_word_lookups() {
    let (mut s, vocab, _) = session("en", true);
    let effects = mouse_up(&mut s, "Le chat");

    assert!(matches!(updates(&effects)[0], UiUpdate::Tooltip { .. }));
    assert!(!s.surfaces().has_panel());

    let req = request(&effects);
    assert_eq!(req.ticket.surface, SurfaceKind::Tooltip);

    // Simplify still goes to the panel and leaves the tooltip alone
    let simplify = request(&s.on_action(Action::Simplify));
    assert_eq!(simplify.ticket.surface, SurfaceKind::Panel);

    let effects = complete(&mut s, req, r#"{"definition":"Un article.","exemple":"Le chat dort.","traduction":"the"}"#);
    let tooltip = html(updates(&effects)[0]);
    assert!(tooltip.starts_with("<div id=\"lb-tooltip\""));
    assert!(!tooltip.contains("lb-def-context"));
    assert_eq!(vocab.count(), 1);

    // Click outside closes the tooltip, the panel stays
    let effects = s.on_click(false);
    assert_eq!(effects, vec![Effect::Ui(UiUpdate::TooltipRemoved)]);
    assert!(s.surfaces().has_panel());
}

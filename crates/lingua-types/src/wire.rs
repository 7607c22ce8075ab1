use serde::{Deserialize, Serialize};

use crate::types::{Action, SurfaceKind, Viewport};

/// Events forwarded by the browser shim over the bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// Mouse released, possibly with a text selection
    MouseUp {
        text: String,
        x: i32,
        y: i32,
        #[serde(default)]
        viewport: Viewport,
        /// Target is inside the panel, tooltip or action bar
        #[serde(default)]
        inside_ui: bool,
        /// Text of the node the selection starts in
        #[serde(default)]
        anchor_text: Option<String>,
    },
    /// Action bar button clicked
    Action { action: Action },
    KeyDown { key: String },
    Click {
        #[serde(default)]
        inside_ui: bool,
    },
    ClosePanel,
    Reveal { surface: SurfaceKind },
    Copy { text: String },
    Message { message: RuntimeMessage },
}

/// Extension-internal messages (popup, background worker)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuntimeMessage {
    ExportVocab,
    GetVocabCount,
    OpenPanel,
    LangueChanged { langue: String },
    SetLangue { langue: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuntimeReply {
    Export { csv: String, count: usize },
    Count { count: usize },
}

/// Copy button states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyState {
    Idle,
    Done,
    Failed,
}

impl CopyState {
    pub fn symbol(&self) -> &'static str {
        match self {
            CopyState::Idle => "⎘",
            CopyState::Done => "✓",
            CopyState::Failed => "✕",
        }
    }
}

/// DOM changes the browser shim applies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiUpdate {
    /// Create the panel if needed and replace its markup
    Panel { html: String },
    PanelClosed,
    ActionBar { html: String, left: i32, top: i32 },
    ActionBarRemoved,
    Tooltip { html: String, left: i32, top: i32 },
    TooltipRemoved,
    CopyFeedback { state: CopyState, symbol: String },
    Reply { reply: RuntimeReply },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_event_from_shim_json() {
        let raw = r#"{"type":"mouse_up","text":"Bonjour","x":10,"y":20}"#;
        let event: PageEvent = serde_json::from_str(raw).unwrap();

        match event {
            PageEvent::MouseUp {
                text,
                viewport,
                inside_ui,
                anchor_text,
                ..
            } => {
                assert_eq!(text, "Bonjour");
                assert_eq!(viewport, Viewport::default());
                assert!(!inside_ui);
                assert!(anchor_text.is_none());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_runtime_message_names() {
        let raw = r#"{"type":"message","message":{"type":"LANGUE_CHANGED","langue":"es"}}"#;
        let event: PageEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(
            event,
            PageEvent::Message {
                message: RuntimeMessage::LangueChanged {
                    langue: "es".to_string()
                }
            }
        );

        let export = serde_json::to_value(RuntimeMessage::ExportVocab).unwrap();
        assert_eq!(export["type"], "EXPORT_VOCAB");
    }

    #[test]
    fn test_action_uses_data_attribute_names() {
        let raw = r#"{"type":"action","action":"simplifier"}"#;
        let event: PageEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(
            event,
            PageEvent::Action {
                action: Action::Simplify
            }
        );
    }

    #[test]
    fn test_reply_shapes() {
        let export = serde_json::to_value(RuntimeReply::Export {
            csv: "x".into(),
            count: 1,
        })
        .unwrap();
        assert_eq!(export, serde_json::json!({"csv": "x", "count": 1}));

        let count: RuntimeReply = serde_json::from_str(r#"{"count":3}"#).unwrap();
        assert_eq!(count, RuntimeReply::Count { count: 3 });
    }
}

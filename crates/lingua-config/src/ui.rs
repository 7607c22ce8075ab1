use std::env;

use serde::{Deserialize, Serialize};

fn default_hover_tooltip() -> bool {
    false
}

fn default_copy_feedback_ms() -> u64 {
    1500
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Word lookups open a tooltip near the pointer instead of the side panel
    #[serde(default = "default_hover_tooltip")]
    pub hover_tooltip: bool,
    /// How long copy buttons show their checkmark
    #[serde(default = "default_copy_feedback_ms")]
    pub copy_feedback_ms: u64,
}

impl UiConfig {
    pub fn new() -> Self {
        let hover_tooltip = env::var("LB_HOVER_TOOLTIP")
            .ok()
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or_else(default_hover_tooltip);

        Self {
            hover_tooltip,
            copy_feedback_ms: default_copy_feedback_ms(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            hover_tooltip: default_hover_tooltip(),
            copy_feedback_ms: default_copy_feedback_ms(),
        }
    }
}

use lingua_core::response::TranslationPayload;
use lingua_types::{Action, SurfaceKind, Ticket, UiUpdate, Viewport};

use crate::escape::Markup;
use crate::render::{self, DefinitionView};

const ACTION_BAR_WIDTH: i32 = 120;
const ACTION_BAR_OFFSET: i32 = 52;
const MIN_TOP: i32 = 8;
const TOOLTIP_WIDTH: i32 = 320;
const TOOLTIP_HEIGHT: i32 = 180;
const TOOLTIP_GAP: i32 = 16;

/// What a panel or tooltip currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    Welcome,
    Loading(Action),
    Definition(DefinitionView),
    Simplification { result: String, original: String },
    Translation { payload: TranslationPayload, lang: String },
    Error(Action),
}

impl PanelContent {
    pub fn render(&self, compact: bool) -> Markup {
        match self {
            PanelContent::Welcome => render::welcome(),
            PanelContent::Loading(action) => render::loading(*action),
            PanelContent::Definition(view) => render::definition(view, compact),
            PanelContent::Simplification { result, original } => {
                render::simplification(result, original)
            }
            PanelContent::Translation { payload, lang } => render::translation(payload, lang),
            PanelContent::Error(action) => render::error(*action),
        }
    }
}

#[derive(Debug)]
struct Slot {
    generation: u64,
    content: PanelContent,
}

#[derive(Debug)]
struct TooltipSlot {
    slot: Slot,
    left: i32,
    top: i32,
}

/// Floating surfaces of one page: at most one panel, one tooltip and one
/// action bar. Every new panel or tooltip gets a fresh generation, so a
/// completion can tell whether the surface it was started for still exists.
#[derive(Debug, Default)]
pub struct Surfaces {
    generation: u64,
    panel: Option<Slot>,
    tooltip: Option<TooltipSlot>,
    /// Selection the action bar offers actions for
    action_bar: Option<String>,
}

impl Surfaces {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Replace the panel content with a loading state owned by a new ticket
    pub fn begin_panel(&mut self, action: Action) -> (Ticket, UiUpdate) {
        let generation = self.next_generation();
        self.panel = Some(Slot {
            generation,
            content: PanelContent::Loading(action),
        });

        let ticket = Ticket {
            surface: SurfaceKind::Panel,
            generation,
        };
        (ticket, self.panel_update())
    }

    /// Open the tooltip near the pointer with a loading state
    pub fn begin_tooltip(
        &mut self,
        action: Action,
        x: i32,
        y: i32,
        viewport: Viewport,
    ) -> (Ticket, UiUpdate) {
        let generation = self.next_generation();
        let (left, top) = tooltip_position(x, y, viewport);
        self.tooltip = Some(TooltipSlot {
            slot: Slot {
                generation,
                content: PanelContent::Loading(action),
            },
            left,
            top,
        });

        let ticket = Ticket {
            surface: SurfaceKind::Tooltip,
            generation,
        };
        (ticket, self.tooltip_update())
    }

    /// Whether the surface `ticket` was issued for is still showing it
    pub fn is_live(&self, ticket: Ticket) -> bool {
        self.slot(ticket.surface)
            .is_some_and(|slot| slot.generation == ticket.generation)
    }

    /// Show a result on the ticket's surface. `None` when the ticket is stale.
    pub fn resolve(&mut self, ticket: Ticket, content: PanelContent) -> Option<UiUpdate> {
        if !self.is_live(ticket) {
            tracing::debug!(
                "Dropping stale {:?} result (generation {})",
                ticket.surface,
                ticket.generation
            );
            return None;
        }

        self.slot_mut(ticket.surface)?.content = content;
        Some(self.update_for(ticket.surface))
    }

    /// Welcome card, only when no panel is open
    pub fn show_welcome(&mut self) -> Option<UiUpdate> {
        if self.panel.is_some() {
            return None;
        }

        let generation = self.next_generation();
        self.panel = Some(Slot {
            generation,
            content: PanelContent::Welcome,
        });
        Some(self.panel_update())
    }

    /// Unhide the translation of a definition card. One-way.
    pub fn reveal(&mut self, surface: SurfaceKind) -> Option<UiUpdate> {
        match &mut self.slot_mut(surface)?.content {
            PanelContent::Definition(view) if !view.revealed => view.revealed = true,
            _ => return None,
        }
        Some(self.update_for(surface))
    }

    pub fn close_panel(&mut self) -> Option<UiUpdate> {
        self.panel.take().map(|_| UiUpdate::PanelClosed)
    }

    pub fn close_tooltip(&mut self) -> Option<UiUpdate> {
        self.tooltip.take().map(|_| UiUpdate::TooltipRemoved)
    }

    pub fn show_action_bar(&mut self, text: &str, x: i32, y: i32, viewport: Viewport) -> UiUpdate {
        let left = x.min(viewport.width.saturating_sub(ACTION_BAR_WIDTH)).max(0);
        let top = y.saturating_sub(ACTION_BAR_OFFSET).max(MIN_TOP);

        self.action_bar = Some(text.to_string());

        UiUpdate::ActionBar {
            html: render::action_bar(),
            left,
            top,
        }
    }

    pub fn remove_action_bar(&mut self) -> Option<UiUpdate> {
        self.action_bar.take().map(|_| UiUpdate::ActionBarRemoved)
    }

    /// Selection the action bar was shown for
    pub fn action_bar_text(&self) -> Option<&str> {
        self.action_bar.as_deref()
    }

    pub fn has_panel(&self) -> bool {
        self.panel.is_some()
    }

    pub fn panel_generation(&self) -> Option<u64> {
        self.panel.as_ref().map(|slot| slot.generation)
    }

    pub fn content(&self, surface: SurfaceKind) -> Option<&PanelContent> {
        self.slot(surface).map(|slot| &slot.content)
    }

    /// Escape: everything goes
    pub fn close_all(&mut self) -> Vec<UiUpdate> {
        [
            self.close_panel(),
            self.remove_action_bar(),
            self.close_tooltip(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Click outside every surface: the panel stays
    pub fn dismiss_transient(&mut self) -> Vec<UiUpdate> {
        [self.remove_action_bar(), self.close_tooltip()]
            .into_iter()
            .flatten()
            .collect()
    }

    fn slot(&self, surface: SurfaceKind) -> Option<&Slot> {
        match surface {
            SurfaceKind::Panel => self.panel.as_ref(),
            SurfaceKind::Tooltip => self.tooltip.as_ref().map(|t| &t.slot),
        }
    }

    fn slot_mut(&mut self, surface: SurfaceKind) -> Option<&mut Slot> {
        match surface {
            SurfaceKind::Panel => self.panel.as_mut(),
            SurfaceKind::Tooltip => self.tooltip.as_mut().map(|t| &mut t.slot),
        }
    }

    fn update_for(&self, surface: SurfaceKind) -> UiUpdate {
        match surface {
            SurfaceKind::Panel => self.panel_update(),
            SurfaceKind::Tooltip => self.tooltip_update(),
        }
    }

    fn panel_update(&self) -> UiUpdate {
        let content = self
            .panel
            .as_ref()
            .map(|slot| slot.content.render(false))
            .unwrap_or_default();

        UiUpdate::Panel {
            html: render::panel(&content),
        }
    }

    fn tooltip_update(&self) -> UiUpdate {
        match &self.tooltip {
            Some(t) => UiUpdate::Tooltip {
                html: render::tooltip(&t.slot.content.render(true)),
                left: t.left,
                top: t.top,
            },
            None => UiUpdate::TooltipRemoved,
        }
    }
}

/// Below the pointer, or above it when there is no room
fn tooltip_position(x: i32, y: i32, viewport: Viewport) -> (i32, i32) {
    // Coordinates come straight from the page
    let left = x.min(viewport.width.saturating_sub(TOOLTIP_WIDTH)).max(0);
    let top = if y.saturating_add(TOOLTIP_GAP + TOOLTIP_HEIGHT) > viewport.height {
        y.saturating_sub(TOOLTIP_GAP + TOOLTIP_HEIGHT).max(MIN_TOP)
    } else {
        y.saturating_add(TOOLTIP_GAP)
    };
    (left, top)
}

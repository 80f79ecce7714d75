//! Pointer state machine for hover, the control pill, and site dragging.
//!
//! `Idle -> Hovering -> Dragging -> Idle/Hovering`. The machine only reads the site field;
//! every change to the model is returned as an [`InteractionEffect`] for the owner to
//! apply, so drag moves can be batched to one per frame.

use crate::colors::state::ColorState;
use crate::foundation::core::Point;
use crate::render::overlay::{OverlayView, PillLayout, PillSegment};
use crate::sites::field::SiteField;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerPhase {
    #[default]
    Idle,
    Hovering {
        cell: usize,
        segment: Option<PillSegment>,
    },
    Dragging {
        site: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InteractionEffect {
    None,
    /// Overlay state changed; only the `ui` stage needs to run.
    Redraw,
    DragStarted { site: usize },
    /// Latest drag target for `site`. Owners keep only the newest one per frame.
    MoveSite { site: usize, to: Point },
    DragEnded { site: usize },
    RequestColorPick { cell: usize },
    ToggleLock { cell: usize },
}

#[derive(Clone, Debug, Default)]
pub struct Interaction {
    phase: PointerPhase,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PointerPhase {
        self.phase
    }

    pub fn hovered_cell(&self) -> Option<usize> {
        match self.phase {
            PointerPhase::Hovering { cell, .. } => Some(cell),
            _ => None,
        }
    }

    pub fn dragging_site(&self) -> Option<usize> {
        match self.phase {
            PointerPhase::Dragging { site } => Some(site),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging_site().is_some()
    }

    /// Drop back to idle, e.g. after the site set is regenerated.
    pub fn reset(&mut self) -> InteractionEffect {
        self.set_phase(PointerPhase::Idle)
    }

    /// `suppressed` is true while a distortion is active: hover and pill stay idle.
    pub fn pointer_move(
        &mut self,
        p: Point,
        sites: &SiteField,
        suppressed: bool,
    ) -> InteractionEffect {
        if let PointerPhase::Dragging { site } = self.phase {
            return InteractionEffect::MoveSite { site, to: p };
        }
        if suppressed {
            return self.set_phase(PointerPhase::Idle);
        }
        let next = self.hover_at(p, sites);
        self.set_phase(next)
    }

    /// Press on a pill segment acts on the hovered cell; anywhere else grabs the closest
    /// site for dragging.
    pub fn pointer_down(
        &mut self,
        p: Point,
        sites: &SiteField,
        suppressed: bool,
    ) -> InteractionEffect {
        let hover = if suppressed {
            PointerPhase::Idle
        } else {
            self.hover_at(p, sites)
        };
        if let PointerPhase::Hovering {
            cell,
            segment: Some(seg),
        } = hover
        {
            match seg {
                PillSegment::Swap => {
                    self.phase = hover;
                    return InteractionEffect::RequestColorPick { cell };
                }
                PillSegment::Lock => {
                    self.phase = hover;
                    return InteractionEffect::ToggleLock { cell };
                }
                PillSegment::Move => {
                    self.phase = PointerPhase::Dragging { site: cell };
                    return InteractionEffect::DragStarted { site: cell };
                }
            }
        }
        match sites.find_closest_site_index(p.x, p.y) {
            Some(site) => {
                self.phase = PointerPhase::Dragging { site };
                InteractionEffect::DragStarted { site }
            }
            None => InteractionEffect::None,
        }
    }

    /// Release always ends a drag, wherever it happens.
    pub fn pointer_up(
        &mut self,
        p: Point,
        sites: &SiteField,
        suppressed: bool,
    ) -> InteractionEffect {
        match self.phase {
            PointerPhase::Dragging { site } => {
                self.phase = if suppressed {
                    PointerPhase::Idle
                } else {
                    self.hover_at(p, sites)
                };
                InteractionEffect::DragEnded { site }
            }
            _ => InteractionEffect::None,
        }
    }

    /// Pointer left the canvas. Hover ends; a drag continues until release.
    pub fn pointer_leave(&mut self) -> InteractionEffect {
        if self.is_dragging() {
            return InteractionEffect::None;
        }
        self.set_phase(PointerPhase::Idle)
    }

    /// What the overlay should draw for the current phase.
    pub fn overlay_view(&self, colors: &ColorState) -> Option<OverlayView> {
        let (cell, segment, show_pill) = match self.phase {
            PointerPhase::Idle => return None,
            PointerPhase::Hovering { cell, segment } => (cell, segment, true),
            PointerPhase::Dragging { site } => (site, None, false),
        };
        Some(OverlayView {
            cell,
            segment,
            show_pill,
            swatch: colors.get_cell_color(cell).to_rgba8(),
            locked: colors.is_cell_color_locked(cell),
        })
    }

    fn hover_at(&self, p: Point, sites: &SiteField) -> PointerPhase {
        // Stay on the current cell while the pointer is over its pill, even if the pill
        // overlaps a neighbouring cell.
        if let PointerPhase::Hovering { cell, .. } = self.phase
            && let Some(segment) = pill_for(cell, sites).and_then(|pill| pill.segment_at(p))
        {
            return PointerPhase::Hovering {
                cell,
                segment: Some(segment),
            };
        }
        match sites.find_closest_site_index(p.x, p.y) {
            Some(cell) => PointerPhase::Hovering {
                cell,
                segment: pill_for(cell, sites).and_then(|pill| pill.segment_at(p)),
            },
            None => PointerPhase::Idle,
        }
    }

    fn set_phase(&mut self, next: PointerPhase) -> InteractionEffect {
        if self.phase == next {
            return InteractionEffect::None;
        }
        self.phase = next;
        InteractionEffect::Redraw
    }
}

fn pill_for(cell: usize, sites: &SiteField) -> Option<PillLayout> {
    sites
        .sites()
        .get(cell)
        .map(|&anchor| PillLayout::around(anchor, sites.canvas()))
}

#[cfg(test)]
#[path = "../../tests/unit/interact/input.rs"]
mod tests;

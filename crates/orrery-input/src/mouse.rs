//! Mouse drag and scroll accumulation.
//!
//! Look deltas are only collected while the drag button is held. The first
//! cursor sample after a press re-anchors the drag so the view does not jump
//! to wherever the cursor wandered while the button was up.

use glam::Vec2;
use tracing::trace;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Pixels of a `PixelDelta` scroll that count as one wheel line.
const PIXELS_PER_LINE: f64 = 40.0;

#[derive(Debug, Clone)]
pub struct MouseState {
    drag_button: MouseButton,
    dragging: bool,
    anchor: Option<Vec2>,
    position: Option<Vec2>,
    drag_delta: Vec2,
    scroll: f32,
}

impl Default for MouseState {
    fn default() -> Self {
        Self::new(MouseButton::Left)
    }
}

impl MouseState {
    /// Track drags made with `drag_button`.
    #[must_use]
    pub fn new(drag_button: MouseButton) -> Self {
        Self {
            drag_button,
            dragging: false,
            anchor: None,
            position: None,
            drag_delta: Vec2::ZERO,
            scroll: 0.0,
        }
    }

    /// `CursorMoved`, in window pixels with +y down.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let pos = Vec2::new(x as f32, y as f32);
        self.position = Some(pos);
        if !self.dragging {
            return;
        }
        if let Some(anchor) = self.anchor {
            self.drag_delta += pos - anchor;
        }
        self.anchor = Some(pos);
    }

    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        if button != self.drag_button {
            return;
        }
        match state {
            ElementState::Pressed => {
                self.dragging = true;
                self.anchor = None;
            }
            ElementState::Released => {
                self.dragging = false;
                self.anchor = None;
            }
        }
        trace!(dragging = self.dragging, "Drag button {state:?}");
    }

    /// `MouseWheel`. Positive is away from the user.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
        };
    }

    /// Stop any drag, e.g. when the cursor leaves or focus is lost.
    pub fn cancel_drag(&mut self) {
        self.dragging = false;
        self.anchor = None;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Last known cursor position, if the cursor has moved at all.
    #[must_use]
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Accumulated drag movement this frame in window pixels (+y down).
    #[must_use]
    pub fn drag_delta(&self) -> Vec2 {
        self.drag_delta
    }

    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn clear_transients(&mut self) {
        self.drag_delta = Vec2::ZERO;
        self.scroll = 0.0;
    }
}

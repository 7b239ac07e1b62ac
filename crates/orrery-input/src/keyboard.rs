//! Held-key tracking by physical key code.
//!
//! Physical codes keep WASD in the same place on every keyboard layout.

use rustc_hash::FxHashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Platform-independent key event, constructible in tests.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: PhysicalKey,
    pub state: ElementState,
    pub repeat: bool,
}

impl From<&KeyEvent> for RawKeyEvent {
    fn from(event: &KeyEvent) -> Self {
        Self {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        }
    }
}

/// Set of held keys plus the keys that went down since the last frame.
///
/// `just_pressed` drives one-shot actions (quit, reset view) so that holding a
/// key does not retrigger them every frame.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: FxHashSet<PhysicalKey>,
    just_pressed: FxHashSet<PhysicalKey>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent::from(event));
    }

    /// Apply one event. OS auto-repeat is ignored.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                if self.held.insert(event.key) {
                    self.just_pressed.insert(event.key);
                }
            }
            ElementState::Released => {
                self.held.remove(&event.key);
            }
        }
    }

    #[must_use]
    pub fn is_pressed(&self, key: PhysicalKey) -> bool {
        self.held.contains(&key)
    }

    #[must_use]
    pub fn just_pressed(&self, key: PhysicalKey) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
    }

    /// End-of-frame reset of edge-triggered state.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    fn raw(code: KeyCode, state: ElementState, repeat: bool) -> RawKeyEvent {
        RawKeyEvent {
            key: PhysicalKey::Code(code),
            state,
            repeat,
        }
    }

    #[test]
    fn test_press_and_release() {
        let mut kb = KeyboardState::new();
        let w = PhysicalKey::Code(KeyCode::KeyW);
        kb.process_raw(raw(KeyCode::KeyW, ElementState::Pressed, false));
        assert!(kb.is_pressed(w));
        assert!(kb.just_pressed(w));
        kb.process_raw(raw(KeyCode::KeyW, ElementState::Released, false));
        assert!(!kb.is_pressed(w));
    }

    #[test]
    fn test_just_pressed_lasts_one_frame() {
        let mut kb = KeyboardState::new();
        let r = PhysicalKey::Code(KeyCode::KeyR);
        kb.process_raw(raw(KeyCode::KeyR, ElementState::Pressed, false));
        kb.clear_transients();
        assert!(!kb.just_pressed(r));
        assert!(kb.is_pressed(r));
    }

    #[test]
    fn test_repeat_does_not_retrigger() {
        let mut kb = KeyboardState::new();
        let r = PhysicalKey::Code(KeyCode::KeyR);
        kb.process_raw(raw(KeyCode::KeyR, ElementState::Pressed, false));
        kb.clear_transients();
        kb.process_raw(raw(KeyCode::KeyR, ElementState::Pressed, true));
        assert!(!kb.just_pressed(r));
        // A duplicate non-repeat press while held is not a new edge either.
        kb.process_raw(raw(KeyCode::KeyR, ElementState::Pressed, false));
        assert!(!kb.just_pressed(r));
    }

    #[test]
    fn test_release_all() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::KeyA, ElementState::Pressed, false));
        kb.process_raw(raw(KeyCode::Space, ElementState::Pressed, false));
        kb.release_all();
        assert!(!kb.is_pressed(PhysicalKey::Code(KeyCode::KeyA)));
        assert!(!kb.is_pressed(PhysicalKey::Code(KeyCode::Space)));
    }
}

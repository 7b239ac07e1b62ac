//! Physical key to control action mapping.

use winit::keyboard::{KeyCode, PhysicalKey};

/// Everything the keyboard can ask the viewer to do.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum ControlAction {
    Quit,
    ResetView,
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    Boost,
}

impl ControlAction {
    pub const ALL: [ControlAction; 9] = [
        ControlAction::Quit,
        ControlAction::ResetView,
        ControlAction::Forward,
        ControlAction::Backward,
        ControlAction::Left,
        ControlAction::Right,
        ControlAction::Up,
        ControlAction::Down,
        ControlAction::Boost,
    ];
}

/// One key per action. Several actions may share a key.
#[derive(Debug, Clone, PartialEq)]
pub struct Bindings {
    keys: Vec<(ControlAction, PhysicalKey)>,
}

impl Default for Bindings {
    fn default() -> Self {
        use ControlAction::*;
        let keys = [
            (Quit, KeyCode::Escape),
            (ResetView, KeyCode::KeyR),
            (Forward, KeyCode::KeyW),
            (Backward, KeyCode::KeyS),
            (Left, KeyCode::KeyA),
            (Right, KeyCode::KeyD),
            (Up, KeyCode::Space),
            (Down, KeyCode::ShiftLeft),
            (Boost, KeyCode::ControlLeft),
        ];
        Self {
            keys: keys
                .into_iter()
                .map(|(action, code)| (action, PhysicalKey::Code(code)))
                .collect(),
        }
    }
}

impl Bindings {
    pub fn key_for(&self, action: ControlAction) -> Option<PhysicalKey> {
        self.keys
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, key)| *key)
    }
}

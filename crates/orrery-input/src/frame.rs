//! Per-frame input snapshot consumed by the orchestrator.

use glam::Vec2;
use orrery_camera::MoveIntent;

use crate::{Bindings, ControlAction, KeyboardState, MouseState};

/// Input for one frame, independent of winit event shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub quit: bool,
    pub reset_view: bool,
    pub movement: MoveIntent,
    /// Drag delta with +x right and +y up.
    pub look: Vec2,
    pub scroll: f32,
}

impl FrameInput {
    /// Snapshot the current state. Does not clear transients.
    pub fn gather(keyboard: &KeyboardState, mouse: &MouseState, bindings: &Bindings) -> Self {
        let held = |action| {
            bindings
                .key_for(action)
                .is_some_and(|key| keyboard.is_pressed(key))
        };
        let pressed = |action| {
            bindings
                .key_for(action)
                .is_some_and(|key| keyboard.just_pressed(key))
        };
        let drag = mouse.drag_delta();

        Self {
            quit: pressed(ControlAction::Quit),
            reset_view: pressed(ControlAction::ResetView),
            movement: MoveIntent {
                forward: held(ControlAction::Forward),
                backward: held(ControlAction::Backward),
                left: held(ControlAction::Left),
                right: held(ControlAction::Right),
                up: held(ControlAction::Up),
                down: held(ControlAction::Down),
                boost: held(ControlAction::Boost),
            },
            look: Vec2::new(drag.x, -drag.y),
            scroll: mouse.scroll(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawKeyEvent;
    use winit::event::{ElementState, MouseButton, MouseScrollDelta};
    use winit::keyboard::{KeyCode, PhysicalKey};

    fn press(kb: &mut KeyboardState, code: KeyCode) {
        kb.process_raw(RawKeyEvent {
            key: PhysicalKey::Code(code),
            state: ElementState::Pressed,
            repeat: false,
        });
    }

    #[test]
    fn test_idle_frame() {
        let input = FrameInput::gather(
            &KeyboardState::new(),
            &MouseState::default(),
            &Bindings::default(),
        );
        assert_eq!(input, FrameInput::default());
        assert!(input.movement.is_idle());
    }

    #[test]
    fn test_movement_keys_map_to_intent() {
        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::KeyW);
        press(&mut kb, KeyCode::KeyD);
        press(&mut kb, KeyCode::ControlLeft);
        kb.clear_transients();
        let input = FrameInput::gather(&kb, &MouseState::default(), &Bindings::default());
        assert!(input.movement.forward);
        assert!(input.movement.right);
        assert!(input.movement.boost);
        assert!(!input.movement.backward);
        assert!(!input.quit);
    }

    #[test]
    fn test_quit_and_reset_are_edge_triggered() {
        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::Escape);
        press(&mut kb, KeyCode::KeyR);
        let bindings = Bindings::default();
        let first = FrameInput::gather(&kb, &MouseState::default(), &bindings);
        assert!(first.quit);
        assert!(first.reset_view);
        kb.clear_transients();
        let second = FrameInput::gather(&kb, &MouseState::default(), &bindings);
        assert!(!second.quit);
        assert!(!second.reset_view);
    }

    #[test]
    fn test_look_is_y_up() {
        let mut mouse = MouseState::default();
        mouse.on_button(MouseButton::Left, ElementState::Pressed);
        mouse.on_cursor_moved(100.0, 100.0);
        mouse.on_cursor_moved(110.0, 90.0);
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, 2.0));
        let input = FrameInput::gather(&KeyboardState::new(), &mouse, &Bindings::default());
        assert_eq!(input.look, Vec2::new(10.0, 10.0));
        assert_eq!(input.scroll, 2.0);
    }
}

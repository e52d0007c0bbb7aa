//! Keyboard controller for the platformer
//!
//! Controls:
//! - Left/Right arrows or A/D: Walk
//! - Space, Up arrow or W: Hold to charge, release to jump
//! - R: Restart from spawn
//! - T: Restart the timer

use chargejump_core::FrameInput;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Held and latched key state between frames
#[derive(Clone, Debug, Default)]
pub struct KeyboardController {
    left_arrow: bool,
    right_arrow: bool,
    key_a: bool,
    key_d: bool,

    // Any of the three jump keys
    jump_space: bool,
    jump_up: bool,
    jump_w: bool,

    // Discrete triggers, consumed by `frame_input`
    restart_spawn_pressed: bool,
    restart_timer_pressed: bool,
}

impl KeyboardController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process keyboard input
    ///
    /// Returns true if the key is one the controller handles.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::ArrowLeft => { self.left_arrow = pressed; true }
            KeyCode::ArrowRight => { self.right_arrow = pressed; true }
            KeyCode::KeyA => { self.key_a = pressed; true }
            KeyCode::KeyD => { self.key_d = pressed; true }
            KeyCode::Space => { self.jump_space = pressed; true }
            KeyCode::ArrowUp => { self.jump_up = pressed; true }
            KeyCode::KeyW => { self.jump_w = pressed; true }
            KeyCode::KeyR => {
                if pressed {
                    self.restart_spawn_pressed = true;
                }
                true
            }
            KeyCode::KeyT => {
                if pressed {
                    self.restart_timer_pressed = true;
                }
                true
            }
            _ => false,
        }
    }

    /// Horizontal direction: -1, 0 or 1
    ///
    /// Both directions held cancel out.
    pub fn horizontal(&self) -> i8 {
        let left = self.left_arrow || self.key_a;
        let right = self.right_arrow || self.key_d;
        right as i8 - left as i8
    }

    pub fn jump_held(&self) -> bool {
        self.jump_space || self.jump_up || self.jump_w
    }

    /// Check if any walk key is pressed
    pub fn is_moving(&self) -> bool {
        self.horizontal() != 0
    }

    /// Build this frame's input, consuming the restart triggers
    pub fn frame_input(&mut self) -> FrameInput {
        let input = FrameInput {
            horizontal: self.horizontal(),
            jump_held: self.jump_held(),
            restart_from_spawn: self.restart_spawn_pressed,
            restart_timer: self.restart_timer_pressed,
        };
        self.restart_spawn_pressed = false;
        self.restart_timer_pressed = false;
        input
    }

    /// Forget every held key, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        *self = Self {
            restart_spawn_pressed: self.restart_spawn_pressed,
            restart_timer_pressed: self.restart_timer_pressed,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(controller: &mut KeyboardController, key: KeyCode) {
        controller.process_keyboard(key, ElementState::Pressed);
    }

    fn release(controller: &mut KeyboardController, key: KeyCode) {
        controller.process_keyboard(key, ElementState::Released);
    }

    #[test]
    fn test_horizontal_axis() {
        let mut controller = KeyboardController::new();
        assert_eq!(controller.horizontal(), 0);

        press(&mut controller, KeyCode::ArrowLeft);
        assert_eq!(controller.horizontal(), -1);

        press(&mut controller, KeyCode::KeyD);
        assert_eq!(controller.horizontal(), 0);

        release(&mut controller, KeyCode::ArrowLeft);
        assert_eq!(controller.horizontal(), 1);
        assert!(controller.is_moving());
    }

    #[test]
    fn test_jump_keys_share_held_state() {
        let mut controller = KeyboardController::new();
        press(&mut controller, KeyCode::Space);
        press(&mut controller, KeyCode::KeyW);
        release(&mut controller, KeyCode::Space);
        assert!(controller.jump_held());

        release(&mut controller, KeyCode::KeyW);
        assert!(!controller.jump_held());

        press(&mut controller, KeyCode::ArrowUp);
        assert!(controller.frame_input().jump_held);
    }

    #[test]
    fn test_restart_triggers_consumed_once() {
        let mut controller = KeyboardController::new();
        press(&mut controller, KeyCode::KeyR);
        release(&mut controller, KeyCode::KeyR);
        press(&mut controller, KeyCode::KeyT);

        let first = controller.frame_input();
        assert!(first.restart_from_spawn);
        assert!(first.restart_timer);

        let second = controller.frame_input();
        assert!(!second.restart_from_spawn);
        assert!(!second.restart_timer);
    }

    #[test]
    fn test_unhandled_key() {
        let mut controller = KeyboardController::new();
        assert!(!controller.process_keyboard(KeyCode::KeyQ, ElementState::Pressed));
        assert_eq!(controller.frame_input(), FrameInput::default());
    }

    #[test]
    fn test_release_all_keeps_pending_triggers() {
        let mut controller = KeyboardController::new();
        press(&mut controller, KeyCode::KeyA);
        press(&mut controller, KeyCode::Space);
        press(&mut controller, KeyCode::KeyT);

        controller.release_all();

        let input = controller.frame_input();
        assert_eq!(input.horizontal, 0);
        assert!(!input.jump_held);
        assert!(input.restart_timer);
    }
}

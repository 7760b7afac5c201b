use std::collections::HashSet;

/// Key and mouse-button types, re-exported from `winit` so callers don't
/// depend on it directly.
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// Snapshot of keyboard and mouse state, driven by the event loop.
///
/// The runner feeds winit events into the setters; everything else only
/// reads through the query helpers.
#[derive(Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_pos: Option<(f64, f64)>,
    mouse_delta: (f32, f32),
}

impl InputState {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.buttons_down.insert(button);
        } else {
            self.buttons_down.remove(&button);
        }
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Records a cursor move in client-area coordinates and accumulates the
    /// per-frame delta.  The first recorded position establishes the
    /// baseline and contributes no delta.
    pub fn set_mouse_position(&mut self, x: f64, y: f64) {
        if let Some((px, py)) = self.mouse_pos {
            self.mouse_delta.0 += (x - px) as f32;
            self.mouse_delta.1 += (y - py) as f32;
        }
        self.mouse_pos = Some((x, y));
    }

    pub fn mouse_position(&self) -> (f64, f64) {
        self.mouse_pos.unwrap_or_default()
    }

    /// Returns and resets the accumulated cursor movement in pixels.
    pub fn take_mouse_delta(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.mouse_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_state_tracks_press_and_release() {
        let mut input = InputState::new();
        assert!(!input.is_key_down(KeyCode::KeyW));
        input.set_key(KeyCode::KeyW, true);
        assert!(input.is_key_down(KeyCode::KeyW));
        input.set_key(KeyCode::KeyW, false);
        assert!(!input.is_key_down(KeyCode::KeyW));
    }

    #[test]
    fn first_cursor_position_produces_no_delta() {
        let mut input = InputState::new();
        input.set_mouse_position(640.0, 360.0);
        assert_eq!(input.take_mouse_delta(), (0.0, 0.0));
        assert_eq!(input.mouse_position(), (640.0, 360.0));
    }

    #[test]
    fn mouse_delta_accumulates_and_resets() {
        let mut input = InputState::new();
        input.set_mouse_position(10.0, 10.0);
        input.set_mouse_position(13.0, 11.0);
        input.set_mouse_position(15.0, 14.0);
        assert_eq!(input.take_mouse_delta(), (5.0, 4.0));
        assert_eq!(input.take_mouse_delta(), (0.0, 0.0));
        assert_eq!(input.mouse_position(), (15.0, 14.0));
    }

    #[test]
    fn button_state_tracks_press_and_release() {
        let mut input = InputState::new();
        input.set_button(MouseButton::Left, true);
        assert!(input.is_button_down(MouseButton::Left));
        input.set_button(MouseButton::Left, false);
        assert!(!input.is_button_down(MouseButton::Left));
    }
}

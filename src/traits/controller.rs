use glam::Vec2;
use winit::keyboard::KeyCode;

/// Controller - per-frame keyboard and pointer state
pub trait Controller {
    /// Check if key is currently down
    fn is_down(&self, key: KeyCode) -> bool;

    /// Check if key went down during this frame
    fn was_pressed(&self, key: KeyCode) -> bool;

    /// Check if the modifier key (Alt) is held
    fn modifier_down(&self) -> bool;

    /// Pointer position in screen pixels, if the pointer is over the window
    fn pointer_position(&self) -> Option<Vec2>;

    /// Keyboard input is captured elsewhere (e.g. a text field has focus)
    fn keyboard_locked(&self) -> bool {
        false
    }
}

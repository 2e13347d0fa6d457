//! Keyboard shortcuts

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Something the viewer can be asked to do from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    Quit,
    ResetView,
    ToggleWireframe,
    ToggleCullFace,
    ToggleFlatShading,
    ToggleAnimation,
    SpeedUp,
    SlowDown,
}

impl ViewerAction {
    /// Whether holding the key keeps firing the action
    pub fn repeats(self) -> bool {
        matches!(self, ViewerAction::SpeedUp | ViewerAction::SlowDown)
    }
}

/// Maps a physical key to its action
///
/// `+` and `-` share keys with `=` and `_` on US layouts; the keypad keys
/// work too.
pub fn action_for_key(key: KeyCode) -> Option<ViewerAction> {
    use ViewerAction::*;

    match key {
        KeyCode::Escape | KeyCode::KeyQ => Some(Quit),
        KeyCode::KeyR => Some(ResetView),
        KeyCode::KeyW => Some(ToggleWireframe),
        KeyCode::KeyB => Some(ToggleCullFace),
        KeyCode::KeyF => Some(ToggleFlatShading),
        KeyCode::KeyA => Some(ToggleAnimation),
        KeyCode::Equal | KeyCode::NumpadAdd => Some(SpeedUp),
        KeyCode::Minus | KeyCode::NumpadSubtract => Some(SlowDown),
        _ => None,
    }
}

/// Action for a key press; auto-repeat only drives the speed keys
pub fn action_for_press(key: KeyCode, repeat: bool) -> Option<ViewerAction> {
    action_for_key(key).filter(|action| !repeat || action.repeats())
}

/// Action for a key event; releases do nothing
pub fn action_for_event(event: &KeyEvent) -> Option<ViewerAction> {
    if event.state != ElementState::Pressed {
        return None;
    }
    match event.physical_key {
        PhysicalKey::Code(code) => action_for_press(code, event.repeat),
        PhysicalKey::Unidentified(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for_key(KeyCode::Escape), Some(ViewerAction::Quit));
        assert_eq!(action_for_key(KeyCode::KeyQ), Some(ViewerAction::Quit));
    }

    #[test]
    fn test_toggle_keys() {
        assert_eq!(action_for_key(KeyCode::KeyR), Some(ViewerAction::ResetView));
        assert_eq!(action_for_key(KeyCode::KeyW), Some(ViewerAction::ToggleWireframe));
        assert_eq!(action_for_key(KeyCode::KeyB), Some(ViewerAction::ToggleCullFace));
        assert_eq!(action_for_key(KeyCode::KeyF), Some(ViewerAction::ToggleFlatShading));
        assert_eq!(action_for_key(KeyCode::KeyA), Some(ViewerAction::ToggleAnimation));
    }

    #[test]
    fn test_speed_keys() {
        assert_eq!(action_for_key(KeyCode::Equal), Some(ViewerAction::SpeedUp));
        assert_eq!(action_for_key(KeyCode::NumpadAdd), Some(ViewerAction::SpeedUp));
        assert_eq!(action_for_key(KeyCode::Minus), Some(ViewerAction::SlowDown));
        assert_eq!(action_for_key(KeyCode::NumpadSubtract), Some(ViewerAction::SlowDown));
    }

    #[test]
    fn test_held_speed_keys_repeat() {
        assert_eq!(action_for_press(KeyCode::Equal, true), Some(ViewerAction::SpeedUp));
        assert_eq!(action_for_press(KeyCode::Minus, true), Some(ViewerAction::SlowDown));
    }

    #[test]
    fn test_held_toggle_keys_fire_once() {
        assert_eq!(action_for_press(KeyCode::KeyW, false), Some(ViewerAction::ToggleWireframe));
        assert_eq!(action_for_press(KeyCode::KeyW, true), None);
        assert_eq!(action_for_press(KeyCode::KeyA, true), None);
        assert_eq!(action_for_press(KeyCode::Escape, true), None);
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(action_for_key(KeyCode::KeyZ), None);
        assert_eq!(action_for_key(KeyCode::Space), None);
        assert_eq!(action_for_key(KeyCode::ShiftLeft), None);
    }
}

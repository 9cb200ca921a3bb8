//! Raw input state

/// Raw input state snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub mouse: MouseState,
    pub keyboard: KeyboardState,
}

/// Mouse input state
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    /// DPI-scaled logical coordinates; `None` once the cursor leaves the window
    pub screen_pos: Option<[f32; 2]>,
    /// Mouse button states
    pub buttons: MouseButtons,
}

/// State of all mouse buttons
#[derive(Debug, Clone, Default)]
pub struct MouseButtons {
    pub left: ButtonState,
    pub right: ButtonState,
    pub middle: ButtonState,
}

impl MouseButtons {
    /// Held buttons as short labels, e.g. "L R"
    pub fn down_labels(&self) -> String {
        [("L", self.left), ("M", self.middle), ("R", self.right)]
            .iter()
            .filter(|(_, state)| state.is_down())
            .map(|(label, _)| *label)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Button press state with edge detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    /// Pressed this frame (edge)
    JustPressed,
    /// Held down (multiple frames)
    Pressed,
    /// Released this frame (edge)
    JustReleased,
}

impl ButtonState {
    /// Advance state for next frame (transitions edges to steady states)
    pub fn advance(self) -> Self {
        match self {
            Self::JustPressed => Self::Pressed,
            Self::JustReleased => Self::Released,
            state => state,
        }
    }

    /// Returns true if button is currently down (just pressed or held)
    pub fn is_down(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }
}

/// Keyboard input state
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pub modifiers: Modifiers,
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl InputState {
    /// Creates a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all button states for next frame
    pub fn advance_frame(&mut self) {
        self.mouse.buttons.left = self.mouse.buttons.left.advance();
        self.mouse.buttons.right = self.mouse.buttons.right.advance();
        self.mouse.buttons.middle = self.mouse.buttons.middle.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_edges_settle() {
        assert_eq!(ButtonState::JustPressed.advance(), ButtonState::Pressed);
        assert_eq!(ButtonState::JustReleased.advance(), ButtonState::Released);
        assert!(ButtonState::Pressed.is_down());
        assert!(!ButtonState::JustReleased.is_down());
    }

    #[test]
    fn test_advance_frame_settles_all_buttons() {
        let mut state = InputState::new();
        state.mouse.buttons.left = ButtonState::JustPressed;
        state.mouse.buttons.middle = ButtonState::JustReleased;
        state.advance_frame();
        assert_eq!(state.mouse.buttons.left, ButtonState::Pressed);
        assert_eq!(state.mouse.buttons.middle, ButtonState::Released);
        assert_eq!(state.mouse.buttons.down_labels(), "L");
    }
}

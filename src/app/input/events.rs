//! Semantic input events

use super::state::Modifiers;

/// Semantic input events, in the order the window system delivered them
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed at a screen position
    Click {
        button: MouseButton,
        /// Screen position in logical pixels
        pos: [f32; 2],
        /// Which viewport was clicked (if any)
        viewport: Option<ViewportId>,
    },

    /// Mouse button released
    MouseUp { button: MouseButton },

    /// Cursor moved
    Hover {
        pos: [f32; 2],
        viewport: Option<ViewportId>,
    },

    /// Wheel scroll, in lines; positive y means away from the user
    Scroll {
        delta: [f32; 2],
        pos: [f32; 2],
        viewport: Option<ViewportId>,
    },

    /// Cursor left the window
    PointerLeft,

    /// Key pressed (repeats excluded)
    KeyPress { key: KeyCode, modifiers: Modifiers },
}

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(Self::Left),
            winit::event::MouseButton::Right => Some(Self::Right),
            winit::event::MouseButton::Middle => Some(Self::Middle),
            _ => None,
        }
    }
}

/// Viewport identifier for hit testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewportId(pub u32);

/// Keys the application binds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Escape,
    Tab,
    /// Reset view
    R,
    /// Center on selection
    C,
    /// `=`/`+` and keypad plus
    Plus,
    /// `-` and keypad minus
    Minus,
    Backquote,
    Other,
}

/// Convert from winit key code
impl From<winit::keyboard::KeyCode> for KeyCode {
    fn from(key: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as WK;
        match key {
            WK::Escape => Self::Escape,
            WK::Tab => Self::Tab,
            WK::KeyR => Self::R,
            WK::KeyC => Self::C,
            WK::Equal | WK::NumpadAdd => Self::Plus,
            WK::Minus | WK::NumpadSubtract => Self::Minus,
            WK::Backquote => Self::Backquote,
            _ => Self::Other,
        }
    }
}

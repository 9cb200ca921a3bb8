//! Raw input collection from winit events

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

use super::events::{InputEvent, KeyCode, MouseButton};
use super::state::{ButtonState, InputState, Modifiers};

/// Pixel-delta scrolling (touchpads) is converted to wheel lines at this rate
const PIXELS_PER_LINE: f32 = 20.0;

/// Collects raw input from winit events
///
/// Keeps a running [`InputState`] and queues one [`InputEvent`] per relevant
/// window event, preserving arrival order. Viewports are resolved later by
/// the [`super::InputContext`].
pub struct InputCollector {
    state: InputState,
    queue: Vec<InputEvent>,
    scale_factor: f32,
    /// Set while the pointer is over a floating egui window
    pointer_captured: bool,
}

impl InputCollector {
    /// Creates a new input collector
    pub fn new() -> Self {
        Self {
            state: InputState::new(),
            queue: Vec::new(),
            scale_factor: 1.0,
            pointer_captured: false,
        }
    }

    /// Update scale factor (DPI scaling)
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    /// Marks the pointer as owned by an overlay
    ///
    /// Presses and wheel movement are then not queued. Moves and releases
    /// still are, so a drag that started on a map can finish over a window.
    pub fn set_pointer_captured(&mut self, captured: bool) {
        self.pointer_captured = captured;
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved([position.x as f32, position.y as f32]);
            }

            WindowEvent::CursorLeft { .. } => self.cursor_left(),

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = MouseButton::from_winit(*button) {
                    self.mouse_button(button, *state == ElementState::Pressed);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(x, y) => [*x, *y],
                    MouseScrollDelta::PixelDelta(pos) => [
                        pos.x as f32 / PIXELS_PER_LINE,
                        pos.y as f32 / PIXELS_PER_LINE,
                    ],
                };
                self.wheel(lines);
            }

            WindowEvent::ModifiersChanged(modifiers_state) => {
                self.state.keyboard.modifiers = Modifiers {
                    shift: modifiers_state.state().shift_key(),
                    ctrl: modifiers_state.state().control_key(),
                    alt: modifiers_state.state().alt_key(),
                    meta: modifiers_state.state().super_key(),
                };
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.key(code.into(), event.state.is_pressed(), event.repeat);
                }
            }

            _ => {}
        }
    }

    /// Cursor moved to a physical window position
    pub fn cursor_moved(&mut self, physical: [f32; 2]) {
        let screen_pos = [physical[0] / self.scale_factor, physical[1] / self.scale_factor];
        self.state.mouse.screen_pos = Some(screen_pos);
        self.queue.push(InputEvent::Hover {
            pos: screen_pos,
            viewport: None,
        });
    }

    pub fn cursor_left(&mut self) {
        self.state.mouse.screen_pos = None;
        self.queue.push(InputEvent::PointerLeft);
    }

    pub fn mouse_button(&mut self, button: MouseButton, pressed: bool) {
        let button_state = if pressed {
            ButtonState::JustPressed
        } else {
            ButtonState::JustReleased
        };
        match button {
            MouseButton::Left => self.state.mouse.buttons.left = button_state,
            MouseButton::Right => self.state.mouse.buttons.right = button_state,
            MouseButton::Middle => self.state.mouse.buttons.middle = button_state,
        }

        if !pressed {
            self.queue.push(InputEvent::MouseUp { button });
        } else if self.pointer_captured {
            return;
        } else if let Some(pos) = self.state.mouse.screen_pos {
            self.queue.push(InputEvent::Click {
                button,
                pos,
                viewport: None,
            });
        }
    }

    /// Wheel movement in lines
    pub fn wheel(&mut self, lines: [f32; 2]) {
        if self.pointer_captured {
            return;
        }
        if let Some(pos) = self.state.mouse.screen_pos {
            self.queue.push(InputEvent::Scroll {
                delta: lines,
                pos,
                viewport: None,
            });
        }
    }

    /// Key transitions; only fresh presses are queued
    pub fn key(&mut self, key: KeyCode, pressed: bool, repeat: bool) {
        if pressed && !repeat {
            self.queue.push(InputEvent::KeyPress {
                key,
                modifiers: self.state.keyboard.modifiers,
            });
        }
    }

    /// Takes all events queued since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.queue)
    }

    /// Advance to next frame (transitions edge states to steady states)
    pub fn advance_frame(&mut self) {
        self.state.advance_frame();
    }

    /// Get current input state
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Clone current state for processing
    ///
    /// Cloned rather than taken so continuous state like mouse position survives.
    pub fn clone_state(&self) -> InputState {
        self.state.clone()
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

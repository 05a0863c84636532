use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::clock::Clock;
use super::input::GamepadButton;
use super::input_bridge::{InputEvent, Modifiers};
use crate::traits::{Platform, PlatformKey, PlatformMouseButton};

/// Wheel lines are reported in toolkit units; pixels are scaled down to match
const PIXELS_PER_LINE: f32 = 20.0;

/// Folds winit window events into a polled [`Platform`] snapshot
#[derive(Debug)]
pub struct WinitPlatform {
    pressed_keys: HashSet<PlatformKey>,
    pressed_buttons: HashSet<PlatformMouseButton>,
    mouse_position: Vec2,
    /// Wheel movement accumulated since the last `end_frame`
    wheel: f32,
    modifiers: Modifiers,
    clock: Clock,
}

impl WinitPlatform {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            pressed_buttons: HashSet::new(),
            mouse_position: Vec2::ZERO,
            wheel: 0.0,
            modifiers: Modifiers::default(),
            clock: Clock::new(),
        }
    }

    /// Update the snapshot and return the event-mode equivalent, if any
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                self.modifiers = Modifiers {
                    shift: state.shift_key(),
                    ctrl: state.control_key(),
                    alt: state.alt_key(),
                    logo: state.super_key(),
                };
                None
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let key = match event.physical_key {
                    PhysicalKey::Code(code) => Self::keycode_to_key(code),
                    PhysicalKey::Unidentified(_) => None,
                };
                let pressed = event.state == ElementState::Pressed;

                let Some(key) = key else {
                    // unmapped keys can still carry composed text
                    return event
                        .text
                        .as_ref()
                        .filter(|_| pressed)
                        .and_then(|text| text.chars().next())
                        .map(|ch| InputEvent::Text { ch });
                };

                let modifiers = self.modifiers;
                if pressed {
                    self.pressed_keys.insert(key);
                    Some(InputEvent::KeyDown { key, modifiers })
                } else {
                    self.pressed_keys.remove(&key);
                    Some(InputEvent::KeyUp { key, modifiers })
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = Self::mouse_button(*button)?;
                let Vec2 { x, y } = self.mouse_position;
                match state {
                    ElementState::Pressed => {
                        self.pressed_buttons.insert(button);
                        Some(InputEvent::MouseButtonDown { button, x, y })
                    }
                    ElementState::Released => {
                        self.pressed_buttons.remove(&button);
                        Some(InputEvent::MouseButtonUp { button, x, y })
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = Vec2::new(position.x as f32, position.y as f32);
                Some(InputEvent::MouseMove {
                    x: self.mouse_position.x,
                    y: self.mouse_position.y,
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_LINE,
                };
                self.wheel += delta;
                Some(InputEvent::Wheel { delta })
            }
            WindowEvent::Focused(false) => {
                self.clear_pressed();
                None
            }
            _ => None,
        }
    }

    /// Measure the frame time; call once before polling
    pub fn begin_frame(&mut self) {
        self.clock.tick();
    }

    /// Reset per-frame accumulators; call after the bridge has polled
    pub fn end_frame(&mut self) {
        self.wheel = 0.0;
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn clear_pressed(&mut self) {
        self.pressed_keys.clear();
        self.pressed_buttons.clear();
        self.modifiers = Modifiers::default();
    }

    fn keycode_to_key(code: KeyCode) -> Option<PlatformKey> {
        use PlatformKey as P;

        let key = match code {
            KeyCode::KeyA => P::A,
            KeyCode::KeyB => P::B,
            KeyCode::KeyC => P::C,
            KeyCode::KeyD => P::D,
            KeyCode::KeyE => P::E,
            KeyCode::KeyF => P::F,
            KeyCode::KeyG => P::G,
            KeyCode::KeyH => P::H,
            KeyCode::KeyI => P::I,
            KeyCode::KeyJ => P::J,
            KeyCode::KeyK => P::K,
            KeyCode::KeyL => P::L,
            KeyCode::KeyM => P::M,
            KeyCode::KeyN => P::N,
            KeyCode::KeyO => P::O,
            KeyCode::KeyP => P::P,
            KeyCode::KeyQ => P::Q,
            KeyCode::KeyR => P::R,
            KeyCode::KeyS => P::S,
            KeyCode::KeyT => P::T,
            KeyCode::KeyU => P::U,
            KeyCode::KeyV => P::V,
            KeyCode::KeyW => P::W,
            KeyCode::KeyX => P::X,
            KeyCode::KeyY => P::Y,
            KeyCode::KeyZ => P::Z,
            KeyCode::Digit0 => P::Digit0,
            KeyCode::Digit1 => P::Digit1,
            KeyCode::Digit2 => P::Digit2,
            KeyCode::Digit3 => P::Digit3,
            KeyCode::Digit4 => P::Digit4,
            KeyCode::Digit5 => P::Digit5,
            KeyCode::Digit6 => P::Digit6,
            KeyCode::Digit7 => P::Digit7,
            KeyCode::Digit8 => P::Digit8,
            KeyCode::Digit9 => P::Digit9,
            KeyCode::Space => P::Space,
            KeyCode::Quote => P::Apostrophe,
            KeyCode::Comma => P::Comma,
            KeyCode::Minus => P::Minus,
            KeyCode::Period => P::Period,
            KeyCode::Slash => P::Slash,
            KeyCode::Semicolon => P::Semicolon,
            KeyCode::Equal => P::Equal,
            KeyCode::BracketLeft => P::LeftBracket,
            KeyCode::BracketRight => P::RightBracket,
            KeyCode::Backslash => P::Backslash,
            KeyCode::Backquote => P::GraveAccent,
            KeyCode::ArrowUp => P::Up,
            KeyCode::ArrowDown => P::Down,
            KeyCode::ArrowLeft => P::Left,
            KeyCode::ArrowRight => P::Right,
            KeyCode::Home => P::Home,
            KeyCode::End => P::End,
            KeyCode::PageUp => P::PageUp,
            KeyCode::PageDown => P::PageDown,
            KeyCode::Delete => P::Delete,
            KeyCode::Backspace => P::Backspace,
            KeyCode::Enter => P::Enter,
            KeyCode::Tab => P::Tab,
            KeyCode::Insert => P::Insert,
            KeyCode::Escape => P::Escape,
            KeyCode::ShiftLeft => P::LeftShift,
            KeyCode::ShiftRight => P::RightShift,
            KeyCode::ControlLeft => P::LeftControl,
            KeyCode::ControlRight => P::RightControl,
            KeyCode::AltLeft => P::LeftAlt,
            KeyCode::AltRight => P::RightAlt,
            KeyCode::SuperLeft => P::LeftSuper,
            KeyCode::SuperRight => P::RightSuper,
            KeyCode::Numpad0 => P::Kp0,
            KeyCode::Numpad1 => P::Kp1,
            KeyCode::Numpad2 => P::Kp2,
            KeyCode::Numpad3 => P::Kp3,
            KeyCode::Numpad4 => P::Kp4,
            KeyCode::Numpad5 => P::Kp5,
            KeyCode::Numpad6 => P::Kp6,
            KeyCode::Numpad7 => P::Kp7,
            KeyCode::Numpad8 => P::Kp8,
            KeyCode::Numpad9 => P::Kp9,
            KeyCode::NumpadDecimal => P::KpDecimal,
            KeyCode::NumpadDivide => P::KpDivide,
            KeyCode::NumpadMultiply => P::KpMultiply,
            KeyCode::NumpadSubtract => P::KpSubtract,
            KeyCode::NumpadAdd => P::KpAdd,
            KeyCode::NumpadEnter => P::KpEnter,
            KeyCode::NumpadEqual => P::KpEqual,
            _ => return None,
        };
        Some(key)
    }

    fn mouse_button(button: MouseButton) -> Option<PlatformMouseButton> {
        match button {
            MouseButton::Left => Some(PlatformMouseButton::Left),
            MouseButton::Middle => Some(PlatformMouseButton::Middle),
            MouseButton::Right => Some(PlatformMouseButton::Right),
            _ => None,
        }
    }
}

impl Default for WinitPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for WinitPlatform {
    fn is_key_down(&self, key: PlatformKey) -> bool {
        self.pressed_keys.contains(&key)
    }

    fn is_mouse_button_down(&self, button: PlatformMouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    fn mouse_wheel(&self) -> f32 {
        self.wheel
    }

    /// winit has no gamepad support
    fn is_gamepad_button_down(&self, _pad: usize, _button: GamepadButton) -> bool {
        false
    }

    /// Seconds measured by the latest [`begin_frame`](WinitPlatform::begin_frame)
    fn delta_time(&self) -> f32 {
        self.clock.delta()
    }
}

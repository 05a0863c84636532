//! Platform input → toolkit input.
//!
//! Two modes share one key mapping: [`InputBridge::handle_event`] consumes
//! discrete events, [`InputBridge::update`] polls a [`Platform`] snapshot once
//! per frame. Polling synthesizes text only for keys that were not already
//! down on the previous poll, so holding a key never repeats characters.
//!
//! Polling also synthesizes [`MouseButton::Double`] from two left presses
//! close together in time and space. Event hosts report it directly with
//! [`InputEvent::DoubleClick`].

use std::collections::HashSet;

use glam::Vec2;

use crate::core::context::Context;
use crate::core::input::{GamepadButton, InputState, Key, MouseButton, MAX_GAMEPADS};
use crate::traits::{Platform, PlatformKey, PlatformMouseButton};

/// Longest gap between two left presses that still counts as a double click
pub const DOUBLE_CLICK_SECONDS: f32 = 0.3;

/// Farthest the pointer may travel between the presses of a double click
pub const DOUBLE_CLICK_DISTANCE: f32 = 4.0;

/// Modifier keys held when a key event was generated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub logo: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        logo: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };
}

/// A single platform input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown {
        key: PlatformKey,
        modifiers: Modifiers,
    },
    KeyUp {
        key: PlatformKey,
        modifiers: Modifiers,
    },
    MouseMove {
        x: f32,
        y: f32,
    },
    MouseButtonDown {
        button: PlatformMouseButton,
        x: f32,
        y: f32,
    },
    MouseButtonUp {
        button: PlatformMouseButton,
        x: f32,
        y: f32,
    },
    /// Vertical wheel, positive away from the user
    Wheel {
        delta: f32,
    },
    /// Composed character, forwarded as is
    Text {
        ch: char,
    },
    /// Second left press of a double click, for hosts that detect it natively
    DoubleClick {
        x: f32,
        y: f32,
    },
}

/// Toolkit keys driven by a platform key
fn map_key(key: PlatformKey, ctrl: bool) -> &'static [Key] {
    use PlatformKey as P;

    match key {
        P::LeftShift | P::RightShift => &[Key::Shift],
        P::LeftControl | P::RightControl => &[Key::Ctrl],
        P::Delete => &[Key::Del],
        P::Enter | P::KpEnter => &[Key::Enter],
        P::Tab => &[Key::Tab],
        P::Backspace => &[Key::Backspace],
        P::Up => &[Key::Up],
        P::Down => &[Key::Down],
        P::Left if ctrl => &[Key::TextWordLeft],
        P::Left => &[Key::Left],
        P::Right if ctrl => &[Key::TextWordRight],
        P::Right => &[Key::Right],
        P::Home => &[Key::TextStart, Key::ScrollStart],
        P::End => &[Key::TextEnd, Key::ScrollEnd],
        P::PageUp => &[Key::ScrollUp],
        P::PageDown => &[Key::ScrollDown],
        P::Insert => &[Key::TextInsertMode],
        P::C if ctrl => &[Key::Copy],
        P::X if ctrl => &[Key::Cut],
        P::V if ctrl => &[Key::Paste],
        P::Z if ctrl => &[Key::TextUndo],
        P::Y | P::R if ctrl => &[Key::TextRedo],
        P::A if ctrl => &[Key::TextSelectAll],
        P::B if ctrl => &[Key::TextLineStart],
        P::E if ctrl => &[Key::TextLineEnd],
        _ => &[],
    }
}

/// Character a printable key produces on the US layout
pub fn key_char(key: PlatformKey, shift: bool) -> Option<char> {
    use PlatformKey as P;

    let (plain, shifted) = match key {
        P::A => ('a', 'A'),
        P::B => ('b', 'B'),
        P::C => ('c', 'C'),
        P::D => ('d', 'D'),
        P::E => ('e', 'E'),
        P::F => ('f', 'F'),
        P::G => ('g', 'G'),
        P::H => ('h', 'H'),
        P::I => ('i', 'I'),
        P::J => ('j', 'J'),
        P::K => ('k', 'K'),
        P::L => ('l', 'L'),
        P::M => ('m', 'M'),
        P::N => ('n', 'N'),
        P::O => ('o', 'O'),
        P::P => ('p', 'P'),
        P::Q => ('q', 'Q'),
        P::R => ('r', 'R'),
        P::S => ('s', 'S'),
        P::T => ('t', 'T'),
        P::U => ('u', 'U'),
        P::V => ('v', 'V'),
        P::W => ('w', 'W'),
        P::X => ('x', 'X'),
        P::Y => ('y', 'Y'),
        P::Z => ('z', 'Z'),
        P::Digit1 => ('1', '!'),
        P::Digit2 => ('2', '@'),
        P::Digit3 => ('3', '#'),
        P::Digit4 => ('4', '$'),
        P::Digit5 => ('5', '%'),
        P::Digit6 => ('6', '^'),
        P::Digit7 => ('7', '&'),
        P::Digit8 => ('8', '*'),
        P::Digit9 => ('9', '('),
        P::Digit0 => ('0', ')'),
        P::Space => (' ', ' '),
        P::Apostrophe => ('\'', '"'),
        P::Comma => (',', '<'),
        P::Minus => ('-', '_'),
        P::Period => ('.', '>'),
        P::Slash => ('/', '?'),
        P::Semicolon => (';', ':'),
        P::Equal => ('=', '+'),
        P::LeftBracket => ('[', '{'),
        P::RightBracket => (']', '}'),
        P::Backslash => ('\\', '|'),
        P::GraveAccent => ('`', '~'),
        P::Kp0 => ('0', '0'),
        P::Kp1 => ('1', '1'),
        P::Kp2 => ('2', '2'),
        P::Kp3 => ('3', '3'),
        P::Kp4 => ('4', '4'),
        P::Kp5 => ('5', '5'),
        P::Kp6 => ('6', '6'),
        P::Kp7 => ('7', '7'),
        P::Kp8 => ('8', '8'),
        P::Kp9 => ('9', '9'),
        P::KpDecimal => ('.', '.'),
        P::KpDivide => ('/', '/'),
        P::KpMultiply => ('*', '*'),
        P::KpSubtract => ('-', '-'),
        P::KpAdd => ('+', '+'),
        P::KpEqual => ('=', '='),
        _ => return None,
    };

    Some(if shift { shifted } else { plain })
}

fn mouse_button(button: PlatformMouseButton) -> MouseButton {
    match button {
        PlatformMouseButton::Left => MouseButton::Left,
        PlatformMouseButton::Middle => MouseButton::Middle,
        PlatformMouseButton::Right => MouseButton::Right,
    }
}

/// Left-button history used to synthesize double clicks while polling
#[derive(Debug, Default, Clone)]
struct ClickTracker {
    left_down: bool,
    /// Where the last single press landed and the seconds elapsed since
    last_press: Option<(Vec2, f32)>,
}

impl ClickTracker {
    fn poll(&mut self, input: &mut InputState, down: bool, position: Vec2, elapsed: f32) {
        if let Some((_, since)) = &mut self.last_press {
            *since += elapsed;
        }
        let pressed = down && !self.left_down;
        self.left_down = down;

        if pressed {
            let double = self.last_press.take().is_some_and(|(at, since)| {
                since <= DOUBLE_CLICK_SECONDS && at.distance(position) <= DOUBLE_CLICK_DISTANCE
            });
            if double {
                input.button(MouseButton::Double, position.x, position.y, true);
            } else {
                self.last_press = Some((position, 0.0));
            }
        } else if !down {
            input.button(MouseButton::Double, position.x, position.y, false);
        }
    }
}

/// Feeds platform input into a context's input accumulator
#[derive(Debug, Default, Clone)]
pub struct InputBridge {
    /// Keys that were down at the previous poll
    previous: HashSet<PlatformKey>,
    clicks: ClickTracker,
}

impl InputBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one discrete event
    pub fn handle_event(context: &mut Context, event: &InputEvent) {
        let input = context.input_mut();

        match *event {
            InputEvent::KeyDown { key, modifiers } => {
                for &mapped in map_key(key, modifiers.ctrl) {
                    input.key(mapped, true);
                }
                if !modifiers.ctrl {
                    if let Some(ch) = key_char(key, modifiers.shift) {
                        input.unicode(ch);
                    }
                }
            }
            InputEvent::KeyUp { key, .. } => {
                // release whichever variant went down, ctrl may have changed since
                for &mapped in map_key(key, false).iter().chain(map_key(key, true)) {
                    input.key(mapped, false);
                }
            }
            InputEvent::MouseMove { x, y } => input.motion(x, y),
            InputEvent::MouseButtonDown { button, x, y } => {
                input.button(mouse_button(button), x, y, true)
            }
            InputEvent::MouseButtonUp { button, x, y } => {
                input.button(mouse_button(button), x, y, false);
                if button == PlatformMouseButton::Left {
                    input.button(MouseButton::Double, x, y, false);
                }
            }
            InputEvent::Wheel { delta } => input.scroll(Vec2::new(0.0, delta)),
            InputEvent::Text { ch } => input.unicode(ch),
            InputEvent::DoubleClick { x, y } => input.button(MouseButton::Double, x, y, true),
        }
    }

    /// Forward the full platform state for this frame
    pub fn update(&mut self, context: &mut Context, platform: &dyn Platform) {
        let down: HashSet<PlatformKey> = PlatformKey::ALL
            .into_iter()
            .filter(|&key| platform.is_key_down(key))
            .collect();
        let shift = down.iter().any(|key| key.is_shift());
        let ctrl = down.iter().any(|key| key.is_control());

        let mut keys = [false; Key::COUNT];
        for &key in &down {
            for &mapped in map_key(key, ctrl) {
                keys[mapped as usize] = true;
            }
        }

        let input = context.input_mut();
        for key in Key::ALL {
            input.key(key, keys[key as usize]);
        }

        if !ctrl {
            // table order keeps synthesized text deterministic
            for key in PlatformKey::ALL {
                if !down.contains(&key) || self.previous.contains(&key) {
                    continue;
                }
                if let Some(ch) = key_char(key, shift) {
                    input.unicode(ch);
                }
            }
        }

        let position = platform.mouse_position();
        input.motion(position.x, position.y);
        for button in [
            PlatformMouseButton::Left,
            PlatformMouseButton::Middle,
            PlatformMouseButton::Right,
        ] {
            let pressed = platform.is_mouse_button_down(button);
            input.button(mouse_button(button), position.x, position.y, pressed);
        }
        self.clicks.poll(
            input,
            platform.is_mouse_button_down(PlatformMouseButton::Left),
            position,
            platform.delta_time(),
        );

        let wheel = platform.mouse_wheel();
        if wheel != 0.0 {
            input.scroll(Vec2::new(0.0, wheel));
        }

        for pad in 0..MAX_GAMEPADS {
            for button in GamepadButton::ALL {
                input.gamepad_button(pad, button, platform.is_gamepad_button_down(pad, button));
            }
        }

        context.set_delta_time(platform.delta_time());
        self.previous = down;
    }

    /// Forget the previous key and click state, e.g. after focus loss
    pub fn reset(&mut self) {
        self.previous.clear();
        self.clicks = ClickTracker::default();
    }
}

/// Event-driven entry point; no-op when either argument is missing
pub fn handle_event(context: Option<&mut Context>, event: Option<&InputEvent>) {
    if let (Some(context), Some(event)) = (context, event) {
        InputBridge::handle_event(context, event);
    }
}

/// Poll-driven entry point; no-op when either argument is missing
pub fn update(
    bridge: &mut InputBridge,
    context: Option<&mut Context>,
    platform: Option<&dyn Platform>,
) {
    if let (Some(context), Some(platform)) = (context, platform) {
        bridge.update(context, platform);
    }
}

use glam::Vec2;

use crate::core::input::GamepadButton;

/// Platform-neutral key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformKey {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Space,
    Apostrophe,
    Comma,
    Minus,
    Period,
    Slash,
    Semicolon,
    Equal,
    LeftBracket,
    RightBracket,
    Backslash,
    GraveAccent,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Backspace,
    Enter,
    Tab,
    Insert,
    Escape,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,
    Kp0,
    Kp1,
    Kp2,
    Kp3,
    Kp4,
    Kp5,
    Kp6,
    Kp7,
    Kp8,
    Kp9,
    KpDecimal,
    KpDivide,
    KpMultiply,
    KpSubtract,
    KpAdd,
    KpEnter,
    KpEqual,
}

impl PlatformKey {
    pub const COUNT: usize = PlatformKey::KpEqual as usize + 1;

    /// Every key, in declaration order
    pub const ALL: [PlatformKey; PlatformKey::COUNT] = {
        use PlatformKey::*;
        [
            A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P, Q, R, S, T, U, V, W, X, Y, Z, Digit0,
            Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9, Space,
            Apostrophe, Comma, Minus, Period, Slash, Semicolon, Equal, LeftBracket, RightBracket,
            Backslash, GraveAccent, Up, Down, Left, Right, Home, End, PageUp, PageDown, Delete,
            Backspace, Enter, Tab, Insert, Escape, LeftShift, RightShift, LeftControl,
            RightControl, LeftAlt, RightAlt, LeftSuper, RightSuper, Kp0, Kp1, Kp2, Kp3, Kp4, Kp5,
            Kp6, Kp7, Kp8, Kp9, KpDecimal, KpDivide, KpMultiply, KpSubtract, KpAdd, KpEnter,
            KpEqual,
        ]
    };

    pub fn is_shift(self) -> bool {
        matches!(self, PlatformKey::LeftShift | PlatformKey::RightShift)
    }

    pub fn is_control(self) -> bool {
        matches!(self, PlatformKey::LeftControl | PlatformKey::RightControl)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformMouseButton {
    Left,
    Middle,
    Right,
}

/// Polled view of the platform's current input state
pub trait Platform {
    /// Whether `key` is held right now (state, not transition)
    fn is_key_down(&self, key: PlatformKey) -> bool;

    fn is_mouse_button_down(&self, button: PlatformMouseButton) -> bool;

    fn mouse_position(&self) -> Vec2;

    /// Signed wheel movement since the previous frame
    fn mouse_wheel(&self) -> f32;

    fn is_gamepad_button_down(&self, pad: usize, button: GamepadButton) -> bool;

    /// Seconds elapsed since the previous frame
    fn delta_time(&self) -> f32;
}

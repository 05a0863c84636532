use glam::Vec2;

/// Capacity of the per-frame text buffer in bytes
pub const INPUT_MAX: usize = 16;

/// Number of gamepads the accumulator tracks
pub const MAX_GAMEPADS: usize = 4;

/// Toolkit-level key identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Shift,
    Ctrl,
    Del,
    Enter,
    Tab,
    Backspace,
    Copy,
    Cut,
    Paste,
    Up,
    Down,
    Left,
    Right,
    TextInsertMode,
    TextReplaceMode,
    TextResetMode,
    TextLineStart,
    TextLineEnd,
    TextStart,
    TextEnd,
    TextUndo,
    TextRedo,
    TextSelectAll,
    TextWordLeft,
    TextWordRight,
    ScrollStart,
    ScrollEnd,
    ScrollDown,
    ScrollUp,
}

impl Key {
    pub const COUNT: usize = Key::ScrollUp as usize + 1;

    pub const ALL: [Key; Key::COUNT] = {
        use Key::*;
        [
            Shift, Ctrl, Del, Enter, Tab, Backspace, Copy, Cut, Paste, Up, Down, Left, Right,
            TextInsertMode, TextReplaceMode, TextResetMode, TextLineStart, TextLineEnd, TextStart,
            TextEnd, TextUndo, TextRedo, TextSelectAll, TextWordLeft, TextWordRight, ScrollStart,
            ScrollEnd, ScrollDown, ScrollUp,
        ]
    };
}

/// Toolkit-level mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Double,
}

impl MouseButton {
    pub const COUNT: usize = MouseButton::Double as usize + 1;
}

/// Gamepad buttons, shared by the toolkit and platform snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    X,
    Y,
    Lb,
    Rb,
    Back,
    Start,
}

impl GamepadButton {
    pub const COUNT: usize = GamepadButton::Start as usize + 1;

    pub const ALL: [GamepadButton; GamepadButton::COUNT] = [
        GamepadButton::Up,
        GamepadButton::Down,
        GamepadButton::Left,
        GamepadButton::Right,
        GamepadButton::A,
        GamepadButton::B,
        GamepadButton::X,
        GamepadButton::Y,
        GamepadButton::Lb,
        GamepadButton::Rb,
        GamepadButton::Back,
        GamepadButton::Start,
    ];
}

/// Down state plus the number of transitions seen this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub down: bool,
    pub clicked: u32,
}

impl KeyState {
    /// Returns true when the state actually changed
    fn set(&mut self, down: bool) -> bool {
        if self.down == down {
            return false;
        }
        self.down = down;
        self.clicked += 1;
        true
    }

    fn pressed(&self) -> bool {
        self.down && self.clicked > 0
    }

    fn released(&self) -> bool {
        !self.down && self.clicked > 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ButtonState {
    pub state: KeyState,
    pub clicked_pos: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct MouseState {
    pub buttons: [ButtonState; MouseButton::COUNT],
    pub pos: Vec2,
    pub prev: Vec2,
    pub delta: Vec2,
    pub scroll_delta: Vec2,
}

/// Button states of every tracked gamepad
#[derive(Debug, Clone, Default)]
pub struct Gamepads {
    pads: [[KeyState; GamepadButton::COUNT]; MAX_GAMEPADS],
}

impl Gamepads {
    /// Whether `button` went down this frame on `pad`, or on any pad for `None`
    pub fn is_button_pressed(&self, pad: Option<usize>, button: GamepadButton) -> bool {
        self.any(pad, |pad| pad[button as usize].pressed())
    }

    pub fn is_button_released(&self, pad: Option<usize>, button: GamepadButton) -> bool {
        self.any(pad, |pad| pad[button as usize].released())
    }

    pub fn is_button_down(&self, pad: Option<usize>, button: GamepadButton) -> bool {
        self.any(pad, |pad| pad[button as usize].down)
    }

    fn any(&self, pad: Option<usize>, f: impl Fn(&[KeyState; GamepadButton::COUNT]) -> bool) -> bool {
        match pad {
            Some(index) => self.pads.get(index).is_some_and(&f),
            None => self.pads.iter().any(f),
        }
    }

    fn begin(&mut self) {
        for pad in &mut self.pads {
            for button in pad.iter_mut() {
                button.clicked = 0;
            }
        }
    }
}

/// The toolkit's input accumulator.
///
/// Injection is only accepted between [`begin`](Self::begin) and
/// [`end`](Self::end); calls outside that window are dropped.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    open: bool,
    keys: [KeyState; Key::COUNT],
    mouse: MouseState,
    text: String,
    gamepads: Gamepads,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the accumulation phase and reset per-frame transitions
    pub fn begin(&mut self) {
        self.open = true;
        for key in &mut self.keys {
            key.clicked = 0;
        }
        for button in &mut self.mouse.buttons {
            button.state.clicked = 0;
        }
        self.mouse.scroll_delta = Vec2::ZERO;
        self.mouse.delta = Vec2::ZERO;
        self.mouse.prev = self.mouse.pos;
        self.text.clear();
        self.gamepads.begin();
    }

    pub fn end(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn accepting(&self, what: &str) -> bool {
        if !self.open {
            log::trace!("input closed, dropping {what}");
        }
        self.open
    }

    pub fn key(&mut self, key: Key, down: bool) {
        if self.accepting("key") {
            self.keys[key as usize].set(down);
        }
    }

    pub fn button(&mut self, button: MouseButton, x: f32, y: f32, down: bool) {
        if !self.accepting("button") {
            return;
        }
        let state = &mut self.mouse.buttons[button as usize];
        if state.state.set(down) {
            state.clicked_pos = Vec2::new(x, y);
        }
    }

    pub fn motion(&mut self, x: f32, y: f32) {
        if !self.accepting("motion") {
            return;
        }
        self.mouse.pos = Vec2::new(x, y);
        self.mouse.delta = self.mouse.pos - self.mouse.prev;
    }

    pub fn scroll(&mut self, delta: Vec2) {
        if self.accepting("scroll") {
            self.mouse.scroll_delta += delta;
        }
    }

    /// Append a character to this frame's text; dropped once the buffer is full
    pub fn unicode(&mut self, ch: char) {
        if !self.accepting("text") {
            return;
        }
        if self.text.len() + ch.len_utf8() <= INPUT_MAX {
            self.text.push(ch);
        }
    }

    /// ASCII convenience over [`unicode`](Self::unicode)
    pub fn char(&mut self, byte: u8) {
        self.unicode(byte as char);
    }

    pub fn gamepad_button(&mut self, pad: usize, button: GamepadButton, down: bool) {
        if !self.accepting("gamepad") {
            return;
        }
        if let Some(buttons) = self.gamepads.pads.get_mut(pad) {
            buttons[button as usize].set(down);
        }
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys[key as usize].down
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys[key as usize].pressed()
    }

    pub fn is_key_released(&self, key: Key) -> bool {
        self.keys[key as usize].released()
    }

    pub fn key_state(&self, key: Key) -> KeyState {
        self.keys[key as usize]
    }

    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.mouse.buttons[button as usize].state.down
    }

    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse.buttons[button as usize].state.pressed()
    }

    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse.pos
    }

    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse.delta
    }

    pub fn scroll_delta(&self) -> Vec2 {
        self.mouse.scroll_delta
    }

    /// Text typed during the current frame
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn gamepads(&self) -> &Gamepads {
        &self.gamepads
    }
}

use std::collections::HashSet;
use std::rc::Rc;

use glam::Vec2;
use gui_raster::core::{
    handle_event, update, BitmapFont, Context, GamepadButton, Image, InputBridge, InputEvent,
    Interpreter, Key, Modifiers, MouseButton,
};
use gui_raster::traits::{Font, Platform, PlatformKey, PlatformMouseButton};

/// Mock platform holding a fixed input snapshot
#[derive(Default)]
struct MockPlatform {
    keys: HashSet<PlatformKey>,
    buttons: HashSet<PlatformMouseButton>,
    position: Vec2,
    wheel: f32,
    pads: HashSet<(usize, GamepadButton)>,
    delta: f32,
}

impl MockPlatform {
    fn with_keys(keys: &[PlatformKey]) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl Platform for MockPlatform {
    fn is_key_down(&self, key: PlatformKey) -> bool {
        self.keys.contains(&key)
    }

    fn is_mouse_button_down(&self, button: PlatformMouseButton) -> bool {
        self.buttons.contains(&button)
    }

    fn mouse_position(&self) -> Vec2 {
        self.position
    }

    fn mouse_wheel(&self) -> f32 {
        self.wheel
    }

    fn is_gamepad_button_down(&self, pad: usize, button: GamepadButton) -> bool {
        self.pads.contains(&(pad, button))
    }

    fn delta_time(&self) -> f32 {
        self.delta
    }
}

fn context() -> (Rc<dyn Font>, Context) {
    let font: Rc<dyn Font> = Rc::new(BitmapFont::new());
    let ctx = Context::new(&font).unwrap();
    (font, ctx)
}

/// Close the frame the way a host does: render, which reopens input
fn next_frame(ctx: &mut Context) {
    let mut image = Image::new(1, 1);
    Interpreter::default().render(&mut image, ctx);
}

fn poll(bridge: &mut InputBridge, ctx: &mut Context, platform: &MockPlatform) {
    update(bridge, Some(ctx), Some(platform as &dyn Platform));
}

// ============================================================================
// Polling Tests
// ============================================================================

#[test]
fn test_held_key_emits_text_once() {
    let (_font, mut ctx) = context();
    let mut bridge = InputBridge::new();
    let held = MockPlatform::with_keys(&[PlatformKey::A]);

    poll(&mut bridge, &mut ctx, &held);
    poll(&mut bridge, &mut ctx, &held);
    assert_eq!(ctx.input().text(), "a");

    next_frame(&mut ctx);
    poll(&mut bridge, &mut ctx, &held);
    assert_eq!(ctx.input().text(), "");

    poll(&mut bridge, &mut ctx, &MockPlatform::default());
    next_frame(&mut ctx);
    poll(&mut bridge, &mut ctx, &held);
    assert_eq!(ctx.input().text(), "a");
}

#[test]
fn test_shift_selects_case_and_symbols() {
    let (_font, mut ctx) = context();
    let mut bridge = InputBridge::new();
    poll(
        &mut bridge,
        &mut ctx,
        &MockPlatform::with_keys(&[PlatformKey::LeftShift, PlatformKey::H, PlatformKey::Digit1]),
    );
    assert_eq!(ctx.input().text(), "H!");
    assert!(ctx.input().is_key_down(Key::Shift));
}

#[test]
fn test_simultaneous_presses_follow_table_order() {
    let (_font, mut ctx) = context();
    let mut bridge = InputBridge::new();
    poll(
        &mut bridge,
        &mut ctx,
        &MockPlatform::with_keys(&[PlatformKey::I, PlatformKey::H]),
    );
    assert_eq!(ctx.input().text(), "hi");
}

#[test]
fn test_ctrl_shortcuts_suppress_text() {
    let (_font, mut ctx) = context();
    let mut bridge = InputBridge::new();
    poll(
        &mut bridge,
        &mut ctx,
        &MockPlatform::with_keys(&[PlatformKey::RightControl, PlatformKey::C]),
    );
    assert!(ctx.input().is_key_down(Key::Copy));
    assert!(ctx.input().is_key_down(Key::Ctrl));
    assert_eq!(ctx.input().text(), "");
}

#[test]
fn test_ctrl_arrow_moves_by_word() {
    let (_font, mut ctx) = context();
    let mut bridge = InputBridge::new();
    poll(
        &mut bridge,
        &mut ctx,
        &MockPlatform::with_keys(&[PlatformKey::LeftControl, PlatformKey::Left]),
    );
    assert!(ctx.input().is_key_down(Key::TextWordLeft));
    assert!(!ctx.input().is_key_down(Key::Left));

    poll(&mut bridge, &mut ctx, &MockPlatform::with_keys(&[PlatformKey::Left]));
    assert!(!ctx.input().is_key_down(Key::TextWordLeft));
    assert!(ctx.input().is_key_down(Key::Left));
}

#[test]
fn test_home_drives_two_keys() {
    let (_font, mut ctx) = context();
    let mut bridge = InputBridge::new();
    poll(&mut bridge, &mut ctx, &MockPlatform::with_keys(&[PlatformKey::Home]));
    assert!(ctx.input().is_key_down(Key::TextStart));
    assert!(ctx.input().is_key_down(Key::ScrollStart));
}

#[test]
fn test_keypad_produces_digits() {
    let (_font, mut ctx) = context();
    let mut bridge = InputBridge::new();
    poll(
        &mut bridge,
        &mut ctx,
        &MockPlatform::with_keys(&[PlatformKey::Kp5, PlatformKey::KpEnter]),
    );
    assert_eq!(ctx.input().text(), "5");
    assert!(ctx.input().is_key_down(Key::Enter));
}

#[test]
fn test_mouse_state_forwarded() {
    let (_font, mut ctx) = context();
    let mut bridge = InputBridge::new();
    let platform = MockPlatform {
        buttons: [PlatformMouseButton::Left].into_iter().collect(),
        position: Vec2::new(12.0, 34.0),
        wheel: 2.0,
        ..MockPlatform::default()
    };
    poll(&mut bridge, &mut ctx, &platform);

    let input = ctx.input();
    assert_eq!(input.mouse_position(), Vec2::new(12.0, 34.0));
    assert!(input.is_mouse_down(MouseButton::Left));
    assert!(input.is_mouse_pressed(MouseButton::Left));
    assert!(!input.is_mouse_down(MouseButton::Right));
    assert_eq!(input.scroll_delta(), Vec2::new(0.0, 2.0));
}

#[test]
fn test_gamepad_buttons_forwarded_per_pad() {
    let (_font, mut ctx) = context();
    let mut bridge = InputBridge::new();
    let platform = MockPlatform {
        pads: [(1, GamepadButton::A)].into_iter().collect(),
        ..MockPlatform::default()
    };
    poll(&mut bridge, &mut ctx, &platform);

    let pads = ctx.input().gamepads();
    assert!(pads.is_button_pressed(Some(1), GamepadButton::A));
    assert!(!pads.is_button_pressed(Some(0), GamepadButton::A));
    assert!(pads.is_button_down(None, GamepadButton::A));
    assert!(!pads.is_button_down(None, GamepadButton::B));

    next_frame(&mut ctx);
    poll(&mut bridge, &mut ctx, &MockPlatform::default());
    assert!(ctx
        .input()
        .gamepads()
        .is_button_released(Some(1), GamepadButton::A));
}

#[test]
fn test_delta_time_forwarded() {
    let (_font, mut ctx) = context();
    let mut bridge = InputBridge::new();
    let platform = MockPlatform {
        delta: 0.016,
        ..MockPlatform::default()
    };
    poll(&mut bridge, &mut ctx, &platform);
    assert_eq!(ctx.delta_time(), 0.016);
}

#[test]
fn test_update_with_missing_arguments_is_noop() {
    let (_font, mut ctx) = context();
    let mut bridge = InputBridge::new();
    let platform = MockPlatform::with_keys(&[PlatformKey::A]);

    update(&mut bridge, None, Some(&platform as &dyn Platform));
    update(&mut bridge, Some(&mut ctx), None);
    assert_eq!(ctx.input().text(), "");
    assert!(!ctx.input().is_key_down(Key::Shift));

    // the skipped poll must not have recorded A as held
    poll(&mut bridge, &mut ctx, &platform);
    assert_eq!(ctx.input().text(), "a");
}

#[test]
fn test_reset_forgets_held_keys() {
    let (_font, mut ctx) = context();
    let mut bridge = InputBridge::new();
    let held = MockPlatform::with_keys(&[PlatformKey::Z]);

    poll(&mut bridge, &mut ctx, &held);
    next_frame(&mut ctx);
    bridge.reset();
    poll(&mut bridge, &mut ctx, &held);
    assert_eq!(ctx.input().text(), "z");
}

fn left_button(down: bool, x: f32, delta: f32) -> MockPlatform {
    MockPlatform {
        buttons: if down {
            [PlatformMouseButton::Left].into_iter().collect()
        } else {
            HashSet::new()
        },
        position: Vec2::new(x, 20.0),
        delta,
        ..MockPlatform::default()
    }
}

#[test]
fn test_two_quick_clicks_report_double() {
    let (_font, mut ctx) = context();
    let mut bridge = InputBridge::new();

    for down in [true, false] {
        poll(&mut bridge, &mut ctx, &left_button(down, 20.0, 0.05));
        assert!(!ctx.input().is_mouse_down(MouseButton::Double));
        next_frame(&mut ctx);
    }

    poll(&mut bridge, &mut ctx, &left_button(true, 21.0, 0.05));
    assert!(ctx.input().is_mouse_down(MouseButton::Double));
    assert!(ctx.input().is_mouse_pressed(MouseButton::Double));
    next_frame(&mut ctx);

    poll(&mut bridge, &mut ctx, &left_button(false, 21.0, 0.05));
    assert!(!ctx.input().is_mouse_down(MouseButton::Double));
}

#[test]
fn test_slow_clicks_stay_single() {
    let (_font, mut ctx) = context();
    let mut bridge = InputBridge::new();

    for down in [true, false, true] {
        poll(&mut bridge, &mut ctx, &left_button(down, 20.0, 0.25));
        next_frame(&mut ctx);
    }
    poll(&mut bridge, &mut ctx, &left_button(true, 20.0, 0.25));
    assert!(ctx.input().is_mouse_down(MouseButton::Left));
    assert!(!ctx.input().is_mouse_down(MouseButton::Double));
}

#[test]
fn test_reset_forgets_pending_click() {
    let (_font, mut ctx) = context();
    let mut bridge = InputBridge::new();

    poll(&mut bridge, &mut ctx, &left_button(true, 20.0, 0.05));
    poll(&mut bridge, &mut ctx, &left_button(false, 20.0, 0.05));
    bridge.reset();
    poll(&mut bridge, &mut ctx, &left_button(true, 20.0, 0.05));
    assert!(!ctx.input().is_mouse_down(MouseButton::Double));
}

// ============================================================================
// Event Tests
// ============================================================================

fn send(ctx: &mut Context, event: InputEvent) {
    handle_event(Some(ctx), Some(&event));
}

#[test]
fn test_key_events_produce_text() {
    let (_font, mut ctx) = context();
    send(
        &mut ctx,
        InputEvent::KeyDown {
            key: PlatformKey::A,
            modifiers: Modifiers::NONE,
        },
    );
    send(
        &mut ctx,
        InputEvent::KeyDown {
            key: PlatformKey::B,
            modifiers: Modifiers::SHIFT,
        },
    );
    send(&mut ctx, InputEvent::Text { ch: 'é' });
    assert_eq!(ctx.input().text(), "aBé");
}

#[test]
fn test_key_up_releases_ctrl_variant() {
    let (_font, mut ctx) = context();
    send(
        &mut ctx,
        InputEvent::KeyDown {
            key: PlatformKey::Right,
            modifiers: Modifiers::CTRL,
        },
    );
    assert!(ctx.input().is_key_down(Key::TextWordRight));
    assert_eq!(ctx.input().text(), "");

    // ctrl let go before the arrow
    send(
        &mut ctx,
        InputEvent::KeyUp {
            key: PlatformKey::Right,
            modifiers: Modifiers::NONE,
        },
    );
    assert!(!ctx.input().is_key_down(Key::TextWordRight));
    assert!(!ctx.input().is_key_down(Key::Right));
}

#[test]
fn test_mouse_events() {
    let (_font, mut ctx) = context();
    send(&mut ctx, InputEvent::MouseMove { x: 5.0, y: 6.0 });
    send(
        &mut ctx,
        InputEvent::MouseButtonDown {
            button: PlatformMouseButton::Right,
            x: 5.0,
            y: 6.0,
        },
    );
    send(&mut ctx, InputEvent::Wheel { delta: -1.0 });
    send(&mut ctx, InputEvent::Wheel { delta: -0.5 });

    let input = ctx.input();
    assert_eq!(input.mouse_position(), Vec2::new(5.0, 6.0));
    assert_eq!(input.mouse_delta(), Vec2::new(5.0, 6.0));
    assert!(input.is_mouse_down(MouseButton::Right));
    assert_eq!(input.scroll_delta(), Vec2::new(0.0, -1.5));

    send(
        &mut ctx,
        InputEvent::MouseButtonUp {
            button: PlatformMouseButton::Right,
            x: 5.0,
            y: 6.0,
        },
    );
    assert!(!ctx.input().is_mouse_down(MouseButton::Right));
}

#[test]
fn test_handle_event_with_missing_arguments_is_noop() {
    let (_font, mut ctx) = context();
    let event = InputEvent::Text { ch: 'q' };
    handle_event(None, Some(&event));
    handle_event(Some(&mut ctx), None);
    assert_eq!(ctx.input().text(), "");
}

#[test]
fn test_text_buffer_bounded() {
    let (_font, mut ctx) = context();
    for _ in 0..40 {
        send(&mut ctx, InputEvent::Text { ch: 'x' });
    }
    assert_eq!(ctx.input().text().len(), gui_raster::core::INPUT_MAX);
}

#[test]
fn test_double_click_event_until_left_release() {
    let (_font, mut ctx) = context();
    send(&mut ctx, InputEvent::DoubleClick { x: 3.0, y: 4.0 });
    assert!(ctx.input().is_mouse_down(MouseButton::Double));

    send(
        &mut ctx,
        InputEvent::MouseButtonUp {
            button: PlatformMouseButton::Right,
            x: 3.0,
            y: 4.0,
        },
    );
    assert!(ctx.input().is_mouse_down(MouseButton::Double));

    send(
        &mut ctx,
        InputEvent::MouseButtonUp {
            button: PlatformMouseButton::Left,
            x: 3.0,
            y: 4.0,
        },
    );
    assert!(!ctx.input().is_mouse_down(MouseButton::Double));
}

pub mod allocator;
pub mod clock;
pub mod command;
pub mod context;
pub mod font;
pub mod image;
pub mod input;
#[cfg(feature = "winit")]
pub mod input_adapter;
pub mod input_bridge;
pub mod interpreter;

pub use allocator::{BudgetAllocator, SystemAllocator};
pub use clock::Clock;
pub use command::{image_handle, Command, CommandQueue, CustomCallback, FontHandle, ImageHandle};
pub use context::{create, destroy, Context, Phase, UserFont, COMMAND_ARENA_BYTES};
pub use font::BitmapFont;
pub use self::image::Image;
pub use input::{GamepadButton, Gamepads, InputState, Key, MouseButton, INPUT_MAX, MAX_GAMEPADS};
#[cfg(feature = "winit")]
pub use input_adapter::WinitPlatform;
pub use input_bridge::{handle_event, key_char, update, InputBridge, InputEvent, Modifiers};
pub use interpreter::{render, Interpreter};

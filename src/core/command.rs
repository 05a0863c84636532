use std::any::Any;
use std::fmt;
use std::mem::size_of;
use std::rc::{Rc, Weak};

use glam::Vec2;

use crate::core::Image;
use crate::math::{GuiColor, GuiRect, IRect};
use crate::traits::{Allocator, Font};

/// Non-owning reference to a host font embedded in text commands
#[derive(Clone)]
pub struct FontHandle(Weak<dyn Font>);

impl FontHandle {
    pub fn new(font: &Rc<dyn Font>) -> Self {
        Self(Rc::downgrade(font))
    }

    /// `None` once the owner has dropped the font
    pub fn upgrade(&self) -> Option<Rc<dyn Font>> {
        self.0.upgrade()
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FontHandle")
            .field(&(self.0.strong_count() > 0))
            .finish()
    }
}

/// Non-owning reference to a host image embedded in image commands
#[derive(Debug, Clone)]
pub struct ImageHandle(Weak<Image>);

impl ImageHandle {
    pub fn upgrade(&self) -> Option<Rc<Image>> {
        self.0.upgrade()
    }
}

/// Wrap a host image for use in [`Command::Image`]
pub fn image_handle(image: &Rc<Image>) -> ImageHandle {
    ImageHandle(Rc::downgrade(image))
}

/// Callback invoked for [`Command::Custom`] with the target rectangle and payload
#[derive(Clone)]
pub struct CustomCallback(Rc<dyn Fn(IRect, &dyn Any)>);

impl CustomCallback {
    pub fn new(callback: impl Fn(IRect, &dyn Any) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    pub fn call(&self, rect: IRect, payload: &dyn Any) {
        (self.0)(rect, payload)
    }
}

impl fmt::Debug for CustomCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomCallback")
    }
}

/// Drawing instruction emitted by the layout engine
#[derive(Debug, Clone)]
pub enum Command {
    Nop,
    Scissor {
        rect: GuiRect,
    },
    Line {
        begin: Vec2,
        end: Vec2,
        thickness: f32,
        color: GuiColor,
    },
    /// Cubic Bezier from `begin` to `end`
    Curve {
        begin: Vec2,
        ctrl: [Vec2; 2],
        end: Vec2,
        thickness: f32,
        color: GuiColor,
    },
    Rect {
        rect: GuiRect,
        rounding: f32,
        thickness: f32,
        color: GuiColor,
    },
    RectFilled {
        rect: GuiRect,
        rounding: f32,
        color: GuiColor,
    },
    RectMultiColor {
        rect: GuiRect,
        left: GuiColor,
        top: GuiColor,
        bottom: GuiColor,
        right: GuiColor,
    },
    /// Circle or ellipse inscribed in `rect`
    Circle {
        rect: GuiRect,
        thickness: f32,
        color: GuiColor,
    },
    CircleFilled {
        rect: GuiRect,
        color: GuiColor,
    },
    /// Angles in radians
    Arc {
        center: Vec2,
        radius: f32,
        angles: [f32; 2],
        thickness: f32,
        color: GuiColor,
    },
    ArcFilled {
        center: Vec2,
        radius: f32,
        angles: [f32; 2],
        color: GuiColor,
    },
    Triangle {
        a: Vec2,
        b: Vec2,
        c: Vec2,
        thickness: f32,
        color: GuiColor,
    },
    TriangleFilled {
        a: Vec2,
        b: Vec2,
        c: Vec2,
        color: GuiColor,
    },
    Polygon {
        points: Vec<Vec2>,
        thickness: f32,
        color: GuiColor,
    },
    PolygonFilled {
        points: Vec<Vec2>,
        color: GuiColor,
    },
    Polyline {
        points: Vec<Vec2>,
        thickness: f32,
        color: GuiColor,
    },
    Text {
        font: FontHandle,
        rect: GuiRect,
        background: GuiColor,
        foreground: GuiColor,
        height: f32,
        text: Vec<u8>,
    },
    Image {
        rect: GuiRect,
        image: ImageHandle,
        /// Source x, y, w, h; zero w or h selects the whole image
        region: [u16; 4],
        color: GuiColor,
    },
    Custom {
        rect: GuiRect,
        callback: CustomCallback,
        payload: Rc<dyn Any>,
    },
    /// Tag this crate does not know how to draw
    Unknown {
        tag: u32,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Nop => "nop",
            Command::Scissor { .. } => "scissor",
            Command::Line { .. } => "line",
            Command::Curve { .. } => "curve",
            Command::Rect { .. } => "rect",
            Command::RectFilled { .. } => "rect_filled",
            Command::RectMultiColor { .. } => "rect_multi_color",
            Command::Circle { .. } => "circle",
            Command::CircleFilled { .. } => "circle_filled",
            Command::Arc { .. } => "arc",
            Command::ArcFilled { .. } => "arc_filled",
            Command::Triangle { .. } => "triangle",
            Command::TriangleFilled { .. } => "triangle_filled",
            Command::Polygon { .. } => "polygon",
            Command::PolygonFilled { .. } => "polygon_filled",
            Command::Polyline { .. } => "polyline",
            Command::Text { .. } => "text",
            Command::Image { .. } => "image",
            Command::Custom { .. } => "custom",
            Command::Unknown { .. } => "unknown",
        }
    }
}

impl Command {
    /// Bytes the command occupies in a queue, inline record plus owned buffers
    pub fn footprint(&self) -> usize {
        let owned = match self {
            Command::Polygon { points, .. }
            | Command::PolygonFilled { points, .. }
            | Command::Polyline { points, .. } => points.len() * size_of::<Vec2>(),
            Command::Text { text, .. } => text.len(),
            _ => 0,
        };
        size_of::<Command>() + owned
    }
}

/// Byte budget of a queue, backed by an allocator.
///
/// `capacity` starts at the reservation the owner already made; growth past
/// it is acquired here in `chunk`-sized steps and kept until [`release`].
///
/// [`release`]: Arena::release
struct Arena {
    allocator: Rc<dyn Allocator>,
    chunk: usize,
    capacity: usize,
    grown: usize,
    used: usize,
}

impl Arena {
    fn reserve(&mut self, bytes: usize) -> bool {
        let needed = self.used.saturating_add(bytes);
        if needed > self.capacity {
            let step = (needed - self.capacity).max(self.chunk);
            if !self.allocator.acquire(step) {
                return false;
            }
            log::trace!("command arena grew by {step} bytes");
            self.capacity += step;
            self.grown += step;
        }
        self.used = needed;
        true
    }

    fn release(&mut self) {
        if self.grown > 0 {
            log::trace!("releasing {} bytes of command arena growth", self.grown);
            self.allocator.release(self.grown);
            self.capacity -= self.grown;
            self.grown = 0;
        }
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        self.release();
    }
}

/// Per-frame command list, drained in emission order
#[derive(Default)]
pub struct CommandQueue {
    commands: Vec<Command>,
    arena: Option<Arena>,
}

impl CommandQueue {
    /// Unbounded queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue whose storage is charged to `allocator`.
    ///
    /// The first `reserved` bytes must already be held by the caller; beyond
    /// that the queue acquires at least `reserved` more at a time.
    pub fn with_allocator(allocator: Rc<dyn Allocator>, reserved: usize) -> Self {
        Self {
            commands: Vec::new(),
            arena: Some(Arena {
                allocator,
                chunk: reserved.max(1),
                capacity: reserved,
                grown: 0,
                used: 0,
            }),
        }
    }

    /// Append a command; `false` when the allocator refuses to grow the queue
    /// and the command was dropped
    pub fn push(&mut self, command: Command) -> bool {
        if let Some(arena) = &mut self.arena {
            if !arena.reserve(command.footprint()) {
                log::warn!(
                    "command queue out of memory, dropping {} command",
                    command.name()
                );
                return false;
            }
        }
        self.commands.push(command);
        true
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop every command; grown capacity is kept for the next frame
    pub fn clear(&mut self) {
        self.commands.clear();
        if let Some(arena) = &mut self.arena {
            arena.used = 0;
        }
    }

    /// Bytes charged to the queue's allocator beyond the initial reservation
    pub fn grown_bytes(&self) -> usize {
        self.arena.as_ref().map_or(0, |arena| arena.grown)
    }

    /// Clear and hand any growth back to the allocator
    pub fn release(&mut self) {
        self.clear();
        if let Some(arena) = &mut self.arena {
            arena.release();
        }
    }
}

impl fmt::Debug for CommandQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("CommandQueue");
        out.field("commands", &self.commands);
        if let Some(arena) = &self.arena {
            out.field("used", &arena.used)
                .field("capacity", &arena.capacity);
        }
        out.finish()
    }
}

impl<'a> IntoIterator for &'a CommandQueue {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<Command> for CommandQueue {
    fn extend<I: IntoIterator<Item = Command>>(&mut self, iter: I) {
        for command in iter {
            self.push(command);
        }
    }
}

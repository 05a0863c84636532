use std::fmt;
use std::mem::size_of;
use std::rc::Rc;

use crate::core::allocator::SystemAllocator;
use crate::core::command::{Command, CommandQueue, FontHandle};
use crate::core::input::InputState;
use crate::error::{ContextError, Result};
use crate::traits::{Allocator, Font};

/// Bytes reserved up front for the command list
pub const COMMAND_ARENA_BYTES: usize = 4 * 1024;

/// Measured once at creation to obtain the line height
const SAMPLE_TEXT: &[u8] = b"Hello World!";

/// Binding between a host font and the toolkit's measurement contract
pub struct UserFont {
    height: f32,
    width: Box<dyn Fn(&[u8]) -> f32>,
    handle: FontHandle,
}

impl UserFont {
    fn bind(font: &Rc<dyn Font>) -> Self {
        let handle = FontHandle::new(font);
        let weak = handle.clone();
        Self {
            height: font.measure_text(SAMPLE_TEXT).y as f32,
            width: Box::new(move |text| {
                weak.upgrade()
                    .map_or(0.0, |font| font.measure_text(text).x as f32)
            }),
            handle,
        }
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Width of exactly `text.len()` bytes; 0 once the font is gone
    pub fn width(&self, text: &[u8]) -> f32 {
        (self.width)(text)
    }

    pub fn handle(&self) -> &FontHandle {
        &self.handle
    }
}

impl fmt::Debug for UserFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserFont")
            .field("height", &self.height)
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

/// Which half of the frame the context is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InputOpen,
    Rendering,
}

/// GUI state owned by the host: input accumulator, command list and font binding.
///
/// Reservations made against the allocator are returned exactly once, either
/// by [`destroy`](Context::destroy) or when the context is dropped.
pub struct Context {
    input: InputState,
    commands: CommandQueue,
    font: UserFont,
    allocator: Rc<dyn Allocator>,
    reservations: Vec<(&'static str, usize)>,
    phase: Phase,
    delta_time: f32,
}

impl Context {
    /// Context bound to `font` without a memory budget.
    ///
    /// Only a weak reference to the font is kept: the caller must hold `font`
    /// for as long as text is measured or drawn, after which widths read 0.
    pub fn new(font: &Rc<dyn Font>) -> Result<Self> {
        Self::with_allocator(font, Rc::new(SystemAllocator))
    }

    pub fn with_allocator(font: &Rc<dyn Font>, allocator: Rc<dyn Allocator>) -> Result<Self> {
        let requests = [
            ("context", size_of::<Context>()),
            ("font record", size_of::<UserFont>()),
            ("command arena", COMMAND_ARENA_BYTES),
        ];

        let mut reservations = Vec::with_capacity(requests.len());
        for (what, bytes) in requests {
            if !allocator.acquire(bytes) {
                for &(_, granted) in reservations.iter().rev() {
                    allocator.release(granted);
                }
                log::warn!("context creation failed: {bytes} bytes for the {what} rejected");
                return Err(ContextError::AllocationFailed { what, bytes });
            }
            reservations.push((what, bytes));
        }

        let font = UserFont::bind(font);
        log::debug!("context created, line height {}", font.height());

        let mut input = InputState::new();
        input.begin();

        Ok(Self {
            input,
            commands: CommandQueue::with_allocator(allocator.clone(), COMMAND_ARENA_BYTES),
            font,
            allocator,
            reservations,
            phase: Phase::InputOpen,
            delta_time: 0.0,
        })
    }

    /// Tear down: close input, discard pending commands, return reservations
    pub fn destroy(mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.input.end();
        self.commands.release();
        for (what, bytes) in self.reservations.drain(..).rev() {
            log::trace!("releasing {bytes} bytes for the {what}");
            self.allocator.release(bytes);
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn commands(&self) -> &CommandQueue {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut CommandQueue {
        &mut self.commands
    }

    /// Queue a command as the layout engine would; `false` when the allocator
    /// refused the space and the command was dropped
    pub fn push(&mut self, command: Command) -> bool {
        self.commands.push(command)
    }

    pub fn font(&self) -> &UserFont {
        &self.font
    }

    pub fn font_handle(&self) -> FontHandle {
        self.font.handle().clone()
    }

    pub fn text_width(&self, text: &[u8]) -> f32 {
        self.font.width(text)
    }

    pub fn set_delta_time(&mut self, seconds: f32) {
        self.delta_time = seconds;
    }

    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub(crate) fn begin_render(&mut self) {
        self.input.end();
        self.phase = Phase::Rendering;
    }

    pub(crate) fn end_render(&mut self) {
        self.commands.clear();
        self.input.begin();
        self.phase = Phase::InputOpen;
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("phase", &self.phase)
            .field("commands", &self.commands.len())
            .field("font", &self.font)
            .field("reservations", &self.reservations)
            .finish_non_exhaustive()
    }
}

/// Create a context bound to `font`; `None` is rejected
pub fn create(font: Option<&Rc<dyn Font>>) -> Result<Context> {
    let font = font.ok_or(ContextError::MissingFont)?;
    Context::new(font)
}

/// Destroy a context; `None` is a no-op
pub fn destroy(context: Option<Context>) {
    if let Some(context) = context {
        context.destroy();
    }
}

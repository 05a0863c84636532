use std::cell::{Cell, RefCell};
use std::mem::size_of;
use std::rc::Rc;

use gui_raster::core::{
    create, destroy, BitmapFont, BudgetAllocator, Command, Context, Image, Interpreter, Phase,
    COMMAND_ARENA_BYTES,
};
use gui_raster::traits::{Allocator, Font};
use gui_raster::ContextError;

/// Mock allocator that rejects the nth request and logs every call
#[derive(Default)]
struct CountingAllocator {
    reject_at: Option<usize>,
    requests: Cell<usize>,
    acquired: RefCell<Vec<usize>>,
    released: RefCell<Vec<usize>>,
}

impl CountingAllocator {
    fn rejecting(index: usize) -> Self {
        Self {
            reject_at: Some(index),
            ..Self::default()
        }
    }

    fn outstanding(&self) -> isize {
        let acquired: usize = self.acquired.borrow().iter().sum();
        let released: usize = self.released.borrow().iter().sum();
        acquired as isize - released as isize
    }
}

impl Allocator for CountingAllocator {
    fn acquire(&self, bytes: usize) -> bool {
        let index = self.requests.get();
        self.requests.set(index + 1);
        if self.reject_at == Some(index) {
            return false;
        }
        self.acquired.borrow_mut().push(bytes);
        true
    }

    fn release(&self, bytes: usize) {
        self.released.borrow_mut().push(bytes);
    }
}

fn font() -> Rc<dyn Font> {
    Rc::new(BitmapFont::new())
}

// ============================================================================
// Creation Tests
// ============================================================================

#[test]
fn test_create_without_font_fails() {
    let err = create(None).unwrap_err();
    assert_eq!(err, ContextError::MissingFont);
}

#[test]
fn test_create_with_font_opens_input() {
    let font = font();
    let ctx = create(Some(&font)).unwrap();
    assert_eq!(ctx.phase(), Phase::InputOpen);
    assert!(ctx.input().is_open());
    assert_eq!(ctx.font().height(), 8.0);
}

#[test]
fn test_creation_reserves_three_records() {
    let allocator = Rc::new(CountingAllocator::default());
    let ctx = Context::with_allocator(&font(), allocator.clone()).unwrap();

    let acquired = allocator.acquired.borrow().clone();
    assert_eq!(acquired.len(), 3);
    assert_eq!(acquired[2], COMMAND_ARENA_BYTES);
    assert!(allocator.released.borrow().is_empty());
    drop(ctx);
}

#[test]
fn test_rejection_at_each_stage_unwinds() {
    let stages = ["context", "font record", "command arena"];
    for (index, expected) in stages.into_iter().enumerate() {
        let allocator = Rc::new(CountingAllocator::rejecting(index));
        let err = Context::with_allocator(&font(), allocator.clone()).unwrap_err();

        match err {
            ContextError::AllocationFailed { what, .. } => assert_eq!(what, expected),
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(allocator.acquired.borrow().len(), index);
        assert_eq!(allocator.outstanding(), 0, "stage {expected} leaked");
    }
}

#[test]
fn test_budget_too_small_for_arena() {
    let budget = Rc::new(BudgetAllocator::new(COMMAND_ARENA_BYTES));
    let err = Context::with_allocator(&font(), budget.clone()).unwrap_err();
    assert!(matches!(
        err,
        ContextError::AllocationFailed {
            what: "command arena",
            bytes: COMMAND_ARENA_BYTES
        }
    ));
    assert_eq!(budget.in_use(), 0);
    assert!(budget.peak() > 0);
}

// ============================================================================
// Teardown Tests
// ============================================================================

#[test]
fn test_destroy_releases_each_reservation_once() {
    let allocator = Rc::new(CountingAllocator::default());
    let ctx = Context::with_allocator(&font(), allocator.clone()).unwrap();
    ctx.destroy();

    let mut acquired = allocator.acquired.borrow().clone();
    let mut released = allocator.released.borrow().clone();
    acquired.sort_unstable();
    released.sort_unstable();
    assert_eq!(acquired, released);
}

#[test]
fn test_drop_releases_without_destroy() {
    let budget = Rc::new(BudgetAllocator::new(1 << 20));
    {
        let _ctx = Context::with_allocator(&font(), budget.clone()).unwrap();
        assert!(budget.in_use() >= COMMAND_ARENA_BYTES);
    }
    assert_eq!(budget.in_use(), 0);
}

#[test]
fn test_free_destroy_accepts_none() {
    destroy(None);

    let budget = Rc::new(BudgetAllocator::new(1 << 20));
    let ctx = Context::with_allocator(&font(), budget.clone()).unwrap();
    destroy(Some(ctx));
    assert_eq!(budget.in_use(), 0);
}

#[test]
fn test_destroy_discards_pending_commands() {
    let allocator = Rc::new(CountingAllocator::default());
    let mut ctx = Context::with_allocator(&font(), allocator.clone()).unwrap();
    ctx.push(Command::Nop);
    ctx.destroy();
    assert_eq!(allocator.outstanding(), 0);
}

// ============================================================================
// Command Arena Tests
// ============================================================================

#[test]
fn test_command_growth_charged_to_allocator() {
    let font = font();
    let budget = Rc::new(BudgetAllocator::new(1 << 20));
    let mut ctx = Context::with_allocator(&font, budget.clone()).unwrap();
    let baseline = budget.in_use();

    let fits = COMMAND_ARENA_BYTES / size_of::<Command>();
    for _ in 0..fits {
        assert!(ctx.push(Command::Nop));
    }
    assert_eq!(budget.in_use(), baseline);

    assert!(ctx.push(Command::Nop));
    assert_eq!(budget.in_use(), baseline + COMMAND_ARENA_BYTES);

    ctx.destroy();
    assert_eq!(budget.in_use(), 0);
}

#[test]
fn test_exhausted_budget_drops_commands() {
    let font = font();
    let allocator = Rc::new(CountingAllocator::rejecting(3));
    let mut ctx = Context::with_allocator(&font, allocator.clone()).unwrap();
    let outstanding = allocator.outstanding();

    let fits = COMMAND_ARENA_BYTES / size_of::<Command>();
    for _ in 0..fits {
        assert!(ctx.push(Command::Nop));
    }
    assert!(!ctx.push(Command::Nop));
    assert_eq!(ctx.commands().len(), fits);
    assert_eq!(allocator.outstanding(), outstanding);

    // the arena stays usable after a frame drains it
    let mut image = Image::new(1, 1);
    Interpreter::default().render(&mut image, &mut ctx);
    assert!(ctx.push(Command::Nop));

    ctx.destroy();
    assert_eq!(allocator.outstanding(), 0);
}

#[test]
fn test_fixed_budget_caps_queue_memory() {
    let font = font();
    let limit = Rc::new(BudgetAllocator::new(1 << 20));
    let baseline = {
        let sizing = Context::with_allocator(&font, limit.clone()).unwrap();
        let used = limit.in_use();
        drop(sizing);
        used
    };

    let budget = Rc::new(BudgetAllocator::new(baseline));
    let mut ctx = Context::with_allocator(&font, budget.clone()).unwrap();
    let mut accepted = 0;
    while ctx.push(Command::Nop) {
        accepted += 1;
        assert!(accepted <= COMMAND_ARENA_BYTES, "queue grew past its budget");
    }
    assert_eq!(budget.in_use(), baseline);
    assert_eq!(ctx.commands().len(), accepted);

    drop(ctx);
    assert_eq!(budget.in_use(), 0);
}

// ============================================================================
// Font Binding Tests
// ============================================================================

#[test]
fn test_width_measures_exact_length() {
    let font = font();
    let ctx = Context::new(&font).unwrap();
    assert_eq!(ctx.text_width(b"abc"), 24.0);
    assert_eq!(ctx.text_width(b"ab\0c"), 32.0);
    assert_eq!(ctx.text_width(b""), 0.0);
}

#[test]
fn test_width_zero_after_font_dropped() {
    let font = font();
    let ctx = Context::new(&font).unwrap();
    drop(font);
    assert_eq!(ctx.text_width(b"abc"), 0.0);
    assert!(ctx.font_handle().upgrade().is_none());
}

// ============================================================================
// Frame Phase Tests
// ============================================================================

#[test]
fn test_phase_cycles_through_render() {
    let font = font();
    let mut ctx = Context::new(&font).unwrap();
    ctx.input_mut().unicode('x');
    ctx.push(Command::Nop);

    let mut image = Image::new(4, 4);
    Interpreter::default().render(&mut image, &mut ctx);

    assert_eq!(ctx.phase(), Phase::InputOpen);
    assert!(ctx.commands().is_empty());
    assert_eq!(ctx.input().text(), "");
}

#[test]
fn test_delta_time_stored() {
    let font = font();
    let mut ctx = Context::new(&font).unwrap();
    assert_eq!(ctx.delta_time(), 0.0);
    ctx.set_delta_time(1.0 / 60.0);
    assert!((ctx.delta_time() - 1.0 / 60.0).abs() < f32::EPSILON);
}

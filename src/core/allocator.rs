use std::cell::Cell;

use crate::traits::Allocator;

/// Grants every request; used when the host supplies no allocator
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAllocator;

impl Allocator for SystemAllocator {
    fn acquire(&self, bytes: usize) -> bool {
        log::trace!("acquire {bytes} bytes");
        true
    }

    fn release(&self, bytes: usize) {
        log::trace!("release {bytes} bytes");
    }
}

/// Allocator with a hard byte limit that tracks what is outstanding
#[derive(Debug, Default)]
pub struct BudgetAllocator {
    limit: usize,
    in_use: Cell<usize>,
    peak: Cell<usize>,
}

impl BudgetAllocator {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            in_use: Cell::new(0),
            peak: Cell::new(0),
        }
    }

    pub fn in_use(&self) -> usize {
        self.in_use.get()
    }

    pub fn peak(&self) -> usize {
        self.peak.get()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Allocator for BudgetAllocator {
    fn acquire(&self, bytes: usize) -> bool {
        let Some(total) = self.in_use.get().checked_add(bytes) else {
            return false;
        };
        if total > self.limit {
            log::debug!("rejecting {bytes} bytes, {} of {} in use", self.in_use.get(), self.limit);
            return false;
        }
        self.in_use.set(total);
        self.peak.set(self.peak.get().max(total));
        true
    }

    fn release(&self, bytes: usize) {
        self.in_use.set(self.in_use.get().saturating_sub(bytes));
    }
}

// Shared test helpers: a per-thread counting allocator with one-shot
// failure injection, and logger setup.
#![allow(dead_code)]

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::ptr;
use std::sync::Once;

/// Forwards to `System` and keeps per-thread counts, so tests running in
/// parallel threads do not see each other's allocations.
pub struct CountingAlloc;

thread_local! {
    static ALLOCS: Cell<usize> = const { Cell::new(0) };
    static FREES: Cell<usize> = const { Cell::new(0) };
    static LIVE_BYTES: Cell<isize> = const { Cell::new(0) };
    // Number of allocations to let through before failing one.
    static FAIL_AFTER: Cell<Option<usize>> = const { Cell::new(None) };
}

fn should_fail() -> bool {
    FAIL_AFTER
        .try_with(|c| match c.get() {
            Some(0) => {
                c.set(None);
                true
            }
            Some(n) => {
                c.set(Some(n - 1));
                false
            }
            None => false,
        })
        .unwrap_or(false)
}

fn record(allocs: usize, frees: usize, bytes: isize) {
    let _ = ALLOCS.try_with(|c| c.set(c.get() + allocs));
    let _ = FREES.try_with(|c| c.set(c.get() + frees));
    let _ = LIVE_BYTES.try_with(|c| c.set(c.get() + bytes));
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if should_fail() {
            return ptr::null_mut();
        }
        let p = System.alloc(layout);
        if !p.is_null() {
            record(1, 0, layout.size() as isize);
        }
        p
    }

    unsafe fn dealloc(&self, p: *mut u8, layout: Layout) {
        System.dealloc(p, layout);
        record(0, 1, -(layout.size() as isize));
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    pub allocs: usize,
    pub frees: usize,
    pub live_bytes: isize,
}

impl Snapshot {
    pub fn now() -> Self {
        Snapshot {
            allocs: ALLOCS.with(Cell::get),
            frees: FREES.with(Cell::get),
            live_bytes: LIVE_BYTES.with(Cell::get),
        }
    }

    /// Counts accumulated since `earlier`.
    pub fn since(self, earlier: Snapshot) -> Snapshot {
        Snapshot {
            allocs: self.allocs - earlier.allocs,
            frees: self.frees - earlier.frees,
            live_bytes: self.live_bytes - earlier.live_bytes,
        }
    }
}

/// Let `n` allocations on this thread succeed, then fail the next one.
pub fn fail_after(n: usize) {
    FAIL_AFTER.with(|c| c.set(Some(n)));
}

pub fn disarm() {
    FAIL_AFTER.with(|c| c.set(None));
}

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once_force(|_| {
        let _ = env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .filter_module("chained_map", log::LevelFilter::Trace)
            .is_test(true)
            .parse_default_env()
            .try_init();
    });
}

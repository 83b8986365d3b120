use parking_lot::{Condvar, Mutex};
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::SeqCst;

/// Counting semaphore handing out execution slots
pub(super) struct Slots {
    free: Mutex<usize>,
    freed: Condvar,
}

impl Slots {
    pub(super) fn new(size: usize) -> Self {
        Self {
            free: Mutex::new(size),
            freed: Condvar::new(),
        }
    }

    /// Blocks until a slot is free or `closed` is set.
    /// Returns false (and takes no slot) if the pool was closed while waiting.
    pub(super) fn acquire(&self, closed: &AtomicBool) -> bool {
        let mut free = self.free.lock();
        loop {
            if closed.load(SeqCst) {
                return false;
            }
            if *free > 0 {
                *free -= 1;
                return true;
            }
            self.freed.wait(&mut free);
        }
    }

    pub(super) fn release(&self) {
        let mut free = self.free.lock();
        *free += 1;
        self.freed.notify_one();
    }

    /// Wakes every blocked `acquire` so it can re-check the closed flag.
    /// The flag must be set before calling this.
    pub(super) fn wake_all(&self) {
        let _free = self.free.lock();
        self.freed.notify_all();
    }
}

/// Counts outstanding submissions; `wait` returns once the count drops to zero
pub(super) struct WaitGroup {
    pending: Mutex<usize>,
    drained: Condvar,
}

impl WaitGroup {
    pub(super) fn new() -> Self {
        Self {
            pending: Mutex::new(0),
            drained: Condvar::new(),
        }
    }

    pub(super) fn add(&self) { *self.pending.lock() += 1; }

    pub(super) fn done(&self) {
        let mut pending = self.pending.lock();
        *pending -= 1;
        if *pending == 0 {
            self.drained.notify_all();
        }
    }

    pub(super) fn wait(&self) {
        let mut pending = self.pending.lock();
        while *pending > 0 {
            self.drained.wait(&mut pending);
        }
    }

    pub(super) fn pending(&self) -> usize { *self.pending.lock() }
}

use std::fmt::{Debug, Formatter};
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering::SeqCst;

/// Signed 64-bit counter, safe to share between threads without locking.
///
/// Every operation is a single atomic instruction, so concurrent callers never lose an update
/// and never observe a partially written value. Arithmetic wraps on overflow.
#[derive(Default)]
pub struct AtomicCounter(AtomicI64);

impl AtomicCounter {
    pub const fn new(initial: i64) -> Self { Self(AtomicI64::new(initial)) }

    pub fn value(&self) -> i64 { self.0.load(SeqCst) }

    /// Returns the value after the increment
    pub fn increment(&self) -> i64 { self.add(1) }

    /// Returns the value after the decrement
    pub fn decrement(&self) -> i64 { self.add(-1) }

    /// Returns the value after adding `delta`
    pub fn add(&self, delta: i64) -> i64 { self.0.fetch_add(delta, SeqCst).wrapping_add(delta) }

    pub fn reset(&self) { self.0.store(0, SeqCst) }

    /// Sets the value to `new` only if it currently equals `old`.
    /// Among many callers racing on the same `old`, exactly one wins.
    pub fn compare_and_swap(&self, old: i64, new: i64) -> bool {
        self.0.compare_exchange(old, new, SeqCst, SeqCst).is_ok()
    }
}

impl From<i64> for AtomicCounter {
    fn from(value: i64) -> Self { Self::new(value) }
}

impl Debug for AtomicCounter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AtomicCounter").field(&self.value()).finish()
    }
}

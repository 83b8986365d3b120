mod admission;
mod builder;
mod task_counter;

pub use builder::Builder;
pub use task_counter::TaskStats;

pub(crate) use task_counter::TaskCounter;

use crate::counter::AtomicCounter;
use crate::errors::{PoolError, PoolResult};
use crate::worker_pool::admission::{Slots, WaitGroup};
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::SeqCst;
use std::thread;

/// Bounded pool of OS threads.
///
/// At most `size` submitted tasks run at the same time; `submit` blocks the caller while all
/// slots are busy. Each admitted task runs on its own named thread. The task's result is used
/// for statistics only and is never returned to the submitter.
///
/// `close` stops admission and waits until every admitted task has finished.
/// It must not be called from inside a task of the same pool.
#[derive(Clone)]
pub struct WorkerPool(Arc<Inner>);

impl WorkerPool {
    pub fn new(size: usize) -> Self { Builder::new(size).build_unchecked() }

    pub fn builder(size: usize) -> Builder { Builder::new(size) }

    pub fn submit<F, E>(&self, task: F) -> PoolResult<()>
    where
        F: FnOnce() -> Result<(), E> + Send + 'static,
        E: Display,
    {
        let inner = &self.0;
        // register before checking the flag: close() either sees this registration or we see the flag
        let mut admission = Admission::register(inner.clone());
        if inner.is_closed() {
            return Err(PoolError::Closed);
        }
        if inner.size == 0 {
            return Err(PoolError::ZeroCapacity);
        }
        if !inner.slots.acquire(&inner.closed) {
            return Err(PoolError::Closed);
        }
        admission.holds_slot = true;

        let thread_id = inner.spawned.increment();
        let mut builder = thread::Builder::new().name(format!("{}-{thread_id}", inner.thread_name_prefix));
        if let Some(stack_size) = inner.stack_size {
            builder = builder.stack_size(stack_size);
        }
        builder.spawn(move || admission.run(task))?;
        Ok(())
    }

    pub fn close(&self) {
        let inner = &self.0;
        let first_close = inner.mark_closed();
        if first_close {
            log::debug!(
                "[WorkerPool][{}] closing: active_tasks={}, pending={}",
                inner.thread_name_prefix,
                inner.counter.in_progress(),
                inner.drain.pending()
            );
        }
        inner.slots.wake_all();
        inner.drain.wait();
        if first_close {
            log::debug!("[WorkerPool][{}] closed", inner.thread_name_prefix);
        }
    }

    pub fn active_tasks(&self) -> usize { self.0.counter.in_progress() }

    pub fn size(&self) -> usize { self.0.size }

    pub fn is_closed(&self) -> bool { self.0.is_closed() }

    pub fn stats(&self) -> TaskStats { self.0.counter.snapshot() }
}

impl Debug for WorkerPool {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("size", &self.0.size)
            .field("closed", &self.0.is_closed())
            .field("stats", &self.stats())
            .finish()
    }
}

struct Inner {
    size: usize,
    closed: AtomicBool,
    slots: Slots,
    drain: WaitGroup,
    counter: TaskCounter,
    spawned: AtomicCounter,
    thread_name_prefix: String,
    stack_size: Option<usize>,
}

impl Inner {
    fn is_closed(&self) -> bool { self.closed.load(SeqCst) }

    /// Returns true only for the call that actually closed the pool
    fn mark_closed(&self) -> bool { !self.closed.swap(true, SeqCst) }
}

/// One submission's claim on the pool: a drain registration plus (once acquired) a slot.
/// Dropping it gives both back, whichever way the submission ends.
struct Admission {
    inner: Arc<Inner>,
    holds_slot: bool,
}

impl Admission {
    fn register(inner: Arc<Inner>) -> Self {
        inner.drain.add();
        Self {
            inner,
            holds_slot: false,
        }
    }

    fn run<F, E>(self, task: F)
    where
        F: FnOnce() -> Result<(), E>,
        E: Display,
    {
        // the updater is dropped before `self`, so active_tasks is already decremented when close() wakes up
        let updater = self.inner.counter.task_started();
        match task() {
            Ok(()) => updater.task_done(),
            Err(err) => {
                log::debug!("[WorkerPool][{}] task failed: {err}", self.inner.thread_name_prefix);
                updater.task_failed();
            }
        }
    }
}

impl Drop for Admission {
    fn drop(&mut self) {
        if self.holds_slot {
            self.inner.slots.release();
        }
        self.inner.drain.done();
    }
}

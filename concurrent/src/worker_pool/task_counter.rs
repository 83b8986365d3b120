use crate::counter::AtomicCounter;
use std::fmt::{Display, Formatter};

#[derive(Default, Debug)]
pub(crate) struct TaskCounter {
    in_progress: AtomicCounter,
    done: AtomicCounter,
    failed: AtomicCounter,
}

impl TaskCounter {
    pub(crate) fn new() -> Self { Self::default() }

    /// Marks a task as started. The returned updater must be consumed by `task_done()` or
    /// `task_failed()`; if it is dropped instead (e.g. the task panicked), the task counts as failed.
    pub(crate) fn task_started(&'_ self) -> TaskCounterUpdater<'_> {
        self.in_progress.increment();
        TaskCounterUpdater {
            counter: self,
            finished: false,
        }
    }

    pub(crate) fn in_progress(&self) -> usize { usize::try_from(self.in_progress.value()).unwrap_or(0) }

    pub(crate) fn snapshot(&self) -> TaskStats {
        TaskStats {
            in_progress: self.in_progress(),
            done: self.done.value() as u64,
            failed: self.failed.value() as u64,
        }
    }
}

pub(crate) struct TaskCounterUpdater<'a> {
    counter: &'a TaskCounter,
    finished: bool,
}

impl TaskCounterUpdater<'_> {
    pub(crate) fn task_done(mut self) {
        let counter = self.counter;
        self.finish(&counter.done)
    }

    pub(crate) fn task_failed(mut self) {
        let counter = self.counter;
        self.finish(&counter.failed)
    }

    fn finish(&mut self, outcome: &AtomicCounter) {
        outcome.increment();
        self.counter.in_progress.decrement();
        self.finished = true;
    }
}

impl Drop for TaskCounterUpdater<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.counter.failed.increment();
        self.counter.in_progress.decrement();
    }
}

/// Point-in-time view of a pool's task accounting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub in_progress: usize,
    pub done: u64,
    pub failed: u64,
}

impl TaskStats {
    pub fn finished(&self) -> u64 { self.done + self.failed }
}

impl Display for TaskStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "WorkerPool Statistics")?;
        writeln!(f, "{}", "=".repeat(48))?;
        writeln!(f, "{:<15} {:<15} {:<15}", "InProgress", "Done Tasks", "Failed Tasks")?;
        writeln!(f, "{}", "-".repeat(48))?;
        writeln!(f, "{:<15} {:<15} {:<15}", self.in_progress, self.done, self.failed)?;
        writeln!(f, "{}", "=".repeat(48))
    }
}

use crate::bail_pool;
use crate::counter::AtomicCounter;
use crate::errors::PoolResult;
use crate::worker_pool::admission::{Slots, WaitGroup};
use crate::worker_pool::task_counter::TaskCounter;
use crate::worker_pool::{Inner, WorkerPool};
use derive_setters::Setters;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub(super) const DEFAULT_THREAD_NAME_PREFIX: &str = "worker-pool";

#[derive(Setters, Debug, Clone)]
#[setters(prefix = "with_", strip_option)]
pub struct Builder {
    #[setters(skip)]
    size: usize,
    #[setters(into)]
    thread_name_prefix: String,
    stack_size: Option<usize>,
}

impl Builder {
    pub(super) fn new(size: usize) -> Self {
        Self {
            size,
            thread_name_prefix: DEFAULT_THREAD_NAME_PREFIX.to_string(),
            stack_size: None,
        }
    }

    pub fn build(self) -> PoolResult<WorkerPool> {
        if self.thread_name_prefix.contains('\0') {
            bail_pool!("thread_name_prefix must not contain NUL bytes: {:?}", self.thread_name_prefix);
        }
        if self.stack_size == Some(0) {
            bail_pool!("stack_size must be greater than 0");
        }
        Ok(self.build_unchecked())
    }

    pub(super) fn build_unchecked(self) -> WorkerPool {
        if self.size == 0 {
            log::warn!("WorkerPool is configured with 0 slots (it won't run any tasks)");
        }
        log::debug!(
            "Creating WorkerPool: size={}, thread_name_prefix={}, stack_size={:?}",
            self.size,
            self.thread_name_prefix,
            self.stack_size,
        );
        let inner = Inner {
            size: self.size,
            closed: AtomicBool::new(false),
            slots: Slots::new(self.size),
            drain: WaitGroup::new(),
            counter: TaskCounter::new(),
            spawned: AtomicCounter::new(0),
            thread_name_prefix: self.thread_name_prefix,
            stack_size: self.stack_size,
        };
        WorkerPool(Arc::new(inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PoolError;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_builder_defaults() -> anyhow::Result<()> {
        let pool = WorkerPool::builder(3).build()?;
        assert_eq!(pool.size(), 3);
        assert_eq!(pool.active_tasks(), 0);
        assert!(!pool.is_closed());
        Ok(())
    }

    #[test]
    fn test_builder_setters() {
        let builder = WorkerPool::builder(2).with_thread_name_prefix("dispatcher").with_stack_size(256 * 1024);
        assert_eq!(builder.thread_name_prefix, "dispatcher");
        assert_eq!(builder.stack_size, Some(256 * 1024));
        assert_ok!(builder.build());
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let err = assert_err!(WorkerPool::builder(1).with_thread_name_prefix("bad\0prefix").build());
        assert!(matches!(err, PoolError::InvalidConfig(_)));

        let err = assert_err!(WorkerPool::builder(1).with_stack_size(0).build());
        assert!(matches!(err, PoolError::InvalidConfig(_)));
    }
}

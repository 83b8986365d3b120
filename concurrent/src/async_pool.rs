use crate::errors::{PoolError, PoolResult};
use crate::worker_pool::{TaskCounter, TaskStats};
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::SeqCst;
use tokio::runtime::Handle;
use tokio::sync::Semaphore;

/// Async flavour of [`WorkerPool`](crate::worker_pool::WorkerPool): futures instead of closures,
/// a tokio semaphore instead of blocking slot admission.
///
/// `submit` waits for a permit and spawns the future on the current tokio runtime;
/// `close` waits until every permit is back, i.e. every admitted future has completed.
#[derive(Clone)]
pub struct AsyncWorkerPool(Arc<Inner>);

struct Inner {
    size: usize,
    closed: AtomicBool,
    permits: Arc<Semaphore>,
    counter: TaskCounter,
}

impl AsyncWorkerPool {
    pub fn new(size: usize) -> Self {
        let max_size = Semaphore::MAX_PERMITS.min(u32::MAX as usize);
        if size > max_size {
            log::warn!("AsyncWorkerPool size {size} exceeds the semaphore limit, using {max_size}");
        }
        if size == 0 {
            log::warn!("AsyncWorkerPool is configured with 0 slots (it won't run any tasks)");
        }
        let size = size.min(max_size);
        let inner = Inner {
            size,
            closed: AtomicBool::new(false),
            permits: Arc::new(Semaphore::new(size)),
            counter: TaskCounter::new(),
        };
        Self(Arc::new(inner))
    }

    /// Spawns on the tokio runtime the caller is running in; outside of one it fails with `NoRuntime`
    pub async fn submit<F, E>(&self, task: F) -> PoolResult<()>
    where
        F: Future<Output = Result<(), E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        if self.is_closed() {
            return Err(PoolError::Closed);
        }
        if self.0.size == 0 {
            return Err(PoolError::ZeroCapacity);
        }
        let runtime = Handle::try_current()?;
        // fails only after close() has drained the pool and closed the semaphore
        let permit = self.0.permits.clone().acquire_owned().await.map_err(|_| PoolError::Closed)?;
        if self.is_closed() {
            return Err(PoolError::Closed);
        }

        let inner = self.0.clone();
        runtime.spawn(async move {
            let updater = inner.counter.task_started();
            match task.await {
                Ok(()) => updater.task_done(),
                Err(err) => {
                    log::debug!("[AsyncWorkerPool] task failed: {err}");
                    updater.task_failed();
                }
            }
            drop(permit);
        });
        Ok(())
    }

    pub async fn close(&self) {
        if !self.0.closed.swap(true, SeqCst) {
            log::debug!("[AsyncWorkerPool] closing: active_tasks={}", self.active_tasks());
        }
        // every admitted task holds one permit until it completes
        // fails if another close() has already drained the pool
        if let Ok(all) = self.0.permits.acquire_many(self.0.size as u32).await {
            self.0.permits.close();
            drop(all);
            log::debug!("[AsyncWorkerPool] closed");
        }
    }

    pub fn active_tasks(&self) -> usize { self.0.counter.in_progress() }

    pub fn size(&self) -> usize { self.0.size }

    pub fn is_closed(&self) -> bool { self.0.closed.load(SeqCst) }

    pub fn stats(&self) -> TaskStats { self.0.counter.snapshot() }
}

impl Debug for AsyncWorkerPool {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncWorkerPool")
            .field("size", &self.0.size)
            .field("closed", &self.is_closed())
            .field("stats", &self.stats())
            .finish()
    }
}

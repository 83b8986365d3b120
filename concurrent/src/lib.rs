pub mod async_pool;
pub mod counter;
pub mod errors;
pub mod worker_pool;

#[cfg(test)]
mod test_utils;

pub use async_pool::AsyncWorkerPool;
pub use counter::AtomicCounter;
pub use errors::{PoolError, PoolResult};
pub use worker_pool::{TaskStats, WorkerPool};

use thiserror::Error;

#[macro_export]
macro_rules! bail_pool {
    ($($arg:tt)*) => {
        return Err($crate::errors::PoolError::InvalidConfig(format!($($arg)*)))
    };
}

pub type PoolResult<T> = Result<T, PoolError>;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("pool is closed")]
    Closed,
    #[error("pool has no execution slots")]
    ZeroCapacity,
    #[error("InvalidConfig: {0}")]
    InvalidConfig(String),

    // handling system errors
    #[error("SpawnFailed: {0}")]
    SpawnFailed(#[from] std::io::Error),
    #[error("NoRuntime: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

impl PoolError {
    pub fn is_closed(&self) -> bool { matches!(self, PoolError::Closed) }
}

use infra_concurrent::{AsyncWorkerPool, AtomicCounter, PoolError, TaskStats, WorkerPool};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

// a request dispatcher capping concurrent handlers and counting served requests
#[test]
fn test_dispatcher_caps_handlers() -> anyhow::Result<()> {
    let pool = WorkerPool::builder(4).with_thread_name_prefix("dispatcher").build()?;
    let served = Arc::new(AtomicCounter::new(0));

    let sampler = {
        let pool = pool.clone();
        thread::spawn(move || {
            let mut max_seen = 0;
            while !pool.is_closed() {
                max_seen = max_seen.max(pool.active_tasks());
                thread::sleep(Duration::from_millis(1));
            }
            max_seen
        })
    };

    for request_id in 0..40 {
        let served = served.clone();
        pool.submit(move || {
            thread::sleep(Duration::from_millis(5));
            served.increment();
            if request_id % 10 == 0 { Err(format!("request {request_id} rejected")) } else { Ok(()) }
        })?;
    }
    pool.close();

    let max_seen = sampler.join().map_err(|_| anyhow::anyhow!("sampler panicked"))?;
    assert!(max_seen <= 4, "max_seen={max_seen}");
    assert_eq!(served.value(), 40);
    assert_eq!(pool.active_tasks(), 0);
    assert_eq!(pool.stats(), TaskStats { in_progress: 0, done: 36, failed: 4 });

    let err = assert_err!(pool.submit(|| Ok::<_, String>(())));
    assert!(matches!(err, PoolError::Closed));
    Ok(())
}

// first caller to claim the slot wins; the rest back off
#[test]
fn test_claim_with_compare_and_swap() {
    let pool = WorkerPool::new(8);
    let owner = Arc::new(AtomicCounter::new(0));
    let claims = Arc::new(AtomicCounter::new(0));

    for worker_id in 1..=32 {
        let (owner, claims) = (owner.clone(), claims.clone());
        assert_ok!(pool.submit(move || {
            if owner.compare_and_swap(0, worker_id) {
                claims.increment();
            }
            Ok::<_, String>(())
        }));
    }
    pool.close();

    assert_eq!(claims.value(), 1);
    assert!((1..=32).contains(&owner.value()));
}

#[test]
fn test_clones_share_lifecycle() {
    let pool = WorkerPool::new(1);
    let handle = pool.clone();
    handle.close();

    assert!(pool.is_closed());
    assert!(assert_err!(pool.submit(|| Ok::<_, String>(()))).is_closed());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_async_pool_drains_on_close() {
    let pool = AsyncWorkerPool::new(2);
    let finished = Arc::new(AtomicCounter::new(0));

    for _ in 0..10 {
        let finished = finished.clone();
        assert_ok!(
            pool.submit(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                finished.increment();
                Ok::<_, String>(())
            })
            .await
        );
    }
    pool.close().await;

    assert_eq!(finished.value(), 10);
    assert_eq!(pool.active_tasks(), 0);
    assert_eq!(pool.stats().finished(), 10);
}

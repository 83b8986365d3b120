mod benchmark_utils;
use benchmark_utils::cpu_task;
use criterion::{Criterion, criterion_group, criterion_main};
use infra_concurrent::{AsyncWorkerPool, WorkerPool};
use std::hint::black_box;

const TASKS_COUNT: usize = 200;
const POOL_SIZE: usize = 4;

// cargo bench --bench pool_submit
fn benchmark_functions(c: &mut Criterion) {
    run_bench!(c, worker_pool_submit_and_close);
    run_bench!(c, async_worker_pool_submit_and_close);
}

fn worker_pool_submit_and_close() {
    let pool = WorkerPool::new(POOL_SIZE);
    for _ in 0..TASKS_COUNT {
        pool.submit(cpu_task).unwrap();
    }
    pool.close();
    black_box(pool.stats());
}

fn async_worker_pool_submit_and_close() {
    let runtime =
        tokio::runtime::Builder::new_multi_thread().worker_threads(POOL_SIZE).enable_all().build().unwrap();
    runtime.block_on(async {
        let pool = AsyncWorkerPool::new(POOL_SIZE);
        for _ in 0..TASKS_COUNT {
            pool.submit(async { cpu_task() }).await.unwrap();
        }
        pool.close().await;
        black_box(pool.stats());
    });
}

criterion_group!(benches, benchmark_functions);
criterion_main!(benches);

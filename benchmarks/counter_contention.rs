mod benchmark_utils;
use criterion::{Criterion, criterion_group, criterion_main};
use infra_concurrent::AtomicCounter;
use std::hint::black_box;
use std::sync::Mutex;
use std::thread;

const THREADS_COUNT: usize = 8;
const OPS_PER_THREAD: usize = 1000;

// cargo bench --bench counter_contention
fn benchmark_functions(c: &mut Criterion) {
    run_bench!(c, increment_atomic_counter);
    run_bench!(c, increment_mutex_counter);
    run_bench!(c, claim_with_compare_and_swap);
}

fn increment_atomic_counter() {
    let counter = AtomicCounter::new(0);
    thread::scope(|s| {
        for _ in 0..THREADS_COUNT {
            s.spawn(|| {
                for _ in 0..OPS_PER_THREAD {
                    counter.increment();
                }
            });
        }
    });
    black_box(counter.value());
}

fn increment_mutex_counter() {
    let counter = Mutex::new(0i64);
    thread::scope(|s| {
        for _ in 0..THREADS_COUNT {
            s.spawn(|| {
                for _ in 0..OPS_PER_THREAD {
                    if let Ok(mut value) = counter.lock() {
                        *value += 1;
                    }
                }
            });
        }
    });
    black_box(counter.lock().map(|v| *v).unwrap_or_default());
}

fn claim_with_compare_and_swap() {
    let counter = AtomicCounter::new(0);
    thread::scope(|s| {
        for id in 1..=THREADS_COUNT as i64 {
            let counter = &counter;
            s.spawn(move || black_box(counter.compare_and_swap(0, id)));
        }
    });
    black_box(counter.value());
}

criterion_group!(benches, benchmark_functions);
criterion_main!(benches);

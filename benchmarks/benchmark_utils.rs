use std::hint::black_box;

#[macro_export]
macro_rules! run_bench {
    ($c:expr, $func:ident) => {
        $c.bench_function(stringify!($func), |b| b.iter($func));
    };
}

/// Small CPU-bound unit of work, so pool benchmarks measure more than thread handoff
#[allow(unused)] // used by some of the benchmark modules only
pub fn cpu_task() -> Result<(), String> {
    fn fibonacci(n: u64) -> u64 {
        if n < 2 {
            return n;
        }
        fibonacci(n - 1) + fibonacci(n - 2)
    }
    black_box(fibonacci(black_box(13)));
    Ok(())
}

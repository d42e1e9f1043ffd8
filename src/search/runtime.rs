//! Execution backends for partitioned searches.
//!
//! A [`ParallelRuntime`] decides how many partitions a search is split into and how the
//! per-partition jobs run. [`SerialRuntime`] evaluates them one after another on the calling
//! thread; [`ThreadPoolRuntime`] fans them out over a rayon thread pool. Both return results
//! in job-submission order, which the search relies on to reassemble the misfit matrix.

use rayon::prelude::*;

/// Strategy running a batch of independent jobs and returning their results in order.
pub trait ParallelRuntime {
    /// Number of partitions the workload is split into.
    fn size(&self) -> usize;

    /// Run every job, returning results in the order the jobs were given.
    fn run<T, F>(&self, jobs: Vec<F>) -> Vec<T>
    where
        T: Send,
        F: FnOnce() -> T + Send;
}

/// Single-partition runtime: jobs run sequentially on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialRuntime;

impl ParallelRuntime for SerialRuntime {
    fn size(&self) -> usize {
        1
    }

    fn run<T, F>(&self, jobs: Vec<F>) -> Vec<T>
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        jobs.into_iter().map(|job| job()).collect()
    }
}

/// Rayon-backed runtime: one partition per worker.
#[derive(Debug, Clone, Copy)]
pub struct ThreadPoolRuntime {
    workers: usize,
}

impl ThreadPoolRuntime {
    /// A runtime with `workers` partitions, clamped to at least one.
    pub fn new(workers: usize) -> Self {
        ThreadPoolRuntime {
            workers: workers.max(1),
        }
    }
}

impl ParallelRuntime for ThreadPoolRuntime {
    fn size(&self) -> usize {
        self.workers
    }

    fn run<T, F>(&self, jobs: Vec<F>) -> Vec<T>
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        // collect() on an indexed parallel iterator preserves submission order
        jobs.into_par_iter().map(|job| job()).collect()
    }
}

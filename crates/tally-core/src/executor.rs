//! Worker pool and join-all task groups
//!
//! A run owns one rayon pool. Everything inside it (per-class counting,
//! chunked reductions and whole variable pipelines) shares the same workers,
//! so nested parallelism never oversubscribes the machine.

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Result, TallyError};

/// An independent unit of work
pub type Task<'a, T> = Box<dyn FnOnce() -> T + Send + 'a>;

/// Run every task concurrently and wait for all of them
///
/// Results come back in submission order. Runs on the current rayon pool.
pub fn join_all<'a, T: Send>(tasks: Vec<Task<'a, T>>) -> Vec<T> {
    let mut slots: Vec<Option<T>> = tasks.iter().map(|_| None).collect();

    rayon::scope(|scope| {
        for (slot, task) in slots.iter_mut().zip(tasks) {
            scope.spawn(move |_| *slot = Some(task()));
        }
    });

    // The scope returns only once every task has filled its slot
    slots.into_iter().flatten().collect()
}

/// A dedicated worker pool
pub struct Executor {
    pool: ThreadPool,
}

impl Executor {
    /// Build a pool of `threads` workers; 0 lets rayon choose
    pub fn new(threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("tally-worker-{i}"))
            .build()
            .map_err(|e| TallyError::ThreadPool(e.to_string()))?;

        tracing::debug!(workers = pool.current_num_threads(), "worker pool ready");
        Ok(Self { pool })
    }

    /// Number of worker threads
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `op` inside the pool
    pub fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        self.pool.install(op)
    }

    /// [`join_all`] inside the pool
    pub fn join_all<'a, T: Send>(&self, tasks: Vec<Task<'a, T>>) -> Vec<T> {
        self.pool.install(|| join_all(tasks))
    }
}

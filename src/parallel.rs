//! Fixed-size worker pool.

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Result;

/// A pool of worker threads that runs one closure per worker and joins.
///
/// # Examples
///
/// ```
/// use u_mdvrp::parallel::WorkerPool;
///
/// let pool = WorkerPool::new(3).unwrap();
/// let ids = pool.broadcast(|worker| worker * 10);
/// assert_eq!(ids, vec![0, 10, 20]);
/// ```
pub struct WorkerPool {
    inner: ThreadPool,
    num_workers: usize,
}

impl WorkerPool {
    /// Creates a pool with `num_workers` threads.
    pub fn new(num_workers: usize) -> Result<Self> {
        let inner = ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .thread_name(|i| format!("mdvrp-worker-{i}"))
            .build()?;
        Ok(Self { inner, num_workers })
    }

    /// Number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Runs `op` once on every worker with the worker's index and blocks
    /// until all have finished. Results are ordered by worker index.
    ///
    /// A panic in any worker is resumed on the calling thread.
    pub fn broadcast<OP, R>(&self, op: OP) -> Vec<R>
    where
        OP: Fn(usize) -> R + Sync,
        R: Send,
    {
        self.inner.broadcast(|ctx| op(ctx.index()))
    }
}

/// The units of `0..total` assigned to `worker` when striding over
/// `num_workers` workers.
pub fn partition(total: usize, num_workers: usize, worker: usize) -> impl Iterator<Item = usize> {
    (worker..total).step_by(num_workers.max(1))
}

/// How many of `total` units `worker` gets when spreading them evenly.
pub fn share(total: usize, num_workers: usize, worker: usize) -> usize {
    let num_workers = num_workers.max(1);
    total / num_workers + usize::from(worker < total % num_workers)
}

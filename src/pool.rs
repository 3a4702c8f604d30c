use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info, warn};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("pool closed")]
    Closed,
    #[error("a worker pool needs at least one thread")]
    NoWorkers,
    #[error("failed to spawn a worker thread")]
    Spawn(#[source] std::io::Error),
    #[error("task panicked: {message}")]
    TaskPanicked { message: String },
    #[error("task was dropped before reporting a result")]
    TaskLost,
}

/// Resolves to the result of one submitted task.
#[must_use = "dropping a handle discards the task's result and any failure"]
pub struct TaskHandle<T> {
    rx: mpsc::Receiver<thread::Result<T>>,
}

impl<T> TaskHandle<T> {
    /// Blocks until the task has run.
    pub fn wait(self) -> Result<T, PoolError> {
        match self.rx.recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(payload)) => Err(PoolError::TaskPanicked {
                message: panic_message(payload),
            }),
            Err(_) => Err(PoolError::TaskLost),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

type Job = Box<dyn FnOnce() + Send + 'static>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct Progress {
    queued: usize,
    active: usize,
}

/// Task counts shared with the workers; `finished` is signalled whenever a
/// task completes.
#[derive(Default)]
struct Shared {
    progress: Mutex<Progress>,
    finished: Condvar,
}

fn worker_loop(jobs: Receiver<Job>, shared: Arc<Shared>) {
    // ends once the queue is empty and the sender is gone
    for job in jobs.iter() {
        {
            let mut progress = lock(&shared.progress);
            progress.queued -= 1;
            progress.active += 1;
        }
        job();
        lock(&shared.progress).active -= 1;
        shared.finished.notify_all();
    }
}

/// Fixed set of persistent worker threads fed from one FIFO queue.
///
/// The pool is either running or closed. Closing drains every task that was
/// already queued and joins all workers before returning, and dropping the
/// pool closes it.
pub struct WorkerPool {
    // None once closed
    sender: Mutex<Option<Sender<Job>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    shared: Arc<Shared>,
    size: usize,
}

impl WorkerPool {
    pub fn new(n_workers: usize) -> Result<Self, PoolError> {
        if n_workers == 0 {
            return Err(PoolError::NoWorkers);
        }
        let (tx, rx) = unbounded::<Job>();
        let shared = Arc::new(Shared::default());
        let mut workers = Vec::with_capacity(n_workers);
        for i in 0..n_workers {
            let jobs = rx.clone();
            let shared = Arc::clone(&shared);
            let spawned = thread::Builder::new()
                .name(format!("render-worker-{}", i))
                .spawn(move || worker_loop(jobs, shared));
            match spawned {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    drop(tx);
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(PoolError::Spawn(e));
                }
            }
        }
        info!("started worker pool with {} threads", n_workers);
        Ok(Self {
            sender: Mutex::new(Some(tx)),
            workers: Mutex::new(workers),
            shared,
            size: n_workers,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_closed(&self) -> bool {
        lock(&self.sender).is_none()
    }

    pub fn queued_count(&self) -> usize {
        lock(&self.shared.progress).queued
    }

    pub fn active_count(&self) -> usize {
        lock(&self.shared.progress).active
    }

    /// Queues `task` behind everything submitted before it.
    ///
    /// A panic inside the task is caught and reported through the handle.
    pub fn submit<F, T>(&self, task: F) -> Result<TaskHandle<T>, PoolError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let guard = lock(&self.sender);
        let sender = guard.as_ref().ok_or(PoolError::Closed)?;
        let (tx, rx) = mpsc::channel();
        let job: Job = Box::new(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(task));
            // the handle may have been dropped
            let _ = tx.send(result);
        });
        lock(&self.shared.progress).queued += 1;
        if sender.send(job).is_err() {
            // every worker is gone, nothing will ever run it
            lock(&self.shared.progress).queued -= 1;
            return Err(PoolError::Closed);
        }
        Ok(TaskHandle { rx })
    }

    /// Blocks until the queue is empty and no worker is busy.
    pub fn wait_for_all(&self) {
        let progress = lock(&self.shared.progress);
        let _idle = self
            .shared
            .finished
            .wait_while(progress, |p| p.queued > 0 || p.active > 0)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Rejects further submissions, lets the workers drain the queue, then
    /// joins them. Idempotent.
    pub fn shutdown(&self) {
        let sender = lock(&self.sender).take();
        if sender.is_none() {
            return;
        }
        // closing the queue lets workers exit after the remaining tasks
        drop(sender);
        debug!("draining {} queued tasks", self.queued_count());
        let workers = std::mem::take(&mut *lock(&self.workers));
        for handle in workers {
            if handle.join().is_err() {
                warn!("a worker thread panicked");
            }
        }
        info!("worker pool with {} threads stopped", self.size);
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_barrier_counts_every_task() {
        const K: usize = 200;
        let pool = WorkerPool::new(4).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..K)
            .map(|_| {
                let counter = counter.clone();
                pool.submit(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap()
            })
            .collect();
        pool.wait_for_all();
        assert_eq!(counter.load(Ordering::SeqCst), K);
        assert_eq!(pool.queued_count(), 0);
        assert_eq!(pool.active_count(), 0);
        drop(handles);
    }

    #[test]
    fn test_wait_for_all_on_idle_pool() {
        let pool = WorkerPool::new(2).unwrap();
        pool.wait_for_all();
        pool.shutdown();
        pool.wait_for_all();
    }

    #[test]
    fn test_handle_returns_value() {
        let pool = WorkerPool::new(2).unwrap();
        let handle = pool.submit(|| 6 * 7).unwrap();
        assert_eq!(handle.wait().unwrap(), 42);
    }

    #[test]
    fn test_panic_surfaces_through_handle() {
        let pool = WorkerPool::new(1).unwrap();
        let bad = pool.submit(|| -> u32 { panic!("shading blew up") }).unwrap();
        match bad.wait() {
            Err(PoolError::TaskPanicked { message }) => assert_eq!(message, "shading blew up"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
        // the worker survives
        assert_eq!(pool.submit(|| 1).unwrap().wait().unwrap(), 1);
    }

    #[test]
    fn test_submit_after_shutdown_fails() {
        let pool = WorkerPool::new(2).unwrap();
        pool.shutdown();
        assert!(pool.is_closed());
        assert!(matches!(pool.submit(|| ()), Err(PoolError::Closed)));
        // second shutdown is a no-op
        pool.shutdown();
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(WorkerPool::new(0), Err(PoolError::NoWorkers)));
    }

    #[test]
    fn test_fifo_with_single_worker() {
        let pool = WorkerPool::new(1).unwrap();
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..16 {
            let order = order.clone();
            let _ = pool.submit(move || order.lock().unwrap().push(i)).unwrap();
        }
        pool.wait_for_all();
        assert_eq!(*order.lock().unwrap(), (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_drop_drains_queue() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let pool = WorkerPool::new(1).unwrap();
            for _ in 0..8 {
                let counter = counter.clone();
                let _ = pool
                    .submit(move || {
                        thread::sleep(Duration::from_millis(2));
                        counter.fetch_add(1, Ordering::SeqCst);
                    })
                    .unwrap();
            }
        }
        assert_eq!(counter.load(Ordering::SeqCst), 8);
    }

    static WORKERS_SEEN: AtomicUsize = AtomicUsize::new(0);
    static WORKERS_EXITED: AtomicUsize = AtomicUsize::new(0);

    struct ExitMarker;

    impl Drop for ExitMarker {
        fn drop(&mut self) {
            // slow teardown, so a detached thread would still be running
            thread::sleep(Duration::from_millis(100));
            WORKERS_EXITED.fetch_add(1, Ordering::SeqCst);
        }
    }

    thread_local! {
        static MARKER: ExitMarker = {
            WORKERS_SEEN.fetch_add(1, Ordering::SeqCst);
            ExitMarker
        };
    }

    #[test]
    fn test_drop_joins_workers() {
        let pool = WorkerPool::new(3).unwrap();
        for _ in 0..12 {
            let _ = pool
                .submit(|| {
                    MARKER.with(|_| ());
                    thread::sleep(Duration::from_millis(5));
                })
                .unwrap();
        }
        drop(pool);
        let seen = WORKERS_SEEN.load(Ordering::SeqCst);
        assert!(seen >= 1);
        assert_eq!(WORKERS_EXITED.load(Ordering::SeqCst), seen);
    }
}

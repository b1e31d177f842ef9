//! Task runner
//!
//! A ready-made `Host` for games with a fixed-rate main loop: store I/O runs
//! on a small pool of worker threads, and foreground work queues up until the
//! loop calls [`TaskRunner::run_pending`] with the world it owns.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};

use super::{BackgroundTask, ForegroundTask, Host};

#[derive(Default)]
struct QueueState {
    jobs: VecDeque<BackgroundTask>,
    closed: bool,
}

/// Background job queue shared with the workers
#[derive(Default)]
struct JobQueue {
    state: Mutex<QueueState>,
    ready: Condvar,
}

impl JobQueue {
    /// Hands the job back once the queue is closed
    fn push(&self, job: BackgroundTask) -> Result<(), BackgroundTask> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(job);
        }
        state.jobs.push_back(job);
        self.ready.notify_one();
        Ok(())
    }

    /// Block until a job is available; `None` once closed and drained
    fn next(&self) -> Option<BackgroundTask> {
        let mut state = self.state.lock();
        loop {
            if let Some(job) = state.jobs.pop_front() {
                return Some(job);
            }
            if state.closed {
                return None;
            }
            self.ready.wait(&mut state);
        }
    }

    fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        self.ready.notify_all();
    }
}

/// Worker pool plus foreground queue
pub struct TaskRunner<W> {
    queue: Arc<JobQueue>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    foreground: Mutex<VecDeque<ForegroundTask<W>>>,
    shutting_down: AtomicBool,
    attribute_health: bool,
}

impl<W: 'static> TaskRunner<W> {
    /// Start a runner with `worker_count` background threads (at least one)
    pub fn new(worker_count: usize) -> io::Result<Self> {
        let queue = Arc::new(JobQueue::default());
        let mut workers = Vec::new();

        for index in 0..worker_count.max(1) {
            let queue = Arc::clone(&queue);
            let handle = thread::Builder::new()
                .name(format!("realmkeep-io-{}", index))
                .spawn(move || {
                    while let Some(job) = queue.next() {
                        job();
                    }
                })?;
            workers.push(handle);
        }

        log::debug!("Task runner started with {} worker(s)", workers.len());

        Ok(Self {
            queue,
            workers: Mutex::new(workers),
            foreground: Mutex::new(VecDeque::new()),
            shutting_down: AtomicBool::new(false),
            attribute_health: false,
        })
    }

    /// Report the attribute-based health model to the profile core
    pub fn with_attribute_health(mut self, enabled: bool) -> Self {
        self.attribute_health = enabled;
        self
    }

    /// Run every foreground task queued so far.
    ///
    /// Tasks queued while these run wait for the next call. Returns how many ran.
    pub fn run_pending(&self, world: &mut W) -> usize {
        let tasks = std::mem::take(&mut *self.foreground.lock());
        let count = tasks.len();
        for task in tasks {
            task(world);
        }
        count
    }

    /// Number of foreground tasks waiting for `run_pending`
    pub fn pending_foreground(&self) -> usize {
        self.foreground.lock().len()
    }

    /// Enter shutdown mode; later saves and loads run inline
    pub fn begin_shutdown(&self) {
        if !self.shutting_down.swap(true, Ordering::SeqCst) {
            log::info!("Task runner entering shutdown");
        }
    }

    /// Enter shutdown mode, let workers drain the queue, and join them
    pub fn shutdown(&self) {
        self.begin_shutdown();
        self.queue.close();

        let workers = std::mem::take(&mut *self.workers.lock());
        for worker in workers {
            if worker.join().is_err() {
                log::error!("Background worker panicked during shutdown");
            }
        }
    }
}

impl<W: 'static> Host<W> for TaskRunner<W> {
    fn run_background(&self, task: BackgroundTask) {
        if let Err(task) = self.queue.push(task) {
            log::warn!("Background queue closed; running task inline");
            task();
        }
    }

    fn run_foreground(&self, task: ForegroundTask<W>) {
        self.foreground.lock().push_back(task);
    }

    fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }

    fn uses_attribute_health(&self) -> bool {
        self.attribute_health
    }
}

impl<W> Drop for TaskRunner<W> {
    fn drop(&mut self) {
        self.queue.close();
        let current = thread::current().id();
        for worker in self.workers.get_mut().drain(..) {
            // the last handle may be released by a task on one of our own workers
            if worker.thread().id() != current {
                let _ = worker.join();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_background_result_reaches_foreground() {
        let runner: Arc<TaskRunner<Vec<u32>>> = Arc::new(TaskRunner::new(2).unwrap());
        let (done_tx, done_rx) = mpsc::channel();

        let host = Arc::clone(&runner);
        runner.run_background(Box::new(move || {
            let value = 40 + 2;
            host.run_foreground(Box::new(move |world: &mut Vec<u32>| world.push(value)));
            done_tx.send(()).unwrap();
        }));

        done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let mut world = Vec::new();
        assert_eq!(runner.run_pending(&mut world), 1);
        assert_eq!(world, vec![42]);
        assert_eq!(runner.pending_foreground(), 0);
    }

    #[test]
    fn test_shutdown_drains_queue() {
        let runner: TaskRunner<()> = TaskRunner::new(1).unwrap();
        let counter = Arc::new(Mutex::new(0));
        for _ in 0..10 {
            let counter = Arc::clone(&counter);
            runner.run_background(Box::new(move || *counter.lock() += 1));
        }

        runner.shutdown();
        assert!(runner.is_shutting_down());
        assert_eq!(*counter.lock(), 10);
    }

    #[test]
    fn test_closed_queue_runs_inline() {
        let runner: TaskRunner<()> = TaskRunner::new(1).unwrap();
        runner.shutdown();

        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        runner.run_background(Box::new(move || flag.store(true, Ordering::SeqCst)));
        assert!(ran.load(Ordering::SeqCst));
    }
}

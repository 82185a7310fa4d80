/// Serial background task runner.
///
/// One named worker thread drains a job queue, so at most one task runs at
/// a time and tasks run in submission order. Each submitted task gets a
/// [`TaskHandle`]: a one-shot channel that yields exactly one
/// [`TaskOutcome`]. The consuming thread either polls it once per frame
/// (`try_outcome`) or blocks on it (`wait`), so results are always handled on
/// the thread that owns the handle, never on the worker.
///
/// There is no cancellation, retry, or timeout. Dropping the runner closes
/// the queue; jobs already queued still run. Dropping a handle discards its
/// outcome when it arrives.
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use tracing::{debug, warn};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Name given to the worker thread.
pub const WORKER_THREAD_NAME: &str = "videolist-worker";

/// Message reported when a handle's task can no longer report.
const WORKER_GONE: &str = "background worker stopped before the task reported";

/// What a task produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome<R> {
    /// The task returned `Ok`.
    Completed(R),
    /// The task returned `Err` or panicked; carries the message.
    Failed(String),
}

impl<R> TaskOutcome<R> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Receiving end for one task's outcome.
pub struct TaskHandle<R> {
    outcome_rx: Receiver<TaskOutcome<R>>,
    delivered: bool,
}

impl<R> TaskHandle<R> {
    /// Non-blocking poll. Returns the outcome exactly once; `None` before it
    /// arrives and after it has been taken.
    pub fn try_outcome(&mut self) -> Option<TaskOutcome<R>> {
        if self.delivered {
            return None;
        }
        let outcome = match self.outcome_rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => TaskOutcome::Failed(WORKER_GONE.to_string()),
        };
        self.delivered = true;
        Some(outcome)
    }

    /// Block until the outcome arrives.
    pub fn wait(self) -> TaskOutcome<R> {
        self.outcome_rx
            .recv()
            .unwrap_or_else(|_| TaskOutcome::Failed(WORKER_GONE.to_string()))
    }

    /// `true` once `try_outcome` has returned the outcome.
    pub fn is_delivered(&self) -> bool {
        self.delivered
    }
}

/// Owner of the single background worker.
pub struct TaskRunner {
    job_tx: Option<Sender<Job>>,
    /// Join handle for the worker thread. Never joined; the worker exits on
    /// its own once the queue is closed and drained.
    _thread: Option<thread::JoinHandle<()>>,
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRunner {
    /// Spawn the worker thread.
    pub fn new() -> Self {
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<Job>();

        let thread = thread::Builder::new()
            .name(WORKER_THREAD_NAME.into())
            .spawn(move || {
                debug!("Worker started");
                for job in job_rx {
                    job();
                }
                debug!("Worker queue closed, exiting");
            })
            .expect("failed to spawn worker thread");

        Self {
            job_tx: Some(job_tx),
            _thread: Some(thread),
        }
    }

    /// Queue `work` behind every task submitted before it.
    ///
    /// An `Err` is reported as [`TaskOutcome::Failed`] with the error's
    /// `Display` text; a panic is reported the same way with the panic
    /// message.
    pub fn execute<R, E, F>(&self, work: F) -> TaskHandle<R>
    where
        F: FnOnce() -> Result<R, E> + Send + 'static,
        R: Send + 'static,
        E: Display,
    {
        let (outcome_tx, outcome_rx) = crossbeam_channel::bounded::<TaskOutcome<R>>(1);

        let job: Job = Box::new(move || {
            let outcome = match panic::catch_unwind(AssertUnwindSafe(work)) {
                Ok(Ok(value)) => TaskOutcome::Completed(value),
                Ok(Err(err)) => TaskOutcome::Failed(err.to_string()),
                Err(payload) => {
                    let msg = panic_message(&*payload);
                    warn!("Background task panicked: {msg}");
                    TaskOutcome::Failed(msg)
                }
            };
            if outcome_tx.send(outcome).is_err() {
                debug!("Task outcome dropped: handle no longer held");
            }
        });

        if let Some(job_tx) = &self.job_tx {
            // A send error drops the job and its outcome sender, which the
            // handle reports as a failure.
            if job_tx.send(job).is_err() {
                warn!("Worker is gone; task not queued");
            }
        }

        TaskHandle {
            outcome_rx,
            delivered: false,
        }
    }
}

impl Drop for TaskRunner {
    fn drop(&mut self) {
        // Closing the queue lets the worker finish what is queued and exit.
        self.job_tx = None;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked".to_string()
    }
}

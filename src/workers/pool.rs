//! Fixed-size worker pool with a FIFO overflow queue.
//!
//! ```text
//!  execute() ──► dispatcher ──► inbox[i] ──► worker i ──┐
//!                  ▲   queue, available, active         │
//!                  └────────────── outbox ◄─────────────┘
//! ```
//!
//! The dispatcher thread owns all bookkeeping. Workers share nothing with it
//! or each other; payloads and results move through channels by value.

use std::collections::{HashMap, VecDeque};
use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, SelectedOperation, Sender, TryRecvError};
use log::{debug, info, warn};

use crate::workers::messages::{WorkerCommand, WorkerReply};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The handler returned an error.
    Failed(String),
    /// The handler panicked; the worker survived.
    Panicked(String),
    /// The pool shut down before the task produced a result.
    Terminated,
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(message) => write!(f, "task failed: {}", message),
            Self::Panicked(message) => write!(f, "task panicked: {}", message),
            Self::Terminated => write!(f, "worker pool terminated before the task finished"),
        }
    }
}

impl Error for TaskError {}

#[derive(Debug)]
pub enum PoolError {
    NoWorkers,
    Spawn(std::io::Error),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWorkers => write!(f, "worker pool needs at least one worker"),
            Self::Spawn(err) => write!(f, "failed to spawn worker thread: {}", err),
        }
    }
}

impl Error for PoolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoWorkers => None,
            Self::Spawn(err) => Some(err),
        }
    }
}

pub type TaskResult<Resp> = Result<Resp, TaskError>;

/// The pending result of one [`WorkerPool::execute`] call.
///
/// Settles exactly once. A handle whose pool is gone settles with
/// [`TaskError::Terminated`].
#[derive(Debug)]
pub struct TaskHandle<Resp> {
    task_id: u64,
    receiver: Receiver<TaskResult<Resp>>,
}

impl<Resp> TaskHandle<Resp> {
    #[must_use]
    pub fn task_id(&self) -> u64 {
        self.task_id
    }

    /// Blocks until the task settles.
    pub fn wait(self) -> TaskResult<Resp> {
        settle(self.receiver.recv())
    }

    pub fn wait_timeout(&self, timeout: Duration) -> Option<TaskResult<Resp>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(TaskError::Terminated)),
        }
    }

    pub fn try_wait(&self) -> Option<TaskResult<Resp>> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(TaskError::Terminated)),
        }
    }

    /// The channel to register with a [`crossbeam::channel::Select`].
    #[must_use]
    pub fn receiver(&self) -> &Receiver<TaskResult<Resp>> {
        &self.receiver
    }

    /// Completes a select operation that fired on [`Self::receiver`].
    pub fn complete(&self, operation: SelectedOperation<'_>) -> TaskResult<Resp> {
        settle(operation.recv(&self.receiver))
    }
}

fn settle<Resp>(received: Result<TaskResult<Resp>, channel::RecvError>) -> TaskResult<Resp> {
    received.unwrap_or(Err(TaskError::Terminated))
}

struct PendingTask<Req, Resp> {
    task_id: u64,
    payload: Req,
    reply: Sender<TaskResult<Resp>>,
}

enum PoolCommand<Req, Resp> {
    Execute(PendingTask<Req, Resp>),
    Terminate,
}

#[derive(Default)]
struct Readiness {
    ready: Mutex<usize>,
    changed: Condvar,
}

impl Readiness {
    fn mark_ready(&self) {
        let mut ready = self.ready.lock().unwrap_or_else(PoisonError::into_inner);
        *ready += 1;
        self.changed.notify_all();
    }

    fn count(&self) -> usize {
        *self.ready.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// `worker_count` long-lived threads, each running one task at a time.
///
/// Tasks submitted before every worker has started are queued, not lost.
pub struct WorkerPool<Req, Resp> {
    commands: Sender<PoolCommand<Req, Resp>>,
    readiness: Arc<Readiness>,
    worker_count: usize,
    next_task_id: AtomicU64,
    dispatcher: Option<JoinHandle<()>>,
    workers: Vec<JoinHandle<()>>,
}

impl<Req, Resp> WorkerPool<Req, Resp>
where
    Req: Send + 'static,
    Resp: Send + 'static,
{
    /// Spawns `worker_count` threads named `{name}-{index}` that run `handler`.
    pub fn new<F, E>(name: &str, worker_count: usize, handler: F) -> Result<Self, PoolError>
    where
        F: Fn(Req) -> Result<Resp, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        if worker_count == 0 {
            return Err(PoolError::NoWorkers);
        }

        let handler = Arc::new(handler);
        let (outbox, replies) = channel::unbounded();
        let mut inboxes = Vec::with_capacity(worker_count);
        let mut workers = Vec::with_capacity(worker_count);

        for index in 0..worker_count {
            let (inbox, commands) = channel::unbounded();
            let outbox = outbox.clone();
            let handler = Arc::clone(&handler);

            let worker = thread::Builder::new()
                .name(format!("{}-{}", name, index))
                .spawn(move || worker_loop(index, &commands, &outbox, handler.as_ref()))
                .map_err(PoolError::Spawn)?;

            inboxes.push(inbox);
            workers.push(worker);
        }

        // Only workers hold outbox senders now.
        drop(outbox);

        let readiness = Arc::new(Readiness::default());
        let (commands, command_rx) = channel::unbounded();

        let dispatcher = {
            let readiness = Arc::clone(&readiness);
            thread::Builder::new()
                .name(format!("{}-dispatch", name))
                .spawn(move || {
                    Dispatcher {
                        inboxes,
                        queue: VecDeque::new(),
                        available: VecDeque::new(),
                        active: HashMap::new(),
                        readiness,
                    }
                    .run(&command_rx, &replies);
                })
                .map_err(PoolError::Spawn)?
        };

        info!("worker pool '{}' started with {} workers", name, worker_count);

        Ok(Self {
            commands,
            readiness,
            worker_count,
            next_task_id: AtomicU64::new(1),
            dispatcher: Some(dispatcher),
            workers,
        })
    }

    /// Queues `payload` for the next free worker.
    pub fn execute(&self, payload: Req) -> TaskHandle<Resp> {
        self.execute_with(|_| payload)
    }

    /// Like [`Self::execute`] for payloads that carry their own task id.
    pub fn execute_with(&self, build: impl FnOnce(u64) -> Req) -> TaskHandle<Resp> {
        let task_id = self.next_task_id.fetch_add(1, Ordering::Relaxed);
        let payload = build(task_id);
        let (reply, receiver) = channel::bounded(1);

        // A closed dispatcher drops the task, which settles the handle as
        // terminated.
        let _ = self.commands.send(PoolCommand::Execute(PendingTask {
            task_id,
            payload,
            reply,
        }));

        TaskHandle { task_id, receiver }
    }

    /// Blocks until every worker has reported ready.
    pub fn wait_for_init(&self) {
        let guard = self.readiness.ready.lock().unwrap_or_else(PoisonError::into_inner);
        let _guard = self
            .readiness
            .changed
            .wait_while(guard, |ready| *ready < self.worker_count)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Like [`Self::wait_for_init`], returning `false` on timeout.
    pub fn wait_for_init_timeout(&self, timeout: Duration) -> bool {
        let guard = self.readiness.ready.lock().unwrap_or_else(PoisonError::into_inner);
        let (_guard, result) = self
            .readiness
            .changed
            .wait_timeout_while(guard, timeout, |ready| *ready < self.worker_count)
            .unwrap_or_else(PoisonError::into_inner);

        !result.timed_out()
    }

    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    #[must_use]
    pub fn ready_count(&self) -> usize {
        self.readiness.count()
    }
}

impl<Req, Resp> WorkerPool<Req, Resp> {
    /// Stops every worker. Queued and in-flight tasks settle as
    /// [`TaskError::Terminated`]; a worker mid-task finishes it first.
    pub fn terminate(&mut self) {
        let _ = self.commands.send(PoolCommand::Terminate);

        if let Some(dispatcher) = self.dispatcher.take() {
            let _ = dispatcher.join();
        }

        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

impl<Req, Resp> Drop for WorkerPool<Req, Resp> {
    fn drop(&mut self) {
        self.terminate();
    }
}

impl<Req, Resp> fmt::Debug for WorkerPool<Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("worker_count", &self.worker_count)
            .field("ready", &self.readiness.count())
            .finish()
    }
}

fn worker_loop<Req, Resp, F, E>(
    index: usize,
    commands: &Receiver<WorkerCommand<Req>>,
    outbox: &Sender<WorkerReply<Resp>>,
    handler: &F,
) where
    F: Fn(Req) -> Result<Resp, E>,
    E: fmt::Display,
{
    if outbox.send(WorkerReply::Ready { worker: index }).is_err() {
        return;
    }

    while let Ok(WorkerCommand::Run { task_id, payload }) = commands.recv() {
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| handler(payload))) {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => Err(TaskError::Failed(err.to_string())),
            Err(panic) => Err(TaskError::Panicked(panic_message(panic.as_ref()))),
        };

        let reply = WorkerReply::Finished {
            worker: index,
            task_id,
            outcome,
        };

        if outbox.send(reply).is_err() {
            return;
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

struct Dispatcher<Req, Resp> {
    inboxes: Vec<Sender<WorkerCommand<Req>>>,
    queue: VecDeque<PendingTask<Req, Resp>>,
    available: VecDeque<usize>,
    active: HashMap<u64, Sender<TaskResult<Resp>>>,
    readiness: Arc<Readiness>,
}

impl<Req, Resp> Dispatcher<Req, Resp> {
    fn run(mut self, commands: &Receiver<PoolCommand<Req, Resp>>, replies: &Receiver<WorkerReply<Resp>>) {
        loop {
            crossbeam::select! {
                recv(commands) -> command => match command {
                    Ok(PoolCommand::Execute(task)) => {
                        self.queue.push_back(task);
                        self.drain_queue();
                    }
                    Ok(PoolCommand::Terminate) | Err(_) => break,
                },
                recv(replies) -> reply => match reply {
                    Ok(reply) => self.handle_reply(reply),
                    // every worker exited
                    Err(_) => break,
                },
            }
        }

        debug!(
            "worker pool stopping; dropping {} queued and {} active tasks",
            self.queue.len(),
            self.active.len()
        );
        // Dropping the inboxes ends the workers; dropping the reply senders
        // settles the remaining handles as terminated.
    }

    fn handle_reply(&mut self, reply: WorkerReply<Resp>) {
        match reply {
            WorkerReply::Ready { worker } => {
                self.readiness.mark_ready();
                self.available.push_back(worker);
            }
            WorkerReply::Finished {
                worker,
                task_id,
                outcome,
            } => {
                if let Err(err) = &outcome {
                    warn!("task {} on worker {} failed: {}", task_id, worker, err);
                }

                if let Some(reply) = self.active.remove(&task_id) {
                    // the caller may have dropped its handle
                    let _ = reply.send(outcome);
                }

                self.available.push_back(worker);
            }
        }

        self.drain_queue();
    }

    fn drain_queue(&mut self) {
        while !self.queue.is_empty() {
            let Some(worker) = self.available.pop_front() else {
                return;
            };
            let Some(task) = self.queue.pop_front() else {
                return;
            };

            let PendingTask {
                task_id,
                payload,
                reply,
            } = task;

            if self.inboxes[worker]
                .send(WorkerCommand::Run { task_id, payload })
                .is_ok()
            {
                self.active.insert(task_id, reply);
            }
        }
    }
}

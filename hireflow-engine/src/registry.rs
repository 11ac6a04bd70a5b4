//! Job registry
//!
//! The only mutable shared state of the engine. All mutations run on a
//! single writer task and are applied in the order they are received.
//! Readers never block the writer: they see the last published snapshot.
//!
//! After every mutation the writer publishes a new snapshot and then
//! invokes subscribers with a [`RegistryEvent`].

use std::collections::{BTreeMap, HashMap};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use hireflow_core::domain::job::Job;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, warn};

/// Consistent view of every tracked job
pub type Snapshot = Arc<HashMap<String, Job>>;

/// Callback invoked after each registry mutation
pub type Listener = Arc<dyn Fn(&RegistryEvent) + Send + Sync>;

/// Mutation notification delivered to subscribers
#[derive(Debug, Clone)]
pub enum RegistryEvent {
    Inserted(Job),
    Updated(Job),
    Removed(Job),
}

impl RegistryEvent {
    pub fn job(&self) -> &Job {
        match self {
            RegistryEvent::Inserted(job) | RegistryEvent::Updated(job) | RegistryEvent::Removed(job) => job,
        }
    }
}

/// Result of [`JobRegistry::update`]
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome<R> {
    /// The mutation ran; `job` is the state after it
    Applied { job: Job, value: R },
    /// No job with that id is tracked
    NotFound,
}

/// The writer task is gone and the mutation was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryClosed;

impl std::fmt::Display for RegistryClosed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("job registry is closed")
    }
}

impl std::error::Error for RegistryClosed {}

/// Token returned by [`JobRegistry::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Mutation = Box<dyn FnOnce(&mut Writer) + Send>;

#[derive(Default)]
struct Subscribers {
    next_id: AtomicU64,
    listeners: Mutex<BTreeMap<u64, Listener>>,
}

impl Subscribers {
    fn current(&self) -> Vec<Listener> {
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect()
    }
}

/// Handle to the registry writer
///
/// Cheap to clone; every clone talks to the same writer.
#[derive(Clone)]
pub struct JobRegistry {
    mutations: mpsc::UnboundedSender<Mutation>,
    snapshot: watch::Receiver<Snapshot>,
    subscribers: Arc<Subscribers>,
}

impl JobRegistry {
    /// Spawns the writer task and returns a handle to it
    ///
    /// The writer stops once every handle has been dropped.
    pub fn spawn() -> Self {
        let (mutations, mut inbox) = mpsc::unbounded_channel::<Mutation>();
        let (publisher, snapshot) = watch::channel(Snapshot::default());
        let subscribers = Arc::new(Subscribers::default());

        let mut writer = Writer {
            jobs: HashMap::new(),
            publisher,
            subscribers: Arc::clone(&subscribers),
        };

        tokio::spawn(async move {
            while let Some(mutation) = inbox.recv().await {
                mutation(&mut writer);
            }
            debug!("Job registry writer stopped");
        });

        Self {
            mutations,
            snapshot,
            subscribers,
        }
    }

    /// Inserts or replaces a job
    pub async fn put(&self, job: Job) -> Result<(), RegistryClosed> {
        self.execute(move |w| w.put(job)).await.ok_or(RegistryClosed)
    }

    /// Current state of a job
    pub fn get(&self, id: &str) -> Option<Job> {
        self.snapshot.borrow().get(id).cloned()
    }

    /// Applies `mutation` to the job with `id`
    ///
    /// The job's id and kind are restored if the mutation changed them, and
    /// a terminal job keeps its status and result.
    pub async fn update<R, F>(&self, id: &str, mutation: F) -> UpdateOutcome<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut Job) -> R + Send + 'static,
    {
        let id = id.to_string();
        self.execute(move |w| w.update(&id, mutation))
            .await
            .unwrap_or(UpdateOutcome::NotFound)
    }

    /// Removes a job, returning its last state
    pub async fn remove(&self, id: &str) -> Result<Option<Job>, RegistryClosed> {
        let id = id.to_string();
        self.execute(move |w| w.remove(&id)).await.ok_or(RegistryClosed)
    }

    /// Jobs that still need polling
    pub fn list_non_terminal(&self) -> Vec<Job> {
        self.snapshot
            .borrow()
            .values()
            .filter(|job| !job.is_terminal())
            .cloned()
            .collect()
    }

    /// The last published snapshot
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    /// Registers a listener for every subsequent mutation
    pub fn subscribe(&self, listener: impl Fn(&RegistryEvent) + Send + Sync + 'static) -> SubscriptionId {
        let id = self.subscribers.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, Arc::new(listener));
        SubscriptionId(id)
    }

    /// Removes a listener; returns whether it was still registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id.0)
            .is_some()
    }

    /// Runs `op` on the writer and waits for its result
    ///
    /// Returns `None` if the writer is gone.
    async fn execute<T, F>(&self, op: F) -> Option<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Writer) -> T + Send + 'static,
    {
        let (reply, response) = oneshot::channel();
        let mutation: Mutation = Box::new(move |w| {
            let _ = reply.send(op(w));
        });

        if self.mutations.send(mutation).is_err() {
            warn!("Job registry writer is gone, dropping mutation");
            return None;
        }
        response.await.ok()
    }
}

struct Writer {
    jobs: HashMap<String, Job>,
    publisher: watch::Sender<Snapshot>,
    subscribers: Arc<Subscribers>,
}

impl Writer {
    fn put(&mut self, job: Job) {
        self.jobs.insert(job.id.clone(), job.clone());
        self.publish(RegistryEvent::Inserted(job));
    }

    fn update<R>(&mut self, id: &str, mutation: impl FnOnce(&mut Job) -> R) -> UpdateOutcome<R> {
        let Some(job) = self.jobs.get_mut(id) else {
            return UpdateOutcome::NotFound;
        };

        let before = job.clone();
        let value = mutation(job);
        guard(&before, job);

        let job = job.clone();
        self.publish(RegistryEvent::Updated(job.clone()));
        UpdateOutcome::Applied { job, value }
    }

    fn remove(&mut self, id: &str) -> Option<Job> {
        let job = self.jobs.remove(id)?;
        self.publish(RegistryEvent::Removed(job.clone()));
        Some(job)
    }

    fn publish(&self, event: RegistryEvent) {
        self.publisher.send_replace(Arc::new(self.jobs.clone()));

        // Listeners run outside the lock so they may unsubscribe themselves.
        // A panicking listener must not take the writer down with it.
        for listener in self.subscribers.current() {
            if catch_unwind(AssertUnwindSafe(|| listener(&event))).is_err() {
                error!("Registry subscriber panicked on event for job {}", event.job().id);
            }
        }
    }
}

fn guard(before: &Job, after: &mut Job) {
    if after.id != before.id || after.kind != before.kind {
        warn!("Mutation tried to change identity of job {}, restoring", before.id);
        after.id = before.id.clone();
        after.kind = before.kind;
    }

    if before.is_terminal() && (after.status != before.status || after.result != before.result) {
        warn!("Mutation tried to leave terminal state of job {}, restoring", before.id);
        after.status = before.status;
        after.result = before.result.clone();
    }
}

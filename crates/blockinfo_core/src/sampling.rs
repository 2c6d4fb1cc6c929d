use std::hash::Hash;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::replies::ReplySender;
use crate::jobs::JobSystem;

/// Result of one live-sample request. `value` is `None` when sampling failed.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleReply<K, V> {
    pub key: K,
    pub value: Option<V>,
}

/// Asynchronous provider of live data. Replies arrive on `reply` at some later point, or never.
pub trait Sampler<K, V> {
    fn request(&self, key: K, reply: ReplySender<SampleReply<K, V>>);
}

/// Runs a sampling closure on the job pool.
pub struct JobSampler<F> {
    jobs: Arc<JobSystem>,
    sample: Arc<F>,
}

impl<F> JobSampler<F> {
    pub fn new(jobs: Arc<JobSystem>, sample: F) -> Self {
        Self {
            jobs,
            sample: Arc::new(sample),
        }
    }
}

impl<K, V, F> Sampler<K, V> for JobSampler<F>
where
    K: Send + 'static,
    V: Send + 'static,
    F: Fn(&K) -> Option<V> + Send + Sync + 'static,
{
    fn request(&self, key: K, reply: ReplySender<SampleReply<K, V>>) {
        let sample = Arc::clone(&self.sample);
        self.jobs.spawn(move || {
            let value = sample(&key);
            if reply.send(SampleReply { key, value }).is_err() {
                debug!("sample reply dropped, receiver is gone");
            }
        });
    }
}

/// Tracks which keys were requested so each one is sampled at most once.
pub struct SampleBook<K> {
    pending: FxHashSet<K>,
    ready: FxHashSet<K>,
    failed: FxHashSet<K>,
}

impl<K> Default for SampleBook<K> {
    fn default() -> Self {
        Self {
            pending: FxHashSet::default(),
            ready: FxHashSet::default(),
            failed: FxHashSet::default(),
        }
    }
}

impl<K: Eq + Hash + Clone + std::fmt::Debug> SampleBook<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` pending and returns true if it was never requested before.
    pub fn begin(&mut self, key: &K) -> bool {
        if self.is_pending(key) || self.has_failed(key) || self.ready.contains(key) {
            return false;
        }
        self.pending.insert(key.clone());
        true
    }

    /// Records the outcome of a reply. Returns false for replies nobody asked for.
    pub fn complete(&mut self, key: &K, succeeded: bool) -> bool {
        if !self.pending.remove(key) {
            return false;
        }
        if succeeded {
            self.ready.insert(key.clone());
        } else {
            warn!("live sample for {key:?} failed, not retrying");
            self.failed.insert(key.clone());
        }
        true
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains(key)
    }

    pub fn has_failed(&self, key: &K) -> bool {
        self.failed.contains(key)
    }
}

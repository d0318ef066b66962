//! # Query cache: per-key results with tag-based invalidation
//!
//! [`QueryCache`] stores the outcome of every read-style backend call, keyed by
//! [`CacheKey`] (`endpoint name` + canonical JSON of the argument). The cache is a
//! cheaply clonable handle around shared state so every part of the UI sees the same
//! entries.
//!
//! ## Lifecycle of an entry
//!
//! ```text
//! Uninitialized --begin--> Pending --settle(Ok)--> Fulfilled
//!                             ^    \--settle(Err)-> Rejected
//!                             \----------begin-------/
//! ```
//!
//! A pending entry always reads as [`QueryState::Loading`], even if it holds data
//! from an earlier fetch. [`invalidate`](QueryCache::invalidate) marks entries
//! carrying an overlapping [`Tag`] stale; a stale entry is never served by
//! [`fresh`](QueryCache::fresh), so the next read refetches. Invalidating a pending
//! entry keeps it stale after it settles.
//!
//! Every [`begin`](QueryCache::begin) hands out a [`FetchTicket`]. Only the
//! ticket of the latest fetch for a key may [`settle`](QueryCache::settle) it, so a
//! request overtaken by a newer one, or by [`clear`](QueryCache::clear), cannot
//! overwrite what came after it.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

/// A cache label shared by queries and the mutations that invalidate them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tag(pub &'static str);

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Identifies one cached result.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub endpoint: &'static str,
    pub arg: String,
}

impl CacheKey {
    /// Build a key from an argument, rendered as canonical JSON.
    pub fn new<A: Serialize + ?Sized>(endpoint: &'static str, arg: &A) -> Self {
        let arg = serde_json::to_string(arg).unwrap_or_else(|_| "null".to_string());
        Self { endpoint, arg }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.endpoint, self.arg)
    }
}

/// Identifies one fetch started with [`QueryCache::begin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FetchTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryStatus {
    Uninitialized,
    Pending,
    Fulfilled,
    Rejected,
}

/// What a consumer sees when it reads a key.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryState<V, E> {
    Uninitialized,
    Loading,
    Ready(V),
    Failed(E),
}

impl<V, E> QueryState<V, E> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&V> {
        match self {
            QueryState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            QueryState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CacheEntry<V, E> {
    pub data: Option<V>,
    pub error: Option<E>,
    pub status: QueryStatus,
    pub tags: Vec<Tag>,
    pub stale: bool,
    pub subscribers: usize,
    fetch: Option<FetchTicket>,
}

impl<V, E> CacheEntry<V, E> {
    fn new(tags: &[Tag]) -> Self {
        Self {
            data: None,
            error: None,
            status: QueryStatus::Uninitialized,
            tags: tags.to_vec(),
            stale: false,
            subscribers: 0,
            fetch: None,
        }
    }

    fn has_any(&self, tags: &[Tag]) -> bool {
        self.tags.iter().any(|t| tags.contains(t))
    }
}

struct Inner<V, E> {
    entries: HashMap<CacheKey, CacheEntry<V, E>>,
    revision: u64,
    // Never reset, so tickets stay unique across `clear`.
    next_ticket: u64,
}

/// Shared query cache.
pub struct QueryCache<V, E> {
    inner: Arc<Mutex<Inner<V, E>>>,
}

impl<V, E> Clone for QueryCache<V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V, E> Default for QueryCache<V, E> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: HashMap::new(),
                revision: 0,
                next_ticket: 0,
            })),
        }
    }
}

impl<V: Clone, E: Clone> QueryCache<V, E> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner<V, E>> {
        // A panic while holding the lock cannot leave an entry half-written.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Mark `key` as being fetched. Supersedes any fetch already running for it.
    pub fn begin(&self, key: &CacheKey, tags: &[Tag]) -> FetchTicket {
        let mut inner = self.lock();
        inner.next_ticket += 1;
        let ticket = FetchTicket(inner.next_ticket);
        let entry = inner
            .entries
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::new(tags));
        entry.status = QueryStatus::Pending;
        entry.stale = false;
        entry.tags = tags.to_vec();
        entry.fetch = Some(ticket);
        inner.revision += 1;
        ticket
    }

    /// Whether `ticket` is the latest fetch of `key` and nothing invalidated
    /// the entry since it began.
    pub fn is_current(&self, key: &CacheKey, ticket: FetchTicket) -> bool {
        self.lock()
            .entries
            .get(key)
            .is_some_and(|e| e.fetch == Some(ticket) && !e.stale)
    }

    /// Record the outcome of a fetch started with [`begin`](Self::begin).
    ///
    /// Returns `false`, leaving the entry alone, when `ticket` was superseded.
    pub fn settle(&self, key: &CacheKey, ticket: FetchTicket, result: Result<V, E>) -> bool {
        let mut inner = self.lock();
        let Some(entry) = inner.entries.get_mut(key) else {
            return false;
        };
        if entry.fetch != Some(ticket) {
            return false;
        }
        match result {
            Ok(data) => {
                entry.data = Some(data);
                entry.error = None;
                entry.status = QueryStatus::Fulfilled;
            }
            Err(error) => {
                entry.error = Some(error);
                entry.status = QueryStatus::Rejected;
            }
        }
        inner.revision += 1;
        true
    }

    pub fn read(&self, key: &CacheKey) -> QueryState<V, E> {
        let inner = self.lock();
        let Some(entry) = inner.entries.get(key) else {
            return QueryState::Uninitialized;
        };
        match entry.status {
            QueryStatus::Uninitialized => QueryState::Uninitialized,
            QueryStatus::Pending => QueryState::Loading,
            QueryStatus::Fulfilled => match &entry.data {
                Some(data) => QueryState::Ready(data.clone()),
                None => QueryState::Loading,
            },
            QueryStatus::Rejected => match &entry.error {
                Some(error) => QueryState::Failed(error.clone()),
                None => QueryState::Loading,
            },
        }
    }

    /// Cached data that can be served without a network call.
    pub fn fresh(&self, key: &CacheKey) -> Option<V> {
        let inner = self.lock();
        let entry = inner.entries.get(key)?;
        if entry.status == QueryStatus::Fulfilled && !entry.stale {
            entry.data.clone()
        } else {
            None
        }
    }

    pub fn is_stale(&self, key: &CacheKey) -> bool {
        self.lock().entries.get(key).is_some_and(|e| e.stale)
    }

    /// Mark every entry tagged with any of `tags` stale.
    ///
    /// Returns the keys that have subscribers and therefore should refetch now.
    pub fn invalidate(&self, tags: &[Tag]) -> Vec<CacheKey> {
        let mut inner = self.lock();
        let mut refetch = Vec::new();
        let mut touched = false;
        for (key, entry) in inner.entries.iter_mut() {
            if entry.has_any(tags) {
                entry.stale = true;
                touched = true;
                if entry.subscribers > 0 {
                    refetch.push(key.clone());
                }
            }
        }
        if touched {
            inner.revision += 1;
        }
        refetch
    }

    /// Register interest in `key`; creates an uninitialized entry if needed.
    pub fn subscribe(&self, key: &CacheKey, tags: &[Tag]) -> usize {
        let mut inner = self.lock();
        let entry = inner
            .entries
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::new(tags));
        entry.subscribers += 1;
        entry.subscribers
    }

    pub fn unsubscribe(&self, key: &CacheKey) -> usize {
        let mut inner = self.lock();
        match inner.entries.get_mut(key) {
            Some(entry) => {
                entry.subscribers = entry.subscribers.saturating_sub(1);
                entry.subscribers
            }
            None => 0,
        }
    }

    pub fn entry(&self, key: &CacheKey) -> Option<CacheEntry<V, E>> {
        self.lock().entries.get(key).cloned()
    }

    pub fn remove(&self, key: &CacheKey) -> bool {
        let mut inner = self.lock();
        let removed = inner.entries.remove(key).is_some();
        if removed {
            inner.revision += 1;
        }
        removed
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.revision += 1;
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bumped on every change; the UI re-runs dependent resources when it moves.
    pub fn revision(&self) -> u64 {
        self.lock().revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::test_runner::Config;

    const STUDENT: Tag = Tag("getStudent");
    const CHILDREN: Tag = Tag("getChildren");

    type Cache = QueryCache<String, String>;

    fn key(endpoint: &'static str) -> CacheKey {
        CacheKey::new(endpoint, &())
    }

    #[test]
    fn test_unknown_key_is_uninitialized() {
        let cache = Cache::new();
        assert_eq!(cache.read(&key("getStudentProfile")), QueryState::Uninitialized);
        assert!(cache.fresh(&key("getStudentProfile")).is_none());
    }

    #[test]
    fn test_pending_reads_as_loading() {
        let cache = Cache::new();
        let k = key("getStudentProfile");
        let ticket = cache.begin(&k, &[STUDENT]);
        assert_eq!(cache.read(&k), QueryState::Loading);
        assert!(cache.fresh(&k).is_none());

        assert!(cache.settle(&k, ticket, Ok("ada".into())));
        assert_eq!(cache.read(&k), QueryState::Ready("ada".into()));

        // A refetch hides the old value until it resolves.
        cache.begin(&k, &[STUDENT]);
        assert!(cache.read(&k).is_loading());
    }

    #[test]
    fn test_rejected_entry_carries_error_and_is_not_fresh() {
        let cache = Cache::new();
        let k = key("getAllChildren");
        let ticket = cache.begin(&k, &[CHILDREN]);
        cache.settle(&k, ticket, Err("500".into()));
        assert_eq!(cache.read(&k).error().map(String::as_str), Some("500"));
        assert!(cache.fresh(&k).is_none());
    }

    #[test]
    fn test_keys_distinguish_arguments() {
        let a = CacheKey::new("getChild", &serde_json::json!({"id": 1}));
        let b = CacheKey::new("getChild", &serde_json::json!({"id": 2}));
        assert_ne!(a, b);
        assert_eq!(a.to_string(), r#"getChild({"id":1})"#);
    }

    #[test]
    fn test_invalidate_marks_tagged_entries_stale() {
        let cache = Cache::new();
        let student = key("getStudentProfile");
        let children = key("getAllChildren");
        for (k, tag) in [(&student, STUDENT), (&children, CHILDREN)] {
            let ticket = cache.begin(k, &[tag]);
            cache.settle(k, ticket, Ok("v".into()));
        }
        cache.subscribe(&student, &[STUDENT]);

        let refetch = cache.invalidate(&[STUDENT]);
        assert_eq!(refetch, vec![student.clone()]);
        assert!(cache.is_stale(&student));
        assert!(cache.fresh(&student).is_none());
        // Stale data still reads as ready until the refetch begins.
        assert_eq!(cache.read(&student), QueryState::Ready("v".into()));
        assert_eq!(cache.fresh(&children), Some("v".into()));
    }

    #[test]
    fn test_invalidate_without_subscribers_returns_nothing() {
        let cache = Cache::new();
        let k = key("getStudentProfile");
        let ticket = cache.begin(&k, &[STUDENT]);
        cache.settle(&k, ticket, Ok("v".into()));
        assert!(cache.invalidate(&[STUDENT]).is_empty());
        assert!(cache.is_stale(&k));
    }

    #[test]
    fn test_invalidation_during_flight_survives_settle() {
        let cache = Cache::new();
        let k = key("getStudentProfile");
        let ticket = cache.begin(&k, &[STUDENT]);
        cache.invalidate(&[STUDENT]);
        assert!(!cache.is_current(&k, ticket));
        cache.settle(&k, ticket, Ok("old".into()));
        assert!(cache.fresh(&k).is_none());

        let ticket = cache.begin(&k, &[STUDENT]);
        assert!(cache.is_current(&k, ticket));
        cache.settle(&k, ticket, Ok("new".into()));
        assert_eq!(cache.fresh(&k), Some("new".into()));
    }

    #[test]
    fn test_superseded_fetch_cannot_settle() {
        let cache = Cache::new();
        let k = key("getStudentProfile");
        let old = cache.begin(&k, &[STUDENT]);
        cache.invalidate(&[STUDENT]);
        let new = cache.begin(&k, &[STUDENT]);
        assert_ne!(old, new);

        assert!(cache.settle(&k, new, Ok("post-login".into())));
        assert!(!cache.settle(&k, old, Ok("pre-login".into())));
        assert_eq!(cache.fresh(&k), Some("post-login".into()));
    }

    #[test]
    fn test_fetch_from_before_clear_is_dropped() {
        let cache = Cache::new();
        let k = key("getStudentProfile");
        let old = cache.begin(&k, &[STUDENT]);
        cache.clear();
        assert!(!cache.is_current(&k, old));
        assert!(!cache.settle(&k, old, Ok("old-user".into())));
        assert_eq!(cache.read(&k), QueryState::Uninitialized);

        // Tickets keep counting after a clear.
        let new = cache.begin(&k, &[STUDENT]);
        assert!(!cache.settle(&k, old, Ok("old-user".into())));
        assert!(cache.settle(&k, new, Ok("new-user".into())));
        assert_eq!(cache.read(&k), QueryState::Ready("new-user".into()));
    }

    #[test]
    fn test_subscribe_counts() {
        let cache = Cache::new();
        let k = key("getAllChildren");
        assert_eq!(cache.subscribe(&k, &[CHILDREN]), 1);
        assert_eq!(cache.subscribe(&k, &[CHILDREN]), 2);
        assert_eq!(cache.unsubscribe(&k), 1);
        assert_eq!(cache.unsubscribe(&k), 0);
        assert_eq!(cache.unsubscribe(&k), 0);
        assert_eq!(cache.read(&k), QueryState::Uninitialized);
    }

    #[test]
    fn test_revision_moves_on_change() {
        let cache = Cache::new();
        let clone = cache.clone();
        let start = cache.revision();
        let k = key("getAllChildren");
        let ticket = cache.begin(&k, &[CHILDREN]);
        clone.settle(&k, ticket, Ok("v".into()));
        assert_eq!(cache.revision(), start + 2);

        // Nothing tagged: no change.
        cache.invalidate(&[STUDENT]);
        assert_eq!(cache.revision(), start + 2);

        assert!(cache.remove(&k));
        assert!(cache.is_empty());
        assert!(cache.revision() > start + 2);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Begin(usize),
        Settle { key: usize, fetch: usize, value: u8 },
        Invalidate(usize),
        Clear,
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..3usize).prop_map(Op::Begin),
            (0..3usize, 0..4usize, any::<u8>())
                .prop_map(|(key, fetch, value)| Op::Settle { key, fetch, value }),
            (0..2usize).prop_map(Op::Invalidate),
            Just(Op::Clear),
        ]
    }

    #[derive(Clone, Default)]
    struct ModelEntry {
        fetch: usize,
        data: Option<u8>,
        stale: bool,
    }

    proptest! {
        #![proptest_config(Config::with_cases(256))]
        #[test]
        fn fresh_matches_latest_unstale_settle(ops in prop::collection::vec(arb_op(), 0..24)) {
            let tags = [STUDENT, CHILDREN];
            let entries: [(&'static str, &[Tag]); 3] = [
                ("getStudentProfile", &[STUDENT]),
                ("getAllChildren", &[CHILDREN]),
                ("getParentProfile", &[STUDENT, CHILDREN]),
            ];
            let keys: Vec<CacheKey> = entries.iter().map(|&(name, _)| key(name)).collect();
            let cache: QueryCache<u8, String> = QueryCache::new();
            let mut issued: Vec<Vec<FetchTicket>> = vec![Vec::new(); 3];
            let mut model: Vec<Option<ModelEntry>> = vec![None; 3];

            for op in &ops {
                match *op {
                    Op::Begin(k) => {
                        issued[k].push(cache.begin(&keys[k], entries[k].1));
                        model[k] = Some(ModelEntry { fetch: issued[k].len() - 1, ..Default::default() });
                    }
                    Op::Settle { key: k, fetch, value } => {
                        let Some(&ticket) = issued[k].get(fetch) else { continue };
                        let applied = cache.settle(&keys[k], ticket, Ok(value));
                        let current = model[k].as_mut().filter(|m| m.fetch == fetch);
                        prop_assert_eq!(applied, current.is_some());
                        if let Some(m) = current {
                            m.data = Some(value);
                        }
                    }
                    Op::Invalidate(t) => {
                        cache.invalidate(&[tags[t]]);
                        for (m, (_, entry_tags)) in model.iter_mut().zip(entries.iter()) {
                            if let Some(m) = m.as_mut().filter(|_| entry_tags.contains(&tags[t])) {
                                m.stale = true;
                            }
                        }
                    }
                    Op::Clear => {
                        cache.clear();
                        model = vec![None; 3];
                    }
                }
            }

            for (k, m) in keys.iter().zip(model.iter()) {
                let expected = m.as_ref().and_then(|m| m.data.filter(|_| !m.stale));
                prop_assert_eq!(cache.fresh(k), expected);
            }
        }
    }
}

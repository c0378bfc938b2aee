//! Read-through cache of task lists, keyed by filter.
//!
//! [`TaskCache`] sits between the views and the remote service. For each
//! distinct [`TaskFilter`] it remembers the last list the server returned and
//! guarantees that at most one fetch per filter is outstanding: a reader that
//! arrives while a fetch is in flight attaches to it instead of issuing a
//! second request.
//!
//! ## Entry lifecycle
//!
//! ```text
//!            read                 settle(ok)
//!   Idle ───────────▶ Pending ───────────────▶ Fresh
//!                       │  ▲                     │
//!            settle(err)│  │read                 │invalidate
//!                       ▼  │                     ▼
//!                     Failed ◀──── read ────── Stale
//! ```
//!
//! Invalidation is lazy: it only marks entries stale, and the next `read` of
//! a stale entry fetches again. Entries are never evicted.
//!
//! ## Out-of-order settlement
//!
//! Every entry carries a generation number. `invalidate` bumps it and detaches
//! the in-flight fetch, so a response requested before the invalidation can
//! still resolve its own waiters but is never written into the entry. Readers
//! arriving after an invalidation always start a new fetch.
//!
//! ## Observing entries
//!
//! [`TaskCache::subscribe`] hands out a `watch` receiver per filter. Every
//! state change of that entry (fetch started, settled, invalidated) publishes
//! a fresh [`CacheEntry`] snapshot.
//!
//! The cache is single-threaded: it is `!Send` and meant to live on one
//! cooperative runtime thread for the length of a session.

use crate::api::{ApiError, ApiResult, TaskService};
use crate::libs::filter::{FilterKey, TaskFilter};
use crate::libs::task::Task;
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use tokio::sync::watch;

/// An ordered task list exactly as the server returned it.
pub type TaskList = Rc<Vec<Task>>;

type FetchResult = ApiResult<TaskList>;
type InFlight = Shared<LocalBoxFuture<'static, FetchResult>>;
type Slots = RefCell<HashMap<FilterKey, Slot>>;

#[derive(Clone, Debug, PartialEq)]
pub enum EntryStatus {
    /// Known key, never fetched.
    Idle,
    /// A fetch is in flight.
    Pending,
    /// Data reflects the server as of the last settled fetch.
    Fresh,
    /// Data may be outdated; the next read fetches again.
    Stale,
    /// The last fetch failed. Any previous data is kept.
    Failed(ApiError),
}

/// Snapshot of one cache entry.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry {
    pub tasks: Option<TaskList>,
    pub status: EntryStatus,
    /// Number of fetches started for this key.
    pub fetches: u64,
}

impl CacheEntry {
    fn idle() -> Self {
        Self {
            tasks: None,
            status: EntryStatus::Idle,
            fetches: 0,
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.status == EntryStatus::Fresh
    }

    pub fn error(&self) -> Option<&ApiError> {
        match &self.status {
            EntryStatus::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Which entries an invalidation applies to.
#[derive(Clone, Debug, PartialEq)]
pub enum InvalidateScope {
    /// Every cached task list, whatever its filter.
    AllTaskLists,
    /// Only the list for one filter.
    Filter(TaskFilter),
}

impl InvalidateScope {
    fn matches(&self, key: &FilterKey) -> bool {
        match self {
            InvalidateScope::AllTaskLists => true,
            InvalidateScope::Filter(filter) => &filter.key() == key,
        }
    }
}

struct Slot {
    state: watch::Sender<CacheEntry>,
    generation: u64,
    in_flight: Option<InFlight>,
}

impl Slot {
    fn new() -> Self {
        let (state, _) = watch::channel(CacheEntry::idle());
        Self {
            state,
            generation: 0,
            in_flight: None,
        }
    }
}

pub struct TaskCache<S> {
    service: Rc<S>,
    slots: Rc<Slots>,
}

impl<S: TaskService + 'static> TaskCache<S> {
    pub fn new(service: Rc<S>) -> Self {
        Self {
            service,
            slots: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Returns the task list for `filter`, fetching only when the entry is not
    /// fresh.
    ///
    /// Concurrent reads of equal filters share one request and all receive its
    /// outcome. A failure is recorded on the entry and returned to every
    /// waiter; it is not retried until the next read.
    pub async fn read(&self, filter: &TaskFilter) -> ApiResult<TaskList> {
        let fetch = {
            let key = filter.key();
            let mut slots = self.slots.borrow_mut();
            let slot = slots.entry(key.clone()).or_insert_with(Slot::new);

            let cached = {
                let entry = slot.state.borrow();
                if entry.is_fresh() {
                    entry.tasks.clone()
                } else {
                    None
                }
            };
            if let Some(tasks) = cached {
                tracing::debug!(%filter, "cache hit");
                return Ok(tasks);
            }

            match &slot.in_flight {
                Some(in_flight) => {
                    tracing::debug!(%filter, "joining in-flight fetch");
                    in_flight.clone()
                }
                None => {
                    let fetch = self.start_fetch(filter, key, slot.generation);
                    slot.in_flight = Some(fetch.clone());
                    slot.state.send_modify(|entry| {
                        entry.status = EntryStatus::Pending;
                        entry.fetches += 1;
                    });
                    fetch
                }
            }
        };
        fetch.await
    }

    /// Marks every entry in `scope` stale. Nothing is refetched until read.
    pub fn invalidate(&self, scope: InvalidateScope) {
        let mut slots = self.slots.borrow_mut();
        let mut count = 0;
        for (_, slot) in slots.iter_mut().filter(|(key, _)| scope.matches(key)) {
            slot.generation += 1;
            slot.in_flight = None;
            slot.state.send_if_modified(|entry| {
                if entry.status == EntryStatus::Idle {
                    return false;
                }
                entry.status = EntryStatus::Stale;
                true
            });
            count += 1;
        }
        tracing::debug!(?scope, entries = count, "invalidated");
    }

    /// Observes the entry for `filter`, creating an idle one if needed.
    pub fn subscribe(&self, filter: &TaskFilter) -> watch::Receiver<CacheEntry> {
        let mut slots = self.slots.borrow_mut();
        slots.entry(filter.key()).or_insert_with(Slot::new).state.subscribe()
    }

    /// Current snapshot of the entry for `filter`, without fetching.
    pub fn peek(&self, filter: &TaskFilter) -> Option<CacheEntry> {
        self.slots.borrow().get(&filter.key()).map(|slot| slot.state.borrow().clone())
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn start_fetch(&self, filter: &TaskFilter, key: FilterKey, generation: u64) -> InFlight {
        let service = Rc::clone(&self.service);
        let slots = Rc::downgrade(&self.slots);
        let filter = filter.clone();
        tracing::debug!(%filter, generation, "fetching task list");

        async move {
            let result = service.list_tasks(&filter).await.map(Rc::new);
            settle(&slots, &key, generation, &result);
            result
        }
        .boxed_local()
        .shared()
    }
}

fn settle(slots: &Weak<Slots>, key: &FilterKey, generation: u64, result: &FetchResult) {
    let Some(slots) = slots.upgrade() else {
        return;
    };
    let mut slots = slots.borrow_mut();
    let Some(slot) = slots.get_mut(key) else {
        return;
    };
    if slot.generation != generation {
        tracing::debug!(%key, generation, current = slot.generation, "discarding superseded fetch");
        return;
    }

    slot.in_flight = None;
    slot.state.send_modify(|entry| match result {
        Ok(tasks) => {
            tracing::debug!(%key, count = tasks.len(), "fetch settled");
            if let Some(task) = tasks.iter().find(|task| !task.is_consistent()) {
                tracing::warn!(id = %task.id, "task completion fields disagree");
            }
            entry.tasks = Some(Rc::clone(tasks));
            entry.status = EntryStatus::Fresh;
        }
        Err(err) => {
            tracing::debug!(%key, error = %err, "fetch failed");
            entry.status = EntryStatus::Failed(err.clone());
        }
    });
}

//! Filter state for task list views.
//!
//! A [`TaskFilter`] is an immutable value describing which subset of tasks is
//! on screen. Equal filters produce the same [`FilterKey`], which is what the
//! task cache is keyed by.
//!
//! Text criteria (`q`, `category`) are trimmed at construction, and ones that
//! are empty after trimming become unset. `" milk"` and `"milk"` are therefore
//! one view sharing one cache entry and sending `q=milk`, and a search for
//! only whitespace is the same view as no search.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion state a view is restricted to.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Todo,
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::Done => "done",
        }
    }
}

/// Due-date window a view is restricted to.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DueWindow {
    Today,
    Week,
    Overdue,
}

impl DueWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            DueWindow::Today => "today",
            DueWindow::Week => "week",
            DueWindow::Overdue => "overdue",
        }
    }
}

/// Canonical serialization of a [`TaskFilter`], used as the cache key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilterKey(String);

impl FilterKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TaskFilter {
    status: Option<Status>,
    due: Option<DueWindow>,
    q: Option<String>,
    category: Option<String>,
}

impl TaskFilter {
    /// A filter matching every task.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn due(&self) -> Option<DueWindow> {
        self.due
    }

    pub fn query(&self) -> Option<&str> {
        self.q.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn with_status(self, status: Option<Status>) -> Self {
        Self { status, ..self }
    }

    pub fn with_due(self, due: Option<DueWindow>) -> Self {
        Self { due, ..self }
    }

    /// Sets the free-text search, trimmed; blank text clears it.
    pub fn with_query(self, q: Option<&str>) -> Self {
        Self {
            q: non_empty(q),
            ..self
        }
    }

    pub fn with_category(self, category: Option<&str>) -> Self {
        Self {
            category: non_empty(category),
            ..self
        }
    }

    /// Query parameters for `GET /list_tasks`. Unset criteria are left out.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(due) = self.due {
            pairs.push(("due", due.as_str().to_string()));
        }
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        pairs
    }

    pub fn key(&self) -> FilterKey {
        // JSON keeps arbitrary search text unambiguous inside the key.
        let pairs = self.query_pairs();
        FilterKey(serde_json::to_string(&pairs).unwrap_or_default())
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.due.is_none() && self.q.is_none() && self.category.is_none()
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("all tasks");
        }
        let parts: Vec<String> = self.query_pairs().into_iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        f.write_str(&parts.join(", "))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

//! Remote task service access.
//!
//! The backend is reached only through the HTTP contract implemented by
//! [`tasks::TasksApi`]. Everything above this layer talks to the
//! [`TaskService`] trait, so the cache and the mutation pipeline can be driven
//! by any implementation with the same five operations.
//!
//! ## Endpoints
//!
//! | Operation | Request                        | Response                    |
//! |-----------|--------------------------------|-----------------------------|
//! | list      | `GET /list_tasks?...`          | `{tasks: Task[]}`           |
//! | create    | `POST /add_task` (JSON/audio)  | `{task: Task}`              |
//! | complete  | `POST /complete`               | `{updated: number}`         |
//! | ask       | `POST /ask`                    | `{answer, tasks?}`          |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdesk::api::{TaskService, TasksApi};
//! use taskdesk::libs::{config::Config, filter::{Status, TaskFilter}};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let api = TasksApi::new(&Config::default())?;
//! let todo = api.list_tasks(&TaskFilter::new().with_status(Some(Status::Todo))).await?;
//! # Ok(())
//! # }
//! ```

use crate::libs::ask::AskResponse;
use crate::libs::audio::AudioClip;
use crate::libs::filter::TaskFilter;
use crate::libs::task::{Task, TaskDraft, TaskRef};
use thiserror::Error;

pub mod tasks;

pub use tasks::TasksApi;

/// Result alias used by every remote operation.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single remote operation.
///
/// The error is `Clone` because one failed list fetch is handed to every
/// reader waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A client-side precondition failed; nothing was sent.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The request never completed (connection refused, DNS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server responded with {status}: {body}")]
    Server { status: u16, body: String },

    /// The server answered successfully but the body was not the expected JSON.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn validation(detail: impl Into<String>) -> Self {
        ApiError::Validation(detail.into())
    }

    /// HTTP status for server failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// The five operations of the remote task service.
///
/// Implementations hold no state across calls. Futures are not required to be
/// `Send`: the client runs on a single cooperative thread.
#[allow(async_fn_in_trait)]
pub trait TaskService {
    /// Lists tasks matching `filter`, in server order.
    async fn list_tasks(&self, filter: &TaskFilter) -> ApiResult<Vec<Task>>;

    /// Creates a task from a structured draft.
    async fn create_task(&self, draft: &TaskDraft) -> ApiResult<Task>;

    /// Creates a task from a recorded voice note; the server transcribes it.
    async fn create_task_from_audio(&self, clip: &AudioClip) -> ApiResult<Task>;

    /// Marks tasks complete by id or title and returns how many were updated.
    async fn complete_task(&self, task: &TaskRef) -> ApiResult<u64>;

    /// Asks a free-form question about the task data.
    async fn ask(&self, question: &str) -> ApiResult<AskResponse>;
}

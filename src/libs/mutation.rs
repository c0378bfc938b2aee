//! Create and complete operations with settle-time cache invalidation.
//!
//! A mutation is validated locally, sent, and only once the server has
//! confirmed it is every cached task list marked stale. Nothing is applied to
//! cached data speculatively, so a failed mutation leaves the displayed list
//! exactly as it was.

use crate::api::{ApiResult, TaskService};
use crate::libs::audio::AudioClip;
use crate::libs::cache::{InvalidateScope, TaskCache};
use crate::libs::task::{DraftForm, Task, TaskDraft, TaskRef};
use std::rc::Rc;

pub struct Mutations<S> {
    service: Rc<S>,
    cache: Rc<TaskCache<S>>,
}

impl<S: TaskService + 'static> Mutations<S> {
    pub fn new(service: Rc<S>, cache: Rc<TaskCache<S>>) -> Self {
        Self { service, cache }
    }

    /// Submits the form; on success the form is cleared. A rejected form is
    /// left as typed.
    pub async fn create(&self, form: &mut DraftForm) -> ApiResult<Task> {
        let task = self.create_draft(&form.to_draft()?).await?;
        form.reset();
        Ok(task)
    }

    pub async fn create_draft(&self, draft: &TaskDraft) -> ApiResult<Task> {
        draft.validate()?;
        let result = self.service.create_task(draft).await;
        self.settle("create", result)
    }

    pub async fn create_from_audio(&self, clip: &AudioClip) -> ApiResult<Task> {
        clip.validate()?;
        let result = self.service.create_task_from_audio(clip).await;
        self.settle("create_from_audio", result)
    }

    /// Completes the referenced task(s) and returns how many were updated.
    pub async fn complete(&self, task: &TaskRef) -> ApiResult<u64> {
        task.validate()?;
        let result = self.service.complete_task(task).await;
        self.settle("complete", result)
    }

    fn settle<T>(&self, operation: &str, result: ApiResult<T>) -> ApiResult<T> {
        match &result {
            // Any mutation can move tasks in or out of any filtered view.
            Ok(_) => self.cache.invalidate(InvalidateScope::AllTaskLists),
            Err(err) => tracing::debug!(operation, error = %err, "mutation failed, cache left untouched"),
        }
        result
    }
}

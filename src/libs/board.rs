//! The tasks board: one session's view state wired to the core components.
//!
//! A [`Board`] owns the filter currently on screen, the add-task form and the
//! session's [`TaskCache`], and routes user actions through the mutation and
//! ask pipelines. Commands render from it; nothing else holds cache state.

use crate::api::{ApiResult, TaskService};
use crate::libs::ask::{Ask, AskResponse};
use crate::libs::audio::AudioClip;
use crate::libs::cache::{CacheEntry, TaskCache, TaskList};
use crate::libs::filter::TaskFilter;
use crate::libs::mutation::Mutations;
use crate::libs::task::{DraftForm, Task, TaskDraft, TaskRef};
use std::rc::Rc;
use tokio::sync::watch;

pub struct Board<S> {
    filter: TaskFilter,
    draft: DraftForm,
    cache: Rc<TaskCache<S>>,
    mutations: Mutations<S>,
    ask: Ask<S>,
    view: watch::Receiver<CacheEntry>,
    dirty: bool,
}

impl<S: TaskService + 'static> Board<S> {
    pub fn new(service: Rc<S>, filter: TaskFilter) -> Self {
        let cache = Rc::new(TaskCache::new(Rc::clone(&service)));
        let view = cache.subscribe(&filter);
        Self {
            filter,
            draft: DraftForm::default(),
            mutations: Mutations::new(Rc::clone(&service), Rc::clone(&cache)),
            ask: Ask::new(service),
            cache,
            view,
            dirty: true,
        }
    }

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        if filter != self.filter {
            self.view = self.cache.subscribe(&filter);
            self.filter = filter;
            self.dirty = true;
        }
    }

    pub fn cache(&self) -> &TaskCache<S> {
        &self.cache
    }

    pub fn draft(&self) -> &DraftForm {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DraftForm {
        &mut self.draft
    }

    /// Whether the visible list changed since it was last rendered.
    pub fn needs_render(&self) -> bool {
        self.dirty || self.view.has_changed().unwrap_or(false)
    }

    /// Reads the visible list through the cache and marks it rendered.
    pub async fn tasks(&mut self) -> ApiResult<TaskList> {
        let result = self.cache.read(&self.filter).await;
        self.view.mark_unchanged();
        self.dirty = false;
        result
    }

    pub async fn submit_draft(&mut self) -> ApiResult<Task> {
        self.mutations.create(&mut self.draft).await
    }

    pub async fn add(&self, draft: &TaskDraft) -> ApiResult<Task> {
        self.mutations.create_draft(draft).await
    }

    pub async fn add_audio(&self, clip: &AudioClip) -> ApiResult<Task> {
        self.mutations.create_from_audio(clip).await
    }

    pub async fn complete(&self, task: &TaskRef) -> ApiResult<u64> {
        self.mutations.complete(task).await
    }

    pub async fn ask(&self, question: &str) -> ApiResult<AskResponse> {
        self.ask.ask(question).await
    }
}

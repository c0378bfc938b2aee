mod common;

#[cfg(test)]
mod tests {
    use crate::common::FakeTaskService;
    use std::rc::Rc;
    use taskdesk::api::ApiError;
    use taskdesk::libs::cache::{EntryStatus, InvalidateScope, TaskCache};
    use taskdesk::libs::filter::{Status, TaskFilter};
    use test_context::{test_context, AsyncTestContext};

    struct CacheTestContext {
        service: Rc<FakeTaskService>,
        cache: TaskCache<FakeTaskService>,
        todo: TaskFilter,
        done: TaskFilter,
    }

    impl AsyncTestContext for CacheTestContext {
        async fn setup() -> Self {
            let service = Rc::new(FakeTaskService::with_tasks(&[
                ("Buy milk", false),
                ("Call mom", false),
                ("File taxes", true),
            ]));
            CacheTestContext {
                cache: TaskCache::new(Rc::clone(&service)),
                service,
                todo: TaskFilter::new().with_status(Some(Status::Todo)),
                done: TaskFilter::new().with_status(Some(Status::Done)),
            }
        }
    }

    #[test_context(CacheTestContext)]
    #[tokio::test]
    async fn test_concurrent_reads_of_equal_filters_share_one_fetch(ctx: &mut CacheTestContext) {
        let a = TaskFilter::new().with_status(Some(Status::Todo)).with_query(Some("milk"));
        let b = TaskFilter::new().with_query(Some(" milk ")).with_status(Some(Status::Todo));

        let (first, second) = tokio::join!(ctx.cache.read(&a), ctx.cache.read(&b));

        let first = first.unwrap();
        let second = second.unwrap();
        assert_eq!(ctx.service.list_calls.get(), 1);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].title, "Buy milk");
        assert_eq!(ctx.cache.len(), 1);
    }

    #[test_context(CacheTestContext)]
    #[tokio::test]
    async fn test_fresh_entry_is_served_without_fetching(ctx: &mut CacheTestContext) {
        ctx.cache.read(&ctx.todo).await.unwrap();
        let again = ctx.cache.read(&ctx.todo).await.unwrap();

        assert_eq!(ctx.service.list_calls.get(), 1);
        assert_eq!(again.len(), 2);
        assert!(ctx.cache.peek(&ctx.todo).unwrap().is_fresh());
    }

    #[test_context(CacheTestContext)]
    #[tokio::test]
    async fn test_distinct_filters_fetch_separately(ctx: &mut CacheTestContext) {
        let (todo, done) = tokio::join!(ctx.cache.read(&ctx.todo), ctx.cache.read(&ctx.done));

        assert_eq!(ctx.service.list_calls.get(), 2);
        assert_eq!(todo.unwrap().len(), 2);
        assert_eq!(done.unwrap().len(), 1);
    }

    #[test_context(CacheTestContext)]
    #[tokio::test]
    async fn test_server_order_is_preserved(ctx: &mut CacheTestContext) {
        let all = ctx.cache.read(&TaskFilter::new()).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["T1", "T2", "T3"]);
    }

    #[test_context(CacheTestContext)]
    #[tokio::test]
    async fn test_invalidation_is_lazy(ctx: &mut CacheTestContext) {
        ctx.cache.read(&ctx.todo).await.unwrap();
        ctx.cache.read(&ctx.done).await.unwrap();

        ctx.cache.invalidate(InvalidateScope::AllTaskLists);

        assert_eq!(ctx.service.list_calls.get(), 2);
        let entry = ctx.cache.peek(&ctx.todo).unwrap();
        assert_eq!(entry.status, EntryStatus::Stale);
        assert_eq!(entry.tasks.unwrap().len(), 2, "stale data stays visible until refetched");

        ctx.service.insert("Water plants");
        let todo = ctx.cache.read(&ctx.todo).await.unwrap();
        assert_eq!(ctx.service.list_calls.get(), 3);
        assert_eq!(todo.len(), 3);
    }

    #[test_context(CacheTestContext)]
    #[tokio::test]
    async fn test_scoped_invalidation_leaves_other_entries_fresh(ctx: &mut CacheTestContext) {
        ctx.cache.read(&ctx.todo).await.unwrap();
        ctx.cache.read(&ctx.done).await.unwrap();

        ctx.cache.invalidate(InvalidateScope::Filter(ctx.todo.clone()));

        assert_eq!(ctx.cache.peek(&ctx.todo).unwrap().status, EntryStatus::Stale);
        assert!(ctx.cache.peek(&ctx.done).unwrap().is_fresh());
    }

    #[test_context(CacheTestContext)]
    #[tokio::test]
    async fn test_failure_reaches_every_waiter_without_retry(ctx: &mut CacheTestContext) {
        let err = ApiError::Network("connection refused".into());
        ctx.service.fail_next(err.clone());

        let (first, second) = tokio::join!(ctx.cache.read(&ctx.todo), ctx.cache.read(&ctx.todo));

        assert_eq!(first.unwrap_err(), err);
        assert_eq!(second.unwrap_err(), err);
        assert_eq!(ctx.service.list_calls.get(), 1);
        assert_eq!(ctx.cache.peek(&ctx.todo).unwrap().error(), Some(&err));

        let retried = ctx.cache.read(&ctx.todo).await.unwrap();
        assert_eq!(retried.len(), 2);
        assert_eq!(ctx.service.list_calls.get(), 2);
    }

    #[test_context(CacheTestContext)]
    #[tokio::test]
    async fn test_failed_refetch_keeps_last_known_tasks(ctx: &mut CacheTestContext) {
        let before = ctx.cache.read(&ctx.todo).await.unwrap();
        ctx.cache.invalidate(InvalidateScope::AllTaskLists);
        ctx.service.fail_next(ApiError::Server {
            status: 503,
            body: "maintenance".into(),
        });

        assert!(ctx.cache.read(&ctx.todo).await.is_err());

        let entry = ctx.cache.peek(&ctx.todo).unwrap();
        assert!(matches!(entry.status, EntryStatus::Failed(ApiError::Server { status: 503, .. })));
        assert!(Rc::ptr_eq(&entry.tasks.unwrap(), &before));
    }

    #[test_context(CacheTestContext)]
    #[tokio::test]
    async fn test_response_requested_before_invalidation_is_discarded(ctx: &mut CacheTestContext) {
        let gate = ctx.service.hold_next_list();
        let cache = &ctx.cache;
        let service = &ctx.service;
        let todo = &ctx.todo;

        let (outdated, current) = tokio::join!(cache.read(todo), async {
            // The held fetch is now in flight with the old snapshot.
            tokio::task::yield_now().await;
            service.insert("Water plants");
            cache.invalidate(InvalidateScope::AllTaskLists);

            let current = cache.read(todo).await;
            gate.notify_one();
            current
        });

        assert_eq!(service.list_calls.get(), 2);
        assert_eq!(outdated.unwrap().len(), 2);
        assert_eq!(current.unwrap().len(), 3);

        let entry = cache.peek(todo).unwrap();
        assert!(entry.is_fresh());
        assert_eq!(entry.tasks.unwrap().len(), 3);
    }

    #[test_context(CacheTestContext)]
    #[tokio::test]
    async fn test_subscribers_observe_entry_changes(ctx: &mut CacheTestContext) {
        let mut rx = ctx.cache.subscribe(&ctx.todo);
        assert_eq!(rx.borrow().status, EntryStatus::Idle);
        assert!(!rx.has_changed().unwrap());

        ctx.cache.read(&ctx.todo).await.unwrap();
        assert!(rx.has_changed().unwrap());
        {
            let entry = rx.borrow_and_update();
            assert!(entry.is_fresh());
            assert_eq!(entry.fetches, 1);
        }

        ctx.cache.invalidate(InvalidateScope::AllTaskLists);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().status, EntryStatus::Stale);
    }

    #[test_context(CacheTestContext)]
    #[tokio::test]
    async fn test_invalidating_unread_entries_publishes_nothing(ctx: &mut CacheTestContext) {
        let rx = ctx.cache.subscribe(&ctx.done);
        ctx.cache.invalidate(InvalidateScope::AllTaskLists);

        assert!(!rx.has_changed().unwrap());
        assert_eq!(ctx.service.list_calls.get(), 0);
    }

    #[test_context(CacheTestContext)]
    #[tokio::test]
    async fn test_fetched_tasks_honour_completion_invariant(ctx: &mut CacheTestContext) {
        let all = ctx.cache.read(&TaskFilter::new()).await.unwrap();
        assert!(all.iter().all(|task| task.completed == task.completed_at.is_some()));
    }
}

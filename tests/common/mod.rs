#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use tokio::sync::mpsc;
use url_alias::application::services::{AliasPolicy, UrlService};
use url_alias::domain::repositories::UrlRepository;
use url_alias::domain::visit_event::VisitEvent;
use url_alias::domain::visit_worker::record_visit;
use url_alias::infrastructure::persistence::InMemoryUrlRepository;
use url_alias::routes::router;
use url_alias::state::AppState;
use url_alias::utils::alias_generator::RandomAliasGenerator;

/// State backed by a fresh in-memory repository.
///
/// Visit events are left in the returned receiver; use [`apply_visits`] to
/// count them.
pub fn create_test_state() -> (
    AppState,
    mpsc::Receiver<VisitEvent>,
    Arc<InMemoryUrlRepository>,
) {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let (tx, rx) = mpsc::channel(100);

    let url_service = Arc::new(UrlService::new(
        repo.clone(),
        Arc::new(RandomAliasGenerator),
        AliasPolicy::default(),
        tx.clone(),
    ));

    let state = AppState {
        url_service,
        repository: repo.clone(),
        visit_tx: tx,
    };

    (state, rx, repo)
}

pub fn make_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

/// Drains queued visit events into the repository, returning how many were counted.
pub async fn apply_visits(
    rx: &mut mpsc::Receiver<VisitEvent>,
    repo: &dyn UrlRepository,
) -> usize {
    let mut counted = 0;
    while let Ok(event) = rx.try_recv() {
        if record_visit(repo, &event).await {
            counted += 1;
        }
    }
    counted
}

/// Polls until `alias` reaches `expected` visits or the deadline passes.
pub async fn wait_for_visits(repo: &dyn UrlRepository, alias: &str, expected: i64) -> i64 {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        let count = repo
            .get_by_alias(alias)
            .await
            .unwrap()
            .map(|r| r.visit_count)
            .unwrap_or_default();

        if count >= expected || tokio::time::Instant::now() >= deadline {
            return count;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

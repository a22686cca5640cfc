//! Background worker that applies visit increments.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::repositories::UrlRepository;
use crate::domain::visit_event::VisitEvent;

/// Retries after the first failed increment.
const INCREMENT_RETRIES: usize = 3;

/// Consumes visit events until every sender is dropped.
///
/// At most `concurrency` increments run at once. On shutdown the worker waits
/// for in-flight increments before returning.
pub async fn run_visit_worker(
    mut rx: mpsc::Receiver<VisitEvent>,
    repository: Arc<dyn UrlRepository>,
    concurrency: usize,
) {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut in_flight = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let repository = repository.clone();
        in_flight.spawn(async move {
            let _permit = permit;
            record_visit(repository.as_ref(), &event).await;
        });

        while in_flight.try_join_next().is_some() {}
    }

    while in_flight.join_next().await.is_some() {}
    tracing::info!("Visit worker stopped");
}

/// Applies one visit increment, retrying transient failures.
///
/// Returns `true` if the counter was advanced. Failures are logged and
/// counted, never propagated.
pub async fn record_visit(repository: &dyn UrlRepository, event: &VisitEvent) -> bool {
    let backoff = ExponentialBackoff::from_millis(2)
        .factor(10)
        .max_delay(Duration::from_millis(500))
        .map(jitter)
        .take(INCREMENT_RETRIES);

    let result = Retry::start(backoff, || repository.increment_visit_count(event.url_id)).await;

    match result {
        Ok(0) => {
            tracing::debug!(
                url_id = event.url_id,
                alias = %event.alias,
                "Record vanished before its visit was counted"
            );
            false
        }
        Ok(_) => true,
        Err(e) => {
            metrics::counter!("visit_increment_failures_total").increment(1);
            tracing::warn!(
                url_id = event.url_id,
                alias = %event.alias,
                error = %e,
                "Failed to count visit"
            );
            false
        }
    }
}

//! Visit event model for asynchronous visit counting.

/// A successful resolution waiting to be counted.
///
/// Sent from [`crate::application::services::UrlService::resolve`] through a
/// bounded channel to [`crate::domain::visit_worker::run_visit_worker`], so
/// the redirect never waits on the counter write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitEvent {
    pub url_id: i64,
    pub alias: String,
}

impl VisitEvent {
    pub fn new(url_id: i64, alias: impl Into<String>) -> Self {
        Self {
            url_id,
            alias: alias.into(),
        }
    }
}

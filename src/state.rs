use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::UrlService;
use crate::domain::repositories::UrlRepository;
use crate::domain::visit_event::VisitEvent;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
    pub repository: Arc<dyn UrlRepository>,
    pub visit_tx: mpsc::Sender<VisitEvent>,
}

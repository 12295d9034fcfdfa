use std::sync::Arc;

use crate::config::Config;
use crate::export::ExportAdapter;
use crate::navigator::NavigatorConfig;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Navigator settings handed to every new session.
    pub navigator: NavigatorConfig,
    /// Pluggable export backend. Default: HtmlPageExporter.
    pub exporter: Arc<dyn ExportAdapter>,
}

impl AppState {
    pub fn new(config: &Config, exporter: Arc<dyn ExportAdapter>) -> Self {
        Self {
            sessions: SessionStore::new(),
            navigator: config.navigator(),
            exporter,
        }
    }
}

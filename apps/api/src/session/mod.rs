//! Session-scoped context: the current document plus the UI state that rides along with it
//! (active section, export busy flag). Nothing here outlives the process, and sessions left
//! idle past their TTL are swept away.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::editor::EditIntent;
use crate::export::ExportGuard;
use crate::models::resume::Document;
use crate::navigator::{
    observe_all, LayoutObserver, NavigatorConfig, Section, SectionNavigator, ViewportSnapshot,
    VisibilityEvent,
};

pub struct Session {
    pub id: Uuid,
    document: Arc<Document>,
    revision: u64,
    navigator: SectionNavigator,
    observer: LayoutObserver,
    /// Every section's visibility stream from `observer`, merged.
    visibility: BoxStream<'static, VisibilityEvent>,
    export: ExportGuard,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Last time any request touched the session.
    pub last_active: DateTime<Utc>,
}

/// Read-only projection returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: Uuid,
    pub revision: u64,
    pub active_section: Section,
    pub exporting: bool,
    pub document: Arc<Document>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(navigator: NavigatorConfig) -> Self {
        let now = Utc::now();
        let mut observer = LayoutObserver::new(navigator.observation);
        let visibility = observe_all(&mut observer);
        Self {
            id: Uuid::new_v4(),
            document: Arc::new(Document::default()),
            revision: 0,
            navigator: SectionNavigator::new(navigator),
            observer,
            visibility,
            export: ExportGuard::new(),
            created_at: now,
            updated_at: now,
            last_active: now,
        }
    }

    pub fn document(&self) -> Arc<Document> {
        Arc::clone(&self.document)
    }

    pub fn navigator(&self) -> &SectionNavigator {
        &self.navigator
    }

    pub fn export_guard(&self) -> ExportGuard {
        self.export.clone()
    }

    /// Applies `intent`. The document is replaced (never mutated) and the revision bumped
    /// only when the edit changed something. Returns whether it did.
    pub fn apply(&mut self, intent: &EditIntent) -> bool {
        let next = intent.apply(&self.document);
        if next == *self.document {
            debug!(session = %self.id, op = intent.name(), "Edit had no effect");
            return false;
        }
        self.document = Arc::new(next);
        self.revision += 1;
        self.updated_at = Utc::now();
        true
    }

    pub fn handle_visibility(&mut self, events: &[VisibilityEvent]) -> Section {
        self.navigator.handle_batch(events)
    }

    /// Feeds a viewport snapshot to the layout observer, then lets the navigator catch up
    /// on the events it produced.
    pub fn observe_viewport(&mut self, snapshot: &ViewportSnapshot) -> Section {
        let produced = self.observer.update(snapshot);
        debug!(session = %self.id, produced, "Observed viewport");
        self.navigator.catch_up(&mut self.visibility)
    }

    pub fn is_idle(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.last_active)
            .to_std()
            .map_or(false, |idle| idle > ttl)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id,
            revision: self.revision,
            active_section: self.navigator.active(),
            exporting: self.export.is_busy(),
            document: self.document(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// In-memory session registry shared across handlers.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, navigator: NavigatorConfig) -> SessionView {
        let session = Session::new(navigator);
        let view = session.view();
        self.inner.lock().await.insert(session.id, session);
        view
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.inner.lock().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Runs `f` against the session and marks it active.
    pub async fn read<R>(&self, id: Uuid, f: impl FnOnce(&Session) -> R) -> Option<R> {
        self.update(id, |s| f(s)).await
    }

    /// Runs `f` against the session mutably and marks it active.
    pub async fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let mut sessions = self.inner.lock().await;
        let session = sessions.get_mut(&id)?;
        session.last_active = Utc::now();
        Some(f(session))
    }

    /// Drops every session idle for longer than `ttl`. Returns how many were dropped.
    pub async fn purge_idle(&self, ttl: Duration) -> usize {
        let now = Utc::now();
        let mut sessions = self.inner.lock().await;
        let before = sessions.len();
        sessions.retain(|id, session| {
            let idle = session.is_idle(now, ttl);
            if idle {
                debug!(session = %id, created_at = %session.created_at, "Expiring idle session");
            }
            !idle
        });
        before - sessions.len()
    }

    /// Purges idle sessions every `every` until the runtime shuts down.
    pub fn spawn_sweeper(&self, ttl: Duration, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let purged = store.purge_idle(ttl).await;
                if purged > 0 {
                    let remaining = store.len().await;
                    info!(purged, remaining, "Expired idle sessions");
                }
            }
        })
    }
}

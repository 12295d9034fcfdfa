//! Export pipeline.
//!
//! The adapter only ever sees the rendered preview: it captures a snapshot of it, then
//! turns the snapshot into a downloadable artifact. Either stage failing ends the whole
//! export with one error. There is no retry, timeout or cancellation; the busy flag is
//! released however the export ends so the user can try again.

pub mod adapter;
pub mod guard;
pub mod page;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::{error, info};

use crate::preview::Preview;

pub use adapter::HtmlPageExporter;
pub use guard::ExportGuard;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    Busy,

    #[error("capture failed: {0}")]
    Capture(String),

    #[error("document generation failed: {0}")]
    Generate(String),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Captured rendering of the preview.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub markup: String,
    pub width_px: u32,
    pub height_px: u32,
}

/// A finished, downloadable document.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

#[async_trait]
pub trait ExportAdapter: Send + Sync {
    async fn capture(&self, preview: &Preview) -> Result<Snapshot, ExportError>;

    async fn generate(&self, snapshot: Snapshot) -> Result<ExportArtifact, ExportError>;
}

/// Runs capture then generate under the busy flag.
///
/// Returns `ExportError::Busy` without touching the adapter when another export holds the flag.
pub async fn run_export(
    adapter: &dyn ExportAdapter,
    guard: &ExportGuard,
    preview: &Preview,
) -> Result<ExportArtifact, ExportError> {
    let _ticket = guard.try_begin().ok_or(ExportError::Busy)?;

    let result = async {
        let snapshot = adapter.capture(preview).await?;
        info!(
            width = snapshot.width_px,
            height = snapshot.height_px,
            "Captured preview snapshot"
        );
        adapter.generate(snapshot).await
    }
    .await;

    match &result {
        Ok(artifact) => info!(
            file = artifact.file_name,
            bytes = artifact.bytes.len(),
            "Export complete"
        ),
        Err(e) => error!("Export failed: {e}"),
    }
    result
}

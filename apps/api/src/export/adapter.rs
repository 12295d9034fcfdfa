//! Built-in export adapter: a standalone, print-ready HTML page.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::export::page::{place_on_page, A4_WIDTH_MM};
use crate::export::{ExportAdapter, ExportArtifact, ExportError, Snapshot};
use crate::preview::Preview;

pub const EXPORT_FILE_NAME: &str = "resume.html";

/// A4 width at 96 dpi.
const SNAPSHOT_WIDTH_PX: u32 = 794;
const LINE_HEIGHT_PX: u32 = 24;
const PADDING_PX: u32 = 96;

#[derive(Debug, Clone)]
pub struct HtmlPageExporter {
    pub page_width_mm: f64,
}

impl Default for HtmlPageExporter {
    fn default() -> Self {
        Self {
            page_width_mm: A4_WIDTH_MM,
        }
    }
}

impl HtmlPageExporter {
    pub fn new(page_width_mm: f64) -> Self {
        Self { page_width_mm }
    }
}

#[async_trait]
impl ExportAdapter for HtmlPageExporter {
    async fn capture(&self, preview: &Preview) -> Result<Snapshot, ExportError> {
        let lines = u32::try_from(preview.line_count())
            .map_err(|_| ExportError::Capture("preview too large to capture".to_string()))?;
        Ok(Snapshot {
            markup: preview.to_html(),
            width_px: SNAPSHOT_WIDTH_PX,
            height_px: lines.saturating_mul(LINE_HEIGHT_PX).saturating_add(PADDING_PX),
        })
    }

    async fn generate(&self, snapshot: Snapshot) -> Result<ExportArtifact, ExportError> {
        let placement = place_on_page(snapshot.width_px, snapshot.height_px, self.page_width_mm)?;
        debug!(
            width_mm = placement.width_mm,
            height_mm = placement.height_mm,
            pages = placement.page_count(),
            "Placed snapshot on page"
        );
        let document = format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>Resume</title>\n<style>\n@page {{ size: {w}mm {h}mm; margin: 0; }}\n\
             body {{ width: {w}mm; margin: 0 auto; font-family: sans-serif; }}\n</style>\n\
             </head>\n<body>\n{markup}</body>\n</html>\n",
            w = placement.width_mm,
            h = placement.height_mm,
            markup = snapshot.markup,
        );
        Ok(ExportArtifact {
            file_name: EXPORT_FILE_NAME,
            content_type: "text/html; charset=utf-8",
            bytes: Bytes::from(document),
        })
    }
}

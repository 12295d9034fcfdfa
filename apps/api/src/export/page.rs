//! Page-sizing arithmetic for exported snapshots.
//!
//! A captured snapshot is scaled to the page width; the derived height keeps the aspect
//! ratio and is rounded to whole millimetres.

use serde::{Deserialize, Serialize};

use crate::export::ExportError;

/// ISO A4, portrait.
pub const A4_WIDTH_MM: f64 = 210.0;
pub const A4_HEIGHT_MM: f64 = 297.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePlacement {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PagePlacement {
    /// Number of A4 pages the placed image spans.
    pub fn page_count(&self) -> u32 {
        ((self.height_mm / A4_HEIGHT_MM).ceil() as u32).max(1)
    }
}

pub fn place_on_page(
    snapshot_width_px: u32,
    snapshot_height_px: u32,
    page_width_mm: f64,
) -> Result<PagePlacement, ExportError> {
    if snapshot_width_px == 0 {
        return Err(ExportError::InvalidSnapshot(
            "snapshot has zero width".to_string(),
        ));
    }
    if !(page_width_mm.is_finite() && page_width_mm > 0.0) {
        return Err(ExportError::Generate(format!(
            "page width must be a positive number of millimetres, got {page_width_mm}"
        )));
    }
    let height_mm =
        (f64::from(snapshot_height_px) * page_width_mm / f64::from(snapshot_width_px)).round();
    Ok(PagePlacement {
        width_mm: page_width_mm,
        height_mm,
    })
}

//! Scroll-to-section.
//!
//! The target offset places the section's heading just below the fixed header; the
//! container then moves there along an ease-in-out curve instead of jumping.

use serde::{Deserialize, Serialize};

use crate::navigator::geometry::{Rect, SectionRegion, HEADER_OFFSET_PX};
use crate::navigator::section::Section;

pub const DEFAULT_SCROLL_DURATION_MS: u64 = 450;
pub const DEFAULT_FRAME_MS: u64 = 16;
/// Upper bound on a planned animation; longer requests are shortened to this.
pub const MAX_SCROLL_DURATION_MS: u64 = 5_000;

/// The form's scroll container, as seen by the navigator.
pub trait ScrollContainer {
    fn scroll_top(&self) -> f64;
    /// Client rectangle of the container.
    fn bounds(&self) -> Rect;
    /// Client rectangle of the section's element, if it is mounted.
    fn section_bounds(&self, section: Section) -> Option<Rect>;
    /// Largest reachable scroll offset, when known.
    fn max_scroll_top(&self) -> Option<f64> {
        None
    }
}

/// Offset that brings `element` to `clearance` pixels below the container's top edge.
pub fn scroll_target(element: &Rect, container: &Rect, scroll_top: f64, clearance: f64) -> f64 {
    (element.top - container.top + scroll_top - clearance).max(0.0)
}

fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollAnimation {
    pub section: Section,
    pub from: f64,
    pub to: f64,
    pub duration_ms: u64,
}

impl ScrollAnimation {
    /// Scroll offset `elapsed_ms` into the animation.
    pub fn position_at(&self, elapsed_ms: u64) -> f64 {
        if self.duration_ms == 0 || elapsed_ms >= self.duration_ms {
            return self.to;
        }
        let t = elapsed_ms as f64 / self.duration_ms as f64;
        self.from + (self.to - self.from) * ease_in_out_cubic(t)
    }

    /// Offsets for each frame, the last one exactly `to`.
    pub fn frames(&self, frame_ms: u64) -> Vec<f64> {
        let frame_ms = frame_ms.max(1);
        let count = self.duration_ms.div_ceil(frame_ms).max(1);
        (1..=count)
            .map(|k| self.position_at(k.saturating_mul(frame_ms).min(self.duration_ms)))
            .collect()
    }
}

/// Plans the animation for `section`. `None` when the container or the section is not mounted.
pub fn plan_scroll(
    container: Option<&dyn ScrollContainer>,
    section: Section,
    clearance: f64,
    duration_ms: u64,
) -> Option<ScrollAnimation> {
    let container = container?;
    let element = container.section_bounds(section)?;
    let from = container.scroll_top();
    let mut to = scroll_target(&element, &container.bounds(), from, clearance);
    if let Some(max) = container.max_scroll_top() {
        to = to.min(max.max(0.0));
    }
    Some(ScrollAnimation {
        section,
        from,
        to,
        duration_ms: duration_ms.min(MAX_SCROLL_DURATION_MS),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// LayoutSnapshot
// ────────────────────────────────────────────────────────────────────────────

/// Data-only scroll container: what a client reports about its form pane.
///
/// Section tops are in content coordinates; client rectangles are derived from the
/// current scroll offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    pub container: Rect,
    pub scroll_top: f64,
    #[serde(default)]
    pub content_height: Option<f64>,
    pub sections: Vec<SectionRegion>,
}

impl ScrollContainer for LayoutSnapshot {
    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn bounds(&self) -> Rect {
        self.container
    }

    fn section_bounds(&self, section: Section) -> Option<Rect> {
        self.sections
            .iter()
            .find(|r| r.section == section)
            .map(|r| Rect::new(self.container.top + r.top - self.scroll_top, r.height))
    }

    fn max_scroll_top(&self) -> Option<f64> {
        self.content_height.map(|h| h - self.container.height)
    }
}

impl Default for LayoutSnapshot {
    fn default() -> Self {
        Self {
            container: Rect::new(HEADER_OFFSET_PX, 800.0),
            scroll_top: 0.0,
            content_height: None,
            sections: Vec::new(),
        }
    }
}

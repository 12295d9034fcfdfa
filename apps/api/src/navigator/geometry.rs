//! Vertical geometry for section visibility.
//!
//! All values are CSS pixels along the scroll axis. Horizontal extent never affects
//! which section is active, so it is not modelled.

use serde::{Deserialize, Serialize};

use crate::navigator::section::Section;

/// Height of the fixed header; sections hidden beneath it do not count as visible.
pub const HEADER_OFFSET_PX: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Length of the overlap with `other`, zero when disjoint.
    pub fn overlap(&self, other: &Rect) -> f64 {
        (self.bottom().min(other.bottom()) - self.top.max(other.top)).max(0.0)
    }

    pub fn contains_point(&self, y: f64) -> bool {
        y >= self.top && y <= self.bottom()
    }
}

/// Visibility rule for the active-section observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationConfig {
    /// Fraction of a section that must be inside the adjusted viewport.
    pub threshold: f64,
    /// Pixels trimmed from the top of the viewport.
    pub header_offset: f64,
    /// Fraction of the viewport height trimmed from the bottom.
    pub bottom_inset_fraction: f64,
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            header_offset: HEADER_OFFSET_PX,
            bottom_inset_fraction: 0.2,
        }
    }
}

impl ObservationConfig {
    /// Shrinks `viewport` by the header margin on top and the inset on the bottom.
    pub fn adjusted_viewport(&self, viewport: Rect) -> Rect {
        let bottom_inset = viewport.height * self.bottom_inset_fraction;
        Rect::new(
            viewport.top + self.header_offset,
            viewport.height - self.header_offset - bottom_inset,
        )
    }
}

/// Fraction of `target` inside `root`.
///
/// A zero-height target sitting inside the root counts as fully visible.
pub fn intersection_ratio(target: &Rect, root: &Rect) -> f64 {
    if target.height <= 0.0 {
        return if root.contains_point(target.top) {
            1.0
        } else {
            0.0
        };
    }
    (target.overlap(root) / target.height).clamp(0.0, 1.0)
}

pub fn is_intersecting(target: &Rect, root: &Rect) -> bool {
    if target.height <= 0.0 {
        return root.contains_point(target.top);
    }
    target.overlap(root) > 0.0
}

/// One rendered section, positioned in content coordinates (0 = top of the scrolled content).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRegion {
    pub section: Section,
    pub top: f64,
    pub height: f64,
}

impl SectionRegion {
    pub fn rect(&self) -> Rect {
        Rect::new(self.top, self.height)
    }
}

/// Scroll position and section layout of the form's scroll container at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportSnapshot {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub sections: Vec<SectionRegion>,
}

impl ViewportSnapshot {
    /// The visible window in content coordinates.
    pub fn viewport(&self) -> Rect {
        Rect::new(self.scroll_top, self.viewport_height)
    }

    pub fn region(&self, section: Section) -> Option<&SectionRegion> {
        self.sections.iter().find(|r| r.section == section)
    }
}

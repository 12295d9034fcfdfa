//! Section navigator. Tracks which form section is in focus and plans scroll-to-section.
//!
//! The active section only moves on visibility events: a section becomes active once at
//! least `threshold` of it sits inside the adjusted viewport. Within a batch the last
//! qualifying event wins. Scrolling to a section never sets the active section directly;
//! the observer reports it once the section arrives.

pub mod geometry;
pub mod observer;
pub mod scroll;
pub mod section;

use futures::{FutureExt, Stream, StreamExt};
use serde::{Deserialize, Serialize};

pub use geometry::{ObservationConfig, ViewportSnapshot};
pub use observer::{observe_all, LayoutObserver, VisibilityEvent};
pub use scroll::{LayoutSnapshot, ScrollAnimation, ScrollContainer};
pub use section::Section;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorConfig {
    pub observation: ObservationConfig,
    /// Gap left above a section's heading after scroll-to-section.
    pub header_clearance: f64,
    pub scroll_duration_ms: u64,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            observation: ObservationConfig::default(),
            header_clearance: geometry::HEADER_OFFSET_PX,
            scroll_duration_ms: scroll::DEFAULT_SCROLL_DURATION_MS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SectionNavigator {
    active: Section,
    config: NavigatorConfig,
}

impl SectionNavigator {
    pub fn new(config: NavigatorConfig) -> Self {
        Self {
            active: Section::Personal,
            config,
        }
    }

    pub fn active(&self) -> Section {
        self.active
    }

    /// Applies one event. Returns true when the active section changed.
    pub fn handle_event(&mut self, event: &VisibilityEvent) -> bool {
        if !event.is_intersecting || event.ratio < self.config.observation.threshold {
            return false;
        }
        let changed = self.active != event.section;
        self.active = event.section;
        changed
    }

    /// Applies a notification batch in order; the last qualifying event wins.
    pub fn handle_batch(&mut self, events: &[VisibilityEvent]) -> Section {
        for event in events {
            self.handle_event(event);
        }
        self.active
    }

    /// Applies every event already waiting on `events` without blocking.
    ///
    /// Merged per-section streams do not preserve page order, so the drained batch is put
    /// back into page order before it is applied.
    pub fn catch_up<S>(&mut self, events: &mut S) -> Section
    where
        S: Stream<Item = VisibilityEvent> + Unpin,
    {
        let mut batch = Vec::new();
        while let Some(Some(event)) = events.next().now_or_never() {
            batch.push(event);
        }
        batch.sort_by_key(|e| e.section);
        self.handle_batch(&batch)
    }

    /// Plans a smooth scroll that brings `section` under the fixed header.
    ///
    /// Returns `None` when the container is not mounted or the section has no element.
    pub fn scroll_to_section(
        &self,
        container: Option<&dyn ScrollContainer>,
        section: Section,
    ) -> Option<ScrollAnimation> {
        scroll::plan_scroll(
            container,
            section,
            self.config.header_clearance,
            self.config.scroll_duration_ms,
        )
    }
}

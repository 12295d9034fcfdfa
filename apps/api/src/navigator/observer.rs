//! Visibility observation.
//!
//! `VisibilityObserver` is the seam between the navigator and whatever knows where sections
//! are on screen. `LayoutObserver` derives events from the viewport snapshots a client
//! reports; tests feed scripted streams instead.

use std::collections::HashMap;

use futures::channel::mpsc;
use futures::stream::{self, BoxStream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::navigator::geometry::{
    intersection_ratio, is_intersecting, ObservationConfig, ViewportSnapshot,
};
use crate::navigator::section::Section;

/// A section's visibility at the moment it crossed the observation threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityEvent {
    pub section: Section,
    /// Fraction of the section inside the adjusted viewport, 0.0–1.0.
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// Source of visibility events for one section at a time.
pub trait VisibilityObserver {
    fn observe(&mut self, section: Section) -> BoxStream<'static, VisibilityEvent>;
}

/// Subscribes to every section in page order and merges the streams.
pub fn observe_all<O: VisibilityObserver + ?Sized>(
    observer: &mut O,
) -> BoxStream<'static, VisibilityEvent> {
    let streams: Vec<_> = Section::ALL.iter().map(|s| observer.observe(*s)).collect();
    stream::select_all(streams).boxed()
}

// ────────────────────────────────────────────────────────────────────────────
// Threshold crossing
// ────────────────────────────────────────────────────────────────────────────

/// Turns successive viewport snapshots into threshold-crossing events.
///
/// A section is reported the first time it is seen and afterwards only when it moves
/// across the threshold, in either direction.
#[derive(Debug, Clone, Default)]
pub struct IntersectionTracker {
    config: ObservationConfig,
    qualified: HashMap<Section, bool>,
}

impl IntersectionTracker {
    pub fn new(config: ObservationConfig) -> Self {
        Self {
            config,
            qualified: HashMap::new(),
        }
    }

    /// Events for `snapshot`, in page order.
    pub fn observe(&mut self, snapshot: &ViewportSnapshot) -> Vec<VisibilityEvent> {
        let root = self.config.adjusted_viewport(snapshot.viewport());
        let mut events = Vec::new();

        for section in Section::ALL {
            let Some(region) = snapshot.region(section) else {
                continue;
            };
            let rect = region.rect();
            let ratio = intersection_ratio(&rect, &root);
            let intersecting = is_intersecting(&rect, &root);
            let qualifies = intersecting && ratio >= self.config.threshold;

            let previous = self.qualified.insert(section, qualifies);
            if previous != Some(qualifies) {
                events.push(VisibilityEvent {
                    section,
                    ratio,
                    is_intersecting: intersecting,
                });
            }
        }
        events
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LayoutObserver
// ────────────────────────────────────────────────────────────────────────────

/// Observer driven by viewport snapshots pushed through `update`.
///
/// Streams end once the observer is dropped.
#[derive(Default)]
pub struct LayoutObserver {
    tracker: IntersectionTracker,
    subscribers: HashMap<Section, Vec<mpsc::UnboundedSender<VisibilityEvent>>>,
}

impl LayoutObserver {
    pub fn new(config: ObservationConfig) -> Self {
        Self {
            tracker: IntersectionTracker::new(config),
            subscribers: HashMap::new(),
        }
    }

    /// Evaluates `snapshot` and delivers the resulting events. Returns how many were produced.
    pub fn update(&mut self, snapshot: &ViewportSnapshot) -> usize {
        let events = self.tracker.observe(snapshot);
        for event in &events {
            if let Some(senders) = self.subscribers.get_mut(&event.section) {
                senders.retain(|tx| tx.unbounded_send(*event).is_ok());
            }
        }
        events.len()
    }
}

impl VisibilityObserver for LayoutObserver {
    fn observe(&mut self, section: Section) -> BoxStream<'static, VisibilityEvent> {
        let (tx, rx) = mpsc::unbounded();
        self.subscribers.entry(section).or_default().push(tx);
        rx.boxed()
    }
}

use crate::{
    foundation::core::clamp_fraction,
    viewport::geometry::{IntersectionEntry, RegionId},
};

/// One-shot visibility detector for a single region.
///
/// Fires the first time an observation reports the bound region intersecting the viewport
/// with a visible fraction at or above the threshold. After that every observation is
/// ignored for the lifetime of the trigger; a remount needs a fresh trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityTrigger {
    threshold: f64,
    bound: Option<RegionId>,
    fired: bool,
}

impl VisibilityTrigger {
    /// Trigger with `threshold` clamped into `[0, 1]`.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: clamp_fraction(threshold),
            bound: None,
            fired: false,
        }
    }

    /// Visibility fraction required to fire.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether the trigger already fired.
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Region currently observed, if any.
    pub fn bound_region(&self) -> Option<RegionId> {
        self.bound
    }

    /// Start observing `region`.
    ///
    /// `None` means the region is not mounted yet: that is a silent no-op and a later call
    /// can bind. Returns whether the trigger is bound afterwards.
    pub fn bind(&mut self, region: Option<RegionId>) -> bool {
        if let Some(region) = region {
            self.bound = Some(region);
        }
        self.bound.is_some()
    }

    /// Stop observing. Idempotent.
    pub fn unbind(&mut self) {
        self.bound = None;
    }

    /// Feed one batch of observations. Returns true exactly once, on the batch that fires.
    pub fn observe(&mut self, entries: &[IntersectionEntry]) -> bool {
        let Some(bound) = self.bound else {
            return false;
        };
        if self.fired {
            return false;
        }
        let hit = entries
            .iter()
            .filter(|e| e.region == bound)
            .any(|e| e.intersecting && e.ratio >= self.threshold);
        if hit {
            self.fired = true;
            tracing::debug!(region = bound.0, threshold = self.threshold, "visibility trigger fired");
        }
        hit
    }

    /// Like [`VisibilityTrigger::observe`], invoking `on_visible` when the trigger fires.
    pub fn observe_with(&mut self, entries: &[IntersectionEntry], on_visible: impl FnOnce()) {
        if self.observe(entries) {
            on_visible();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/visibility.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::foundation::core::deserialize_clamped_ms;
use crate::reveal::options::TypewriterOptions;

/// JSON-facing scene: a viewport, the regions it can scroll over and a scroll script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDef {
    /// Visible height of the viewport.
    pub viewport_height: f64,
    /// Playback length.
    #[serde(deserialize_with = "deserialize_clamped_ms")]
    pub duration_ms: u64,
    /// Scroll offset at t=0.
    #[serde(default)]
    pub initial_offset: f64,
    /// Observed regions, in document order.
    pub regions: Vec<RegionDef>,
    /// Timed scroll positions, in non-decreasing time order.
    #[serde(default)]
    pub scroll: Vec<ScrollStepDef>,
}

/// One observed region and the typewriter it gates, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionDef {
    /// Unique, non-empty id used in output.
    pub id: String,
    /// Top edge in document units.
    pub top: f64,
    /// Height in document units.
    pub height: f64,
    /// Visibility fraction that starts the region. Without one the typewriter follows its
    /// own `start_animation` flag from t=0.
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Typewriter revealed in this region.
    #[serde(default)]
    pub typewriter: Option<TypewriterOptions>,
}

/// Scroll the viewport to `offset` at `at_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrollStepDef {
    /// When the scroll happens.
    #[serde(deserialize_with = "deserialize_clamped_ms")]
    pub at_ms: u64,
    /// New viewport offset.
    pub offset: f64,
}

//! Typereveal reveals text one character at a time once it scrolls into view.
//!
//! Everything runs on a deterministic [`VirtualClock`]:
//!
//! - Drive a single [`TypewriterEngine`] through any [`TimerHost`] into a [`RevealSink`]
//! - Gate it on a [`VisibilityTrigger`] fed from [`Viewport::observe`]
//! - Or load a JSON [`Scene`] and play it with a [`ScenePlayer`] into a [`SceneSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

mod clock;
mod reveal;
mod scene;
mod trigger;
mod viewport;

pub use crate::clock::timer::{Fired, Tagged, TimerHandle, TimerHost};
pub use crate::clock::virtual_clock::VirtualClock;
pub use crate::foundation::core::{TimeMs, clamp_fraction, clamp_ms};
pub use crate::foundation::error::{RevealError, RevealResult};
pub use crate::reveal::engine::{CURSOR_BLINK_MS, EngineTimer, TypewriterEngine};
pub use crate::reveal::options::{DEFAULT_CURSOR, DEFAULT_SPEED_MS, TypewriterOptions};
pub use crate::reveal::sink::{RecordingSink, RevealFrame, RevealSink};
pub use crate::reveal::state::{Phase, RevealState};
pub use crate::scene::document::Scene;
pub use crate::scene::model::{RegionDef, SceneDef, ScrollStepDef};
pub use crate::scene::playback::{SceneEvent, ScenePlayer, SceneRecorder, SceneSink};
pub use crate::trigger::visibility::VisibilityTrigger;
pub use crate::viewport::geometry::{IntersectionEntry, Region, RegionId, Viewport};

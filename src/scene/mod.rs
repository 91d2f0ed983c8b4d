//! JSON scenes: a viewport scrolled over regions, each optionally revealing text once visible.

pub(crate) mod document;
pub(crate) mod model;
pub(crate) mod playback;
pub(crate) mod validate;

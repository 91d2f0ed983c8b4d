//! One-shot visibility triggers.

pub(crate) mod visibility;

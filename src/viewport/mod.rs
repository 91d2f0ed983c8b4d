//! Vertical viewport geometry and intersection observations.

pub(crate) mod geometry;

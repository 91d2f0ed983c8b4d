//! Host event loop: timer handles, the timer host contract and a deterministic virtual clock.

pub(crate) mod timer;
pub(crate) mod virtual_clock;

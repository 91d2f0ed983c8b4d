use std::fmt;

use serde::Deserialize as _;

/// An instant on the host timeline, in milliseconds since the host started.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct TimeMs(pub u64);

impl TimeMs {
    /// Start of the timeline.
    pub const ZERO: Self = Self(0);

    /// The instant `delay_ms` after `self`, saturating at the end of the timeline.
    pub fn after(self, delay_ms: u64) -> Self {
        Self(self.0.saturating_add(delay_ms))
    }

    /// Milliseconds elapsed from `earlier` to `self`, or zero if `earlier` is later.
    pub fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for TimeMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Clamp a signed millisecond count to a duration. Negative values become zero.
pub fn clamp_ms(ms: i64) -> u64 {
    ms.max(0) as u64
}

/// Clamp a fraction into `[0, 1]`. NaN becomes zero.
pub fn clamp_fraction(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Lenient duration field: accepts any JSON number and clamps it to a whole,
/// non-negative millisecond count.
pub(crate) fn deserialize_clamped_ms<'de, D>(d: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = f64::deserialize(d)?;
    if v.is_nan() || v <= 0.0 {
        return Ok(0);
    }
    // Float-to-int `as` saturates, so huge values pin to u64::MAX.
    Ok(v.floor() as u64)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

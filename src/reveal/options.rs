use crate::foundation::core::{clamp_ms, deserialize_clamped_ms};

/// Default delay between revealed characters.
pub const DEFAULT_SPEED_MS: u64 = 50;
/// Default cursor glyph.
pub const DEFAULT_CURSOR: &str = "_";

/// Consumer-facing configuration for one [`crate::TypewriterEngine`].
///
/// Durations are lenient when deserialized: negative numbers clamp to zero so a malformed
/// config still renders.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypewriterOptions {
    /// Text to reveal.
    pub text: String,
    /// Delay between characters, in milliseconds.
    #[serde(deserialize_with = "deserialize_clamped_ms")]
    pub speed_ms: u64,
    /// Delay between the start signal and the first character tick, in milliseconds.
    #[serde(deserialize_with = "deserialize_clamped_ms")]
    pub start_delay_ms: u64,
    /// Whether a blinking cursor trails the revealed text.
    pub show_cursor: bool,
    /// Cursor glyph appended while the cursor is visible.
    pub cursor_char: String,
    /// Start signal. The reveal only runs while this is true.
    pub start_animation: bool,
}

impl Default for TypewriterOptions {
    fn default() -> Self {
        Self {
            text: String::new(),
            speed_ms: DEFAULT_SPEED_MS,
            start_delay_ms: 0,
            show_cursor: true,
            cursor_char: DEFAULT_CURSOR.to_owned(),
            start_animation: true,
        }
    }
}

impl TypewriterOptions {
    /// Options for `text` with every other field at its default.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the per-character delay. Negative values clamp to zero.
    pub fn speed(mut self, ms: i64) -> Self {
        self.speed_ms = clamp_ms(ms);
        self
    }

    /// Set the start delay. Negative values clamp to zero.
    pub fn start_delay(mut self, ms: i64) -> Self {
        self.start_delay_ms = clamp_ms(ms);
        self
    }

    /// Enable or disable the trailing cursor.
    pub fn show_cursor(mut self, show: bool) -> Self {
        self.show_cursor = show;
        self
    }

    /// Set the cursor glyph.
    pub fn cursor_char(mut self, glyph: impl Into<String>) -> Self {
        self.cursor_char = glyph.into();
        self
    }

    /// Set the initial start signal.
    pub fn start_animation(mut self, start: bool) -> Self {
        self.start_animation = start;
        self
    }

    /// Whether switching from `self` to `next` invalidates an in-flight reveal.
    pub(crate) fn requires_reset(&self, next: &Self) -> bool {
        self.text != next.text
            || self.speed_ms != next.speed_ms
            || self.start_delay_ms != next.start_delay_ms
            || self.show_cursor != next.show_cursor
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/options.rs"]
mod tests;

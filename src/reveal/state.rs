/// Lifecycle of one reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No text, or the start signal has not been given.
    Idle,
    /// Start signal received; waiting out the start delay.
    Pending,
    /// Revealing one character per tick.
    Revealing,
    /// Every character revealed; only the cursor keeps blinking.
    Complete,
}

/// Progress of a reveal over one source text.
///
/// Counts are in `char`s, so every snapshot is a valid UTF-8 prefix of the source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealState {
    source: String,
    // Byte offset just past each char.
    ends: Vec<usize>,
    revealed: usize,
    complete: bool,
    cursor_visible: bool,
}

impl RevealState {
    /// Fresh state for `source` with nothing revealed and the cursor visible.
    pub fn new(source: &str) -> Self {
        let ends = source.char_indices().map(|(i, c)| i + c.len_utf8()).collect();
        Self {
            source: source.to_owned(),
            ends,
            revealed: 0,
            complete: false,
            cursor_visible: true,
        }
    }

    /// Full source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Length of the source in chars.
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    /// Whether the source text is empty.
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// Number of chars revealed so far.
    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    /// Whether the reveal finished. Empty text is trivially complete.
    pub fn is_complete(&self) -> bool {
        self.complete || self.is_empty()
    }

    /// Current cursor blink phase.
    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Revealed prefix of the source.
    pub fn snapshot(&self) -> &str {
        let end = match self.revealed {
            0 => 0,
            n => self.ends[n - 1],
        };
        &self.source[..end]
    }

    /// Reveal one more char. Returns false once everything is revealed.
    pub(crate) fn reveal_next(&mut self) -> bool {
        if self.revealed >= self.len() {
            return false;
        }
        self.revealed += 1;
        true
    }

    /// Mark the reveal finished. Returns true only on the first call.
    pub(crate) fn mark_complete(&mut self) -> bool {
        !std::mem::replace(&mut self.complete, true)
    }

    pub(crate) fn toggle_cursor(&mut self) -> bool {
        self.cursor_visible = !self.cursor_visible;
        self.cursor_visible
    }

    pub(crate) fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/state.rs"]
mod tests;

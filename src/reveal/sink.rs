use crate::foundation::core::TimeMs;

/// One render of a typewriter: the revealed snapshot and the cursor state at an instant.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RevealFrame {
    /// Host time the frame was produced at.
    pub at: TimeMs,
    /// Revealed prefix of the source text.
    pub snapshot: String,
    /// Whether the cursor glyph is currently shown.
    pub cursor_visible: bool,
    /// Renderable string: the snapshot plus the cursor glyph when visible.
    pub display: String,
}

/// Sink contract for consuming engine output.
///
/// Ordering contract: `render` is called in non-decreasing `at` order, and snapshots only
/// grow between resets.
pub trait RevealSink {
    /// Called whenever the display string may have changed.
    fn render(&mut self, frame: &RevealFrame);
    /// Called once when the final character is revealed.
    fn complete(&mut self, _at: TimeMs) {}
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct RecordingSink {
    frames: Vec<RevealFrame>,
    completions: Vec<TimeMs>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every frame in delivery order.
    pub fn frames(&self) -> &[RevealFrame] {
        &self.frames
    }

    /// Instants at which completion was reported.
    pub fn completions(&self) -> &[TimeMs] {
        &self.completions
    }

    /// Most recent frame, if any.
    pub fn last(&self) -> Option<&RevealFrame> {
        self.frames.last()
    }

    /// Snapshots with cursor-only re-renders collapsed.
    pub fn snapshots(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for f in &self.frames {
            if out.last() != Some(&f.snapshot.as_str()) {
                out.push(&f.snapshot);
            }
        }
        out
    }

    /// Snapshot changes paired with the instant they first appeared.
    pub fn timeline(&self) -> Vec<(TimeMs, &str)> {
        let mut out: Vec<(TimeMs, &str)> = Vec::new();
        for f in &self.frames {
            if out.last().map(|(_, s)| *s) != Some(f.snapshot.as_str()) {
                out.push((f.at, &f.snapshot));
            }
        }
        out
    }

    /// Drop everything recorded so far.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.completions.clear();
    }
}

impl RevealSink for RecordingSink {
    fn render(&mut self, frame: &RevealFrame) {
        self.frames.push(frame.clone());
    }

    fn complete(&mut self, at: TimeMs) {
        self.completions.push(at);
    }
}

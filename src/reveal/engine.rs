use crate::{
    clock::timer::{TimerHandle, TimerHost},
    foundation::core::TimeMs,
    reveal::options::TypewriterOptions,
    reveal::sink::{RevealFrame, RevealSink},
    reveal::state::{Phase, RevealState},
};

/// Cursor blink half-period. Independent of the reveal speed.
pub const CURSOR_BLINK_MS: u64 = 500;

/// Timer payloads a [`TypewriterEngine`] arms on its host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineTimer {
    /// Start delay elapsed; begin ticking characters.
    StartDelay,
    /// Reveal the next character.
    Emit,
    /// Toggle the cursor.
    Blink,
}

/// Cancellable, restartable character-by-character text reveal.
///
/// The engine never runs on its own: it arms timers on a [`TimerHost`] and the host hands
/// each due timer back through [`TypewriterEngine::on_timer`]. The engine owns at most one
/// emission handle (start delay or character tick) and at most one blink handle. Every
/// reset cancels both before anything new is armed, and a dispatched handle that is not the
/// one currently owned is dropped, so a timer from before a reset can never touch the new
/// state.
#[derive(Debug)]
pub struct TypewriterEngine {
    options: TypewriterOptions,
    state: RevealState,
    phase: Phase,
    emission: Option<TimerHandle>,
    blink: Option<TimerHandle>,
}

impl TypewriterEngine {
    /// Create an idle engine. Nothing is armed until [`TypewriterEngine::mount`].
    pub fn new(options: TypewriterOptions) -> Self {
        let state = RevealState::new(&options.text);
        Self {
            options,
            state,
            phase: Phase::Idle,
            emission: None,
            blink: None,
        }
    }

    /// Current options.
    pub fn options(&self) -> &TypewriterOptions {
        &self.options
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Reveal progress.
    pub fn state(&self) -> &RevealState {
        &self.state
    }

    /// Whether the reveal finished. Empty text counts as complete.
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Number of timers this engine currently owns.
    pub fn armed_timers(&self) -> usize {
        usize::from(self.emission.is_some()) + usize::from(self.blink.is_some())
    }

    /// Renderable string: the snapshot plus the cursor glyph when visible. Empty while idle.
    pub fn display(&self) -> String {
        if self.phase == Phase::Idle {
            return String::new();
        }
        let mut out = String::from(self.state.snapshot());
        if self.options.show_cursor && self.state.cursor_visible() {
            out.push_str(&self.options.cursor_char);
        }
        out
    }

    /// Bring the engine up on `host`, starting the reveal if the start signal is set.
    pub fn mount<H, S>(&mut self, host: &mut H, sink: &mut S)
    where
        H: TimerHost<EngineTimer> + ?Sized,
        S: RevealSink + ?Sized,
    {
        self.reset(host);
        self.try_start(host, sink);
    }

    /// Replace the text. A different text restarts the reveal from scratch.
    pub fn set_text<H, S>(&mut self, text: impl Into<String>, host: &mut H, sink: &mut S)
    where
        H: TimerHost<EngineTimer> + ?Sized,
        S: RevealSink + ?Sized,
    {
        let next = TypewriterOptions {
            text: text.into(),
            ..self.options.clone()
        };
        self.set_options(next, host, sink);
    }

    /// Drive the start signal. Going false resets to idle; going true starts a reveal.
    pub fn set_start<H, S>(&mut self, start: bool, host: &mut H, sink: &mut S)
    where
        H: TimerHost<EngineTimer> + ?Sized,
        S: RevealSink + ?Sized,
    {
        let next = TypewriterOptions {
            start_animation: start,
            ..self.options.clone()
        };
        self.set_options(next, host, sink);
    }

    /// Replace every option.
    ///
    /// Text, speed, start delay and cursor enablement changes restart the reveal; a start
    /// signal flip starts or stops it; a cursor glyph change only re-renders.
    #[tracing::instrument(level = "debug", skip_all, fields(phase = ?self.phase))]
    pub fn set_options<H, S>(&mut self, next: TypewriterOptions, host: &mut H, sink: &mut S)
    where
        H: TimerHost<EngineTimer> + ?Sized,
        S: RevealSink + ?Sized,
    {
        let restart = self.options.requires_reset(&next)
            || self.options.start_animation != next.start_animation;
        let glyph_changed = self.options.cursor_char != next.cursor_char;
        self.options = next;

        if restart {
            let was_active = self.phase != Phase::Idle;
            self.reset(host);
            if !self.try_start(host, sink) && was_active {
                // Clear whatever the consumer was showing.
                self.render(host.now(), sink);
            }
        } else if glyph_changed && self.phase != Phase::Idle {
            self.render(host.now(), sink);
        }
    }

    /// Stop everything and release both timers. Safe to call repeatedly.
    pub fn teardown<H>(&mut self, host: &mut H)
    where
        H: TimerHost<EngineTimer> + ?Sized,
    {
        if self.phase != Phase::Idle || self.armed_timers() > 0 {
            tracing::debug!(phase = ?self.phase, "typewriter torn down");
        }
        self.reset(host);
    }

    /// Handle one due timer previously armed by this engine.
    pub fn on_timer<H, S>(
        &mut self,
        handle: TimerHandle,
        timer: EngineTimer,
        host: &mut H,
        sink: &mut S,
    ) where
        H: TimerHost<EngineTimer> + ?Sized,
        S: RevealSink + ?Sized,
    {
        match timer {
            EngineTimer::StartDelay | EngineTimer::Emit => {
                if self.emission != Some(handle) {
                    tracing::trace!(handle = handle.raw(), ?timer, "stale emission timer dropped");
                    return;
                }
                self.emission = None;
                match (timer, self.phase) {
                    (EngineTimer::StartDelay, Phase::Pending) => {
                        self.phase = Phase::Revealing;
                        tracing::debug!(at = %host.now(), "start delay elapsed");
                        self.emission = Some(host.arm(self.options.speed_ms, EngineTimer::Emit));
                    }
                    (EngineTimer::Emit, Phase::Revealing) => self.emit(host, sink),
                    (timer, phase) => {
                        tracing::warn!(?timer, ?phase, "emission timer fired out of phase");
                    }
                }
            }
            EngineTimer::Blink => {
                if self.blink != Some(handle) {
                    tracing::trace!(handle = handle.raw(), "stale blink timer dropped");
                    return;
                }
                self.state.toggle_cursor();
                self.blink = Some(host.arm(CURSOR_BLINK_MS, EngineTimer::Blink));
                self.render(host.now(), sink);
            }
        }
    }

    fn emit<H, S>(&mut self, host: &mut H, sink: &mut S)
    where
        H: TimerHost<EngineTimer> + ?Sized,
        S: RevealSink + ?Sized,
    {
        let now = host.now();
        self.state.reveal_next();
        self.render(now, sink);

        if self.state.revealed_count() < self.state.len() {
            self.emission = Some(host.arm(self.options.speed_ms, EngineTimer::Emit));
            return;
        }

        self.phase = Phase::Complete;
        if self.state.mark_complete() {
            tracing::debug!(at = %now, chars = self.state.len(), "reveal complete");
            sink.complete(now);
        }
    }

    fn try_start<H, S>(&mut self, host: &mut H, sink: &mut S) -> bool
    where
        H: TimerHost<EngineTimer> + ?Sized,
        S: RevealSink + ?Sized,
    {
        debug_assert!(self.emission.is_none() && self.blink.is_none());
        if !self.options.start_animation || self.state.is_empty() {
            return false;
        }

        self.phase = Phase::Pending;
        self.state.set_cursor_visible(true);
        self.emission = Some(host.arm(self.options.start_delay_ms, EngineTimer::StartDelay));
        if self.options.show_cursor {
            self.blink = Some(host.arm(CURSOR_BLINK_MS, EngineTimer::Blink));
        }
        tracing::debug!(
            at = %host.now(),
            chars = self.state.len(),
            delay_ms = self.options.start_delay_ms,
            "reveal pending"
        );
        self.render(host.now(), sink);
        true
    }

    // Cancel first, then drop state: nothing armed before this point survives it.
    fn reset<H>(&mut self, host: &mut H)
    where
        H: TimerHost<EngineTimer> + ?Sized,
    {
        if let Some(h) = self.emission.take() {
            host.cancel(h);
        }
        if let Some(h) = self.blink.take() {
            host.cancel(h);
        }
        self.state = RevealState::new(&self.options.text);
        self.phase = Phase::Idle;
    }

    fn render<S>(&self, at: TimeMs, sink: &mut S)
    where
        S: RevealSink + ?Sized,
    {
        let frame = RevealFrame {
            at,
            snapshot: self.state.snapshot().to_owned(),
            cursor_visible: self.phase != Phase::Idle
                && self.options.show_cursor
                && self.state.cursor_visible(),
            display: self.display(),
        };
        sink.render(&frame);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/engine.rs"]
mod tests;

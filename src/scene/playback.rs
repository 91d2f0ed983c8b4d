use crate::{
    clock::timer::{Fired, Tagged, TimerHandle, TimerHost},
    clock::virtual_clock::VirtualClock,
    foundation::core::TimeMs,
    foundation::error::RevealResult,
    reveal::engine::{EngineTimer, TypewriterEngine},
    reveal::sink::{RevealFrame, RevealSink},
    scene::document::Scene,
    scene::model::ScrollStepDef,
    trigger::visibility::VisibilityTrigger,
    viewport::geometry::{Region, RegionId, Viewport},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SceneTimer {
    Scroll(usize),
    Engine(usize, EngineTimer),
}

/// Sink contract for scene playback. Every callback names the region it is about.
pub trait SceneSink {
    /// A region's typewriter produced a frame.
    fn frame(&mut self, region: &str, frame: &RevealFrame);
    /// A region's typewriter revealed its last character.
    fn complete(&mut self, _region: &str, _at: TimeMs) {}
    /// A region's visibility trigger fired.
    fn visible(&mut self, _region: &str, _at: TimeMs) {}
}

/// One recorded playback event.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SceneEvent {
    /// See [`SceneSink::frame`].
    Frame {
        /// Region id.
        region: String,
        /// The frame.
        #[serde(flatten)]
        frame: RevealFrame,
    },
    /// See [`SceneSink::complete`].
    Complete {
        /// Region id.
        region: String,
        /// Completion instant.
        at: TimeMs,
    },
    /// See [`SceneSink::visible`].
    Visible {
        /// Region id.
        region: String,
        /// Trigger instant.
        at: TimeMs,
    },
}

/// In-memory scene sink for tests and debugging.
#[derive(Debug, Default)]
pub struct SceneRecorder {
    events: Vec<SceneEvent>,
}

impl SceneRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event in delivery order.
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    /// Frames of one region in delivery order.
    pub fn frames_for<'a>(&'a self, region: &'a str) -> impl Iterator<Item = &'a RevealFrame> {
        self.events.iter().filter_map(move |e| match e {
            SceneEvent::Frame { region: r, frame } if r == region => Some(frame),
            _ => None,
        })
    }

    /// Snapshot changes of one region, paired with the instant they first appeared.
    pub fn timeline_for(&self, region: &str) -> Vec<(TimeMs, String)> {
        let mut out: Vec<(TimeMs, String)> = Vec::new();
        for f in self.frames_for(region) {
            if out.last().map(|(_, s)| s.as_str()) != Some(f.snapshot.as_str()) {
                out.push((f.at, f.snapshot.clone()));
            }
        }
        out
    }

    /// Instant a region's trigger fired, if it did.
    pub fn visible_at(&self, region: &str) -> Option<TimeMs> {
        self.events.iter().find_map(|e| match e {
            SceneEvent::Visible { region: r, at } if r == region => Some(*at),
            _ => None,
        })
    }

    /// Completion instants of one region.
    pub fn completions_for(&self, region: &str) -> Vec<TimeMs> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SceneEvent::Complete { region: r, at } if r == region => Some(*at),
                _ => None,
            })
            .collect()
    }
}

impl SceneSink for SceneRecorder {
    fn frame(&mut self, region: &str, frame: &RevealFrame) {
        self.events.push(SceneEvent::Frame {
            region: region.to_owned(),
            frame: frame.clone(),
        });
    }

    fn complete(&mut self, region: &str, at: TimeMs) {
        self.events.push(SceneEvent::Complete {
            region: region.to_owned(),
            at,
        });
    }

    fn visible(&mut self, region: &str, at: TimeMs) {
        self.events.push(SceneEvent::Visible {
            region: region.to_owned(),
            at,
        });
    }
}

struct RegionSink<'a, S: ?Sized> {
    region: &'a str,
    inner: &'a mut S,
}

impl<S: SceneSink + ?Sized> RevealSink for RegionSink<'_, S> {
    fn render(&mut self, frame: &RevealFrame) {
        self.inner.frame(self.region, frame);
    }

    fn complete(&mut self, at: TimeMs) {
        self.inner.complete(self.region, at);
    }
}

struct Slot {
    id: String,
    region: Region,
    trigger: Option<VisibilityTrigger>,
    engine: Option<TypewriterEngine>,
}

fn engine_host(
    clock: &mut VirtualClock<SceneTimer>,
    slot: usize,
) -> Tagged<'_, SceneTimer, impl Fn(EngineTimer) -> SceneTimer> {
    Tagged::new(clock, move |t: EngineTimer| SceneTimer::Engine(slot, t))
}

/// Plays a [`Scene`] on a virtual clock.
///
/// Scroll steps are timers on the same clock as the typewriters, so a scroll and a character
/// tick due at the same instant run in the order they were armed. Time only moves when the
/// caller advances it, either straight to the end ([`ScenePlayer::run`]) or step by step
/// against a wall clock using [`ScenePlayer::next_deadline`].
pub struct ScenePlayer {
    clock: VirtualClock<SceneTimer>,
    viewport: Viewport,
    slots: Vec<Slot>,
    scroll: Vec<ScrollStepDef>,
    scroll_timers: Vec<TimerHandle>,
    duration: TimeMs,
    started: bool,
}

impl ScenePlayer {
    /// Validate `scene` and build a player for it. Nothing is armed until the first advance.
    pub fn new(scene: &Scene) -> RevealResult<Self> {
        scene.validate()?;
        let def = scene.def();

        let slots = def
            .regions
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let trigger = r.threshold.map(VisibilityTrigger::new);
                let engine = r.typewriter.clone().map(|mut options| {
                    // Gated regions wait for their trigger.
                    if trigger.is_some() {
                        options.start_animation = false;
                    }
                    TypewriterEngine::new(options)
                });
                Slot {
                    id: r.id.clone(),
                    region: Region {
                        id: RegionId(i as u32),
                        top: r.top,
                        height: r.height,
                    },
                    trigger,
                    engine,
                }
            })
            .collect();

        Ok(Self {
            clock: VirtualClock::new(),
            viewport: Viewport::new(def.initial_offset, def.viewport_height),
            slots,
            scroll: def.scroll.clone(),
            scroll_timers: Vec::new(),
            duration: scene.duration(),
            started: false,
        })
    }

    /// Current playback time.
    pub fn now(&self) -> TimeMs {
        self.clock.now()
    }

    /// Declared playback length.
    pub fn duration(&self) -> TimeMs {
        self.duration
    }

    /// Current viewport position.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Typewriter of region `id`, if it has one.
    pub fn engine(&self, id: &str) -> Option<&TypewriterEngine> {
        self.slot(id).and_then(|s| s.engine.as_ref())
    }

    /// Visibility trigger of region `id`, if it has one.
    pub fn trigger(&self, id: &str) -> Option<&VisibilityTrigger> {
        self.slot(id).and_then(|s| s.trigger.as_ref())
    }

    /// Number of armed timers across every region and the scroll script.
    pub fn pending_timers(&self) -> usize {
        self.clock.pending()
    }

    /// Earliest armed deadline, for pacing playback against a wall clock.
    pub fn next_deadline(&mut self) -> Option<TimeMs> {
        self.clock.next_deadline()
    }

    /// Bind triggers, mount typewriters, arm the scroll script and take the first
    /// observation. Called implicitly by the first advance; later calls are no-ops.
    #[tracing::instrument(skip_all, fields(regions = self.slots.len()))]
    pub fn start<S: SceneSink + ?Sized>(&mut self, sink: &mut S) {
        if self.started {
            return;
        }
        self.started = true;

        for (i, slot) in self.slots.iter_mut().enumerate() {
            if let Some(trigger) = &mut slot.trigger {
                trigger.bind(Some(slot.region.id));
            }
            if let Some(engine) = &mut slot.engine {
                let mut host = engine_host(&mut self.clock, i);
                let mut out = RegionSink {
                    region: &slot.id,
                    inner: &mut *sink,
                };
                engine.mount(&mut host, &mut out);
            }
        }

        let now = self.clock.now();
        for (i, step) in self.scroll.iter().enumerate() {
            let h = self
                .clock
                .arm(step.at_ms.saturating_sub(now.0), SceneTimer::Scroll(i));
            self.scroll_timers.push(h);
        }

        self.observe(sink);
    }

    /// Dispatch everything due up to `until`, then settle the clock there.
    pub fn advance_to<S: SceneSink + ?Sized>(&mut self, until: TimeMs, sink: &mut S) {
        self.start(sink);
        while let Some(fired) = self.clock.pop_due(until) {
            self.dispatch(fired, sink);
        }
        self.clock.settle(until);
    }

    /// Play the whole scene, then tear everything down.
    #[tracing::instrument(skip_all, fields(duration = %self.duration))]
    pub fn run<S: SceneSink + ?Sized>(&mut self, sink: &mut S) {
        self.advance_to(self.duration, sink);
        self.finish();
    }

    /// Unmount region `id`: stop observing it and cancel its typewriter timers.
    /// Returns whether the region exists. Idempotent.
    pub fn unmount(&mut self, id: &str) -> bool {
        let Some(i) = self.slots.iter().position(|s| s.id == id) else {
            return false;
        };
        let slot = &mut self.slots[i];
        if let Some(trigger) = &mut slot.trigger {
            trigger.unbind();
        }
        if let Some(engine) = &mut slot.engine {
            engine.teardown(&mut engine_host(&mut self.clock, i));
        }
        true
    }

    /// Tear down every region and drop the remaining scroll script.
    pub fn finish(&mut self) {
        for i in 0..self.slots.len() {
            let slot = &mut self.slots[i];
            if let Some(trigger) = &mut slot.trigger {
                trigger.unbind();
            }
            if let Some(engine) = &mut slot.engine {
                engine.teardown(&mut engine_host(&mut self.clock, i));
            }
        }
        for h in self.scroll_timers.drain(..) {
            self.clock.cancel(h);
        }
        tracing::debug!(at = %self.clock.now(), "scene finished");
    }

    fn slot(&self, id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }

    fn dispatch<S: SceneSink + ?Sized>(&mut self, fired: Fired<SceneTimer>, sink: &mut S) {
        match fired.payload {
            SceneTimer::Scroll(i) => {
                let offset = self.scroll[i].offset;
                self.viewport = self.viewport.scrolled_to(offset);
                tracing::debug!(at = %fired.at, offset, "scrolled");
                self.observe(sink);
            }
            SceneTimer::Engine(i, timer) => {
                let slot = &mut self.slots[i];
                let Some(engine) = &mut slot.engine else {
                    return;
                };
                let mut host = engine_host(&mut self.clock, i);
                let mut out = RegionSink {
                    region: &slot.id,
                    inner: sink,
                };
                engine.on_timer(fired.handle, timer, &mut host, &mut out);
            }
        }
    }

    fn observe<S: SceneSink + ?Sized>(&mut self, sink: &mut S) {
        let regions: Vec<Region> = self.slots.iter().map(|s| s.region).collect();
        let entries = self.viewport.observe(&regions);
        let now = self.clock.now();

        for (i, slot) in self.slots.iter_mut().enumerate() {
            let Some(trigger) = &mut slot.trigger else {
                continue;
            };
            if !trigger.observe(&entries) {
                continue;
            }
            sink.visible(&slot.id, now);
            if let Some(engine) = &mut slot.engine {
                let mut host = engine_host(&mut self.clock, i);
                let mut out = RegionSink {
                    region: &slot.id,
                    inner: &mut *sink,
                };
                engine.set_start(true, &mut host, &mut out);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/playback.rs"]
mod tests;

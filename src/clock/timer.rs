use crate::foundation::core::TimeMs;
use crate::clock::virtual_clock::VirtualClock;

/// Opaque handle to one armed timer.
///
/// Handles are unique for the lifetime of a host; cancelling a handle that already fired or
/// was cancelled is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub(crate) u64);

impl TimerHandle {
    /// Raw sequence number, useful for logging.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A timer that came due, handed back to its owner for dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<T> {
    /// Handle returned when the timer was armed.
    pub handle: TimerHandle,
    /// Deadline the timer was armed for.
    pub at: TimeMs,
    /// Owner-defined payload.
    pub payload: T,
}

/// Host event loop contract: deferred callbacks on a single cooperative thread.
///
/// Nothing runs inside `arm`; the payload is handed back through the host's dispatch loop
/// once the deadline is reached.
pub trait TimerHost<T> {
    /// Current host time.
    fn now(&self) -> TimeMs;
    /// Arm a one-shot timer `after_ms` from now.
    fn arm(&mut self, after_ms: u64, payload: T) -> TimerHandle;
    /// Cancel an armed timer. Returns whether a live timer was removed.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

/// Adapter that lets a component arm timers with its own payload type on a clock whose
/// payload wraps several components.
pub struct Tagged<'a, U, F> {
    clock: &'a mut VirtualClock<U>,
    tag: F,
}

impl<'a, U, F> Tagged<'a, U, F> {
    /// Wrap `clock`, mapping every armed payload through `tag`.
    pub fn new(clock: &'a mut VirtualClock<U>, tag: F) -> Self {
        Self { clock, tag }
    }
}

impl<T, U, F> TimerHost<T> for Tagged<'_, U, F>
where
    F: Fn(T) -> U,
{
    fn now(&self) -> TimeMs {
        self.clock.now()
    }

    fn arm(&mut self, after_ms: u64, payload: T) -> TimerHandle {
        let payload = (self.tag)(payload);
        self.clock.arm(after_ms, payload)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.clock.cancel(handle)
    }
}

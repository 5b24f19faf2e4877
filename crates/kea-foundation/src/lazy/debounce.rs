//! Debounce gate and the timer scheduling seam.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// One-shot timer scheduling provided by the host event loop.
///
/// Single-threaded by contract: callbacks run on the same logical
/// thread that scheduled them, whenever the GUI main loop gets around
/// to it. There is no cancellation; a timer that has become irrelevant
/// must detect that itself (see [`DebounceGate`]) and exit early.
pub trait TimerHost {
    /// Runs `callback` once, `delay` after now.
    fn schedule_once(&self, delay: Duration, callback: Box<dyn FnOnce()>);
}

/// Latest-wins gate coalescing a burst of events into a single action.
///
/// Each [`arm`](DebounceGate::arm) supersedes every earlier ticket.
/// When a timer fires it asks whether its ticket is still the latest;
/// only the newest ticket of a burst answers yes, so exactly one timer
/// per quiescent period does real work and the rest fall through.
///
/// Clones share the same generation counter.
#[derive(Clone, Debug, Default)]
pub struct DebounceGate {
    generation: Rc<Cell<u64>>,
}

/// Proof of a particular [`DebounceGate::arm`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceTicket(u64);

impl DebounceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new pending action, superseding all earlier ones.
    pub fn arm(&self) -> DebounceTicket {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        DebounceTicket(next)
    }

    /// Whether `ticket` is still the newest armed action.
    ///
    /// A stale ticket means more events arrived after it was issued;
    /// its timer should do nothing and let the newer one load.
    pub fn is_latest(&self, ticket: DebounceTicket) -> bool {
        self.generation.get() == ticket.0
    }
}

//! Event and state flags shared between interrupt context and the foreground loop.
//!
//! This is the only state interrupt handlers may touch besides the tick
//! counters. Every field sits behind a `critical_section::Mutex`, so a write
//! made inside a handler is visible to the foreground's next read.

use core::cell::Cell;
use critical_section::Mutex;

use crate::time::TickCounters;
use crate::types::{Button, Color};

/// What the foreground is currently doing, as seen by the input monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Activity {
    /// No game in progress. A press requests a start.
    Idle,
    /// Start-up chase running.
    Startup,
    /// Sequence playback. Presses are ignored.
    Displaying,
    /// Suspended until the player presses a button.
    AwaitingInput,
    /// Feedback pulse or inter-round pause.
    Feedback,
    /// End-of-game animation.
    Ending,
}

/// Press/release pending pair for one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingEdge {
    /// A press was detected and not yet consumed.
    pub press: bool,
    /// A release was detected and not yet consumed.
    pub release: bool,
}

impl PendingEdge {
    /// Returns true if either edge is pending.
    #[inline]
    pub const fn any(&self) -> bool {
        self.press || self.release
    }
}

/// Named event flags written by interrupt handlers and consumed by the foreground.
pub struct Flags {
    pending: Mutex<Cell<[PendingEdge; 3]>>,
    start_requested: Mutex<Cell<bool>>,
    activity: Mutex<Cell<Activity>>,
    pressed_color: Mutex<Cell<Option<Color>>>,
}

impl Flags {
    /// Creates cleared flags in the `Idle` activity.
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new([PendingEdge {
                press: false,
                release: false,
            }; 3])),
            start_requested: Mutex::new(Cell::new(false)),
            activity: Mutex::new(Cell::new(Activity::Idle)),
            pressed_color: Mutex::new(Cell::new(None)),
        }
    }

    /// Returns the pending edges of one button.
    pub fn pending(&self, button: Button) -> PendingEdge {
        critical_section::with(|cs| self.pending.borrow(cs).get()[button.index()])
    }

    /// Marks an edge as pending for a button.
    pub fn set_pending(&self, button: Button, press: bool) {
        critical_section::with(|cs| {
            let cell = self.pending.borrow(cs);
            let mut pending = cell.get();
            if press {
                pending[button.index()].press = true;
            } else {
                pending[button.index()].release = true;
            }
            cell.set(pending);
        });
    }

    /// Consumes a pending press, returning whether one was pending.
    pub fn take_press(&self, button: Button) -> bool {
        critical_section::with(|cs| {
            let cell = self.pending.borrow(cs);
            let mut pending = cell.get();
            let was_pending = pending[button.index()].press;
            pending[button.index()].press = false;
            cell.set(pending);
            was_pending
        })
    }

    /// Returns true if any button has an unconsumed edge.
    pub fn any_pending(&self) -> bool {
        critical_section::with(|cs| self.pending.borrow(cs).get().iter().any(PendingEdge::any))
    }

    /// Drops all pending edges.
    pub fn clear_pending(&self) {
        critical_section::with(|cs| self.pending.borrow(cs).set([PendingEdge::default(); 3]));
    }

    /// Returns true if a start has been requested and not yet taken.
    pub fn start_requested(&self) -> bool {
        critical_section::with(|cs| self.start_requested.borrow(cs).get())
    }

    /// Consumes the start request.
    pub fn take_start_request(&self) -> bool {
        critical_section::with(|cs| self.start_requested.borrow(cs).replace(false))
    }

    pub(crate) fn request_start(&self) {
        critical_section::with(|cs| self.start_requested.borrow(cs).set(true));
    }

    /// Returns the current foreground activity.
    pub fn activity(&self) -> Activity {
        critical_section::with(|cs| self.activity.borrow(cs).get())
    }

    /// Publishes the foreground activity.
    pub fn set_activity(&self, activity: Activity) {
        critical_section::with(|cs| self.activity.borrow(cs).set(activity));
    }

    /// Returns true while the engine is suspended waiting for a press.
    #[inline]
    pub fn awaiting_input(&self) -> bool {
        self.activity() == Activity::AwaitingInput
    }

    /// Clears the recorded press and starts waiting for a new one.
    pub fn begin_awaiting_input(&self) {
        critical_section::with(|cs| {
            self.pressed_color.borrow(cs).set(None);
            self.activity.borrow(cs).set(Activity::AwaitingInput);
        });
    }

    /// Records a press if the engine is waiting for one.
    ///
    /// Checks and resolves the suspension in a single critical section, so the
    /// first serviced press wins and later ones are not recorded.
    pub(crate) fn resolve_input(&self, color: Color) -> bool {
        critical_section::with(|cs| {
            let activity = self.activity.borrow(cs);
            if activity.get() != Activity::AwaitingInput {
                return false;
            }
            self.pressed_color.borrow(cs).set(Some(color));
            activity.set(Activity::Feedback);
            true
        })
    }

    /// Stops waiting for input.
    ///
    /// Returns the pressed color if a press won the race against the
    /// cancellation, otherwise leaves `AwaitingInput` and returns `None`.
    pub fn cancel_wait(&self) -> Option<Color> {
        critical_section::with(|cs| {
            let activity = self.activity.borrow(cs);
            if activity.get() == Activity::AwaitingInput {
                activity.set(Activity::Feedback);
                None
            } else {
                self.pressed_color.borrow(cs).take()
            }
        })
    }

    /// Returns the color recorded by the last resolved press.
    pub fn pressed_color(&self) -> Option<Color> {
        critical_section::with(|cs| self.pressed_color.borrow(cs).get())
    }

    /// Takes the color recorded by the last resolved press.
    pub fn take_pressed_color(&self) -> Option<Color> {
        critical_section::with(|cs| self.pressed_color.borrow(cs).take())
    }

    /// Clears every flag and returns to `Idle`.
    pub fn reset(&self) {
        critical_section::with(|cs| {
            self.pending.borrow(cs).set([PendingEdge::default(); 3]);
            self.start_requested.borrow(cs).set(false);
            self.activity.borrow(cs).set(Activity::Idle);
            self.pressed_color.borrow(cs).set(None);
        });
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

/// The slice of state interrupt handlers are allowed to mutate.
///
/// Typically placed in a `static` and borrowed by both the engine and the
/// interrupt handlers:
///
/// ```
/// use simon_engine::Shared;
///
/// static SHARED: Shared = Shared::new();
///
/// // periodic timer interrupt
/// fn on_timer() {
///     SHARED.counters.on_tick();
/// }
/// # on_timer();
/// # assert_eq!(SHARED.counters.step.get(), 1);
/// ```
pub struct Shared {
    /// Event and state flags.
    pub flags: Flags,
    /// Tick stopwatches.
    pub counters: TickCounters,
}

impl Shared {
    /// Creates cleared shared state.
    pub const fn new() -> Self {
        Self {
            flags: Flags::new(),
            counters: TickCounters::new(),
        }
    }

    /// Periodic tick entry point for the timer interrupt.
    #[inline]
    pub fn on_tick(&self) {
        self.counters.on_tick();
    }
}

impl Default for Shared {
    fn default() -> Self {
        Self::new()
    }
}

//! Debounced, edge-triggered button input.
//!
//! [`InputMonitor`] lives in interrupt context. It turns raw pin edges into
//! logical press/release events and hands them to the foreground through
//! [`Flags`](crate::Flags). It makes no game decisions beyond "resolve a
//! pending wait" and "request a start while idle".

use crate::config::DEBOUNCE_MS;
use crate::flags::{Activity, Shared};
use crate::hal::{DebounceTimer, EdgeInterrupts, LedBank};
use crate::types::{Button, Edge};

/// What an edge did, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeResponse {
    /// The button is inside its settle window; the edge was dropped.
    Suppressed,
    /// A press resolved the engine's wait for input.
    InputResolved,
    /// A press while idle requested a new game.
    StartRequested,
    /// A press recorded as pending with no other effect.
    Pressed,
    /// A release recorded as pending.
    Released,
}

/// Per-button debounce and edge-direction tracking.
pub struct InputMonitor<'a> {
    shared: &'a Shared,
    armed: [bool; 3],
    expected: [Edge; 3],
}

impl<'a> InputMonitor<'a> {
    /// Creates a monitor expecting a press on every button.
    pub fn new(shared: &'a Shared) -> Self {
        Self {
            shared,
            armed: [true; 3],
            expected: [Edge::Press; 3],
        }
    }

    /// Programs every button for its first press and unmasks the interrupts.
    pub fn init<I: EdgeInterrupts>(&mut self, irq: &mut I) {
        for button in Button::ALL {
            self.expected[button.index()] = Edge::Press;
            irq.listen(button, Edge::Press);
        }
        self.armed = [true; 3];
        irq.enable_all();
    }

    /// Handles a raw edge reported by the pin interrupt.
    ///
    /// The button stays masked until [`on_debounce_elapsed`](Self::on_debounce_elapsed)
    /// runs, so bounce within the settle window is never seen twice.
    pub fn on_raw_edge<I, T, L>(
        &mut self,
        button: Button,
        edge: Edge,
        irq: &mut I,
        debounce: &mut T,
        leds: &mut L,
    ) -> EdgeResponse
    where
        I: EdgeInterrupts,
        T: DebounceTimer,
        L: LedBank,
    {
        let slot = button.index();
        if !self.armed[slot] {
            trace!("edge on {} suppressed", button);
            return EdgeResponse::Suppressed;
        }

        self.armed[slot] = false;
        irq.disable(button);
        debounce.arm(DEBOUNCE_MS);

        let response = match edge {
            Edge::Press => self.handle_press(button),
            Edge::Release => {
                self.shared.flags.set_pending(button, false);
                EdgeResponse::Released
            }
        };

        leds.all_off();

        self.expected[slot] = edge.opposite();
        irq.listen(button, self.expected[slot]);

        response
    }

    /// Debounce timer expiry: unmasks every button at once.
    pub fn on_debounce_elapsed<I: EdgeInterrupts>(&mut self, irq: &mut I) {
        self.armed = [true; 3];
        irq.enable_all();
    }

    /// Returns the edge the button is currently listening for.
    pub fn expected_edge(&self, button: Button) -> Edge {
        self.expected[button.index()]
    }

    /// Returns true if the button is inside its settle window.
    pub fn is_settling(&self, button: Button) -> bool {
        !self.armed[button.index()]
    }

    fn handle_press(&mut self, button: Button) -> EdgeResponse {
        let flags = &self.shared.flags;
        flags.set_pending(button, true);

        if flags.resolve_input(button.color()) {
            return EdgeResponse::InputResolved;
        }

        if flags.activity() == Activity::Idle && !flags.start_requested() {
            flags.request_start();
            self.shared.counters.startup.reset();
            return EdgeResponse::StartRequested;
        }

        EdgeResponse::Pressed
    }
}

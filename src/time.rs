//! Tick counters driven by the periodic hardware timer.
//!
//! Each counter is a free-running stopwatch. The tick interrupt only ever
//! increments; resetting is left to whichever phase currently owns the counter.

use core::cell::Cell;
use critical_section::Mutex;

/// A single interrupt-safe tick stopwatch.
pub struct TickCounter {
    ticks: Mutex<Cell<u32>>,
}

impl TickCounter {
    /// Creates a counter starting at zero.
    pub const fn new() -> Self {
        Self {
            ticks: Mutex::new(Cell::new(0)),
        }
    }

    /// Returns the ticks counted since the last reset.
    pub fn get(&self) -> u32 {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }

    /// Restarts the stopwatch from zero.
    pub fn reset(&self) {
        critical_section::with(|cs| self.ticks.borrow(cs).set(0));
    }

    /// Returns true once at least `threshold` ticks have elapsed since the last reset.
    #[inline]
    pub fn reached(&self, threshold: u32) -> bool {
        self.get() >= threshold
    }

    fn increment(&self) {
        critical_section::with(|cs| {
            let ticks = self.ticks.borrow(cs);
            ticks.set(ticks.get().wrapping_add(1));
        });
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// The three stopwatches shared by the game phases.
///
/// * `startup` - owned by the start-up chase
/// * `step` - owned by playback, the input feedback pulse and the input timeout
/// * `finish` - owned by the inter-round pause and the end-of-game animation
pub struct TickCounters {
    /// Start-up chase stopwatch.
    pub startup: TickCounter,
    /// Per-element stopwatch.
    pub step: TickCounter,
    /// Pause and end-of-game stopwatch.
    pub finish: TickCounter,
}

impl TickCounters {
    /// Creates all counters at zero.
    pub const fn new() -> Self {
        Self {
            startup: TickCounter::new(),
            step: TickCounter::new(),
            finish: TickCounter::new(),
        }
    }

    /// Advances every counter by one tick.
    ///
    /// Call this from the periodic timer interrupt.
    pub fn on_tick(&self) {
        self.startup.increment();
        self.step.increment();
        self.finish.increment();
    }
}

impl Default for TickCounters {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_tick_advances_all_counters() {
        let counters = TickCounters::new();
        for _ in 0..5 {
            counters.on_tick();
        }
        assert_eq!(counters.startup.get(), 5);
        assert_eq!(counters.step.get(), 5);
        assert_eq!(counters.finish.get(), 5);
    }

    #[test]
    fn reset_only_affects_its_own_counter() {
        let counters = TickCounters::new();
        counters.on_tick();
        counters.on_tick();
        counters.step.reset();
        counters.on_tick();

        assert_eq!(counters.startup.get(), 3);
        assert_eq!(counters.step.get(), 1);
        assert_eq!(counters.finish.get(), 3);
    }

    #[test]
    fn reached_compares_against_threshold() {
        let counter = TickCounter::new();
        assert!(counter.reached(0));
        assert!(!counter.reached(1));
        counter.increment();
        assert!(counter.reached(1));
    }
}

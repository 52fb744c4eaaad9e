//! Hardware seams.
//!
//! The engine never touches registers. Implement these traits for your board
//! (GPIO, timers, low-power entry) to connect the game to real hardware.

use embedded_hal::digital::{OutputPin, PinState};

use crate::types::{Button, Color, Edge};

/// Trait for abstracting the three signal LEDs.
///
/// Handle any hardware errors internally - these methods cannot fail.
pub trait LedBank {
    /// Switches the LED of `color` on or off.
    fn set(&mut self, color: Color, on: bool);

    /// Switches every LED off.
    fn all_off(&mut self) {
        self.set_all(false);
    }

    /// Switches every LED to the same state.
    fn set_all(&mut self, on: bool) {
        for color in Color::ALL {
            self.set(color, on);
        }
    }

    /// Lights exactly one LED (or none) and switches the others off.
    fn show_only(&mut self, lit: Option<Color>) {
        for color in Color::ALL {
            self.set(color, Some(color) == lit);
        }
    }
}

impl<T: LedBank + ?Sized> LedBank for &mut T {
    fn set(&mut self, color: Color, on: bool) {
        (**self).set(color, on);
    }
}

/// Per-button edge interrupt control.
pub trait EdgeInterrupts {
    /// Masks the interrupt of one button.
    fn disable(&mut self, button: Button);

    /// Clears stale interrupt flags and unmasks every button.
    fn enable_all(&mut self);

    /// Selects which edge the button's interrupt triggers on next.
    fn listen(&mut self, button: Button, edge: Edge);
}

/// One-shot timer used for the debounce settle interval.
///
/// When the timer expires the platform calls
/// [`InputMonitor::on_debounce_elapsed`](crate::InputMonitor::on_debounce_elapsed).
pub trait DebounceTimer {
    /// Arms (or re-arms) the timer to fire once after `millis` milliseconds.
    fn arm(&mut self, millis: u32);
}

/// The periodic tick source.
///
/// Every tick the platform calls [`Shared::on_tick`](crate::Shared::on_tick).
pub trait TickTimer {
    /// Clears the hardware count and enables the tick interrupt.
    fn start(&mut self);

    /// Disables the tick interrupt.
    fn stop(&mut self);
}

/// Foreground sleep primitive.
pub trait Idle {
    /// Releases the processor until the next interrupt has been serviced.
    ///
    /// On Cortex-M this is typically `cortex_m::asm::wfi()`.
    fn wait_for_interrupt(&mut self);
}

impl<T: Idle + ?Sized> Idle for &mut T {
    fn wait_for_interrupt(&mut self) {
        (**self).wait_for_interrupt();
    }
}

/// [`LedBank`] over three `embedded-hal` output pins, active high.
pub struct PinLeds<R, Y, G> {
    red: R,
    yellow: Y,
    green: G,
}

impl<R, Y, G> PinLeds<R, Y, G>
where
    R: OutputPin,
    Y: OutputPin,
    G: OutputPin,
{
    /// Wraps the pins and switches all LEDs off.
    pub fn new(red: R, yellow: Y, green: G) -> Self {
        let mut leds = Self { red, yellow, green };
        leds.all_off();
        leds
    }

    /// Releases the pins.
    pub fn release(self) -> (R, Y, G) {
        (self.red, self.yellow, self.green)
    }
}

impl<R, Y, G> LedBank for PinLeds<R, Y, G>
where
    R: OutputPin,
    Y: OutputPin,
    G: OutputPin,
{
    fn set(&mut self, color: Color, on: bool) {
        let state = PinState::from(on);
        // LED writes cannot fail from the engine's point of view
        let _ = match color {
            Color::Red => self.red.set_state(state).map_err(|_| ()),
            Color::Yellow => self.yellow.set_state(state).map_err(|_| ()),
            Color::Green => self.green.set_state(state).map_err(|_| ()),
        };
    }
}

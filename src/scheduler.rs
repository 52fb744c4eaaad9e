//! Foreground scheduling loop.
//!
//! [`Scheduler`] owns the [`GameEngine`] and drives one unit of phase work per
//! wake: the start-up chase, exactly one round, or the end-of-game animation.
//! With nothing to do it sleeps until the next interrupt.

use crate::engine::{EngineError, GameEngine, RoundOutcome};
use crate::generator::ColorSource;
use crate::hal::{Idle, LedBank, TickTimer};
use crate::sequence::MAX_SEQUENCE_LEN;
use crate::types::GamePhase;

/// What a single [`Scheduler::service`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Serviced {
    /// Nothing pending; the processor slept until the next interrupt.
    Slept,
    /// A start request was taken and the start-up chase ran.
    Started,
    /// One round was played.
    Round(RoundOutcome),
    /// The end-of-game animation ran and the game is idle again.
    Reset,
}

/// Cooperative, non-reentrant foreground loop.
///
/// # Type Parameters
/// * `'a` - Lifetime of the shared interrupt state
/// * `L` - LED implementation type
/// * `G` - Color source
/// * `W` - Sleep primitive
/// * `T` - Periodic tick source
/// * `N` - Maximum sequence length
pub struct Scheduler<'a, L, G, W, T, const N: usize = MAX_SEQUENCE_LEN>
where
    L: LedBank,
    G: ColorSource,
    W: Idle,
    T: TickTimer,
{
    engine: GameEngine<'a, L, G, N>,
    idle: W,
    ticker: T,
}

impl<'a, L, G, W, T, const N: usize> Scheduler<'a, L, G, W, T, N>
where
    L: LedBank,
    G: ColorSource,
    W: Idle,
    T: TickTimer,
{
    /// Creates a scheduler with the tick source stopped.
    pub fn new(engine: GameEngine<'a, L, G, N>, idle: W, mut ticker: T) -> Self {
        ticker.stop();
        Self {
            engine,
            idle,
            ticker,
        }
    }

    /// Handles one foreground wake.
    ///
    /// # Returns
    /// * `Ok(Serviced::Slept)` - Nothing pending, slept until the next interrupt
    /// * `Ok(Serviced::Started)` - Start-up chase completed, game is playing
    /// * `Ok(Serviced::Round(outcome))` - One round played
    /// * `Ok(Serviced::Reset)` - End-of-game animation completed
    /// * `Err` - The engine rejected the operation
    pub fn service(&mut self) -> Result<Serviced, EngineError> {
        let flags = &self.engine.shared().flags;

        match self.engine.phase() {
            GamePhase::Startup => {
                if flags.take_start_request() {
                    self.ticker.start();
                    self.engine.run_startup(&mut self.idle)?;
                    return Ok(Serviced::Started);
                }

                // Releases and presses outside a game have no consumer
                flags.clear_pending();
                self.idle.wait_for_interrupt();
                Ok(Serviced::Slept)
            }
            GamePhase::Playing => {
                let outcome = self.engine.play_round(&mut self.idle)?;
                if let RoundOutcome::Completed { .. } = outcome {
                    self.ticker.stop();
                }
                Ok(Serviced::Round(outcome))
            }
            GamePhase::Lost => {
                self.engine.run_lost(&mut self.idle)?;
                self.ticker.stop();
                Ok(Serviced::Reset)
            }
        }
    }

    /// Runs the main loop forever.
    ///
    /// An engine error drops the current game and returns to idle; there is no
    /// state the loop cannot recover from.
    pub fn run(&mut self) -> ! {
        loop {
            if let Err(err) = self.service() {
                warn!("engine error: {}", err);
                self.engine.reset();
                self.ticker.stop();
            }
        }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &GameEngine<'a, L, G, N> {
        &self.engine
    }

    /// Returns a mutable reference to the engine.
    pub fn engine_mut(&mut self) -> &mut GameEngine<'a, L, G, N> {
        &mut self.engine
    }

    /// Returns a reference to the sleep primitive.
    pub fn idle(&self) -> &W {
        &self.idle
    }

    /// Returns a reference to the tick source.
    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    /// Dismantles the scheduler.
    pub fn release(self) -> (GameEngine<'a, L, G, N>, W, T) {
        (self.engine, self.idle, self.ticker)
    }
}

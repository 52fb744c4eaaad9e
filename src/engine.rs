//! Game engine: sequence growth, playback, input verification and end-of-game.
//!
//! Provides [`GameEngine`], the foreground context object owning the sequence,
//! the round state and the LEDs. Every timed operation waits on one of the
//! shared tick counters and yields through [`Idle`] while it does.

use crate::config::GameConfig;
use crate::flags::{Activity, Shared};
use crate::generator::ColorSource;
use crate::hal::{Idle, LedBank};
use crate::sequence::{ColorSequence, MAX_SEQUENCE_LEN};
use crate::time::TickCounter;
use crate::types::{Color, GamePhase, SequenceError};

/// Result of checking the player's reproduction of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Verdict {
    /// Every element was reproduced.
    Matched,
    /// The first wrong press.
    Mismatch {
        /// Position of the wrong press.
        index: usize,
        /// Color the sequence holds at `index`.
        expected: Color,
        /// Color the player pressed.
        pressed: Color,
    },
    /// No press arrived within the configured input timeout.
    TimedOut {
        /// Position that was waiting for a press.
        index: usize,
        /// Color the sequence holds at `index`.
        expected: Color,
    },
}

impl Verdict {
    /// Returns true for [`Verdict::Matched`].
    #[inline]
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Matched)
    }
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoundOutcome {
    /// Round reproduced; the next round adds one color.
    Passed {
        /// Score after this round.
        score: u32,
    },
    /// Round failed; the engine is now in [`GamePhase::Lost`].
    Lost(Verdict),
    /// The sequence was already full: the game counts as won and is reset.
    Completed {
        /// Final score.
        score: u32,
    },
}

/// Errors that can occur during engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// Operation called from the wrong phase.
    InvalidPhase {
        /// Phase the operation requires.
        expected: GamePhase,
        /// The actual current phase.
        actual: GamePhase,
    },
    /// A sequence operation failed.
    Sequence(SequenceError),
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EngineError::InvalidPhase { expected, actual } => {
                write!(
                    f,
                    "invalid phase: expected {:?}, but engine is in {:?}",
                    expected, actual
                )
            }
            EngineError::Sequence(err) => write!(f, "sequence error: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}

impl From<SequenceError> for EngineError {
    fn from(err: SequenceError) -> Self {
        EngineError::Sequence(err)
    }
}

/// The game context object.
///
/// Owned by the [`Scheduler`](crate::Scheduler) and only ever used from the
/// foreground. Interrupt handlers see nothing but the [`Shared`] slice.
///
/// # Type Parameters
/// * `'a` - Lifetime of the shared interrupt state
/// * `L` - LED implementation type
/// * `G` - Color source
/// * `N` - Maximum sequence length
pub struct GameEngine<'a, L: LedBank, G: ColorSource, const N: usize = MAX_SEQUENCE_LEN> {
    shared: &'a Shared,
    leds: L,
    colors: G,
    config: GameConfig,
    sequence: ColorSequence<N>,
    phase: GamePhase,
    has_lost: bool,
    score: u32,
}

impl<'a, L: LedBank, G: ColorSource, const N: usize> GameEngine<'a, L, G, N> {
    /// Creates an idle engine in [`GamePhase::Startup`] with all LEDs off.
    pub fn new(shared: &'a Shared, mut leds: L, colors: G, config: GameConfig) -> Self {
        leds.all_off();
        shared.flags.reset();

        Self {
            shared,
            leds,
            colors,
            config,
            sequence: ColorSequence::new(),
            phase: GamePhase::Startup,
            has_lost: false,
            score: 0,
        }
    }

    /// Draws the next color from the color source.
    pub fn generate_color(&mut self) -> Color {
        self.colors.next_color()
    }

    /// Appends a color at the write cursor.
    ///
    /// # Errors
    /// * `CapacityExceeded` - The sequence already holds `N` colors
    pub fn append_color(&mut self, color: Color) -> Result<(), SequenceError> {
        self.sequence.append(color)
    }

    /// Plays the whole sequence back, one LED at a time.
    ///
    /// Presses during playback are recorded as pending but never resolve
    /// anything.
    pub fn play_sequence<W: Idle>(&mut self, idle: &mut W) {
        let shared = self.shared;
        let step = &shared.counters.step;
        shared.flags.set_activity(Activity::Displaying);

        for index in 0..self.sequence.len() {
            let Ok(color) = self.sequence.get(index) else {
                break;
            };
            step.reset();
            self.leds.show_only(Some(color));
            wait_until(step, self.config.playback_on, idle);
            self.leds.all_off();
        }

        shared.flags.set_activity(Activity::Feedback);
    }

    /// Collects one press per sequence element and compares it.
    ///
    /// Stops at the first wrong press, so no further input is consumed.
    /// Sets `has_lost` on a mismatch or timeout.
    pub fn capture_and_verify<W: Idle>(&mut self, idle: &mut W) -> Verdict {
        let shared = self.shared;
        let flags = &shared.flags;
        let step = &shared.counters.step;

        for index in 0..self.sequence.len() {
            let Ok(expected) = self.sequence.get(index) else {
                break;
            };

            self.leds.all_off();
            step.reset();
            flags.begin_awaiting_input();

            let Some(pressed) = self.wait_for_press(idle) else {
                warn!("no press for element {} within timeout", index);
                self.has_lost = true;
                return Verdict::TimedOut { index, expected };
            };
            flags.take_press(pressed.button());

            if pressed != expected {
                debug!("element {}: expected {}, pressed {}", index, expected, pressed);
                self.has_lost = true;
                return Verdict::Mismatch {
                    index,
                    expected,
                    pressed,
                };
            }

            step.reset();
            self.leds.show_only(Some(pressed));
            wait_until(step, self.config.feedback_pulse, idle);
            self.leds.all_off();
        }

        Verdict::Matched
    }

    /// Runs the start-up chase and the lead-in pause, then enters [`GamePhase::Playing`].
    ///
    /// The startup counter is expected to have been zeroed by the start press.
    pub fn run_startup<W: Idle>(&mut self, idle: &mut W) -> Result<(), EngineError> {
        self.expect_phase(GamePhase::Startup)?;
        info!("game starting");

        let shared = self.shared;
        let counters = &shared.counters;
        shared.flags.set_activity(Activity::Startup);

        for step in self.config.chase {
            wait_until(&counters.startup, step.at, idle);
            self.leds.show_only(step.lit);
        }
        self.leds.all_off();

        self.has_lost = false;
        self.score = 0;
        self.sequence.clear();
        shared.flags.clear_pending();
        shared.flags.set_activity(Activity::Feedback);

        counters.finish.reset();
        wait_until(&counters.finish, self.config.lead_in, idle);

        self.phase = GamePhase::Playing;
        Ok(())
    }

    /// Plays one round: grow, show, verify, pause.
    ///
    /// A full sequence ends the game as won before anything is appended.
    pub fn play_round<W: Idle>(&mut self, idle: &mut W) -> Result<RoundOutcome, EngineError> {
        self.expect_phase(GamePhase::Playing)?;

        if self.sequence.is_full() {
            return Ok(self.finish_as_win(idle));
        }

        let color = self.generate_color();
        self.append_color(color)?;
        trace!("round {}: appended {}", self.sequence.len(), color);

        self.play_sequence(idle);
        let verdict = self.capture_and_verify(idle);

        if self.has_lost {
            info!("round {} lost with score {}", self.sequence.len(), self.score);
            self.phase = GamePhase::Lost;
            return Ok(RoundOutcome::Lost(verdict));
        }

        self.score += 1;
        self.leds.all_off();

        let finish = &self.shared.counters.finish;
        finish.reset();
        wait_until(finish, self.config.round_pause, idle);

        debug!("round passed, score {}", self.score);
        Ok(RoundOutcome::Passed { score: self.score })
    }

    /// Blinks all LEDs together, then resets the game to idle.
    pub fn run_lost<W: Idle>(&mut self, idle: &mut W) -> Result<(), EngineError> {
        self.expect_phase(GamePhase::Lost)?;

        let shared = self.shared;
        let finish = &shared.counters.finish;
        shared.flags.set_activity(Activity::Ending);
        self.leds.all_off();
        finish.reset();

        for step in self.config.lost_blink {
            wait_until(finish, step.at, idle);
            self.leds.set_all(step.on);
        }
        self.leds.all_off();

        self.reset();
        Ok(())
    }

    /// Drops the current game and returns to the idle start-up state.
    pub fn reset(&mut self) {
        self.score = 0;
        self.sequence.clear();
        self.has_lost = false;
        self.phase = GamePhase::Startup;
        self.shared.flags.reset();
        self.leds.all_off();
    }

    /// Returns the current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Returns true while waiting for a start trigger.
    pub fn is_idle(&self) -> bool {
        self.phase == GamePhase::Startup && self.shared.flags.activity() == Activity::Idle
    }

    /// Returns the number of rounds passed in this game.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Returns true once a verification failed in this game.
    pub fn has_lost(&self) -> bool {
        self.has_lost
    }

    /// Returns true while suspended waiting for a press.
    pub fn awaiting_input(&self) -> bool {
        self.shared.flags.awaiting_input()
    }

    /// Returns the color of the last resolved press, if not yet consumed.
    pub fn pressed_color(&self) -> Option<Color> {
        self.shared.flags.pressed_color()
    }

    /// Returns the sequence of the current game.
    pub fn sequence(&self) -> &ColorSequence<N> {
        &self.sequence
    }

    /// Returns the timing configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the shared interrupt state.
    pub fn shared(&self) -> &'a Shared {
        self.shared
    }

    /// Returns a reference to the LEDs.
    pub fn leds(&self) -> &L {
        &self.leds
    }

    fn finish_as_win<W: Idle>(&mut self, idle: &mut W) -> RoundOutcome {
        let score = self.score;
        info!("sequence complete, game won with score {}", score);

        let shared = self.shared;
        let finish = &shared.counters.finish;
        shared.flags.set_activity(Activity::Ending);
        self.leds.set_all(true);
        finish.reset();
        wait_until(finish, self.config.win_hold, idle);

        self.reset();
        RoundOutcome::Completed { score }
    }

    fn wait_for_press<W: Idle>(&self, idle: &mut W) -> Option<Color> {
        let flags = &self.shared.flags;
        let step = &self.shared.counters.step;

        loop {
            if let Some(color) = flags.take_pressed_color() {
                return Some(color);
            }
            if let Some(timeout) = self.config.input_timeout {
                if step.reached(timeout) {
                    return flags.cancel_wait();
                }
            }
            idle.wait_for_interrupt();
        }
    }

    fn expect_phase(&self, expected: GamePhase) -> Result<(), EngineError> {
        if self.phase != expected {
            return Err(EngineError::InvalidPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }
}

/// Yields until `counter` has counted `threshold` ticks since its last reset.
pub fn wait_until<W: Idle>(counter: &TickCounter, threshold: u32, idle: &mut W) {
    while !counter.reached(threshold) {
        idle.wait_for_interrupt();
    }
}

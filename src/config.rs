//! Game timing configuration.
//!
//! Every threshold is counted in periodic ticks. The defaults assume a tick
//! of roughly 65 ms.

/// Debounce settle interval in milliseconds.
pub const DEBOUNCE_MS: u32 = 32;

/// One step of the start-up chase: at `at` ticks, light only `lit` (or nothing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChaseStep {
    /// Startup counter value that triggers this step.
    pub at: u32,
    /// The single LED lit from this step on.
    pub lit: Option<crate::Color>,
}

/// One step of the end-of-game blink: at `at` ticks, switch all LEDs to `on`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkStep {
    /// Finish counter value that triggers this step.
    pub at: u32,
    /// State of all three LEDs from this step on.
    pub on: bool,
}

/// Tick thresholds for every timed phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameConfig {
    /// Start-up chase steps, in ascending tick order. The last step ends the chase.
    pub chase: [ChaseStep; 4],
    /// Pause before the first round.
    pub lead_in: u32,
    /// How long each sequence element is lit during playback.
    pub playback_on: u32,
    /// Length of the confirmation pulse after a correct press.
    pub feedback_pulse: u32,
    /// Pause between a passed round and the next one.
    pub round_pause: u32,
    /// End-of-game blink steps, in ascending tick order.
    pub lost_blink: [BlinkStep; 6],
    /// How long all LEDs stay lit when the sequence is completed.
    pub win_hold: u32,
    /// Maximum wait for each press. `None` waits forever.
    pub input_timeout: Option<u32>,
}

impl GameConfig {
    /// Sets the playback on-time.
    pub const fn with_playback_on(mut self, ticks: u32) -> Self {
        self.playback_on = ticks;
        self
    }

    /// Sets the confirmation pulse length.
    pub const fn with_feedback_pulse(mut self, ticks: u32) -> Self {
        self.feedback_pulse = ticks;
        self
    }

    /// Sets the pause between rounds.
    pub const fn with_round_pause(mut self, ticks: u32) -> Self {
        self.round_pause = ticks;
        self
    }

    /// Sets the pause before the first round.
    pub const fn with_lead_in(mut self, ticks: u32) -> Self {
        self.lead_in = ticks;
        self
    }

    /// Gives up on a press after `ticks` and counts it as a mismatch.
    pub const fn with_input_timeout(mut self, ticks: u32) -> Self {
        self.input_timeout = Some(ticks);
        self
    }

    /// Sets how long the win display is held.
    pub const fn with_win_hold(mut self, ticks: u32) -> Self {
        self.win_hold = ticks;
        self
    }

    /// Total length of the start-up chase.
    pub fn chase_len(&self) -> u32 {
        self.chase.iter().map(|step| step.at).max().unwrap_or(0)
    }

    /// Total length of the end-of-game blink.
    pub fn blink_len(&self) -> u32 {
        self.lost_blink.iter().map(|step| step.at).max().unwrap_or(0)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        use crate::Color::{Green, Red, Yellow};

        Self {
            chase: [
                ChaseStep { at: 6, lit: Some(Red) },
                ChaseStep { at: 12, lit: Some(Yellow) },
                ChaseStep { at: 18, lit: Some(Green) },
                ChaseStep { at: 36, lit: None },
            ],
            lead_in: 18,
            playback_on: 36,
            feedback_pulse: 8,
            round_pause: 18,
            lost_blink: [
                BlinkStep { at: 0, on: true },
                BlinkStep { at: 18, on: false },
                BlinkStep { at: 36, on: true },
                BlinkStep { at: 54, on: false },
                BlinkStep { at: 72, on: true },
                BlinkStep { at: 90, on: false },
            ],
            win_hold: 36,
            input_timeout: None,
        }
    }
}

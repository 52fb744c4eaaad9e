#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`GameEngine`**: Owns the sequence and round state; plays rounds and verifies input
//! - **`Scheduler`**: Foreground loop driving one unit of phase work per wake, sleeping otherwise
//! - **`InputMonitor`**: Interrupt-side debouncer turning raw pin edges into press/release events
//! - **`Shared`**: The flags and tick counters interrupt handlers may touch
//! - **`ColorSequence`**: Bounded, append-only list of colors for one game
//! - **`ColorSource`**: Trait for the per-round color draw (`RandomColors` for `SmallRng`)
//! - **`GameConfig`**: Tick thresholds for every timed phase
//! - **`LedBank`**, **`EdgeInterrupts`**, **`DebounceTimer`**, **`TickTimer`**, **`Idle`**:
//!   Traits to implement for your hardware
//!
//! All timing is counted in periodic ticks; nothing uses floating point.

#[macro_use]
mod fmt;

pub mod config;
pub mod engine;
pub mod flags;
pub mod generator;
pub mod hal;
pub mod input;
pub mod scheduler;
pub mod sequence;
pub mod time;
pub mod types;

pub use config::{BlinkStep, ChaseStep, DEBOUNCE_MS, GameConfig};
pub use engine::{EngineError, GameEngine, RoundOutcome, Verdict, wait_until};
pub use flags::{Activity, Flags, PendingEdge, Shared};
pub use generator::{ColorSource, RandomColors};
pub use hal::{DebounceTimer, EdgeInterrupts, Idle, LedBank, PinLeds, TickTimer};
pub use input::{EdgeResponse, InputMonitor};
pub use scheduler::{Scheduler, Serviced};
pub use sequence::{ColorSequence, MAX_SEQUENCE_LEN};
pub use time::{TickCounter, TickCounters};
pub use types::{Button, Color, ColorError, Edge, GamePhase, SequenceError};

//! Shared test infrastructure for simon-engine integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::Cell;
use std::collections::VecDeque;

use simon_engine::{
    Activity, Button, Color, ColorSource, DebounceTimer, Edge, EdgeInterrupts, Idle,
    InputMonitor, LedBank, Shared, TickTimer,
};

// ============================================================================
// Mock LEDs
// ============================================================================

/// Mock LEDs shared by reference between the engine and the input monitor
pub struct MockLeds {
    state: Cell<[bool; 3]>,
    writes: Cell<u32>,
}

impl MockLeds {
    pub fn new() -> Self {
        Self {
            state: Cell::new([false; 3]),
            writes: Cell::new(0),
        }
    }

    pub fn state(&self) -> [bool; 3] {
        self.state.get()
    }

    pub fn all_off(&self) -> bool {
        self.state.get() == [false; 3]
    }

    pub fn set_state(&self, state: [bool; 3]) {
        self.state.set(state);
    }

    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

impl LedBank for &MockLeds {
    fn set(&mut self, color: Color, on: bool) {
        let mut state = self.state.get();
        state[color.index()] = on;
        self.state.set(state);
        self.writes.set(self.writes.get() + 1);
    }
}

// ============================================================================
// Mock interrupt controller and timers
// ============================================================================

/// Records interrupt masking and edge selection per button
#[derive(Debug, Default)]
pub struct MockIrq {
    pub masked: [bool; 3],
    pub listening: [Option<Edge>; 3],
    pub enable_all_calls: u32,
}

impl EdgeInterrupts for MockIrq {
    fn disable(&mut self, button: Button) {
        self.masked[button.index()] = true;
    }

    fn enable_all(&mut self) {
        self.masked = [false; 3];
        self.enable_all_calls += 1;
    }

    fn listen(&mut self, button: Button, edge: Edge) {
        self.listening[button.index()] = Some(edge);
    }
}

/// Records how often and for how long the debounce timer was armed
#[derive(Debug, Default)]
pub struct MockDebounce {
    pub armed: u32,
    pub last_millis: Option<u32>,
}

impl DebounceTimer for MockDebounce {
    fn arm(&mut self, millis: u32) {
        self.armed += 1;
        self.last_millis = Some(millis);
    }
}

/// Records start/stop calls of the periodic tick source
#[derive(Debug, Default)]
pub struct MockTicker {
    pub running: bool,
    pub starts: u32,
    pub stops: u32,
}

impl TickTimer for MockTicker {
    fn start(&mut self) {
        self.running = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.running = false;
        self.stops += 1;
    }
}

// ============================================================================
// Scripted color source
// ============================================================================

/// Color source replaying a fixed list, then repeating the last color
pub struct ScriptedColors {
    colors: VecDeque<Color>,
    last: Color,
}

impl ScriptedColors {
    pub fn new(colors: &[Color]) -> Self {
        Self {
            colors: colors.iter().copied().collect(),
            last: Color::Red,
        }
    }
}

impl ColorSource for ScriptedColors {
    fn next_color(&mut self) -> Color {
        if let Some(color) = self.colors.pop_front() {
            self.last = color;
        }
        self.last
    }
}

// ============================================================================
// Simulated interrupts
// ============================================================================

/// LED state sampled whenever the foreground went to sleep with a new pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub finish: u32,
    pub leds: [bool; 3],
}

/// Simulated hardware behind the foreground's sleep primitive.
///
/// Each `wait_for_interrupt` services exactly one simulated interrupt: a
/// scripted button press if the engine is waiting for one (or a start press
/// while idle), otherwise one timer tick.
pub struct Simulator<'a> {
    shared: &'a Shared,
    leds: &'a MockLeds,
    monitor: InputMonitor<'a>,
    pub irq: MockIrq,
    pub debounce: MockDebounce,
    presses: VecDeque<Button>,
    start_presses: u32,
    pub ticks: u32,
    pub max_ticks: u32,
    pub frames: Vec<Frame>,
    pub resolved: Vec<Button>,
}

impl<'a> Simulator<'a> {
    pub fn new(shared: &'a Shared, leds: &'a MockLeds) -> Self {
        let mut irq = MockIrq::default();
        let mut monitor = InputMonitor::new(shared);
        monitor.init(&mut irq);

        Self {
            shared,
            leds,
            monitor,
            irq,
            debounce: MockDebounce::default(),
            presses: VecDeque::new(),
            start_presses: 0,
            ticks: 0,
            max_ticks: 100_000,
            frames: Vec::new(),
            resolved: Vec::new(),
        }
    }

    /// Queues presses delivered one per wait while the engine awaits input
    pub fn queue_presses(&mut self, buttons: &[Button]) {
        self.presses.extend(buttons.iter().copied());
    }

    /// Queues a start press delivered while the game is idle
    pub fn queue_start(&mut self) {
        self.start_presses += 1;
    }

    pub fn pending_presses(&self) -> usize {
        self.presses.len()
    }

    /// Full physical press: press edge, settle, release edge, settle
    pub fn click(&mut self, button: Button) {
        let mut leds = self.leds;
        self.monitor
            .on_raw_edge(button, Edge::Press, &mut self.irq, &mut self.debounce, &mut leds);
        self.monitor.on_debounce_elapsed(&mut self.irq);
        self.monitor
            .on_raw_edge(button, Edge::Release, &mut self.irq, &mut self.debounce, &mut leds);
        self.monitor.on_debounce_elapsed(&mut self.irq);
    }

    /// Advances the tick counters without involving the engine
    pub fn tick(&mut self, count: u32) {
        for _ in 0..count {
            self.ticks += 1;
            self.shared.on_tick();
        }
    }

    fn record_frame(&mut self) {
        let leds = self.leds.state();
        if self.frames.last().map(|frame| frame.leds) != Some(leds) {
            self.frames.push(Frame {
                finish: self.shared.counters.finish.get(),
                leds,
            });
        }
    }
}

impl Idle for Simulator<'_> {
    fn wait_for_interrupt(&mut self) {
        self.record_frame();

        let shared = self.shared;
        let flags = &shared.flags;
        if flags.awaiting_input() {
            if let Some(button) = self.presses.pop_front() {
                self.resolved.push(button);
                self.click(button);
                return;
            }
        }

        if flags.activity() == Activity::Idle && !flags.start_requested() && self.start_presses > 0 {
            self.start_presses -= 1;
            self.click(Button::S2);
            return;
        }

        assert!(self.ticks < self.max_ticks, "simulation ran away");
        self.tick(1);
    }
}

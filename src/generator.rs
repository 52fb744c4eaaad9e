//! Color generation.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::types::Color;

/// Source of the next color appended each round.
pub trait ColorSource {
    /// Draws the next color.
    fn next_color(&mut self) -> Color;
}

impl<T: ColorSource + ?Sized> ColorSource for &mut T {
    fn next_color(&mut self) -> Color {
        (**self).next_color()
    }
}

/// Uniformly distributed colors from a seeded `SmallRng`.
///
/// The same seed always produces the same game. Seed from a floating ADC pin
/// or a free-running timer to get a different game per power-up.
#[derive(Debug, Clone)]
pub struct RandomColors {
    rng: SmallRng,
}

impl RandomColors {
    /// Creates a generator from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl ColorSource for RandomColors {
    fn next_color(&mut self) -> Color {
        match self.rng.gen_range(0..Color::COUNT) {
            0 => Color::Red,
            1 => Color::Yellow,
            _ => Color::Green,
        }
    }
}

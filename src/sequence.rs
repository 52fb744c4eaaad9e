//! Bounded color sequence the player has to reproduce.

use crate::types::{Color, SequenceError};
use heapless::Vec;

/// Default sequence capacity.
pub const MAX_SEQUENCE_LEN: usize = 10;

/// An append-only, fixed-capacity list of colors.
///
/// The write cursor is the current length: it starts at 0, grows by one per
/// round and only goes back to 0 through [`clear`](Self::clear) when a game ends.
/// Playback and verification walk the sequence with their own read index.
///
/// # Type Parameters
/// * `N` - Maximum number of colors (rounds) in one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSequence<const N: usize = MAX_SEQUENCE_LEN> {
    colors: Vec<Color, N>,
}

impl<const N: usize> ColorSequence<N> {
    /// Creates an empty sequence.
    pub const fn new() -> Self {
        Self { colors: Vec::new() }
    }

    /// Appends a color at the write cursor and advances it.
    ///
    /// # Errors
    /// * `CapacityExceeded` - The sequence already holds `N` colors
    pub fn append(&mut self, color: Color) -> Result<(), SequenceError> {
        self.colors
            .push(color)
            .map_err(|_| SequenceError::CapacityExceeded)
    }

    /// Returns the color at `index`.
    ///
    /// # Errors
    /// * `IndexOutOfRange` - `index` is at or past the write cursor
    pub fn get(&self, index: usize) -> Result<Color, SequenceError> {
        self.colors
            .get(index)
            .copied()
            .ok_or(SequenceError::IndexOutOfRange {
                index,
                len: self.colors.len(),
            })
    }

    /// Returns the write cursor (number of stored colors).
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if no color has been stored yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns true once the next append would fail.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.colors.is_full()
    }

    /// Returns the capacity `N`.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Removes every color and rewinds the write cursor.
    pub fn clear(&mut self) {
        self.colors.clear();
    }

    /// Returns the stored colors in order.
    #[inline]
    pub fn as_slice(&self) -> &[Color] {
        &self.colors
    }

    /// Iterates over the stored colors in order.
    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors.iter().copied()
    }
}

impl<const N: usize> Default for ColorSequence<N> {
    fn default() -> Self {
        Self::new()
    }
}

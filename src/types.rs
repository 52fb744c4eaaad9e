//! Core value types shared by the input monitor, engine and hardware seams.

/// One of the three signal colors.
///
/// Each color owns one LED output and one button. Discriminants are the
/// color indices used by [`Color::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Index 0.
    Red = 0,
    /// Index 1.
    Yellow = 1,
    /// Index 2.
    Green = 2,
}

impl Color {
    /// All colors in index order.
    pub const ALL: [Color; 3] = [Color::Red, Color::Yellow, Color::Green];

    /// Number of distinct colors.
    pub const COUNT: usize = 3;

    /// Returns the color index (0, 1 or 2).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Converts an index back into a color.
    pub const fn from_index(index: u8) -> Result<Color, ColorError> {
        match index {
            0 => Ok(Color::Red),
            1 => Ok(Color::Yellow),
            2 => Ok(Color::Green),
            other => Err(ColorError::InvalidIndex(other)),
        }
    }

    /// Returns the button mapped to this color.
    #[inline]
    pub const fn button(self) -> Button {
        match self {
            Color::Red => Button::S2,
            Color::Yellow => Button::S3,
            Color::Green => Button::S4,
        }
    }
}

/// One of the three player buttons.
///
/// Named after the switch labels on the game board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Mapped to [`Color::Red`].
    S2,
    /// Mapped to [`Color::Yellow`].
    S3,
    /// Mapped to [`Color::Green`].
    S4,
}

impl Button {
    /// All buttons in color index order.
    pub const ALL: [Button; 3] = [Button::S2, Button::S3, Button::S4];

    /// Returns the color this button reproduces.
    #[inline]
    pub const fn color(self) -> Color {
        match self {
            Button::S2 => Color::Red,
            Button::S3 => Color::Yellow,
            Button::S4 => Color::Green,
        }
    }

    /// Returns the button index, equal to its color index.
    #[inline]
    pub const fn index(self) -> usize {
        self.color().index()
    }
}

/// Direction of an input transition.
///
/// Inputs idle high through a pull-up, so a press is a falling edge and a
/// release is a rising edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Falling edge.
    Press,
    /// Rising edge.
    Release,
}

impl Edge {
    /// Returns the edge expected after this one.
    #[inline]
    pub const fn opposite(self) -> Edge {
        match self {
            Edge::Press => Edge::Release,
            Edge::Release => Edge::Press,
        }
    }
}

/// Top-level phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GamePhase {
    /// Waiting for a start trigger, or running the start-up chase.
    Startup,
    /// Rounds are being played.
    Playing,
    /// A mismatch occurred; the loss animation is pending or running.
    Lost,
}

/// Color conversion errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorError {
    /// Index is not 0, 1 or 2.
    InvalidIndex(u8),
}

impl core::fmt::Display for ColorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ColorError::InvalidIndex(index) => {
                write!(f, "color index {} is out of range (expected 0-2)", index)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ColorError {}

/// Sequence storage errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// Sequence capacity exceeded.
    CapacityExceeded,

    /// Read cursor beyond the write cursor.
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Current sequence length.
        len: usize,
    },
}

impl core::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SequenceError::CapacityExceeded => {
                write!(f, "sequence capacity exceeded")
            }
            SequenceError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for sequence of length {}", index, len)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SequenceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_index_round_trips_through_from_index() {
        for color in Color::ALL {
            assert_eq!(Color::from_index(color.index() as u8), Ok(color));
        }
    }

    #[test]
    fn from_index_rejects_out_of_range_values() {
        assert_eq!(Color::from_index(3), Err(ColorError::InvalidIndex(3)));
        assert_eq!(Color::from_index(255), Err(ColorError::InvalidIndex(255)));
    }

    #[test]
    fn buttons_and_colors_map_one_to_one() {
        for button in Button::ALL {
            assert_eq!(button.color().button(), button);
            assert_eq!(button.index(), button.color().index());
        }
    }

    #[test]
    fn edge_opposite_toggles() {
        assert_eq!(Edge::Press.opposite(), Edge::Release);
        assert_eq!(Edge::Release.opposite().opposite(), Edge::Release);
    }
}

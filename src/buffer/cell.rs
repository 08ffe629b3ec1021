//! Cell: The atomic unit of the character grid.
//!
//! A cell is one glyph plus a packed console attribute byte. The attribute
//! keeps the classic console bit layout so that raw color bytes embedded in
//! formatted strings map directly onto it:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  Attr (1 byte)                                              │
//! ├──────┬──────┬──────┬──────┬──────┬──────┬──────┬───────────┤
//! │  7   │  6   │  5   │  4   │  3   │  2   │  1   │  0        │
//! │ BG_I │ BG_R │ BG_G │ BG_B │ FG_I │ FG_R │ FG_G │ FG_B      │
//! └──────┴──────┴──────┴──────┴──────┴──────┴──────┴───────────┘
//! ```

use bitflags::bitflags;

bitflags! {
    /// Packed foreground/background color attribute.
    ///
    /// Any byte is a valid attribute; combine flags with bitwise OR.
    ///
    /// # Example
    /// ```
    /// use gridloop::Attr;
    /// let yellow_on_blue = Attr::FG_RED | Attr::FG_GREEN | Attr::FG_INTENSITY | Attr::BG_BLUE;
    /// assert_eq!(yellow_on_blue.bits(), 0x1E);
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Attr: u8 {
        /// Blue foreground component
        const FG_BLUE = 0b0000_0001;
        /// Green foreground component
        const FG_GREEN = 0b0000_0010;
        /// Red foreground component
        const FG_RED = 0b0000_0100;
        /// Bright foreground
        const FG_INTENSITY = 0b0000_1000;
        /// Blue background component
        const BG_BLUE = 0b0001_0000;
        /// Green background component
        const BG_GREEN = 0b0010_0000;
        /// Red background component
        const BG_RED = 0b0100_0000;
        /// Bright background
        const BG_INTENSITY = 0b1000_0000;
    }
}

impl Attr {
    /// White on black, the color every cell is cleared to.
    pub const NEUTRAL: Self = Self::FG_RED.union(Self::FG_GREEN).union(Self::FG_BLUE);

    /// Build an attribute from a raw byte, keeping every bit.
    #[inline]
    pub const fn from_byte(byte: u8) -> Self {
        Self::from_bits_retain(byte)
    }

    /// Foreground nibble (bits 0-3).
    #[inline]
    pub const fn foreground(self) -> u8 {
        self.bits() & 0x0F
    }

    /// Background nibble (bits 4-7), shifted down.
    #[inline]
    pub const fn background(self) -> u8 {
        self.bits() >> 4
    }
}

impl Default for Attr {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl From<u8> for Attr {
    #[inline]
    fn from(byte: u8) -> Self {
        Self::from_byte(byte)
    }
}

impl std::fmt::Debug for Attr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Attr({:#04x})", self.bits())
    }
}

/// Glyph written in place of bytes outside the ASCII range.
pub const PLACEHOLDER: char = '?';

/// A single grid cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The glyph to display.
    pub ch: char,
    /// Foreground/background attribute.
    pub color: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell (space with the neutral color).
    pub const EMPTY: Self = Self {
        ch: ' ',
        color: Attr::NEUTRAL,
    };

    /// Create a cell with the neutral color.
    #[inline]
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            color: Attr::NEUTRAL,
        }
    }

    /// Create a cell from a raw source byte.
    ///
    /// Bytes with the high bit set become [`PLACEHOLDER`].
    #[inline]
    pub const fn from_byte(byte: u8, color: Attr) -> Self {
        let ch = if byte & 0x80 != 0 {
            PLACEHOLDER
        } else {
            byte as char
        };
        Self { ch, color }
    }

    /// Builder: set color.
    #[inline]
    #[must_use]
    pub const fn with_color(mut self, color: Attr) -> Self {
        self.color = color;
        self
    }

    /// Reset to the empty state.
    #[inline]
    pub const fn reset(&mut self) {
        *self = Self::EMPTY;
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("ch", &self.ch)
            .field("color", &self.color)
            .finish()
    }
}

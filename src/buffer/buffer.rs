//! Buffer: A fixed-size grid of cells.
//!
//! Cells are stored contiguously in row-major order. The length is fixed at
//! construction; nothing resizes a buffer afterwards.

use super::cell::{Attr, Cell};
use super::format::{self, Token};

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    /// Columns.
    pub width: u16,
    /// Rows.
    pub height: u16,
}

impl Size {
    /// The fixed console grid used by the loop.
    pub const DEFAULT: Self = Self::new(150, 45);

    /// Create a new size.
    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Total number of cells.
    #[inline]
    pub const fn area(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A grid of cells representing one frame.
///
/// Access is in row-major order: `index = y * width + x`. Coordinates are
/// signed so that callers can pass computed positions without casting;
/// negative values are simply out of bounds.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Grid dimensions.
    size: Size,
}

impl Buffer {
    /// Create a new buffer with every cell empty.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(size: Size) -> Self {
        assert!(
            size.width > 0 && size.height > 0,
            "Buffer dimensions must be non-zero"
        );
        Self {
            cells: vec![Cell::EMPTY; size.area()],
            size,
        }
    }

    /// Grid dimensions.
    #[inline]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.size.width
    }

    /// Buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.size.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false` after construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The underlying cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.width as usize)
    }

    /// Convert (x, y) to a linear index.
    ///
    /// Returns `None` unless `0 <= x < width` and `0 <= y < height`.
    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let x = u16::try_from(x).ok().filter(|&x| x < self.size.width)?;
        let y = u16::try_from(y).ok().filter(|&y| y < self.size.height)?;
        Some((y as usize) * (self.size.width as usize) + (x as usize))
    }

    /// Linear index of (x, y) without a per-row check.
    ///
    /// Used by the string writers, which wrap across rows.
    #[inline]
    fn linear_index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        y.checked_mul(self.size.width as usize)?.checked_add(x)
    }

    /// Reset every cell to a space with the neutral color.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Mutable access to the cell at (x, y).
    ///
    /// # Panics
    /// Panics if (x, y) is outside the grid. Use [`Buffer::try_get`] when the
    /// position is not known to be valid.
    #[inline]
    #[track_caller]
    pub fn get(&mut self, x: i32, y: i32) -> &mut Cell {
        match self.index_of(x, y) {
            Some(idx) => &mut self.cells[idx],
            None => panic!(
                "cell ({x}, {y}) is outside the {}x{} grid",
                self.size.width, self.size.height
            ),
        }
    }

    /// Mutable access to the cell at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn try_get(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index_of(x, y).map(|i| &mut self.cells[i])
    }

    /// Shared access to the cell at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Write `text` starting at (x, y) with a single color.
    ///
    /// Writing advances in buffer order, so a long string continues on the
    /// next row. Output stops silently at the end of the buffer, bytes with
    /// the high bit set are written as `'?'`, and a negative origin writes
    /// nothing.
    pub fn write_str(&mut self, x: i32, y: i32, color: Attr, text: impl AsRef<[u8]>) {
        let Some(mut idx) = self.linear_index(x, y) else {
            return;
        };
        for &byte in text.as_ref() {
            let Some(cell) = self.cells.get_mut(idx) else {
                break;
            };
            *cell = Cell::from_byte(byte, color);
            idx += 1;
        }
    }

    /// Like [`Buffer::write_str`] but honours inline `%c<byte>` color escapes.
    ///
    /// See [`format`](super::format) for the escape grammar.
    pub fn write_formatted(&mut self, x: i32, y: i32, color: Attr, text: impl AsRef<[u8]>) {
        let Some(mut idx) = self.linear_index(x, y) else {
            return;
        };
        let mut color = color;
        for token in format::tokens(text.as_ref()) {
            match token {
                Token::SetColor(next) => color = next,
                Token::Glyph(byte) => {
                    let Some(cell) = self.cells.get_mut(idx) else {
                        break;
                    };
                    *cell = Cell::from_byte(byte, color);
                    idx += 1;
                }
            }
        }
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: Size = Size::new(10, 4);

    fn text_of_row(buffer: &Buffer, y: usize) -> String {
        buffer.rows().nth(y).unwrap().iter().map(|c| c.ch).collect()
    }

    #[test]
    fn test_buffer_new() {
        let buffer = Buffer::new(Size::DEFAULT);
        assert_eq!(buffer.width(), 150);
        assert_eq!(buffer.height(), 45);
        assert_eq!(buffer.len(), 150 * 45);
        assert!(buffer.cells().iter().all(|c| *c == Cell::EMPTY));
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn test_buffer_zero_width() {
        Buffer::new(Size::new(0, 24));
    }

    #[test]
    fn test_get_and_try_get_agree() {
        let mut buffer = Buffer::new(SMALL);
        buffer.get(3, 2).ch = 'Q';
        assert_eq!(buffer.try_get(3, 2).map(|c| c.ch), Some('Q'));
        assert_eq!(buffer.cells()[2 * 10 + 3].ch, 'Q');
    }

    #[test]
    fn test_try_get_out_of_bounds() {
        let mut buffer = Buffer::new(SMALL);
        assert!(buffer.try_get(10, 0).is_none());
        assert!(buffer.try_get(0, 4).is_none());
        assert!(buffer.try_get(-1, 0).is_none());
        assert!(buffer.try_get(0, -1).is_none());
        assert!(buffer.try_get(9, 3).is_some());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_get_out_of_bounds_panics() {
        let mut buffer = Buffer::new(SMALL);
        let _ = buffer.get(10, 0);
    }

    #[test]
    fn test_clear() {
        let mut buffer = Buffer::new(SMALL);
        *buffer.get(1, 1) = Cell::new('X').with_color(Attr::BG_RED);
        buffer.clear();
        assert!(buffer.cells().iter().all(|c| *c == Cell::EMPTY));
    }

    #[test]
    fn test_write_str() {
        let mut buffer = Buffer::new(SMALL);
        buffer.write_str(0, 0, Attr::FG_GREEN, "AB");
        assert_eq!(buffer.cell(0, 0), Some(&Cell::new('A').with_color(Attr::FG_GREEN)));
        assert_eq!(buffer.cell(1, 0), Some(&Cell::new('B').with_color(Attr::FG_GREEN)));
        assert_eq!(buffer.cell(2, 0), Some(&Cell::EMPTY));
    }

    #[test]
    fn test_write_str_wraps_to_next_row() {
        let mut buffer = Buffer::new(SMALL);
        buffer.write_str(9, 0, Attr::NEUTRAL, "AB");
        assert_eq!(buffer.cell(9, 0).unwrap().ch, 'A');
        assert_eq!(buffer.cell(0, 1).unwrap().ch, 'B');
    }

    #[test]
    fn test_write_str_stops_at_end() {
        let mut buffer = Buffer::new(SMALL);
        buffer.write_str(8, 3, Attr::NEUTRAL, "xyz");
        assert_eq!(text_of_row(&buffer, 3), "        xy");
        buffer.write_str(0, 4, Attr::NEUTRAL, "zz");
        assert_eq!(text_of_row(&buffer, 0), "          ");
    }

    #[test]
    fn test_write_str_negative_origin() {
        let mut buffer = Buffer::new(SMALL);
        buffer.write_str(-1, 0, Attr::NEUTRAL, "abc");
        buffer.write_str(0, -1, Attr::NEUTRAL, "abc");
        assert!(buffer.cells().iter().all(|c| *c == Cell::EMPTY));
    }

    #[test]
    fn test_write_far_origin_is_dropped() {
        let mut buffer = Buffer::new(SMALL);
        buffer.write_str(i32::MAX, i32::MAX, Attr::NEUTRAL, "abc");
        buffer.write_formatted(0, i32::MAX, Attr::NEUTRAL, b"%c\x0Cabc");
        buffer.write_str(i32::MAX, 0, Attr::NEUTRAL, "abc");
        assert!(buffer.cells().iter().all(|c| *c == Cell::EMPTY));
    }

    #[test]
    fn test_write_str_non_ascii_placeholder() {
        let mut buffer = Buffer::new(SMALL);
        buffer.write_str(0, 0, Attr::NEUTRAL, "é!");
        // Two UTF-8 bytes, each replaced.
        assert_eq!(text_of_row(&buffer, 0), "??!       ");
    }

    #[test]
    fn test_write_formatted_color_switch() {
        let mut buffer = Buffer::new(SMALL);
        buffer.write_formatted(0, 0, Attr::NEUTRAL, b"x%c\x1Ey");
        assert_eq!(buffer.cell(0, 0), Some(&Cell::new('x')));
        assert_eq!(
            buffer.cell(1, 0),
            Some(&Cell::new('y').with_color(Attr::from_byte(0x1E)))
        );
        assert_eq!(buffer.cell(2, 0), Some(&Cell::EMPTY));
    }

    #[test]
    fn test_write_formatted_trailing_percent() {
        let mut buffer = Buffer::new(SMALL);
        buffer.write_formatted(0, 0, Attr::FG_RED, "100%");
        assert_eq!(text_of_row(&buffer, 0), "100%      ");
        assert!(buffer.cells()[..4].iter().all(|c| c.color == Attr::FG_RED));
    }

    #[test]
    fn test_write_formatted_high_color_byte() {
        let mut buffer = Buffer::new(SMALL);
        buffer.write_formatted(0, 0, Attr::NEUTRAL, [b'%', b'c', 0x9F, b'k']);
        assert_eq!(buffer.cell(0, 0).unwrap().ch, 'k');
        assert_eq!(buffer.cell(0, 0).unwrap().color.bits(), 0x9F);
    }
}

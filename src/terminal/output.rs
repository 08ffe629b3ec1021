//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.

use crate::buffer::{Attr, Buffer};
use std::io::Write;

/// Map a console color nibble (BGR bit order) to an ANSI palette index (RGB).
#[inline]
const fn ansi_index(nibble: u8) -> u8 {
    ((nibble & 0x01) << 2) | (nibble & 0x02) | ((nibble & 0x04) >> 2)
}

/// SGR foreground code for an attribute.
#[inline]
pub const fn fg_code(attr: Attr) -> u8 {
    let fg = attr.foreground();
    let base = if fg & 0x08 != 0 { 90 } else { 30 };
    base + ansi_index(fg)
}

/// SGR background code for an attribute.
#[inline]
pub const fn bg_code(attr: Attr) -> u8 {
    let bg = attr.background();
    let base = if bg & 0x08 != 0 { 100 } else { 40 };
    base + ansi_index(bg)
}

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// All output is accumulated here, then flushed in a single `write()` syscall
/// to prevent terminal flickering.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a full default frame.
    ///
    /// One SGR sequence plus one glyph per cell is roughly 14 bytes.
    pub fn new() -> Self {
        Self::with_capacity(crate::buffer::Size::DEFAULT.area() * 14)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write one glyph.
    #[inline]
    pub fn write_char(&mut self, ch: char) {
        let mut utf8 = [0u8; 4];
        self.data.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    }

    /// Move cursor to (x, y) position (1-indexed for ANSI).
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        // CSI row ; col H
        let _ = write!(self.data, "\x1b[{};{}H", y + 1, x + 1);
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25h");
    }

    /// Set the current color from a console attribute.
    #[inline]
    pub fn set_attr(&mut self, attr: Attr) {
        let _ = write!(self.data, "\x1b[{};{}m", fg_code(attr), bg_code(attr));
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Clear the entire screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[2J");
    }

    /// Encode a whole frame, starting at the grid origin.
    ///
    /// The attribute is emitted before every cell, whether or not it changed.
    pub fn encode_frame(&mut self, buffer: &Buffer) {
        for (y, row) in (0u16..).zip(buffer.rows()) {
            self.cursor_move(0, y);
            for cell in row {
                self.set_attr(cell.color);
                self.write_char(cell.ch);
            }
        }
        self.reset_attrs();
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Cell, Size};

    #[test]
    fn test_neutral_maps_to_white_on_black() {
        assert_eq!(fg_code(Attr::NEUTRAL), 37);
        assert_eq!(bg_code(Attr::NEUTRAL), 40);
    }

    #[test]
    fn test_bgr_to_rgb_mapping() {
        assert_eq!(fg_code(Attr::FG_BLUE), 34);
        assert_eq!(fg_code(Attr::FG_RED), 31);
        assert_eq!(fg_code(Attr::FG_GREEN | Attr::FG_BLUE), 36);
        assert_eq!(bg_code(Attr::BG_RED | Attr::BG_GREEN), 43);
    }

    #[test]
    fn test_intensity_uses_bright_palette() {
        assert_eq!(fg_code(Attr::FG_RED | Attr::FG_INTENSITY), 91);
        assert_eq!(bg_code(Attr::BG_BLUE | Attr::BG_INTENSITY), 104);
        assert_eq!(fg_code(Attr::FG_INTENSITY), 90);
    }

    #[test]
    fn test_cursor_move_is_one_indexed() {
        let mut out = OutputBuffer::with_capacity(16);
        out.cursor_move(0, 0);
        assert_eq!(out.as_bytes(), b"\x1b[1;1H");
    }

    #[test]
    fn test_encode_frame_sets_attr_per_cell() {
        let mut buffer = Buffer::new(Size::new(2, 1));
        *buffer.get(1, 0) = Cell::new('Z').with_color(Attr::FG_GREEN);
        let mut out = OutputBuffer::with_capacity(64);
        out.encode_frame(&buffer);
        assert_eq!(
            out.as_bytes(),
            b"\x1b[1;1H\x1b[37;40m \x1b[32;40mZ\x1b[0m".as_slice()
        );
    }

    #[test]
    fn test_cursor_visibility_sequences() {
        let mut out = OutputBuffer::with_capacity(16);
        out.cursor_hide();
        out.cursor_show();
        assert_eq!(out.as_bytes(), b"\x1b[?25l\x1b[?25h");
    }

    #[test]
    fn test_flush_to_writer() {
        let mut out = OutputBuffer::with_capacity(16);
        out.cursor_move(4, 2);
        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"\x1b[3;5H");
        out.clear();
        assert!(out.is_empty());
    }
}

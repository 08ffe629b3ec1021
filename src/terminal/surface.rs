//! Surface: The terminal device the loop paints to and reads keys from.

use super::keys::Key;
use super::output::OutputBuffer;
use crate::buffer::{Buffer, Size};
use crossterm::event::{self, Event};
use crossterm::{cursor, execute, terminal};
use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::time::Duration;

/// The narrow device interface the loop depends on.
///
/// A surface is owned by exactly one loop and is only touched from the loop
/// thread, so it needs no internal synchronization.
pub trait Surface {
    /// Clear the physical screen.
    fn clear(&mut self) -> io::Result<()>;

    /// Flush every cell of `buffer` to the device, starting at the origin.
    fn paint(&mut self, buffer: &Buffer) -> io::Result<()>;

    /// Move the device cursor. The loop homes it before every paint.
    fn set_cursor(&mut self, x: u16, y: u16) -> io::Result<()>;

    /// Show or hide the device cursor.
    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    /// Fixed grid dimensions.
    fn size(&self) -> Size;

    /// Non-blocking check for a pending key byte.
    fn poll_key(&mut self) -> io::Result<bool>;

    /// Blocking read of one key byte.
    fn read_key(&mut self) -> io::Result<u8>;
}

/// Crossterm-backed surface writing ANSI to stdout.
///
/// Key events are re-encoded into the legacy byte protocol and queued, so
/// an extended key is delivered as two consecutive [`Surface::read_key`]
/// results.
pub struct TerminalSurface {
    size: Size,
    stdout: Stdout,
    output: OutputBuffer,
    pending: VecDeque<u8>,
}

impl TerminalSurface {
    /// Create a surface for a grid of `size`. Does not touch the terminal.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            stdout: io::stdout(),
            output: OutputBuffer::with_capacity(size.area() * 14),
            pending: VecDeque::new(),
        }
    }

    /// Take over the terminal: raw mode, fixed grid size, cleared screen.
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.stdout,
            terminal::SetSize(self.size.width, self.size.height)
        )?;
        self.clear()
    }

    /// Leave raw mode and show the cursor again.
    ///
    /// The loop never calls this; the surrounding application decides.
    pub fn restore(&mut self) -> io::Result<()> {
        execute!(
            self.stdout,
            crossterm::style::ResetColor,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            cursor::Show
        )?;
        terminal::disable_raw_mode()
    }

    /// Drain terminal events until one yields key bytes or none remain.
    fn fill_pending(&mut self) -> io::Result<()> {
        while self.pending.is_empty() && event::poll(Duration::ZERO)? {
            if let Event::Key(key_event) = event::read()? {
                if let Some(key) = Key::from_event(&key_event) {
                    self.pending.extend(key.bytes());
                }
            }
        }
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn clear(&mut self) -> io::Result<()> {
        self.output.clear();
        self.output.reset_attrs();
        self.output.clear_screen();
        self.output.flush_to(&mut self.stdout)
    }

    fn paint(&mut self, buffer: &Buffer) -> io::Result<()> {
        self.output.clear();
        self.output.encode_frame(buffer);
        self.output.flush_to(&mut self.stdout)
    }

    fn set_cursor(&mut self, x: u16, y: u16) -> io::Result<()> {
        self.output.clear();
        self.output.cursor_move(x, y);
        self.output.flush_to(&mut self.stdout)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.output.clear();
        if visible {
            self.output.cursor_show();
        } else {
            self.output.cursor_hide();
        }
        self.output.flush_to(&mut self.stdout)
    }

    fn size(&self) -> Size {
        self.size
    }

    fn poll_key(&mut self) -> io::Result<bool> {
        self.fill_pending()?;
        Ok(!self.pending.is_empty())
    }

    fn read_key(&mut self) -> io::Result<u8> {
        loop {
            if let Some(byte) = self.pending.pop_front() {
                return Ok(byte);
            }
            if let Event::Key(key_event) = event::read()? {
                if let Some(key) = Key::from_event(&key_event) {
                    self.pending.extend(key.bytes());
                }
            }
        }
    }
}

impl std::fmt::Debug for TerminalSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalSurface")
            .field("size", &self.size)
            .field("pending", &self.pending.len())
            .finish()
    }
}

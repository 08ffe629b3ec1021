//! Logical keys and the legacy two-byte key protocol.
//!
//! The surface delivers keys as a byte stream. Plain keys are one byte;
//! navigation and function keys are a lead byte ([`EXTENDED_LEAD`]) followed
//! by a scan code. The loop merges the pair into one [`Key::Extended`], and
//! clients receive a single integer code where extended keys carry
//! [`EXTENDED_FLAG`].

use super::Surface;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;

/// Lead byte announcing a two-byte extended key.
pub const EXTENDED_LEAD: u8 = 0xE0;

/// Marker bit set on the client code of an extended key.
pub const EXTENDED_FLAG: u16 = 0x0100;

/// Client-facing key codes.
pub mod codes {
    use super::EXTENDED_FLAG;

    /// Backspace.
    pub const BACKSPACE: u16 = 0x08;
    /// Tab.
    pub const TAB: u16 = 0x09;
    /// Enter / Return.
    pub const ENTER: u16 = 0x0D;
    /// Escape.
    pub const ESC: u16 = 0x1B;
    /// Home.
    pub const HOME: u16 = EXTENDED_FLAG | 0x47;
    /// Up arrow.
    pub const UP: u16 = EXTENDED_FLAG | 0x48;
    /// Page Up.
    pub const PAGE_UP: u16 = EXTENDED_FLAG | 0x49;
    /// Left arrow.
    pub const LEFT: u16 = EXTENDED_FLAG | 0x4B;
    /// Right arrow.
    pub const RIGHT: u16 = EXTENDED_FLAG | 0x4D;
    /// End.
    pub const END: u16 = EXTENDED_FLAG | 0x4F;
    /// Down arrow.
    pub const DOWN: u16 = EXTENDED_FLAG | 0x50;
    /// Page Down.
    pub const PAGE_DOWN: u16 = EXTENDED_FLAG | 0x51;
    /// Insert.
    pub const INSERT: u16 = EXTENDED_FLAG | 0x52;
    /// Delete.
    pub const DELETE: u16 = EXTENDED_FLAG | 0x53;

    /// Function key `F(n)` for `n` in 1..=12.
    pub const fn function(n: u8) -> Option<u16> {
        match n {
            1..=10 => Some(EXTENDED_FLAG | (0x3A + n as u16)),
            11 => Some(EXTENDED_FLAG | 0x85),
            12 => Some(EXTENDED_FLAG | 0x86),
            _ => None,
        }
    }
}

/// A logical keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A single-byte key.
    Simple(u8),
    /// A two-byte key, identified by its second byte.
    Extended(u8),
}

impl Key {
    /// Collapse to the integer code handed to clients.
    #[inline]
    pub const fn code(self) -> u16 {
        match self {
            Self::Simple(b) => b as u16,
            Self::Extended(b) => b as u16 | EXTENDED_FLAG,
        }
    }

    /// Inverse of [`Key::code`]. Returns `None` for codes above 0x1FF.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            0..=0xFF => Some(Self::Simple(code as u8)),
            0x100..=0x1FF => Some(Self::Extended((code & 0xFF) as u8)),
            _ => None,
        }
    }

    /// The byte sequence this key travels as.
    pub fn bytes(self) -> impl Iterator<Item = u8> {
        let (pair, len) = match self {
            Self::Simple(b) => ([b, 0], 1),
            Self::Extended(b) => ([EXTENDED_LEAD, b], 2),
        };
        pair.into_iter().take(len)
    }

    /// Translate a crossterm key event.
    ///
    /// Only presses translate; releases, repeats and keys with no legacy
    /// encoding yield `None`.
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        match event.code {
            KeyCode::Char(c) if c.is_ascii() => {
                let byte = c as u8;
                if event.modifiers.contains(KeyModifiers::CONTROL) && c.is_ascii_alphabetic() {
                    Some(Self::Simple(byte & 0x1F))
                } else {
                    Some(Self::Simple(byte))
                }
            }
            KeyCode::Backspace => Self::from_code(codes::BACKSPACE),
            KeyCode::Tab => Self::from_code(codes::TAB),
            KeyCode::Enter => Self::from_code(codes::ENTER),
            KeyCode::Esc => Self::from_code(codes::ESC),
            KeyCode::Home => Self::from_code(codes::HOME),
            KeyCode::Up => Self::from_code(codes::UP),
            KeyCode::PageUp => Self::from_code(codes::PAGE_UP),
            KeyCode::Left => Self::from_code(codes::LEFT),
            KeyCode::Right => Self::from_code(codes::RIGHT),
            KeyCode::End => Self::from_code(codes::END),
            KeyCode::Down => Self::from_code(codes::DOWN),
            KeyCode::PageDown => Self::from_code(codes::PAGE_DOWN),
            KeyCode::Insert => Self::from_code(codes::INSERT),
            KeyCode::Delete => Self::from_code(codes::DELETE),
            KeyCode::F(n) => codes::function(n).and_then(Self::from_code),
            _ => None,
        }
    }
}

/// Read one logical key, merging an extended pair into a single value.
///
/// Blocks until the surface delivers the needed bytes.
pub fn read_logical_key(surface: &mut dyn Surface) -> io::Result<Key> {
    let lead = surface.read_key()?;
    if lead == EXTENDED_LEAD {
        Ok(Key::Extended(surface.read_key()?))
    } else {
        Ok(Key::Simple(lead))
    }
}

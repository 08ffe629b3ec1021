//! Inline color-escape scanner for formatted strings.
//!
//! A formatted string is plain bytes with embedded `%c<byte>` tokens. The
//! byte after `%c` is taken verbatim as the new [`Attr`] for every glyph that
//! follows. Anything that does not complete the pattern is literal text:
//!
//! ```text
//!            '%'              'c'
//! Literal ─────────▶ AwaitKind ─────▶ AwaitColor
//!    ▲                   │                │
//!    │   other: emit '%' │   any byte:    │
//!    │   and reprocess   │   set color    │
//!    └───────────────────┴────────────────┘
//! ```
//!
//! At end of input a dangling `%` or `%c` is emitted as literal glyphs.

use super::cell::Attr;

/// Marker byte that opens an escape.
pub const ESCAPE: u8 = b'%';
/// Escape kind selecting a color change.
pub const COLOR_KIND: u8 = b'c';

/// One scanned unit of a formatted string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A source byte to write as a glyph.
    Glyph(u8),
    /// Switch the active color for subsequent glyphs.
    SetColor(Attr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Literal,
    AwaitKind,
    AwaitColor,
}

/// Iterator over the [`Token`]s of a formatted byte string.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    bytes: &'a [u8],
    pos: usize,
    state: State,
    pending: Option<u8>,
}

impl<'a> Tokens<'a> {
    /// Start scanning `bytes`.
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            state: State::Literal,
            pending: None,
        }
    }

    /// Flush a partially matched escape at end of input.
    fn finish(&mut self) -> Option<Token> {
        match std::mem::replace(&mut self.state, State::Literal) {
            State::Literal => None,
            State::AwaitKind => Some(Token::Glyph(ESCAPE)),
            State::AwaitColor => {
                self.pending = Some(COLOR_KIND);
                Some(Token::Glyph(ESCAPE))
            }
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(byte) = self.pending.take() {
            return Some(Token::Glyph(byte));
        }

        loop {
            let Some(&byte) = self.bytes.get(self.pos) else {
                return self.finish();
            };

            match self.state {
                State::Literal => {
                    self.pos += 1;
                    if byte == ESCAPE {
                        self.state = State::AwaitKind;
                    } else {
                        return Some(Token::Glyph(byte));
                    }
                }
                State::AwaitKind => {
                    if byte == COLOR_KIND {
                        self.pos += 1;
                        self.state = State::AwaitColor;
                    } else {
                        // Not an escape: the '%' is literal, the current
                        // byte is rescanned from the literal state.
                        self.state = State::Literal;
                        return Some(Token::Glyph(ESCAPE));
                    }
                }
                State::AwaitColor => {
                    self.pos += 1;
                    self.state = State::Literal;
                    return Some(Token::SetColor(Attr::from_byte(byte)));
                }
            }
        }
    }
}

/// Scan a formatted byte string.
pub const fn tokens(bytes: &[u8]) -> Tokens<'_> {
    Tokens::new(bytes)
}

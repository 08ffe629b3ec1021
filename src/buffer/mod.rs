//! Buffer module: The character grid the loop renders into.
//!
//! This module contains:
//! - [`Cell`]: One glyph plus its color attribute
//! - [`Attr`]: Packed foreground/background console attribute
//! - [`Buffer`]: A fixed-size row-major grid of cells
//! - [`format`]: Scanner for inline `%c<byte>` color escapes

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
pub mod format;

pub use cell::{Attr, Cell, PLACEHOLDER};
pub use buffer::{Buffer, Size};

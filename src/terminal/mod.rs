//! Terminal module: The device side of the loop.
//!
//! - [`Surface`]: the narrow interface the loop paints and polls through
//! - [`TerminalSurface`]: crossterm implementation over stdout
//! - [`OutputBuffer`]: single-write ANSI frame encoder
//! - [`keys`]: logical keys and the two-byte extended key protocol

pub mod keys;
mod output;
mod surface;

pub use keys::{read_logical_key, Key, EXTENDED_FLAG, EXTENDED_LEAD};
pub use output::{bg_code, fg_code, OutputBuffer};
pub use surface::{Surface, TerminalSurface};

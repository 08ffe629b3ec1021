//! # Gridloop
//!
//! A single-threaded terminal render loop over a fixed-size character grid.
//!
//! ## Core Concepts
//!
//! - **Frame buffer**: a row-major grid of glyph + console-attribute cells,
//!   cleared and redrawn by the client every pass
//! - **Surface**: the terminal device, reached through a narrow trait
//! - **Loop**: render, then idle until a key, a queued action, or a tick
//! - **Invoke**: any thread can queue work that later runs on the loop thread
//!
//! ## Example
//!
//! ```rust,ignore
//! use gridloop::{codes, Attr, Screen, ScreenClient, Size, TerminalSurface};
//!
//! struct Hello;
//!
//! impl ScreenClient for Hello {
//!     fn render(&mut self, screen: &mut Screen<Self>) {
//!         screen.write_formatted(2, 1, Attr::NEUTRAL, b"press %c\x0EESC%c\x07 to quit");
//!     }
//!
//!     fn on_key_stroke(&mut self, screen: &mut Screen<Self>, code: u16) {
//!         if code == codes::ESC {
//!             screen.quit(0);
//!         }
//!     }
//! }
//!
//! let mut surface = TerminalSurface::new(Size::DEFAULT);
//! surface.enter()?;
//! let code = Screen::new(Box::new(surface)).run(&mut Hello)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod runtime;
pub mod terminal;

// Re-exports for convenience
pub use buffer::{Attr, Buffer, Cell, Size};
pub use runtime::{Action, Invoker, LoopState, Screen, ScreenClient, ScreenConfig};
pub use terminal::keys::codes;
pub use terminal::{Key, Surface, TerminalSurface};

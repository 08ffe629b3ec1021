//! Runtime: The single-threaded render loop and its cross-thread queue.
//!
//! - [`Screen`]: owns the surface and buffer, drives a [`ScreenClient`]
//! - [`ActionQueue`] / [`Invoker`]: deferred work from any thread
//! - [`TickClock`]: fixed-step tick deadlines
//!
//! # Threading
//!
//! ```text
//! ┌──────────────┐   Invoker::invoke   ┌────────────────────────────┐
//! │ Any thread   │ ──────────────────▶ │ ActionQueue                │
//! └──────────────┘                     └─────────────┬──────────────┘
//!                                                    │ one per pass
//!                                                    ▼
//!                                      ┌────────────────────────────┐
//!                                      │ Loop thread: Screen::run   │
//!                                      │ render / keys / ticks      │
//!                                      └────────────────────────────┘
//! ```

mod client;
mod config;
mod queue;
mod screen;
mod ticker;

pub use client::ScreenClient;
pub use config::ScreenConfig;
pub use queue::{ActionQueue, QueueHandle};
pub use screen::{Action, Invoker, LoopState, Screen};
pub use ticker::{TickClock, TICK_INTERVAL};

//! Screen: The render/input/tick loop.
//!
//! One thread owns the screen and runs [`Screen::run`]. Each pass clears the
//! buffer, lets the client render, and paints. The loop then idles until a
//! key arrives, an action is queued, or a tick is due:
//!
//! ```text
//!          ┌──────────────────────────────────────────┐
//!          ▼                                          │
//!   clear ─▶ render ─▶ paint ─▶ idle wait ──key──▶ on_key_stroke
//!                                 │   ▲    ──action──▶ run one action
//!                            tick │   │
//!                                 ▼   │
//!                    on_tick ─▶ clear ─▶ render ─▶ paint
//! ```
//!
//! Other threads reach the loop only through [`Invoker`].

use super::client::ScreenClient;
use super::config::ScreenConfig;
use super::queue::{ActionQueue, QueueHandle};
use super::ticker::TickClock;
use crate::buffer::{Attr, Buffer, Cell, Size};
use crate::terminal::{read_logical_key, Surface};
use std::io;
use std::thread;
use std::time::Instant;
use tracing::{debug, trace};

/// Deferred work executed on the loop thread.
pub type Action<C> = Box<dyn FnOnce(&mut Screen<C>, &mut C) + Send + 'static>;

/// Loop lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Rendering and dispatching.
    Running,
    /// Quit requested; the current pass finishes and the loop returns.
    Draining,
    /// `run` has returned (or has not been called yet).
    Stopped,
}

/// Why the idle wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wake {
    Key,
    Action,
    Quit,
}

/// Cloneable, thread-safe handle for queueing work onto a [`Screen`].
pub struct Invoker<C> {
    handle: QueueHandle<Action<C>>,
}

impl<C> Invoker<C> {
    /// Queue `action` to run on the loop thread.
    ///
    /// Returns `false` if the screen no longer exists; the action is dropped.
    /// Actions queued after the loop stopped are kept but never run.
    pub fn invoke<F>(&self, action: F) -> bool
    where
        F: FnOnce(&mut Screen<C>, &mut C) + Send + 'static,
    {
        let delivered = self.handle.push(Box::new(action));
        if !delivered {
            trace!("screen dropped, discarding action");
        }
        delivered
    }
}

impl<C> Clone for Invoker<C> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
        }
    }
}

impl<C> std::fmt::Debug for Invoker<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invoker").finish_non_exhaustive()
    }
}

/// The loop: owns the surface, the frame buffer and the action queue.
pub struct Screen<C> {
    config: ScreenConfig,
    surface: Box<dyn Surface>,
    buffer: Buffer,
    queue: ActionQueue<Action<C>>,
    clock: TickClock,
    state: LoopState,
    exit_code: i32,
    frames: u64,
}

impl<C> Screen<C> {
    /// Create a screen over `surface` with default configuration.
    pub fn new(surface: Box<dyn Surface>) -> Self {
        Self::with_config(surface, ScreenConfig::default())
    }

    /// Create a screen over `surface` with custom configuration.
    ///
    /// The grid size is taken from the surface.
    pub fn with_config(surface: Box<dyn Surface>, config: ScreenConfig) -> Self {
        let buffer = Buffer::new(surface.size());
        let clock = TickClock::new(Instant::now(), config.tick_interval);
        Self {
            config,
            surface,
            buffer,
            queue: ActionQueue::new(),
            clock,
            state: LoopState::Stopped,
            exit_code: 0,
            frames: 0,
        }
    }

    /// Grid dimensions.
    #[inline]
    pub fn size(&self) -> Size {
        self.buffer.size()
    }

    /// Current lifecycle state.
    #[inline]
    pub const fn state(&self) -> LoopState {
        self.state
    }

    /// Exit code of the most recent [`Screen::quit`].
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Frames painted since the last `run` started.
    #[inline]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Ticks delivered since the last `run` started.
    #[inline]
    pub const fn ticks(&self) -> u64 {
        self.clock.ticks()
    }

    /// The frame buffer.
    #[inline]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Request the loop to stop with `code`.
    ///
    /// The last call before the loop returns decides the exit code.
    pub fn quit(&mut self, code: i32) {
        debug!(code, state = ?self.state, "quit requested");
        self.exit_code = code;
        if self.state == LoopState::Running {
            self.state = LoopState::Draining;
        }
    }

    /// Queue `action` to run on the loop thread.
    pub fn invoke<F>(&self, action: F)
    where
        F: FnOnce(&mut Self, &mut C) + Send + 'static,
    {
        self.queue.push(Box::new(action));
    }

    /// A handle other threads can use to queue actions.
    pub fn invoker(&self) -> Invoker<C> {
        Invoker {
            handle: self.queue.handle(),
        }
    }

    /// Number of actions waiting to run.
    #[inline]
    pub fn pending_actions(&self) -> usize {
        self.queue.len()
    }

    /// The cell at (x, y).
    ///
    /// # Panics
    /// Panics if (x, y) is outside the grid.
    #[inline]
    #[track_caller]
    pub fn get_char(&mut self, x: i32, y: i32) -> &mut Cell {
        self.buffer.get(x, y)
    }

    /// The cell at (x, y), or `None` if outside the grid.
    #[inline]
    pub fn try_get_char(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.buffer.try_get(x, y)
    }

    /// Write plain text; see [`Buffer::write_str`].
    #[inline]
    pub fn write_str(&mut self, x: i32, y: i32, color: Attr, text: impl AsRef<[u8]>) {
        self.buffer.write_str(x, y, color, text);
    }

    /// Write text with inline `%c<byte>` color escapes; see
    /// [`Buffer::write_formatted`].
    #[inline]
    pub fn write_formatted(&mut self, x: i32, y: i32, color: Attr, text: impl AsRef<[u8]>) {
        self.buffer.write_formatted(x, y, color, text);
    }
}

impl<C: ScreenClient> Screen<C> {
    /// Run the loop until [`Screen::quit`] is called and return its code.
    ///
    /// Takes over the surface (cleared, cursor hidden if configured) and
    /// leaves it as-is on return. Surface errors abort the loop.
    pub fn run(&mut self, client: &mut C) -> io::Result<i32> {
        self.surface.clear()?;
        if self.config.hide_cursor {
            self.surface.set_cursor_visible(false)?;
        }

        self.state = LoopState::Running;
        self.exit_code = 0;
        self.frames = 0;
        self.clock.reset(Instant::now());

        let size = self.size();
        debug!(
            width = size.width,
            height = size.height,
            tick = ?self.config.tick_interval,
            "screen loop started"
        );

        let result = {
            let mut guard = StopOnExit { screen: self };
            guard.screen.run_passes(client)
        };
        result?;

        debug!(
            exit_code = self.exit_code,
            frames = self.frames,
            ticks = self.clock.ticks(),
            "screen loop stopped"
        );
        Ok(self.exit_code)
    }

    fn run_passes(&mut self, client: &mut C) -> io::Result<()> {
        while self.state == LoopState::Running {
            self.present(client)?;

            match self.idle_wait(client)? {
                Wake::Key => {
                    let key = read_logical_key(self.surface.as_mut())?;
                    trace!(?key, code = key.code(), "key stroke");
                    client.on_key_stroke(self, key.code());
                }
                Wake::Action => {
                    // Dequeued before it runs, so the action may queue more
                    // work or quit without touching a held lock.
                    if let Some(action) = self.queue.pop_front() {
                        trace!(remaining = self.queue.len(), "running action");
                        action(&mut *self, &mut *client);
                    }
                }
                Wake::Quit => {}
            }
        }
        Ok(())
    }

    /// Clear, render, paint.
    fn present(&mut self, client: &mut C) -> io::Result<()> {
        self.buffer.clear();
        client.render(self);
        self.surface.set_cursor(0, 0)?;
        self.surface.paint(&self.buffer)?;
        self.frames += 1;
        Ok(())
    }

    /// Poll keys, then actions, then the tick deadline, until one is ready.
    ///
    /// Ticks are handled here, each followed by a full render pass.
    fn idle_wait(&mut self, client: &mut C) -> io::Result<Wake> {
        loop {
            if self.surface.poll_key()? {
                return Ok(Wake::Key);
            }
            if !self.queue.is_empty() {
                return Ok(Wake::Action);
            }
            if self.clock.poll(Instant::now()) {
                trace!(tick = self.clock.ticks(), "tick");
                client.on_tick(self);
                self.present(client)?;
                if self.state != LoopState::Running {
                    return Ok(Wake::Quit);
                }
            } else {
                thread::sleep(self.config.idle_sleep);
            }
        }
    }
}

/// Marks the screen stopped when `run` leaves, including by unwinding.
struct StopOnExit<'a, C> {
    screen: &'a mut Screen<C>,
}

impl<C> Drop for StopOnExit<'_, C> {
    fn drop(&mut self) {
        self.screen.state = LoopState::Stopped;
    }
}

impl<C> std::fmt::Debug for Screen<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("size", &self.size())
            .field("state", &self.state)
            .field("exit_code", &self.exit_code)
            .field("frames", &self.frames)
            .field("pending_actions", &self.queue.len())
            .finish_non_exhaustive()
    }
}

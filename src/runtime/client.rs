//! Client: The callbacks the loop drives.

use super::Screen;

/// A view driven by a [`Screen`] loop.
///
/// All callbacks run on the loop thread and may freely write cells, call
/// [`Screen::quit`], or queue more work with [`Screen::invoke`].
pub trait ScreenClient: Sized {
    /// Draw the frame. The buffer is cleared before every call, so anything
    /// not written here shows as blank.
    fn render(&mut self, screen: &mut Screen<Self>);

    /// Called once per elapsed tick while the loop is idle. A render pass
    /// follows every tick.
    fn on_tick(&mut self, screen: &mut Screen<Self>) {
        let _ = screen;
    }

    /// Called with one logical key: a plain byte (`0x00..=0xFF`) or an
    /// extended code (`scan | 0x0100`).
    fn on_key_stroke(&mut self, screen: &mut Screen<Self>, code: u16);
}

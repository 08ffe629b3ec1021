//! Map view demo: a scrolling sight window over a generated hex-ish map.
//!
//! Arrow keys move the sight, ESC quits. A background thread pushes a
//! status update onto the loop once per second through an `Invoker`.
//!
//! Set `GRIDLOOP_LOG=/path/to/file` to capture logs (filter with `RUST_LOG`).

use anyhow::{Context, Result};
use gridloop::{codes, Attr, Screen, ScreenClient, Size, TerminalSurface};
use std::fs::File;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const MAP_WIDTH: i32 = 64;
const MAP_HEIGHT: i32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ground {
    Flatland,
    Grass,
    Swamp,
    Tundra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relief {
    Plain,
    Hill,
    Mountain,
}

/// Cheap deterministic terrain so the demo needs no game model.
fn terrain_at(x: i32, y: i32) -> (Ground, Relief) {
    let h = (x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663)).unsigned_abs();
    let ground = match h % 4 {
        0 => Ground::Flatland,
        1 => Ground::Grass,
        2 => Ground::Swamp,
        _ => Ground::Tundra,
    };
    let relief = match (h >> 4) % 10 {
        0 => Relief::Mountain,
        1 | 2 => Relief::Hill,
        _ => Relief::Plain,
    };
    (ground, relief)
}

fn glyph_for(ground: Ground, relief: Relief) -> (char, Attr) {
    if relief == Relief::Mountain {
        return ('M', Attr::from_byte(0b0111_1000));
    }
    let (ch, color) = match ground {
        Ground::Flatland => ('F', 0b0000_0111),
        Ground::Grass => ('G', 0b0000_0011),
        Ground::Swamp => ('S', 0b0000_0010),
        Ground::Tundra => ('T', 0b0000_0110),
    };
    let mut color = Attr::from_byte(color);
    if relief == Relief::Hill {
        color |= Attr::FG_INTENSITY;
    }
    (ch, color)
}

struct MapView {
    sight_x: i32,
    sight_y: i32,
    show_help: bool,
    uptime: u64,
    ticks: u64,
}

impl MapView {
    const fn new() -> Self {
        Self {
            sight_x: MAP_WIDTH / 2,
            sight_y: MAP_HEIGHT / 2,
            show_help: true,
            uptime: 0,
            ticks: 0,
        }
    }

    fn draw_map(&self, screen: &mut Screen<Self>) {
        let size = screen.size();
        let sx = i32::from(size.width) / 3;
        let sy = i32::from(size.height) / 3;
        let bx = self.sight_x - sx / 2;
        let by = self.sight_y - sy / 2;

        for dy in 0..sy {
            for dx in 0..sx {
                let (x, y) = (bx + dx, by + dy);
                if !(0..MAP_WIDTH).contains(&x) || !(0..MAP_HEIGHT).contains(&y) {
                    continue;
                }
                let (ground, relief) = terrain_at(x, y);
                let (ch, color) = glyph_for(ground, relief);
                // Odd rows shift left by one column.
                if let Some(cell) = screen.try_get_char(dx * 3 + 1 - (y % 2), dy * 3 + 1) {
                    cell.ch = ch;
                    cell.color = color;
                }
            }
        }
    }

    fn draw_help(screen: &mut Screen<Self>) {
        let frame = Attr::BG_BLUE | Attr::NEUTRAL | Attr::FG_INTENSITY;
        let lines: [&[u8]; 4] = [
            b"+------------------------+",
            b"| move: %c\x1Earrow keys%c\x1F    |",
            b"| quit: %c\x1EESC%c\x1F           |",
            b"+------------------------+",
        ];
        for (row, line) in (0..).zip(lines) {
            screen.write_formatted(60, 20 + row, frame, line);
        }
    }
}

impl ScreenClient for MapView {
    fn render(&mut self, screen: &mut Screen<Self>) {
        self.draw_map(screen);

        let status = format!(
            "sight ({:>2},{:>2})  uptime {:>4}s  ticks {:>6}",
            self.sight_x, self.sight_y, self.uptime, self.ticks
        );
        let bottom = i32::from(screen.size().height) - 1;
        screen.write_str(0, bottom, Attr::FG_GREEN | Attr::FG_INTENSITY, status);

        if self.show_help {
            Self::draw_help(screen);
        }
    }

    fn on_tick(&mut self, _screen: &mut Screen<Self>) {
        self.ticks += 1;
    }

    fn on_key_stroke(&mut self, screen: &mut Screen<Self>, code: u16) {
        self.show_help = false;
        match code {
            codes::ESC => screen.quit(0),
            codes::UP => self.sight_y -= 1,
            codes::DOWN => self.sight_y += 1,
            codes::LEFT => self.sight_x -= 1,
            codes::RIGHT => self.sight_x += 1,
            _ => {}
        }
    }
}

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("GRIDLOOP_LOG") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("creating log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let mut surface = TerminalSurface::new(Size::DEFAULT);
    surface.enter().context("taking over the terminal")?;

    let mut screen = Screen::new(Box::new(surface));
    let invoker = screen.invoker();
    let clock = thread::Builder::new()
        .name("map-view-clock".to_string())
        .spawn(move || loop {
            thread::sleep(Duration::from_secs(1));
            let delivered = invoker.invoke(|_screen, view: &mut MapView| view.uptime += 1);
            if !delivered {
                break;
            }
        })
        .context("spawning clock thread")?;

    let mut view = MapView::new();
    let result = screen.run(&mut view);
    drop(screen);

    // The loop leaves the terminal as it is; put it back for the shell.
    let mut restore = TerminalSurface::new(Size::DEFAULT);
    restore.restore().context("restoring the terminal")?;
    let _ = clock.join();

    let code = result.context("screen loop failed")?;
    std::process::exit(code);
}

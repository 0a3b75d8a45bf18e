//! Crossterm terminal driver for pathgrid.
//!
//! Provides a [`CrosstermDriver`] that puts the terminal in raw mode, turns
//! crossterm events into [`Input`]s and paints [`Tile`]s.

mod frame;

pub use frame::{Color, Screen, Tile};

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

/// Maps a [`Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    if c == Color::DEFAULT {
        CtColor::Reset
    } else {
        CtColor::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}

/// Keys the editor cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    Escape,
    Enter,
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Main,
    Secondary,
}

/// A terminal input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(Key),
    /// Press or drag with `button` held, at terminal column `x`, row `y`.
    Mouse { button: Button, x: u16, y: u16 },
    /// Ctrl+C.
    Interrupt,
    Resize { width: u16, height: u16 },
}

/// Maps a crossterm [`KeyEvent`] to an [`Input`].
fn to_input_key(ev: KeyEvent) -> Option<Input> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }
    if ev.modifiers.contains(KeyModifiers::CONTROL) && ev.code == KeyCode::Char('c') {
        return Some(Input::Interrupt);
    }
    let key = match ev.code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Enter,
        _ => return None,
    };
    Some(Input::Key(key))
}

fn to_input(ev: Event) -> Option<Input> {
    match ev {
        Event::Key(k) => to_input_key(k),
        Event::Mouse(me) => {
            let button = match me.kind {
                MouseEventKind::Down(b) | MouseEventKind::Drag(b) => b,
                _ => return None,
            };
            let button = match button {
                MouseButton::Left => Button::Main,
                MouseButton::Right => Button::Secondary,
                MouseButton::Middle => return None,
            };
            Some(Input::Mouse {
                button,
                x: me.column,
                y: me.row,
            })
        }
        Event::Resize(width, height) => Some(Input::Resize { width, height }),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
pub struct CrosstermDriver {
    active: bool,
}

impl CrosstermDriver {
    /// Create a new driver. Nothing touches the terminal until
    /// [`init`](Self::init).
    pub fn new() -> Self {
        Self { active: false }
    }

    /// Enter raw mode and the alternate screen, capturing the mouse.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        log::debug!("terminal initialised");
        Ok(())
    }

    /// Current terminal size as `(columns, rows)`.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Wait up to `timeout` for one input event.
    ///
    /// Events the editor has no use for are consumed and reported as `None`.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<Input>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(to_input(event::read()?))
    }

    /// Paint `tiles` and flush stdout.
    pub fn flush(&mut self, tiles: &[Tile]) -> io::Result<()> {
        let mut stdout = io::stdout();
        for t in tiles {
            queue!(
                stdout,
                cursor::MoveTo(t.x, t.y),
                SetForegroundColor(to_ct_color(t.fg)),
                SetBackgroundColor(to_ct_color(t.bg)),
                Print(t.ch)
            )?;
        }
        queue!(stdout, ResetColor)?;
        stdout.flush()
    }

    /// Write a plain text line at row `y`, clearing the rest of the line.
    pub fn status(&mut self, y: u16, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        queue!(
            stdout,
            cursor::MoveTo(0, y),
            ResetColor,
            terminal::Clear(ClearType::CurrentLine),
            Print(text)
        )?;
        stdout.flush()
    }

    /// Clear the whole screen.
    pub fn clear(&mut self) -> io::Result<()> {
        execute!(io::stdout(), terminal::Clear(ClearType::All))
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn close(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        log::debug!("terminal restored");
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CrosstermDriver {
    fn drop(&mut self) {
        self.close();
    }
}

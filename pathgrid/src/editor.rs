//! The interactive editor: input handling, drawing, and live search.

use std::error::Error;
use std::io;
use std::time::Duration;

use log::{debug, info, warn};
use pathgrid_core::{Board, Cancelled, SearchResult, Step, StepResult};
use pathgrid_crossterm::{Button, CrosstermDriver, Input, Key, Screen};

use crate::config::Config;
use crate::view;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

const HELP: &str = "L-click: start/end/barrier  R-click: clear  Space: plan  c: clear all  Esc: stop  q: quit";

/// What the editor should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Place(u16, u16),
    Erase(u16, u16),
    Plan,
    ClearAll,
    Quit,
    Resize(u16, u16),
}

fn command_for(input: Input) -> Option<Command> {
    match input {
        Input::Mouse {
            button: Button::Main,
            x,
            y,
        } => Some(Command::Place(x, y)),
        Input::Mouse {
            button: Button::Secondary,
            x,
            y,
        } => Some(Command::Erase(x, y)),
        Input::Key(Key::Space) | Input::Key(Key::Enter) => Some(Command::Plan),
        Input::Key(Key::Char('c')) => Some(Command::ClearAll),
        Input::Key(Key::Char('q')) | Input::Interrupt => Some(Command::Quit),
        Input::Resize { width, height } => Some(Command::Resize(width, height)),
        Input::Key(_) => None,
    }
}

/// One-line summary of a search outcome.
pub fn describe(result: SearchResult) -> String {
    match (result, result.length()) {
        (_, Some(length)) => format!("path found: {length} moves"),
        (SearchResult::Cancelled, _) => "search stopped".to_string(),
        _ => "no path: the end cell is unreachable".to_string(),
    }
}

pub struct Editor {
    board: Board,
    driver: CrosstermDriver,
    screen: Screen,
    config: Config,
    status: String,
    quit: bool,
}

impl Editor {
    pub fn new(board: Board, driver: CrosstermDriver, config: Config) -> Self {
        Self {
            board,
            driver,
            screen: Screen::default(),
            config,
            status: String::new(),
            quit: false,
        }
    }

    /// Take over the terminal until the user quits.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.driver.init()?;
        let outcome = self.event_loop();
        self.driver.close();
        outcome
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn Error>> {
        let (width, height) = self.driver.size()?;
        self.resize(width, height)?;

        while !self.quit {
            let Some(input) = self.driver.poll_input(POLL_INTERVAL)? else {
                continue;
            };
            let Some(cmd) = command_for(input) else {
                continue;
            };
            self.apply(cmd)?;
            self.redraw()?;
        }
        info!("quit");
        Ok(())
    }

    fn apply(&mut self, cmd: Command) -> Result<(), Box<dyn Error>> {
        match cmd {
            Command::Place(x, y) => {
                if let Some(pos) = view::cell_at(self.board.grid(), x, y) {
                    if let Some(role) = self.board.place(pos)? {
                        debug!("placed {role:?} at {pos}");
                    }
                }
            }
            Command::Erase(x, y) => {
                if let Some(pos) = view::cell_at(self.board.grid(), x, y) {
                    self.board.clear(pos)?;
                }
            }
            Command::Plan => self.plan()?,
            Command::ClearAll => {
                self.board.clear_all();
                self.status.clear();
            }
            Command::Quit => self.quit = true,
            Command::Resize(width, height) => self.resize(width, height)?,
        }
        Ok(())
    }

    /// Run a search, redrawing after every step. Esc stops it; q stops it
    /// and quits.
    fn plan(&mut self) -> Result<(), Box<dyn Error>> {
        if self.board.start().is_none() || self.board.end().is_none() {
            self.status = "place a start and an end cell first".to_string();
            return Ok(());
        }

        let driver = &mut self.driver;
        let screen = &mut self.screen;
        let delay = self.config.step_delay();
        let mut failure: Option<io::Error> = None;
        let mut quit = false;

        let mut on_step = |step: &Step<'_>| -> StepResult {
            let changed = screen.diff(&view::tiles(step.grid()));
            if let Err(e) = driver.flush(&changed) {
                failure = Some(e);
                return Err(Cancelled);
            }
            match driver.poll_input(delay) {
                Ok(Some(Input::Key(Key::Escape))) => Err(Cancelled),
                Ok(Some(Input::Key(Key::Char('q')))) | Ok(Some(Input::Interrupt)) => {
                    quit = true;
                    Err(Cancelled)
                }
                Ok(_) => Ok(()),
                Err(e) => {
                    failure = Some(e);
                    Err(Cancelled)
                }
            }
        };

        let result = self.board.plan(&mut on_step)?;
        if let Some(e) = failure {
            return Err(e.into());
        }
        self.quit = quit;
        info!("plan: {result:?}");
        self.status = describe(result);
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) -> Result<(), Box<dyn Error>> {
        let n = self.board.grid().size();
        let needed_w = n * self.board.grid().cell_size();
        if needed_w > i32::from(width) || n + 2 > i32::from(height) {
            warn!("terminal {width}x{height} is smaller than the {n}x{n} grid");
        }
        self.screen = Screen::new(width, height);
        self.driver.clear()?;
        self.redraw()
    }

    fn redraw(&mut self) -> Result<(), Box<dyn Error>> {
        let changed = self.screen.diff(&view::tiles(self.board.grid()));
        self.driver.flush(&changed)?;
        let line = self.board.grid().size() as u16 + 1;
        self.driver.status(line, &self.status)?;
        self.driver.status(line + 1, HELP)?;
        Ok(())
    }
}

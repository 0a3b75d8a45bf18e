//! pathgrid: an interactive A* planner for the terminal.

mod colors;
mod config;
mod editor;
mod view;

use std::fs::File;
use std::io::Write;

use clap::Parser;
use pathgrid_core::Board;
use pathgrid_crossterm::CrosstermDriver;

use config::Config;
use editor::Editor;

fn init_logging(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(&config.log_file)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_board(config: &Config) -> Result<Board, Box<dyn std::error::Error>> {
    match &config.layout {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let rows = text.lines().filter(|l| !l.trim_end().is_empty()).count() as i32;
            let board = Board::from_layout(&text, config.total_width(rows))?;
            log::info!("loaded {} ({rows}x{rows})", path.display());
            Ok(board)
        }
        None => Ok(Board::new(config.rows, config.total_width(config.rows))?),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_logging(&config)?;
    log::info!("pathgrid starting: {config:?}");

    let board = load_board(&config)?;
    let driver = CrosstermDriver::new();
    let mut editor = Editor::new(board, driver, config);
    editor.run()?;
    Ok(())
}

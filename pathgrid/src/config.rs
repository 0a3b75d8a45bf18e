//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Interactive A* path planner.
///
/// Left click: start, then end, then barriers. Right click: clear a cell.
/// Space: plan. c: clear the board. Esc: stop a running search. q: quit.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Config {
    /// Grid rows (and columns)
    #[arg(short, long, default_value_t = 25)]
    pub rows: i32,

    /// Terminal columns per cell
    #[arg(short = 'w', long, default_value_t = 2)]
    pub cell_width: u16,

    /// Pause after each search step, in milliseconds
    #[arg(short = 'd', long, default_value_t = 5)]
    pub step_delay_ms: u64,

    /// Load a square text layout (`.` empty, `#` barrier, `S` start, `E` end)
    #[arg(short, long)]
    pub layout: Option<PathBuf>,

    /// Log file (stderr belongs to the terminal UI)
    #[arg(long, default_value = "pathgrid.log")]
    pub log_file: PathBuf,
}

impl Config {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Grid width in terminal columns for `rows` rows.
    pub fn total_width(&self, rows: i32) -> i32 {
        rows.saturating_mul(i32::from(self.cell_width.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::parse_from(["pathgrid"]);
        assert_eq!(cfg.rows, 25);
        assert_eq!(cfg.cell_width, 2);
        assert_eq!(cfg.step_delay(), Duration::from_millis(5));
        assert_eq!(cfg.total_width(25), 50);
        assert!(cfg.layout.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = Config::parse_from(["pathgrid", "-r", "10", "-w", "3", "--layout", "maze.txt"]);
        assert_eq!(cfg.rows, 10);
        assert_eq!(cfg.total_width(cfg.rows), 30);
        assert_eq!(cfg.layout, Some(PathBuf::from("maze.txt")));
    }

    #[test]
    fn zero_cell_width_still_gives_one_column() {
        let cfg = Config::parse_from(["pathgrid", "-w", "0"]);
        assert_eq!(cfg.total_width(4), 4);
    }
}

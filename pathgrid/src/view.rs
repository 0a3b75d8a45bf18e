//! Mapping between grid cells and terminal tiles.
//!
//! A cell spans `cell_size` columns of one terminal line; row `r` is drawn
//! on line `r`.

use pathgrid_core::{Grid, Pos};
use pathgrid_crossterm::Tile;

use crate::colors::{GREY, role_color};

/// Right-edge grid line drawn in the last column of each cell.
const GRID_LINE: char = '▏';

/// Tiles for the whole grid, row by row.
pub fn tiles(grid: &Grid) -> Vec<Tile> {
    let width = grid.cell_size().max(1);
    let mut out = Vec::with_capacity(grid.len() * width as usize);
    for cell in grid {
        let pos = cell.pos();
        let bg = role_color(cell.role());
        let x0 = pos.col * width;
        for dx in 0..width {
            let (Ok(x), Ok(y)) = (u16::try_from(x0 + dx), u16::try_from(pos.row)) else {
                continue;
            };
            let ch = if width > 1 && dx == width - 1 {
                GRID_LINE
            } else {
                ' '
            };
            out.push(Tile {
                x,
                y,
                ch,
                fg: GREY,
                bg,
            });
        }
    }
    out
}

/// The cell under terminal position `(x, y)`, if any.
pub fn cell_at(grid: &Grid, x: u16, y: u16) -> Option<Pos> {
    let width = grid.cell_size().max(1);
    let pos = Pos::new(i32::from(y), i32::from(x) / width);
    grid.contains(pos).then_some(pos)
}

//! Screen tiles and the diff between two renders.

/// An RGB colour packed into a `u32` (0x00RRGGBB).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    /// The terminal's own colour (reset).
    pub const DEFAULT: Self = Self(0);

    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

/// One terminal character cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub x: u16,
    pub y: u16,
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

/// Remembers what was last flushed so only changed tiles are redrawn.
#[derive(Debug, Default)]
pub struct Screen {
    width: u16,
    shown: Vec<Option<Tile>>,
}

impl Screen {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            shown: vec![None; width as usize * height as usize],
        }
    }

    /// Keep the tiles of `next` that differ from what is on screen and
    /// record them as shown. Tiles outside the screen are dropped.
    pub fn diff(&mut self, next: &[Tile]) -> Vec<Tile> {
        let mut changed = Vec::new();
        for t in next {
            if t.x >= self.width {
                continue;
            }
            let i = t.y as usize * self.width as usize + t.x as usize;
            let Some(slot) = self.shown.get_mut(i) else {
                continue;
            };
            if *slot != Some(*t) {
                *slot = Some(*t);
                changed.push(*t);
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(x: u16, y: u16, ch: char) -> Tile {
        Tile {
            x,
            y,
            ch,
            fg: Color::DEFAULT,
            bg: Color::from_rgb(255, 255, 255),
        }
    }

    #[test]
    fn color_components() {
        let c = Color::from_rgb(64, 224, 208);
        assert_eq!((c.r(), c.g(), c.b()), (64, 224, 208));
    }

    #[test]
    fn diff_keeps_only_changes() {
        let mut screen = Screen::new(4, 2);
        let first = vec![tile(0, 0, 'a'), tile(1, 0, 'b')];
        assert_eq!(screen.diff(&first).len(), 2);
        assert!(screen.diff(&first).is_empty());

        let second = vec![tile(0, 0, 'a'), tile(1, 0, 'c')];
        assert_eq!(screen.diff(&second), vec![tile(1, 0, 'c')]);
    }

    #[test]
    fn diff_drops_offscreen_tiles() {
        let mut screen = Screen::new(2, 2);
        assert!(screen.diff(&[tile(5, 0, 'x'), tile(0, 9, 'y')]).is_empty());
    }
}

//! Role palette, after the classic A* visualiser colours.

use pathgrid_core::Role;
use pathgrid_crossterm::Color;

pub const WHITE: Color = Color::from_rgb(255, 255, 255);
// 0x000000 is `Color::DEFAULT`, which would reset to the terminal colour.
pub const BLACK: Color = Color::from_rgb(1, 1, 1);
pub const ORANGE: Color = Color::from_rgb(255, 165, 0);
pub const TURQUOISE: Color = Color::from_rgb(64, 224, 208);
pub const GREEN: Color = Color::from_rgb(0, 255, 0);
pub const RED: Color = Color::from_rgb(255, 0, 0);
pub const PURPLE: Color = Color::from_rgb(128, 0, 128);
pub const GREY: Color = Color::from_rgb(128, 128, 128);

/// Background colour for a cell role.
pub fn role_color(role: Role) -> Color {
    match role {
        Role::Empty => WHITE,
        Role::Start => ORANGE,
        Role::End => TURQUOISE,
        Role::Barrier => BLACK,
        Role::Open => GREEN,
        Role::Closed => RED,
        Role::Path => PURPLE,
    }
}

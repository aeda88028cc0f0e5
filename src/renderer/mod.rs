//! Drawing seam and frame painter
//!
//! The backend only needs lines and text. All layout, wording and colors for
//! the HUD live in [`frame`].

pub mod frame;

use glam::Vec2;

pub use frame::render_frame;

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = [0.0, 0.0, 25.0 / 255.0, 1.0];
    pub const PLATFORM: Color = [1.0, 0.0, 0.0, 1.0];
    pub const BOX: Color = [1.0, 1.0, 1.0, 1.0];
    /// Everything turns grey once the round is over
    pub const FROZEN: Color = [150.0 / 255.0, 150.0 / 255.0, 150.0 / 255.0, 1.0];
    pub const RULER: Color = [0.0, 0.0, 1.0, 1.0];
    pub const UPPER_LINE: Color = [1.0, 0.0, 0.0, 1.0];
    pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
}

/// Immediate-mode drawing target in screen pixels
pub trait Renderer {
    fn clear(&mut self, color: Color);

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);

    /// `pos` is the top-left corner of the text
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color);
}

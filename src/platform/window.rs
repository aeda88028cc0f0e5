//! Native window backend on macroquad
//!
//! macroquad keeps its input and drawing state in globals, so the backend is
//! a zero-sized handle that forwards to them.

use glam::Vec2;
use macroquad::color::Color as MqColor;
use macroquad::input::{KeyCode, is_key_pressed, mouse_position, set_cursor_grab, show_mouse};

use super::{InputSource, Key};
use crate::renderer::{Color, Renderer};

const FONT_SIZE: f32 = 16.0;
/// draw_text anchors on the baseline; our text positions are top-left
const TEXT_ASCENT: f32 = 12.0;

#[derive(Debug, Default)]
pub struct MacroquadBackend;

impl MacroquadBackend {
    pub fn new() -> Self {
        Self
    }

    /// Hide and confine the cursor to the window
    pub fn capture_cursor(&self) {
        set_cursor_grab(true);
        show_mouse(false);
    }

    pub fn release_cursor(&self) {
        set_cursor_grab(false);
        show_mouse(true);
    }
}

fn to_mq(color: Color) -> MqColor {
    MqColor::new(color[0], color[1], color[2], color[3])
}

impl InputSource for MacroquadBackend {
    fn pointer_x(&self) -> i32 {
        mouse_position().0 as i32
    }

    fn was_key_just_pressed(&self, key: Key) -> bool {
        match key {
            Key::Confirm => is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter),
            Key::Quit => is_key_pressed(KeyCode::Escape),
        }
    }
}

impl Renderer for MacroquadBackend {
    fn clear(&mut self, color: Color) {
        macroquad::window::clear_background(to_mq(color));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        macroquad::shapes::draw_line(from.x, from.y, to.x, to.y, 1.0, to_mq(color));
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Color) {
        macroquad::text::draw_text(text, pos.x, pos.y + TEXT_ASCENT, FONT_SIZE, to_mq(color));
    }
}

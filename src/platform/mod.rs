//! Platform abstraction layer
//!
//! Input polling behind a trait so the core can be driven by a window, a
//! script, or a test.

#[cfg(feature = "window")]
pub mod window;

#[cfg(feature = "window")]
pub use window::MacroquadBackend;

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Start or restart a round
    Confirm,
    /// Exit the process
    Quit,
}

/// Source of player input for one frame
pub trait InputSource {
    /// Current horizontal pointer coordinate in screen pixels
    fn pointer_x(&self) -> i32;

    /// Edge-triggered: true only on the frame the key went down
    fn was_key_just_pressed(&self, key: Key) -> bool;
}

//! Keyboard input for the editor

mod shortcuts;

pub use shortcuts::{handle_keyboard_shortcuts, shortcut_for, Shortcut};

mod keyboard;

pub use self::keyboard::{KeyTracker, KeyboardHandler, KeyboardStatus};

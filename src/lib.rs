// Library surface for the binary, headless integration tests and reuse.
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod keys;
pub mod race;
pub mod results;
pub mod room;
pub mod runtime;
pub mod session;
pub mod typing_policy;
pub mod view;
pub mod word_bank;
pub mod wpm;

pub use error::{Error, Result};
pub use race::{InputChange, KeyAction, Race};

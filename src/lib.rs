//! Single-player grid snake with golden apples, bombs and per-session
//! high score tables.

pub mod config;
pub mod controller;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod render;
pub mod scheduler;
pub mod session;

pub use controller::Controller;
pub use error::{Error, Result};

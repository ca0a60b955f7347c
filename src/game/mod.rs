//! Game module

pub mod cell;
pub mod engine;
pub mod items;
pub mod rules;
pub mod sampler;
pub mod state;

pub use cell::{Cell, Direction};
pub use engine::{DeathCause, TickOutcome};
pub use items::{Item, ItemKind};
pub use state::{GameState, Phase};

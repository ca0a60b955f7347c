//! Game configuration constants

use std::path::PathBuf;
use std::time::Duration;

/// Size of each grid cell in pixels
pub const GRID_SIZE: i32 = 20;

/// Side of the square play area in pixels
pub const CANVAS_SIZE: i32 = 400;

/// Number of cells along each side of the board
pub const GRID_SIDE: i32 = CANVAS_SIZE / GRID_SIZE;

/// Tick interval at level 1
pub const BASE_GAME_SPEED: Duration = Duration::from_millis(150);

/// Interval reduction per level
pub const SPEED_STEP: Duration = Duration::from_millis(15);

/// Fastest tick interval reachable by levelling up
pub const MIN_GAME_SPEED: Duration = Duration::from_millis(50);

/// Tick interval while the golden effect is active
pub const SLOW_SPEED: Duration = Duration::from_millis(200);

/// How long one golden apple slows the game down
pub const GOLDEN_DURATION: Duration = Duration::from_millis(10_000);

/// Points per level needed to level up
pub const LEVEL_UP_SCORE: u32 = 20;

/// Points for a normal apple at level 1
pub const BASE_FOOD_SCORE: u32 = 10;

/// Score multiplier for golden apples
pub const GOLDEN_MULTIPLIER: u32 = 3;

/// Maximum number of items on the board at once
pub const MAX_ITEMS: usize = 5;

/// Entries kept per session
pub const MAX_HIGH_SCORES: usize = 10;

// =============================================================================
// Spawning
// =============================================================================

/// Probability that a spawn lands near one of the walls
pub const WALL_BIAS: f64 = 0.7;

/// How many cells deep the wall band reaches
pub const WALL_BAND: i32 = 2;

/// Bomb probability at level 1
pub const BASE_BOMB_CHANCE: f64 = 0.1;

/// Bomb probability increase per level
pub const BOMB_CHANCE_STEP: f64 = 0.05;

/// Bomb probability ceiling
pub const MAX_BOMB_CHANCE: f64 = 0.4;

/// Fixed golden apple probability band
pub const GOLDEN_CHANCE: f64 = 0.1;

/// Resample attempts before falling back to scanning free cells
pub const MAX_SAMPLE_ATTEMPTS: usize = 4096;

/// Full-batch rerolls before forcing an apple into a bomb-only batch
pub const MAX_RESPAWN_ROUNDS: usize = 32;

// =============================================================================
// Loop / persistence / window
// =============================================================================

/// Ticks processed in one frame before the tick timer is resynced
pub const MAX_TICKS_PER_ADVANCE: usize = 8;

/// Key under which all sessions are stored
pub const SESSIONS_KEY: &str = "snakeSessions";

/// Environment variable selecting the save directory
pub const SAVE_DIR_ENV: &str = "SNAKE_SAVE_DIR";

/// Width of the session panel to the right of the board
pub const PANEL_WIDTH: i32 = 280;

/// Window title
pub const WINDOW_TITLE: &str = "Snake";

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "snake_arcade=info";

/// Directory holding the persisted session document
pub fn save_dir() -> PathBuf {
    std::env::var_os(SAVE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

//! Drawing the board, the status line and the session panel
//!
//! [`RenderSink`] and [`StatusSurface`] only read what they are given. The
//! macroquad implementation draws immediately, so it is called every frame.

use std::collections::VecDeque;

use macroquad::prelude::*;

use crate::config::{CANVAS_SIZE, GRID_SIZE, PANEL_WIDTH};
use crate::error::{Error, Result};
use crate::game::rules::food_size;
use crate::game::{Cell, Item, ItemKind};
use crate::session::ScoreEntry;

const BOARD_BG: Color = BLACK;
const SNAKE_HEAD: Color = Color::new(0.271, 0.627, 0.286, 1.0); // #45a049
const SNAKE_BODY: Color = Color::new(0.298, 0.686, 0.314, 1.0); // #4CAF50
const APPLE_NORMAL: Color = Color::new(1.0, 0.0, 0.0, 1.0);
const APPLE_GOLDEN: Color = Color::new(1.0, 0.843, 0.0, 1.0); // #ffd700
const BOMB: Color = Color::new(0.502, 0.502, 0.502, 1.0); // #808080
const GOLDEN_WASH: Color = Color::new(1.0, 0.843, 0.0, 0.2);
const PANEL_BG: Color = Color::new(0.12, 0.12, 0.12, 1.0);
const PANEL_TEXT: Color = LIGHTGRAY;
const PANEL_DIM: Color = GRAY;

/// What the board painter needs from the game state
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub snake: &'a VecDeque<Cell>,
    pub items: &'a [Item],
    pub golden_active: bool,
    /// Drives the apple size
    pub level: u32,
}

/// One line of the session selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRow {
    pub label: String,
    pub current: bool,
}

/// Session sidebar contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPanel<'a> {
    /// Newest first
    pub rows: Vec<SessionRow>,
    /// Start time and minutes elapsed of the current session
    pub info: Option<(String, i64)>,
    /// High scores of the current session; `None` when it does not exist
    pub scores: Option<&'a [ScoreEntry]>,
}

pub trait RenderSink {
    fn paint(&mut self, scene: &Scene<'_>);
}

pub trait StatusSurface {
    fn show_progress(&mut self, score: u32, level: u32);

    fn show_game_over(&mut self, final_score: u32, final_level: u32, visible: bool);

    fn show_sessions(&mut self, panel: &SessionPanel<'_>);
}

/// Pixel rectangle of a snake segment
pub fn cell_rect(cell: Cell) -> Rect {
    Rect::new(
        (cell.x * GRID_SIZE) as f32,
        (cell.y * GRID_SIZE) as f32,
        (GRID_SIZE - 1) as f32,
        (GRID_SIZE - 1) as f32,
    )
}

/// Pixel rectangle of an item, shrunk and centred as the level rises
pub fn item_rect(cell: Cell, level: u32) -> Rect {
    let size = food_size(level) * GRID_SIZE as f32;
    let offset = (GRID_SIZE as f32 - size) / 2.0;
    Rect::new(
        (cell.x * GRID_SIZE) as f32 + offset,
        (cell.y * GRID_SIZE) as f32 + offset,
        size - 1.0,
        size - 1.0,
    )
}

pub fn item_color(kind: ItemKind) -> Color {
    match kind {
        ItemKind::Normal => APPLE_NORMAL,
        ItemKind::Golden => APPLE_GOLDEN,
        ItemKind::Bomb => BOMB,
    }
}

pub fn segment_color(index: usize) -> Color {
    if index == 0 { SNAKE_HEAD } else { SNAKE_BODY }
}

pub fn progress_line(score: u32, level: u32) -> String {
    format!("Score: {score} | Level: {level}")
}

/// Window-backed renderer: board on the left, session panel on the right
pub struct CanvasRenderer {
    panel_x: f32,
}

impl CanvasRenderer {
    /// Fails when the window has no drawable area
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::RenderTarget(format!(
                "window surface is {width}x{height}"
            )));
        }
        Ok(Self {
            panel_x: CANVAS_SIZE as f32,
        })
    }

    fn panel_text(&self, text: &str, y: f32, size: f32, color: Color) {
        draw_text(text, self.panel_x + 12.0, y, size, color);
    }
}

impl RenderSink for CanvasRenderer {
    fn paint(&mut self, scene: &Scene<'_>) {
        let side = CANVAS_SIZE as f32;
        draw_rectangle(0.0, 0.0, side, side, BOARD_BG);

        for (i, segment) in scene.snake.iter().enumerate() {
            let r = cell_rect(*segment);
            draw_rectangle(r.x, r.y, r.w, r.h, segment_color(i));
        }

        for item in scene.items {
            let r = item_rect(item.cell, scene.level);
            draw_rectangle(r.x, r.y, r.w, r.h, item_color(item.kind));
        }

        if scene.golden_active {
            draw_rectangle(0.0, 0.0, side, side, GOLDEN_WASH);
        }
    }
}

impl StatusSurface for CanvasRenderer {
    fn show_progress(&mut self, score: u32, level: u32) {
        draw_text(&progress_line(score, level), 8.0, 20.0, 22.0, WHITE);
    }

    fn show_game_over(&mut self, final_score: u32, final_level: u32, visible: bool) {
        if !visible {
            return;
        }
        let side = CANVAS_SIZE as f32;
        draw_rectangle(0.0, 0.0, side, side, Color::new(0.0, 0.0, 0.0, 0.6));

        let title = "GAME OVER";
        let tm = measure_text(title, None, 36, 1.0);
        draw_text(title, (side - tm.width) * 0.5, side * 0.4, 36.0, SNAKE_HEAD);

        let result = format!("{final_score} (Level {final_level})");
        let rm = measure_text(&result, None, 24, 1.0);
        draw_text(&result, (side - rm.width) * 0.5, side * 0.4 + 36.0, 24.0, WHITE);

        let hint = "R: Restart  Q: Quit";
        let hm = measure_text(hint, None, 20, 1.0);
        draw_text(hint, (side - hm.width) * 0.5, side * 0.4 + 68.0, 20.0, PANEL_TEXT);
    }

    fn show_sessions(&mut self, panel: &SessionPanel<'_>) {
        draw_rectangle(self.panel_x, 0.0, PANEL_WIDTH as f32, CANVAS_SIZE as f32, PANEL_BG);

        let mut y = 24.0;
        self.panel_text("SESSIONS  (N: new, Tab: switch)", y, 16.0, WHITE);
        y += 20.0;
        for row in panel.rows.iter().take(5) {
            let (marker, color) = if row.current { ("> ", WHITE) } else { ("  ", PANEL_DIM) };
            self.panel_text(&format!("{marker}{}", row.label), y, 16.0, color);
            y += 18.0;
        }
        if panel.rows.len() > 5 {
            self.panel_text(&format!("  +{} more", panel.rows.len() - 5), y, 16.0, PANEL_DIM);
            y += 18.0;
        }

        y += 8.0;
        if let Some((started, minutes)) = &panel.info {
            self.panel_text(&format!("Session started: {started}"), y, 16.0, PANEL_TEXT);
            y += 18.0;
            self.panel_text(&format!("Duration: {minutes} min"), y, 16.0, PANEL_TEXT);
            y += 18.0;
        }

        y += 12.0;
        self.panel_text("HIGH SCORES", y, 18.0, WHITE);
        y += 22.0;
        match panel.scores {
            None => self.panel_text("No session selected", y, 16.0, PANEL_DIM),
            Some([]) => self.panel_text("No scores yet", y, 16.0, PANEL_DIM),
            Some(scores) => {
                for (rank, entry) in scores.iter().enumerate() {
                    let line = format!(
                        "#{:<2} {:>4} pts  L{:<2} {}",
                        rank + 1,
                        entry.score,
                        entry.level,
                        entry.date
                    );
                    self.panel_text(&line, y, 14.0, PANEL_TEXT);
                    y += 16.0;
                }
            }
        }
    }
}

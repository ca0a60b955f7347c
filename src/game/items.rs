//! Collectible and hazard items

use std::collections::{HashSet, VecDeque};

use rand::Rng;
use tracing::debug;

use super::cell::Cell;
use super::rules::bomb_chance;
use super::sampler;
use crate::config::{GOLDEN_CHANCE, MAX_ITEMS, MAX_RESPAWN_ROUNDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Normal,
    Golden,
    Bomb,
}

impl ItemKind {
    /// Normal and golden apples can be eaten; bombs cannot
    pub fn is_apple(self) -> bool {
        !matches!(self, ItemKind::Bomb)
    }
}

/// An item lying on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub cell: Cell,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(cell: Cell, kind: ItemKind) -> Self {
        Self { cell, kind }
    }
}

/// Map a uniform draw `r` in `[0, 1)` to an item kind for `level`
pub fn classify(level: u32, r: f64) -> ItemKind {
    let bomb = bomb_chance(level);
    if r < bomb {
        ItemKind::Bomb
    } else if r < bomb + GOLDEN_CHANCE {
        ItemKind::Golden
    } else {
        ItemKind::Normal
    }
}

pub fn has_apples(items: &[Item]) -> bool {
    items.iter().any(|item| item.kind.is_apple())
}

/// Add one item at a free cell. Returns `None` when the item limit is reached
/// or no cell is free.
pub fn spawn_one<R: Rng>(
    items: &mut Vec<Item>,
    snake: &VecDeque<Cell>,
    level: u32,
    rng: &mut R,
) -> Option<Item> {
    if items.len() >= MAX_ITEMS {
        return None;
    }

    let occupied: HashSet<Cell> = snake
        .iter()
        .copied()
        .chain(items.iter().map(|item| item.cell))
        .collect();
    let cell = sampler::sample(&occupied, rng)?;
    let item = Item::new(cell, classify(level, rng.r#gen::<f64>()));
    debug!("Spawned {:?} at ({}, {})", item.kind, cell.x, cell.y);
    items.push(item);
    Some(item)
}

/// Replace every item with a fresh batch of `MAX_ITEMS`.
///
/// The new batch always contains at least one apple: bomb-only batches are
/// rerolled, and if that keeps failing the last bomb becomes a normal apple.
pub fn reset_and_respawn<R: Rng>(
    items: &mut Vec<Item>,
    snake: &VecDeque<Cell>,
    level: u32,
    rng: &mut R,
) {
    for _ in 0..MAX_RESPAWN_ROUNDS {
        fill(items, snake, level, rng);
        if has_apples(items) || items.is_empty() {
            return;
        }
        debug!("Respawned batch held only bombs, rerolling");
    }

    if let Some(last) = items.last_mut() {
        last.kind = ItemKind::Normal;
    }
}

fn fill<R: Rng>(items: &mut Vec<Item>, snake: &VecDeque<Cell>, level: u32, rng: &mut R) {
    items.clear();
    while items.len() < MAX_ITEMS {
        if spawn_one(items, snake, level, rng).is_none() {
            break;
        }
    }
}

//! Keyboard mapping

use macroquad::input::{KeyCode, is_key_pressed};

use crate::game::Direction;

/// Something the player asked for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Restart,
    NewSession,
    NextSession,
    Quit,
}

const BOUND_KEYS: &[KeyCode] = &[
    KeyCode::Up,
    KeyCode::W,
    KeyCode::Down,
    KeyCode::S,
    KeyCode::Left,
    KeyCode::A,
    KeyCode::Right,
    KeyCode::D,
    KeyCode::R,
    KeyCode::N,
    KeyCode::Tab,
    KeyCode::Q,
    KeyCode::Escape,
];

pub fn command_for(key: KeyCode) -> Option<Command> {
    let command = match key {
        KeyCode::Up | KeyCode::W => Command::Turn(Direction::Up),
        KeyCode::Down | KeyCode::S => Command::Turn(Direction::Down),
        KeyCode::Left | KeyCode::A => Command::Turn(Direction::Left),
        KeyCode::Right | KeyCode::D => Command::Turn(Direction::Right),
        KeyCode::R => Command::Restart,
        KeyCode::N => Command::NewSession,
        KeyCode::Tab => Command::NextSession,
        KeyCode::Q | KeyCode::Escape => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Commands for keys pressed since the last frame, in binding order
pub fn poll() -> Vec<Command> {
    BOUND_KEYS
        .iter()
        .filter(|key| is_key_pressed(**key))
        .filter_map(|key| command_for(*key))
        .collect()
}

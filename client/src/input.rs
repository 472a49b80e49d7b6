//! Maps raw key presses to semantic actions, gated by seat.

use macroquad::prelude::{is_key_pressed, KeyCode};

use crate::game::{Role, Session};
use shared::Action;

/// Per-seat key sets. The left seat flies with W/S and shoots with Space,
/// the right seat with the arrow keys and Enter. Anything else is ignored.
pub struct InputMapper;

impl InputMapper {
    pub fn new() -> Self {
        InputMapper
    }

    /// Checks this frame's key presses and returns at most one action.
    ///
    /// Nothing is produced unless the channel is open, both players are
    /// known, and the local identity holds one of the two seats. No local
    /// cooldown or rate limiting; pacing is the server's call.
    pub fn poll(&mut self, connection_open: bool, session: &Session) -> Option<Action> {
        if !connection_open {
            return None;
        }
        let role = session.participant_role()?;
        for key in role_keys(role) {
            if is_key_pressed(key) {
                return map_key(role, key);
            }
        }
        None
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new()
    }
}

fn role_keys(role: Role) -> [KeyCode; 3] {
    match role {
        Role::Left => [KeyCode::W, KeyCode::S, KeyCode::Space],
        Role::Right => [KeyCode::Up, KeyCode::Down, KeyCode::Enter],
    }
}

/// Pure key-to-action mapping for one seat.
pub fn map_key(role: Role, key: KeyCode) -> Option<Action> {
    match (role, key) {
        (Role::Left, KeyCode::W) => Some(Action::Up),
        (Role::Left, KeyCode::S) => Some(Action::Down),
        (Role::Left, KeyCode::Space) => Some(Action::Shoot),
        (Role::Right, KeyCode::Up) => Some(Action::Up),
        (Role::Right, KeyCode::Down) => Some(Action::Down),
        (Role::Right, KeyCode::Enter) => Some(Action::Shoot),
        _ => None,
    }
}

//! Input controller
//!
//! Turns raw key events into intents. Nothing here moves an entity: paddle
//! intents and queued turret commands are written onto the world at the start
//! of the next tick by [`InputController::apply`].

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, EntityKind, Side};
use super::state::GameEvent;
use super::world::World;
use crate::consts::TURRET_STEP_DEG;
use crate::normalize_degrees;
use crate::settings::KeyBindings;

/// A keyboard key as reported by the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    /// Printable key, stored lowercase
    Char(char),
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Escape,
}

impl Key {
    /// Parse a key symbol ("q", "Left", "space", "Return", ...).
    /// Unrecognized symbols return `None`.
    pub fn from_keysym(sym: &str) -> Option<Self> {
        match sym.to_lowercase().as_str() {
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "space" | " " => Some(Key::Space),
            "return" | "enter" => Some(Key::Enter),
            "escape" | "esc" => Some(Key::Escape),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_alphanumeric() => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Space => f.write_str("space"),
            Key::Enter => f.write_str("Return"),
            Key::Escape => f.write_str("Escape"),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Key::from_keysym(&value).ok_or_else(|| format!("unknown key symbol {value:?}"))
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

/// What a bound key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    PaddleUp(Side),
    PaddleDown(Side),
    RotateLeft,
    RotateRight,
    Fire,
    Restart,
}

/// Edge-triggered turret command, applied on the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RotateLeft,
    RotateRight,
    Fire,
}

/// Records intents between ticks
#[derive(Debug, Clone)]
pub struct InputController {
    bindings: KeyBindings,
    held: HashSet<Key>,
    left_intent: i8,
    right_intent: i8,
    queued: Vec<Command>,
}

impl InputController {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
            left_intent: 0,
            right_intent: 0,
            queued: Vec::new(),
        }
    }

    /// Handle a key press. Paddle keys set the intent on every press,
    /// auto-repeat included. Other actions fire once per press, so repeats of
    /// a held key return `None`, as do unbound keys.
    pub fn key_down(&mut self, key: Key) -> Option<Action> {
        let action = self.bindings.action_for(key)?;
        let first_press = self.held.insert(key);
        match action {
            Action::PaddleUp(side) => *self.intent_mut(side) = -1,
            Action::PaddleDown(side) => *self.intent_mut(side) = 1,
            _ if !first_press => return None,
            Action::RotateLeft => self.queued.push(Command::RotateLeft),
            Action::RotateRight => self.queued.push(Command::RotateRight),
            Action::Fire => self.queued.push(Command::Fire),
            Action::Restart => {}
        }
        Some(action)
    }

    /// Handle a key release. Releasing either key of a paddle's pair stops it.
    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
        if let Some(Action::PaddleUp(side) | Action::PaddleDown(side)) = self.bindings.action_for(key) {
            *self.intent_mut(side) = 0;
        }
    }

    /// Current intent for a paddle
    pub fn paddle_intent(&self, side: Side) -> i8 {
        match side {
            Side::Left => self.left_intent,
            Side::Right => self.right_intent,
        }
    }

    /// Commands waiting for the next tick
    pub fn queued(&self) -> &[Command] {
        &self.queued
    }

    /// Drop queued turret commands (used outside of play)
    pub fn discard_commands(&mut self) {
        self.queued.clear();
    }

    /// Zero intents and commands for a fresh session
    pub fn reset(&mut self) {
        self.left_intent = 0;
        self.right_intent = 0;
        self.queued.clear();
    }

    /// Write intents onto the world: paddle intents, then queued turret
    /// commands in press order. Fired bullets leave from the turret center.
    pub fn apply(&mut self, world: &mut World, events: &mut Vec<GameEvent>) {
        let (left, right) = (self.left_intent, self.right_intent);
        for entity in world.iter_alive_mut() {
            if let Body::Paddle(paddle) = &mut entity.body {
                paddle.move_intent = match paddle.side {
                    Side::Left => left,
                    Side::Right => right,
                };
            }
        }

        if self.queued.is_empty() {
            return;
        }
        let Some(turret_id) = world.entities_of_kind(EntityKind::Turret).map(|e| e.id).next() else {
            self.queued.clear();
            return;
        };

        for command in self.queued.drain(..) {
            let Some(turret) = world.get_mut(turret_id) else {
                break;
            };
            let origin = turret.pos;
            let Body::Turret(state) = &mut turret.body else {
                break;
            };
            match command {
                Command::RotateLeft => state.angle = normalize_degrees(state.angle - TURRET_STEP_DEG),
                Command::RotateRight => state.angle = normalize_degrees(state.angle + TURRET_STEP_DEG),
                Command::Fire => {
                    let angle = state.angle;
                    let id = world.add_entity(Entity::bullet(origin, angle));
                    log::debug!("Bullet {:?} fired at {angle} deg", id);
                    events.push(GameEvent::BulletFired);
                }
            }
        }
    }

    fn intent_mut(&mut self, side: Side) -> &mut i8 {
        match side {
            Side::Left => &mut self.left_intent,
            Side::Right => &mut self.right_intent,
        }
    }
}

//! Demo-mode autopilot
//!
//! Plays either game through the same key boundary a human would use, by
//! reading snapshots and emitting key presses/releases. Used by the headless
//! demo binary.

use glam::Vec2;

use crate::arena_center;
use crate::settings::KeyBindings;
use crate::sim::entity::{EntityKind, Side};
use crate::sim::input::{Action, Key};
use crate::sim::snapshot::Snapshot;
use crate::sim::state::GamePhase;

/// Paddle dead zone around the ball's height
const TRACK_DEAD_ZONE: f32 = 8.0;
/// Fire when the turret is within this many degrees of the aim point
const AIM_TOLERANCE_DEG: f32 = 5.0;

/// A raw key event to forward to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Key),
    Up(Key),
}

/// Snapshot-driven player
#[derive(Debug, Clone)]
pub struct Autopilot {
    keys: KeyBindings,
    /// Keys we are currently holding
    held: Vec<Key>,
    /// Press-then-release keys still waiting for their release
    tapped: Vec<Key>,
}

impl Autopilot {
    pub fn new(keys: KeyBindings) -> Self {
        Self {
            keys,
            held: Vec::new(),
            tapped: Vec::new(),
        }
    }

    /// Key events to send before the next tick
    pub fn plan(&mut self, snapshot: &Snapshot) -> Vec<KeyEvent> {
        let mut events: Vec<KeyEvent> = self.tapped.drain(..).map(KeyEvent::Up).collect();
        if snapshot.phase != GamePhase::Playing {
            events.extend(self.held.drain(..).map(KeyEvent::Up));
            return events;
        }

        if snapshot.first(EntityKind::Ball).is_some() {
            self.plan_pong(snapshot, &mut events);
        } else if snapshot.first(EntityKind::Turret).is_some() {
            self.plan_shooter(snapshot, &mut events);
        }
        events
    }

    fn plan_pong(&mut self, snapshot: &Snapshot, events: &mut Vec<KeyEvent>) {
        let Some(ball) = snapshot.first(EntityKind::Ball) else {
            return;
        };
        for paddle in snapshot.of_kind(EntityKind::Paddle) {
            let side = if paddle.pos.x < arena_center().x {
                Side::Left
            } else {
                Side::Right
            };
            let dy = ball.pos.y - paddle.pos.y;
            let wanted = if dy < -TRACK_DEAD_ZONE {
                Some(Action::PaddleUp(side))
            } else if dy > TRACK_DEAD_ZONE {
                Some(Action::PaddleDown(side))
            } else {
                None
            };
            let wanted_key = wanted.and_then(|a| self.keys.key_for(a));
            self.hold_only(wanted_key, [Action::PaddleUp(side), Action::PaddleDown(side)], events);
        }
    }

    fn plan_shooter(&mut self, snapshot: &Snapshot, events: &mut Vec<KeyEvent>) {
        let Some(turret) = snapshot.first(EntityKind::Turret) else {
            return;
        };
        let Some(target) = snapshot
            .of_kind(EntityKind::Target)
            .min_by(|a, b| {
                a.pos
                    .distance_squared(turret.pos)
                    .total_cmp(&b.pos.distance_squared(turret.pos))
            })
        else {
            return;
        };

        let current = turret.angle.unwrap_or(0.0);
        let diff = signed_delta(current, aim_angle(turret.pos, target.pos));
        let action = if diff.abs() <= AIM_TOLERANCE_DEG {
            Action::Fire
        } else if diff > 0.0 {
            Action::RotateRight
        } else {
            Action::RotateLeft
        };
        if let Some(key) = self.keys.key_for(action) {
            events.push(KeyEvent::Down(key));
            self.tapped.push(key);
        }
    }

    /// Hold `wanted` (if any) and release the other keys of the group
    fn hold_only(&mut self, wanted: Option<Key>, group: [Action; 2], events: &mut Vec<KeyEvent>) {
        let keys: Vec<Key> = group.iter().filter_map(|&a| self.keys.key_for(a)).collect();
        for key in keys {
            let is_held = self.held.contains(&key);
            if Some(key) == wanted {
                if !is_held {
                    self.held.push(key);
                    events.push(KeyEvent::Down(key));
                }
            } else if is_held {
                self.held.retain(|k| *k != key);
                events.push(KeyEvent::Up(key));
            }
        }
    }
}

/// Turret angle (degrees, screen space) that points from `from` at `to`
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    crate::normalize_degrees((-d.y).atan2(d.x).to_degrees())
}

/// Shortest signed rotation from `from` to `to`, in (-180, 180]
fn signed_delta(from: f32, to: f32) -> f32 {
    let d = crate::normalize_degrees(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Game;
    use crate::settings::Settings;
    use crate::sim::state::GameKind;

    fn drive(game: &mut Game, pilot: &mut Autopilot) {
        for event in pilot.plan(&game.snapshot()) {
            match event {
                KeyEvent::Down(k) => game.on_key_down(k),
                KeyEvent::Up(k) => game.on_key_up(k),
            }
        }
        game.on_tick();
    }

    #[test]
    fn test_aim_angle() {
        let c = Vec2::new(400.0, 300.0);
        assert!((aim_angle(c, Vec2::new(500.0, 300.0)) - 0.0).abs() < 1e-4);
        assert!((aim_angle(c, Vec2::new(400.0, 200.0)) - 90.0).abs() < 1e-4);
        assert!((aim_angle(c, Vec2::new(300.0, 300.0)) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_signed_delta() {
        assert_eq!(signed_delta(350.0, 10.0), 20.0);
        assert_eq!(signed_delta(10.0, 350.0), -20.0);
    }

    #[test]
    fn test_pong_pilot_holds_and_releases() {
        let settings = Settings {
            seed: Some(5),
            ..Default::default()
        };
        let mut game = Game::new(GameKind::Pong, &settings);
        game.on_start_command();
        let mut pilot = Autopilot::new(settings.pong.keys.clone());

        for _ in 0..2000 {
            drive(&mut game, &mut pilot);
        }
        assert!(game.snapshot().time_ticks > 0);

        game.session_mut().unwrap().phase = GamePhase::GameOver;
        let releases = pilot.plan(&game.snapshot());
        assert!(releases.iter().all(|e| matches!(e, KeyEvent::Up(_))));
        assert!(pilot.held.is_empty());
    }

    #[test]
    fn test_shooter_pilot_scores() {
        let settings = Settings {
            seed: Some(99),
            ..Default::default()
        };
        let mut game = Game::new(GameKind::Shooter, &settings);
        game.on_start_command();
        let mut pilot = Autopilot::new(settings.shooter.keys.clone());

        for _ in 0..400 {
            if game.phase() != GamePhase::Playing {
                break;
            }
            drive(&mut game, &mut pilot);
        }
        let total = match game.score() {
            Some(crate::sim::Score::Shooter { total }) => total,
            other => panic!("unexpected score {other:?}"),
        };
        assert!(total > 0);
    }
}

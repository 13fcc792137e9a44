//! Score keeping and win/loss rules

use std::fmt;

use serde::{Deserialize, Serialize};

use super::collision::CollisionReport;
use super::entity::Side;
use super::state::{GameEvent, GameKind};
use crate::consts::WIN_SCORE;

/// Running score for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum Score {
    Pong { left: u32, right: u32 },
    Shooter { total: u64 },
}

impl Score {
    /// Zeroed score for a game
    pub fn new(kind: GameKind) -> Self {
        match kind {
            GameKind::Pong => Score::Pong { left: 0, right: 0 },
            GameKind::Shooter => Score::Shooter { total: 0 },
        }
    }

    pub fn is_zero(&self) -> bool {
        match *self {
            Score::Pong { left, right } => left == 0 && right == 0,
            Score::Shooter { total } => total == 0,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Pong { left, right } => write!(f, "{left} - {right}"),
            Score::Shooter { total } => write!(f, "Points: {total}"),
        }
    }
}

/// How a tick ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Pong: this side reached the winning score
    Won(Side),
    /// Shooter: a target reached the center
    Lost,
}

/// Apply this tick's collision report to the score. Returns the terminating
/// outcome, if any; the first side to reach the win score ends the match
/// immediately, and later exits in the same tick are not counted.
pub fn apply(score: &mut Score, report: &CollisionReport, events: &mut Vec<GameEvent>) -> Option<Outcome> {
    match score {
        Score::Pong { left, right } => {
            for &(_, side) in &report.ball_exits {
                let counter = match side {
                    Side::Left => &mut *left,
                    Side::Right => &mut *right,
                };
                *counter += 1;
                log::debug!("{} scores ({} - {})", side.as_str(), left, right);
                events.push(GameEvent::Scored { side });

                let reached = match side {
                    Side::Left => *left,
                    Side::Right => *right,
                };
                if reached >= WIN_SCORE {
                    events.push(GameEvent::Won { side });
                    return Some(Outcome::Won(side));
                }
            }
            None
        }
        Score::Shooter { total } => {
            for kind in &report.targets_hit {
                *total += u64::from(kind.points());
            }
            if !report.targets_hit.is_empty() {
                log::debug!("Score now {}", total);
            }
            if report.center_breached {
                events.push(GameEvent::Lost);
                return Some(Outcome::Lost);
            }
            None
        }
    }
}

//! Read-only view of a session for the render/UI layer

use glam::Vec2;
use serde::Serialize;

use super::entity::{EntityId, EntityKind};
use super::geometry::Shape;
use super::scoring::Score;
use super::state::{GameKind, GamePhase, Session};

/// One live entity as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Center position
    pub pos: Vec2,
    pub shape: Shape,
    /// Turret firing angle in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f32>,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub game: GameKind,
    pub title: &'static str,
    pub phase: GamePhase,
    pub time_ticks: u64,
    /// `None` on the start screen
    pub score: Option<Score>,
    pub entities: Vec<EntityView>,
    /// Winner text or "GAME OVER"
    pub message: Option<String>,
    pub hint: Option<&'static str>,
}

impl Snapshot {
    /// Start screen: no session, no entities
    pub fn start_screen(game: GameKind) -> Self {
        Self {
            game,
            title: game.title(),
            phase: GamePhase::Start,
            time_ticks: 0,
            score: None,
            entities: Vec::new(),
            message: None,
            hint: None,
        }
    }

    pub fn of(session: &Session) -> Self {
        let mut entities = Vec::with_capacity(session.world.len());
        session.world.for_each_entity(|e| {
            entities.push(EntityView {
                id: e.id,
                kind: e.kind(),
                pos: e.pos,
                shape: e.shape,
                angle: e.as_turret().map(|t| t.angle),
            });
        });

        Self {
            game: session.kind,
            title: session.kind.title(),
            phase: session.phase,
            time_ticks: session.time_ticks,
            score: Some(session.score),
            entities,
            message: session.message(),
            hint: session.restart_hint(),
        }
    }

    /// Live entities of one kind
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &EntityView> + '_ {
        self.entities.iter().filter(move |e| e.kind == kind)
    }

    /// First entity of a kind, e.g. the ball or the turret
    pub fn first(&self, kind: EntityKind) -> Option<&EntityView> {
        self.of_kind(kind).next()
    }
}

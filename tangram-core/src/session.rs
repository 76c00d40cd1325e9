//! Scripted interaction sessions: a board, its pieces, and a list of input
//! events replayed through a [`Controller`].

use log::{info, warn};
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    board::Board,
    config::Config,
    controller::Controller,
    direction::Direction,
    effect::{Effect, Effects},
    error::{Result, SessionError},
    piece::{ContainerId, Piece, PieceId, PieceSpec},
    r2::R2,
    rect::Rect,
    summary::SummaryView,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Event {
    PointerDown { piece: PieceId, at: R2<f64> },
    PointerMove { at: R2<f64> },
    PointerUp,
    DoubleClick { piece: PieceId },
    RotateSelected,
    NudgeSelected { direction: Direction },
    /// User picked a summary-view entry
    Choose { value: String },
    /// A container's bounding rectangle changed (scroll, resize)
    Resize { container: ContainerId, rect: Rect },
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::PointerDown { .. } => "pointerDown",
            Event::PointerMove { .. } => "pointerMove",
            Event::PointerUp => "pointerUp",
            Event::DoubleClick { .. } => "doubleClick",
            Event::RotateSelected => "rotateSelected",
            Event::NudgeSelected { .. } => "nudgeSelected",
            Event::Choose { .. } => "choose",
            Event::Resize { .. } => "resize",
        }
    }

    pub fn apply(&self, controller: &mut Controller) -> Result<Effects> {
        match self {
            Event::PointerDown { piece, at } => controller.pointer_down(piece, *at),
            Event::PointerMove { at } => controller.pointer_move(*at),
            Event::PointerUp => controller.pointer_up(),
            Event::DoubleClick { piece } => controller.double_click(piece),
            Event::RotateSelected => controller.rotate_selected(),
            Event::NudgeSelected { direction } => controller.nudge_selected(*direction),
            Event::Choose { value } => controller.choose_entry(value),
            Event::Resize { container, rect } => {
                controller.set_container_rect(container, *rect)?;
                Ok(Effects::new())
            }
        }
    }
}

fn default_summary() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub config: Config,
    pub board: Board,
    /// Whether a summary view control is present
    #[serde(default = "default_summary")]
    pub summary: bool,
    pub pieces: Vec<PieceSpec>,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// User-facing notice raised while replaying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Notice {
    /// Index of the event that raised it
    pub event: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Outcome {
    /// Board as last laid out (after any `resize` events)
    pub board: Board,
    pub pieces: Vec<Piece>,
    pub summary: Option<SummaryView>,
    pub notices: Vec<Notice>,
    pub effects: Vec<Effect>,
}

impl Session {
    pub fn from_json(json: &str) -> std::result::Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Initializes a controller for this session's board and pieces.
    pub fn controller(&self) -> std::result::Result<Controller, SessionError> {
        Controller::new(self.config.clone(), self.board.clone(), self.pieces.clone(), self.summary)
            .map_err(SessionError::Board)
    }

    /// Replays every event in order. Notices are collected; any other error aborts.
    pub fn replay(&self) -> std::result::Result<Outcome, SessionError> {
        let mut controller = self.controller()?;
        let mut notices = Vec::new();
        let mut effects = Vec::new();
        for (index, event) in self.events.iter().enumerate() {
            match event.apply(&mut controller) {
                Ok(applied) => effects.extend(applied),
                Err(e) if e.is_notice() => {
                    warn!("event {} ({}): {}", index, event.kind(), e);
                    notices.push(Notice { event: index, message: e.to_string() });
                }
                Err(source) => {
                    return Err(SessionError::Event { index, kind: event.kind().to_string(), source });
                }
            }
        }
        info!("Replayed {} events: {} notices, {} effects", self.events.len(), notices.len(), effects.len());
        Ok(Outcome {
            board: controller.board().clone(),
            pieces: controller.pieces().to_vec(),
            summary: controller.summary().cloned(),
            notices,
            effects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn parse_events() {
        let json = r#"[
            { "kind": "pointerDown", "piece": "p1", "at": { "x": 1, "y": 2 } },
            { "kind": "pointerMove", "at": { "x": 3, "y": 4 } },
            { "kind": "pointerUp" },
            { "kind": "nudgeSelected", "direction": "left" },
            { "kind": "choose", "value": "p1" }
        ]"#;
        let events: Vec<Event> = serde_json::from_str(json).unwrap();
        assert_eq!(events[0], Event::PointerDown { piece: "p1".into(), at: R2::new(1., 2.) });
        assert_eq!(events[2], Event::PointerUp);
        assert_eq!(events[3], Event::NudgeSelected { direction: Direction::Left });
        assert_eq!(events[4].kind(), "choose");
    }

    #[test]
    fn unknown_piece_aborts_replay() {
        let session = Session::from_json(r#"{
            "board": { "source": { "id": "puzzle", "rect": { "x": 0, "y": 0, "width": 100, "height": 100 } } },
            "pieces": [ { "classes": ["square"] } ],
            "events": [ { "kind": "doubleClick", "piece": "ghost" } ]
        }"#).unwrap();
        match session.replay() {
            Err(SessionError::Event { index, kind, .. }) => {
                assert_eq!(index, 0);
                assert_eq!(kind, "doubleClick");
            }
            other => panic!("expected event error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(Session::from_json("{"), Err(SessionError::Parse(_))));
    }
}

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    deg::Deg,
    piece::{ContainerId, Layer, PieceId},
    r2::R2,
};

/// An observable side effect of a controller operation, for a view layer to
/// apply (and for tests to check).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Effect {
    /// Selected marker moved to `piece` (from `previous`, if any)
    Select { piece: PieceId, previous: Option<PieceId> },
    Layer { piece: PieceId, layer: Layer },
    Move { piece: PieceId, position: R2<f64> },
    Rotate {
        piece: PieceId,
        #[tsify(type = "number")]
        rotation: Deg,
    },
    /// Piece now belongs to `container`; its `position` is relative to it
    Reparent { piece: PieceId, container: ContainerId, position: R2<f64> },
    /// Document-level move/up handlers must be registered
    Listen,
    /// Document-level move/up handlers must be removed
    Unlisten,
    /// Summary view was rebuilt
    Summary,
}

impl Effect {
    pub fn piece(&self) -> Option<&PieceId> {
        match self {
            Effect::Select { piece, .. }
            | Effect::Layer { piece, .. }
            | Effect::Move { piece, .. }
            | Effect::Rotate { piece, .. }
            | Effect::Reparent { piece, .. } => Some(piece),
            Effect::Listen | Effect::Unlisten | Effect::Summary => None,
        }
    }
}

pub type Effects = Vec<Effect>;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::piece::{ContainerId, PieceId};

/// User command that needs a current selection.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    #[display(fmt = "rotate")]
    Rotate,
    #[display(fmt = "move")]
    Nudge,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TangramError {
    #[error("Please select a piece to {action}.")]
    NoSelection { action: Action },

    #[error("Unknown piece: {0}")]
    UnknownPiece(PieceId),

    #[error("Unknown container: {0}")]
    UnknownContainer(ContainerId),

    #[error("Duplicate piece id: {0}")]
    DuplicatePiece(PieceId),

    #[error("Duplicate container id: {0}")]
    DuplicateContainer(ContainerId),
}

impl TangramError {
    /// Whether this error is meant to be shown to the user as a notice.
    pub fn is_notice(&self) -> bool {
        matches!(self, TangramError::NoSelection { .. })
    }
}

pub type Result<T> = std::result::Result<T, TangramError>;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to parse session: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid board: {0}")]
    Board(#[source] TangramError),

    #[error("Event {index} ({kind}) failed: {source}")]
    Event {
        index: usize,
        kind: String,
        #[source]
        source: TangramError,
    },
}

//! Pointer-drag state.
//!
//! A drag exists only between a pointer-down on a piece and the matching
//! pointer-up. While it exists, document-level move/up handlers are live;
//! [`DragState::start`] and [`DragState::end`] are the only transitions, so
//! handler registration pairs with them one-to-one.

use crate::{piece::PieceId, r2::R2};

#[derive(Debug, Default, Clone, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        piece: PieceId,
        /// Pointer position minus the piece's top-left corner, fixed at press time
        offset: R2<f64>,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn piece(&self) -> Option<&PieceId> {
        match self {
            DragState::Dragging { piece, .. } => Some(piece),
            DragState::Idle => None,
        }
    }

    pub fn offset(&self) -> Option<R2<f64>> {
        match self {
            DragState::Dragging { offset, .. } => Some(*offset),
            DragState::Idle => None,
        }
    }

    /// Enters `Dragging`. Returns the drag it replaced, if one was still running.
    pub fn start(&mut self, piece: PieceId, offset: R2<f64>) -> Option<(PieceId, R2<f64>)> {
        let previous = self.end();
        *self = DragState::Dragging { piece, offset };
        previous
    }

    /// Returns to `Idle`, yielding the finished drag (if any).
    pub fn end(&mut self) -> Option<(PieceId, R2<f64>)> {
        match std::mem::take(self) {
            DragState::Dragging { piece, offset } => Some((piece, offset)),
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn start_and_end() {
        let mut drag = DragState::default();
        assert!(!drag.is_dragging());
        assert_eq!(drag.start("a".into(), R2::new(3., 4.)), None);
        assert!(drag.is_dragging());
        assert_eq!(drag.piece(), Some(&PieceId::from("a")));
        assert_eq!(drag.offset(), Some(R2::new(3., 4.)));
        assert_eq!(drag.end(), Some((PieceId::from("a"), R2::new(3., 4.))));
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn end_when_idle_is_noop() {
        let mut drag = DragState::default();
        assert_eq!(drag.end(), None);
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn restart_returns_previous() {
        let mut drag = DragState::default();
        drag.start("a".into(), R2::zero());
        let previous = drag.start("b".into(), R2::new(1., 1.));
        assert_eq!(previous.map(|(p, _)| p), Some(PieceId::from("a")));
        assert_eq!(drag.piece(), Some(&PieceId::from("b")));
    }
}

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{error::{Result, TangramError}, piece::ContainerId, r2::R2, rect::Rect};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Container {
    pub id: ContainerId,
    pub rect: Rect,
}

impl Container {
    pub fn new(id: impl Into<ContainerId>, rect: Rect) -> Self {
        Container { id: id.into(), rect }
    }

    pub fn origin(&self) -> R2<f64> {
        self.rect.origin()
    }
}

/// The puzzle area: a source container holding the pieces initially, and
/// optionally a destination container pieces can be dropped into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Board {
    pub source: Container,
    #[serde(default)]
    pub destination: Option<Container>,
}

impl Board {
    pub fn single(source: Container) -> Self {
        Board { source, destination: None }
    }

    pub fn paired(source: Container, destination: Container) -> Result<Self> {
        if source.id == destination.id {
            return Err(TangramError::DuplicateContainer(destination.id));
        }
        Ok(Board { source, destination: Some(destination) })
    }

    pub fn containers(&self) -> impl Iterator<Item = &Container> {
        std::iter::once(&self.source).chain(self.destination.iter())
    }

    pub fn get(&self, id: &ContainerId) -> Result<&Container> {
        self.containers()
            .find(|c| &c.id == id)
            .ok_or_else(|| TangramError::UnknownContainer(id.clone()))
    }

    /// Updates a container's bounding rectangle from the live layout.
    pub fn set_rect(&mut self, id: &ContainerId, rect: Rect) -> Result<()> {
        let container = std::iter::once(&mut self.source)
            .chain(self.destination.iter_mut())
            .find(|c| &c.id == id)
            .ok_or_else(|| TangramError::UnknownContainer(id.clone()))?;
        container.rect = rect;
        Ok(())
    }

    /// The container a piece centered at `center` should be dropped into, if
    /// that differs from staying put.
    pub fn snap_target(&self, center: &R2<f64>) -> Option<&Container> {
        self.destination.as_ref().filter(|d| d.rect.contains(center))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn board() -> Board {
        Board::paired(
            Container::new("puzzle", Rect::new(0., 0., 300., 300.)),
            Container::new("board", Rect::new(400., 0., 300., 300.)),
        ).unwrap()
    }

    #[test]
    fn get_and_set_rect() {
        let mut board = board();
        assert_eq!(board.get(&"board".into()).unwrap().origin(), R2::new(400., 0.));
        board.set_rect(&"board".into(), Rect::new(410., 5., 300., 300.)).unwrap();
        assert_eq!(board.get(&"board".into()).unwrap().origin(), R2::new(410., 5.));
        assert_eq!(
            board.set_rect(&"nope".into(), Rect::default()),
            Err(TangramError::UnknownContainer("nope".into())),
        );
    }

    #[test]
    fn snap_target_is_destination_only() {
        let board = board();
        assert_eq!(board.snap_target(&R2::new(400., 300.)).map(|c| c.id.as_str()), Some("board"));
        assert!(board.snap_target(&R2::new(150., 150.)).is_none());
        assert!(board.snap_target(&R2::new(399.9, 150.)).is_none());
    }

    #[test]
    fn single_never_snaps() {
        let board = Board::single(Container::new("puzzle", Rect::new(0., 0., 300., 300.)));
        assert!(board.snap_target(&R2::new(150., 150.)).is_none());
        assert_eq!(board.containers().count(), 1);
    }

    #[test]
    fn paired_rejects_shared_id() {
        let c = Container::new("puzzle", Rect::default());
        assert!(Board::paired(c.clone(), c).is_err());
    }
}

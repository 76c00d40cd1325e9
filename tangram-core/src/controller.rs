//! The interaction controller: owns the pieces, the selection and the drag
//! state, and keeps the summary view in step with them.
//!
//! Every operation returns the [`Effect`]s it caused, in order, so a view
//! layer can mirror them onto real elements.

use std::collections::HashSet;

use log::{debug, info};

use crate::{
    board::Board,
    config::Config,
    direction::{Axis, Direction},
    drag::DragState,
    effect::{Effect, Effects},
    error::{Action, Result, TangramError},
    piece::{ContainerId, Layer, Piece, PieceId, PieceSpec},
    r2::R2,
    rect::Rect,
    summary::SummaryView,
};

#[derive(Debug, Clone)]
pub struct Controller {
    config: Config,
    board: Board,
    pieces: Vec<Piece>,
    selected: Option<PieceId>,
    drag: DragState,
    summary: Option<SummaryView>,
}

impl Controller {
    /// Initializes every piece (id, rotation 0, category name) and builds the
    /// summary view if `with_summary` is set.
    pub fn new(config: Config, board: Board, specs: Vec<PieceSpec>, with_summary: bool) -> Result<Self> {
        if let Some(destination) = &board.destination {
            if destination.id == board.source.id {
                return Err(TangramError::DuplicateContainer(destination.id.clone()));
            }
        }
        let mut ids = HashSet::new();
        let mut pieces = Vec::with_capacity(specs.len());
        for (index, spec) in specs.into_iter().enumerate() {
            let piece = Piece::new(index, spec, board.source.id.clone());
            board.get(&piece.container)?;
            if !ids.insert(piece.id.clone()) {
                return Err(TangramError::DuplicatePiece(piece.id));
            }
            debug!("init {} as {:?} in {} at {}", piece.id, piece.name, piece.container, piece.position);
            pieces.push(piece);
        }
        info!(
            "Initialized {} pieces across {} container(s), summary view {}",
            pieces.len(),
            board.containers().count(),
            if with_summary { "enabled" } else { "absent" },
        );
        let summary = with_summary.then(|| SummaryView::build(&config.placeholder, &pieces, None));
        Ok(Controller {
            config,
            board,
            pieces,
            selected: None,
            drag: DragState::Idle,
            summary,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: &PieceId) -> Result<&Piece> {
        Ok(&self.pieces[self.index(id)?])
    }

    pub fn selected(&self) -> Option<&Piece> {
        self.selected.as_ref().and_then(|id| self.piece(id).ok())
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn summary(&self) -> Option<&SummaryView> {
        self.summary.as_ref()
    }

    fn index(&self, id: &PieceId) -> Result<usize> {
        self.pieces
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| TangramError::UnknownPiece(id.clone()))
    }

    fn origin(&self, container: &ContainerId) -> Result<R2<f64>> {
        Ok(self.board.get(container)?.origin())
    }

    /// Records a container's current bounding rectangle (it moves with scrolling).
    pub fn set_container_rect(&mut self, id: &ContainerId, rect: Rect) -> Result<()> {
        self.board.set_rect(id, rect)
    }

    /// Rebuilds the summary view from scratch, if there is one.
    pub fn refresh_summary(&mut self) -> Option<Effect> {
        let summary = self.summary.as_mut()?;
        *summary = SummaryView::build(&self.config.placeholder, &self.pieces, self.selected.as_ref());
        Some(Effect::Summary)
    }

    /// Makes `id` the only selected piece.
    pub fn select_piece(&mut self, id: &PieceId) -> Result<Effects> {
        let index = self.index(id)?;
        for piece in self.pieces.iter_mut() {
            piece.selected = false;
        }
        self.pieces[index].selected = true;
        let previous = self.selected.replace(id.clone());
        debug!("select {} (was {:?})", id, previous);
        let mut effects = vec![Effect::Select { piece: id.clone(), previous }];
        effects.extend(self.refresh_summary());
        Ok(effects)
    }

    /// Selects the piece behind a summary entry. The placeholder entry is a no-op.
    pub fn choose_entry(&mut self, value: &str) -> Result<Effects> {
        if value.is_empty() {
            return Ok(Effects::new());
        }
        self.select_piece(&PieceId::from(value))
    }

    /// `Idle → Dragging`: select, raise, and fix the pointer offset.
    pub fn pointer_down(&mut self, id: &PieceId, at: R2<f64>) -> Result<Effects> {
        let index = self.index(id)?;
        let mut effects = Effects::new();
        if self.drag.is_dragging() {
            // A lost pointer-up; finish that drag first so handlers don't pile up.
            effects.extend(self.pointer_up()?);
        }
        effects.extend(self.select_piece(id)?);

        let origin = self.origin(&self.pieces[index].container)?;
        let piece = &mut self.pieces[index];
        piece.layer = Layer::Front;
        let offset = at - piece.top_left(origin);
        effects.push(Effect::Layer { piece: id.clone(), layer: Layer::Front });

        self.drag.start(id.clone(), offset);
        debug!("drag start {} at {} (offset {})", id, at, offset);
        effects.push(Effect::Listen);
        Ok(effects)
    }

    /// Moves the dragged piece so its top-left stays `offset` away from the pointer.
    pub fn pointer_move(&mut self, at: R2<f64>) -> Result<Effects> {
        let DragState::Dragging { piece: id, offset } = &self.drag else {
            return Ok(Effects::new());
        };
        let (id, offset) = (id.clone(), *offset);
        let index = self.index(&id)?;
        let origin = self.origin(&self.pieces[index].container)?;
        let position = at - origin - offset;
        self.pieces[index].position = position;
        Ok(vec![Effect::Move { piece: id, position }])
    }

    /// `Dragging → Idle`: drop the piece, snapping it into the destination
    /// container when its center lands there.
    pub fn pointer_up(&mut self) -> Result<Effects> {
        let Some((id, _)) = self.drag.end() else {
            return Ok(Effects::new());
        };
        let mut effects = vec![Effect::Unlisten];
        let index = self.index(&id)?;

        let piece = &self.pieces[index];
        let center = piece.center(self.origin(&piece.container)?);
        let target = self
            .board
            .snap_target(&center)
            .filter(|target| target.id != piece.container)
            .map(|target| (target.id.clone(), target.origin()));

        let piece = &mut self.pieces[index];
        if let Some((container, origin)) = target {
            let position = center - piece.size / 2. - origin;
            debug!("snap {} from {} into {} at {}", id, piece.container, container, position);
            piece.container = container.clone();
            piece.position = position;
            effects.push(Effect::Reparent { piece: id.clone(), container, position });
        } else {
            debug!("drop {} in {} at {}", id, piece.container, piece.position);
        }
        piece.layer = Layer::Base;
        effects.push(Effect::Layer { piece: id, layer: Layer::Base });
        Ok(effects)
    }

    /// Adds `increment` degrees to a piece's rotation and refreshes the summary view.
    pub fn rotate(&mut self, id: &PieceId, increment: i32) -> Result<Effects> {
        let index = self.index(id)?;
        let piece = &mut self.pieces[index];
        piece.rotation = piece.rotation.rotate(increment);
        let rotation = piece.rotation;
        debug!("rotate {} by {} to {}", id, increment, rotation);
        let mut effects = vec![Effect::Rotate { piece: id.clone(), rotation }];
        effects.extend(self.refresh_summary());
        Ok(effects)
    }

    pub fn double_click(&mut self, id: &PieceId) -> Result<Effects> {
        self.rotate(id, self.config.rotate_step)
    }

    pub fn rotate_selected(&mut self) -> Result<Effects> {
        let id = self.selected.clone().ok_or(TangramError::NoSelection { action: Action::Rotate })?;
        self.rotate(&id, self.config.rotate_step)
    }

    /// Moves a piece `delta` pixels along `axis`.
    pub fn nudge(&mut self, id: &PieceId, axis: Axis, delta: f64) -> Result<Effects> {
        let index = self.index(id)?;
        let piece = &mut self.pieces[index];
        piece.position = piece.position + axis.delta(delta);
        Ok(vec![Effect::Move { piece: id.clone(), position: piece.position }])
    }

    pub fn nudge_selected(&mut self, direction: Direction) -> Result<Effects> {
        let id = self.selected.clone().ok_or(TangramError::NoSelection { action: Action::Nudge })?;
        let (axis, delta) = direction.axis_delta(self.config.nudge_step);
        self.nudge(&id, axis, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Container;
    use approx::assert_relative_eq;
    use test_log::test;

    fn spec(classes: &[&str], position: R2<f64>) -> PieceSpec {
        PieceSpec {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            position,
            size: R2::new(40., 40.),
            ..Default::default()
        }
    }

    fn specs() -> Vec<PieceSpec> {
        vec![
            spec(&["triangle-large-1"], R2::new(10., 10.)),
            spec(&["square"], R2::new(100., 50.)),
            spec(&["mystery"], R2::zero()),
        ]
    }

    fn single() -> Controller {
        let board = Board::single(Container::new("puzzle", Rect::new(50., 50., 400., 400.)));
        Controller::new(Config::default(), board, specs(), true).unwrap()
    }

    fn paired() -> Controller {
        let board = Board::paired(
            Container::new("puzzle", Rect::new(0., 0., 300., 300.)),
            Container::new("board", Rect::new(400., 0., 300., 300.)),
        ).unwrap();
        Controller::new(Config::default(), board, specs(), true).unwrap()
    }

    fn id(s: &str) -> PieceId {
        PieceId::from(s)
    }

    #[test]
    fn init() {
        let c = single();
        assert_eq!(c.pieces().len(), 3);
        assert_eq!(c.pieces()[0].id, id("piece-0"));
        assert_eq!(c.pieces()[2].name, "Piece");
        assert!(c.pieces().iter().all(|p| p.rotation.degrees() == 0));
        let summary = c.summary().unwrap();
        assert_eq!(summary.len(), 3);
        assert_eq!(summary.entries[0].label, "Large Triangle 1 (Purple): 0°");
        assert_eq!(summary.placeholder, "-- Piece Rotations --");
        assert_eq!(summary.active, None);
    }

    #[test]
    fn init_rejects_bad_markup() {
        let board = || Board::single(Container::new("puzzle", Rect::default()));
        let mut dup = specs();
        dup[1].id = Some(id("piece-0"));
        assert_eq!(
            Controller::new(Config::default(), board(), dup, false).unwrap_err(),
            TangramError::DuplicatePiece(id("piece-0")),
        );
        let mut stray = specs();
        stray[0].container = Some("elsewhere".into());
        assert_eq!(
            Controller::new(Config::default(), board(), stray, false).unwrap_err(),
            TangramError::UnknownContainer("elsewhere".into()),
        );
    }

    #[test]
    fn select_is_exclusive() {
        let mut c = single();
        c.select_piece(&id("piece-0")).unwrap();
        let effects = c.select_piece(&id("piece-1")).unwrap();
        assert_eq!(effects[0], Effect::Select { piece: id("piece-1"), previous: Some(id("piece-0")) });
        assert_eq!(effects[1], Effect::Summary);
        assert_eq!(c.pieces().iter().filter(|p| p.selected).count(), 1);
        assert_eq!(c.selected().unwrap().id, id("piece-1"));
        assert_eq!(c.summary().unwrap().active.as_deref(), Some("piece-1"));
    }

    #[test]
    fn choose_entry_selects_without_moving() {
        let mut c = single();
        let before = c.pieces().to_vec();
        c.choose_entry("piece-2").unwrap();
        assert_eq!(c.selected().unwrap().id, id("piece-2"));
        for (a, b) in before.iter().zip(c.pieces()) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.rotation, b.rotation);
        }
        assert_eq!(c.choose_entry("").unwrap(), Effects::new());
        assert_eq!(c.selected().unwrap().id, id("piece-2"));
        assert_eq!(c.choose_entry("nope").unwrap_err(), TangramError::UnknownPiece(id("nope")));
    }

    #[test]
    fn double_click_twice() {
        let mut c = single();
        c.double_click(&id("piece-0")).unwrap();
        let effects = c.double_click(&id("piece-0")).unwrap();
        assert_eq!(effects[0], Effect::Rotate { piece: id("piece-0"), rotation: 30.into() });
        assert_eq!(c.piece(&id("piece-0")).unwrap().rotation.degrees(), 30);
        assert_eq!(c.summary().unwrap().entries[0].label, "Large Triangle 1 (Purple): 30°");
    }

    #[test]
    fn rotate_wraps() {
        let mut c = single();
        c.rotate(&id("piece-1"), 350).unwrap();
        c.rotate(&id("piece-1"), 15).unwrap();
        assert_eq!(c.piece(&id("piece-1")).unwrap().rotation.degrees(), 5);
        assert_eq!(c.summary().unwrap().entries[1].label, "Square (Darkgreen): 5°");
    }

    #[test]
    fn rotate_selected_requires_selection() {
        let mut c = single();
        let before = c.pieces().to_vec();
        let err = c.rotate_selected().unwrap_err();
        assert!(err.is_notice());
        assert_eq!(err.to_string(), "Please select a piece to rotate.");
        assert_eq!(c.pieces(), &before[..]);

        c.select_piece(&id("piece-2")).unwrap();
        c.rotate_selected().unwrap();
        assert_eq!(c.piece(&id("piece-2")).unwrap().rotation.degrees(), 15);
    }

    #[test]
    fn nudge_selected() {
        let mut c = single();
        let before = c.pieces().to_vec();
        assert_eq!(
            c.nudge_selected(Direction::Left).unwrap_err(),
            TangramError::NoSelection { action: Action::Nudge },
        );
        assert_eq!(c.pieces(), &before[..]);

        c.select_piece(&id("piece-1")).unwrap();
        c.nudge_selected(Direction::Left).unwrap();
        c.nudge_selected(Direction::Down).unwrap();
        c.nudge_selected(Direction::Down).unwrap();
        let effects = c.nudge_selected(Direction::Right).unwrap();
        assert_eq!(effects, vec![Effect::Move { piece: id("piece-1"), position: R2::new(100., 52.) }]);
    }

    #[test]
    fn drag_follows_pointer() {
        let mut c = single();
        // piece-0's top-left is at (60, 60) in viewport coordinates
        let effects = c.pointer_down(&id("piece-0"), R2::new(70., 75.)).unwrap();
        assert_eq!(effects.last(), Some(&Effect::Listen));
        assert!(effects.contains(&Effect::Layer { piece: id("piece-0"), layer: Layer::Front }));
        assert_eq!(c.drag().offset(), Some(R2::new(10., 15.)));
        assert_eq!(c.piece(&id("piece-0")).unwrap().layer, Layer::Front);
        assert!(c.piece(&id("piece-0")).unwrap().selected);

        c.pointer_move(R2::new(200., 300.)).unwrap();
        let effects = c.pointer_move(R2::new(210., 305.)).unwrap();
        assert_eq!(effects, vec![Effect::Move { piece: id("piece-0"), position: R2::new(150., 240.) }]);

        let effects = c.pointer_up().unwrap();
        assert_eq!(effects, vec![Effect::Unlisten, Effect::Layer { piece: id("piece-0"), layer: Layer::Base }]);
        assert!(!c.drag().is_dragging());
        let piece = c.piece(&id("piece-0")).unwrap();
        assert_eq!(piece.position, R2::new(150., 240.));
        assert_eq!(piece.layer, Layer::Base);
        assert_eq!(piece.container, ContainerId::from("puzzle"));
    }

    #[test]
    fn pointer_up_and_move_when_idle_are_noops() {
        let mut c = single();
        assert_eq!(c.pointer_up().unwrap(), Effects::new());
        assert_eq!(c.pointer_move(R2::new(1., 1.)).unwrap(), Effects::new());
        c.pointer_down(&id("piece-0"), R2::new(70., 75.)).unwrap();
        c.pointer_up().unwrap();
        assert_eq!(c.pointer_up().unwrap(), Effects::new());
        assert_eq!(c.pointer_move(R2::new(500., 500.)).unwrap(), Effects::new());
        assert_eq!(c.piece(&id("piece-0")).unwrap().position, R2::new(10., 10.));
    }

    #[test]
    fn listen_unlisten_pair_across_drags() {
        let mut c = single();
        let mut effects = Effects::new();
        for piece in ["piece-0", "piece-1", "piece-2"] {
            effects.extend(c.pointer_down(&id(piece), R2::new(60., 60.)).unwrap());
            effects.extend(c.pointer_move(R2::new(90., 90.)).unwrap());
            effects.extend(c.pointer_up().unwrap());
        }
        // Lost pointer-up: the next press closes the running drag first.
        effects.extend(c.pointer_down(&id("piece-0"), R2::new(60., 60.)).unwrap());
        effects.extend(c.pointer_down(&id("piece-1"), R2::new(60., 60.)).unwrap());
        effects.extend(c.pointer_up().unwrap());

        let mut live = 0;
        for effect in &effects {
            match effect {
                Effect::Listen => {
                    live += 1;
                    assert_eq!(live, 1, "handlers registered twice");
                }
                Effect::Unlisten => {
                    live -= 1;
                    assert_eq!(live, 0, "handlers removed twice");
                }
                _ => {}
            }
        }
        assert_eq!(live, 0);
        assert_eq!(c.pieces().iter().filter(|p| p.layer == Layer::Front).count(), 0);
    }

    #[test]
    fn drop_in_destination_snaps_preserving_center() {
        let mut c = paired();
        // piece-1 top-left at (100, 50); grab it at its center
        c.pointer_down(&id("piece-1"), R2::new(120., 70.)).unwrap();
        c.pointer_move(R2::new(500., 150.)).unwrap();
        let center_before = c.piece(&id("piece-1")).unwrap().center(R2::zero());
        assert_relative_eq!(center_before, R2::new(500., 150.));

        let effects = c.pointer_up().unwrap();
        assert_eq!(
            effects[1],
            Effect::Reparent { piece: id("piece-1"), container: "board".into(), position: R2::new(80., 130.) },
        );
        let piece = c.piece(&id("piece-1")).unwrap();
        assert_eq!(piece.container, ContainerId::from("board"));
        assert_relative_eq!(piece.center(R2::new(400., 0.)), center_before);

        // Dragging within the destination keeps positions relative to it
        c.pointer_down(&id("piece-1"), R2::new(500., 150.)).unwrap();
        c.pointer_move(R2::new(510., 160.)).unwrap();
        c.pointer_up().unwrap();
        let piece = c.piece(&id("piece-1")).unwrap();
        assert_eq!(piece.container, ContainerId::from("board"));
        assert_eq!(piece.position, R2::new(90., 140.));
    }

    #[test]
    fn drop_outside_destination_stays() {
        let mut c = paired();
        c.pointer_down(&id("piece-0"), R2::new(30., 30.)).unwrap();
        c.pointer_move(R2::new(330., 100.)).unwrap();
        // center at (330, 100): between the containers
        let effects = c.pointer_up().unwrap();
        assert!(!effects.iter().any(|e| matches!(e, Effect::Reparent { .. })));
        let piece = c.piece(&id("piece-0")).unwrap();
        assert_eq!(piece.container, ContainerId::from("puzzle"));
        assert_eq!(piece.position, R2::new(310., 80.));
        assert_eq!(piece.layer, Layer::Base);
    }

    #[test]
    fn drop_on_destination_edge_is_inside() {
        let mut c = paired();
        c.pointer_down(&id("piece-0"), R2::new(30., 30.)).unwrap();
        c.pointer_move(R2::new(400., 300.)).unwrap();
        c.pointer_up().unwrap();
        assert_eq!(c.piece(&id("piece-0")).unwrap().container, ContainerId::from("board"));
    }

    #[test]
    fn container_rect_refresh_moves_drag_origin() {
        let mut c = single();
        c.set_container_rect(&"puzzle".into(), Rect::new(0., 0., 400., 400.)).unwrap();
        c.pointer_down(&id("piece-0"), R2::new(10., 10.)).unwrap();
        c.pointer_move(R2::new(20., 20.)).unwrap();
        assert_eq!(c.piece(&id("piece-0")).unwrap().position, R2::new(20., 20.));
    }

    #[test]
    fn no_summary_view() {
        let board = Board::single(Container::new("puzzle", Rect::default()));
        let mut c = Controller::new(Config::default(), board, specs(), false).unwrap();
        assert!(c.summary().is_none());
        let effects = c.double_click(&id("piece-0")).unwrap();
        assert_eq!(effects.len(), 1);
        let effects = c.select_piece(&id("piece-0")).unwrap();
        assert_eq!(effects.len(), 1);
    }
}

//! DOM side of the puzzle: reading pieces out of markup, and mirroring
//! controller effects back onto elements.

use log::{debug, warn};
use tangram_core::{
    css::{px, resolve_px},
    Board, Container, ContainerId, Controller, Effect, Layer, Piece, PieceId, PieceSpec, Rect, R2,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlOptionElement, HtmlSelectElement, Window};

pub(crate) const SELECTED_CLASS: &str = "selected";

pub(crate) struct View {
    pub window: Window,
    pub document: Document,
    pub containers: Vec<(ContainerId, HtmlElement)>,
    /// In enumeration order
    pub pieces: Vec<(PieceId, HtmlElement)>,
    pub dropdown: Option<HtmlSelectElement>,
}

fn html(element: Element) -> Result<HtmlElement, JsValue> {
    element
        .dyn_into::<HtmlElement>()
        .map_err(|e| JsValue::from_str(&format!("Expected an HTML element, got {:?}", e)))
}

fn client_rect(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

fn container_id(element: &Element, fallback: &str) -> ContainerId {
    let id = element.id();
    if id.is_empty() { fallback.into() } else { id.into() }
}

impl View {
    /// Finds the containers and enumerates their element children as pieces.
    pub fn scan(
        window: Window,
        source: &str,
        destination: Option<&str>,
        dropdown: &str,
    ) -> Result<(View, Board, Vec<PieceSpec>), JsValue> {
        let document = window.document().ok_or("No document")?;
        let source = document
            .query_selector(source)?
            .ok_or_else(|| JsValue::from_str(&format!("No element matches {:?}", source)))?;
        let source = html(source)?;
        let mut containers = vec![(container_id(&source, "source"), source)];

        match destination.map(|sel| document.query_selector(sel)).transpose()?.flatten() {
            Some(destination) => containers.push((container_id(&destination, "destination"), html(destination)?)),
            None => debug!("No destination container; pieces stay in the source"),
        }

        let source = Container::new(containers[0].0.clone(), client_rect(&containers[0].1));
        let board = match containers.get(1) {
            Some((id, element)) => Board::paired(source, Container::new(id.clone(), client_rect(element)))
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Board::single(source),
        };

        let mut specs = Vec::new();
        let mut elements = Vec::new();
        for (container, parent) in &containers {
            let origin = client_rect(parent).origin();
            let children = parent.children();
            for i in 0..children.length() {
                let Some(child) = children.item(i) else { continue };
                let element = html(child)?;
                specs.push(View::spec(&window, &element, container, origin)?);
                elements.push(element);
            }
        }

        let dropdown = document
            .get_element_by_id(dropdown)
            .and_then(|e| e.dyn_into::<HtmlSelectElement>().ok());
        if dropdown.is_none() {
            debug!("No summary dropdown; skipping summary view");
        }

        // Ids are resolved by the controller; pair them up in `attach`.
        let pieces = elements.into_iter().map(|e| (PieceId::from(e.id().as_str()), e)).collect();
        Ok((View { window, document, containers, pieces, dropdown }, board, specs))
    }

    /// Reads a piece's classes, size and position. Position comes from the inline
    /// style, then the computed style, then where the element is laid out now
    /// (pieces placed by normal flow have `left`/`top` of `auto`).
    fn spec(
        window: &Window,
        element: &HtmlElement,
        container: &ContainerId,
        origin: R2<f64>,
    ) -> Result<PieceSpec, JsValue> {
        let id = element.id();
        let classes = element.class_name().split_whitespace().map(str::to_string).collect();
        let style = element.style();
        let computed = window.get_computed_style(element)?;
        let laid_out = client_rect(element).origin() - origin;
        let resolve = |property: &str, laid_out: f64| -> Result<f64, JsValue> {
            let inline = style.get_property_value(property)?;
            let computed = match &computed {
                Some(c) => c.get_property_value(property)?,
                None => String::new(),
            };
            Ok(resolve_px([inline.as_str(), computed.as_str()], laid_out))
        };
        Ok(PieceSpec {
            id: (!id.is_empty()).then(|| id.into()),
            classes,
            container: Some(container.clone()),
            position: R2::new(resolve("left", laid_out.x)?, resolve("top", laid_out.y)?),
            size: R2::new(element.offset_width() as f64, element.offset_height() as f64),
        })
    }

    /// Adopts the controller's ids and writes each piece's initial state.
    pub fn attach(&mut self, controller: &Controller) -> Result<(), JsValue> {
        for ((id, element), piece) in self.pieces.iter_mut().zip(controller.pieces()) {
            *id = piece.id.clone();
            element.set_id(piece.id.as_str());
            element.set_attribute("data-name", &piece.name)?;
            let style = element.style();
            style.set_property("position", "absolute")?;
            Self::render(element, piece, controller)?;
        }
        self.render_summary(controller)
    }

    fn render(element: &HtmlElement, piece: &Piece, controller: &Controller) -> Result<(), JsValue> {
        let style = element.style();
        style.set_property("left", &px(piece.position.x))?;
        style.set_property("top", &px(piece.position.y))?;
        style.set_property("transform", &piece.rotation.css())?;
        style.set_property("z-index", &piece.layer.z_index(controller.config()).to_string())?;
        element.set_attribute("data-rotation", &piece.rotation.degrees().to_string())?;
        Ok(())
    }

    fn element(&self, id: &PieceId) -> Option<&HtmlElement> {
        self.pieces.iter().find(|(p, _)| p == id).map(|(_, e)| e)
    }

    fn container(&self, id: &ContainerId) -> Option<&HtmlElement> {
        self.containers.iter().find(|(c, _)| c == id).map(|(_, e)| e)
    }

    /// Pushes live container rectangles into the controller before it handles a pointer event.
    pub fn sync_layout(&self, controller: &mut Controller) {
        for (id, element) in &self.containers {
            if let Err(e) = controller.set_container_rect(id, client_rect(element)) {
                warn!("layout sync: {}", e);
            }
        }
    }

    pub fn apply(&self, controller: &Controller, effect: &Effect) -> Result<(), JsValue> {
        let element = match effect.piece() {
            Some(id) => match self.element(id) {
                Some(element) => Some(element),
                None => {
                    warn!("No element for piece {}", id);
                    return Ok(());
                }
            },
            None => None,
        };
        match (effect, element) {
            (Effect::Select { piece, .. }, Some(element)) => {
                for (_, other) in &self.pieces {
                    other.class_list().remove_1(SELECTED_CLASS)?;
                }
                element.class_list().add_1(SELECTED_CLASS)?;
                debug!("marked {} selected", piece);
            }
            (Effect::Layer { layer, .. }, Some(element)) => {
                let z = Layer::z_index(layer, controller.config());
                element.style().set_property("z-index", &z.to_string())?;
            }
            (Effect::Move { position, .. }, Some(element)) => {
                let style = element.style();
                style.set_property("left", &px(position.x))?;
                style.set_property("top", &px(position.y))?;
            }
            (Effect::Rotate { rotation, .. }, Some(element)) => {
                element.style().set_property("transform", &rotation.css())?;
                element.set_attribute("data-rotation", &rotation.degrees().to_string())?;
            }
            (Effect::Reparent { container, position, .. }, Some(element)) => {
                let parent = self
                    .container(container)
                    .ok_or_else(|| JsValue::from_str(&format!("No element for container {}", container)))?;
                parent.append_child(element)?;
                let style = element.style();
                style.set_property("left", &px(position.x))?;
                style.set_property("top", &px(position.y))?;
            }
            (Effect::Summary, _) => self.render_summary(controller)?,
            // Handler registration is owned by the listener slot, not the view.
            (Effect::Listen | Effect::Unlisten, _) => {}
            (_, None) => {}
        }
        Ok(())
    }

    /// Rebuilds the dropdown's options from scratch.
    pub fn render_summary(&self, controller: &Controller) -> Result<(), JsValue> {
        let (Some(dropdown), Some(summary)) = (&self.dropdown, controller.summary()) else {
            return Ok(());
        };
        dropdown.set_inner_html("");
        for entry in summary.options() {
            let option = HtmlOptionElement::new_with_text_and_value(&entry.label, &entry.value)?;
            dropdown.append_child(&option)?;
        }
        dropdown.set_value(summary.value());
        Ok(())
    }

    pub fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            warn!("alert failed: {:?}", e);
        }
    }
}

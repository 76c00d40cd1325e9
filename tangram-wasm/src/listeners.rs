//! Document-level move/up handlers, live only while a drag is.

use std::{cell::RefCell, rc::Rc};

use log::{debug, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, MouseEvent};

use crate::{dispatch, pointer, App};

type Handler = Closure<dyn FnMut(MouseEvent)>;

pub(crate) struct DragListeners {
    on_move: Handler,
    on_up: Handler,
}

impl DragListeners {
    fn detach(&self, document: &Document) -> Result<(), JsValue> {
        document.remove_event_listener_with_callback("mousemove", self.on_move.as_ref().unchecked_ref())?;
        document.remove_event_listener_with_callback("mouseup", self.on_up.as_ref().unchecked_ref())?;
        Ok(())
    }
}

/// Holds the live handlers, plus the last detached pair: `mouseup` detaches
/// its own closure, which can't be freed while it is still running.
#[derive(Default)]
pub(crate) struct ListenerSlot {
    live: Option<DragListeners>,
    retired: Option<DragListeners>,
}

impl ListenerSlot {
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }
}

/// Registers move/up handlers on the document. Called on drag entry.
pub(crate) fn listen(app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let mut guard = app.borrow_mut();
    let App { view, listeners, .. } = &mut *guard;
    if let Some(stale) = listeners.live.take() {
        warn!("Drag handlers still registered at drag start; removing them");
        stale.detach(&view.document)?;
    }
    // Not running: we're inside a mousedown handler.
    listeners.retired = None;

    let weak = Rc::downgrade(app);
    let on_move = Handler::new({
        let weak = weak.clone();
        move |event: MouseEvent| {
            if let Some(app) = weak.upgrade() {
                let _ = dispatch(&app, |c| c.pointer_move(pointer(&event)));
            }
        }
    });
    let on_up = Handler::new(move |_event: MouseEvent| {
        if let Some(app) = weak.upgrade() {
            let _ = dispatch(&app, |c| c.pointer_up());
        }
    });
    view.document.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    view.document.add_event_listener_with_callback("mouseup", on_up.as_ref().unchecked_ref())?;
    listeners.live = Some(DragListeners { on_move, on_up });
    debug!("drag handlers registered");
    Ok(())
}

/// Removes the move/up handlers. Called on drag exit.
pub(crate) fn unlisten(app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let mut guard = app.borrow_mut();
    let App { view, listeners, .. } = &mut *guard;
    match listeners.live.take() {
        Some(live) => {
            live.detach(&view.document)?;
            listeners.retired = Some(live);
            debug!("drag handlers removed");
        }
        None => warn!("Drag ended with no handlers registered"),
    }
    Ok(())
}

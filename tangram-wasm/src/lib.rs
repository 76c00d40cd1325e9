//! WASM bindings for the tangram puzzle.
//!
//! [`mount`] finds the puzzle's containers and pieces in the page, hands them
//! to a [`Controller`], and wires pointer, double-click, dropdown and button
//! events to it. Controller effects are mirrored back onto the elements.

mod dom;
mod listeners;
mod options;

use std::{cell::RefCell, rc::Rc};

use log::{debug, error, info, warn};
use tangram_core::{Controller, Direction, Effect, Effects, PieceId, TangramError, R2};
use wasm_bindgen::{closure::{Closure, WasmClosure}, prelude::*, JsCast};
use wasm_bindgen_console_logger::DEFAULT_LOGGER;
use web_sys::{Event, EventTarget, HtmlSelectElement, MouseEvent};

use crate::{
    dom::View,
    listeners::{listen, unlisten, ListenerSlot},
};
pub use options::MountOptions;

/// Initializes the logging system for WASM.
///
/// Sets up console logging and panic hooks for better error reporting in the browser.
/// Should be called once at application startup.
#[wasm_bindgen]
pub fn init_logs() {
    match log::set_logger(&DEFAULT_LOGGER) {
        Ok(_) => info!("Initialized console.logger"),
        Err(e) => error!("failed to set console.logger: {}", e),
    };
    console_error_panic_hook::set_once();
}

/// Updates the log level filter.
///
/// # Arguments
/// * `level` - Log level string: "error", "warn", "info", "debug", or "trace".
///   Defaults to "info" if empty or null.
#[wasm_bindgen]
pub fn update_log_level(level: JsValue) {
    let level: Option<String> = serde_wasm_bindgen::from_value(level).unwrap_or_default();
    let level = tangram_core::parse_log_level(level.as_deref());
    log::set_max_level(level);
}

pub(crate) struct App {
    controller: Controller,
    view: View,
    listeners: ListenerSlot,
}

pub(crate) fn pointer(event: &MouseEvent) -> R2<f64> {
    R2::new(event.client_x() as f64, event.client_y() as f64)
}

/// Runs one controller operation and mirrors its effects onto the page.
///
/// No-selection errors become a blocking alert; anything else is logged.
pub(crate) fn dispatch<F>(app: &Rc<RefCell<App>>, op: F) -> Result<(), TangramError>
where
    F: FnOnce(&mut Controller) -> Result<Effects, TangramError>,
{
    let result = {
        let mut guard = app.borrow_mut();
        let App { controller, view, .. } = &mut *guard;
        view.sync_layout(controller);
        op(controller)
    };
    match result {
        Ok(effects) => {
            apply(app, effects);
            Ok(())
        }
        Err(e) if e.is_notice() => {
            app.borrow().view.alert(&e.to_string());
            Err(e)
        }
        Err(e) => {
            warn!("{}", e);
            Err(e)
        }
    }
}

fn apply(app: &Rc<RefCell<App>>, effects: Effects) {
    for effect in effects {
        let result = match effect {
            Effect::Listen => listen(app),
            Effect::Unlisten => unlisten(app),
            effect => {
                let guard = app.borrow();
                guard.view.apply(&guard.controller, &effect)
            }
        };
        if let Err(e) = result {
            error!("Failed to apply effect: {:?}", e);
        }
    }
}

/// Attaches `closure` for `event` on `target` for the life of the page.
fn on<T: ?Sized + WasmClosure>(target: &EventTarget, event: &str, closure: Closure<T>) -> Result<(), JsValue> {
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

type MouseHandler = Closure<dyn FnMut(MouseEvent)>;

/// Handle to a mounted puzzle.
#[wasm_bindgen]
pub struct Tangram {
    app: Rc<RefCell<App>>,
}

/// Mounts the puzzle onto the current page.
///
/// # Arguments
/// * `options` - Optional [`MountOptions`]; omitted fields take their defaults.
///
/// # Returns
/// A [`Tangram`] handle, or throws if the source container is missing.
#[wasm_bindgen]
pub fn mount(options: JsValue) -> Result<Tangram, JsValue> {
    let options: MountOptions = if options.is_undefined() || options.is_null() {
        MountOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };
    let window = web_sys::window().ok_or("No window")?;
    let (mut view, board, specs) = View::scan(
        window,
        &options.source,
        options.destination.as_deref(),
        &options.dropdown,
    )?;
    let controller = Controller::new(options.config.clone(), board, specs, view.dropdown.is_some())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    view.attach(&controller)?;

    let app = Rc::new(RefCell::new(App { controller, view, listeners: ListenerSlot::default() }));
    register(&app, &options)?;
    info!("Mounted tangram with {} pieces", app.borrow().controller.pieces().len());
    Ok(Tangram { app })
}

fn register(app: &Rc<RefCell<App>>, options: &MountOptions) -> Result<(), JsValue> {
    let guard = app.borrow();
    let view = &guard.view;

    for (id, element) in &view.pieces {
        let (down_app, down_id) = (app.clone(), id.clone());
        on(element, "mousedown", MouseHandler::new(move |event: MouseEvent| {
            event.prevent_default();
            let _ = dispatch(&down_app, |c| c.pointer_down(&down_id, pointer(&event)));
        }))?;
        let (dbl_app, dbl_id) = (app.clone(), id.clone());
        on(element, "dblclick", MouseHandler::new(move |event: MouseEvent| {
            event.stop_propagation();
            let _ = dispatch(&dbl_app, |c| c.double_click(&dbl_id));
        }))?;
    }

    if let Some(dropdown) = &view.dropdown {
        let change_app = app.clone();
        let on_change = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(select) = event.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok()) else {
                return;
            };
            let _ = dispatch(&change_app, |c| c.choose_entry(&select.value()));
        });
        on(dropdown, "change", on_change)?;
    }

    match view.document.get_element_by_id(&options.rotate_button) {
        Some(button) => {
            let rotate_app = app.clone();
            on(&button, "click", MouseHandler::new(move |_: MouseEvent| {
                let _ = dispatch(&rotate_app, |c| c.rotate_selected());
            }))?;
        }
        None => debug!("No #{} button", options.rotate_button),
    }

    for direction in Direction::ALL {
        let id = options.nudge_button(direction);
        match view.document.get_element_by_id(id) {
            Some(button) => {
                let nudge_app = app.clone();
                on(&button, "click", MouseHandler::new(move |_: MouseEvent| {
                    let _ = dispatch(&nudge_app, |c| c.nudge_selected(direction));
                }))?;
            }
            None => debug!("No #{} button", id),
        }
    }
    Ok(())
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn notice(result: Result<(), TangramError>) -> Result<(), JsValue> {
    result.map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
impl Tangram {
    /// Rotates the selected piece by the configured step.
    #[wasm_bindgen(js_name = rotateSelected)]
    pub fn rotate_selected(&self) -> Result<(), JsValue> {
        notice(dispatch(&self.app, |c| c.rotate_selected()))
    }

    /// Moves the selected piece one step: "left", "right", "up" or "down".
    #[wasm_bindgen(js_name = nudgeSelected)]
    pub fn nudge_selected(&self, direction: &str) -> Result<(), JsValue> {
        let direction = direction.parse::<Direction>().map_err(|e| JsValue::from_str(&format!("{}", e)))?;
        notice(dispatch(&self.app, |c| c.nudge_selected(direction)))
    }

    /// Selects a piece by id, as if chosen from the dropdown.
    pub fn select(&self, id: &str) -> Result<(), JsValue> {
        notice(dispatch(&self.app, |c| c.select_piece(&PieceId::from(id))))
    }

    /// Current summary view (`null` when there is no dropdown).
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        to_js(&self.app.borrow().controller.summary())
    }

    /// Current state of every piece, in enumeration order.
    pub fn pieces(&self) -> Result<JsValue, JsValue> {
        to_js(&self.app.borrow().controller.pieces())
    }

    /// Whether a drag is in progress (document handlers registered).
    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        let app = self.app.borrow();
        app.controller.drag().is_dragging() && app.listeners.is_live()
    }
}

//! DOM helpers for the browser build

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlCanvasElement, Window};

use super::PlatformError;
use crate::session::Hud;

pub const CANVAS_ID: &str = "game-canvas";
pub const SCORE_ID: &str = "score";
pub const HEALTH_ID: &str = "health";
pub const START_BUTTON_ID: &str = "start-btn";
pub const RESTART_BUTTON_ID: &str = "restart-btn";
pub const GAME_OVER_RESTART_ID: &str = "restart-btn-2";
pub const START_SCREEN_ID: &str = "start-screen";
pub const GAME_OVER_ID: &str = "game-over";
pub const FINAL_SCORE_ID: &str = "final-score";
pub const TUNING_ATTR: &str = "data-tuning";

const HIDDEN_CLASS: &str = "hidden";

/// Stringify a thrown JS value
pub fn js_error(value: JsValue) -> PlatformError {
    PlatformError::Js(format!("{value:?}"))
}

pub fn window() -> Result<Window, PlatformError> {
    web_sys::window().ok_or(PlatformError::NoWindow)
}

pub fn document() -> Result<Document, PlatformError> {
    window()?.document().ok_or(PlatformError::NoDocument)
}

/// Look up an element that must exist
pub fn by_id(document: &Document, id: &str) -> Result<Element, PlatformError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PlatformError::MissingElement(id.to_string()))
}

/// Milliseconds on the page's monotonic clock
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_default()
}

pub fn canvas(document: &Document) -> Result<HtmlCanvasElement, PlatformError> {
    by_id(document, CANVAS_ID)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| PlatformError::WrongElementType(CANVAS_ID.to_string()))
}

/// Toggle the `hidden` class; missing elements are skipped
pub fn set_visible(document: &Document, id: &str, visible: bool) {
    let Some(el) = document.get_element_by_id(id) else {
        log::warn!("element #{id} not found");
        return;
    };
    let classes = el.class_list();
    let result = if visible {
        classes.remove_1(HIDDEN_CLASS)
    } else {
        classes.add_1(HIDDEN_CLASS)
    };
    if let Err(e) = result {
        log::warn!("failed to toggle #{id}: {e:?}");
    }
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// Write score and health into the HUD
pub fn update_hud(document: &Document, hud: &Hud) {
    set_text(document, SCORE_ID, &hud.score_text());
    set_text(document, HEALTH_ID, &hud.health_text());
}

/// Hide both overlays when a run begins
pub fn show_running(document: &Document) {
    set_visible(document, START_SCREEN_ID, false);
    set_visible(document, GAME_OVER_ID, false);
}

/// Show the game-over panel with the final score
pub fn show_game_over(document: &Document, hud: &Hud) {
    set_visible(document, GAME_OVER_ID, true);
    set_text(document, FINAL_SCORE_ID, &hud.score_text());
    set_visible(document, RESTART_BUTTON_ID, true);
}

/// Raw `data-tuning` JSON from the canvas, if any
pub fn tuning_attr(canvas: &HtmlCanvasElement) -> Option<String> {
    canvas.get_attribute(TUNING_ATTR)
}

//! Small DOM utilities shared by the task components.

use common::model::task::TaskState;
use js_sys::Date;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

/// Displays a temporary notification at the bottom of the screen.
///
/// The toast removes itself after three seconds.
pub fn show_toast(message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };

    toast.set_text_content(Some(message));
    let html_toast: HtmlElement = toast.unchecked_into();
    let style = html_toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();
    style.set_property("font-family", "Arial, sans-serif").ok();

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(3000).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}

/// Local date and time of a millisecond timestamp; `-` for records without one.
pub fn format_timestamp(millis: u64) -> String {
    if millis == 0 {
        return "-".to_string();
    }
    let date = Date::new(&JsValue::from_f64(millis as f64));
    date.to_locale_string("es-ES", &JsValue::UNDEFINED).into()
}

/// Spanish label of a task state.
pub fn status_label(state: TaskState) -> &'static str {
    match state {
        TaskState::Pending => "En cola",
        TaskState::Fetching => "Obteniendo datos",
        TaskState::Processing => "Procesando",
        TaskState::Done => "Completada",
        TaskState::Error => "Error",
    }
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

use crate::model::{ViewportSize, WindowId};

pub(super) fn viewport_size() -> Option<ViewportSize> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window()?;
        let w = window.inner_width().ok()?.as_f64()? as i32;
        let h = window.inner_height().ok()?.as_f64()? as i32;
        Some(ViewportSize { w, h })
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Focuses the first `autofocus` field of a freshly mounted window body.
pub(super) fn focus_window_input(window_id: WindowId) {
    focus_first(&format!(r#"[data-window-id="{}"] [autofocus]"#, window_id.0));
}

/// Focuses the first element matching `selector` once the current event settles.
pub(super) fn focus_first(selector: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Ok(Some(element)) = document.query_selector(selector) else {
            return;
        };
        let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() else {
            return;
        };
        let callback = Closure::once_into_js(move || {
            let _ = element.focus();
        });
        let _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = selector;
}

/// Reloads the page.
pub(super) fn reload_page() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }
}

/// Shows a blocking browser alert.
pub(super) fn show_alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

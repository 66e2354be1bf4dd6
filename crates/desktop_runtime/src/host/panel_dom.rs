//! DOM glue between window bodies and panel handler tables.
//!
//! Events are read from the nearest `[data-panel]` ancestor of the event target. Patches are
//! resolved with selectors scoped to `[data-window-id]`, so one window can never touch another
//! window's elements even when both render the same panel names.

use desktop_app_contract::{PanelEvent, PanelPatch, PointerPhase};
#[cfg(target_arch = "wasm32")]
use leptos::logging;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};

use crate::model::WindowId;

/// DOM event families forwarded from a window body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEventKind {
    Input,
    KeyDown,
    KeyUp,
    Click,
    PointerDown,
    PointerMove,
    PointerUp,
    /// `pointerout`; bubbles, unlike `pointerleave`.
    PointerOut,
}

impl DomEventKind {
    fn pointer_phase(self) -> Option<PointerPhase> {
        match self {
            Self::PointerDown => Some(PointerPhase::Down),
            Self::PointerMove => Some(PointerPhase::Move),
            Self::PointerUp => Some(PointerPhase::Up),
            Self::PointerOut => Some(PointerPhase::Leave),
            Self::Input | Self::KeyDown | Self::KeyUp | Self::Click => None,
        }
    }
}

/// Converts a UTF-16 offset (as reported by `selectionStart`) into a character offset.
pub fn utf16_to_char_offset(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (index, ch) in text.chars().enumerate() {
        if units >= utf16_offset {
            return index;
        }
        units += ch.len_utf16();
    }
    text.chars().count()
}

fn panel_selector(window_id: WindowId, target: &str) -> String {
    format!(
        r#"[data-window-id="{}"] [data-panel="{}"]"#,
        window_id.0,
        target.replace('"', "")
    )
}

/// Builds the panel event for a DOM event raised inside a window body.
///
/// Returns `None` when the event did not originate inside a `[data-panel]` element.
pub fn panel_event_from_dom(kind: DomEventKind, event: &web_sys::Event) -> Option<PanelEvent> {
    #[cfg(target_arch = "wasm32")]
    {
        let origin = event.target()?.dyn_into::<web_sys::Element>().ok()?;
        let element = origin.closest("[data-panel]").ok()??;
        let target = element.get_attribute("data-panel")?;

        if let Some(phase) = kind.pointer_phase() {
            let mouse = event.dyn_ref::<web_sys::MouseEvent>()?;
            return Some(PanelEvent::Pointer {
                target,
                phase,
                x: f64::from(mouse.offset_x()),
                y: f64::from(mouse.offset_y()),
            });
        }

        match kind {
            DomEventKind::KeyDown => {
                let key = event.dyn_ref::<web_sys::KeyboardEvent>()?.key();
                let value = field_state(&element).map(|(value, _)| value).unwrap_or_default();
                Some(PanelEvent::KeyDown { target, key, value })
            }
            DomEventKind::Input | DomEventKind::KeyUp => {
                let (value, caret) = field_state(&element)?;
                Some(PanelEvent::Input {
                    target,
                    value,
                    caret,
                })
            }
            // Clicking into a text field moves the caret, so it reports like an edit.
            _ => match field_state(&element) {
                Some((value, caret)) => Some(PanelEvent::Input {
                    target,
                    value,
                    caret,
                }),
                None => Some(PanelEvent::Click {
                    target,
                    value: element.get_attribute("data-value"),
                }),
            },
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (kind.pointer_phase(), event);
        None
    }
}

#[cfg(target_arch = "wasm32")]
fn field_state(element: &web_sys::Element) -> Option<(String, usize)> {
    let (value, start) = if let Some(area) = element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        (area.value(), area.selection_start().ok().flatten())
    } else if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
        (input.value(), input.selection_start().ok().flatten())
    } else {
        return None;
    };
    let caret = match start {
        Some(units) => utf16_to_char_offset(&value, units as usize),
        None => value.chars().count(),
    };
    Some((value, caret))
}

pub(super) fn apply_patch(window_id: WindowId, patch: &PanelPatch) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Err(err) = try_apply_patch(window_id, patch) {
            logging::warn!("panel patch failed in window {}: {err:?}", window_id.0);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    let _ = (panel_selector(window_id, ""), patch);
}

#[cfg(target_arch = "wasm32")]
fn document() -> Result<web_sys::Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("document unavailable"))
}

#[cfg(target_arch = "wasm32")]
fn find(window_id: WindowId, target: &str) -> Result<web_sys::Element, JsValue> {
    document()?
        .query_selector(&panel_selector(window_id, target))?
        .ok_or_else(|| JsValue::from_str(&format!("no panel target `{target}`")))
}

#[cfg(target_arch = "wasm32")]
fn canvas_context(
    window_id: WindowId,
    target: &str,
) -> Result<(web_sys::HtmlCanvasElement, web_sys::CanvasRenderingContext2d), JsValue> {
    let canvas = find(window_id, target)?.dyn_into::<web_sys::HtmlCanvasElement>()?;
    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()?;
    Ok((canvas, context))
}

#[cfg(target_arch = "wasm32")]
fn try_apply_patch(window_id: WindowId, patch: &PanelPatch) -> Result<(), JsValue> {
    match patch {
        PanelPatch::SetText { target, text } => {
            find(window_id, target)?.set_text_content(Some(text));
        }
        PanelPatch::SetValue { target, value } => {
            let element = find(window_id, target)?;
            if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
                input.set_value(value);
            } else if let Some(area) = element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
                area.set_value(value);
            } else {
                element.set_text_content(Some(value));
            }
        }
        PanelPatch::SetHtml { target, html } => {
            find(window_id, target)?.set_inner_html(html);
        }
        PanelPatch::AppendHtml { target, html } => {
            find(window_id, target)?.insert_adjacent_html("beforeend", html)?;
        }
        PanelPatch::MarkSelected { group, value } => {
            let members = document()?.query_selector_all(&panel_selector(window_id, group))?;
            for index in 0..members.length() {
                let Some(element) = members
                    .item(index)
                    .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
                else {
                    continue;
                };
                let selected = element.get_attribute("data-value").as_deref() == Some(value);
                element
                    .class_list()
                    .toggle_with_force("selected", selected)?;
            }
        }
        PanelPatch::ScrollToEnd { target } => {
            let element = find(window_id, target)?;
            element.set_scroll_top(element.scroll_height());
        }
        PanelPatch::StrokeLine {
            target,
            from,
            to,
            color,
            width,
        } => {
            let (_, context) = canvas_context(window_id, target)?;
            context.begin_path();
            context.set_stroke_style(&JsValue::from_str(color));
            context.set_line_width(*width);
            context.set_line_cap("round");
            context.move_to(from.0, from.1);
            context.line_to(to.0, to.1);
            context.stroke();
        }
        PanelPatch::ClearCanvas { target } => {
            let (canvas, context) = canvas_context(window_id, target)?;
            context.clear_rect(
                0.0,
                0.0,
                f64::from(canvas.width()),
                f64::from(canvas.height()),
            );
        }
        PanelPatch::DownloadCanvas { target, file_name } => {
            let (canvas, _) = canvas_context(window_id, target)?;
            let data_url = canvas.to_data_url()?;
            let anchor = document()?
                .create_element("a")?
                .dyn_into::<web_sys::HtmlAnchorElement>()?;
            anchor.set_download(file_name);
            anchor.set_href(&data_url);
            anchor.click();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn utf16_offsets_map_to_character_offsets() {
        assert_eq!(utf16_to_char_offset("abc", 2), 2);
        assert_eq!(utf16_to_char_offset("a😀b", 3), 2);
        assert_eq!(utf16_to_char_offset("a😀b", 99), 3);
        assert_eq!(utf16_to_char_offset("", 0), 0);
    }

    #[test]
    fn selectors_are_scoped_to_the_owning_window() {
        assert_eq!(
            panel_selector(WindowId(4), "calc-display"),
            r#"[data-window-id="4"] [data-panel="calc-display"]"#
        );
        assert_eq!(
            panel_selector(WindowId(4), r#"x"]"#),
            r#"[data-window-id="4"] [data-panel="x]"]"#
        );
    }

    #[test]
    fn pointer_kinds_map_to_phases() {
        assert_eq!(
            DomEventKind::PointerOut.pointer_phase(),
            Some(PointerPhase::Leave)
        );
        assert_eq!(DomEventKind::Click.pointer_phase(), None);
    }
}

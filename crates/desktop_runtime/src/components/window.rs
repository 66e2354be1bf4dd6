use leptos::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use super::{pointer_from_mouse_event, stop_mouse_event, use_desktop_runtime};
use crate::{
    host::{panel_event_from_dom, DomEventKind},
    model::{WindowId, WindowRecord, WindowRegion},
    reducer::DesktopAction,
};

const TITLE_BAR_HEIGHT_PX: i32 = 36;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn window_class(win: &WindowRecord) -> String {
    let mut class = String::from("window");
    for (flag, name) in [
        (win.is_focused, " focused"),
        (win.is_minimized(), " minimized"),
        (win.maximized, " maximized"),
        (win.is_closing(), " closing"),
    ] {
        if flag {
            class.push_str(name);
        }
    }
    class
}

fn window_style(win: &WindowRecord) -> String {
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
        win.rect.x, win.rect.y, win.rect.w, win.rect.h, win.z_index
    )
}

fn content_height(win: &WindowRecord) -> i32 {
    (win.rect.h - TITLE_BAR_HEIGHT_PX).max(0)
}

/// Window frame. The frame tracks the record reactively; the body is rendered once so panel DOM
/// state survives focus and geometry changes.
#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let window = Signal::derive(move || runtime.state.get().window(window_id).cloned());
    let title = window
        .get_untracked()
        .map(|win| win.title)
        .unwrap_or_default();
    let app_id = window
        .get_untracked()
        .map(|win| win.app_id.to_string())
        .unwrap_or_default();

    let press = move |region: WindowRegion, ev: &web_sys::PointerEvent| {
        runtime.dispatch_action(DesktopAction::PointerDown {
            window_id,
            region,
            pointer: pointer_from_mouse_event(ev),
        });
    };

    view! {
        <div
            class=move || window.get().map(|win| window_class(&win)).unwrap_or_default()
            style=move || window.get().map(|win| window_style(&win)).unwrap_or_default()
            data-window-id=window_id.0
            data-app=app_id
            role="dialog"
            aria-label=title.clone()
            on:pointerdown=move |ev: web_sys::PointerEvent| press(WindowRegion::Body, &ev)
        >
            <div
                class="window-titlebar"
                on:pointerdown=move |ev: web_sys::PointerEvent| {
                    if ev.button() != 0 {
                        return;
                    }
                    ev.prevent_default();
                    ev.stop_propagation();
                    try_set_pointer_capture(&ev);
                    press(WindowRegion::TitleBar, &ev);
                }
            >
                <span class="window-title">{title}</span>
                <div
                    class="window-controls"
                    on:pointerdown=move |ev: web_sys::PointerEvent| {
                        ev.stop_propagation();
                        press(WindowRegion::Controls, &ev);
                    }
                >
                    <button
                        class="win-ctrl minimize"
                        aria-label="Minimize window"
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::MinimizeWindow { window_id });
                        }
                    >
                        "─"
                    </button>
                    <button
                        class="win-ctrl maximize"
                        aria-label=move || {
                            if window.get().is_some_and(|win| win.maximized) {
                                "Restore window"
                            } else {
                                "Maximize window"
                            }
                        }
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::ToggleMaximize { window_id });
                        }
                    >
                        "□"
                    </button>
                    <button
                        class="win-ctrl close"
                        aria-label="Close window"
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::CloseWindow { window_id });
                        }
                    >
                        "✕"
                    </button>
                </div>
            </div>
            <WindowBody
                window_id
                height=Signal::derive(move || {
                    window.get().map(|win| content_height(&win)).unwrap_or_default()
                })
            />
        </div>
    }
}

#[component]
fn WindowBody(window_id: WindowId, height: Signal<i32>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let body = runtime.panel_body(window_id).unwrap_or_default();

    let forward = move |kind: DomEventKind, ev: &web_sys::Event| {
        if let Some(event) = panel_event_from_dom(kind, ev) {
            runtime.send_panel_event(window_id, event);
        }
    };

    view! {
        <div
            class="window-content"
            style=move || format!("height:{}px;", height.get())
            inner_html=body
            on:input=move |ev: web_sys::Event| forward(DomEventKind::Input, &ev)
            on:keydown=move |ev: web_sys::KeyboardEvent| forward(DomEventKind::KeyDown, &ev)
            on:keyup=move |ev: web_sys::KeyboardEvent| forward(DomEventKind::KeyUp, &ev)
            on:click=move |ev: web_sys::MouseEvent| forward(DomEventKind::Click, &ev)
            on:pointerdown=move |ev: web_sys::PointerEvent| forward(DomEventKind::PointerDown, &ev)
            on:pointermove=move |ev: web_sys::PointerEvent| forward(DomEventKind::PointerMove, &ev)
            on:pointerup=move |ev: web_sys::PointerEvent| forward(DomEventKind::PointerUp, &ev)
            on:pointerout=move |ev: web_sys::PointerEvent| forward(DomEventKind::PointerOut, &ev)
        />
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::ApplicationId;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{TaskId, WindowPhase, WindowRect, WindowVisibility};

    fn record() -> WindowRecord {
        WindowRecord {
            id: WindowId(3),
            app_id: ApplicationId::new("notepad"),
            title: "📝 Notepad".to_string(),
            rect: WindowRect {
                x: 140,
                y: 100,
                w: 600,
                h: 450,
            },
            restore_rect: None,
            z_index: 104,
            is_focused: true,
            visibility: WindowVisibility::Visible,
            maximized: false,
            phase: WindowPhase::Open,
            pending_mount: None,
        }
    }

    #[test]
    fn frame_classes_follow_window_state() {
        let mut win = record();
        assert_eq!(window_class(&win), "window focused");

        win.is_focused = false;
        win.visibility = WindowVisibility::Minimized;
        win.maximized = true;
        win.phase = WindowPhase::Closing {
            removal: TaskId(9),
        };
        assert_eq!(window_class(&win), "window minimized maximized closing");
    }

    #[test]
    fn frame_geometry_leaves_room_for_the_title_bar() {
        let win = record();
        assert_eq!(
            window_style(&win),
            "left:140px;top:100px;width:600px;height:450px;z-index:104;"
        );
        assert_eq!(content_height(&win), 414);
    }
}

//! Desktop shell UI composition and interaction surfaces.

mod menus;
mod taskbar;
mod window;

use leptos::*;

use self::{
    menus::{DesktopContextMenu, StartMenu},
    taskbar::Taskbar,
    window::DesktopWindow,
};
use crate::{
    apps::{self, DesktopShortcut},
    model::{PointerPosition, WindowId},
    reducer::DesktopAction,
    wallpaper,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

const ICON_LEFT_PX: i32 = 20;
const ICON_TOP_PX: i32 = 20;
const ICON_ROW_STEP_PX: i32 = 95;

fn desktop_icon_style(index: usize) -> String {
    let top = ICON_TOP_PX + (index as i32) * ICON_ROW_STEP_PX;
    format!("left:{ICON_LEFT_PX}px;top:{top}px;")
}

/// Global keyboard handling: Escape dismisses overlays, and Meta or Ctrl+Escape toggles the
/// start menu.
fn shortcut_actions(key: &str, ctrl: bool) -> Vec<DesktopAction> {
    let mut actions = Vec::new();
    if key == "Escape" {
        actions.push(DesktopAction::DismissOverlays);
    }
    if key == "Meta" || (ctrl && key == "Escape") {
        actions.push(DesktopAction::ToggleStartMenu);
    }
    actions
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_mouse_event(ev: &web_sys::MouseEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

#[component]
/// Renders the full desktop shell: wallpaper, icons, windows, menus, and taskbar.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let keyboard_listener = window_event_listener(ev::keydown, move |ev| {
        for action in shortcut_actions(&ev.key(), ev.ctrl_key()) {
            runtime.dispatch_action(action);
        }
    });
    on_cleanup(move || keyboard_listener.remove());

    let resize_listener = window_event_listener(ev::resize, move |_| {
        if let Some(viewport) = runtime.host.with_value(|host| host.viewport_size()) {
            runtime.dispatch_action(DesktopAction::ResizeViewport { viewport });
        }
    });
    on_cleanup(move || resize_listener.remove());

    // The context menu stops its own clicks, so anything reaching the window is outside it.
    let outside_click_listener = window_event_listener(ev::click, move |_| {
        if state.get_untracked().context_menu.is_some() {
            runtime.dispatch_action(DesktopAction::CloseContextMenu);
        }
    });
    on_cleanup(move || outside_click_listener.remove());

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        if runtime.interaction.get_untracked().dragging.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateMove {
                pointer: pointer_from_mouse_event(&ev),
            });
        }
    };
    let on_pointer_end = move |_: web_sys::PointerEvent| {
        if runtime.interaction.get_untracked().dragging.is_some() {
            runtime.dispatch_action(DesktopAction::EndMove);
        }
    };

    let shell_class = move || {
        if state.get().shutting_down {
            "desktop-shell shutting-down"
        } else {
            "desktop-shell"
        }
    };
    let wallpaper_style = move || {
        let preset = wallpaper::wallpaper_preset(state.get().wallpaper_index);
        format!("background:{};", preset.background)
    };

    view! {
        <Show
            when=move || !state.get().powered_off
            fallback=|| view! { <div class="goodbye-screen">"Goodbye! 👋"</div> }
        >
            <div
                id="desktop-shell-root"
                class=shell_class
                on:pointermove=on_pointer_move
                on:pointerup=on_pointer_end
                on:pointercancel=on_pointer_end
            >
                <div
                    id="desktop"
                    class="desktop-surface"
                    style=wallpaper_style
                    on:click=move |ev: web_sys::MouseEvent| {
                        if ev.target() == ev.current_target() {
                            runtime.dispatch_action(DesktopAction::DismissOverlays);
                        }
                    }
                    on:contextmenu=move |ev: web_sys::MouseEvent| {
                        stop_mouse_event(&ev);
                        runtime.dispatch_action(DesktopAction::OpenContextMenu {
                            pointer: pointer_from_mouse_event(&ev),
                        });
                    }
                >
                    {apps::desktop_shortcuts()
                        .iter()
                        .enumerate()
                        .map(|(index, shortcut)| view! { <DesktopIcon index shortcut=*shortcut /> })
                        .collect_view()}

                    <For
                        each=move || {
                            state
                                .get()
                                .registry
                                .iter()
                                .map(|win| win.id)
                                .collect::<Vec<WindowId>>()
                        }
                        key=|window_id| window_id.0
                        let:window_id
                    >
                        <DesktopWindow window_id=window_id />
                    </For>
                </div>

                <StartMenu />
                <DesktopContextMenu />
                <Taskbar />
            </div>
        </Show>
    }
}

#[component]
fn DesktopIcon(index: usize, shortcut: DesktopShortcut) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let target = shortcut.app_id;

    view! {
        <div
            class="desktop-icon"
            style=desktop_icon_style(index)
            on:dblclick=move |_| {
                if let Some(app_id) = target {
                    runtime.launch_app(desktop_app_contract::ApplicationId::new(app_id));
                }
            }
        >
            <div class="icon">{shortcut.icon}</div>
            <div class="label">{shortcut.label}</div>
        </div>
    }
}

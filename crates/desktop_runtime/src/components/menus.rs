use leptos::*;

use super::{stop_mouse_event, use_desktop_runtime, DesktopRuntimeContext};
use crate::{
    apps::{self, AppDescriptor},
    reducer::DesktopAction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContextCommand {
    Refresh,
    NewFolder,
    NewFile,
    ChangeWallpaper,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContextEntry {
    Item {
        icon: &'static str,
        label: &'static str,
        command: ContextCommand,
    },
    Divider,
}

const CONTEXT_MENU_ENTRIES: [ContextEntry; 7] = [
    ContextEntry::Item {
        icon: "🔄",
        label: "Refresh",
        command: ContextCommand::Refresh,
    },
    ContextEntry::Divider,
    ContextEntry::Item {
        icon: "📁",
        label: "New Folder",
        command: ContextCommand::NewFolder,
    },
    ContextEntry::Item {
        icon: "📄",
        label: "New File",
        command: ContextCommand::NewFile,
    },
    ContextEntry::Divider,
    ContextEntry::Item {
        icon: "🖼️",
        label: "Change Wallpaper",
        command: ContextCommand::ChangeWallpaper,
    },
    ContextEntry::Item {
        icon: "⚙️",
        label: "Settings",
        command: ContextCommand::Settings,
    },
];

fn run_context_command(runtime: DesktopRuntimeContext, command: ContextCommand) {
    match command {
        ContextCommand::Refresh => runtime.host.with_value(|host| host.reload_page()),
        ContextCommand::NewFolder => {
            runtime
                .host
                .with_value(|host| host.show_alert("Folder created!"));
        }
        ContextCommand::NewFile => {
            runtime.launch_app(desktop_app_contract::ApplicationId::new("notepad"));
        }
        ContextCommand::ChangeWallpaper => runtime.dispatch_action(DesktopAction::CycleWallpaper),
        ContextCommand::Settings => {
            runtime.launch_app(desktop_app_contract::ApplicationId::new("settings"));
        }
    }
}

/// Start-menu entries whose name contains `query`, ignoring case. A blank query keeps them all.
fn filter_start_menu(query: &str) -> Vec<AppDescriptor> {
    let needle = query.trim().to_lowercase();
    apps::app_catalog()
        .iter()
        .copied()
        .filter(|app| needle.is_empty() || app.name.to_lowercase().contains(&needle))
        .collect()
}

#[component]
pub(super) fn StartMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let query = create_rw_signal(String::new());

    view! {
        <Show when=move || runtime.state.get().start_menu_open fallback=|| ()>
            <div
                id="start-menu"
                class="start-menu open"
                role="menu"
                aria-label="Start menu"
                on:click=move |ev| ev.stop_propagation()
            >
                <input
                    class="start-search"
                    type="text"
                    placeholder="Search apps"
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
                <div id="pinned-apps" class="pinned-apps">
                    <For
                        each=move || filter_start_menu(&query.get())
                        key=|app| app.app_id
                        let:app
                    >
                        {{
                            let app_id = app.application_id();
                            view! {
                                <button
                                    class="app-btn"
                                    role="menuitem"
                                    on:click=move |ev| {
                                        stop_mouse_event(&ev);
                                        runtime.launch_app(app_id.clone());
                                        runtime.dispatch_action(DesktopAction::CloseStartMenu);
                                    }
                                >
                                    <span class="icon">{app.icon}</span>
                                    <span class="label">{app.name}</span>
                                </button>
                            }
                        }}
                    </For>
                </div>
                <div class="start-footer">
                    <button
                        class="power-btn"
                        aria-label="Shut down"
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::Shutdown);
                        }
                    >
                        "⏻"
                    </button>
                </div>
            </div>
        </Show>
    }
}

#[component]
pub(super) fn DesktopContextMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();

    view! {
        <Show when=move || runtime.state.get().context_menu.is_some() fallback=|| ()>
            {move || {
                let Some(position) = runtime.state.get().context_menu else {
                    return ().into_view();
                };
                view! {
                    <div
                        id="context-menu"
                        class="context-menu"
                        role="menu"
                        aria-label="Desktop context menu"
                        style=format!("left:{}px;top:{}px;display:block;", position.x, position.y)
                        on:click=move |ev| ev.stop_propagation()
                        on:contextmenu=move |ev| stop_mouse_event(&ev)
                    >
                        {CONTEXT_MENU_ENTRIES
                            .iter()
                            .map(|entry| match *entry {
                                ContextEntry::Divider => {
                                    view! { <div class="ctx-divider" role="separator"></div> }
                                        .into_view()
                                }
                                ContextEntry::Item {
                                    icon,
                                    label,
                                    command,
                                } => view! {
                                    <div
                                        class="ctx-item"
                                        role="menuitem"
                                        on:click=move |ev| {
                                            stop_mouse_event(&ev);
                                            run_context_command(runtime, command);
                                            runtime.dispatch_action(DesktopAction::CloseContextMenu);
                                        }
                                    >
                                        <span>{icon}</span>
                                        <span>{label}</span>
                                    </div>
                                }
                                .into_view(),
                            })
                            .collect_view()}
                    </div>
                }
                .into_view()
            }}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ids(entries: Vec<AppDescriptor>) -> Vec<&'static str> {
        entries.into_iter().map(|app| app.app_id).collect()
    }

    #[test]
    fn blank_search_lists_every_app() {
        assert_eq!(filter_start_menu("  ").len(), 12);
    }

    #[test]
    fn search_matches_names_case_insensitively() {
        assert_eq!(ids(filter_start_menu("NOTE")), vec!["notepad"]);
        assert_eq!(ids(filter_start_menu("s")).len(), 7);
        assert!(filter_start_menu("zzz").is_empty());
    }

    #[test]
    fn context_menu_groups_entries_with_dividers() {
        let labels: Vec<&str> = CONTEXT_MENU_ENTRIES
            .iter()
            .map(|entry| match entry {
                ContextEntry::Item { label, .. } => *label,
                ContextEntry::Divider => "---",
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                "Refresh",
                "---",
                "New Folder",
                "New File",
                "---",
                "Change Wallpaper",
                "Settings"
            ]
        );
    }
}

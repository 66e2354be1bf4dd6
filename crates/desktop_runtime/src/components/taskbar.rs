use std::time::Duration;

use leptos::*;

use super::use_desktop_runtime;
use crate::{apps, reducer::DesktopAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TaskbarClockSnapshot {
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
}

impl TaskbarClockSnapshot {
    fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            Self {
                year: date.get_full_year(),
                month: date.get_month() + 1,
                day: date.get_date(),
                hour: date.get_hours(),
                minute: date.get_minutes(),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                year: 1970,
                month: 1,
                day: 1,
                hour: 0,
                minute: 0,
            }
        }
    }

    /// 24-hour `HH:MM`.
    fn time_label(self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }

    /// Day-first `DD.MM.YYYY`.
    fn date_label(self) -> String {
        format!("{:02}.{:02}.{:04}", self.day, self.month, self.year)
    }
}

fn taskbar_button_class(active: bool) -> &'static str {
    if active {
        "taskbar-btn active"
    } else {
        "taskbar-btn"
    }
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let clock_now = create_rw_signal(TaskbarClockSnapshot::now());

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(TaskbarClockSnapshot::now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    view! {
        <div id="taskbar" class="taskbar" role="toolbar" aria-label="Taskbar">
            <button
                class="taskbar-btn start-btn"
                aria-label="Start"
                on:click=move |_| runtime.dispatch_action(DesktopAction::ToggleStartMenu)
            >
                "⊞"
            </button>
            <button
                class="taskbar-btn"
                aria-label="Search"
                on:click=move |_| {
                    runtime.dispatch_action(DesktopAction::ToggleStartMenu);
                    runtime.host.with_value(|host| host.focus_element(".start-search"));
                }
            >
                "🔍"
            </button>
            {apps::taskbar_apps()
                .into_iter()
                .map(|app| {
                    let app_id = app.application_id();
                    let indicator_id = app_id.clone();
                    view! {
                        <button
                            id=format!("taskbar-{}", app.app_id)
                            class=move || {
                                taskbar_button_class(
                                    runtime.indicators.with(|lit| lit.contains(&indicator_id)),
                                )
                            }
                            title=app.name
                            on:click=move |_| runtime.launch_app(app_id.clone())
                        >
                            {app.icon}
                        </button>
                    }
                })
                .collect_view()}
            <div id="clock" class="taskbar-clock">
                <span>{move || clock_now.get().time_label()}</span>
                <br />
                <span>{move || clock_now.get().date_label()}</span>
            </div>
        </div>
    }
}

//! Runtime-effect dispatch for the desktop host boundary.

use leptos::SignalUpdate;

use crate::{
    host::{host_ui, timers, DesktopHostContext},
    reducer::RuntimeEffect,
    runtime_context::DesktopRuntimeContext,
};

pub(super) fn run_runtime_effect(
    host: DesktopHostContext,
    runtime: DesktopRuntimeContext,
    effect: RuntimeEffect,
) {
    match effect {
        RuntimeEffect::TaskbarIndicator { app_id, active } => {
            runtime.indicators.update(|lit| {
                if active {
                    lit.insert(app_id);
                } else {
                    lit.remove(&app_id);
                }
            });
        }
        RuntimeEffect::ScheduleTask { task_id, delay_ms } => {
            timers::schedule(&host, runtime, task_id, delay_ms);
        }
        RuntimeEffect::CancelTask { task_id } => timers::cancel(&host, task_id),
        RuntimeEffect::MountPanel { window_id } => host_ui::focus_window_input(window_id),
        // The window view unmounts with its body; nothing is left to release on the host.
        RuntimeEffect::ReleasePanel { .. } => {}
    }
}

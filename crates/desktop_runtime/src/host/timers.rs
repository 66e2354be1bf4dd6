//! One-shot timers backing reducer-scheduled tasks.

use std::time::Duration;

use leptos::{logging, set_timeout_with_handle};

use crate::{
    host::DesktopHostContext, model::TaskId, reducer::DesktopAction,
    runtime_context::DesktopRuntimeContext,
};

pub(super) fn schedule(
    host: &DesktopHostContext,
    runtime: DesktopRuntimeContext,
    task_id: TaskId,
    delay_ms: u32,
) {
    let timers = host.timers.clone();
    let fired = move || {
        timers.borrow_mut().remove(&task_id);
        runtime.dispatch_action(DesktopAction::TaskElapsed { task_id });
    };
    match set_timeout_with_handle(fired, Duration::from_millis(u64::from(delay_ms))) {
        Ok(handle) => {
            host.timers.borrow_mut().insert(task_id, handle);
        }
        Err(err) => logging::warn!("failed to arm timer for task {}: {err:?}", task_id.0),
    }
}

pub(super) fn cancel(host: &DesktopHostContext, task_id: TaskId) {
    if let Some(handle) = host.timers.borrow_mut().remove(&task_id) {
        handle.clear();
    }
}

//! Host-side runtime helpers for executing reducer effects and querying browser environment state.
//!
//! Reducer semantics never touch the DOM or the timer queue. This module owns both: it arms and
//! clears timers for scheduled tasks, applies panel patches inside the owning window, and answers
//! viewport queries.

mod effects;
mod host_ui;
mod panel_dom;
mod timers;

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use desktop_app_contract::PanelPatch;
use leptos::leptos_dom::helpers::TimeoutHandle;

pub use panel_dom::{panel_event_from_dom, utf16_to_char_offset, DomEventKind};

use crate::{
    model::{TaskId, ViewportSize, WindowId},
    reducer::RuntimeEffect,
    runtime_context::DesktopRuntimeContext,
};

#[derive(Clone, Default)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    timers: Rc<RefCell<HashMap<TaskId, TimeoutHandle>>>,
}

impl DesktopHostContext {
    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        effects::run_runtime_effect(self.clone(), runtime, effect);
    }

    /// Applies panel patches inside the body of `window_id`.
    pub fn apply_panel_patches(&self, window_id: WindowId, patches: &[PanelPatch]) {
        for patch in patches {
            panel_dom::apply_patch(window_id, patch);
        }
    }

    /// Current browser viewport, or `None` outside a browser.
    pub fn viewport_size(&self) -> Option<ViewportSize> {
        host_ui::viewport_size()
    }

    /// Focuses the first element matching a CSS selector.
    pub fn focus_element(&self, selector: &str) {
        host_ui::focus_first(selector);
    }

    /// Reloads the hosting page.
    pub fn reload_page(&self) {
        host_ui::reload_page();
    }

    /// Shows a blocking notice to the user.
    pub fn show_alert(&self, message: &str) {
        host_ui::show_alert(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelling_an_unarmed_task_leaves_no_timer_behind() {
        let host = DesktopHostContext::default();
        timers::cancel(&host, TaskId(7));
        assert!(host.timers.borrow().is_empty());
    }
}

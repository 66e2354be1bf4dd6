//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived [`DesktopRuntime`] container, mirrors its state into reactive
//! signals, and queues reducer-emitted effects for the host. UI composition stays in
//! [`crate::components`].
#![allow(clippy::clone_on_copy)]

use std::collections::BTreeSet;

use desktop_app_contract::{ApplicationId, PanelEvent};
use leptos::*;

use crate::{
    app_runtime::DesktopRuntime,
    config::DesktopConfig,
    effect_executor,
    host::DesktopHostContext,
    model::{DesktopState, InteractionState, WindowId},
    reducer::{DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host services for timers, DOM patching, and environment queries.
    pub host: StoredValue<DesktopHostContext>,
    /// Authoritative launcher/reducer container.
    pub runtime: StoredValue<DesktopRuntime>,
    /// Reactive desktop state mirror.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer/drag interaction mirror.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and processed by the host.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Apps whose taskbar indicator is lit.
    pub indicators: RwSignal<BTreeSet<ApplicationId>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
    /// App launch callback.
    pub launch: Callback<ApplicationId>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Launches (or brings forward) an app.
    pub fn launch_app(&self, app_id: ApplicationId) {
        self.launch.call(app_id);
    }

    /// Routes a DOM event from a window body to that window's panel handlers and applies the
    /// resulting patches.
    pub fn send_panel_event(&self, window_id: WindowId, event: PanelEvent) {
        let patches = self
            .runtime
            .try_update_value(|runtime| runtime.handle_panel_event(window_id, &event))
            .unwrap_or_default();
        if !patches.is_empty() {
            self.host
                .with_value(|host| host.apply_panel_patches(window_id, &patches));
        }
    }

    /// Body markup of a window's panel.
    pub fn panel_body(&self, window_id: WindowId) -> Option<String> {
        self.runtime.with_value(|runtime| {
            runtime
                .panel(window_id)
                .map(|panel| panel.body().to_string())
        })
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// Window-manager configuration assembled by the entry layer.
    #[prop(optional)]
    config: DesktopConfig,
    children: Children,
) -> impl IntoView {
    let host = store_value(DesktopHostContext::default());
    let mut initial = DesktopRuntime::new(config);
    let viewport = host.with_value(|host| host.viewport_size());
    if let Some(viewport) = viewport {
        initial.dispatch(DesktopAction::ResizeViewport { viewport });
    }
    let state = create_rw_signal(initial.state().clone());
    let interaction = create_rw_signal(initial.interaction().clone());
    let runtime = store_value(initial);
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let indicators = create_rw_signal(BTreeSet::<ApplicationId>::new());

    let publish = move |new_effects: Vec<RuntimeEffect>| {
        let (desktop, ui) = runtime.with_value(|runtime| {
            (runtime.state().clone(), runtime.interaction().clone())
        });
        if desktop != state.get_untracked() {
            state.set(desktop);
        }
        if ui != interaction.get_untracked() {
            interaction.set(ui);
        }
        if !new_effects.is_empty() {
            effects.update(|queue| queue.extend(new_effects));
        }
    };

    let dispatch = Callback::new(move |action: DesktopAction| {
        let new_effects = runtime
            .try_update_value(|runtime| runtime.dispatch(action))
            .unwrap_or_default();
        publish(new_effects);
    });

    let launch = Callback::new(move |app_id: ApplicationId| {
        let new_effects = runtime
            .try_update_value(|runtime| runtime.launch(&app_id))
            .unwrap_or_default();
        publish(new_effects);
    });

    let context = DesktopRuntimeContext {
        host,
        runtime,
        state,
        interaction,
        effects,
        indicators,
        dispatch,
        launch,
    };

    provide_context(context.clone());
    effect_executor::install(context);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}

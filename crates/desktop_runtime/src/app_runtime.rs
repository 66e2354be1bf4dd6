//! Launcher and per-window panel sessions layered over the desktop reducer.
//!
//! [`DesktopRuntime`] is the single owner of [`DesktopState`]. It turns launch requests into
//! reducer actions, keeps the body markup and handler table of every live window, and routes panel
//! events to the handler table of the window they came from. It has no DOM or timer access: the
//! host arms timers for the returned [`RuntimeEffect::ScheduleTask`] values and applies returned
//! [`PanelPatch`] values.

use std::collections::HashMap;

use desktop_app_contract::{
    ApplicationId, LaunchContext, MountHook, PanelEvent, PanelHandlers, PanelPatch,
};
use leptos::logging;

use crate::{
    apps::ContentProviderRegistry,
    config::DesktopConfig,
    model::{DesktopState, InteractionState, OpenWindowRequest, WindowId},
    reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect},
};

/// Body markup and handler table owned by one window.
pub struct PanelSession {
    body: String,
    on_mount: Option<MountHook>,
    handlers: PanelHandlers,
    mounted: bool,
}

impl PanelSession {
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn mount(&mut self) {
        if self.mounted {
            return;
        }
        if let Some(hook) = self.on_mount.take() {
            hook(&mut self.handlers);
        }
        self.mounted = true;
    }
}

pub struct DesktopRuntime {
    state: DesktopState,
    interaction: InteractionState,
    providers: ContentProviderRegistry,
    sessions: HashMap<WindowId, PanelSession>,
}

impl Default for DesktopRuntime {
    fn default() -> Self {
        Self::new(DesktopConfig::default())
    }
}

impl DesktopRuntime {
    /// Runtime with the built-in app panels.
    pub fn new(config: DesktopConfig) -> Self {
        Self::with_providers(config, ContentProviderRegistry::with_builtin_apps())
    }

    pub fn with_providers(config: DesktopConfig, providers: ContentProviderRegistry) -> Self {
        Self {
            state: DesktopState::new(config),
            interaction: InteractionState::default(),
            providers,
            sessions: HashMap::new(),
        }
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn panel(&self, window_id: WindowId) -> Option<&PanelSession> {
        self.sessions.get(&window_id)
    }

    pub fn panel_count(&self) -> usize {
        self.sessions.len()
    }

    /// Shows the window for `app_id`, creating it if none is registered.
    ///
    /// A registered window is un-hidden, pulled out of a pending close, and focused. Otherwise
    /// the app's content provider (or the placeholder) describes a new window.
    pub fn launch(&mut self, app_id: &ApplicationId) -> Vec<RuntimeEffect> {
        if self.state.shutting_down || self.state.powered_off {
            return Vec::new();
        }
        if self.state.is_open(app_id) {
            return self.dispatch(DesktopAction::ActivateApp {
                app_id: app_id.clone(),
            });
        }

        let context = LaunchContext {
            app_id: app_id.clone(),
            viewport_width: self.state.viewport.w,
            viewport_height: self.state.viewport.h,
        };
        let descriptor = self.providers.describe(&context);
        let mut request = OpenWindowRequest::new(app_id.clone());
        request.title = descriptor.title;
        request.width = descriptor.width;
        request.height = descriptor.height;
        request.deferred_mount = descriptor.on_mount.is_some();

        let effects = self.dispatch(DesktopAction::OpenWindow(request));
        if let Some(window) = self.state.registry.get(app_id) {
            self.sessions.insert(
                window.id,
                PanelSession {
                    body: descriptor.body,
                    on_mount: descriptor.on_mount,
                    handlers: PanelHandlers::new(),
                    mounted: false,
                },
            );
        }
        effects
    }

    /// Applies `action`, logging reducer errors instead of returning them.
    pub fn dispatch(&mut self, action: DesktopAction) -> Vec<RuntimeEffect> {
        match self.try_dispatch(action) {
            Ok(effects) => effects,
            Err(err) => {
                logging::warn!("desktop reducer error: {err}");
                Vec::new()
            }
        }
    }

    /// Applies `action` and runs the panel effects it produced.
    ///
    /// # Errors
    ///
    /// Propagates [`ReducerError`] from [`reduce_desktop`]; state is left unchanged on error.
    pub fn try_dispatch(
        &mut self,
        action: DesktopAction,
    ) -> Result<Vec<RuntimeEffect>, ReducerError> {
        let mut next = self.state.clone();
        let mut interaction = self.interaction.clone();
        let effects = reduce_desktop(&mut next, &mut interaction, action)?;
        self.state = next;
        self.interaction = interaction;

        for effect in &effects {
            match effect {
                RuntimeEffect::MountPanel { window_id } => {
                    if let Some(session) = self.sessions.get_mut(window_id) {
                        session.mount();
                    }
                }
                RuntimeEffect::ReleasePanel { window_id } => {
                    self.sessions.remove(window_id);
                }
                RuntimeEffect::TaskbarIndicator { .. }
                | RuntimeEffect::ScheduleTask { .. }
                | RuntimeEffect::CancelTask { .. } => {}
            }
        }
        Ok(effects)
    }

    /// Routes a panel event to the handler table of `window_id`.
    ///
    /// Handler failures stay inside the panel: they are logged and produce no patches.
    pub fn handle_panel_event(&mut self, window_id: WindowId, event: &PanelEvent) -> Vec<PanelPatch> {
        let Some(session) = self.sessions.get_mut(&window_id) else {
            return Vec::new();
        };
        match session.handlers.dispatch(event) {
            Ok(patches) => patches,
            Err(err) => {
                logging::warn!("panel error in window {}: {err}", window_id.0);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{ContentDescriptor, ContentProvider, PanelError};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::TaskId;

    fn app(id: &str) -> ApplicationId {
        ApplicationId::new(id)
    }

    fn scheduled(effects: &[RuntimeEffect]) -> Vec<(TaskId, u32)> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                RuntimeEffect::ScheduleTask { task_id, delay_ms } => Some((*task_id, *delay_ms)),
                _ => None,
            })
            .collect()
    }

    struct Failing;

    impl ContentProvider for Failing {
        fn describe(&self, _context: &LaunchContext) -> ContentDescriptor {
            ContentDescriptor::new("Failing", 300, 200, r#"<button data-panel="boom"></button>"#)
                .with_mount(|handlers| {
                    handlers.on("boom", |_| Err(PanelError::handler("boom", "always fails")));
                })
        }
    }

    #[test]
    fn launch_creates_session_and_mounts_after_delay() {
        let mut runtime = DesktopRuntime::default();

        let effects = runtime.launch(&app("notepad"));
        let window_id = runtime.state().focused_window_id().expect("focused");
        let session = runtime.panel(window_id).expect("session");
        assert!(session.body().contains("notepad-text"));
        assert!(!session.is_mounted());

        let [(mount_task, 50)] = scheduled(&effects)[..] else {
            panic!("one mount task with the configured delay");
        };
        let before = runtime.handle_panel_event(
            window_id,
            &PanelEvent::Input {
                target: "notepad-text".to_string(),
                value: "ab".to_string(),
                caret: 2,
            },
        );
        assert!(before.is_empty());

        runtime.dispatch(DesktopAction::TaskElapsed {
            task_id: mount_task,
        });
        assert!(runtime.panel(window_id).expect("session").is_mounted());
        let patches = runtime.handle_panel_event(
            window_id,
            &PanelEvent::Input {
                target: "notepad-text".to_string(),
                value: "ab\ncd".to_string(),
                caret: 4,
            },
        );
        assert_eq!(
            patches,
            vec![PanelPatch::SetText {
                target: "notepad-status".to_string(),
                text: "Ln 2, Col 2".to_string(),
            }]
        );
    }

    #[test]
    fn relaunch_reuses_window_and_session() {
        let mut runtime = DesktopRuntime::default();
        runtime.launch(&app("calc"));
        runtime.launch(&app("terminal"));
        let effects = runtime.launch(&app("calc"));

        assert!(effects.is_empty());
        assert_eq!(runtime.state().registry.len(), 2);
        assert_eq!(runtime.panel_count(), 2);
        let focused = runtime.state().focused_window_id().expect("focused");
        assert_eq!(
            runtime.state().window(focused).map(|w| w.app_id.clone()),
            Some(app("calc"))
        );
    }

    #[test]
    fn static_panels_schedule_no_mount() {
        let mut runtime = DesktopRuntime::default();
        let effects = runtime.launch(&app("settings"));
        assert!(scheduled(&effects).is_empty());
        assert_eq!(
            effects,
            vec![RuntimeEffect::TaskbarIndicator {
                app_id: app("settings"),
                active: true,
            }]
        );
    }

    #[test]
    fn removal_releases_panel_session() {
        let mut runtime = DesktopRuntime::default();
        runtime.launch(&app("terminal"));
        let window_id = runtime.state().focused_window_id().expect("focused");

        let effects = runtime.dispatch(DesktopAction::CloseWindow { window_id });
        let [(removal, 150)] = scheduled(&effects)[..] else {
            panic!("one removal task");
        };
        assert!(runtime.panel(window_id).is_some());

        runtime.dispatch(DesktopAction::TaskElapsed { task_id: removal });
        assert!(runtime.panel(window_id).is_none());
        assert!(!runtime.state().is_open(&app("terminal")));
    }

    #[test]
    fn handler_errors_are_contained() {
        let mut providers = ContentProviderRegistry::empty();
        providers.register(app("broken"), Failing);
        let mut runtime = DesktopRuntime::with_providers(DesktopConfig::default(), providers);

        let effects = runtime.launch(&app("broken"));
        let window_id = runtime.state().focused_window_id().expect("focused");
        for (task_id, _) in scheduled(&effects) {
            runtime.dispatch(DesktopAction::TaskElapsed { task_id });
        }

        let patches = runtime.handle_panel_event(
            window_id,
            &PanelEvent::Click {
                target: "boom".to_string(),
                value: None,
            },
        );
        assert!(patches.is_empty());
        assert!(runtime.state().is_open(&app("broken")));
    }

    #[test]
    fn reducer_errors_leave_state_untouched() {
        let mut runtime = DesktopRuntime::default();
        runtime.launch(&app("files"));
        let before = runtime.state().clone();

        assert_eq!(
            runtime.try_dispatch(DesktopAction::MinimizeWindow {
                window_id: WindowId(77),
            }),
            Err(ReducerError::WindowNotFound)
        );
        assert!(runtime
            .dispatch(DesktopAction::CloseWindow {
                window_id: WindowId(77),
            })
            .is_empty());
        assert_eq!(runtime.state(), &before);
    }

    #[test]
    fn launches_are_ignored_after_shutdown() {
        let mut runtime = DesktopRuntime::default();
        runtime.dispatch(DesktopAction::Shutdown);
        assert!(runtime.launch(&app("paint")).is_empty());
        assert!(runtime.state().registry.is_empty());
    }
}

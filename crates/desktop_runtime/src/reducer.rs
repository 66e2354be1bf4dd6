//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use desktop_app_contract::ApplicationId;
use thiserror::Error;

use crate::{
    model::{
        DesktopState, DragSession, InteractionState, OpenWindowRequest, PointerPosition,
        ScheduledTask, TaskId, ViewportSize, WindowId, WindowPhase, WindowRecord, WindowRect,
        WindowRegion, WindowVisibility,
    },
    registry::RegistryError,
    wallpaper::next_wallpaper_index,
    window_manager::{bring_to_front, cascade_position, drag_position, toggle_maximize},
};

const CONTEXT_MENU_WIDTH: i32 = 220;
const CONTEXT_MENU_HEIGHT: i32 = 190;
const CONTEXT_MENU_BOTTOM_GAP: i32 = 60;

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Create a window for the request, or focus the one already registered for its app.
    OpenWindow(OpenWindowRequest),
    /// Show and focus the registered window for an app, cancelling a pending close.
    ActivateApp {
        /// App whose window should come forward.
        app_id: ApplicationId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Pointer pressed somewhere on a window frame.
    PointerDown {
        /// Window under the pointer.
        window_id: WindowId,
        /// Frame region that received the press.
        region: WindowRegion,
        /// Pointer position at press time.
        pointer: PointerPosition,
    },
    /// Begin dragging a window.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window drag.
    EndMove,
    /// Hide a window without unregistering it.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Flip a window between its saved bounds and the desktop area.
    ToggleMaximize {
        /// Window to maximize or restore.
        window_id: WindowId,
    },
    /// Start the close transition for a window.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// A timer armed for a [`RuntimeEffect::ScheduleTask`] fired.
    TaskElapsed {
        /// Task whose delay elapsed.
        task_id: TaskId,
    },
    /// The host viewport changed size.
    ResizeViewport {
        /// New viewport dimensions.
        viewport: ViewportSize,
    },
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu if open.
    CloseStartMenu,
    /// Show the desktop context menu near the pointer.
    OpenContextMenu {
        /// Pointer position of the secondary click.
        pointer: PointerPosition,
    },
    /// Hide the desktop context menu if shown.
    CloseContextMenu,
    /// Close the start menu and the context menu.
    DismissOverlays,
    /// Advance to the next wallpaper preset.
    CycleWallpaper,
    /// Fade the shell out and power off.
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Light or clear the taskbar indicator for an app.
    TaskbarIndicator {
        /// App whose indicator changes.
        app_id: ApplicationId,
        /// Whether the app now has a live window.
        active: bool,
    },
    /// Arm a one-shot timer and dispatch [`DesktopAction::TaskElapsed`] when it fires.
    ScheduleTask {
        /// Task to report back.
        task_id: TaskId,
        /// Delay before the task elapses.
        delay_ms: u32,
    },
    /// Disarm the timer for a task that no longer applies.
    CancelTask {
        /// Task to cancel.
        task_id: TaskId,
    },
    /// Run the window's panel initializer.
    MountPanel {
        /// Window whose panel is ready.
        window_id: WindowId,
    },
    /// Drop the window's panel session and handlers.
    ReleasePanel {
        /// Window that was removed.
        window_id: WindowId,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions (for example, referencing a missing window).
pub enum ReducerError {
    /// The target window id was not found in the current state.
    #[error("window not found")]
    WindowNotFound,
    /// The registry refused the new window.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// This function is the authoritative state transition engine for window management. Timers are
/// never armed here: delayed work is recorded in [`DesktopState::pending_tasks`] and announced
/// through [`RuntimeEffect::ScheduleTask`].
///
/// # Errors
///
/// Returns [`ReducerError::WindowNotFound`] when an action references a window that is not present.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow(req) => {
            state.start_menu_open = false;
            if let Some(existing) = state.registry.get(&req.app_id).map(|w| w.id) {
                bring_to_front(state, existing);
                return Ok(effects);
            }

            let window_id = next_window_id(state);
            let (x, y) = cascade_position(&state.config, state.registry.len());
            state.registry.register(WindowRecord {
                id: window_id,
                app_id: req.app_id.clone(),
                title: req.title,
                rect: WindowRect {
                    x,
                    y,
                    w: req.width,
                    h: req.height,
                },
                restore_rect: None,
                z_index: 0,
                is_focused: false,
                visibility: WindowVisibility::Visible,
                maximized: false,
                phase: WindowPhase::Open,
                pending_mount: None,
            })?;
            bring_to_front(state, window_id);
            effects.push(RuntimeEffect::TaskbarIndicator {
                app_id: req.app_id,
                active: true,
            });

            if req.deferred_mount {
                let delay_ms = state.config.mount_delay_ms;
                let task_id = schedule_task(
                    state,
                    ScheduledTask::MountPanel { window_id },
                    delay_ms,
                    &mut effects,
                );
                find_window_mut(state, window_id)?.pending_mount = Some(task_id);
            }
        }
        DesktopAction::ActivateApp { app_id } => {
            let (window_id, phase) = state
                .registry
                .get(&app_id)
                .map(|w| (w.id, w.phase))
                .ok_or(ReducerError::WindowNotFound)?;
            if let WindowPhase::Closing { removal } = phase {
                cancel_task(state, removal, &mut effects);
            }
            let window = find_window_mut(state, window_id)?;
            window.phase = WindowPhase::Open;
            window.visibility = WindowVisibility::Visible;
            bring_to_front(state, window_id);
            state.start_menu_open = false;
        }
        DesktopAction::FocusWindow { window_id } => {
            if !bring_to_front(state, window_id) {
                return Err(ReducerError::WindowNotFound);
            }
        }
        DesktopAction::PointerDown {
            window_id,
            region,
            pointer,
        } => match region {
            WindowRegion::TitleBar => {
                return reduce_desktop(
                    state,
                    interaction,
                    DesktopAction::BeginMove { window_id, pointer },
                );
            }
            WindowRegion::Controls | WindowRegion::Body => {
                if !bring_to_front(state, window_id) {
                    return Err(ReducerError::WindowNotFound);
                }
            }
        },
        DesktopAction::BeginMove { window_id, pointer } => {
            let rect_start = find_window_mut(state, window_id)?.rect;
            bring_to_front(state, window_id);
            let already_dragging = interaction
                .dragging
                .as_ref()
                .is_some_and(|session| session.window_id == window_id);
            if !already_dragging {
                interaction.dragging = Some(DragSession {
                    window_id,
                    pointer_start: pointer,
                    rect_start,
                });
            }
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(session) = interaction.dragging.clone() {
                match state.registry.by_id_mut(session.window_id) {
                    Some(window) => {
                        let (x, y) = drag_position(&session, pointer);
                        window.rect.x = x;
                        window.rect.y = y;
                    }
                    None => interaction.dragging = None,
                }
            }
        }
        DesktopAction::EndMove => {
            interaction.dragging = None;
        }
        DesktopAction::MinimizeWindow { window_id } => {
            find_window_mut(state, window_id)?.visibility = WindowVisibility::Minimized;
        }
        DesktopAction::ToggleMaximize { window_id } => {
            let desktop_area = state.desktop_area();
            toggle_maximize(find_window_mut(state, window_id)?, desktop_area);
        }
        DesktopAction::CloseWindow { window_id } => {
            if find_window_mut(state, window_id)?.is_closing() {
                return Ok(effects);
            }
            let delay_ms = state.config.close_transition_ms;
            let removal = schedule_task(
                state,
                ScheduledTask::FinishClose { window_id },
                delay_ms,
                &mut effects,
            );
            find_window_mut(state, window_id)?.phase = WindowPhase::Closing { removal };
        }
        DesktopAction::TaskElapsed { task_id } => {
            let Some(task) = state.pending_tasks.remove(&task_id) else {
                return Ok(effects);
            };
            match task {
                ScheduledTask::FinishClose { window_id } => {
                    remove_window(state, interaction, window_id, &mut effects);
                }
                ScheduledTask::MountPanel { window_id } => {
                    if let Some(window) = state.registry.by_id_mut(window_id) {
                        if window.pending_mount == Some(task_id) {
                            window.pending_mount = None;
                            effects.push(RuntimeEffect::MountPanel { window_id });
                        }
                    }
                }
                ScheduledTask::PowerOff => {
                    state.powered_off = true;
                }
            }
        }
        DesktopAction::ResizeViewport { viewport } => {
            state.viewport = viewport;
            let desktop_area = state.desktop_area();
            for window in state.registry.iter_mut().filter(|w| w.maximized) {
                window.rect = desktop_area;
            }
        }
        DesktopAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
        }
        DesktopAction::CloseStartMenu => {
            state.start_menu_open = false;
        }
        DesktopAction::OpenContextMenu { pointer } => {
            state.context_menu = Some(PointerPosition {
                x: pointer.x.min(state.viewport.w - CONTEXT_MENU_WIDTH).max(0),
                y: pointer
                    .y
                    .min(state.viewport.h - CONTEXT_MENU_HEIGHT - CONTEXT_MENU_BOTTOM_GAP)
                    .max(0),
            });
        }
        DesktopAction::CloseContextMenu => {
            state.context_menu = None;
        }
        DesktopAction::DismissOverlays => {
            state.start_menu_open = false;
            state.context_menu = None;
        }
        DesktopAction::CycleWallpaper => {
            state.wallpaper_index = next_wallpaper_index(state.wallpaper_index);
        }
        DesktopAction::Shutdown => {
            if state.shutting_down || state.powered_off {
                return Ok(effects);
            }
            state.shutting_down = true;
            state.start_menu_open = false;
            state.context_menu = None;
            let delay_ms = state.config.shutdown_fade_ms;
            schedule_task(state, ScheduledTask::PowerOff, delay_ms, &mut effects);
        }
    }

    Ok(effects)
}

fn next_window_id(state: &mut DesktopState) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    id
}

fn find_window_mut(
    state: &mut DesktopState,
    window_id: WindowId,
) -> Result<&mut WindowRecord, ReducerError> {
    state
        .registry
        .by_id_mut(window_id)
        .ok_or(ReducerError::WindowNotFound)
}

fn schedule_task(
    state: &mut DesktopState,
    task: ScheduledTask,
    delay_ms: u32,
    effects: &mut Vec<RuntimeEffect>,
) -> TaskId {
    let task_id = TaskId(state.next_task_id);
    state.next_task_id = state.next_task_id.saturating_add(1);
    state.pending_tasks.insert(task_id, task);
    effects.push(RuntimeEffect::ScheduleTask { task_id, delay_ms });
    task_id
}

fn cancel_task(state: &mut DesktopState, task_id: TaskId, effects: &mut Vec<RuntimeEffect>) {
    if state.pending_tasks.remove(&task_id).is_some() {
        effects.push(RuntimeEffect::CancelTask { task_id });
    }
}

fn remove_window(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    window_id: WindowId,
    effects: &mut Vec<RuntimeEffect>,
) {
    let Some(app_id) = state.window(window_id).map(|w| w.app_id.clone()) else {
        return;
    };
    let Some(record) = state.registry.remove(&app_id) else {
        return;
    };
    if let Some(mount_task) = record.pending_mount {
        cancel_task(state, mount_task, effects);
    }
    if interaction
        .dragging
        .as_ref()
        .is_some_and(|session| session.window_id == window_id)
    {
        interaction.dragging = None;
    }
    effects.push(RuntimeEffect::TaskbarIndicator {
        app_id,
        active: false,
    });
    effects.push(RuntimeEffect::ReleasePanel { window_id });
}

use std::collections::{BTreeMap, BTreeSet};

use desktop_app_contract::ApplicationId;
use serde::{Deserialize, Serialize};

use crate::{config::DesktopConfig, registry::WindowRegistry, window_manager::StackingOrder};

pub const DEFAULT_WINDOW_WIDTH: i32 = 400;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            w: DEFAULT_WINDOW_WIDTH,
            h: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub w: i32,
    pub h: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowVisibility {
    #[default]
    Visible,
    Minimized,
}

/// Close progress of a window. A closing window stays registered until its removal task fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowPhase {
    #[default]
    Open,
    Closing {
        removal: TaskId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: ApplicationId,
    pub title: String,
    pub rect: WindowRect,
    pub restore_rect: Option<WindowRect>,
    pub z_index: u64,
    pub is_focused: bool,
    pub visibility: WindowVisibility,
    pub maximized: bool,
    pub phase: WindowPhase,
    pub pending_mount: Option<TaskId>,
}

impl WindowRecord {
    pub fn is_minimized(&self) -> bool {
        self.visibility == WindowVisibility::Minimized
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.phase, WindowPhase::Closing { .. })
    }
}

/// Deferred work owned by a window. Hosts arm a timer per task and report back when it elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledTask {
    /// Remove a closing window once its exit transition has played.
    FinishClose { window_id: WindowId },
    /// Run the panel initializer once the window body is in the document.
    MountPanel { window_id: WindowId },
    /// Replace the shell with the goodbye screen after the shutdown fade.
    PowerOff,
}

impl ScheduledTask {
    pub fn window_id(self) -> Option<WindowId> {
        match self {
            Self::FinishClose { window_id } | Self::MountPanel { window_id } => Some(window_id),
            Self::PowerOff => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    pub config: DesktopConfig,
    pub registry: WindowRegistry,
    pub stacking: StackingOrder,
    pub next_window_id: u64,
    pub next_task_id: u64,
    pub pending_tasks: BTreeMap<TaskId, ScheduledTask>,
    pub viewport: ViewportSize,
    pub start_menu_open: bool,
    pub context_menu: Option<PointerPosition>,
    pub wallpaper_index: usize,
    pub shutting_down: bool,
    pub powered_off: bool,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::new(DesktopConfig::default())
    }
}

impl DesktopState {
    pub fn new(config: DesktopConfig) -> Self {
        Self {
            registry: WindowRegistry::default(),
            stacking: StackingOrder::new(config.z_index_base),
            next_window_id: 1,
            next_task_id: 1,
            pending_tasks: BTreeMap::new(),
            viewport: ViewportSize {
                w: config.default_viewport_width,
                h: config.default_viewport_height,
            },
            start_menu_open: false,
            context_menu: None,
            wallpaper_index: 0,
            shutting_down: false,
            powered_off: false,
            config,
        }
    }

    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.registry
            .iter()
            .find(|w| w.is_focused)
            .map(|w| w.id)
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.registry.iter().find(|w| w.id == window_id)
    }

    pub fn is_open(&self, app_id: &ApplicationId) -> bool {
        self.registry.get(app_id).is_some()
    }

    /// Identifiers with a live window, including windows still playing their close transition.
    pub fn open_applications(&self) -> BTreeSet<ApplicationId> {
        self.registry.iter().map(|w| w.app_id.clone()).collect()
    }

    /// Area a maximized window fills: the viewport minus the taskbar reserve.
    pub fn desktop_area(&self) -> WindowRect {
        WindowRect {
            x: 0,
            y: 0,
            w: self.viewport.w,
            h: (self.viewport.h - self.config.taskbar_height).max(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub app_id: ApplicationId,
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub deferred_mount: bool,
}

impl OpenWindowRequest {
    pub fn new(app_id: ApplicationId) -> Self {
        Self {
            title: app_id.to_string(),
            app_id,
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            deferred_mount: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

/// Part of a window frame that received a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowRegion {
    /// Draggable title-bar handle.
    TitleBar,
    /// Minimize/maximize/close button cluster.
    Controls,
    /// Window content.
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
}

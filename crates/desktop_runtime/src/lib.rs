pub mod app_runtime;
pub mod apps;
pub mod components;
pub mod config;
mod effect_executor;
pub mod host;
pub mod model;
pub mod reducer;
pub mod registry;
mod runtime_context;
pub mod wallpaper;
pub mod window_manager;

pub use app_runtime::{DesktopRuntime, PanelSession};
pub use apps::ContentProviderRegistry;
pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::{ConfigError, DesktopConfig};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use registry::{RegistryError, WindowRegistry};

//! App catalog, desktop shortcuts, and content-provider dispatch.

mod paint;
mod placeholders;

use std::{collections::BTreeMap, rc::Rc};

use desktop_app_calculator::CalculatorProvider;
use desktop_app_contract::{ApplicationId, ContentDescriptor, ContentProvider, LaunchContext};
use desktop_app_notepad::NotepadProvider;
use desktop_app_terminal::TerminalProvider;

pub use paint::PaintProvider;
pub use placeholders::{
    AboutProvider, BrowserProvider, ComingSoonProvider, FilesProvider, SettingsProvider,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppDescriptor {
    pub app_id: &'static str,
    pub icon: &'static str,
    pub name: &'static str,
}

impl AppDescriptor {
    pub fn application_id(&self) -> ApplicationId {
        ApplicationId::new(self.app_id)
    }
}

const fn app(app_id: &'static str, icon: &'static str, name: &'static str) -> AppDescriptor {
    AppDescriptor { app_id, icon, name }
}

const APP_CATALOG: [AppDescriptor; 12] = [
    app("files", "📁", "Files"),
    app("notepad", "📝", "Notepad"),
    app("terminal", "🖥️", "Terminal"),
    app("settings", "⚙️", "Settings"),
    app("paint", "🎨", "Paint"),
    app("calc", "🧮", "Calculator"),
    app("browser", "🌐", "Browser"),
    app("photos", "🖼️", "Photos"),
    app("music", "🎵", "Music"),
    app("games", "🎮", "Games"),
    app("store", "🛒", "Store"),
    app("about", "ℹ️", "About"),
];

/// Apps pinned to the taskbar, in button order. The start menu lists the whole catalog.
const TASKBAR_ORDER: [&str; 5] = ["files", "browser", "notepad", "terminal", "settings"];

/// Desktop icon. Shortcuts without a target app render but do nothing when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopShortcut {
    pub icon: &'static str,
    pub label: &'static str,
    pub app_id: Option<&'static str>,
}

const DESKTOP_SHORTCUTS: [DesktopShortcut; 6] = [
    DesktopShortcut {
        icon: "💻",
        label: "This PC",
        app_id: Some("files"),
    },
    DesktopShortcut {
        icon: "📁",
        label: "Documents",
        app_id: Some("files"),
    },
    DesktopShortcut {
        icon: "🗑️",
        label: "Recycle Bin",
        app_id: None,
    },
    DesktopShortcut {
        icon: "⚙️",
        label: "Settings",
        app_id: Some("settings"),
    },
    DesktopShortcut {
        icon: "📝",
        label: "Notepad",
        app_id: Some("notepad"),
    },
    DesktopShortcut {
        icon: "🎨",
        label: "Paint",
        app_id: Some("paint"),
    },
];

pub fn app_catalog() -> &'static [AppDescriptor] {
    &APP_CATALOG
}

pub fn app_descriptor(app_id: &ApplicationId) -> Option<&'static AppDescriptor> {
    app_catalog()
        .iter()
        .find(|entry| entry.app_id == app_id.as_str())
}

pub fn taskbar_apps() -> Vec<AppDescriptor> {
    TASKBAR_ORDER
        .iter()
        .filter_map(|id| app_catalog().iter().find(|entry| entry.app_id == *id))
        .copied()
        .collect()
}

pub fn desktop_shortcuts() -> &'static [DesktopShortcut] {
    &DESKTOP_SHORTCUTS
}

/// Maps application identifiers to their content providers.
///
/// Identifiers without a registered provider resolve to the fallback, so describing content never
/// fails.
#[derive(Clone)]
pub struct ContentProviderRegistry {
    providers: BTreeMap<ApplicationId, Rc<dyn ContentProvider>>,
    fallback: Rc<dyn ContentProvider>,
}

impl Default for ContentProviderRegistry {
    fn default() -> Self {
        Self::with_builtin_apps()
    }
}

impl ContentProviderRegistry {
    /// An empty registry that answers every identifier with the "Coming soon!" placeholder.
    pub fn empty() -> Self {
        Self {
            providers: BTreeMap::new(),
            fallback: Rc::new(ComingSoonProvider),
        }
    }

    /// Registry with every built-in panel wired to its catalog identifier.
    pub fn with_builtin_apps() -> Self {
        let mut registry = Self::empty();
        registry.register(ApplicationId::new("files"), FilesProvider);
        registry.register(ApplicationId::new("notepad"), NotepadProvider);
        registry.register(ApplicationId::new("terminal"), TerminalProvider);
        registry.register(ApplicationId::new("settings"), SettingsProvider);
        registry.register(ApplicationId::new("paint"), PaintProvider);
        registry.register(ApplicationId::new("calc"), CalculatorProvider);
        registry.register(ApplicationId::new("browser"), BrowserProvider);
        registry.register(ApplicationId::new("about"), AboutProvider);
        registry
    }

    /// Installs (or replaces) the provider for `app_id`.
    pub fn register(&mut self, app_id: ApplicationId, provider: impl ContentProvider + 'static) {
        self.providers.insert(app_id, Rc::new(provider));
    }

    pub fn has_provider(&self, app_id: &ApplicationId) -> bool {
        self.providers.contains_key(app_id)
    }

    /// Describes the window content for `context.app_id`, falling back to the placeholder.
    pub fn describe(&self, context: &LaunchContext) -> ContentDescriptor {
        self.providers
            .get(&context.app_id)
            .unwrap_or(&self.fallback)
            .describe(context)
    }
}

impl std::fmt::Debug for ContentProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentProviderRegistry")
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn context(app: &str) -> LaunchContext {
        LaunchContext {
            app_id: ApplicationId::new(app),
            viewport_width: 1280,
            viewport_height: 800,
        }
    }

    #[test]
    fn catalog_identifiers_are_valid_and_unique() {
        let mut ids: Vec<&str> = app_catalog().iter().map(|entry| entry.app_id).collect();
        assert_eq!(ids.len(), 12);
        for id in &ids {
            assert!(id.chars().all(|ch| ch.is_ascii_lowercase()), "{id}");
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn taskbar_pins_follow_fixed_order() {
        let pinned: Vec<&str> = taskbar_apps().iter().map(|entry| entry.app_id).collect();
        assert_eq!(
            pinned,
            vec!["files", "browser", "notepad", "terminal", "settings"]
        );
        assert_eq!(pinned.len(), TASKBAR_ORDER.len());
    }

    #[test]
    fn desktop_shortcuts_point_at_catalog_apps() {
        for shortcut in desktop_shortcuts() {
            if let Some(app_id) = shortcut.app_id {
                assert!(app_descriptor(&ApplicationId::new(app_id)).is_some());
            }
        }
        assert_eq!(
            desktop_shortcuts()
                .iter()
                .filter(|shortcut| shortcut.app_id.is_none())
                .count(),
            1
        );
    }

    #[test]
    fn builtin_providers_answer_their_identifiers() {
        let registry = ContentProviderRegistry::with_builtin_apps();
        assert_eq!(registry.describe(&context("notepad")).title, "📝 Notepad");
        assert_eq!(registry.describe(&context("calc")).width, 280);
        assert_eq!(registry.describe(&context("paint")).height, 500);
        assert!(!registry.has_provider(&ApplicationId::new("music")));
    }

    #[test]
    fn unregistered_identifiers_fall_back_to_placeholder() {
        let registry = ContentProviderRegistry::with_builtin_apps();

        let known = registry.describe(&context("music"));
        assert_eq!(known.title, "Music");
        assert_eq!((known.width, known.height), (400, 300));
        assert!(known.body.contains("🎵"));
        assert!(known.body.contains("Coming soon!"));
        assert!(known.on_mount.is_none());

        let unknown = registry.describe(&context("xyz"));
        assert_eq!(unknown.title, "App");
        assert!(unknown.body.contains("📦"));
    }
}

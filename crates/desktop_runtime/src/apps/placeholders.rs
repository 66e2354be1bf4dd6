//! Built-in static panels and the generic "Coming soon!" placeholder.

use std::{cell::RefCell, rc::Rc};

use desktop_app_contract::{
    escape_html, ContentDescriptor, ContentProvider, LaunchContext, PanelEvent, PanelHandlers,
    PanelPatch,
};

use super::app_descriptor;

const BROWSER_URL_TARGET: &str = "browser-url";
const BROWSER_GO_TARGET: &str = "browser-go";
const BROWSER_CONTENT_TARGET: &str = "browser-content";
const BROWSER_HOME_URL: &str = "https://myos.local";

/// File explorer with a static quick-access sidebar and folder grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesProvider;

impl ContentProvider for FilesProvider {
    fn describe(&self, _context: &LaunchContext) -> ContentDescriptor {
        let quick_access = nav_items(&[
            "📁 Desktop",
            "📁 Downloads",
            "📁 Documents",
            "📁 Pictures",
            "📁 Music",
        ]);
        let drives = nav_items(&["💾 Local Disk (C:)", "💿 DVD Drive (D:)"]);
        let folders = ["Desktop", "Documents", "Downloads", "Pictures", "Music", "Videos"]
            .iter()
            .map(|name| {
                format!(
                    r#"<div class="files-folder"><div class="files-folder-icon">📁</div><div class="files-folder-name">{name}</div></div>"#
                )
            })
            .collect::<String>();
        let body = format!(
            r#"<div class="app app-files">
    <div class="files-sidebar">
        <div class="files-heading">Quick Access</div>
        {quick_access}
        <div class="files-heading">This PC</div>
        {drives}
    </div>
    <div class="files-main">
        <div class="files-title">📁 This PC</div>
        <div class="files-grid">{folders}</div>
    </div>
</div>"#
        );
        ContentDescriptor::new("📁 File Explorer", 600, 450, body)
    }
}

fn nav_items(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!(r#"<div class="files-nav-item">{item}</div>"#))
        .collect()
}

/// Settings home page: a category list and a static tile grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsProvider;

impl ContentProvider for SettingsProvider {
    fn describe(&self, _context: &LaunchContext) -> ContentDescriptor {
        let categories = [
            "🏠 Home",
            "💻 System",
            "📱 Devices",
            "📶 Network",
            "🎨 Personalization",
            "🔒 Privacy",
            "🔄 Update",
        ]
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let class = if index == 0 {
                "settings-nav-item selected"
            } else {
                "settings-nav-item"
            };
            format!(r#"<div class="{class}">{item}</div>"#)
        })
        .collect::<String>();
        let tiles = [
            ("💻", "System", "Display, sound, notifications"),
            ("📱", "Devices", "Bluetooth, printers, mouse"),
            ("📶", "Network", "Wi-Fi, VPN, proxy"),
            ("🎨", "Personalization", "Background, colors, themes"),
            ("🔒", "Privacy", "Location, camera, microphone"),
            ("🔄", "Update", "Windows Update, recovery"),
        ]
        .iter()
        .map(|(icon, title, detail)| {
            format!(
                r#"<div class="settings-tile"><div class="settings-tile-icon">{icon}</div><div class="settings-tile-title">{title}</div><div class="settings-tile-detail">{detail}</div></div>"#
            )
        })
        .collect::<String>();
        let body = format!(
            r#"<div class="app app-settings">
    <div class="settings-nav">{categories}</div>
    <div class="settings-main">
        <h2>Settings</h2>
        <div class="settings-grid">{tiles}</div>
    </div>
</div>"#
        );
        ContentDescriptor::new("⚙️ Settings", 700, 500, body)
    }
}

/// Demo browser. Navigating anywhere shows the "Cannot connect" page.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserProvider;

impl ContentProvider for BrowserProvider {
    fn describe(&self, _context: &LaunchContext) -> ContentDescriptor {
        let body = format!(
            r#"<div class="app app-browser">
    <div class="browser-toolbar">
        <button class="browser-nav">←</button>
        <button class="browser-nav">→</button>
        <button class="browser-nav">🔄</button>
        <input class="browser-url" type="text" data-panel="{BROWSER_URL_TARGET}" value="{BROWSER_HOME_URL}">
        <button class="browser-go" data-panel="{BROWSER_GO_TARGET}">Go</button>
    </div>
    <div class="browser-content" data-panel="{BROWSER_CONTENT_TARGET}">
        <div class="browser-hero">🌐</div>
        <h2>Welcome to MyOS Browser</h2>
        <p>Enter a URL or search the web</p>
    </div>
</div>"#
        );
        ContentDescriptor::new("🌐 Browser", 800, 550, body).with_mount(install_browser_handlers)
    }
}

fn install_browser_handlers(handlers: &mut PanelHandlers) {
    let url = Rc::new(RefCell::new(BROWSER_HOME_URL.to_string()));

    let typed = url.clone();
    handlers.on(BROWSER_URL_TARGET, move |event| match event {
        PanelEvent::Input { value, .. } => {
            *typed.borrow_mut() = value.clone();
            Ok(Vec::new())
        }
        PanelEvent::KeyDown { key, value, .. } if key == "Enter" => {
            *typed.borrow_mut() = value.clone();
            Ok(vec![connection_failed_page(value)])
        }
        _ => Ok(Vec::new()),
    });

    handlers.on(BROWSER_GO_TARGET, move |event| match event {
        PanelEvent::Click { .. } => Ok(vec![connection_failed_page(&url.borrow())]),
        _ => Ok(Vec::new()),
    });
}

/// Page shown for any navigation.
pub fn connection_failed_page(url: &str) -> PanelPatch {
    PanelPatch::SetHtml {
        target: BROWSER_CONTENT_TARGET.to_string(),
        html: format!(
            r#"<div class="browser-hero">🔒</div><h3>Cannot connect to {}</h3><p>This is a demo browser</p>"#,
            escape_html(url)
        ),
    }
}

/// System information card. Resolution is captured at launch time.
#[derive(Debug, Clone, Copy, Default)]
pub struct AboutProvider;

impl ContentProvider for AboutProvider {
    fn describe(&self, context: &LaunchContext) -> ContentDescriptor {
        let body = format!(
            r#"<div class="app app-about">
    <div class="about-hero">💻</div>
    <h1>MyOS</h1>
    <p class="about-version">Version 1.0.0</p>
    <div class="about-card">
        <p><strong>OS:</strong> MyOS Desktop</p>
        <p><strong>Kernel:</strong> Web 1.0</p>
        <p><strong>Resolution:</strong> {}×{}</p>
        <p><strong>Memory:</strong> Unlimited</p>
    </div>
    <p class="about-copyright">© 2024 MyOS. All rights reserved.</p>
</div>"#,
            context.viewport_width, context.viewport_height
        );
        ContentDescriptor::new("ℹ️ About MyOS", 450, 350, body)
    }
}

/// Fallback for identifiers without a dedicated panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComingSoonProvider;

impl ContentProvider for ComingSoonProvider {
    fn describe(&self, context: &LaunchContext) -> ContentDescriptor {
        let entry = app_descriptor(&context.app_id);
        let title = entry.map_or("App", |entry| entry.name);
        let icon = entry.map_or("📦", |entry| entry.icon);
        let body = format!(
            r#"<div class="app app-placeholder">
    <div class="placeholder-icon">{icon}</div>
    <p>Coming soon!</p>
</div>"#
        );
        ContentDescriptor::new(title, 400, 300, body)
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::ApplicationId;
    use pretty_assertions::assert_eq;

    use super::*;

    fn context(app: &str) -> LaunchContext {
        LaunchContext {
            app_id: ApplicationId::new(app),
            viewport_width: 1366,
            viewport_height: 768,
        }
    }

    fn mounted(descriptor: ContentDescriptor) -> PanelHandlers {
        let mut handlers = PanelHandlers::new();
        if let Some(hook) = descriptor.on_mount {
            hook(&mut handlers);
        }
        handlers
    }

    #[test]
    fn about_reports_launch_resolution() {
        let descriptor = AboutProvider.describe(&context("about"));
        assert_eq!((descriptor.width, descriptor.height), (450, 350));
        assert!(descriptor.body.contains("1366×768"));
        assert!(descriptor.body.contains("Version 1.0.0"));
    }

    #[test]
    fn browser_go_uses_last_typed_url() {
        let mut handlers = mounted(BrowserProvider.describe(&context("browser")));

        let home = handlers
            .dispatch(&PanelEvent::Click {
                target: BROWSER_GO_TARGET.to_string(),
                value: None,
            })
            .expect("go home");
        assert_eq!(home, vec![connection_failed_page(BROWSER_HOME_URL)]);

        handlers
            .dispatch(&PanelEvent::Input {
                target: BROWSER_URL_TARGET.to_string(),
                value: "example.org".to_string(),
                caret: 11,
            })
            .expect("typing");
        let patches = handlers
            .dispatch(&PanelEvent::Click {
                target: BROWSER_GO_TARGET.to_string(),
                value: None,
            })
            .expect("go");
        let [PanelPatch::SetHtml { target, html }] = patches.as_slice() else {
            panic!("one content patch");
        };
        assert_eq!(target, BROWSER_CONTENT_TARGET);
        assert!(html.contains("Cannot connect to example.org"));
        assert!(html.contains("This is a demo browser"));
    }

    #[test]
    fn browser_enter_navigates_and_escapes_url() {
        let mut handlers = mounted(BrowserProvider.describe(&context("browser")));
        let patches = handlers
            .dispatch(&PanelEvent::KeyDown {
                target: BROWSER_URL_TARGET.to_string(),
                key: "Enter".to_string(),
                value: "<script>".to_string(),
            })
            .expect("enter");
        assert_eq!(patches, vec![connection_failed_page("<script>")]);
        let PanelPatch::SetHtml { html, .. } = &patches[0] else {
            panic!("content patch");
        };
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn static_panels_have_catalog_sizes() {
        let files = FilesProvider.describe(&context("files"));
        assert_eq!((files.width, files.height), (600, 450));
        assert!(files.on_mount.is_none());
        let settings = SettingsProvider.describe(&context("settings"));
        assert_eq!((settings.width, settings.height), (700, 500));
        assert!(settings.body.contains("Personalization"));
    }
}

use desktop_runtime::{DesktopConfig, DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

const BUNDLED_DESKTOP_CONFIG: &str = include_str!("../desktop.toml");

/// Parses a desktop config document, falling back to defaults when it is unusable.
pub fn load_desktop_config(raw: &str) -> DesktopConfig {
    match DesktopConfig::from_toml_str(raw) {
        Ok(config) => config,
        Err(err) => {
            logging::warn!("{err}; falling back to the default desktop config");
            DesktopConfig::default()
        }
    }
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="MyOS" />
        <Meta name="description" content="A simulated desktop running in the browser." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                    <Route path="/*any" view=UnknownRoute />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    let config = load_desktop_config(BUNDLED_DESKTOP_CONFIG);

    view! {
        <DesktopProvider config>
            <DesktopShell />
        </DesktopProvider>
    }
}

#[component]
fn UnknownRoute() -> impl IntoView {
    let location = use_location();

    view! {
        <section class="unknown-route">
            <h1>"Nothing here"</h1>
            <p>{move || format!("No page at {}", location.pathname.get())}</p>
            <A href="/">"Back to the desktop"</A>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bundled_config_matches_defaults() {
        assert_eq!(
            load_desktop_config(BUNDLED_DESKTOP_CONFIG),
            DesktopConfig::default()
        );
    }

    #[test]
    fn broken_config_falls_back_to_defaults() {
        assert_eq!(
            load_desktop_config("cascade_wrap = \"five\""),
            DesktopConfig::default()
        );
        assert_eq!(
            load_desktop_config("cascade_wrap = 0"),
            DesktopConfig::default()
        );
    }

    fn stylesheet_rule(selector: &str) -> Option<&'static str> {
        const STYLESHEET: &str = include_str!("../styles.css");
        STYLESHEET
            .lines()
            .find(|line| line.starts_with(&format!("{selector} {{")))
    }

    #[test]
    fn stylesheet_gives_drawing_and_scrolling_panels_their_surfaces() {
        let canvas = stylesheet_rule(".paint-canvas").expect("canvas rule");
        assert!(canvas.contains("background: #fff"));

        let terminal = stylesheet_rule(".app-terminal").expect("terminal rule");
        assert!(terminal.contains("overflow-y: auto"));
        let panel = stylesheet_rule(".app").expect("panel rule");
        assert!(panel.contains("height: 100%"));

        for selector in [".calc-keypad", ".notepad-text", ".browser-content"] {
            assert!(stylesheet_rule(selector).is_some(), "missing {selector}");
        }
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let config = load_desktop_config("mount_delay_ms = 10");
        assert_eq!(config.mount_delay_ms, 10);
        assert_eq!(config.close_transition_ms, 150);
    }
}

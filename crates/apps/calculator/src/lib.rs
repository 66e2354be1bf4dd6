//! Calculator content provider: a four-function keypad that builds an expression and evaluates it on `=`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod engine;

use desktop_app_contract::{
    ContentDescriptor, ContentProvider, LaunchContext, PanelError, PanelEvent, PanelHandlers,
    PanelPatch,
};

use crate::engine::{button_action, CalculatorState};

const DISPLAY_TARGET: &str = "calc-display";
const KEY_TARGET: &str = "calc-key";

const KEYPAD_ROWS: [[&str; 4]; 4] = [
    ["C", "±", "%", "÷"],
    ["7", "8", "9", "×"],
    ["4", "5", "6", "-"],
    ["1", "2", "3", "+"],
];

/// Content provider for the calculator window.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculatorProvider;

impl ContentProvider for CalculatorProvider {
    fn describe(&self, _context: &LaunchContext) -> ContentDescriptor {
        ContentDescriptor::new("🧮 Calculator", 280, 420, render_body()).with_mount(install_handlers)
    }
}

fn key_class(label: &str) -> &'static str {
    match label {
        "÷" | "×" | "-" | "+" => "calc-key calc-key-operator",
        "C" | "±" | "%" => "calc-key calc-key-function",
        _ => "calc-key",
    }
}

fn render_key(label: &str, extra_class: &str) -> String {
    format!(
        r#"<button type="button" class="{}{extra_class}" data-panel="{KEY_TARGET}" data-value="{label}">{label}</button>"#,
        key_class(label)
    )
}

fn render_body() -> String {
    let mut keys = String::new();
    for row in KEYPAD_ROWS {
        for label in row {
            keys.push_str(&render_key(label, ""));
        }
    }
    keys.push_str(&render_key("0", " calc-key-wide"));
    keys.push_str(&render_key(".", ""));
    keys.push_str(&render_key("=", " calc-key-equals"));

    format!(
        r#"<div class="app app-calculator">
    <input type="text" class="calc-display" data-panel="{DISPLAY_TARGET}" value="0" readonly>
    <div class="calc-keypad">{keys}</div>
</div>"#
    )
}

fn install_handlers(handlers: &mut PanelHandlers) {
    let mut state = CalculatorState::default();
    handlers.on(KEY_TARGET, move |event| {
        let PanelEvent::Click {
            value: Some(label), ..
        } = event
        else {
            return Ok(Vec::new());
        };
        let action = button_action(label)
            .ok_or_else(|| PanelError::handler(KEY_TARGET, format!("unknown key `{label}`")))?;
        state.apply(action);
        Ok(vec![PanelPatch::SetValue {
            target: DISPLAY_TARGET.to_string(),
            value: state.display_text(),
        }])
    });
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::ApplicationId;
    use pretty_assertions::assert_eq;

    use super::*;

    fn click(label: &str) -> PanelEvent {
        PanelEvent::Click {
            target: KEY_TARGET.to_string(),
            value: Some(label.to_string()),
        }
    }

    fn mounted() -> PanelHandlers {
        let descriptor = CalculatorProvider.describe(&LaunchContext {
            app_id: ApplicationId::new("calc"),
            viewport_width: 1280,
            viewport_height: 800,
        });
        let mut handlers = PanelHandlers::new();
        let hook = descriptor.on_mount.expect("calculator mounts handlers");
        hook(&mut handlers);
        handlers
    }

    #[test]
    fn descriptor_matches_keypad_layout() {
        let descriptor = CalculatorProvider.describe(&LaunchContext {
            app_id: ApplicationId::new("calc"),
            viewport_width: 1280,
            viewport_height: 800,
        });
        assert_eq!(descriptor.title, "🧮 Calculator");
        assert_eq!((descriptor.width, descriptor.height), (280, 420));
        assert_eq!(descriptor.body.matches("data-panel=\"calc-key\"").count(), 19);
    }

    #[test]
    fn key_clicks_update_display() {
        let mut handlers = mounted();
        for label in ["4", "×", "5"] {
            handlers.dispatch(&click(label)).expect("key");
        }
        let patches = handlers.dispatch(&click("=")).expect("equals");
        assert_eq!(
            patches,
            vec![PanelPatch::SetValue {
                target: DISPLAY_TARGET.to_string(),
                value: "20".to_string(),
            }]
        );
    }

    #[test]
    fn display_follows_the_typed_expression() {
        let mut handlers = mounted();
        for label in ["2", "+", "3", "×"] {
            handlers.dispatch(&click(label)).expect("key");
        }
        assert_eq!(
            handlers.dispatch(&click("4")).expect("key"),
            vec![PanelPatch::SetValue {
                target: DISPLAY_TARGET.to_string(),
                value: "2+3×4".to_string(),
            }]
        );
        assert_eq!(
            handlers.dispatch(&click("=")).expect("equals"),
            vec![PanelPatch::SetValue {
                target: DISPLAY_TARGET.to_string(),
                value: "14".to_string(),
            }]
        );
    }

    #[test]
    fn unknown_key_fails_inside_the_panel() {
        let mut handlers = mounted();
        let err = handlers.dispatch(&click("sqrt")).expect_err("unknown key");
        assert_eq!(
            err,
            PanelError::handler(KEY_TARGET, "unknown key `sqrt`")
        );
    }
}

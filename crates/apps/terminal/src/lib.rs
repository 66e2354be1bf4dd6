//! Terminal content provider backed by a small cosmetic command table.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

use desktop_app_contract::{
    escape_html, ContentDescriptor, ContentProvider, LaunchContext, PanelEvent, PanelHandlers,
    PanelPatch,
};

const ROOT_TARGET: &str = "terminal";
const INPUT_TARGET: &str = "term-input";
const OUTPUT_TARGET: &str = "term-output";
const PROMPT: &str = r"C:\Users\User&gt;";

const NEOFETCH_LOGO: &str = r"  ███╗   ███╗██╗   ██╗ ██████╗ ███████╗
  ████╗ ████║╚██╗ ██╔╝██╔═══██╗██╔════╝
  ██╔████╔██║ ╚████╔╝ ██║   ██║███████╗
  ██║╚██╔╝██║  ╚██╔╝  ██║   ██║╚════██║
  ██║ ╚═╝ ██║   ██║   ╚██████╔╝███████║
  ╚═╝     ╚═╝   ╚═╝    ╚═════╝ ╚══════╝";

/// Content provider for the terminal window.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalProvider;

impl ContentProvider for TerminalProvider {
    fn describe(&self, context: &LaunchContext) -> ContentDescriptor {
        let resolution = (context.viewport_width, context.viewport_height);
        ContentDescriptor::new("🖥️ Terminal", 650, 420, render_body())
            .with_mount(move |handlers| install_handlers(handlers, resolution))
    }
}

fn render_body() -> String {
    format!(
        r#"<div class="app app-terminal" data-panel="{ROOT_TARGET}">
    <div class="term-banner">MyOS Terminal v1.0</div>
    <div class="term-hint">Type 'help' for commands</div>
    <br>
    <div data-panel="{OUTPUT_TARGET}"></div>
    <div class="term-prompt">
        <span>{PROMPT}&nbsp;</span>
        <input class="term-input" data-panel="{INPUT_TARGET}" autofocus>
    </div>
</div>"#
    )
}

/// Outcome of running one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Markup to print below the prompt line (empty prints nothing).
    Print(String),
    /// Clear the transcript.
    Clear,
}

/// Runs a trimmed command line against the built-in command table.
pub fn run_command(line: &str, resolution: (i32, i32)) -> CommandOutput {
    let mut parts = line.split(' ');
    let head = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();

    let text = match head {
        "" => String::new(),
        "echo" => escape_html(&rest.join(" ")),
        "cat" => format!(
            "File not found: {}",
            escape_html(rest.first().copied().unwrap_or_default())
        ),
        _ if line == "clear" => return CommandOutput::Clear,
        _ if line == "help" => {
            "Available commands: help, clear, date, echo, whoami, ls, cat, neofetch".to_string()
        }
        _ if line == "date" => now_display(),
        _ if line == "whoami" => "User".to_string(),
        _ if line == "ls" => "Desktop  Documents  Downloads  Pictures  Music  Videos".to_string(),
        _ if line == "neofetch" => neofetch(resolution),
        _ => format!("'{}' is not recognized as a command", escape_html(line)),
    };
    CommandOutput::Print(text)
}

fn neofetch((width, height): (i32, i32)) -> String {
    format!(
        r#"<pre class="term-logo">{NEOFETCH_LOGO}</pre>
  <span class="term-key">OS:</span> MyOS 1.0
  <span class="term-key">Kernel:</span> Web 1.0
  <span class="term-key">Shell:</span> mysh
  <span class="term-key">Resolution:</span> {width}x{height}"#
    )
}

fn now_display() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        String::from(js_sys::Date::new_0().to_string())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        format!("{secs} seconds since the unix epoch")
    }
}

fn install_handlers(handlers: &mut PanelHandlers, resolution: (i32, i32)) {
    handlers.on(INPUT_TARGET, move |event| {
        let PanelEvent::KeyDown { key, value, .. } = event else {
            return Ok(Vec::new());
        };
        if key != "Enter" {
            return Ok(Vec::new());
        }

        let line = value.trim();
        let mut patches = Vec::new();
        let result = match run_command(line, resolution) {
            CommandOutput::Clear => {
                patches.push(PanelPatch::SetHtml {
                    target: OUTPUT_TARGET.to_string(),
                    html: String::new(),
                });
                String::new()
            }
            CommandOutput::Print(text) => text,
        };

        let mut html = format!(
            r#"<div class="term-echo">{PROMPT} <span class="term-command">{}</span></div>"#,
            escape_html(line)
        );
        if !result.is_empty() {
            html.push_str(&format!(r#"<div class="term-result">{result}</div>"#));
        }
        patches.push(PanelPatch::AppendHtml {
            target: OUTPUT_TARGET.to_string(),
            html,
        });
        patches.push(PanelPatch::SetValue {
            target: INPUT_TARGET.to_string(),
            value: String::new(),
        });
        patches.push(PanelPatch::ScrollToEnd {
            target: ROOT_TARGET.to_string(),
        });
        Ok(patches)
    });
}

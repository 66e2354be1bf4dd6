//! Notepad content provider: a plain text area with a caret position status bar.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_app_contract::{
    ContentDescriptor, ContentProvider, LaunchContext, PanelEvent, PanelHandlers, PanelPatch,
};

const TEXT_TARGET: &str = "notepad-text";
const STATUS_TARGET: &str = "notepad-status";

/// Content provider for the notepad window.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotepadProvider;

impl ContentProvider for NotepadProvider {
    fn describe(&self, _context: &LaunchContext) -> ContentDescriptor {
        ContentDescriptor::new("📝 Notepad", 550, 420, render_body()).with_mount(install_handlers)
    }
}

fn render_body() -> String {
    let menu = ["File", "Edit", "View"]
        .iter()
        .map(|item| format!(r#"<span class="notepad-menu-item">{item}</span>"#))
        .collect::<String>();
    format!(
        r#"<div class="app app-notepad">
    <div class="notepad-menu">{menu}</div>
    <textarea class="notepad-text" data-panel="{TEXT_TARGET}" placeholder="Start typing..."></textarea>
    <div class="notepad-statusbar">
        <span data-panel="{STATUS_TARGET}">{}</span>
        <span>UTF-8</span>
    </div>
</div>"#,
        caret_status("", 0)
    )
}

fn install_handlers(handlers: &mut PanelHandlers) {
    handlers.on(TEXT_TARGET, |event| {
        let (value, caret) = match event {
            PanelEvent::Input { value, caret, .. } => (value.as_str(), *caret),
            PanelEvent::Click { .. } | PanelEvent::KeyDown { .. } | PanelEvent::Pointer { .. } => {
                return Ok(Vec::new())
            }
        };
        Ok(vec![PanelPatch::SetText {
            target: STATUS_TARGET.to_string(),
            text: caret_status(value, caret),
        }])
    });
}

/// Formats the `Ln <line>, Col <column>` status for a caret offset (in characters) into `text`.
pub fn caret_status(text: &str, caret: usize) -> String {
    let before: String = text.chars().take(caret).collect();
    let line = before.matches('\n').count() + 1;
    let column = before
        .rsplit('\n')
        .next()
        .map(|tail| tail.chars().count())
        .unwrap_or(0)
        + 1;
    format!("Ln {line}, Col {column}")
}

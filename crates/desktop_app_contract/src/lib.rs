//! Shared contract types between the desktop window manager runtime and app content providers.
//!
//! A content provider describes the window an application wants (title, size, body markup) and
//! may attach a mount hook. The hook runs once the body is part of the document and installs
//! handlers into a [`PanelHandlers`] table owned by that window alone, so two windows never share
//! mutable handler state.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{collections::HashMap, fmt, rc::Rc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable application identifier (for example `notepad`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Wraps a catalog token. Tokens end up in `data-app` attributes and element ids, so they
    /// are expected to be lowercase.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Environment handed to a provider when the launcher asks it to describe a new window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchContext {
    /// Application being launched.
    pub app_id: ApplicationId,
    /// Current desktop viewport width in layout units.
    pub viewport_width: i32,
    /// Current desktop viewport height in layout units.
    pub viewport_height: i32,
}

/// Initializer run after a window body is attached to the document.
///
/// The hook receives the window's private handler table; anything it captures belongs to that
/// window instance.
pub type MountHook = Rc<dyn Fn(&mut PanelHandlers)>;

/// Title/size/body/initializer bundle returned by a [`ContentProvider`].
#[derive(Clone)]
pub struct ContentDescriptor {
    /// Window title text.
    pub title: String,
    /// Initial window width.
    pub width: i32,
    /// Initial window height.
    pub height: i32,
    /// Body markup rendered into the window content area.
    pub body: String,
    /// Optional post-mount initializer.
    pub on_mount: Option<MountHook>,
}

impl ContentDescriptor {
    /// Creates a descriptor without a mount hook.
    pub fn new(title: impl Into<String>, width: i32, height: i32, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            body: body.into(),
            on_mount: None,
        }
    }

    /// Attaches a post-mount initializer.
    pub fn with_mount(mut self, hook: impl Fn(&mut PanelHandlers) + 'static) -> Self {
        self.on_mount = Some(Rc::new(hook));
        self
    }
}

impl fmt::Debug for ContentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentDescriptor")
            .field("title", &self.title)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("body_len", &self.body.len())
            .field("has_mount_hook", &self.on_mount.is_some())
            .finish()
    }
}

/// Supplies window content for one application identifier.
pub trait ContentProvider {
    /// Describes the window to create for `context.app_id`.
    fn describe(&self, context: &LaunchContext) -> ContentDescriptor;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Pointer gesture phase reported for panel drawing surfaces.
pub enum PointerPhase {
    /// Button pressed over the target.
    Down,
    /// Pointer moved over the target.
    Move,
    /// Button released over the target.
    Up,
    /// Pointer left the target.
    Leave,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Input routed from a window body element tagged with `data-panel="<target>"`.
pub enum PanelEvent {
    /// Text-field value changed or caret moved.
    Input {
        /// Panel target name.
        target: String,
        /// Current field value.
        value: String,
        /// Caret offset in characters.
        caret: usize,
    },
    /// Key pressed inside a target.
    KeyDown {
        /// Panel target name.
        target: String,
        /// Key name as reported by the browser (`Enter`, `a`, ...).
        key: String,
        /// Current field value.
        value: String,
    },
    /// Target clicked.
    Click {
        /// Panel target name.
        target: String,
        /// Optional `data-value` attribute of the clicked element.
        value: Option<String>,
    },
    /// Pointer activity over a drawing surface.
    Pointer {
        /// Panel target name.
        target: String,
        /// Gesture phase.
        phase: PointerPhase,
        /// X offset inside the target.
        x: f64,
        /// Y offset inside the target.
        y: f64,
    },
}

impl PanelEvent {
    /// Returns the panel target the event was raised on.
    pub fn target(&self) -> &str {
        match self {
            Self::Input { target, .. }
            | Self::KeyDown { target, .. }
            | Self::Click { target, .. }
            | Self::Pointer { target, .. } => target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Body update requested by a panel handler, applied by the host inside the owning window only.
pub enum PanelPatch {
    /// Replace the text content of a target.
    SetText {
        /// Panel target name.
        target: String,
        /// New text.
        text: String,
    },
    /// Replace the value of an input/textarea target.
    SetValue {
        /// Panel target name.
        target: String,
        /// New value.
        value: String,
    },
    /// Replace the inner markup of a target.
    SetHtml {
        /// Panel target name.
        target: String,
        /// New markup.
        html: String,
    },
    /// Append markup to a target.
    AppendHtml {
        /// Panel target name.
        target: String,
        /// Markup to append.
        html: String,
    },
    /// Mark the element of `group` whose `data-value` equals `value` as selected.
    MarkSelected {
        /// Panel target name shared by the selectable elements.
        group: String,
        /// Selected `data-value`.
        value: String,
    },
    /// Scroll a target to its end.
    ScrollToEnd {
        /// Panel target name.
        target: String,
    },
    /// Draw a round-capped line segment on a canvas target.
    StrokeLine {
        /// Canvas target name.
        target: String,
        /// Segment start.
        from: (f64, f64),
        /// Segment end.
        to: (f64, f64),
        /// CSS color.
        color: String,
        /// Line width.
        width: f64,
    },
    /// Clear a canvas target.
    ClearCanvas {
        /// Canvas target name.
        target: String,
    },
    /// Offer the canvas content as a PNG download.
    DownloadCanvas {
        /// Canvas target name.
        target: String,
        /// Suggested file name.
        file_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure raised inside a panel handler. Local to the panel; the window manager only logs it.
pub enum PanelError {
    /// The handler rejected the event.
    #[error("panel handler `{target}` failed: {message}")]
    Handler {
        /// Panel target name.
        target: String,
        /// Failure description.
        message: String,
    },
}

impl PanelError {
    /// Builds a handler failure for `target`.
    pub fn handler(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Handler {
            target: target.into(),
            message: message.into(),
        }
    }
}

/// Result returned by panel handlers.
pub type PanelResult = Result<Vec<PanelPatch>, PanelError>;

type PanelHandler = Box<dyn FnMut(&PanelEvent) -> PanelResult>;

/// Per-window event handler table keyed by panel target name.
#[derive(Default)]
pub struct PanelHandlers {
    handlers: HashMap<String, PanelHandler>,
}

impl PanelHandlers {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs (or replaces) the handler for `target`.
    pub fn on(
        &mut self,
        target: impl Into<String>,
        handler: impl FnMut(&PanelEvent) -> PanelResult + 'static,
    ) {
        self.handlers.insert(target.into(), Box::new(handler));
    }

    /// Routes `event` to the handler registered for its target.
    ///
    /// Events for targets without a handler produce no patches.
    pub fn dispatch(&mut self, event: &PanelEvent) -> PanelResult {
        match self.handlers.get_mut(event.target()) {
            Some(handler) => handler(event),
            None => Ok(Vec::new()),
        }
    }
}

impl fmt::Debug for PanelHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut targets: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        targets.sort_unstable();
        f.debug_struct("PanelHandlers")
            .field("targets", &targets)
            .finish()
    }
}

/// Escapes text for interpolation into panel markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

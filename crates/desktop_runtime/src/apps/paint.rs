//! Paint panel: palette, brush sizes, freehand strokes, clear, and PNG export.

use std::{cell::RefCell, rc::Rc};

use desktop_app_contract::{
    ContentDescriptor, ContentProvider, LaunchContext, PanelError, PanelEvent, PanelHandlers,
    PanelPatch, PointerPhase,
};

const CANVAS_TARGET: &str = "paint-canvas";
const COLOR_TARGET: &str = "paint-color";
const SIZE_TARGET: &str = "paint-size";
const CLEAR_TARGET: &str = "paint-clear";
const SAVE_TARGET: &str = "paint-save";

pub const PALETTE: [&str; 10] = [
    "#000000", "#ffffff", "#ff0000", "#00ff00", "#0000ff", "#ffff00", "#ff00ff", "#00ffff",
    "#ff8800", "#8800ff",
];
pub const BRUSH_SIZES: [u32; 4] = [2, 5, 10, 20];
pub const CANVAS_WIDTH: u32 = 696;
pub const CANVAS_HEIGHT: u32 = 420;
pub const EXPORT_FILE_NAME: &str = "drawing.png";

const DEFAULT_COLOR: &str = "#000000";
const DEFAULT_SIZE: u32 = 5;
/// Largest dot drawn inside a size swatch.
const SWATCH_DOT_LIMIT: u32 = 16;

#[derive(Debug, Clone, Copy, Default)]
pub struct PaintProvider;

impl ContentProvider for PaintProvider {
    fn describe(&self, _context: &LaunchContext) -> ContentDescriptor {
        ContentDescriptor::new("🎨 Paint", 700, 500, render_body()).with_mount(install_handlers)
    }
}

fn render_body() -> String {
    let colors = PALETTE
        .iter()
        .map(|color| {
            let selected = if *color == DEFAULT_COLOR { " selected" } else { "" };
            format!(
                r#"<div class="paint-swatch{selected}" data-panel="{COLOR_TARGET}" data-value="{color}" style="background:{color}"></div>"#
            )
        })
        .collect::<String>();
    let sizes = BRUSH_SIZES
        .iter()
        .map(|size| {
            let selected = if *size == DEFAULT_SIZE { " selected" } else { "" };
            let dot = (*size).min(SWATCH_DOT_LIMIT);
            format!(
                r#"<div class="paint-size{selected}" data-panel="{SIZE_TARGET}" data-value="{size}"><div class="paint-size-dot" style="width:{dot}px;height:{dot}px"></div></div>"#
            )
        })
        .collect::<String>();
    format!(
        r#"<div class="app app-paint">
    <div class="paint-toolbar">
        <div class="paint-group">{colors}</div>
        <div class="paint-divider"></div>
        <div class="paint-group">{sizes}</div>
        <div class="paint-divider"></div>
        <button class="paint-action" data-panel="{CLEAR_TARGET}">Clear</button>
        <button class="paint-action primary" data-panel="{SAVE_TARGET}">Save</button>
    </div>
    <canvas class="paint-canvas" data-panel="{CANVAS_TARGET}" width="{CANVAS_WIDTH}" height="{CANVAS_HEIGHT}"></canvas>
</div>"#
    )
}

/// Brush settings and the in-progress stroke for one Paint window.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintSession {
    pub color: String,
    pub size: u32,
    last_point: Option<(f64, f64)>,
}

impl Default for PaintSession {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            size: DEFAULT_SIZE,
            last_point: None,
        }
    }
}

impl PaintSession {
    pub fn is_drawing(&self) -> bool {
        self.last_point.is_some()
    }

    /// Advances the stroke state machine; returns the segment to draw, if any.
    pub fn pointer(&mut self, phase: PointerPhase, x: f64, y: f64) -> Option<PanelPatch> {
        match phase {
            PointerPhase::Down => {
                self.last_point = Some((x, y));
                None
            }
            PointerPhase::Move => {
                let from = self.last_point?;
                self.last_point = Some((x, y));
                Some(PanelPatch::StrokeLine {
                    target: CANVAS_TARGET.to_string(),
                    from,
                    to: (x, y),
                    color: self.color.clone(),
                    width: f64::from(self.size),
                })
            }
            PointerPhase::Up | PointerPhase::Leave => {
                self.last_point = None;
                None
            }
        }
    }
}

fn install_handlers(handlers: &mut PanelHandlers) {
    let session = Rc::new(RefCell::new(PaintSession::default()));

    let canvas = session.clone();
    handlers.on(CANVAS_TARGET, move |event| match event {
        PanelEvent::Pointer { phase, x, y, .. } => {
            Ok(canvas.borrow_mut().pointer(*phase, *x, *y).into_iter().collect())
        }
        _ => Ok(Vec::new()),
    });

    let palette = session.clone();
    handlers.on(COLOR_TARGET, move |event| {
        let Some(color) = clicked_value(event) else {
            return Ok(Vec::new());
        };
        if !PALETTE.contains(&color) {
            return Err(PanelError::handler(
                COLOR_TARGET,
                format!("color `{color}` is not in the palette"),
            ));
        }
        palette.borrow_mut().color = color.to_string();
        Ok(vec![PanelPatch::MarkSelected {
            group: COLOR_TARGET.to_string(),
            value: color.to_string(),
        }])
    });

    handlers.on(SIZE_TARGET, move |event| {
        let Some(raw) = clicked_value(event) else {
            return Ok(Vec::new());
        };
        let size = raw
            .parse::<u32>()
            .ok()
            .filter(|size| BRUSH_SIZES.contains(size))
            .ok_or_else(|| {
                PanelError::handler(SIZE_TARGET, format!("brush size `{raw}` is not offered"))
            })?;
        session.borrow_mut().size = size;
        Ok(vec![PanelPatch::MarkSelected {
            group: SIZE_TARGET.to_string(),
            value: size.to_string(),
        }])
    });

    handlers.on(CLEAR_TARGET, |event| match event {
        PanelEvent::Click { .. } => Ok(vec![PanelPatch::ClearCanvas {
            target: CANVAS_TARGET.to_string(),
        }]),
        _ => Ok(Vec::new()),
    });

    handlers.on(SAVE_TARGET, |event| match event {
        PanelEvent::Click { .. } => Ok(vec![PanelPatch::DownloadCanvas {
            target: CANVAS_TARGET.to_string(),
            file_name: EXPORT_FILE_NAME.to_string(),
        }]),
        _ => Ok(Vec::new()),
    });
}

fn clicked_value(event: &PanelEvent) -> Option<&str> {
    match event {
        PanelEvent::Click { value, .. } => value.as_deref(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::ApplicationId;
    use pretty_assertions::assert_eq;

    use super::*;

    fn mounted() -> PanelHandlers {
        let descriptor = PaintProvider.describe(&LaunchContext {
            app_id: ApplicationId::new("paint"),
            viewport_width: 1280,
            viewport_height: 800,
        });
        let mut handlers = PanelHandlers::new();
        let hook = descriptor.on_mount.expect("paint installs handlers");
        hook(&mut handlers);
        handlers
    }

    fn pointer(phase: PointerPhase, x: f64, y: f64) -> PanelEvent {
        PanelEvent::Pointer {
            target: CANVAS_TARGET.to_string(),
            phase,
            x,
            y,
        }
    }

    fn click(target: &str, value: &str) -> PanelEvent {
        PanelEvent::Click {
            target: target.to_string(),
            value: Some(value.to_string()),
        }
    }

    #[test]
    fn body_renders_palette_sizes_and_canvas() {
        let body = render_body();
        assert_eq!(body.matches(r#"data-panel="paint-color""#).count(), 10);
        assert_eq!(body.matches(r#"data-panel="paint-size""#).count(), 4);
        assert!(body.contains(r#"width="696" height="420""#));
    }

    #[test]
    fn stroke_segments_follow_pointer_until_release() {
        let mut handlers = mounted();

        assert!(handlers
            .dispatch(&pointer(PointerPhase::Move, 1.0, 1.0))
            .expect("hover")
            .is_empty());
        handlers
            .dispatch(&pointer(PointerPhase::Down, 10.0, 20.0))
            .expect("down");
        let segment = handlers
            .dispatch(&pointer(PointerPhase::Move, 15.0, 25.0))
            .expect("move");
        assert_eq!(
            segment,
            vec![PanelPatch::StrokeLine {
                target: CANVAS_TARGET.to_string(),
                from: (10.0, 20.0),
                to: (15.0, 25.0),
                color: "#000000".to_string(),
                width: 5.0,
            }]
        );

        handlers
            .dispatch(&pointer(PointerPhase::Leave, 30.0, 30.0))
            .expect("leave");
        assert!(handlers
            .dispatch(&pointer(PointerPhase::Move, 40.0, 40.0))
            .expect("after leave")
            .is_empty());
    }

    #[test]
    fn selection_changes_brush_for_next_segment() {
        let mut handlers = mounted();

        assert_eq!(
            handlers
                .dispatch(&click(COLOR_TARGET, "#ff8800"))
                .expect("color"),
            vec![PanelPatch::MarkSelected {
                group: COLOR_TARGET.to_string(),
                value: "#ff8800".to_string(),
            }]
        );
        handlers.dispatch(&click(SIZE_TARGET, "20")).expect("size");
        handlers
            .dispatch(&pointer(PointerPhase::Down, 0.0, 0.0))
            .expect("down");
        let segment = handlers
            .dispatch(&pointer(PointerPhase::Move, 3.0, 4.0))
            .expect("move");
        let [PanelPatch::StrokeLine { color, width, .. }] = segment.as_slice() else {
            panic!("one segment");
        };
        assert_eq!(color, "#ff8800");
        assert_eq!(*width, 20.0);
    }

    #[test]
    fn unknown_palette_or_size_values_are_rejected() {
        let mut handlers = mounted();
        assert!(handlers.dispatch(&click(COLOR_TARGET, "#123456")).is_err());
        assert!(handlers.dispatch(&click(SIZE_TARGET, "7")).is_err());
        assert!(handlers.dispatch(&click(SIZE_TARGET, "wide")).is_err());
    }

    #[test]
    fn clear_and_save_target_the_canvas() {
        let mut handlers = mounted();
        assert_eq!(
            handlers
                .dispatch(&PanelEvent::Click {
                    target: CLEAR_TARGET.to_string(),
                    value: None,
                })
                .expect("clear"),
            vec![PanelPatch::ClearCanvas {
                target: CANVAS_TARGET.to_string(),
            }]
        );
        assert_eq!(
            handlers
                .dispatch(&PanelEvent::Click {
                    target: SAVE_TARGET.to_string(),
                    value: None,
                })
                .expect("save"),
            vec![PanelPatch::DownloadCanvas {
                target: CANVAS_TARGET.to_string(),
                file_name: "drawing.png".to_string(),
            }]
        );
    }
}

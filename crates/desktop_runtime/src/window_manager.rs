//! Shared window-manager transition helpers used by the desktop reducer.

use serde::{Deserialize, Serialize};

use crate::{
    config::DesktopConfig,
    model::{DesktopState, DragSession, PointerPosition, WindowId, WindowRecord, WindowRect},
};

/// Process-wide z-order counter. Every value handed out is above all earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackingOrder {
    last: u64,
}

impl StackingOrder {
    /// Starts the counter at `base`; the first assigned value is `base + 1`.
    pub fn new(base: u64) -> Self {
        Self { last: base }
    }

    /// Returns the next stacking value.
    pub fn next_z(&mut self) -> u64 {
        self.last = self.last.saturating_add(1);
        self.last
    }

    /// Returns the most recently assigned value.
    pub fn current(&self) -> u64 {
        self.last
    }
}

/// Raises `window_id` above every other window and moves focus onto it.
///
/// Minimized windows stay minimized. Returns `false` when the window is unknown.
pub fn bring_to_front(state: &mut DesktopState, window_id: WindowId) -> bool {
    if state.window(window_id).is_none() {
        return false;
    }

    let z_index = state.stacking.next_z();
    for window in state.registry.iter_mut() {
        if window.id == window_id {
            window.z_index = z_index;
            window.is_focused = true;
        } else {
            window.is_focused = false;
        }
    }
    true
}

/// Initial placement for a new window given how many windows are registered.
///
/// Slots repeat every `cascade_wrap` windows so placement never drifts off-screen.
pub fn cascade_position(config: &DesktopConfig, open_count: usize) -> (i32, i32) {
    let slot = (open_count % config.cascade_wrap.max(1)) as i32;
    let offset = slot * config.cascade_step;
    (
        config.cascade_origin_x + offset,
        config.cascade_origin_y + offset,
    )
}

/// Flips a window between its saved bounds and the full desktop area.
///
/// Bounds are saved only on the maximize transition and consumed on the restore transition,
/// so two toggles return the exact starting rect.
pub fn toggle_maximize(window: &mut WindowRecord, desktop_area: WindowRect) {
    if window.maximized {
        if let Some(saved) = window.restore_rect.take() {
            window.rect = saved;
        }
        window.maximized = false;
    } else {
        window.restore_rect = Some(window.rect);
        window.rect = desktop_area;
        window.maximized = true;
    }
}

/// Position of a dragged window for the current pointer; the top edge never goes above 0.
pub fn drag_position(session: &DragSession, pointer: PointerPosition) -> (i32, i32) {
    let dx = pointer.x - session.pointer_start.x;
    let dy = pointer.y - session.pointer_start.y;
    let moved = session.rect_start.offset(dx, dy);
    (moved.x, moved.y.max(0))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn next_z_is_strictly_increasing() {
        let mut stacking = StackingOrder::new(100);
        let values: Vec<u64> = (0..50).map(|_| stacking.next_z()).collect();
        assert_eq!(values[0], 101);
        assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(stacking.current(), 150);
    }

    #[test]
    fn cascade_wraps_after_configured_slots() {
        let config = DesktopConfig::default();
        let slots: Vec<(i32, i32)> = (0..7).map(|n| cascade_position(&config, n)).collect();
        assert_eq!(slots[0], (100, 60));
        assert_eq!(slots[1], (140, 100));
        assert_eq!(slots[4], (260, 220));
        assert_eq!(slots[5], slots[0]);
        assert_eq!(slots[6], slots[1]);
    }

    #[test]
    fn drag_position_clamps_only_the_top_edge() {
        let session = DragSession {
            window_id: WindowId(1),
            pointer_start: PointerPosition { x: 200, y: 80 },
            rect_start: WindowRect {
                x: 100,
                y: 60,
                w: 400,
                h: 300,
            },
        };

        assert_eq!(
            drag_position(&session, PointerPosition { x: 230, y: 120 }),
            (130, 100)
        );
        assert_eq!(
            drag_position(&session, PointerPosition { x: -300, y: 0 }),
            (-400, 0)
        );
    }
}

//! Pointer interaction: the single-point drag engine.
//!
//! Drag state lives in two places that must agree: each point's `dragged`
//! flag and the owning group's `dragged` slot. [`apply_drag`] is the only
//! writer of either, which keeps the exclusivity invariant local to this
//! module: at most one point per group is dragged at any time.
//!
//! The state machine per update:
//!
//! 1. Button released: any active drag ends.
//! 2. Button pressed, nothing dragged: the first draggable point whose hit
//!    box contains the pointer acquires the drag. Overlapping points never
//!    both acquire it.
//! 3. While a drag is active, the dragged point tracks the pointer, clamped
//!    so its circle stays inside the surface bounds.

use log::debug;

use crate::{
    geometry::{Point, Size},
    scene::{PointEntity, PointId},
};

/// A snapshot of pointer input for one update pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputState {
    /// Pointer position in surface coordinates.
    pub pointer: Point,
    /// Whether the primary button is held.
    pub pressed: bool,
}

impl InputState {
    /// An input state with the button up and the pointer at the origin.
    ///
    /// Useful for headless passes that want label refresh without any
    /// interaction.
    pub fn idle() -> Self {
        Self {
            pointer: Point::default(),
            pressed: false,
        }
    }
}

/// Advances the drag state machine over a group's point arena.
///
/// `dragged` is the group's exclusive-drag slot; `bounds` is the current
/// surface size used for clamping. Runs in arena order, so when hit boxes
/// overlap the earliest-added point wins the acquisition.
pub fn apply_drag(
    points: &mut [PointEntity],
    dragged: &mut Option<PointId>,
    input: &InputState,
    bounds: Size,
) {
    if !input.pressed {
        if let Some(id) = dragged.take() {
            debug!(point = id.index(); "Drag released");
            points[id.index()].set_dragged(false);
        }
        return;
    }

    if dragged.is_none() {
        let hit = points
            .iter()
            .position(|point| point.draggable() && point.hit_test(input.pointer));
        if let Some(index) = hit {
            debug!(point = index; "Drag acquired");
            points[index].set_dragged(true);
            *dragged = Some(PointId::new(index));
        }
    }

    if let Some(id) = *dragged {
        let point = &mut points[id.index()];
        point.set_position(input.pointer.clamp_to(bounds, point.radius()));
    }
}

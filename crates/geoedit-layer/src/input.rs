//! Pointer events delivered by the rendering host.
//!
//! The host performs hit testing and projection before dispatch, so every
//! event already carries its map-space (`ground_coords`) position and the
//! picks under the pointer.

use crate::pick::Pick;
use geoedit_core::Position;
use kurbo::Point;

/// A click (press and release without a drag in between).
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub screen_coords: Point,
    pub ground_coords: Position,
    pub picks: Vec<Pick>,
}

/// Start or end of a drag gesture.
#[derive(Debug, Clone)]
pub struct DragEvent {
    pub picks: Vec<Pick>,
    pub screen_coords: Point,
    pub ground_coords: Position,
    pub drag_start_screen_coords: Point,
    pub drag_start_ground_coords: Position,
}

/// Pointer motion, with or without a button held.
#[derive(Debug, Clone)]
pub struct PointerMoveEvent {
    pub screen_coords: Point,
    pub ground_coords: Position,
    pub picks: Vec<Pick>,
    pub is_dragging: bool,
    /// Picks captured when the current drag began. `None` when not dragging.
    pub drag_start_picks: Option<Vec<Pick>>,
    pub drag_start_screen_coords: Option<Point>,
    pub drag_start_ground_coords: Option<Position>,
}

impl PointerMoveEvent {
    /// A hover move (no button held).
    pub fn hover(screen_coords: Point, ground_coords: Position, picks: Vec<Pick>) -> Self {
        Self {
            screen_coords,
            ground_coords,
            picks,
            is_dragging: false,
            drag_start_picks: None,
            drag_start_screen_coords: None,
            drag_start_ground_coords: None,
        }
    }
}

/// A normalized pointer event, one variant per handler on the controller.
#[derive(Debug, Clone)]
pub enum PointerEvent {
    Click(ClickEvent),
    StartDragging(DragEvent),
    StopDragging(DragEvent),
    PointerMove(PointerMoveEvent),
    /// The host lost the gesture (focus loss, pointer capture lost) and no
    /// stop event will follow.
    DragCancelled,
}

impl PointerEvent {
    /// Map-space position, if this event carries one.
    pub fn ground_coords(&self) -> Option<Position> {
        match self {
            Self::Click(e) => Some(e.ground_coords),
            Self::StartDragging(e) | Self::StopDragging(e) => Some(e.ground_coords),
            Self::PointerMove(e) => Some(e.ground_coords),
            Self::DragCancelled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_drag_has_no_position() {
        let at = Position::new(3.0, 4.0);
        let hover = PointerEvent::PointerMove(PointerMoveEvent::hover(Point::new(30.0, 40.0), at, vec![]));
        assert_eq!(hover.ground_coords(), Some(at));
        assert_eq!(PointerEvent::DragCancelled.ground_coords(), None);
    }
}

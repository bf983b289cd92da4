//! Pointer cursor selection.
//!
//! Precedence: draw modes first, then handle hits in `modify`, then the
//! grab/grabbing fallback.

use crate::pick::Pick;
use geoedit_core::{EditHandleType, Mode};

/// Cursor hint for the rendering host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Placing new geometry.
    Draw,
    /// Over an existing vertex handle.
    Move,
    /// Over an intermediate handle; dragging inserts a vertex.
    Insert,
    Grab,
    Grabbing,
}

impl Cursor {
    /// CSS `cursor` value.
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Draw | Self::Insert => "cell",
            Self::Move => "move",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Pick the cursor from the mode, drag state and the last hover picks.
pub fn resolve_cursor(mode: Mode, is_dragging: bool, picks: Option<&[Pick]>) -> Cursor {
    if mode.is_draw() {
        return Cursor::Draw;
    }

    if mode == Mode::Modify
        && let Some(picks) = picks.filter(|p| !p.is_empty())
    {
        let picked = |ty: EditHandleType| picks.iter().any(|p| p.handle_type() == Some(ty));
        if picked(EditHandleType::Existing) {
            return Cursor::Move;
        }
        if picked(EditHandleType::Intermediate) {
            return Cursor::Insert;
        }
    }

    if is_dragging {
        Cursor::Grabbing
    } else {
        Cursor::Grab
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pick::annotate_pick;
    use geoedit_core::{EditHandle, Position};

    const HANDLES: &str = "editor-point-edit-handles";

    fn handle_pick(handle: EditHandle) -> Pick {
        annotate_pick(Pick::handle(HANDLES, 0, handle), HANDLES)
    }

    fn existing() -> Pick {
        handle_pick(EditHandle::existing(0, &[0], Position::new(0.0, 0.0)))
    }

    fn intermediate() -> Pick {
        handle_pick(EditHandle::intermediate(0, &[1], Position::new(0.5, 0.0)))
    }

    #[test]
    fn draw_mode_wins_over_picks() {
        let picks = vec![existing()];
        assert_eq!(resolve_cursor(Mode::DrawPoint, false, Some(picks.as_slice())), Cursor::Draw);
        assert_eq!(resolve_cursor(Mode::DrawPolygon, true, None), Cursor::Draw);
    }

    #[test]
    fn existing_handle_beats_intermediate() {
        let picks = vec![intermediate(), existing()];
        assert_eq!(resolve_cursor(Mode::Modify, false, Some(picks.as_slice())), Cursor::Move);
    }

    #[test]
    fn intermediate_handle_inserts() {
        let picks = vec![intermediate()];
        assert_eq!(resolve_cursor(Mode::Modify, false, Some(picks.as_slice())), Cursor::Insert);
        assert_eq!(Cursor::Insert.as_css(), "cell");
    }

    #[test]
    fn untagged_handle_pick_is_ignored() {
        let raw = Pick::handle(HANDLES, 0, EditHandle::existing(0, &[0], Position::new(0.0, 0.0)));
        assert_eq!(resolve_cursor(Mode::Modify, false, Some(&[raw][..])), Cursor::Grab);
    }

    #[test]
    fn handle_picks_only_matter_in_modify() {
        let picks = vec![existing()];
        assert_eq!(resolve_cursor(Mode::Translate, false, Some(picks.as_slice())), Cursor::Grab);
        assert_eq!(resolve_cursor(Mode::View, true, Some(picks.as_slice())), Cursor::Grabbing);
    }

    #[test]
    fn fallback_tracks_drag_state() {
        assert_eq!(resolve_cursor(Mode::Modify, true, None), Cursor::Grabbing);
        assert_eq!(resolve_cursor(Mode::Modify, false, None), Cursor::Grab);
        assert_eq!(resolve_cursor(Mode::Modify, false, Some(&[][..])), Cursor::Grab);
        assert_eq!(Cursor::Grabbing.as_css(), "grabbing");
    }
}

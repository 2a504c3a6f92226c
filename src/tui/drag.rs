use crate::model::Status;

/// Carry state for moving a card between board columns. The machine only
/// tracks the gesture; column membership changes exclusively through the
/// store after a successful status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// A card has been picked up but no target column chosen yet
    Dragging { task_id: i64 },
    /// Carrying over a candidate column
    Over { task_id: i64, column: Status },
}

impl DragState {
    /// Pick up a card. Restarts the gesture if one was already active.
    pub fn pick_up(&mut self, task_id: i64) {
        *self = DragState::Dragging { task_id };
    }

    /// Target a column. Retargeting another column is allowed; ignored when
    /// nothing is being carried.
    pub fn enter_column(&mut self, column: Status) {
        match *self {
            DragState::Dragging { task_id } | DragState::Over { task_id, .. } => {
                *self = DragState::Over { task_id, column };
            }
            DragState::Idle => {}
        }
    }

    /// Cancel without dropping (drag-leave or drag-end).
    pub fn cancel(&mut self) {
        *self = DragState::Idle;
    }

    /// Drop: yields the pending `(task, column)` pair for the caller to feed
    /// into the store, and always resets to idle — the gesture never waits
    /// for the network round-trip. A drop with nothing carried, or with no
    /// column targeted, yields nothing and issues no request.
    pub fn drop_card(&mut self) -> Option<(i64, Status)> {
        let dropped = match *self {
            DragState::Over { task_id, column } => Some((task_id, column)),
            _ => None,
        };
        *self = DragState::Idle;
        dropped
    }

    /// Id of the carried card, if any
    pub fn carried(&self) -> Option<i64> {
        match *self {
            DragState::Idle => None,
            DragState::Dragging { task_id } | DragState::Over { task_id, .. } => Some(task_id),
        }
    }

    /// Currently targeted column, if any
    pub fn target(&self) -> Option<Status> {
        match *self {
            DragState::Over { column, .. } => Some(column),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_up_then_target() {
        let mut drag = DragState::default();
        assert_eq!(drag.carried(), None);

        drag.pick_up(5);
        assert_eq!(drag.carried(), Some(5));
        assert_eq!(drag.target(), None);

        drag.enter_column(Status::Doing);
        assert_eq!(drag.target(), Some(Status::Doing));
    }

    #[test]
    fn test_retarget_without_drop() {
        let mut drag = DragState::default();
        drag.pick_up(5);
        drag.enter_column(Status::Doing);
        drag.enter_column(Status::Done);
        assert_eq!(
            drag,
            DragState::Over {
                task_id: 5,
                column: Status::Done
            }
        );
    }

    #[test]
    fn test_drop_yields_pair_and_resets() {
        let mut drag = DragState::default();
        drag.pick_up(5);
        drag.enter_column(Status::Done);
        assert_eq!(drag.drop_card(), Some((5, Status::Done)));
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn test_stale_drop_is_noop() {
        let mut drag = DragState::default();
        assert_eq!(drag.drop_card(), None);
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn test_drop_without_target_is_noop() {
        let mut drag = DragState::default();
        drag.pick_up(5);
        assert_eq!(drag.drop_card(), None);
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn test_cancel_discards_gesture() {
        let mut drag = DragState::default();
        drag.pick_up(5);
        drag.enter_column(Status::Doing);
        drag.cancel();
        assert_eq!(drag, DragState::Idle);

        // Entering a column after cancel does nothing
        drag.enter_column(Status::Done);
        assert_eq!(drag, DragState::Idle);
    }
}

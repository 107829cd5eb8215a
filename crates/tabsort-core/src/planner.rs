//! Move planning: turn a target ordering into single-tab move commands
//!
//! The plan is a left-to-right scan of original against target: wherever the
//! identities differ, the target tab is sent to that slot. Slots are the
//! partition's own snapshot indices, so a partition that starts behind
//! pinned tabs permutes strictly within its original index span.
//!
//! The scan is not edit-distance minimal (cycles and already-placed
//! suffixes are not detected), but it issues zero moves for an already
//! sorted partition and repeated application converges on the target order.
//! Moves are planned against the snapshot, not re-queried between commands;
//! concurrent external mutation can make later indices stale, which the
//! single-flight guard makes an accepted trade.

use crate::api::TabApi;
use crate::types::{Tab, TabId};
use tracing::warn;

/// One planned move command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOp {
    /// Tab to move
    pub tab: TabId,
    /// Destination index within the window
    pub to_index: u32,
}

/// Plan the moves that take `original` to `target`
///
/// Both slices must hold the same tabs (equal length, equal id set);
/// `original` in snapshot index order, `target` in the desired order.
#[must_use]
pub fn plan_moves(original: &[Tab], target: &[Tab]) -> Vec<MoveOp> {
    debug_assert_eq!(original.len(), target.len());
    original
        .iter()
        .zip(target.iter())
        .filter(|(current, wanted)| current.id != wanted.id)
        .map(|(current, wanted)| MoveOp {
            tab: wanted.id,
            to_index: current.index,
        })
        .collect()
}

/// Issue the planned moves strictly in order, each awaited before the next
///
/// A failed move is logged and skipped; the rest of the plan still runs.
/// Returns the number of tabs actually moved.
pub async fn execute_moves(api: &dyn TabApi, moves: &[MoveOp]) -> usize {
    let mut moved = 0;
    for op in moves {
        match api.move_tab(op.tab, op.to_index).await {
            Ok(()) => moved += 1,
            Err(error) => {
                warn!(tab = %op.tab, index = op.to_index, %error, "tab move failed");
            }
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{make_tab, FakeTabApi};
    use crate::types::WindowId;

    fn tabs(ids_at_indices: &[(i64, u32)]) -> Vec<Tab> {
        ids_at_indices
            .iter()
            .map(|&(id, index)| make_tab(id, index, "https://example.com", "t"))
            .collect()
    }

    #[test]
    fn sorted_input_plans_zero_moves() {
        let original = tabs(&[(1, 0), (2, 1), (3, 2)]);
        assert!(plan_moves(&original, &original).is_empty());
    }

    #[test]
    fn differing_positions_move_the_target_tab_into_the_slot() {
        let original = tabs(&[(1, 0), (2, 1), (3, 2)]);
        let target = tabs(&[(3, 2), (1, 0), (2, 1)]);
        let plan = plan_moves(&original, &target);
        assert_eq!(
            plan,
            vec![
                MoveOp { tab: crate::types::TabId(3), to_index: 0 },
                MoveOp { tab: crate::types::TabId(1), to_index: 1 },
                MoveOp { tab: crate::types::TabId(2), to_index: 2 },
            ]
        );
    }

    #[test]
    fn slots_come_from_the_partition_span_not_zero() {
        // A partition sitting behind two pinned tabs: indices 2 and 3.
        let original = tabs(&[(10, 2), (11, 3)]);
        let target = tabs(&[(11, 3), (10, 2)]);
        let plan = plan_moves(&original, &target);
        assert_eq!(plan[0].to_index, 2);
        assert_eq!(plan[1].to_index, 3);
    }

    #[tokio::test]
    async fn executing_a_plan_converges_on_the_target_order() {
        let api = FakeTabApi::new(tabs(&[(1, 0), (2, 1), (3, 2)]));
        let original = api.list_tabs(crate::types::Scope::CurrentWindow).await.unwrap();
        let target = tabs(&[(2, 1), (3, 2), (1, 0)]);

        let moved = execute_moves(&api, &plan_moves(&original, &target)).await;
        assert_eq!(moved, 3);
        assert_eq!(
            api.order(WindowId(1)),
            vec![
                crate::types::TabId(2),
                crate::types::TabId(3),
                crate::types::TabId(1)
            ]
        );
    }

    #[tokio::test]
    async fn a_failed_move_does_not_abort_the_rest_of_the_plan() {
        let api = FakeTabApi::new(tabs(&[(1, 0), (2, 1), (3, 2)]));
        api.fail_moves_of(crate::types::TabId(3));

        let original = api.list_tabs(crate::types::Scope::CurrentWindow).await.unwrap();
        let target = tabs(&[(3, 2), (2, 1), (1, 0)]);
        let moved = execute_moves(&api, &plan_moves(&original, &target)).await;

        // Tab 3 never moved, but the other planned moves still ran.
        assert_eq!(moved, plan_moves(&original, &target).len() - 1);
        assert!(api
            .move_log()
            .iter()
            .all(|(tab, _)| *tab != crate::types::TabId(3)));
    }
}

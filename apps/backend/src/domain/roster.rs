//! Roster rotation for one team.
//!
//! The active roster is the ordered-by-position-ascending subsequence of a
//! team's members with `active = true`. `current_index` is a circular cursor
//! into that sequence. The cursor can go stale when members leave, so every
//! read clamps it into range first.

/// One active member in rotation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterMember {
    pub membership_id: i64,
    pub user_id: i64,
    /// Join order within the team; strictly increasing across the roster.
    pub position: i32,
}

/// Resolved hand/brain role holders for a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleAssignment {
    pub brain_member_id: i64,
    pub hand_member_id: i64,
    /// Index of the hand member within the active roster; rotation advances
    /// from here after the turn is consumed.
    pub hand_index: usize,
}

/// Clamp a possibly-stale cursor into `0..len`.
///
/// `len` must be > 0.
pub fn clamp_index(current_index: i32, len: usize) -> usize {
    debug_assert!(len > 0, "clamp_index requires a non-empty roster");
    let max = len - 1;
    if current_index <= 0 {
        0
    } else {
        (current_index as usize).min(max)
    }
}

/// Resolve the hand and brain members for a team's turn.
///
/// Returns `None` when the active roster is empty; the caller must reset any
/// hand-brain state instead of computing an assignment. With a single member,
/// that member holds both roles.
pub fn resolve_assignment(current_index: i32, order: &[RosterMember]) -> Option<RoleAssignment> {
    if order.is_empty() {
        return None;
    }

    let len = order.len();
    let hand_index = clamp_index(current_index, len);
    let brain_index = if len > 1 { (hand_index + 1) % len } else { hand_index };

    Some(RoleAssignment {
        brain_member_id: order[brain_index].membership_id,
        hand_member_id: order[hand_index].membership_id,
        hand_index,
    })
}

/// The member that owns the current turn slot for this team.
pub fn slot_owner(current_index: i32, order: &[RosterMember]) -> Option<RosterMember> {
    if order.is_empty() {
        return None;
    }
    Some(order[clamp_index(current_index, order.len())])
}

/// Roster index of the slot a turn consumes: the seat of the member actually
/// holding it when that member is still in the roster, otherwise the clamped
/// cursor. Returns `None` on an empty roster.
///
/// The holder can differ from the cursor seat when an assignment was pinned
/// before the roster changed shape.
pub fn consumed_slot(
    holder_member_id: Option<i64>,
    current_index: i32,
    order: &[RosterMember],
) -> Option<usize> {
    if order.is_empty() {
        return None;
    }
    holder_member_id
        .and_then(|id| order.iter().position(|m| m.membership_id == id))
        .or_else(|| Some(clamp_index(current_index, order.len())))
}

/// Cursor value after the slot at `hand_index` has consumed a turn
/// (normal move, pass, or timeout skip).
pub fn next_index_after(hand_index: usize, len: usize) -> i32 {
    if len == 0 {
        return 0;
    }
    ((hand_index + 1) % len) as i32
}

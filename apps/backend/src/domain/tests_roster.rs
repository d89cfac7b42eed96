#![cfg(test)]

use crate::domain::roster::{
    clamp_index, consumed_slot, next_index_after, resolve_assignment, slot_owner, RosterMember,
};

fn roster(ids: &[i64]) -> Vec<RosterMember> {
    ids.iter()
        .enumerate()
        .map(|(i, &id)| RosterMember {
            membership_id: id,
            user_id: 100 + id,
            position: i as i32,
        })
        .collect()
}

#[test]
fn hand_and_brain_follow_current_index() {
    let order = roster(&[10, 11, 12]);
    let roles = resolve_assignment(0, &order).unwrap();
    assert_eq!(roles.hand_member_id, 10);
    assert_eq!(roles.brain_member_id, 11);
    assert_eq!(roles.hand_index, 0);

    let roles = resolve_assignment(2, &order).unwrap();
    assert_eq!(roles.hand_member_id, 12);
    // brain wraps around to the head of the rotation
    assert_eq!(roles.brain_member_id, 10);
}

#[test]
fn single_member_plays_both_roles() {
    let order = roster(&[42]);
    let roles = resolve_assignment(0, &order).unwrap();
    assert_eq!(roles.hand_member_id, 42);
    assert_eq!(roles.brain_member_id, 42);
}

#[test]
fn empty_roster_yields_no_assignment() {
    assert_eq!(resolve_assignment(0, &[]), None);
    assert_eq!(resolve_assignment(7, &[]), None);
    assert_eq!(slot_owner(3, &[]), None);
}

#[test]
fn stale_index_clamps_to_last_valid_slot() {
    // current_index stored as 5 while only 2 members remain
    let order = roster(&[7, 8]);
    assert_eq!(clamp_index(5, 2), 1);
    let roles = resolve_assignment(5, &order).unwrap();
    assert_eq!(roles.hand_member_id, 8);
    assert_eq!(roles.brain_member_id, 7);
}

#[test]
fn negative_index_clamps_to_zero() {
    assert_eq!(clamp_index(-3, 4), 0);
}

#[test]
fn rotation_advances_past_the_consumed_slot() {
    assert_eq!(next_index_after(0, 3), 1);
    assert_eq!(next_index_after(2, 3), 0);
    assert_eq!(next_index_after(0, 1), 0);
    // empty roster keeps the cursor parked at the head
    assert_eq!(next_index_after(0, 0), 0);
}

#[test]
fn consumed_slot_prefers_the_seated_holder_over_the_cursor() {
    // The cursor clamps to the tail, but the member on the hook sits at the
    // head; their seat is the one the turn consumes.
    let order = roster(&[10, 11, 12]);
    assert_eq!(consumed_slot(Some(10), 5, &order), Some(0));
    assert_eq!(consumed_slot(Some(11), 0, &order), Some(1));
}

#[test]
fn consumed_slot_falls_back_to_the_clamp_when_the_holder_left() {
    let order = roster(&[11, 12]);
    assert_eq!(consumed_slot(Some(99), 5, &order), Some(1));
    assert_eq!(consumed_slot(None, 5, &order), Some(1));
    assert_eq!(consumed_slot(None, 0, &order), Some(0));
}

#[test]
fn consumed_slot_is_none_for_an_empty_roster() {
    assert_eq!(consumed_slot(Some(10), 0, &[]), None);
    assert_eq!(consumed_slot(None, 3, &[]), None);
}

#[test]
fn slot_owner_is_the_hand_member() {
    let order = roster(&[1, 2, 3]);
    for idx in [0, 1, 2, 9] {
        let owner = slot_owner(idx, &order).unwrap();
        let roles = resolve_assignment(idx, &order).unwrap();
        assert_eq!(owner.membership_id, roles.hand_member_id);
    }
}

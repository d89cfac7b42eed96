#![cfg(test)]

use proptest::prelude::*;
use time::macros::datetime;
use time::Duration;

use crate::domain::roster::{next_index_after, resolve_assignment, RosterMember};
use crate::domain::turn::{advanced, TeamSide, TurnClock};

fn roster_of_len(len: usize) -> Vec<RosterMember> {
    (0..len)
        .map(|i| RosterMember {
            membership_id: i as i64 + 1,
            user_id: i as i64 + 1,
            position: i as i32,
        })
        .collect()
}

proptest! {
    /// Over any sequence of accepted events, turn_team strictly alternates
    /// and ply increases by exactly 1 each time.
    #[test]
    fn turn_team_alternates_and_ply_increments(steps in 1usize..200) {
        let start = datetime!(2025-09-01 12:00 UTC);
        let mut clock = TurnClock {
            turn_team: TeamSide::A,
            ply: 0,
            deadline: start + Duration::seconds(60),
        };

        let mut now = start;
        for i in 0..steps {
            let prev = clock;
            now += Duration::seconds(5);
            clock = advanced(&clock, now, 60);
            prop_assert_eq!(clock.turn_team, prev.turn_team.opponent());
            prop_assert_eq!(clock.ply, prev.ply + 1);
            prop_assert_eq!(clock.ply, i as i32 + 1);
        }
    }

    /// The rotation cursor stays in range no matter how many turns a team
    /// of any size consumes, and it visits every slot cyclically.
    #[test]
    fn rotation_cursor_cycles_through_active_members(len in 1usize..8, turns in 1usize..50) {
        let order = roster_of_len(len);
        let mut index: i32 = 0;
        let mut seen = vec![0usize; len];

        for _ in 0..turns {
            let roles = resolve_assignment(index, &order).unwrap();
            prop_assert!(roles.hand_index < len);
            seen[roles.hand_index] += 1;
            index = next_index_after(roles.hand_index, len);
        }

        // Cyclic fairness: visit counts differ by at most one.
        let max = seen.iter().copied().max().unwrap();
        let min = seen.iter().copied().min().unwrap();
        prop_assert!(max - min <= 1);
    }

    /// Brain and hand are distinct whenever the roster has two or more
    /// members, and identical for a single-member team.
    #[test]
    fn brain_and_hand_distinct_iff_multiple_members(len in 1usize..8, index in 0i32..32) {
        let order = roster_of_len(len);
        let roles = resolve_assignment(index, &order).unwrap();
        if len > 1 {
            prop_assert_ne!(roles.brain_member_id, roles.hand_member_id);
        } else {
            prop_assert_eq!(roles.brain_member_id, roles.hand_member_id);
        }
    }
}

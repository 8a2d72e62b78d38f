//! Standings: turn per-trainer aggregates into a strict, tie-broken ranking.
//!
//! Criteria, in priority order: points, lives, set balance, head-to-head sets
//! between the two trainers being compared, then nickname ascending. The
//! nickname is a last resort to keep positions unique, not a sporting
//! criterion.

use std::cmp::Ordering;

use crate::models::{MatchRecord, StandingRecord};

/// Rank a league's standings.
///
/// `played_matches` is only consulted for the head-to-head criterion; rows
/// with `played = false` are ignored. Returns the records sorted best-first
/// with `position` set to 1..N. An empty input yields an empty ranking.
pub fn rank_standings(
    records: Vec<StandingRecord>,
    played_matches: &[MatchRecord],
) -> Vec<StandingRecord> {
    let mut canonical = records;
    canonical.sort_by(|a, b| {
        a.nickname
            .cmp(&b.nickname)
            .then_with(|| a.trainer_id.cmp(&b.trainer_id))
    });

    // Head-to-head can be cyclic among three or more tied trainers, so this is
    // not a total order. An insertion pass over the canonical order never
    // panics and gives the same result for the same set of records.
    let mut ranked: Vec<StandingRecord> = Vec::with_capacity(canonical.len());
    for record in canonical {
        let at = ranked
            .iter()
            .position(|placed| compare_standings(&record, placed, played_matches) == Ordering::Less)
            .unwrap_or(ranked.len());
        ranked.insert(at, record);
    }

    for (index, record) in ranked.iter_mut().enumerate() {
        record.position = Some(index as u32 + 1);
    }

    ranked
}

/// `Ordering::Less` when `a` ranks ahead of `b`.
pub fn compare_standings(
    a: &StandingRecord,
    b: &StandingRecord,
    played_matches: &[MatchRecord],
) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then_with(|| b.lives.cmp(&a.lives))
        .then_with(|| b.set_balance.cmp(&a.set_balance))
        .then_with(|| {
            let (a_sets, b_sets) = head_to_head_sets(a, b, played_matches);
            b_sets.cmp(&a_sets)
        })
        .then_with(|| a.nickname.cmp(&b.nickname))
        .then_with(|| a.trainer_id.cmp(&b.trainer_id))
}

/// Sets won by each of `a` and `b` in played matches between exactly those two.
pub fn head_to_head_sets(
    a: &StandingRecord,
    b: &StandingRecord,
    played_matches: &[MatchRecord],
) -> (i32, i32) {
    played_matches
        .iter()
        .filter(|m| m.played && m.involves(a.trainer_id) && m.involves(b.trainer_id))
        .fold((0, 0), |(a_sets, b_sets), m| {
            (
                a_sets + m.sets_won_by(a.trainer_id).unwrap_or(0),
                b_sets + m.sets_won_by(b.trainer_id).unwrap_or(0),
            )
        })
}

#[cfg(test)]
#[path = "standings_test.rs"]
mod standings_test;

//! Playoff progression: the cut ("Cruces") from a final ranking, the finals
//! from cut results, and the cross-division Olympus contention.

use std::collections::HashMap;

use uuid::Uuid;

use crate::engine::DataError;
use crate::models::{
    finals_slots, DivisionTier, League, MatchGroup, MatchRecord, Matchup, NewMatch, Score,
    SlotTag, StandingRecord, TeamRef,
};

/// Ranked participants needed to fill the cut.
pub const CUT_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Winner,
    Loser,
}

/// Seed pairs of the cut, 1-based.
const CUT_SEEDS: [(SlotTag, usize, usize, MatchGroup); 4] = [
    (SlotTag::Semi1, 1, 4, MatchGroup::Upper),
    (SlotTag::Semi2, 2, 3, MatchGroup::Upper),
    (SlotTag::Survival1, 5, 8, MatchGroup::Lower),
    (SlotTag::Survival2, 6, 7, MatchGroup::Lower),
];

/// Finals wiring: index into `finals_slots`, the two source slots, which
/// side of each source advances, and the bracket the match belongs to.
const FINALS_WIRING: [(usize, SlotTag, SlotTag, Side, MatchGroup); 4] = [
    (0, SlotTag::Semi1, SlotTag::Semi2, Side::Winner, MatchGroup::Upper),
    (1, SlotTag::Semi1, SlotTag::Semi2, Side::Loser, MatchGroup::Upper),
    (2, SlotTag::Survival1, SlotTag::Survival2, Side::Winner, MatchGroup::Lower),
    (3, SlotTag::Survival1, SlotTag::Survival2, Side::Loser, MatchGroup::Lower),
];

// =============================================================================
// STAGE A: CUT
// =============================================================================

/// The eight best positioned records, best first.
fn cut_seeds(ranking: &[StandingRecord]) -> Result<Vec<&StandingRecord>, DataError> {
    let mut positioned: Vec<&StandingRecord> =
        ranking.iter().filter(|r| r.position.is_some()).collect();

    if positioned.len() < CUT_SIZE {
        return Err(DataError::InsufficientParticipants {
            required: CUT_SIZE,
            found: positioned.len(),
        });
    }

    positioned.sort_by_key(|r| r.position);
    positioned.truncate(CUT_SIZE);
    Ok(positioned)
}

/// Cut pairings projected from a ranking: 1v4 and 2v3 on the championship
/// track, 5v8 and 6v7 on the survival track.
pub fn cut_matchups(ranking: &[StandingRecord]) -> Result<Vec<Matchup>, DataError> {
    let seeds = cut_seeds(ranking)?;

    Ok(CUT_SEEDS
        .iter()
        .map(|&(tag, home, away, _)| {
            Matchup::new(tag, team_ref(seeds[home - 1]), team_ref(seeds[away - 1]))
        })
        .collect())
}

/// The four unplayed cut fixtures for a league. Nothing is produced unless
/// all four can be.
pub fn generate_cut(
    league: &League,
    ranking: &[StandingRecord],
    cut_round: i32,
) -> Result<Vec<NewMatch>, DataError> {
    let seeds = cut_seeds(ranking)?;

    Ok(CUT_SEEDS
        .iter()
        .map(|&(tag, home, away, group)| NewMatch {
            league_id: league.id,
            split_id: league.split_id,
            round: cut_round,
            match_group: group,
            match_tag: Some(tag.as_str().to_string()),
            home_trainer_id: Some(seeds[home - 1].trainer_id),
            away_trainer_id: Some(seeds[away - 1].trainer_id),
            scheduled_at: None,
        })
        .collect())
}

// =============================================================================
// STAGE B: FINALS
// =============================================================================

/// Finals matchups for display. Sources that are not played yet show up as
/// placeholders with position 0.
pub fn finals_matchups(
    tier: DivisionTier,
    cut_records: &[MatchRecord],
    ranking: &[StandingRecord],
) -> Result<Vec<Matchup>, DataError> {
    let slots = find_slots(cut_records, &SlotTag::CUT)?;
    let lookup = trainer_lookup(ranking);
    let finals = finals_slots(tier);

    FINALS_WIRING
        .iter()
        .map(|&(index, home_src, away_src, side, _)| {
            let home = resolve_side(home_src, slots[&home_src], side, &lookup)?;
            let away = resolve_side(away_src, slots[&away_src], side, &lookup)?;
            Ok(Matchup::new(finals[index], home, away))
        })
        .collect()
}

/// Finals skeleton with every slot unresolved, for when the cut is not
/// generated yet.
pub fn finals_placeholders(tier: DivisionTier) -> Vec<Matchup> {
    let finals = finals_slots(tier);

    FINALS_WIRING
        .iter()
        .map(|&(index, home_src, away_src, side, _)| {
            Matchup::new(
                finals[index],
                TeamRef::placeholder(side_label(home_src, side)),
                TeamRef::placeholder(side_label(away_src, side)),
            )
        })
        .collect()
}

/// The four unplayed finals fixtures. Every cut match must be played.
pub fn generate_finals(
    league: &League,
    cut_records: &[MatchRecord],
    finals_round: i32,
) -> Result<Vec<NewMatch>, DataError> {
    let slots = find_slots(cut_records, &SlotTag::CUT)?;

    let mut outcomes = HashMap::new();
    for tag in SlotTag::CUT {
        let outcome = slots[&tag]
            .outcome()?
            .ok_or_else(|| DataError::PendingResult {
                tag: tag.as_str().to_string(),
            })?;
        outcomes.insert(tag, outcome);
    }

    let finals = finals_slots(league.tier);

    Ok(FINALS_WIRING
        .iter()
        .map(|&(index, home_src, away_src, side, group)| {
            let pick = |tag: SlotTag| {
                let outcome = &outcomes[&tag];
                match side {
                    Side::Winner => outcome.winner,
                    Side::Loser => outcome.loser,
                }
            };

            NewMatch {
                league_id: league.id,
                split_id: league.split_id,
                round: finals_round,
                match_group: group,
                match_tag: Some(finals[index].as_str().to_string()),
                home_trainer_id: Some(pick(home_src)),
                away_trainer_id: Some(pick(away_src)),
                scheduled_at: None,
            }
        })
        .collect())
}

// =============================================================================
// OLYMPUS
// =============================================================================

/// Who is currently in contention for the Olympus decider: the loser of the
/// Primera "stay up" match against the winner of the Segunda promotion match.
/// Only a read view; the fixture itself is created by hand.
pub fn olympus_matchup(
    upper_finals: &[MatchRecord],
    upper_ranking: &[StandingRecord],
    lower_finals: &[MatchRecord],
    lower_ranking: &[StandingRecord],
) -> Result<Matchup, DataError> {
    let home = contender(
        upper_finals,
        upper_ranking,
        SlotTag::StayUp,
        Side::Loser,
        DivisionTier::Upper,
    )?;
    let away = contender(
        lower_finals,
        lower_ranking,
        SlotTag::Promotion,
        Side::Winner,
        DivisionTier::Lower,
    )?;

    Ok(Matchup::new(SlotTag::Olympus, home, away))
}

fn contender(
    finals: &[MatchRecord],
    ranking: &[StandingRecord],
    tag: SlotTag,
    side: Side,
    tier: DivisionTier,
) -> Result<TeamRef, DataError> {
    let label = format!("{} ({})", side_label(tag, side), tier.display_name());

    match finals.iter().find(|m| m.tag() == tag.as_str()) {
        Some(record) => {
            let team = resolve_side(tag, record, side, &trainer_lookup(ranking))?;
            if team.is_resolved() {
                Ok(team)
            } else {
                Ok(TeamRef::placeholder(label))
            }
        }
        None => Ok(TeamRef::placeholder(label)),
    }
}

// =============================================================================
// STORED BRACKETS
// =============================================================================

/// Matchups for stored playoff rows, in the order given, with the score once
/// played. Rows without a recognised slot tag are skipped.
pub fn stored_matchups(
    records: &[MatchRecord],
    ranking: &[StandingRecord],
) -> Result<Vec<Matchup>, DataError> {
    let lookup = trainer_lookup(ranking);

    records
        .iter()
        .filter_map(|record| {
            record
                .tag()
                .parse::<SlotTag>()
                .ok()
                .map(|tag| (tag, record))
        })
        .map(|(tag, record)| {
            let home = slot_team(record.home_trainer_id, &lookup)?;
            let away = slot_team(record.away_trainer_id, &lookup)?;
            let mut matchup = Matchup::new(tag, home, away);
            if record.outcome()?.is_some() {
                matchup.score = Some(Score {
                    home: record.home_sets.unwrap_or(0),
                    away: record.away_sets.unwrap_or(0),
                });
            }
            Ok(matchup)
        })
        .collect()
}

// =============================================================================
// HELPERS
// =============================================================================

type TrainerLookup<'a> = HashMap<Uuid, &'a StandingRecord>;

fn trainer_lookup(ranking: &[StandingRecord]) -> TrainerLookup<'_> {
    ranking.iter().map(|r| (r.trainer_id, r)).collect()
}

fn team_ref(record: &StandingRecord) -> TeamRef {
    TeamRef {
        trainer_id: Some(record.trainer_id),
        nickname: record.nickname.clone(),
        avatar_url: record.avatar_url.clone(),
        position: record.position.unwrap_or(0),
    }
}

fn slot_team(trainer_id: Option<Uuid>, lookup: &TrainerLookup<'_>) -> Result<TeamRef, DataError> {
    match trainer_id {
        Some(id) => lookup
            .get(&id)
            .map(|record| team_ref(record))
            .ok_or(DataError::UnknownTrainer(id)),
        None => Ok(TeamRef::placeholder("Por definir")),
    }
}

fn side_label(tag: SlotTag, side: Side) -> String {
    match side {
        Side::Winner => tag.winner_label(),
        Side::Loser => tag.loser_label(),
    }
}

/// Locate one record per tag, reporting every missing tag at once.
fn find_slots<'a>(
    records: &'a [MatchRecord],
    tags: &[SlotTag],
) -> Result<HashMap<SlotTag, &'a MatchRecord>, DataError> {
    let mut slots = HashMap::new();
    let mut missing = Vec::new();

    for &tag in tags {
        match records.iter().find(|m| m.tag() == tag.as_str()) {
            Some(record) => {
                slots.insert(tag, record);
            }
            None => missing.push(tag.as_str().to_string()),
        }
    }

    if missing.is_empty() {
        Ok(slots)
    } else {
        Err(DataError::IncompletePriorRound { missing })
    }
}

fn resolve_side(
    tag: SlotTag,
    record: &MatchRecord,
    side: Side,
    lookup: &TrainerLookup<'_>,
) -> Result<TeamRef, DataError> {
    match record.outcome()? {
        Some(outcome) => {
            let id = match side {
                Side::Winner => outcome.winner,
                Side::Loser => outcome.loser,
            };
            lookup
                .get(&id)
                .map(|r| team_ref(r))
                .ok_or(DataError::UnknownTrainer(id))
        }
        None => Ok(TeamRef::placeholder(side_label(tag, side))),
    }
}

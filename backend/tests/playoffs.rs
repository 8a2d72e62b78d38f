use std::collections::HashMap;

use chrono::Utc;
use pokeleague_backend::engine::{
    finals_matchups, generate_cut, generate_finals, olympus_matchup, rank_standings, DataError,
};
use pokeleague_backend::models::{
    DivisionTier, League, MatchGroup, MatchRecord, NewMatch, SlotTag, StandingRecord,
};
use uuid::Uuid;

fn league(tier: DivisionTier, seed: u128) -> League {
    League {
        id: Uuid::from_u128(seed),
        split_id: Uuid::from_u128(7),
        name: format!("Liga {}", tier.display_name()),
        tier,
    }
}

fn roster(names: &[&str], offset: u128) -> Vec<StandingRecord> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| StandingRecord::new(Uuid::from_u128(offset + i as u128), *name))
        .collect()
}

fn played(league: &League, round: i32, home: Uuid, away: Uuid, sets: (i32, i32)) -> MatchRecord {
    MatchRecord {
        id: Uuid::new_v4(),
        league_id: league.id,
        split_id: league.split_id,
        round,
        match_group: MatchGroup::Regular,
        match_tag: None,
        home_trainer_id: Some(home),
        away_trainer_id: Some(away),
        home_sets: Some(sets.0),
        away_sets: Some(sets.1),
        played: true,
        scheduled_at: None,
        created_at: Utc::now(),
    }
}

/// Store generated fixtures and enter results in the order given.
fn store(rows: Vec<NewMatch>, results: &[(i32, i32)]) -> Vec<MatchRecord> {
    rows.into_iter()
        .zip(results)
        .map(|(row, &(home, away))| MatchRecord {
            id: Uuid::new_v4(),
            league_id: row.league_id,
            split_id: row.split_id,
            round: row.round,
            match_group: row.match_group,
            match_tag: row.match_tag,
            home_trainer_id: row.home_trainer_id,
            away_trainer_id: row.away_trainer_id,
            home_sets: Some(home),
            away_sets: Some(away),
            played: true,
            scheduled_at: row.scheduled_at,
            created_at: Utc::now(),
        })
        .collect()
}

/// Sum the regular season the same way the standings view does.
fn tally(roster: &[StandingRecord], matches: &[MatchRecord]) -> Vec<StandingRecord> {
    let mut totals: HashMap<Uuid, StandingRecord> =
        roster.iter().map(|r| (r.trainer_id, r.clone())).collect();

    for m in matches {
        let (Some(home), Some(away), Some(hs), Some(aws)) =
            (m.home_trainer_id, m.away_trainer_id, m.home_sets, m.away_sets)
        else {
            continue;
        };
        for (id, won, lost) in [(home, hs, aws), (away, aws, hs)] {
            if let Some(record) = totals.get_mut(&id) {
                record.matches_played += 1;
                record.total_sets_won += won;
                record.set_balance += won - lost;
                if won > lost {
                    record.total_points += 3;
                }
            }
        }
    }

    roster
        .iter()
        .filter_map(|r| totals.remove(&r.trainer_id))
        .collect()
}

/// Round robin where the lower roster index always wins 2-0.
fn seeded_season(league: &League, roster: &[StandingRecord]) -> Vec<MatchRecord> {
    let mut matches = Vec::new();
    let mut round = 1;
    for (i, home) in roster.iter().enumerate() {
        for away in &roster[i + 1..] {
            matches.push(played(league, round, home.trainer_id, away.trainer_id, (2, 0)));
            round += 1;
        }
    }
    matches
}

fn nickname_of(ranking: &[StandingRecord], id: Option<Uuid>) -> &str {
    ranking
        .iter()
        .find(|r| Some(r.trainer_id) == id)
        .map(|r| r.nickname.as_str())
        .unwrap_or("?")
}

const UPPER: [&str; 8] = ["Ash", "Misty", "Brock", "Gary", "Dawn", "May", "Max", "Iris"];
const LOWER: [&str; 8] = ["Cilan", "Serena", "Clemont", "Lillie", "Kiawe", "Lana", "Mallow", "Sophocles"];

#[test]
fn test_full_split_from_regular_season_to_olympus() {
    let upper = league(DivisionTier::Upper, 1);
    let lower = league(DivisionTier::Lower, 2);
    let upper_roster = roster(&UPPER, 10);
    let lower_roster = roster(&LOWER, 20);

    // Regular season.
    let upper_season = seeded_season(&upper, &upper_roster);
    let upper_ranking = rank_standings(tally(&upper_roster, &upper_season), &upper_season);
    let lower_season = seeded_season(&lower, &lower_roster);
    let lower_ranking = rank_standings(tally(&lower_roster, &lower_season), &lower_season);

    let order: Vec<&str> = upper_ranking.iter().map(|r| r.nickname.as_str()).collect();
    assert_eq!(order, UPPER.to_vec());
    assert_eq!(upper_ranking[0].total_points, 21);
    assert_eq!(upper_ranking[7].position, Some(8));

    // Cut: every home side wins.
    let upper_cut = store(generate_cut(&upper, &upper_ranking, 100).unwrap(), &[(2, 0); 4]);
    let lower_cut = store(generate_cut(&lower, &lower_ranking, 100).unwrap(), &[(2, 0); 4]);

    let pairs: Vec<(&str, &str, &str)> = upper_cut
        .iter()
        .map(|m| {
            (
                m.tag(),
                nickname_of(&upper_ranking, m.home_trainer_id),
                nickname_of(&upper_ranking, m.away_trainer_id),
            )
        })
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("semi_1", "Ash", "Gary"),
            ("semi_2", "Misty", "Brock"),
            ("survival_1", "Dawn", "Iris"),
            ("survival_2", "May", "Max"),
        ]
    );

    // Finals: away sides win the stay-up and promotion deciders.
    let upper_finals_rows = generate_finals(&upper, &upper_cut, 101).unwrap();
    let stay_up = upper_finals_rows
        .iter()
        .find(|m| m.match_tag.as_deref() == Some("stay_up"))
        .unwrap();
    assert_eq!(nickname_of(&upper_ranking, stay_up.home_trainer_id), "Dawn");
    assert_eq!(nickname_of(&upper_ranking, stay_up.away_trainer_id), "May");
    assert_eq!(stay_up.match_group, MatchGroup::Lower);

    let upper_finals = store(upper_finals_rows, &[(2, 1), (2, 1), (0, 2), (2, 1)]);
    let lower_finals = store(
        generate_finals(&lower, &lower_cut, 101).unwrap(),
        &[(1, 2), (2, 1), (2, 0), (2, 0)],
    );

    let tags: Vec<&str> = lower_finals.iter().map(|m| m.tag()).collect();
    assert_eq!(tags, vec!["promotion", "third_place", "survival_final", "honor"]);

    // Olympus: Primera stay-up loser against Segunda promotion winner.
    let olympus =
        olympus_matchup(&upper_finals, &upper_ranking, &lower_finals, &lower_ranking).unwrap();
    assert_eq!(olympus.tag, SlotTag::Olympus);
    assert_eq!(olympus.home.nickname, "Dawn");
    assert_eq!(olympus.home.position, 5);
    assert_eq!(olympus.away.nickname, "Serena");
    assert_eq!(olympus.away.position, 2);
}

#[test]
fn test_short_league_cannot_enter_playoffs() {
    let upper = league(DivisionTier::Upper, 1);
    let short = roster(&UPPER[..7], 10);
    let season = seeded_season(&upper, &short);
    let ranking = rank_standings(tally(&short, &season), &season);

    let err = generate_cut(&upper, &ranking, 100).unwrap_err();
    assert_eq!(
        err,
        DataError::InsufficientParticipants {
            required: 8,
            found: 7
        }
    );
}

#[test]
fn test_finals_wait_for_every_cut_result() {
    let upper = league(DivisionTier::Upper, 1);
    let upper_roster = roster(&UPPER, 10);
    let season = seeded_season(&upper, &upper_roster);
    let ranking = rank_standings(tally(&upper_roster, &season), &season);

    let mut cut = store(generate_cut(&upper, &ranking, 100).unwrap(), &[(2, 0); 4]);
    cut[3].played = false;
    cut[3].home_sets = None;
    cut[3].away_sets = None;

    let err = generate_finals(&upper, &cut, 101).unwrap_err();
    assert_eq!(
        err,
        DataError::PendingResult {
            tag: "survival_2".to_string()
        }
    );

    // The display still resolves what is known.
    let matchups = finals_matchups(DivisionTier::Upper, &cut, &ranking).unwrap();
    let stay_up = matchups.iter().find(|m| m.tag == SlotTag::StayUp).unwrap();
    assert_eq!(stay_up.home.nickname, "Dawn");
    assert!(!stay_up.away.is_resolved());
}

#[test]
fn test_finals_need_the_whole_cut() {
    let upper = league(DivisionTier::Upper, 1);
    let upper_roster = roster(&UPPER, 10);
    let season = seeded_season(&upper, &upper_roster);
    let ranking = rank_standings(tally(&upper_roster, &season), &season);

    let mut cut = store(generate_cut(&upper, &ranking, 100).unwrap(), &[(2, 0); 4]);
    cut.retain(|m| m.tag() != "semi_2");

    match generate_finals(&upper, &cut, 101) {
        Err(DataError::IncompletePriorRound { missing }) => {
            assert_eq!(missing, vec!["semi_2".to_string()])
        }
        other => panic!("expected incomplete prior round, got {:?}", other),
    }
}

use demostats_types::{GameMode, TestType};

use super::*;
use crate::demo_event::{
    FeedbackMessage, FreezetimeEnded, MatchStarted, PlayerSnapshot, RoundEndReason, RoundEnded,
    RoundOfficiallyEnded, Team, TeamEquipment, TeamRoster,
};
use crate::timeline::{EventKind, EventTimeline};

fn roster() -> Vec<PlayerSnapshot> {
    let mut t = PlayerSnapshot::new(1, 100, "Terry", Team::Terrorist);
    t.current_equipment_value = 4700;
    t.round_start_equipment_value = 800;
    let mut ct = PlayerSnapshot::new(2, 200, "Connie", Team::CounterTerrorist);
    ct.current_equipment_value = 5100;
    ct.round_start_equipment_value = 1000;
    vec![t, ct]
}

fn ended(winner: Team, reason: RoundEndReason, length: f64) -> RoundEnded {
    RoundEnded {
        winner,
        reason,
        message: String::new(),
        length,
    }
}

fn official(length: f64) -> RoundOfficiallyEnded {
    RoundOfficiallyEnded {
        winner: Team::Unknown,
        reason: RoundEndReason::Unknown,
        message: String::new(),
        length,
    }
}

fn freeze(time_end: f64) -> FreezetimeEnded {
    FreezetimeEnded { time_end }
}

#[test]
fn test_missing_official_end_is_synthesized_on_next_freezetime() {
    let reconstructor = RoundReconstructor::new(GameMode::Defuse, TestType::Casual);
    let mut timeline = EventTimeline::new();
    let players = roster();

    reconstructor.on_freezetime_ended(&mut timeline, &players, freeze(10.0));
    reconstructor.on_round_ended(&mut timeline, &players, ended(Team::Terrorist, RoundEndReason::TargetBombed, 75.0));
    let flow = reconstructor.on_freezetime_ended(&mut timeline, &players, freeze(95.0));

    assert_eq!(flow, RoundFlow::Continue);
    let counts = LifecycleCounts::of(&timeline);
    assert_eq!((counts.ended, counts.officially_ended, counts.freezetime_ended), (1, 1, 2));

    let synthesized = timeline.nth::<RoundOfficiallyEnded>(0).unwrap();
    assert_eq!(synthesized.winner, Team::Terrorist);
    assert_eq!(synthesized.reason, RoundEndReason::TargetBombed);
    assert_eq!(synthesized.length, 75.0 + ESTIMATED_LENGTH_PADDING);

    // Rosters for round 1 and round 2
    let rounds: Vec<i32> = timeline.records::<TeamRoster>().map(|r| r.round).collect();
    assert_eq!(rounds, vec![1, 2]);
}

#[test]
fn test_counts_balance_after_gaps() {
    let reconstructor = RoundReconstructor::new(GameMode::Defuse, TestType::Casual);
    let mut timeline = EventTimeline::new();
    let players = roster();

    // Round 1: no freezetime end observed
    reconstructor.on_round_ended(&mut timeline, &players, ended(Team::Terrorist, RoundEndReason::TerroristsWin, 40.0));
    reconstructor.on_round_officially_ended(&mut timeline, &players, official(45.0));
    // Round 2: only the official end arrives
    reconstructor.on_freezetime_ended(&mut timeline, &players, freeze(60.0));
    reconstructor.on_round_officially_ended(&mut timeline, &players, official(50.0));

    let counts = LifecycleCounts::of(&timeline);
    assert!(counts.is_balanced());
    assert_eq!(counts.ended, 2);

    let first = timeline.nth::<FreezetimeEnded>(0).unwrap();
    assert!(first.is_synthesized());

    let second = timeline.nth::<RoundEnded>(1).unwrap();
    assert_eq!(second.winner, Team::Unknown);
    assert_eq!(timeline.nth::<RoundOfficiallyEnded>(1).map(|o| o.length), Some(50.0));
}

#[test]
fn test_official_end_outcome_comes_from_round_end() {
    let reconstructor = RoundReconstructor::new(GameMode::Defuse, TestType::Casual);
    let mut timeline = EventTimeline::new();
    let players = roster();

    reconstructor.on_freezetime_ended(&mut timeline, &players, freeze(5.0));
    reconstructor.on_round_ended(&mut timeline, &players, ended(Team::CounterTerrorist, RoundEndReason::BombDefused, 90.0));
    let mut noisy = official(96.0);
    noisy.winner = Team::Terrorist;
    noisy.reason = RoundEndReason::TargetBombed;
    reconstructor.on_round_officially_ended(&mut timeline, &players, noisy);

    let stored = timeline.nth::<RoundOfficiallyEnded>(0).unwrap();
    assert_eq!(stored.winner, Team::CounterTerrorist);
    assert_eq!(stored.reason, RoundEndReason::BombDefused);
    assert_eq!(stored.length, 96.0);
}

#[test]
fn test_feedback_retimed_when_freezetime_missing() {
    let reconstructor = RoundReconstructor::new(GameMode::Defuse, TestType::Casual);
    let mut timeline = EventTimeline::new();
    let players = roster();

    timeline.push(FeedbackMessage {
        round: 1,
        time_in_round: 12.5,
        message: ">fb stuck on crate".to_string(),
        ..Default::default()
    });
    reconstructor.on_round_ended(&mut timeline, &players, ended(Team::Terrorist, RoundEndReason::TerroristsWin, 40.0));

    let message = timeline.nth::<FeedbackMessage>(0).unwrap();
    assert_eq!(message.time_in_round, FreezetimeEnded::UNKNOWN_TIME);
}

#[test]
fn test_terminal_freezetime_halts_without_storing() {
    let reconstructor = RoundReconstructor::new(GameMode::DangerZone, TestType::Casual);
    assert_eq!(reconstructor.min_rounds_for_win(), Some(2));
    let mut timeline = EventTimeline::new();
    let players = roster();

    reconstructor.on_freezetime_ended(&mut timeline, &players, freeze(1.0));
    reconstructor.on_round_ended(&mut timeline, &players, ended(Team::Terrorist, RoundEndReason::SurvivalWin, 30.0));
    reconstructor.on_round_officially_ended(&mut timeline, &players, official(34.0));
    reconstructor.on_freezetime_ended(&mut timeline, &players, freeze(40.0));
    reconstructor.on_round_ended(&mut timeline, &players, ended(Team::Terrorist, RoundEndReason::SurvivalWin, 20.0));

    let flow = reconstructor.on_freezetime_ended(&mut timeline, &players, freeze(70.0));
    assert_eq!(flow, RoundFlow::Halt);

    let counts = LifecycleCounts::of(&timeline);
    assert!(counts.is_balanced());
    assert_eq!(counts.freezetime_ended, 2);
    assert_eq!(timeline.last::<RoundOfficiallyEnded>().map(|o| o.length), Some(24.0));
}

#[test]
fn test_no_halt_below_minimum_rounds() {
    let reconstructor = RoundReconstructor::new(GameMode::Defuse, TestType::Casual);
    let mut timeline = EventTimeline::new();
    let players = roster();

    reconstructor.on_freezetime_ended(&mut timeline, &players, freeze(1.0));
    reconstructor.on_round_ended(&mut timeline, &players, ended(Team::Terrorist, RoundEndReason::TargetBombed, 75.0));
    let flow = reconstructor.on_freezetime_ended(&mut timeline, &players, freeze(90.0));

    assert_eq!(flow, RoundFlow::Continue);
    assert_eq!(timeline.count(EventKind::FreezetimeEnded), 2);
}

#[test]
fn test_close_open_round() {
    let reconstructor = RoundReconstructor::new(GameMode::Defuse, TestType::Casual);
    let mut timeline = EventTimeline::new();
    let players = roster();

    reconstructor.on_freezetime_ended(&mut timeline, &players, freeze(1.0));
    reconstructor.on_round_ended(&mut timeline, &players, ended(Team::CounterTerrorist, RoundEndReason::CTsWin, 50.0));
    reconstructor.close_open_round(&mut timeline, &players);
    reconstructor.close_open_round(&mut timeline, &players);

    let counts = LifecycleCounts::of(&timeline);
    assert!(counts.is_balanced());
    assert_eq!(counts.officially_ended, 1);
}

#[test]
fn test_roster_and_equipment_recorded_at_freezetime() {
    let reconstructor = RoundReconstructor::new(GameMode::Defuse, TestType::Casual);
    let mut timeline = EventTimeline::new();
    let mut players = roster();
    players.push(PlayerSnapshot::new(3, 300, "Watcher", Team::Spectate));

    reconstructor.on_freezetime_ended(&mut timeline, &players, freeze(1.0));

    let team = timeline.nth::<TeamRoster>(0).unwrap();
    assert_eq!(team.terrorists.len(), 1);
    assert_eq!(team.counter_terrorists.len(), 1);

    let equipment = timeline.nth::<TeamEquipment>(0).unwrap();
    assert_eq!(equipment.round, 1);
    assert_eq!(equipment.t_equip_value, 4700);
    assert_eq!(equipment.ct_expenditure, 4100);
}

#[test]
fn test_match_restart_keeps_feedback_as_warmup() {
    let reconstructor = RoundReconstructor::new(GameMode::Defuse, TestType::Casual);
    let mut timeline = EventTimeline::new();
    let players = roster();

    timeline.push(FeedbackMessage {
        round: 0,
        time_in_round: 0.0,
        message: ">fb warmup note".to_string(),
        ..Default::default()
    });
    reconstructor.on_freezetime_ended(&mut timeline, &players, freeze(1.0));
    timeline.push(FeedbackMessage {
        round: 1,
        time_in_round: 8.0,
        message: "!fb mid round".to_string(),
        ..Default::default()
    });
    reconstructor.on_round_ended(&mut timeline, &players, ended(Team::Terrorist, RoundEndReason::TerroristsWin, 30.0));

    reconstructor.on_match_started(
        &mut timeline,
        MatchStarted {
            map_name: "workshop/123/de_test".to_string(),
            has_bombsites: true,
        },
    );

    assert_eq!(timeline.count(EventKind::RoundEnded), 0);
    assert_eq!(timeline.count(EventKind::FreezetimeEnded), 0);
    assert_eq!(timeline.count(EventKind::MatchStarted), 1);

    let kept: Vec<(i32, f64)> = timeline
        .records::<FeedbackMessage>()
        .map(|m| (m.round, m.time_in_round))
        .collect();
    assert_eq!(kept, vec![(0, 0.0), (0, 0.0)]);
}

#[test]
fn test_current_round_waits_for_populated_roster() {
    let reconstructor = RoundReconstructor::new(GameMode::Defuse, TestType::Casual);
    let mut timeline = EventTimeline::new();
    assert_eq!(current_round(&timeline, GameMode::Defuse), 0);
    assert_eq!(current_round(&timeline, GameMode::DangerZone), 1);

    // Only one side present at the first freezetime: still warmup
    let lonely = vec![PlayerSnapshot::new(1, 100, "Terry", Team::Terrorist)];
    reconstructor.on_freezetime_ended(&mut timeline, &lonely, freeze(1.0));
    assert_eq!(current_round(&timeline, GameMode::Defuse), 0);

    let mut timeline = EventTimeline::new();
    reconstructor.on_freezetime_ended(&mut timeline, &roster(), freeze(1.0));
    assert_eq!(current_round(&timeline, GameMode::Defuse), 1);
    reconstructor.on_round_ended(&mut timeline, &roster(), ended(Team::Terrorist, RoundEndReason::TerroristsWin, 30.0));
    reconstructor.on_round_officially_ended(&mut timeline, &roster(), official(35.0));
    assert_eq!(current_round(&timeline, GameMode::Defuse), 2);
}

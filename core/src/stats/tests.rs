use demostats_types::{AllStats, GameMode, TestType, ZoneBounds};

use super::*;
use crate::context::{NoTriggers, SessionConfig, StaticTriggers};
use crate::demo_event::{
    BombDefused, BombExploded, BombPlanted, ChickenKilled, Equipment, EquipmentElement,
    FeedbackMessage, HostagePickedUp, HostageRescued, MatchStarted, NadeKind, NadeThrow,
    PlayerHurt, PlayerKilled, PlayerPositionSample, PlayerSnapshot, RoundEndReason,
    RoundOfficiallyEnded, ShotFired, SiteLetter, SwitchSides, Team, TeamRoster, Vector,
};
use crate::identity::PlayerIdentityResolver;
use crate::timeline::EventTimeline;

fn player(user_id: i32, steam_id: i64, name: &str, team: Team) -> PlayerSnapshot {
    PlayerSnapshot::new(user_id, steam_id, name, team)
}

fn official(winner: Team, reason: RoundEndReason) -> RoundOfficiallyEnded {
    RoundOfficiallyEnded {
        winner,
        reason,
        message: String::new(),
        length: 100.0,
    }
}

fn casual_defuse() -> SessionConfig {
    SessionConfig::new("C:\\demos\\pt_de_test.dem", GameMode::Defuse, TestType::Casual)
}

fn aggregate(config: &SessionConfig, identities: &PlayerIdentityResolver, timeline: &mut EventTimeline) -> AllStats {
    StatsAggregator::new(config, identities, &NoTriggers).aggregate(timeline, true)
}

fn roster(round: i32, terrorists: i32, counter_terrorists: i32) -> TeamRoster {
    let side = |count: i32, offset: i32, team: Team| {
        (0..count)
            .map(|i| player(offset + i, (offset + i) as i64, "p", team))
            .collect::<Vec<_>>()
    };
    TeamRoster {
        round,
        terrorists: side(terrorists, 1, Team::Terrorist),
        counter_terrorists: side(counter_terrorists, 100, Team::CounterTerrorist),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Site & hostage resolution
// ─────────────────────────────────────────────────────────────────────────────

fn plant_then_ambiguous_plant() -> EventTimeline {
    let mut timeline = EventTimeline::new();
    timeline.push(BombPlanted {
        round: 1,
        time_in_round: 30.0,
        site: SiteLetter::A,
        ..Default::default()
    });
    timeline.push(official(Team::Terrorist, RoundEndReason::TargetBombed));
    timeline.push(BombPlanted {
        round: 2,
        time_in_round: 40.0,
        site: SiteLetter::Unresolved,
        ..Default::default()
    });
    timeline.push(BombExploded {
        round: 2,
        time_in_round: 80.0,
        site: SiteLetter::Unresolved,
        ..Default::default()
    });
    timeline.push(official(Team::Terrorist, RoundEndReason::TargetBombed));
    timeline
}

#[test]
fn test_ambiguous_plant_assumes_other_site() {
    let mut timeline = plant_then_ambiguous_plant();

    let notes = disambiguate_sites(&mut timeline, &NoTriggers);

    assert_eq!(timeline.nth::<BombPlanted>(1).map(|p| p.site), Some(SiteLetter::B));
    assert_eq!(timeline.nth::<BombExploded>(0).map(|e| e.site), Some(SiteLetter::B));
    assert_eq!(notes.bombsite(2), Some("Assuming plant was at B site."));
    assert_eq!(notes.bombsite(1), None);
}

#[test]
fn test_every_ambiguous_plant_in_a_round_is_resolved() {
    let mut timeline = EventTimeline::new();
    timeline.push(BombPlanted {
        round: 1,
        site: SiteLetter::A,
        ..Default::default()
    });
    for time_in_round in [40.0, 55.0] {
        timeline.push(BombPlanted {
            round: 2,
            time_in_round,
            site: SiteLetter::Unresolved,
            ..Default::default()
        });
    }

    let notes = disambiguate_sites(&mut timeline, &NoTriggers);

    let sites: Vec<SiteLetter> = timeline.records::<BombPlanted>().map(|p| p.site).collect();
    assert_eq!(sites, vec![SiteLetter::A, SiteLetter::B, SiteLetter::B]);
    assert_eq!(notes.bombsite(2), Some("Assuming plant was at B site."));
}

#[test]
fn test_rounds_table_reports_resolved_site() {
    let config = casual_defuse();
    let identities = PlayerIdentityResolver::new();
    let mut timeline = plant_then_ambiguous_plant();

    let stats = aggregate(&config, &identities, &mut timeline);

    assert_eq!(stats.rounds_stats.len(), 2);
    assert_eq!(stats.rounds_stats[0].bombsite_planted_at.as_deref(), Some("A"));
    assert_eq!(stats.rounds_stats[0].bombsite_error_message, None);
    assert_eq!(stats.rounds_stats[1].bombsite_planted_at.as_deref(), Some("B"));
    assert_eq!(
        stats.rounds_stats[1].bombsite_error_message.as_deref(),
        Some("Assuming plant was at B site.")
    );
    assert_eq!(stats.rounds_stats[1].time_in_round_planted, Some(40.0));
    assert_eq!(stats.rounds_stats[1].time_in_round_exploded, Some(80.0));

    let bombsites = stats.bombsite_stats.unwrap();
    assert_eq!((bombsites[0].bombsite, bombsites[0].plants, bombsites[0].explosions), ('A', 1, 0));
    assert_eq!((bombsites[1].bombsite, bombsites[1].plants, bombsites[1].explosions), ('B', 1, 1));
}

#[test]
fn test_plant_undecidable_when_both_sites_confirmed() {
    let mut timeline = EventTimeline::new();
    for (round, site) in [(1, SiteLetter::A), (2, SiteLetter::B), (3, SiteLetter::Unresolved)] {
        timeline.push(BombPlanted {
            round,
            site,
            ..Default::default()
        });
    }

    let notes = disambiguate_sites(&mut timeline, &NoTriggers);

    assert_eq!(timeline.nth::<BombPlanted>(2).map(|p| p.site), Some(SiteLetter::Unresolved));
    assert_eq!(
        notes.bombsite(3),
        Some("Couldn't assume either bombsite was the plant location.")
    );
}

#[test]
fn test_defuse_letter_names_ambiguous_plant() {
    let mut timeline = EventTimeline::new();
    timeline.push(BombPlanted {
        round: 1,
        site: SiteLetter::Unresolved,
        ..Default::default()
    });
    timeline.push(BombDefused {
        round: 1,
        site: SiteLetter::B,
        ..Default::default()
    });

    let notes = disambiguate_sites(&mut timeline, &NoTriggers);

    assert_eq!(timeline.nth::<BombPlanted>(0).map(|p| p.site), Some(SiteLetter::B));
    assert!(notes.is_empty());
}

#[test]
fn test_hostage_rescue_without_pickup_is_backfilled() {
    let config = SessionConfig::new("pt_cs_test", GameMode::Hostage, TestType::Casual);
    let identities = PlayerIdentityResolver::new();
    let mut timeline = EventTimeline::new();
    timeline.push(HostageRescued {
        round: 1,
        time_in_round: 50.0,
        hostage: SiteLetter::A,
        hostage_index: 3,
        ..Default::default()
    });
    timeline.push(official(Team::CounterTerrorist, RoundEndReason::HostagesRescued));
    timeline.push(HostagePickedUp {
        round: 2,
        time_in_round: 20.0,
        hostage: SiteLetter::Unresolved,
        hostage_index: 3,
        ..Default::default()
    });
    timeline.push(official(Team::Terrorist, RoundEndReason::HostagesNotRescued));

    let stats = aggregate(&config, &identities, &mut timeline);

    let first = &stats.rounds_stats[0];
    assert!(first.picked_up_hostage_a);
    assert!(first.rescued_hostage_a);
    assert!(!first.picked_up_all_hostages);
    assert_eq!(first.time_in_round_rescued_hostage_a, Some(50.0));
    assert_eq!(
        first.hostage_a_picked_up_error_message.as_deref(),
        Some("Assuming Hostage A was picked up; cannot assume TimeInRound.")
    );

    // Letter inherited through the shared hostage index
    let second = &stats.rounds_stats[1];
    assert!(second.picked_up_hostage_a);
    assert_eq!(second.hostage_a_picked_up_error_message, None);
    assert_eq!(second.win_method, "HostagesNotRescued");

    let hostages = stats.hostage_stats.unwrap();
    assert_eq!(hostages[0].hostage_index, Some(3));
    assert_eq!((hostages[0].picked_ups, hostages[0].rescues), (2, 1));
    assert_eq!((hostages[1].picked_ups, hostages[1].rescues), (0, 0));
}

// ─────────────────────────────────────────────────────────────────────────────
// Rounds & winners
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_winners_follow_side_alternation() {
    let config = casual_defuse();
    let identities = PlayerIdentityResolver::new();
    let mut timeline = EventTimeline::new();
    timeline.push(official(Team::Terrorist, RoundEndReason::TerroristsWin));
    timeline.push(SwitchSides { round_before_switch: 2 });
    timeline.push(official(Team::Terrorist, RoundEndReason::TargetBombed));
    timeline.push(official(Team::CounterTerrorist, RoundEndReason::CTsWin));
    timeline.push(official(Team::Terrorist, RoundEndReason::TerroristsWin));
    timeline.push(official(Team::Unknown, RoundEndReason::Unknown));
    timeline.push(official(Team::Terrorist, RoundEndReason::GameStart));

    let stats = aggregate(&config, &identities, &mut timeline);

    assert_eq!(stats.rounds_stats.len(), 5);
    assert_eq!(stats.rounds_stats[1].half, "First");
    assert_eq!(stats.rounds_stats[2].half, "Second");
    assert_eq!(stats.rounds_stats[4].winners, "Unknown");

    let winners = stats.winners_stats.unwrap();
    assert_eq!(winners.team_alpha_rounds, 3);
    assert_eq!(winners.team_beta_rounds, 1);
    // Unknown winners and GameStart ends are not decided rounds
    assert_eq!(winners.team_alpha_rounds + winners.team_beta_rounds, 4);
    assert_eq!(winners.winning_team, "Team Alpha");
}

#[test]
fn test_draw_when_totals_equal() {
    let config = casual_defuse();
    let identities = PlayerIdentityResolver::new();
    let mut timeline = EventTimeline::new();
    timeline.push(official(Team::Terrorist, RoundEndReason::TerroristsWin));
    timeline.push(official(Team::CounterTerrorist, RoundEndReason::CTsWin));

    let stats = aggregate(&config, &identities, &mut timeline);

    assert_eq!(stats.winners_stats.unwrap().winning_team, "Draw");
}

#[test]
fn test_overtime_halves() {
    let alternation = SideAlternation::new(vec![15, 30, 33, 36], 3);

    assert_eq!(alternation.half_and_overtime(14), (Half::First, 0));
    assert!(alternation.is_normal_order(14));
    assert_eq!(alternation.half_and_overtime(15), (Half::Second, 0));
    assert!(!alternation.is_normal_order(15));

    assert_eq!(alternation.half_and_overtime(30), (Half::First, 1));
    assert!(!alternation.is_normal_order(30));
    assert_eq!(alternation.half_and_overtime(33), (Half::Second, 1));
    assert!(alternation.is_normal_order(33));
    assert_eq!(alternation.half_and_overtime(36), (Half::First, 2));
    assert!(alternation.is_normal_order(36));

    // No third switch yet: the configured overtime half length applies
    let alternation = SideAlternation::new(vec![15, 30], 3);
    assert_eq!(alternation.half_and_overtime(33), (Half::Second, 1));
}

#[test]
fn test_rounds_table_orients_rosters_and_equipment() {
    let config = casual_defuse();
    let identities = PlayerIdentityResolver::new();
    let mut timeline = EventTimeline::new();
    timeline.push(roster(1, 2, 3));
    timeline.push(crate::demo_event::TeamEquipment {
        round: 1,
        t_equip_value: 1000,
        ct_equip_value: 2000,
        t_expenditure: 300,
        ct_expenditure: 400,
    });
    timeline.push(SwitchSides { round_before_switch: 1 });
    timeline.push(official(Team::Terrorist, RoundEndReason::TerroristsWin));
    timeline.push(roster(2, 2, 3));
    timeline.push(official(Team::CounterTerrorist, RoundEndReason::CTsWin));

    let stats = aggregate(&config, &identities, &mut timeline);

    let first = &stats.rounds_stats[0];
    assert_eq!((first.team_alpha_player_count, first.team_beta_player_count), (2, 3));
    assert_eq!((first.team_alpha_equip_value, first.team_beta_equip_value), (1000, 2000));
    assert_eq!((first.team_alpha_expenditure, first.team_beta_expenditure), (300, 400));

    // Second half: Alpha plays CT; no equipment record degrades to zero
    let second = &stats.rounds_stats[1];
    assert_eq!((second.team_alpha_player_count, second.team_beta_player_count), (3, 2));
    assert_eq!(second.team_alpha_equip_value, 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-player tables
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_player_stats_bot_takeover_and_self_kills() {
    let config = casual_defuse();
    let killer = player(1, 100, "JimWood", Team::Terrorist);
    let victim = player(2, 200, "TheWhaleMan", Team::CounterTerrorist);
    let assister = player(3, 300, "Helper", Team::Terrorist);
    let mut identities = PlayerIdentityResolver::new();
    for p in [&killer, &victim, &assister] {
        identities.bind(p);
    }

    let mut timeline = EventTimeline::new();
    timeline.push(PlayerKilled {
        round: 1,
        killer: Some(killer.clone()),
        victim: Some(victim.clone()),
        assister: Some(assister.clone()),
        headshot: true,
        ..Default::default()
    });
    timeline.push(PlayerKilled {
        round: 1,
        killer: Some(killer.clone()),
        victim: Some(victim.clone()),
        headshot: true,
        killer_bot_takeover: true,
        ..Default::default()
    });
    timeline.push(PlayerKilled {
        round: 2,
        killer: Some(killer.clone()),
        victim: Some(killer.clone()),
        suicide: true,
        ..Default::default()
    });
    timeline.push(PlayerKilled {
        round: 2,
        killer: Some(victim.clone()),
        victim: Some(killer.clone()),
        team_kill: true,
        ..Default::default()
    });

    let stats = aggregate(&config, &identities, &mut timeline);

    let ids: Vec<i64> = stats.player_stats.iter().map(|p| p.steam_id).collect();
    assert_eq!(ids, vec![100, 200, 300]);

    let jim = &stats.player_stats[0];
    assert_eq!(jim.player_name, "JimWood");
    assert_eq!((jim.kills, jim.kills_including_bots), (1, 2));
    assert_eq!((jim.headshots, jim.headshots_including_bots), (1, 2));
    assert_eq!(jim.deaths, 2);

    let whale = &stats.player_stats[1];
    assert_eq!((whale.kills, whale.kills_including_bots), (-1, -1));
    assert_eq!(whale.deaths, 2);

    assert_eq!(stats.player_stats[2].assists, 1);
}

#[test]
fn test_team_kill_costs_a_kill() {
    let config = casual_defuse();
    let shooter = player(1, 100, "JimWood", Team::Terrorist);
    let enemy = player(2, 200, "TheWhaleMan", Team::CounterTerrorist);
    let teammate = player(3, 300, "Helper", Team::Terrorist);
    let mut identities = PlayerIdentityResolver::new();
    for p in [&shooter, &enemy, &teammate] {
        identities.bind(p);
    }

    let mut timeline = EventTimeline::new();
    timeline.push(PlayerKilled {
        round: 1,
        killer: Some(shooter.clone()),
        victim: Some(enemy.clone()),
        ..Default::default()
    });
    timeline.push(PlayerKilled {
        round: 1,
        killer: Some(shooter.clone()),
        victim: Some(teammate.clone()),
        team_kill: true,
        ..Default::default()
    });

    let stats = aggregate(&config, &identities, &mut timeline);

    let jim = &stats.player_stats[0];
    assert_eq!(jim.steam_id, 100);
    assert_eq!((jim.kills, jim.kills_including_bots), (0, 0));
    assert_eq!(stats.player_stats[2].deaths, 1);
}

#[test]
fn test_kills_table_rows() {
    let config = casual_defuse();
    let identities = PlayerIdentityResolver::new();
    let killer = player(1, 100, "JimWood", Team::Terrorist);
    let mut victim = player(2, 200, "TheWhaleMan", Team::CounterTerrorist);
    victim.last_alive_position = Some(Vector::new(1.0, 2.0, 3.0));

    let mut timeline = EventTimeline::new();
    for (round, weapon) in [(1, "weapon_ak47"), (1, "weapon_snowball"), (2, "weapon_awp")] {
        timeline.push(PlayerKilled {
            round,
            killer: Some(killer.clone()),
            victim: Some(victim.clone()),
            weapon: Equipment::from_name(weapon),
            penetrated_objects: 1,
            ..Default::default()
        });
    }

    let stats = aggregate(&config, &identities, &mut timeline);

    let firsts: Vec<bool> = stats.kills_stats.iter().map(|k| k.first_kill_of_the_round).collect();
    assert_eq!(firsts, vec![true, false, true]);
    assert_eq!(stats.kills_stats[0].weapon, "AK47");
    assert_eq!(stats.kills_stats[0].weapon_class, "Rifle");
    assert_eq!(stats.kills_stats[1].weapon, "weapon_snowball");
    assert_eq!(stats.kills_stats[1].weapon_class, "Unknown");
    assert_eq!(stats.kills_stats[2].x_position_death, 1.0);
    assert_eq!(stats.kills_stats[2].victim_steam_id, 200);
    assert_eq!(stats.kills_stats[2].penetrations_count, 1);
}

#[test]
fn test_grenades_grouped_in_first_seen_order() {
    let config = casual_defuse();
    let identities = PlayerIdentityResolver::new();
    let thrower_a = player(1, 100, "A", Team::Terrorist);
    let thrower_b = player(2, 200, "B", Team::CounterTerrorist);

    let mut timeline = EventTimeline::new();
    let mut flash = NadeThrow::new(NadeKind::Flash, EquipmentElement::Flash, Some(thrower_a), Vector::default());
    flash.flashed_players = vec![thrower_b.clone(), thrower_b.clone()];
    timeline.push(flash);
    timeline.push(NadeThrow::new(
        NadeKind::Smoke,
        EquipmentElement::Smoke,
        Some(thrower_b.clone()),
        Vector::new(5.0, 6.0, 7.0),
    ));
    timeline.push(NadeThrow::new(NadeKind::Flash, EquipmentElement::Flash, Some(thrower_b), Vector::default()));
    timeline.push(NadeThrow::new(NadeKind::Fire, EquipmentElement::Unknown, None, Vector::default()));

    let stats = aggregate(&config, &identities, &mut timeline);

    let totals: Vec<(&str, i32)> = stats
        .grenades_total_stats
        .iter()
        .map(|t| (t.nade_type.as_str(), t.amount_used))
        .collect();
    assert_eq!(totals, vec![("Flash", 2), ("Smoke", 1)]);

    let specific = &stats.grenades_specific_stats;
    assert_eq!(specific.len(), 3);
    assert_eq!((specific[0].steam_id, specific[0].num_players_flashed), (100, Some(2)));
    assert_eq!((specific[1].steam_id, specific[1].num_players_flashed), (200, Some(0)));
    assert_eq!(specific[2].nade_type, "Smoke");
    assert_eq!(specific[2].num_players_flashed, None);
    assert_eq!(specific[2].x_position, 5.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Team tables
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_team_stats_drop_stray_members() {
    let config = SessionConfig::new("pt_de_test", GameMode::Defuse, TestType::Competitive);
    let mut identities = PlayerIdentityResolver::new();
    let terrorists: Vec<PlayerSnapshot> = (1..=5)
        .map(|i| player(i, i as i64, &format!("t{i}"), Team::Terrorist))
        .collect();
    let counter_terrorists: Vec<PlayerSnapshot> = (11..=12)
        .map(|i| player(i, i as i64, &format!("ct{i}"), Team::CounterTerrorist))
        .collect();
    for p in terrorists.iter().chain(&counter_terrorists) {
        identities.bind(p);
    }
    let stray = player(99, 999, "spectator", Team::Terrorist);

    let mut timeline = EventTimeline::new();
    let mut t_side = terrorists.clone();
    t_side.push(stray.clone());
    timeline.push(TeamRoster {
        round: 1,
        terrorists: t_side,
        counter_terrorists: counter_terrorists.clone(),
    });
    timeline.push(PlayerKilled {
        round: 1,
        killer: Some(terrorists[0].clone()),
        victim: Some(counter_terrorists[0].clone()),
        headshot: true,
        penetrated_objects: 2,
        ..Default::default()
    });
    timeline.push(PlayerKilled {
        round: 1,
        killer: Some(terrorists[1].clone()),
        victim: Some(terrorists[2].clone()),
        team_kill: true,
        ..Default::default()
    });
    for shooter in [&terrorists[0], &terrorists[0], &stray] {
        timeline.push(ShotFired {
            round: 1,
            shooter: Some(shooter.clone()),
            team_side: Team::Terrorist,
            ..Default::default()
        });
    }
    timeline.push(official(Team::Terrorist, RoundEndReason::TerroristsWin));

    let stats = aggregate(&config, &identities, &mut timeline);
    let teams = stats.team_stats.unwrap();

    assert_eq!(teams.len(), 1);
    let round = &teams[0];
    assert_eq!(round.team_alpha, vec![1, 2, 3, 4, 5]);
    assert_eq!(round.team_bravo, vec![11, 12]);
    assert_eq!(round.team_alpha_kills, 1);
    assert_eq!(round.team_alpha_teamkills, 1);
    assert_eq!(round.team_alpha_deaths, 1);
    assert_eq!(round.team_alpha_headshots, 1);
    assert_eq!(round.team_alpha_wallbang_kills, 1);
    assert_eq!(round.team_alpha_wallbangs_total_for_all_kills, 2);
    assert_eq!(round.team_alpha_wallbangs_most_in_one_kill, 2);
    assert_eq!(round.team_alpha_shots_fired, 2);
    assert_eq!(round.team_bravo_deaths, 1);
    assert_eq!(round.team_bravo_kills, 0);
}

#[test]
fn test_first_damage_keeps_earliest_weapon_hit_per_attacker() {
    let config = casual_defuse();
    let identities = PlayerIdentityResolver::new();
    let shooter = player(1, 100, "A", Team::Terrorist);
    let target = player(2, 200, "V", Team::CounterTerrorist);

    let hurt = |time: f64, attacker: Option<&PlayerSnapshot>, victim: &PlayerSnapshot, weapon: &str| PlayerHurt {
        round: 1,
        time_in_round: time,
        player: Some(victim.clone()),
        attacker: attacker.cloned(),
        weapon: Equipment::from_name(weapon),
        ..Default::default()
    };

    let mut timeline = EventTimeline::new();
    timeline.push(hurt(1.0, None, &target, "worldspawn"));
    timeline.push(hurt(2.0, Some(&shooter), &target, "weapon_hegrenade"));
    timeline.push(hurt(3.0, Some(&shooter), &shooter, "weapon_ak47"));
    timeline.push(hurt(10.0, Some(&shooter), &target, "weapon_ak47"));
    timeline.push(hurt(5.0, Some(&shooter), &target, "weapon_ak47"));
    timeline.push(hurt(7.0, Some(&target), &shooter, "weapon_glock"));
    timeline.push(official(Team::Terrorist, RoundEndReason::TerroristsWin));
    timeline.push(PlayerHurt {
        round: 2,
        ..hurt(1.0, Some(&shooter), &target, "weapon_ak47")
    });

    let stats = aggregate(&config, &identities, &mut timeline);

    assert_eq!(stats.first_damage_stats.len(), 1);
    let hits = &stats.first_damage_stats[0].first_damage_to_enemy_by_players;
    assert_eq!(hits.len(), 2);
    assert_eq!((hits[0].steam_id_shooter, hits[0].time_in_round), (100, 5.0));
    assert_eq!(hits[0].team_side_victim, "CounterTerrorist");
    assert_eq!((hits[1].steam_id_shooter, hits[1].weapon.as_str()), (200, "Glock"));
}

#[test]
fn test_positions_skip_dead_players() {
    let config = casual_defuse();
    let identities = PlayerIdentityResolver::new();
    let sample = |round: i32, time: i32, steam_id: i64| PlayerPositionSample {
        round,
        time_in_round: time,
        team_side: "T".to_string(),
        steam_id,
        position: Vector::new(10.7, -3.2, 0.0),
    };

    let mut timeline = EventTimeline::new();
    timeline.push(sample(1, 5, 100));
    timeline.push(PlayerKilled {
        round: 1,
        time_in_round: 10.0,
        victim: Some(player(1, 100, "A", Team::Terrorist)),
        ..Default::default()
    });
    timeline.push(sample(1, 20, 100));
    timeline.push(sample(1, 20, 200));
    timeline.push(official(Team::CounterTerrorist, RoundEndReason::CTsWin));
    timeline.push(sample(2, 5, 100));

    let aggregator = StatsAggregator::new(&config, &identities, &NoTriggers);
    let positions = aggregator.player_positions(&timeline);

    assert_eq!(positions.demo_name, "pt_de_test");
    assert_eq!(positions.player_position_by_round.len(), 1);
    let times = &positions.player_position_by_round[0].player_position_by_time_in_round;
    assert_eq!(times.len(), 2);
    assert_eq!(times[0].player_position_by_steam_id.len(), 1);
    assert_eq!(times[0].player_position_by_steam_id[0].x_position, 10);
    let late: Vec<i64> = times[1].player_position_by_steam_id.iter().map(|p| p.steam_id).collect();
    assert_eq!(late, vec![200]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Match-level tables
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_infer_game_mode() {
    let hostage_a = StaticTriggers {
        hostage_a_index: Some(4),
        ..Default::default()
    };
    let both_hostages = StaticTriggers {
        hostage_a_index: Some(4),
        hostage_b_index: Some(5),
        ..Default::default()
    };
    let bombsite = StaticTriggers {
        bombsite_a: Some(ZoneBounds::default()),
        ..Default::default()
    };

    let survival = roster(1, 12, 0);
    let full = roster(1, 5, 5);
    let wingman = roster(1, 2, 2);

    assert_eq!(infer_game_mode(&[&survival], &NoTriggers, false), GameMode::DangerZone);
    assert_eq!(infer_game_mode(&[&full], &bombsite, false), GameMode::Defuse);
    assert_eq!(infer_game_mode(&[&full], &hostage_a, false), GameMode::Hostage);
    assert_eq!(infer_game_mode(&[&full], &both_hostages, false), GameMode::DangerZone);
    assert_eq!(infer_game_mode(&[&wingman], &NoTriggers, true), GameMode::WingmanDefuse);
    assert_eq!(infer_game_mode(&[&wingman], &hostage_a, false), GameMode::WingmanHostage);
    assert_eq!(infer_game_mode(&[&wingman], &NoTriggers, false), GameMode::Unknown);
}

#[test]
fn test_configured_mode_wins_over_inference() {
    let config = casual_defuse();
    let identities = PlayerIdentityResolver::new();
    let mut timeline = EventTimeline::new();
    timeline.push(roster(1, 12, 0));

    let aggregator = StatsAggregator::new(&config, &identities, &NoTriggers);
    assert_eq!(aggregator.game_mode(&timeline), GameMode::Defuse);

    let inferred = SessionConfig::new("pt_dz", GameMode::Unknown, TestType::Casual);
    let aggregator = StatsAggregator::new(&inferred, &identities, &NoTriggers);
    assert_eq!(aggregator.game_mode(&timeline), GameMode::DangerZone);
}

#[test]
fn test_survival_omits_team_tables() {
    let config = SessionConfig::new("pt_dz_test", GameMode::DangerZone, TestType::Casual);
    let identities = PlayerIdentityResolver::new();
    let mut timeline = EventTimeline::new();
    timeline.push(roster(1, 12, 0));
    timeline.push(ChickenKilled);
    timeline.push(official(Team::Terrorist, RoundEndReason::SurvivalWin));

    let stats = aggregate(&config, &identities, &mut timeline);

    assert!(stats.winners_stats.is_none());
    assert!(stats.bombsite_stats.is_none());
    assert!(stats.hostage_stats.is_none());
    assert!(stats.team_stats.is_none());
    assert_eq!(stats.rounds_stats[0].win_method, "Danger Zone Won");
    assert_eq!(stats.chicken_stats.map(|c| c.killed), Some(1));
    assert_eq!(stats.map_info.game_mode, "dangerzone");
}

#[test]
fn test_map_info_from_workshop_path() {
    let mut config = casual_defuse();
    config.map_name = "de_fallback".to_string();
    config.parse_chickens = false;
    let identities = PlayerIdentityResolver::new();

    let mut timeline = EventTimeline::new();
    let stats = aggregate(&config, &identities, &mut timeline);
    assert_eq!(stats.map_info.map_name, "de_fallback");
    assert_eq!(stats.map_info.workshop_id, "unknown");
    assert!(stats.chicken_stats.is_none());

    timeline.push(MatchStarted {
        map_name: "workshop/123456789/de_test".to_string(),
        has_bombsites: true,
    });
    let stats = aggregate(&config, &identities, &mut timeline);
    assert_eq!(stats.map_info.map_name, "de_test");
    assert_eq!(stats.map_info.workshop_id, "123456789");
    assert_eq!(stats.map_info.demo_name, "pt_de_test");
    assert_eq!(stats.map_info.test_type, "casual");
    assert_eq!(stats.supported_gamemodes.len(), 6);
    assert_eq!(stats.supported_gamemodes[5], "unknown");
    assert!(stats.complete);
}

#[test]
fn test_feedback_side_backfilled_from_roster() {
    let config = casual_defuse();
    let jim = player(1, 100, "JimWood", Team::Terrorist);
    let mut identities = PlayerIdentityResolver::new();
    identities.bind(&jim);

    let mut timeline = EventTimeline::new();
    timeline.push(FeedbackMessage {
        round: 0,
        sender_name: "JimWood".to_string(),
        message: ">fb warmup".to_string(),
        ..Default::default()
    });
    timeline.push(TeamRoster {
        round: 1,
        terrorists: vec![jim.clone()],
        counter_terrorists: vec![player(2, 200, "Other", Team::CounterTerrorist)],
    });
    timeline.push(FeedbackMessage {
        round: 1,
        sender_name: "JimWood".to_string(),
        message: ">fb ladder".to_string(),
        ..Default::default()
    });
    timeline.push(FeedbackMessage {
        round: 1,
        steam_id: 300,
        sender_name: "Ghost".to_string(),
        message: "!fb spawn".to_string(),
        ..Default::default()
    });

    let stats = aggregate(&config, &identities, &mut timeline);
    let teams: Vec<Option<&str>> = stats
        .feedback_messages
        .iter()
        .map(|m| m.team_name.as_deref())
        .collect();

    assert_eq!(teams, vec![None, Some("Terrorist"), Some("Spectator")]);
}

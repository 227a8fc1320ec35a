//! Tests for the simulation engine, turn systems, and mission tracking.

use kessler_core::commands::{Command, CommandOutcome};
use kessler_core::config::{GameConfig, Setting};
use kessler_core::constants::*;
use kessler_core::enums::*;
use kessler_core::errors::CommandError;
use kessler_core::missions::{catalog, MissionDefinition};
use kessler_core::state::WorldStats;
use kessler_core::types::{ObjectId, OrbitalPosition};

use crate::engine::SimulationEngine;
use crate::systems::missions::{evaluate, MissionContext, MissionTransition};
use crate::systems::movement::jitter;
use crate::systems::risk::calculate_risk_level;
use crate::systems::terminal::{check, TerminalInput};
use crate::systems::{hazard, scoring};

/// An active Normal game with every starting object removed.
fn empty_game() -> SimulationEngine {
    let mut engine = SimulationEngine::default();
    engine.initialize_game(Difficulty::Normal).unwrap();
    engine.clear_world();
    engine.drain_events();
    engine
}

/// `pairs` well-separated LEO debris pairs, each pair 0.5 apart.
fn spawn_pairs(engine: &mut SimulationEngine, pairs: usize, spacing: f64) {
    for i in 0..pairs {
        let x = i as f64 * spacing;
        engine.spawn_test_debris(OrbitLayer::Leo, x, 10.0, DebrisKind::Cooperative);
        engine.spawn_test_debris(OrbitLayer::Leo, x + 0.5, 10.0, DebrisKind::Uncooperative);
    }
}

/// Enough DRV passes for one full seek, target, hold cycle.
fn run_full_cycle(engine: &mut SimulationEngine) {
    for _ in 0..(1 + TARGETING_TURNS + CAPTURE_ORBITS) {
        engine.process_drv_operations().unwrap();
    }
}

fn context(step: u64) -> MissionContext {
    MissionContext {
        step,
        ..MissionContext::default()
    }
}

fn mission(id: &str) -> MissionDefinition {
    catalog().into_iter().find(|m| m.id == id).unwrap()
}

// ---- Lifecycle ----

#[test]
fn test_initialize_game_populates_world() {
    let mut engine = SimulationEngine::default();
    engine.initialize_game(Difficulty::Hard).unwrap();
    let snap = engine.snapshot();
    let profile = difficulty_profile(Difficulty::Hard);

    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.budget, profile.starting_budget);
    assert_eq!(snap.satellites.len(), profile.starting_satellites as usize);
    assert_eq!(snap.debris.len(), profile.starting_debris as usize);
    assert_eq!(snap.max_steps, profile.max_steps);
    assert_eq!(snap.missions.len(), catalog().len());
    assert_eq!(snap.clock.step, 0);
}

#[test]
fn test_ids_unique_across_collections() {
    let mut engine = SimulationEngine::default();
    engine.initialize_game(Difficulty::Normal).unwrap();
    engine
        .launch_drv(OrbitLayer::Leo, DrvType::Cooperative, DrvPriority::Normal)
        .unwrap();
    let snap = engine.snapshot();

    let mut ids: Vec<ObjectId> = snap
        .satellites
        .iter()
        .map(|s| s.id)
        .chain(snap.debris.iter().map(|d| d.id))
        .chain(snap.drvs.iter().map(|d| d.id))
        .collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[test]
fn test_commands_rejected_before_initialize() {
    let mut engine = SimulationEngine::default();
    assert!(matches!(
        engine.advance_turn(),
        Err(CommandError::NotInitialized)
    ));
    assert_eq!(engine.step(), 0);
}

#[test]
fn test_step_increments_by_one() {
    let mut engine = SimulationEngine::default();
    engine.initialize_game(Difficulty::Easy).unwrap();
    for expected in 1..=20 {
        let snap = engine.run_turn().unwrap();
        assert_eq!(snap.clock.step, expected);
        assert_eq!(snap.clock.day, expected);
    }
}

// ---- Launches ----

#[test]
fn test_insufficient_budget_has_no_effect() {
    let mut engine = empty_game();
    engine.set_budget(1_000);
    let result = engine.launch_satellite(
        OrbitLayer::Leo,
        SatellitePurpose::Gps,
        InsuranceTier::None,
    );
    assert!(matches!(
        result,
        Err(CommandError::InsufficientBudget {
            required: LAUNCH_COST_LEO,
            available: 1_000
        })
    ));
    assert_eq!(engine.budget(), 1_000);
    assert!(engine.snapshot().satellites.is_empty());
}

#[test]
fn test_launch_charges_premium() {
    let mut engine = empty_game();
    let before = engine.budget();
    engine
        .launch_satellite(OrbitLayer::Geo, SatellitePurpose::Comms, InsuranceTier::Premium)
        .unwrap();
    assert_eq!(
        engine.budget(),
        before - LAUNCH_COST_GEO - INSURANCE_PREMIUM_COST
    );
}

#[test]
fn test_invalid_orbits_rejected() {
    let mut engine = empty_game();
    assert!(matches!(
        engine.launch_satellite(
            OrbitLayer::Graveyard,
            SatellitePurpose::Weather,
            InsuranceTier::None
        ),
        Err(CommandError::InvalidOrbit { .. })
    ));
    assert!(matches!(
        engine.launch_drv(OrbitLayer::Leo, DrvType::Geotug, DrvPriority::Normal),
        Err(CommandError::UnsupportedDrvOrbit { .. })
    ));
    assert!(engine
        .launch_drv(OrbitLayer::Geo, DrvType::Geotug, DrvPriority::High)
        .is_ok());
}

// ---- Movement ----

#[test]
fn test_jitter_range_and_stability() {
    for raw in 0..1_000 {
        let j = jitter(ObjectId(raw));
        assert!((JITTER_MIN..=JITTER_MAX).contains(&j), "jitter {j} out of range");
        assert_eq!(j, jitter(ObjectId(raw)));
    }
    assert_ne!(jitter(ObjectId(1)), jitter(ObjectId(2)));
}

#[test]
fn test_objects_advance_by_layer_speed() {
    let mut engine = empty_game();
    let id = engine.spawn_test_debris(OrbitLayer::Meo, 10.0, 45.0, DebrisKind::Cooperative);
    engine.advance_turn().unwrap();
    let debris = &engine.snapshot().debris[0];
    let expected = 10.0 + MEO_BASE_SPEED * jitter(id);
    assert!((debris.x - expected).abs() < 1e-9);
    assert_eq!(debris.y, 45.0);
}

#[test]
fn test_held_objects_do_not_move() {
    let mut engine = empty_game();
    engine.spawn_test_debris(OrbitLayer::Leo, 10.0, 10.0, DebrisKind::Cooperative);
    engine.spawn_test_drv(OrbitLayer::Leo, 50.0, 10.0, DrvType::Cooperative);
    for _ in 0..(1 + TARGETING_TURNS) {
        engine.process_drv_operations().unwrap();
    }
    let before = engine.snapshot();
    assert_eq!(before.drvs[0].phase, DrvPhase::Holding);
    assert_eq!(before.drvs[0].x, before.debris[0].x);

    engine.advance_turn().unwrap();
    let after = engine.snapshot();
    assert_eq!(after.debris[0].x, before.debris[0].x);
    assert_eq!(after.drvs[0].x, before.drvs[0].x);
}

// ---- Collisions ----

#[test]
fn test_cascade_spawns_debris() {
    let mut engine = empty_game();
    spawn_pairs(&mut engine, 4, 20.0);

    let report = engine.process_collisions().unwrap();
    assert_eq!(report.pairs, 4);
    assert!(report.cascade);
    assert!(!report.severe);
    assert_eq!(report.debris_spawned, 4 * DEFAULT_DEBRIS_PER_COLLISION);

    let snap = engine.snapshot();
    assert_eq!(snap.debris.len(), (4 * DEFAULT_DEBRIS_PER_COLLISION) as usize);
    assert!(snap.cascade.cascade_triggered);
    assert_eq!(snap.cascade.total_cascades, 1);
    assert_eq!(snap.cascade.consecutive_cascade_turns, 1);
    assert_eq!(snap.collision_events.len(), 4);
    assert!(!snap.game_over);
    for debris in &snap.debris {
        let (lo, hi) = OrbitLayer::Leo.y_band();
        assert!(debris.y >= lo && debris.y <= hi);
    }
}

#[test]
fn test_severe_cascade_ends_game_without_debris() {
    let mut engine = empty_game();
    spawn_pairs(&mut engine, 12, 8.0);

    let report = engine.process_collisions().unwrap();
    assert_eq!(report.pairs, 12);
    assert!(report.severe);
    assert_eq!(report.debris_spawned, 0);

    let snap = engine.snapshot();
    assert!(snap.debris.is_empty());
    assert!(snap.game_over);
    assert_eq!(snap.game_over_reason, Some(GameOverReason::SevereCascade));
    assert!(matches!(
        engine.advance_turn(),
        Err(CommandError::GameOver(GameOverReason::SevereCascade))
    ));
}

#[test]
fn test_zero_collisions_reset_consecutive_cascades() {
    let mut engine = empty_game();
    spawn_pairs(&mut engine, 3, 30.0);
    engine.process_collisions().unwrap();
    engine.clear_world();
    spawn_pairs(&mut engine, 3, 30.0);
    engine.process_collisions().unwrap();
    assert_eq!(engine.cascade_state().consecutive_cascade_turns, 2);

    engine.clear_world();
    let report = engine.process_collisions().unwrap();
    assert_eq!(report.pairs, 0);
    let cascade = engine.cascade_state();
    assert_eq!(cascade.consecutive_cascade_turns, 0);
    assert!(!cascade.cascade_triggered);
    assert_eq!(cascade.total_cascades, 2);
}

#[test]
fn test_object_joins_at_most_one_pair() {
    let mut engine = empty_game();
    for x in [10.0, 10.3, 10.6] {
        engine.spawn_test_debris(OrbitLayer::Leo, x, 10.0, DebrisKind::Cooperative);
    }
    let report = engine.process_collisions().unwrap();
    assert_eq!(report.pairs, 1);
}

#[test]
fn test_collision_wraps_across_seam() {
    let mut engine = empty_game();
    engine.spawn_test_debris(OrbitLayer::Geo, 99.5, 70.0, DebrisKind::Cooperative);
    engine.spawn_test_debris(OrbitLayer::Geo, 0.5, 70.0, DebrisKind::Cooperative);
    assert_eq!(engine.process_collisions().unwrap().pairs, 1);
}

#[test]
fn test_layers_never_collide_with_each_other() {
    let mut engine = empty_game();
    engine.spawn_test_debris(OrbitLayer::Leo, 10.0, 25.0, DebrisKind::Cooperative);
    engine.spawn_test_debris(OrbitLayer::Meo, 10.0, 35.0, DebrisKind::Cooperative);
    assert_eq!(engine.process_collisions().unwrap().pairs, 0);
}

#[test]
fn test_insured_satellite_pays_out() {
    let mut engine = empty_game();
    engine.spawn_test_satellite(OrbitLayer::Leo, 10.0, 10.0, InsuranceTier::Premium);
    engine.spawn_test_debris(OrbitLayer::Leo, 10.5, 10.0, DebrisKind::Uncooperative);
    let before = engine.budget();

    engine.process_collisions().unwrap();
    assert_eq!(engine.budget(), before + INSURANCE_PREMIUM_PAYOUT);
    let stats = engine.stats();
    assert_eq!(stats.satellites_destroyed, 1);
    assert_eq!(stats.insurance_paid, INSURANCE_PREMIUM_PAYOUT);
}

#[test]
fn test_radius_multiplier_widens_threshold() {
    let mut engine = empty_game();
    engine.spawn_test_debris(OrbitLayer::Leo, 10.0, 10.0, DebrisKind::Cooperative);
    engine.spawn_test_debris(OrbitLayer::Leo, 13.0, 10.0, DebrisKind::Cooperative);
    engine
        .apply_setting(Setting::RadiusMultiplier { value: 2.0 })
        .unwrap();
    assert_eq!(engine.process_collisions().unwrap().pairs, 1);
}

// ---- DRV operations ----

#[test]
fn test_cooperative_recovers_satellite() {
    let mut engine = empty_game();
    engine.spawn_test_satellite(OrbitLayer::Meo, 20.0, 45.0, InsuranceTier::None);
    engine.spawn_test_drv(OrbitLayer::Meo, 70.0, 45.0, DrvType::Cooperative);

    run_full_cycle(&mut engine);
    let snap = engine.snapshot();
    assert!(snap.satellites.is_empty());
    assert_eq!(snap.stats.satellites_recovered, 1);
    assert_eq!(snap.drvs[0].phase, DrvPhase::Seeking);
}

#[test]
fn test_refuel_resets_age() {
    let mut engine = empty_game();
    let sat = engine.spawn_test_satellite(OrbitLayer::Leo, 10.0, 10.0, InsuranceTier::None);
    engine.set_age(sat, 100);
    engine.spawn_test_drv(OrbitLayer::Leo, 60.0, 10.0, DrvType::Refueling);

    run_full_cycle(&mut engine);
    let snap = engine.snapshot();
    assert_eq!(snap.satellites.len(), 1);
    assert_eq!(snap.satellites[0].age, 0);
    assert_eq!(snap.stats.refuels_completed, 1);
    assert_eq!(snap.drvs[0].phase, DrvPhase::Seeking);
}

#[test]
fn test_refueler_ignores_young_satellites() {
    let mut engine = empty_game();
    engine.spawn_test_satellite(OrbitLayer::Leo, 10.0, 10.0, InsuranceTier::None);
    engine.spawn_test_drv(OrbitLayer::Leo, 60.0, 10.0, DrvType::Refueling);
    engine.process_drv_operations().unwrap();
    assert_eq!(engine.snapshot().drvs[0].phase, DrvPhase::Seeking);
}

#[test]
fn test_geotug_relocates_and_retires() {
    let mut engine = empty_game();
    let sat = engine.spawn_test_satellite(OrbitLayer::Geo, 30.0, 70.0, InsuranceTier::None);
    engine.spawn_test_drv(OrbitLayer::Geo, 80.0, 70.0, DrvType::Geotug);

    run_full_cycle(&mut engine);
    let snap = engine.snapshot();
    let parked = snap.satellites.iter().find(|s| s.id == sat).unwrap();
    assert_eq!(parked.layer, OrbitLayer::Graveyard);
    assert!(parked.in_graveyard);
    let (lo, hi) = OrbitLayer::Graveyard.y_band();
    assert!(parked.y >= lo && parked.y <= hi);
    assert_eq!(snap.stats.geo_relocations, 1);
    assert!(snap.drvs[0].age >= snap.drvs[0].max_age);

    assert_eq!(engine.decommission_expired_drvs().unwrap(), 1);
    let snap = engine.snapshot();
    assert!(snap.drvs.is_empty());
    assert_eq!(snap.debris.len(), 1);
}

#[test]
fn test_cooperative_removes_debris_on_success() {
    let mut engine = empty_game();
    let debris = engine.spawn_test_debris(OrbitLayer::Leo, 10.0, 10.0, DebrisKind::Cooperative);
    let drv = engine.spawn_test_drv(OrbitLayer::Leo, 40.0, 10.0, DrvType::Cooperative);
    engine.set_success_rate(drv, 1.0);

    run_full_cycle(&mut engine);
    let snap = engine.snapshot();
    assert!(snap.debris.iter().all(|d| d.id != debris));
    assert_eq!(snap.stats.debris_removed_cooperative, 1);
    assert_eq!(snap.drvs[0].debris_removed, 1);
    assert_eq!(snap.drvs[0].phase, DrvPhase::Seeking);
}

#[test]
fn test_cooperative_failed_roll_keeps_debris() {
    let mut engine = empty_game();
    let debris = engine.spawn_test_debris(OrbitLayer::Leo, 10.0, 10.0, DebrisKind::Cooperative);
    let drv = engine.spawn_test_drv(OrbitLayer::Leo, 40.0, 10.0, DrvType::Cooperative);
    engine.set_success_rate(drv, 0.0);

    run_full_cycle(&mut engine);
    let snap = engine.snapshot();
    assert_eq!(snap.debris.len(), 1);
    assert_eq!(snap.debris[0].id, debris);
    assert_eq!(snap.stats.debris_removed_cooperative, 0);
    assert_eq!(snap.drvs[0].debris_removed, 0);
    assert_eq!(snap.drvs[0].phase, DrvPhase::Seeking);
    assert!(snap.drvs[0].target_debris_id.is_none());
    assert!(snap.drvs[0].captured_debris_id.is_none());

    // The claim is free again, so the same piece can be retargeted.
    engine.process_drv_operations().unwrap();
    let drv = &engine.snapshot().drvs[0];
    assert_eq!(drv.phase, DrvPhase::Targeting);
    assert_eq!(drv.target_debris_id, Some(debris));
}

#[test]
fn test_drv_held_by_refueler_stays_put() {
    let mut engine = empty_game();
    let refueler = engine.spawn_test_drv(OrbitLayer::Leo, 60.0, 10.0, DrvType::Refueling);
    let worker = engine.spawn_test_drv(OrbitLayer::Leo, 40.0, 10.0, DrvType::Cooperative);
    engine.spawn_test_debris(OrbitLayer::Leo, 10.0, 10.0, DebrisKind::Cooperative);
    engine.set_age(worker, 40);

    for _ in 0..(1 + TARGETING_TURNS) {
        engine.process_drv_operations().unwrap();
    }
    let snap = engine.snapshot();
    let tanker = snap.drvs.iter().find(|d| d.id == refueler).unwrap();
    let held = snap.drvs.iter().find(|d| d.id == worker).unwrap();
    assert_eq!(tanker.captured_debris_id, Some(worker));
    assert_eq!(held.x, 40.0);
    assert_eq!(held.x, tanker.x);
    assert_ne!(held.phase, DrvPhase::Holding);

    for _ in 0..CAPTURE_ORBITS {
        engine.process_drv_operations().unwrap();
        let snap = engine.snapshot();
        let tanker = snap.drvs.iter().find(|d| d.id == refueler).unwrap();
        let held = snap.drvs.iter().find(|d| d.id == worker).unwrap();
        if tanker.captured_debris_id == Some(worker) {
            assert_eq!(held.x, tanker.x);
        }
    }
    let snap = engine.snapshot();
    let refueled = snap.drvs.iter().find(|d| d.id == worker).unwrap();
    assert_eq!(refueled.age, 0);
    assert_eq!(snap.stats.refuels_completed, 1);
}

#[test]
fn test_no_object_claimed_twice() {
    let mut engine = empty_game();
    engine.spawn_test_debris(OrbitLayer::Leo, 10.0, 10.0, DebrisKind::Cooperative);
    engine.spawn_test_drv(OrbitLayer::Leo, 40.0, 10.0, DrvType::Cooperative);
    engine.spawn_test_drv(OrbitLayer::Leo, 70.0, 10.0, DrvType::Cooperative);
    engine.process_drv_operations().unwrap();

    let snap = engine.snapshot();
    let claimed: Vec<ObjectId> = snap
        .drvs
        .iter()
        .filter_map(|d| d.target_debris_id.or(d.captured_debris_id))
        .collect();
    assert_eq!(claimed.len(), 1);
}

#[test]
fn test_vanished_target_is_released() {
    let mut engine = empty_game();
    for i in 0..10 {
        engine.spawn_test_debris(OrbitLayer::Leo, i as f64 * 10.0, 10.0, DebrisKind::Cooperative);
    }
    engine.spawn_test_drv(OrbitLayer::Leo, 5.0, 20.0, DrvType::Cooperative);
    engine.process_drv_operations().unwrap();
    assert_eq!(engine.snapshot().drvs[0].phase, DrvPhase::Targeting);

    // A full storm clears every LEO piece, including the target.
    engine
        .apply_setting(Setting::SolarStormFraction { fraction: 1.0 })
        .unwrap();
    assert_eq!(engine.trigger_solar_storm().unwrap(), 10);
    engine.process_drv_operations().unwrap();
    let drv = &engine.snapshot().drvs[0];
    assert_eq!(drv.phase, DrvPhase::Seeking);
    assert!(drv.target_debris_id.is_none());
}

#[test]
fn test_uncooperative_sweeps_only_uncooperative_debris() {
    let mut engine = empty_game();
    engine.spawn_test_debris(OrbitLayer::Meo, 10.0, 40.0, DebrisKind::Cooperative);
    for i in 0..4 {
        engine.spawn_test_debris(
            OrbitLayer::Meo,
            30.0 + i as f64 * 10.0,
            40.0,
            DebrisKind::Uncooperative,
        );
    }
    engine.spawn_test_drv(OrbitLayer::Meo, 5.0, 50.0, DrvType::Uncooperative);
    for _ in 0..30 {
        engine.process_drv_operations().unwrap();
    }
    let snap = engine.snapshot();
    assert_eq!(snap.debris.len(), 1);
    assert_eq!(snap.debris[0].kind, DebrisKind::Cooperative);
    assert_eq!(snap.stats.debris_removed_uncooperative, 4);
}

// ---- Decommission ----

#[test]
fn test_decommission_exempts_busy_drvs() {
    let mut engine = empty_game();
    engine.spawn_test_debris(OrbitLayer::Leo, 10.0, 10.0, DebrisKind::Cooperative);
    let busy = engine.spawn_test_drv(OrbitLayer::Leo, 50.0, 10.0, DrvType::Cooperative);
    engine.process_drv_operations().unwrap();
    engine.set_age(busy, 500);

    assert_eq!(engine.decommission_expired_drvs().unwrap(), 0);
    assert_eq!(engine.snapshot().drvs.len(), 1);
}

#[test]
fn test_decommission_leaves_debris() {
    let mut engine = empty_game();
    let idle = engine.spawn_test_drv(OrbitLayer::Meo, 50.0, 45.0, DrvType::Uncooperative);
    engine.set_age(idle, 50);

    assert_eq!(engine.decommission_expired_drvs().unwrap(), 1);
    let snap = engine.snapshot();
    assert!(snap.drvs.is_empty());
    assert_eq!(snap.debris.len(), 1);
    assert_eq!(snap.debris[0].layer, OrbitLayer::Meo);
    assert_eq!(snap.stats.drvs_decommissioned, 1);
}

#[test]
fn test_drv_held_by_refueler_is_not_decommissioned() {
    let mut engine = empty_game();
    let worn = engine.spawn_test_drv(OrbitLayer::Leo, 10.0, 10.0, DrvType::Uncooperative);
    engine.set_age(worn, 40);
    engine.spawn_test_drv(OrbitLayer::Leo, 60.0, 10.0, DrvType::Refueling);
    for _ in 0..(1 + TARGETING_TURNS) {
        engine.process_drv_operations().unwrap();
    }
    engine.set_age(worn, 60);
    assert_eq!(engine.decommission_expired_drvs().unwrap(), 0);

    for _ in 0..CAPTURE_ORBITS {
        engine.process_drv_operations().unwrap();
    }
    let snap = engine.snapshot();
    let refueled = snap.drvs.iter().find(|d| d.id == worn).unwrap();
    assert_eq!(refueled.age, 0);
}

// ---- Hazards & risk ----

#[test]
fn test_risk_level_boundaries() {
    assert_eq!(calculate_risk_level(0), RiskLevel::Low);
    assert_eq!(calculate_risk_level(49), RiskLevel::Low);
    assert_eq!(calculate_risk_level(50), RiskLevel::Medium);
    assert_eq!(calculate_risk_level(99), RiskLevel::Medium);
    assert_eq!(calculate_risk_level(100), RiskLevel::Critical);
}

#[test]
fn test_interval_multiplier_follows_risk() {
    let mut engine = empty_game();
    assert_eq!(engine.turn_interval_multiplier(), 1.0);
    for i in 0..100 {
        engine.spawn_test_debris(OrbitLayer::Geo, i as f64, 70.0, DebrisKind::Cooperative);
    }
    engine.advance_turn().unwrap();
    assert_eq!(engine.risk_level(), RiskLevel::Critical);
    assert_eq!(engine.turn_interval_multiplier(), 0.5);
}

#[test]
fn test_storm_removal_count_rounds_down() {
    assert_eq!(hazard::storm_removal_count(10, 0.3), 3);
    assert_eq!(hazard::storm_removal_count(20, 0.3), 6);
    assert_eq!(hazard::storm_removal_count(3, 0.3), 0);
    assert_eq!(hazard::storm_removal_count(7, 1.0), 7);
}

#[test]
fn test_solar_storm_only_touches_leo() {
    let mut engine = empty_game();
    for i in 0..10 {
        engine.spawn_test_debris(OrbitLayer::Leo, i as f64 * 10.0, 10.0, DebrisKind::Cooperative);
        engine.spawn_test_debris(OrbitLayer::Meo, i as f64 * 10.0, 45.0, DebrisKind::Cooperative);
    }
    assert_eq!(engine.trigger_solar_storm().unwrap(), 3);

    let snap = engine.snapshot();
    let leo = snap.debris.iter().filter(|d| d.layer == OrbitLayer::Leo).count();
    let meo = snap.debris.iter().filter(|d| d.layer == OrbitLayer::Meo).count();
    assert_eq!(leo, 7);
    assert_eq!(meo, 10);
    assert_eq!(snap.stats.solar_storms, 1);
    assert_eq!(snap.stats.storm_debris_cleared, 3);
}

#[test]
fn test_storm_trial_respects_probability() {
    let mut engine = empty_game();
    engine
        .apply_setting(Setting::SolarStormProbability { probability: 0.0 })
        .unwrap();
    for _ in 0..50 {
        assert_eq!(engine.check_solar_storm().unwrap(), None);
    }
    engine
        .apply_setting(Setting::SolarStormProbability { probability: 1.0 })
        .unwrap();
    assert_eq!(engine.check_solar_storm().unwrap(), Some(0));
}

// ---- Terminal conditions ----

#[test]
fn test_terminal_check_order() {
    let base = TerminalInput {
        budget: 1,
        step: 1,
        max_steps: 100,
        debris_count: 0,
        debris_limit: 250,
    };
    assert_eq!(check(&base), None);
    assert_eq!(
        check(&TerminalInput { budget: -1, ..base }),
        Some(GameOverReason::BudgetDepleted)
    );
    assert_eq!(
        check(&TerminalInput { step: 100, ..base }),
        Some(GameOverReason::MaxTurnsReached)
    );
    assert_eq!(
        check(&TerminalInput {
            debris_count: 251,
            ..base
        }),
        Some(GameOverReason::DebrisLimitExceeded)
    );
    assert_eq!(
        check(&TerminalInput {
            budget: -1,
            step: 100,
            debris_count: 251,
            ..base
        }),
        Some(GameOverReason::BudgetDepleted)
    );
}

#[test]
fn test_budget_depleted() {
    let mut engine = empty_game();
    engine.set_budget(-1);
    engine.advance_turn().unwrap();
    assert!(engine.is_game_over());
    assert_eq!(engine.game_over_reason(), Some(GameOverReason::BudgetDepleted));
}

#[test]
fn test_max_turns_reached() {
    let mut engine = empty_game();
    engine
        .apply_setting(Setting::MaxSteps { turns: Some(100) })
        .unwrap();
    engine.set_step(99);
    engine.advance_turn().unwrap();
    assert_eq!(engine.step(), 100);
    assert_eq!(
        engine.game_over_reason(),
        Some(GameOverReason::MaxTurnsReached)
    );
}

#[test]
fn test_debris_limit_exceeded() {
    let mut engine = empty_game();
    for i in 0..251 {
        let layer = OrbitLayer::COLLIDABLE[i % 3];
        let (lo, _) = layer.y_band();
        engine.spawn_test_debris(layer, (i / 3) as f64, lo, DebrisKind::Cooperative);
    }
    engine.advance_turn().unwrap();
    assert_eq!(
        engine.game_over_reason(),
        Some(GameOverReason::DebrisLimitExceeded)
    );
}

#[test]
fn test_game_over_reason_never_overwritten() {
    let mut engine = empty_game();
    spawn_pairs(&mut engine, 12, 8.0);
    engine.set_budget(-1);
    engine.process_collisions().unwrap();
    assert_eq!(
        engine.game_over_reason(),
        Some(GameOverReason::SevereCascade)
    );
    assert!(engine.advance_turn().is_err());
    assert_eq!(
        engine.game_over_reason(),
        Some(GameOverReason::SevereCascade)
    );
}

// ---- Scoring ----

#[test]
fn test_score_total_is_sum_of_components() {
    let mut engine = SimulationEngine::default();
    engine.initialize_game(Difficulty::Normal).unwrap();
    engine
        .launch_drv(OrbitLayer::Leo, DrvType::Cooperative, DrvPriority::Normal)
        .unwrap();
    for _ in 0..30 {
        let score = engine.run_turn().unwrap().score;
        let sum = score.satellite + score.debris_removal + score.recovery + score.budget
            + score.survival;
        assert_eq!(score.total, sum);
    }
}

#[test]
fn test_score_components() {
    let input = scoring::ScoreInput {
        leo_satellites: 2,
        meo_satellites: 1,
        geo_satellites: 1,
        stats: WorldStats {
            debris_removed_cooperative: 3,
            debris_removed_uncooperative: 2,
            satellites_recovered: 1,
            ..WorldStats::default()
        },
        budget: 50_000_000,
        day: 120,
    };
    let score = scoring::compute(&input);
    assert_eq!(score.satellite, 2.0 * 110.0 + 125.0 + 150.0);
    assert_eq!(score.debris_removal, 3.0 * 50.0 + 2.0 * 80.0);
    assert_eq!(score.recovery, 120.0);
    assert_eq!(score.budget, 500.0);
    assert_eq!(score.survival, 120.0 * 5.0 * 1.5);
}

#[test]
fn test_negative_budget_scores_zero() {
    let score = scoring::compute(&scoring::ScoreInput {
        budget: -5_000_000,
        ..scoring::ScoreInput::default()
    });
    assert_eq!(score.budget, 0.0);
}

#[test]
fn test_grade_ladder() {
    assert_eq!(scoring::grade_for(20_000.0), Grade::S);
    assert_eq!(scoring::grade_for(19_999.0), Grade::A);
    assert_eq!(scoring::grade_for(6_000.0), Grade::B);
    assert_eq!(scoring::grade_for(2_500.0), Grade::C);
    assert_eq!(scoring::grade_for(0.0), Grade::D);
}

#[test]
fn test_score_history_one_entry_per_turn() {
    let mut engine = empty_game();
    engine
        .launch_satellite(OrbitLayer::Leo, SatellitePurpose::Gps, InsuranceTier::None)
        .unwrap();
    engine.advance_turn().unwrap();
    engine.process_collisions().unwrap();
    engine.advance_turn().unwrap();

    let turns: Vec<u64> = engine.score_history().iter().map(|e| e.turn).collect();
    assert_eq!(turns, vec![0, 1, 2]);
}

// ---- Missions ----

#[test]
fn test_cumulative_mission_completes() {
    let mut sweeper = mission("debris-sweeper");
    let mut ctx = context(10);
    ctx.stats.debris_removed_cooperative = 20;
    ctx.stats.debris_removed_uncooperative = 5;
    assert_eq!(
        evaluate(&mut sweeper, &ctx),
        Some(MissionTransition::Completed {
            id: "debris-sweeper".into(),
            turn: 10
        })
    );
    assert_eq!(sweeper.status(), MissionStatus::Completed);
    assert_eq!(sweeper.completed_turn, Some(10));

    // Terminal missions stay put.
    ctx.step = 11;
    assert_eq!(evaluate(&mut sweeper, &ctx), None);
}

#[test]
fn test_turn_limited_mission_fails() {
    let mut shift = mission("graveyard-shift");
    let limit = shift.turn_limit.unwrap();
    assert_eq!(evaluate(&mut shift, &context(limit)), None);
    assert!(matches!(
        evaluate(&mut shift, &context(limit + 1)),
        Some(MissionTransition::Failed { .. })
    ));
    assert_eq!(shift.status(), MissionStatus::Failed);
}

#[test]
fn test_threshold_mission_waits_for_trigger() {
    let mut sweep = mission("clean-sweep");
    let mut ctx = context(1);
    ctx.debris_count = 30;
    assert_eq!(evaluate(&mut sweep, &ctx), None);
    assert!(!sweep.triggered);
    assert_eq!(sweep.current_progress, 0);

    ctx.step = 2;
    ctx.debris_count = 85;
    evaluate(&mut sweep, &ctx);
    assert!(sweep.triggered);
    assert_eq!(sweep.current_progress, 0);

    ctx.step = 3;
    ctx.debris_count = 60;
    evaluate(&mut sweep, &ctx);
    assert_eq!(sweep.current_progress, 20);

    ctx.step = 4;
    ctx.debris_count = 40;
    assert!(matches!(
        evaluate(&mut sweep, &ctx),
        Some(MissionTransition::Completed { .. })
    ));
}

#[test]
fn test_consecutive_mission_resets_on_collision() {
    let mut quiet = mission("quiet-skies");
    for step in 1..=5 {
        evaluate(&mut quiet, &context(step));
    }
    assert_eq!(quiet.current_progress, 5);

    // A repeat evaluation in the same turn does not extend the streak.
    evaluate(&mut quiet, &context(5));
    assert_eq!(quiet.current_progress, 5);

    let mut ctx = context(6);
    ctx.collisions_last_turn = 1;
    evaluate(&mut quiet, &ctx);
    assert_eq!(quiet.current_progress, 0);
}

#[test]
fn test_consecutive_mission_not_extended_at_game_over() {
    let mut quiet = mission("quiet-skies");
    for step in 1..=3 {
        evaluate(&mut quiet, &context(step));
    }
    assert_eq!(quiet.current_progress, 3);

    let mut ctx = context(4);
    ctx.game_over = true;
    assert_eq!(evaluate(&mut quiet, &ctx), None);
    assert_eq!(quiet.current_progress, 3);
}

#[test]
fn test_snapshot_mission_tracks_current_count() {
    let mut constellation = mission("constellation");
    let mut ctx = context(5);
    ctx.active_satellites = 12;
    evaluate(&mut constellation, &ctx);
    assert_eq!(constellation.current_progress, 12);
    ctx.step = 6;
    ctx.active_satellites = 9;
    evaluate(&mut constellation, &ctx);
    assert_eq!(constellation.current_progress, 9);
}

#[test]
fn test_boolean_mission_fails_on_violation() {
    let mut calm = mission("no-cascade");
    assert_eq!(evaluate(&mut calm, &context(1)), None);
    let mut ctx = context(2);
    ctx.total_cascades = 1;
    assert!(matches!(
        evaluate(&mut calm, &ctx),
        Some(MissionTransition::Failed { .. })
    ));
    ctx.game_over = true;
    ctx.total_cascades = 0;
    assert_eq!(evaluate(&mut calm, &ctx), None);
    assert_eq!(calm.status(), MissionStatus::Failed);
}

#[test]
fn test_boolean_mission_succeeds_at_game_end() {
    let mut engine = empty_game();
    engine
        .apply_setting(Setting::MaxSteps { turns: Some(1) })
        .unwrap();
    engine.advance_turn().unwrap();
    assert!(engine.is_game_over());
    let calm = engine
        .missions()
        .iter()
        .find(|m| m.id == "no-cascade")
        .unwrap();
    assert_eq!(calm.status(), MissionStatus::Completed);
    assert!(engine.active_missions().iter().all(|m| m.id != "no-cascade"));
}

// ---- Commands ----

#[test]
fn test_command_queue_runs_in_order() {
    let mut engine = SimulationEngine::default();
    engine.queue_commands([
        Command::AdvanceTurn,
        Command::InitializeGame {
            difficulty: Difficulty::Easy,
        },
        Command::AdvanceTurn,
        Command::TriggerSolarStorm,
    ]);
    let results = engine.process_commands();
    assert_eq!(results.len(), 4);
    assert!(matches!(results[0], Err(CommandError::NotInitialized)));
    assert!(matches!(results[1], Ok(CommandOutcome::Initialized)));
    assert!(matches!(
        results[2],
        Ok(CommandOutcome::TurnAdvanced { step: 1 })
    ));
    assert!(matches!(
        results[3],
        Ok(CommandOutcome::SolarStorm { removed: Some(_) })
    ));
}

#[test]
fn test_invalid_setting_keeps_config() {
    let mut engine = SimulationEngine::default();
    let before = engine.config().clone();
    let result = engine.apply_setting(Setting::SolarStormProbability { probability: 2.0 });
    assert!(matches!(result, Err(CommandError::InvalidSetting(_))));
    assert_eq!(engine.config(), &before);
}

#[test]
fn test_negative_spawn_jitter_rejected_at_initialize() {
    let mut config = GameConfig::default();
    config.collision.spawn_jitter = -1.0;
    let mut engine = SimulationEngine::new(config);
    assert!(matches!(
        engine.initialize_game(Difficulty::Normal),
        Err(CommandError::InvalidSetting(_))
    ));
    assert!(matches!(
        engine.process_collisions(),
        Err(CommandError::NotInitialized)
    ));
}

#[test]
fn test_events_drained_into_turn_snapshot() {
    let mut engine = SimulationEngine::new(GameConfig {
        seed: 7,
        ..GameConfig::default()
    });
    engine.initialize_game(Difficulty::Normal).unwrap();
    let snap = engine.run_turn().unwrap();
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, kessler_core::events::SimEvent::GameStarted { .. })));
    assert!(engine.drain_events().is_empty());
}

#[test]
fn test_history_records_each_turn() {
    let mut engine = empty_game();
    engine.spawn_test_debris(OrbitLayer::Leo, 10.0, 10.0, DebrisKind::Cooperative);
    engine.advance_turn().unwrap();
    engine.advance_turn().unwrap();
    let history = engine.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].turn, 2);
    assert_eq!(history[1].debris_count, 1);
}

#[test]
fn test_high_score_record_reflects_final_state() {
    let mut engine = empty_game();
    engine.set_budget(-1);
    engine.advance_turn().unwrap();
    let record = engine.high_score_record();
    assert_eq!(record.game_over_reason, Some(GameOverReason::BudgetDepleted));
    assert_eq!(record.turn, 1);
    assert_eq!(record.score, engine.score().total);
    assert_eq!(record.seed, engine.config().seed);
}

#[test]
fn test_position_clamped_on_spawn() {
    let pos = OrbitalPosition::new(-1.0, 0.0, OrbitLayer::Leo);
    assert_eq!(pos.y, LEO_Y_BAND.0);
    assert!((pos.x - 99.0).abs() < 1e-9);
}

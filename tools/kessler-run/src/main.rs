//! kessler-run: headless driver for the KESSLER simulation.
//!
//! Usage:
//!   kessler-run play --seed 7 --difficulty hard --turns 200
//!   kessler-run replay --commands session.json --config tuned.json
//!   kessler-run config > default.json

use std::fs;
use std::process;

use serde::Serialize;

use kessler_core::commands::Command;
use kessler_core::config::GameConfig;
use kessler_core::enums::*;
use kessler_core::state::{HighScoreRecord, ScoreBreakdown, WorldStats};
use kessler_sim::SimulationEngine;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "play" => cmd_play(&args[2..]),
        "replay" => cmd_replay(&args[2..]),
        "config" => cmd_config(),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(message) = result {
        eprintln!("Error: {message}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "kessler-run: KESSLER headless simulation driver\n\
         \n\
         Commands:\n\
         \n\
         play      Run a game with a simple automatic launch policy\n\
         \n\
           --seed <N>          RNG seed (default: 42)\n\
           --difficulty <D>    easy | normal | hard (default: normal)\n\
           --turns <N>         Maximum turns to run (default: until game over)\n\
           --config <path>     GameConfig JSON (optional)\n\
         \n\
         replay    Execute a JSON array of commands and print the final snapshot\n\
         \n\
           --commands <path>   Command list JSON\n\
           --config <path>     GameConfig JSON (optional)\n\
         \n\
         config    Print the default GameConfig as JSON\n\
         \n\
         Examples:\n\
         \n\
           kessler-run play --seed 7 --difficulty hard --turns 200\n\
           kessler-run replay --commands session.json\n"
    );
}

fn parse_flag<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    match value {
        "easy" => Ok(Difficulty::Easy),
        "normal" => Ok(Difficulty::Normal),
        "hard" => Ok(Difficulty::Hard),
        other => Err(format!("unknown difficulty '{other}'")),
    }
}

fn load_config(args: &[String]) -> Result<GameConfig, String> {
    match parse_flag(args, "--config") {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
            GameConfig::from_json(&json).map_err(|e| e.to_string())
        }
        None => Ok(GameConfig::default()),
    }
}

/// End-of-run report printed as JSON.
#[derive(Serialize)]
struct RunSummary {
    turns: u64,
    day: u64,
    budget: i64,
    risk_level: RiskLevel,
    debris: usize,
    satellites: usize,
    drvs: usize,
    stats: WorldStats,
    score: ScoreBreakdown,
    missions_completed: Vec<String>,
    record: HighScoreRecord,
}

fn summarize(engine: &SimulationEngine) -> RunSummary {
    let snap = engine.snapshot();
    RunSummary {
        turns: snap.clock.step,
        day: snap.clock.day,
        budget: snap.budget,
        risk_level: snap.risk_level,
        debris: snap.debris.len(),
        satellites: snap.satellites.len(),
        drvs: snap.drvs.len(),
        stats: snap.stats,
        score: snap.score,
        missions_completed: snap
            .missions
            .iter()
            .filter(|m| m.completed)
            .map(|m| m.id.clone())
            .collect(),
        record: engine.high_score_record(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

/// Keep a DRV fleet proportional to the debris field.
fn auto_launch(engine: &mut SimulationEngine) {
    let snap = engine.snapshot();
    let wanted = 2 + snap.debris.len() / 25;
    if snap.drvs.len() >= wanted {
        return;
    }
    let drv_type = if snap.drvs.len() % 2 == 0 {
        DrvType::Cooperative
    } else {
        DrvType::Uncooperative
    };
    if let Err(err) = engine.launch_drv(OrbitLayer::Leo, drv_type, DrvPriority::Normal) {
        log::debug!("auto-launch skipped: {err}");
    }
}

fn cmd_play(args: &[String]) -> Result<(), String> {
    let mut config = load_config(args)?;
    if let Some(seed) = parse_flag(args, "--seed") {
        config.seed = seed.parse().map_err(|_| format!("invalid seed '{seed}'"))?;
    }
    let difficulty = parse_difficulty(parse_flag(args, "--difficulty").unwrap_or("normal"))?;
    let turns: Option<u64> = match parse_flag(args, "--turns") {
        Some(n) => Some(n.parse().map_err(|_| format!("invalid turn count '{n}'"))?),
        None => None,
    };

    let mut engine = SimulationEngine::new(config);
    engine
        .initialize_game(difficulty)
        .map_err(|e| e.to_string())?;

    while !engine.is_game_over() && turns.map_or(true, |limit| engine.step() < limit) {
        auto_launch(&mut engine);
        engine.run_turn().map_err(|e| e.to_string())?;
    }

    log::info!(
        "finished after {} turns, grade {:?}",
        engine.step(),
        engine.score().grade
    );
    print_json(&summarize(&engine))
}

fn cmd_replay(args: &[String]) -> Result<(), String> {
    let config = load_config(args)?;
    let path = parse_flag(args, "--commands").ok_or("--commands <path> is required")?;
    let json = fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
    let commands: Vec<Command> = serde_json::from_str(&json).map_err(|e| e.to_string())?;

    let mut engine = SimulationEngine::new(config);
    engine.queue_commands(commands);
    for (index, result) in engine.process_commands().into_iter().enumerate() {
        if let Err(err) = result {
            log::warn!("command {index} rejected: {err}");
        }
    }
    print_json(&engine.snapshot())
}

fn cmd_config() -> Result<(), String> {
    let json = GameConfig::default().to_json().map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

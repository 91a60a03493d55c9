//! encounter-harness: headless scripted encounter runner.
//!
//! Usage:
//!   encounter-harness run [--config sim.json] [--frames 1500] [--player-dps 60]
//!   encounter-harness config

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use barrage_core::commands::{DirectorCommand, SpawnOptions};
use barrage_core::config::SimConfig;
use barrage_core::difficulty::DifficultyChange;
use barrage_core::enums::BehaviorClass;
use barrage_core::events::GameEvent;
use barrage_core::types::TargetState;
use barrage_sim::EncounterEngine;

const FRAME_MS: f64 = 16.0;

/// Interval between simulated player hits.
const HIT_INTERVAL_MS: f64 = 250.0;

/// One scripted director step.
struct Cue {
    at_ms: f64,
    commands: Vec<DirectorCommand>,
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    frames: u32,
    elapsed_ms: f64,
    final_level: u32,
    actors_alive: usize,
    projectiles_live: usize,
    projectiles_spawned: u64,
    score: u32,
    bosses_destroyed: u32,
    events: BTreeMap<&'static str, u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("run") => cmd_run(&args[2..]),
        Some("config") => {
            println!("{}", serde_json::to_string_pretty(&SimConfig::default())?);
            Ok(())
        }
        Some("help" | "--help" | "-h") => {
            print_usage();
            Ok(())
        }
        Some(other) => {
            print_usage();
            bail!("unknown command: {other}")
        }
        None => {
            print_usage();
            bail!("missing command")
        }
    }
}

fn print_usage() {
    eprintln!(
        "encounter-harness: scripted headless encounter\n\
         \n\
         Commands:\n\
         \n\
         run       Play the scripted wave and print a JSON summary\n\
         \n\
           --config <path>    Encounter config (JSON, optional)\n\
           --frames <N>       Frames to simulate at 16ms (default: 1500)\n\
           --player-dps <N>   Damage the simulated player deals per second (default: 60)\n\
         \n\
         config    Print the default encounter config\n"
    );
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn load_config(args: &[String]) -> Result<SimConfig> {
    let Some(path) = flag(args, "--config").map(PathBuf::from) else {
        return Ok(SimConfig::default());
    };
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    SimConfig::from_json_str(&json).with_context(|| format!("parsing {}", path.display()))
}

fn spawn(class: BehaviorClass, x: f32, y: f32) -> DirectorCommand {
    DirectorCommand::Spawn {
        class,
        x,
        y,
        options: SpawnOptions::default(),
    }
}

fn level(level: u32) -> DirectorCommand {
    DirectorCommand::SetDifficulty {
        change: DifficultyChange::Level(level),
    }
}

/// Three waves of rising difficulty, then the boss.
fn script(config: &SimConfig) -> Vec<Cue> {
    let right = config.playfield.max.x - 20.0;
    let mid = config.playfield.center().y;
    vec![
        Cue {
            at_ms: 0.0,
            commands: vec![
                spawn(BehaviorClass::Standard, right, mid - 150.0),
                spawn(BehaviorClass::Standard, right, mid + 150.0),
                spawn(BehaviorClass::Turret, right - 40.0, config.playfield.max.y - 40.0),
            ],
        },
        Cue {
            at_ms: 4_000.0,
            commands: vec![
                level(2),
                spawn(BehaviorClass::Advanced, right, mid),
                spawn(BehaviorClass::Elite, right, mid - 100.0),
            ],
        },
        Cue {
            at_ms: 8_000.0,
            commands: vec![
                level(3),
                spawn(BehaviorClass::Advanced, right, mid - 180.0),
                spawn(BehaviorClass::Elite, right, mid + 180.0),
            ],
        },
        Cue {
            at_ms: 12_000.0,
            commands: vec![level(4), spawn(BehaviorClass::Boss, right, mid)],
        },
    ]
}

fn event_kind(event: &GameEvent) -> &'static str {
    match event {
        GameEvent::HealthChanged { .. } => "health_changed",
        GameEvent::ActorDestroyed { .. } => "actor_destroyed",
        GameEvent::BossDestroyed { .. } => "boss_destroyed",
        GameEvent::ActorRemoved { .. } => "actor_removed",
        GameEvent::MovementPatternChanged { .. } => "movement_pattern_changed",
        GameEvent::WeaponPatternChanged { .. } => "weapon_pattern_changed",
        GameEvent::BossPhaseChanged { .. } => "boss_phase_changed",
        GameEvent::ShieldChanged { .. } => "shield_changed",
        GameEvent::SpecialAttack { .. } => "special_attack",
        GameEvent::DifficultyChanged { .. } => "difficulty_changed",
    }
}

fn cmd_run(args: &[String]) -> Result<()> {
    let config = load_config(args)?;
    let frames: u32 = match flag(args, "--frames") {
        Some(v) => v.parse().with_context(|| format!("invalid --frames {v}"))?,
        None => 1500,
    };
    let player_dps: f32 = match flag(args, "--player-dps") {
        Some(v) => v.parse().with_context(|| format!("invalid --player-dps {v}"))?,
        None => 60.0,
    };

    let mut cues = script(&config).into_iter().peekable();
    let mut engine = EncounterEngine::new(config);
    let seed = engine.config().seed;
    let playfield = engine.config().playfield;
    let mut summary = Summary {
        seed,
        frames,
        elapsed_ms: 0.0,
        final_level: 0,
        actors_alive: 0,
        projectiles_live: 0,
        projectiles_spawned: 0,
        score: 0,
        bosses_destroyed: 0,
        events: BTreeMap::new(),
    };

    let hit = player_dps * (HIT_INTERVAL_MS / 1000.0) as f32;
    let mut next_hit_ms = HIT_INTERVAL_MS;
    for frame in 0..frames {
        let t = f64::from(frame) * FRAME_MS;

        // The player weaves up and down near the left edge.
        let phase = (t / 1000.0) as f32;
        let mut player = TargetState::stationary(playfield.center());
        player.position.x = playfield.min.x + 100.0;
        player.position.y = playfield.center().y + phase.sin() * playfield.height() * 0.3;
        player.velocity.y = phase.cos() * playfield.height() * 0.3;
        engine.set_target(player);

        while let Some(cue) = cues.next_if(|c| c.at_ms <= t) {
            engine.queue_commands(cue.commands);
        }
        engine.update(t, FRAME_MS);

        // The player always shoots the front-most live actor.
        if t >= next_hit_ms {
            next_hit_ms += HIT_INTERVAL_MS;
            let front = engine
                .snapshot()
                .actors
                .iter()
                .filter(|a| a.health > 0)
                .min_by(|a, b| a.position.x.total_cmp(&b.position.x))
                .map(|a| a.id);
            if let Some(id) = front {
                engine.take_damage(id, hit);
            }
        }

        for event in engine.drain_events() {
            match &event {
                GameEvent::ActorDestroyed { score_value, .. } => summary.score += score_value,
                GameEvent::BossDestroyed { .. } => summary.bosses_destroyed += 1,
                _ => {}
            }
            *summary.events.entry(event_kind(&event)).or_insert(0) += 1;
        }
    }

    summary.elapsed_ms = engine.time().now_ms;
    summary.final_level = engine.difficulty().level;
    summary.actors_alive = engine.actor_count();
    summary.projectiles_live = engine.projectile_count();
    summary.projectiles_spawned = engine.projectiles_spawned();
    tracing::info!(
        score = summary.score,
        bosses = summary.bosses_destroyed,
        "encounter finished"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

//! shot-lab: fire one shot through the headless simulation and print what happened.
//!
//! Usage:
//!   shot-lab --weapon "Funky Bomb" --angle 60 --power 450
//!   shot-lab --config match.json --weapon MIRV --actors 4 --seed 7

use std::path::PathBuf;
use std::process;

use serde::Serialize;
use tracing::{error, info};

use scorch_core::components::Actor;
use scorch_core::config::SimConfig;
use scorch_core::events::SimEvent;
use scorch_core::types::ActorId;
use scorch_sim::SimulationEngine;

struct Options {
    config: Option<PathBuf>,
    weapon: String,
    angle: f64,
    power: f64,
    actors: usize,
    max_ticks: usize,
    seed: Option<u64>,
}

#[derive(Serialize)]
struct Summary<'a> {
    weapon: &'a str,
    ticks: usize,
    settled: bool,
    events: Vec<SimEvent>,
    actors: &'a [Actor],
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }
    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {message}");
            print_usage();
            process::exit(1);
        }
    };

    init_tracing();

    let mut config = match &options.config {
        Some(path) => match SimConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!(path = %path.display(), %e, "bad config");
                process::exit(1);
            }
        },
        None => SimConfig::default(),
    };
    if let Some(seed) = options.seed {
        config.seed = seed;
    }

    let mut engine = match SimulationEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            error!(%e, "invalid config");
            process::exit(1);
        }
    };
    engine.place_actors(options.actors.max(1));

    let Some(weapon) = engine.weapons().id_of(&options.weapon) else {
        error!(weapon = %options.weapon, "no such weapon");
        process::exit(1);
    };
    if engine
        .launch(ActorId(0), options.angle, options.power, weapon)
        .is_none()
    {
        error!(weapon = %options.weapon, "launch refused");
        process::exit(1);
    }

    let mut events = Vec::new();
    let mut ticks = 0;
    let mut settled = false;
    while ticks < options.max_ticks {
        events.extend(engine.tick());
        ticks += 1;
        let falling = engine.actors().iter().any(|a| a.falling.is_some());
        if !engine.has_active_projectiles() && engine.explosions().is_idle() && !falling {
            settled = true;
            break;
        }
    }
    info!(ticks, settled, events = events.len(), "shot finished");

    let summary = Summary {
        weapon: &options.weapon,
        ticks,
        settled,
        events,
        actors: engine.actors(),
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!(%e, "failed to encode summary");
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "shot-lab: fire one shot through the SCORCH simulation\n\
         \n\
         Options:\n\
         \n\
           --config <path>    JSON config overrides (optional)\n\
           --weapon <name>    Weapon name from the catalogue (default: Missile)\n\
           --angle <deg>      Barrel angle, 0 = right, 90 = up (default: 60)\n\
           --power <n>        Launch power 0..1000 (default: 400)\n\
           --actors <n>       Tanks to place (default: 2)\n\
           --max-ticks <n>    Frame limit (default: 5000)\n\
           --seed <n>         Override the config seed\n\
         \n\
         The summary is printed to stdout as JSON; logs go to stderr.\n"
    );
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        config: None,
        weapon: "Missile".to_string(),
        angle: 60.0,
        power: 400.0,
        actors: 2,
        max_ticks: 5000,
        seed: None,
    };

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| format!("{flag} needs a value"))?;
        match flag.as_str() {
            "--config" => options.config = Some(PathBuf::from(value)),
            "--weapon" => options.weapon = value.clone(),
            "--angle" => options.angle = parse_number(flag, value)?,
            "--power" => options.power = parse_number(flag, value)?,
            "--actors" => options.actors = parse_number(flag, value)?,
            "--max-ticks" => options.max_ticks = parse_number(flag, value)?,
            "--seed" => options.seed = Some(parse_number(flag, value)?),
            other => return Err(format!("unknown option {other}")),
        }
    }
    Ok(options)
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("{flag}: '{value}' is not a valid number"))
}

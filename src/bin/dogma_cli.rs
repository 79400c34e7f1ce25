use anyhow::{Context, Result, anyhow, bail};
use dogma::{
    about,
    config::SimulationConfig,
    engine::{DogmaEngine, Engine},
    protocol::{Operation, Stage, Workflow},
};
use serde::Serialize;
use std::{env, fs};
use tracing_subscriber::EnvFilter;

/// Upper bound on operations issued by `play`, in case a run never finishes.
const PLAY_OPERATION_LIMIT: usize = 100_000;

fn usage() {
    eprintln!(
        "Usage:\n  \
  dogma_cli --version\n  \
  dogma_cli [--config PATH] capabilities\n  \
  dogma_cli [--config PATH] snapshot\n  \
  dogma_cli [--config PATH] workflow '<workflow-json>'\n  \
  dogma_cli [--config PATH] play\n\n  \
  Tip: pass @file.json instead of inline JSON"
    );
}

fn load_json_arg(value: &str) -> Result<String> {
    if let Some(path) = value.strip_prefix('@') {
        fs::read_to_string(path).with_context(|| format!("Could not read JSON file '{path}'"))
    } else {
        Ok(value.to_string())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Could not serialize JSON output")?;
    println!("{text}");
    Ok(())
}

fn parse_global_config_arg(args: &[String]) -> (Option<String>, usize) {
    if args.len() >= 3 && args[1] == "--config" {
        return (Some(args[2].clone()), 3);
    }
    (None, 1)
}

fn load_engine(config_path: Option<&str>) -> Result<DogmaEngine> {
    let config = match config_path {
        Some(path) => SimulationConfig::load_from_path(path)
            .with_context(|| format!("Could not load configuration '{path}'"))?,
        None => SimulationConfig::default(),
    };
    DogmaEngine::from_config(config).map_err(|e| anyhow!(e))
}

/// Runs transcription and translation to the end, answering every pause with the correct
/// tRNA dragged onto the ribosome.
fn play(engine: &mut DogmaEngine) -> Result<()> {
    engine.apply(Operation::StartTranscription)?;
    for _ in 0..PLAY_OPERATION_LIMIT {
        let snapshot = engine.snapshot();
        let op = match snapshot.stage {
            Stage::Idle => Operation::StartTranscription,
            Stage::Transcribing | Stage::Translating => Operation::Tick { frames: 1 },
            Stage::Transcribed => Operation::StartTranslation,
            Stage::PausedForTrna => {
                let layout = &engine.simulation().config().layout;
                let target = snapshot
                    .target_zone
                    .ok_or_else(|| anyhow!("Paused without a target zone"))?;
                let correct = snapshot
                    .candidates
                    .iter()
                    .find(|c| c.is_correct)
                    .ok_or_else(|| anyhow!("No correct tRNA offered"))?;
                let grab_x = correct.position.x + layout.trna_width / 2.0;
                let grab_y = correct.position.y + layout.trna_height / 2.0;
                engine.apply(Operation::PointerDown {
                    x: grab_x,
                    y: grab_y,
                })?;
                engine.apply(Operation::PointerMove {
                    x: target.center.x,
                    y: target.center.y,
                })?;
                Operation::PointerUp
            }
            Stage::Finished => return Ok(()),
        };
        engine.apply(op)?;
    }
    bail!("Run did not finish within {PLAY_OPERATION_LIMIT} operations")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() <= 1 {
        usage();
        bail!("Missing command");
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{}", about::version_cli_text());
        return Ok(());
    }

    let (config_path, cmd_idx) = parse_global_config_arg(&args);
    if args.len() <= cmd_idx {
        usage();
        bail!("Missing command");
    }

    let command = &args[cmd_idx];
    match command.as_str() {
        "capabilities" => print_json(&DogmaEngine::capabilities()),
        "snapshot" => {
            let engine = load_engine(config_path.as_deref())?;
            print_json(&engine.snapshot())
        }
        "workflow" => {
            if args.len() <= cmd_idx + 1 {
                usage();
                bail!("Missing workflow JSON");
            }
            let json = load_json_arg(&args[cmd_idx + 1])?;
            let workflow: Workflow =
                serde_json::from_str(&json).context("Invalid workflow JSON")?;
            let mut engine = load_engine(config_path.as_deref())?;
            let results = engine.apply_workflow(workflow)?;
            print_json(&results)
        }
        "play" => {
            let mut engine = load_engine(config_path.as_deref())?;
            play(&mut engine)?;
            print_json(&engine.snapshot())
        }
        other => {
            usage();
            bail!("Unknown command '{other}'")
        }
    }
}

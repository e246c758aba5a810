use anyhow::Result;
use clap::Parser;
use geosim_core::{
    advance_turn, analyze, generate_decisions, DecisionSet, EventLogObserver, ObserverRegistry,
    SaveGame, SelectedOptions, SimConfig, Snapshot, MIN_SELECTIONS,
};
use std::path::PathBuf;
use std::sync::Arc;

mod loader;

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn-based geopolitical simulation", long_about = None)]
struct Args {
    /// Number of turns to run
    #[arg(short, long, default_value_t = 12)]
    turns: u32,

    /// RNG seed for the built-in scenario
    #[arg(long, default_value_t = 1936)]
    seed: u64,

    /// Path to a JSON scenario file (defaults to the built-in 1936 start)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Write a save file here on exit
    #[arg(long)]
    save: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Headless selection policy: fill the minimum number of decision
/// slots, urgent and critical decisions first, taking the leading
/// option of each.
fn auto_select(decisions: &DecisionSet) -> SelectedOptions {
    let mut ordered: Vec<_> = decisions.iter().collect();
    ordered.sort_by_key(|(_, d)| !(d.urgent || d.critical));

    let mut selected = SelectedOptions::new();
    for (category, decision) in ordered {
        if let Some(option) = decision.options.first() {
            selected.insert(category.clone(), option.id.clone());
        }
        if selected.len() >= MIN_SELECTIONS {
            break;
        }
    }
    selected
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = std::str::FromStr::from_str(&args.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();

    log::info!("Starting geosim...");

    let mut state = loader::load_initial_state(args.scenario.as_deref(), args.seed)?;
    let config = SimConfig::default();

    let event_log = Arc::new(EventLogObserver::new());
    let mut registry = ObserverRegistry::new();
    registry.register(Box::new(event_log.clone()));

    for _ in 0..args.turns {
        let analysis = analyze(&state);
        let decisions = generate_decisions(&state, &analysis);
        let selected = auto_select(&decisions);

        let outcome = advance_turn(&state, &selected, &config)?;
        state = outcome.state;

        println!("Turn {} ({})", state.turn, state.date);
        for event in &outcome.events {
            println!("  [{:>5}] {}", event.priority, event.title);
        }

        let checksum = if config.checksum_frequency > 0
            && state.turn % config.checksum_frequency == 0
        {
            state.checksum()
        } else {
            0
        };
        registry.notify(&Snapshot::new(state.clone(), checksum), &outcome.events);
    }

    log::info!(
        "Simulation finished at {} (turn {}, {} digests recorded)",
        state.date,
        state.turn,
        event_log.history().len()
    );

    if let Some(path) = args.save {
        SaveGame::new(state).write(&path)?;
    }

    Ok(())
}

use std::thread;

use anyhow::{anyhow, bail};
use battleship_bot::{
    bot_strategy, init_logging, DefaultRandomness, Difficulty, Gameboard, PlacementPolicy, Rules,
};
use clap::Parser;
use log::info;
use serde_json::json;

/// Bulk bot self-play: every game hides a random fleet and counts the shots a
/// bot needs to sink all of it.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value_t = 100)]
    games: usize,
    #[arg(long, default_value_t = 1, help = "Seed of the first game; game i uses seed + i")]
    seed: u64,
    #[arg(long, help = "Only run this difficulty (default: all)")]
    difficulty: Option<Difficulty>,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long)]
    touching: bool,
    #[arg(long, value_delimiter = ',')]
    fleet: Option<Vec<usize>>,
}

fn shots_to_sink(rules: &Rules, difficulty: Difficulty, seed: u64) -> anyhow::Result<usize> {
    let mut rng = DefaultRandomness::seeded(seed);
    let mut target = Gameboard::with_rules(rules);
    target.place_fleet_randomly(&mut rng, rules.fleet())?;
    let mut bot = bot_strategy(difficulty, rules);
    let mut shots = 0;
    while !target.all_sunk() {
        let report = bot.attack(&mut target, &mut rng, None)?;
        if let Some(reason) = report.outcome.reason() {
            bail!("{} bot fired at ({}, {}): {}", difficulty, report.row, report.col, reason);
        }
        shots += 1;
    }
    Ok(shots)
}

fn run_batch(
    rules: &Rules,
    difficulty: Difficulty,
    seeds: &[u64],
    threads: usize,
) -> anyhow::Result<Vec<usize>> {
    let chunk = seeds.len().div_ceil(threads.max(1)).max(1);
    let per_thread = thread::scope(|s| {
        let handles: Vec<_> = seeds
            .chunks(chunk)
            .map(|chunk| {
                s.spawn(move || {
                    chunk
                        .iter()
                        .map(|&seed| shots_to_sink(rules, difficulty, seed))
                        .collect::<anyhow::Result<Vec<usize>>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().map_err(|_| anyhow!("simulation thread panicked"))?)
            .collect::<anyhow::Result<Vec<Vec<usize>>>>()
    })?;
    Ok(per_thread.into_iter().flatten().collect())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut rules = Rules::standard();
    if let Some(fleet) = cli.fleet {
        rules = rules.with_fleet(fleet);
    }
    if cli.touching {
        rules = rules.with_placement(PlacementPolicy::Touching);
    }
    rules.validate()?;

    let seeds: Vec<u64> = (0..cli.games as u64)
        .map(|i| cli.seed.wrapping_add(i))
        .collect();
    let difficulties = match cli.difficulty {
        Some(d) => vec![d],
        None => Difficulty::ALL.to_vec(),
    };

    let mut results = serde_json::Map::new();
    for difficulty in difficulties {
        let shots = run_batch(&rules, difficulty, &seeds, cli.threads)?;
        let mean = if shots.is_empty() {
            0.0
        } else {
            shots.iter().sum::<usize>() as f64 / shots.len() as f64
        };
        info!("{}: {} games, mean {:.2} shots", difficulty, shots.len(), mean);
        results.insert(
            difficulty.to_string(),
            json!({
                "games": shots.len(),
                "mean_shots": mean,
                "min_shots": shots.iter().min(),
                "max_shots": shots.iter().max(),
            }),
        );
    }

    let output = json!({
        "seed": cli.seed,
        "games": cli.games,
        "threads": cli.threads,
        "placement": rules.placement(),
        "fleet": rules.fleet(),
        "results": results,
    });
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::io::{self, BufRead, Write};

#[cfg(feature = "std")]
use battleship_bot::{
    init_logging,
    render::{coord_to_string, parse_coord, render_player_view},
    DefaultRandomness, Difficulty, Direction, Game, GameError, GameStatus, PlacementPolicy, Rules,
    Side, TurnReport,
};
#[cfg(feature = "std")]
use clap::Parser;

#[cfg(feature = "std")]
#[derive(Parser)]
#[command(author, version, about = "Play battleship against a bot", long_about = None)]
struct Cli {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = Difficulty::Normal, help = "easy, normal or hard")]
    difficulty: Difficulty,
    #[arg(long, help = "Allow ships to touch each other")]
    touching: bool,
    #[arg(long, value_delimiter = ',', help = "Ship sizes, e.g. --fleet 5,4,3,3,2")]
    fleet: Option<Vec<usize>>,
    #[arg(long, default_value = "Unnamed")]
    name: String,
}

#[cfg(feature = "std")]
fn print_help() {
    println!("Commands:");
    println!("  A5                fire at column A, row 5");
    println!("  rotate N          rotate ship N (before the first shot)");
    println!("  move N A5 H|V     move ship N (before the first shot)");
    println!("  reroll            place your fleet again at random (before the first shot)");
    println!("  help              show this text");
    println!("  quit              leave the game");
}

#[cfg(feature = "std")]
fn describe(report: &TurnReport, who: &str) {
    println!(
        "{} fired at {}: {}",
        who,
        coord_to_string(report.row, report.col),
        report.outcome
    );
}

#[cfg(feature = "std")]
fn ship_index(arg: Option<&str>) -> Result<usize, String> {
    let n: usize = arg
        .ok_or("missing ship number")?
        .parse()
        .map_err(|_| "ship number must be a positive integer".to_string())?;
    n.checked_sub(1).ok_or_else(|| "ships are numbered from 1".to_string())
}

#[cfg(feature = "std")]
fn setup_command(game: &mut Game, line: &str) -> Result<bool, String> {
    let mut parts = line.split_whitespace();
    let result = match parts.next() {
        Some("rotate") => game.rotate_human_ship(ship_index(parts.next())?),
        Some("move") => {
            let index = ship_index(parts.next())?;
            let (row, col) = parse_coord(parts.next().ok_or("missing coordinate")?)?;
            let direction: Direction = parts
                .next()
                .unwrap_or("h")
                .parse()
                .map_err(|e| format!("{}", e))?;
            game.relocate_human_ship(index, row, col, direction)
        }
        Some("reroll") => game.reroll_human_fleet(),
        _ => return Ok(false),
    };
    result.map_err(|e| e.to_string())?;
    Ok(true)
}

#[cfg(feature = "std")]
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

    let rng = match cli.seed {
        Some(seed) => {
            println!("Using fixed seed: {} (game will be reproducible)", seed);
            DefaultRandomness::seeded(seed)
        }
        None => DefaultRandomness::from_entropy(),
    };

    let mut game = Game::new(rules, cli.difficulty, rng)?;
    game.set_human_name(&cli.name);
    game.initialize_game()?;
    println!("{} vs {} ({})", game.human().name(), game.bot().name(), cli.difficulty);
    print_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while game.is_game_running() {
        println!(
            "\n{}",
            render_player_view(game.human().board(), game.bot().board())
        );
        print!("{} > ", game.human().name());
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();

        match line {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                print_help();
                continue;
            }
            _ => {}
        }
        match setup_command(&mut game, line) {
            Ok(true) => continue,
            Ok(false) => {}
            Err(e) => {
                println!("✗ {}", e);
                continue;
            }
        }

        let (row, col) = match parse_coord(line) {
            Ok(coord) => coord,
            Err(e) => {
                println!("✗ {}", e);
                continue;
            }
        };
        match game.play_human_turn(row, col) {
            Ok(report) => describe(&report, game.human().name()),
            Err(e @ (GameError::AttackRejected(_) | GameError::InvalidCoordinate { .. })) => {
                println!("✗ {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        }
        if game.is_game_running() {
            let report = game.play_bot_turn()?;
            describe(&report, game.bot().name());
        }
    }

    println!("\n{}", render_player_view(game.human().board(), game.bot().board()));
    match game.status() {
        GameStatus::Finished { winner: Some(Side::Human) } => {
            println!("You win after {} shots!", game.shots_fired())
        }
        GameStatus::Finished { winner: Some(Side::Bot) } => {
            println!("{} wins after {} shots.", game.bot().name(), game.shots_fired())
        }
        GameStatus::Finished { winner: None } => println!("Both fleets went down together."),
        _ => println!("Game abandoned."),
    }
    Ok(())
}

//! Headless settlement simulation
//!
//! Founds one settlement on a seeded random map and runs it for a number of
//! turns, printing a turn-by-turn summary (or JSON reports).

use std::path::PathBuf;

use citadel_workforce::city::{
    City, Ruleset, Settlement, StructureState, Tile, TileMap, TileYield, TurnReport,
};
use citadel_workforce::core::{CivId, GameConfig, TilePosition};
use citadel_workforce::population::LandSource;
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const PLAYER: CivId = CivId(1);
const MAP_RADIUS: u32 = 4;
const STARTING_BORDER: u32 = 2;

/// Settlement simulation - growth, starvation and worker allocation
#[derive(Parser, Debug)]
#[command(name = "citadel-workforce")]
#[command(about = "Run a headless settlement simulation")]
struct Args {
    /// Random seed for reproducible maps
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of turns to simulate
    #[arg(long, default_value_t = 100)]
    turns: u32,

    /// Game settings file
    #[arg(long, default_value = "data/game.toml")]
    config: PathBuf,

    /// Profession and structure catalog
    #[arg(long, default_value = "data/rules.toml")]
    rules: PathBuf,

    /// Print one JSON report per turn instead of the summary
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log every assignment decision
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let directive = if args.verbose {
        "citadel_workforce=debug"
    } else {
        "citadel_workforce=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(directive.parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GameConfig::load_from_toml(&args.config)?;
    let ruleset = Ruleset::load_from_toml(&args.rules)?;
    tracing::info!(
        seed = args.seed,
        turns = args.turns,
        speed = ?config.game_speed,
        "Starting settlement simulation"
    );

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let center = TilePosition::new(0, 0);
    let tiles = generate_map(&mut rng, center);

    let mut settlement = Settlement::new("Citadel", PLAYER, center, tiles, ruleset, config);
    settlement.is_capital = true;
    settlement.add_structure("Granary", StructureState::Complete);
    settlement.add_structure("Library", StructureState::Complete);
    let market = settlement.add_structure("Market", StructureState::UnderConstruction);
    let university = settlement.add_structure("University", StructureState::UnderConstruction);

    let mut city = City::found(settlement)?;
    let mut reports = Vec::with_capacity(args.turns as usize);

    for turn in 1..=args.turns {
        // Construction finishes on a fixed schedule
        if turn == 10 {
            if let Some(id) = market {
                city.complete_structure(id)?;
            }
        }
        if turn == 30 {
            if let Some(id) = university {
                city.complete_structure(id)?;
            }
        }

        let report = city.end_turn(turn)?;
        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        }
        reports.push(report);
    }

    if !args.json {
        print_summary(&city, &reports);
    }
    Ok(())
}

/// Random terrain around `center`; the inner rings start inside our borders
fn generate_map(rng: &mut ChaCha8Rng, center: TilePosition) -> TileMap {
    let mut tiles = TileMap::new();
    for position in center.tiles_in_range(MAP_RADIUS) {
        let yields = TileYield::new(
            rng.gen_range(0..=3) as f32,
            rng.gen_range(0..=2) as f32,
            rng.gen_range(0..=2) as f32,
            0.0,
        );
        let mut tile = Tile::new(position, yields);
        if position.distance(&center) <= STARTING_BORDER {
            tile = tile.with_owner(PLAYER);
        }
        tiles.insert(tile);
    }
    tiles
}

fn print_summary(city: &City, reports: &[TurnReport]) {
    println!("\n=== {} ===", city.settlement.name);
    println!("Turn  Pop  Food  Net  Free  Tiles  Specialists");
    for report in reports {
        println!(
            "{:>4}  {:>3}  {:>4}  {:>3}  {:>4}  {:>5}  {:>11}",
            report.turn,
            report.outcome.population,
            report.outcome.food_stored,
            report.net_food,
            report.free_population,
            report.worked_tiles.len(),
            report.specialists.total(),
        );
    }

    let grown = reports.iter().filter(|r| r.outcome.grew).count();
    let starved = reports.iter().filter(|r| r.outcome.starved).count();
    println!();
    println!("Final population: {}", city.population.population());
    println!("Growth events: {}, starvation events: {}", grown, starved);
    println!("Worked tiles: {}", city.settlement.worked_tile_count());
    for (profession, count) in city.population.specialists().iter() {
        println!("  {}: {}", profession, count);
    }
}

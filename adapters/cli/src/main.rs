#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plans one Rampart turn for a scenario.
//!
//! The external match engine, path finder and threat query are replaced by
//! deterministic stand-ins so a scenario file is enough to watch the
//! decision engine work: the path stub walks straight up the spawn column
//! and the threat stub reports enemy bunkers within a fixed radius.

mod scenario;

use std::{fs, path::PathBuf};

use anyhow::{anyhow, Context};
use clap::Parser;
use rampart_core::{
    BoardView, Cell, CostTable, Health, LedgerView, MatchConfig, OccupiedCell, Owner, PathOracle,
    StructureKind, ThreatOracle, ThreatSource, UnitCatalog, UnitDescriptor, UnitTag,
};
use rampart_engine::{GameActions, TurnEngine};
use scenario::Scenario;

/// Distance within which the stub threat oracle lets a bunker reach a cell.
const STUB_BUNKER_RANGE_SQ: i64 = 9;
/// Damage per tick the stub threat oracle assigns to every bunker.
const STUB_BUNKER_DAMAGE: u32 = 4;

#[derive(Debug, Parser)]
#[command(name = "rampart", about = "Plan one lane-defense turn for a scenario")]
struct Args {
    /// Path to a JSON scenario file.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Encoded scenario-transfer string, used instead of a file.
    #[arg(long)]
    transfer: Option<String>,

    /// Seed for the engine's random draws.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print the scenario as a transfer string instead of planning a turn.
    #[arg(long)]
    emit_transfer: bool,

    /// Also show per-turn planning diagnostics, not just warnings.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    install_logger(args.verbose);
    let scenario = load_scenario(&args)?;

    if args.emit_transfer {
        println!("{}", scenario.encode());
        return Ok(());
    }

    let catalog = UnitCatalog::from_descriptors(&scenario.descriptors)?;
    let board = BoardView::new(scenario.config.arena_size, scenario.occupied.clone());
    let ledger = LedgerView::new(
        scenario.structure_balance,
        scenario.mobile_balance,
        scenario.costs,
    );
    let path_oracle = LanePath {
        arena_size: scenario.config.arena_size,
    };
    let threat_oracle = BunkerThreats::from_board(&board, &catalog);

    let mut engine = TurnEngine::new(scenario.config.clone(), &scenario.descriptors, args.seed)?;
    let mut console = ConsoleActions;
    let commands = engine.run_turn(&board, &ledger, &path_oracle, &threat_oracle, &mut console);

    println!(
        "planned {} intents, spawn lanes now near={:?} far={:?}",
        commands.len(),
        engine.side_state().near(),
        engine.side_state().far(),
    );
    Ok(())
}

/// Stderr logger for the engine's `log` facade output.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn install_logger(verbose: bool) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log_level(verbose));
    }
}

const fn log_level(verbose: bool) -> log::LevelFilter {
    if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    }
}

fn load_scenario(args: &Args) -> anyhow::Result<Scenario> {
    if let Some(encoded) = &args.transfer {
        return Scenario::decode(encoded).map_err(|error| anyhow!(error));
    }
    if let Some(path) = &args.scenario {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        return serde_json::from_str(&text)
            .with_context(|| format!("parsing scenario {}", path.display()));
    }
    Ok(demo_scenario())
}

/// Built-in scenario used when no file or transfer string is provided.
fn demo_scenario() -> Scenario {
    let mut occupied = vec![
        OccupiedCell {
            cell: Cell::new(9, 15),
            owner: Owner::Enemy,
            tag: UnitTag::new("BU"),
            health: Health::new(75),
        },
        OccupiedCell {
            cell: Cell::new(18, 15),
            owner: Owner::Enemy,
            tag: UnitTag::new("BU"),
            health: Health::new(75),
        },
    ];
    for x in 4..12 {
        occupied.push(OccupiedCell {
            cell: Cell::new(x, 14),
            owner: Owner::Enemy,
            tag: UnitTag::new("WA"),
            health: Health::new(60),
        });
    }

    Scenario {
        config: MatchConfig::standard(),
        descriptors: vec![
            UnitDescriptor::new("WA", "wall"),
            UnitDescriptor::new("BU", "bunker"),
            UnitDescriptor::new("BO", "booster"),
            UnitDescriptor::new("FA", "fast"),
            UnitDescriptor::new("HE", "heavy"),
            UnitDescriptor::new("SU", "support"),
        ],
        occupied,
        structure_balance: 22,
        mobile_balance: 9,
        costs: CostTable::standard(),
    }
}

/// Path stub: walks straight up the spawn column until leaving the arena.
struct LanePath {
    arena_size: i32,
}

impl PathOracle for LanePath {
    fn forced_path(&self, start: Cell, _targets: &[Cell]) -> Vec<Cell> {
        let board = BoardView::new(self.arena_size, Vec::new());
        let mut path = Vec::new();
        let mut cell = start;
        while board.in_bounds(cell) {
            path.push(cell);
            cell = cell.offset(0, 1);
        }
        path
    }
}

/// Threat stub: every enemy bunker menaces cells within a fixed radius.
struct BunkerThreats {
    bunkers: Vec<Cell>,
}

impl BunkerThreats {
    fn from_board(board: &BoardView, catalog: &UnitCatalog) -> Self {
        let bunkers = board
            .occupied_cells()
            .filter(|occupied| occupied.owner == Owner::Enemy)
            .filter(|occupied| {
                catalog.structure_kind(&occupied.tag) == Some(StructureKind::Bunker)
            })
            .map(|occupied| occupied.cell)
            .collect();
        Self { bunkers }
    }
}

impl ThreatOracle for BunkerThreats {
    fn threats_to(&self, cell: Cell, _victim: Owner) -> Vec<ThreatSource> {
        self.bunkers
            .iter()
            .filter(|&&bunker| bunker.distance_sq(cell) <= STUB_BUNKER_RANGE_SQ)
            .map(|&bunker| ThreatSource {
                cell: bunker,
                damage_per_tick: STUB_BUNKER_DAMAGE,
            })
            .collect()
    }
}

/// Action sink that narrates every dispatched intent.
struct ConsoleActions;

impl GameActions for ConsoleActions {
    fn attempt_place(&mut self, tag: &UnitTag, cell: Cell) -> bool {
        println!("place {} at ({}, {})", tag.as_str(), cell.x(), cell.y());
        true
    }

    fn attempt_remove(&mut self, cell: Cell) -> bool {
        println!("remove structure at ({}, {})", cell.x(), cell.y());
        true
    }

    fn attempt_spawn(&mut self, tag: &UnitTag, cell: Cell, count: u32) -> bool {
        println!(
            "spawn {} x{} at ({}, {})",
            tag.as_str(),
            count,
            cell.x(),
            cell.y()
        );
        true
    }

    fn submit_turn(&mut self) {
        println!("turn submitted");
    }
}

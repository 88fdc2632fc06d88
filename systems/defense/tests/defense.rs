use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rampart_core::{
    BoardView, Cell, Command, CostTable, Health, LedgerView, MatchConfig, OccupiedCell, Owner,
    StructureKind, StructureSnapshot, UnitTag, ZoneBuckets,
};
use rampart_system_defense::DefenseAllocator;

fn ledger(structure_balance: u32) -> LedgerView {
    LedgerView::new(structure_balance, 0, CostTable::standard())
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

const FAR_SPAWN: Cell = Cell::new(3, 10);

fn plan_with(
    config: &MatchConfig,
    zones: &ZoneBuckets,
    board: &BoardView,
    ledger: &LedgerView,
) -> Vec<Command> {
    let mut out = Vec::new();
    DefenseAllocator::new(config).plan(
        zones,
        board,
        ledger,
        FAR_SPAWN,
        |_, _| true,
        &mut rng(),
        &mut out,
    );
    out
}

fn placement_cells(commands: &[Command]) -> Vec<Cell> {
    commands
        .iter()
        .filter_map(|command| match command {
            Command::PlaceStructure { cell, .. } => Some(*cell),
            _ => None,
        })
        .collect()
}

fn cells_of_kind(commands: &[Command], wanted: StructureKind) -> Vec<Cell> {
    commands
        .iter()
        .filter_map(|command| match command {
            Command::PlaceStructure { kind, cell } if *kind == wanted => Some(*cell),
            _ => None,
        })
        .collect()
}

fn wall_only_config() -> MatchConfig {
    let mut config = MatchConfig::standard();
    config.corner_anchors = Vec::new();
    config.wall_span = (1, 0);
    config.front_span = (1, 0);
    config.bunker_sites = Vec::new();
    config
}

/// Configuration that isolates the front-row tier.
fn front_only_config() -> MatchConfig {
    let mut config = wall_only_config();
    config.front_span = MatchConfig::standard().front_span;
    config.structure_cap = 0;
    config
}

#[test]
fn zero_budget_on_an_empty_board_plans_nothing() {
    let commands = plan_with(
        &MatchConfig::standard(),
        &ZoneBuckets::default(),
        &BoardView::new(28, Vec::new()),
        &ledger(0),
    );
    assert!(commands.is_empty());
}

#[test]
fn corner_anchors_are_attempted_first_in_configured_order() {
    let config = MatchConfig::standard();
    let commands = plan_with(
        &config,
        &ZoneBuckets::default(),
        &BoardView::new(28, Vec::new()),
        &ledger(3),
    );

    assert_eq!(
        placement_cells(&commands),
        config.corner_anchors[..3].to_vec(),
        "three wall points afford exactly the first three anchors",
    );
}

#[test]
fn each_tier_stops_when_its_currency_runs_out() {
    let config = MatchConfig::standard();
    let commands = plan_with(
        &config,
        &ZoneBuckets::default(),
        &BoardView::new(28, Vec::new()),
        &ledger(10),
    );

    // Ten wall points cover the four anchors and six lane cells; nothing is
    // left for a bunker or booster.
    assert_eq!(commands.len(), 10);
    assert!(cells_of_kind(&commands, StructureKind::Bunker).is_empty());
    assert!(cells_of_kind(&commands, StructureKind::Booster).is_empty());
}

#[test]
fn occupied_cells_are_skipped_without_retry() {
    let config = MatchConfig::standard();
    let occupied_anchor = config.corner_anchors[0];
    let board = BoardView::new(
        28,
        vec![OccupiedCell {
            cell: occupied_anchor,
            owner: Owner::Friendly,
            tag: UnitTag::new("WA"),
            health: Health::new(60),
        }],
    );

    let commands = plan_with(&config, &ZoneBuckets::default(), &board, &ledger(3));
    let cells = placement_cells(&commands);
    assert!(!cells.contains(&occupied_anchor));
    assert_eq!(cells, config.corner_anchors[1..].to_vec());
}

#[test]
fn legality_rejections_advance_to_the_next_candidate() {
    let mut config = MatchConfig::standard();
    config.bunker_sites = Vec::new();
    let board = BoardView::new(28, Vec::new());
    let allocator = DefenseAllocator::new(&config);

    let mut out = Vec::new();
    allocator.plan(
        &ZoneBuckets::default(),
        &board,
        &ledger(30),
        FAR_SPAWN,
        |_, cell| cell.x() % 2 == 1,
        &mut rng(),
        &mut out,
    );

    assert!(
        placement_cells(&out).iter().all(|cell| cell.x() % 2 == 1),
        "cells the engine rejects must be skipped, not placed",
    );
    assert!(!out.is_empty());
}

#[test]
fn plan_never_spends_more_than_the_ledger_balance() {
    let config = MatchConfig::standard();
    let ledger = ledger(40);
    let commands = plan_with(
        &config,
        &ZoneBuckets::default(),
        &BoardView::new(28, Vec::new()),
        &ledger,
    );

    let mut spent = 0;
    for command in &commands {
        if let Command::PlaceStructure { kind, .. } = command {
            spent += ledger.structure_cost(*kind);
        }
    }
    assert!(spent <= ledger.structure_balance());

    for kind in [
        StructureKind::Wall,
        StructureKind::Bunker,
        StructureKind::Booster,
    ] {
        let count = cells_of_kind(&commands, kind).len() as u32;
        assert!(
            count <= ledger.affordable_structures(kind),
            "{kind:?} placements exceed the affordable count",
        );
    }
}

#[test]
fn one_plan_call_never_places_a_cell_twice() {
    let commands = plan_with(
        &MatchConfig::standard(),
        &ZoneBuckets::default(),
        &BoardView::new(28, Vec::new()),
        &ledger(120),
    );

    let cells = placement_cells(&commands);
    let unique: HashSet<_> = cells.iter().copied().collect();
    assert_eq!(unique.len(), cells.len());
}

#[test]
fn replanning_after_partial_application_fills_only_gaps() {
    let config = MatchConfig::standard();
    let first = plan_with(
        &config,
        &ZoneBuckets::default(),
        &BoardView::new(28, Vec::new()),
        &ledger(60),
    );
    let first_cells: HashSet<_> = placement_cells(&first).into_iter().collect();

    // Apply the whole first plan, then replan against the updated snapshot.
    let mut occupied = Vec::new();
    let mut zones = ZoneBuckets::default();
    for command in &first {
        if let Command::PlaceStructure { kind, cell } = command {
            occupied.push(OccupiedCell {
                cell: *cell,
                owner: Owner::Friendly,
                tag: UnitTag::new("XX"),
                health: Health::new(60),
            });
            let snapshot = StructureSnapshot {
                cell: *cell,
                owner: Owner::Friendly,
                kind: *kind,
                health: Health::new(60),
            };
            match kind {
                StructureKind::Wall => zones.friendly_walls.push(snapshot),
                StructureKind::Bunker => zones.friendly_bunkers.push(snapshot),
                StructureKind::Booster => zones.friendly_boosters.push(snapshot),
            }
        }
    }
    let board = BoardView::new(28, occupied);
    let second = plan_with(&config, &zones, &board, &ledger(60));

    for cell in placement_cells(&second) {
        assert!(
            !first_cells.contains(&cell),
            "replanning must never double-place {cell:?}",
        );
    }
}

#[test]
fn bunker_pairs_respect_the_exclusion_radius() {
    let mut config = wall_only_config();
    config.bunker_sites = vec![
        Cell::new(10, 9),
        Cell::new(11, 9),
        Cell::new(12, 9),
        Cell::new(13, 9),
        Cell::new(14, 9),
    ];
    let radius_sq = i64::from(config.exclusion_radius) * i64::from(config.exclusion_radius);

    // Walls and boosters are out of the picture: no anchors, no lane span,
    // and a cap low enough that the filler tier never starts.
    config.structure_cap = 3;
    let commands = plan_with(
        &config,
        &ZoneBuckets::default(),
        &BoardView::new(28, Vec::new()),
        &ledger(30),
    );

    let bunkers = cells_of_kind(&commands, StructureKind::Bunker);
    assert!(!bunkers.is_empty());
    for (index, &a) in bunkers.iter().enumerate() {
        for &b in &bunkers[index + 1..] {
            assert!(
                a.distance_sq(b) >= radius_sq,
                "bunkers {a:?} and {b:?} violate the exclusion radius",
            );
        }
    }
}

#[test]
fn existing_bunkers_block_nearby_sites() {
    let mut config = wall_only_config();
    config.bunker_sites = vec![Cell::new(11, 9)];

    let mut zones = ZoneBuckets::default();
    zones.friendly_bunkers.push(StructureSnapshot {
        cell: Cell::new(10, 9),
        owner: Owner::Friendly,
        kind: StructureKind::Bunker,
        health: Health::new(75),
    });

    let commands = plan_with(&config, &zones, &BoardView::new(28, Vec::new()), &ledger(30));
    assert!(
        cells_of_kind(&commands, StructureKind::Bunker).is_empty(),
        "a site within the radius of a standing bunker is rejected",
    );
}

#[test]
fn filler_stops_at_the_structure_cap() {
    let mut config = wall_only_config();
    config.structure_cap = 3;

    let commands = plan_with(
        &config,
        &ZoneBuckets::default(),
        &BoardView::new(28, Vec::new()),
        &ledger(100),
    );

    assert_eq!(cells_of_kind(&commands, StructureKind::Booster).len(), 3);
}

#[test]
fn filler_only_uses_the_friendly_half() {
    let config = wall_only_config();
    let board = BoardView::new(28, Vec::new());
    let commands = plan_with(&config, &ZoneBuckets::default(), &board, &ledger(40));

    for cell in cells_of_kind(&commands, StructureKind::Booster) {
        assert!(cell.y() < board.half());
        assert!(board.in_bounds(cell));
    }
}

#[test]
fn front_walls_leave_the_gap_beside_the_far_spawn() {
    let config = front_only_config();
    let commands = plan_with(
        &config,
        &ZoneBuckets::default(),
        &BoardView::new(28, Vec::new()),
        &ledger(30),
    );

    let walls = cells_of_kind(&commands, StructureKind::Wall);
    assert_eq!(walls.len(), 23, "the whole run minus the gap cell");
    assert!(walls.iter().all(|cell| cell.y() == 13));
    assert!(walls.contains(&Cell::new(3, 13)));
    assert!(walls.contains(&Cell::new(25, 13)));
    assert!(
        !walls.contains(&Cell::new(2, 13)),
        "the cell beside the far spawn stays open",
    );
    assert!(
        !commands
            .iter()
            .any(|command| matches!(command, Command::RemoveStructure { .. })),
        "an empty gap cell needs no removal",
    );
}

#[test]
fn the_gap_follows_the_far_spawn_side() {
    let config = front_only_config();
    let mut out = Vec::new();
    DefenseAllocator::new(&config).plan(
        &ZoneBuckets::default(),
        &BoardView::new(28, Vec::new()),
        &ledger(30),
        Cell::new(24, 10),
        |_, _| true,
        &mut rng(),
        &mut out,
    );

    let walls = cells_of_kind(&out, StructureKind::Wall);
    assert!(walls.contains(&Cell::new(2, 13)));
    assert!(
        !walls.contains(&Cell::new(25, 13)),
        "with the far spawn on the right the gap moves to the right end",
    );
}

#[test]
fn a_friendly_wall_on_the_gap_cell_is_flagged_for_removal() {
    let config = front_only_config();
    let board = BoardView::new(
        28,
        vec![OccupiedCell {
            cell: Cell::new(2, 13),
            owner: Owner::Friendly,
            tag: UnitTag::new("WA"),
            health: Health::new(60),
        }],
    );

    let commands = plan_with(&config, &ZoneBuckets::default(), &board, &ledger(30));
    assert!(
        commands.contains(&Command::RemoveStructure {
            cell: Cell::new(2, 13),
        }),
        "a wall blocking the exit gap is reopened every turn",
    );
}

#[test]
fn an_enemy_structure_on_the_gap_cell_is_left_alone() {
    let config = front_only_config();
    let board = BoardView::new(
        28,
        vec![OccupiedCell {
            cell: Cell::new(2, 13),
            owner: Owner::Enemy,
            tag: UnitTag::new("WA"),
            health: Health::new(60),
        }],
    );

    let commands = plan_with(&config, &ZoneBuckets::default(), &board, &ledger(30));
    assert!(!commands
        .iter()
        .any(|command| matches!(command, Command::RemoveStructure { .. })));
}

#[test]
fn identical_seeds_produce_identical_plans() {
    let config = MatchConfig::standard();
    let board = BoardView::new(28, Vec::new());
    let first = plan_with(&config, &ZoneBuckets::default(), &board, &ledger(80));
    let second = plan_with(&config, &ZoneBuckets::default(), &board, &ledger(80));
    assert_eq!(first, second);
}

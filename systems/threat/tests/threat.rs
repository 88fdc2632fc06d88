use std::collections::HashMap;

use rampart_core::{BoardView, Cell, Owner, PathOracle, ThreatOracle, ThreatSource};
use rampart_system_threat::{SpawnScore, ThreatAssessor};

/// Path oracle fake that walks the spawn cell's column straight up.
struct ColumnPath;

impl PathOracle for ColumnPath {
    fn forced_path(&self, start: Cell, _targets: &[Cell]) -> Vec<Cell> {
        (start.y()..start.y() + 4)
            .map(|y| Cell::new(start.x(), y))
            .collect()
    }
}

/// Threat oracle fake backed by a per-cell table.
#[derive(Default)]
struct TableThreats {
    table: HashMap<Cell, Vec<ThreatSource>>,
}

impl TableThreats {
    fn with(mut self, cell: Cell, source: Cell, damage_per_tick: u32) -> Self {
        self.table.entry(cell).or_default().push(ThreatSource {
            cell: source,
            damage_per_tick,
        });
        self
    }
}

impl ThreatOracle for TableThreats {
    fn threats_to(&self, cell: Cell, _victim: Owner) -> Vec<ThreatSource> {
        self.table.get(&cell).cloned().unwrap_or_default()
    }
}

fn board() -> BoardView {
    BoardView::new(28, Vec::new())
}

// Both cells sit on the friendly deploy edges of the 28-cell diamond.
const LEFT_SPAWN: Cell = Cell::new(3, 10);
const RIGHT_SPAWN: Cell = Cell::new(24, 10);

#[test]
fn lowest_projected_damage_wins() {
    let threats = TableThreats::default()
        .with(Cell::new(3, 11), Cell::new(5, 14), 8)
        .with(Cell::new(24, 11), Cell::new(22, 14), 3);

    let best = ThreatAssessor::new().rank(&[LEFT_SPAWN, RIGHT_SPAWN], &board(), &ColumnPath, &threats);
    assert_eq!(
        best,
        Some(SpawnScore {
            cell: RIGHT_SPAWN,
            projected_damage: 3,
        })
    );
}

#[test]
fn ties_keep_the_first_seen_candidate() {
    let threats = TableThreats::default()
        .with(Cell::new(3, 11), Cell::new(5, 14), 4)
        .with(Cell::new(24, 11), Cell::new(22, 14), 4);

    let assessor = ThreatAssessor::new();
    for _ in 0..5 {
        let best = assessor.rank(&[LEFT_SPAWN, RIGHT_SPAWN], &board(), &ColumnPath, &threats);
        assert_eq!(
            best.map(|score| score.cell),
            Some(LEFT_SPAWN),
            "repeated calls must keep the first-seen candidate on ties",
        );
    }
}

#[test]
fn a_unit_covering_several_path_cells_is_counted_once() {
    let bunker = Cell::new(5, 14);
    let threats = TableThreats::default()
        .with(Cell::new(3, 10), bunker, 8)
        .with(Cell::new(3, 11), bunker, 8)
        .with(Cell::new(3, 12), bunker, 8);

    let best = ThreatAssessor::new().rank(&[LEFT_SPAWN], &board(), &ColumnPath, &threats);
    assert_eq!(best.map(|score| score.projected_damage), Some(8));
}

#[test]
fn empty_candidate_list_yields_no_recommendation() {
    let best = ThreatAssessor::new().rank(&[], &board(), &ColumnPath, &TableThreats::default());
    assert_eq!(best, None);
}

#[test]
fn cells_off_the_deploy_edges_are_ineligible() {
    // An interior cell and an enemy-edge cell must both be skipped.
    let candidates = [Cell::new(13, 5), Cell::new(27, 14)];
    let best = ThreatAssessor::new().rank(&candidates, &board(), &ColumnPath, &TableThreats::default());
    assert_eq!(best, None);
}

#[test]
fn eligible_candidates_still_rank_when_mixed_with_ineligible_ones() {
    let threats = TableThreats::default().with(Cell::new(24, 12), Cell::new(22, 14), 2);
    let candidates = [Cell::new(13, 5), RIGHT_SPAWN];

    let best = ThreatAssessor::new().rank(&candidates, &board(), &ColumnPath, &threats);
    assert_eq!(
        best,
        Some(SpawnScore {
            cell: RIGHT_SPAWN,
            projected_damage: 2,
        })
    );
}

#[test]
fn threat_free_paths_score_zero() {
    let best = ThreatAssessor::new().rank(&[LEFT_SPAWN], &board(), &ColumnPath, &TableThreats::default());
    assert_eq!(
        best,
        Some(SpawnScore {
            cell: LEFT_SPAWN,
            projected_damage: 0,
        })
    );
}

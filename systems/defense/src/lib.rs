#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure allocation system that spreads the structure budget across defences.

use std::collections::HashSet;

use rand::Rng;
use rampart_core::{
    BoardView, Cell, Command, LedgerView, MatchConfig, Owner, StructureKind, ZoneBuckets,
};

/// Budget-bounded placement planner evaluated tier by tier.
///
/// Tiers run in a fixed order: corner anchors, the lane wall, spaced
/// bunkers, the front-row wall run, then booster filler. Every tier draws
/// on one local budget
/// tracker seeded from the ledger, so the emitted plan can never spend more
/// structure currency than the ledger reports, and a planned-cell set keeps
/// the pass idempotent: re-planning after a partial application fills only
/// the remaining gaps.
///
/// Placement legality stays with the external engine. The `is_legal` probe
/// answers for the engine; a `false` means the candidate is skipped and
/// never retried within its tier.
#[derive(Clone, Debug)]
pub struct DefenseAllocator {
    corner_anchors: Vec<Cell>,
    wall_row: i32,
    wall_span: (i32, i32),
    front_span: (i32, i32),
    bunker_sites: Vec<Cell>,
    exclusion_radius: i32,
    structure_cap: usize,
}

impl DefenseAllocator {
    /// Creates an allocator from the validated match configuration.
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            corner_anchors: config.corner_anchors.clone(),
            wall_row: config.wall_row,
            wall_span: config.wall_span,
            front_span: config.front_span,
            bunker_sites: config.bunker_sites.clone(),
            exclusion_radius: config.exclusion_radius,
            structure_cap: config.structure_cap,
        }
    }

    /// Emits this turn's ordered placement intents into `out`.
    ///
    /// `far_spawn` orients the front-row wall run: its exit gap always ends
    /// up on the far-spawn side of the row.
    #[allow(clippy::too_many_arguments)]
    pub fn plan<F, R>(
        &self,
        zones: &ZoneBuckets,
        board: &BoardView,
        ledger: &LedgerView,
        far_spawn: Cell,
        mut is_legal: F,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(StructureKind, Cell) -> bool,
        R: Rng,
    {
        let mut plan = PlanState {
            budget: ledger.structure_balance(),
            planned: HashSet::new(),
            placed: zones.friendly_structure_total(),
        };

        self.plan_corner_anchors(board, ledger, &mut is_legal, &mut plan, out);
        self.plan_lane_wall(board, ledger, &mut is_legal, &mut plan, out);
        self.plan_spaced_bunkers(zones, board, ledger, &mut is_legal, rng, &mut plan, out);
        self.plan_front_line(board, ledger, far_spawn, &mut is_legal, &mut plan, out);
        self.plan_filler(board, ledger, &mut is_legal, rng, &mut plan, out);
    }

    fn plan_corner_anchors<F>(
        &self,
        board: &BoardView,
        ledger: &LedgerView,
        is_legal: &mut F,
        plan: &mut PlanState,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(StructureKind, Cell) -> bool,
    {
        let cost = ledger.structure_cost(StructureKind::Wall);
        for &cell in &self.corner_anchors {
            if plan.budget < cost {
                break;
            }
            if plan.accepts(board, cell) && is_legal(StructureKind::Wall, cell) {
                plan.commit(StructureKind::Wall, cell, cost, out);
            }
        }
    }

    fn plan_lane_wall<F>(
        &self,
        board: &BoardView,
        ledger: &LedgerView,
        is_legal: &mut F,
        plan: &mut PlanState,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(StructureKind, Cell) -> bool,
    {
        let cost = ledger.structure_cost(StructureKind::Wall);
        let (start, end) = self.wall_span;
        for x in start..=end {
            if plan.budget < cost {
                break;
            }
            let cell = Cell::new(x, self.wall_row);
            if plan.accepts(board, cell) && is_legal(StructureKind::Wall, cell) {
                plan.commit(StructureKind::Wall, cell, cost, out);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn plan_spaced_bunkers<F, R>(
        &self,
        zones: &ZoneBuckets,
        board: &BoardView,
        ledger: &LedgerView,
        is_legal: &mut F,
        rng: &mut R,
        plan: &mut PlanState,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(StructureKind, Cell) -> bool,
        R: Rng,
    {
        let cost = ledger.structure_cost(StructureKind::Bunker);
        let radius_sq = i64::from(self.exclusion_radius) * i64::from(self.exclusion_radius);
        let existing: Vec<Cell> = zones
            .friendly_bunkers
            .iter()
            .map(|bunker| bunker.cell)
            .collect();

        let mut pool: Vec<Cell> = self
            .bunker_sites
            .iter()
            .copied()
            .filter(|&site| plan.accepts(board, site))
            .filter(|&site| is_legal(StructureKind::Bunker, site))
            .filter(|&site| {
                existing
                    .iter()
                    .all(|&bunker| site.distance_sq(bunker) >= radius_sq)
            })
            .collect();

        while plan.budget >= cost && !pool.is_empty() {
            // Two independent draws; the one farther along the x axis wins
            // and the first draw wins ties.
            let first = pool[rng.gen_range(0..pool.len())];
            let second = pool[rng.gen_range(0..pool.len())];
            let choice = if second.x() > first.x() { second } else { first };

            pool.retain(|&site| site != choice);
            plan.commit(StructureKind::Bunker, choice, cost, out);
            pool.retain(|&site| site.distance_sq(choice) >= radius_sq);
        }
    }

    fn plan_front_line<F>(
        &self,
        board: &BoardView,
        ledger: &LedgerView,
        far_spawn: Cell,
        is_legal: &mut F,
        plan: &mut PlanState,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(StructureKind, Cell) -> bool,
    {
        let cost = ledger.structure_cost(StructureKind::Wall);
        let row = board.half() - 1;
        let (start, end) = self.front_span;
        let mut cells: Vec<Cell> = (start..=end).map(|x| Cell::new(x, row)).collect();
        // The run ends next to the far spawn; that final cell is the exit
        // gap and never receives a wall.
        if far_spawn.x() < board.half() {
            cells.reverse();
        }
        let Some(gap) = cells.pop() else {
            return;
        };

        for cell in cells {
            if plan.budget < cost {
                break;
            }
            if plan.accepts(board, cell) && is_legal(StructureKind::Wall, cell) {
                plan.commit(StructureKind::Wall, cell, cost, out);
            }
        }

        let gap_walled = board
            .structure_at(gap)
            .is_some_and(|unit| unit.owner == Owner::Friendly);
        if gap_walled {
            out.push(Command::RemoveStructure { cell: gap });
        }
    }

    fn plan_filler<F, R>(
        &self,
        board: &BoardView,
        ledger: &LedgerView,
        is_legal: &mut F,
        rng: &mut R,
        plan: &mut PlanState,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(StructureKind, Cell) -> bool,
        R: Rng,
    {
        let cost = ledger.structure_cost(StructureKind::Booster);
        let mut pool = self.friendly_half_pool(board, plan);

        while plan.budget >= cost && !pool.is_empty() && plan.placed < self.structure_cap {
            let index = rng.gen_range(0..pool.len());
            let cell = pool.swap_remove(index);
            if is_legal(StructureKind::Booster, cell) {
                plan.commit(StructureKind::Booster, cell, cost, out);
            }
        }
    }

    fn friendly_half_pool(&self, board: &BoardView, plan: &PlanState) -> Vec<Cell> {
        let half = board.half();
        let mut pool = Vec::new();
        for y in 0..half {
            for x in 0..board.arena_size() {
                let cell = Cell::new(x, y);
                if board.in_bounds(cell) && plan.accepts(board, cell) {
                    pool.push(cell);
                }
            }
        }
        pool
    }
}

struct PlanState {
    budget: u32,
    planned: HashSet<Cell>,
    placed: usize,
}

impl PlanState {
    fn accepts(&self, board: &BoardView, cell: Cell) -> bool {
        board.in_bounds(cell) && !board.is_occupied(cell) && !self.planned.contains(&cell)
    }

    fn commit(&mut self, kind: StructureKind, cell: Cell, cost: u32, out: &mut Vec<Command>) {
        debug_assert!(self.budget >= cost, "commit requires an affordable tier");
        self.budget -= cost;
        self.placed += 1;
        let _ = self.planned.insert(cell);
        out.push(Command::PlaceStructure { kind, cell });
    }
}

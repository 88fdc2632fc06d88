#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure deployment policy selecting unit type, spawn cell and count.

use rand::Rng;
use rampart_core::{
    BoardCorner, BoardView, Cell, Command, LedgerView, MatchConfig, MobileKind, PathOracle,
    SpawnSideState, ThreatOracle, ZoneBuckets,
};
use rampart_system_threat::ThreatAssessor;

/// Fixed-order decision list over zone counts.
///
/// Each branch is evaluated only when every earlier condition is false, and
/// every branch deploys at most the ledger's affordable count for its kind.
/// Zero affordable units is an ordinary no-op, never an error.
#[derive(Clone, Copy, Debug)]
pub struct AttackPolicy {
    frontline_threshold: usize,
    rush_threshold: usize,
    wall_line_threshold: usize,
    threat_ranking: bool,
}

impl AttackPolicy {
    /// Creates a policy from the validated match configuration.
    #[must_use]
    pub const fn new(config: &MatchConfig) -> Self {
        Self {
            frontline_threshold: config.frontline_threshold,
            rush_threshold: config.rush_threshold,
            wall_line_threshold: config.wall_line_threshold,
            threat_ranking: config.threat_ranking,
        }
    }

    /// Emits this turn's deployment intent into `out`, if any.
    ///
    /// Branch order: heavy break-through at the far spawn under front-line
    /// pressure, fast rush at the far spawn against a thin enemy board,
    /// heavy push at the near spawn behind a long defensive line, and
    /// otherwise a fast deployment on the least-threatened edge cell (or a
    /// uniform draw between the two spawn lanes when ranking is disabled or
    /// yields nothing).
    #[allow(clippy::too_many_arguments)]
    pub fn decide<P, T, R>(
        &self,
        zones: &ZoneBuckets,
        board: &BoardView,
        ledger: &LedgerView,
        side_state: &SpawnSideState,
        assessor: &ThreatAssessor,
        path_oracle: &P,
        threat_oracle: &T,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) where
        P: PathOracle,
        T: ThreatOracle,
        R: Rng,
    {
        if zones.front_line_pressure() > self.frontline_threshold {
            deploy(ledger, MobileKind::Heavy, side_state.far(), out);
        } else if zones.enemy_structure_total() < self.rush_threshold {
            deploy(ledger, MobileKind::Fast, side_state.far(), out);
        } else if zones.defensive_line_count() > self.wall_line_threshold {
            deploy(ledger, MobileKind::Heavy, side_state.near(), out);
        } else {
            let cell = self
                .ranked_spawn(board, assessor, path_oracle, threat_oracle)
                .unwrap_or_else(|| self.uniform_spawn(side_state, rng));
            deploy(ledger, MobileKind::Fast, cell, out);
        }
    }

    fn ranked_spawn<P, T>(
        &self,
        board: &BoardView,
        assessor: &ThreatAssessor,
        path_oracle: &P,
        threat_oracle: &T,
    ) -> Option<Cell>
    where
        P: PathOracle,
        T: ThreatOracle,
    {
        if !self.threat_ranking {
            return None;
        }

        let mut candidates = board.edge_cells(BoardCorner::BottomLeft);
        candidates.extend(board.edge_cells(BoardCorner::BottomRight));
        candidates.retain(|&cell| !board.is_occupied(cell));

        assessor
            .rank(&candidates, board, path_oracle, threat_oracle)
            .map(|score| score.cell)
    }

    fn uniform_spawn<R: Rng>(&self, side_state: &SpawnSideState, rng: &mut R) -> Cell {
        if rng.gen_range(0..2) == 0 {
            side_state.far()
        } else {
            side_state.near()
        }
    }
}

fn deploy(ledger: &LedgerView, kind: MobileKind, cell: Cell, out: &mut Vec<Command>) {
    let count = ledger.affordable_mobiles(kind);
    if count > 0 {
        out.push(Command::SpawnMobile { kind, cell, count });
    }
}

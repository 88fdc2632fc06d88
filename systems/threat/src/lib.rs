#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that ranks candidate spawn cells by projected incoming damage.

use std::collections::HashSet;

use rampart_core::{BoardCorner, BoardView, Cell, Owner, PathOracle, ThreatOracle};

/// A candidate spawn cell together with its projected damage total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnScore {
    /// Edge cell the score was computed for.
    pub cell: Cell,
    /// Summed damage-per-tick of the enemy units covering the forced path.
    pub projected_damage: u32,
}

/// Ranks spawn candidates by the damage a unit would soak along its path.
///
/// The estimate is a deliberate approximation: it reads only the enemy units
/// standing right now, ignoring reinforcements the opponent places after
/// this turn and the health of the unit doing the walking. It is a ranking
/// signal, not a survival prediction.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreatAssessor;

impl ThreatAssessor {
    /// Creates a new assessor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Scores each candidate and returns the strictly safest one.
    ///
    /// A candidate must sit on one of the two friendly deploy edges; its
    /// forced path is requested toward the mirrored corner's edge, and every
    /// distinct enemy unit able to damage any path cell contributes its
    /// damage-per-tick once. Ties keep the first-seen candidate, so the
    /// ranking is stable in the input order. Cells on neither deploy edge
    /// are ineligible and skipped; an empty or fully ineligible candidate
    /// list yields `None`.
    #[must_use]
    pub fn rank<P, T>(
        &self,
        candidates: &[Cell],
        board: &BoardView,
        path_oracle: &P,
        threat_oracle: &T,
    ) -> Option<SpawnScore>
    where
        P: PathOracle,
        T: ThreatOracle,
    {
        let mut best: Option<SpawnScore> = None;

        for &candidate in candidates {
            let corner = match board.corner_containing(candidate) {
                Some(corner @ (BoardCorner::BottomLeft | BoardCorner::BottomRight)) => corner,
                _ => continue,
            };

            let targets = board.edge_cells(corner.opposite());
            let projected_damage = self.project_damage(candidate, &targets, path_oracle, threat_oracle);
            let score = SpawnScore {
                cell: candidate,
                projected_damage,
            };

            match best {
                Some(current) if score.projected_damage >= current.projected_damage => {}
                _ => best = Some(score),
            }
        }

        best
    }

    fn project_damage<P, T>(
        &self,
        start: Cell,
        targets: &[Cell],
        path_oracle: &P,
        threat_oracle: &T,
    ) -> u32
    where
        P: PathOracle,
        T: ThreatOracle,
    {
        let mut seen = HashSet::new();
        let mut total = 0u32;
        for step in path_oracle.forced_path(start, targets) {
            for threat in threat_oracle.threats_to(step, Owner::Friendly) {
                if seen.insert(threat.cell) {
                    total = total.saturating_add(threat.damage_per_tick);
                }
            }
        }
        total
    }
}

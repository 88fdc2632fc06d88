#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! System that redirects the attack lane when one side grows too fortified.

use rampart_core::{BoardView, Cell, Command, MatchConfig, SpawnSideState, StructureKind, ZoneBuckets};

// Density window around each spawn cell: 7 cells wide, 3 rows deep, offset
// toward the enemy half where lane fortifications stand.
const WINDOW_HALF_WIDTH: i32 = 3;
const WINDOW_ROW_OFFSETS: [i32; 3] = [4, 5, 6];

/// Detects enemy-density asymmetry between the two spawn lanes.
///
/// When the near lane is more fortified than the far lane by more than the
/// configured margin, the near/far labels swap. If any of the configured
/// boundary exit cells currently hold a friendly wall, the one nearest the
/// busier spawn is relocated to its horizontal mirror so the lane opening
/// follows the swap; at most one remove+place pair is emitted per
/// invocation, and the label swap happens whether or not a wall was found.
#[derive(Clone, Debug)]
pub struct SideSwitcher {
    switch_margin: i32,
    boundary_exits: Vec<Cell>,
    arena_size: i32,
}

impl SideSwitcher {
    /// Creates a switcher from the validated match configuration.
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            switch_margin: config.switch_margin,
            boundary_exits: config.boundary_exits.clone(),
            arena_size: config.arena_size,
        }
    }

    /// Applies the density check, possibly mutating `state` and emitting a
    /// single boundary relocation.
    pub fn handle(
        &self,
        zones: &ZoneBuckets,
        board: &BoardView,
        state: &mut SpawnSideState,
        out: &mut Vec<Command>,
    ) {
        let near_density = window_density(board, state.near());
        let far_density = window_density(board, state.far());
        if near_density - far_density <= self.switch_margin {
            return;
        }

        // The busier side is the near spawn; among walled exits the one
        // closest to it opens the lane that needs opening. Config order
        // breaks distance ties.
        let busier = state.near();
        let walled_exit = self
            .boundary_exits
            .iter()
            .copied()
            .filter(|&exit| zones.friendly_walls.iter().any(|wall| wall.cell == exit))
            .min_by_key(|&exit| exit.manhattan_distance(busier));
        if let Some(exit) = walled_exit {
            out.push(Command::RemoveStructure { cell: exit });
            out.push(Command::PlaceStructure {
                kind: StructureKind::Wall,
                cell: exit.mirrored_x(self.arena_size),
            });
        }

        state.swap();
    }
}

fn window_density(board: &BoardView, spawn: Cell) -> i32 {
    let mut count = 0;
    for dx in -WINDOW_HALF_WIDTH..=WINDOW_HALF_WIDTH {
        for dy in WINDOW_ROW_OFFSETS {
            let cell = spawn.offset(dx, dy);
            if board.in_bounds(cell) && board.is_occupied(cell) {
                count += 1;
            }
        }
    }
    count
}

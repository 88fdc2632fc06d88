#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure classification system that buckets board occupancy into zones.

use rampart_core::{BoardView, Owner, StructureKind, StructureSnapshot, UnitCatalog, ZoneBuckets};

/// Buckets every occupied cell into the fixed zone record for this turn.
///
/// Visits each occupied cell exactly once. A tag the catalog cannot resolve
/// to a structure kind is bucketed as a wall so an engine-side unit added in
/// a newer protocol version degrades instead of failing the turn. The result
/// is a pure function of the snapshot and must be discarded with it; zone
/// contents are never valid beyond the turn the snapshot describes.
#[must_use]
pub fn classify(board: &BoardView, catalog: &UnitCatalog) -> ZoneBuckets {
    let half = board.half();
    let mut zones = ZoneBuckets::default();

    for occupied in board.occupied_cells() {
        let kind = catalog
            .structure_kind(&occupied.tag)
            .unwrap_or(StructureKind::Wall);
        let snapshot = StructureSnapshot {
            cell: occupied.cell,
            owner: occupied.owner,
            kind,
            health: occupied.health,
        };

        match (occupied.owner, kind) {
            (Owner::Friendly, StructureKind::Wall) => zones.friendly_walls.push(snapshot),
            (Owner::Friendly, StructureKind::Bunker) => zones.friendly_bunkers.push(snapshot),
            (Owner::Friendly, StructureKind::Booster) => zones.friendly_boosters.push(snapshot),
            (Owner::Enemy, StructureKind::Wall) => zones.enemy_walls.push(snapshot),
            (Owner::Enemy, StructureKind::Bunker) => zones.enemy_bunkers.push(snapshot),
            (Owner::Enemy, StructureKind::Booster) => zones.enemy_boosters.push(snapshot),
        }

        let cell = occupied.cell;
        match occupied.owner {
            Owner::Enemy => match cell.y() - half {
                0 => zones.front_band_one.push(cell),
                1 => zones.front_band_two.push(cell),
                2 => zones.front_band_three.push(cell),
                3 => zones.front_band_four.push(cell),
                _ => {}
            },
            Owner::Friendly => {
                if cell.y() == half - 1 {
                    zones.defensive_line.push(cell);
                }
            }
        }
    }

    zones
}

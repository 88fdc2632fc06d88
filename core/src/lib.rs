#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Rampart decision engine.
//!
//! This crate defines the seams that connect the external match engine to the
//! pure decision systems. The engine materialises a [`BoardView`] and a
//! [`LedgerView`] once per turn, systems consume those snapshots together
//! with the per-turn [`ZoneBuckets`] classification, and respond exclusively
//! by pushing [`Command`] values into caller-owned buffers. Nothing in this
//! crate performs I/O or retains state between turns.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single board cell expressed as x and y coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the Manhattan distance between two cells.
    #[must_use]
    pub const fn manhattan_distance(self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Computes the squared Euclidean distance between two cells.
    #[must_use]
    pub const fn distance_sq(self, other: Cell) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// Returns the cell mirrored across the vertical midline of an arena.
    #[must_use]
    pub const fn mirrored_x(self, arena_size: i32) -> Self {
        Self {
            x: arena_size - 1 - self.x,
            y: self.y,
        }
    }

    /// Returns the cell translated by the provided offsets.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Which player a unit on the board belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// A unit controlled by this engine.
    Friendly,
    /// A unit controlled by the opponent.
    Enemy,
}

/// Kinds of stationary structures this engine can place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    /// Cheap blocking structure that redirects mobile units.
    Wall,
    /// High-cost structure that damages passing enemy units.
    Bunker,
    /// Support structure that strengthens nearby friendly mobile units.
    Booster,
}

/// Kinds of mobile units this engine can deploy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MobileKind {
    /// Cheap, quick unit used to score when lanes are open.
    Fast,
    /// Durable unit used to break through fortified lanes.
    Heavy,
    /// Escort unit that intercepts enemy mobile units.
    Support,
}

/// Opaque per-unit-type identifier assigned by the external match engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitTag(String);

impl UnitTag {
    /// Creates a tag from the external engine's shorthand string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrows the shorthand string carried by the tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Pairing of a unit tag with the role string advertised at match start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDescriptor {
    /// Identifier the external engine uses for the unit type.
    pub tag: UnitTag,
    /// Role string naming which kind the tag stands for.
    pub role: String,
}

impl UnitDescriptor {
    /// Creates a descriptor from a tag shorthand and role string.
    #[must_use]
    pub fn new(tag: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            tag: UnitTag::new(tag),
            role: role.into(),
        }
    }
}

/// Immutable mapping between external unit tags and engine unit kinds.
///
/// Built once at match start from the descriptor table the external engine
/// advertises. A role string this engine does not recognise, a duplicated
/// tag, or a kind left without a tag all signal a version mismatch with the
/// match engine and fail construction.
#[derive(Clone, Debug)]
pub struct UnitCatalog {
    structures: HashMap<UnitTag, StructureKind>,
    mobiles: HashMap<UnitTag, MobileKind>,
    structure_tags: HashMap<StructureKind, UnitTag>,
    mobile_tags: HashMap<MobileKind, UnitTag>,
}

impl UnitCatalog {
    /// Builds a catalog from the descriptor table supplied at match start.
    pub fn from_descriptors(descriptors: &[UnitDescriptor]) -> Result<Self, ConfigError> {
        let mut catalog = Self {
            structures: HashMap::new(),
            mobiles: HashMap::new(),
            structure_tags: HashMap::new(),
            mobile_tags: HashMap::new(),
        };

        for descriptor in descriptors {
            let tag = descriptor.tag.clone();
            if catalog.structures.contains_key(&tag) || catalog.mobiles.contains_key(&tag) {
                return Err(ConfigError::DuplicateTag(tag.as_str().to_owned()));
            }

            match descriptor.role.as_str() {
                "wall" => catalog.insert_structure(tag, StructureKind::Wall),
                "bunker" => catalog.insert_structure(tag, StructureKind::Bunker),
                "booster" => catalog.insert_structure(tag, StructureKind::Booster),
                "fast" => catalog.insert_mobile(tag, MobileKind::Fast),
                "heavy" => catalog.insert_mobile(tag, MobileKind::Heavy),
                "support" => catalog.insert_mobile(tag, MobileKind::Support),
                other => return Err(ConfigError::UnknownRole(other.to_owned())),
            }
        }

        catalog.ensure_complete()?;
        Ok(catalog)
    }

    fn insert_structure(&mut self, tag: UnitTag, kind: StructureKind) {
        let _ = self.structures.insert(tag.clone(), kind);
        let _ = self.structure_tags.insert(kind, tag);
    }

    fn insert_mobile(&mut self, tag: UnitTag, kind: MobileKind) {
        let _ = self.mobiles.insert(tag.clone(), kind);
        let _ = self.mobile_tags.insert(kind, tag);
    }

    fn ensure_complete(&self) -> Result<(), ConfigError> {
        for (kind, role) in [
            (StructureKind::Wall, "wall"),
            (StructureKind::Bunker, "bunker"),
            (StructureKind::Booster, "booster"),
        ] {
            if !self.structure_tags.contains_key(&kind) {
                return Err(ConfigError::MissingRole(role));
            }
        }
        for (kind, role) in [
            (MobileKind::Fast, "fast"),
            (MobileKind::Heavy, "heavy"),
            (MobileKind::Support, "support"),
        ] {
            if !self.mobile_tags.contains_key(&kind) {
                return Err(ConfigError::MissingRole(role));
            }
        }
        Ok(())
    }

    /// Resolves a tag to a structure kind, if the tag names a structure.
    #[must_use]
    pub fn structure_kind(&self, tag: &UnitTag) -> Option<StructureKind> {
        self.structures.get(tag).copied()
    }

    /// Resolves a tag to a mobile kind, if the tag names a mobile unit.
    #[must_use]
    pub fn mobile_kind(&self, tag: &UnitTag) -> Option<MobileKind> {
        self.mobiles.get(tag).copied()
    }

    /// Tag the external engine expects for the provided structure kind.
    #[must_use]
    pub fn structure_tag(&self, kind: StructureKind) -> &UnitTag {
        &self.structure_tags[&kind]
    }

    /// Tag the external engine expects for the provided mobile kind.
    #[must_use]
    pub fn mobile_tag(&self, kind: MobileKind) -> &UnitTag {
        &self.mobile_tags[&kind]
    }
}

/// Remaining hit points of a stationary unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(u32);

impl Health {
    /// Creates a health value from whole hit points.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric hit-point value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// One occupied board cell as reported by the external engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupiedCell {
    /// Coordinate the unit occupies.
    pub cell: Cell,
    /// Player the unit belongs to.
    pub owner: Owner,
    /// External identifier of the unit type.
    pub tag: UnitTag,
    /// Remaining hit points of the unit.
    pub health: Health,
}

/// A stationary unit with its tag resolved to an engine kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StructureSnapshot {
    /// Coordinate the structure occupies.
    pub cell: Cell,
    /// Player the structure belongs to.
    pub owner: Owner,
    /// Resolved structure kind.
    pub kind: StructureKind,
    /// Remaining hit points of the structure.
    pub health: Health,
}

/// Corners of the diamond arena, naming its four deploy/target edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardCorner {
    /// The friendly left deploy edge.
    BottomLeft,
    /// The friendly right deploy edge.
    BottomRight,
    /// The enemy left target edge.
    TopLeft,
    /// The enemy right target edge.
    TopRight,
}

impl BoardCorner {
    /// Edge a mobile unit spawned on this edge is forced toward.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::BottomLeft => Self::TopRight,
            Self::BottomRight => Self::TopLeft,
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
        }
    }
}

/// Read-only snapshot of board occupancy, valid for a single turn.
///
/// The view is rebuilt from a fresh engine update every turn; systems must
/// never cache cells or unit references taken from it across turns.
#[derive(Clone, Debug, Default)]
pub struct BoardView {
    arena_size: i32,
    cells: Vec<OccupiedCell>,
}

impl BoardView {
    /// Creates a view over the provided occupied cells.
    #[must_use]
    pub fn new(arena_size: i32, mut cells: Vec<OccupiedCell>) -> Self {
        cells.sort_by_key(|occupied| (occupied.cell.y(), occupied.cell.x()));
        Self { arena_size, cells }
    }

    /// Side length of the square bounding box around the diamond arena.
    #[must_use]
    pub const fn arena_size(&self) -> i32 {
        self.arena_size
    }

    /// Row index of the midline separating the two halves.
    #[must_use]
    pub const fn half(&self) -> i32 {
        self.arena_size / 2
    }

    /// Reports whether the cell lies inside the diamond arena.
    #[must_use]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        in_diamond(self.arena_size, cell)
    }

    /// Iterator over every occupied cell in deterministic row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = &OccupiedCell> {
        self.cells.iter()
    }

    /// Returns the stationary unit occupying the cell, if any.
    #[must_use]
    pub fn structure_at(&self, cell: Cell) -> Option<&OccupiedCell> {
        self.cells.iter().find(|occupied| occupied.cell == cell)
    }

    /// Reports whether a stationary unit occupies the cell.
    #[must_use]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.structure_at(cell).is_some()
    }

    /// Cells composing the deploy or target edge at the provided corner.
    #[must_use]
    pub fn edge_cells(&self, corner: BoardCorner) -> Vec<Cell> {
        let half = self.half();
        let size = self.arena_size;
        match corner {
            BoardCorner::BottomLeft => (0..half).map(|y| Cell::new(half - 1 - y, y)).collect(),
            BoardCorner::BottomRight => (0..half).map(|y| Cell::new(half + y, y)).collect(),
            BoardCorner::TopLeft => (half..size).map(|y| Cell::new(y - half, y)).collect(),
            BoardCorner::TopRight => (half..size)
                .map(|y| Cell::new(size + half - 1 - y, y))
                .collect(),
        }
    }

    /// Identifies the edge containing the cell, if the cell lies on one.
    #[must_use]
    pub fn corner_containing(&self, cell: Cell) -> Option<BoardCorner> {
        if !self.in_bounds(cell) {
            return None;
        }
        let half = self.half();
        let size = self.arena_size;
        if cell.y() < half {
            if cell.x() == half - 1 - cell.y() {
                return Some(BoardCorner::BottomLeft);
            }
            if cell.x() == half + cell.y() {
                return Some(BoardCorner::BottomRight);
            }
        } else {
            if cell.x() == cell.y() - half {
                return Some(BoardCorner::TopLeft);
            }
            if cell.x() == size + half - 1 - cell.y() {
                return Some(BoardCorner::TopRight);
            }
        }
        None
    }
}

fn in_diamond(arena_size: i32, cell: Cell) -> bool {
    let half = arena_size / 2;
    if cell.y() < 0 || cell.y() >= arena_size {
        return false;
    }
    if cell.y() < half {
        cell.x() >= half - 1 - cell.y() && cell.x() <= half + cell.y()
    } else {
        cell.x() >= cell.y() - half && cell.x() <= arena_size + half - 1 - cell.y()
    }
}

/// Per-kind unit costs reported by the external resource ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTable {
    /// Cost of one wall in structure currency.
    pub wall: u32,
    /// Cost of one bunker in structure currency.
    pub bunker: u32,
    /// Cost of one booster in structure currency.
    pub booster: u32,
    /// Cost of one fast unit in mobile currency.
    pub fast: u32,
    /// Cost of one heavy unit in mobile currency.
    pub heavy: u32,
    /// Cost of one support unit in mobile currency.
    pub support: u32,
}

impl CostTable {
    /// Cost table matching the standard match configuration.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            wall: 1,
            bunker: 6,
            booster: 4,
            fast: 1,
            heavy: 3,
            support: 1,
        }
    }

    /// Cost of one structure of the provided kind.
    #[must_use]
    pub const fn structure(&self, kind: StructureKind) -> u32 {
        match kind {
            StructureKind::Wall => self.wall,
            StructureKind::Bunker => self.bunker,
            StructureKind::Booster => self.booster,
        }
    }

    /// Cost of one mobile unit of the provided kind.
    #[must_use]
    pub const fn mobile(&self, kind: MobileKind) -> u32 {
        match kind {
            MobileKind::Fast => self.fast,
            MobileKind::Heavy => self.heavy,
            MobileKind::Support => self.support,
        }
    }
}

/// Read-only view of the external resource ledger for the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedgerView {
    structure_balance: u32,
    mobile_balance: u32,
    costs: CostTable,
}

impl LedgerView {
    /// Creates a ledger view from current balances and the cost table.
    #[must_use]
    pub const fn new(structure_balance: u32, mobile_balance: u32, costs: CostTable) -> Self {
        Self {
            structure_balance,
            mobile_balance,
            costs,
        }
    }

    /// Current balance of the structure currency.
    #[must_use]
    pub const fn structure_balance(&self) -> u32 {
        self.structure_balance
    }

    /// Current balance of the mobile-unit currency.
    #[must_use]
    pub const fn mobile_balance(&self) -> u32 {
        self.mobile_balance
    }

    /// Cost of one structure of the provided kind.
    #[must_use]
    pub const fn structure_cost(&self, kind: StructureKind) -> u32 {
        self.costs.structure(kind)
    }

    /// Cost of one mobile unit of the provided kind.
    #[must_use]
    pub const fn mobile_cost(&self, kind: MobileKind) -> u32 {
        self.costs.mobile(kind)
    }

    /// How many structures of the kind the current balance affords.
    #[must_use]
    pub const fn affordable_structures(&self, kind: StructureKind) -> u32 {
        let cost = self.costs.structure(kind);
        if cost == 0 {
            0
        } else {
            self.structure_balance / cost
        }
    }

    /// How many mobile units of the kind the current balance affords.
    #[must_use]
    pub const fn affordable_mobiles(&self, kind: MobileKind) -> u32 {
        let cost = self.costs.mobile(kind);
        if cost == 0 {
            0
        } else {
            self.mobile_balance / cost
        }
    }
}

/// Fixed-shape classification of the board, recomputed from scratch every
/// turn. One named field per zone so no zone can be missed or mistyped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZoneBuckets {
    /// Friendly walls anywhere on the board.
    pub friendly_walls: Vec<StructureSnapshot>,
    /// Friendly bunkers anywhere on the board.
    pub friendly_bunkers: Vec<StructureSnapshot>,
    /// Friendly boosters anywhere on the board.
    pub friendly_boosters: Vec<StructureSnapshot>,
    /// Enemy walls anywhere on the board.
    pub enemy_walls: Vec<StructureSnapshot>,
    /// Enemy bunkers anywhere on the board.
    pub enemy_bunkers: Vec<StructureSnapshot>,
    /// Enemy boosters anywhere on the board.
    pub enemy_boosters: Vec<StructureSnapshot>,
    /// Enemy structures on the first row past the midline.
    pub front_band_one: Vec<Cell>,
    /// Enemy structures on the second row past the midline.
    pub front_band_two: Vec<Cell>,
    /// Enemy structures on the third row past the midline.
    pub front_band_three: Vec<Cell>,
    /// Enemy structures on the fourth row past the midline.
    pub front_band_four: Vec<Cell>,
    /// Friendly structures on the row directly below the midline.
    pub defensive_line: Vec<Cell>,
}

impl ZoneBuckets {
    /// Enemy occupancy of the two rows closest to the midline.
    #[must_use]
    pub fn front_line_pressure(&self) -> usize {
        self.front_band_one.len() + self.front_band_two.len()
    }

    /// Total number of enemy structures on the board.
    #[must_use]
    pub fn enemy_structure_total(&self) -> usize {
        self.enemy_walls.len() + self.enemy_bunkers.len() + self.enemy_boosters.len()
    }

    /// Total number of friendly structures on the board.
    #[must_use]
    pub fn friendly_structure_total(&self) -> usize {
        self.friendly_walls.len() + self.friendly_bunkers.len() + self.friendly_boosters.len()
    }

    /// Number of friendly structures holding the defensive line row.
    #[must_use]
    pub fn defensive_line_count(&self) -> usize {
        self.defensive_line.len()
    }
}

/// The engine's only cross-turn state: which spawn lane is near and which is
/// far. Mutated solely by the side-switching system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnSideState {
    near: Cell,
    far: Cell,
}

impl SpawnSideState {
    /// Creates the initial near/far spawn pairing.
    #[must_use]
    pub const fn new(near: Cell, far: Cell) -> Self {
        Self { near, far }
    }

    /// Spawn cell currently labelled near.
    #[must_use]
    pub const fn near(&self) -> Cell {
        self.near
    }

    /// Spawn cell currently labelled far.
    #[must_use]
    pub const fn far(&self) -> Cell {
        self.far
    }

    /// Exchanges the near and far labels.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.near, &mut self.far);
    }
}

/// Intents emitted by decision systems, dispatched by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Requests placement of a structure on the cell.
    PlaceStructure {
        /// Kind of structure to place.
        kind: StructureKind,
        /// Cell the structure should occupy.
        cell: Cell,
    },
    /// Requests removal of the friendly structure on the cell.
    RemoveStructure {
        /// Cell holding the structure targeted for removal.
        cell: Cell,
    },
    /// Requests spawning of mobile units on an edge cell.
    SpawnMobile {
        /// Kind of mobile unit to deploy.
        kind: MobileKind,
        /// Edge cell the units spawn on.
        cell: Cell,
        /// Number of units to deploy at once.
        count: u32,
    },
}

/// An enemy unit able to damage a queried cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ThreatSource {
    /// Cell the threatening unit occupies; doubles as its identity.
    pub cell: Cell,
    /// Damage the unit deals per game tick.
    pub damage_per_tick: u32,
}

/// External path-finding oracle computing a unit's forced trajectory.
pub trait PathOracle {
    /// Forced traversal from the start cell toward the closest target cell.
    fn forced_path(&self, start: Cell, targets: &[Cell]) -> Vec<Cell>;
}

/// External oracle reporting which enemy units can damage a cell.
pub trait ThreatOracle {
    /// Enemy units currently able to damage the cell for the given victim.
    fn threats_to(&self, cell: Cell, victim: Owner) -> Vec<ThreatSource>;
}

/// Immutable match configuration threaded explicitly into every component.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Side length of the square bounding box around the diamond arena.
    pub arena_size: i32,
    /// Front-line enemy occupancy above which heavies break through.
    pub frontline_threshold: usize,
    /// Enemy structure count below which fast units rush.
    pub rush_threshold: usize,
    /// Defensive-line length above which heavies clear the near lane.
    pub wall_line_threshold: usize,
    /// Density difference that triggers a spawn-side switch.
    pub switch_margin: i32,
    /// Minimum spacing between bunkers, in cells.
    pub exclusion_radius: i32,
    /// Upper bound on total friendly structures the filler tier respects.
    pub structure_cap: usize,
    /// Fixed wall cells anchoring the arena corners.
    pub corner_anchors: Vec<Cell>,
    /// Row the lane wall runs along.
    pub wall_row: i32,
    /// Inclusive x span of the lane wall.
    pub wall_span: (i32, i32),
    /// Inclusive x span of the front-row wall run; its far-spawn end stays
    /// open as the spawn lane's exit gap.
    pub front_span: (i32, i32),
    /// Candidate sites for spaced bunkers.
    pub bunker_sites: Vec<Cell>,
    /// Boundary cells whose wall is relocated on a side switch.
    pub boundary_exits: Vec<Cell>,
    /// Initial near spawn cell.
    pub near_spawn: Cell,
    /// Initial far spawn cell.
    pub far_spawn: Cell,
    /// Whether the attack policy ranks spawn cells via the threat assessor.
    pub threat_ranking: bool,
}

impl MatchConfig {
    /// Standard configuration for the 28-cell diamond arena.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            arena_size: 28,
            frontline_threshold: 7,
            rush_threshold: 7,
            wall_line_threshold: 7,
            switch_margin: 4,
            exclusion_radius: 2,
            structure_cap: 50,
            corner_anchors: vec![
                Cell::new(0, 13),
                Cell::new(27, 13),
                Cell::new(1, 12),
                Cell::new(26, 12),
            ],
            wall_row: 11,
            wall_span: (3, 24),
            front_span: (2, 25),
            bunker_sites: vec![
                Cell::new(5, 10),
                Cell::new(8, 10),
                Cell::new(11, 10),
                Cell::new(14, 10),
                Cell::new(17, 10),
                Cell::new(20, 10),
                Cell::new(23, 10),
            ],
            boundary_exits: vec![
                Cell::new(2, 11),
                Cell::new(25, 11),
                Cell::new(3, 11),
                Cell::new(24, 11),
            ],
            near_spawn: Cell::new(24, 10),
            far_spawn: Cell::new(3, 10),
            threat_ranking: true,
        }
    }

    /// Verifies the configuration against the arena geometry.
    ///
    /// A failure here means the configuration does not match the arena the
    /// external engine described and must abort match setup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arena_size <= 0 || self.arena_size % 2 != 0 {
            return Err(ConfigError::InvalidArenaSize(self.arena_size));
        }

        let fixed_cells = self
            .corner_anchors
            .iter()
            .chain(self.bunker_sites.iter())
            .chain(self.boundary_exits.iter())
            .chain([&self.near_spawn, &self.far_spawn]);
        for &cell in fixed_cells {
            self.ensure_in_bounds(cell)?;
        }

        let (start, end) = self.wall_span;
        for x in start..=end {
            self.ensure_in_bounds(Cell::new(x, self.wall_row))?;
        }

        let front_row = self.arena_size / 2 - 1;
        let (start, end) = self.front_span;
        for x in start..=end {
            self.ensure_in_bounds(Cell::new(x, front_row))?;
        }

        Ok(())
    }

    fn ensure_in_bounds(&self, cell: Cell) -> Result<(), ConfigError> {
        if in_diamond(self.arena_size, cell) {
            Ok(())
        } else {
            Err(ConfigError::OutOfBoundsCell {
                x: cell.x(),
                y: cell.y(),
            })
        }
    }
}

/// Fatal start-of-match configuration failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The arena size is not a positive even number.
    #[error("arena size {0} is not a positive even number")]
    InvalidArenaSize(i32),
    /// A fixed coordinate lies outside the diamond arena.
    #[error("fixed cell ({x}, {y}) lies outside the arena")]
    OutOfBoundsCell {
        /// Horizontal coordinate of the offending cell.
        x: i32,
        /// Vertical coordinate of the offending cell.
        y: i32,
    },
    /// The descriptor table advertised a role this engine does not know.
    #[error("unit role '{0}' is not recognised")]
    UnknownRole(String),
    /// The descriptor table used the same tag for two unit types.
    #[error("unit tag '{0}' appears more than once")]
    DuplicateTag(String),
    /// The descriptor table left a unit kind without a tag.
    #[error("no unit tag supplied for role '{0}'")]
    MissingRole(&'static str),
}

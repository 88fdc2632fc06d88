#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn orchestrator wiring the decision systems to the external engine.
//!
//! The pipeline per turn is fixed: classify the board, plan defences, decide
//! the deployment, then let the side switcher react — accumulating intents
//! throughout — and finally dispatch every intent through [`GameActions`]
//! before submitting the turn exactly once. An action the external engine
//! rejects is logged and skipped; it can never withhold the submission of
//! the rest of the turn.

use log::{debug, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rampart_core::{
    BoardView, Cell, Command, ConfigError, LedgerView, MatchConfig, PathOracle, SpawnSideState,
    ThreatOracle, UnitCatalog, UnitDescriptor, UnitTag,
};
use rampart_system_attack::AttackPolicy;
use rampart_system_classifier::classify;
use rampart_system_defense::DefenseAllocator;
use rampart_system_side_switch::SideSwitcher;
use rampart_system_threat::ThreatAssessor;

/// Action surface of the external match engine.
///
/// Every attempt returns whether the engine accepted it; funds, legality and
/// occupancy refusals all surface as `false` and are ordinary outcomes.
pub trait GameActions {
    /// Attempts to place a structure of the tagged type on the cell.
    fn attempt_place(&mut self, tag: &UnitTag, cell: Cell) -> bool;
    /// Attempts to remove the friendly structure on the cell.
    fn attempt_remove(&mut self, cell: Cell) -> bool;
    /// Attempts to spawn `count` mobile units of the tagged type.
    fn attempt_spawn(&mut self, tag: &UnitTag, cell: Cell, count: u32) -> bool;
    /// Submits the queued turn to the match engine.
    fn submit_turn(&mut self);
}

/// Per-turn decision engine owning the only cross-turn state.
#[derive(Debug)]
pub struct TurnEngine {
    catalog: UnitCatalog,
    allocator: DefenseAllocator,
    policy: AttackPolicy,
    assessor: ThreatAssessor,
    switcher: SideSwitcher,
    side_state: SpawnSideState,
    rng: ChaCha8Rng,
    turn: u64,
}

impl TurnEngine {
    /// Builds the engine from the match-start configuration.
    ///
    /// Fails fast on a malformed configuration or descriptor table; both
    /// signal a version mismatch with the external engine, and degrading
    /// silently would corrupt every following turn.
    pub fn new(
        config: MatchConfig,
        descriptors: &[UnitDescriptor],
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = UnitCatalog::from_descriptors(descriptors)?;
        Ok(Self {
            catalog,
            allocator: DefenseAllocator::new(&config),
            policy: AttackPolicy::new(&config),
            assessor: ThreatAssessor::new(),
            switcher: SideSwitcher::new(&config),
            side_state: SpawnSideState::new(config.near_spawn, config.far_spawn),
            rng: ChaCha8Rng::seed_from_u64(seed),
            turn: 0,
        })
    }

    /// Current near/far spawn labelling.
    #[must_use]
    pub const fn side_state(&self) -> SpawnSideState {
        self.side_state
    }

    /// Plans and dispatches one turn, returning the planned intents.
    ///
    /// The board and ledger views are valid for this call only; nothing
    /// derived from them survives into the next turn.
    pub fn run_turn<P, T, A>(
        &mut self,
        board: &BoardView,
        ledger: &LedgerView,
        path_oracle: &P,
        threat_oracle: &T,
        actions: &mut A,
    ) -> Vec<Command>
    where
        P: PathOracle,
        T: ThreatOracle,
        A: GameActions,
    {
        let zones = classify(board, &self.catalog);
        let mut commands = Vec::new();

        self.allocator.plan(
            &zones,
            board,
            ledger,
            self.side_state.far(),
            |_, cell| board.in_bounds(cell) && !board.is_occupied(cell),
            &mut self.rng,
            &mut commands,
        );
        self.policy.decide(
            &zones,
            board,
            ledger,
            &self.side_state,
            &self.assessor,
            path_oracle,
            threat_oracle,
            &mut self.rng,
            &mut commands,
        );
        self.switcher
            .handle(&zones, board, &mut self.side_state, &mut commands);

        debug!(
            "turn {}: planned {} intents ({} structure points, {} mobile points)",
            self.turn,
            commands.len(),
            ledger.structure_balance(),
            ledger.mobile_balance(),
        );

        self.dispatch(&commands, actions);
        actions.submit_turn();
        self.turn += 1;
        commands
    }

    fn dispatch<A: GameActions>(&self, commands: &[Command], actions: &mut A) {
        for &command in commands {
            let accepted = match command {
                Command::PlaceStructure { kind, cell } => {
                    actions.attempt_place(self.catalog.structure_tag(kind), cell)
                }
                Command::RemoveStructure { cell } => actions.attempt_remove(cell),
                Command::SpawnMobile { kind, cell, count } => {
                    actions.attempt_spawn(self.catalog.mobile_tag(kind), cell, count)
                }
            };
            if !accepted {
                warn!("turn {}: engine rejected {command:?}", self.turn);
            }
        }
    }
}

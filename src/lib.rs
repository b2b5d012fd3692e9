//! A turn-based battle resolution engine for pokemon-style encounters.
//!
//! The engine is deterministic given a [`battle::TurnRng`]: every random
//! draw goes through the rng oracle with a reason tag, so tests script
//! exact outcomes and production code seeds from the OS. Battles are
//! driven by [`battle::BattleSession`], which talks to the host program
//! through the [`battle::BattleInterface`] trait and reports everything
//! that happened as [`battle::BattleEvent`]s.

pub mod battle;
pub mod creature;
pub mod dex;
pub mod errors;
pub mod trainer;

pub use battle::{
    run_battle, run_wild_encounter, BattleEvent, BattleInterface, BattleSession, CritPolicy,
    EventBus, SessionOutcome, TurnRng,
};
pub use creature::Creature;
pub use dex::{MoveData, MoveDex};
pub use errors::{EngineError, EngineResult};
pub use trainer::{Inventory, OpponentSide, PlayerSide, Potion, TrainerClass};

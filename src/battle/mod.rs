pub mod actions;
pub mod bag;
pub mod orchestrator;
pub mod resolver;
pub mod session;
pub mod state;

#[cfg(test)]
mod tests;

pub use actions::{handle_action_choice, ActionOutcome, CHOICE_FIGHT, CHOICE_FLEE, CHOICE_SWITCH};
pub use bag::{apply_bag_action, BagAction};
pub use orchestrator::RoundContext;
pub use resolver::{AlwaysCritical, CritPolicy, MoveOutcome, RatioCritical};
pub use session::{
    run_battle, run_wild_encounter, BagSelection, BattleInterface, BattleSession, PickerFilter,
    CHOICE_BAG,
};
pub use state::{ActorTag, BattleEvent, EventBus, SessionOutcome, TurnRng};

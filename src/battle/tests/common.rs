use std::collections::VecDeque;

use crate::battle::session::{BagSelection, BattleInterface, PickerFilter};
use crate::battle::state::{BattleEvent, EventBus};
use crate::creature::Creature;
use crate::dex::{MoveData, MoveDex, ALWAYS_HITS};
use crate::trainer::{Inventory, MovementMode, OpponentSide, PlayerSide, TrainerClass};

pub const TACKLE: u16 = 33;
pub const QUICK_ATTACK: u16 = 98;
pub const SWIFT: u16 = 129;

pub fn test_dex() -> MoveDex {
    [
        MoveData::new(TACKLE, "tackle", 40, 100, 0, 35),
        MoveData::new(QUICK_ATTACK, "quick-attack", 40, 100, 1, 30),
        MoveData::new(SWIFT, "swift", 60, ALWAYS_HITS, 0, 20),
    ]
    .into_iter()
    .collect()
}

pub fn creature(identifier: &str, hp: i32) -> Creature {
    Creature::new(identifier, 1, 50)
        .with_hp(hp, hp)
        .with_moves(vec![TACKLE])
}

pub fn player_with(roster: Vec<Creature>) -> PlayerSide {
    let mut player = PlayerSide::new("Red", roster);
    player.inventory = Inventory::starting_loadout();
    player.select_active(0);
    player
}

pub fn opponent_with(roster: Vec<Creature>) -> OpponentSide {
    OpponentSide::new("Hiker Dave", roster, TrainerClass::Hiker, MovementMode::Hiker)
}

/// A menu collaborator fed from scripts, mirroring how the rng oracle is
/// scripted: every prompt pops the next queued answer, and an empty
/// queue answers "cancel" so a test can never hang in the prompt loop.
/// Every delivered event batch is recorded for assertion.
#[derive(Default)]
pub struct ScriptedInterface {
    pub action_choices: VecDeque<i32>,
    pub move_picks: VecDeque<usize>,
    pub creature_picks: VecDeque<usize>,
    pub bag_picks: VecDeque<BagSelection>,
    pub capture_answers: VecDeque<bool>,
    pub recorded: Vec<BattleEvent>,
}

impl ScriptedInterface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actions(mut self, choices: Vec<i32>) -> Self {
        self.action_choices = choices.into();
        self
    }

    pub fn with_moves(mut self, picks: Vec<usize>) -> Self {
        self.move_picks = picks.into();
        self
    }

    pub fn with_creatures(mut self, picks: Vec<usize>) -> Self {
        self.creature_picks = picks.into();
        self
    }

    pub fn with_bag(mut self, picks: Vec<BagSelection>) -> Self {
        self.bag_picks = picks.into();
        self
    }

    pub fn with_capture_answers(mut self, answers: Vec<bool>) -> Self {
        self.capture_answers = answers.into();
        self
    }

    pub fn saw(&self, wanted: &BattleEvent) -> bool {
        self.recorded.iter().any(|event| event == wanted)
    }

    pub fn count_rounds(&self) -> usize {
        self.recorded
            .iter()
            .filter(|event| matches!(event, BattleEvent::RoundStarted { .. }))
            .count()
    }
}

impl BattleInterface for ScriptedInterface {
    fn present_action_menu(&mut self, _player: &PlayerSide, _opponent: &OpponentSide) -> Option<i32> {
        self.action_choices.pop_front()
    }

    fn present_move_menu(&mut self, _moves: &[MoveData]) -> Option<usize> {
        self.move_picks.pop_front()
    }

    fn present_creature_picker(
        &mut self,
        _roster: &[Creature],
        _filter: PickerFilter,
    ) -> Option<usize> {
        self.creature_picks.pop_front()
    }

    fn present_bag_menu(&mut self, _inventory: &Inventory) -> Option<BagSelection> {
        self.bag_picks.pop_front()
    }

    fn present_capture_prompt(&mut self, _wild: &Creature, _pokeballs: u32) -> bool {
        self.capture_answers.pop_front().unwrap_or(false)
    }

    fn present_events(&mut self, bus: &EventBus) {
        self.recorded.extend(bus.events().iter().cloned());
    }
}

use serde::{Deserialize, Serialize};

use crate::creature::Creature;

const INITIAL_POKEBALLS: u32 = 5;
const INITIAL_REVIVES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotionSize {
    Small,
    Medium,
    Large,
}

/// A healing item. Carried as a list so the same size can appear more
/// than once; consumed (removed) on use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Potion {
    pub size: PotionSize,
    pub healing: i32,
}

impl Potion {
    pub fn small() -> Self {
        Potion {
            size: PotionSize::Small,
            healing: 20,
        }
    }

    pub fn medium() -> Self {
        Potion {
            size: PotionSize::Medium,
            healing: 50,
        }
    }

    pub fn large() -> Self {
        Potion {
            size: PotionSize::Large,
            healing: 100,
        }
    }
}

/// The player's consumables. Pokeballs and revives are counters that the
/// out-of-scope shop replenishes to their initial values; potions are an
/// ordered list consumed item by item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub pokeballs: u32,
    pub revives: u32,
    pub potions: Vec<Potion>,
    initial_pokeballs: u32,
    initial_revives: u32,
}

impl Inventory {
    /// The starting loadout: 3 small, 1 medium and 1 large potion,
    /// 5 pokeballs, 3 revives.
    pub fn starting_loadout() -> Self {
        Inventory {
            pokeballs: INITIAL_POKEBALLS,
            revives: INITIAL_REVIVES,
            potions: Self::starting_potions(),
            initial_pokeballs: INITIAL_POKEBALLS,
            initial_revives: INITIAL_REVIVES,
        }
    }

    pub fn new(pokeballs: u32, revives: u32, potions: Vec<Potion>) -> Self {
        Inventory {
            pokeballs,
            revives,
            potions,
            initial_pokeballs: pokeballs,
            initial_revives: revives,
        }
    }

    fn starting_potions() -> Vec<Potion> {
        vec![
            Potion::small(),
            Potion::small(),
            Potion::small(),
            Potion::medium(),
            Potion::large(),
        ]
    }

    /// Spend one pokeball. Returns false (and leaves the count untouched)
    /// when none are left.
    pub fn use_pokeball(&mut self) -> bool {
        if self.pokeballs > 0 {
            self.pokeballs -= 1;
            true
        } else {
            false
        }
    }

    /// Spend one revive. Returns false when none are left.
    pub fn use_revive(&mut self) -> bool {
        if self.revives > 0 {
            self.revives -= 1;
            true
        } else {
            false
        }
    }

    /// Remove and return the potion at `index`, if there is one.
    pub fn take_potion(&mut self, index: usize) -> Option<Potion> {
        if index < self.potions.len() {
            Some(self.potions.remove(index))
        } else {
            None
        }
    }

    /// Restore counters to their initial values and refill the potion
    /// list. Called by the shop interaction, which is outside the engine.
    pub fn replenish(&mut self) {
        self.pokeballs = self.initial_pokeballs;
        self.revives = self.initial_revives;
        self.potions = Self::starting_potions();
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::starting_loadout()
    }
}

/// The player-controlled party: roster, the index of the creature chosen
/// to act, and the only inventory in a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSide {
    pub name: String,
    pub roster: Vec<Creature>,
    /// Index of the active creature, None until one is chosen
    pub active: Option<usize>,
    pub inventory: Inventory,
}

impl PlayerSide {
    pub fn new(name: impl Into<String>, roster: Vec<Creature>) -> Self {
        PlayerSide {
            name: name.into(),
            roster,
            active: None,
            inventory: Inventory::starting_loadout(),
        }
    }

    pub fn active_creature(&self) -> Option<&Creature> {
        self.active.and_then(|index| self.roster.get(index))
    }

    pub fn active_creature_mut(&mut self) -> Option<&mut Creature> {
        self.active.and_then(|index| self.roster.get_mut(index))
    }

    /// Make the creature at `index` the active one. Fainted roster members
    /// are skippable in selection but not selectable.
    pub fn select_active(&mut self, index: usize) -> bool {
        match self.roster.get(index) {
            Some(creature) if !creature.is_fainted() => {
                self.active = Some(index);
                true
            }
            _ => false,
        }
    }

    pub fn add_creature(&mut self, creature: Creature) {
        self.roster.push(creature);
    }

    pub fn all_fainted(&self) -> bool {
        all_fainted(&self.roster)
    }

    /// Restore every roster member to full hp. The overworld heal-center
    /// hook; never called mid-battle.
    pub fn heal_all(&mut self) {
        for creature in &mut self.roster {
            creature.restore_full_hp();
        }
    }
}

/// Trainer classes from the world layer. Hiker and Rival are the two
/// stationary aggressive classes that stop seeking battles once beaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainerClass {
    Hiker,
    Rival,
    Swimmer,
    Other,
}

/// Overworld movement behavior. Owned by the world/pathfinding layer; the
/// engine only performs the one-way defeat transition to `Wander`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementMode {
    Hiker,
    Rival,
    Pace,
    Wander,
    Sentry,
    Explore,
    Swim,
}

/// An opposing trainer: roster plus the world-layer identity the session
/// loop updates on defeat. No inventory; only the player carries one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentSide {
    pub name: String,
    pub roster: Vec<Creature>,
    pub class: TrainerClass,
    pub movement: MovementMode,
    pub defeated: bool,
}

impl OpponentSide {
    pub fn new(
        name: impl Into<String>,
        roster: Vec<Creature>,
        class: TrainerClass,
        movement: MovementMode,
    ) -> Self {
        OpponentSide {
            name: name.into(),
            roster,
            class,
            movement,
            defeated: false,
        }
    }

    /// Index of the first creature still standing; the opponent's active
    /// creature is re-picked this way every round.
    pub fn first_standing(&self) -> Option<usize> {
        self.roster.iter().position(|creature| !creature.is_fainted())
    }

    pub fn all_fainted(&self) -> bool {
        all_fainted(&self.roster)
    }

    /// Flag this trainer as beaten. The two stationary aggressive classes
    /// switch permanently to passive wandering; the transition is one-way
    /// and never reverted.
    pub fn mark_defeated(&mut self) {
        self.defeated = true;
        if matches!(self.class, TrainerClass::Hiker | TrainerClass::Rival) {
            self.movement = MovementMode::Wander;
        }
    }
}

fn all_fainted(roster: &[Creature]) -> bool {
    roster.iter().all(|creature| creature.is_fainted())
}

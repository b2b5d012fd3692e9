use crate::battle::actions::{handle_action_choice, ActionOutcome, CHOICE_SWITCH};
use crate::battle::bag::{apply_bag_action, BagAction};
use crate::battle::orchestrator::RoundContext;
use crate::battle::resolver::{AlwaysCritical, CritPolicy};
use crate::battle::state::{BattleEvent, EventBus, SessionOutcome, TurnRng};
use crate::creature::Creature;
use crate::dex::{MoveData, MoveDex};
use crate::errors::{PreconditionError, SelectionError};
use crate::trainer::{Inventory, OpponentSide, PlayerSide};

/// Raw menu value for opening the bag. The selector proper covers 1..=3;
/// the session routes this one itself before delegating.
pub const CHOICE_BAG: i32 = 4;

/// Which roster members a creature picker should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerFilter {
    Any,
    FaintedOnly,
}

/// What the player picked from the bag menu. The revive target is chosen
/// afterwards through the fainted-only creature picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BagSelection {
    Pokeball,
    Potion { index: usize },
    Revive,
}

/// The rendering/menu collaborator, as seen from the engine. Every
/// method is a blocking prompt; `None` means the player cancelled.
pub trait BattleInterface {
    /// The round prompt (1=Fight, 2=Flee, 3=Switch, 4=Bag).
    /// `None` aborts the encounter.
    fn present_action_menu(&mut self, player: &PlayerSide, opponent: &OpponentSide) -> Option<i32>;

    /// Pick one of the active creature's moves.
    fn present_move_menu(&mut self, moves: &[MoveData]) -> Option<usize>;

    /// Pick a roster member, honoring the filter.
    fn present_creature_picker(&mut self, roster: &[Creature], filter: PickerFilter)
        -> Option<usize>;

    /// Pick an item from the bag.
    fn present_bag_menu(&mut self, inventory: &Inventory) -> Option<BagSelection>;

    /// Throw-or-cancel prompt for a wild encounter.
    fn present_capture_prompt(&mut self, wild: &Creature, pokeballs: u32) -> bool;

    /// Round outcomes and terminal results, delivered in order.
    fn present_events(&mut self, bus: &EventBus);
}

/// What one trip through the prompt loop committed the round to.
enum RoundAction {
    Fight { chosen: MoveData },
    RoundConsumed,
    Escaped(SessionOutcome),
}

/// One encounter, from the first action prompt to termination. Holds
/// exclusive borrows of both sides for exactly the session's lifetime;
/// nothing is retained after `run` returns.
pub struct BattleSession<'a, I: BattleInterface> {
    player: &'a mut PlayerSide,
    opponent: &'a mut OpponentSide,
    dex: &'a MoveDex,
    crit_policy: &'a dyn CritPolicy,
    interface: &'a mut I,
    rng: TurnRng,
    tried_to_flee: bool,
    round: u32,
}

impl<'a, I: BattleInterface> BattleSession<'a, I> {
    pub fn new(
        player: &'a mut PlayerSide,
        opponent: &'a mut OpponentSide,
        dex: &'a MoveDex,
        crit_policy: &'a dyn CritPolicy,
        interface: &'a mut I,
        rng: TurnRng,
    ) -> Self {
        BattleSession {
            player,
            opponent,
            dex,
            crit_policy,
            interface,
            rng,
            // One-shot flag, fresh for every encounter
            tried_to_flee: false,
            round: 0,
        }
    }

    /// Drive rounds until one side has no standing creature or the
    /// player escapes. Victory by knockout marks the opponent defeated;
    /// fleeing, capturing and cancelling leave defeat state untouched.
    pub fn run(mut self) -> SessionOutcome {
        loop {
            if self.player.all_fainted() {
                return self.finish(SessionOutcome::Defeat);
            }
            let Some(opponent_active) = self.opponent.first_standing() else {
                return self.finish(SessionOutcome::Victory);
            };

            self.round += 1;
            let mut bus = EventBus::new();
            bus.push(BattleEvent::RoundStarted { round: self.round });
            bus.push(BattleEvent::OpponentSentOut {
                identifier: self.opponent.roster[opponent_active].identifier.clone(),
            });
            self.deliver(&mut bus);

            match self.prompt_round_action(opponent_active, &mut bus) {
                RoundAction::Escaped(outcome) => {
                    // Events from the escaping prompt iteration still
                    // reach the display layer
                    self.deliver(&mut bus);
                    return self.finish(outcome);
                }
                RoundAction::RoundConsumed => {}
                RoundAction::Fight { chosen } => {
                    self.resolve_fight(opponent_active, &chosen, &mut bus);
                }
            }

            // A fainted active creature loses its selection; the next
            // Fight forces the player to choose a replacement
            if self
                .player
                .active_creature()
                .is_some_and(Creature::is_fainted)
            {
                self.player.active = None;
            }

            self.deliver(&mut bus);
        }
    }

    /// The pre-round prompt loop: repeats until the player commits the
    /// round to something resolvable or escapes the encounter.
    fn prompt_round_action(&mut self, opponent_active: usize, bus: &mut EventBus) -> RoundAction {
        loop {
            let Some(raw_choice) = self
                .interface
                .present_action_menu(self.player, self.opponent)
            else {
                return RoundAction::Escaped(SessionOutcome::Aborted);
            };

            if raw_choice == CHOICE_BAG {
                if self.handle_bag(opponent_active, bus) {
                    return RoundAction::RoundConsumed;
                }
                self.deliver(bus);
                continue;
            }

            let outcome = handle_action_choice(
                raw_choice,
                self.player,
                &mut self.tried_to_flee,
                &mut self.rng,
                bus,
            );
            match outcome {
                ActionOutcome::FleeSucceeded => {
                    return RoundAction::Escaped(SessionOutcome::Fled);
                }
                ActionOutcome::FightConfirmed => {
                    if let Some(chosen) = self.pick_move(bus) {
                        return RoundAction::Fight { chosen };
                    }
                }
                ActionOutcome::ContinueLoop => {
                    if raw_choice == CHOICE_SWITCH && self.handle_switch(opponent_active, bus) {
                        return RoundAction::RoundConsumed;
                    }
                }
            }
            self.deliver(bus);
        }
    }

    /// Move selection for a confirmed fight. Returns None when the
    /// player backs out or the creature has nothing to fight with.
    fn pick_move(&mut self, bus: &mut EventBus) -> Option<MoveData> {
        let creature = self.player.active_creature()?;
        let moves: Vec<MoveData> = creature
            .moves
            .iter()
            .filter_map(|id| self.dex.get(*id).cloned())
            .collect();
        if moves.is_empty() {
            bus.push(BattleEvent::ActionFailed {
                reason: PreconditionError::NoMovesKnown.to_string(),
            });
            return None;
        }
        let index = self.interface.present_move_menu(&moves)?;
        if index >= moves.len() {
            bus.push(BattleEvent::ActionFailed {
                reason: SelectionError::InvalidMoveIndex(index).to_string(),
            });
            return None;
        }
        moves.get(index).cloned()
    }

    fn resolve_fight(&mut self, opponent_active: usize, player_move: &MoveData, bus: &mut EventBus) {
        let context = RoundContext::new(self.dex, self.crit_policy);
        let Some(player_creature) = self.player.active_creature_mut() else {
            return;
        };
        context.resolve_round(
            player_creature,
            player_move,
            &mut self.opponent.roster[opponent_active],
            &mut self.rng,
            bus,
        );
    }

    /// Bag flow. Returns true when the round was consumed by the item.
    fn handle_bag(&mut self, opponent_active: usize, bus: &mut EventBus) -> bool {
        let Some(selection) = self.interface.present_bag_menu(&self.player.inventory) else {
            return false;
        };

        let action = match selection {
            BagSelection::Pokeball => BagAction::ThrowPokeball,
            BagSelection::Potion { index } => BagAction::UsePotion { index },
            BagSelection::Revive => {
                let Some(target) = self
                    .interface
                    .present_creature_picker(&self.player.roster, PickerFilter::FaintedOnly)
                else {
                    return false;
                };
                BagAction::UseRevive { target }
            }
        };

        let context = RoundContext::new(self.dex, self.crit_policy);
        match apply_bag_action(
            &context,
            self.player,
            self.opponent,
            opponent_active,
            action,
            &mut self.rng,
            bus,
        ) {
            Ok(()) => true,
            Err(error) => {
                bus.push(BattleEvent::ActionFailed {
                    reason: error.to_string(),
                });
                false
            }
        }
    }

    /// Switch flow. A swap away from a live active creature costs the
    /// round (the opponent retaliates once); choosing the first creature
    /// of the encounter, or a replacement after a faint, is free.
    fn handle_switch(&mut self, opponent_active: usize, bus: &mut EventBus) -> bool {
        let Some(index) = self
            .interface
            .present_creature_picker(&self.player.roster, PickerFilter::Any)
        else {
            return false;
        };

        let had_live_active = self
            .player
            .active_creature()
            .is_some_and(|creature| !creature.is_fainted());

        if !self.player.select_active(index) {
            bus.push(BattleEvent::ActionFailed {
                reason: "That pokemon cannot battle".to_string(),
            });
            return false;
        }
        bus.push(BattleEvent::CreatureSwitched {
            identifier: self.player.roster[index].identifier.clone(),
        });

        if had_live_active {
            let context = RoundContext::new(self.dex, self.crit_policy);
            context.resolve_opponent_only(
                &mut self.player.roster[index],
                &mut self.opponent.roster[opponent_active],
                &mut self.rng,
                bus,
            );
            return true;
        }
        false
    }

    fn finish(&mut self, outcome: SessionOutcome) -> SessionOutcome {
        if outcome == SessionOutcome::Victory {
            self.opponent.mark_defeated();
        }
        let mut bus = EventBus::new();
        bus.push(BattleEvent::SessionEnded { outcome });
        self.deliver(&mut bus);
        outcome
    }

    fn deliver(&mut self, bus: &mut EventBus) {
        if !bus.is_empty() {
            self.interface.present_events(bus);
            bus.drain();
        }
    }
}

/// Run a trainer battle with the parity critical-hit policy and OS
/// randomness. The overworld layer's entry point.
pub fn run_battle<I: BattleInterface>(
    player: &mut PlayerSide,
    opponent: &mut OpponentSide,
    dex: &MoveDex,
    interface: &mut I,
) -> SessionOutcome {
    BattleSession::new(
        player,
        opponent,
        dex,
        &AlwaysCritical,
        interface,
        TurnRng::new_random(),
    )
    .run()
}

/// A wild-creature encounter: a single throw-or-cancel prompt. A throw
/// with a pokeball in stock always captures (an exact copy joins the
/// roster and the count drops by one); the wild creature never acts.
pub fn run_wild_encounter<I: BattleInterface>(
    player: &mut PlayerSide,
    wild: &Creature,
    interface: &mut I,
) -> SessionOutcome {
    let mut bus = EventBus::new();

    if !interface.present_capture_prompt(wild, player.inventory.pokeballs) {
        bus.push(BattleEvent::SessionEnded {
            outcome: SessionOutcome::Aborted,
        });
        interface.present_events(&bus);
        return SessionOutcome::Aborted;
    }

    if !player.inventory.use_pokeball() {
        bus.push(BattleEvent::ActionFailed {
            reason: "You have no pokeballs left!".to_string(),
        });
        bus.push(BattleEvent::SessionEnded {
            outcome: SessionOutcome::Aborted,
        });
        interface.present_events(&bus);
        return SessionOutcome::Aborted;
    }

    player.add_creature(wild.clone());
    bus.push(BattleEvent::CreatureCaptured {
        identifier: wild.identifier.clone(),
    });
    bus.push(BattleEvent::SessionEnded {
        outcome: SessionOutcome::Captured,
    });
    interface.present_events(&bus);
    SessionOutcome::Captured
}

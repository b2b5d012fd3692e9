use crate::battle::resolver::{resolve_move, CritPolicy};
use crate::battle::state::{ActorTag, BattleEvent, EventBus, TurnRng};
use crate::creature::Creature;
use crate::dex::{MoveData, MoveDex};

/// Shared round-resolution context: the move table and the critical-hit
/// policy, fixed for the length of a session.
pub struct RoundContext<'a> {
    pub dex: &'a MoveDex,
    pub crit_policy: &'a dyn CritPolicy,
}

impl<'a> RoundContext<'a> {
    pub fn new(dex: &'a MoveDex, crit_policy: &'a dyn CritPolicy) -> Self {
        RoundContext { dex, crit_policy }
    }

    /// Resolve one full round of combat: both actors move, ordered by
    /// move priority with ties favoring the player. If the first move
    /// faints the second actor's creature, the second move is skipped
    /// entirely for the round.
    pub fn resolve_round(
        &self,
        player_creature: &mut Creature,
        player_move: &MoveData,
        opponent_creature: &mut Creature,
        rng: &mut TurnRng,
        bus: &mut EventBus,
    ) {
        let Some(opponent_move) = self.pick_opponent_move(opponent_creature, rng) else {
            // Opponent has nothing to act with; the player's move still lands
            self.execute(
                ActorTag::Player,
                player_creature,
                player_move,
                opponent_creature,
                rng,
                bus,
            );
            return;
        };

        let player_first = player_move.priority >= opponent_move.priority;

        if player_first {
            self.execute(
                ActorTag::Player,
                player_creature,
                player_move,
                opponent_creature,
                rng,
                bus,
            );
            if opponent_creature.is_fainted() {
                bus.push(BattleEvent::MoveSkipped {
                    actor: ActorTag::Opponent,
                });
                return;
            }
            self.execute(
                ActorTag::Opponent,
                opponent_creature,
                &opponent_move,
                player_creature,
                rng,
                bus,
            );
        } else {
            self.execute(
                ActorTag::Opponent,
                opponent_creature,
                &opponent_move,
                player_creature,
                rng,
                bus,
            );
            if player_creature.is_fainted() {
                bus.push(BattleEvent::MoveSkipped {
                    actor: ActorTag::Player,
                });
                return;
            }
            self.execute(
                ActorTag::Player,
                player_creature,
                player_move,
                opponent_creature,
                rng,
                bus,
            );
        }
    }

    /// The non-damaging-action variant: the player spent the round on a
    /// potion, revive or switch, and the opponent still acts exactly once
    /// through the same selection and resolution path.
    pub fn resolve_opponent_only(
        &self,
        player_creature: &mut Creature,
        opponent_creature: &mut Creature,
        rng: &mut TurnRng,
        bus: &mut EventBus,
    ) {
        if let Some(opponent_move) = self.pick_opponent_move(opponent_creature, rng) {
            self.execute(
                ActorTag::Opponent,
                opponent_creature,
                &opponent_move,
                player_creature,
                rng,
                bus,
            );
        }
    }

    /// Uniform random choice from the opponent's move list, resolved
    /// through the dex. An empty list or a dangling move id means the
    /// opponent does not act this round.
    fn pick_opponent_move(&self, opponent: &Creature, rng: &mut TurnRng) -> Option<MoveData> {
        if opponent.moves.is_empty() {
            return None;
        }
        let index = rng.pick(opponent.moves.len(), "opponent move selection");
        self.dex.get(opponent.moves[index]).cloned()
    }

    fn execute(
        &self,
        actor: ActorTag,
        attacker: &Creature,
        move_data: &MoveData,
        defender: &mut Creature,
        rng: &mut TurnRng,
        bus: &mut EventBus,
    ) {
        let outcome = resolve_move(attacker, move_data, defender, self.crit_policy, rng);
        bus.push(BattleEvent::MoveResolved {
            actor,
            move_identifier: move_data.identifier.clone(),
            hit: outcome.hit,
            critical: outcome.critical,
            damage: outcome.damage,
        });
        if defender.is_fainted() {
            bus.push(BattleEvent::CreatureFainted {
                actor: match actor {
                    ActorTag::Player => ActorTag::Opponent,
                    ActorTag::Opponent => ActorTag::Player,
                },
                identifier: defender.identifier.clone(),
            });
        }
    }
}

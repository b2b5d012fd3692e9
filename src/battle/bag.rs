use crate::battle::orchestrator::RoundContext;
use crate::battle::state::{BattleEvent, EventBus, TurnRng};
use crate::errors::{DataIntegrityError, EngineResult, PreconditionError, SelectionError};
use crate::trainer::{OpponentSide, PlayerSide};

/// One inventory-mediated action, in place of an attack. The enum keeps
/// the branches mutually exclusive by construction; switching the active
/// creature is the session loop's job since it owns the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BagAction {
    /// Capture the opponent's active creature
    ThrowPokeball,
    /// Heal the active creature with the potion at this inventory index
    UsePotion { index: usize },
    /// Revive the fainted roster member at this index
    UseRevive { target: usize },
}

/// Apply one bag action. Potion and revive cost the player their move,
/// so the opponent gets one compensating move through the normal
/// resolution path; a capture short-circuits the round and the opponent
/// does not act.
///
/// Errors leave both sides untouched: the session reports them and
/// re-prompts without consuming the turn.
pub fn apply_bag_action(
    context: &RoundContext<'_>,
    player: &mut PlayerSide,
    opponent: &mut OpponentSide,
    opponent_active: usize,
    action: BagAction,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EngineResult<()> {
    match action {
        BagAction::ThrowPokeball => throw_pokeball(player, opponent, opponent_active, bus),
        BagAction::UsePotion { index } => {
            use_potion(context, player, opponent, opponent_active, index, rng, bus)
        }
        BagAction::UseRevive { target } => {
            use_revive(context, player, opponent, opponent_active, target, rng, bus)
        }
    }
}

fn throw_pokeball(
    player: &mut PlayerSide,
    opponent: &OpponentSide,
    opponent_active: usize,
    bus: &mut EventBus,
) -> EngineResult<()> {
    if player.inventory.pokeballs == 0 {
        return Err(PreconditionError::OutOfPokeballs.into());
    }
    let captured = opponent
        .roster
        .get(opponent_active)
        .cloned()
        .ok_or(SelectionError::InvalidRosterIndex(opponent_active))?;

    player.inventory.use_pokeball();
    bus.push(BattleEvent::CreatureCaptured {
        identifier: captured.identifier.clone(),
    });
    player.add_creature(captured);
    Ok(())
}

fn use_potion(
    context: &RoundContext<'_>,
    player: &mut PlayerSide,
    opponent: &mut OpponentSide,
    opponent_active: usize,
    potion_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EngineResult<()> {
    let active_index = player
        .active
        .ok_or(PreconditionError::NoCreatureChosen)?;

    // Validate the heal target before the potion leaves the inventory
    {
        let creature = player
            .roster
            .get(active_index)
            .ok_or(SelectionError::InvalidRosterIndex(active_index))?;
        if creature.hp().is_none() || creature.max_hp().is_none() {
            return Err(DataIntegrityError::MissingHpStat(creature.identifier.clone()).into());
        }
    }

    let potion = player
        .inventory
        .take_potion(potion_index)
        .ok_or(SelectionError::InvalidPotionIndex(potion_index))?;

    // Index re-validated above; the borrow was released for the inventory
    let creature = &mut player.roster[active_index];
    creature.heal(potion.healing);
    bus.push(BattleEvent::PotionUsed {
        identifier: creature.identifier.clone(),
        restored: potion.healing,
    });

    compensating_move(context, player, opponent, opponent_active, rng, bus);
    Ok(())
}

fn use_revive(
    context: &RoundContext<'_>,
    player: &mut PlayerSide,
    opponent: &mut OpponentSide,
    opponent_active: usize,
    target: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> EngineResult<()> {
    if player.inventory.revives == 0 {
        return Err(PreconditionError::OutOfRevives.into());
    }
    let creature = player
        .roster
        .get_mut(target)
        .ok_or(SelectionError::InvalidRosterIndex(target))?;
    if !creature.is_fainted() {
        return Err(PreconditionError::TargetNotFainted.into());
    }
    let new_hp = creature
        .revive_to_half()
        .ok_or_else(|| DataIntegrityError::MissingHpStat(creature.identifier.clone()))?;

    bus.push(BattleEvent::ReviveUsed {
        identifier: player.roster[target].identifier.clone(),
        new_hp,
    });
    player.inventory.use_revive();

    compensating_move(context, player, opponent, opponent_active, rng, bus);
    Ok(())
}

/// The opponent's single retaliation after a non-damaging player action.
/// Skipped when the player has no active creature to hit.
fn compensating_move(
    context: &RoundContext<'_>,
    player: &mut PlayerSide,
    opponent: &mut OpponentSide,
    opponent_active: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let Some(player_creature) = player.active_creature_mut() else { return };
    let Some(opponent_creature) = opponent.roster.get_mut(opponent_active) else {
        return;
    };
    if opponent_creature.is_fainted() {
        return;
    }
    context.resolve_opponent_only(player_creature, opponent_creature, rng, bus);
}

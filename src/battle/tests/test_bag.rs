use pretty_assertions::assert_eq;

use crate::battle::bag::{apply_bag_action, BagAction};
use crate::battle::orchestrator::RoundContext;
use crate::battle::resolver::AlwaysCritical;
use crate::battle::state::{BattleEvent, EventBus, TurnRng};
use crate::battle::tests::common::{creature, opponent_with, player_with, test_dex};
use crate::errors::{EngineError, PreconditionError, SelectionError};
use crate::trainer::Inventory;

#[test]
fn capturing_copies_the_creature_and_spends_one_pokeball() {
    let dex = test_dex();
    let context = RoundContext::new(&dex, &AlwaysCritical);
    let mut player = player_with(vec![creature("pikachu", 100)]);
    let mut opponent = opponent_with(vec![creature("geodude", 80)]);
    let mut rng = TurnRng::new_for_test(vec![]);
    let mut bus = EventBus::new();

    let result = apply_bag_action(
        &context,
        &mut player,
        &mut opponent,
        0,
        BagAction::ThrowPokeball,
        &mut rng,
        &mut bus,
    );

    assert!(result.is_ok());
    assert_eq!(player.inventory.pokeballs, 4);
    assert_eq!(player.roster.len(), 2);
    assert_eq!(player.roster[1], opponent.roster[0]);
    // The original stays with its trainer; no retaliation follows a throw
    assert_eq!(opponent.roster.len(), 1);
    assert_eq!(player.roster[0].hp(), Some(100));
    assert!(bus.events().contains(&BattleEvent::CreatureCaptured {
        identifier: "geodude".to_string(),
    }));
}

#[test]
fn throwing_with_an_empty_pocket_is_rejected_before_any_state_change() {
    let dex = test_dex();
    let context = RoundContext::new(&dex, &AlwaysCritical);
    let mut player = player_with(vec![creature("pikachu", 100)]);
    player.inventory = Inventory::new(0, 0, vec![]);
    let mut opponent = opponent_with(vec![creature("geodude", 80)]);
    let mut rng = TurnRng::new_for_test(vec![]);
    let mut bus = EventBus::new();

    let result = apply_bag_action(
        &context,
        &mut player,
        &mut opponent,
        0,
        BagAction::ThrowPokeball,
        &mut rng,
        &mut bus,
    );

    assert_eq!(
        result,
        Err(EngineError::Precondition(PreconditionError::OutOfPokeballs))
    );
    assert_eq!(player.roster.len(), 1);
    assert!(bus.is_empty());
}

#[test]
fn a_potion_heals_leaves_the_bag_and_costs_the_round() {
    let dex = test_dex();
    let context = RoundContext::new(&dex, &AlwaysCritical);
    let mut player = player_with(vec![creature("pikachu", 100)]);
    player.roster[0].take_damage(60);
    let mut opponent = opponent_with(vec![creature("geodude", 80)]);
    // The retaliation: move pick, accuracy, damage factor
    let mut rng = TurnRng::new_for_test(vec![0, 50, 90]);
    let mut bus = EventBus::new();

    let result = apply_bag_action(
        &context,
        &mut player,
        &mut opponent,
        0,
        BagAction::UsePotion { index: 0 },
        &mut rng,
        &mut bus,
    );

    assert!(result.is_ok());
    // Starting loadout holds three smalls, a medium and a large
    assert_eq!(player.inventory.potions.len(), 4);
    assert!(bus.events().contains(&BattleEvent::PotionUsed {
        identifier: "pikachu".to_string(),
        restored: 20,
    }));
    // 40 hp, +20 from the potion, -25 from the critical tackle
    assert_eq!(player.roster[0].hp(), Some(35));
}

#[test]
fn a_potion_never_heals_past_full() {
    let dex = test_dex();
    let context = RoundContext::new(&dex, &AlwaysCritical);
    let mut player = player_with(vec![creature("pikachu", 100)]);
    player.roster[0].take_damage(10);
    let mut opponent = opponent_with(vec![creature("geodude", 80)]);
    let mut rng = TurnRng::new_for_test(vec![0, 101]);
    let mut bus = EventBus::new();

    // The large potion restores 100 but hp is capped at max
    let result = apply_bag_action(
        &context,
        &mut player,
        &mut opponent,
        0,
        BagAction::UsePotion { index: 4 },
        &mut rng,
        &mut bus,
    );

    assert!(result.is_ok());
    assert_eq!(player.roster[0].hp(), Some(100));
}

#[test]
fn an_out_of_range_potion_index_is_rejected_and_consumes_nothing() {
    let dex = test_dex();
    let context = RoundContext::new(&dex, &AlwaysCritical);
    let mut player = player_with(vec![creature("pikachu", 100)]);
    let mut opponent = opponent_with(vec![creature("geodude", 80)]);
    let mut rng = TurnRng::new_for_test(vec![]);
    let mut bus = EventBus::new();

    let result = apply_bag_action(
        &context,
        &mut player,
        &mut opponent,
        0,
        BagAction::UsePotion { index: 9 },
        &mut rng,
        &mut bus,
    );

    assert_eq!(
        result,
        Err(EngineError::Selection(SelectionError::InvalidPotionIndex(9)))
    );
    assert_eq!(player.inventory.potions.len(), 5);
    assert!(bus.is_empty());
}

#[test]
fn a_dangling_active_index_is_rejected_not_a_panic() {
    let dex = test_dex();
    let context = RoundContext::new(&dex, &AlwaysCritical);
    let mut player = player_with(vec![creature("pikachu", 100)]);
    // A host writing the field directly can point past the roster
    player.active = Some(9);
    let mut opponent = opponent_with(vec![creature("geodude", 80)]);
    let mut rng = TurnRng::new_for_test(vec![]);
    let mut bus = EventBus::new();

    let result = apply_bag_action(
        &context,
        &mut player,
        &mut opponent,
        0,
        BagAction::UsePotion { index: 0 },
        &mut rng,
        &mut bus,
    );

    assert_eq!(
        result,
        Err(EngineError::Selection(SelectionError::InvalidRosterIndex(9)))
    );
    assert_eq!(player.inventory.potions.len(), 5);
}

#[test]
fn reviving_restores_half_max_hp_rounded_down() {
    let dex = test_dex();
    let context = RoundContext::new(&dex, &AlwaysCritical);
    let mut player = player_with(vec![creature("pikachu", 100), creature("eevee", 35)]);
    player.roster[1].take_damage(35);
    let mut opponent = opponent_with(vec![creature("geodude", 80)]);
    let mut rng = TurnRng::new_for_test(vec![0, 50, 90]);
    let mut bus = EventBus::new();

    let result = apply_bag_action(
        &context,
        &mut player,
        &mut opponent,
        0,
        BagAction::UseRevive { target: 1 },
        &mut rng,
        &mut bus,
    );

    assert!(result.is_ok());
    assert_eq!(player.roster[1].hp(), Some(17));
    assert_eq!(player.inventory.revives, 2);
    assert!(bus.events().contains(&BattleEvent::ReviveUsed {
        identifier: "eevee".to_string(),
        new_hp: 17,
    }));
}

#[test]
fn reviving_a_standing_creature_is_rejected() {
    let dex = test_dex();
    let context = RoundContext::new(&dex, &AlwaysCritical);
    let mut player = player_with(vec![creature("pikachu", 100)]);
    let mut opponent = opponent_with(vec![creature("geodude", 80)]);
    let mut rng = TurnRng::new_for_test(vec![]);
    let mut bus = EventBus::new();

    let result = apply_bag_action(
        &context,
        &mut player,
        &mut opponent,
        0,
        BagAction::UseRevive { target: 0 },
        &mut rng,
        &mut bus,
    );

    assert_eq!(
        result,
        Err(EngineError::Precondition(PreconditionError::TargetNotFainted))
    );
    assert_eq!(player.inventory.revives, 3);
}

#[test]
fn reviving_with_an_empty_pocket_is_rejected() {
    let dex = test_dex();
    let context = RoundContext::new(&dex, &AlwaysCritical);
    let mut player = player_with(vec![creature("pikachu", 100)]);
    player.inventory = Inventory::new(0, 0, vec![]);
    player.roster[0].take_damage(100);
    let mut opponent = opponent_with(vec![creature("geodude", 80)]);
    let mut rng = TurnRng::new_for_test(vec![]);
    let mut bus = EventBus::new();

    let result = apply_bag_action(
        &context,
        &mut player,
        &mut opponent,
        0,
        BagAction::UseRevive { target: 0 },
        &mut rng,
        &mut bus,
    );

    assert_eq!(
        result,
        Err(EngineError::Precondition(PreconditionError::OutOfRevives))
    );
    assert!(player.roster[0].is_fainted());
}

#[test]
fn the_compensating_move_skips_a_fainted_opponent() {
    let dex = test_dex();
    let context = RoundContext::new(&dex, &AlwaysCritical);
    let mut player = player_with(vec![creature("pikachu", 100)]);
    player.roster[0].take_damage(50);
    let mut opponent = opponent_with(vec![creature("geodude", 80)]);
    opponent.roster[0].take_damage(80);
    // No draws at all: the fainted opponent never retaliates
    let mut rng = TurnRng::new_for_test(vec![]);
    let mut bus = EventBus::new();

    let result = apply_bag_action(
        &context,
        &mut player,
        &mut opponent,
        0,
        BagAction::UsePotion { index: 0 },
        &mut rng,
        &mut bus,
    );

    assert!(result.is_ok());
    assert_eq!(player.roster[0].hp(), Some(70));
}

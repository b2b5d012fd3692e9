use crate::battle::state::{BattleEvent, EventBus, TurnRng};
use crate::trainer::PlayerSide;

/// A flee roll of this value or below (out of 100) succeeds.
pub const FLEE_SUCCESS_CEILING: u8 = 20;

/// Raw menu values the selector understands.
pub const CHOICE_FIGHT: i32 = 1;
pub const CHOICE_FLEE: i32 = 2;
pub const CHOICE_SWITCH: i32 = 3;

/// What the pre-round action selector decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Fight accepted; the caller proceeds to move selection
    FightConfirmed,
    /// Nothing resolvable happened; re-prompt
    ContinueLoop,
    /// The flee roll succeeded; end the encounter with no victor
    FleeSucceeded,
}

/// The pre-round choice protocol. Loops (via `ContinueLoop`) until the
/// player lands on something resolvable.
///
/// Flee policy: the first attempt rolls [1,100] against
/// [`FLEE_SUCCESS_CEILING`]; a failure sets the session's flee flag and
/// every later attempt is rejected outright without a new roll. The flag
/// clears only on a successful roll, and is session-scoped, so a failed
/// flee never leaks into the next encounter.
pub fn handle_action_choice(
    raw_choice: i32,
    player: &PlayerSide,
    tried_to_flee: &mut bool,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> ActionOutcome {
    match raw_choice {
        CHOICE_FIGHT => {
            let ready = player
                .active_creature()
                .is_some_and(|creature| !creature.identifier.is_empty());
            if ready {
                ActionOutcome::FightConfirmed
            } else {
                bus.push(BattleEvent::NoCreatureChosen);
                ActionOutcome::ContinueLoop
            }
        }
        CHOICE_FLEE => {
            if *tried_to_flee {
                bus.push(BattleEvent::FleeBlocked);
                return ActionOutcome::ContinueLoop;
            }
            let chance = rng.roll(1, 100, "flee attempt");
            if chance <= FLEE_SUCCESS_CEILING {
                *tried_to_flee = false;
                bus.push(BattleEvent::FleeAttempted { success: true });
                ActionOutcome::FleeSucceeded
            } else {
                *tried_to_flee = true;
                bus.push(BattleEvent::FleeAttempted { success: false });
                ActionOutcome::ContinueLoop
            }
        }
        CHOICE_SWITCH => {
            // The caller owns the creature picker; whatever it returns,
            // the selector loops.
            ActionOutcome::ContinueLoop
        }
        other => {
            bus.push(BattleEvent::InvalidOption { raw: other });
            ActionOutcome::ContinueLoop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::Creature;
    use pretty_assertions::assert_eq;

    fn ready_player() -> PlayerSide {
        let mut player = PlayerSide::new(
            "Red",
            vec![Creature::new("pikachu", 25, 12).with_hp(35, 35)],
        );
        player.select_active(0);
        player
    }

    #[test]
    fn fight_requires_an_active_creature() {
        let unready = PlayerSide::new("Red", vec![]);
        let mut bus = EventBus::new();
        let mut fled = false;
        let mut rng = TurnRng::new_for_test(vec![]);

        let outcome = handle_action_choice(CHOICE_FIGHT, &unready, &mut fled, &mut rng, &mut bus);
        assert_eq!(outcome, ActionOutcome::ContinueLoop);
        assert_eq!(bus.events(), &[BattleEvent::NoCreatureChosen]);

        let outcome =
            handle_action_choice(CHOICE_FIGHT, &ready_player(), &mut fled, &mut rng, &mut bus);
        assert_eq!(outcome, ActionOutcome::FightConfirmed);
    }

    #[test]
    fn flee_succeeds_at_or_under_the_ceiling() {
        let player = ready_player();
        let mut bus = EventBus::new();
        let mut fled = false;
        let mut rng = TurnRng::new_for_test(vec![20]);

        let outcome = handle_action_choice(CHOICE_FLEE, &player, &mut fled, &mut rng, &mut bus);
        assert_eq!(outcome, ActionOutcome::FleeSucceeded);
        assert!(!fled);
    }

    #[test]
    fn failed_flee_blocks_the_next_attempt_without_a_roll() {
        let player = ready_player();
        let mut bus = EventBus::new();
        let mut fled = false;
        // One scripted value only: a second roll would panic the script
        let mut rng = TurnRng::new_for_test(vec![21]);

        let first = handle_action_choice(CHOICE_FLEE, &player, &mut fled, &mut rng, &mut bus);
        assert_eq!(first, ActionOutcome::ContinueLoop);
        assert!(fled);

        let second = handle_action_choice(CHOICE_FLEE, &player, &mut fled, &mut rng, &mut bus);
        assert_eq!(second, ActionOutcome::ContinueLoop);
        assert_eq!(
            bus.events(),
            &[
                BattleEvent::FleeAttempted { success: false },
                BattleEvent::FleeBlocked,
            ]
        );
    }

    #[test]
    fn flee_success_rate_is_twenty_percent() {
        let player = ready_player();
        let mut rng = TurnRng::seeded(327);
        let trials = 20_000;
        let mut successes = 0;

        for _ in 0..trials {
            let mut bus = EventBus::new();
            let mut fled = false;
            if handle_action_choice(CHOICE_FLEE, &player, &mut fled, &mut rng, &mut bus)
                == ActionOutcome::FleeSucceeded
            {
                successes += 1;
            }
        }

        let rate = f64::from(successes) / f64::from(trials);
        assert!((rate - 0.20).abs() < 0.01, "observed flee rate {}", rate);
    }

    #[test]
    fn switch_and_garbage_choices_continue_the_loop() {
        let player = ready_player();
        let mut bus = EventBus::new();
        let mut fled = false;
        let mut rng = TurnRng::new_for_test(vec![]);

        assert_eq!(
            handle_action_choice(CHOICE_SWITCH, &player, &mut fled, &mut rng, &mut bus),
            ActionOutcome::ContinueLoop
        );
        assert_eq!(
            handle_action_choice(9, &player, &mut fled, &mut rng, &mut bus),
            ActionOutcome::ContinueLoop
        );
        assert_eq!(bus.events(), &[BattleEvent::InvalidOption { raw: 9 }]);
    }
}

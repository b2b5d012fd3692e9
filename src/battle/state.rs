use std::collections::VecDeque;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Which side of the encounter an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorTag {
    Player,
    Opponent,
}

impl fmt::Display for ActorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorTag::Player => write!(f, "Your pokemon"),
            ActorTag::Opponent => write!(f, "The opposing pokemon"),
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    /// Every opponent creature fainted
    Victory,
    /// Every player creature fainted
    Defeat,
    /// A flee roll succeeded
    Fled,
    /// A wild creature was caught
    Captured,
    /// The player cancelled at the action prompt
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    RoundStarted {
        round: u32,
    },
    OpponentSentOut {
        identifier: String,
    },
    /// One actor's move resolving: the full hit/critical/damage outcome
    MoveResolved {
        actor: ActorTag,
        move_identifier: String,
        hit: bool,
        critical: bool,
        damage: i32,
    },
    /// The second actor's move never executed because its creature fainted
    MoveSkipped {
        actor: ActorTag,
    },
    CreatureFainted {
        actor: ActorTag,
        identifier: String,
    },
    PotionUsed {
        identifier: String,
        restored: i32,
    },
    ReviveUsed {
        identifier: String,
        new_hp: i32,
    },
    CreatureSwitched {
        identifier: String,
    },
    CreatureCaptured {
        identifier: String,
    },
    FleeAttempted {
        success: bool,
    },
    /// A flee attempt rejected without a roll because one already failed
    FleeBlocked,
    /// Fight chosen before any creature was selected
    NoCreatureChosen,
    InvalidOption {
        raw: i32,
    },
    /// An action that could not be carried out; the round repeats
    /// without consuming a turn
    ActionFailed {
        reason: String,
    },
    SessionEnded {
        outcome: SessionOutcome,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable string for the display
    /// layer. Returns None for silent events.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::RoundStarted { round } => Some(format!("=== Round {} ===", round)),
            BattleEvent::OpponentSentOut { identifier } => {
                Some(format!("The opponent sent out {}!", identifier))
            }
            BattleEvent::MoveResolved {
                actor,
                move_identifier,
                hit,
                critical,
                damage,
            } => {
                if *hit {
                    Some(format!(
                        "{} used {}: hit{} for {} damage!",
                        actor,
                        move_identifier,
                        if *critical { " (critical)" } else { "" },
                        damage
                    ))
                } else {
                    Some(format!("{} used {}, but it missed!", actor, move_identifier))
                }
            }
            BattleEvent::MoveSkipped { .. } => {
                None // Silent - the faint message already tells the story
            }
            BattleEvent::CreatureFainted { identifier, .. } => {
                Some(format!("{} fainted!", identifier))
            }
            BattleEvent::PotionUsed {
                identifier,
                restored,
            } => Some(format!("{} recovered {} HP!", identifier, restored)),
            BattleEvent::ReviveUsed { identifier, new_hp } => {
                Some(format!("{} was revived to {} HP!", identifier, new_hp))
            }
            BattleEvent::CreatureSwitched { identifier } => {
                Some(format!("Go, {}!", identifier))
            }
            BattleEvent::CreatureCaptured { identifier } => {
                Some(format!("{} was caught!", identifier))
            }
            BattleEvent::FleeAttempted { success } => {
                if *success {
                    Some("Got away safely!".to_string())
                } else {
                    Some("Failed to flee!".to_string())
                }
            }
            BattleEvent::FleeBlocked => Some("Already tried to flee!".to_string()),
            BattleEvent::NoCreatureChosen => {
                Some("You have not chosen a pokemon!".to_string())
            }
            BattleEvent::InvalidOption { .. } => {
                Some("Invalid option. Please choose again.".to_string())
            }
            BattleEvent::ActionFailed { reason } => Some(reason.clone()),
            BattleEvent::SessionEnded { outcome } => Some(
                match outcome {
                    SessionOutcome::Victory => "You won the battle!",
                    SessionOutcome::Defeat => "All your pokemon have fainted.",
                    SessionOutcome::Fled => "You fled from the battle.",
                    SessionOutcome::Captured => "The wild pokemon was caught!",
                    SessionOutcome::Aborted => "You backed out of the battle.",
                }
                .to_string(),
            ),
        }
    }
}

/// Event bus carrying everything that happened during a round, in order.
/// The display layer consumes it; the engine never reads it back.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn drain(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events using their formatted text, skipping silent ones.
    pub fn print_formatted(&self) {
        for event in &self.events {
            if let Some(formatted) = event.format() {
                println!("  {}", formatted);
            }
        }
    }
}

impl fmt::Display for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// RNG oracle for a battle session.
///
/// All randomness in the engine flows through one of these, each draw
/// tagged with a reason string. `Scripted` makes every numeric outcome
/// deterministic for tests; `seeded` supports statistical assertions.
#[derive(Debug)]
pub enum TurnRng {
    Random(StdRng),
    Scripted { outcomes: VecDeque<u8> },
}

impl TurnRng {
    pub fn new_random() -> Self {
        TurnRng::Random(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        TurnRng::Random(StdRng::seed_from_u64(seed))
    }

    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        TurnRng::Scripted {
            outcomes: outcomes.into(),
        }
    }

    /// Draw uniformly from [lo, hi]. Scripted draws pop the next value
    /// and panic with the reason when the script runs dry.
    pub fn roll(&mut self, lo: u8, hi: u8, reason: &str) -> u8 {
        let outcome = match self {
            TurnRng::Random(rng) => rng.random_range(lo..=hi),
            TurnRng::Scripted { outcomes } => outcomes.pop_front().unwrap_or_else(|| {
                panic!(
                    "TurnRng script exhausted! Tried to get a value for: '{}'.",
                    reason
                )
            }),
        };

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        outcome
    }

    /// Draw a uniform index into a non-empty list. Scripted draws are
    /// reduced modulo `len` so tests can write plain indices.
    pub fn pick(&mut self, len: usize, reason: &str) -> usize {
        debug_assert!(len > 0, "pick from an empty list ({})", reason);
        match self {
            TurnRng::Random(rng) => rng.random_range(0..len),
            TurnRng::Scripted { .. } => self.roll(0, u8::MAX, reason) as usize % len,
        }
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Stat key for current hit points.
pub const STAT_HP: &str = "hp";
/// Stat key for the hit-point ceiling.
pub const STAT_MAX_HP: &str = "maxHP";

/// A single named stat: the current rating plus the individual value the
/// ingestion layer rolled for this creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub rating: i32,
    pub individual_value: i32,
}

/// A creature owned by a trainer or spawned in the wild.
///
/// Created when a wild encounter spawns it or a roster is populated at
/// world-build time. The engine mutates stat values (hp) during battles
/// but never the structure; fainted creatures stay in the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    /// Species name from the reference data, e.g. "pikachu"
    pub identifier: String,
    /// Key into the external species table
    pub species_id: u16,
    pub level: u8,
    /// Move ids into the [`MoveDex`](crate::dex::MoveDex), 0..N of them
    pub moves: Vec<u16>,
    /// Named stats, keyed lookup rather than a scanned list
    pub stats: HashMap<String, StatEntry>,
    pub shiny: bool,
}

impl Creature {
    pub fn new(identifier: impl Into<String>, species_id: u16, level: u8) -> Self {
        Creature {
            identifier: identifier.into(),
            species_id,
            level: level.max(1),
            moves: Vec::new(),
            stats: HashMap::new(),
            shiny: false,
        }
    }

    pub fn stat(&self, key: &str) -> Option<i32> {
        self.stats.get(key).map(|entry| entry.rating)
    }

    pub fn hp(&self) -> Option<i32> {
        self.stat(STAT_HP)
    }

    pub fn max_hp(&self) -> Option<i32> {
        self.stat(STAT_MAX_HP)
    }

    /// A creature is fainted iff its hp rating is zero or below. A creature
    /// with no hp stat at all is treated as standing; completeness of the
    /// stat table is the ingestion layer's responsibility.
    pub fn is_fainted(&self) -> bool {
        self.hp().is_some_and(|hp| hp <= 0)
    }

    /// Set hp, clamped to [0, maxHP]. Silently skips the write when the
    /// hp/maxHP pair is missing.
    pub fn set_hp(&mut self, new_hp: i32) {
        let Some(max_hp) = self.max_hp() else { return };
        if let Some(entry) = self.stats.get_mut(STAT_HP) {
            entry.rating = new_hp.clamp(0, max_hp);
        }
    }

    /// Subtract damage from hp, never going below zero.
    pub fn take_damage(&mut self, damage: i32) {
        if let Some(hp) = self.hp() {
            self.set_hp(hp - damage.max(0));
        }
    }

    /// Add healing to hp, capped at maxHP. Returns false when the creature
    /// has no hp/maxHP pair to heal.
    pub fn heal(&mut self, amount: i32) -> bool {
        match self.hp() {
            Some(hp) => {
                self.set_hp(hp + amount.max(0));
                true
            }
            None => false,
        }
    }

    /// Restore a fainted creature to exactly half of its maxHP (integer
    /// division). Returns the new hp, or None when the stat pair is missing.
    pub fn revive_to_half(&mut self) -> Option<i32> {
        let max_hp = self.max_hp()?;
        self.hp()?;
        let revived = max_hp / 2;
        self.set_hp(revived);
        Some(revived)
    }

    /// Fill hp back to maxHP.
    pub fn restore_full_hp(&mut self) {
        if let Some(max_hp) = self.max_hp() {
            self.set_hp(max_hp);
        }
    }

    // --- builder-style helpers used at roster-population time ---

    pub fn with_moves(mut self, moves: Vec<u16>) -> Self {
        self.moves = moves;
        self
    }

    pub fn with_stat(mut self, key: &str, rating: i32, individual_value: i32) -> Self {
        self.stats.insert(
            key.to_string(),
            StatEntry {
                rating,
                individual_value,
            },
        );
        self
    }

    pub fn with_hp(self, hp: i32, max_hp: i32) -> Self {
        self.with_stat(STAT_HP, hp, 0).with_stat(STAT_MAX_HP, max_hp, 0)
    }

    pub fn with_shiny(mut self, shiny: bool) -> Self {
        self.shiny = shiny;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rattata() -> Creature {
        Creature::new("rattata", 19, 5).with_hp(30, 30)
    }

    #[test]
    fn damage_never_drops_hp_below_zero() {
        let mut creature = rattata();
        creature.take_damage(999);
        assert_eq!(creature.hp(), Some(0));
        assert!(creature.is_fainted());
    }

    #[test]
    fn healing_is_capped_at_max_hp() {
        let mut creature = rattata();
        creature.take_damage(10);
        assert!(creature.heal(50));
        assert_eq!(creature.hp(), Some(30));
    }

    #[test]
    fn revive_restores_half_of_max_hp() {
        let mut creature = rattata();
        creature.take_damage(999);
        assert_eq!(creature.revive_to_half(), Some(15));
        assert_eq!(creature.hp(), Some(15));
        assert!(!creature.is_fainted());
    }

    #[test]
    fn odd_max_hp_revives_to_the_floor() {
        let mut creature = Creature::new("pidgey", 16, 5).with_hp(0, 31);
        assert_eq!(creature.revive_to_half(), Some(15));
    }

    #[test]
    fn missing_hp_stat_is_skipped_defensively() {
        let mut creature = Creature::new("missingno", 0, 1);
        creature.take_damage(10);
        assert!(!creature.is_fainted());
        assert!(!creature.heal(10));
        assert_eq!(creature.revive_to_half(), None);
    }

    #[test]
    fn negative_damage_does_not_heal() {
        let mut creature = rattata();
        creature.take_damage(10);
        creature.take_damage(-5);
        assert_eq!(creature.hp(), Some(20));
    }
}

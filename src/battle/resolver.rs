use crate::battle::state::TurnRng;
use crate::creature::Creature;
use crate::dex::MoveData;

/// Placeholder combatant stats: no per-creature attack/defense lookup is
/// wired into the engine, so every damage roll uses these.
pub const PLACEHOLDER_LEVEL: i32 = 50;
pub const PLACEHOLDER_ATTACK: i32 = 100;
pub const PLACEHOLDER_DEFENSE: i32 = 100;

/// Critical-hit determination, as a strategy rather than a hardcoded
/// check so the placeholder behavior can be swapped without touching
/// the resolver.
pub trait CritPolicy {
    fn is_critical(&self, rng: &mut TurnRng) -> bool;
}

/// Parity stub: every hit is critical. Consumes no randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysCritical;

impl CritPolicy for AlwaysCritical {
    fn is_critical(&self, _rng: &mut TurnRng) -> bool {
        true
    }
}

/// 1-in-N criticals.
#[derive(Debug, Clone, Copy)]
pub struct RatioCritical {
    pub denominator: u8,
}

impl Default for RatioCritical {
    fn default() -> Self {
        RatioCritical { denominator: 16 }
    }
}

impl CritPolicy for RatioCritical {
    fn is_critical(&self, rng: &mut TurnRng) -> bool {
        rng.roll(1, self.denominator.max(1), "critical check") == 1
    }
}

/// What one move resolution produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    pub hit: bool,
    pub critical: bool,
    pub damage: i32,
}

/// Accuracy check. Moves with the -1 sentinel never roll; everything
/// else hits iff a uniform draw in [0,100] is at or under the accuracy.
pub fn move_hits(move_data: &MoveData, rng: &mut TurnRng) -> bool {
    move_data.always_hits()
        || i32::from(rng.roll(0, 100, "accuracy check")) <= move_data.accuracy
}

/// Damage for one landed hit.
///
/// The intermediate divisions are integer (truncating); only the final
/// division by 100.0 runs in floating point before truncating back to an
/// integer. That exact ordering is load-bearing for numeric parity with
/// the reference tables.
pub fn move_damage(move_data: &MoveData, critical: bool, rng: &mut TurnRng) -> i32 {
    let step1 = (2 * PLACEHOLDER_LEVEL) / 5 + 2;
    let step2 = step1 * move_data.power * (PLACEHOLDER_ATTACK / PLACEHOLDER_DEFENSE);
    let crit_multiplier = if critical { 1.5 } else { 1.0 };
    let random_factor = i32::from(rng.roll(85, 100, "damage factor"));

    ((f64::from(step2 / 50 + 2) * crit_multiplier * f64::from(random_factor)) / 100.0) as i32
}

/// Resolve one move against a target: hit check, critical check, damage
/// computation and application. The only side effect is the defender's
/// hp dropping (clamped at zero); ordering and display are the caller's
/// concern.
///
/// The attacker is accepted for signature stability but unused while the
/// formula runs on placeholder combatant stats.
pub fn resolve_move(
    _attacker: &Creature,
    move_data: &MoveData,
    defender: &mut Creature,
    crit_policy: &dyn CritPolicy,
    rng: &mut TurnRng,
) -> MoveOutcome {
    if !move_hits(move_data, rng) {
        return MoveOutcome::default();
    }

    let critical = crit_policy.is_critical(rng);
    let damage = move_damage(move_data, critical, rng);
    defender.take_damage(damage);

    MoveOutcome {
        hit: true,
        critical,
        damage,
    }
}

//! Battle configuration constants and tunable parameters.

/// Tunable battle parameters.
///
/// Timing values are the externally-visible beats of the event interpreter;
/// they pace animation, not game logic, and presenters are free to honor or
/// collapse them (test presenters return immediately).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Chance for a clumsy combatant to flop instead of acting,
    /// expressed as `numerator`-in-`denominator`.
    pub flop_numerator: u32,
    pub flop_denominator: u32,

    /// Settle delay after a state change lands (damage blink beat).
    pub settle_delay_ms: u64,

    /// Length of each of the two phases of a replace transition
    /// (exit old unit, enter new unit).
    pub replace_beat_ms: u64,

    /// Cadence of the xp bar fill: one xp point per tick.
    pub xp_tick_ms: u64,
}

impl BattleConfig {
    // ===== fixed rule constants =====
    /// XP awarded for a kill scales linearly with the victim's level.
    pub const XP_PER_LEVEL: u32 = 20;
    /// `max_xp` after any level-up.
    pub const LEVEL_UP_MAX_XP: u32 = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FLOP_NUMERATOR: u32 = 1;
    pub const DEFAULT_FLOP_DENOMINATOR: u32 = 3;
    pub const DEFAULT_SETTLE_DELAY_MS: u64 = 600;
    pub const DEFAULT_REPLACE_BEAT_MS: u64 = 400;
    pub const DEFAULT_XP_TICK_MS: u64 = 16;

    pub fn new() -> Self {
        Self {
            flop_numerator: Self::DEFAULT_FLOP_NUMERATOR,
            flop_denominator: Self::DEFAULT_FLOP_DENOMINATOR,
            settle_delay_ms: Self::DEFAULT_SETTLE_DELAY_MS,
            replace_beat_ms: Self::DEFAULT_REPLACE_BEAT_MS,
            xp_tick_ms: Self::DEFAULT_XP_TICK_MS,
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

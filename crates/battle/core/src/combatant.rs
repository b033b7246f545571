//! Per-unit runtime battle state.
//!
//! A [`Combatant`] is one unit's live stats, built by merging a static
//! [`CombatantTemplate`] with per-instance [`CombatantSeed`] data. All stat
//! mutation goes through the typed methods here, which enforce the clamping
//! invariants (`0 <= hp <= max_hp`, `0 <= xp < max_xp`).

use crate::config::BattleConfig;
use crate::status::{Status, StatusChange, StatusKind};
use crate::types::{ActionId, CombatantId, PizzaType, Team};

/// Static unit template from the content catalog (name, flavor, move set).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub pizza_type: PizzaType,
    pub actions: Vec<ActionId>,
}

/// Per-instance overrides merged over a template when a battle starts.
///
/// `hp: None` means "start at full hp"; an explicit value supports
/// already-damaged setups.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSeed {
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: Option<u32>,
    pub max_hp: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub xp: u32,
    #[cfg_attr(feature = "serde", serde(default = "CombatantSeed::default_max_xp"))]
    pub max_xp: u32,
    #[cfg_attr(feature = "serde", serde(default = "CombatantSeed::default_level"))]
    pub level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: Option<Status>,
}

impl CombatantSeed {
    fn default_max_xp() -> u32 {
        BattleConfig::LEVEL_UP_MAX_XP
    }

    fn default_level() -> u32 {
        1
    }

    /// Fresh seed at full health for the given hp cap.
    pub fn full(max_hp: u32) -> Self {
        Self {
            hp: None,
            max_hp,
            xp: 0,
            max_xp: Self::default_max_xp(),
            level: Self::default_level(),
            status: None,
        }
    }
}

/// One unit's live battle state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub team: Team,
    pub name: String,
    pub description: String,
    pub pizza_type: PizzaType,
    pub hp: u32,
    pub max_hp: u32,
    pub xp: u32,
    pub max_xp: u32,
    pub level: u32,
    pub status: Option<Status>,
    pub actions: Vec<ActionId>,
    pub player_controlled: bool,
}

/// Pure merge of template and instance data into a live combatant.
pub fn build_combatant(
    id: CombatantId,
    team: Team,
    template: &CombatantTemplate,
    seed: &CombatantSeed,
) -> Combatant {
    Combatant {
        id,
        team,
        name: template.name.clone(),
        description: template.description.clone(),
        pizza_type: template.pizza_type,
        hp: seed.hp.unwrap_or(seed.max_hp).min(seed.max_hp),
        max_hp: seed.max_hp,
        xp: seed.xp.min(seed.max_xp.saturating_sub(1)),
        max_xp: seed.max_xp,
        level: seed.level,
        status: seed.status,
        actions: template.actions.clone(),
        player_controlled: team == Team::Player,
    }
}

/// Outcome of the end-of-turn status countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusDecay {
    /// No status, or a status that does not count down.
    None,
    /// Counted down one turn, still active.
    Ticked,
    /// Reached zero this turn; the status has been cleared.
    Expired(StatusKind),
}

impl Combatant {
    /// HP as a display percentage, clamped to `[0, 100]`.
    pub fn hp_percent(&self) -> f32 {
        if self.max_hp == 0 {
            return 0.0;
        }
        (self.hp as f32 / self.max_hp as f32 * 100.0).clamp(0.0, 100.0)
    }

    /// XP as a display percentage.
    pub fn xp_percent(&self) -> f32 {
        if self.max_xp == 0 {
            return 0.0;
        }
        self.xp as f32 / self.max_xp as f32 * 100.0
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// XP awarded to the killer when this combatant falls.
    pub fn gives_xp(&self) -> u32 {
        self.level * BattleConfig::XP_PER_LEVEL
    }

    /// Applies damage, flooring hp at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Restores hp, never exceeding `max_hp`.
    pub fn recover(&mut self, amount: u32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = Some(status);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn apply_status_change(&mut self, change: StatusChange) {
        match change {
            StatusChange::Apply(status) => self.set_status(status),
            StatusChange::Clear => self.clear_status(),
        }
    }

    /// One tick of the animated xp award.
    ///
    /// Increments xp by exactly one; when that lands on `max_xp`, levels up
    /// in the same tick (xp back to zero, `max_xp` to the fixed post-level
    /// cap). Returns true when a level-up happened.
    pub fn gain_xp_point(&mut self) -> bool {
        self.xp += 1;
        if self.xp == self.max_xp {
            self.xp = 0;
            self.max_xp = BattleConfig::LEVEL_UP_MAX_XP;
            self.level += 1;
            return true;
        }
        false
    }

    /// End-of-turn status countdown.
    ///
    /// Decrements a positive `expires_in`; clears the status exactly when it
    /// hits zero. A combatant without a status is untouched.
    pub fn decrement_status(&mut self) -> StatusDecay {
        match &mut self.status {
            Some(status) if status.expires_in > 0 => {
                status.expires_in -= 1;
                if status.expires_in == 0 {
                    let kind = status.kind;
                    self.status = None;
                    StatusDecay::Expired(kind)
                } else {
                    StatusDecay::Ticked
                }
            }
            _ => StatusDecay::None,
        }
    }
}

//! Action templates and per-turn submissions.

use crate::event::EventSpec;
use crate::types::{ActionId, CombatantId, ItemInstanceId};

/// Which combatant an action lands on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetType {
    /// The opposing team's active combatant.
    #[default]
    Opponent,
    /// The caster itself (restoratives, self-buffs).
    Caster,
}

/// Immutable action template from the content catalog.
///
/// Looked up by [`ActionId`]; never mutated at runtime. The success sequence
/// is the ordered list of events a normal execution of this action emits.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_type: TargetType,
    pub success: Vec<EventSpec>,
}

/// A caster's decision for one turn.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    /// Use an action (possibly backed by a consumable item instance)
    /// against a resolved target.
    Action {
        action: ActionId,
        target: CombatantId,
        instance_id: Option<ItemInstanceId>,
    },
    /// Swap the active combatant instead of acting; nothing else resolves
    /// this turn.
    Replacement { replacement: CombatantId },
}

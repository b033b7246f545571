//! Error types for battle state access and turn resolution.
//!
//! Every variant here is a content or programming bug, not a gameplay
//! condition: the turn algorithm only asks for combatants and items that its
//! own bookkeeping says exist. These errors surface immediately instead of
//! being recovered from, since continuing would corrupt turn state.

use crate::types::{CombatantId, ItemInstanceId, Team};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("combatant {0} does not exist in this battle")]
    MissingCombatant(CombatantId),

    #[error("team {0} has no active combatant outside a replace transition")]
    NoActiveCombatant(Team),

    #[error("team {0} has no living replacement to send in")]
    NoReplacementAvailable(Team),

    #[error("combatant {0} has no actions to choose from")]
    EmptyActionSet(CombatantId),

    #[error("item instance {0} was already consumed")]
    ItemAlreadyConsumed(ItemInstanceId),
}

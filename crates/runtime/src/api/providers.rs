//! Asynchronous abstraction for sourcing per-turn decisions.
//!
//! The turn cycle never decides anything itself: when a submission or
//! replacement menu event comes up, it suspends on a [`SubmissionProvider`].
//! Implementations can be a human-driven UI, an AI policy, or a scripted
//! fixture; the engine only sees the resolved decision.
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use battle_core::{
    ActionId, ActionTemplate, BattleError, BattleState, Combatant, CombatantId, ItemInstanceId,
    Submission, TargetType, Team,
};
use battle_content::ActionCatalog;
use rand::Rng;

use super::errors::{Result, RuntimeError};

/// One stack of identical consumable items offered by a menu.
///
/// Items are grouped by action id; using the stack consumes its
/// representative instance.
#[derive(Clone, Copy, Debug)]
pub struct ItemStack<'a> {
    pub action: &'a ActionId,
    pub template: &'a ActionTemplate,
    pub quantity: u32,
    pub instance_id: &'a ItemInstanceId,
}

/// Everything a caster's controller may legally choose from this turn.
///
/// Already-consumed items never appear here, which is what makes item
/// double-spending unreachable from a well-behaved provider.
#[derive(Debug)]
pub struct SubmissionMenu<'a> {
    pub caster: &'a Combatant,
    pub opponent: &'a Combatant,
    pub actions: Vec<(&'a ActionId, &'a ActionTemplate)>,
    pub items: Vec<ItemStack<'a>>,
    pub replacements: Vec<&'a Combatant>,
}

impl<'a> SubmissionMenu<'a> {
    pub(crate) fn build(
        state: &'a BattleState,
        catalog: &'a ActionCatalog,
        caster_id: &CombatantId,
        opponent_id: &CombatantId,
    ) -> Result<Self> {
        let caster = state.combatant(caster_id)?;
        let opponent = state.combatant(opponent_id)?;

        let actions = caster
            .actions
            .iter()
            .map(|id| (id, catalog.get(id)))
            .collect();

        // Group the caster team's item instances into stacks by action id,
        // keeping the first instance as the one a pick will consume.
        let mut items: Vec<ItemStack<'a>> = Vec::new();
        for item in state.items_for(caster.team) {
            match items.iter_mut().find(|s| s.action == &item.action) {
                Some(stack) => stack.quantity += 1,
                None => items.push(ItemStack {
                    action: &item.action,
                    template: catalog.get(&item.action),
                    quantity: 1,
                    instance_id: &item.instance_id,
                }),
            }
        }

        let replacements = state.replacements_for(caster.team, Some(caster_id));

        Ok(Self {
            caster,
            opponent,
            actions,
            items,
            replacements,
        })
    }

    /// Resolves the combatant an action lands on.
    pub fn target_for(&self, template: &ActionTemplate) -> CombatantId {
        match template.target_type {
            TargetType::Caster => self.caster.id.clone(),
            TargetType::Opponent => self.opponent.id.clone(),
        }
    }

    /// Submission for the action at `index` in [`Self::actions`].
    pub fn choose_action(&self, index: usize) -> Submission {
        let (id, template) = &self.actions[index];
        Submission::Action {
            action: (*id).clone(),
            target: self.target_for(template),
            instance_id: None,
        }
    }

    /// Submission for the item stack at `index` in [`Self::items`].
    pub fn choose_item(&self, index: usize) -> Submission {
        let stack = &self.items[index];
        Submission::Action {
            action: stack.action.clone(),
            target: self.target_for(stack.template),
            instance_id: Some(stack.instance_id.clone()),
        }
    }

    /// Submission that swaps in the teammate at `index` in
    /// [`Self::replacements`] instead of acting.
    pub fn choose_replacement(&self, index: usize) -> Submission {
        Submission::Replacement {
            replacement: self.replacements[index].id.clone(),
        }
    }
}

/// Options for filling a team slot emptied by a defeat.
#[derive(Debug)]
pub struct ReplacementMenu<'a> {
    pub team: Team,
    pub replacements: Vec<&'a Combatant>,
}

impl<'a> ReplacementMenu<'a> {
    pub(crate) fn build(state: &'a BattleState, team: Team) -> Result<Self> {
        let replacements = state.replacements_for(team, None);
        if replacements.is_empty() {
            return Err(BattleError::NoReplacementAvailable(team).into());
        }
        Ok(Self { team, replacements })
    }
}

/// Trait for providing per-turn decisions based on the menus the battle
/// offers.
///
/// Different implementations can handle:
/// - Player input (from UI)
/// - Enemy AI decisions
/// - Scripted/replayed battles
/// - Testing fixtures
///
/// There is no timeout: a provider that never resolves stalls the battle.
#[async_trait]
pub trait SubmissionProvider: Send + Sync {
    /// Decide what the caster does this turn.
    async fn submission(&self, menu: SubmissionMenu<'_>) -> Result<Submission>;

    /// Pick which living teammate fills the emptied slot.
    async fn replacement(&self, menu: ReplacementMenu<'_>) -> Result<CombatantId>;
}

/// Uniform random decision-maker.
///
/// This is the shipped AI heuristic: pick any legal action (never items or
/// voluntary swaps) and any legal replacement, uniformly. A deliberate,
/// documented simplification.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomProvider;

#[async_trait]
impl SubmissionProvider for RandomProvider {
    async fn submission(&self, menu: SubmissionMenu<'_>) -> Result<Submission> {
        if menu.actions.is_empty() {
            return Err(BattleError::EmptyActionSet(menu.caster.id.clone()).into());
        }
        let index = rand::thread_rng().gen_range(0..menu.actions.len());
        Ok(menu.choose_action(index))
    }

    async fn replacement(&self, menu: ReplacementMenu<'_>) -> Result<CombatantId> {
        let index = rand::thread_rng().gen_range(0..menu.replacements.len());
        Ok(menu.replacements[index].id.clone())
    }
}

/// One pre-scripted decision for [`QueuedProvider`].
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptedDecision {
    /// Use the caster's action with this id.
    Action(ActionId),
    /// Use an item stack backing this action id.
    Item(ActionId),
    /// Voluntarily swap to this teammate instead of acting.
    Swap(CombatantId),
    /// Answer a replacement menu with this teammate.
    Replace(CombatantId),
}

/// Scripted provider that plays decisions back in order.
///
/// Useful for tests and replays; the queue running dry (or a decision that
/// does not fit the menu it was asked for) is a scripting bug surfaced as an
/// error.
#[derive(Debug, Default)]
pub struct QueuedProvider {
    queue: Mutex<VecDeque<ScriptedDecision>>,
}

impl QueuedProvider {
    pub fn new(decisions: impl IntoIterator<Item = ScriptedDecision>) -> Self {
        Self {
            queue: Mutex::new(decisions.into_iter().collect()),
        }
    }

    fn pop(&self) -> Result<ScriptedDecision> {
        self.queue
            .lock()
            .expect("queued provider lock poisoned")
            .pop_front()
            .ok_or(RuntimeError::ScriptExhausted)
    }
}

#[async_trait]
impl SubmissionProvider for QueuedProvider {
    async fn submission(&self, menu: SubmissionMenu<'_>) -> Result<Submission> {
        match self.pop()? {
            ScriptedDecision::Action(id) => {
                let index = menu
                    .actions
                    .iter()
                    .position(|(action, _)| **action == id)
                    .ok_or(RuntimeError::ScriptMismatch)?;
                Ok(menu.choose_action(index))
            }
            ScriptedDecision::Item(id) => {
                let index = menu
                    .items
                    .iter()
                    .position(|stack| *stack.action == id)
                    .ok_or(RuntimeError::ScriptMismatch)?;
                Ok(menu.choose_item(index))
            }
            ScriptedDecision::Swap(id) => {
                let index = menu
                    .replacements
                    .iter()
                    .position(|c| c.id == id)
                    .ok_or(RuntimeError::ScriptMismatch)?;
                Ok(menu.choose_replacement(index))
            }
            ScriptedDecision::Replace(_) => Err(RuntimeError::ScriptMismatch),
        }
    }

    async fn replacement(&self, menu: ReplacementMenu<'_>) -> Result<CombatantId> {
        match self.pop()? {
            ScriptedDecision::Replace(id) => {
                if menu.replacements.iter().any(|c| c.id == id) {
                    Ok(id)
                } else {
                    Err(RuntimeError::ScriptMismatch)
                }
            }
            _ => Err(RuntimeError::ScriptMismatch),
        }
    }
}

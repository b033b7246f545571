//! Shared battle state: roster, active pointers, item stock.
//!
//! Exclusively owned by the battle session and mutated by the single
//! in-flight event; the turn algorithm reads it between events to branch on
//! hp and win conditions.

use std::collections::BTreeMap;

use crate::combatant::Combatant;
use crate::error::BattleError;
use crate::types::{ActionId, CombatantId, ItemInstanceId, Team};

/// The currently fighting unit per team.
///
/// A slot is `None` only inside the transition window of a replace event;
/// at every settled instant each team has at most one active id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveCombatants {
    pub player: Option<CombatantId>,
    pub enemy: Option<CombatantId>,
}

impl ActiveCombatants {
    pub fn get(&self, team: Team) -> Option<&CombatantId> {
        match team {
            Team::Player => self.player.as_ref(),
            Team::Enemy => self.enemy.as_ref(),
        }
    }

    pub fn set(&mut self, team: Team, id: Option<CombatantId>) {
        match team {
            Team::Player => self.player = id,
            Team::Enemy => self.enemy = id,
        }
    }
}

/// One consumable item instance in the battle stock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleItem {
    pub instance_id: ItemInstanceId,
    pub action: ActionId,
    pub team: Team,
}

/// Everything a battle mutates, bundled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BattleState {
    combatants: BTreeMap<CombatantId, Combatant>,
    pub active: ActiveCombatants,
    pub items: Vec<BattleItem>,
}

impl BattleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a combatant to the roster. The first combatant added per team
    /// becomes that team's active unit.
    pub fn insert_combatant(&mut self, combatant: Combatant) {
        let team = combatant.team;
        let id = combatant.id.clone();
        self.combatants.insert(id.clone(), combatant);
        if self.active.get(team).is_none() {
            self.active.set(team, Some(id));
        }
    }

    pub fn combatant(&self, id: &CombatantId) -> Result<&Combatant, BattleError> {
        self.combatants
            .get(id)
            .ok_or_else(|| BattleError::MissingCombatant(id.clone()))
    }

    pub fn combatant_mut(&mut self, id: &CombatantId) -> Result<&mut Combatant, BattleError> {
        self.combatants
            .get_mut(id)
            .ok_or_else(|| BattleError::MissingCombatant(id.clone()))
    }

    pub fn combatants(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.values()
    }

    /// Id of the team's active combatant; an empty slot outside a replace
    /// transition is a turn-state bug.
    pub fn active_id(&self, team: Team) -> Result<&CombatantId, BattleError> {
        self.active
            .get(team)
            .ok_or(BattleError::NoActiveCombatant(team))
    }

    pub fn active_combatant(&self, team: Team) -> Result<&Combatant, BattleError> {
        let id = self.active_id(team)?.clone();
        self.combatant(&id)
    }

    /// Whether this id is currently fighting for its team.
    pub fn is_active(&self, id: &CombatantId) -> bool {
        self.active.player.as_ref() == Some(id) || self.active.enemy.as_ref() == Some(id)
    }

    /// Living teammates eligible to replace the given combatant.
    pub fn replacements_for(
        &self,
        team: Team,
        exclude: Option<&CombatantId>,
    ) -> Vec<&Combatant> {
        self.combatants
            .values()
            .filter(|c| c.team == team && c.is_alive() && Some(&c.id) != exclude)
            .collect()
    }

    /// Item instances still available to the given team.
    pub fn items_for(&self, team: Team) -> impl Iterator<Item = &BattleItem> {
        self.items.iter().filter(move |item| item.team == team)
    }

    /// Consumes an item instance, at most once.
    ///
    /// Returns the consumed item, or `ItemAlreadyConsumed` if the instance id
    /// is no longer in stock. Called before any of the turn's events resolve
    /// so a submission can never double-spend.
    pub fn take_item(&mut self, instance_id: &ItemInstanceId) -> Result<BattleItem, BattleError> {
        let index = self
            .items
            .iter()
            .position(|item| &item.instance_id == instance_id)
            .ok_or_else(|| BattleError::ItemAlreadyConsumed(instance_id.clone()))?;
        Ok(self.items.remove(index))
    }

    /// Symmetric win rule: a team wins exactly when the opposing team has no
    /// living combatant. At most one side can qualify, since a single turn
    /// kills at most one combatant.
    pub fn winning_team(&self) -> Option<Team> {
        let player_alive = self
            .combatants
            .values()
            .any(|c| c.team == Team::Player && c.is_alive());
        let enemy_alive = self
            .combatants
            .values()
            .any(|c| c.team == Team::Enemy && c.is_alive());

        if !player_alive {
            Some(Team::Enemy)
        } else if !enemy_alive {
            Some(Team::Player)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{CombatantSeed, CombatantTemplate, build_combatant};
    use crate::types::PizzaType;

    fn unit(id: &str, team: Team, hp: u32) -> Combatant {
        let template = CombatantTemplate {
            name: id.to_uppercase(),
            description: String::new(),
            pizza_type: PizzaType::Normal,
            actions: vec!["damage1".into()],
        };
        build_combatant(
            id.into(),
            team,
            &template,
            &CombatantSeed {
                hp: Some(hp),
                ..CombatantSeed::full(50)
            },
        )
    }

    fn two_on_two() -> BattleState {
        let mut state = BattleState::new();
        state.insert_combatant(unit("p1", Team::Player, 50));
        state.insert_combatant(unit("p2", Team::Player, 50));
        state.insert_combatant(unit("e_a", Team::Enemy, 50));
        state.insert_combatant(unit("e_b", Team::Enemy, 50));
        state
    }

    #[test]
    fn first_combatant_per_team_becomes_active() {
        let state = two_on_two();
        assert_eq!(state.active_id(Team::Player).unwrap().as_str(), "p1");
        assert_eq!(state.active_id(Team::Enemy).unwrap().as_str(), "e_a");
        assert!(state.is_active(&"p1".into()));
        assert!(!state.is_active(&"p2".into()));
    }

    #[test]
    fn missing_combatant_is_an_error() {
        let state = two_on_two();
        assert!(matches!(
            state.combatant(&"ghost".into()),
            Err(BattleError::MissingCombatant(_))
        ));
    }

    #[test]
    fn replacements_exclude_caster_and_the_dead() {
        let mut state = two_on_two();
        state.combatant_mut(&"p2".into()).unwrap().take_damage(999);

        let player_options = state.replacements_for(Team::Player, Some(&"p1".into()));
        assert!(player_options.is_empty());

        let enemy_options = state.replacements_for(Team::Enemy, Some(&"e_a".into()));
        assert_eq!(enemy_options.len(), 1);
        assert_eq!(enemy_options[0].id.as_str(), "e_b");
    }

    #[test]
    fn item_is_consumed_exactly_once() {
        let mut state = two_on_two();
        state.items.push(BattleItem {
            instance_id: "item1".into(),
            action: "item_recover_hp".into(),
            team: Team::Player,
        });

        assert!(state.take_item(&"item1".into()).is_ok());
        assert_eq!(state.items_for(Team::Player).count(), 0);
        assert!(matches!(
            state.take_item(&"item1".into()),
            Err(BattleError::ItemAlreadyConsumed(_))
        ));
    }

    #[test]
    fn win_rule_is_symmetric_and_exclusive() {
        let mut state = two_on_two();
        assert_eq!(state.winning_team(), None);

        for id in ["e_a", "e_b"] {
            state.combatant_mut(&id.into()).unwrap().take_damage(999);
        }
        assert_eq!(state.winning_team(), Some(Team::Player));

        let mut state = two_on_two();
        for id in ["p1", "p2"] {
            state.combatant_mut(&id.into()).unwrap().take_damage(999);
        }
        assert_eq!(state.winning_team(), Some(Team::Enemy));
    }

    #[test]
    fn replace_transition_window_allows_empty_slot() {
        let mut state = two_on_two();
        state.active.set(Team::Player, None);
        assert!(matches!(
            state.active_combatant(Team::Player),
            Err(BattleError::NoActiveCombatant(Team::Player))
        ));
        state.active.set(Team::Player, Some("p2".into()));
        assert_eq!(state.active_id(Team::Player).unwrap().as_str(), "p2");
    }
}

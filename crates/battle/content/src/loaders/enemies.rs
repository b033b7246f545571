//! Enemy roster loader.

use std::collections::HashMap;

use anyhow::Context;
use battle_core::{CombatantSeed, PizzaId};
use serde::Deserialize;

/// One enemy encounter: intro line and an ordered roster of seeded units.
#[derive(Debug, Clone, Deserialize)]
pub struct EnemyDefinition {
    pub name: String,
    #[serde(default)]
    pub intro: Option<String>,
    pub roster: Vec<EnemyRosterEntry>,
}

/// One unit of an enemy roster. The key is namespaced (`e_{key}`) when the
/// battle session builds combatants, so enemy ids never collide with the
/// player's.
#[derive(Debug, Clone, Deserialize)]
pub struct EnemyRosterEntry {
    pub key: String,
    pub pizza: PizzaId,
    pub seed: CombatantSeed,
}

/// Read-only catalog of enemy definitions.
#[derive(Debug, Clone)]
pub struct EnemyCatalog {
    enemies: HashMap<String, EnemyDefinition>,
}

impl EnemyCatalog {
    /// Loads the catalog from the embedded RON data file.
    pub fn load() -> anyhow::Result<Self> {
        let enemies = ron::from_str(include_str!("../../data/enemies.ron"))
            .context("failed to parse enemies.ron")?;
        Ok(Self { enemies })
    }

    /// Gets an enemy definition by id.
    ///
    /// # Panics
    ///
    /// Panics if the id is not in the catalog.
    pub fn get(&self, id: &str) -> &EnemyDefinition {
        self.enemies
            .get(id)
            .unwrap_or_else(|| panic!("enemy definition not found for {id}"))
    }

    pub fn try_get(&self, id: &str) -> Option<&EnemyDefinition> {
        self.enemies.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.enemies.keys()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_all_enemy_definitions() {
        let catalog = EnemyCatalog::load().expect("enemies.ron should parse");
        assert_eq!(catalog.len(), 2);

        let isabella = catalog.get("chef_isabella");
        assert_eq!(isabella.name, "Chef Isabella");
        assert!(isabella.intro.is_some());
        assert_eq!(isabella.roster.len(), 1);
        assert_eq!(isabella.roster[0].seed.max_hp, 10);
    }

    #[test]
    fn beth_fields_an_already_damaged_unit() {
        let catalog = EnemyCatalog::load().unwrap();
        let beth = catalog.get("beth");
        assert!(beth.intro.is_none());
        assert_eq!(beth.roster[0].seed.hp, Some(1));
        assert_eq!(beth.roster[0].seed.max_hp, 50);
    }

    #[test]
    fn roster_pizzas_resolve_in_the_unit_catalog() {
        let enemies = EnemyCatalog::load().unwrap();
        let pizzas = crate::PizzaCatalog::load().unwrap();
        for id in enemies.ids() {
            for entry in &enemies.get(id).roster {
                assert!(
                    pizzas.try_get(&entry.pizza).is_some(),
                    "enemy {id} refers to unknown pizza {}",
                    entry.pizza
                );
            }
        }
    }
}

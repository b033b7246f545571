//! Unit template loader.

use std::collections::HashMap;

use anyhow::Context;
use battle_core::{CombatantTemplate, PizzaId};

/// Read-only catalog of unit templates.
#[derive(Debug, Clone)]
pub struct PizzaCatalog {
    pizzas: HashMap<PizzaId, CombatantTemplate>,
}

impl PizzaCatalog {
    /// Loads the catalog from the embedded RON data file.
    pub fn load() -> anyhow::Result<Self> {
        let pizzas = ron::from_str(include_str!("../../data/pizzas.ron"))
            .context("failed to parse pizzas.ron")?;
        Ok(Self { pizzas })
    }

    /// Gets a unit template by pizza id.
    ///
    /// # Panics
    ///
    /// Panics if the id is not in the catalog; lineups and rosters only
    /// refer to catalog ids.
    pub fn get(&self, id: &PizzaId) -> &CombatantTemplate {
        self.pizzas
            .get(id)
            .unwrap_or_else(|| panic!("unit template not found for {id}"))
    }

    pub fn try_get(&self, id: &PizzaId) -> Option<&CombatantTemplate> {
        self.pizzas.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &PizzaId> {
        self.pizzas.keys()
    }

    pub fn len(&self) -> usize {
        self.pizzas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pizzas.is_empty()
    }
}

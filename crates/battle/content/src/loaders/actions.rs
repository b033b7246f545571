//! Action template loader.

use std::collections::HashMap;

use anyhow::Context;
use battle_core::{ActionId, ActionTemplate};

/// Read-only catalog of action templates.
#[derive(Debug, Clone)]
pub struct ActionCatalog {
    actions: HashMap<ActionId, ActionTemplate>,
}

impl ActionCatalog {
    /// Loads the catalog from the embedded RON data file.
    pub fn load() -> anyhow::Result<Self> {
        let actions = ron::from_str(include_str!("../../data/actions.ron"))
            .context("failed to parse actions.ron")?;
        Ok(Self { actions })
    }

    /// Gets an action template by id.
    ///
    /// # Panics
    ///
    /// Panics if the id is not in the catalog. Battle data only ever refers
    /// to catalog ids, so a miss is a content bug.
    pub fn get(&self, id: &ActionId) -> &ActionTemplate {
        self.actions
            .get(id)
            .unwrap_or_else(|| panic!("action template not found for {id}"))
    }

    pub fn try_get(&self, id: &ActionId) -> Option<&ActionTemplate> {
        self.actions.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ActionId> {
        self.actions.keys()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

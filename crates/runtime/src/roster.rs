//! The player's persistent party, carried between battles.
//!
//! A battle never mutates the roster directly: the session builds combatants
//! from it at the start and writes results back only after a player win.

use std::collections::BTreeMap;

use battle_core::{ActionId, Combatant, CombatantId, CombatantSeed, ItemInstanceId, PizzaId};

/// One owned pizza: which template it instantiates and its persistent stats.
#[derive(Clone, Debug, PartialEq)]
pub struct PizzaInstance {
    pub pizza: PizzaId,
    pub seed: CombatantSeed,
}

/// One consumable in the player's bag, individually identified so a battle
/// can consume a specific instance.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedItem {
    pub action: ActionId,
    pub instance_id: ItemInstanceId,
}

/// The player's party state outside battle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerRoster {
    /// Battle order; the first entry opens as the active combatant.
    pub lineup: Vec<CombatantId>,
    pub pizzas: BTreeMap<CombatantId, PizzaInstance>,
    pub items: Vec<OwnedItem>,
}

impl PlayerRoster {
    /// The starting party: one nearly-leveled pizza and a few restoratives.
    pub fn starter() -> Self {
        let mut pizzas = BTreeMap::new();
        pizzas.insert(
            CombatantId::from("p1"),
            PizzaInstance {
                pizza: "s001".into(),
                seed: CombatantSeed {
                    hp: Some(50),
                    max_hp: 50,
                    xp: 90,
                    ..CombatantSeed::full(50)
                },
            },
        );
        Self {
            lineup: vec!["p1".into()],
            pizzas,
            items: ["item1", "item2", "item3"]
                .into_iter()
                .map(|instance| OwnedItem {
                    action: "item_recover_hp".into(),
                    instance_id: instance.into(),
                })
                .collect(),
        }
    }

    /// Absorbs a combatant's end-of-battle stats into the persistent seed.
    /// Statuses do not persist outside battle.
    pub fn record_result(&mut self, combatant: &Combatant) {
        if let Some(instance) = self.pizzas.get_mut(&combatant.id) {
            instance.seed.hp = Some(combatant.hp);
            instance.seed.xp = combatant.xp;
            instance.seed.max_xp = combatant.max_xp;
            instance.seed.level = combatant.level;
        }
    }
}

//! RON catalog loaders.

mod actions;
mod enemies;
mod pizzas;

pub use actions::ActionCatalog;
pub use enemies::{EnemyCatalog, EnemyDefinition, EnemyRosterEntry};
pub use pizzas::PizzaCatalog;

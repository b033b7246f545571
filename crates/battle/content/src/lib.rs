//! Static battle content and its loaders.
//!
//! This crate embeds the game's data files (RON) and exposes read-only
//! catalogs over them:
//! - action templates keyed by action id
//! - unit templates keyed by pizza id
//! - enemy roster definitions keyed by enemy id
//!
//! Catalogs are loaded once at startup and never mutated by the battle
//! engine. A missing id on a `get` accessor is a content bug and panics;
//! use `try_get` where absence is a legal outcome.
pub mod loaders;

pub use loaders::{ActionCatalog, EnemyCatalog, EnemyDefinition, EnemyRosterEntry, PizzaCatalog};

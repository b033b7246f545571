//! Deterministic battle rules and data types shared across clients.
//!
//! `battle-core` defines the canonical battle model (combatants, statuses,
//! actions, events, battle state) and exposes pure APIs that can be reused by
//! the async runtime and offline tools. All combatant mutation flows through
//! [`Combatant`]'s typed accessors, driven by the runtime's event interpreter.
pub mod action;
pub mod combatant;
pub mod config;
pub mod error;
pub mod event;
pub mod rng;
pub mod state;
pub mod status;
pub mod types;

pub use action::{ActionTemplate, Submission, TargetType};
pub use combatant::{Combatant, CombatantSeed, CombatantTemplate, StatusDecay, build_combatant};
pub use config::BattleConfig;
pub use error::BattleError;
pub use event::{AnimationKind, BattleEvent, EventContext, EventSpec};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use state::{ActiveCombatants, BattleItem, BattleState};
pub use status::{Status, StatusChange, StatusKind};
pub use types::{ActionId, CombatantId, ItemInstanceId, PizzaId, PizzaType, Team};

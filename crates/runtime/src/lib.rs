//! Async battle runtime: drives turn-based battles over the pure rules in
//! `battle-core` and the catalogs in `battle-content`.
//!
//! The host supplies two seams and gets a complete battle loop back:
//!
//! - [`BattlePresenter`] renders events (messages, animations, HUD updates)
//!   and controls all pacing by deciding when each await resolves.
//! - [`SubmissionProvider`] answers menus, one implementation per side
//!   (player UI, AI policy, or a scripted fixture).
//!
//! A typical encounter:
//!
//! ```no_run
//! use battle_runtime::{BattleSession, EnemyCatalog, PlayerRoster};
//!
//! # async fn demo() -> battle_runtime::Result<()> {
//! let enemies = EnemyCatalog::load().map_err(battle_runtime::RuntimeError::Content)?;
//! let mut roster = PlayerRoster::starter();
//! let mut session = BattleSession::builder()
//!     .enemy(enemies.get("chef_isabella").clone())
//!     .seed(7)
//!     .build()?;
//! let winner = session.run(&mut roster).await?;
//! println!("{winner} won");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod interpreter;
pub mod roster;
pub mod session;
pub mod turn_cycle;

pub use api::{
    BattleError, BattlePresenter, ItemStack, QueuedProvider, RandomProvider, ReplacementMenu,
    Result, RuntimeError, ScriptedDecision, SilentPresenter, SubmissionMenu, SubmissionProvider,
};
pub use interpreter::{BattleContext, EventInterpreter, EventOutcome};
pub use roster::{OwnedItem, PizzaInstance, PlayerRoster};
pub use session::{BattleSession, BattleSessionBuilder};
pub use turn_cycle::TurnCycle;

pub use battle_content::{ActionCatalog, EnemyCatalog, EnemyDefinition, PizzaCatalog};
pub use battle_core::{
    BattleConfig, BattleEvent, BattleState, Combatant, PcgRng, RngOracle, Submission, Team,
};

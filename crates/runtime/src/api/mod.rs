//! Public surface of the battle runtime: traits the host implements and the
//! error types everything returns.

pub mod errors;
pub mod presenter;
pub mod providers;

pub use errors::{BattleError, Result, RuntimeError};
pub use presenter::{BattlePresenter, SilentPresenter};
pub use providers::{
    ItemStack, QueuedProvider, RandomProvider, ReplacementMenu, ScriptedDecision, SubmissionMenu,
    SubmissionProvider,
};

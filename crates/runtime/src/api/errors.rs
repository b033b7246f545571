//! Unified error types surfaced by the battle runtime.
//!
//! Wraps failures from the rules layer, content loading, and submission
//! providers so callers can bubble them up with consistent context.
use thiserror::Error;

pub use battle_core::BattleError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error("failed to load content catalogs")]
    Content(#[source] anyhow::Error),

    #[error("event carries no {0} but its handler needs one")]
    IncompleteEventContext(&'static str),

    #[error("battle session builder missing required {0}")]
    IncompleteBuilder(&'static str),

    #[error("scripted provider ran out of queued decisions")]
    ScriptExhausted,

    #[error("scripted decision does not fit the menu it was asked for")]
    ScriptMismatch,
}

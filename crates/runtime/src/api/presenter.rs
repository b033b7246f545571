//! Asynchronous abstraction over the rendering layer.
//!
//! The battle engine never draws anything; it hands each visible effect to a
//! [`BattlePresenter`] and suspends until the presenter signals completion.
//! That suspension is the engine's entire pacing model: exactly one event is
//! in flight per battle, and the next one starts only when the presenter
//! resolves the current one.
use std::time::Duration;

use async_trait::async_trait;
use battle_core::{AnimationKind, BattleState, Team};

/// Rendering collaborator for one battle.
///
/// There is deliberately no timeout anywhere in this contract: a presenter
/// that never resolves stalls the battle indefinitely. The engine treats
/// that as the rendering layer's problem, not a condition to recover from.
#[async_trait]
pub trait BattlePresenter: Send + Sync {
    /// Displays a message and resolves once the player dismisses it.
    /// Player-paced; the wait is unbounded.
    async fn show_message(&self, text: &str);

    /// Plays a named visual effect and resolves after its fixed duration
    /// (see [`AnimationKind::duration_ms`]). The caster's team only affects
    /// the visual orientation, never the timing.
    async fn play_animation(&self, animation: AnimationKind, caster_team: Team, color: Option<&str>);

    /// Refreshes HUD elements from the current battle state.
    async fn update_displays(&self, state: &BattleState);

    /// Holds for a fixed animation beat (settle delays, replace phases,
    /// xp ticks). Test presenters may return immediately.
    async fn pause(&self, duration: Duration);
}

/// Headless presenter: renders nothing but honors the pacing contract with
/// real sleeps. Useful for simulations and soak tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPresenter;

#[async_trait]
impl BattlePresenter for SilentPresenter {
    async fn show_message(&self, text: &str) {
        tracing::debug!(%text, "battle message");
    }

    async fn play_animation(
        &self,
        animation: AnimationKind,
        caster_team: Team,
        _color: Option<&str>,
    ) {
        tracing::debug!(?animation, %caster_team, "battle animation");
        tokio::time::sleep(Duration::from_millis(animation.duration_ms())).await;
    }

    async fn update_displays(&self, _state: &BattleState) {}

    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

//! Sequential battle event interpreter.
//!
//! Events execute strictly one at a time: each handler awaits every
//! presenter call before returning, and the turn cycle does not build the
//! next event until the previous one resolves. State mutation therefore
//! never races with rendering.

use std::time::Duration;

use battle_core::{
    BattleConfig, BattleEvent, BattleState, CombatantId, EventContext, Submission, Team,
};
use battle_content::ActionCatalog;

use crate::api::{
    BattlePresenter, ReplacementMenu, Result, RuntimeError, SubmissionMenu, SubmissionProvider,
};

/// Shared collaborators for one battle: rendering, decision sources,
/// content, and tuning. Borrowed by the interpreter and the turn cycle.
pub struct BattleContext<'a> {
    pub presenter: &'a dyn BattlePresenter,
    pub player_provider: &'a dyn SubmissionProvider,
    pub enemy_provider: &'a dyn SubmissionProvider,
    pub actions: &'a ActionCatalog,
    pub config: &'a BattleConfig,
}

impl<'a> BattleContext<'a> {
    fn provider_for(&self, player_controlled: bool) -> &'a dyn SubmissionProvider {
        if player_controlled {
            self.player_provider
        } else {
            self.enemy_provider
        }
    }
}

/// What an event produced besides its state mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum EventOutcome {
    /// The event ran to completion with nothing to report.
    Completed,
    /// A submission menu resolved to a decision.
    Submission(Submission),
    /// A replacement menu resolved to a teammate id.
    Replacement(CombatantId),
}

/// Executes [`BattleEvent`]s against a [`BattleState`].
pub struct EventInterpreter<'a> {
    ctx: &'a BattleContext<'a>,
}

impl<'a> EventInterpreter<'a> {
    pub fn new(ctx: &'a BattleContext<'a>) -> Self {
        Self { ctx }
    }

    /// Runs one event to completion, suspending on the presenter (and, for
    /// menu events, on the relevant provider) as it goes.
    pub async fn run(
        &self,
        state: &mut BattleState,
        event: &BattleEvent,
    ) -> Result<EventOutcome> {
        tracing::trace!(?event, "running battle event");
        match event {
            BattleEvent::Message { text, ctx } => {
                let text = interpolate(text, state, ctx, self.ctx.actions)?;
                self.ctx.presenter.show_message(&text).await;
                Ok(EventOutcome::Completed)
            }

            BattleEvent::Animation {
                animation,
                color,
                ctx,
            } => {
                let caster = ctx
                    .caster
                    .as_ref()
                    .ok_or(RuntimeError::IncompleteEventContext("caster"))?;
                let team = state.combatant(caster)?.team;
                self.ctx
                    .presenter
                    .play_animation(*animation, team, color.as_deref())
                    .await;
                Ok(EventOutcome::Completed)
            }

            BattleEvent::StateChange {
                damage,
                recover,
                status,
                on_caster,
                ctx,
            } => {
                // Damage always lands on the target, regardless of on_caster.
                if let Some(amount) = damage {
                    let target = ctx
                        .target
                        .as_ref()
                        .ok_or(RuntimeError::IncompleteEventContext("target"))?;
                    state.combatant_mut(target)?.take_damage(*amount);
                }

                if recover.is_some() || status.is_some() {
                    let who = if *on_caster {
                        ctx.caster
                            .as_ref()
                            .ok_or(RuntimeError::IncompleteEventContext("caster"))?
                    } else {
                        ctx.target
                            .as_ref()
                            .ok_or(RuntimeError::IncompleteEventContext("target"))?
                    };
                    let recipient = state.combatant_mut(who)?;
                    if let Some(amount) = recover {
                        recipient.recover(*amount);
                    }
                    if let Some(change) = status {
                        recipient.apply_status_change(*change);
                    }
                }

                self.ctx.presenter.update_displays(state).await;
                self.ctx
                    .presenter
                    .pause(Duration::from_millis(self.ctx.config.settle_delay_ms))
                    .await;
                Ok(EventOutcome::Completed)
            }

            BattleEvent::SubmissionMenu { caster, opponent } => {
                let submission = self.resolve_submission(state, caster, opponent).await?;
                Ok(EventOutcome::Submission(submission))
            }

            BattleEvent::ReplacementMenu { team } => {
                let replacement = self.resolve_replacement(state, *team).await?;
                Ok(EventOutcome::Replacement(replacement))
            }

            BattleEvent::Replace { replacement } => {
                let beat = Duration::from_millis(self.ctx.config.replace_beat_ms);
                let team = state.combatant(replacement)?.team;

                // Phase one: the outgoing unit leaves, the slot goes empty.
                state.active.set(team, None);
                self.ctx.presenter.update_displays(state).await;
                self.ctx.presenter.pause(beat).await;

                // Phase two: the replacement steps in.
                state.active.set(team, Some(replacement.clone()));
                self.ctx.presenter.update_displays(state).await;
                self.ctx.presenter.pause(beat).await;
                Ok(EventOutcome::Completed)
            }

            BattleEvent::GiveXp { amount, combatant } => {
                let tick = Duration::from_millis(self.ctx.config.xp_tick_ms);
                for _ in 0..*amount {
                    if state.combatant_mut(combatant)?.gain_xp_point() {
                        tracing::debug!(%combatant, "combatant leveled up");
                    }
                    self.ctx.presenter.update_displays(state).await;
                    self.ctx.presenter.pause(tick).await;
                }
                Ok(EventOutcome::Completed)
            }
        }
    }

    /// Builds the submission menu for a caster and suspends on its
    /// controller until a decision comes back.
    async fn resolve_submission(
        &self,
        state: &BattleState,
        caster: &CombatantId,
        opponent: &CombatantId,
    ) -> Result<Submission> {
        let menu = SubmissionMenu::build(state, self.ctx.actions, caster, opponent)?;
        let provider = self.ctx.provider_for(menu.caster.player_controlled);
        provider.submission(menu).await
    }

    /// Builds the replacement menu for a team slot and suspends on that
    /// team's controller.
    async fn resolve_replacement(
        &self,
        state: &BattleState,
        team: Team,
    ) -> Result<CombatantId> {
        let menu = ReplacementMenu::build(state, team)?;
        let provider = self.ctx.provider_for(team == Team::Player);
        provider.replacement(menu).await
    }
}

/// Expands `{CASTER}`, `{TARGET}` and `{ACTION}` placeholders against the
/// event's context. A placeholder whose context entry is missing is a
/// runtime bug, surfaced as an error rather than shown raw to the player.
fn interpolate(
    text: &str,
    state: &BattleState,
    ctx: &EventContext,
    actions: &ActionCatalog,
) -> Result<String> {
    let mut out = text.to_owned();
    if out.contains("{CASTER}") {
        let id = ctx
            .caster
            .as_ref()
            .ok_or(RuntimeError::IncompleteEventContext("caster"))?;
        out = out.replace("{CASTER}", &state.combatant(id)?.name);
    }
    if out.contains("{TARGET}") {
        let id = ctx
            .target
            .as_ref()
            .ok_or(RuntimeError::IncompleteEventContext("target"))?;
        out = out.replace("{TARGET}", &state.combatant(id)?.name);
    }
    if out.contains("{ACTION}") {
        let id = ctx
            .action
            .as_ref()
            .ok_or(RuntimeError::IncompleteEventContext("action"))?;
        out = out.replace("{ACTION}", &actions.get(id).name);
    }
    Ok(out)
}

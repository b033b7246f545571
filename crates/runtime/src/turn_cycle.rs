//! The alternating turn state machine.
//!
//! Drives a battle from intro line to winner by building events and feeding
//! them to the interpreter one at a time. Each turn follows a fixed order:
//! submission, optional voluntary swap, item consumption, flop roll, the
//! action's event sequence, death handling, win check, forced replacement,
//! status post-events, status countdown, then the other team goes.

use battle_core::{
    BattleEvent, BattleState, CombatantId, EventContext, EventSpec, RngOracle, StatusDecay,
    Submission, Team, compute_seed,
};

use crate::api::Result;
use crate::interpreter::{BattleContext, EventInterpreter, EventOutcome};

// Roll slots within one turn, for seed derivation.
const ROLL_FLOP: u32 = 0;

/// Outcome of a single turn.
enum TurnOutcome {
    Continue,
    Winner(Team),
}

/// Alternating-team turn driver for one battle.
pub struct TurnCycle<'a> {
    ctx: &'a BattleContext<'a>,
    interpreter: EventInterpreter<'a>,
    rng: &'a dyn RngOracle,
    battle_seed: u64,
    /// Turn counter, also the rng nonce. Advances even on turns where no
    /// roll happens so replays stay aligned.
    nonce: u64,
    current_team: Team,
}

impl<'a> TurnCycle<'a> {
    pub fn new(ctx: &'a BattleContext<'a>, rng: &'a dyn RngOracle, battle_seed: u64) -> Self {
        Self {
            ctx,
            interpreter: EventInterpreter::new(ctx),
            rng,
            battle_seed,
            nonce: 0,
            current_team: Team::Player,
        }
    }

    /// Plays the intro line, then alternates turns until one team wins.
    pub async fn run(&mut self, state: &mut BattleState, intro: &str) -> Result<Team> {
        self.message(state, intro).await?;
        loop {
            match self.take_turn(state).await? {
                TurnOutcome::Winner(team) => return Ok(team),
                TurnOutcome::Continue => {}
            }
        }
    }

    async fn take_turn(&mut self, state: &mut BattleState) -> Result<TurnOutcome> {
        self.nonce += 1;
        let caster_id = state.active_id(self.current_team)?.clone();
        let opponent_id = state.active_id(self.current_team.opponent())?.clone();
        tracing::debug!(team = %self.current_team, caster = %caster_id, "turn start");

        let submission = match self
            .interpreter
            .run(
                state,
                &BattleEvent::SubmissionMenu {
                    caster: caster_id.clone(),
                    opponent: opponent_id.clone(),
                },
            )
            .await?
        {
            EventOutcome::Submission(submission) => submission,
            outcome => unreachable!("submission menu resolved to {outcome:?}"),
        };

        let (action_id, target_id) = match submission {
            // A voluntary swap replaces the whole turn.
            Submission::Replacement { replacement } => {
                let name = state.combatant(&replacement)?.name.clone();
                self.interpreter
                    .run(state, &BattleEvent::Replace { replacement })
                    .await?;
                self.message(state, &format!("Go get 'em, {name}!")).await?;
                self.current_team = self.current_team.opponent();
                return Ok(TurnOutcome::Continue);
            }
            Submission::Action {
                action,
                target,
                instance_id,
            } => {
                // Items are consumed up front, before any of the turn's
                // events resolve, so an instance can never be spent twice.
                if let Some(instance_id) = &instance_id {
                    state.take_item(instance_id)?;
                }
                (action, target)
            }
        };

        // A status may hijack the turn: clumsy rolls the flop die and, on a
        // flop, substitutes its own event sequence for the action's.
        let caster_status = state.combatant(&caster_id)?.status;
        let flopped = match caster_status {
            Some(status) if status.kind.rolls_flop() => self.rng.chance(
                compute_seed(self.battle_seed, self.nonce, ROLL_FLOP),
                self.ctx.config.flop_numerator,
                self.ctx.config.flop_denominator,
            ),
            _ => false,
        };
        let events: Vec<EventSpec> = caster_status
            .and_then(|status| status.kind.turn_override(flopped))
            .unwrap_or_else(|| self.ctx.actions.get(&action_id).success.clone());

        let turn_ctx = EventContext::new(caster_id.clone(), target_id.clone(), action_id);
        for spec in &events {
            self.interpreter
                .run(state, &BattleEvent::from_spec(spec, turn_ctx.clone()))
                .await?;
        }

        let (target_dead, target_team) = {
            let target = state.combatant(&target_id)?;
            (!target.is_alive(), target.team)
        };
        if target_dead {
            self.handle_death(state, &target_id).await?;
        }

        if let Some(winner) = state.winning_team() {
            self.message(state, "Winner!").await?;
            return Ok(TurnOutcome::Winner(winner));
        }

        // Dead target but no winner yet: the emptied slot must be refilled
        // before the battle continues.
        if target_dead {
            let replacement = match self
                .interpreter
                .run(state, &BattleEvent::ReplacementMenu { team: target_team })
                .await?
            {
                EventOutcome::Replacement(replacement) => replacement,
                outcome => unreachable!("replacement menu resolved to {outcome:?}"),
            };
            let name = state.combatant(&replacement)?.name.clone();
            self.interpreter
                .run(state, &BattleEvent::Replace { replacement })
                .await?;
            self.message(state, &format!("{name} appears!")).await?;
        }

        // Post events run even on a flopped turn (saucy heals regardless).
        if let Some(status) = state.combatant(&caster_id)?.status {
            for spec in status.kind.post_turn_events() {
                self.interpreter
                    .run(state, &BattleEvent::from_spec(&spec, turn_ctx.clone()))
                    .await?;
            }
        }

        if let StatusDecay::Expired(kind) = state.combatant_mut(&caster_id)?.decrement_status() {
            self.message(state, kind.expired_text()).await?;
        }

        self.current_team = self.current_team.opponent();
        Ok(TurnOutcome::Continue)
    }

    /// Announces the defeat and, for a fallen enemy, awards animated xp to
    /// the player's active combatant.
    async fn handle_death(&mut self, state: &mut BattleState, target_id: &CombatantId) -> Result<()> {
        let (name, team, xp) = {
            let target = state.combatant(target_id)?;
            (target.name.clone(), target.team, target.gives_xp())
        };
        self.message(state, &format!("{name} is ruined!")).await?;

        if team == Team::Enemy {
            let recipient = state.active_id(Team::Player)?.clone();
            self.message(state, &format!("Gained {xp} XP!")).await?;
            self.interpreter
                .run(
                    state,
                    &BattleEvent::GiveXp {
                        amount: xp,
                        combatant: recipient,
                    },
                )
                .await?;
        }
        Ok(())
    }

    async fn message(&self, state: &mut BattleState, text: &str) -> Result<()> {
        self.interpreter
            .run(state, &BattleEvent::announcement(text))
            .await?;
        Ok(())
    }
}

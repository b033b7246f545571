//! Battle events: the atomic, awaitable steps of a turn.
//!
//! Two layers:
//!
//! - [`EventSpec`] is the declarative form stored in action templates and
//!   status hooks. It has no idea who is fighting.
//! - [`BattleEvent`] is a spec bound to its turn context (caster, target,
//!   action), plus the purely runtime-born events (menus, replace, xp).
//!
//! The runtime's interpreter executes [`BattleEvent`]s one at a time; the
//! closed enum makes the dispatch exhaustive at compile time, so an
//! unrecognized event kind cannot exist past the type checker.

use crate::status::StatusChange;
use crate::types::{ActionId, CombatantId, Team};

/// Declarative effect entry in an action's success sequence.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventSpec {
    /// Show an interpolated message (`{CASTER}`, `{TARGET}`, `{ACTION}`)
    /// and wait for the player to dismiss it.
    Message { text: String },

    /// Play a named visual effect oriented by the caster's team.
    Animation {
        animation: AnimationKind,
        #[cfg_attr(feature = "serde", serde(default))]
        color: Option<String>,
    },

    /// Mutate combatant stats, then hold for the settle beat.
    StateChange {
        #[cfg_attr(feature = "serde", serde(default))]
        damage: Option<u32>,
        #[cfg_attr(feature = "serde", serde(default))]
        recover: Option<u32>,
        #[cfg_attr(feature = "serde", serde(default))]
        status: Option<StatusChange>,
        /// Recovery and status apply to the caster instead of the target.
        /// Damage always lands on the target.
        #[cfg_attr(feature = "serde", serde(default))]
        on_caster: bool,
    },
}

/// The visual effects the presenter knows how to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationKind {
    Spin,
    Glob,
}

impl AnimationKind {
    /// Fixed duration of the effect, independent of the caster's team.
    pub const fn duration_ms(self) -> u64 {
        match self {
            AnimationKind::Spin => 100,
            AnimationKind::Glob => 820,
        }
    }
}

/// Who is involved in an event, by id. Resolved against [`crate::BattleState`]
/// at interpretation time so events stay plain data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventContext {
    pub caster: Option<CombatantId>,
    pub target: Option<CombatantId>,
    pub action: Option<ActionId>,
}

impl EventContext {
    pub fn new(caster: CombatantId, target: CombatantId, action: ActionId) -> Self {
        Self {
            caster: Some(caster),
            target: Some(target),
            action: Some(action),
        }
    }
}

/// One atomic step of a turn, ready for the interpreter.
///
/// Exactly one of these is in flight at any moment; the next is not built
/// until the previous one's suspension resolves.
#[derive(Clone, Debug, PartialEq)]
pub enum BattleEvent {
    Message {
        text: String,
        ctx: EventContext,
    },
    StateChange {
        damage: Option<u32>,
        recover: Option<u32>,
        status: Option<StatusChange>,
        on_caster: bool,
        ctx: EventContext,
    },
    Animation {
        animation: AnimationKind,
        color: Option<String>,
        ctx: EventContext,
    },
    /// Suspend until the caster's controller submits a decision.
    SubmissionMenu {
        caster: CombatantId,
        opponent: CombatantId,
    },
    /// Suspend until a replacement is chosen for the emptied team slot.
    ReplacementMenu { team: Team },
    /// Two-phase active-combatant swap (exit beat, enter beat).
    Replace { replacement: CombatantId },
    /// Animated xp award, one point per tick.
    GiveXp { amount: u32, combatant: CombatantId },
}

impl BattleEvent {
    /// Binds a declarative spec to the current turn's participants.
    pub fn from_spec(spec: &EventSpec, ctx: EventContext) -> Self {
        match spec {
            EventSpec::Message { text } => BattleEvent::Message {
                text: text.clone(),
                ctx,
            },
            EventSpec::Animation { animation, color } => BattleEvent::Animation {
                animation: *animation,
                color: color.clone(),
                ctx,
            },
            EventSpec::StateChange {
                damage,
                recover,
                status,
                on_caster,
            } => BattleEvent::StateChange {
                damage: *damage,
                recover: *recover,
                status: *status,
                on_caster: *on_caster,
                ctx,
            },
        }
    }

    /// Plain message with no participants (intro lines, announcements).
    pub fn announcement(text: impl Into<String>) -> Self {
        BattleEvent::Message {
            text: text.into(),
            ctx: EventContext::default(),
        }
    }
}

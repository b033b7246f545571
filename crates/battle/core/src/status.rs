//! Timed status modifiers and their turn hooks.
//!
//! Each status variant owns its behavior behind three hooks dispatched over
//! the enum: a pre-turn override (replace the chosen action's events), a
//! post-turn sequence (extra events after the action resolves), and an
//! expiry notification. The turn cycle calls the hooks; it never inspects
//! status kinds directly.

use crate::event::EventSpec;

/// A status attached to a combatant, expiring after a fixed number of
/// that combatant's own turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status {
    pub kind: StatusKind,
    /// Remaining turns. Decremented once at the end of each of the
    /// holder's turns; the status clears when this reaches zero.
    pub expires_in: u32,
}

impl Status {
    pub const fn new(kind: StatusKind, expires_in: u32) -> Self {
        Self { kind, expires_in }
    }
}

/// The closed set of status kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    /// Heals the holder a little after every turn it takes.
    Saucy,
    /// Chance to flop instead of executing the chosen action.
    Clumsy,
}

impl StatusKind {
    pub const fn label(self) -> &'static str {
        match self {
            StatusKind::Saucy => "saucy",
            StatusKind::Clumsy => "clumsy",
        }
    }

    /// Whether this status rolls the flop die before the holder acts.
    pub const fn rolls_flop(self) -> bool {
        matches!(self, StatusKind::Clumsy)
    }

    /// Pre-turn hook: substitute event sequence for the holder's turn.
    ///
    /// `flopped` is the outcome of the flop roll (rolled by the turn cycle
    /// only when [`rolls_flop`](Self::rolls_flop) is true). Returns `None`
    /// when the chosen action should run unchanged.
    pub fn turn_override(self, flopped: bool) -> Option<Vec<EventSpec>> {
        match self {
            StatusKind::Clumsy if flopped => Some(vec![EventSpec::Message {
                text: "{CASTER} flops over!".to_owned(),
            }]),
            _ => None,
        }
    }

    /// Post-turn hook: events appended after the holder's action resolves.
    pub fn post_turn_events(self) -> Vec<EventSpec> {
        match self {
            StatusKind::Saucy => vec![
                EventSpec::Message {
                    text: "Feelin' saucy!".to_owned(),
                },
                EventSpec::StateChange {
                    damage: None,
                    recover: Some(5),
                    status: None,
                    on_caster: true,
                },
            ],
            StatusKind::Clumsy => Vec::new(),
        }
    }

    /// Expiry hook: notification text shown when the status wears off.
    pub const fn expired_text(self) -> &'static str {
        match self {
            StatusKind::Saucy | StatusKind::Clumsy => "Status expired!",
        }
    }
}

/// A status mutation carried by a state-change event.
///
/// Distinguishes "apply this status" from "clear whatever status is there",
/// which a bare `Option<Status>` cannot express.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusChange {
    Apply(Status),
    Clear,
}

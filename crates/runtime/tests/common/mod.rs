//! Shared fixtures for battle flow tests: a trace-recording presenter,
//! deterministic flop oracles, and combatant builders.
#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use battle_core::{
    AnimationKind, BattleState, Combatant, CombatantSeed, CombatantTemplate, PizzaType, RngOracle,
    Team, build_combatant,
};
use battle_runtime::BattlePresenter;

/// Installs a test subscriber once; respects `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One recorded presenter call, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceEntry {
    Message(String),
    Animation(AnimationKind),
    Displays {
        player_active: Option<String>,
        enemy_active: Option<String>,
    },
    Pause(u64),
}

/// Presenter that resolves every call immediately and records the exact
/// order of calls, including active-slot snapshots at each display update.
#[derive(Default)]
pub struct RecordingPresenter {
    trace: Mutex<Vec<TraceEntry>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trace(&self) -> Vec<TraceEntry> {
        self.trace.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.trace()
            .into_iter()
            .filter_map(|entry| match entry {
                TraceEntry::Message(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    fn push(&self, entry: TraceEntry) {
        self.trace.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl BattlePresenter for RecordingPresenter {
    async fn show_message(&self, text: &str) {
        self.push(TraceEntry::Message(text.to_owned()));
    }

    async fn play_animation(
        &self,
        animation: AnimationKind,
        _caster_team: Team,
        _color: Option<&str>,
    ) {
        self.push(TraceEntry::Animation(animation));
    }

    async fn update_displays(&self, state: &BattleState) {
        self.push(TraceEntry::Displays {
            player_active: state.active.get(Team::Player).map(|id| id.to_string()),
            enemy_active: state.active.get(Team::Enemy).map(|id| id.to_string()),
        });
    }

    async fn pause(&self, duration: Duration) {
        self.push(TraceEntry::Pause(duration.as_millis() as u64));
    }
}

/// Oracle under which every flop roll lands.
pub struct AlwaysFlop;

impl RngOracle for AlwaysFlop {
    fn next_u32(&self, _seed: u64) -> u32 {
        0
    }
}

/// Oracle under which a 1-in-n flop roll never lands.
pub struct NeverFlop;

impl RngOracle for NeverFlop {
    fn next_u32(&self, _seed: u64) -> u32 {
        1
    }
}

/// A combatant with the basic attack, built straight from raw stats.
pub fn unit(id: &str, name: &str, team: Team, hp: u32, max_hp: u32) -> Combatant {
    let template = CombatantTemplate {
        name: name.to_owned(),
        description: String::new(),
        pizza_type: PizzaType::Normal,
        actions: vec!["damage1".into()],
    };
    build_combatant(
        id.into(),
        team,
        &template,
        &CombatantSeed {
            hp: Some(hp),
            ..CombatantSeed::full(max_hp)
        },
    )
}

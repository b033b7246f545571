//! One battle from setup to settlement.
//!
//! A [`BattleSession`] owns everything a single encounter needs: the enemy
//! definition, content catalogs, the presenter and providers, rng, and
//! tuning. `run` builds the in-battle state from the player's persistent
//! roster, drives the turn cycle to a winner, and writes results back to the
//! roster only on a player win.

use std::sync::Arc;

use battle_core::{
    BattleConfig, BattleItem, BattleState, PcgRng, RngOracle, Team, build_combatant,
};
use battle_content::{ActionCatalog, EnemyDefinition, PizzaCatalog};

use crate::api::{
    BattlePresenter, RandomProvider, Result, RuntimeError, SilentPresenter, SubmissionProvider,
};
use crate::interpreter::BattleContext;
use crate::roster::PlayerRoster;
use crate::turn_cycle::TurnCycle;

type CompletionHook = Box<dyn FnOnce(Team) + Send>;

/// A fully-configured battle, ready to run once.
pub struct BattleSession {
    enemy: EnemyDefinition,
    actions: ActionCatalog,
    pizzas: PizzaCatalog,
    presenter: Arc<dyn BattlePresenter>,
    player_provider: Arc<dyn SubmissionProvider>,
    enemy_provider: Arc<dyn SubmissionProvider>,
    rng: Box<dyn RngOracle>,
    seed: u64,
    config: BattleConfig,
    on_complete: Option<CompletionHook>,
}

impl BattleSession {
    pub fn builder() -> BattleSessionBuilder {
        BattleSessionBuilder::default()
    }

    /// Runs the battle to completion and returns the winning team.
    ///
    /// On a player win, surviving stats (hp, xp, level) are written back to
    /// the roster; on a loss the roster is left exactly as it was. The
    /// completion hook fires exactly once either way.
    pub async fn run(&mut self, roster: &mut PlayerRoster) -> Result<Team> {
        let mut state = self.build_state(roster)?;

        let intro = match &self.enemy.intro {
            Some(text) => text.clone(),
            None => format!("{} wants to throw down!", self.enemy.name),
        };

        let ctx = BattleContext {
            presenter: &*self.presenter,
            player_provider: &*self.player_provider,
            enemy_provider: &*self.enemy_provider,
            actions: &self.actions,
            config: &self.config,
        };
        let mut cycle = TurnCycle::new(&ctx, &*self.rng, self.seed);
        let winner = cycle.run(&mut state, &intro).await?;
        tracing::info!(%winner, enemy = %self.enemy.name, "battle finished");

        if winner == Team::Player {
            for combatant in state.combatants() {
                if combatant.player_controlled {
                    roster.record_result(combatant);
                }
            }
        }

        if let Some(on_complete) = self.on_complete.take() {
            on_complete(winner);
        }
        Ok(winner)
    }

    /// Instantiates combatants and item stock from the roster and the enemy
    /// definition. Enemy ids are namespaced with an `e_` prefix so they can
    /// never collide with player ids.
    fn build_state(&self, roster: &PlayerRoster) -> Result<BattleState> {
        let mut state = BattleState::new();

        for id in &roster.lineup {
            let instance = roster
                .pizzas
                .get(id)
                .ok_or_else(|| battle_core::BattleError::MissingCombatant(id.clone()))?;
            let template = self.pizzas.get(&instance.pizza);
            state.insert_combatant(build_combatant(
                id.clone(),
                Team::Player,
                template,
                &instance.seed,
            ));
        }

        for entry in &self.enemy.roster {
            let template = self.pizzas.get(&entry.pizza);
            state.insert_combatant(build_combatant(
                format!("e_{}", entry.key).as_str().into(),
                Team::Enemy,
                template,
                &entry.seed,
            ));
        }

        for item in &roster.items {
            state.items.push(BattleItem {
                instance_id: item.instance_id.clone(),
                action: item.action.clone(),
                team: Team::Player,
            });
        }

        Ok(state)
    }
}

/// Builder for [`BattleSession`].
///
/// Only the enemy is required. Defaults: embedded catalogs, a silent
/// presenter, random-decision providers on both sides, the PCG oracle, and
/// stock tuning.
#[derive(Default)]
pub struct BattleSessionBuilder {
    enemy: Option<EnemyDefinition>,
    actions: Option<ActionCatalog>,
    pizzas: Option<PizzaCatalog>,
    presenter: Option<Arc<dyn BattlePresenter>>,
    player_provider: Option<Arc<dyn SubmissionProvider>>,
    enemy_provider: Option<Arc<dyn SubmissionProvider>>,
    rng: Option<Box<dyn RngOracle>>,
    seed: u64,
    config: Option<BattleConfig>,
    on_complete: Option<CompletionHook>,
}

impl BattleSessionBuilder {
    pub fn enemy(mut self, enemy: EnemyDefinition) -> Self {
        self.enemy = Some(enemy);
        self
    }

    pub fn actions(mut self, catalog: ActionCatalog) -> Self {
        self.actions = Some(catalog);
        self
    }

    pub fn pizzas(mut self, catalog: PizzaCatalog) -> Self {
        self.pizzas = Some(catalog);
        self
    }

    pub fn presenter(mut self, presenter: Arc<dyn BattlePresenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn player_provider(mut self, provider: Arc<dyn SubmissionProvider>) -> Self {
        self.player_provider = Some(provider);
        self
    }

    pub fn enemy_provider(mut self, provider: Arc<dyn SubmissionProvider>) -> Self {
        self.enemy_provider = Some(provider);
        self
    }

    pub fn rng(mut self, rng: Box<dyn RngOracle>) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Fixes the battle seed; replays with the same seed, providers, and
    /// roster play out identically.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Hook invoked with the winning team when the battle settles.
    pub fn on_complete(mut self, hook: impl FnOnce(Team) + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    pub fn build(self) -> Result<BattleSession> {
        let enemy = self
            .enemy
            .ok_or(RuntimeError::IncompleteBuilder("enemy"))?;
        let actions = match self.actions {
            Some(catalog) => catalog,
            None => ActionCatalog::load().map_err(RuntimeError::Content)?,
        };
        let pizzas = match self.pizzas {
            Some(catalog) => catalog,
            None => PizzaCatalog::load().map_err(RuntimeError::Content)?,
        };
        Ok(BattleSession {
            enemy,
            actions,
            pizzas,
            presenter: self.presenter.unwrap_or_else(|| Arc::new(SilentPresenter)),
            player_provider: self
                .player_provider
                .unwrap_or_else(|| Arc::new(RandomProvider)),
            enemy_provider: self
                .enemy_provider
                .unwrap_or_else(|| Arc::new(RandomProvider)),
            rng: self.rng.unwrap_or_else(|| Box::new(PcgRng)),
            seed: self.seed,
            config: self.config.unwrap_or_default(),
            on_complete: self.on_complete,
        })
    }
}

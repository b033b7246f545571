//! End-to-end battle flow tests over scripted providers and a recording
//! presenter, asserting exact event ordering and state outcomes.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use battle_core::{BattleConfig, BattleItem, BattleState, Status, StatusKind, Team};
use battle_runtime::{
    ActionCatalog, BattleContext, BattleSession, EnemyCatalog, PlayerRoster, QueuedProvider,
    RuntimeError, ScriptedDecision, TurnCycle,
};

use common::{AlwaysFlop, NeverFlop, RecordingPresenter, TraceEntry, init_tracing, unit};

fn context<'a>(
    presenter: &'a RecordingPresenter,
    player: &'a QueuedProvider,
    enemy: &'a QueuedProvider,
    actions: &'a ActionCatalog,
    config: &'a BattleConfig,
) -> BattleContext<'a> {
    BattleContext {
        presenter,
        player_provider: player,
        enemy_provider: enemy,
        actions,
        config,
    }
}

fn messages_as_strs(messages: &[String]) -> Vec<&str> {
    messages.iter().map(String::as_str).collect()
}

#[tokio::test]
async fn scripted_win_plays_the_exact_sequence_and_settles_the_roster() {
    init_tracing();
    let presenter = Arc::new(RecordingPresenter::new());
    let player = Arc::new(QueuedProvider::new([ScriptedDecision::Action(
        "damage1".into(),
    )]));
    let enemy = Arc::new(QueuedProvider::default());
    let enemies = EnemyCatalog::load().unwrap();

    let completions = Arc::new(AtomicU32::new(0));
    let hook_counter = completions.clone();

    let mut roster = PlayerRoster::starter();
    let mut session = BattleSession::builder()
        .enemy(enemies.get("chef_isabella").clone())
        .presenter(presenter.clone())
        .player_provider(player)
        .enemy_provider(enemy)
        .rng(Box::new(NeverFlop))
        .on_complete(move |winner| {
            assert_eq!(winner, Team::Player);
            hook_counter.fetch_add(1, Ordering::SeqCst);
        })
        .build()
        .unwrap();

    let winner = session.run(&mut roster).await.unwrap();

    assert_eq!(winner, Team::Player);
    assert_eq!(completions.load(Ordering::SeqCst), 1);

    let messages = presenter.messages();
    assert_eq!(
        messages_as_strs(&messages),
        vec![
            "Prepare to face me in battle, puny pizza!",
            "Slice Samurai uses Whomp!!",
            "Slice Samurai is ruined!",
            "Gained 20 XP!",
            "Winner!",
        ]
    );

    // A win writes battle results back into the persistent roster; the
    // starter pizza sat at 90 xp, so 20 more crosses a level.
    let seed = &roster.pizzas[&"p1".into()].seed;
    assert_eq!(seed.hp, Some(50));
    assert_eq!(seed.level, 2);
    assert_eq!(seed.xp, 10);
    assert_eq!(seed.max_xp, 100);
}

#[tokio::test]
async fn item_instance_is_consumed_at_most_once() {
    let actions = ActionCatalog::load().unwrap();
    let config = BattleConfig::default();
    let presenter = RecordingPresenter::new();
    let player = QueuedProvider::new([
        ScriptedDecision::Item("item_recover_hp".into()),
        ScriptedDecision::Action("damage1".into()),
    ]);
    let enemy = QueuedProvider::new([ScriptedDecision::Action("damage1".into())]);
    let ctx = context(&presenter, &player, &enemy, &actions, &config);

    let mut state = BattleState::new();
    state.insert_combatant(unit("p1", "Chewy", Team::Player, 30, 50));
    state.insert_combatant(unit("e_a", "Grease Goblin", Team::Enemy, 10, 10));
    for instance in ["item1", "item2"] {
        state.items.push(BattleItem {
            instance_id: instance.into(),
            action: "item_recover_hp".into(),
            team: Team::Player,
        });
    }

    let rng = NeverFlop;
    let mut cycle = TurnCycle::new(&ctx, &rng, 1);
    let winner = cycle
        .run(&mut state, "A grease goblin blocks the way!")
        .await
        .unwrap();

    assert_eq!(winner, Team::Player);

    // Turn one spent item1 before any event resolved; item2 is untouched.
    let remaining: Vec<_> = state
        .items_for(Team::Player)
        .map(|item| item.instance_id.as_str())
        .collect();
    assert_eq!(remaining, vec!["item2"]);

    // Healed 30 -> 40 on turn one, hit back down to 30 on turn two.
    assert_eq!(state.combatant(&"p1".into()).unwrap().hp, 30);
}

#[tokio::test]
async fn clumsy_flop_replaces_the_action_and_the_status_still_counts_down() {
    let actions = ActionCatalog::load().unwrap();
    let config = BattleConfig::default();
    let presenter = RecordingPresenter::new();
    let player = QueuedProvider::new([ScriptedDecision::Action("damage1".into())]);
    let enemy = QueuedProvider::new([ScriptedDecision::Action("damage1".into())]);
    let ctx = context(&presenter, &player, &enemy, &actions, &config);

    let mut state = BattleState::new();
    let mut chewy = unit("p1", "Chewy", Team::Player, 10, 50);
    chewy.set_status(Status::new(StatusKind::Clumsy, 1));
    state.insert_combatant(chewy);
    state.insert_combatant(unit("e_a", "Grease Goblin", Team::Enemy, 50, 50));

    let rng = AlwaysFlop;
    let mut cycle = TurnCycle::new(&ctx, &rng, 1);
    let winner = cycle.run(&mut state, "Grease Goblin attacks!").await.unwrap();

    assert_eq!(winner, Team::Enemy);

    // The flop substituted the whole action: the enemy took no damage.
    assert_eq!(state.combatant(&"e_a".into()).unwrap().hp, 50);

    let messages = presenter.messages();
    assert_eq!(
        messages_as_strs(&messages),
        vec![
            "Grease Goblin attacks!",
            "Chewy flops over!",
            "Status expired!",
            "Grease Goblin uses Whomp!!",
            "Chewy is ruined!",
            "Winner!",
        ]
    );
}

#[tokio::test]
async fn replace_passes_through_an_empty_active_slot() {
    let actions = ActionCatalog::load().unwrap();
    let config = BattleConfig::default();
    let presenter = RecordingPresenter::new();
    let player = QueuedProvider::new([
        ScriptedDecision::Action("damage1".into()),
        ScriptedDecision::Action("damage1".into()),
    ]);
    let enemy = QueuedProvider::new([
        ScriptedDecision::Replace("e_b".into()),
        ScriptedDecision::Action("damage1".into()),
    ]);
    let ctx = context(&presenter, &player, &enemy, &actions, &config);

    let mut state = BattleState::new();
    state.insert_combatant(unit("p1", "Chewy", Team::Player, 50, 50));
    state.insert_combatant(unit("e_a", "Crusty", Team::Enemy, 10, 10));
    state.insert_combatant(unit("e_b", "Rusty", Team::Enemy, 10, 10));

    let rng = NeverFlop;
    let mut cycle = TurnCycle::new(&ctx, &rng, 1);
    let winner = cycle.run(&mut state, "Two on one!").await.unwrap();
    assert_eq!(winner, Team::Player);

    // The forced replacement runs in two phases with an observable window
    // where the enemy slot is empty.
    let trace = presenter.trace();
    let window = trace.windows(3).any(|entries| {
        matches!(
            entries,
            [
                TraceEntry::Displays {
                    enemy_active: None,
                    ..
                },
                TraceEntry::Pause(400),
                TraceEntry::Displays {
                    enemy_active: Some(id),
                    ..
                },
            ] if id == "e_b"
        )
    });
    assert!(window, "no two-phase replace window in trace: {trace:?}");

    let messages = presenter.messages();
    assert!(messages.contains(&"Rusty appears!".to_owned()));
}

#[tokio::test]
async fn saucy_heal_runs_after_replacement_but_never_after_the_winning_blow() {
    let actions = ActionCatalog::load().unwrap();
    let config = BattleConfig::default();
    let presenter = RecordingPresenter::new();
    let player = QueuedProvider::new([
        ScriptedDecision::Action("damage1".into()),
        ScriptedDecision::Action("damage1".into()),
    ]);
    let enemy = QueuedProvider::new([
        ScriptedDecision::Replace("e_b".into()),
        ScriptedDecision::Action("damage1".into()),
    ]);
    let ctx = context(&presenter, &player, &enemy, &actions, &config);

    let mut state = BattleState::new();
    let mut chewy = unit("p1", "Chewy", Team::Player, 20, 50);
    chewy.set_status(Status::new(StatusKind::Saucy, 3));
    state.insert_combatant(chewy);
    state.insert_combatant(unit("e_a", "Crusty", Team::Enemy, 10, 10));
    state.insert_combatant(unit("e_b", "Rusty", Team::Enemy, 10, 10));

    let rng = NeverFlop;
    let mut cycle = TurnCycle::new(&ctx, &rng, 1);
    let winner = cycle.run(&mut state, "Two on one!").await.unwrap();
    assert_eq!(winner, Team::Player);

    let messages = presenter.messages();
    let saucy_count = messages.iter().filter(|m| *m == "Feelin' saucy!").count();
    assert_eq!(saucy_count, 1, "saucy heal must not run after a win");

    let appears = messages.iter().position(|m| m == "Rusty appears!").unwrap();
    let saucy = messages.iter().position(|m| m == "Feelin' saucy!").unwrap();
    let win = messages.iter().position(|m| m == "Winner!").unwrap();
    assert!(appears < saucy && saucy < win);

    // Turn one: heal 20 -> 25. Turn two: hit down to 15. Turn three ends
    // the battle before the heal fires.
    assert_eq!(state.combatant(&"p1".into()).unwrap().hp, 15);
}

#[tokio::test]
async fn voluntary_swap_spends_the_whole_turn() {
    let actions = ActionCatalog::load().unwrap();
    let config = BattleConfig::default();
    let presenter = RecordingPresenter::new();
    let player = QueuedProvider::new([
        ScriptedDecision::Swap("p2".into()),
        ScriptedDecision::Action("damage1".into()),
    ]);
    let enemy = QueuedProvider::new([ScriptedDecision::Action("damage1".into())]);
    let ctx = context(&presenter, &player, &enemy, &actions, &config);

    let mut state = BattleState::new();
    state.insert_combatant(unit("p1", "Chewy", Team::Player, 50, 50));
    state.insert_combatant(unit("p2", "Saucy Sal", Team::Player, 50, 50));
    state.insert_combatant(unit("e_a", "Crusty", Team::Enemy, 10, 10));

    let rng = NeverFlop;
    let mut cycle = TurnCycle::new(&ctx, &rng, 1);
    let winner = cycle.run(&mut state, "Crusty attacks!").await.unwrap();
    assert_eq!(winner, Team::Player);

    let messages = presenter.messages();
    assert!(messages.contains(&"Go get 'em, Saucy Sal!".to_owned()));

    // The swap gave the enemy a free hit on the incoming unit.
    assert_eq!(state.combatant(&"p2".into()).unwrap().hp, 40);
    assert_eq!(state.combatant(&"p1".into()).unwrap().hp, 50);
    assert_eq!(state.active_id(Team::Player).unwrap().as_str(), "p2");
}

#[tokio::test]
async fn intro_falls_back_when_the_enemy_has_no_custom_line() {
    init_tracing();
    let presenter = Arc::new(RecordingPresenter::new());
    let player = Arc::new(QueuedProvider::new([ScriptedDecision::Action(
        "damage1".into(),
    )]));
    let enemies = EnemyCatalog::load().unwrap();

    let mut roster = PlayerRoster::starter();
    let mut session = BattleSession::builder()
        .enemy(enemies.get("beth").clone())
        .presenter(presenter.clone())
        .player_provider(player)
        .enemy_provider(Arc::new(QueuedProvider::default()))
        .rng(Box::new(NeverFlop))
        .build()
        .unwrap();

    // Beth's unit starts at 1 hp; one hit ends it.
    let winner = session.run(&mut roster).await.unwrap();
    assert_eq!(winner, Team::Player);
    assert_eq!(presenter.messages()[0], "Beth wants to throw down!");
}

#[tokio::test]
async fn exhausted_script_surfaces_as_an_error() {
    let enemies = EnemyCatalog::load().unwrap();
    let mut roster = PlayerRoster::starter();
    let mut session = BattleSession::builder()
        .enemy(enemies.get("beth").clone())
        .player_provider(Arc::new(QueuedProvider::default()))
        .enemy_provider(Arc::new(QueuedProvider::default()))
        .build()
        .unwrap();

    let result = session.run(&mut roster).await;
    assert!(matches!(result, Err(RuntimeError::ScriptExhausted)));
}

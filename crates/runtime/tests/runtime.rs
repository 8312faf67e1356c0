use battle_content::Content;
use battle_core::{
    Battle, BattleError, BattleEvent, BattleMove, Fighter, FighterId, QueuedMove, RoundOutcome,
    ScriptedOracle, Side,
};
use battle_runtime::{
    IdleMoveProvider, Runtime, RuntimeConfig, RuntimeError, ScriptedMoveProvider, Topic,
};

fn duel() -> Battle {
    Battle::new(
        vec![Fighter::builder(FighterId(1), "hero").health(20).strength(5).speed(2).build()],
        vec![Fighter::builder(FighterId(2), "rat").health(12).speed(1).build()],
    )
    .unwrap()
}

fn jab(owner: u32, target: u32) -> QueuedMove {
    QueuedMove::at(BattleMove::attack("Jab", 1), FighterId(owner), FighterId(target))
}

#[tokio::test]
async fn handle_resolves_a_round() {
    let runtime = Runtime::builder()
        .battle(duel())
        .oracle(ScriptedOracle::new([]))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    handle.enqueue_move(jab(1, 2)).await.unwrap();
    let outcome = handle.run_round().await.unwrap();

    assert_eq!(outcome, RoundOutcome::Continuing);
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.fighter(FighterId(2)).unwrap().health.current, 6);
    assert!(handle.active_field_effects().await.unwrap().is_empty());
}

#[tokio::test]
async fn engine_errors_come_back_through_the_handle() {
    let runtime = Runtime::builder().battle(duel()).build().await.unwrap();
    let handle = runtime.handle();

    let err = handle.enqueue_move(jab(9, 2)).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Battle(BattleError::UnknownFighter(FighterId(9)))
    ));

    handle.enqueue_move(jab(1, 2)).await.unwrap();
    let err = handle.enqueue_move(jab(1, 2)).await.unwrap_err();
    assert!(matches!(err, RuntimeError::Battle(BattleError::AlreadyQueued(_))));
}

#[tokio::test]
async fn subscribers_receive_topic_events() {
    let runtime = Runtime::builder()
        .battle(duel())
        .oracle(ScriptedOracle::new([]))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut rounds = handle.subscribe(Topic::Round);
    let mut combat = handle.subscribe(Topic::Combat);
    let mut effects = handle.subscribe(Topic::Effects);

    handle.enqueue_move(jab(1, 2)).await.unwrap();
    handle.run_round().await.unwrap();

    let started = rounds.recv().await.unwrap();
    assert_eq!(started.round, 1);
    assert_eq!(started.event, BattleEvent::RoundStarted { round: 1 });
    assert_eq!(
        rounds.recv().await.unwrap().event,
        BattleEvent::RoundFinished {
            round: 1,
            outcome: RoundOutcome::Continuing
        }
    );

    assert!(matches!(
        combat.recv().await.unwrap().event,
        BattleEvent::MoveUsed { .. }
    ));
    assert_eq!(
        combat.recv().await.unwrap().event,
        BattleEvent::DamageTaken {
            fighter: FighterId(2),
            amount: 6,
            source: Some(FighterId(1)),
        }
    );
    assert!(effects.try_recv().is_err());
}

#[tokio::test]
async fn step_requires_both_providers() {
    let mut runtime = Runtime::builder()
        .battle(duel())
        .home_provider(IdleMoveProvider)
        .build()
        .await
        .unwrap();

    assert!(matches!(
        runtime.step().await,
        Err(RuntimeError::ProviderNotSet { side: Side::Away })
    ));

    runtime.set_away_provider(IdleMoveProvider);
    assert_eq!(runtime.step().await.unwrap(), RoundOutcome::Continuing);
}

#[tokio::test]
async fn rejected_move_does_not_leave_the_queue_stuck() {
    let battle = Battle::new(
        vec![
            Fighter::builder(FighterId(1), "hero").health(20).strength(5).build(),
            Fighter::builder(FighterId(2), "squire").health(20).build(),
        ],
        vec![Fighter::builder(FighterId(3), "rat").health(12).build()],
    )
    .unwrap();
    let mut runtime = Runtime::builder()
        .battle(battle)
        .oracle(ScriptedOracle::new([]))
        .home_provider(ScriptedMoveProvider::new([
            vec![jab(1, 3), jab(2, 1)],
            vec![jab(1, 3)],
        ]))
        .away_provider(IdleMoveProvider)
        .build()
        .await
        .unwrap();

    assert!(matches!(
        runtime.step().await,
        Err(RuntimeError::Battle(BattleError::InvalidTarget { .. }))
    ));
    assert_eq!(runtime.step().await.unwrap(), RoundOutcome::Continuing);

    let state = runtime.handle().query_state().await.unwrap();
    assert_eq!(state.fighter(FighterId(3)).unwrap().health.current, 6);
}

#[tokio::test]
async fn scripted_providers_play_to_victory() {
    let mut runtime = Runtime::builder()
        .battle(duel())
        .oracle(ScriptedOracle::new([]))
        .home_provider(ScriptedMoveProvider::repeat(vec![jab(1, 2)], 5))
        .away_provider(ScriptedMoveProvider::repeat(vec![jab(2, 1)], 5))
        .build()
        .await
        .unwrap();

    let outcome = runtime.run_to_completion().await.unwrap();

    assert_eq!(outcome, RoundOutcome::Victory);
    let state = runtime.handle().query_state().await.unwrap();
    // Two rounds of 6 damage; the rat hits back once for 1.
    assert_eq!(state.fighter(FighterId(1)).unwrap().health.current, 19);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn idle_battles_hit_the_round_limit() {
    let config = RuntimeConfig {
        max_rounds: 3,
        ..RuntimeConfig::default()
    };
    let mut runtime = Runtime::builder()
        .config(config)
        .battle(duel())
        .home_provider(IdleMoveProvider)
        .away_provider(IdleMoveProvider)
        .build()
        .await
        .unwrap();

    assert!(matches!(
        runtime.run_to_completion().await,
        Err(RuntimeError::RoundLimitReached(3))
    ));
    assert_eq!(runtime.handle().query_state().await.unwrap().home.fighters.len(), 1);
}

#[tokio::test]
async fn missing_battle_is_an_error() {
    assert!(matches!(
        Runtime::builder().build().await,
        Err(RuntimeError::MissingBattle)
    ));
}

#[tokio::test]
async fn seeded_runs_are_reproducible() {
    async fn play(seed: u64) -> Vec<u32> {
        let mut content = Content::embedded().unwrap();
        let battle = content.battle(&["Dancer"], &["Shade"]).unwrap();
        let quick = content.moves.require("Quick Jab").unwrap().clone();
        let bite = content.moves.require("Draining Bite").unwrap().clone();

        let mut runtime = Runtime::builder()
            .config(RuntimeConfig::default().with_seed(seed).with_battle(content.config.clone()))
            .battle(battle)
            .home_provider(ScriptedMoveProvider::repeat(
                vec![QueuedMove::at(quick, FighterId(1), FighterId(2))],
                4,
            ))
            .away_provider(ScriptedMoveProvider::repeat(
                vec![QueuedMove::at(bite, FighterId(2), FighterId(1))],
                4,
            ))
            .build()
            .await
            .unwrap();

        let mut healths = Vec::new();
        for _ in 0..4 {
            if runtime.step().await.unwrap().is_over() {
                break;
            }
            let state = runtime.handle().query_state().await.unwrap();
            healths.push(state.fighter(FighterId(1)).unwrap().health.current);
            healths.push(state.fighter(FighterId(2)).unwrap().health.current);
        }
        healths
    }

    assert_eq!(play(7).await, play(7).await);
}

#[tokio::test]
async fn events_serialize_for_front_ends() {
    let runtime = Runtime::builder()
        .battle(duel())
        .oracle(ScriptedOracle::new([]))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut rounds = handle.subscribe(Topic::Round);

    handle.run_round().await.unwrap();

    let event = rounds.recv().await.unwrap();
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["round"], 1);
    assert!(json["event"].get("RoundStarted").is_some());
}

#![allow(dead_code)]

use battle_core::{
    Battle, BattleEvent, BattleMove, Fighter, FighterBuilder, FighterId, MoveKind, QueuedMove,
    RoundOutcome, ScriptedOracle, Status, StatusKind, TargetType,
};

pub fn fighter(id: u32) -> FighterBuilder {
    Fighter::builder(FighterId(id), format!("fighter-{id}")).health(20)
}

pub fn battle(home: Vec<Fighter>, away: Vec<Fighter>) -> Battle {
    Battle::new(home, away).expect("valid teams")
}

/// Runs one round with an oracle that never has to answer.
pub fn round(battle: &mut Battle, moves: Vec<QueuedMove>) -> (RoundOutcome, Vec<BattleEvent>) {
    round_with(battle, moves, &mut ScriptedOracle::new([]))
}

pub fn round_with(
    battle: &mut Battle,
    moves: Vec<QueuedMove>,
    oracle: &mut ScriptedOracle,
) -> (RoundOutcome, Vec<BattleEvent>) {
    for queued in moves {
        battle.enqueue_move(queued).expect("move accepted");
    }
    let mut events = Vec::new();
    let outcome = battle.run_round(oracle, &mut events).expect("round resolves");
    (outcome, events)
}

pub fn health(battle: &Battle, id: u32) -> u32 {
    battle.state().fighter(FighterId(id)).expect("fighter").health.current
}

pub fn mana(battle: &Battle, id: u32) -> u32 {
    battle.state().fighter(FighterId(id)).expect("fighter").mana.current
}

pub fn with_status(mut fighter: Fighter, kind: StatusKind) -> Fighter {
    fighter.statuses.push(Status::permanent(kind));
    fighter
}

pub fn self_status(name: &str, status: StatusKind, duration: u32) -> BattleMove {
    BattleMove::new(
        name,
        TargetType::Caster,
        MoveKind::InflictStatus {
            status,
            duration: Some(duration),
        },
    )
}

pub fn count<F>(events: &[BattleEvent], predicate: F) -> usize
where
    F: Fn(&BattleEvent) -> bool,
{
    events.iter().filter(|e| predicate(e)).count()
}

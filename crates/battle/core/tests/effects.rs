mod common;

use battle_core::{
    Affinity, BattleCondition, BattleEvent, BattleMove, BattleMoveEffect, DanceEffectType,
    EffectScope, Element, FailureReason, FieldEffect, FieldEffectKind, FieldMove, FighterId,
    MagicScope, MoveEffectKind, MoveKind, MoveTarget, Multiplier, QueuedMove, Resource,
    RoundOutcome, Shield, StatKind, StatusKind, TargetType,
};
use common::*;

fn dance(name: &str, tag: DanceEffectType) -> BattleMove {
    BattleMove::new(
        name,
        TargetType::Field,
        MoveKind::Field(FieldMove {
            effects: vec![FieldEffect::new(
                FieldEffectKind::Status(StatusKind::StatMultiplier {
                    stat: StatKind::Speed,
                    multiplier: Multiplier::DOUBLE,
                }),
                EffectScope::OwnTeam,
            )],
            dance: Some(tag),
            duration: None,
            sub_moves: Vec::new(),
        }),
    )
}

fn on_field(mv: BattleMove, owner: u32) -> QueuedMove {
    QueuedMove::new(mv, FighterId(owner), MoveTarget::Field)
}

fn is_combined(event: &BattleEvent) -> bool {
    matches!(event, BattleEvent::FieldEffectsCombined { .. })
}

fn is_cancelled(event: &BattleEvent) -> bool {
    matches!(event, BattleEvent::FieldEffectCancelled { .. })
}

#[test]
fn status_with_duration_two_expires_after_third_round() {
    let focus = StatusKind::CriticalChanceMultiplier {
        multiplier: Multiplier::DOUBLE,
    };
    let mut battle = battle(vec![fighter(1).build()], vec![fighter(2).build()]);

    round(
        &mut battle,
        vec![QueuedMove::at(self_status("Focus", focus, 2), FighterId(1), FighterId(1))],
    );
    let statuses = |b: &battle_core::Battle| b.state().fighter(FighterId(1)).unwrap().statuses.len();
    assert_eq!(statuses(&battle), 1);

    let (_, events) = round(&mut battle, Vec::new());
    assert_eq!(statuses(&battle), 1);
    assert_eq!(count(&events, |e| matches!(e, BattleEvent::StatusExpired { .. })), 0);

    let (_, events) = round(&mut battle, Vec::new());
    assert_eq!(statuses(&battle), 0);
    assert!(events.contains(&BattleEvent::StatusExpired {
        fighter: FighterId(1),
        status: focus,
    }));
}

#[test]
fn restoration_fires_at_round_end() {
    let mut battle = battle(vec![fighter(1).build()], vec![fighter(2).build()]);
    battle.state_mut().fighter_mut(FighterId(1)).unwrap().health.current = 10;

    let regen = StatusKind::Restoration {
        resource: Resource::Health,
        percent: 25,
    };
    let (_, events) = round(
        &mut battle,
        vec![QueuedMove::at(self_status("Regrow", regen, 1), FighterId(1), FighterId(1))],
    );

    assert_eq!(health(&battle, 1), 15);
    assert!(events.contains(&BattleEvent::Healed {
        fighter: FighterId(1),
        resource: Resource::Health,
        amount: 5,
    }));
}

#[test]
fn elemental_chart_and_affinity_shape_spell_damage() {
    let fire = || BattleMove::spell("Fireball", Element::Fire, 4, 0);
    let caster = || fighter(1).spell("Fireball").build();

    let cases = [
        (fighter(2).element(Element::Wind).build(), 12),
        (fighter(2).element(Element::Water).build(), 18),
        (
            fighter(2)
                .element(Element::Water)
                .affinity(Element::Fire, Affinity::Weak)
                .build(),
            12,
        ),
        (fighter(2).affinity(Element::Fire, Affinity::Immune).build(), 20),
        (fighter(2).element(Element::Earth).build(), 16),
    ];

    for (defender, expected) in cases {
        let mut battle = battle(vec![caster()], vec![defender]);
        round(&mut battle, vec![QueuedMove::at(fire(), FighterId(1), FighterId(2))]);
        assert_eq!(health(&battle, 2), expected);
    }
}

#[test]
fn reflected_spell_hits_the_caster() {
    let reflect = StatusKind::Reflect {
        scope: MagicScope::Element(Element::Fire),
        multiplier: Multiplier::DOUBLE,
    };
    let mut battle = battle(
        vec![fighter(1).spell("Fireball").build()],
        vec![with_status(fighter(2).build(), reflect)],
    );

    let (_, events) = round(
        &mut battle,
        vec![QueuedMove::at(
            BattleMove::spell("Fireball", Element::Fire, 3, 0),
            FighterId(1),
            FighterId(2),
        )],
    );

    assert_eq!(health(&battle, 1), 14);
    assert_eq!(health(&battle, 2), 20);
    assert!(events.contains(&BattleEvent::SpellReflected {
        caster: FighterId(1),
        reflector: FighterId(2),
        spell: "Fireball".into(),
    }));
    assert!(events.contains(&BattleEvent::DamageTaken {
        fighter: FighterId(1),
        amount: 6,
        source: Some(FighterId(2)),
    }));
}

#[test]
fn mutual_reflection_cancels_the_spell() {
    let reflect = StatusKind::Reflect {
        scope: MagicScope::All,
        multiplier: Multiplier::DOUBLE,
    };
    let mut battle = battle(
        vec![with_status(fighter(1).spell("Fireball").build(), reflect)],
        vec![with_status(fighter(2).build(), reflect)],
    );

    let (_, events) = round(
        &mut battle,
        vec![QueuedMove::at(
            BattleMove::spell("Fireball", Element::Fire, 3, 0),
            FighterId(1),
            FighterId(2),
        )],
    );

    assert_eq!(health(&battle, 1), 20);
    assert_eq!(health(&battle, 2), 20);
    assert!(events.contains(&BattleEvent::SpellCancelled {
        caster: FighterId(1),
        target: FighterId(2),
        spell: "Fireball".into(),
    }));
    assert!(events.contains(&BattleEvent::MoveFailed {
        owner: FighterId(1),
        move_name: "Fireball".into(),
        reason: FailureReason::SpellCancelled,
    }));
}

#[test]
fn sealed_caster_keeps_mana() {
    let mut battle = battle(
        vec![with_status(
            fighter(1).mana(10).spell("Spark").build(),
            StatusKind::MagicSealed,
        )],
        vec![fighter(2).build()],
    );

    let (_, events) = round(
        &mut battle,
        vec![QueuedMove::at(
            BattleMove::spell("Spark", Element::Lightning, 5, 3),
            FighterId(1),
            FighterId(2),
        )],
    );

    assert_eq!(mana(&battle, 1), 10);
    assert_eq!(health(&battle, 2), 20);
    assert_eq!(count(&events, |e| matches!(e, BattleEvent::ManaLost { .. })), 0);
    assert!(events.contains(&BattleEvent::MoveFailed {
        owner: FighterId(1),
        move_name: "Spark".into(),
        reason: FailureReason::MagicSealed,
    }));
}

#[test]
fn two_dances_combine_once() {
    let mut battle = battle(
        vec![fighter(1).speed(30).build(), fighter(2).speed(10).build()],
        vec![fighter(3).health(30).build()],
    );

    let (_, events) = round(
        &mut battle,
        vec![
            on_field(dance("Fire Dance", DanceEffectType::Fire), 1),
            on_field(dance("Wind Dance", DanceEffectType::Wind), 2),
        ],
    );

    assert_eq!(count(&events, is_combined), 1);
    assert_eq!(health(&battle, 3), 20);
    assert!(battle.active_field_effects().is_empty());
    for id in [1, 2] {
        assert!(battle.state().fighter(FighterId(id)).unwrap().statuses.is_empty());
    }
}

#[test]
fn dead_owner_cancels_combination() {
    let mut battle = battle(
        vec![fighter(1).speed(30).build(), fighter(2).speed(10).build()],
        vec![fighter(3).health(30).speed(20).strength(100).build()],
    );

    let (outcome, events) = round(
        &mut battle,
        vec![
            on_field(dance("Fire Dance", DanceEffectType::Fire), 1),
            QueuedMove::at(BattleMove::attack("Smash", 0), FighterId(3), FighterId(1)),
            on_field(dance("Wind Dance", DanceEffectType::Wind), 2),
        ],
    );

    assert_eq!(outcome, RoundOutcome::Continuing);
    assert_eq!(count(&events, is_combined), 0);
    assert_eq!(count(&events, is_cancelled), 2);
    assert_eq!(health(&battle, 3), 30);
    assert!(battle.active_field_effects().is_empty());
    assert!(battle.state().fighter(FighterId(2)).unwrap().statuses.is_empty());
}

#[test]
fn dance_ends_when_its_owner_dies() {
    let mut battle = battle(
        vec![fighter(1).speed(30).build(), fighter(2).build()],
        vec![fighter(3).speed(20).strength(100).build()],
    );

    let (_, events) = round(
        &mut battle,
        vec![
            on_field(dance("Fire Dance", DanceEffectType::Fire), 1),
            QueuedMove::at(BattleMove::attack("Smash", 0), FighterId(3), FighterId(1)),
        ],
    );

    assert_eq!(count(&events, is_cancelled), 1);
    assert!(battle.active_field_effects().is_empty());
    assert!(battle.state().fighter(FighterId(2)).unwrap().statuses.is_empty());
}

#[test]
fn dance_conditions_gate_attached_effects() {
    let empowered = BattleMove::attack("Reckless Blow", 3).with_effect(BattleMoveEffect::when(
        BattleCondition::dance_active(DanceEffectType::Danger),
        MoveEffectKind::DamageMultiplier(Multiplier::DOUBLE),
    ));

    let mut battle = battle(
        vec![fighter(1).speed(10).build(), fighter(2).speed(5).build()],
        vec![fighter(3).health(50).build()],
    );

    round(
        &mut battle,
        vec![QueuedMove::at(empowered.clone(), FighterId(2), FighterId(3))],
    );
    assert_eq!(health(&battle, 3), 47);

    round(
        &mut battle,
        vec![
            on_field(dance("Danger Dance", DanceEffectType::Danger), 1),
            QueuedMove::at(empowered, FighterId(2), FighterId(3)),
        ],
    );
    assert_eq!(health(&battle, 3), 41);
}

#[test]
fn recast_renews_instead_of_duplicating() {
    let mut battle = battle(vec![fighter(1).build()], vec![fighter(2).build()]);

    round(&mut battle, vec![on_field(dance("Heart Dance", DanceEffectType::Heart), 1)]);
    let (_, events) = round(
        &mut battle,
        vec![on_field(dance("Heart Dance", DanceEffectType::Heart), 1)],
    );

    assert_eq!(battle.active_field_effects().len(), 1);
    assert_eq!(
        count(&events, |e| matches!(e, BattleEvent::FieldEffectRenewed { .. })),
        1
    );
    assert_eq!(battle.state().fighter(FighterId(1)).unwrap().statuses.len(), 1);
}

#[test]
fn shield_buster_needs_more_power_than_the_shield_defense() {
    let buckler = Shield::new("Buckler", 10, 0, 3);
    let buster = |power| {
        BattleMove::new(
            "Sunder",
            TargetType::SingleEnemy,
            MoveKind::ShieldBuster { power },
        )
    };

    let mut battle = battle(
        vec![fighter(1).build()],
        vec![fighter(2).shield(buckler).build()],
    );

    let (_, events) = round(&mut battle, vec![QueuedMove::at(buster(3), FighterId(1), FighterId(2))]);
    assert!(events.contains(&BattleEvent::MoveFailed {
        owner: FighterId(1),
        move_name: "Sunder".into(),
        reason: FailureReason::ShieldTooStrong,
    }));

    let (_, events) = round(&mut battle, vec![QueuedMove::at(buster(4), FighterId(1), FighterId(2))]);
    assert!(events.contains(&BattleEvent::ShieldBusted {
        fighter: FighterId(2),
        shield: "Buckler".into(),
    }));
    assert!(battle.state().fighter(FighterId(2)).unwrap().shield.is_none());
}

#[test]
fn absorbing_a_shade_takes_its_health_and_strength() {
    let absorb = BattleMove::new("Consume", TargetType::SingleAlly, MoveKind::Absorb);
    let mut battle = battle(
        vec![
            fighter(1).health(20).strength(2).build(),
            fighter(2).health(8).strength(3).build(),
        ],
        vec![fighter(3).build()],
    );

    let (_, events) = round(&mut battle, vec![QueuedMove::at(absorb, FighterId(1), FighterId(2))]);

    let absorber = battle.state().fighter(FighterId(1)).unwrap();
    assert_eq!(absorber.health.maximum, 28);
    assert_eq!(absorber.health.current, 28);
    assert_eq!(absorber.stats.strength, 5);
    assert!(!battle.state().is_alive(FighterId(2)));
    assert!(events.contains(&BattleEvent::ShadeAbsorbed {
        absorber: FighterId(1),
        shade: FighterId(2),
    }));
}

#[test]
fn granted_shields_are_independent_copies() {
    let ward = Shield::new("Ward", 6, 0, 0);
    let aegis = BattleMove::new("Aegis", TargetType::OwnTeam, MoveKind::GrantShield(ward.clone()))
        .with_priority(1);
    let cast = |mv: &BattleMove| {
        QueuedMove::new(mv.clone(), FighterId(1), MoveTarget::Team(battle_core::Side::Home))
    };
    let mut battle = battle(
        vec![fighter(1).build(), fighter(2).build()],
        vec![fighter(3).strength(4).build()],
    );
    let shield_health = |battle: &battle_core::Battle, id: u32| {
        battle
            .state()
            .fighter(FighterId(id))
            .unwrap()
            .shield
            .as_ref()
            .map(|s| s.health.current)
    };

    let (_, events) = round(
        &mut battle,
        vec![
            cast(&aegis),
            QueuedMove::at(BattleMove::attack("Claw", 0), FighterId(3), FighterId(1)),
        ],
    );

    assert_eq!(count(&events, |e| matches!(e, BattleEvent::ShieldGranted { .. })), 2);
    assert_eq!(shield_health(&battle, 1), Some(2));
    assert_eq!(shield_health(&battle, 2), Some(6));
    assert_eq!(aegis.kind, MoveKind::GrantShield(ward));

    round(&mut battle, vec![cast(&aegis)]);
    assert_eq!(shield_health(&battle, 1), Some(6));
}


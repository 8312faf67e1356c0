//! Move execution pipeline.
//!
//! ## Flow
//! 1. Shape check (multi-turn moves must already be expanded)
//! 2. Owner alive, targets resolved (nothing alive ⇒ skipped)
//! 3. `MoveUsed`, then the move's `requires` condition
//! 4. Spell legality and mana payment
//! 5. Per-kind resolution, fanning out over the resolved targets:
//!    accuracy, evasion, critical, damage, reflection, shield absorption,
//!    attached effects
//!
//! Expected rejections end the move with a `MoveFailed` event and
//! [`MoveOutcome::Failed`]; only invariant violations return `Err`.

use tracing::trace;

use super::ExecutionContext;
use super::targets::resolve_targets;
use super::validation::{check_requirement, check_shape, pay_spell_cost};
use crate::combat::{
    FailureReason, MagicInputs, MoveOutcome, SkipReason, apply, hit, magical_damage,
    physical_damage, scale_damage,
};
use crate::effect::Status;
use crate::element::Element;
use crate::error::BattleError;
use crate::event::BattleEvent;
use crate::moves::{BattleMove, MoveEffectKind, MoveKind, QueuedMove, TransformTemplate};
use crate::state::{BattleState, FighterId, Resource};
use crate::stats::{Effective, MultiplierStack, StatKind};

/// Per-target tally for fan-out moves.
#[derive(Default)]
struct Tally {
    landed: bool,
    failure: Option<FailureReason>,
}

impl Tally {
    fn land(&mut self) {
        self.landed = true;
    }

    fn fail(&mut self, reason: FailureReason) {
        self.failure.get_or_insert(reason);
    }
}

/// Executes one queued move.
pub fn execute_move(
    ctx: &mut ExecutionContext<'_>,
    queued: &QueuedMove,
) -> Result<MoveOutcome, BattleError> {
    check_shape(queued)?;

    let owner = queued.owner;
    let mv = &queued.battle_move;
    if !ctx.state.require(owner)?.is_alive() {
        return Ok(MoveOutcome::Skipped(SkipReason::OwnerDead));
    }

    let targets = resolve_targets(ctx.state, queued)?;
    if targets.is_empty() && !matches!(mv.kind, MoveKind::Field(_)) {
        return Ok(MoveOutcome::Skipped(SkipReason::NoLivingTarget));
    }

    ctx.emit(BattleEvent::MoveUsed {
        owner,
        move_name: mv.name.clone(),
        target: queued.target,
    });

    if let Some(reason) = check_requirement(ctx, queued) {
        return Ok(fail(ctx, queued, reason));
    }

    if let MoveKind::Spell { cost, .. } = mv.kind
        && let Some(reason) = pay_spell_cost(ctx, queued, cost)?
    {
        return Ok(fail(ctx, queued, reason));
    }

    let tally = match &mv.kind {
        MoveKind::Attack { power } => attack(ctx, mv, owner, &targets, *power)?,
        MoveKind::Spell { element, power, .. } => spell(ctx, mv, owner, &targets, *element, *power)?,
        MoveKind::InflictStatus { status, duration } => {
            let mut tally = Tally::default();
            for &target in &targets {
                if !accuracy_roll(ctx, mv, owner, target) {
                    tally.fail(FailureReason::Missed);
                    continue;
                }
                apply::apply_status(
                    ctx.state,
                    target,
                    Status::new(*status, *duration),
                    ctx.events,
                );
                tally.land();
            }
            tally
        }
        MoveKind::Field(field) => {
            ctx.effects
                .attach_field(ctx.state, owner, &mv.name, field, ctx.events)?;
            ctx.effects.check_combination(ctx.state, ctx.events);
            landed()
        }
        MoveKind::Restore { resource, percent } => {
            for &target in &targets {
                apply::restore_percent(ctx.state, target, *resource, *percent, ctx.events);
            }
            landed()
        }
        MoveKind::GrantShield(shield) => {
            for &target in &targets {
                apply::grant_shield(ctx.state, target, shield, ctx.events);
            }
            landed()
        }
        MoveKind::ShieldBuster { power } => shield_buster(ctx, mv, owner, &targets, *power),
        MoveKind::Absorb => absorb(ctx, owner, &targets)?,
        MoveKind::Transform(template) => {
            transform(ctx, owner, template)?;
            landed()
        }
        MoveKind::Wait => landed(),
        MoveKind::MultiTurn { .. } => {
            return Err(BattleError::UnexpandedMultiTurn(mv.name.clone()));
        }
    };

    match (tally.landed, tally.failure) {
        (false, Some(reason)) => Ok(fail(ctx, queued, reason)),
        _ => Ok(MoveOutcome::Executed),
    }
}

fn landed() -> Tally {
    Tally {
        landed: true,
        failure: None,
    }
}

fn fail(ctx: &mut ExecutionContext<'_>, queued: &QueuedMove, reason: FailureReason) -> MoveOutcome {
    trace!(owner = %queued.owner, name = %queued.battle_move.name, reason = reason.as_str(), "move failed");
    ctx.emit(BattleEvent::MoveFailed {
        owner: queued.owner,
        move_name: queued.battle_move.name.clone(),
        reason,
    });
    MoveOutcome::Failed(reason)
}

fn view<'s>(
    state: &'s BattleState,
    id: FighterId,
) -> Result<Effective<'s>, BattleError> {
    Effective::of(state, id).ok_or(BattleError::UnknownFighter(id))
}

/// Accuracy roll for kinds that can miss. Blind replaces the move's
/// accuracy. Emits `Missed` on failure.
fn accuracy_roll(
    ctx: &mut ExecutionContext<'_>,
    mv: &BattleMove,
    owner: FighterId,
    target: FighterId,
) -> bool {
    if !mv.kind.rolls_accuracy() {
        return true;
    }
    let accuracy = Effective::of(ctx.state, owner)
        .and_then(|v| v.blind_accuracy())
        .unwrap_or(mv.accuracy);
    if hit::roll_accuracy(ctx.oracle, accuracy) {
        return true;
    }
    ctx.emit(BattleEvent::Missed {
        attacker: owner,
        target,
    });
    false
}

/// Product of the damage multipliers whose conditions currently hold.
fn conditional_multipliers(ctx: &ExecutionContext<'_>, mv: &BattleMove) -> MultiplierStack {
    mv.effects
        .iter()
        .filter(|effect| {
            effect
                .condition
                .as_ref()
                .is_none_or(|c| ctx.effects.evaluate(c))
        })
        .filter_map(|effect| match effect.kind {
            MoveEffectKind::DamageMultiplier(multiplier) => Some(multiplier),
            _ => None,
        })
        .collect()
}

/// Non-damage attached effects, applied after a landed hit.
fn apply_attached(
    ctx: &mut ExecutionContext<'_>,
    mv: &BattleMove,
    owner: FighterId,
    target: FighterId,
) {
    for effect in &mv.effects {
        let holds = effect
            .condition
            .as_ref()
            .is_none_or(|c| ctx.effects.evaluate(c));
        if !holds {
            continue;
        }
        match effect.kind {
            MoveEffectKind::DamageMultiplier(_) => {}
            MoveEffectKind::HealCaster { amount } => {
                apply::restore(ctx.state, owner, Resource::Health, amount, ctx.events);
            }
            MoveEffectKind::RestoreCasterMana { amount } => {
                apply::restore(ctx.state, owner, Resource::Mana, amount, ctx.events);
            }
            MoveEffectKind::InflictStatus { status, duration } => {
                apply::apply_status(
                    ctx.state,
                    target,
                    Status::new(status, duration),
                    ctx.events,
                );
            }
        }
    }
}

fn attack(
    ctx: &mut ExecutionContext<'_>,
    mv: &BattleMove,
    owner: FighterId,
    targets: &[FighterId],
    power: i32,
) -> Result<Tally, BattleError> {
    let mut tally = Tally::default();
    for &target in targets {
        if !ctx.state.is_alive(owner) {
            break;
        }
        if !ctx.state.is_alive(target) {
            continue;
        }
        if !accuracy_roll(ctx, mv, owner, target) {
            tally.fail(FailureReason::Missed);
            continue;
        }

        let defender = view(ctx.state, target)?;
        if let Some(counter) = defender.auto_evade() {
            ctx.emit(BattleEvent::Evaded {
                attacker: owner,
                target,
            });
            if counter {
                counter_strike(ctx, target, owner)?;
            }
            tally.fail(FailureReason::Evaded);
            continue;
        }

        let evade = view(ctx.state, target)?.stat(StatKind::Evade);
        if hit::roll_evade(ctx.oracle, evade) {
            ctx.emit(BattleEvent::Evaded {
                attacker: owner,
                target,
            });
            tally.fail(FailureReason::Evaded);
            continue;
        }

        let attacker = view(ctx.state, owner)?;
        let chance = attacker.critical_chance();
        let strength = attacker.stat(StatKind::Strength);
        let defense = view(ctx.state, target)?.stat(StatKind::Defense);

        let critical = hit::roll_critical(ctx.oracle, chance);
        if critical {
            ctx.emit(BattleEvent::CriticalHit {
                attacker: owner,
                target,
            });
        }

        let damage = physical_damage(
            power,
            strength,
            defense,
            critical,
            ctx.config.critical_multiplier,
        );
        let damage = scale_damage(damage, &conditional_multipliers(ctx, mv));
        apply::deliver_damage(ctx.state, target, damage, Some(owner), ctx.events);
        apply_attached(ctx, mv, owner, target);
        tally.land();
    }
    Ok(tally)
}

/// Physical strike of `counter_power` answering an auto-evaded attack.
fn counter_strike(
    ctx: &mut ExecutionContext<'_>,
    evader: FighterId,
    attacker: FighterId,
) -> Result<(), BattleError> {
    let strength = view(ctx.state, evader)?.stat(StatKind::Strength);
    let defense = view(ctx.state, attacker)?.stat(StatKind::Defense);
    let damage = physical_damage(
        ctx.config.counter_power,
        strength,
        defense,
        false,
        ctx.config.critical_multiplier,
    );
    apply::deliver_damage(ctx.state, attacker, damage, Some(evader), ctx.events);
    Ok(())
}

fn magic_inputs(
    ctx: &ExecutionContext<'_>,
    caster: FighterId,
    defender: FighterId,
    element: Element,
    power: i32,
) -> Result<MagicInputs, BattleError> {
    let attacker = view(ctx.state, caster)?;
    let target = view(ctx.state, defender)?;
    Ok(MagicInputs {
        element,
        power,
        magic_strength: attacker.stat(StatKind::MagicStrength),
        element_bonus: attacker.fighter.element_strength.get(element),
        magic_multipliers: attacker.magic_stack(element),
        magic_resistance: target.stat(StatKind::MagicResistance),
        element_resistance: target.fighter.element_resistance.get(element),
        resistance_multipliers: target.resistance_stack(element),
        defender_element: target.fighter.element,
        defender_affinity: target.fighter.affinities.get(element),
    })
}

fn spell(
    ctx: &mut ExecutionContext<'_>,
    mv: &BattleMove,
    owner: FighterId,
    targets: &[FighterId],
    element: Element,
    power: i32,
) -> Result<Tally, BattleError> {
    let mut tally = Tally::default();
    for &target in targets {
        if !ctx.state.is_alive(owner) {
            break;
        }
        if !ctx.state.is_alive(target) {
            continue;
        }
        if !accuracy_roll(ctx, mv, owner, target) {
            tally.fail(FailureReason::Missed);
            continue;
        }

        let target_reflect = if target == owner {
            None
        } else {
            view(ctx.state, target)?.reflect(element)
        };

        if let Some(reflect) = target_reflect {
            if view(ctx.state, owner)?.reflect(element).is_some() {
                ctx.emit(BattleEvent::SpellCancelled {
                    caster: owner,
                    target,
                    spell: mv.name.clone(),
                });
                tally.fail(FailureReason::SpellCancelled);
                continue;
            }

            ctx.emit(BattleEvent::SpellReflected {
                caster: owner,
                reflector: target,
                spell: mv.name.clone(),
            });
            let reflected_power =
                i32::try_from(reflect.apply(i64::from(power))).unwrap_or(i32::MAX);
            let inputs = magic_inputs(ctx, owner, owner, element, reflected_power)?;
            let damage = magical_damage(&inputs);
            apply::deliver_damage(ctx.state, owner, damage, Some(target), ctx.events);
            tally.land();
            continue;
        }

        let inputs = magic_inputs(ctx, owner, target, element, power)?;
        let damage = scale_damage(magical_damage(&inputs), &conditional_multipliers(ctx, mv));
        apply::deliver_damage(ctx.state, target, damage, Some(owner), ctx.events);
        apply_attached(ctx, mv, owner, target);
        tally.land();
    }

    if tally.landed {
        ctx.emit(BattleEvent::SpellSuccessful {
            caster: owner,
            spell: mv.name.clone(),
        });
    }
    Ok(tally)
}

fn shield_buster(
    ctx: &mut ExecutionContext<'_>,
    mv: &BattleMove,
    owner: FighterId,
    targets: &[FighterId],
    power: i32,
) -> Tally {
    let mut tally = Tally::default();
    for &target in targets {
        if !accuracy_roll(ctx, mv, owner, target) {
            tally.fail(FailureReason::Missed);
            continue;
        }
        let Some(fighter) = ctx.state.fighter_mut(target) else {
            continue;
        };
        let verdict = match fighter.shield.as_ref() {
            None => Err(FailureReason::NoShield),
            Some(shield) if !shield.is_busted_by(power) => Err(FailureReason::ShieldTooStrong),
            Some(_) => Ok(()),
        };
        match verdict {
            Err(reason) => tally.fail(reason),
            Ok(()) => {
                if let Some(shield) = fighter.shield.take() {
                    ctx.events.emit(BattleEvent::ShieldBusted {
                        fighter: target,
                        shield: shield.name,
                    });
                }
                tally.land();
            }
        }
    }
    tally
}

/// The owner consumes an ally: it gains the ally's health, maximum health
/// and strength, and the ally is gone.
fn absorb(
    ctx: &mut ExecutionContext<'_>,
    owner: FighterId,
    targets: &[FighterId],
) -> Result<Tally, BattleError> {
    let mut tally = Tally::default();
    for &shade in targets {
        if shade == owner || ctx.state.side_of(shade) != ctx.state.side_of(owner) {
            tally.fail(FailureReason::NothingToAbsorb);
            continue;
        }

        let taken = {
            let victim = ctx.state.require_mut(shade)?;
            let taken = (victim.health, victim.stats.strength);
            victim.health.current = 0;
            taken
        };
        let (health, strength) = taken;

        let absorber = ctx.state.require_mut(owner)?;
        absorber.health.maximum = absorber.health.maximum.saturating_add(health.maximum);
        absorber.health.current = absorber
            .health
            .current
            .saturating_add(health.current)
            .min(absorber.health.maximum);
        absorber.stats.strength = absorber.stats.strength.saturating_add(strength);

        ctx.emit(BattleEvent::ShadeAbsorbed {
            absorber: owner,
            shade,
        });
        ctx.emit(BattleEvent::Killed {
            fighter: shade,
            killer: Some(owner),
        });
        tally.land();
    }
    Ok(tally)
}

fn transform(
    ctx: &mut ExecutionContext<'_>,
    owner: FighterId,
    template: &TransformTemplate,
) -> Result<(), BattleError> {
    let fighter = ctx.state.require_mut(owner)?;
    fighter.stats = template.stats;
    if let Some(maximum) = template.max_health {
        fighter.health.maximum = maximum;
        fighter.health.current = fighter.health.current.min(maximum);
    }
    if template.element.is_some() {
        fighter.element = template.element;
    }
    ctx.emit(BattleEvent::FighterTransformed {
        fighter: owner,
        into: template.name.clone(),
    });
    Ok(())
}

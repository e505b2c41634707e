//! Player systems: spawn init, logic tick, collision callback

use bevy::prelude::*;

use super::components::{ArmRig, PlayerActor, PlayerState};
use super::events::{LevelCompleted, PlayerDamaged, PlayerDied};
use super::logic::{choose_action, resolve_contact, ContactOutcome, PlayerAction};
use crate::components::{
    is_active, Activation, AnimationSignal, ColliderTag, Health, Inert, PhysicsBody, ALIVE_PARAM, JUMP_PARAM,
};
use crate::overlap::OverlapDetector;
use crate::physics::CollisionStarted;
use crate::projectile::{Projectile, ProjectileFired};

/// Система: только что заспавненный игрок → animator "Alive" = true
pub fn announce_spawned_players(
    players: Query<Entity, Added<PlayerActor>>,
    mut animation: EventWriter<AnimationSignal>,
) {
    for entity in players.iter() {
        animation.write(AnimationSignal::SetBool {
            entity,
            param: ALIVE_PARAM,
            value: true,
        });
        crate::log(&format!("🧍 Player {:?} spawned", entity));
    }
}

/// Система: logic tick игрока
///
/// Порядок внутри тика:
/// 1. угол руки из tuning'а
/// 2. gravity scale из tuning'а (каждый тик)
/// 3. grounded/airborne из OverlapDetector (опрошен в `GameplaySet::Sensors`)
/// 4. одно действие: jump / move right / move left / shoot
///
/// Velocity пишется только при jump/move. Мёртвый игрок (`Inert`) не тикает.
pub fn player_logic_tick(
    input: Res<ButtonInput<KeyCode>>,
    mut players: Query<
        (
            Entity,
            &PlayerActor,
            &mut PlayerState,
            &mut PhysicsBody,
            &OverlapDetector,
            Option<&mut ArmRig>,
            Option<&Activation>,
        ),
        Without<Inert>,
    >,
    mut projectiles: Query<(&mut Projectile, &mut PhysicsBody, &mut Activation), Without<PlayerActor>>,
    mut animation: EventWriter<AnimationSignal>,
    mut fired: EventWriter<ProjectileFired>,
) {
    for (entity, actor, mut state, mut body, detector, mut arm, activation) in players.iter_mut() {
        if !is_active(activation) || !state.is_alive() {
            continue;
        }

        if let Some(arm) = arm.as_mut() {
            arm.angle = actor.arm_angle;
        }
        body.gravity_scale = actor.gravity_scale;
        let mut velocity = body.velocity;

        let grounded = detector.is_overlapping();
        let next_state = state.with_grounded(grounded);
        if *state != next_state {
            *state = next_state;
        }

        let projectile_ready = projectiles
            .get(actor.projectile)
            .map(|(_, _, projectile_activation)| !projectile_activation.active)
            .unwrap_or(false);

        match choose_action(&input, &actor.bindings, grounded, projectile_ready) {
            PlayerAction::Jump => {
                velocity.y = actor.jump_height;
                body.velocity = velocity;
                animation.write(AnimationSignal::Trigger {
                    entity,
                    param: JUMP_PARAM,
                });
            }
            PlayerAction::MoveRight => {
                velocity.x = actor.movement_speed;
                body.velocity = velocity;
            }
            PlayerAction::MoveLeft => {
                velocity.x = -actor.movement_speed;
                body.velocity = velocity;
            }
            PlayerAction::Shoot => {
                let Ok((mut projectile, mut projectile_body, mut projectile_activation)) =
                    projectiles.get_mut(actor.projectile)
                else {
                    continue;
                };

                let hand = match arm.as_ref() {
                    Some(arm) => arm.hand_position(body.position),
                    None => body.position,
                };
                let launch = actor.launch_velocity();

                projectile.activate(&mut projectile_body, &mut projectile_activation, hand, launch);
                fired.write(ProjectileFired {
                    shooter: entity,
                    projectile: actor.projectile,
                    position: hand,
                    velocity: launch,
                });

                crate::log(&format!(
                    "🔫 Player {:?} fired {:?} from {:?} with velocity {:?}",
                    entity, actor.projectile, hand, launch
                ));
            }
            PlayerAction::Idle => {}
        }
    }
}

/// Система: collision callback игрока
///
/// Мёртвый игрок игнорирует любой контакт (финиш тоже).
/// Enemy → health −1; на 0 → Dead: "Alive" = false, velocity = 0,
/// death gravity, `Inert`.
pub fn player_collisions(
    mut commands: Commands,
    mut collisions: EventReader<CollisionStarted>,
    tags: Query<&ColliderTag>,
    mut players: Query<(&PlayerActor, &mut Health, &mut PlayerState, &mut PhysicsBody)>,
    mut animation: EventWriter<AnimationSignal>,
    mut completed: EventWriter<LevelCompleted>,
    mut damaged: EventWriter<PlayerDamaged>,
    mut died: EventWriter<PlayerDied>,
) {
    for collision in collisions.read() {
        let Ok((actor, mut health, mut state, mut body)) = players.get_mut(collision.entity) else {
            continue;
        };

        if !state.is_alive() {
            continue;
        }

        let player = collision.entity;
        match resolve_contact(&mut health, ColliderTag::of(&tags, collision.other)) {
            ContactOutcome::Ignored => {}
            ContactOutcome::Victory => {
                completed.write(LevelCompleted { player });
                crate::log_info("🏁 Great Job!");
            }
            ContactOutcome::Grazed { remaining } => {
                damaged.write(PlayerDamaged {
                    player,
                    source: collision.other,
                    remaining,
                });
                crate::log_info(&format!(
                    "⚔️ Player {:?} hit by {:?}, {} HP left",
                    player, collision.other, remaining
                ));
            }
            ContactOutcome::Killed => {
                *state = PlayerState::Dead;
                body.velocity = Vec2::ZERO;
                body.gravity_scale = actor.death_gravity_scale;
                commands.entity(player).insert(Inert);

                animation.write(AnimationSignal::SetBool {
                    entity: player,
                    param: ALIVE_PARAM,
                    value: false,
                });
                died.write(PlayerDied {
                    player,
                    killer: collision.other,
                });
                crate::log_info(&format!("💀 Player {:?} died (killed by {:?})", player, collision.other));
            }
        }
    }
}

//! Чистые правила игрока (без ECS): выбор действия и реакция на контакт

use bevy::prelude::*;

use crate::components::{ColliderTag, Health};
use crate::settings::KeyBindings;

/// Действие за logic tick (максимум одно)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Jump,
    MoveRight,
    MoveLeft,
    Shoot,
    Idle,
}

/// Выбор действия: первый подошедший вариант выигрывает
///
/// 1. jump только что нажат И grounded
/// 2. right зажат
/// 3. left зажат
/// 4. shoot зажат И projectile свободен
///
/// Прыжок в воздухе проваливается дальше по списку (движение продолжается).
pub fn choose_action(
    input: &ButtonInput<KeyCode>,
    bindings: &KeyBindings,
    grounded: bool,
    projectile_ready: bool,
) -> PlayerAction {
    if input.just_pressed(bindings.jump) && grounded {
        PlayerAction::Jump
    } else if input.pressed(bindings.right) {
        PlayerAction::MoveRight
    } else if input.pressed(bindings.left) {
        PlayerAction::MoveLeft
    } else if input.pressed(bindings.shoot) && projectile_ready {
        PlayerAction::Shoot
    } else {
        PlayerAction::Idle
    }
}

/// Итог контакта с collider'ом
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Tag не интересен (или игрок уже мёртв)
    Ignored,
    /// Финиш
    Victory,
    /// Урон, игрок жив
    Grazed { remaining: u32 },
    /// Урон довёл health до 0
    Killed,
}

/// Реакция живого игрока на контакт (health −1 от Enemy)
pub fn resolve_contact(health: &mut Health, tag: ColliderTag) -> ContactOutcome {
    match tag {
        ColliderTag::Victory => ContactOutcome::Victory,
        ColliderTag::Enemy => {
            if !health.is_alive() {
                return ContactOutcome::Ignored;
            }

            health.take_damage(1);
            if health.is_alive() {
                ContactOutcome::Grazed {
                    remaining: health.current,
                }
            } else {
                ContactOutcome::Killed
            }
        }
        _ => ContactOutcome::Ignored,
    }
}

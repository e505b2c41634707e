//! Player компоненты: actor tuning, state machine, рука

use bevy::prelude::*;

use crate::components::Activation;
use crate::settings::{KeyBindings, PlayerSettings};

/// Player-controlled актор
///
/// Tuning берётся из настроек при спавне и дальше не меняется.
/// `projectile`: единственный pooled projectile этого игрока.
#[derive(Component, Debug, Clone)]
#[require(PlayerState, Activation)]
pub struct PlayerActor {
    pub jump_height: f32,
    pub movement_speed: f32,
    pub gravity_scale: f32,
    pub death_gravity_scale: f32,
    /// Угол руки/выстрела (градусы)
    pub arm_angle: f32,
    pub bullet_speed: f32,
    pub bindings: KeyBindings,
    pub projectile: Entity,
}

impl PlayerActor {
    pub fn from_settings(settings: &PlayerSettings, bindings: KeyBindings, projectile: Entity) -> Self {
        Self {
            jump_height: settings.jump_height,
            movement_speed: settings.movement_speed,
            gravity_scale: settings.gravity_scale,
            death_gravity_scale: settings.death_gravity_scale,
            arm_angle: settings.arm_angle,
            bullet_speed: settings.bullet_speed,
            bindings,
            projectile,
        }
    }

    /// Скорость выстрела: `(cos a, sin a) · bullet_speed`
    pub fn launch_velocity(&self) -> Vec2 {
        Vec2::from_angle(self.arm_angle.to_radians()) * self.bullet_speed
    }
}

/// State machine игрока
///
/// AliveGrounded ⇄ AliveAirborne → Dead (terminal)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum PlayerState {
    #[default]
    AliveGrounded,
    AliveAirborne,
    Dead,
}

impl PlayerState {
    pub fn is_alive(&self) -> bool {
        !matches!(self, PlayerState::Dead)
    }

    /// Пересчёт grounded/airborne; Dead не покидается
    pub fn with_grounded(self, grounded: bool) -> Self {
        match self {
            PlayerState::Dead => PlayerState::Dead,
            _ if grounded => PlayerState::AliveGrounded,
            _ => PlayerState::AliveAirborne,
        }
    }
}

/// Рука игрока (visual + точка вылета projectile)
///
/// Рука вращается вокруг `pivot`, кисть: `hand_offset` в системе руки.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ArmRig {
    /// Плечо относительно центра тела
    pub pivot: Vec2,
    /// Кисть относительно плеча при угле 0
    pub hand_offset: Vec2,
    /// Текущий угол (градусы), выставляется каждый logic tick
    pub angle: f32,
}

impl Default for ArmRig {
    fn default() -> Self {
        Self {
            pivot: Vec2::new(0.25, 0.15),
            hand_offset: Vec2::new(0.6, 0.0),
            angle: 0.0,
        }
    }
}

impl ArmRig {
    /// Мировая позиция кисти для тела в `body_position`
    pub fn hand_position(&self, body_position: Vec2) -> Vec2 {
        let rotation = Vec2::from_angle(self.angle.to_radians());
        body_position + self.pivot + rotation.rotate(self.hand_offset)
    }
}

//! Level bootstrap: spawn helpers акторов + демо-уровень
//!
//! Все helpers пишут через `Commands` (entity появляются после flush /
//! sync point). Tuning берётся из `GameplaySettings`.

use bevy::prelude::*;

use crate::collision_layers::*;
use crate::components::{Activation, Collider, ColliderTag, Health, PhysicsBody, StaticBody};
use crate::hud::HealthCounter;
use crate::overlap::OverlapDetector;
use crate::patrol::PatrolRoute;
use crate::player::{ArmRig, PlayerActor};
use crate::projectile::Projectile;
use crate::settings::{GameplaySettings, KeyBindings, PatrolSettings, PlayerSettings, ProjectileSettings, SettingsError};

/// Половина размера тела игрока
pub const PLAYER_HALF_EXTENTS: Vec2 = Vec2::new(0.4, 0.5);

/// Половина размера патрульного врага
pub const ENEMY_HALF_EXTENTS: Vec2 = Vec2::new(0.4, 0.4);

pub const PROJECTILE_RADIUS: f32 = 0.1;

/// Entity демо-уровня
#[derive(Debug, Clone, Copy)]
pub struct LevelHandles {
    pub player: Entity,
    pub projectile: Entity,
    pub enemy: Entity,
    pub ground: Entity,
    pub goal: Entity,
    pub hud: Entity,
}

/// Pooled projectile (неактивный, без гравитации)
pub fn spawn_projectile(commands: &mut Commands, settings: &ProjectileSettings) -> Entity {
    commands
        .spawn((
            Name::new("Projectile"),
            Projectile::new(settings.time_to_live),
            PhysicsBody::default().with_gravity_scale(0.0),
            Collider::circle(PROJECTILE_RADIUS, COLLISION_LAYER_PROJECTILES),
            ColliderTag::Bullet,
            Activation::INACTIVE,
        ))
        .id()
}

/// Игрок с ground check'ом под ногами
pub fn spawn_player(
    commands: &mut Commands,
    position: Vec2,
    settings: &PlayerSettings,
    bindings: KeyBindings,
    projectile: Entity,
) -> Entity {
    let feet = OverlapDetector::circle(settings.ground_check_radius, COLLISION_MASK_GROUND_CHECK)
        .with_anchor(Vec2::new(0.0, -PLAYER_HALF_EXTENTS.y))
        .with_capacity(settings.overlap_capacity)
        .excluding_triggers(settings.exclude_triggers);

    commands
        .spawn((
            Name::new("Player"),
            PlayerActor::from_settings(settings, bindings, projectile),
            Health::new(settings.health),
            PhysicsBody::at(position).with_gravity_scale(settings.gravity_scale),
            Collider::aabb(PLAYER_HALF_EXTENTS, COLLISION_LAYER_ACTORS),
            ColliderTag::Player,
            feet,
            ArmRig::default(),
        ))
        .id()
}

/// Патрульный враг; маршрут от точки спавна на `patrol_size`
pub fn spawn_patrol_enemy(commands: &mut Commands, position: Vec2, settings: &PatrolSettings) -> Entity {
    let route = PatrolRoute::from_origin(position.x, settings.patrol_size, settings.movement_speed);

    commands
        .spawn((
            Name::new("PatrolEnemy"),
            route,
            PhysicsBody::at(position).with_velocity(route.initial_velocity()),
            Collider::aabb(ENEMY_HALF_EXTENTS, COLLISION_LAYER_ACTORS),
            ColliderTag::Enemy,
        ))
        .id()
}

/// Статичная земля/платформа
pub fn spawn_ground(commands: &mut Commands, center: Vec2, half_extents: Vec2) -> Entity {
    commands
        .spawn((
            Name::new("Ground"),
            StaticBody,
            PhysicsBody::at(center),
            Collider::aabb(half_extents, COLLISION_LAYER_ENVIRONMENT),
        ))
        .id()
}

/// Финиш уровня (solid, tag Victory)
pub fn spawn_goal(commands: &mut Commands, center: Vec2, half_extents: Vec2) -> Entity {
    commands
        .spawn((
            Name::new("Goal"),
            StaticBody,
            PhysicsBody::at(center),
            Collider::aabb(half_extents, COLLISION_LAYER_ENVIRONMENT),
            ColliderTag::Victory,
        ))
        .id()
}

/// Демо-уровень: земля, игрок слева, патруль посередине, финиш справа
pub fn demo_level(commands: &mut Commands, settings: &GameplaySettings) -> Result<LevelHandles, SettingsError> {
    let bindings = settings.controls.bindings()?;

    let ground = spawn_ground(commands, Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.5));
    let projectile = spawn_projectile(commands, &settings.projectile);
    let player = spawn_player(
        commands,
        Vec2::new(0.0, 0.5 + PLAYER_HALF_EXTENTS.y),
        &settings.player,
        bindings,
        projectile,
    );
    let enemy = spawn_patrol_enemy(commands, Vec2::new(8.0, 0.5 + ENEMY_HALF_EXTENTS.y), &settings.patrol);
    let goal = spawn_goal(commands, Vec2::new(25.0, 1.5), Vec2::new(0.5, 1.0));
    let hud = commands.spawn((Name::new("HealthCounter"), HealthCounter::new(player))).id();

    crate::log_info(&format!(
        "🗺️ Demo level spawned: player {:?}, enemy {:?}, goal {:?}",
        player, enemy, goal
    ));

    Ok(LevelHandles {
        player,
        projectile,
        enemy,
        ground,
        goal,
        hud,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerState;

    #[test]
    fn test_demo_level_spawns_everything() {
        let mut world = World::new();
        let settings = GameplaySettings::default();

        let handles = {
            let mut commands = world.commands();
            demo_level(&mut commands, &settings).unwrap()
        };
        world.flush();

        let actor = world.get::<PlayerActor>(handles.player).unwrap();
        assert_eq!(actor.projectile, handles.projectile);
        assert_eq!(world.get::<PlayerState>(handles.player), Some(&PlayerState::AliveGrounded));
        assert_eq!(world.get::<Health>(handles.player).unwrap().current, 1);
        assert_eq!(world.get::<ColliderTag>(handles.enemy), Some(&ColliderTag::Enemy));
        assert_eq!(world.get::<ColliderTag>(handles.goal), Some(&ColliderTag::Victory));
        assert!(!world.get::<Activation>(handles.projectile).unwrap().active);
        assert_eq!(world.get::<HealthCounter>(handles.hud).unwrap().target, handles.player);

        let detector = world.get::<OverlapDetector>(handles.player).unwrap();
        assert_eq!(detector.capacity(), 4);
        assert_eq!(detector.layer_mask(), COLLISION_MASK_GROUND_CHECK);
    }

    #[test]
    fn test_negative_patrol_size_heads_to_spawn_point() {
        let mut world = World::new();
        let settings = PatrolSettings {
            patrol_size: -4.0,
            ..Default::default()
        };

        let enemy = {
            let mut commands = world.commands();
            spawn_patrol_enemy(&mut commands, Vec2::new(6.0, 1.0), &settings)
        };
        world.flush();

        let route = world.get::<PatrolRoute>(enemy).unwrap();
        assert_eq!((route.from_point(), route.to_point()), (2.0, 6.0));
        // Стоит на `to` и идёт к нему → первый physics tick развернёт
        assert_eq!(world.get::<PhysicsBody>(enemy).unwrap().velocity.x, 3.0);
    }

    #[test]
    fn test_unknown_key_fails_level() {
        let mut world = World::new();
        let mut settings = GameplaySettings::default();
        settings.controls.shoot = "Hyper".to_string();

        let mut commands = world.commands();
        assert!(matches!(
            demo_level(&mut commands, &settings),
            Err(SettingsError::UnknownKey { action: "shoot", .. })
        ));
    }
}

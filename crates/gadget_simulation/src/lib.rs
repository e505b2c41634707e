//! Gadget Simulation Core
//!
//! ECS-симуляция 2D платформера на Bevy 0.16 (gameplay layer)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = gameplay rules (player, patrol enemies, projectile, overlap queries)
//! - Engine = физика, анимация, рендер (коллабораторы через components/events)
//!
//! Для headless прогона и тестов физику заменяет `HeadlessPhysicsPlugin`.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

// Публичные модули
pub mod collision_layers;
pub mod components;
pub mod hud;
pub mod level;
pub mod logger;
pub mod overlap;
pub mod patrol;
pub mod physics;
pub mod player;
pub mod projectile;
pub mod settings;

// Re-export базовых компонентов для удобства
pub use components::*;
pub use hud::{HealthCounter, HudPlugin};
pub use level::{demo_level, LevelHandles};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel};
pub use overlap::{OverlapDetector, OverlapPlugin};
pub use patrol::{EnemyDeactivated, EnemyDisabled, PatrolPlugin, PatrolRoute};
pub use physics::{CollisionStarted, HeadlessPhysicsPlugin, PhysicsSet};
pub use player::{ArmRig, LevelCompleted, PlayerActor, PlayerDamaged, PlayerDied, PlayerPlugin, PlayerState};
pub use projectile::{Projectile, ProjectileExpired, ProjectileFired, ProjectileHit, ProjectilePlugin};
pub use settings::{GameplaySettings, KeyBindings, SettingsError};

/// Фазы logic tick (Update), выполняются строго по порядку
///
/// Collisions → Sensors → Logic → Presentation
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Collision callbacks (`CollisionStarted` от физики)
    Collisions,
    /// Overlap poll, countdown'ы, spawn init
    Sensors,
    /// Per-actor logic tick
    Logic,
    /// HUD и прочий read-only вывод
    Presentation,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Физику не добавляет: её даёт engine bridge или `HeadlessPhysicsPlugin`.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для physics tick
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .init_resource::<ButtonInput<KeyCode>>()
            .add_event::<CollisionStarted>()
            .add_event::<AnimationSignal>()
            .configure_sets(
                Update,
                (
                    GameplaySet::Collisions,
                    GameplaySet::Sensors,
                    GameplaySet::Logic,
                    GameplaySet::Presentation,
                )
                    .chain(),
            )
            .configure_sets(
                FixedUpdate,
                (PhysicsSet::Actors, PhysicsSet::Integrate, PhysicsSet::Broadphase).chain(),
            )
            // Подсистемы (gameplay layer)
            .add_plugins((OverlapPlugin, ProjectilePlugin, PatrolPlugin, PlayerPlugin, HudPlugin));
    }
}

/// Частота physics tick (FixedUpdate)
pub const SIMULATION_HZ: f64 = 60.0;

/// Шаг headless симуляции: ровно один physics timestep на `app.update()`
pub fn headless_frame() -> Duration {
    Time::<Fixed>::from_hz(SIMULATION_HZ).timestep()
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// - Time двигается ровно на `headless_frame()` за update (один physics tick на кадр)
/// - `HeadlessPhysicsPlugin` вместо движка
/// - input edges (`just_pressed`) сбрасываются в `Last`
///
/// Gameplay добавляется отдельно: `app.add_plugins(SimulationPlugin)`.
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(headless_frame()))
        .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ)) // 60Hz FixedUpdate
        .init_resource::<ButtonInput<KeyCode>>()
        .add_plugins(HeadlessPhysicsPlugin)
        .add_systems(Last, clear_input_edges);

    app
}

/// Система: сброс just_pressed/just_released в конце кадра
///
/// В headless app нет InputPlugin, edges чистим сами.
pub fn clear_input_edges(mut keys: ResMut<ButtonInput<KeyCode>>) {
    keys.clear();
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

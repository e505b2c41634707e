//! Gameplay settings (RON)
//!
//! Все tuning-значения акторов + раскладка клавиш. Любое поле можно опустить
//! в файле, возьмётся default.
//!
//! ```ron
//! (
//!     player: (health: 2, jump_height: 12.0),
//!     patrol: (patrol_size: -4.0),
//!     controls: (shoot: "J"),
//! )
//! ```

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod error;
pub mod keys;

pub use error::SettingsError;
pub use keys::{keycode_from_str, KeyBindings};

use crate::projectile::MAX_TIME_TO_LIVE;

/// Tuning игрока
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSettings {
    #[serde(default = "PlayerSettings::default_health")]
    pub health: u32, // Стартовый (и максимальный) health
    #[serde(default = "PlayerSettings::default_jump_height")]
    pub jump_height: f32, // Вертикальная velocity при прыжке
    #[serde(default = "PlayerSettings::default_movement_speed")]
    pub movement_speed: f32, // Горизонтальная velocity, пока зажата клавиша движения
    #[serde(default = "PlayerSettings::default_gravity_scale")]
    pub gravity_scale: f32, // Множитель гравитации живого (ставится каждый tick)
    #[serde(default = "PlayerSettings::default_death_gravity_scale")]
    pub death_gravity_scale: f32, // Множитель гравитации после смерти
    #[serde(default = "PlayerSettings::default_arm_angle")]
    pub arm_angle: f32, // Угол руки (и выстрела), градусы
    #[serde(default = "PlayerSettings::default_bullet_speed")]
    pub bullet_speed: f32, // Скорость вылета projectile'а
    #[serde(default = "PlayerSettings::default_ground_check_radius")]
    pub ground_check_radius: f32, // Радиус overlap-круга под ногами
    #[serde(default = "PlayerSettings::default_overlap_capacity")]
    pub overlap_capacity: usize, // Размер буфера кандидатов ground check'а
    #[serde(default = "PlayerSettings::default_exclude_triggers")]
    pub exclude_triggers: bool, // Trigger-коллайдеры не считаются землёй
}

impl PlayerSettings {
    fn default_health() -> u32 { 1 }
    fn default_jump_height() -> f32 { 15.0 }
    fn default_movement_speed() -> f32 { 7.0 }
    fn default_gravity_scale() -> f32 { 2.0 }
    fn default_death_gravity_scale() -> f32 { 4.0 }
    fn default_arm_angle() -> f32 { 45.0 }
    fn default_bullet_speed() -> f32 { 15.0 }
    fn default_ground_check_radius() -> f32 { 0.2 }
    fn default_overlap_capacity() -> usize { crate::overlap::DEFAULT_OVERLAP_CAPACITY }
    fn default_exclude_triggers() -> bool { true }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            health: Self::default_health(),
            jump_height: Self::default_jump_height(),
            movement_speed: Self::default_movement_speed(),
            gravity_scale: Self::default_gravity_scale(),
            death_gravity_scale: Self::default_death_gravity_scale(),
            arm_angle: Self::default_arm_angle(),
            bullet_speed: Self::default_bullet_speed(),
            ground_check_radius: Self::default_ground_check_radius(),
            overlap_capacity: Self::default_overlap_capacity(),
            exclude_triggers: Self::default_exclude_triggers(),
        }
    }
}

/// Tuning патрульного врага
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatrolSettings {
    #[serde(default = "PatrolSettings::default_patrol_size")]
    pub patrol_size: f32, // Длина маршрута от точки спавна (со знаком)
    #[serde(default = "PatrolSettings::default_movement_speed")]
    pub movement_speed: f32, // Горизонтальная скорость
}

impl PatrolSettings {
    fn default_patrol_size() -> f32 { 5.0 }
    fn default_movement_speed() -> f32 { 3.0 }
}

impl Default for PatrolSettings {
    fn default() -> Self {
        Self {
            patrol_size: Self::default_patrol_size(),
            movement_speed: Self::default_movement_speed(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSettings {
    #[serde(default = "ProjectileSettings::default_time_to_live")]
    pub time_to_live: f32, // Секунды до гашения выстрела, если ни во что не попал
}

impl ProjectileSettings {
    fn default_time_to_live() -> f32 { 2.0 }
}

impl Default for ProjectileSettings {
    fn default() -> Self {
        Self {
            time_to_live: Self::default_time_to_live(),
        }
    }
}

/// Controls: имена клавиш (см. `keycode_from_str`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default = "ControlsSettings::default_right")]
    pub right: String,
    #[serde(default = "ControlsSettings::default_left")]
    pub left: String,
    #[serde(default = "ControlsSettings::default_jump")]
    pub jump: String,
    #[serde(default = "ControlsSettings::default_shoot")]
    pub shoot: String,
}

impl ControlsSettings {
    fn default_right() -> String { "D".to_string() }
    fn default_left() -> String { "A".to_string() }
    fn default_jump() -> String { "Space".to_string() }
    fn default_shoot() -> String { "F".to_string() }

    /// Разрешить имена клавиш в `KeyBindings`
    pub fn bindings(&self) -> Result<KeyBindings, SettingsError> {
        Ok(KeyBindings {
            right: resolve_key("right", &self.right)?,
            left: resolve_key("left", &self.left)?,
            jump: resolve_key("jump", &self.jump)?,
            shoot: resolve_key("shoot", &self.shoot)?,
        })
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            right: Self::default_right(),
            left: Self::default_left(),
            jump: Self::default_jump(),
            shoot: Self::default_shoot(),
        }
    }
}

fn resolve_key(action: &'static str, name: &str) -> Result<bevy::prelude::KeyCode, SettingsError> {
    keycode_from_str(name).ok_or_else(|| SettingsError::UnknownKey {
        action,
        key: name.to_string(),
    })
}

/// Top-level gameplay settings
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameplaySettings {
    #[serde(default)]
    pub player: PlayerSettings,
    #[serde(default)]
    pub patrol: PatrolSettings,
    #[serde(default)]
    pub projectile: ProjectileSettings,
    #[serde(default)]
    pub controls: ControlsSettings,
}

impl GameplaySettings {
    /// Распарсить RON и провалидировать
    pub fn from_ron_str(source: &str) -> Result<Self, SettingsError> {
        let settings: Self = ron::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    /// Загрузить или откатиться на defaults (с warning'ом в лог)
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                crate::log(&format!("⚙️ Settings loaded from {}", path.display()));
                settings
            }
            Err(err) => {
                crate::log_warning(&format!(
                    "Settings {} not usable ({}), falling back to defaults",
                    path.display(),
                    err
                ));
                Self::default()
            }
        }
    }

    /// Проверка диапазонов + разрешимость клавиш
    ///
    /// Все f32 обязаны быть конечными: inf/NaN дальше превращаются в панику
    /// (`Timer`) или в NaN-позиции.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let player = &self.player;

        if player.health == 0 {
            return Err(invalid("player.health", "must be at least 1"));
        }
        positive("player.movement_speed", player.movement_speed)?;
        positive("player.jump_height", player.jump_height)?;
        positive("player.bullet_speed", player.bullet_speed)?;
        positive("player.ground_check_radius", player.ground_check_radius)?;
        finite("player.gravity_scale", player.gravity_scale)?;
        finite("player.death_gravity_scale", player.death_gravity_scale)?;
        finite("player.arm_angle", player.arm_angle)?;
        if player.overlap_capacity == 0 {
            return Err(invalid("player.overlap_capacity", "must be at least 1"));
        }

        positive("patrol.movement_speed", self.patrol.movement_speed)?;
        finite("patrol.patrol_size", self.patrol.patrol_size)?;

        positive("projectile.time_to_live", self.projectile.time_to_live)?;
        if self.projectile.time_to_live > MAX_TIME_TO_LIVE {
            return Err(invalid("projectile.time_to_live", "must not exceed one hour"));
        }

        self.controls.bindings().map(|_| ())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be finite"))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be positive"))
    }
}

fn invalid(field: &'static str, reason: &'static str) -> SettingsError {
    SettingsError::Invalid { field, reason }
}

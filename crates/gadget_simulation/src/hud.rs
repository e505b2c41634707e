//! HUD: счётчик здоровья
//!
//! Симуляция только готовит число; текст рисует engine layer по флагу
//! `changed` (polling, игрок о HUD ничего не знает).

use bevy::prelude::*;

use crate::components::Health;
use crate::GameplaySet;

/// Счётчик здоровья, привязанный к актору `target`
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthCounter {
    pub target: Entity,
    /// Последнее показанное значение
    pub shown: u32,
    /// Значение обновилось на этом тике (текст надо перерисовать)
    pub changed: bool,
}

impl HealthCounter {
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            shown: 0,
            changed: true,
        }
    }

    /// Текст для label'а
    pub fn label(&self) -> String {
        format!("Health: {}", self.shown)
    }
}

/// Система: копирует health цели в счётчик (presentation tick)
pub fn sync_health_counters(mut counters: Query<&mut HealthCounter>, healths: Query<&Health>) {
    for mut counter in counters.iter_mut() {
        let Ok(health) = healths.get(counter.target) else {
            continue;
        };

        // Changed-detection не триггерим без нужды
        let changed = counter.shown != health.current;
        if changed {
            counter.shown = health.current;
        }
        if counter.changed != changed {
            counter.changed = changed;
        }
    }
}

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, sync_health_counters.in_set(GameplaySet::Presentation));
    }
}

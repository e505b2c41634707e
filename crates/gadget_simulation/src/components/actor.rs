//! Базовые компоненты акторов: Health, Activation, Inert

use bevy::prelude::*;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max, в рантайме `current` только убывает.
/// HUD читает `current` напрямую (polling, не push).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(1) // Один удар, и всё
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

/// Активен ли entity в симуляции (set_active коллаборатора)
///
/// Неактивный entity не коллайдит, не попадает в overlap queries и не тикает.
/// Scene layer следит за `Changed<Activation>` и прячет/показывает визуал.
/// Entity без этого компонента считается активным.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Activation {
    pub active: bool,
}

impl Default for Activation {
    fn default() -> Self {
        Self::ACTIVE
    }
}

impl Activation {
    pub const ACTIVE: Self = Self { active: true };
    pub const INACTIVE: Self = Self { active: false };

    /// Возвращает true если состояние изменилось
    pub fn set_active(&mut self, active: bool) -> bool {
        let changed = self.active != active;
        self.active = active;
        changed
    }
}

/// Helper для `Option<&Activation>` в queries
pub fn is_active(activation: Option<&Activation>) -> bool {
    activation.map_or(true, |activation| activation.active)
}

/// Компонент-маркер: per-tick логика актора отключена
///
/// Аналог "behaviour disabled": entity остаётся в мире, коллайдит и получает
/// collision события, но tick-системы его пропускают (`Without<Inert>`).
/// - Player: вешается при смерти
/// - Patrol enemy: вешается после контакта с игроком
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Inert;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(2);
        assert_eq!(health.current, 2);

        health.take_damage(1);
        assert_eq!(health.current, 1);
        assert!(health.is_alive());

        health.take_damage(5); // Saturating sub
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());

        health.take_damage(1);
        assert_eq!(health.current, 0);
    }

    #[test]
    fn test_activation_toggle() {
        let mut activation = Activation::INACTIVE;
        assert!(activation.set_active(true));
        assert!(!activation.set_active(true)); // Уже активен
        assert!(activation.active);

        assert!(is_active(None));
        assert!(!is_active(Some(&Activation::INACTIVE)));
    }
}

//! Collision Layers Constants
//!
//! Битовые маски слоёв, общие для симуляции и physics backend'а.
//!
//! ## Архитектура:
//! - **Layer (один бит):** на каком слое находится collider (`Collider::layer`)
//! - **Mask (набор битов):** какие слои видит overlap query / detector
//!
//! ## Layers:
//! - Bit 0 (0b1 = 1): Default
//! - Bit 1 (0b10 = 2): Actors (player, patrol enemies)
//! - Bit 2 (0b100 = 4): Environment (ground, platforms, goal)
//! - Bit 3 (0b1000 = 8): Projectiles (pooled bullet)
//!
//! ## Использование:
//! ```rust
//! use gadget_simulation::collision_layers::*;
//! use gadget_simulation::overlap::OverlapDetector;
//!
//! // Ground check игрока видит только окружение
//! let detector = OverlapDetector::circle(0.2, COLLISION_MASK_GROUND_CHECK);
//! assert_eq!(detector.layer_mask(), COLLISION_LAYER_ENVIRONMENT);
//! ```

// ============================================================================
// Layer Битовые Маски (на каком слое объект находится)
// ============================================================================

/// Layer 0: Default (всё, что не классифицировано)
pub const COLLISION_LAYER_DEFAULT: u32 = 0b1; // 1

/// Layer 1: Actors (player + patrol enemies)
pub const COLLISION_LAYER_ACTORS: u32 = 0b10; // 2

/// Layer 2: Environment (ground, platforms, goal)
pub const COLLISION_LAYER_ENVIRONMENT: u32 = 0b100; // 4

/// Layer 3: Projectiles (pooled bullet)
pub const COLLISION_LAYER_PROJECTILES: u32 = 0b1000; // 8

// ============================================================================
// Mask Битовые Маски (что видит query)
// ============================================================================

/// Mask: ground check игрока (только окружение, на врагах не прыгаем)
pub const COLLISION_MASK_GROUND_CHECK: u32 = COLLISION_LAYER_ENVIRONMENT;

/// Mask: все слои
pub const COLLISION_MASK_ALL: u32 = u32::MAX;

// ============================================================================
// Helper Functions
// ============================================================================

/// Попадает ли слой `layer` в маску `mask`
pub fn mask_contains(mask: u32, layer: u32) -> bool {
    mask & layer != 0
}

/// Получить название слоя для debug логов
pub fn get_layer_name(layer_bits: u32) -> &'static str {
    match layer_bits {
        COLLISION_LAYER_DEFAULT => "Default",
        COLLISION_LAYER_ACTORS => "Actors",
        COLLISION_LAYER_ENVIRONMENT => "Environment",
        COLLISION_LAYER_PROJECTILES => "Projectiles",
        _ => "Unknown",
    }
}

//! Collider shapes и overlap геометрия (circle / AABB)

use bevy::prelude::*;

/// Форма collider'а в локальных координатах тела
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Circle { radius: f32 },
    Aabb { half_extents: Vec2 },
}

impl ColliderShape {
    /// Half extents описанного AABB (для push-out)
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            ColliderShape::Circle { radius } => Vec2::splat(radius),
            ColliderShape::Aabb { half_extents } => half_extents,
        }
    }

    /// Та же форма, раздутая на `skin` (contact tolerance)
    pub fn inflated(&self, skin: f32) -> Self {
        match *self {
            ColliderShape::Circle { radius } => ColliderShape::Circle { radius: radius + skin },
            ColliderShape::Aabb { half_extents } => ColliderShape::Aabb {
                half_extents: half_extents + Vec2::splat(skin),
            },
        }
    }

    /// Пересекаются ли две формы (касание считается пересечением)
    pub fn overlaps(&self, center: Vec2, other: &ColliderShape, other_center: Vec2) -> bool {
        match (*self, *other) {
            (ColliderShape::Circle { radius: a }, ColliderShape::Circle { radius: b }) => {
                circle_circle(center, a, other_center, b)
            }
            (ColliderShape::Circle { radius }, ColliderShape::Aabb { half_extents }) => {
                circle_aabb(center, radius, other_center, half_extents)
            }
            (ColliderShape::Aabb { half_extents }, ColliderShape::Circle { radius }) => {
                circle_aabb(other_center, radius, center, half_extents)
            }
            (ColliderShape::Aabb { half_extents: a }, ColliderShape::Aabb { half_extents: b }) => {
                aabb_aabb(center, a, other_center, b)
            }
        }
    }
}

pub fn circle_circle(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) <= reach * reach
}

pub fn circle_aabb(circle: Vec2, radius: f32, box_center: Vec2, half_extents: Vec2) -> bool {
    // Ближайшая к центру круга точка коробки
    let closest = circle.clamp(box_center - half_extents, box_center + half_extents);
    closest.distance_squared(circle) <= radius * radius
}

pub fn aabb_aabb(a: Vec2, half_a: Vec2, b: Vec2, half_b: Vec2) -> bool {
    let delta = (a - b).abs();
    delta.x <= half_a.x + half_b.x && delta.y <= half_a.y + half_b.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_circle() {
        assert!(circle_circle(Vec2::ZERO, 1.0, Vec2::new(1.5, 0.0), 0.5)); // касание
        assert!(!circle_circle(Vec2::ZERO, 1.0, Vec2::new(1.6, 0.0), 0.5));
    }

    #[test]
    fn test_circle_aabb_corner() {
        let half = Vec2::splat(1.0);
        // Угол коробки в (1, 1), расстояние до (1.5, 1.5) ≈ 0.707
        assert!(circle_aabb(Vec2::new(1.5, 1.5), 0.75, Vec2::ZERO, half));
        assert!(!circle_aabb(Vec2::new(1.5, 1.5), 0.6, Vec2::ZERO, half));
        // Центр круга внутри коробки
        assert!(circle_aabb(Vec2::new(0.2, -0.3), 0.01, Vec2::ZERO, half));
    }

    #[test]
    fn test_aabb_aabb() {
        let half = Vec2::new(0.5, 0.5);
        assert!(aabb_aabb(Vec2::ZERO, half, Vec2::new(1.0, 0.0), half));
        assert!(!aabb_aabb(Vec2::ZERO, half, Vec2::new(0.0, 1.2), half));
    }

    #[test]
    fn test_inflated_shape_reaches_neighbour() {
        let ground = ColliderShape::Aabb { half_extents: Vec2::new(10.0, 0.5) };
        let feet = ColliderShape::Circle { radius: 0.1 };
        let feet_center = Vec2::new(0.0, 0.65);

        assert!(!feet.overlaps(feet_center, &ground, Vec2::ZERO));
        assert!(feet.inflated(0.1).overlaps(feet_center, &ground, Vec2::ZERO));
    }
}

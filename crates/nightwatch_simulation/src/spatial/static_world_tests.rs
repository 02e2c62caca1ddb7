//! Tests for StaticWorld queries.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use crate::layers::*;
    use crate::spatial::{Body, Occluder, StaticWorld, WorldQuery};

    fn body(index: u32, position: Vec2, layer: u32) -> Body {
        Body {
            entity: Entity::from_raw(index),
            position,
            radius: 0.3,
            layer,
        }
    }

    #[test]
    fn test_query_nearby_filters_by_radius_and_layer() {
        let mut world = StaticWorld::new();
        world.set_bodies([
            body(1, Vec2::new(2.0, 0.0), LAYER_PARTY),
            body(2, Vec2::new(9.0, 0.0), LAYER_PARTY), // далеко
            body(3, Vec2::new(1.0, 0.0), LAYER_ENEMIES), // другой слой
        ]);

        let found = world.query_nearby(Vec2::ZERO, 6.0, LAYER_PARTY);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].entity, Entity::from_raw(1));
    }

    #[test]
    fn test_overlaps_point_respects_mask() {
        let world = StaticWorld::new()
            .with_occluder(Occluder::wall(Vec2::new(2.0, -1.0), Vec2::new(3.0, 1.0)));

        assert!(world.overlaps_point(Vec2::new(2.5, 0.0), LAYER_WALLS));
        assert!(!world.overlaps_point(Vec2::new(2.5, 0.0), LAYER_BIG_OBJECTS));
        assert!(!world.overlaps_point(Vec2::new(4.0, 0.0), LAYER_WALLS));
    }

    #[test]
    fn test_segment_occluded_by_thin_wall() {
        // Стена толщиной 0.3 - шаг 0.25 обязан её поймать
        let world = StaticWorld::new()
            .with_occluder(Occluder::wall(Vec2::new(2.0, -2.0), Vec2::new(2.3, 2.0)));

        assert!(world.is_segment_occluded(Vec2::ZERO, Vec2::new(5.0, 0.0), LAYER_WALLS, 0.25));
        assert!(!world.is_segment_occluded(Vec2::ZERO, Vec2::new(0.0, 5.0), LAYER_WALLS, 0.25));
    }

    #[test]
    fn test_raycast_returns_nearest_hit() {
        let mut world = StaticWorld::new()
            .with_occluder(Occluder::wall(Vec2::new(4.0, -1.0), Vec2::new(5.0, 1.0)));
        world.set_bodies([body(7, Vec2::new(2.0, 0.0), LAYER_PARTY)]);

        let hit = world
            .raycast_first_hit(Vec2::ZERO, Vec2::X, 10.0, LAYER_WALLS | LAYER_PARTY)
            .expect("ray must hit the body first");
        assert_eq!(hit.entity, Some(Entity::from_raw(7)));
        assert!((hit.distance - 1.7).abs() < 1e-4);

        // Без PARTY в маске - попадаем в стену
        let hit = world
            .raycast_first_hit(Vec2::ZERO, Vec2::X, 10.0, LAYER_WALLS)
            .expect("ray must hit the wall");
        assert_eq!(hit.entity, None);
        assert!((hit.distance - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_raycast_respects_max_distance_and_direction() {
        let world = StaticWorld::new()
            .with_occluder(Occluder::wall(Vec2::new(4.0, -1.0), Vec2::new(5.0, 1.0)));

        assert!(world.raycast_first_hit(Vec2::ZERO, Vec2::X, 3.0, LAYER_WALLS).is_none());
        assert!(world.raycast_first_hit(Vec2::ZERO, -Vec2::X, 10.0, LAYER_WALLS).is_none());
    }

    #[test]
    fn test_insert_body_replaces_same_entity() {
        let mut world = StaticWorld::new();
        world.insert_body(body(1, Vec2::ZERO, LAYER_PARTY));
        world.insert_body(body(1, Vec2::new(3.0, 0.0), LAYER_PARTY));

        assert_eq!(world.bodies().len(), 1);
        assert_eq!(world.bodies()[0].position, Vec2::new(3.0, 0.0));
    }
}

//! Tests for vision probe.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use crate::layers::*;
    use crate::spatial::{Body, Candidate, Occluder, StaticWorld};
    use crate::vision::{can_see, compute_visible_target, scan, Perceiver, ViewCone};

    fn cone() -> ViewCone {
        ViewCone {
            origin: Vec2::ZERO,
            forward: Vec2::X,
            fov_degrees: 60.0,
            range: 6.0,
        }
    }

    fn at_bearing(degrees: f32, distance: f32) -> Vec2 {
        let r = degrees.to_radians();
        Vec2::new(r.cos(), r.sin()) * distance
    }

    fn party_body(index: u32, position: Vec2) -> Body {
        Body {
            entity: Entity::from_raw(index),
            position,
            radius: 0.3,
            layer: LAYER_PARTY,
        }
    }

    #[test]
    fn test_detects_inside_fov_rejects_outside() {
        let world = StaticWorld::new();
        let inside = Candidate::new(Entity::from_raw(1), at_bearing(20.0, 5.0));
        let outside = Candidate::new(Entity::from_raw(2), at_bearing(35.0, 5.0));

        assert_eq!(compute_visible_target(&world, &cone(), &[inside], 0.25), Some(inside));
        assert_eq!(compute_visible_target(&world, &cone(), &[outside], 0.25), None);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let world = StaticWorld::new();
        let far = Candidate::new(Entity::from_raw(1), Vec2::new(6.5, 0.0));
        assert_eq!(compute_visible_target(&world, &cone(), &[far], 0.25), None);
    }

    #[test]
    fn test_wall_blocks_detection() {
        let world = StaticWorld::new()
            .with_occluder(Occluder::wall(Vec2::new(2.0, -1.0), Vec2::new(2.5, 1.0)));
        let behind = Candidate::new(Entity::from_raw(1), Vec2::new(4.0, 0.0));

        assert_eq!(compute_visible_target(&world, &cone(), &[behind], 0.25), None);
    }

    #[test]
    fn test_big_object_blocks_detection_but_not_confirmation() {
        let mut world = StaticWorld::new().with_occluder(Occluder::circle(
            Vec2::new(2.0, 0.0),
            0.5,
            LAYER_BIG_OBJECTS,
        ));
        let target = party_body(1, Vec2::new(4.0, 0.0));
        world.set_bodies([target]);
        let candidate = Candidate::new(target.entity, target.position);

        assert_eq!(compute_visible_target(&world, &cone(), &[candidate], 0.25), None);
        assert!(can_see(&world, &cone(), candidate));
    }

    #[test]
    fn test_nearest_first_regardless_of_order() {
        let world = StaticWorld::new();
        let far = Candidate::new(Entity::from_raw(1), Vec2::new(5.0, 0.0));
        let near = Candidate::new(Entity::from_raw(2), Vec2::new(2.0, 0.5));

        assert_eq!(compute_visible_target(&world, &cone(), &[far, near], 0.25), Some(near));
        assert_eq!(compute_visible_target(&world, &cone(), &[near, far], 0.25), Some(near));
    }

    #[test]
    fn test_equal_distance_tie_breaks_by_entity() {
        let world = StaticWorld::new();
        let a = Candidate::new(Entity::from_raw(9), Vec2::new(3.0, 1.0));
        let b = Candidate::new(Entity::from_raw(4), Vec2::new(3.0, -1.0));

        assert_eq!(compute_visible_target(&world, &cone(), &[a, b], 0.25), Some(b));
    }

    #[test]
    fn test_occluded_nearest_falls_back_to_next() {
        // Ближний за стеной, дальний открыт
        let world = StaticWorld::new()
            .with_occluder(Occluder::wall(Vec2::new(1.0, 0.5), Vec2::new(1.5, 2.0)));
        let hidden = Candidate::new(Entity::from_raw(1), Vec2::new(2.0, 1.1));
        let open = Candidate::new(Entity::from_raw(2), Vec2::new(4.0, -0.5));

        assert_eq!(compute_visible_target(&world, &cone(), &[hidden, open], 0.25), Some(open));
    }

    #[test]
    fn test_can_see_blocked_by_wall_ray() {
        let mut world = StaticWorld::new()
            .with_occluder(Occluder::wall(Vec2::new(2.0, -1.0), Vec2::new(2.2, 1.0)));
        let target = party_body(1, Vec2::new(4.0, 0.0));
        world.set_bodies([target]);

        assert!(!can_see(&world, &cone(), Candidate::new(target.entity, target.position)));
    }

    #[test]
    fn test_can_see_ray_stopped_by_other_party_member() {
        // Луч упирается в другого члена party - цель не подтверждена
        let mut world = StaticWorld::new();
        let blocker = party_body(1, Vec2::new(2.0, 0.0));
        let target = party_body(2, Vec2::new(4.0, 0.0));
        world.set_bodies([blocker, target]);

        assert!(!can_see(&world, &cone(), Candidate::new(target.entity, target.position)));
        assert!(can_see(&world, &cone(), Candidate::new(blocker.entity, blocker.position)));
    }

    #[test]
    fn test_scan_uses_world_candidates_and_respects_enabled() {
        let mut world = StaticWorld::new();
        world.set_bodies([party_body(3, Vec2::new(3.0, 0.0))]);

        let mut perceiver = Perceiver::default();
        let view = perceiver.cone(Vec2::ZERO, Vec2::X);
        assert_eq!(scan(&world, &perceiver, &view).map(|c| c.entity), Some(Entity::from_raw(3)));

        perceiver.enabled = false;
        assert_eq!(scan(&world, &perceiver, &view), None);
    }
}

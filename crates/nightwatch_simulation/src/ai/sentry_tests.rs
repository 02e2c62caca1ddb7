//! Tests for sentry FSM.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use super::super::sentry::{Sentry, SentrySnapshot, SentryState};
    use crate::spatial::Candidate;

    fn no_locate(_: Entity) -> Option<Vec2> {
        None
    }

    fn sighting(index: u32, position: Vec2) -> Option<Candidate> {
        Some(Candidate::new(Entity::from_raw(index), position))
    }

    #[test]
    fn test_sentry_default() {
        let sentry = Sentry::default();
        assert_eq!(sentry.state, SentryState::Sweep);
        assert_eq!(sentry.sweep_speed, 20.0);
        assert_eq!(sentry.sweep_arc, 60.0);
        assert_eq!(sentry.alert_hold_time, 2.0);
        assert_eq!(sentry.notify_radius, 8.0);
        assert_eq!(sentry.snapshot(), None);
    }

    #[test]
    fn test_lock_timer_accumulates_and_resets_on_new_target() {
        let mut sentry = Sentry::new(0.0);
        let target = Vec2::new(3.0, 0.0);

        sentry.tick(0.0, 0.5, Vec2::ZERO, sighting(1, target), no_locate);
        assert_eq!(sentry.state, SentryState::Track);
        sentry.tick(0.5, 0.5, Vec2::ZERO, sighting(1, target), no_locate);
        assert_eq!(sentry.lock_timer, 1.0);

        // Другая цель → lock_timer с нуля
        sentry.tick(1.0, 0.5, Vec2::ZERO, sighting(2, target), no_locate);
        assert_eq!(sentry.lock_timer, 0.5);

        // Тик без подтверждения - не копится
        sentry.tick(1.5, 0.5, Vec2::ZERO, None, no_locate);
        assert_eq!(sentry.lock_timer, 0.5);
    }

    #[test]
    fn test_alarm_fires_once_after_hold_time() {
        let mut sentry = Sentry::new(0.0);
        let target = Vec2::new(3.0, 0.0);
        let mut alarms = Vec::new();

        for i in 0..10 {
            let now = i as f32 * 0.5;
            if let Some(entity) = sentry.tick(now, 0.5, Vec2::ZERO, sighting(1, target), no_locate) {
                alarms.push((now, entity));
            }
        }

        // lock 0.5, 1.0, 1.5, 2.0 → тревога на четвёртом тике
        assert_eq!(alarms, vec![(1.5, Entity::from_raw(1))]);
        assert!(sentry.alert);
    }

    #[test]
    fn test_release_after_lost_sight_delay() {
        let mut sentry = Sentry::new(0.0);
        sentry.tick(0.0, 0.1, Vec2::ZERO, sighting(1, Vec2::new(3.0, 0.0)), no_locate);

        sentry.tick(2.0, 0.1, Vec2::ZERO, None, no_locate);
        assert_eq!(sentry.state, SentryState::Track);

        sentry.tick(2.1, 0.1, Vec2::ZERO, None, no_locate);
        assert_eq!(sentry.state, SentryState::Sweep);
        assert_eq!(sentry.target, None);
        assert_eq!(sentry.lock_timer, 0.0);
        assert!(!sentry.alert);
    }

    #[test]
    fn test_track_follows_live_position_between_sightings() {
        let mut sentry = Sentry::new(0.0);
        sentry.tick(0.0, 0.1, Vec2::ZERO, sighting(1, Vec2::new(3.0, 0.0)), no_locate);

        let moved = Vec2::new(0.0, 3.0);
        sentry.tick(0.1, 0.1, Vec2::ZERO, None, |_| Some(moved));

        assert_eq!(sentry.target.map(|t| t.position), Some(moved));
    }

    #[test]
    fn test_track_rotation_is_bounded() {
        let mut sentry = Sentry::new(0.0);

        // Цель на 90°, 20°/с × 0.5с = 10° за тик
        sentry.tick(0.0, 0.5, Vec2::ZERO, sighting(1, Vec2::new(0.0, 4.0)), no_locate);
        assert!((sentry.bearing - 10.0).abs() < 1e-4, "bearing = {}", sentry.bearing);

        for i in 1..20 {
            sentry.tick(i as f32 * 0.5, 0.5, Vec2::ZERO, sighting(1, Vec2::new(0.0, 4.0)), no_locate);
        }
        // Дошли и не перелетели
        assert!((sentry.bearing - 90.0).abs() < 1e-4, "bearing = {}", sentry.bearing);
    }

    #[test]
    fn test_sweep_stays_inside_arc() {
        let mut sentry = Sentry::new(45.0);
        sentry.sweep_speed = 90.0;

        for i in 0..2000 {
            sentry.tick(i as f32 * 0.05, 0.05, Vec2::ZERO, None, no_locate);
            assert!(
                (sentry.bearing - 45.0).abs() <= 30.0 + 1e-3,
                "bearing {} left the arc",
                sentry.bearing
            );
        }
    }

    #[test]
    fn test_nested_suspend_keeps_first_snapshot() {
        let mut sentry = Sentry::new(0.0);
        sentry.sweep_enabled = false;
        sentry.tick(0.0, 0.1, Vec2::ZERO, sighting(1, Vec2::new(3.0, 0.0)), no_locate);

        assert!(sentry.suspend());
        assert_eq!(sentry.state, SentryState::Disabled);
        assert_eq!(sentry.target, None);
        assert!(!sentry.vision_enabled);

        // Повторный disable не перезаписывает snapshot
        assert!(!sentry.suspend());
        assert_eq!(
            sentry.snapshot(),
            Some(SentrySnapshot {
                sweep_enabled: false,
                vision_enabled: true,
            })
        );

        // В Disabled тик ничего не делает
        assert_eq!(sentry.tick(1.0, 0.1, Vec2::ZERO, sighting(1, Vec2::new(3.0, 0.0)), no_locate), None);

        assert!(sentry.resume());
        assert_eq!(sentry.state, SentryState::Sweep);
        assert!(!sentry.sweep_enabled);
        assert!(sentry.vision_enabled);
        assert_eq!(sentry.snapshot(), None);
        assert!(!sentry.resume());
    }
}

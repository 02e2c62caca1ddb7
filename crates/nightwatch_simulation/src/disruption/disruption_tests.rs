//! Tests for disruption lifecycle.

#[cfg(test)]
mod tests {
    use crate::disruption::{Damageable, DamageOutcome, DisableOutcome, Disruption};

    #[test]
    fn test_disruption_default() {
        let d = Disruption::default();
        assert_eq!(d.hit_points, 3);
        assert_eq!(d.max_hit_points, 3);
        assert_eq!(d.freeze_hits_to_die, 3);
        assert_eq!(d.death_grace, 1.5);
        assert!(!d.is_inert());
    }

    #[test]
    fn test_damage_to_exactly_zero_kills_once() {
        let mut d = Disruption::new(3, 3);

        assert_eq!(d.take_damage(2), DamageOutcome::Hit);
        assert_eq!(d.take_damage(1), DamageOutcome::Killed);
        assert!(d.is_dead());

        // Grace period: дальнейший урон ничего не делает
        assert_eq!(d.take_damage(1), DamageOutcome::Ignored);
        assert_eq!(d.take_damage(5), DamageOutcome::Ignored);
        assert!(!d.die());
    }

    #[test]
    fn test_overkill_floors_at_zero() {
        let mut d = Disruption::new(3, 3);
        assert_eq!(d.take_damage(10), DamageOutcome::Killed);
        assert_eq!(d.hit_points, 0);
    }

    #[test]
    fn test_zero_damage_ignored() {
        let mut d = Disruption::new(3, 3);
        assert_eq!(d.take_damage(0), DamageOutcome::Ignored);
        assert_eq!(d.hit_points, 3);
    }

    #[test]
    fn test_freeze_hits_are_independent_death_vector() {
        let mut d = Disruption::new(100, 3);

        assert_eq!(d.take_freeze_hit(), DamageOutcome::Hit);
        assert_eq!(d.take_freeze_hit(), DamageOutcome::Hit);
        assert_eq!(d.take_freeze_hit(), DamageOutcome::Killed);
        assert!(d.is_dead());
        assert_eq!(d.take_freeze_hit(), DamageOutcome::Ignored);
        assert_eq!(d.freeze_hits, 3);
    }

    #[test]
    fn test_nested_disable_reenables_once() {
        let mut d = Disruption::default();

        assert_eq!(d.disable_temporarily(0.0, 5.0), DisableOutcome::Frozen);
        assert_eq!(d.disable_temporarily(1.0, 2.0), DisableOutcome::Extended);

        // Повторный вызов заменил таймер: 1.0 + 2.0
        assert_eq!(d.reenable_at(), Some(3.0));

        let mut reenables = Vec::new();
        let mut t = 0.0;
        while t <= 10.0 {
            if d.tick(t) {
                reenables.push(t);
            }
            t += 0.25;
        }

        assert_eq!(reenables, vec![3.0]);
        assert!(!d.is_disabled());
    }

    #[test]
    fn test_disable_rejects_non_positive_duration() {
        let mut d = Disruption::default();
        assert_eq!(d.disable_temporarily(0.0, 0.0), DisableOutcome::Ignored);
        assert_eq!(d.disable_temporarily(0.0, -1.0), DisableOutcome::Ignored);
        assert_eq!(d.disable_temporarily(0.0, f32::NAN), DisableOutcome::Ignored);
        assert!(!d.is_disabled());
    }

    #[test]
    fn test_death_cancels_pending_reenable() {
        let mut d = Disruption::default();
        d.disable_temporarily(0.0, 1.0);
        assert!(d.die());

        assert_eq!(d.reenable_at(), None);
        assert!(!d.tick(5.0));
        assert!(d.is_inert());
        assert_eq!(d.disable_temporarily(5.0, 1.0), DisableOutcome::Ignored);
    }
}

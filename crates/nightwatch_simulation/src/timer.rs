//! Одноразовые отложенные таймеры (per-agent, per-purpose).
//!
//! Каждый слот принадлежит ровно одному агенту. `arm` атомарно заменяет
//! предыдущий pending deadline - два срабатывания одного слота невозможны.

use bevy::prelude::*;

/// Single-shot deadline в секундах elapsed-времени симуляции.
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct DeferredTimer {
    deadline: Option<f32>,
}

impl DeferredTimer {
    /// Взвести через `seconds` от `now` (отменяет pending).
    pub fn arm(&mut self, now: f32, seconds: f32) {
        self.deadline = Some(now + seconds);
    }

    /// Взвести на абсолютный момент времени (отменяет pending).
    pub fn arm_at(&mut self, deadline: f32) {
        self.deadline = Some(deadline);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<f32> {
        self.deadline
    }

    /// true ровно один раз - на первом опросе с `now >= deadline`.
    pub fn fire(&mut self, now: f32) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_once() {
        let mut timer = DeferredTimer::default();
        timer.arm(0.0, 1.0);

        assert!(!timer.fire(0.5));
        assert!(timer.fire(1.0));
        assert!(!timer.fire(1.5)); // Уже сработал
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_rearm_replaces_pending() {
        let mut timer = DeferredTimer::default();
        timer.arm(0.0, 5.0);
        timer.arm(1.0, 2.0); // deadline = 3.0, старый 5.0 отменён

        assert_eq!(timer.deadline(), Some(3.0));
        assert!(timer.fire(3.0));
        assert!(!timer.fire(5.0));
    }

    #[test]
    fn test_cancel() {
        let mut timer = DeferredTimer::default();
        timer.arm_at(2.0);
        timer.cancel();
        assert!(!timer.fire(10.0));
    }
}

//! Contact damage - guard касается игрока

use bevy::prelude::*;

use crate::components::Position;
use crate::disruption::{Dead, Disruption};
use crate::layers::MASK_CONTACT;
use crate::spatial::WorldQuery;

/// Контактный урон guard'а
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ContactDamage {
    /// Урон за касание
    pub damage: u32,

    /// Cooldown между касаниями (секунды)
    pub cooldown: f32,

    /// Текущий cooldown таймер (уменьшается до 0)
    pub cooldown_timer: f32,

    /// Дистанция касания (центр → центр, метры)
    pub radius: f32,
}

impl Default for ContactDamage {
    fn default() -> Self {
        Self {
            damage: 25,
            cooldown: 0.5,
            cooldown_timer: 0.0,
            radius: 0.5,
        }
    }
}

impl ContactDamage {
    pub fn can_hit(&self) -> bool {
        self.cooldown_timer <= 0.0
    }

    pub fn start_cooldown(&mut self) {
        self.cooldown_timer = self.cooldown;
    }

    pub fn tick(&mut self, delta: f32) {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer = (self.cooldown_timer - delta).max(0.0);
        }
    }
}

/// Guard коснулся цели
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ContactHit {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
}

/// System: контактный урон (не чаще раза в cooldown на атакующего)
///
/// Disabled и мёртвые guards не бьют, guard с нулевым уроном тоже.
/// Из нескольких целей в радиусе - ближайшая (при равенстве - меньший Entity).
pub fn contact_damage<W: WorldQuery + Resource>(
    world: Res<W>,
    time: Res<Time>,
    mut attackers: Query<(Entity, &Position, &Disruption, &mut ContactDamage), Without<Dead>>,
    mut hits: EventWriter<ContactHit>,
) {
    let delta = time.delta_secs();

    for (entity, position, disruption, mut contact) in attackers.iter_mut() {
        contact.tick(delta);

        if contact.damage == 0 || disruption.is_inert() || !contact.can_hit() {
            continue;
        }

        let nearest = world
            .query_nearby(position.0, contact.radius, MASK_CONTACT)
            .into_iter()
            .filter(|candidate| candidate.entity != entity)
            .min_by(|a, b| {
                position
                    .0
                    .distance_squared(a.position)
                    .total_cmp(&position.0.distance_squared(b.position))
                    .then_with(|| a.entity.cmp(&b.entity))
            });

        let Some(target) = nearest else {
            continue;
        };

        contact.start_cooldown();
        crate::logger::log(&format!(
            "👊 Contact hit {:?} → {:?} ({} dmg)",
            entity, target.entity, contact.damage
        ));
        hits.write(ContactHit {
            attacker: entity,
            target: target.entity,
            damage: contact.damage,
        });
    }
}

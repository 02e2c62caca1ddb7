//! Spawn-time конфигурация агентов
//!
//! Один плоский record на агента (guard или sentry). Все поля опциональны
//! в serde (`#[serde(default)]`) - отсутствующие берутся из defaults.
//! Валидация - один раз при спавне, steady-state её больше не делает.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::{PursuitAgent, Sentry};
use crate::combat::ContactDamage;
use crate::disruption::Disruption;
use crate::error::{ConfigError, ConfigResult};
use crate::patrol::{PatrolMover, PatrolRoute};
use crate::vision::Perceiver;

/// Маршрут патруля в конфиге
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PatrolRouteConfig {
    Waypoints {
        points: Vec<[f32; 2]>,
        #[serde(default = "default_looping")]
        looping: bool,
    },
    Roam {
        /// None → позиция спавна
        #[serde(default)]
        center: Option<[f32; 2]>,
        radius: f32,
    },
}

fn default_looping() -> bool {
    true
}

impl PatrolRouteConfig {
    pub fn to_route(&self, spawn_position: Vec2) -> PatrolRoute {
        match self {
            Self::Waypoints { points, looping } => {
                PatrolRoute::waypoints(points.iter().map(|p| Vec2::from_array(*p)).collect(), *looping)
            }
            Self::Roam { center, radius } => PatrolRoute::roam(
                center.map(Vec2::from_array).unwrap_or(spawn_position),
                *radius,
            ),
        }
    }
}

/// Параметры спавна агента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    // Vision
    pub range: f32,
    pub fov_degrees: f32,
    pub sample_step: f32,

    // Patrol / pursuit
    pub move_speed: f32,
    pub chase_speed_multiplier: f32,
    pub lost_sight_delay_seconds: f32,
    pub return_tolerance_units: f32,
    pub dwell_seconds: f32,
    pub waypoint_tolerance: f32,
    pub roam_pause_seconds: f32,
    pub patrol_route: Option<PatrolRouteConfig>,

    // Sentry
    pub sweep_speed: f32,
    pub sweep_arc_degrees: f32,
    pub rest_bearing_degrees: f32,
    pub alert_hold_time_seconds: f32,
    pub notify_radius: f32,

    // Disruption
    pub freeze_hits_to_die: u32,
    pub max_hit_points: u32,
    pub death_grace_seconds: f32,

    // Contact damage
    pub contact_damage: u32,
    pub contact_cooldown_seconds: f32,
    pub contact_radius: f32,

    /// Радиус тела в spatial-снапшоте
    pub body_radius: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            range: 6.0,
            fov_degrees: 60.0,
            sample_step: 0.25,
            move_speed: 2.0,
            chase_speed_multiplier: 1.4,
            lost_sight_delay_seconds: 2.0,
            return_tolerance_units: 0.3,
            dwell_seconds: 0.5,
            waypoint_tolerance: 0.2,
            roam_pause_seconds: 1.0,
            patrol_route: None,
            sweep_speed: 20.0,
            sweep_arc_degrees: 60.0,
            rest_bearing_degrees: 0.0,
            alert_hold_time_seconds: 2.0,
            notify_radius: 8.0,
            freeze_hits_to_die: 3,
            max_hit_points: 3,
            death_grace_seconds: 1.5,
            contact_damage: 25,
            contact_cooldown_seconds: 0.5,
            contact_radius: 0.5,
            body_radius: 0.3,
        }
    }
}

fn finite(field: &'static str, value: f32) -> ConfigResult<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> ConfigResult<()> {
    if finite(field, value)? > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> ConfigResult<()> {
    if finite(field, value)? >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

impl SpawnConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        positive("range", self.range)?;
        let fov = finite("fov_degrees", self.fov_degrees)?;
        if fov <= 0.0 || fov > 360.0 {
            return Err(ConfigError::FovOutOfRange(fov));
        }
        positive("sample_step", self.sample_step)?;

        non_negative("move_speed", self.move_speed)?;
        non_negative("chase_speed_multiplier", self.chase_speed_multiplier)?;
        non_negative("lost_sight_delay_seconds", self.lost_sight_delay_seconds)?;
        non_negative("return_tolerance_units", self.return_tolerance_units)?;
        non_negative("dwell_seconds", self.dwell_seconds)?;
        non_negative("waypoint_tolerance", self.waypoint_tolerance)?;
        non_negative("roam_pause_seconds", self.roam_pause_seconds)?;

        non_negative("sweep_speed", self.sweep_speed)?;
        non_negative("sweep_arc_degrees", self.sweep_arc_degrees)?;
        finite("rest_bearing_degrees", self.rest_bearing_degrees)?;
        non_negative("alert_hold_time_seconds", self.alert_hold_time_seconds)?;
        non_negative("notify_radius", self.notify_radius)?;

        if self.freeze_hits_to_die == 0 {
            return Err(ConfigError::ZeroCount("freeze_hits_to_die"));
        }
        if self.max_hit_points == 0 {
            return Err(ConfigError::ZeroCount("max_hit_points"));
        }
        non_negative("death_grace_seconds", self.death_grace_seconds)?;

        non_negative("contact_cooldown_seconds", self.contact_cooldown_seconds)?;
        non_negative("contact_radius", self.contact_radius)?;
        non_negative("body_radius", self.body_radius)?;

        match &self.patrol_route {
            Some(PatrolRouteConfig::Roam { center, radius }) => {
                non_negative("roam_radius", *radius)?;
                if let Some([x, y]) = center {
                    finite("roam_center", *x)?;
                    finite("roam_center", *y)?;
                }
            }
            Some(PatrolRouteConfig::Waypoints { points, .. }) => {
                for [x, y] in points {
                    finite("waypoint", *x)?;
                    finite("waypoint", *y)?;
                }
            }
            None => {}
        }

        Ok(())
    }

    pub fn perceiver(&self) -> Perceiver {
        Perceiver {
            fov_degrees: self.fov_degrees,
            range: self.range,
            sample_step: self.sample_step,
            ..default()
        }
    }

    /// Без маршрута - стоим на точке спавна.
    pub fn patrol_mover(&self, spawn_position: Vec2) -> PatrolMover {
        let route = self
            .patrol_route
            .as_ref()
            .map(|route| route.to_route(spawn_position))
            .unwrap_or_default();

        let mut mover = PatrolMover::new(route, self.move_speed);
        mover.waypoint_tolerance = self.waypoint_tolerance;
        mover.waypoint_dwell = self.dwell_seconds;
        mover.roam_pause = self.roam_pause_seconds;
        mover
    }

    pub fn pursuit_agent(&self) -> PursuitAgent {
        PursuitAgent {
            chase_speed_multiplier: self.chase_speed_multiplier,
            lost_sight_delay: self.lost_sight_delay_seconds,
            return_tolerance: self.return_tolerance_units,
            ..default()
        }
    }

    pub fn sentry(&self) -> Sentry {
        let mut sentry = Sentry::new(self.rest_bearing_degrees);
        sentry.sweep_speed = self.sweep_speed;
        sentry.sweep_arc = self.sweep_arc_degrees;
        sentry.alert_hold_time = self.alert_hold_time_seconds;
        sentry.lost_sight_delay = self.lost_sight_delay_seconds;
        sentry.notify_radius = self.notify_radius;
        sentry
    }

    pub fn disruption(&self) -> Disruption {
        let mut disruption = Disruption::new(self.max_hit_points, self.freeze_hits_to_die);
        disruption.death_grace = self.death_grace_seconds;
        disruption
    }

    pub fn contact_damage(&self) -> ContactDamage {
        ContactDamage {
            damage: self.contact_damage,
            cooldown: self.contact_cooldown_seconds,
            radius: self.contact_radius,
            ..default()
        }
    }
}

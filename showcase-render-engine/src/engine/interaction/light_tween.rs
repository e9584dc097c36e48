use bevy::math::curve::{Curve, EaseFunction, EasingCurve};
use bevy::prelude::*;
use constants::pointer::LIGHT_TWEEN_SECONDS;

/// Smoothed move of a light toward the pointer-driven target.
#[derive(Component, Debug, Clone)]
pub struct LightTween {
    curve: EasingCurve<Vec3>,
    elapsed: f32,
    duration: f32,
    destination: Vec3,
}

impl LightTween {
    pub fn resting_at(position: Vec3) -> Self {
        Self {
            curve: EasingCurve::new(position, position, EaseFunction::QuadraticOut),
            elapsed: 0.0,
            duration: 0.0,
            destination: position,
        }
    }

    /// Restart from `current` toward `destination`.
    pub fn retarget(&mut self, current: Vec3, destination: Vec3) {
        self.curve = EasingCurve::new(current, destination, EaseFunction::QuadraticOut);
        self.elapsed = 0.0;
        self.duration = LIGHT_TWEEN_SECONDS;
        self.destination = destination;
    }

    pub fn destination(&self) -> Vec3 {
        self.destination
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt` seconds and return the position to apply.
    pub fn step(&mut self, dt: f32) -> Vec3 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        let t = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        self.curve.sample_clamped(t)
    }
}

pub fn advance_light_tweens(time: Res<Time>, mut lights: Query<(&mut LightTween, &mut Transform)>) {
    let dt = time.delta_secs();
    for (mut tween, mut transform) in &mut lights {
        if tween.is_finished() {
            continue;
        }
        transform.translation = tween.step(dt);
    }
}

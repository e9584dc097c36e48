use std::f32::consts::{FRAC_PI_2, PI, TAU};

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::controller::{DAMPING_FACTOR, PAN_SPEED, POLAR_EPSILON, ROTATE_SPEED, ZOOM_STEP};

use super::Viewports;

/// Which user gestures a viewport's orbit controller accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    /// Polar angle clamp `(min, max)` in radians from the +Y axis.
    pub polar_angle_lock: Option<(f32, f32)>,
    pub distance_limits: Option<(f32, f32)>,
}

impl ControllerConfig {
    /// Pointer drives the light only; the camera never moves.
    pub const LOCKED: Self = Self {
        enable_rotate: false,
        enable_zoom: false,
        enable_pan: false,
        polar_angle_lock: None,
        distance_limits: None,
    };

    /// Look around horizontally, camera pinned to the horizon plane.
    pub const HORIZONTAL_ORBIT: Self = Self {
        enable_rotate: true,
        enable_zoom: false,
        enable_pan: false,
        polar_angle_lock: Some((FRAC_PI_2, FRAC_PI_2)),
        distance_limits: None,
    };

    fn polar_range(&self) -> (f32, f32) {
        self.polar_angle_lock
            .unwrap_or((POLAR_EPSILON, PI - POLAR_EPSILON))
    }
}

/// Damped orbit camera around a target point.
///
/// Input accumulates into deltas; [`OrbitController::update`] applies a
/// `damping_factor` share of them each frame and decays the rest, so the
/// camera keeps gliding after the gesture ends.
#[derive(Component, Debug, Clone)]
pub struct OrbitController {
    pub config: ControllerConfig,
    pub target: Vec3,
    pub damping_factor: f32,
    radius: f32,
    /// Azimuth around +Y, measured from +Z toward +X.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
    delta_theta: f32,
    delta_phi: f32,
    zoom_scale: f32,
    pan_offset: Vec3,
}

impl OrbitController {
    pub fn new(config: ControllerConfig, eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length();
        let (theta, phi) = if radius > f32::EPSILON {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, FRAC_PI_2)
        };

        Self {
            config,
            target,
            damping_factor: DAMPING_FACTOR,
            radius,
            theta,
            phi,
            delta_theta: 0.0,
            delta_phi: 0.0,
            zoom_scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn polar_angle(&self) -> f32 {
        self.phi
    }

    pub fn azimuth(&self) -> f32 {
        self.theta
    }

    /// Drag by `delta` pixels on a surface `surface_height` pixels tall.
    pub fn rotate(&mut self, delta: Vec2, surface_height: f32) {
        if !self.config.enable_rotate || surface_height <= 0.0 {
            return;
        }
        self.delta_theta -= TAU * delta.x / surface_height * ROTATE_SPEED;
        self.delta_phi -= TAU * delta.y / surface_height * ROTATE_SPEED;
    }

    /// Positive `steps` zoom in.
    pub fn zoom(&mut self, steps: f32) {
        if !self.config.enable_zoom {
            return;
        }
        self.zoom_scale *= ZOOM_STEP.powf(steps);
    }

    /// Screen-space pan, in pixels.
    pub fn pan(&mut self, delta: Vec2, surface_height: f32, camera: &Transform) {
        if !self.config.enable_pan || surface_height <= 0.0 {
            return;
        }
        let scale = self.radius * PAN_SPEED / surface_height;
        self.pan_offset += (camera.left() * delta.x + camera.up() * delta.y) * scale;
    }

    /// Advance the damped state one frame and place the camera.
    pub fn update(&mut self, transform: &mut Transform) {
        let d = self.damping_factor.clamp(0.0, 1.0);

        self.theta += self.delta_theta * d;
        let (min_phi, max_phi) = self.config.polar_range();
        self.phi = (self.phi + self.delta_phi * d).clamp(min_phi, max_phi);

        self.radius *= 1.0 + (self.zoom_scale - 1.0) * d;
        if let Some((min, max)) = self.config.distance_limits {
            self.radius = self.radius.clamp(min, max);
        }

        self.target += self.pan_offset * d;

        self.delta_theta *= 1.0 - d;
        self.delta_phi *= 1.0 - d;
        self.zoom_scale = 1.0 + (self.zoom_scale - 1.0) * (1.0 - d);
        self.pan_offset *= 1.0 - d;

        let sin_phi = self.phi.sin();
        let offset = Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        );
        *transform = Transform::from_translation(self.target + offset).looking_at(self.target, Vec3::Y);
    }
}

/// Route drag and wheel gestures to the controller of the viewport whose
/// surface received them.
pub fn orbit_input(
    viewports: Res<Viewports>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut cursor_moved: EventReader<CursorMoved>,
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window>,
    mut controllers: Query<(&mut OrbitController, &Transform)>,
) {
    for cursor in cursor_moved.read() {
        let Some(delta) = cursor.delta else {
            continue;
        };
        let Some(viewport) = viewports.by_surface(cursor.window) else {
            continue;
        };
        let Ok(window) = windows.get(cursor.window) else {
            continue;
        };
        let Ok((mut controller, transform)) = controllers.get_mut(viewport.camera) else {
            continue;
        };

        if mouse_button.pressed(MouseButton::Left) {
            controller.rotate(delta, window.height());
        } else if mouse_button.pressed(MouseButton::Right) {
            controller.pan(delta, window.height(), transform);
        }
    }

    for ev in wheel.read() {
        let Some(viewport) = viewports.by_surface(ev.window) else {
            continue;
        };
        let Ok((mut controller, _)) = controllers.get_mut(viewport.camera) else {
            continue;
        };
        let steps = match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.01,
        };
        controller.zoom(steps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(controller: &mut OrbitController, frames: usize) -> Transform {
        let mut transform = Transform::default();
        for _ in 0..frames {
            controller.update(&mut transform);
        }
        transform
    }

    #[test]
    fn locked_controller_ignores_gestures() {
        let eye = Vec3::new(0.0, 1.0, 5.0);
        let mut controller = OrbitController::new(ControllerConfig::LOCKED, eye, Vec3::ZERO);
        controller.rotate(Vec2::new(300.0, 120.0), 600.0);
        controller.zoom(4.0);
        let transform = settle(&mut controller, 10);
        assert!(transform.translation.distance(eye) < 1e-4);
    }

    #[test]
    fn damping_glides_toward_the_full_rotation() {
        let mut controller = OrbitController::new(
            ControllerConfig::HORIZONTAL_ORBIT,
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
        );
        controller.rotate(Vec2::new(-150.0, 0.0), 600.0);

        let mut transform = Transform::default();
        controller.update(&mut transform);
        let first = controller.azimuth();
        let expected_total = TAU * 150.0 / 600.0;
        assert!((first - expected_total * DAMPING_FACTOR).abs() < 1e-5);

        settle(&mut controller, 400);
        assert!((controller.azimuth() - expected_total).abs() < 1e-3);
    }

    #[test]
    fn horizontal_lock_keeps_camera_on_the_horizon() {
        let mut controller = OrbitController::new(
            ControllerConfig::HORIZONTAL_ORBIT,
            Vec3::new(0.0, 2.0, 5.0),
            Vec3::ZERO,
        );
        controller.rotate(Vec2::new(40.0, 200.0), 600.0);
        let transform = settle(&mut controller, 60);
        assert!((controller.polar_angle() - FRAC_PI_2).abs() < 1e-6);
        assert!(transform.translation.y.abs() < 1e-4);
    }

    #[test]
    fn distance_is_clamped() {
        let config = ControllerConfig {
            enable_zoom: true,
            distance_limits: Some((4.5, 6.0)),
            ..ControllerConfig::LOCKED
        };
        let mut controller = OrbitController::new(config, Vec3::new(4.0, -2.5, 5.0), Vec3::ZERO);
        settle(&mut controller, 1);
        assert!((controller.radius() - 6.0).abs() < 1e-5);

        controller.zoom(200.0);
        settle(&mut controller, 300);
        assert!((controller.radius() - 4.5).abs() < 1e-5);
    }
}

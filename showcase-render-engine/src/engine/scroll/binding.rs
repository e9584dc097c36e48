use bevy::math::curve::{Curve, EaseFunction, EasingCurve};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::trigger::TriggerRegion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Which entity of a viewport a binding animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingSubject {
    Model,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingProperty {
    Position,
    /// Euler angle in radians, XYZ order.
    Rotation,
}

/// A single scalar field of a transform, e.g. the model's `position.x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingTarget {
    pub subject: BindingSubject,
    pub property: BindingProperty,
    pub axis: Axis,
}

/// Euler angles (XYZ order, radians) an animated entity's rotation is composed
/// from. Rotation bindings write here rather than decomposing the quaternion,
/// which would fold any angle past π/2 back into range.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct EulerRotation(pub Vec3);

impl EulerRotation {
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.0.x, self.0.y, self.0.z)
    }
}

impl BindingTarget {
    pub fn read(&self, transform: &Transform, euler: &EulerRotation) -> f32 {
        match self.property {
            BindingProperty::Position => pick(transform.translation, self.axis),
            BindingProperty::Rotation => pick(euler.0, self.axis),
        }
    }

    pub fn write(&self, transform: &mut Transform, euler: &mut EulerRotation, value: f32) {
        match self.property {
            BindingProperty::Position => {
                set(&mut transform.translation, self.axis, value);
            }
            BindingProperty::Rotation => {
                set(&mut euler.0, self.axis, value);
                transform.rotation = euler.quat();
            }
        }
    }
}

fn pick(v: Vec3, axis: Axis) -> f32 {
    match axis {
        Axis::X => v.x,
        Axis::Y => v.y,
        Axis::Z => v.z,
    }
}

fn set(v: &mut Vec3, axis: Axis, value: f32) {
    match axis {
        Axis::X => v.x = value,
        Axis::Y => v.y = value,
        Axis::Z => v.z = value,
    }
}

/// Easing names as written in page configs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    #[serde(rename = "none", alias = "linear")]
    Linear,
    #[serde(rename = "power1.in")]
    Power1In,
    #[serde(rename = "power1.out")]
    Power1Out,
    #[serde(rename = "power1.inOut")]
    Power1InOut,
    #[serde(rename = "power2.in")]
    Power2In,
    #[serde(rename = "power2.out")]
    Power2Out,
    #[serde(rename = "power2.inOut")]
    Power2InOut,
    #[serde(rename = "sine.inOut")]
    SineInOut,
}

impl Easing {
    pub fn function(self) -> EaseFunction {
        match self {
            Self::Linear => EaseFunction::Linear,
            Self::Power1In => EaseFunction::QuadraticIn,
            Self::Power1Out => EaseFunction::QuadraticOut,
            Self::Power1InOut => EaseFunction::QuadraticInOut,
            Self::Power2In => EaseFunction::CubicIn,
            Self::Power2Out => EaseFunction::CubicOut,
            Self::Power2InOut => EaseFunction::CubicInOut,
            Self::SineInOut => EaseFunction::SineInOut,
        }
    }
}

/// How tightly the animated value follows the scrollbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScrubRepr", into = "ScrubRepr")]
pub enum Scrub {
    /// Value is locked to scroll progress.
    #[default]
    Immediate,
    /// Value catches up with scroll progress over roughly this many seconds.
    Smoothed(f32),
}

impl Scrub {
    /// Move `current` progress toward `target` for a frame of `dt` seconds.
    /// Never overshoots, so a monotone scroll gives a monotone value.
    pub fn approach(self, current: f32, target: f32, dt: f32) -> f32 {
        match self {
            Self::Immediate => target,
            Self::Smoothed(seconds) if seconds <= 0.0 => target,
            Self::Smoothed(seconds) => {
                let k = 1.0 - (-3.0 * dt / seconds).exp();
                let next = current + (target - current) * k;
                if (target - next).abs() < 1.0e-4 {
                    target
                } else {
                    next
                }
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ScrubRepr {
    Flag(bool),
    Seconds(f32),
}

impl TryFrom<ScrubRepr> for Scrub {
    type Error = String;

    fn try_from(repr: ScrubRepr) -> Result<Self, Self::Error> {
        match repr {
            ScrubRepr::Flag(true) => Ok(Self::Immediate),
            ScrubRepr::Flag(false) => Err("scrub must be `true` or a number of seconds".into()),
            ScrubRepr::Seconds(s) if s < 0.0 => Err(format!("scrub seconds must be >= 0, got {s}")),
            ScrubRepr::Seconds(s) => Ok(Self::Smoothed(s)),
        }
    }
}

impl From<Scrub> for ScrubRepr {
    fn from(scrub: Scrub) -> Self {
        match scrub {
            Scrub::Immediate => Self::Flag(true),
            Scrub::Smoothed(s) => Self::Seconds(s),
        }
    }
}

/// Declarative scroll-linked interpolation of one transform field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollBinding {
    pub target: BindingTarget,
    pub trigger: TriggerRegion,
    /// Start value; when omitted the field's value at registration is used.
    #[serde(default)]
    pub from: Option<f32>,
    pub to: f32,
    #[serde(default)]
    pub ease: Easing,
    #[serde(default)]
    pub scrub: Scrub,
}

impl ScrollBinding {
    /// Interpolated value at `progress`, clamped to `[0, 1]`.
    pub fn sample(&self, from: f32, progress: f32) -> f32 {
        EasingCurve::new(from, self.to, self.ease.function()).sample_clamped(progress)
    }
}

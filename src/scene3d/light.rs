use glam::Vec3;

use crate::config::model::LightSettings;
use crate::foundation::core::RgbColor;

/// Omnidirectional light with a finite range.
#[derive(Clone, Debug)]
pub struct PointLight {
    pub color: RgbColor,
    pub intensity: f32,
    /// Range; zero means the light never falls off.
    pub distance: f32,
    pub decay: f32,
    pub position: Vec3,
}

impl PointLight {
    pub fn from_settings(s: &LightSettings) -> Self {
        Self {
            color: s.color,
            intensity: s.intensity as f32,
            distance: s.distance as f32,
            decay: 1.0,
            position: Vec3::new(
                s.position[0] as f32,
                s.position[1] as f32,
                s.position[2] as f32,
            ),
        }
    }

    /// Range falloff in `[0,1]` at distance `d` from the light.
    pub fn falloff(&self, d: f32) -> f32 {
        if self.distance > 0.0 {
            (1.0 - d / self.distance).clamp(0.0, 1.0).powf(self.decay)
        } else {
            1.0
        }
    }

    /// Lambert irradiance per color channel at `point` with surface normal `normal`.
    pub fn irradiance(&self, point: Vec3, normal: Vec3) -> Vec3 {
        let to_light = self.position - point;
        let d = to_light.length();
        if d <= f32::EPSILON {
            return Vec3::ZERO;
        }
        let ndl = normal.dot(to_light / d).max(0.0);
        Vec3::from(self.color.to_f32()) * (self.intensity * self.falloff(d) * ndl)
    }
}

use crate::animation::anim::Keyframes;
use crate::foundation::core::{Affine, RgbColor, Vec2};
use crate::foundation::error::{StoryError, StoryResult};
use crate::morph::path::parse_svg_path;

/// A pre-authored looping vector animation.
///
/// Frames are counted from `in_frame` (inclusive) to `out_frame` (exclusive) at `fps`.
/// Each layer is one filled shape with keyframed transform and opacity tracks; layers are
/// drawn in order, first at the back.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VectorAnimation {
    pub width: f64,
    pub height: f64,
    pub fps: f64,
    #[serde(default)]
    pub in_frame: f64,
    pub out_frame: f64,
    pub layers: Vec<VectorLayer>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VectorLayer {
    #[serde(default)]
    pub name: String,
    /// Shape in layer-local coordinates, SVG path syntax.
    pub d: String,
    pub fill: RgbColor,
    /// Pivot for rotation and scale, in layer-local coordinates.
    #[serde(default)]
    pub anchor: Vec2,
    #[serde(default = "zero_vec_track")]
    pub position: Keyframes<Vec2>,
    #[serde(default = "unit_vec_track")]
    pub scale: Keyframes<Vec2>,
    #[serde(default = "zero_track")]
    pub rotation_deg: Keyframes<f64>,
    #[serde(default = "one_track")]
    pub opacity: Keyframes<f64>,
}

fn zero_vec_track() -> Keyframes<Vec2> {
    Keyframes::constant(Vec2::ZERO)
}

fn unit_vec_track() -> Keyframes<Vec2> {
    Keyframes::constant(Vec2::new(1.0, 1.0))
}

fn zero_track() -> Keyframes<f64> {
    Keyframes::constant(0.0)
}

fn one_track() -> Keyframes<f64> {
    Keyframes::constant(1.0)
}

impl VectorAnimation {
    pub fn from_json_str(s: &str) -> StoryResult<Self> {
        let anim: Self = serde_json::from_str(s)
            .map_err(|e| StoryError::asset(format!("vector animation: {e}")))?;
        anim.validate()?;
        Ok(anim)
    }

    pub fn validate(&self) -> StoryResult<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(StoryError::asset("vector animation size must be > 0"));
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(StoryError::asset("vector animation fps must be > 0"));
        }
        if !(self.in_frame.is_finite() && self.out_frame.is_finite())
            || self.out_frame <= self.in_frame
        {
            return Err(StoryError::asset(
                "vector animation out_frame must be greater than in_frame",
            ));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            let ctx = |e: StoryError| e.context(format_args!("layer {i} '{}'", layer.name));
            parse_svg_path(&layer.d).map_err(ctx)?;
            layer.position.validate().map_err(ctx)?;
            layer.scale.validate().map_err(ctx)?;
            layer.rotation_deg.validate().map_err(ctx)?;
            layer.opacity.validate().map_err(ctx)?;
        }
        Ok(())
    }

    pub fn duration_frames(&self) -> f64 {
        self.out_frame - self.in_frame
    }
}

impl VectorLayer {
    /// Layer-to-animation transform at `frame`:
    /// `T(position) * R(rotation) * S(scale) * T(-anchor)`.
    pub fn transform_at(&self, frame: f64) -> StoryResult<Affine> {
        let position = self.position.sample(frame)?;
        let scale = self.scale.sample(frame)?;
        let rotation = self.rotation_deg.sample(frame)?.to_radians();
        Ok(Affine::translate(position)
            * Affine::rotate(rotation)
            * Affine::scale_non_uniform(scale.x, scale.y)
            * Affine::translate(-self.anchor))
    }

    pub fn opacity_at(&self, frame: f64) -> StoryResult<f64> {
        Ok(self.opacity.sample(frame)?.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vector/model.rs"]
mod tests;

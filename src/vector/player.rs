use crate::foundation::core::{Affine, BezPath, RgbColor, Vec2};
use crate::foundation::error::StoryResult;
use crate::morph::path::parse_svg_path;
use crate::vector::model::VectorAnimation;

/// One shape of a sampled animation frame, already placed in box coordinates.
#[derive(Clone, Debug)]
pub struct SampledShape {
    pub path: BezPath,
    pub transform: Affine,
    pub fill: RgbColor,
    pub opacity: f64,
}

/// Autoplaying, infinitely looping player that fits an animation into a square box.
///
/// Playback is a function of wall-clock time since the player started; scroll position has no
/// influence.
#[derive(Clone, Debug)]
pub struct LoopedPlayer {
    anim: VectorAnimation,
    paths: Vec<BezPath>,
    box_size: f64,
    started_at: f64,
    now_s: f64,
}

impl LoopedPlayer {
    pub fn new(anim: VectorAnimation, box_size: f64, started_at: f64) -> StoryResult<Self> {
        anim.validate()?;
        let paths = anim
            .layers
            .iter()
            .map(|l| parse_svg_path(&l.d))
            .collect::<StoryResult<Vec<_>>>()?;
        Ok(Self {
            anim,
            paths,
            box_size,
            started_at,
            now_s: started_at,
        })
    }

    pub fn box_size(&self) -> f64 {
        self.box_size
    }

    /// Advance the playhead to host time `now_s`.
    pub fn tick(&mut self, now_s: f64) {
        self.now_s = now_s;
    }

    /// Animation frame shown at host time `now_s`, wrapped into `[in_frame, out_frame)`.
    pub fn frame_at(&self, now_s: f64) -> f64 {
        let elapsed = (now_s - self.started_at).max(0.0);
        let span = self.anim.duration_frames();
        self.anim.in_frame + (elapsed * self.anim.fps).rem_euclid(span)
    }

    pub fn current_frame(&self) -> f64 {
        self.frame_at(self.now_s)
    }

    /// Uniform fit of the animation canvas into the box, centered.
    pub fn fit_transform(&self) -> Affine {
        let s = (self.box_size / self.anim.width).min(self.box_size / self.anim.height);
        let dx = (self.box_size - self.anim.width * s) * 0.5;
        let dy = (self.box_size - self.anim.height * s) * 0.5;
        Affine::translate(Vec2::new(dx, dy)) * Affine::scale(s)
    }

    pub fn sample(&self, frame: f64) -> StoryResult<Vec<SampledShape>> {
        let fit = self.fit_transform();
        self.anim
            .layers
            .iter()
            .zip(&self.paths)
            .map(|(layer, path)| {
                Ok(SampledShape {
                    path: path.clone(),
                    transform: fit * layer.transform_at(frame)?,
                    fill: layer.fill,
                    opacity: layer.opacity_at(frame)?,
                })
            })
            .collect()
    }

    pub fn current_shapes(&self) -> StoryResult<Vec<SampledShape>> {
        self.sample(self.current_frame())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/vector/player.rs"]
mod tests;

use crate::{
    animation::ease::Ease,
    foundation::core::{Rgba8Premul, Vec2},
    foundation::error::{StoryError, StoryResult},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Rgba8Premul {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// Keyframed property track sampled at fractional frames.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    pub keys: Vec<Keyframe<T>>, // sorted by frame
    #[serde(default = "InterpMode::linear")]
    pub mode: InterpMode,
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    pub fn constant(value: T) -> Self {
        Self {
            keys: vec![Keyframe {
                frame: 0.0,
                value,
                ease: Ease::Linear,
            }],
            mode: InterpMode::Hold,
        }
    }

    pub fn validate(&self) -> StoryResult<()> {
        if self.keys.is_empty() {
            return Err(StoryError::animation("Keyframes must have at least one key"));
        }
        if self.keys.iter().any(|k| !k.frame.is_finite()) {
            return Err(StoryError::animation("Keyframes frames must be finite"));
        }
        if !self.keys.windows(2).all(|w| w[0].frame <= w[1].frame) {
            return Err(StoryError::animation("Keyframes keys must be sorted by frame"));
        }
        Ok(())
    }

    pub fn sample(&self, frame: f64) -> StoryResult<T> {
        let Some(first) = self.keys.first() else {
            return Err(StoryError::animation("Keyframes has no keys"));
        };

        let idx = self.keys.partition_point(|k| k.frame <= frame);
        if idx == 0 {
            return Ok(first.value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.frame - a.frame;
        if denom <= 0.0 {
            return Ok(a.value.clone());
        }

        let t = (frame - a.frame) / denom;
        let te = a.ease.apply(t);
        match self.mode {
            InterpMode::Hold => Ok(a.value.clone()),
            InterpMode::Linear => Ok(T::lerp(&a.value, &b.value, te)),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    pub frame: f64,
    pub value: T,
    #[serde(default = "linear_ease")]
    pub ease: Ease, // ease applied toward next key
}

fn linear_ease() -> Ease {
    Ease::Linear
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpMode {
    Hold,
    Linear,
}

impl InterpMode {
    fn linear() -> Self {
        Self::Linear
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;

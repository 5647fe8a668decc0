use crate::foundation::error::{StoryError, StoryResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Size of the host viewport in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> StoryResult<Self> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(StoryError::validation(format!(
                "viewport must be finite and non-negative, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Width over height; a zero height yields 1.0 so projection stays finite.
    pub fn aspect(self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Pixel dimensions of a surface covering the viewport.
    pub fn pixel_size(self) -> (u32, u32) {
        (
            self.width.round().max(0.0) as u32,
            self.height.round().max(0.0) as u32,
        )
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }
}

/// Opaque sRGB color written as `#rrggbb` in config and asset files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub fn to_premul(self, alpha: f32) -> Rgba8Premul {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, a)
    }

    /// Channels as linear-ish floats in `[0,1]`.
    pub fn to_f32(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl std::str::FromStr for RgbColor {
    type Err = StoryError;

    fn from_str(s: &str) -> StoryResult<Self> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| StoryError::validation(format!("color '{s}' must start with '#'")))?;
        if hex.len() != 6 {
            return Err(StoryError::validation(format!(
                "color '{s}' must have six hex digits"
            )));
        }
        let v = u32::from_str_radix(hex, 16)
            .map_err(|e| StoryError::validation(format!("color '{s}': {e}")))?;
        Ok(Self::from_hex(v))
    }
}

impl TryFrom<String> for RgbColor {
    type Error = StoryError;

    fn try_from(s: String) -> StoryResult<Self> {
        s.parse()
    }
}

impl From<RgbColor> for String {
    fn from(c: RgbColor) -> Self {
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

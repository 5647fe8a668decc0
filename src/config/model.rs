use std::path::Path;

use crate::animation::ease::Ease;
use crate::foundation::core::RgbColor;
use crate::foundation::error::{StoryError, StoryResult};
use crate::scroll::trigger::TriggerPosition;

/// Everything that shapes the story view apart from the two static assets and the viewport.
///
/// `StoryConfig::default()` reproduces the shipped page: four sections, fade-ins at
/// `"top 80%"`, a morph scrubbed from `"top center"`, and the teal torus knot background.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoryConfig {
    /// Horizontally laid-out sections, left to right.
    pub sections: Vec<SectionSpec>,
    /// Page offset of the story container's top edge, in pixels.
    pub offset_top: f64,
    pub horizontal: HorizontalSettings,
    pub fade: FadeSettings,
    pub morph: MorphSettings,
    pub vector: VectorSettings,
    pub scene: SceneSettings,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionSpec {
    pub title: String,
    pub body: String,
    pub background: RgbColor,
    /// The morphing SVG lives in this section.
    #[serde(default)]
    pub morph: bool,
    /// The looped vector animation lives in this section.
    #[serde(default)]
    pub vector: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HorizontalSettings {
    /// Seconds the displayed strip position takes to catch up with the scroll position.
    pub scrub_lag_s: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FadeSettings {
    pub start: String,
    pub from_opacity: f64,
    pub from_y: f64,
    pub duration_s: f64,
    pub ease: Ease,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MorphSettings {
    pub start: String,
    /// Defaults to `"bottom top"` when absent.
    pub end: Option<String>,
    pub ease: Ease,
    pub fill: RgbColor,
    /// On-page size of the square SVG box, in pixels.
    pub box_size: f64,
    /// Side of the square view box the path coordinates live in.
    pub view_box: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VectorSettings {
    /// On-page size of the square box the animation is fitted into, in pixels.
    pub box_size: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneSettings {
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    pub camera_z: f64,
    pub knot: KnotSettings,
    pub color: RgbColor,
    pub light: LightSettings,
    /// Radians added to the mesh's x and y rotation every frame.
    pub rotation_step: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KnotSettings {
    pub radius: f64,
    pub tube: f64,
    pub tubular_segments: u32,
    pub radial_segments: u32,
    pub p: u32,
    pub q: u32,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightSettings {
    pub color: RgbColor,
    pub intensity: f64,
    /// Range of the light; zero means unlimited.
    pub distance: f64,
    pub position: [f64; 3],
}

impl Default for StoryConfig {
    fn default() -> Self {
        fn section(title: &str, body: &str, bg: u32) -> SectionSpec {
            SectionSpec {
                title: title.to_string(),
                body: body.to_string(),
                background: RgbColor::from_hex(bg),
                morph: false,
                vector: false,
            }
        }

        let mut first = section(
            "Gene Editing",
            "CRISPR-based precision editing to correct genetic defects at their root cause.",
            0x000000,
        );
        first.morph = true;
        first.vector = true;

        Self {
            sections: vec![
                first,
                section(
                    "Precision Medicine",
                    "Personalized therapies tailored to your genetic profile.",
                    0x14532d,
                ),
                section(
                    "Bioinformatics",
                    "Big data meets biology, making sense of genomic data like never before.",
                    0x1e3a8a,
                ),
                section(
                    "Future of Life",
                    "Innovating at the intersection of life science, tech, and AI.",
                    0x581c87,
                ),
            ],
            offset_top: 0.0,
            horizontal: HorizontalSettings::default(),
            fade: FadeSettings::default(),
            morph: MorphSettings::default(),
            vector: VectorSettings::default(),
            scene: SceneSettings::default(),
        }
    }
}

impl Default for HorizontalSettings {
    fn default() -> Self {
        Self { scrub_lag_s: 1.0 }
    }
}

impl Default for FadeSettings {
    fn default() -> Self {
        Self {
            start: "top 80%".to_string(),
            from_opacity: 0.0,
            from_y: 50.0,
            duration_s: 1.2,
            ease: Ease::OutQuad,
        }
    }
}

impl Default for MorphSettings {
    fn default() -> Self {
        Self {
            start: "top center".to_string(),
            end: None,
            ease: Ease::InOutCubic,
            fill: RgbColor::from_hex(0x00ffff),
            box_size: 200.0,
            view_box: 100.0,
        }
    }
}

impl Default for VectorSettings {
    fn default() -> Self {
        Self { box_size: 200.0 }
    }
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_z: 10.0,
            knot: KnotSettings::default(),
            color: RgbColor::from_hex(0x00ffcc),
            light: LightSettings::default(),
            rotation_step: 0.01,
        }
    }
}

impl Default for KnotSettings {
    fn default() -> Self {
        Self {
            radius: 2.0,
            tube: 0.5,
            tubular_segments: 100,
            radial_segments: 16,
            p: 2,
            q: 3,
        }
    }
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            color: RgbColor::from_hex(0xffffff),
            intensity: 1.0,
            distance: 100.0,
            position: [10.0, 10.0, 10.0],
        }
    }
}

impl StoryConfig {
    pub fn from_json_str(s: &str) -> StoryResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| StoryError::serde(format!("story config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> StoryResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            StoryError::validation(format!("failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> StoryResult<()> {
        fn positive(name: &str, v: f64) -> StoryResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(StoryError::validation(format!("{name} must be > 0, got {v}")))
            }
        }
        fn non_negative(name: &str, v: f64) -> StoryResult<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(StoryError::validation(format!("{name} must be >= 0, got {v}")))
            }
        }

        if self.sections.iter().filter(|s| s.morph).count() > 1 {
            return Err(StoryError::validation("at most one section can host the morph svg"));
        }
        if self.sections.iter().filter(|s| s.vector).count() > 1 {
            return Err(StoryError::validation("at most one section can host the vector animation"));
        }
        non_negative("offset_top", self.offset_top)?;
        non_negative("horizontal.scrub_lag_s", self.horizontal.scrub_lag_s)?;

        TriggerPosition::parse(&self.fade.start)?;
        non_negative("fade.duration_s", self.fade.duration_s)?;
        if !self.fade.from_opacity.is_finite() || !self.fade.from_y.is_finite() {
            return Err(StoryError::validation("fade from values must be finite"));
        }

        if matches!(TriggerPosition::parse(&self.morph.start)?, TriggerPosition::Relative(_)) {
            return Err(StoryError::validation("morph.start cannot be relative"));
        }
        if let Some(end) = &self.morph.end {
            TriggerPosition::parse(end)?;
        }
        positive("morph.box_size", self.morph.box_size)?;
        positive("morph.view_box", self.morph.view_box)?;
        positive("vector.box_size", self.vector.box_size)?;

        let sc = &self.scene;
        if !(sc.fov_deg > 0.0 && sc.fov_deg < 180.0) {
            return Err(StoryError::validation(format!(
                "scene.fov_deg must be in (0, 180), got {}",
                sc.fov_deg
            )));
        }
        positive("scene.near", sc.near)?;
        if !(sc.far.is_finite() && sc.far > sc.near) {
            return Err(StoryError::validation("scene.far must be greater than scene.near"));
        }
        positive("scene.camera_z", sc.camera_z)?;
        positive("scene.knot.radius", sc.knot.radius)?;
        positive("scene.knot.tube", sc.knot.tube)?;
        if sc.knot.tubular_segments < 3 || sc.knot.radial_segments < 3 {
            return Err(StoryError::validation("scene.knot segment counts must be >= 3"));
        }
        if sc.knot.p == 0 || sc.knot.q == 0 {
            return Err(StoryError::validation("scene.knot p and q must be >= 1"));
        }
        non_negative("scene.light.intensity", sc.light.intensity)?;
        non_negative("scene.light.distance", sc.light.distance)?;
        if !sc.rotation_step.is_finite() {
            return Err(StoryError::validation("scene.rotation_step must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;

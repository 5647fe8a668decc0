use std::path::Path;
use std::sync::Arc;

use crate::foundation::error::{StoryError, StoryResult};
use crate::morph::path::parse_svg_path;
use crate::vector::model::VectorAnimation;

pub const VECTOR_FILE: &str = "dna_helix.json";
pub const MORPH_FILE: &str = "morph_path.json";
pub const FONT_REGULAR_FILE: &str = "fonts/DejaVuSans.ttf";
pub const FONT_BOLD_FILE: &str = "fonts/DejaVuSans-Bold.ttf";

const BUILTIN_VECTOR: &str = include_str!("../../assets/dna_helix.json");
const BUILTIN_MORPH: &str = include_str!("../../assets/morph_path.json");
const BUILTIN_FONT_REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const BUILTIN_FONT_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// The two outlines the morph interpolates between, as SVG `d` strings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MorphPaths {
    pub path1: String,
    pub path2: String,
}

impl MorphPaths {
    pub fn from_json_str(s: &str) -> StoryResult<Self> {
        let paths: Self =
            serde_json::from_str(s).map_err(|e| StoryError::asset(format!("morph paths: {e}")))?;
        paths.validate()?;
        Ok(paths)
    }

    pub fn validate(&self) -> StoryResult<()> {
        parse_svg_path(&self.path1).map_err(|e| e.context("morph path1"))?;
        parse_svg_path(&self.path2).map_err(|e| e.context("morph path2"))?;
        Ok(())
    }
}

/// Font faces for story text: bold for titles, regular for body copy.
#[derive(Clone)]
pub struct StoryFonts {
    pub regular: Arc<Vec<u8>>,
    pub bold: Arc<Vec<u8>>,
}

impl StoryFonts {
    pub fn builtin() -> Self {
        Self {
            regular: Arc::new(BUILTIN_FONT_REGULAR.to_vec()),
            bold: Arc::new(BUILTIN_FONT_BOLD.to_vec()),
        }
    }
}

impl std::fmt::Debug for StoryFonts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryFonts")
            .field("regular_bytes", &self.regular.len())
            .field("bold_bytes", &self.bold.len())
            .finish()
    }
}

/// Validated assets the story view needs before it can mount.
#[derive(Clone, Debug)]
pub struct StoryAssets {
    pub vector: VectorAnimation,
    pub morph: MorphPaths,
    pub fonts: StoryFonts,
}

impl StoryAssets {
    pub fn from_json_strs(vector_json: &str, morph_json: &str) -> StoryResult<Self> {
        Ok(Self {
            vector: VectorAnimation::from_json_str(vector_json)?,
            morph: MorphPaths::from_json_str(morph_json)?,
            fonts: StoryFonts::builtin(),
        })
    }

    /// Assets compiled into the crate.
    pub fn builtin() -> StoryResult<Self> {
        Self::from_json_strs(BUILTIN_VECTOR, BUILTIN_MORPH)
    }

    /// Load `dna_helix.json` and `morph_path.json` from `dir`.
    ///
    /// Fonts come from `dir/fonts/` when the regular face is there, otherwise the bundled
    /// faces are used.
    pub fn from_dir(dir: impl AsRef<Path>) -> StoryResult<Self> {
        let dir = dir.as_ref();
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path)
                .map_err(|e| StoryError::asset(format!("read {}: {e}", path.display())))
        };
        let mut assets = Self::from_json_strs(&read(VECTOR_FILE)?, &read(MORPH_FILE)?)?;

        let custom_fonts = dir.join(FONT_REGULAR_FILE).is_file();
        if custom_fonts {
            let read_bytes = |name: &str| {
                let path = dir.join(name);
                std::fs::read(&path)
                    .map(Arc::new)
                    .map_err(|e| StoryError::asset(format!("read {}: {e}", path.display())))
            };
            assets.fonts = StoryFonts {
                regular: read_bytes(FONT_REGULAR_FILE)?,
                bold: read_bytes(FONT_BOLD_FILE)?,
            };
        }
        tracing::debug!(
            dir = %dir.display(),
            layers = assets.vector.layers.len(),
            custom_fonts,
            "loaded story assets"
        );
        Ok(assets)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;

/// Easing curves used by tweens, keyframes and scrubbed morphs.
///
/// Names follow the usual web animation vocabulary: `power1` is quadratic and `power2` is
/// cubic, so `power1.out` is [`Ease::OutQuad`] and `power2.inOut` is [`Ease::InOutCubic`].
/// Both spellings deserialize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    #[serde(alias = "none", alias = "linear")]
    Linear,
    #[serde(alias = "power1.in")]
    InQuad,
    /// Default ease for time-based tweens.
    #[default]
    #[serde(alias = "power1.out")]
    OutQuad,
    #[serde(alias = "power1.inOut")]
    InOutQuad,
    #[serde(alias = "power2.in")]
    InCubic,
    #[serde(alias = "power2.out")]
    OutCubic,
    #[serde(alias = "power2.inOut")]
    InOutCubic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;

use crate::animation::{anim::Lerp, tween::Tween};
use crate::config::model::FadeSettings;
use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::StoryResult;
use crate::scroll::trigger::{ScrollTrigger, TriggerPosition};

/// Visible entrance state of one element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FadeState {
    pub opacity: f64,
    /// Vertical offset in pixels, positive is below the resting position.
    pub y: f64,
}

impl Lerp for FadeState {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            opacity: f64::lerp(&a.opacity, &b.opacity, t),
            y: f64::lerp(&a.y, &b.y, t),
        }
    }
}

/// One-shot entrance animation bound to an element's own scroll trigger.
#[derive(Clone, Debug)]
pub struct FadeIn {
    trigger: ScrollTrigger,
    tween: Tween<FadeState>,
}

impl FadeIn {
    pub fn new(element: Rect, viewport: Viewport, settings: &FadeSettings) -> StoryResult<Self> {
        let trigger = ScrollTrigger::resolve(
            element,
            viewport,
            TriggerPosition::parse(&settings.start)?,
            TriggerPosition::DEFAULT_END,
        )?;
        let tween = Tween::new(
            FadeState {
                opacity: settings.from_opacity,
                y: settings.from_y,
            },
            FadeState { opacity: 1.0, y: 0.0 },
            settings.duration_s,
            settings.ease,
        );
        Ok(Self { trigger, tween })
    }

    pub fn trigger(&self) -> ScrollTrigger {
        self.trigger
    }

    /// Fire once the scroll position reaches the trigger start. Returns `true` on the call
    /// that fires; later calls, including after scrolling back, never replay.
    pub fn on_scroll(&mut self, scroll_y: f64, now_s: f64) -> bool {
        if self.tween.is_started() || !self.trigger.is_past_start(scroll_y) {
            return false;
        }
        self.tween.start(now_s)
    }

    pub fn has_fired(&self) -> bool {
        self.tween.is_started()
    }

    pub fn is_complete(&self, now_s: f64) -> bool {
        self.tween.is_complete(now_s)
    }

    pub fn state(&self, now_s: f64) -> FadeState {
        self.tween.sample(now_s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/fade.rs"]
mod tests;

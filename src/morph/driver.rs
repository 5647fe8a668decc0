use crate::animation::ease::Ease;
use crate::config::model::MorphSettings;
use crate::foundation::core::{BezPath, Rect, Viewport};
use crate::foundation::error::StoryResult;
use crate::morph::path::PathMorph;
use crate::scroll::trigger::{ScrollTrigger, TriggerPosition};

/// Binds a [`PathMorph`] to the scroll span of its own SVG box.
///
/// Progress is a pure function of the scroll offset: scrolling back replays the morph in
/// reverse and returning to the start restores the original `d` string.
#[derive(Clone, Debug)]
pub struct MorphDriver {
    morph: PathMorph,
    trigger: ScrollTrigger,
    ease: Ease,
    progress: f64,
}

impl MorphDriver {
    pub fn new(
        morph: PathMorph,
        svg_box: Rect,
        viewport: Viewport,
        settings: &MorphSettings,
    ) -> StoryResult<Self> {
        let end = match &settings.end {
            Some(end) => TriggerPosition::parse(end)?,
            None => TriggerPosition::DEFAULT_END,
        };
        let start = TriggerPosition::parse(&settings.start)?;
        let trigger = ScrollTrigger::resolve(svg_box, viewport, start, end)?;
        Ok(Self {
            morph,
            trigger,
            ease: settings.ease,
            progress: 0.0,
        })
    }

    pub fn trigger(&self) -> ScrollTrigger {
        self.trigger
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.progress = self.trigger.progress(scroll_y);
    }

    /// Linear scroll progress through the trigger span.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn eased_progress(&self) -> f64 {
        self.ease.apply(self.progress)
    }

    pub fn current_d(&self) -> String {
        self.morph.d_at(self.eased_progress())
    }

    pub fn current_path(&self) -> BezPath {
        self.morph.path_at(self.eased_progress())
    }
}

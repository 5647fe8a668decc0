use crate::animation::tween::ScrubSmoother;
use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::{StoryError, StoryResult};
use crate::scroll::trigger::{Edge, ScrollTrigger, TriggerPosition};

/// Pinned, scrubbed timeline that turns vertical scroll into horizontal travel of a strip
/// of `n` full-width sections.
///
/// Progress `p` moves every section by `-100 * (n-1) * p` percent of its own width and the
/// consumed scroll distance equals the container's offset width. With fewer than two sections
/// the strip is static: no pin, no travel and no snapping.
#[derive(Clone, Debug)]
pub struct HorizontalScroll {
    sections: usize,
    distance_px: f64,
    trigger: ScrollTrigger,
    smoother: ScrubSmoother,
}

impl HorizontalScroll {
    /// Measure a strip of `sections` inside `container` (page coordinates).
    ///
    /// `container_offset_width` is the container's measured pixel width; it becomes the
    /// scroll distance consumed while pinned.
    pub fn new(
        sections: usize,
        container: Rect,
        container_offset_width: f64,
        viewport: Viewport,
        scrub_lag_s: f64,
    ) -> StoryResult<Self> {
        if !container_offset_width.is_finite() || container_offset_width < 0.0 {
            return Err(StoryError::validation(format!(
                "container offset width must be finite and non-negative, got {container_offset_width}"
            )));
        }
        let distance_px = if sections > 1 {
            container_offset_width
        } else {
            0.0
        };
        let trigger = ScrollTrigger::resolve(
            container,
            viewport,
            TriggerPosition::edges(Edge::Top, Edge::Top),
            TriggerPosition::Relative(distance_px),
        )?;
        Ok(Self {
            sections,
            distance_px,
            trigger,
            smoother: ScrubSmoother::new(scrub_lag_s),
        })
    }

    pub fn sections(&self) -> usize {
        self.sections
    }

    pub fn is_static(&self) -> bool {
        self.sections <= 1
    }

    /// Total horizontal travel in percent of one section's width.
    pub fn travel_percent(&self) -> f64 {
        if self.is_static() {
            0.0
        } else {
            100.0 * (self.sections - 1) as f64
        }
    }

    /// Snap granularity as a fraction of progress, `None` for a static strip.
    pub fn snap_interval(&self) -> Option<f64> {
        if self.is_static() {
            None
        } else {
            Some(1.0 / (self.sections - 1) as f64)
        }
    }

    /// Vertical scroll distance consumed while the container is pinned.
    pub fn scroll_distance(&self) -> f64 {
        self.distance_px
    }

    pub fn trigger(&self) -> ScrollTrigger {
        self.trigger
    }

    pub fn x_percent(&self, progress: f64) -> f64 {
        -self.travel_percent() * progress.clamp(0.0, 1.0)
    }

    /// Nearest snap point to `progress`; identity for a static strip.
    pub fn snap(&self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        match self.snap_interval() {
            Some(step) => ((p / step).round() * step).clamp(0.0, 1.0),
            None => p,
        }
    }

    pub fn x_percent_snapped(&self, progress: f64) -> f64 {
        self.x_percent(self.snap(progress))
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        let p = if self.is_static() {
            0.0
        } else {
            self.trigger.progress(scroll_y)
        };
        self.smoother.set_target(p);
    }

    /// Jump straight to the progress for `scroll_y`, skipping the scrub lag.
    pub fn settle_at(&mut self, scroll_y: f64) {
        self.on_scroll(scroll_y);
        let target = self.smoother.target();
        self.smoother.jump(target);
    }

    pub fn tick(&mut self, dt_s: f64) {
        self.smoother.advance(dt_s);
    }

    /// Progress currently on screen (lags the scroll position while scrubbing).
    pub fn displayed_progress(&self) -> f64 {
        self.smoother.current()
    }

    pub fn scroll_progress(&self) -> f64 {
        self.smoother.target()
    }

    pub fn current_x_percent(&self) -> f64 {
        self.x_percent(self.displayed_progress())
    }

    /// Page offset to scroll to once scrolling settles at `scroll_y`, if snapping applies.
    pub fn snap_scroll_target(&self, scroll_y: f64) -> Option<f64> {
        if self.is_static() || scroll_y <= self.trigger.start || scroll_y >= self.trigger.end {
            return None;
        }
        let target = self.trigger.scroll_for(self.snap(self.trigger.progress(scroll_y)));
        ((target - scroll_y).abs() > f64::EPSILON).then_some(target)
    }

    /// How far the pinned container has been held in place at `scroll_y`.
    pub fn pin_offset(&self, scroll_y: f64) -> f64 {
        (scroll_y - self.trigger.start).clamp(0.0, self.distance_px)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/horizontal.rs"]
mod tests;

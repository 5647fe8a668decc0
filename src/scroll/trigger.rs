use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::{StoryError, StoryResult};

/// A position along one axis of a box: an edge keyword, a percentage or a pixel offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
    Percent(f64),
    Pixels(f64),
}

impl Edge {
    fn parse(token: &str) -> StoryResult<Self> {
        let t = token.trim();
        match t {
            "top" => return Ok(Self::Top),
            "center" => return Ok(Self::Center),
            "bottom" => return Ok(Self::Bottom),
            _ => {}
        }
        let number = |s: &str| {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| StoryError::validation(format!("invalid trigger edge '{token}'")))
        };
        if let Some(p) = t.strip_suffix('%') {
            return Ok(Self::Percent(number(p)?));
        }
        if let Some(px) = t.strip_suffix("px") {
            return Ok(Self::Pixels(number(px)?));
        }
        Ok(Self::Pixels(number(t)?))
    }

    /// Offset of this edge from the top of a box of height `size`.
    pub fn offset_in(self, size: f64) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => size * 0.5,
            Self::Bottom => size,
            Self::Percent(p) => size * p / 100.0,
            Self::Pixels(px) => px,
        }
    }
}

/// Where a trigger starts or ends.
///
/// `"top 80%"` reads "when the element's top meets the point 80% down the viewport";
/// `"+=1000"` is relative to the resolved start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerPosition {
    Edges { element: Edge, viewport: Edge },
    Relative(f64),
}

impl TriggerPosition {
    pub const fn edges(element: Edge, viewport: Edge) -> Self {
        Self::Edges { element, viewport }
    }

    /// Default end for triggers that do not name one: element bottom meets viewport top.
    pub const DEFAULT_END: Self = Self::edges(Edge::Bottom, Edge::Top);

    pub fn parse(s: &str) -> StoryResult<Self> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix("+=") {
            let px = rest
                .trim()
                .trim_end_matches("px")
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .ok_or_else(|| {
                    StoryError::validation(format!("invalid relative trigger position '{s}'"))
                })?;
            return Ok(Self::Relative(px));
        }
        let mut parts = s.split_whitespace();
        let (Some(el), Some(vp), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(StoryError::validation(format!(
                "trigger position '{s}' must be '<element> <viewport>' or '+=<px>'"
            )));
        };
        Ok(Self::edges(Edge::parse(el)?, Edge::parse(vp)?))
    }
}

/// A trigger resolved to page scroll offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTrigger {
    pub start: f64,
    pub end: f64,
}

impl ScrollTrigger {
    /// Resolve `start`/`end` against an element box given in page coordinates.
    pub fn resolve(
        element: Rect,
        viewport: Viewport,
        start: TriggerPosition,
        end: TriggerPosition,
    ) -> StoryResult<Self> {
        let start = match start {
            TriggerPosition::Edges { element: e, viewport: v } => {
                element.y0 + e.offset_in(element.height()) - v.offset_in(viewport.height)
            }
            TriggerPosition::Relative(_) => {
                return Err(StoryError::validation("trigger start cannot be relative"));
            }
        };
        let end = match end {
            TriggerPosition::Edges { element: e, viewport: v } => {
                element.y0 + e.offset_in(element.height()) - v.offset_in(viewport.height)
            }
            TriggerPosition::Relative(px) => start + px,
        };
        Ok(Self { start, end })
    }

    pub fn span(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    pub fn is_past_start(&self, scroll_y: f64) -> bool {
        scroll_y >= self.start
    }

    /// Scroll progress through the trigger, clamped to `[0,1]`.
    pub fn progress(&self, scroll_y: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return if self.is_past_start(scroll_y) { 1.0 } else { 0.0 };
        }
        ((scroll_y - self.start) / span).clamp(0.0, 1.0)
    }

    /// Scroll offset that corresponds to `progress`.
    pub fn scroll_for(&self, progress: f64) -> f64 {
        self.start + self.span() * progress.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/trigger.rs"]
mod tests;

use kurbo::{CubicBez, ParamCurve, PathEl, Point};

use crate::foundation::core::BezPath;
use crate::foundation::error::{StoryError, StoryResult};

pub(crate) fn parse_svg_path(d: &str) -> StoryResult<BezPath> {
    let trimmed = d.trim();
    if trimmed.is_empty() {
        return Err(StoryError::asset("svg path 'd' is empty"));
    }
    BezPath::from_svg(trimmed).map_err(|e| StoryError::asset(format!("invalid svg path 'd': {e}")))
}

/// Interpolates the geometry of one SVG path toward another.
///
/// Paths with the same command structure interpolate point by point. Anything else is
/// normalized to cubic subpaths with matching segment counts first. The endpoints return the
/// original `d` strings untouched, so scrubbing out and back restores the exact source text.
#[derive(Clone, Debug)]
pub struct PathMorph {
    from_d: String,
    to_d: String,
    plan: MorphPlan,
}

#[derive(Clone, Debug)]
enum MorphPlan {
    Elementwise { from: Vec<PathEl>, to: Vec<PathEl> },
    Cubic { from: Vec<CubicSubpath>, to: Vec<CubicSubpath> },
}

#[derive(Clone, Debug, PartialEq)]
struct CubicSubpath {
    start: Point,
    segments: Vec<CubicBez>,
    closed: bool,
}

impl PathMorph {
    pub fn new(from_d: &str, to_d: &str) -> StoryResult<Self> {
        let from = parse_svg_path(from_d)?;
        let to = parse_svg_path(to_d)?;

        let plan = if same_structure(from.elements(), to.elements()) {
            MorphPlan::Elementwise {
                from: from.elements().to_vec(),
                to: to.elements().to_vec(),
            }
        } else {
            let (from, to) = matched_subpaths(to_cubic_subpaths(&from), to_cubic_subpaths(&to));
            MorphPlan::Cubic { from, to }
        };

        Ok(Self {
            from_d: from_d.to_string(),
            to_d: to_d.to_string(),
            plan,
        })
    }

    pub fn from_d(&self) -> &str {
        &self.from_d
    }

    pub fn to_d(&self) -> &str {
        &self.to_d
    }

    /// `true` when the two paths share command structure and interpolate without resampling.
    pub fn is_elementwise(&self) -> bool {
        matches!(self.plan, MorphPlan::Elementwise { .. })
    }

    /// Interpolated geometry at `t` in `[0,1]`.
    pub fn path_at(&self, t: f64) -> BezPath {
        let t = t.clamp(0.0, 1.0);
        match &self.plan {
            MorphPlan::Elementwise { from, to } => {
                BezPath::from_vec(from.iter().zip(to).map(|(a, b)| lerp_el(*a, *b, t)).collect())
            }
            MorphPlan::Cubic { from, to } => {
                let mut out = BezPath::new();
                for (a, b) in from.iter().zip(to) {
                    out.move_to(a.start.lerp(b.start, t));
                    for (sa, sb) in a.segments.iter().zip(&b.segments) {
                        out.curve_to(
                            sa.p1.lerp(sb.p1, t),
                            sa.p2.lerp(sb.p2, t),
                            sa.p3.lerp(sb.p3, t),
                        );
                    }
                    if a.closed || b.closed {
                        out.close_path();
                    }
                }
                out
            }
        }
    }

    /// The `d` attribute at `t`; exact source strings at the endpoints.
    pub fn d_at(&self, t: f64) -> String {
        if t <= 0.0 {
            return self.from_d.clone();
        }
        if t >= 1.0 {
            return self.to_d.clone();
        }
        self.path_at(t).to_svg()
    }
}

fn same_structure(a: &[PathEl], b: &[PathEl]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            matches!(
                (x, y),
                (PathEl::MoveTo(_), PathEl::MoveTo(_))
                    | (PathEl::LineTo(_), PathEl::LineTo(_))
                    | (PathEl::QuadTo(..), PathEl::QuadTo(..))
                    | (PathEl::CurveTo(..), PathEl::CurveTo(..))
                    | (PathEl::ClosePath, PathEl::ClosePath)
            )
        })
}

fn lerp_el(a: PathEl, b: PathEl, t: f64) -> PathEl {
    match (a, b) {
        (PathEl::MoveTo(p), PathEl::MoveTo(q)) => PathEl::MoveTo(p.lerp(q, t)),
        (PathEl::LineTo(p), PathEl::LineTo(q)) => PathEl::LineTo(p.lerp(q, t)),
        (PathEl::QuadTo(p1, p2), PathEl::QuadTo(q1, q2)) => {
            PathEl::QuadTo(p1.lerp(q1, t), p2.lerp(q2, t))
        }
        (PathEl::CurveTo(p1, p2, p3), PathEl::CurveTo(q1, q2, q3)) => {
            PathEl::CurveTo(p1.lerp(q1, t), p2.lerp(q2, t), p3.lerp(q3, t))
        }
        // Structure was checked up front; keep the source element otherwise.
        (a, _) => a,
    }
}

fn line_as_cubic(p0: Point, p1: Point) -> CubicBez {
    CubicBez::new(p0, p0.lerp(p1, 1.0 / 3.0), p0.lerp(p1, 2.0 / 3.0), p1)
}

fn to_cubic_subpaths(path: &BezPath) -> Vec<CubicSubpath> {
    let mut out: Vec<CubicSubpath> = Vec::new();
    let mut cur: Option<CubicSubpath> = None;
    let mut last = Point::ZERO;

    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => {
                out.extend(cur.take());
                cur = Some(CubicSubpath {
                    start: p,
                    segments: Vec::new(),
                    closed: false,
                });
                last = p;
            }
            PathEl::LineTo(p) => {
                let sp = cur.get_or_insert_with(|| CubicSubpath {
                    start: last,
                    segments: Vec::new(),
                    closed: false,
                });
                sp.segments.push(line_as_cubic(last, p));
                last = p;
            }
            PathEl::QuadTo(p1, p2) => {
                let sp = cur.get_or_insert_with(|| CubicSubpath {
                    start: last,
                    segments: Vec::new(),
                    closed: false,
                });
                sp.segments.push(kurbo::QuadBez::new(last, p1, p2).raise());
                last = p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let sp = cur.get_or_insert_with(|| CubicSubpath {
                    start: last,
                    segments: Vec::new(),
                    closed: false,
                });
                sp.segments.push(CubicBez::new(last, p1, p2, p3));
                last = p3;
            }
            PathEl::ClosePath => {
                if let Some(mut sp) = cur.take() {
                    if last != sp.start {
                        sp.segments.push(line_as_cubic(last, sp.start));
                    }
                    sp.closed = true;
                    last = sp.start;
                    out.push(sp);
                }
            }
        }
    }
    out.extend(cur);
    out
}

/// Pad subpath lists and segment lists so both sides line up one to one.
fn matched_subpaths(
    mut a: Vec<CubicSubpath>,
    mut b: Vec<CubicSubpath>,
) -> (Vec<CubicSubpath>, Vec<CubicSubpath>) {
    fn collapsed_at(p: Point) -> CubicSubpath {
        CubicSubpath {
            start: p,
            segments: Vec::new(),
            closed: false,
        }
    }

    while a.len() < b.len() {
        let anchor = b[a.len()].start;
        a.push(collapsed_at(anchor));
    }
    while b.len() < a.len() {
        let anchor = a[b.len()].start;
        b.push(collapsed_at(anchor));
    }

    for (sa, sb) in a.iter_mut().zip(b.iter_mut()) {
        let target = sa.segments.len().max(sb.segments.len());
        grow_to(sa, target);
        grow_to(sb, target);
    }
    (a, b)
}

/// Split the longest segment in half until the subpath has `target` segments. An empty
/// subpath grows zero-length segments at its start point.
fn grow_to(sp: &mut CubicSubpath, target: usize) {
    while sp.segments.len() < target {
        let Some((idx, _)) = sp
            .segments
            .iter()
            .enumerate()
            .map(|(i, c)| (i, c.p0.distance(c.p3) + c.p0.distance(c.p1) + c.p2.distance(c.p3)))
            .max_by(|x, y| x.1.total_cmp(&y.1))
        else {
            let p = sp.start;
            sp.segments.push(CubicBez::new(p, p, p, p));
            continue;
        };
        let (l, r) = sp.segments[idx].subdivide();
        sp.segments[idx] = l;
        sp.segments.insert(idx + 1, r);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/morph/path.rs"]
mod tests;

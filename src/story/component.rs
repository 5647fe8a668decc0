use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::assets::store::StoryAssets;
use crate::config::model::StoryConfig;
use crate::foundation::core::{Affine, BezPath, Rect, Vec2, Viewport};
use crate::foundation::error::StoryResult;
use crate::host::{Host, ListenerGuard, WeakHost, frame_loop::FrameLoop};
use crate::morph::{driver::MorphDriver, path::PathMorph};
use crate::render::compose::{DrawOp, FrameLayers, FrameRGBA, PixelLayer, compose};
use crate::scene3d::{background::BackgroundScene, mesh::Rotation};
use crate::scroll::{
    fade::{FadeIn, FadeState},
    horizontal::HorizontalScroll,
};
use crate::story::layout::{ElementBox, ElementKind, StoryLayout};
use crate::vector::player::LoopedPlayer;

/// The product story view. Mounting wires every effect to a [`Host`].
pub struct ProductStory;

impl ProductStory {
    /// Measure the layout, build every driver and register listeners and frame loops.
    ///
    /// Fails on invalid config. A host without a usable canvas surface is not an error: the
    /// view mounts without its 3D background.
    #[tracing::instrument(skip_all, fields(sections = config.sections.len()))]
    pub fn mount(
        host: &Host,
        config: StoryConfig,
        assets: StoryAssets,
    ) -> StoryResult<MountedStory> {
        config.validate()?;
        let viewport = host.viewport();
        let scroll_y = host.scroll_y();
        let now_s = host.now_s();

        let layout = StoryLayout::measure(&config, viewport, &assets.fonts)?;
        let mut horizontal = HorizontalScroll::new(
            layout.sections().len(),
            layout.container(),
            layout.container_offset_width(),
            viewport,
            config.horizontal.scrub_lag_s,
        )?;
        horizontal.settle_at(scroll_y);

        let fades = layout
            .fade_targets()
            .map(|el| -> StoryResult<FadeTarget> {
                Ok(FadeTarget {
                    fade: FadeIn::new(el.rect, viewport, &config.fade)?,
                    element: el.clone(),
                })
            })
            .collect::<StoryResult<Vec<_>>>()?;

        let morph = match layout.morph_box() {
            Some(svg_box) => Some(MorphDriver::new(
                PathMorph::new(&assets.morph.path1, &assets.morph.path2)?,
                svg_box,
                viewport,
                &config.morph,
            )?),
            None => None,
        };

        let vector = match layout.vector_box() {
            Some(_) => Some(LoopedPlayer::new(
                assets.vector,
                config.vector.box_size,
                now_s,
            )?),
            None => None,
        };

        let background = match BackgroundScene::new(host, viewport, &config.scene) {
            Ok(mut bg) => {
                bg.frame();
                Some(bg)
            }
            Err(e) => {
                tracing::warn!(error = %e, "3D background unavailable, mounting without it");
                None
            }
        };

        let mut state = StoryState {
            config,
            layout,
            horizontal,
            fades,
            morph,
            vector,
            background,
            viewport,
            scroll_y,
            now_s,
        };
        state.apply_scroll(scroll_y);
        let has_background = state.background.is_some();
        let state = Rc::new(RefCell::new(state));

        let registrations = Registrations::attach(host, &state, has_background);
        tracing::info!(
            sections = state.borrow().layout.sections().len(),
            background = has_background,
            "product story mounted"
        );

        Ok(MountedStory {
            host: host.downgrade(),
            state,
            registrations: Some(registrations),
        })
    }
}

struct FadeTarget {
    element: ElementBox,
    fade: FadeIn,
}

struct StoryState {
    config: StoryConfig,
    layout: StoryLayout,
    horizontal: HorizontalScroll,
    fades: Vec<FadeTarget>,
    morph: Option<MorphDriver>,
    vector: Option<LoopedPlayer>,
    background: Option<BackgroundScene>,
    viewport: Viewport,
    scroll_y: f64,
    now_s: f64,
}

impl StoryState {
    fn apply_scroll(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
        self.horizontal.on_scroll(scroll_y);
        for target in &mut self.fades {
            if target.fade.on_scroll(scroll_y, self.now_s) {
                tracing::debug!(
                    section = target.element.section,
                    element = ?target.element.kind,
                    "fade-in fired"
                );
            }
        }
        if let Some(morph) = &mut self.morph {
            morph.on_scroll(scroll_y);
        }
    }

    fn tick(&mut self, now_s: f64) {
        let dt = (now_s - self.now_s).max(0.0);
        self.now_s = now_s;
        self.horizontal.tick(dt);
        if let Some(player) = &mut self.vector {
            player.tick(now_s);
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if let Some(bg) = &mut self.background
            && let Err(e) = bg.on_resize(viewport)
        {
            tracing::warn!(error = %e, "3D background kept its previous size");
        }
    }

    fn snap_target(&self, scroll_y: f64) -> Option<f64> {
        self.horizontal.snap_scroll_target(scroll_y)
    }

    /// Screen-space top of the container, accounting for the pin.
    fn container_screen_top(&self) -> f64 {
        self.layout.container().y0 + self.horizontal.pin_offset(self.scroll_y) - self.scroll_y
    }

    /// `x_percent` is relative to each section's own width, as measured at mount.
    fn strip_translate_px(&self) -> f64 {
        let section_width = self
            .layout
            .sections()
            .first()
            .map_or(self.viewport.width, |s| s.rect.width());
        self.horizontal.current_x_percent() / 100.0 * section_width
    }

    fn is_pinned(&self) -> bool {
        let t = self.horizontal.trigger();
        !self.horizontal.is_static() && self.scroll_y >= t.start && self.scroll_y <= t.end
    }

    fn fade_state_of(&self, section: usize, kind: ElementKind) -> Option<FadeState> {
        self.fades
            .iter()
            .find(|t| t.element.section == section && t.element.kind == kind)
            .map(|t| t.fade.state(self.now_s))
    }

    /// Map a page-space box of the resting strip to its current screen offset.
    fn screen_origin(&self, rect: Rect) -> Vec2 {
        let container = self.layout.container();
        Vec2::new(
            rect.x0 - container.x0 + self.strip_translate_px(),
            rect.y0 - container.y0 + self.container_screen_top(),
        )
    }

    fn snapshot(&self, mounted: bool) -> StorySnapshot {
        let t = self.horizontal.trigger();
        StorySnapshot {
            mounted,
            time_s: self.now_s,
            scroll_y: self.scroll_y,
            viewport: self.viewport,
            strip: StripSnapshot {
                sections: self.horizontal.sections(),
                scroll_start: t.start,
                scroll_end: t.end,
                scroll_progress: self.horizontal.scroll_progress(),
                displayed_progress: self.horizontal.displayed_progress(),
                x_percent: self.horizontal.current_x_percent(),
                translate_px: self.strip_translate_px(),
                pinned: self.is_pinned(),
                container_top: self.container_screen_top(),
            },
            fades: self
                .fades
                .iter()
                .map(|t| {
                    let s = t.fade.state(self.now_s);
                    FadeSnapshot {
                        section: t.element.section,
                        element: t.element.kind,
                        fired: t.fade.has_fired(),
                        opacity: s.opacity,
                        y: s.y,
                    }
                })
                .collect(),
            morph: self.morph.as_ref().map(|m| MorphSnapshot {
                progress: m.progress(),
                eased_progress: m.eased_progress(),
                d: m.current_d(),
            }),
            vector_frame: self.vector.as_ref().map(LoopedPlayer::current_frame),
            background: self.background.as_ref().map(|bg| BackgroundSnapshot {
                rotation: bg.rotation(),
                frames_rendered: bg.renderer().frames_rendered(),
                released: bg.is_disposed(),
            }),
        }
    }

    fn render(&self) -> StoryResult<FrameRGBA> {
        let (width, height) = self.viewport.pixel_size();
        let mut layers = FrameLayers::default();

        for section in self.layout.sections() {
            let origin = self.screen_origin(section.rect);
            layers.backdrop.push(DrawOp::FillPath {
                path: rect_path(section.rect.width(), section.rect.height()),
                transform: Affine::translate(origin),
                color: section.background.to_premul(1.0),
                opacity: 1.0,
            });
        }

        if let Some(bg) = &self.background
            && let (Some(pixels), Some((w, h))) = (bg.renderer().pixels(), bg.renderer().size())
        {
            layers.canvas = Some(PixelLayer {
                width: w,
                height: h,
                data: pixels,
                offset_y: self.container_screen_top().round() as i64,
            });
        }

        for section in self.layout.sections() {
            for el in &section.elements {
                self.push_element(el, &mut layers.content)?;
            }
        }

        compose(width, height, &layers)
    }

    fn push_element(&self, el: &ElementBox, out: &mut Vec<DrawOp>) -> StoryResult<()> {
        let fade = self
            .fade_state_of(el.section, el.kind)
            .unwrap_or(FadeState { opacity: 1.0, y: 0.0 });
        let origin = self.screen_origin(el.rect) + Vec2::new(0.0, fade.y);
        let opacity = fade.opacity as f32;

        match el.kind {
            ElementKind::MorphSvg => {
                if let Some(morph) = &self.morph {
                    let cfg = &self.config.morph;
                    out.push(DrawOp::FillPath {
                        path: morph.current_path(),
                        transform: Affine::translate(origin)
                            * Affine::scale(cfg.box_size / cfg.view_box),
                        color: cfg.fill.to_premul(1.0),
                        opacity,
                    });
                }
            }
            ElementKind::Vector => {
                if let Some(player) = &self.vector {
                    for shape in player.current_shapes()? {
                        out.push(DrawOp::FillPath {
                            path: shape.path,
                            transform: Affine::translate(origin) * shape.transform,
                            color: shape.fill.to_premul(1.0),
                            opacity: opacity * shape.opacity as f32,
                        });
                    }
                }
            }
            ElementKind::Title | ElementKind::Body => {
                if let Some(block) = &el.text {
                    out.push(DrawOp::Text {
                        block: Arc::clone(block),
                        transform: Affine::translate(origin),
                        opacity,
                    });
                }
            }
        }
        Ok(())
    }
}

fn rect_path(w: f64, h: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((w, 0.0));
    p.line_to((w, h));
    p.line_to((0.0, h));
    p.close_path();
    p
}

/// Listener guards and frame loops held for the lifetime of a mount; dropping them
/// unregisters everything.
struct Registrations {
    _scroll: ListenerGuard,
    _scroll_end: ListenerGuard,
    _resize: ListenerGuard,
    _ticker: FrameLoop,
    _render_loop: Option<FrameLoop>,
}

impl Registrations {
    fn attach(host: &Host, state: &Rc<RefCell<StoryState>>, with_background: bool) -> Self {
        let weak = Rc::downgrade(state);
        let scroll = host.on_scroll(with_state(&weak, |st, y| st.apply_scroll(y)));

        let snap_host = host.downgrade();
        let snap_state = Rc::downgrade(state);
        let scroll_end = host.on_scroll_end(move |y| snap_to_section(&snap_state, &snap_host, y));

        let resize = host.on_resize(with_state(&weak, |st, vp| st.resize(vp)));

        let ticker = FrameLoop::start(host, with_state(&weak, |st, now| st.tick(now)));

        let render_loop = with_background.then(|| {
            FrameLoop::start(
                host,
                with_state(&weak, |st, _now: f64| {
                    if let Some(bg) = &mut st.background {
                        bg.frame();
                    }
                }),
            )
        });

        Self {
            _scroll: scroll,
            _scroll_end: scroll_end,
            _resize: resize,
            _ticker: ticker,
            _render_loop: render_loop,
        }
    }
}

/// Adapt a state method into a host callback that does nothing once the state is gone.
fn with_state<A>(
    weak: &Weak<RefCell<StoryState>>,
    f: impl Fn(&mut StoryState, A) + 'static,
) -> impl Fn(A) + 'static {
    let weak = weak.clone();
    move |arg| {
        if let Some(state) = weak.upgrade() {
            f(&mut state.borrow_mut(), arg);
        }
    }
}

fn snap_to_section(state: &Weak<RefCell<StoryState>>, host: &WeakHost, scroll_y: f64) {
    let Some(state) = state.upgrade() else {
        return;
    };
    // Release the borrow first: scrolling re-enters the scroll listener.
    let target = state.borrow().snap_target(scroll_y);
    if let (Some(target), Some(host)) = (target, host.upgrade()) {
        tracing::debug!(from = scroll_y, to = target, "snapping strip");
        host.scroll_to(target);
    }
}

/// A mounted product story. Dropping it unmounts.
pub struct MountedStory {
    host: WeakHost,
    state: Rc<RefCell<StoryState>>,
    registrations: Option<Registrations>,
}

impl MountedStory {
    pub fn is_mounted(&self) -> bool {
        self.registrations.is_some()
    }

    pub fn has_background(&self) -> bool {
        self.state.borrow().background.is_some()
    }

    /// Mesh rotation of the 3D background, if it is running.
    pub fn rotation(&self) -> Option<Rotation> {
        self.state.borrow().background.as_ref().map(BackgroundScene::rotation)
    }

    pub fn snapshot(&self) -> StorySnapshot {
        self.state.borrow().snapshot(self.is_mounted())
    }

    /// Compose the whole viewport as it currently looks.
    pub fn render_frame(&self) -> StoryResult<FrameRGBA> {
        self.state.borrow().render()
    }

    /// Stop every loop, remove every listener and release the 3D resources. Idempotent.
    #[tracing::instrument(skip_all)]
    pub fn unmount(&mut self) {
        let Some(registrations) = self.registrations.take() else {
            return;
        };
        drop(registrations);
        if let Some(bg) = &mut self.state.borrow_mut().background {
            bg.dispose();
        }
        let host_alive = self.host.upgrade().is_some();
        tracing::info!(host_alive, "product story unmounted");
    }
}

impl Drop for MountedStory {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct StorySnapshot {
    pub mounted: bool,
    pub time_s: f64,
    pub scroll_y: f64,
    pub viewport: Viewport,
    pub strip: StripSnapshot,
    pub fades: Vec<FadeSnapshot>,
    pub morph: Option<MorphSnapshot>,
    pub vector_frame: Option<f64>,
    /// `None` when the host had no canvas surface to give.
    pub background: Option<BackgroundSnapshot>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct StripSnapshot {
    pub sections: usize,
    pub scroll_start: f64,
    pub scroll_end: f64,
    pub scroll_progress: f64,
    pub displayed_progress: f64,
    pub x_percent: f64,
    pub translate_px: f64,
    pub pinned: bool,
    pub container_top: f64,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct FadeSnapshot {
    pub section: usize,
    pub element: ElementKind,
    pub fired: bool,
    pub opacity: f64,
    pub y: f64,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct MorphSnapshot {
    pub progress: f64,
    pub eased_progress: f64,
    pub d: String,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct BackgroundSnapshot {
    pub rotation: Rotation,
    pub frames_rendered: u64,
    pub released: bool,
}

#[cfg(test)]
#[path = "../../tests/unit/story/component.rs"]
mod tests;

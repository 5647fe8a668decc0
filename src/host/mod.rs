//! Headless stand-in for the browser surface the story view is mounted into.
//!
//! A [`Host`] owns the viewport, the page scroll offset, a monotonic clock and the registries
//! a browser would own: resize/scroll listeners, the animation-frame queue and canvas
//! surfaces. Everything is single-threaded and cooperative; callbacks run to completion on
//! the caller's stack. Registrations hand back guards that unregister on drop.

pub mod frame_loop;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::foundation::core::Viewport;
use crate::foundation::error::{StoryError, StoryResult};

type ViewportCallback = Rc<dyn Fn(Viewport)>;
type ScrollCallback = Rc<dyn Fn(f64)>;
type FrameCallback = Box<dyn FnOnce(f64)>;

/// Identifier of a queued animation-frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRequest(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListenerKind {
    Resize,
    Scroll,
    ScrollEnd,
}

struct HostState {
    viewport: Viewport,
    scroll_y: f64,
    now_s: f64,
    next_id: u64,
    resize: BTreeMap<u64, ViewportCallback>,
    scroll: BTreeMap<u64, ScrollCallback>,
    scroll_end: BTreeMap<u64, ScrollCallback>,
    frames: BTreeMap<u64, FrameCallback>,
    graphics: bool,
    max_surface_side: u32,
    live_surfaces: usize,
}

impl HostState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared handle to the headless host. Cloning is cheap and yields the same host.
#[derive(Clone)]
pub struct Host {
    state: Rc<RefCell<HostState>>,
}

/// Non-owning handle for callbacks that must not keep the host alive.
#[derive(Clone)]
pub struct WeakHost {
    state: Weak<RefCell<HostState>>,
}

impl WeakHost {
    pub fn upgrade(&self) -> Option<Host> {
        self.state.upgrade().map(|state| Host { state })
    }
}

impl Host {
    /// Host with a graphics context, so canvas surfaces can be acquired.
    pub fn new(viewport: Viewport) -> Self {
        Self::with_graphics(viewport, true)
    }

    /// Host that refuses every canvas surface, like a browser without a usable context.
    pub fn without_graphics(viewport: Viewport) -> Self {
        Self::with_graphics(viewport, false)
    }

    fn with_graphics(viewport: Viewport, graphics: bool) -> Self {
        Self {
            state: Rc::new(RefCell::new(HostState {
                viewport,
                scroll_y: 0.0,
                now_s: 0.0,
                next_id: 0,
                resize: BTreeMap::new(),
                scroll: BTreeMap::new(),
                scroll_end: BTreeMap::new(),
                frames: BTreeMap::new(),
                graphics,
                max_surface_side: u32::from(u16::MAX),
                live_surfaces: 0,
            })),
        }
    }

    pub fn downgrade(&self) -> WeakHost {
        WeakHost {
            state: Rc::downgrade(&self.state),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.state.borrow().viewport
    }

    pub fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    pub fn now_s(&self) -> f64 {
        self.state.borrow().now_s
    }

    /// Largest canvas side the host hands out, in pixels.
    pub fn set_max_surface_side(&self, side: u32) {
        self.state.borrow_mut().max_surface_side = side;
    }

    fn add_listener(
        &self,
        kind: ListenerKind,
        insert: impl FnOnce(&mut HostState, u64),
    ) -> ListenerGuard {
        let mut st = self.state.borrow_mut();
        let id = st.next_id();
        insert(&mut *st, id);
        ListenerGuard {
            state: Rc::downgrade(&self.state),
            kind,
            id,
        }
    }

    pub fn on_resize(&self, cb: impl Fn(Viewport) + 'static) -> ListenerGuard {
        self.add_listener(ListenerKind::Resize, |st, id| {
            st.resize.insert(id, Rc::new(cb));
        })
    }

    pub fn on_scroll(&self, cb: impl Fn(f64) + 'static) -> ListenerGuard {
        self.add_listener(ListenerKind::Scroll, |st, id| {
            st.scroll.insert(id, Rc::new(cb));
        })
    }

    /// Called once scrolling settles, with the resting scroll offset.
    pub fn on_scroll_end(&self, cb: impl Fn(f64) + 'static) -> ListenerGuard {
        self.add_listener(ListenerKind::ScrollEnd, |st, id| {
            st.scroll_end.insert(id, Rc::new(cb));
        })
    }

    /// Queue `cb` for the next animation frame. Callbacks queued while a frame runs wait for
    /// the following one.
    pub fn request_frame(&self, cb: impl FnOnce(f64) + 'static) -> FrameRequest {
        let mut st = self.state.borrow_mut();
        let id = st.next_id();
        st.frames.insert(id, Box::new(cb));
        FrameRequest(id)
    }

    pub fn cancel_frame(&self, req: FrameRequest) {
        self.state.borrow_mut().frames.remove(&req.0);
    }

    /// Change the viewport and notify resize listeners.
    pub fn resize(&self, viewport: Viewport) {
        let listeners: Vec<ViewportCallback> = {
            let mut st = self.state.borrow_mut();
            st.viewport = viewport;
            st.resize.values().cloned().collect()
        };
        tracing::debug!(width = viewport.width, height = viewport.height, "host resize");
        for cb in listeners {
            cb(viewport);
        }
    }

    /// Move the page to `scroll_y` (clamped at 0) and notify scroll listeners.
    pub fn scroll_to(&self, scroll_y: f64) {
        let (y, listeners): (f64, Vec<ScrollCallback>) = {
            let mut st = self.state.borrow_mut();
            st.scroll_y = scroll_y.max(0.0);
            (st.scroll_y, st.scroll.values().cloned().collect())
        };
        for cb in listeners {
            cb(y);
        }
    }

    /// Signal that the user stopped scrolling.
    pub fn end_scroll(&self) {
        let (y, listeners): (f64, Vec<ScrollCallback>) = {
            let st = self.state.borrow();
            (st.scroll_y, st.scroll_end.values().cloned().collect())
        };
        for cb in listeners {
            cb(y);
        }
    }

    /// Advance the clock by `dt_s` and run one animation frame.
    pub fn advance(&self, dt_s: f64) {
        let (now, frames) = {
            let mut st = self.state.borrow_mut();
            st.now_s += dt_s.max(0.0);
            (st.now_s, std::mem::take(&mut st.frames))
        };
        for cb in frames.into_values() {
            cb(now);
        }
    }

    /// Run `count` frames spaced `dt_s` apart.
    pub fn run_frames(&self, count: usize, dt_s: f64) {
        for _ in 0..count {
            self.advance(dt_s);
        }
    }

    /// Acquire a drawable canvas surface of `width` x `height` pixels.
    pub fn acquire_surface(&self, width: u32, height: u32) -> StoryResult<SurfaceLease> {
        let mut st = self.state.borrow_mut();
        if !st.graphics {
            return Err(StoryError::surface("host has no graphics context"));
        }
        check_surface_size(width, height, st.max_surface_side)?;
        st.live_surfaces += 1;
        Ok(SurfaceLease {
            state: Rc::downgrade(&self.state),
            width,
            height,
        })
    }

    pub fn resize_listener_count(&self) -> usize {
        self.state.borrow().resize.len()
    }

    pub fn scroll_listener_count(&self) -> usize {
        let st = self.state.borrow();
        st.scroll.len() + st.scroll_end.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    pub fn live_surfaces(&self) -> usize {
        self.state.borrow().live_surfaces
    }
}

fn check_surface_size(width: u32, height: u32, max_side: u32) -> StoryResult<()> {
    if width == 0 || height == 0 {
        return Err(StoryError::surface(format!(
            "surface must be non-empty, got {width}x{height}"
        )));
    }
    if width > max_side || height > max_side {
        return Err(StoryError::surface(format!(
            "surface {width}x{height} exceeds the {max_side}px limit"
        )));
    }
    Ok(())
}

/// Registration of a resize or scroll listener; dropping it unregisters the listener.
#[must_use = "dropping the guard unregisters the listener"]
pub struct ListenerGuard {
    state: Weak<RefCell<HostState>>,
    kind: ListenerKind,
    id: u64,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        let mut st = state.borrow_mut();
        match self.kind {
            ListenerKind::Resize => {
                st.resize.remove(&self.id);
            }
            ListenerKind::Scroll => {
                st.scroll.remove(&self.id);
            }
            ListenerKind::ScrollEnd => {
                st.scroll_end.remove(&self.id);
            }
        }
    }
}

/// A canvas surface held from the host; dropping it returns the surface.
#[must_use = "dropping the lease releases the surface"]
pub struct SurfaceLease {
    state: Weak<RefCell<HostState>>,
    width: u32,
    height: u32,
}

impl SurfaceLease {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resize the surface within the host's limits.
    pub fn resize(&mut self, width: u32, height: u32) -> StoryResult<()> {
        let Some(state) = self.state.upgrade() else {
            return Err(StoryError::surface("host is gone"));
        };
        check_surface_size(width, height, state.borrow().max_surface_side)?;
        self.width = width;
        self.height = height;
        Ok(())
    }
}

impl Drop for SurfaceLease {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            let mut st = state.borrow_mut();
            st.live_surfaces = st.live_surfaces.saturating_sub(1);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/host.rs"]
mod tests;

use std::cell::RefCell;
use std::rc::Rc;

use crate::host::{FrameRequest, Host, WeakHost};

struct LoopInner {
    host: WeakHost,
    pending: Option<FrameRequest>,
    running: bool,
    frames: u64,
    tick: Box<dyn FnMut(f64)>,
}

/// A callback that re-queues itself on every animation frame until cancelled.
///
/// Each frame first re-arms the next request and then runs the tick, so the loop keeps going
/// for as long as the handle lives. Cancelling (or dropping the handle) withdraws the pending
/// request; nothing runs afterwards.
#[must_use = "dropping the handle cancels the loop"]
pub struct FrameLoop {
    inner: Rc<RefCell<LoopInner>>,
}

impl FrameLoop {
    pub fn start(host: &Host, tick: impl FnMut(f64) + 'static) -> Self {
        let inner = Rc::new(RefCell::new(LoopInner {
            host: host.downgrade(),
            pending: None,
            running: true,
            frames: 0,
            tick: Box::new(tick),
        }));
        arm(&inner);
        Self { inner }
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    /// Number of ticks run so far.
    pub fn frames(&self) -> u64 {
        self.inner.borrow().frames
    }

    pub fn cancel(&self) {
        let (host, pending) = {
            let mut g = self.inner.borrow_mut();
            g.running = false;
            (g.host.upgrade(), g.pending.take())
        };
        if let (Some(host), Some(req)) = (host, pending) {
            host.cancel_frame(req);
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn arm(inner: &Rc<RefCell<LoopInner>>) {
    let Some(host) = inner.borrow().host.upgrade() else {
        return;
    };
    let weak = Rc::downgrade(inner);
    let req = host.request_frame(move |now_s| {
        if let Some(inner) = weak.upgrade() {
            run(&inner, now_s);
        }
    });
    inner.borrow_mut().pending = Some(req);
}

fn run(inner: &Rc<RefCell<LoopInner>>, now_s: f64) {
    {
        let mut g = inner.borrow_mut();
        if !g.running {
            return;
        }
        g.pending = None;
    }
    arm(inner);
    let mut g = inner.borrow_mut();
    g.frames += 1;
    (g.tick)(now_s);
}

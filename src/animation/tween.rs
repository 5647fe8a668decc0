use crate::animation::{anim::Lerp, ease::Ease};

/// A one-shot, time-based `from -> to` animation.
///
/// The tween stays at `from` until [`Tween::start`] is called; starting an already started
/// tween does nothing, so a trigger can fire it at most once.
#[derive(Clone, Debug)]
pub struct Tween<T> {
    from: T,
    to: T,
    duration_s: f64,
    ease: Ease,
    started_at: Option<f64>,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    pub fn new(from: T, to: T, duration_s: f64, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration_s: duration_s.max(0.0),
            ease,
            started_at: None,
        }
    }

    /// Start at host time `now_s`. Returns `true` if this call started the tween.
    pub fn start(&mut self, now_s: f64) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now_s);
        true
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Linear (un-eased) progress in `[0,1]` at `now_s`.
    pub fn progress(&self, now_s: f64) -> f64 {
        let Some(t0) = self.started_at else {
            return 0.0;
        };
        if self.duration_s <= 0.0 {
            return 1.0;
        }
        ((now_s - t0) / self.duration_s).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, now_s: f64) -> bool {
        self.is_started() && self.progress(now_s) >= 1.0
    }

    pub fn sample(&self, now_s: f64) -> T {
        let p = self.progress(now_s);
        if p <= 0.0 {
            return self.from.clone();
        }
        if p >= 1.0 {
            return self.to.clone();
        }
        T::lerp(&self.from, &self.to, self.ease.apply(p))
    }
}

/// Displayed progress that chases a target progress with a time lag.
///
/// A lag of `0` tracks the target exactly; otherwise the gap closes exponentially with time
/// constant `lag_s` and settles once it falls below [`ScrubSmoother::EPSILON`].
#[derive(Clone, Copy, Debug)]
pub struct ScrubSmoother {
    lag_s: f64,
    current: f64,
    target: f64,
}

impl ScrubSmoother {
    pub const EPSILON: f64 = 1e-4;

    pub fn new(lag_s: f64) -> Self {
        Self {
            lag_s: lag_s.max(0.0),
            current: 0.0,
            target: 0.0,
        }
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
        if self.lag_s == 0.0 {
            self.current = target;
        }
    }

    /// Move both displayed and target progress to `value` at once.
    pub fn jump(&mut self, value: f64) {
        self.target = value;
        self.current = value;
    }

    pub fn advance(&mut self, dt_s: f64) {
        if self.lag_s == 0.0 || dt_s <= 0.0 {
            if self.lag_s == 0.0 {
                self.current = self.target;
            }
            return;
        }
        let k = 1.0 - (-dt_s / self.lag_s).exp();
        self.current += (self.target - self.current) * k;
        if (self.target - self.current).abs() < Self::EPSILON {
            self.current = self.target;
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;

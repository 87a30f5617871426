use crate::{FrameKind, FrameToken};

/// Easing curves for animated scrolling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    /// `2t²` for the first half, `-1 + (4 - 2t)t` for the second.
    #[default]
    EaseInOutQuad,
    SmoothStep,
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}

/// A time-based interpolation between two scroll offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnimation {
    pub from: f64,
    pub to: f64,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl ScrollAnimation {
    pub fn new(from: f64, to: f64, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            easing,
        }
    }

    /// `min((now - start) / duration, 1)`; a zero duration is immediately complete.
    pub fn progress(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        (elapsed as f64 / self.duration_ms as f64).min(1.0)
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    pub fn sample(&self, now_ms: u64) -> f64 {
        let progress = self.progress(now_ms);
        if progress >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.sample(progress)
    }
}

/// The result of one animation frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationStep {
    pub offset: f64,
    pub done: bool,
}

/// Drives at most one cancellable scroll animation.
///
/// Every animation gets a fresh frame token. Starting a new animation or cancelling makes the
/// previous token stale, and a tick with a stale token does nothing.
#[derive(Clone, Debug, Default)]
pub struct ScrollAnimator {
    active: Option<(FrameToken, ScrollAnimation)>,
    generation: u64,
}

impl ScrollAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn animation(&self) -> Option<&ScrollAnimation> {
        self.active.as_ref().map(|(_, a)| a)
    }

    /// Starts animating from `from` to `to`, replacing any animation in flight.
    ///
    /// Returns the token to register with the frame pump.
    pub fn animate_to(
        &mut self,
        from: f64,
        to: f64,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> FrameToken {
        self.generation = self.generation.wrapping_add(1);
        let token = FrameToken {
            kind: FrameKind::Scroll,
            generation: self.generation,
        };
        self.active = Some((
            token,
            ScrollAnimation::new(from, to, now_ms, duration_ms, easing),
        ));
        token
    }

    /// Samples the animation for a fired frame.
    ///
    /// Returns `None` for stale tokens. The animation is finished (and dropped) once a step
    /// reports `done`.
    pub fn tick(&mut self, token: FrameToken, now_ms: u64) -> Option<AnimationStep> {
        let (active, animation) = self.active?;
        if active != token {
            return None;
        }
        let step = AnimationStep {
            offset: animation.sample(now_ms),
            done: animation.is_done(now_ms),
        };
        if step.done {
            self.active = None;
        }
        Some(step)
    }

    /// Stops the animation in flight, returning its token so the frame can be cancelled.
    pub fn cancel(&mut self) -> Option<FrameToken> {
        self.active.take().map(|(token, _)| token)
    }
}

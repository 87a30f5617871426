use crate::{FrameKind, FrameToken};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Scheduled { token: FrameToken, force: bool },
}

/// Coalesces render requests into at most one pending frame-aligned render pass.
///
/// `Idle -> Scheduled -> Idle`. A request while `Scheduled` never registers a second frame; a
/// forced request upgrades the pending pass, and the force flag sticks until that pass runs.
#[derive(Clone, Debug)]
pub struct RenderScheduler {
    phase: Phase,
    generation: u64,
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            generation: 0,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self.phase, Phase::Scheduled { .. })
    }

    /// Whether the pending pass (if any) is forced.
    pub fn is_forced(&self) -> bool {
        matches!(self.phase, Phase::Scheduled { force: true, .. })
    }

    /// Requests a render pass.
    ///
    /// Returns the token to register with the frame pump when a new frame is needed, or `None`
    /// when a pass is already pending.
    pub fn request(&mut self, force: bool) -> Option<FrameToken> {
        if let Phase::Scheduled { force: pending, .. } = &mut self.phase {
            *pending |= force;
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        let token = FrameToken {
            kind: FrameKind::Render,
            generation: self.generation,
        };
        self.phase = Phase::Scheduled { token, force };
        Some(token)
    }

    /// Consumes the pending pass for a fired frame.
    ///
    /// Returns the pass's force flag, or `None` if `token` is not the pending registration.
    pub fn take(&mut self, token: FrameToken) -> Option<bool> {
        match self.phase {
            Phase::Scheduled {
                token: pending,
                force,
            } if pending == token => {
                self.phase = Phase::Idle;
                Some(force)
            }
            _ => None,
        }
    }

    /// Drops the pending pass, returning the token to cancel with the frame pump.
    pub fn cancel(&mut self) -> Option<FrameToken> {
        match core::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Scheduled { token, .. } => Some(token),
            Phase::Idle => None,
        }
    }
}

/// Filters scroll and viewport-extent notifications before they reach the scheduler.
///
/// Only a change larger than one average row size passes. Small deltas that add up past the
/// threshold across several notifications are not caught; the window buffer absorbs them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChangeFilter {
    last_repaint: Option<f64>,
    last_extent: f64,
}

impl ChangeFilter {
    pub fn new(viewport_extent: f64) -> Self {
        Self {
            last_repaint: None,
            last_extent: viewport_extent,
        }
    }

    /// Scroll offset recorded by the last completed render pass.
    pub fn last_repaint(&self) -> Option<f64> {
        self.last_repaint
    }

    pub fn last_extent(&self) -> f64 {
        self.last_extent
    }

    /// Records the scroll offset a render pass finished at.
    pub fn commit_repaint(&mut self, scroll_offset: f64) {
        self.last_repaint = Some(scroll_offset);
    }

    /// Whether a scroll to `scroll_offset` should request a render.
    ///
    /// Nothing passes before the first render pass has completed.
    pub fn scroll_passes(&self, scroll_offset: f64, average_size: f64) -> bool {
        let Some(last) = self.last_repaint else {
            return false;
        };
        if scroll_offset == last {
            return false;
        }
        (scroll_offset - last).abs() > average_size
    }

    /// Whether a viewport resize to `extent` should request a render. Commits `extent` when it
    /// does.
    pub fn resize_passes(&mut self, extent: f64, average_size: f64) -> bool {
        if extent == self.last_extent {
            return false;
        }
        if (extent - self.last_extent).abs() <= average_size {
            return false;
        }
        self.last_extent = extent;
        true
    }
}

use crate::{Axis, FrameToken, PositionedItem, RenderBatch};

/// The visual surface a [`crate::VirtualList`] renders into.
///
/// The list never holds on to surface state across passes: each pass hands over an owned batch
/// of positioned items.
pub trait RenderSurface<H> {
    /// Current scroll offset along `axis`.
    fn scroll_offset(&self, axis: Axis) -> f64;

    fn set_scroll_offset(&mut self, axis: Axis, offset: f64);

    /// Visible extent along `axis`.
    fn viewport_extent(&self, axis: Axis) -> f64;

    /// Sets the full scrollable extent along `axis`.
    fn set_content_extent(&mut self, axis: Axis, extent: f64);

    /// Removes every presented item.
    fn clear(&mut self);

    /// Presents one item after the ones already presented.
    fn insert(&mut self, item: PositionedItem<H>);

    /// Swaps the presented `previous` handle for `item`, in place.
    fn replace(&mut self, previous: H, item: PositionedItem<H>);

    /// Presents a render pass.
    ///
    /// The default clears the surface and reinserts every item in batch order. Surfaces that can
    /// diff against what they already show should override this.
    fn apply(&mut self, batch: RenderBatch<H>) {
        self.clear();
        for item in batch.items {
            self.insert(item);
        }
    }
}

/// The host's frame pacing (e.g. an animation-frame callback queue).
///
/// The host calls [`crate::VirtualList::on_frame`] with the token once the frame fires.
pub trait FramePump {
    fn request_frame(&mut self, token: FrameToken);

    /// Best-effort removal of a registration. Tokens are also checked when frames fire, so a
    /// cancelled frame that still fires is ignored.
    fn cancel_frame(&mut self, token: FrameToken);
}

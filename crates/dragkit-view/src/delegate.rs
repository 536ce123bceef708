use crate::context::DragContext;
use dragkit_foundation::{Direction, SharedContent};

/// Identifies a completion the delegate asked to be notified about.
///
/// Passed to [`DragContext::animate_to`] or [`DragContext::post_delayed`] and
/// handed back through [`DragDelegate::on_animation_end`] or
/// [`DragDelegate::on_delayed`]. A cancelled animation never reports its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompletionTag(pub u32);

/// A release fast enough to count as a swipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeRelease {
    /// Direction the pointer was travelling at release.
    pub direction: Direction,
    /// Normalized position of the top view at release.
    pub x: f32,
    /// Absolute release speed in pixels per millisecond.
    pub velocity: f32,
    /// Absolute release speed in dip per millisecond.
    pub velocity_dip: f32,
}

/// Receives every decision point of a [`DragView`](crate::DragView).
///
/// Every callback gets a [`DragContext`] to read engine state and to queue
/// commands (snap, reset, enable/disable dragging). Queued commands run in
/// order as soon as the callback returns.
///
/// Positions are normalized: the container width maps to `1.0`.
pub trait DragDelegate {
    /// Called when the delegate is attached. Width is not known yet.
    fn init(&mut self, _view: &mut DragContext<'_>) {}

    /// Called once the container has been laid out with a known width.
    fn on_setup(&mut self, _view: &mut DragContext<'_>) {}

    /// The view that is dragged. Called exactly once per attachment.
    fn top_view(&mut self, view: &mut DragContext<'_>) -> Option<SharedContent>;

    /// Called before the engine drops or replaces this delegate.
    fn on_detach(&mut self, _view: &mut DragContext<'_>) {}

    /// Whether the top view may be dragged open towards `direction`.
    fn can_drag(&mut self, view: &mut DragContext<'_>, direction: Direction) -> bool;

    /// Upper bound on `|x|` while `direction` is open. Zero or less means no limit.
    fn max_drag(&mut self, _view: &mut DragContext<'_>, _direction: Direction) -> f32 {
        0.0
    }

    /// Multiplier applied to this frame's movement `dx`.
    ///
    /// `direction` is the side the view is open towards, `movement` the
    /// direction of `dx` itself (an open view being pushed closed moves
    /// against its direction). 1 follows the pointer, 0 locks the view.
    fn drag_factor(
        &mut self,
        _view: &mut DragContext<'_>,
        _direction: Direction,
        _movement: Direction,
        _x0: f32,
        _dx: f32,
    ) -> f32 {
        1.0
    }

    fn on_drag_begin(&mut self, _view: &mut DragContext<'_>, _direction: Direction) {}

    /// Last chance to reshape a drag step. Returns the position to commit.
    fn will_drag(
        &mut self,
        _view: &mut DragContext<'_>,
        _direction: Direction,
        _x0: f32,
        x1: f32,
    ) -> f32 {
        x1
    }

    /// Called whenever the position changes, from a drag or an animation.
    fn on_changed(
        &mut self,
        _view: &mut DragContext<'_>,
        _direction: Direction,
        _x0: f32,
        _x1: f32,
        _dragging: bool,
    ) {
    }

    /// Called on a fast release. Return true to take over the follow-up,
    /// which suppresses [`DragDelegate::on_drag_end`].
    fn on_swipe(
        &mut self,
        _view: &mut DragContext<'_>,
        _direction: Direction,
        _swipe: SwipeRelease,
    ) -> bool {
        false
    }

    /// Called whenever the position returns to rest.
    fn on_reset(&mut self, _view: &mut DragContext<'_>) {}

    /// Called when a drag session ends without a handled swipe.
    fn on_drag_end(&mut self, _view: &mut DragContext<'_>, _direction: Direction, _x: f32) {}

    /// Called when the pointer is released without a drag having started.
    fn on_click(&mut self, _view: &mut DragContext<'_>) {}

    fn on_animation_end(&mut self, _view: &mut DragContext<'_>, _tag: CompletionTag) {}

    fn on_delayed(&mut self, _view: &mut DragContext<'_>, _tag: CompletionTag) {}
}

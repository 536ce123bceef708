//! The drag engine.

use crate::config::{ConfigError, DragConfig};
use crate::context::{CommandQueue, DragCommand, DragContext};
use crate::delegate::{CompletionTag, DragDelegate, SwipeRelease};
use crate::session::{DragSession, GestureTracker};
use dragkit_animation::{snap_duration_millis, AnimationSpec, Easing, Tween};
use dragkit_foundation::{Direction, PointerEvent, PointerEventKind, SharedContent};

/// The single running position animation.
#[derive(Debug, Clone)]
pub(crate) struct PositionAnimation {
    tween: Tween<f32>,
    tag: Option<CompletionTag>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct DelayedTask {
    tag: CompletionTag,
    delay_ms: u64,
    scheduled_at_nanos: Option<u64>,
}

/// Engine state readable from a [`DragContext`].
pub(crate) struct DragState {
    pub config: DragConfig,
    pub width: f32,
    pub top_view: Option<SharedContent>,
    /// Pixel offset last projected onto the top view.
    pub offset_px: f32,
    pub position: f32,
    pub direction: Direction,
    pub drag_enabled: bool,
    pub gesture: GestureTracker,
    pub animation: Option<PositionAnimation>,
    pub delayed: Option<DelayedTask>,
    setup_pending: bool,
}

impl DragState {
    fn new(config: DragConfig) -> Self {
        Self {
            config,
            width: 0.0,
            top_view: None,
            offset_px: 0.0,
            position: 0.0,
            direction: Direction::None,
            drag_enabled: true,
            gesture: GestureTracker::default(),
            animation: None,
            delayed: None,
            setup_pending: false,
        }
    }

    fn project_offset(&mut self, offset_px: f32) {
        self.offset_px = offset_px;
        if let Some(top_view) = &self.top_view {
            top_view.borrow_mut().set_x(offset_px);
        }
    }
}

/// A container that drags its top view horizontally in response to a
/// single pointer and reports every step to its delegate.
///
/// The host drives it with [`DragView::on_layout`], pointer events and
/// [`DragView::on_frame`]. All positions are normalized against the
/// container width.
pub struct DragView<D: DragDelegate> {
    state: DragState,
    delegate: Option<D>,
}

impl<D: DragDelegate> Default for DragView<D> {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl<D: DragDelegate> DragView<D> {
    pub fn new(config: DragConfig) -> Self {
        Self {
            state: DragState::new(config),
            delegate: None,
        }
    }

    /// Create an engine, rejecting an invalid configuration.
    pub fn try_new(config: DragConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &DragConfig {
        &self.state.config
    }

    pub fn width(&self) -> f32 {
        self.state.width
    }

    /// Current normalized position of the top view.
    pub fn position(&self) -> f32 {
        self.state.position
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn is_open(&self) -> bool {
        !self.state.direction.is_none()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.gesture.is_dragging()
    }

    pub fn is_animating(&self) -> bool {
        self.state.animation.is_some()
    }

    pub fn has_pending_delayed(&self) -> bool {
        self.state.delayed.is_some()
    }

    pub fn is_drag_enabled(&self) -> bool {
        self.state.drag_enabled
    }

    pub fn set_drag_enabled(&mut self, enabled: bool) {
        self.state.drag_enabled = enabled;
    }

    pub fn set_allow_cross_drag(&mut self, allow: bool) {
        self.state.config.allow_cross_drag = allow;
    }

    pub fn set_swipe_min_velocity(&mut self, velocity: f32) {
        self.state.config.swipe_min_velocity = velocity;
    }

    pub fn delegate(&self) -> Option<&D> {
        self.delegate.as_ref()
    }

    pub fn delegate_mut(&mut self) -> Option<&mut D> {
        self.delegate.as_mut()
    }

    /// Install `delegate`, returning the previous one after detaching it.
    ///
    /// Any session, animation or delayed task belonging to the previous
    /// delegate is dropped without callbacks and the position is put back
    /// to rest before the new delegate is initialized.
    pub fn set_delegate(&mut self, delegate: D) -> Option<D> {
        let previous = self.take_delegate();

        log::debug!("attaching drag delegate");
        self.delegate = Some(delegate);
        self.dispatch(|d, view| d.init(view));
        self.state.top_view = self.dispatch(|d, view| d.top_view(view)).flatten();
        let offset_px = self.state.offset_px;
        self.state.project_offset(offset_px);

        self.state.setup_pending = true;
        self.run_pending_setup();
        previous
    }

    /// Detach and return the current delegate.
    pub fn take_delegate(&mut self) -> Option<D> {
        if self.delegate.is_none() {
            return None;
        }
        self.dispatch(|d, view| d.on_detach(view));
        log::debug!("detaching drag delegate");

        self.state.animation = None;
        self.state.delayed = None;
        self.state.gesture = GestureTracker::default();
        self.state.setup_pending = false;
        self.state.position = 0.0;
        self.state.direction = Direction::None;
        self.state.project_offset(0.0);
        self.state.top_view = None;
        self.delegate.take()
    }

    /// Run `f` against the delegate with a context, applying its commands afterwards.
    pub fn with_delegate<R>(&mut self, f: impl FnOnce(&mut D, &mut DragContext<'_>) -> R) -> Option<R> {
        self.dispatch(f)
    }

    /// Report the container width in pixels.
    ///
    /// The first layout with a positive width triggers the delegate's setup.
    /// The normalized position is preserved across width changes.
    pub fn on_layout(&mut self, width: f32) {
        if width == self.state.width {
            return;
        }
        self.state.width = width.max(0.0);
        let offset_px = self.state.position * self.state.width;
        self.state.project_offset(offset_px);
        self.run_pending_setup();
    }

    fn run_pending_setup(&mut self) {
        if self.state.setup_pending && self.state.width > 0.0 && self.delegate.is_some() {
            self.state.setup_pending = false;
            self.dispatch(|d, view| d.on_setup(view));
        }
    }

    /// Feed a pointer event. Returns true when the engine handled or claimed it.
    pub fn on_pointer_event(&mut self, event: PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => self.on_pointer_down(event.x, event.y, event.time_ms),
            PointerEventKind::Move => self.on_pointer_move(event.x, event.y, event.time_ms),
            PointerEventKind::Up => self.on_pointer_up(event.x, event.y, event.time_ms),
            PointerEventKind::Cancel => self.on_pointer_cancel(),
        }
    }

    pub fn on_pointer_down(&mut self, x: f32, y: f32, time_ms: i64) -> bool {
        if self.delegate.is_none() {
            return false;
        }
        self.state.gesture.press(x, y, time_ms);
        true
    }

    /// Returns true while the gesture is claimed as a drag. Until then the
    /// movement stays available to content underneath.
    pub fn on_pointer_move(&mut self, x: f32, y: f32, time_ms: i64) -> bool {
        if self.delegate.is_none() || !self.state.gesture.pointer_down {
            return false;
        }
        self.state.gesture.velocity.add_sample(time_ms, x);

        if !self.state.drag_enabled || self.state.gesture.drag_ended {
            return false;
        }

        if let Some(session) = self.state.gesture.session {
            self.on_drag(x - session.prev_x);
            if let Some(session) = self.state.gesture.session.as_mut() {
                session.prev_x = x;
            }
            return true;
        }

        if !self
            .state
            .gesture
            .passes_slop(x, y, self.state.config.touch_slop)
        {
            return false;
        }

        if self.state.width <= 0.0 {
            log::warn!("ignoring drag before the container has been laid out");
            return false;
        }

        let dx = x - self.state.gesture.initial_x;
        self.begin_drag(x, dx)
    }

    fn begin_drag(&mut self, x: f32, dx: f32) -> bool {
        let direction = if self.state.offset_px == 0.0 {
            let direction = Direction::of(dx);
            if !self
                .dispatch(|d, view| d.can_drag(view, direction))
                .unwrap_or(false)
            {
                log::trace!("drag towards {direction:?} rejected by delegate");
                return false;
            }
            direction
        } else {
            // An open view can only be moved along its own side.
            Direction::of(self.state.offset_px)
        };

        log::debug!("drag began towards {direction:?}");
        // The gesture takes over the position from any running animation.
        self.stop_animation();
        self.state.gesture.session = Some(DragSession {
            initial_direction: direction,
            prev_x: x,
        });
        self.state.direction = direction;
        self.state.delayed = None;
        self.dispatch(|d, view| d.on_drag_begin(view, direction));
        true
    }

    fn on_drag(&mut self, dx_px: f32) {
        let Some(session) = self.state.gesture.session else {
            return;
        };
        let width = self.state.width;
        let x0 = self.state.offset_px / width;
        let mut dx = dx_px / width;

        let mut direction = Direction::of(x0 + dx);
        if direction != self.state.direction
            && !direction.is_none()
            && direction != session.initial_direction
        {
            let crossing_allowed = self.state.config.allow_cross_drag
                && self
                    .dispatch(|d, view| d.can_drag(view, direction))
                    .unwrap_or(false);
            if !crossing_allowed {
                direction = Direction::None;
            }
        }

        if direction.is_none() {
            self.set_position(0.0);
            return;
        }

        let movement = Direction::of(dx);
        let factor = self
            .dispatch(|d, view| d.drag_factor(view, direction, movement, x0, dx))
            .unwrap_or(1.0);
        let max = self
            .dispatch(|d, view| d.max_drag(view, direction))
            .unwrap_or(0.0);

        dx *= factor;
        let mut x1 = x0 + dx;
        if max > 0.0 && x1.abs() > max {
            x1 = max * direction.sign();
        }

        let x1 = self
            .dispatch(|d, view| d.will_drag(view, direction, x0, x1))
            .unwrap_or(x1);
        self.set_position(x1);
    }

    pub fn on_pointer_up(&mut self, _x: f32, _y: f32, _time_ms: i64) -> bool {
        if self.delegate.is_none() || !self.state.gesture.pointer_down {
            return false;
        }

        if !self.state.gesture.is_dragging() {
            self.state.gesture.finish();
            self.dispatch(|d, view| d.on_click(view));
            return true;
        }

        let velocity = self.state.gesture.velocity.velocity_per_ms();
        let speed = velocity.abs();
        let speed_dip = speed / self.state.config.density;

        let mut did_swipe = false;
        if speed_dip >= self.state.config.swipe_min_velocity {
            let swipe = SwipeRelease {
                direction: Direction::of(velocity),
                x: self.state.position,
                velocity: speed,
                velocity_dip: speed_dip,
            };
            let direction = self.state.direction;
            did_swipe = self
                .dispatch(|d, view| d.on_swipe(view, direction, swipe))
                .unwrap_or(false);
            log::debug!("swipe {swipe:?} handled: {did_swipe}");
        }

        self.end_drag(did_swipe);
        true
    }

    /// Abort the gesture. Never treated as a swipe.
    pub fn on_pointer_cancel(&mut self) -> bool {
        if self.delegate.is_none() {
            return false;
        }
        self.end_drag(false);
        true
    }

    fn end_drag(&mut self, did_swipe: bool) {
        if self.state.gesture.finish().is_none() {
            return;
        }
        let direction = self.state.direction;
        let x = self.state.position;
        // A drag that never moved the view leaves it at rest.
        self.state.direction = Direction::of(x);
        log::debug!("drag ended towards {direction:?} at {x}");
        if !did_swipe {
            self.dispatch(|d, view| d.on_drag_end(view, direction, x));
        }
    }

    /// Move the top view to the normalized position `x1`.
    ///
    /// Does nothing if the pixel offset would not change. Otherwise updates
    /// the position and direction, notifies `on_changed`, and `on_reset`
    /// when the view came to rest.
    pub fn set_position(&mut self, x1: f32) {
        let offset_px = x1 * self.state.width;
        if offset_px == self.state.offset_px {
            return;
        }

        let x0 = self.state.position;
        self.state.position = x1;
        self.state.project_offset(offset_px);
        self.state.direction = Direction::of(x1);
        log::trace!("position {x0} -> {x1}");

        let direction = self.state.direction;
        let dragging = self.state.gesture.is_dragging();
        self.dispatch(|d, view| d.on_changed(view, direction, x0, x1, dragging));

        if direction.is_none() {
            self.dispatch(|d, view| d.on_reset(view));
        }
    }

    /// Return to rest, immediately or with a snap animation.
    pub fn reset(&mut self, animate: bool) {
        if animate {
            self.snap_to_position(0.0, None);
        } else {
            self.stop_animation();
            self.set_position(0.0);
        }
    }

    /// Animate to `x1` over a duration proportional to the distance.
    pub fn snap_to_position(&mut self, x1: f32, tag: Option<CompletionTag>) {
        let config = &self.state.config;
        let duration = snap_duration_millis(
            self.state.position - x1,
            config.snap_min_duration_ms,
            config.snap_max_duration_ms,
        );
        self.animate_to_position(x1, AnimationSpec::tween(duration, Easing::Decelerate), tag);
    }

    /// Start animating to `x1`, replacing any running animation.
    pub fn animate_to_position(&mut self, x1: f32, spec: AnimationSpec, tag: Option<CompletionTag>) {
        self.stop_animation();
        log::trace!(
            "animating {} -> {x1} over {}ms",
            self.state.position,
            spec.duration_millis
        );
        self.state.animation = Some(PositionAnimation {
            tween: Tween::new(self.state.position, x1, spec),
            tag,
        });
    }

    /// Cancel the running animation. Its completion is never reported.
    pub fn stop_animation(&mut self) {
        if self.state.animation.take().is_some() {
            log::trace!("animation cancelled at {}", self.state.position);
        }
    }

    /// Advance delayed tasks and the running animation to `frame_time_nanos`.
    pub fn on_frame(&mut self, frame_time_nanos: u64) {
        self.advance_delayed(frame_time_nanos);
        self.advance_animation(frame_time_nanos);
    }

    fn advance_delayed(&mut self, frame_time_nanos: u64) {
        let Some(task) = self.state.delayed.as_mut() else {
            return;
        };
        let scheduled_at = *task.scheduled_at_nanos.get_or_insert(frame_time_nanos);
        let elapsed_ms = frame_time_nanos.saturating_sub(scheduled_at) / 1_000_000;
        if elapsed_ms >= task.delay_ms {
            let tag = task.tag;
            self.state.delayed = None;
            self.dispatch(|d, view| d.on_delayed(view, tag));
        }
    }

    fn advance_animation(&mut self, frame_time_nanos: u64) {
        let Some(animation) = self.state.animation.as_mut() else {
            return;
        };
        let frame = animation.tween.sample(frame_time_nanos);
        let completed = if frame.finished {
            self.state.animation.take()
        } else {
            None
        };

        self.set_position(frame.value);

        if let Some(tag) = completed.and_then(|animation| animation.tag) {
            self.dispatch(|d, view| d.on_animation_end(view, tag));
        }
    }

    fn apply(&mut self, command: DragCommand) {
        match command {
            DragCommand::SetPosition(x) => self.set_position(x),
            DragCommand::Reset { animate } => self.reset(animate),
            DragCommand::SnapTo { x, tag } => self.snap_to_position(x, tag),
            DragCommand::AnimateTo { x, spec, tag } => self.animate_to_position(x, spec, tag),
            DragCommand::StopAnimation => self.stop_animation(),
            DragCommand::SetDragEnabled(enabled) => self.set_drag_enabled(enabled),
            DragCommand::PostDelayed { tag, delay_ms } => {
                self.state.delayed = Some(DelayedTask {
                    tag,
                    delay_ms,
                    scheduled_at_nanos: None,
                });
            }
            DragCommand::CancelDelayed => self.state.delayed = None,
        }
    }

    /// Invoke the delegate, then apply the commands it queued, depth first.
    fn dispatch<R>(&mut self, f: impl FnOnce(&mut D, &mut DragContext<'_>) -> R) -> Option<R> {
        let delegate = self.delegate.as_mut()?;
        let mut commands = CommandQueue::new();
        let result = {
            let mut view = DragContext::new(&self.state, &mut commands);
            f(delegate, &mut view)
        };
        for command in commands {
            self.apply(command);
        }
        Some(result)
    }
}

use crate::config::DragConfig;
use crate::delegate::CompletionTag;
use crate::drag_view::DragState;
use dragkit_animation::{AnimationSpec, Easing};
use dragkit_foundation::Direction;
use smallvec::SmallVec;

/// Deferred engine operation queued by a delegate callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DragCommand {
    SetPosition(f32),
    Reset {
        animate: bool,
    },
    SnapTo {
        x: f32,
        tag: Option<CompletionTag>,
    },
    AnimateTo {
        x: f32,
        spec: AnimationSpec,
        tag: Option<CompletionTag>,
    },
    StopAnimation,
    SetDragEnabled(bool),
    PostDelayed {
        tag: CompletionTag,
        delay_ms: u64,
    },
    CancelDelayed,
}

pub(crate) type CommandQueue = SmallVec<[DragCommand; 4]>;

/// A delegate's view of the engine during a callback.
///
/// Reads reflect the engine at the moment the callback started. Commands are
/// applied in order right after the callback returns.
pub struct DragContext<'a> {
    state: &'a DragState,
    commands: &'a mut CommandQueue,
}

impl<'a> DragContext<'a> {
    pub(crate) fn new(state: &'a DragState, commands: &'a mut CommandQueue) -> Self {
        Self { state, commands }
    }

    /// Container width in pixels. Zero until laid out.
    pub fn width(&self) -> f32 {
        self.state.width
    }

    /// Current normalized position.
    pub fn position(&self) -> f32 {
        self.state.position
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn is_open(&self) -> bool {
        !self.state.direction.is_none()
    }

    /// Whether a drag session is in progress.
    pub fn is_dragging(&self) -> bool {
        self.state.gesture.is_dragging()
    }

    pub fn is_drag_enabled(&self) -> bool {
        self.state.drag_enabled
    }

    pub fn is_animating(&self) -> bool {
        self.state.animation.is_some()
    }

    pub fn config(&self) -> &DragConfig {
        &self.state.config
    }

    /// Move the top view to `x` without animating.
    pub fn set_position(&mut self, x: f32) {
        self.commands.push(DragCommand::SetPosition(x));
    }

    /// Return to rest, cancelling any running animation.
    pub fn reset(&mut self, animate: bool) {
        self.commands.push(DragCommand::Reset { animate });
    }

    /// Animate to `x` with a distance-scaled duration.
    pub fn snap_to(&mut self, x: f32) {
        self.commands.push(DragCommand::SnapTo { x, tag: None });
    }

    /// Like [`DragContext::snap_to`], reporting `tag` when the snap completes.
    pub fn snap_to_then(&mut self, x: f32, tag: CompletionTag) {
        self.commands.push(DragCommand::SnapTo { x, tag: Some(tag) });
    }

    pub fn animate_to(
        &mut self,
        x: f32,
        duration_ms: u64,
        easing: Easing,
        tag: Option<CompletionTag>,
    ) {
        self.commands.push(DragCommand::AnimateTo {
            x,
            spec: AnimationSpec::tween(duration_ms, easing),
            tag,
        });
    }

    /// Cancel the running animation, leaving the position where it is.
    pub fn stop_animation(&mut self) {
        self.commands.push(DragCommand::StopAnimation);
    }

    pub fn set_drag_enabled(&mut self, enabled: bool) {
        self.commands.push(DragCommand::SetDragEnabled(enabled));
    }

    /// Report `tag` through [`DragDelegate::on_delayed`](crate::DragDelegate::on_delayed)
    /// after `delay_ms` of frame time. Replaces any pending delayed task.
    pub fn post_delayed(&mut self, tag: CompletionTag, delay_ms: u64) {
        self.commands.push(DragCommand::PostDelayed { tag, delay_ms });
    }

    pub fn cancel_delayed(&mut self) {
        self.commands.push(DragCommand::CancelDelayed);
    }
}

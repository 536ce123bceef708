//! A delegate that records every contract call it receives.

use dragkit_foundation::{ContentState, Direction, SharedContent};
use dragkit_view::{CompletionTag, DragContext, DragDelegate, SwipeRelease};
use std::cell::RefCell;
use std::rc::Rc;

/// One call into [`DragDelegate`], with its arguments.
#[derive(Clone, Debug, PartialEq)]
pub enum ContractCall {
    Init,
    Setup,
    Detach,
    CanDrag(Direction),
    DragBegin(Direction),
    WillDrag {
        direction: Direction,
        x0: f32,
        x1: f32,
    },
    Changed {
        direction: Direction,
        x0: f32,
        x1: f32,
        dragging: bool,
    },
    Swipe {
        direction: Direction,
        swipe: SwipeRelease,
    },
    Reset,
    DragEnd {
        direction: Direction,
        x: f32,
    },
    Click,
    AnimationEnd(CompletionTag),
    Delayed(CompletionTag),
}

/// Allows dragging both ways at full tracking and records everything.
///
/// Optionally resets the view when a drag ends, the way most real
/// delegates do.
pub struct RecordingDelegate {
    calls: Vec<ContractCall>,
    top_view: Rc<RefCell<ContentState>>,
    allow_left: bool,
    allow_right: bool,
    reset_on_drag_end: bool,
}

impl Default for RecordingDelegate {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDelegate {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            top_view: ContentState::default().shared(),
            allow_left: true,
            allow_right: true,
            reset_on_drag_end: false,
        }
    }

    pub fn allowing(mut self, left: bool, right: bool) -> Self {
        self.allow_left = left;
        self.allow_right = right;
        self
    }

    pub fn resetting_on_drag_end(mut self) -> Self {
        self.reset_on_drag_end = true;
        self
    }

    pub fn calls(&self) -> &[ContractCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// The headless top view the engine positions.
    pub fn top_view(&self) -> Rc<RefCell<ContentState>> {
        self.top_view.clone()
    }

    /// Every committed `(x0, x1)` pair, in order.
    pub fn position_changes(&self) -> Vec<(f32, f32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ContractCall::Changed { x0, x1, .. } => Some((*x0, *x1)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&ContractCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

impl DragDelegate for RecordingDelegate {
    fn init(&mut self, _view: &mut DragContext<'_>) {
        self.calls.push(ContractCall::Init);
    }

    fn on_setup(&mut self, _view: &mut DragContext<'_>) {
        self.calls.push(ContractCall::Setup);
    }

    fn top_view(&mut self, _view: &mut DragContext<'_>) -> Option<SharedContent> {
        let top_view: SharedContent = self.top_view.clone();
        Some(top_view)
    }

    fn on_detach(&mut self, _view: &mut DragContext<'_>) {
        self.calls.push(ContractCall::Detach);
    }

    fn can_drag(&mut self, _view: &mut DragContext<'_>, direction: Direction) -> bool {
        self.calls.push(ContractCall::CanDrag(direction));
        match direction {
            Direction::Left => self.allow_left,
            Direction::Right => self.allow_right,
            Direction::None => false,
        }
    }

    fn on_drag_begin(&mut self, _view: &mut DragContext<'_>, direction: Direction) {
        self.calls.push(ContractCall::DragBegin(direction));
    }

    fn will_drag(
        &mut self,
        _view: &mut DragContext<'_>,
        direction: Direction,
        x0: f32,
        x1: f32,
    ) -> f32 {
        self.calls.push(ContractCall::WillDrag { direction, x0, x1 });
        x1
    }

    fn on_changed(
        &mut self,
        _view: &mut DragContext<'_>,
        direction: Direction,
        x0: f32,
        x1: f32,
        dragging: bool,
    ) {
        self.calls.push(ContractCall::Changed {
            direction,
            x0,
            x1,
            dragging,
        });
    }

    fn on_swipe(
        &mut self,
        _view: &mut DragContext<'_>,
        direction: Direction,
        swipe: SwipeRelease,
    ) -> bool {
        self.calls.push(ContractCall::Swipe { direction, swipe });
        false
    }

    fn on_reset(&mut self, _view: &mut DragContext<'_>) {
        self.calls.push(ContractCall::Reset);
    }

    fn on_drag_end(&mut self, view: &mut DragContext<'_>, direction: Direction, x: f32) {
        self.calls.push(ContractCall::DragEnd { direction, x });
        if self.reset_on_drag_end {
            view.reset(true);
        }
    }

    fn on_click(&mut self, _view: &mut DragContext<'_>) {
        self.calls.push(ContractCall::Click);
    }

    fn on_animation_end(&mut self, _view: &mut DragContext<'_>, tag: CompletionTag) {
        self.calls.push(ContractCall::AnimationEnd(tag));
    }

    fn on_delayed(&mut self, _view: &mut DragContext<'_>, tag: CompletionTag) {
        self.calls.push(ContractCall::Delayed(tag));
    }
}

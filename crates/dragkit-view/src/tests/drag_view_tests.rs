use crate::{CompletionTag, DragConfig, DragContext, DragDelegate, DragView, SwipeRelease};
use dragkit_animation::{AnimationSpec, Easing};
use dragkit_foundation::{ContentState, Direction, SharedContent};
use std::cell::RefCell;
use std::rc::Rc;

const MS: u64 = 1_000_000;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Init,
    Setup,
    Detach,
    DragBegin(Direction),
    Changed {
        direction: Direction,
        x0: f32,
        x1: f32,
        dragging: bool,
    },
    Swipe(Direction, SwipeRelease),
    Reset,
    DragEnd(Direction, f32),
    Click,
    AnimationEnd(CompletionTag),
    Delayed(CompletionTag),
}

pub(crate) struct Recorder {
    calls: Vec<Call>,
    left: bool,
    right: bool,
    factor: f32,
    max: f32,
    accept_swipe: bool,
    reset_on_end: bool,
    will_drag_override: Option<f32>,
    top: Rc<RefCell<ContentState>>,
}

impl Recorder {
    fn new() -> Self {
        Self {
            calls: Vec::new(),
            left: true,
            right: true,
            factor: 1.0,
            max: 0.0,
            accept_swipe: false,
            reset_on_end: false,
            will_drag_override: None,
            top: ContentState::with_width(1000.0).shared(),
        }
    }

    fn right_only() -> Self {
        Self {
            left: false,
            ..Self::new()
        }
    }

    fn changes(&self) -> Vec<(f32, f32)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Changed { x0, x1, .. } => Some((*x0, *x1)),
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

impl DragDelegate for Recorder {
    fn init(&mut self, _view: &mut DragContext<'_>) {
        self.calls.push(Call::Init);
    }

    fn on_setup(&mut self, _view: &mut DragContext<'_>) {
        self.calls.push(Call::Setup);
    }

    fn top_view(&mut self, _view: &mut DragContext<'_>) -> Option<SharedContent> {
        let top: SharedContent = self.top.clone();
        Some(top)
    }

    fn on_detach(&mut self, _view: &mut DragContext<'_>) {
        self.calls.push(Call::Detach);
    }

    fn can_drag(&mut self, _view: &mut DragContext<'_>, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::None => false,
        }
    }

    fn max_drag(&mut self, _view: &mut DragContext<'_>, _direction: Direction) -> f32 {
        self.max
    }

    fn drag_factor(
        &mut self,
        _view: &mut DragContext<'_>,
        _direction: Direction,
        _movement: Direction,
        _x0: f32,
        _dx: f32,
    ) -> f32 {
        self.factor
    }

    fn on_drag_begin(&mut self, _view: &mut DragContext<'_>, direction: Direction) {
        self.calls.push(Call::DragBegin(direction));
    }

    fn will_drag(
        &mut self,
        _view: &mut DragContext<'_>,
        _direction: Direction,
        _x0: f32,
        x1: f32,
    ) -> f32 {
        self.will_drag_override.unwrap_or(x1)
    }

    fn on_changed(
        &mut self,
        _view: &mut DragContext<'_>,
        direction: Direction,
        x0: f32,
        x1: f32,
        dragging: bool,
    ) {
        self.calls.push(Call::Changed {
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
        self.calls.push(Call::Swipe(direction, swipe));
        self.accept_swipe
    }

    fn on_reset(&mut self, _view: &mut DragContext<'_>) {
        self.calls.push(Call::Reset);
    }

    fn on_drag_end(&mut self, view: &mut DragContext<'_>, direction: Direction, x: f32) {
        self.calls.push(Call::DragEnd(direction, x));
        if self.reset_on_end {
            view.reset(true);
        }
    }

    fn on_click(&mut self, _view: &mut DragContext<'_>) {
        self.calls.push(Call::Click);
    }

    fn on_animation_end(&mut self, _view: &mut DragContext<'_>, tag: CompletionTag) {
        self.calls.push(Call::AnimationEnd(tag));
    }

    fn on_delayed(&mut self, _view: &mut DragContext<'_>, tag: CompletionTag) {
        self.calls.push(Call::Delayed(tag));
    }
}

fn laid_out(recorder: Recorder) -> DragView<Recorder> {
    laid_out_with(recorder, DragConfig::default())
}

fn laid_out_with(recorder: Recorder, config: DragConfig) -> DragView<Recorder> {
    let mut view = DragView::new(config);
    view.set_delegate(recorder);
    view.on_layout(1000.0);
    view
}

fn calls(view: &DragView<Recorder>) -> &[Call] {
    &view.delegate().expect("delegate attached").calls
}

fn recorder(view: &DragView<Recorder>) -> &Recorder {
    view.delegate().expect("delegate attached")
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

/// Press at x = 500 and start a rightward drag without moving the view.
fn begin_right_drag(view: &mut DragView<Recorder>) {
    assert!(view.on_pointer_down(500.0, 50.0, 0));
    assert!(view.on_pointer_move(520.0, 50.0, 10));
    assert!(view.is_dragging());
}

fn run_frames(view: &mut DragView<Recorder>, until_ms: u64) {
    let mut t = 0;
    while t <= until_ms {
        view.on_frame(t * MS);
        t += 16;
    }
    view.on_frame(until_ms * MS);
}

#[test]
fn events_without_delegate_are_ignored() {
    let mut view: DragView<Recorder> = DragView::default();
    view.on_layout(1000.0);
    assert!(!view.on_pointer_down(10.0, 10.0, 0));
    assert!(!view.on_pointer_move(200.0, 10.0, 10));
    assert!(!view.on_pointer_up(200.0, 10.0, 20));
    assert!(!view.on_pointer_cancel());
    assert_eq!(view.position(), 0.0);
}

#[test]
fn setup_waits_for_layout() {
    let mut view = DragView::new(DragConfig::default());
    view.set_delegate(Recorder::new());
    assert_eq!(calls(&view), &[Call::Init]);

    view.on_layout(1000.0);
    assert_eq!(calls(&view), &[Call::Init, Call::Setup]);

    view.on_layout(800.0);
    assert_eq!(calls(&view), &[Call::Init, Call::Setup]);
}

#[test]
fn attaching_after_layout_sets_up_immediately() {
    let mut view = DragView::new(DragConfig::default());
    view.on_layout(1000.0);
    view.set_delegate(Recorder::new());
    assert_eq!(calls(&view), &[Call::Init, Call::Setup]);
}

#[test]
fn reattaching_detaches_previous_delegate() {
    let mut view = laid_out(Recorder::new());
    view.set_position(0.4);

    let previous = view.set_delegate(Recorder::new()).expect("previous delegate");
    assert_eq!(previous.calls.last(), Some(&Call::Detach));
    assert_eq!(previous.top.borrow().x, 0.0);
    assert_eq!(view.position(), 0.0);
    assert_eq!(calls(&view), &[Call::Init, Call::Setup]);
}

#[test]
fn set_position_projects_onto_top_view() {
    let mut view = laid_out(Recorder::new());
    view.set_position(0.25);
    assert_eq!(recorder(&view).top.borrow().x, 250.0);
    assert_eq!(view.direction(), Direction::Right);

    view.on_layout(500.0);
    assert_eq!(recorder(&view).top.borrow().x, 125.0);
    assert_eq!(view.position(), 0.25);
}

#[test]
fn set_position_is_idempotent() {
    let mut view = laid_out(Recorder::new());
    view.set_position(0.3);
    view.set_position(0.3);

    assert_eq!(recorder(&view).changes(), vec![(0.0, 0.3)]);
}

#[test]
fn returning_to_rest_fires_reset() {
    let mut view = laid_out(Recorder::new());
    view.set_position(-0.3);
    assert_eq!(view.direction(), Direction::Left);
    view.set_position(0.0);

    assert_eq!(view.direction(), Direction::None);
    assert_eq!(recorder(&view).count(|c| *c == Call::Reset), 1);
    assert_eq!(calls(&view).last(), Some(&Call::Reset));
}

#[test]
fn small_or_vertical_moves_are_not_claimed() {
    let mut view = laid_out(Recorder::new());
    assert!(view.on_pointer_down(500.0, 50.0, 0));
    assert!(!view.on_pointer_move(506.0, 50.0, 10));
    assert!(!view.on_pointer_move(520.0, 80.0, 20));
    assert!(!view.is_dragging());

    assert!(view.on_pointer_up(520.0, 80.0, 30));
    assert_eq!(calls(&view).last(), Some(&Call::Click));
}

#[test]
fn drag_in_disallowed_direction_is_not_claimed() {
    let mut view = laid_out(Recorder::right_only());
    assert!(view.on_pointer_down(500.0, 50.0, 0));
    assert!(!view.on_pointer_move(480.0, 50.0, 10));
    assert!(!view.is_dragging());
    assert_eq!(recorder(&view).count(|c| matches!(c, Call::DragBegin(_))), 0);
}

#[test]
fn drag_follows_pointer() {
    let mut view = laid_out(Recorder::new());
    begin_right_drag(&mut view);
    assert_eq!(calls(&view).last(), Some(&Call::DragBegin(Direction::Right)));
    assert_eq!(view.position(), 0.0);

    assert!(view.on_pointer_move(720.0, 50.0, 20));
    assert!(approx(view.position(), 0.2));
    assert!(matches!(
        calls(&view).last(),
        Some(Call::Changed {
            direction: Direction::Right,
            dragging: true,
            ..
        })
    ));
}

#[test]
fn open_view_keeps_its_side_when_dragged_again() {
    let mut view = laid_out(Recorder::new());
    view.set_position(0.3);

    assert!(view.on_pointer_down(500.0, 50.0, 0));
    // Moving left on a view open to the right closes it instead of opening left.
    assert!(view.on_pointer_move(480.0, 50.0, 10));
    assert_eq!(calls(&view).last(), Some(&Call::DragBegin(Direction::Right)));
    assert!(view.on_pointer_move(380.0, 50.0, 20));
    assert!(approx(view.position(), 0.2));
}

#[test]
fn drag_factor_scales_movement() {
    let mut delegate = Recorder::new();
    delegate.factor = 0.5;
    let mut view = laid_out(delegate);
    begin_right_drag(&mut view);

    view.on_pointer_move(720.0, 50.0, 20);
    assert!(approx(view.position(), 0.1));
}

#[test]
fn max_drag_is_a_hard_stop() {
    let mut delegate = Recorder::new();
    delegate.max = 0.3;
    let mut view = laid_out(delegate);
    begin_right_drag(&mut view);

    view.on_pointer_move(1000.0, 50.0, 20);
    assert_eq!(view.position(), 0.3);
}

#[test]
fn will_drag_has_the_last_word() {
    let mut delegate = Recorder::new();
    delegate.will_drag_override = Some(0.05);
    let mut view = laid_out(delegate);
    begin_right_drag(&mut view);

    view.on_pointer_move(900.0, 50.0, 20);
    assert_eq!(view.position(), 0.05);
}

#[test]
fn cross_drag_is_clamped_to_rest_by_default() {
    let mut view = laid_out(Recorder::new());
    begin_right_drag(&mut view);
    view.on_pointer_move(600.0, 50.0, 20);
    assert!(approx(view.position(), 0.08));

    view.on_pointer_move(400.0, 50.0, 30);
    assert_eq!(view.position(), 0.0);
    assert_eq!(view.direction(), Direction::None);

    view.on_pointer_move(300.0, 50.0, 40);
    assert_eq!(view.position(), 0.0);
    assert!(recorder(&view).changes().iter().all(|(_, x1)| *x1 >= 0.0));

    // Back on the original side the drag resumes.
    view.on_pointer_move(450.0, 50.0, 50);
    assert!(approx(view.position(), 0.15));
}

#[test]
fn cross_drag_continues_when_allowed() {
    let mut view = laid_out_with(Recorder::new(), DragConfig::default().with_cross_drag(true));
    begin_right_drag(&mut view);
    view.on_pointer_move(600.0, 50.0, 20);
    view.on_pointer_move(400.0, 50.0, 30);

    assert!(approx(view.position(), -0.12));
    assert_eq!(view.direction(), Direction::Left);
}

#[test]
fn cross_drag_still_needs_delegate_approval() {
    let mut view = laid_out_with(
        Recorder::right_only(),
        DragConfig::default().with_cross_drag(true),
    );
    begin_right_drag(&mut view);
    view.on_pointer_move(600.0, 50.0, 20);
    view.on_pointer_move(400.0, 50.0, 30);

    assert_eq!(view.position(), 0.0);
}

#[test]
fn slow_release_ends_drag() {
    let mut view = laid_out(Recorder::new());
    begin_right_drag(&mut view);
    view.on_pointer_move(620.0, 50.0, 110);
    view.on_pointer_move(720.0, 50.0, 210);
    assert!(view.on_pointer_up(720.0, 50.0, 300));

    assert!(!view.is_dragging());
    assert_eq!(recorder(&view).count(|c| matches!(c, Call::Swipe(..))), 0);
    let end = calls(&view).last().cloned();
    assert!(matches!(end, Some(Call::DragEnd(Direction::Right, x)) if approx(x, 0.2)));
}

fn fast_right_drag(view: &mut DragView<Recorder>) {
    assert!(view.on_pointer_down(100.0, 50.0, 0));
    assert!(view.on_pointer_move(130.0, 50.0, 10));
    view.on_pointer_move(230.0, 50.0, 20);
    view.on_pointer_move(330.0, 50.0, 30);
    assert!(view.on_pointer_up(330.0, 50.0, 30));
}

#[test]
fn fast_release_is_offered_as_swipe() {
    let mut view = laid_out(Recorder::new());
    fast_right_drag(&mut view);

    let swipe = calls(&view)
        .iter()
        .find_map(|call| match call {
            Call::Swipe(direction, swipe) => Some((*direction, *swipe)),
            _ => None,
        })
        .expect("swipe offered");
    assert_eq!(swipe.0, Direction::Right);
    assert_eq!(swipe.1.direction, Direction::Right);
    assert!(approx(swipe.1.x, 0.2));
    assert!(swipe.1.velocity > 5.0, "velocity {}", swipe.1.velocity);
    assert_eq!(swipe.1.velocity, swipe.1.velocity_dip);

    // Unhandled swipes still end the drag normally.
    assert!(matches!(calls(&view).last(), Some(Call::DragEnd(Direction::Right, _))));
}

#[test]
fn handled_swipe_suppresses_drag_end() {
    let mut delegate = Recorder::new();
    delegate.accept_swipe = true;
    let mut view = laid_out(delegate);
    fast_right_drag(&mut view);

    assert_eq!(recorder(&view).count(|c| matches!(c, Call::Swipe(..))), 1);
    assert_eq!(recorder(&view).count(|c| matches!(c, Call::DragEnd(..))), 0);
}

#[test]
fn density_scales_swipe_threshold() {
    let mut view = laid_out_with(Recorder::new(), DragConfig::default().with_density(10.0));
    fast_right_drag(&mut view);

    // ~10 px/ms is only ~1 dip/ms at density 10.
    assert_eq!(recorder(&view).count(|c| matches!(c, Call::Swipe(..))), 0);
}

#[test]
fn cancel_never_swipes() {
    let mut view = laid_out(Recorder::new());
    assert!(view.on_pointer_down(100.0, 50.0, 0));
    view.on_pointer_move(130.0, 50.0, 10);
    view.on_pointer_move(330.0, 50.0, 20);
    assert!(view.on_pointer_cancel());

    assert_eq!(recorder(&view).count(|c| matches!(c, Call::Swipe(..))), 0);
    assert!(matches!(calls(&view).last(), Some(Call::DragEnd(Direction::Right, _))));
    assert!(!view.on_pointer_move(600.0, 50.0, 30));
}

#[test]
fn disabled_drag_still_clicks() {
    let mut view = laid_out(Recorder::new());
    view.set_drag_enabled(false);
    assert!(view.on_pointer_down(100.0, 50.0, 0));
    assert!(!view.on_pointer_move(400.0, 50.0, 10));
    assert!(view.on_pointer_up(400.0, 50.0, 20));

    assert_eq!(view.position(), 0.0);
    assert_eq!(calls(&view).last(), Some(&Call::Click));
}

#[test]
fn reset_converges_to_rest_from_either_side() {
    for start in [0.6f32, -0.45] {
        let mut view = laid_out(Recorder::new());
        view.set_position(start);
        view.reset(true);
        assert!(view.is_animating());
        run_frames(&mut view, 400);

        assert_eq!(view.position(), 0.0);
        assert_eq!(view.direction(), Direction::None);
        assert!(!view.is_animating());
        assert_eq!(calls(&view).last(), Some(&Call::Reset));
    }
}

#[test]
fn snap_duration_follows_distance() {
    let mut view = laid_out(Recorder::new());
    view.set_position(0.2);
    view.reset(true);

    // 0.2 * 200ms + 0.8 * 50ms = 80ms, decelerating.
    view.on_frame(0);
    assert!(approx(view.position(), 0.2));
    view.on_frame(40 * MS);
    assert!(approx(view.position(), 0.05));
    view.on_frame(80 * MS);
    assert_eq!(view.position(), 0.0);
    assert!(!view.is_animating());
}

#[test]
fn immediate_reset_cancels_animation() {
    let mut view = laid_out(Recorder::new());
    view.animate_to_position(0.8, AnimationSpec::linear(100), Some(CompletionTag(1)));
    view.on_frame(0);
    view.on_frame(50 * MS);
    view.reset(false);

    assert_eq!(view.position(), 0.0);
    run_frames(&mut view, 200);
    assert_eq!(view.position(), 0.0);
    assert_eq!(recorder(&view).count(|c| matches!(c, Call::AnimationEnd(_))), 0);
}

#[test]
fn completion_is_reported_once_and_only_when_not_cancelled() {
    let mut view = laid_out(Recorder::new());
    view.animate_to_position(0.5, AnimationSpec::linear(100), Some(CompletionTag(1)));
    view.on_frame(0);
    view.on_frame(30 * MS);
    let stopped_at = view.position();
    view.animate_to_position(-0.5, AnimationSpec::tween(100, Easing::Decelerate), Some(CompletionTag(2)));
    assert!(approx(view.position(), stopped_at));

    run_frames(&mut view, 300);
    assert_eq!(view.position(), -0.5);
    let ends: Vec<_> = calls(&view)
        .iter()
        .filter(|c| matches!(c, Call::AnimationEnd(_)))
        .cloned()
        .collect();
    assert_eq!(ends, vec![Call::AnimationEnd(CompletionTag(2))]);
}

#[test]
fn stop_animation_leaves_position_in_place() {
    let mut view = laid_out(Recorder::new());
    view.animate_to_position(1.0, AnimationSpec::linear(100), None);
    view.on_frame(0);
    view.on_frame(50 * MS);
    view.stop_animation();
    view.on_frame(100 * MS);

    assert!(approx(view.position(), 0.5));
}

#[test]
fn changes_from_animation_are_not_dragging() {
    let mut view = laid_out(Recorder::new());
    view.animate_to_position(0.4, AnimationSpec::linear(32), None);
    run_frames(&mut view, 64);

    assert!(calls(&view).iter().all(|call| !matches!(
        call,
        Call::Changed { dragging: true, .. }
    )));
}

#[test]
fn delegate_commands_run_after_callback() {
    let mut delegate = Recorder::new();
    delegate.reset_on_end = true;
    let mut view = laid_out(delegate);
    begin_right_drag(&mut view);
    view.on_pointer_move(820.0, 50.0, 120);
    view.on_pointer_up(820.0, 50.0, 300);

    assert!(view.is_animating());
    run_frames(&mut view, 400);
    assert_eq!(view.position(), 0.0);
}

#[test]
fn delayed_task_fires_after_its_delay() {
    let mut view = laid_out(Recorder::new());
    view.with_delegate(|_, ctx| ctx.post_delayed(CompletionTag(9), 100));
    assert!(view.has_pending_delayed());

    view.on_frame(10 * MS);
    view.on_frame(60 * MS);
    assert_eq!(recorder(&view).count(|c| matches!(c, Call::Delayed(_))), 0);

    view.on_frame(110 * MS);
    assert_eq!(calls(&view).last(), Some(&Call::Delayed(CompletionTag(9))));
    assert!(!view.has_pending_delayed());
}

#[test]
fn drag_begin_cancels_delayed_task() {
    let mut view = laid_out(Recorder::new());
    view.with_delegate(|_, ctx| ctx.post_delayed(CompletionTag(4), 50));
    view.on_frame(0);
    begin_right_drag(&mut view);
    assert!(!view.has_pending_delayed());

    run_frames(&mut view, 200);
    assert_eq!(recorder(&view).count(|c| matches!(c, Call::Delayed(_))), 0);
}

#[test]
fn drag_begin_takes_over_from_running_animation() {
    let mut view = laid_out(Recorder::new());
    view.set_position(0.5);
    view.snap_to_position(0.0, Some(CompletionTag(3)));
    view.on_frame(0);
    view.on_frame(40 * MS);
    let grabbed_at = view.position();
    assert!(grabbed_at > 0.0 && grabbed_at < 0.5, "grabbed at {grabbed_at}");

    begin_right_drag(&mut view);
    assert!(!view.is_animating());
    view.on_pointer_move(620.0, 50.0, 20);
    assert!(approx(view.position(), grabbed_at + 0.1));

    run_frames(&mut view, 400);
    assert!(view.is_dragging());
    assert!(approx(view.position(), grabbed_at + 0.1));
    assert_eq!(recorder(&view).count(|c| matches!(c, Call::AnimationEnd(_))), 0);
}

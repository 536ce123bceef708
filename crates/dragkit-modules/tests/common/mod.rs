//! Shared fixtures for module integration tests.

#![allow(dead_code)]

use dragkit_foundation::{ContentState, SharedContent, Side};
use dragkit_modules::{DragModule, ModuleDelegate, ModuleEvent};
use dragkit_testing::GestureRobot;
use dragkit_view::{DragConfig, DragContext};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const WIDTH: f32 = 1000.0;

/// Which module to build for a side.
#[derive(Clone, Copy, Debug)]
pub enum Fixture {
    Plain,
    /// Openable with content of this many pixels.
    Openable(f32),
    Swipe,
    Ticker,
}

pub struct Harness {
    pub robot: GestureRobot<ModuleDelegate>,
    pub events: Rc<RefCell<Vec<(Side, ModuleEvent)>>>,
    /// Background view of the most recently built module on each side.
    pub views: Rc<RefCell<Vec<(Side, Rc<RefCell<ContentState>>)>>>,
    pub builds: Rc<Cell<usize>>,
}

impl Harness {
    pub fn new(right: Option<Fixture>, left: Option<Fixture>) -> Self {
        Self::with_config(right, left, DragConfig::default())
    }

    pub fn with_config(right: Option<Fixture>, left: Option<Fixture>, config: DragConfig) -> Self {
        let (delegate, events, views, builds) = module_delegate(right, left);
        Self {
            robot: GestureRobot::with_config(delegate, WIDTH, config),
            events,
            views,
            builds,
        }
    }

    pub fn events(&self) -> Vec<(Side, ModuleEvent)> {
        self.events.borrow().clone()
    }

    pub fn view_visible(&self, side: Side) -> bool {
        self.views
            .borrow()
            .iter()
            .rev()
            .find(|(s, _)| *s == side)
            .is_some_and(|(_, view)| view.borrow().visible)
    }

    pub fn position(&self) -> f32 {
        self.robot.position()
    }

    /// Press at 500, claim the drag, move the view to `x` and hold.
    pub fn hold_at(&mut self, x: f32) {
        let claim = if x >= 0.0 { 520.0 } else { 480.0 };
        self.robot.press(500.0);
        assert!(self.robot.move_to(claim, 16), "drag was not claimed");
        self.robot.move_to(claim + x * WIDTH, 16);
    }

    /// Like [`Harness::hold_at`], then pause and release without velocity.
    pub fn release_at(&mut self, x: f32) {
        self.hold_at(x);
        let pointer = (if x >= 0.0 { 520.0 } else { 480.0 }) + x * WIDTH;
        self.robot.move_to(pointer, 100);
        self.robot.release(pointer);
    }

    pub fn with_delegate<R>(
        &mut self,
        f: impl FnOnce(&mut ModuleDelegate, &mut DragContext<'_>) -> R,
    ) -> R {
        self.robot
            .view_mut()
            .with_delegate(f)
            .expect("delegate attached")
    }
}

pub fn module_delegate(
    right: Option<Fixture>,
    left: Option<Fixture>,
) -> (
    ModuleDelegate,
    Rc<RefCell<Vec<(Side, ModuleEvent)>>>,
    Rc<RefCell<Vec<(Side, Rc<RefCell<ContentState>>)>>>,
    Rc<Cell<usize>>,
) {
    let events = Rc::new(RefCell::new(Vec::new()));
    let views = Rc::new(RefCell::new(Vec::new()));
    let builds = Rc::new(Cell::new(0));

    let top_view: SharedContent = ContentState::default().shared();
    let delegate = ModuleDelegate::new(top_view, {
        let events = events.clone();
        let views = views.clone();
        let builds = builds.clone();
        move |side: Side, _view: &DragContext<'_>| {
            builds.set(builds.get() + 1);
            let fixture = match side {
                Side::Right => right,
                Side::Left => left,
            }?;

            let background = ContentState::default().shared();
            views.borrow_mut().push((side, background.clone()));
            let background: SharedContent = background;

            let module = match fixture {
                Fixture::Plain => DragModule::plain(side, background, 0.25),
                Fixture::Openable(width) => {
                    let content: SharedContent = ContentState::with_width(width).shared();
                    DragModule::openable(side, background, content)
                }
                Fixture::Swipe => DragModule::swipe(side, background),
                Fixture::Ticker => DragModule::ticker(side, background),
            };
            let events = events.clone();
            Some(module.with_listener(move |side, event| events.borrow_mut().push((side, event))))
        }
    });
    (delegate, events, views, builds)
}

//! A [`DragDelegate`] that fans engine callbacks out to one module per side.

use crate::module::DragModule;
use dragkit_animation::Easing;
use dragkit_foundation::{Direction, SharedContent, Side};
use dragkit_view::{CompletionTag, DragContext, DragDelegate, SwipeRelease};

const TEASE_DELAY: CompletionTag = CompletionTag(1);
const TEASE_RIGHT: CompletionTag = CompletionTag(2);
const TEASE_LEFT: CompletionTag = CompletionTag(3);
const TEASE_END: CompletionTag = CompletionTag(4);

const TEASE_FIRST_MS: u64 = 180;
const TEASE_SECOND_MS: u64 = 250;
const TEASE_END_MS: u64 = 180;

const TEASE_EASING: Easing = Easing::AccelerateDecelerate;

/// Builds the module for a side, or `None` to leave that side empty.
pub type ModuleFactory = Box<dyn FnMut(Side, &DragContext<'_>) -> Option<DragModule>>;

/// One optional value per side.
#[derive(Debug)]
pub struct SidePair<T> {
    left: Option<T>,
    right: Option<T>,
}

impl<T> Default for SidePair<T> {
    fn default() -> Self {
        Self {
            left: None,
            right: None,
        }
    }
}

impl<T> SidePair<T> {
    pub fn get(&self, side: Side) -> Option<&T> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    pub fn get_mut(&mut self, side: Side) -> Option<&mut T> {
        match side {
            Side::Left => self.left.as_mut(),
            Side::Right => self.right.as_mut(),
        }
    }

    /// Look up by direction. `Direction::None` has no slot.
    pub fn at(&self, direction: Direction) -> Option<&T> {
        direction.side().and_then(|side| self.get(side))
    }

    pub fn at_mut(&mut self, direction: Direction) -> Option<&mut T> {
        direction.side().and_then(move |side| self.get_mut(side))
    }

    pub fn set(&mut self, side: Side, value: Option<T>) {
        match side {
            Side::Left => self.left = value,
            Side::Right => self.right = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Occupied slots, right first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.right.iter_mut().chain(self.left.iter_mut())
    }

    pub fn clear(&mut self) {
        self.left = None;
        self.right = None;
    }
}

/// Routes engine callbacks to the module on the active side and drives
/// the tease preview.
pub struct ModuleDelegate {
    top_view: SharedContent,
    factory: ModuleFactory,
    modules: SidePair<DragModule>,
    /// Side the current drag began towards.
    drag_side: Option<Side>,
    /// Side of the module that last received a position change.
    active_side: Option<Side>,
    teasing: bool,
    tease_scheduled: bool,
}

impl ModuleDelegate {
    pub fn new(
        top_view: SharedContent,
        factory: impl FnMut(Side, &DragContext<'_>) -> Option<DragModule> + 'static,
    ) -> Self {
        Self {
            top_view,
            factory: Box::new(factory),
            modules: SidePair::default(),
            drag_side: None,
            active_side: None,
            teasing: false,
            tease_scheduled: false,
        }
    }

    pub fn module(&self, side: Side) -> Option<&DragModule> {
        self.modules.get(side)
    }

    pub fn module_mut(&mut self, side: Side) -> Option<&mut DragModule> {
        self.modules.get_mut(side)
    }

    pub fn is_teasing(&self) -> bool {
        self.teasing || self.tease_scheduled
    }

    /// Cancel any tease and return to rest.
    pub fn reset(&mut self, view: &mut DragContext<'_>, animate: bool) {
        self.cancel_tease(view);
        view.reset(animate);
    }

    /// Enable or disable dragging. Disabling also closes the view.
    pub fn set_enabled(&mut self, view: &mut DragContext<'_>, enabled: bool) {
        if !enabled {
            self.reset(view, false);
        }
        // After the reset, which re-enables dragging for some modules.
        view.set_drag_enabled(enabled);
    }

    /// Open the module on `side`, if it is openable.
    pub fn open(&mut self, view: &mut DragContext<'_>, side: Side, animated: bool) {
        self.cancel_tease(view);
        if let Some(module) = self.modules.get_mut(side) {
            module.open(view, animated);
        }
    }

    /// Preview the available modules: right tease position, then left, then
    /// back to rest. Starts after `delay_ms` of frame time.
    pub fn tease(&mut self, view: &mut DragContext<'_>, delay_ms: u64) {
        if delay_ms > 0 {
            self.tease_scheduled = true;
            view.post_delayed(TEASE_DELAY, delay_ms);
            return;
        }
        self.tease_scheduled = false;

        let right = self.modules.get(Side::Right).map(|m| m.tease_x(view));
        let left = self.modules.get(Side::Left).map(|m| m.tease_x(view));
        match (right, left) {
            (Some(x), _) => {
                log::debug!("tease started");
                self.teasing = true;
                view.animate_to(x, TEASE_FIRST_MS, TEASE_EASING, Some(TEASE_RIGHT));
            }
            (None, Some(x)) => {
                log::debug!("tease started");
                self.teasing = true;
                view.animate_to(x, TEASE_FIRST_MS, TEASE_EASING, Some(TEASE_LEFT));
            }
            (None, None) => {}
        }
    }

    pub fn cancel_tease(&mut self, view: &mut DragContext<'_>) {
        if self.tease_scheduled {
            self.tease_scheduled = false;
            view.cancel_delayed();
        }
        if self.teasing {
            log::debug!("tease cancelled");
            self.teasing = false;
            view.stop_animation();
        }
    }

    fn continue_tease(&mut self, view: &mut DragContext<'_>, tag: CompletionTag) {
        match tag {
            TEASE_RIGHT => match self.modules.get(Side::Left).map(|m| m.tease_x(view)) {
                Some(x) => view.animate_to(x, TEASE_SECOND_MS, TEASE_EASING, Some(TEASE_LEFT)),
                None => Self::end_tease(view),
            },
            TEASE_LEFT => Self::end_tease(view),
            TEASE_END => self.teasing = false,
            _ => {}
        }
    }

    fn end_tease(view: &mut DragContext<'_>) {
        view.animate_to(0.0, TEASE_END_MS, TEASE_EASING, Some(TEASE_END));
    }

    fn detach_modules(&mut self) {
        for module in self.modules.iter_mut() {
            module.detach();
        }
        self.modules.clear();
    }
}

impl DragDelegate for ModuleDelegate {
    fn init(&mut self, view: &mut DragContext<'_>) {
        if !self.modules.is_empty() {
            log::debug!("detaching modules from previous engine");
            self.detach_modules();
        }
        self.drag_side = None;
        self.active_side = None;
        self.teasing = false;
        self.tease_scheduled = false;

        for side in Side::ALL {
            let module = (self.factory)(side, &*view);
            self.modules.set(side, module);
        }
    }

    fn on_setup(&mut self, view: &mut DragContext<'_>) {
        for module in self.modules.iter_mut() {
            module.on_setup(view);
        }
    }

    fn top_view(&mut self, _view: &mut DragContext<'_>) -> Option<SharedContent> {
        Some(self.top_view.clone())
    }

    fn on_detach(&mut self, _view: &mut DragContext<'_>) {
        self.teasing = false;
        self.tease_scheduled = false;
    }

    fn can_drag(&mut self, _view: &mut DragContext<'_>, direction: Direction) -> bool {
        self.modules.at(direction).is_some()
    }

    fn max_drag(&mut self, view: &mut DragContext<'_>, direction: Direction) -> f32 {
        self.modules
            .at(direction)
            .map_or(0.0, |module| module.max_drag(view))
    }

    fn drag_factor(
        &mut self,
        view: &mut DragContext<'_>,
        direction: Direction,
        _movement: Direction,
        x0: f32,
        dx: f32,
    ) -> f32 {
        self.modules
            .at(direction)
            .map_or(1.0, |module| module.drag_factor(view, x0, dx))
    }

    fn on_drag_begin(&mut self, view: &mut DragContext<'_>, direction: Direction) {
        let Some(side) = direction.side() else {
            unreachable!("drag began without a direction");
        };
        self.cancel_tease(view);
        self.drag_side = Some(side);
    }

    fn will_drag(
        &mut self,
        view: &mut DragContext<'_>,
        _direction: Direction,
        _x0: f32,
        x1: f32,
    ) -> f32 {
        self.cancel_tease(view);
        x1
    }

    fn on_changed(
        &mut self,
        view: &mut DragContext<'_>,
        direction: Direction,
        x0: f32,
        x1: f32,
        dragging: bool,
    ) {
        let side = direction.side();
        if let Some(previous) = self.active_side.filter(|previous| Some(*previous) != side) {
            // Let the module losing the view hide itself.
            if let Some(module) = self.modules.get_mut(previous) {
                module.on_changed(view, x0, x1, dragging);
            }
        }
        self.active_side = side;

        if let Some(module) = self.modules.at_mut(direction) {
            module.on_changed(view, x0, x1, dragging);
        }
    }

    fn on_swipe(
        &mut self,
        view: &mut DragContext<'_>,
        direction: Direction,
        swipe: SwipeRelease,
    ) -> bool {
        if direction.side() != self.drag_side {
            return false;
        }
        self.modules
            .at_mut(direction)
            .is_some_and(|module| module.on_swipe(view, &swipe))
    }

    fn on_reset(&mut self, view: &mut DragContext<'_>) {
        self.drag_side = None;
        self.active_side = None;
        for module in self.modules.iter_mut() {
            module.on_reset(view);
        }
    }

    fn on_drag_end(&mut self, view: &mut DragContext<'_>, direction: Direction, x: f32) {
        let should_reset = self
            .modules
            .at_mut(direction)
            .map_or(true, |module| module.on_drag_ended(view, x));
        if should_reset {
            view.reset(true);
        }
    }

    fn on_animation_end(&mut self, view: &mut DragContext<'_>, tag: CompletionTag) {
        if matches!(tag, TEASE_RIGHT | TEASE_LEFT | TEASE_END) {
            if self.teasing {
                self.continue_tease(view, tag);
            }
            return;
        }
        for module in self.modules.iter_mut() {
            if module.on_animation_end(view, tag) {
                break;
            }
        }
    }

    fn on_delayed(&mut self, view: &mut DragContext<'_>, tag: CompletionTag) {
        if tag == TEASE_DELAY && self.tease_scheduled {
            self.tease(view, 0);
        }
    }
}

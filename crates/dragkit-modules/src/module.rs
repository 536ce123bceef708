//! The per-side state machine revealed by dragging.

use crate::submodule::{ModuleInfo, Submodule};
use dragkit_animation::Easing;
use dragkit_foundation::{Normalize, SharedContent, Side};
use dragkit_view::{CompletionTag, DragContext, SwipeRelease};

/// How far past its content width an openable module may be dragged.
pub const ADDITIONAL_MAX_DRAG: f32 = 0.15;

/// How far a swipe module must be dragged before a release swipes it out.
pub const OUT_BOUNDARY: f32 = 0.35;

/// A ticker tracks the pointer fully up to here and ticks when released past it.
pub const TICKER_MIN_DRAG: f32 = 0.2;

/// A ticker cannot be dragged past this point.
pub const TICKER_MAX_DRAG: f32 = 0.35;

/// Swipe-out duration for a release without velocity.
pub const SWIPE_OUT_DURATION_MS: u64 = 200;

const SWIPE_OUT_RIGHT: CompletionTag = CompletionTag(0x100);
const SWIPE_OUT_LEFT: CompletionTag = CompletionTag(0x101);

/// Milestones a module reports to its listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModuleEvent {
    /// An openable module snapped open.
    Opened,
    /// A swipe module started animating to the edge.
    SwipeStarted,
    /// A swipe module reached the edge.
    SwipeFinished,
    /// A ticker was released past its threshold and locked open.
    Ticked,
}

pub type ModuleListener = Box<dyn FnMut(Side, ModuleEvent)>;

/// The closed set of module behaviors.
pub enum ModuleKind {
    /// Shows and hides with the drag; tracks the pointer without limits.
    Plain { tease: f32 },
    /// Reveals `content` and snaps open to its width.
    Openable { content: SharedContent },
    /// Swipes the top view off the edge.
    Swipe,
    /// Resists past a threshold and ticks on release.
    Ticker,
}

/// One side's interactive content.
pub struct DragModule {
    side: Side,
    view: SharedContent,
    kind: ModuleKind,
    visible: bool,
    submodules: Vec<Box<dyn Submodule>>,
    listener: Option<ModuleListener>,
}

impl DragModule {
    /// `view` starts hidden and is shown only while the top view is
    /// dragged towards `side`.
    pub fn new(side: Side, view: SharedContent, kind: ModuleKind) -> Self {
        view.borrow_mut().set_visible(false);
        Self {
            side,
            view,
            kind,
            visible: false,
            submodules: Vec::new(),
            listener: None,
        }
    }

    pub fn plain(side: Side, view: SharedContent, tease: f32) -> Self {
        Self::new(side, view, ModuleKind::Plain { tease })
    }

    pub fn openable(side: Side, view: SharedContent, content: SharedContent) -> Self {
        Self::new(side, view, ModuleKind::Openable { content })
    }

    pub fn swipe(side: Side, view: SharedContent) -> Self {
        Self::new(side, view, ModuleKind::Swipe)
    }

    pub fn ticker(side: Side, view: SharedContent) -> Self {
        Self::new(side, view, ModuleKind::Ticker)
    }

    pub fn with_submodule(mut self, submodule: impl Submodule + 'static) -> Self {
        self.add_submodule(submodule);
        self
    }

    pub fn add_submodule(&mut self, submodule: impl Submodule + 'static) {
        self.submodules.push(Box::new(submodule));
    }

    pub fn with_listener(mut self, listener: impl FnMut(Side, ModuleEvent) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn kind(&self) -> &ModuleKind {
        &self.kind
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_within_side(&self, x: f32) -> bool {
        self.side.contains(x)
    }

    fn info(&self, view: &DragContext<'_>) -> ModuleInfo {
        ModuleInfo {
            side: self.side,
            drag_width: view.width(),
        }
    }

    /// Content width as a fraction of the container width.
    fn content_width(content: &SharedContent, view: &DragContext<'_>) -> f32 {
        let width = view.width();
        if width > 0.0 {
            content.borrow().width() / width
        } else {
            0.0
        }
    }

    /// Target of this module's step in a tease preview.
    pub fn tease_x(&self, view: &DragContext<'_>) -> f32 {
        let sign = self.side.sign();
        match &self.kind {
            ModuleKind::Plain { tease } => tease * sign,
            ModuleKind::Openable { content } => Self::content_width(content, view) * sign,
            ModuleKind::Swipe => OUT_BOUNDARY * sign,
            ModuleKind::Ticker => TICKER_MIN_DRAG * sign,
        }
    }

    /// Upper bound on `|x|` while this side is open. Negative means no limit.
    pub fn max_drag(&self, view: &DragContext<'_>) -> f32 {
        match &self.kind {
            ModuleKind::Openable { content } => {
                Self::content_width(content, view) + ADDITIONAL_MAX_DRAG
            }
            ModuleKind::Ticker => TICKER_MAX_DRAG,
            ModuleKind::Plain { .. } | ModuleKind::Swipe => -1.0,
        }
    }

    /// Movement multiplier for a step of `dx` starting at `x0`.
    ///
    /// Openable and ticker modules resist outward movement past their
    /// threshold, decaying linearly to zero at their maximum drag.
    pub fn drag_factor(&self, view: &DragContext<'_>, x0: f32, dx: f32) -> f32 {
        let threshold = match &self.kind {
            ModuleKind::Openable { content } => Self::content_width(content, view),
            ModuleKind::Ticker => TICKER_MIN_DRAG,
            ModuleKind::Plain { .. } | ModuleKind::Swipe => return 1.0,
        };

        let ax = x0.abs();
        if ax > threshold && dx * self.side.sign() > 0.0 {
            1.0 - ax.normalized_clamped(threshold, self.max_drag(view))
        } else {
            1.0
        }
    }

    /// Called once the container has a width.
    pub fn on_setup(&mut self, view: &mut DragContext<'_>) {
        let info = self.info(view);
        for submodule in &mut self.submodules {
            submodule.on_reset(&info);
        }
    }

    pub fn on_changed(&mut self, view: &mut DragContext<'_>, x0: f32, x1: f32, dragging: bool) {
        self.set_visible(self.is_within_side(x1));

        let info = self.info(view);
        for submodule in &mut self.submodules {
            submodule.on_changed(&info, x0, x1, dragging);
        }
    }

    pub fn on_reset(&mut self, view: &mut DragContext<'_>) {
        self.set_visible(false);

        let info = self.info(view);
        for submodule in &mut self.submodules {
            submodule.on_reset(&info);
        }

        if matches!(self.kind, ModuleKind::Swipe | ModuleKind::Ticker) {
            view.set_drag_enabled(true);
        }
    }

    /// Release handling. Returns true when the view should reset to rest,
    /// false when this module has taken over.
    pub fn on_drag_ended(&mut self, view: &mut DragContext<'_>, x: f32) -> bool {
        match &self.kind {
            ModuleKind::Plain { .. } => true,
            ModuleKind::Openable { content } => {
                let w = Self::content_width(content, view);
                // Content without a width has nothing to open to.
                if w > 0.0 && x.abs() > w * 0.5 {
                    view.snap_to(w * self.side.sign());
                    self.emit(ModuleEvent::Opened);
                    false
                } else {
                    true
                }
            }
            ModuleKind::Swipe => {
                if x.abs() > OUT_BOUNDARY {
                    self.swipe_out(view, x, 0.0);
                    false
                } else {
                    true
                }
            }
            ModuleKind::Ticker => {
                if x * self.side.sign() > TICKER_MIN_DRAG {
                    view.set_drag_enabled(false);
                    self.emit(ModuleEvent::Ticked);
                    false
                } else {
                    true
                }
            }
        }
    }

    /// Fast release handling. Returns true when the swipe was consumed.
    pub fn on_swipe(&mut self, view: &mut DragContext<'_>, swipe: &SwipeRelease) -> bool {
        let own_direction = swipe.direction == self.side.direction();
        match self.kind {
            ModuleKind::Openable { ref content } => {
                if own_direction && Self::content_width(content, view) > 0.0 {
                    self.open(view, true);
                } else {
                    view.reset(true);
                }
                true
            }
            ModuleKind::Swipe if own_direction => {
                self.swipe_out(view, swipe.x, swipe.velocity);
                true
            }
            _ => false,
        }
    }

    /// Snap an openable module open. Other kinds ignore this.
    pub fn open(&mut self, view: &mut DragContext<'_>, animated: bool) {
        let ModuleKind::Openable { content } = &self.kind else {
            log::warn!("open() on a {:?} module that cannot open", self.side);
            return;
        };
        let x1 = Self::content_width(content, view) * self.side.sign();
        if animated {
            view.snap_to(x1);
        } else {
            view.stop_animation();
            view.set_position(x1);
        }
        self.emit(ModuleEvent::Opened);
    }

    /// Animate the top view off the edge on this side.
    ///
    /// `velocity` is the release speed in px/ms. Without one the swipe runs
    /// a fixed accelerating animation.
    fn swipe_out(&mut self, view: &mut DragContext<'_>, x: f32, velocity: f32) {
        view.set_drag_enabled(false);

        let (duration_ms, easing) = if velocity <= 0.0 {
            (SWIPE_OUT_DURATION_MS, Easing::Accelerate)
        } else {
            (swipe_out_duration_ms(x, view.width(), velocity), Easing::Linear)
        };
        log::debug!("{:?} module swiping out over {duration_ms}ms", self.side);

        self.emit(ModuleEvent::SwipeStarted);
        view.animate_to(self.side.sign(), duration_ms, easing, Some(self.swipe_tag()));
    }

    fn swipe_tag(&self) -> CompletionTag {
        match self.side {
            Side::Right => SWIPE_OUT_RIGHT,
            Side::Left => SWIPE_OUT_LEFT,
        }
    }

    /// Returns true if `tag` belonged to this module.
    pub fn on_animation_end(&mut self, _view: &mut DragContext<'_>, tag: CompletionTag) -> bool {
        if matches!(self.kind, ModuleKind::Swipe) && tag == self.swipe_tag() {
            self.emit(ModuleEvent::SwipeFinished);
            true
        } else {
            false
        }
    }

    /// Hide and drop all visual state before the module is discarded.
    pub fn detach(&mut self) {
        self.set_visible(false);
        self.listener = None;
    }

    fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.view.borrow_mut().set_visible(visible);
        }
    }

    fn emit(&mut self, event: ModuleEvent) {
        log::debug!("{:?} module: {event:?}", self.side);
        if let Some(listener) = self.listener.as_mut() {
            listener(self.side, event);
        }
    }
}

/// Time to cover the remaining distance from `x` to the edge at `velocity` px/ms.
pub fn swipe_out_duration_ms(x: f32, drag_width: f32, velocity: f32) -> u64 {
    let remaining = (1.0 - x.abs()) * drag_width;
    (remaining / velocity).round().max(0.0) as u64
}

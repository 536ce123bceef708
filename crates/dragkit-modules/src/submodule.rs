//! Cosmetic observers of a module's position stream.

use crate::module::OUT_BOUNDARY;
use dragkit_animation::Easing;
use dragkit_foundation::{Normalize, SharedContent, Side};

/// What a submodule knows about the module it is attached to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModuleInfo {
    pub side: Side,
    /// Container width in pixels.
    pub drag_width: f32,
}

impl ModuleInfo {
    /// Whether `x` lies on the module's side.
    pub fn is_within_side(&self, x: f32) -> bool {
        self.side.contains(x)
    }
}

/// Receives every position change routed to its module.
///
/// Submodules hold no gesture state; they only project the position onto
/// their content.
pub trait Submodule {
    fn on_changed(&mut self, module: &ModuleInfo, x0: f32, x1: f32, dragging: bool);
    fn on_reset(&mut self, module: &ModuleInfo);
}

/// Keeps content halfway between the dragged edge and the container edge,
/// fading it in until it is fully revealed.
pub struct TranslatingContentSubmodule {
    content: SharedContent,
}

impl TranslatingContentSubmodule {
    pub fn new(content: SharedContent) -> Self {
        Self { content }
    }
}

impl Submodule for TranslatingContentSubmodule {
    fn on_changed(&mut self, module: &ModuleInfo, _x0: f32, x1: f32, _dragging: bool) {
        if !module.is_within_side(x1) || module.drag_width <= 0.0 {
            return;
        }

        let mut content = self.content.borrow_mut();
        let x = x1 * module.side.sign();
        let w = content.width() / module.drag_width;

        let center = match module.side {
            Side::Right => x * 0.5,
            Side::Left => 1.0 - x * 0.5,
        };
        content.set_x((center - w * 0.5) * module.drag_width);

        if x <= w {
            content.set_alpha(x.normalized_clamped(0.0, w));
        } else if content.alpha() < 1.0 {
            content.set_alpha(1.0);
        }
    }

    fn on_reset(&mut self, _module: &ModuleInfo) {
        self.content.borrow_mut().set_alpha(0.0);
    }
}

/// Label opacity reaches 1 at this drag distance.
const IN_BOUNDARY: f32 = 0.15;
/// How far the label travels relative to the top view.
const TRANSLATE_FACTOR: f32 = 0.5;
/// Label offset from the dragged edge at rest.
const TRANSLATE_X0: f32 = -0.1;
/// Label scale at the end of a swipe.
const SCALE_MAX: f32 = 3.0;

/// A swipe label that trails the dragged edge, fades in, and past the swipe
/// boundary fades out while growing.
pub struct ExpandingSwipeSubmodule {
    label: SharedContent,
}

impl ExpandingSwipeSubmodule {
    pub fn new(label: SharedContent) -> Self {
        Self { label }
    }

    fn label_x(module: &ModuleInfo, label_width: f32, x1: f32) -> f32 {
        let w = label_width / module.drag_width;
        let x = match module.side {
            Side::Right => TRANSLATE_X0 + x1 * TRANSLATE_FACTOR,
            Side::Left => 1.0 - w - TRANSLATE_X0 + x1 * TRANSLATE_FACTOR,
        };
        x * module.drag_width
    }
}

impl Submodule for ExpandingSwipeSubmodule {
    fn on_changed(&mut self, module: &ModuleInfo, _x0: f32, x1: f32, _dragging: bool) {
        if !module.is_within_side(x1) || module.drag_width <= 0.0 {
            return;
        }

        let mut label = self.label.borrow_mut();
        let ax = x1.abs();
        let label_x = Self::label_x(module, label.width(), x1);
        label.set_x(label_x);

        if ax <= IN_BOUNDARY {
            label.set_alpha(ax.normalized_clamped(0.0, IN_BOUNDARY));
        } else if ax <= OUT_BOUNDARY {
            if label.alpha() < 1.0 {
                label.set_alpha(1.0);
            }
        } else {
            let out = Easing::Accelerate.transform(ax.normalized_clamped(OUT_BOUNDARY, 1.0));
            label.set_alpha(1.0 - out);
            label.set_scale(out.denormalized(1.0, SCALE_MAX));
        }
    }

    fn on_reset(&mut self, module: &ModuleInfo) {
        let mut label = self.label.borrow_mut();
        if module.drag_width > 0.0 {
            let label_x = Self::label_x(module, label.width(), 0.0);
            label.set_x(label_x);
        }
        label.set_alpha(0.0);
        label.set_scale(1.0);
    }
}

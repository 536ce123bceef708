//! Visual content interface consumed by the engine and the cosmetic submodules.
//!
//! The engine never renders anything itself. It projects its pixel offset
//! onto the top view, and submodules project opacity, translation and scale
//! onto their content. A renderer reads the resulting values.

use std::cell::RefCell;
use std::rc::Rc;

/// Something that accepts a horizontal position, an opacity and a scale.
pub trait ContentView {
    /// Laid out width in pixels.
    fn width(&self) -> f32;
    fn x(&self) -> f32;
    fn set_x(&mut self, x: f32);
    fn alpha(&self) -> f32;
    fn set_alpha(&mut self, alpha: f32);
    fn set_scale(&mut self, scale: f32);
    fn set_visible(&mut self, visible: bool);
}

/// Shared handle to a content view, owned jointly by the host and Dragkit.
pub type SharedContent = Rc<RefCell<dyn ContentView>>;

/// Plain-data content used for headless hosts and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentState {
    pub width: f32,
    pub x: f32,
    pub alpha: f32,
    pub scale: f32,
    pub visible: bool,
}

impl ContentState {
    pub fn with_width(width: f32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Wrap into a shared handle, keeping a typed handle for inspection.
    pub fn shared(self) -> Rc<RefCell<ContentState>> {
        Rc::new(RefCell::new(self))
    }
}

impl Default for ContentState {
    fn default() -> Self {
        Self {
            width: 0.0,
            x: 0.0,
            alpha: 1.0,
            scale: 1.0,
            visible: true,
        }
    }
}

impl ContentView for ContentState {
    fn width(&self) -> f32 {
        self.width
    }

    fn x(&self) -> f32 {
        self.x
    }

    fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

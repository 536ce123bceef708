//! Side modules for Dragkit.
//!
//! A [`ModuleDelegate`] owns at most one [`DragModule`] per side and routes
//! the engine's callbacks to whichever side is open. Modules decide how the
//! view resists, where it settles on release, and what happens on a swipe.
//! [`Submodule`]s decorate a module with purely visual effects.

mod delegate;
mod module;
mod submodule;


pub use delegate::{ModuleDelegate, ModuleFactory, SidePair};
pub use module::{
    swipe_out_duration_ms, DragModule, ModuleEvent, ModuleKind, ModuleListener,
    ADDITIONAL_MAX_DRAG, OUT_BOUNDARY, SWIPE_OUT_DURATION_MS, TICKER_MAX_DRAG, TICKER_MIN_DRAG,
};
pub use submodule::{ExpandingSwipeSubmodule, ModuleInfo, Submodule, TranslatingContentSubmodule};

pub mod prelude {
    pub use crate::delegate::ModuleDelegate;
    pub use crate::module::{DragModule, ModuleEvent, ModuleKind};
    pub use crate::submodule::{ExpandingSwipeSubmodule, Submodule, TranslatingContentSubmodule};
}

//! Terminal user interface plumbing.
//!
//! - [`terminal`]: raw-mode setup and RAII restoration
//! - [`event`]: tick/input/shutdown event loop
//! - [`theme`]: color theme with `NO_COLOR` support
//! - [`chrome`]: top bar, tab menu, status line

pub mod chrome;
pub mod event;
pub mod terminal;
pub mod theme;

pub use event::{EventHandler, TuiEvent};
pub use terminal::{install_panic_hook, Tui};
pub use theme::Theme;

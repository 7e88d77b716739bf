//! Top-level screens outside the dashboard tab router.
//!
//! These are the terminal analogue of full-page navigations: entering one
//! replaces the dashboard entirely instead of switching tabs within it.

mod confirm;
mod cover;

pub use confirm::ConfirmScreen;
pub use cover::CoverScreen;

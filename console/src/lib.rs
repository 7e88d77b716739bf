//! Haven Console - terminal administration client for a Haven server.
//!
//! This crate provides the interactive dashboard for administering a Haven
//! server from a terminal: password changes, SSH key management, TOTP
//! two-factor setup, and security log review.
//!
//! # Overview
//!
//! The console is a thin client. All state lives on the server; the console
//! fetches the payload for the active tab, renders it, and posts form
//! submissions back. Navigation follows `tab[/sub]` route paths mirroring
//! the web dashboard's URLs, so the same mental model applies to both.
//!
//! # Modules
//!
//! - [`route`]: navigation-state codec (`tab[/sub]` parsing and encoding)
//! - [`types`]: wire types for the backend API
//! - [`api`]: JSON request/response client
//! - [`core`]: navigation core (redraw coalescing, fetch staleness, sudo gate)
//! - [`pages`]: page lifecycle contract, registry, and the dashboard pages
//! - [`screens`]: cover (login) and confirm-password screens
//! - [`timefmt`]: human-relative timestamps against the server clock
//! - [`config`]: configuration from environment variables
//! - [`error`]: error types for console operations
//! - [`tui`]: terminal plumbing (raw mode, events, theme, chrome)
//! - [`app`]: the application event loop

pub mod api;
pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod pages;
pub mod route;
pub mod screens;
pub mod timefmt;
pub mod tui;
pub mod types;

pub use crate::api::{ApiClient, ApiError};
pub use crate::app::App;
pub use crate::config::Config;
pub use crate::core::{ApiReply, Command, Core};
pub use crate::error::{ConsoleError, Result};
pub use crate::pages::{Page, PageMeta, Registry};
pub use crate::route::Route;
pub use crate::types::PageData;

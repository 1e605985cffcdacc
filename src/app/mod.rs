//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Theme, Locale, routes, settings)
//! - `controllers/` - Orchestration (ThemeManager, Router)
//! - `services/` - Business operations (message tables, page loading)
//! - `infrastructure/` - External integrations (storage, platform, errors)
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod messages;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::router::Router;
pub use controllers::theme::ThemeManager;
pub use domain::{AppSettings, Locale, Location, Theme};
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::platform::detect_system_dark_mode;
pub use messages::Message;
pub use services::i18n::LocaleProvider;

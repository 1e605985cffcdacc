//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Theme and Locale preferences
//! - Route records, locations and scroll policy
//! - Application settings

pub mod locale;
pub mod route;
pub mod settings;
pub mod theme;

pub use locale::{LOCALE_KEY, Locale};
pub use route::{
    Location, RouteKind, RouteMeta, RouteRecord, ScrollBehavior, ScrollInstruction,
    ScrollPosition, default_routes, scroll_behavior,
};
pub use settings::AppSettings;
pub use theme::{THEME_KEY, Theme};

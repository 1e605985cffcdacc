//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Message tables and locale selection
//! - Page loading and Markdown rendering

pub mod i18n;
pub mod pages;

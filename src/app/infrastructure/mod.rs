//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Persisted preference storage
//! - Platform color-scheme detection and change watching
//! - The visual root the theme is applied to
//! - Error types

pub mod error;
pub mod platform;
pub mod storage;
pub mod visual_root;

//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the UI:
//! - Theme preference synchronization
//! - Route resolution, history and page caching
//! - Tracking which page load may still commit

pub mod loads;
pub mod router;
pub mod theme;

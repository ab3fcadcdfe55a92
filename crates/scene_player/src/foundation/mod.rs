//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the player:
//! - Math types and projection helpers
//! - Frame timing and performance sampling
//! - Logging utilities

pub mod math;
pub mod time;
pub mod logging;

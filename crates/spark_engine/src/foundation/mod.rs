//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and the rectangle intersection primitive
//! - Frame timing and fixed-step simulation clocks

pub mod math;
pub mod time;

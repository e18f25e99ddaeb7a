//! Foundation types for WAYPOINT.
//!
//! This crate contains the platform-agnostic types shared by all WAYPOINT
//! crates: directional input, viewport geometry, navigator configuration,
//! and error types.

pub mod config;
pub mod error;
pub mod geometry;
pub mod input;

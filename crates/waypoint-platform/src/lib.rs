//! Platform service abstractions for WAYPOINT.
//!
//! The navigator never touches window flags or accessibility APIs
//! directly; it goes through the traits in [`services`].

pub mod services;

pub use services::{
    AccessibilityService, DesktopPlatform, Platform, PlatformChrome, SystemUiMode,
};

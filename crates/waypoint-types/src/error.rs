//! Error types for WAYPOINT.

use std::io;

/// Errors produced by the WAYPOINT navigator.
///
/// Most runtime conditions in the navigator are expressed as no-ops or
/// rejected outcomes rather than errors; the variants here cover the
/// few places where a caller needs to know why something did not happen.
#[derive(Debug, thiserror::Error)]
pub enum WaypointError {
    #[error("config error: {0}")]
    Config(String),

    #[error("content surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, WaypointError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let e = WaypointError::Config("missing key".into());
        assert_eq!(format!("{e}"), "config error: missing key");
    }

    #[test]
    fn surface_unavailable_display() {
        let e = WaypointError::SurfaceUnavailable("go_back".into());
        assert_eq!(format!("{e}"), "content surface unavailable: go_back");
    }

    #[test]
    fn unknown_action_display() {
        let e = WaypointError::UnknownAction("share".into());
        assert_eq!(format!("{e}"), "unknown action: share");
    }

    #[test]
    fn platform_error_display() {
        let e = WaypointError::Platform("no window".into());
        assert_eq!(format!("{e}"), "platform error: no window");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: WaypointError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let bad_toml = "this is [[[not valid toml";
        let toml_err = toml::from_str::<toml::Value>(bad_toml).unwrap_err();
        let e: WaypointError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(WaypointError::Config("oops".into()));
        assert!(r.is_err());
    }
}

//! Platform abstraction layer
//!
//! Browser glue shared by the entry point:
//! - DOM lookups and HUD/overlay updates (`dom`, wasm only)
//! - Tuning overrides read from the page
//! - Typed errors for startup failures

#[cfg(target_arch = "wasm32")]
pub mod dom;

use thiserror::Error;

use crate::tuning::Tuning;

/// Failures while wiring the game into the host page
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("element #{0} not found")]
    MissingElement(String),

    #[error("element #{0} has the wrong type")]
    WrongElementType(String),

    #[error("javascript error: {0}")]
    Js(String),
}

/// Resolve tuning from an optional page-supplied JSON override.
///
/// Absent or blank input yields defaults; malformed input is logged and
/// also yields defaults so the game still starts.
pub fn tuning_from_attr(raw: Option<&str>) -> Tuning {
    let Some(json) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Tuning::default();
    };
    match Tuning::from_json(json) {
        Ok(tuning) => {
            log::info!("loaded tuning overrides");
            tuning
        }
        Err(e) => {
            log::warn!("ignoring tuning overrides: {e}");
            Tuning::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PlatformError::MissingElement("score".into()).to_string(),
            "element #score not found"
        );
        assert_eq!(
            PlatformError::WrongElementType("game-canvas".into()).to_string(),
            "element #game-canvas has the wrong type"
        );
        assert_eq!(PlatformError::NoWindow.to_string(), "no global window");
    }

    #[test]
    fn test_tuning_from_attr() {
        assert_eq!(tuning_from_attr(None), Tuning::default());
        assert_eq!(tuning_from_attr(Some("   ")), Tuning::default());
        assert_eq!(tuning_from_attr(Some("{not json")), Tuning::default());

        let t = tuning_from_attr(Some(r#"{"player_speed": 300.0}"#));
        assert_eq!(t.player_speed, 300.0);
        assert_eq!(t.player_health, 100.0);
    }
}

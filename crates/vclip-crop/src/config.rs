//! Crop engine configuration.

use serde::{Deserialize, Serialize};

const DEFAULT_MIN_REGION_WIDTH: f64 = 50.0;
const DEFAULT_MIN_REGION_HEIGHT: f64 = 50.0;
const DEFAULT_HANDLE_SIZE: f64 = 12.0;

/// Interaction settings for the crop editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropEngineConfig {
    /// Minimum region width in container pixels (default: 50)
    pub min_region_width: f64,
    /// Minimum region height in container pixels (default: 50)
    pub min_region_height: f64,
    /// Side of the square hit box around each resize handle (default: 12)
    pub handle_size: f64,
    /// Keep each region on its template aspect ratio while resizing (default: true)
    pub lock_aspect_ratio: bool,
}

impl Default for CropEngineConfig {
    fn default() -> Self {
        Self {
            min_region_width: DEFAULT_MIN_REGION_WIDTH,
            min_region_height: DEFAULT_MIN_REGION_HEIGHT,
            handle_size: DEFAULT_HANDLE_SIZE,
            lock_aspect_ratio: true,
        }
    }
}

impl CropEngineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            min_region_width: env_f64("CROP_MIN_REGION_WIDTH").unwrap_or(DEFAULT_MIN_REGION_WIDTH),
            min_region_height: env_f64("CROP_MIN_REGION_HEIGHT").unwrap_or(DEFAULT_MIN_REGION_HEIGHT),
            handle_size: env_f64("CROP_HANDLE_SIZE").unwrap_or(DEFAULT_HANDLE_SIZE),
            lock_aspect_ratio: std::env::var("CROP_LOCK_ASPECT_RATIO")
                .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no" | "off"))
                .unwrap_or(true),
        }
        .sanitized()
    }

    /// Replace non-finite or negative numbers with defaults.
    pub fn sanitized(mut self) -> Self {
        self.min_region_width = non_negative_or(self.min_region_width, DEFAULT_MIN_REGION_WIDTH);
        self.min_region_height = non_negative_or(self.min_region_height, DEFAULT_MIN_REGION_HEIGHT);
        self.handle_size = non_negative_or(self.handle_size, DEFAULT_HANDLE_SIZE);
        self
    }
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn non_negative_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CropEngineConfig::default();
        assert_eq!(config.min_region_width, 50.0);
        assert_eq!(config.min_region_height, 50.0);
        assert!(config.lock_aspect_ratio);
    }

    #[test]
    fn test_sanitized_replaces_bad_values() {
        let config = CropEngineConfig {
            min_region_width: f64::NAN,
            min_region_height: -4.0,
            handle_size: 20.0,
            lock_aspect_ratio: false,
        }
        .sanitized();

        assert_eq!(config.min_region_width, 50.0);
        assert_eq!(config.min_region_height, 50.0);
        assert_eq!(config.handle_size, 20.0);
        assert!(!config.lock_aspect_ratio);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CropEngineConfig = serde_json::from_str(r#"{"min_region_width": 80}"#).unwrap();
        assert_eq!(config.min_region_width, 80.0);
        assert_eq!(config.min_region_height, 50.0);
        assert_eq!(config.handle_size, 12.0);
    }
}

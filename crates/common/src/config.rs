//! Application configuration.
//!
//! Every tunable of the pipeline is a named numeric parameter grouped by
//! stage. Invalid values are rejected by [`AppConfig::validate`] before any
//! component is constructed.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{PinchmouseError, PinchmouseResult};

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Position smoothing filter.
    pub filter: FilterConfig,

    /// Cursor motion controller.
    pub motion: MotionConfig,

    /// Pinch click/drag detection.
    pub gesture: GestureConfig,

    /// Target screen dimensions in pixels.
    pub screen: ScreenConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Adaptive low-pass filter parameters, applied per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Expected sample rate (Hz). Replaced by the measured rate once
    /// timestamps arrive.
    pub frequency_hz: f64,

    /// Cutoff when the signal is still. Lower = smoother but more lag.
    pub min_cutoff: f64,

    /// How strongly the cutoff widens with measured velocity.
    pub beta: f64,

    /// Cutoff used to smooth the velocity estimate itself.
    pub derivative_cutoff: f64,
}

/// Cursor motion parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Movement amplification from normalized delta to pixels.
    pub gain: f64,

    /// Per-axis normalized change below which input is ignored.
    pub deadzone: f64,

    /// Maximum cursor speed (pixels per frame).
    pub max_speed: f64,

    /// Velocity smoothing coefficient in `[0.0, 1.0]`. Higher = more inertia.
    pub velocity_smoothing: f64,

    /// Distance (pixels) the cursor keeps from every screen edge.
    pub edge_margin: f64,
}

/// Pinch gesture thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Normalized fingertip distance below which the hand is pinching.
    pub pinch_threshold: f64,

    /// Pinch duration (seconds) after which a held pinch becomes a drag.
    pub click_time_threshold: f64,

    /// Normalized fingertip travel after which a held pinch becomes a drag.
    pub drag_distance_threshold: f64,
}

/// Screen the cursor is driven on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f64,
    pub height: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "pinchmouse=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 60.0,
            min_cutoff: 1.0,
            beta: 0.01,
            derivative_cutoff: 1.0,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            gain: 3.0,
            deadzone: 0.0015,
            max_speed: 35.0,
            velocity_smoothing: 0.5,
            edge_margin: 5.0,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: 0.05,
            click_time_threshold: 0.2,
            drag_distance_threshold: 0.01,
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

fn require(ok: bool, message: impl FnOnce() -> String) -> PinchmouseResult<()> {
    if ok {
        Ok(())
    } else {
        Err(PinchmouseError::config(message()))
    }
}

impl FilterConfig {
    pub fn validate(&self) -> PinchmouseResult<()> {
        require(self.frequency_hz.is_finite() && self.frequency_hz > 0.0, || {
            format!("filter.frequency_hz must be > 0, got {}", self.frequency_hz)
        })?;
        require(self.min_cutoff.is_finite() && self.min_cutoff > 0.0, || {
            format!("filter.min_cutoff must be > 0, got {}", self.min_cutoff)
        })?;
        require(self.beta.is_finite() && self.beta >= 0.0, || {
            format!("filter.beta must be >= 0, got {}", self.beta)
        })?;
        require(
            self.derivative_cutoff.is_finite() && self.derivative_cutoff > 0.0,
            || {
                format!(
                    "filter.derivative_cutoff must be > 0, got {}",
                    self.derivative_cutoff
                )
            },
        )
    }
}

impl MotionConfig {
    pub fn validate(&self) -> PinchmouseResult<()> {
        require(self.gain.is_finite(), || {
            format!("motion.gain must be finite, got {}", self.gain)
        })?;
        require(self.deadzone.is_finite() && self.deadzone >= 0.0, || {
            format!("motion.deadzone must be >= 0, got {}", self.deadzone)
        })?;
        require(self.max_speed.is_finite() && self.max_speed > 0.0, || {
            format!("motion.max_speed must be > 0, got {}", self.max_speed)
        })?;
        require((0.0..=1.0).contains(&self.velocity_smoothing), || {
            format!(
                "motion.velocity_smoothing must be in [0, 1], got {}",
                self.velocity_smoothing
            )
        })?;
        require(self.edge_margin.is_finite() && self.edge_margin >= 0.0, || {
            format!("motion.edge_margin must be >= 0, got {}", self.edge_margin)
        })
    }

    /// Check that the edge margin leaves a non-empty clamp range on `screen`.
    pub fn validate_for_screen(&self, screen: &ScreenConfig) -> PinchmouseResult<()> {
        self.validate()?;
        screen.validate()?;
        let span = 2.0 * self.edge_margin;
        require(span <= screen.width && span <= screen.height, || {
            format!(
                "motion.edge_margin {} leaves no room on a {}x{} screen",
                self.edge_margin, screen.width, screen.height
            )
        })
    }
}

impl GestureConfig {
    pub fn validate(&self) -> PinchmouseResult<()> {
        require(
            self.pinch_threshold.is_finite() && self.pinch_threshold > 0.0,
            || {
                format!(
                    "gesture.pinch_threshold must be > 0, got {}",
                    self.pinch_threshold
                )
            },
        )?;
        require(
            self.click_time_threshold.is_finite() && self.click_time_threshold >= 0.0,
            || {
                format!(
                    "gesture.click_time_threshold must be >= 0, got {}",
                    self.click_time_threshold
                )
            },
        )?;
        require(
            self.drag_distance_threshold.is_finite() && self.drag_distance_threshold >= 0.0,
            || {
                format!(
                    "gesture.drag_distance_threshold must be >= 0, got {}",
                    self.drag_distance_threshold
                )
            },
        )
    }
}

impl ScreenConfig {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> PinchmouseResult<()> {
        require(self.width.is_finite() && self.width > 0.0, || {
            format!("screen.width must be > 0, got {}", self.width)
        })?;
        require(self.height.is_finite() && self.height > 0.0, || {
            format!("screen.height must be > 0, got {}", self.height)
        })
    }

    /// Screen center in pixels.
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

impl AppConfig {
    /// Validate every section.
    pub fn validate(&self) -> PinchmouseResult<()> {
        self.filter.validate()?;
        self.motion.validate_for_screen(&self.screen)?;
        self.gesture.validate()
    }

    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> PinchmouseResult<Self> {
        if !path.exists() {
            return Err(PinchmouseError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&config_file_path())
    }

    /// Save config as pretty JSON to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

/// Named tuning presets for different use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Maximum smoothness, slight lag acceptable.
    UltraSmooth,
    /// Balanced smoothness and responsiveness (matches the defaults).
    Balanced,
    /// Prioritize speed, accept slight jitter.
    Responsive,
}

impl Preset {
    /// Overwrite the preset's parameters in `config`, leaving the rest alone.
    pub fn apply(self, config: &mut AppConfig) {
        let (min_cutoff, beta, gain, velocity_smoothing) = match self {
            Preset::UltraSmooth => (0.5, 0.005, 3.0, 0.6),
            Preset::Balanced => (1.0, 0.01, 3.0, 0.5),
            Preset::Responsive => (1.5, 0.02, 4.0, 0.3),
        };
        config.filter.min_cutoff = min_cutoff;
        config.filter.beta = beta;
        config.motion.gain = gain;
        config.motion.velocity_smoothing = velocity_smoothing;
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::UltraSmooth => "ultra-smooth",
            Preset::Balanced => "balanced",
            Preset::Responsive => "responsive",
        }
    }
}

impl FromStr for Preset {
    type Err = PinchmouseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ultra-smooth" | "ultra_smooth" => Ok(Preset::UltraSmooth),
            "balanced" => Ok(Preset::Balanced),
            "responsive" => Ok(Preset::Responsive),
            other => Err(PinchmouseError::config(format!(
                "unknown preset '{other}' (expected ultra-smooth, balanced, or responsive)"
            ))),
        }
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("pinchmouse").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_non_positive_screen() {
        let mut config = AppConfig::default();
        config.screen.width = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("screen.width"));
    }

    #[test]
    fn test_rejects_non_positive_frequency() {
        let mut config = AppConfig::default();
        config.filter.frequency_hz = -60.0;
        assert!(matches!(
            config.validate(),
            Err(PinchmouseError::Config { .. })
        ));
    }

    #[test]
    fn test_rejects_smoothing_outside_unit_interval() {
        let mut config = AppConfig::default();
        config.motion.velocity_smoothing = 1.2;
        assert!(config.validate().is_err());

        config.motion.velocity_smoothing = 1.0;
        assert!(config.validate().is_ok());

        config.motion.velocity_smoothing = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_margin_wider_than_screen() {
        let mut config = AppConfig::default();
        config.screen = ScreenConfig::new(100.0, 8.0);
        config.motion.edge_margin = 5.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("edge_margin"));
    }

    #[test]
    fn test_presets_apply() {
        let mut config = AppConfig::default();
        Preset::Responsive.apply(&mut config);
        assert_eq!(config.filter.min_cutoff, 1.5);
        assert_eq!(config.filter.beta, 0.02);
        assert_eq!(config.motion.gain, 4.0);
        assert_eq!(config.motion.velocity_smoothing, 0.3);
        // Untouched by presets
        assert_eq!(config.motion.max_speed, 35.0);

        Preset::Balanced.apply(&mut config);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(
            "ultra-smooth".parse::<Preset>().unwrap(),
            Preset::UltraSmooth
        );
        assert_eq!(" Balanced ".parse::<Preset>().unwrap(), Preset::Balanced);
        assert!("jittery".parse::<Preset>().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "motion": { "gain": 2.0 }, "screen": { "width": 2560, "height": 1440 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.motion.gain, 2.0);
        assert_eq!(config.motion.max_speed, 35.0);
        assert_eq!(config.screen.width, 2560.0);
        assert_eq!(config.filter, FilterConfig::default());
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = std::env::temp_dir().join("pinchmouse_test_config");
        let _ = std::fs::remove_dir_all(&dir);

        let path = dir.join("config.json");
        let mut config = AppConfig::default();
        Preset::UltraSmooth.apply(&mut config);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = std::env::temp_dir().join("pinchmouse_no_such_config.json");
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(PinchmouseError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = std::env::temp_dir().join("pinchmouse_test_config_invalid");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let path = dir.join("config.json");
        std::fs::write(&path, r#"{ "motion": { "max_speed": 0 } }"#).unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(PinchmouseError::Config { .. })
        ));

        std::fs::remove_dir_all(&dir).ok();
    }
}

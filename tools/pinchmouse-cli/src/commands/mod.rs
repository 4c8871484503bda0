pub mod config;
pub mod replay;
pub mod simulate;

use anyhow::Context;
use pinchmouse_common::config::{AppConfig, Preset};

use crate::TuningArgs;

/// Resolve the effective configuration: file (or standard location), then
/// preset, then screen overrides. The result is validated.
pub fn resolve_config(tuning: &TuningArgs) -> anyhow::Result<AppConfig> {
    let mut config = match &tuning.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load(),
    };

    if let Some(name) = &tuning.preset {
        let preset: Preset = name.parse()?;
        preset.apply(&mut config);
        tracing::info!(preset = preset.name(), "Applied tuning preset");
    }
    if let Some(width) = tuning.screen_width {
        config.screen.width = width;
    }
    if let Some(height) = tuning.screen_height {
        config.screen.height = height;
    }

    config.validate()?;
    Ok(config)
}

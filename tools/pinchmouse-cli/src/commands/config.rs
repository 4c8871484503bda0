//! Show the effective configuration.

use anyhow::Context;
use pinchmouse_common::config::config_file_path;

use crate::TuningArgs;

pub fn run(tuning: &TuningArgs, save: bool) -> anyhow::Result<()> {
    let config = super::resolve_config(tuning)?;
    println!("{}", serde_json::to_string_pretty(&config)?);

    if save {
        let path = config_file_path();
        config
            .save()
            .with_context(|| format!("Failed to save config to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Saved configuration");
        eprintln!("Saved -> {}", path.display());
    }
    Ok(())
}

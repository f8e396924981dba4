//! Initialize a consumer project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing inlay...");

    let config_path = Path::new("components.json");
    if config_path.exists() && !yes {
        tracing::warn!("components.json already exists. Use --yes to overwrite.");
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG).context("Failed to write components.json")?;
    tracing::info!("Created components.json");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"{
  "style": "default",
  "tailwind": {
    "baseColor": "neutral",
    "cssVariables": true,
    "prefix": ""
  },
  "aliases": {
    "components": "@/components",
    "utils": "@/lib/utils",
    "hooks": "@/hooks"
  }
}
"#;

//! Per-palette inline color tables.
//!
//! When a consumer project opts out of CSS variables, every themable color
//! reference is rewritten to a concrete light/dark pair using these tables.

use std::collections::HashMap;

use serde::Deserialize;

/// A registry base color payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseColor {
    /// Light/dark replacement tables keyed by bare color name
    #[serde(default)]
    pub inline_colors: InlineColors,
}

/// Parallel light and dark color maps.
///
/// Keys are bare color identifiers (`primary`, `muted-foreground`); values
/// are the palette colors they resolve to (`zinc-900`, `zinc-500`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InlineColors {
    #[serde(default)]
    pub light: HashMap<String, String>,

    #[serde(default)]
    pub dark: HashMap<String, String>,
}

impl BaseColor {
    /// Parse a base color payload from registry JSON.
    pub fn parse(json: &str) -> Result<Self, ColorTableError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Error raised for a malformed base color payload.
#[derive(Debug, thiserror::Error)]
#[error("invalid base color table: {0}")]
pub struct ColorTableError(#[from] serde_json::Error);

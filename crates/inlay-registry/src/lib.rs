//! Registry catalog schema and consumer configuration.
//!
//! This crate holds the read-only data the rewrite pipeline consumes: the
//! consumer project's configuration (`components.json`), the registry item
//! manifest, per-palette inline color tables, and icon library lookup tables.

pub mod colors;
pub mod config;
pub mod icons;
pub mod manifest;

pub use colors::{BaseColor, ColorTableError, InlineColors};
pub use config::{Aliases, Config, ConfigError, Direction, TailwindConfig};
pub use icons::{default_mappings, icon_library, source_library_for_style, IconLibrary, IconMappings};
pub use manifest::{RegistryFile, RegistryItem, RegistryItemType};

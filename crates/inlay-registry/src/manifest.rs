//! Registry catalog manifest.
//!
//! A static index of distributable items. The rewrite pipeline consumes only
//! file paths and dependency buckets from it; presentation fields stay with
//! the catalog front end.

use serde::Deserialize;

/// Kind of a registry item, which doubles as its alias bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RegistryItemType {
    #[serde(rename = "registry:ui")]
    Ui,
    #[serde(rename = "registry:component")]
    Component,
    #[serde(rename = "registry:block")]
    Block,
    #[serde(rename = "registry:lib")]
    Lib,
    #[serde(rename = "registry:hook")]
    Hook,
    #[serde(rename = "registry:style")]
    Style,
}

/// A single distributable item in the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    pub name: String,

    #[serde(rename = "type")]
    pub item_type: RegistryItemType,

    /// Source files the item ships
    #[serde(default)]
    pub files: Vec<RegistryFile>,

    /// Other registry items this one needs installed
    #[serde(default)]
    pub registry_dependencies: Vec<String>,

    /// npm packages this item needs
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// One file within a registry item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryFile {
    /// Path relative to the registry root
    pub path: String,

    #[serde(rename = "type")]
    pub file_type: RegistryItemType,

    /// Explicit install target in the consumer project, when fixed
    #[serde(default)]
    pub target: Option<String>,
}

impl RegistryItemType {
    /// The alias bucket files of this type resolve through.
    pub fn bucket(&self) -> &'static str {
        match self {
            RegistryItemType::Ui => "ui",
            RegistryItemType::Component | RegistryItemType::Block | RegistryItemType::Style => {
                "components"
            }
            RegistryItemType::Lib => "lib",
            RegistryItemType::Hook => "hooks",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_registry_item() {
        let item: RegistryItem = serde_json::from_str(
            r#"{
                "name": "alert-dialog",
                "type": "registry:ui",
                "files": [
                    { "path": "ui/alert-dialog.tsx", "type": "registry:ui" }
                ],
                "registryDependencies": ["button"],
                "dependencies": ["@radix-ui/react-alert-dialog"]
            }"#,
        )
        .unwrap();

        assert_eq!(item.name, "alert-dialog");
        assert_eq!(item.item_type, RegistryItemType::Ui);
        assert_eq!(item.files.len(), 1);
        assert_eq!(item.files[0].path, "ui/alert-dialog.tsx");
        assert_eq!(item.registry_dependencies, vec!["button".to_string()]);
    }

    #[test]
    fn item_types_map_to_buckets() {
        assert_eq!(RegistryItemType::Ui.bucket(), "ui");
        assert_eq!(RegistryItemType::Hook.bucket(), "hooks");
        assert_eq!(RegistryItemType::Block.bucket(), "components");
    }
}

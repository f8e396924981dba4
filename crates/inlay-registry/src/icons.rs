//! Icon library descriptors and identifier lookup tables.

use std::collections::HashMap;
use std::sync::LazyLock;

/// An icon library the registry can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconLibrary {
    /// Short identifier used in configuration (e.g. "lucide")
    pub slug: &'static str,

    /// Module specifier components import icons from
    pub module: &'static str,
}

/// Libraries the bundled registry knows how to target.
pub const ICON_LIBRARIES: &[IconLibrary] = &[
    IconLibrary {
        slug: "lucide",
        module: "lucide-react",
    },
    IconLibrary {
        slug: "radix",
        module: "@radix-ui/react-icons",
    },
    IconLibrary {
        slug: "tabler",
        module: "@tabler/icons-react",
    },
];

/// Look up a library descriptor by its configuration slug.
pub fn icon_library(slug: &str) -> Option<&'static IconLibrary> {
    ICON_LIBRARIES.iter().find(|library| library.slug == slug)
}

/// The library a style's registry sources are authored against.
///
/// The new-york style ships radix icons; every other style ships lucide.
pub fn source_library_for_style(style: Option<&str>) -> &'static IconLibrary {
    let slug = match style {
        Some("new-york") => "radix",
        _ => "lucide",
    };
    icon_library(slug).unwrap_or(&ICON_LIBRARIES[0])
}

/// Canonical icon name → library slug → local identifier.
pub type IconMappings = HashMap<String, HashMap<String, String>>;

/// Parse an icon lookup table from registry JSON.
pub fn parse_mappings(json: &str) -> Result<IconMappings, IconTableError> {
    Ok(serde_json::from_str(json)?)
}

/// The lookup table bundled with the registry's own components.
pub fn default_mappings() -> &'static IconMappings {
    static MAPPINGS: LazyLock<IconMappings> = LazyLock::new(|| {
        let entries: &[(&str, &str, &str)] = &[
            // (lucide, radix, tabler)
            ("ArrowLeftIcon", "ArrowLeftIcon", "IconArrowLeft"),
            ("ArrowRightIcon", "ArrowRightIcon", "IconArrowRight"),
            ("CalendarIcon", "CalendarIcon", "IconCalendar"),
            ("CheckIcon", "CheckIcon", "IconCheck"),
            ("ChevronDownIcon", "ChevronDownIcon", "IconChevronDown"),
            ("ChevronLeftIcon", "ChevronLeftIcon", "IconChevronLeft"),
            ("ChevronRightIcon", "ChevronRightIcon", "IconChevronRight"),
            ("ChevronUpIcon", "ChevronUpIcon", "IconChevronUp"),
            ("CircleIcon", "DotFilledIcon", "IconPointFilled"),
            ("GripVerticalIcon", "DragHandleDots2Icon", "IconGripVertical"),
            ("MinusIcon", "MinusIcon", "IconMinus"),
            ("MoreHorizontalIcon", "DotsHorizontalIcon", "IconDots"),
            ("PanelLeftIcon", "ViewVerticalIcon", "IconLayoutSidebar"),
            ("PlusIcon", "PlusIcon", "IconPlus"),
            ("SearchIcon", "MagnifyingGlassIcon", "IconSearch"),
            ("XIcon", "Cross2Icon", "IconX"),
        ];

        let mut mappings = IconMappings::new();
        for (lucide, radix, tabler) in entries {
            let mut by_library = HashMap::new();
            by_library.insert("lucide".to_string(), (*lucide).to_string());
            by_library.insert("radix".to_string(), (*radix).to_string());
            by_library.insert("tabler".to_string(), (*tabler).to_string());
            mappings.insert((*lucide).to_string(), by_library);
        }
        mappings
    });

    &MAPPINGS
}

/// Error raised for a malformed icon lookup table.
#[derive(Debug, thiserror::Error)]
#[error("invalid icon table: {0}")]
pub struct IconTableError(#[from] serde_json::Error);

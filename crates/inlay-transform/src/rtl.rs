//! Right-to-left rewriting of physical direction utilities.
//!
//! Physical left/right classes become writing-direction-relative start/end
//! classes wherever Tailwind has a logical spelling. Families without one
//! (translate, slide animations, spacing reversal, directional cursors) keep
//! the original token and gain an `rtl:`-guarded sibling instead.

use crate::class_name::{join_class_name, split_class_name};
use crate::error::TransformError;
use crate::pipeline::{string_edit, with_program, Edit, SourceDocument, Transform, TransformContext};
use crate::walk::scan_program;

/// Physical → logical prefix replacements.
///
/// Declaration order is load-bearing: negative forms come before their
/// positive counterparts and longer prefixes before shorter ones, so a token
/// never matches a partial rule.
const REPLACE_MAPPINGS: &[(&str, &str)] = &[
    // Negative margins (must come before positive).
    ("-ml-", "-ms-"),
    ("-mr-", "-me-"),
    // Margins.
    ("ml-", "ms-"),
    ("mr-", "me-"),
    // Paddings.
    ("pl-", "ps-"),
    ("pr-", "pe-"),
    // Negative positioning (must come before positive).
    ("-left-", "-start-"),
    ("-right-", "-end-"),
    // Positioning.
    ("left-", "start-"),
    ("right-", "end-"),
    // Inset.
    ("inset-l-", "inset-inline-start-"),
    ("inset-r-", "inset-inline-end-"),
    // Rounded corners (specific first).
    ("rounded-tl-", "rounded-ss-"),
    ("rounded-tr-", "rounded-se-"),
    ("rounded-bl-", "rounded-es-"),
    ("rounded-br-", "rounded-ee-"),
    ("rounded-l-", "rounded-s-"),
    ("rounded-r-", "rounded-e-"),
    // Borders (with values first).
    ("border-l-", "border-s-"),
    ("border-r-", "border-e-"),
    // Borders (without values).
    ("border-l", "border-s"),
    ("border-r", "border-e"),
    // Text alignment.
    ("text-left", "text-start"),
    ("text-right", "text-end"),
    // Scroll margins.
    ("scroll-ml-", "scroll-ms-"),
    ("scroll-mr-", "scroll-me-"),
    // Scroll paddings.
    ("scroll-pl-", "scroll-ps-"),
    ("scroll-pr-", "scroll-pe-"),
    // Float.
    ("float-left", "float-start"),
    ("float-right", "float-end"),
    // Clear.
    ("clear-left", "clear-start"),
    ("clear-right", "clear-end"),
    // Transform origin (specific first).
    ("origin-top-left", "origin-top-start"),
    ("origin-top-right", "origin-top-end"),
    ("origin-bottom-left", "origin-bottom-start"),
    ("origin-bottom-right", "origin-bottom-end"),
    ("origin-left", "origin-start"),
    ("origin-right", "origin-end"),
];

/// Tokens with no logical spelling: keep the original and append an
/// `rtl:`-guarded sibling with the direction flipped.
const ADDITIVE_MIRROR_MAPPINGS: &[(&str, &str)] = &[
    ("-translate-x-", "translate-x-"),
    ("translate-x-", "-translate-x-"),
    ("slide-in-from-left", "slide-in-from-right"),
    ("slide-in-from-right", "slide-in-from-left"),
    ("slide-out-to-left", "slide-out-to-right"),
    ("slide-out-to-right", "slide-out-to-left"),
];

/// Multi-child spacing utilities gain an `rtl:*-reverse` flag.
const REVERSE_MAPPINGS: &[(&str, &str)] = &[
    ("space-x-", "space-x-reverse"),
    ("divide-x-", "divide-x-reverse"),
];

/// Exact-match tokens whose value swaps under `rtl:`.
const SWAP_MAPPINGS: &[(&str, &str)] = &[
    ("cursor-w-resize", "cursor-e-resize"),
    ("cursor-e-resize", "cursor-w-resize"),
];

/// Slide animations inside a logical side variant take logical values
/// directly instead of an additive mirror.
const LOGICAL_SIDE_SLIDE_MAPPINGS: &[(&str, &str, &str)] = &[
    ("data-[side=inline-start]", "slide-in-from-right", "slide-in-from-end"),
    ("data-[side=inline-start]", "slide-out-to-right", "slide-out-to-end"),
    ("data-[side=inline-end]", "slide-in-from-left", "slide-in-from-start"),
    ("data-[side=inline-end]", "slide-out-to-left", "slide-out-to-start"),
];

/// Marker class authored in the registry for icons that should flip in RTL.
/// The marker itself never reaches the consumer.
const RTL_FLIP_MARKER: &str = "inlay-rtl-flip";

/// Replace-rule prefixes frozen inside a physical side variant: the
/// surrounding guard already pins a physical side, so flipping the token's
/// own position would double-invert it.
const POSITIONING_PREFIXES: &[&str] = &[
    "-left-", "-right-", "left-", "right-", "inset-l-", "inset-r-",
];

/// Components whose `side` prop takes logical values.
pub(crate) const SIDE_PROP_COMPONENTS: &[&str] = &[
    "ContextMenuContent",
    "ContextMenuSubContent",
    "DropdownMenuSubContent",
];

/// Rewrite a class-attribute string for right-to-left layouts.
///
/// Tokens are processed left to right; order is preserved and additive
/// tokens land immediately after the token that produced them.
pub fn apply_rtl_mapping(input: &str) -> String {
    input
        .split(' ')
        .flat_map(map_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn map_token(class_name: &str) -> Vec<String> {
    if class_name.is_empty() {
        return vec![String::new()];
    }

    // A token already scoped to a direction is an authoring decision.
    if has_direction_guard(class_name) {
        return vec![class_name.to_string()];
    }

    // The flip marker is consumed, not kept.
    if class_name == RTL_FLIP_MARKER {
        return vec!["rtl:rotate-180".to_string()];
    }

    let split = split_class_name(class_name);
    let base = split.base;
    if base.is_empty() {
        return vec![class_name.to_string()];
    }

    // Slide animations inside logical side variants map to logical values.
    if let Some(variant) = split.variant {
        for (variant_pattern, physical, logical) in LOGICAL_SIDE_SLIDE_MAPPINGS {
            if variant.contains(variant_pattern) && base.starts_with(physical) {
                let mapped = base.replacen(physical, logical, 1);
                return vec![join_class_name(split.variant, &mapped, split.modifier)];
            }
        }
    }

    // Translate and slide tokens keep the original and gain a mirror.
    for (physical, mirrored) in ADDITIVE_MIRROR_MAPPINGS {
        if base.starts_with(physical) {
            let mirrored_base = base.replacen(physical, mirrored, 1);
            return vec![
                class_name.to_string(),
                join_class_name(Some(&rtl_guard(split.variant)), &mirrored_base, split.modifier),
            ];
        }
    }

    // Spacing utilities reverse their child order under rtl.
    for (prefix, reverse_class) in REVERSE_MAPPINGS {
        if base.starts_with(prefix) {
            return vec![
                class_name.to_string(),
                join_class_name(Some(&rtl_guard(split.variant)), reverse_class, None),
            ];
        }
    }

    // Directional cursors swap their value under rtl.
    for (physical, swapped) in SWAP_MAPPINGS {
        if base == *physical {
            return vec![
                class_name.to_string(),
                join_class_name(Some(&rtl_guard(split.variant)), swapped, None),
            ];
        }
    }

    // A variant pinned to a physical side keeps physical positioning.
    let physical_side_variant = split
        .variant
        .is_some_and(|variant| {
            variant.contains("data-[side=left]") || variant.contains("data-[side=right]")
        });

    let mut mapped = base.to_string();
    for (physical, logical) in REPLACE_MAPPINGS {
        if physical_side_variant
            && POSITIONING_PREFIXES
                .iter()
                .any(|prefix| physical.starts_with(prefix))
        {
            continue;
        }
        if base.starts_with(physical) {
            mapped = base.replacen(physical, logical, 1);
            break;
        }
        // Bare no-value forms, e.g. border-l → border-s.
        if base == physical.trim_end_matches('-') {
            mapped = logical.trim_end_matches('-').to_string();
            break;
        }
    }

    vec![join_class_name(split.variant, &mapped, split.modifier)]
}

fn has_direction_guard(class_name: &str) -> bool {
    class_name.starts_with("rtl:")
        || class_name.starts_with("ltr:")
        || class_name.contains(":rtl:")
        || class_name.contains(":ltr:")
}

fn rtl_guard(variant: Option<&str>) -> String {
    match variant {
        Some(variant) => format!("rtl:{variant}"),
        None => "rtl".to_string(),
    }
}

/// Mirrors physical direction classes for right-to-left projects.
///
/// Walks every class-bearing string literal in the tree, plus the `side`
/// prop values of the components that accept logical sides. A no-op unless
/// the configured direction is rtl.
pub struct TransformRtl;

impl Transform for TransformRtl {
    fn name(&self) -> &'static str {
        "rtl"
    }

    fn apply(
        &self,
        document: &mut SourceDocument,
        context: &TransformContext<'_>,
    ) -> Result<(), TransformError> {
        if !context.config.is_rtl() {
            return Ok(());
        }

        let edits = with_program(document, |program, source| {
            let scan = scan_program(program);
            let mut edits: Vec<Edit> = scan
                .class_strings
                .iter()
                .filter_map(|&span| string_edit(source, span, apply_rtl_mapping))
                .collect();

            // side="left"/"right" props (and parameter defaults) become
            // logical values on the components that understand them.
            for &span in &scan.side_values {
                if let Some(edit) = string_edit(source, span, |value| match value {
                    "left" => "inline-start".to_string(),
                    "right" => "inline-end".to_string(),
                    other => other.to_string(),
                }) {
                    edits.push(edit);
                }
            }
            edits
        })?;

        document.apply_edits(edits);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use inlay_registry::config::{Config, Direction};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pipeline::{transform_with, TransformInput};

    fn rtl_config() -> Config {
        Config {
            direction: Some(Direction::Rtl),
            ..Config::default()
        }
    }

    #[test]
    fn maps_margins() {
        assert_eq!(apply_rtl_mapping("ml-2"), "ms-2");
        assert_eq!(apply_rtl_mapping("mr-4"), "me-4");
        assert_eq!(apply_rtl_mapping("-ml-2"), "-ms-2");
        assert_eq!(apply_rtl_mapping("-mr-4"), "-me-4");
    }

    #[test]
    fn maps_paddings() {
        assert_eq!(apply_rtl_mapping("pl-2"), "ps-2");
        assert_eq!(apply_rtl_mapping("pr-4"), "pe-4");
    }

    #[test]
    fn maps_positioning() {
        assert_eq!(apply_rtl_mapping("left-0"), "start-0");
        assert_eq!(apply_rtl_mapping("right-0"), "end-0");
        assert_eq!(apply_rtl_mapping("-left-2"), "-start-2");
        assert_eq!(apply_rtl_mapping("-right-2"), "-end-2");
    }

    #[test]
    fn maps_inset() {
        assert_eq!(apply_rtl_mapping("inset-l-0"), "inset-inline-start-0");
        assert_eq!(apply_rtl_mapping("inset-r-0"), "inset-inline-end-0");
    }

    #[test]
    fn maps_borders_with_and_without_values() {
        assert_eq!(apply_rtl_mapping("border-l"), "border-s");
        assert_eq!(apply_rtl_mapping("border-r"), "border-e");
        assert_eq!(apply_rtl_mapping("border-l-2"), "border-s-2");
        assert_eq!(apply_rtl_mapping("border-r-2"), "border-e-2");
    }

    #[test]
    fn maps_rounded_corners() {
        assert_eq!(apply_rtl_mapping("rounded-l-md"), "rounded-s-md");
        assert_eq!(apply_rtl_mapping("rounded-r-md"), "rounded-e-md");
        assert_eq!(apply_rtl_mapping("rounded-tl-md"), "rounded-ss-md");
        assert_eq!(apply_rtl_mapping("rounded-tr-md"), "rounded-se-md");
        assert_eq!(apply_rtl_mapping("rounded-bl-md"), "rounded-es-md");
        assert_eq!(apply_rtl_mapping("rounded-br-md"), "rounded-ee-md");
    }

    #[test]
    fn maps_text_alignment_float_and_clear() {
        assert_eq!(apply_rtl_mapping("text-left"), "text-start");
        assert_eq!(apply_rtl_mapping("text-right"), "text-end");
        assert_eq!(apply_rtl_mapping("float-left"), "float-start");
        assert_eq!(apply_rtl_mapping("clear-right"), "clear-end");
    }

    #[test]
    fn maps_scroll_margins_and_paddings() {
        assert_eq!(apply_rtl_mapping("scroll-ml-2"), "scroll-ms-2");
        assert_eq!(apply_rtl_mapping("scroll-pr-2"), "scroll-pe-2");
    }

    #[test]
    fn maps_transform_origins() {
        assert_eq!(apply_rtl_mapping("origin-left"), "origin-start");
        assert_eq!(apply_rtl_mapping("origin-top-right"), "origin-top-end");
        assert_eq!(
            apply_rtl_mapping("origin-bottom-left"),
            "origin-bottom-start"
        );
    }

    #[test]
    fn preserves_variants_and_modifiers() {
        assert_eq!(apply_rtl_mapping("hover:ml-2"), "hover:ms-2");
        assert_eq!(apply_rtl_mapping("sm:md:ml-2"), "sm:md:ms-2");
        assert_eq!(apply_rtl_mapping("ml-[10px]"), "ms-[10px]");
        assert_eq!(apply_rtl_mapping("left-[50%]"), "start-[50%]");
        assert_eq!(apply_rtl_mapping("ml-2/50"), "ms-2/50");
    }

    #[test]
    fn preserves_order_across_token_lists() {
        assert_eq!(
            apply_rtl_mapping("ml-2 mr-4 pl-2 pr-4"),
            "ms-2 me-4 ps-2 pe-4"
        );
    }

    #[test]
    fn guarded_tokens_are_fixed_points() {
        assert_eq!(apply_rtl_mapping("rtl:ml-2"), "rtl:ml-2");
        assert_eq!(apply_rtl_mapping("ltr:mr-4"), "ltr:mr-4");
        assert_eq!(apply_rtl_mapping("rtl:rotate-180"), "rtl:rotate-180");
    }

    #[test]
    fn translate_gains_mirrored_sibling() {
        assert_eq!(
            apply_rtl_mapping("translate-x-2"),
            "translate-x-2 rtl:-translate-x-2"
        );
        assert_eq!(
            apply_rtl_mapping("-translate-x-1/2"),
            "-translate-x-1/2 rtl:translate-x-1/2"
        );
        assert_eq!(
            apply_rtl_mapping("hover:translate-x-2"),
            "hover:translate-x-2 rtl:hover:-translate-x-2"
        );
    }

    #[test]
    fn slide_animations_gain_mirrored_sibling() {
        assert_eq!(
            apply_rtl_mapping("slide-in-from-left-2"),
            "slide-in-from-left-2 rtl:slide-in-from-right-2"
        );
        assert_eq!(
            apply_rtl_mapping("slide-out-to-right-2"),
            "slide-out-to-right-2 rtl:slide-out-to-left-2"
        );
        assert_eq!(
            apply_rtl_mapping("data-[side=left]:slide-in-from-right-2"),
            "data-[side=left]:slide-in-from-right-2 rtl:data-[side=left]:slide-in-from-left-2"
        );
    }

    #[test]
    fn spacing_gains_reverse_flag() {
        assert_eq!(
            apply_rtl_mapping("space-x-4"),
            "space-x-4 rtl:space-x-reverse"
        );
        assert_eq!(
            apply_rtl_mapping("divide-x-2"),
            "divide-x-2 rtl:divide-x-reverse"
        );
        // Column spacing never cross-triggers the row family.
        assert_eq!(apply_rtl_mapping("space-y-4"), "space-y-4");
    }

    #[test]
    fn directional_cursors_swap() {
        assert_eq!(
            apply_rtl_mapping("cursor-w-resize"),
            "cursor-w-resize rtl:cursor-e-resize"
        );
        assert_eq!(
            apply_rtl_mapping("cursor-e-resize"),
            "cursor-e-resize rtl:cursor-w-resize"
        );
    }

    #[test]
    fn flip_marker_becomes_guarded_rotation() {
        assert_eq!(apply_rtl_mapping("inlay-rtl-flip"), "rtl:rotate-180");
        assert_eq!(
            apply_rtl_mapping("size-4 inlay-rtl-flip"),
            "size-4 rtl:rotate-180"
        );
    }

    #[test]
    fn logical_side_variants_take_logical_slide_values() {
        assert_eq!(
            apply_rtl_mapping("data-[side=inline-start]:slide-in-from-right-2"),
            "data-[side=inline-start]:slide-in-from-end-2"
        );
        assert_eq!(
            apply_rtl_mapping("data-[side=inline-end]:slide-out-to-left-2"),
            "data-[side=inline-end]:slide-out-to-start-2"
        );
    }

    #[test]
    fn physical_side_variant_freezes_positioning_only() {
        // Position tokens keep their physical offsets under a physical guard.
        assert_eq!(
            apply_rtl_mapping("data-[side=left]:-right-1"),
            "data-[side=left]:-right-1"
        );
        assert_eq!(
            apply_rtl_mapping("data-[side=right]:inset-l-0"),
            "data-[side=right]:inset-l-0"
        );
        // Everything else still maps inside the same guard.
        assert_eq!(
            apply_rtl_mapping("data-[side=left]:ml-2"),
            "data-[side=left]:ms-2"
        );
        assert_eq!(
            apply_rtl_mapping("data-[side=right]:rounded-l-md"),
            "data-[side=right]:rounded-s-md"
        );
    }

    #[test]
    fn does_not_transform_unrelated_classes() {
        assert_eq!(apply_rtl_mapping("bg-red-500"), "bg-red-500");
        assert_eq!(apply_rtl_mapping("flex"), "flex");
        assert_eq!(apply_rtl_mapping("mx-auto"), "mx-auto");
        assert_eq!(apply_rtl_mapping("px-4"), "px-4");
    }

    #[test]
    fn transforms_class_name_attributes() {
        let raw = "export function Foo() {\n  return <div className=\"ml-2 mr-4 text-left\">foo</div>\n}\n";
        let output = transform_with(
            TransformInput::new("foo.tsx", raw, &rtl_config()),
            &[&TransformRtl],
        )
        .unwrap();

        assert!(output.contains("ms-2"));
        assert!(output.contains("me-4"));
        assert!(output.contains("text-start"));
        assert!(!output.contains("ml-2"));
    }

    #[test]
    fn transforms_cn_arguments_and_branches() {
        let raw = "export function Foo({ open }) {\n  return <div className={cn(\"ml-2 mr-4\", open && \"pl-2\", open ? \"pr-1\" : \"pr-2\")} />\n}\n";
        let output = transform_with(
            TransformInput::new("foo.tsx", raw, &rtl_config()),
            &[&TransformRtl],
        )
        .unwrap();

        assert!(output.contains("ms-2 me-4"));
        assert!(output.contains("ps-2"));
        assert!(output.contains("pe-1"));
        assert!(output.contains("pe-2"));
    }

    #[test]
    fn transforms_cva_base_and_variants() {
        let raw = concat!(
            "import { cva } from \"class-variance-authority\"\n",
            "const buttonVariants = cva(\"ml-2 inline-flex\", {\n",
            "  variants: {\n",
            "    size: {\n",
            "      default: \"pl-4 pr-2\",\n",
            "      sm: \"pl-2\",\n",
            "    },\n",
            "  },\n",
            "  defaultVariants: { size: \"default\" },\n",
            "})\n",
        );
        let output = transform_with(
            TransformInput::new("button.tsx", raw, &rtl_config()),
            &[&TransformRtl],
        )
        .unwrap();

        assert!(output.contains("ms-2 inline-flex"));
        assert!(output.contains("ps-4 pe-2"));
        assert!(output.contains("ps-2"));
        // The discriminator value is not a class list.
        assert!(output.contains("size: \"default\""));
    }

    #[test]
    fn transforms_merge_props_class_name() {
        let raw = "export function Foo(props) {\n  return mergeProps({ className: cn(\"ml-2\", props.active && \"pl-1\") }, props)\n}\n";
        let output = transform_with(
            TransformInput::new("foo.tsx", raw, &rtl_config()),
            &[&TransformRtl],
        )
        .unwrap();

        assert!(output.contains("ms-2"));
        assert!(output.contains("ps-1"));
    }

    #[test]
    fn maps_side_props_on_menu_content() {
        let raw = "export function Menu() {\n  return <DropdownMenuSubContent side=\"right\" className=\"ml-1\" />\n}\n";
        let output = transform_with(
            TransformInput::new("menu.tsx", raw, &rtl_config()),
            &[&TransformRtl],
        )
        .unwrap();

        assert!(output.contains("side=\"inline-end\""));
        assert!(output.contains("ms-1"));
    }

    #[test]
    fn maps_side_parameter_defaults_on_whitelisted_functions() {
        let raw = concat!(
            "function DropdownMenuSubContent({ side = \"right\", ...props }) {\n",
            "  return <div {...props} />\n",
            "}\n",
            "function Unrelated({ side = \"right\" }) {\n",
            "  return <div />\n",
            "}\n",
        );
        let output = transform_with(
            TransformInput::new("menu.tsx", raw, &rtl_config()),
            &[&TransformRtl],
        )
        .unwrap();

        assert!(output.contains("DropdownMenuSubContent({ side = \"inline-end\""));
        assert!(output.contains("Unrelated({ side = \"right\" }"));
    }

    #[test]
    fn noop_when_direction_is_ltr() {
        let raw = "export const x = <div className=\"ml-2\" />\n";
        let config = Config {
            direction: Some(Direction::Ltr),
            ..Config::default()
        };
        let output =
            transform_with(TransformInput::new("x.tsx", raw, &config), &[&TransformRtl]).unwrap();

        assert_eq!(output, raw);
    }
}

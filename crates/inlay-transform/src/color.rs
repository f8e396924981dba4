//! Inline color rewriting for projects without CSS variables.
//!
//! Each themable color reference becomes a light/dark pair of concrete
//! palette classes, e.g. `bg-primary` → `bg-zinc-900 dark:bg-zinc-50`.

use inlay_registry::colors::InlineColors;

use crate::class_name::{join_class_name, split_class_name};
use crate::error::TransformError;
use crate::pipeline::{string_edit, with_program, SourceDocument, Transform, TransformContext};
use crate::walk::scan_program;

/// Color-bearing utility prefixes. `ring-offset-` sits ahead of `ring-` so
/// the first match is the most specific one.
const COLOR_PREFIXES: &[&str] = &["bg-", "text-", "border-", "ring-offset-", "ring-"];

/// Rewrite a class-attribute string against a light/dark color table.
///
/// Tokens that carry no mapped color pass through into the light set
/// unchanged. Each set keeps insertion order and never holds a token twice.
pub fn apply_color_mapping(input: &str, mapping: &InlineColors) -> String {
    // A bare `border` keeps its structural class once border colors are
    // spelled out explicitly.
    let input = if input.contains(" border ") {
        input.replace(" border ", " border border-border ")
    } else {
        input.to_string()
    };

    let mut light_mode: Vec<String> = Vec::new();
    let mut dark_mode: Vec<String> = Vec::new();

    for class_name in input.split(' ') {
        if class_name.is_empty() {
            continue;
        }
        let split = split_class_name(class_name);
        let Some(prefix) = COLOR_PREFIXES
            .iter()
            .find(|prefix| split.base.starts_with(**prefix))
        else {
            push_unique(&mut light_mode, class_name.to_string());
            continue;
        };

        let needle = &split.base[prefix.len()..];
        match (mapping.light.get(needle), mapping.dark.get(needle)) {
            (Some(light), Some(dark)) => {
                push_unique(
                    &mut light_mode,
                    join_class_name(split.variant, &format!("{prefix}{light}"), split.modifier),
                );
                let dark_variant = match split.variant {
                    Some(variant) => format!("dark:{variant}"),
                    None => "dark".to_string(),
                };
                push_unique(
                    &mut dark_mode,
                    join_class_name(
                        Some(&dark_variant),
                        &format!("{prefix}{dark}"),
                        split.modifier,
                    ),
                );
            }
            _ => push_unique(&mut light_mode, class_name.to_string()),
        }
    }

    light_mode
        .into_iter()
        .chain(dark_mode)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn push_unique(set: &mut Vec<String>, token: String) {
    if !set.contains(&token) {
        set.push(token);
    }
}

/// Inlines themable colors into concrete palette classes.
///
/// A no-op for projects styled through CSS variables, or when no base color
/// table was supplied. Applies to every string literal in the tree; tokens
/// without a color prefix come back out untouched.
pub struct TransformCssVars;

impl Transform for TransformCssVars {
    fn name(&self) -> &'static str {
        "css-vars"
    }

    fn apply(
        &self,
        document: &mut SourceDocument,
        context: &TransformContext<'_>,
    ) -> Result<(), TransformError> {
        if context.config.tailwind.css_variables {
            return Ok(());
        }
        let Some(base_color) = context.base_color else {
            return Ok(());
        };

        let edits = with_program(document, |program, source| {
            scan_program(program)
                .strings
                .iter()
                .filter_map(|&span| {
                    string_edit(source, span, |value| {
                        apply_color_mapping(value, &base_color.inline_colors)
                    })
                })
                .collect::<Vec<_>>()
        })?;

        document.apply_edits(edits);
        Ok(())
    }
}

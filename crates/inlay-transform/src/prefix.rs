//! Utility-class prefix injection.
//!
//! Consumer projects that namespace their utilities get the prefix inserted
//! into every token, between the variant guard and the base name. Unlike the
//! direction mapper there is no conditional skip logic; every token in a
//! class-bearing literal is rewritten.

use std::sync::LazyLock;

use regex::Regex;

use crate::class_name::{join_class_name, split_class_name};
use crate::error::TransformError;
use crate::pipeline::{string_edit, with_program, SourceDocument, Transform, TransformContext};
use crate::walk::scan_program;

/// Prefix every token in a class-attribute string.
///
/// `apply_prefix(x, "")` is the identity; double application is not guarded
/// against, callers own idempotence.
pub fn apply_prefix(input: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return input.to_string();
    }
    input
        .split(' ')
        .map(|class_name| {
            if class_name.is_empty() {
                return String::new();
            }
            let split = split_class_name(class_name);
            join_class_name(
                split.variant,
                &format!("{prefix}{}", split.base),
                split.modifier,
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

static APPLY_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@apply\s+([^;\n}]+)").expect("invalid @apply pattern"));

/// Prefix the token lists of `@apply` declarations in stylesheet text.
///
/// A coarse string pass for non-tree content: each declaration's token list
/// is located by pattern and substituted literally. Identical declarations
/// are only processed once so the substitution cannot re-prefix its own
/// output.
pub fn apply_prefixes_css(css: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return css.to_string();
    }
    let mut output = css.to_string();
    let mut seen: Vec<&str> = Vec::new();
    for captures in APPLY_DECLARATION.captures_iter(css) {
        let Some(token_list) = captures.get(1).map(|m| m.as_str().trim()) else {
            continue;
        };
        if token_list.is_empty() || seen.contains(&token_list) {
            continue;
        }
        seen.push(token_list);
        output = output.replace(token_list, &apply_prefix(token_list, prefix));
    }
    output
}

/// Injects the configured utility prefix into every class-bearing literal.
///
/// A no-op when no prefix is configured.
pub struct TransformPrefixes;

impl Transform for TransformPrefixes {
    fn name(&self) -> &'static str {
        "prefixes"
    }

    fn apply(
        &self,
        document: &mut SourceDocument,
        context: &TransformContext<'_>,
    ) -> Result<(), TransformError> {
        let prefix = context.config.tailwind.prefix.as_str();
        if prefix.is_empty() {
            return Ok(());
        }

        let edits = with_program(document, |program, source| {
            scan_program(program)
                .class_strings
                .iter()
                .filter_map(|&span| string_edit(source, span, |value| apply_prefix(value, prefix)))
                .collect::<Vec<_>>()
        })?;

        document.apply_edits(edits);
        Ok(())
    }
}

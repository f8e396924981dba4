//! Import alias resolution for consumer project layouts.
//!
//! Registry sources reference each other through the canonical internal root
//! (`@/registry/<style>/<bucket>/...`). Each bucket is independently
//! remappable to wherever the consumer project keeps that kind of file.

use oxc_ast::ast::{Statement, StringLiteral};
use oxc_span::Span;

use inlay_registry::config::Config;

use crate::error::TransformError;
use crate::pipeline::{string_edit, with_program, Edit, SourceDocument, Transform, TransformContext};
use crate::walk::scan_program;

/// Canonical internal path root.
const REGISTRY_ROOT: &str = "@/registry/";

/// Style identifiers whose path segment is dropped during resolution.
const KNOWN_STYLES: &[&str] = &["default", "new-york"];

/// Style a remote source is assumed to be authored against.
const DEFAULT_STYLE: &str = "default";

/// Resolve one import path against the consumer's alias configuration.
///
/// Idempotent on its own output: a resolved path no longer starts with the
/// canonical root, so running it again changes nothing.
pub fn update_import_alias(specifier: &str, config: &Config, is_remote: bool) -> String {
    if !specifier.starts_with("@/") {
        return specifier.to_string();
    }

    // Remote sources address the registry as a faux default-style tree.
    let specifier = if is_remote && !specifier.starts_with(REGISTRY_ROOT) {
        format!("@/registry/{DEFAULT_STYLE}/{}", &specifier[2..])
    } else {
        specifier.to_string()
    };

    match specifier.strip_prefix(REGISTRY_ROOT) {
        Some(rest) => {
            let rest = strip_style_segment(rest);
            resolve_buckets(&specifier, rest, config)
                // Unknown bucket: fall back beneath the components alias,
                // keeping the unrecognized segment.
                .unwrap_or_else(|| join_alias(&config.aliases.components, rest))
        }
        None => {
            // A bare alias path resolves when a bucket matches; otherwise
            // only the alias root is swapped.
            let rest = &specifier[2..];
            resolve_buckets(&specifier, rest, config)
                .unwrap_or_else(|| format!("{}/{rest}", config.aliases.root()))
        }
    }
}

/// Ordered bucket table, most specific first. `lib/utils` sits ahead of
/// `lib` so the utils module resolves through its own alias.
fn bucket_table(config: &Config) -> [(&'static str, Option<String>); 5] {
    let aliases = &config.aliases;
    [
        ("ui", Some(aliases.ui_alias())),
        ("components", Some(aliases.components.clone())),
        ("lib/utils", Some(aliases.utils.clone())),
        ("lib", aliases.lib.clone()),
        ("hooks", aliases.hooks.clone()),
    ]
}

fn resolve_buckets(original: &str, rest: &str, config: &Config) -> Option<String> {
    for (bucket, alias) in bucket_table(config) {
        let Some(remainder) = strip_bucket(rest, bucket) else {
            continue;
        };
        let Some(alias) = alias else {
            continue;
        };
        if alias.is_empty() {
            // An empty alias opts this bucket out of rewriting.
            return Some(original.to_string());
        }
        return Some(join_alias(&alias, remainder));
    }
    None
}

fn strip_bucket<'a>(rest: &'a str, bucket: &str) -> Option<&'a str> {
    if rest == bucket {
        return Some("");
    }
    rest.strip_prefix(bucket)?.strip_prefix('/')
}

fn strip_style_segment(rest: &str) -> &str {
    for style in KNOWN_STYLES {
        if let Some(stripped) = rest.strip_prefix(style).and_then(|r| r.strip_prefix('/')) {
            return stripped;
        }
    }
    rest
}

fn join_alias(alias: &str, remainder: &str) -> String {
    if remainder.is_empty() {
        alias.to_string()
    } else {
        format!("{alias}/{remainder}")
    }
}

fn module_specifier<'a>(statement: &'a Statement<'a>) -> Option<&'a StringLiteral<'a>> {
    match statement {
        Statement::ImportDeclaration(declaration) => Some(&declaration.source),
        Statement::ExportNamedDeclaration(declaration) => declaration.source.as_ref(),
        Statement::ExportAllDeclaration(declaration) => Some(&declaration.source),
        _ => None,
    }
}

/// Rewrites internal registry paths to the consumer's configured aliases.
///
/// Import and export module specifiers go through a declaration-aware pass;
/// registry-rooted string and template literals anywhere else (e.g. a value
/// handed to a runtime component loader) are rewritten separately so import
/// statements are never double-processed.
pub struct TransformImports;

impl Transform for TransformImports {
    fn name(&self) -> &'static str {
        "imports"
    }

    fn apply(
        &self,
        document: &mut SourceDocument,
        context: &TransformContext<'_>,
    ) -> Result<(), TransformError> {
        let edits = with_program(document, |program, source| {
            let mut edits: Vec<Edit> = Vec::new();
            let mut module_spans: Vec<Span> = Vec::new();

            for statement in program.body.iter() {
                let Some(literal) = module_specifier(statement) else {
                    continue;
                };
                module_spans.push(literal.span);
                let value = literal.value.as_str();
                let updated = update_import_alias(value, context.config, context.is_remote);
                if updated != value {
                    edits.push(Edit {
                        span: literal.span,
                        text: format!("\"{updated}\""),
                    });
                }
            }

            let scan = scan_program(program);
            for &span in &scan.strings {
                if module_spans.contains(&span) {
                    continue;
                }
                if let Some(edit) = string_edit(source, span, |value| {
                    if value.starts_with(REGISTRY_ROOT) {
                        update_import_alias(value, context.config, context.is_remote)
                    } else {
                        value.to_string()
                    }
                }) {
                    edits.push(edit);
                }
            }
            for &span in &scan.templates {
                let raw = span.source_text(source);
                if raw.len() < 2 {
                    continue;
                }
                let value = &raw[1..raw.len() - 1];
                if !value.starts_with(REGISTRY_ROOT) {
                    continue;
                }
                let updated = update_import_alias(value, context.config, context.is_remote);
                if updated != value {
                    edits.push(Edit {
                        span,
                        text: format!("`{updated}`"),
                    });
                }
            }
            edits
        })?;

        document.apply_edits(edits);
        Ok(())
    }
}

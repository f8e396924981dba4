//! Icon identifier mapping between icon libraries.
//!
//! Registry sources are authored against one icon library per style. When a
//! consumer prefers another library, every named import from the source
//! module and every JSX usage is renamed through the lookup table, and the
//! import moves to the target library's module.

use oxc_ast::ast::{ImportDeclarationSpecifier, ModuleExportName, Statement};

use inlay_registry::icons::{default_mappings, icon_library, source_library_for_style, IconMappings};

use crate::error::TransformError;
use crate::pipeline::{with_program, Edit, SourceDocument, Transform, TransformContext};
use crate::walk::scan_program;

/// Swaps icon identifiers to the configured icon library.
///
/// A no-op when no library is configured or the configured library is the
/// one the style is authored against. Unknown identifiers are warned about
/// and left behind on the original module.
pub struct TransformIcons;

impl Transform for TransformIcons {
    fn name(&self) -> &'static str {
        "icons"
    }

    fn apply(
        &self,
        document: &mut SourceDocument,
        context: &TransformContext<'_>,
    ) -> Result<(), TransformError> {
        let Some(target_slug) = context.config.icon_library.as_deref() else {
            return Ok(());
        };
        let Some(target) = icon_library(target_slug) else {
            tracing::warn!(
                library = target_slug,
                "unknown icon library; leaving icons unchanged"
            );
            return Ok(());
        };
        let source_library = source_library_for_style(context.config.style.as_deref());
        if source_library.slug == target.slug {
            return Ok(());
        }
        let mappings = context.icons.unwrap_or_else(|| default_mappings());

        let edits = with_program(document, |program, source| {
            let mut edits: Vec<Edit> = Vec::new();
            let mut renames: Vec<(String, String)> = Vec::new();

            for statement in program.body.iter() {
                let Statement::ImportDeclaration(declaration) = statement else {
                    continue;
                };
                if declaration.source.value.as_str() != source_library.module {
                    continue;
                }
                let Some(specifiers) = &declaration.specifiers else {
                    continue;
                };
                // Default and namespace imports cannot be mapped name-by-name.
                if !specifiers
                    .iter()
                    .all(|s| matches!(s, ImportDeclarationSpecifier::ImportSpecifier(_)))
                {
                    continue;
                }

                let mut mapped: Vec<String> = Vec::new();
                let mut kept: Vec<String> = Vec::new();
                for specifier in specifiers.iter() {
                    let ImportDeclarationSpecifier::ImportSpecifier(specifier) = specifier else {
                        continue;
                    };
                    let imported = import_name(&specifier.imported);
                    let local = specifier.local.name.as_str();
                    match target_name(mappings, source_library.slug, target.slug, imported) {
                        Some(target_name) => {
                            renames.push((local.to_string(), target_name.to_string()));
                            mapped.push(target_name.to_string());
                        }
                        None => {
                            tracing::warn!(
                                icon = imported,
                                library = target.slug,
                                "no icon mapping; identifier left unchanged"
                            );
                            kept.push(specifier.span.source_text(source).to_string());
                        }
                    }
                }
                if mapped.is_empty() {
                    continue;
                }

                let raw = declaration.span.source_text(source);
                let semicolon = if raw.ends_with(';') { ";" } else { "" };
                let mut text = format!(
                    "import {{ {} }} from \"{}\"{semicolon}",
                    mapped.join(", "),
                    target.module
                );
                if !kept.is_empty() {
                    text = format!(
                        "import {{ {} }} from \"{}\"{semicolon}\n{text}",
                        kept.join(", "),
                        source_library.module
                    );
                }
                edits.push(Edit {
                    span: declaration.span,
                    text,
                });
            }

            if !renames.is_empty() {
                for (span, name) in scan_program(program).jsx_tags {
                    if let Some((_, target_name)) =
                        renames.iter().find(|(local, _)| *local == name)
                    {
                        edits.push(Edit {
                            span,
                            text: target_name.clone(),
                        });
                    }
                }
            }
            edits
        })?;

        document.apply_edits(edits);
        Ok(())
    }
}

/// Resolve an imported identifier to its name in the target library.
///
/// Entries are keyed by canonical name; when the source library uses its own
/// naming, the entry is found through the source library's column instead.
fn target_name<'m>(
    mappings: &'m IconMappings,
    source_slug: &str,
    target_slug: &str,
    imported: &str,
) -> Option<&'m str> {
    mappings
        .values()
        .find(|by_library| by_library.get(source_slug).map(String::as_str) == Some(imported))
        .or_else(|| mappings.get(imported))
        .and_then(|by_library| by_library.get(target_slug))
        .map(String::as_str)
}

fn import_name<'a>(name: &'a ModuleExportName<'a>) -> &'a str {
    match name {
        ModuleExportName::IdentifierName(identifier) => identifier.name.as_str(),
        ModuleExportName::IdentifierReference(identifier) => identifier.name.as_str(),
        ModuleExportName::StringLiteral(literal) => literal.value.as_str(),
    }
}

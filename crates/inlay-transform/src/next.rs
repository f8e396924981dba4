//! Framework-version conditioned renames.
//!
//! Next.js 16 renamed the root `middleware` export to `proxy`. The codemod
//! applies only to the top-level middleware file and only when the detected
//! framework version parses to a high enough major; channel tags like
//! `canary` or `latest` are treated as unknown and leave the source alone.

use oxc_ast::ast::{
    BindingPatternKind, Declaration, ModuleExportName, Statement, VariableDeclaration,
};
use oxc_span::{GetSpan, Span};

use crate::error::TransformError;
use crate::pipeline::{with_program, Edit, SourceDocument, Transform, TransformContext};

const MIDDLEWARE_FILENAMES: &[&str] = &["middleware.ts", "middleware.js"];
const RENAME_FROM: &str = "middleware";
const RENAME_TO: &str = "proxy";
const MIN_MAJOR: u32 = 16;

/// Leading major version of a semver-ish string; `None` for channel tags.
fn parse_major(version: &str) -> Option<u32> {
    version
        .trim()
        .trim_start_matches(['^', '~', '>', '=', 'v', ' '])
        .split('.')
        .next()?
        .parse()
        .ok()
}

/// Renames the `middleware` export to `proxy` on new enough frameworks.
///
/// Covers function declarations, const arrow functions, and re-export
/// aliases; identically named declarations in any other file are untouched
/// because the filename must match exactly, with no leading path.
pub struct TransformNext;

impl Transform for TransformNext {
    fn name(&self) -> &'static str {
        "next"
    }

    fn apply(
        &self,
        document: &mut SourceDocument,
        context: &TransformContext<'_>,
    ) -> Result<(), TransformError> {
        if !MIDDLEWARE_FILENAMES.contains(&document.filename()) {
            return Ok(());
        }
        let Some(version) = context.config.framework_version.as_deref() else {
            return Ok(());
        };
        match parse_major(version) {
            Some(major) if major >= MIN_MAJOR => {}
            _ => return Ok(()),
        }

        let edits = with_program(document, |program, _| {
            let mut edits: Vec<Edit> = Vec::new();
            for statement in program.body.iter() {
                match statement {
                    Statement::ExportNamedDeclaration(export) => {
                        if let Some(declaration) = &export.declaration {
                            collect_declaration_renames(declaration, &mut edits);
                        }
                        for specifier in export.specifiers.iter() {
                            collect_export_name_rename(&specifier.local, &mut edits);
                            collect_export_name_rename(&specifier.exported, &mut edits);
                        }
                    }
                    Statement::FunctionDeclaration(function) => {
                        if let Some(id) = &function.id {
                            if id.name.as_str() == RENAME_FROM {
                                push_rename(id.span, &mut edits);
                            }
                        }
                    }
                    Statement::VariableDeclaration(declaration) => {
                        collect_variable_renames(declaration, &mut edits);
                    }
                    _ => {}
                }
            }
            edits
        })?;

        document.apply_edits(edits);
        Ok(())
    }
}

fn collect_declaration_renames(declaration: &Declaration<'_>, edits: &mut Vec<Edit>) {
    match declaration {
        Declaration::FunctionDeclaration(function) => {
            if let Some(id) = &function.id {
                if id.name.as_str() == RENAME_FROM {
                    push_rename(id.span, edits);
                }
            }
        }
        Declaration::VariableDeclaration(declaration) => {
            collect_variable_renames(declaration, edits);
        }
        _ => {}
    }
}

fn collect_variable_renames(declaration: &VariableDeclaration<'_>, edits: &mut Vec<Edit>) {
    for declarator in declaration.declarations.iter() {
        if let BindingPatternKind::BindingIdentifier(id) = &declarator.id.kind {
            if id.name.as_str() == RENAME_FROM {
                push_rename(id.span, edits);
            }
        }
    }
}

fn collect_export_name_rename(name: &ModuleExportName<'_>, edits: &mut Vec<Edit>) {
    let value = match name {
        ModuleExportName::IdentifierName(identifier) => identifier.name.as_str(),
        ModuleExportName::IdentifierReference(identifier) => identifier.name.as_str(),
        ModuleExportName::StringLiteral(literal) => literal.value.as_str(),
    };
    if value == RENAME_FROM {
        push_rename(name.span(), edits);
    }
}

fn push_rename(span: Span, edits: &mut Vec<Edit>) {
    edits.push(Edit {
        span,
        text: RENAME_TO.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use inlay_registry::config::Config;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pipeline::{transform_with, TransformInput};

    fn config(version: &str) -> Config {
        Config {
            framework_version: Some(version.to_string()),
            ..Config::default()
        }
    }

    fn run(filename: &str, raw: &str, version: &str) -> String {
        transform_with(
            TransformInput::new(filename, raw, &config(version)),
            &[&TransformNext],
        )
        .unwrap()
    }

    #[test]
    fn parses_major_versions() {
        assert_eq!(parse_major("16.0.0"), Some(16));
        assert_eq!(parse_major("^16.1.0"), Some(16));
        assert_eq!(parse_major("15.4.2"), Some(15));
        assert_eq!(parse_major("canary"), None);
        assert_eq!(parse_major("latest"), None);
    }

    #[test]
    fn renames_function_declaration_export() {
        let raw = concat!(
            "import { NextResponse } from \"next/server\"\n",
            "\n",
            "export function middleware(request: Request) {\n",
            "  return NextResponse.next()\n",
            "}\n",
        );
        let output = run("middleware.ts", raw, "16.0.0");

        assert!(output.contains("export function proxy(request: Request)"));
        assert!(!output.contains("function middleware"));
    }

    #[test]
    fn renames_async_function_declaration() {
        let raw = "export async function middleware(request: Request) {\n  return null\n}\n";
        let output = run("middleware.ts", raw, "16.1.0");

        assert!(output.contains("export async function proxy(request: Request)"));
    }

    #[test]
    fn renames_const_arrow_export() {
        let raw = "export const middleware = (request: Request) => {\n  return null\n}\n";
        let output = run("middleware.ts", raw, "16.0.0");

        assert!(output.contains("export const proxy = (request: Request) =>"));
    }

    #[test]
    fn renames_reexport_alias() {
        let raw = concat!(
            "function handler(request: Request) {\n",
            "  return null\n",
            "}\n",
            "\n",
            "export { handler as middleware }\n",
        );
        let output = run("middleware.ts", raw, "16.0.0");

        assert!(output.contains("export { handler as proxy }"));
        assert!(output.contains("function handler"));
    }

    #[test]
    fn renames_declaration_and_shorthand_export_together() {
        let raw = "function middleware() {\n  return null\n}\n\nexport { middleware }\n";
        let output = run("middleware.ts", raw, "16.0.0");

        assert!(output.contains("function proxy()"));
        assert!(output.contains("export { proxy }"));
    }

    #[test]
    fn skips_older_versions_and_channel_tags() {
        let raw = "export function middleware() {\n  return null\n}\n";

        assert_eq!(run("middleware.ts", raw, "15.0.0"), raw);
        assert_eq!(run("middleware.ts", raw, "canary"), raw);
        assert_eq!(run("middleware.ts", raw, "latest"), raw);
    }

    #[test]
    fn skips_when_version_is_unknown() {
        let raw = "export function middleware() {\n  return null\n}\n";
        let output = transform_with(
            TransformInput::new("middleware.ts", raw, &Config::default()),
            &[&TransformNext],
        )
        .unwrap();

        assert_eq!(output, raw);
    }

    #[test]
    fn skips_other_files_and_nested_paths() {
        let raw = "export function middleware() {\n  return null\n}\n";

        assert_eq!(run("utils.ts", raw, "16.0.0"), raw);
        assert_eq!(run("lib/middleware.ts", raw, "16.0.0"), raw);
        assert_eq!(run("lib/supabase/middleware.ts", raw, "16.0.0"), raw);
    }
}

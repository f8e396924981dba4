//! Transform pipeline orchestration.
//!
//! A [`SourceDocument`] owns one file's current text. Every pass parses that
//! text into a fresh arena-backed tree, collects span edits, and applies them
//! atomically, so each transformer sees exactly the previous transformer's
//! output and a failed pass can never leave half-rewritten text behind.
//! Nothing is cached across invocations; concurrent files are fully isolated.

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::{SourceType, Span};

use inlay_registry::colors::BaseColor;
use inlay_registry::config::Config;
use inlay_registry::icons::IconMappings;

use crate::color::TransformCssVars;
use crate::error::TransformError;
use crate::icons::TransformIcons;
use crate::import::TransformImports;
use crate::next::TransformNext;
use crate::prefix::TransformPrefixes;
use crate::rtl::TransformRtl;

/// One source file moving through the pipeline.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    filename: String,
    text: String,
    source_type: SourceType,
}

/// A single atomic text replacement, addressed by source span.
#[derive(Debug, Clone)]
pub(crate) struct Edit {
    pub span: Span,
    pub text: String,
}

impl SourceDocument {
    /// Parse-check raw source and wrap it for transformation.
    ///
    /// Surfacing syntax errors here means a malformed file fails before any
    /// pass runs, and every pass can assume re-parsing succeeds.
    pub fn new(filename: &str, raw: &str) -> Result<Self, TransformError> {
        let document = Self {
            filename: filename.to_string(),
            text: raw.to_string(),
            source_type: source_type_for(filename),
        };
        with_program(&document, |_, _| ())?;
        Ok(document)
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub(crate) fn source_type(&self) -> SourceType {
        self.source_type
    }

    /// Apply a batch of span edits against the current text.
    ///
    /// Edits are applied back-to-front after sorting; duplicates collapse and
    /// an edit overlapping an earlier one is dropped rather than corrupting
    /// the text around it.
    pub(crate) fn apply_edits(&mut self, mut edits: Vec<Edit>) {
        if edits.is_empty() {
            return;
        }
        edits.sort_by_key(|edit| (edit.span.start, edit.span.end));
        edits.dedup_by(|a, b| a.span == b.span);

        let mut output = String::with_capacity(self.text.len());
        let mut cursor = 0usize;
        for edit in &edits {
            let start = edit.span.start as usize;
            let end = edit.span.end as usize;
            if start < cursor || end > self.text.len() {
                tracing::debug!(
                    file = %self.filename,
                    start,
                    end,
                    "skipping overlapping edit"
                );
                continue;
            }
            output.push_str(&self.text[cursor..start]);
            output.push_str(&edit.text);
            cursor = end;
        }
        output.push_str(&self.text[cursor..]);
        self.text = output;
    }
}

/// Parse the document's current text and hand the tree to `f`.
///
/// The arena lives only for this call; no tree or allocator survives it.
pub(crate) fn with_program<T>(
    document: &SourceDocument,
    f: impl FnOnce(&Program<'_>, &str) -> T,
) -> Result<T, TransformError> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, document.text(), document.source_type()).parse();
    if parsed.panicked || !parsed.errors.is_empty() {
        let message = parsed
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(TransformError::Parse {
            filename: document.filename().to_string(),
            message: if message.is_empty() {
                "parser gave up on the input".to_string()
            } else {
                message
            },
        });
    }
    Ok(f(&parsed.program, document.text()))
}

/// Rewrite one quoted string literal, producing an edit when it changed.
pub(crate) fn string_edit(
    source: &str,
    span: Span,
    rewrite: impl FnOnce(&str) -> String,
) -> Option<Edit> {
    let raw = span.source_text(source);
    if raw.len() < 2 {
        return None;
    }
    let value = &raw[1..raw.len() - 1];
    let rewritten = rewrite(value);
    (rewritten != value).then(|| Edit {
        span,
        text: format!("\"{rewritten}\""),
    })
}

fn source_type_for(filename: &str) -> SourceType {
    if filename.ends_with(".tsx") {
        SourceType::tsx()
    } else if filename.ends_with(".ts") {
        SourceType::ts()
    } else if filename.ends_with(".jsx") {
        SourceType::jsx()
    } else if filename.ends_with(".js") || filename.ends_with(".mjs") {
        SourceType::mjs()
    } else {
        // Registry sources default to tsx, the superset we ship.
        SourceType::tsx()
    }
}

/// Read-only state shared by every pass over one document.
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'a> {
    /// Consumer project configuration
    pub config: &'a Config,

    /// Inline color tables for the target palette, when colors are inlined
    pub base_color: Option<&'a BaseColor>,

    /// Icon identifier lookup table; the bundled table applies when absent
    pub icons: Option<&'a IconMappings>,

    /// Whether the source came from a third-party registry
    pub is_remote: bool,
}

/// A single rewrite pass over a document.
///
/// Passes run in a caller-chosen order and may not assume they run first or
/// last; anything a pass needs must come from the document text or the
/// context.
pub trait Transform {
    /// Pass identifier for logs.
    fn name(&self) -> &'static str;

    /// Rewrite the document in place.
    fn apply(
        &self,
        document: &mut SourceDocument,
        context: &TransformContext<'_>,
    ) -> Result<(), TransformError>;
}

/// The default pass order: alias resolution, version codemod, color mapping,
/// prefix injection, direction mapping, icon mapping.
pub const DEFAULT_TRANSFORMS: &[&dyn Transform] = &[
    &TransformImports,
    &TransformNext,
    &TransformCssVars,
    &TransformPrefixes,
    &TransformRtl,
    &TransformIcons,
];

/// Everything needed to transform one file.
pub struct TransformInput<'a> {
    pub filename: &'a str,
    pub raw: &'a str,
    pub config: &'a Config,
    pub base_color: Option<&'a BaseColor>,
    pub icons: Option<&'a IconMappings>,
    pub is_remote: bool,

    /// External formatter applied to the serialized output, when requested
    pub formatter: Option<&'a dyn Fn(&str) -> String>,
}

impl<'a> TransformInput<'a> {
    pub fn new(filename: &'a str, raw: &'a str, config: &'a Config) -> Self {
        Self {
            filename,
            raw,
            config,
            base_color: None,
            icons: None,
            is_remote: false,
            formatter: None,
        }
    }
}

/// Run the default pipeline over one file.
pub fn transform(input: TransformInput<'_>) -> Result<String, TransformError> {
    transform_with(input, DEFAULT_TRANSFORMS)
}

/// Run a caller-chosen ordered subset of passes over one file.
pub fn transform_with(
    input: TransformInput<'_>,
    transforms: &[&dyn Transform],
) -> Result<String, TransformError> {
    let context = TransformContext {
        config: input.config,
        base_color: input.base_color,
        icons: input.icons,
        is_remote: input.is_remote,
    };

    let mut document = SourceDocument::new(input.filename, input.raw)?;
    for pass in transforms {
        tracing::debug!(pass = pass.name(), file = input.filename, "applying pass");
        pass.apply(&mut document, &context)?;
    }

    let text = document.into_text();
    Ok(match input.formatter {
        Some(formatter) => formatter(&text),
        None => text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn errors_on_invalid_source() {
        let result = SourceDocument::new("broken.tsx", "export function {{{");

        match result {
            Err(TransformError::Parse { filename, .. }) => assert_eq!(filename, "broken.tsx"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn applies_edits_back_to_front() {
        let mut document = SourceDocument::new("a.ts", "const a = 1; const b = 2;").unwrap();
        document.apply_edits(vec![
            Edit {
                span: Span::new(6, 7),
                text: "x".to_string(),
            },
            Edit {
                span: Span::new(19, 20),
                text: "y".to_string(),
            },
        ]);

        assert_eq!(document.text(), "const x = 1; const y = 2;");
    }

    #[test]
    fn drops_overlapping_edits() {
        let mut document = SourceDocument::new("a.ts", "const abc = 1;").unwrap();
        document.apply_edits(vec![
            Edit {
                span: Span::new(6, 9),
                text: "xyz".to_string(),
            },
            Edit {
                span: Span::new(7, 8),
                text: "!".to_string(),
            },
        ]);

        assert_eq!(document.text(), "const xyz = 1;");
    }

    #[test]
    fn no_passes_is_identity() {
        let config = Config::default();
        let raw = "export function Foo() {\n  return <div className=\"ml-2\" />\n}\n";
        let output =
            transform_with(TransformInput::new("foo.tsx", raw, &config), &[]).unwrap();

        assert_eq!(output, raw);
    }

    #[test]
    fn default_pipeline_is_noop_for_default_config() {
        let config = Config::default();
        let raw = "import { cn } from \"@/lib/utils\"\n\nexport function Foo() {\n  return <div className={cn(\"ml-2\")} />\n}\n";
        let output = transform(TransformInput::new("foo.tsx", raw, &config)).unwrap();

        assert_eq!(output, raw);
    }

    #[test]
    fn formatter_runs_last() {
        let config = Config::default();
        let formatter = |text: &str| format!("{text}\n// formatted");
        let mut input = TransformInput::new("foo.ts", "const a = 1;", &config);
        input.formatter = Some(&formatter);

        let output = transform(input).unwrap();
        assert!(output.ends_with("// formatted"));
    }
}

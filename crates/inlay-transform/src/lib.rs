//! Source rewrite pipeline for retargeting registry components.
//!
//! Takes one component source file plus a consumer project's configuration
//! and produces an equivalent source re-targeted at that project: rewritten
//! import aliases, inlined color tokens, mirrored (right-to-left) layout
//! classes, prefixed utility classes, swapped icon identifiers, and
//! version-conditioned API renames.

pub mod class_name;
pub mod color;
mod error;
pub mod icons;
pub mod import;
pub mod next;
pub mod pipeline;
pub mod prefix;
pub mod rtl;
mod walk;

pub use class_name::{join_class_name, split_class_name, SplitClassName};
pub use color::{apply_color_mapping, TransformCssVars};
pub use error::TransformError;
pub use icons::TransformIcons;
pub use import::{update_import_alias, TransformImports};
pub use next::TransformNext;
pub use pipeline::{
    transform, transform_with, SourceDocument, Transform, TransformContext, TransformInput,
    DEFAULT_TRANSFORMS,
};
pub use prefix::{apply_prefix, apply_prefixes_css, TransformPrefixes};
pub use rtl::{apply_rtl_mapping, TransformRtl};

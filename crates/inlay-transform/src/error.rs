//! Pipeline error types.

/// Errors that can abort a single file's transform.
///
/// Token- and node-level conditions (unmatched brackets, unknown buckets,
/// unknown icons, unparseable versions) all degrade gracefully and never
/// surface here; only a failure to parse the raw source is fatal, and only
/// for that file.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("failed to parse {filename}: {message}")]
    Parse { filename: String, message: String },
}

//! Error types with rich diagnostics using miette
//!
//! Geometric ambiguity never surfaces here: the inference passes degrade to
//! conservative layouts instead. Only malformed snapshots, missing node
//! identity and unparseable colors are reported.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// Snapshot Errors
// ============================================================================

/// Errors that occur while reading a scene snapshot
#[derive(Error, Diagnostic, Debug)]
pub enum SnapshotError {
    #[error("malformed snapshot: {message}")]
    #[diagnostic(code(altflow::snapshot::json))]
    Json {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },
}

impl SnapshotError {
    /// Wrap a serde_json error, pointing at the line/column it reports.
    pub fn from_json(name: &str, source: &str, err: &serde_json::Error) -> Self {
        let offset = offset_of(source, err.line(), err.column());
        SnapshotError::Json {
            message: err.to_string(),
            src: NamedSource::new(name, source.to_string()),
            span: (offset, 0).into(),
        }
    }
}

/// Byte offset of a 1-based line and column, clamped to the source length.
fn offset_of(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}

// ============================================================================
// Inference Errors
// ============================================================================

/// Contract violations inside the inference passes
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum InferError {
    #[error("{pass} pass reached a node without an id: {name:?}")]
    #[diagnostic(
        code(altflow::infer::missing_id),
        help("every node handed to containment or flow inference needs a stable identifier")
    )]
    MissingId { pass: &'static str, name: String },
}

// ============================================================================
// Color Errors
// ============================================================================

/// Errors from the color matcher
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("cannot parse color: {input:?}")]
    #[diagnostic(
        code(altflow::color::invalid),
        help("use a hex string (#rgb, #rrggbb), a CSS color name or rgb components")
    )]
    Invalid { input: String },

    #[error("palette is empty")]
    #[diagnostic(code(altflow::color::empty_palette))]
    EmptyPalette,
}

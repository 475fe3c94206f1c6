//! Error adapter for converting OrganogramaError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Malformed input is
//! rendered with a snippet of the JSON document pointing at the failing
//! position.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use organograma::OrganogramaError;

/// Adapter for a JSON input error with its source text.
pub struct InputAdapter<'a> {
    /// The wrapped parser error
    err: &'a serde_json::Error,
    /// Source text for displaying snippets
    src: &'a str,
}

impl<'a> InputAdapter<'a> {
    /// Create a new input adapter.
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Byte offset of the parser's reported line and column, if it has one.
    fn offset(&self) -> Option<usize> {
        let (line, column) = (self.err.line(), self.err.column());
        if line == 0 {
            return None;
        }

        let line_start: usize = self
            .src
            .split_inclusive('\n')
            .take(line - 1)
            .map(str::len)
            .sum();
        Some((line_start + column.saturating_sub(1)).min(self.src.len()))
    }
}

impl fmt::Debug for InputAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for InputAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid input: {}", self.err)
    }
}

impl std::error::Error for InputAdapter<'_> {}

impl MietteDiagnostic for InputAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("organograma::input"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "expected {\"codi_emp\": <id>, \"nome_emp\": <name>, \"socios\": [...]}",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let offset = self.offset()?;
        let span = SourceSpan::new(offset.into(), 0);
        let label = match self.err.classify() {
            serde_json::error::Category::Syntax => "syntax error here",
            serde_json::error::Category::Data => "unexpected value here",
            serde_json::error::Category::Eof => "input ends here",
            serde_json::error::Category::Io => return None,
        };
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some(label.to_string()),
            span,
        ))))
    }
}

/// Adapter for non-input [`OrganogramaError`] variants.
///
/// This adapter handles errors that don't have rich diagnostic information,
/// such as I/O errors, configuration errors and export errors.
pub struct ErrorAdapter<'a>(pub &'a OrganogramaError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            OrganogramaError::Io(_) => "organograma::io",
            OrganogramaError::Input { .. } => "organograma::input",
            OrganogramaError::NodeId(_) => "organograma::node_id",
            OrganogramaError::Config(_) => "organograma::config",
            OrganogramaError::Export(_) => "organograma::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// Malformed input with source location information.
    Input(InputAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Input(i) => fmt::Display::fmt(i, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Input(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Input(i) => i.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Input(i) => i.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Input(i) => i.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Input(i) => i.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert an [`OrganogramaError`] into a list of reportable errors.
pub fn to_reportables(err: &OrganogramaError) -> Vec<Reportable<'_>> {
    match err {
        OrganogramaError::Input { err, src } => vec![Reportable::Input(InputAdapter::new(err, src))],
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

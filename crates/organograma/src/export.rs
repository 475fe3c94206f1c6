//! Export of laid-out organograms.
//!
//! This module provides the [`Exporter`] trait, the final stage of the
//! pipeline. Exporters read the chart's positioned graph and derive edge
//! styles from its current selection at export time.
//!
//! # Pipeline Position
//!
//! ```text
//! CompanyPartnerGraph
//!     ↓ structure
//! OrgGraph
//!     ↓ layout
//! PositionedGraph (+ Selection)
//!     ↓ export (this module)
//! SVG / JSON document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - a standalone SVG drawing
//! - [`json`] - positions and styles for an external renderer

pub mod json;
pub mod svg;

use std::fmt;

use crate::chart::OrgChart;

/// Abstraction for chart export backends.
pub trait Exporter {
    /// Renders `chart` to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the chart cannot be converted to the target format.
    fn export(&self, chart: &OrgChart) -> Result<String, Error>;
}

/// Errors that can occur during chart export.
///
/// Converted into [`OrganogramaError::Export`](crate::OrganogramaError::Export)
/// at the crate boundary.
#[derive(Debug)]
pub enum Error {
    /// A rendering failure described by `message`.
    Render(String),
    /// The JSON document could not be serialized.
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

//! Visual definitions shared by the styling and export stages.

mod stroke;

pub use stroke::{StrokeDefinition, StrokeStyle};

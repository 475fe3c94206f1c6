//! CLI logic for the organogram tool.
//!
//! Reads a company/partner JSON document, lays it out, optionally selects a
//! node and writes the chart as SVG or JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Format};

use std::{fs, str::FromStr};

use log::{info, warn};

use organograma::{ChartBuilder, OrganogramaError, identifier::NodeId};

/// Run the organogram CLI application
///
/// # Errors
///
/// Returns `OrganogramaError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input
/// - An unparsable `--select` node id
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), OrganogramaError> {
    let output_path = args.output_path();
    info!(
        input_path = args.input,
        output_path = output_path,
        format:? = args.format;
        "Processing organogram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = ChartBuilder::try_new(app_config)?;
    let data = builder.parse(&source)?;
    let mut chart = builder.chart(&data);

    if let Some(select) = &args.select {
        let id = NodeId::from_str(select)?;
        if !chart.graph().contains_node(id) {
            warn!(node_id = id.to_string(); "Selected node is not part of the chart");
        }
        chart.click(id);
    }

    let output = match args.format {
        Format::Svg => builder.render_svg(&chart)?,
        Format::Json => builder.render_json(&chart)?,
    };

    fs::write(&output_path, output)?;

    info!(output_file = output_path; "Organogram exported successfully");

    Ok(())
}

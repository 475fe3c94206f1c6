//! Organograma - company/partner organizational charts.
//!
//! Turns a company, its partners and the other companies each partner holds
//! into a directed graph, lays it out top-down with the root company on top,
//! and derives selection-dependent edge highlighting.

pub mod chart;
pub mod config;
pub mod export;
pub mod highlight;
pub mod layout;
pub mod structure;

mod error;

pub use organograma_core::{color, draw, geometry, identifier, semantic};

pub use error::OrganogramaError;

use log::{debug, info, trace};

use chart::OrgChart;
use config::AppConfig;
use export::{Exporter, json::JsonExporter, svg::SvgBuilder};
use layout::Engine;
use semantic::CompanyPartnerGraph;

/// Builder for parsing, laying out and rendering organograms.
///
/// # Examples
///
/// ```rust
/// use organograma::{ChartBuilder, config::AppConfig, identifier::NodeId};
///
/// let input = r#"{"codi_emp": 5, "socios": [{"id": 10, "nome": "Alice", "empresas": []}]}"#;
///
/// let builder = ChartBuilder::new(AppConfig::default());
/// let data = builder.parse(input).expect("Failed to parse");
///
/// let mut chart = builder.chart(&data);
/// chart.click(NodeId::partner(10));
///
/// let svg = builder.render_svg(&chart).expect("Failed to render");
/// assert!(svg.contains("Alice"));
/// ```
#[derive(Debug, Default)]
pub struct ChartBuilder {
    config: AppConfig,
}

impl ChartBuilder {
    /// Create a new chart builder with the given configuration.
    ///
    /// The configuration is used as is; see [`ChartBuilder::try_new`] for a
    /// validating constructor.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Create a new chart builder after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`OrganogramaError::Config`] naming the first invalid setting.
    pub fn try_new(config: AppConfig) -> Result<Self, OrganogramaError> {
        config.validate().map_err(OrganogramaError::Config)?;
        Ok(Self::new(config))
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse JSON input into the company/partner model.
    ///
    /// # Errors
    ///
    /// Returns [`OrganogramaError::Input`] if `source` is not a valid
    /// company/partner document.
    pub fn parse(&self, source: &str) -> Result<CompanyPartnerGraph, OrganogramaError> {
        info!("Parsing chart input");

        let data: CompanyPartnerGraph = serde_json::from_str(source)
            .map_err(|err| OrganogramaError::new_input_error(err, source))?;

        debug!(
            company_id = data.company_id(),
            partners = data.partners().len();
            "Input parsed successfully"
        );
        trace!(data:?; "Parsed input");

        Ok(data)
    }

    /// Build the graph and compute its layout.
    ///
    /// The returned chart starts with no selection.
    pub fn chart(&self, data: &CompanyPartnerGraph) -> OrgChart {
        let engine = Engine::from(self.config.layout());
        OrgChart::new(engine, self.config.selection().on_change(), data)
    }

    /// Render a chart to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`OrganogramaError::Config`] for unparsable configured colors
    /// and [`OrganogramaError::Export`] for rendering failures.
    pub fn render_svg(&self, chart: &OrgChart) -> Result<String, OrganogramaError> {
        let style = self.config.style();

        let exporter = SvgBuilder::new()
            .with_palette(style.edge_palette().map_err(OrganogramaError::Config)?)
            .with_fills(
                style.company_fill().map_err(OrganogramaError::Config)?,
                style.partner_fill().map_err(OrganogramaError::Config)?,
            )
            .with_background(style.background_color().map_err(OrganogramaError::Config)?)
            .build()?;

        let svg = exporter.export(chart)?;
        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Render a chart to a JSON document of positions and edge styles.
    ///
    /// # Errors
    ///
    /// Returns [`OrganogramaError::Config`] for unparsable edge colors and
    /// [`OrganogramaError::Export`] if serialization fails.
    pub fn render_json(&self, chart: &OrgChart) -> Result<String, OrganogramaError> {
        let palette = self
            .config
            .style()
            .edge_palette()
            .map_err(OrganogramaError::Config)?;

        let json = JsonExporter::new(palette).export(chart)?;
        info!("JSON rendered successfully");
        Ok(json)
    }
}

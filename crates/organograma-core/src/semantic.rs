//! Input model for organizational charts.
//!
//! A [`CompanyPartnerGraph`] describes one focal company, its partners and the
//! other companies each partner holds a stake in. It is produced by the data
//! fetching layer and deserialized from the backend's JSON shape, so field
//! names follow that wire format (`codi_emp`, `socios`, ...).
//!
//! ```
//! use organograma_core::semantic::CompanyPartnerGraph;
//!
//! let json = r#"{
//!     "codi_emp": 5,
//!     "socios": [
//!         { "id": 10, "nome": "Alice", "empresas": [{ "codi_emp": 7, "nome_emp": "Beta Corp" }] }
//!     ]
//! }"#;
//!
//! let graph: CompanyPartnerGraph = serde_json::from_str(json).unwrap();
//! assert_eq!(graph.company_id(), 5);
//! assert_eq!(graph.partners()[0].linked_companies()[0].name(), "Beta Corp");
//! ```

use serde::Deserialize;

/// The focal company together with its partners.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompanyPartnerGraph {
    #[serde(rename = "codi_emp")]
    company_id: u64,

    #[serde(rename = "nome_emp", default)]
    company_name: Option<String>,

    #[serde(rename = "socios", default)]
    partners: Vec<Partner>,
}

impl CompanyPartnerGraph {
    /// Creates a graph for the focal company `company_id` with no partners.
    pub fn new(company_id: u64) -> Self {
        Self {
            company_id,
            company_name: None,
            partners: Vec::new(),
        }
    }

    /// Sets the focal company's display name.
    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = Some(name.into());
        self
    }

    /// Appends a partner.
    pub fn with_partner(mut self, partner: Partner) -> Self {
        self.partners.push(partner);
        self
    }

    /// Returns the numeric id of the focal company.
    pub fn company_id(&self) -> u64 {
        self.company_id
    }

    /// Returns the focal company's display name, if the backend supplied one.
    pub fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    /// Returns the partners of the focal company.
    pub fn partners(&self) -> &[Partner] {
        &self.partners
    }
}

/// A partner (sócio) of the focal company.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Partner {
    id: u64,

    #[serde(rename = "nome", default)]
    name: String,

    #[serde(rename = "empresas", default)]
    linked_companies: Vec<LinkedCompany>,
}

impl Partner {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            linked_companies: Vec::new(),
        }
    }

    /// Appends a company this partner also holds a stake in.
    pub fn with_linked_company(mut self, company: LinkedCompany) -> Self {
        self.linked_companies.push(company);
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the other companies this partner is linked to.
    pub fn linked_companies(&self) -> &[LinkedCompany] {
        &self.linked_companies
    }
}

/// A company a partner is linked to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkedCompany {
    #[serde(rename = "codi_emp")]
    id: u64,

    #[serde(rename = "nome_emp", default)]
    name: String,
}

impl LinkedCompany {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

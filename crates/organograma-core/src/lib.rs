//! Organograma Core Types and Definitions
//!
//! This crate provides the foundational types shared by the organograma
//! pipeline. It includes:
//!
//! - **Identifiers**: Typed node identifiers with an explicit kind ([`identifier::NodeId`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Stroke definitions used by edge styling ([`draw`] module)
//! - **Semantic**: The company/partner input model ([`semantic`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod semantic;

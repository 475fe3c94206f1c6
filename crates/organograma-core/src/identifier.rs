//! Typed node identifiers.
//!
//! Every node in an organogram is either a company or a partner. The
//! [`NodeId`] type carries that kind explicitly next to the numeric key that
//! came from the backend, so dispatch never has to inspect string prefixes.
//! The textual form (`empresa-<key>` / `socio-<key>`) is kept for display,
//! export and command-line selection.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};
use thiserror::Error;

const COMPANY_PREFIX: &str = "empresa-";
const PARTNER_PREFIX: &str = "socio-";

/// The two kinds of nodes an organogram contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A company (empresa), either the focal company or a linked one.
    Company,
    /// A partner (sócio) holding a stake in one or more companies.
    Partner,
}

impl NodeKind {
    /// Returns the textual id prefix used for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Company => COMPANY_PREFIX,
            Self::Partner => PARTNER_PREFIX,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Company => write!(f, "company"),
            Self::Partner => write!(f, "partner"),
        }
    }
}

/// Identifier of a node in an organogram.
///
/// Two ids are equal when both the kind and the key match, so a company and a
/// partner sharing the same numeric key are distinct nodes.
///
/// # Examples
///
/// ```
/// use organograma_core::identifier::{NodeId, NodeKind};
///
/// let root = NodeId::company(5);
/// assert_eq!(root.kind(), NodeKind::Company);
/// assert_eq!(root.to_string(), "empresa-5");
///
/// let partner: NodeId = "socio-10".parse().unwrap();
/// assert_eq!(partner, NodeId::partner(10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    kind: NodeKind,
    key: u64,
}

impl NodeId {
    /// Creates an id of the given kind.
    pub fn new(kind: NodeKind, key: u64) -> Self {
        Self { kind, key }
    }

    /// Creates a company id (`empresa-<key>`).
    pub fn company(key: u64) -> Self {
        Self::new(NodeKind::Company, key)
    }

    /// Creates a partner id (`socio-<key>`).
    pub fn partner(key: u64) -> Self {
        Self::new(NodeKind::Partner, key)
    }

    /// Returns the kind of node this id refers to.
    pub fn kind(self) -> NodeKind {
        self.kind
    }

    /// Returns the numeric key assigned by the backend.
    pub fn key(self) -> u64 {
        self.key
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.key)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Error returned when text is not a valid node id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid node id `{input}`: expected `empresa-<number>` or `socio-<number>`")]
pub struct ParseNodeIdError {
    input: String,
}

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseNodeIdError {
            input: s.to_string(),
        };

        let (kind, key) = if let Some(key) = s.strip_prefix(COMPANY_PREFIX) {
            (NodeKind::Company, key)
        } else if let Some(key) = s.strip_prefix(PARTNER_PREFIX) {
            (NodeKind::Partner, key)
        } else {
            return Err(err());
        };

        key.parse::<u64>()
            .map(|key| Self::new(kind, key))
            .map_err(|_| err())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_display_uses_kind_prefix() {
        assert_eq!(NodeId::company(7).to_string(), "empresa-7");
        assert_eq!(NodeId::partner(10).to_string(), "socio-10");
    }

    #[test]
    fn test_same_key_different_kind_is_distinct() {
        assert_ne!(NodeId::company(1), NodeId::partner(1));
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!("empresa-5".parse::<NodeId>(), Ok(NodeId::company(5)));
        assert_eq!("socio-0".parse::<NodeId>(), Ok(NodeId::partner(0)));
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "empresa-", "socio-x", "cliente-3", "empresa--1", "5"] {
            let err = input.parse::<NodeId>().unwrap_err();
            assert!(err.to_string().contains(input));
        }
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&NodeId::partner(42)).unwrap();
        assert_eq!(json, "\"socio-42\"");
    }

    proptest! {
        #[test]
        fn prop_display_parses_back(key in any::<u64>(), is_company in any::<bool>()) {
            let kind = if is_company { NodeKind::Company } else { NodeKind::Partner };
            let id = NodeId::new(kind, key);
            prop_assert_eq!(id.to_string().parse::<NodeId>(), Ok(id));
        }
    }
}

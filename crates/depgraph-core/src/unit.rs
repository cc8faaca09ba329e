//! Build-unit descriptors and their declared references.
//!
//! A build unit is one buildable project: a name, the absolute path of its
//! unit file, an optional package id under which it is published, and the
//! set of references it declares. These values are produced by the manifest
//! parser ([`crate::manifest`]) and consumed by the graph builder — the
//! engine makes no assumption about where they came from beyond this shape.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One declared dependency of a build unit.
///
/// The set of reference kinds is closed: a serialized reference with an
/// unrecognized `kind` tag fails at deserialization rather than being
/// coerced into one of these variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Reference {
    /// A published package, addressed by package name.
    Package {
        name: String,
        #[serde(default)]
        version: String,
    },
    /// A sibling build unit, addressed by the absolute path of its unit file.
    Project { path: String },
    /// A raw library with no further resolvable identity.
    Library { name: String },
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Package { name, version } if version.is_empty() => {
                write!(f, "package {name}")
            }
            Self::Package { name, version } => write!(f, "package {name} {version}"),
            Self::Project { path } => write!(f, "project {path}"),
            Self::Library { name } => write!(f, "library {name}"),
        }
    }
}

/// Everything known about one locally described build unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitInfo {
    /// Human-readable unit name (not an identity key).
    pub name: String,

    /// Absolute path of the unit file. One of the two identity keys.
    pub path: String,

    /// Package id the unit publishes as, or empty if it is not published.
    /// The other identity key.
    #[serde(default)]
    pub package_id: String,

    /// The unit's declared references, deduplicated.
    #[serde(default)]
    pub references: BTreeSet<Reference>,
}

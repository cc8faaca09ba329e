//! Graph nodes and the multi-keyed project identity rules.
//!
//! # Identity
//!
//! A node stands for one logical build unit and carries up to two identity
//! keys: the package id it publishes as and the path of its unit file.
//! Either key may be absent (empty string). A package reference knows only
//! the package id; a project or library reference knows only a path; a
//! locally parsed unit knows its path and possibly its package id.
//!
//! Two nodes denote the same project when they share a comparable key:
//!
//! 1. all four fields empty on both sides — the degenerate unknown node,
//!    equal to any other fully empty node;
//! 2. both package ids empty — compare paths;
//! 3. both paths empty — compare package ids;
//! 4. otherwise — equal package ids or equal paths.
//!
//! A package-id-only node and a path-only node share no comparable key and
//! are never the same project: absence of a shared key is not proof of
//! identity.
//!
//! Node equality (`Eq`/`Hash`) is plain field equality. The looser
//! [`Node::is_same_project`] relation is what the registry merges on.

#![allow(clippy::must_use_candidate)]

use std::fmt;

use crate::unit::{Reference, UnitInfo};

/// One logical build unit in the dependency graph, addressable by package
/// id and/or unit file path. Either field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node {
    /// Package id key, or empty if unknown.
    pub package_id: String,
    /// Unit file path key, or empty if unknown.
    pub path: String,
}

impl Node {
    /// Build a node from explicit key values.
    pub fn new(package_id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            path: path.into(),
        }
    }

    /// The node describing a locally parsed unit: its path plus whatever
    /// package id the unit declares.
    pub fn from_unit(unit: &UnitInfo) -> Self {
        Self::new(unit.package_id.clone(), unit.path.clone())
    }

    /// The node a reference denotes. Package references carry only the
    /// package id key; project and library references carry only a path key.
    pub fn from_reference(reference: &Reference) -> Self {
        match reference {
            Reference::Package { name, .. } => Self::new(name.clone(), ""),
            Reference::Project { path } => Self::new("", path.clone()),
            Reference::Library { name } => Self::new("", name.clone()),
        }
    }

    /// Returns `true` if both identity keys are empty.
    pub fn is_empty(&self) -> bool {
        self.package_id.is_empty() && self.path.is_empty()
    }

    /// Returns `true` if both identity keys are populated — the unit is
    /// simultaneously locally buildable and addressable by package.
    pub fn has_both_keys(&self) -> bool {
        !self.package_id.is_empty() && !self.path.is_empty()
    }

    /// Whether `self` and `other` denote the same logical project.
    ///
    /// Symmetric, reflexive, but deliberately not transitive: a double-keyed
    /// node can bridge a package-id-only node and a path-only node that are
    /// not the same project on their own. The registry resolves exactly that
    /// situation by coalescing.
    pub fn is_same_project(&self, other: &Self) -> bool {
        if self.is_empty() && other.is_empty() {
            return true;
        }
        if self.package_id.is_empty() && other.package_id.is_empty() {
            return self.path == other.path;
        }
        if self.path.is_empty() && other.path.is_empty() {
            return self.package_id == other.package_id;
        }
        // At least one side of each key pair is non-empty here, so an
        // equal-and-empty pair cannot slip through.
        self.package_id == other.package_id || self.path == other.path
    }

    /// Merge identity evidence from `other` into a new node.
    ///
    /// Keeps every non-empty field of `self` and fills empty fields from
    /// `other`. Never overwrites a populated key. Callers are expected to
    /// check [`Node::is_same_project`] first.
    #[must_use]
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            package_id: if self.package_id.is_empty() {
                other.package_id.clone()
            } else {
                self.package_id.clone()
            },
            path: if self.path.is_empty() {
                other.path.clone()
            } else {
                self.path.clone()
            },
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package_id.is_empty() {
            write!(f, "{}", self.path)
        } else if self.path.is_empty() {
            write!(f, "{}", self.package_id)
        } else {
            write!(f, "{}, {}", self.package_id, self.path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(package_id: &str, path: &str) -> Node {
        Node::new(package_id, path)
    }

    #[test]
    fn empty_nodes_are_the_same_project() {
        assert!(node("", "").is_same_project(&node("", "")));
    }

    #[test]
    fn empty_node_does_not_match_keyed_nodes() {
        assert!(!node("", "").is_same_project(&node("Pkg.A", "")));
        assert!(!node("", "").is_same_project(&node("", "/a.unit")));
        assert!(!node("", "").is_same_project(&node("Pkg.A", "/a.unit")));
    }

    #[test]
    fn path_only_nodes_compare_by_path() {
        assert!(node("", "/a.unit").is_same_project(&node("", "/a.unit")));
        assert!(!node("", "/a.unit").is_same_project(&node("", "/b.unit")));
    }

    #[test]
    fn package_only_nodes_compare_by_package_id() {
        assert!(node("Pkg.A", "").is_same_project(&node("Pkg.A", "")));
        assert!(!node("Pkg.A", "").is_same_project(&node("Pkg.B", "")));
    }

    #[test]
    fn either_shared_key_matches_double_keyed_nodes() {
        let full = node("Pkg.A", "/a.unit");
        assert!(full.is_same_project(&node("Pkg.A", "/elsewhere.unit")));
        assert!(full.is_same_project(&node("Pkg.Other", "/a.unit")));
        assert!(full.is_same_project(&node("Pkg.A", "")));
        assert!(full.is_same_project(&node("", "/a.unit")));
        assert!(!full.is_same_project(&node("Pkg.B", "/b.unit")));
    }

    #[test]
    fn disjoint_single_keys_are_not_the_same_project() {
        // No shared key to compare: never declared equal by convention.
        assert!(!node("Pkg.A", "").is_same_project(&node("", "/a.unit")));
    }

    #[test]
    fn identity_is_symmetric() {
        let cases = [
            (node("", ""), node("", "")),
            (node("Pkg.A", ""), node("Pkg.A", "/a.unit")),
            (node("", "/a.unit"), node("Pkg.A", "/a.unit")),
            (node("Pkg.A", ""), node("", "/a.unit")),
            (node("Pkg.A", "/a.unit"), node("Pkg.B", "/b.unit")),
        ];
        for (a, b) in &cases {
            assert_eq!(a.is_same_project(b), b.is_same_project(a), "{a} vs {b}");
        }
    }

    #[test]
    fn combine_fills_only_empty_fields() {
        let merged = node("Pkg.A", "").combine(&node("", "/a.unit"));
        assert_eq!(merged, node("Pkg.A", "/a.unit"));

        let merged = node("", "/a.unit").combine(&node("Pkg.A", "/other.unit"));
        assert_eq!(merged, node("Pkg.A", "/a.unit"));
    }

    #[test]
    fn combine_never_erases_a_populated_key() {
        let full = node("Pkg.A", "/a.unit");
        assert_eq!(full.combine(&node("", "")), full);
        assert_eq!(full.combine(&node("Pkg.B", "/b.unit")), full);
    }

    #[test]
    fn reference_nodes_carry_one_key() {
        let package = Reference::Package {
            name: "Pkg.A".into(),
            version: "1.0".into(),
        };
        assert_eq!(Node::from_reference(&package), node("Pkg.A", ""));

        let project = Reference::Project {
            path: "/a.unit".into(),
        };
        assert_eq!(Node::from_reference(&project), node("", "/a.unit"));

        let library = Reference::Library {
            name: "zlib".into(),
        };
        assert_eq!(Node::from_reference(&library), node("", "zlib"));
    }

    #[test]
    fn display_prefers_both_keys() {
        assert_eq!(node("", "/a.unit").to_string(), "/a.unit");
        assert_eq!(node("Pkg.A", "").to_string(), "Pkg.A");
        assert_eq!(node("Pkg.A", "/a.unit").to_string(), "Pkg.A, /a.unit");
    }
}

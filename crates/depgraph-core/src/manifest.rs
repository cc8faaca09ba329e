//! Unit manifest parsing.
//!
//! A build unit is described by a `*.unit` file containing a TOML manifest:
//!
//! ```toml
//! name = "core"
//! package-id = "Acme.Core"
//!
//! [[reference]]
//! kind = "package"
//! name = "Serde.Json"
//! version = "1.0"
//!
//! [[reference]]
//! kind = "project"
//! path = "../util/util.unit"
//!
//! [[reference]]
//! kind = "library"
//! name = "zlib"
//! ```
//!
//! `name` is mandatory; `package-id` and `reference` default to empty. A
//! reference with an unrecognized `kind` fails the whole parse — malformed
//! descriptors are rejected at construction, never coerced.
//!
//! Relative `project` paths are resolved lexically against the manifest's
//! directory, so every [`Reference::Project`] the parser emits carries an
//! absolute path. Parsing is pure and needs no process-wide setup.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;
use crate::unit::{Reference, UnitInfo};

/// File extension of unit manifests.
pub const UNIT_EXTENSION: &str = "unit";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    name: String,
    #[serde(default, rename = "package-id")]
    package_id: String,
    #[serde(default, rename = "reference")]
    references: Vec<RawReference>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum RawReference {
    Package {
        name: String,
        #[serde(default)]
        version: String,
    },
    Project {
        path: String,
    },
    Library {
        name: String,
    },
}

/// Read and parse one unit file.
///
/// `path` may be relative; it is resolved to a normalized absolute path
/// first, and that absolute path becomes the unit's identity key.
pub fn load_unit(path: &Path) -> Result<UnitInfo, Error> {
    let absolute = absolutize(path)?;
    let text = fs::read_to_string(&absolute).map_err(|source| Error::ReadUnit {
        path: absolute.clone(),
        source,
    })?;
    parse_unit(&text, &absolute)
}

/// Parse manifest text for the unit at `unit_path` (expected absolute).
pub fn parse_unit(text: &str, unit_path: &Path) -> Result<UnitInfo, Error> {
    let raw: RawManifest = toml::from_str(text).map_err(|source| Error::ParseUnit {
        path: unit_path.to_path_buf(),
        source,
    })?;

    let dir = unit_path.parent().unwrap_or_else(|| Path::new(""));
    let references = raw
        .references
        .into_iter()
        .map(|reference| resolve_reference(reference, dir))
        .collect();

    Ok(UnitInfo {
        name: raw.name,
        path: unit_path.display().to_string(),
        package_id: raw.package_id,
        references,
    })
}

fn resolve_reference(raw: RawReference, dir: &Path) -> Reference {
    match raw {
        RawReference::Package { name, version } => Reference::Package { name, version },
        RawReference::Project { path } => Reference::Project {
            path: resolve_project_path(dir, &path),
        },
        RawReference::Library { name } => Reference::Library { name },
    }
}

/// Resolve a declared project path against the referencing manifest's
/// directory, lexically collapsing `.` and `..`.
fn resolve_project_path(dir: &Path, declared: &str) -> String {
    let declared = Path::new(declared);
    let joined = if declared.is_absolute() {
        declared.to_path_buf()
    } else {
        dir.join(declared)
    };
    lexical_normalize(&joined).display().to_string()
}

fn absolutize(path: &Path) -> Result<PathBuf, Error> {
    let absolute = std::path::absolute(path).map_err(|source| Error::Absolutize {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(lexical_normalize(&absolute))
}

/// Collapse `.` and `..` components without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}

//! Framework version detection from the project manifest.

use semver::Version;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Package whose version identifies the framework.
const CORE_PACKAGE: &str = "@angular/core";

/// The subset of `package.json` the detection needs.
#[derive(Debug, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    dependencies: HashMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: HashMap<String, String>,
}

/// Detects the Angular version of the project at `project_dir`.
///
/// Reads `package.json` and looks up `@angular/core` in `dependencies`,
/// then `devDependencies`. Every failure mode (missing manifest, invalid
/// JSON, package absent, unparsable version) degrades to `None`: an
/// unknown version is never fatal, it only disables version gating.
pub fn detect(project_dir: &Path) -> Option<Version> {
    let manifest_path = project_dir.join("package.json");

    let content = match std::fs::read_to_string(&manifest_path) {
        Ok(content) => content,
        Err(err) => {
            debug!("No readable manifest at {}: {err}", manifest_path.display());
            return None;
        }
    };

    let manifest: PackageManifest = match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(err) => {
            warn!("Failed to parse {}: {err}", manifest_path.display());
            return None;
        }
    };

    let raw = manifest
        .dependencies
        .get(CORE_PACKAGE)
        .or_else(|| manifest.dev_dependencies.get(CORE_PACKAGE))?;

    match Version::parse(strip_range_sigils(raw)) {
        Ok(version) => {
            info!("Angular version identified: {version}");
            Some(version)
        }
        Err(err) => {
            warn!("Could not parse {CORE_PACKAGE} version {raw:?}: {err}");
            None
        }
    }
}

/// Strips range sigils so a manifest entry like `"^17.0.1"` parses as a
/// concrete version.
fn strip_range_sigils(raw: &str) -> &str {
    raw.trim().trim_start_matches(['^', '~', '=', '>', 'v', ' '])
}

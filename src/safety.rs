//! Guards against overwriting the wrong file.
//!
//! Output tables are truncated on write, so a mistyped argument could
//! destroy the annotation file. Each output must be named for what it holds
//! and must not collide with the input or with the other output.

use anyhow::{bail, Result};
use std::path::{Component, Path, PathBuf};

/// Validates that an output path is safe to overwrite.
///
/// Checks:
/// - Output filename must contain the required pattern (e.g., "nodes", "edges")
/// - Output cannot be the same as any of the protected paths
pub fn validate_output_path(output: &Path, required_pattern: &str, protected: &[&Path]) -> Result<()> {
    let output_name = output.file_name().and_then(|n| n.to_str()).unwrap_or("");

    if !output_name.contains(required_pattern) {
        bail!(
            "Safety check failed: output file '{}' must contain '{}' in the name",
            output.display(),
            required_pattern
        );
    }

    for path in protected {
        if same_file(output, path) {
            bail!(
                "Safety check failed: output '{}' cannot be the same as '{}'",
                output.display(),
                path.display()
            );
        }
    }

    Ok(())
}

/// Validate both graph outputs against the input and each other.
pub fn validate_graph_outputs(input: &Path, nodes: &Path, edges: &Path) -> Result<()> {
    validate_output_path(nodes, "nodes", &[input, edges])?;
    validate_output_path(edges, "edges", &[input, nodes])?;
    Ok(())
}

/// Literal match, or both resolve to the same location on disk.
fn same_file(a: &Path, b: &Path) -> bool {
    a == b || comparable_path(a) == comparable_path(b)
}

/// Absolute form of `path` even when the file does not exist yet: the parent
/// directory is resolved and the file name re-attached.
fn comparable_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.components().filter(|c| *c != Component::CurDir).collect(),
    }
}

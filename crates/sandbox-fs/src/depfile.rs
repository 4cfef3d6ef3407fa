//! Makefile-style depfile output for incremental build tracking

use std::path::Path;

use crate::io::{self, WriteOptions};
use crate::Result;

/// Render a depfile line declaring `inputs` as dependencies of `output`.
///
/// Spaces inside paths are backslash-escaped so make/ninja keep each path as
/// a single token.
pub fn render(output: &Path, inputs: &[&Path]) -> String {
    let deps = inputs
        .iter()
        .map(|p| escape(p))
        .collect::<Vec<_>>()
        .join(" ");
    format!("{}: {}\n", escape(output), deps)
}

/// Write a depfile for `output` at `depfile_path`.
pub fn write(depfile_path: &Path, output: &Path, inputs: &[&Path]) -> Result<()> {
    let content = render(output, inputs);
    io::write_text(depfile_path, &content, &WriteOptions::default())
}

fn escape(path: &Path) -> String {
    path.to_string_lossy().replace(' ', "\\ ")
}

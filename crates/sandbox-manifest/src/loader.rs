//! Fragment loading: read, substitute placeholders, parse

use std::path::Path;

use sandbox_fs::io;

use crate::model::SandboxConfig;
use crate::pattern::{self, Pattern};
use crate::{Error, Result};

/// Load one fragment from `path`, applying `patterns` to its raw text first.
pub fn load_document(path: &Path, patterns: &[Pattern]) -> Result<SandboxConfig> {
    tracing::debug!(path = %path.display(), patterns = patterns.len(), "loading sandbox fragment");
    let text = io::read_text(path)?;
    let text = pattern::substitute(&text, patterns);
    parse_document(path, &text)
}

/// Parse already-substituted fragment text. `path` is used for error reports.
pub fn parse_document(path: &Path, text: &str) -> Result<SandboxConfig> {
    serde_json::from_str(text).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load every fragment in application order.
///
/// All files are parsed before anything is merged, so a bad fragment aborts
/// the run before any output exists. Fragments that set no section are
/// dropped.
pub fn load_all<P: AsRef<Path>>(paths: &[P], patterns: &[Pattern]) -> Result<Vec<SandboxConfig>> {
    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let document = load_document(path, patterns)?;
        if document.is_empty() {
            tracing::debug!(path = %path.display(), "skipping empty sandbox fragment");
            continue;
        }
        documents.push(document);
    }
    Ok(documents)
}

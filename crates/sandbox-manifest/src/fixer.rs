//! End-to-end fix: load fragments, merge, write the manifest and depfile

use std::path::{Path, PathBuf};

use sandbox_fs::{WriteOptions, depfile, io};

use crate::builder::ManifestBuilder;
use crate::loader;
use crate::model::SandboxConfig;
use crate::pattern::Pattern;
use crate::{Error, Result};

/// Inputs of one fixer run.
#[derive(Debug, Clone, Default)]
pub struct FixOptions {
    /// Destination of the merged manifest.
    pub output: PathBuf,
    /// Primary fragment, applied first.
    pub source_file: PathBuf,
    /// Substitutions applied to the raw text of every fragment.
    pub patterns: Vec<Pattern>,
    /// Further fragments, applied after `source_file` in order.
    pub extra_sandbox_cfgs: Vec<PathBuf>,
    /// Where to write a depfile naming `source_file` as a dependency.
    pub depfile: Option<PathBuf>,
}

impl FixOptions {
    pub fn new(source_file: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source_file: source_file.into(),
            output: output.into(),
            ..Self::default()
        }
    }

    /// Every fragment path in application order.
    pub fn fragment_paths(&self) -> Vec<&Path> {
        std::iter::once(self.source_file.as_path())
            .chain(self.extra_sandbox_cfgs.iter().map(PathBuf::as_path))
            .collect()
    }
}

/// Render a manifest as 2-space indented JSON, non-ASCII left unescaped.
pub fn to_manifest_string(manifest: &SandboxConfig) -> Result<String> {
    serde_json::to_string_pretty(manifest).map_err(|e| Error::Serialize {
        message: e.to_string(),
    })
}

/// Run the fixer and return the manifest that was written.
///
/// Nothing is written unless every fragment loads and parses.
pub fn fix_sandbox_config(options: &FixOptions) -> Result<SandboxConfig> {
    let fragments = loader::load_all(&options.fragment_paths(), &options.patterns)?;

    let mut builder = ManifestBuilder::new();
    builder.apply_all(&fragments);
    let manifest = builder.build();

    let content = to_manifest_string(&manifest)?;
    io::write_text(&options.output, &content, &WriteOptions::default())?;
    tracing::info!(
        output = %options.output.display(),
        fragments = fragments.len(),
        "wrote sandbox manifest"
    );

    if let Some(depfile_path) = &options.depfile {
        depfile::write(depfile_path, &options.output, &[options.source_file.as_path()])?;
        tracing::debug!(depfile = %depfile_path.display(), "wrote depfile");
    }

    Ok(manifest)
}

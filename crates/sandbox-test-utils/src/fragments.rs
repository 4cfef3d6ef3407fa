//! Temporary fragment directories.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

/// A temp directory holding sandbox config fragments and the fixer output.
///
/// Removed on drop.
pub struct FragmentDir {
    dir: TempDir,
}

impl FragmentDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `name` inside the directory, without creating it.
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `value` as pretty JSON to `name` and return its path.
    pub fn write_json(&self, name: &str, value: &Value) -> PathBuf {
        let text = serde_json::to_string_pretty(value).expect("failed to serialize fragment");
        self.write_raw(name, &text)
    }

    /// Write `text` verbatim to `name`. Used for placeholders and broken JSON.
    pub fn write_raw(&self, name: &str, text: &str) -> PathBuf {
        let path = self.join(name);
        fs::write(&path, text).expect("failed to write fragment");
        path
    }

    /// Read `name` back and parse it as JSON.
    pub fn read_json(&self, name: &str) -> Value {
        let text = fs::read_to_string(self.join(name)).expect("failed to read output");
        serde_json::from_str(&text).expect("output is not valid JSON")
    }
}

impl Default for FragmentDir {
    fn default() -> Self {
        Self::new()
    }
}

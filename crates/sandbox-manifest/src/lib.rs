//! Sandbox manifest model and fragment merge engine
//!
//! Builds an app sandbox manifest from a built-in template plus an ordered
//! list of JSON override fragments. Rule lists are merged by identity key
//! rather than replaced, so later fragments can extend or amend earlier ones.

pub mod builder;
pub mod error;
pub mod field;
pub mod fixer;
pub mod loader;
pub mod merge;
pub mod model;
pub mod order;
pub mod pattern;
pub mod template;

pub use builder::{ManifestBuilder, merge_fragments};
pub use error::{Error, Result};
pub use field::Field;
pub use fixer::{FixOptions, fix_sandbox_config, to_manifest_string};
pub use loader::{load_all, load_document};
pub use merge::EntryKey;
pub use model::{CommonSection, Entry, FlagsPoint, SandboxConfig, Scope, ScopeMap, ScopeSlot};
pub use order::KeyOrder;
pub use pattern::Pattern;
pub use template::{DEFAULT_SANDBOX_ROOT, DEFAULT_TOP_SANDBOX_SWITCH};

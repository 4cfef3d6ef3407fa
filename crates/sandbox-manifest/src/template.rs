//! Built-in default manifest
//!
//! Every merge starts from a fresh copy of this template, so the emitted
//! manifest always carries all three sections and both app scopes.

use serde_json::Value;

use crate::field::Field;
use crate::model::{CommonSection, SandboxConfig, Scope, ScopeMap};
use crate::order::KeyOrder;

/// Sandbox root used by both app scopes until a fragment overrides it.
pub const DEFAULT_SANDBOX_ROOT: &str = "/mnt/sandbox/<currentUserId>/<PackageName>";

/// Initial value of `top-sandbox-switch`.
pub const DEFAULT_TOP_SANDBOX_SWITCH: &str = "ON";

impl SandboxConfig {
    /// Build the default template.
    pub fn default_template() -> Self {
        let app_base = Scope {
            sandbox_ns_flags: Field::Present(Vec::new()),
            mount_paths: Field::Present(Vec::new()),
            symbol_links: Field::Present(Vec::new()),
            flags_point: Field::Present(Vec::new()),
            ..Scope::rooted(DEFAULT_SANDBOX_ROOT)
        };
        let app_resources = Scope {
            mount_paths: Field::Present(Vec::new()),
            flags_point: Field::Present(Vec::new()),
            symbol_links: Field::Present(Vec::new()),
            key_order: KeyOrder::from(["sandbox-root", "mount-paths", "flags-point", "symbol-links"]),
            ..Scope::rooted(DEFAULT_SANDBOX_ROOT)
        };

        Self {
            common: Field::Present(vec![CommonSection {
                top_sandbox_switch: Field::Present(Value::from(DEFAULT_TOP_SANDBOX_SWITCH)),
                app_base: Field::Present(vec![app_base]),
                app_resources: Field::Present(vec![app_resources]),
                ..CommonSection::default()
            }]),
            individual: Field::Present(vec![ScopeMap::new()]),
            permission: Field::Present(vec![ScopeMap::new()]),
        }
    }
}

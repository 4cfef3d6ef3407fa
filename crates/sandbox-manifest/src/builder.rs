//! Top-level assembly: fold fragments over the default template

use crate::merge::{self, is_truthy};
use crate::model::{CommonSection, SandboxConfig};

/// Accumulates fragments into a manifest, starting from the default template.
///
/// # Example
///
/// ```
/// use sandbox_manifest::{ManifestBuilder, SandboxConfig};
///
/// let fragment: SandboxConfig = serde_json::from_str(
///     r#"{"common": [{"top-sandbox-switch": "OFF"}]}"#,
/// ).unwrap();
///
/// let mut builder = ManifestBuilder::new();
/// builder.apply(&fragment);
/// let manifest = builder.build();
///
/// let common = manifest.common().unwrap();
/// assert_eq!(common.top_sandbox_switch.get().unwrap(), "OFF");
/// ```
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    result: SandboxConfig,
}

impl Default for ManifestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self::with_base(SandboxConfig::default_template())
    }

    /// Start from `base` instead of the default template.
    pub fn with_base(base: SandboxConfig) -> Self {
        Self { result: base }
    }

    /// Fold one fragment into the manifest.
    pub fn apply(&mut self, fragment: &SandboxConfig) -> &mut Self {
        if let Some(common) = fragment.common() {
            tracing::debug!("merging common section");
            merge_common(self.result.common_mut(), common);
        }

        if let Some(individual) = fragment.individual() {
            tracing::debug!(scopes = individual.len(), "merging individual section");
            merge::merge_scope_map(self.result.individual_mut(), individual);
        }

        if let Some(permission) = fragment.permission() {
            tracing::debug!(scopes = permission.len(), "merging permission section");
            merge::merge_scope_map(self.result.permission_mut(), permission);
        }

        self
    }

    /// Fold every fragment in order.
    pub fn apply_all<'a>(&mut self, fragments: impl IntoIterator<Item = &'a SandboxConfig>) -> &mut Self {
        for fragment in fragments {
            self.apply(fragment);
        }
        self
    }

    pub fn build(self) -> SandboxConfig {
        self.result
    }
}

fn merge_common(existing: &mut CommonSection, incoming: &CommonSection) {
    if let Some(switch) = incoming.top_sandbox_switch.get().filter(|v| is_truthy(v)) {
        existing.top_sandbox_switch = switch.clone().into();
    }

    merge::merge_scope_list(&mut existing.app_base, &incoming.app_base);
    merge::merge_scope_list(&mut existing.app_resources, &incoming.app_resources);
}

/// Merge `fragments` over the default template.
pub fn merge_fragments(fragments: &[SandboxConfig]) -> SandboxConfig {
    let mut builder = ManifestBuilder::new();
    builder.apply_all(fragments);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fragment(value: serde_json::Value) -> SandboxConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_no_fragments_yields_template() {
        assert_eq!(merge_fragments(&[]), SandboxConfig::default_template());
    }

    #[test]
    fn test_empty_switch_does_not_overwrite() {
        let manifest = merge_fragments(&[fragment(json!({
            "common": [{"top-sandbox-switch": ""}]
        }))]);
        assert_eq!(
            manifest.common().unwrap().top_sandbox_switch.get(),
            Some(&json!("ON"))
        );
    }

    #[test]
    fn test_empty_sections_are_ignored() {
        let manifest = merge_fragments(&[fragment(json!({
            "common": [],
            "individual": [],
            "permission": null
        }))]);
        assert_eq!(manifest, SandboxConfig::default_template());
    }

    #[test]
    fn test_app_scopes_merged_independently() {
        let manifest = merge_fragments(&[fragment(json!({
            "common": [{
                "app-base": [{"mount-paths": [{"src-path": "/system/lib", "sandbox-path": "/lib"}]}],
                "app-resources": [{"sandbox-root": "/mnt/sandbox/<PackageName>"}]
            }]
        }))]);

        let value = serde_json::to_value(&manifest).unwrap();
        assert_eq!(
            value["common"][0]["app-base"][0]["mount-paths"],
            json!([{"src-path": "/system/lib", "sandbox-path": "/lib"}])
        );
        assert_eq!(
            value["common"][0]["app-base"][0]["sandbox-root"],
            json!("/mnt/sandbox/<currentUserId>/<PackageName>")
        );
        assert_eq!(
            value["common"][0]["app-resources"][0]["sandbox-root"],
            json!("/mnt/sandbox/<PackageName>")
        );
        assert_eq!(value["common"][0]["app-resources"][0]["mount-paths"], json!([]));
    }

    #[test]
    fn test_with_base() {
        let base = fragment(json!({"individual": [{"a": [{"sandbox-root": "/a"}]}]}));
        let mut builder = ManifestBuilder::with_base(base.clone());
        builder.apply(&fragment(json!({})));
        assert_eq!(builder.build(), base);
    }
}

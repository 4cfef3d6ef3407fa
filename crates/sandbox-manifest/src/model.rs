//! Sandbox manifest data model
//!
//! Mirrors the on-disk JSON shape of an app sandbox config. Known keys are
//! typed; anything else lands in a flattened `extra` map and is written back
//! unchanged.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::field::Field;
use crate::order::{KeyOrder, keep_key_order};

/// Per-package or per-permission scopes, in document order.
pub type ScopeMap = IndexMap<String, ScopeSlot>;

/// A whole sandbox config document: the default template, an override
/// fragment, or the merged manifest.
///
/// Each section is a list whose first element is the only one consulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SandboxConfig {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub common: Field<Vec<CommonSection>>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub individual: Field<Vec<ScopeMap>>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub permission: Field<Vec<ScopeMap>>,
}

impl SandboxConfig {
    /// True when the document sets none of the three sections.
    pub fn is_empty(&self) -> bool {
        self.common.is_absent() && self.individual.is_absent() && self.permission.is_absent()
    }

    /// First `common` element, if any.
    pub fn common(&self) -> Option<&CommonSection> {
        self.common.get().and_then(|list| list.first())
    }

    /// First `individual` mapping, if any.
    pub fn individual(&self) -> Option<&ScopeMap> {
        self.individual.get().and_then(|list| list.first())
    }

    /// First `permission` mapping, if any.
    pub fn permission(&self) -> Option<&ScopeMap> {
        self.permission.get().and_then(|list| list.first())
    }

    /// First `common` element, created empty when missing.
    pub fn common_mut(&mut self) -> &mut CommonSection {
        first_or_default(self.common.get_or_insert_default())
    }

    /// First `individual` mapping, created empty when missing.
    pub fn individual_mut(&mut self) -> &mut ScopeMap {
        first_or_default(self.individual.get_or_insert_default())
    }

    /// First `permission` mapping, created empty when missing.
    pub fn permission_mut(&mut self) -> &mut ScopeMap {
        first_or_default(self.permission.get_or_insert_default())
    }
}

pub(crate) fn first_or_default<T: Default>(list: &mut Vec<T>) -> &mut T {
    if list.is_empty() {
        list.push(T::default());
    }
    &mut list[0]
}

/// The `common[0]` object: the global switch plus the two app scopes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommonSection {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub top_sandbox_switch: Field<Value>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub app_base: Field<Vec<Scope>>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub app_resources: Field<Vec<Scope>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named grouping of sandbox rules sharing a root path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "kebab-case")]
pub struct Scope {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub sandbox_root: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub sandbox_switch: Field<Value>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub gids: Field<Value>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub sandbox_ns_flags: Field<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub mount_paths: Field<Vec<Entry>>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub symbol_links: Field<Vec<Entry>>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub flags_point: Field<Vec<FlagsPoint>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip)]
    pub key_order: KeyOrder,
}

impl Scope {
    /// An empty scope rooted at `sandbox_root`.
    pub fn rooted(sandbox_root: impl Into<String>) -> Self {
        Self {
            sandbox_root: Field::Present(sandbox_root.into()),
            ..Self::default()
        }
    }
}

/// An `individual`/`permission` value.
///
/// The usual form is a one-element list of scopes, but a bare scope object is
/// accepted too. Either way it is written back in the shape it was read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScopeSlot {
    Wrapped(Vec<Scope>),
    Bare(Scope),
}

impl ScopeSlot {
    pub fn first(&self) -> Option<&Scope> {
        match self {
            Self::Wrapped(scopes) => scopes.first(),
            Self::Bare(scope) => Some(scope),
        }
    }

    pub fn first_mut(&mut self) -> Option<&mut Scope> {
        match self {
            Self::Wrapped(scopes) => scopes.first_mut(),
            Self::Bare(scope) => Some(scope),
        }
    }
}

impl<'de> Deserialize<'de> for ScopeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            list @ Value::Array(_) => Vec::<Scope>::deserialize(list)
                .map(Self::Wrapped)
                .map_err(D::Error::custom),
            object @ Value::Object(_) => <Scope as Deserialize>::deserialize(object)
                .map(Self::Bare)
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "expected a scope object or a list of scopes, found {other}"
            ))),
        }
    }
}

impl From<Scope> for ScopeSlot {
    fn from(scope: Scope) -> Self {
        Self::Wrapped(vec![scope])
    }
}

/// One `mount-paths` or `symbol-links` rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "kebab-case")]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub src_path: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub target_name: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub link_name: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub sandbox_root: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub sandbox_path: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub sandbox_flags: Field<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub fs_type: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub check_action_status: Field<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip)]
    pub key_order: KeyOrder,
}

/// A `flags-point` item: mount rules that only apply under given spawn flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "kebab-case")]
pub struct FlagsPoint {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub flags: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub sandbox_root: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub mount_paths: Field<Vec<Entry>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip)]
    pub key_order: KeyOrder,
}

keep_key_order!(Scope, Entry, FlagsPoint);

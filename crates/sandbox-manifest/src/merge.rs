//! Identity-keyed merge of scopes and rule lists
//!
//! Lists are never replaced. An incoming entry updates the first existing
//! entry with the same identity key in place, or is appended when nothing
//! matches. Merging the same fragment twice is therefore a no-op the second
//! time.

use serde_json::Value;

use crate::field::Field;
use crate::model::{Entry, FlagsPoint, Scope, ScopeMap, ScopeSlot};

/// Field that decides whether two rule entries are the same rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKey {
    /// `mount-paths` rules
    SrcPath,
    /// `symbol-links` rules
    TargetName,
}

impl EntryKey {
    fn field<'a>(&self, entry: &'a Entry) -> &'a Field<String> {
        match self {
            Self::SrcPath => &entry.src_path,
            Self::TargetName => &entry.target_name,
        }
    }

    /// Absent and `null` compare equal.
    fn matches(&self, a: &Entry, b: &Entry) -> bool {
        self.field(a).get() == self.field(b).get()
    }
}

/// Append each value of `incoming` not already in `existing`.
pub fn union_values(existing: &mut Vec<Value>, incoming: &[Value]) {
    for value in incoming {
        if !existing.contains(value) {
            existing.push(value.clone());
        }
    }
}

fn union_field(existing: &mut Field<Vec<Value>>, incoming: &Field<Vec<Value>>) {
    if let Some(values) = incoming.get().filter(|v| !v.is_empty()) {
        union_values(existing.get_or_insert_default(), values);
    }
}

/// Copy the overwritable fields of `incoming` onto a matched `existing` entry.
pub fn merge_entry(existing: &mut Entry, incoming: &Entry) {
    existing.sandbox_root.overwrite_from(&incoming.sandbox_root);
    existing.sandbox_path.overwrite_from(&incoming.sandbox_path);
    existing
        .check_action_status
        .overwrite_from(&incoming.check_action_status);
    existing.fs_type.overwrite_from(&incoming.fs_type);
    existing.link_name.overwrite_from(&incoming.link_name);

    union_field(&mut existing.sandbox_flags, &incoming.sandbox_flags);
}

/// Merge `incoming` rules into `existing`, matching on every key in `keys`.
pub fn merge_entries(existing: &mut Vec<Entry>, incoming: &[Entry], keys: &[EntryKey]) {
    for entry in incoming {
        match existing
            .iter_mut()
            .find(|candidate| keys.iter().all(|key| key.matches(candidate, entry)))
        {
            Some(matched) => merge_entry(matched, entry),
            None => existing.push(entry.clone()),
        }
    }
}

fn merge_entry_field(existing: &mut Field<Vec<Entry>>, incoming: &Field<Vec<Entry>>, keys: &[EntryKey]) {
    if let Some(entries) = incoming.get().filter(|e| !e.is_empty()) {
        merge_entries(existing.get_or_insert_default(), entries, keys);
    }
}

/// Merge `flags-point` items, matching on `flags`.
///
/// A matched item takes the incoming `sandbox-root` and merges its own
/// `mount-paths` by `src-path`.
pub fn merge_flags_points(existing: &mut Vec<FlagsPoint>, incoming: &[FlagsPoint]) {
    for point in incoming {
        match existing
            .iter_mut()
            .find(|candidate| candidate.flags.get() == point.flags.get())
        {
            Some(matched) => {
                matched.sandbox_root.overwrite_from(&point.sandbox_root);
                merge_entry_field(&mut matched.mount_paths, &point.mount_paths, &[EntryKey::SrcPath]);
            }
            None => {
                let mut point = point.clone();
                collapse_entries(&mut point.mount_paths, EntryKey::SrcPath);
                existing.push(point);
            }
        }
    }
}

/// Fold repeated identity keys inside a list that is taken over as is.
fn collapse_entries(list: &mut Field<Vec<Entry>>, key: EntryKey) {
    if let Some(entries) = list.get_mut() {
        let mut collapsed = Vec::with_capacity(entries.len());
        merge_entries(&mut collapsed, entries, &[key]);
        *entries = collapsed;
    }
}

/// Copy of a scope taken over as is, with repeated identity keys in its
/// rule lists folded together. Keys and their order are otherwise kept.
fn collapsed_scope(scope: &Scope) -> Scope {
    let mut scope = scope.clone();
    collapse_entries(&mut scope.mount_paths, EntryKey::SrcPath);
    collapse_entries(&mut scope.symbol_links, EntryKey::TargetName);
    if let Some(points) = scope.flags_point.get_mut() {
        let mut collapsed = Vec::with_capacity(points.len());
        merge_flags_points(&mut collapsed, points);
        *points = collapsed;
    }
    scope
}

fn collapsed_slot(slot: &ScopeSlot) -> ScopeSlot {
    match slot {
        ScopeSlot::Wrapped(scopes) => ScopeSlot::Wrapped(scopes.iter().map(collapsed_scope).collect()),
        ScopeSlot::Bare(scope) => ScopeSlot::Bare(collapsed_scope(scope)),
    }
}

/// Merge one incoming scope into an existing scope in place.
pub fn merge_scope(existing: &mut Scope, incoming: &Scope) {
    existing.sandbox_root.overwrite_from(&incoming.sandbox_root);
    existing.sandbox_switch.overwrite_from(&incoming.sandbox_switch);
    existing.gids.overwrite_from(&incoming.gids);

    union_field(&mut existing.sandbox_ns_flags, &incoming.sandbox_ns_flags);

    if let Some(points) = incoming.flags_point.get().filter(|p| !p.is_empty()) {
        merge_flags_points(existing.flags_point.get_or_insert_default(), points);
    }

    merge_entry_field(&mut existing.mount_paths, &incoming.mount_paths, &[EntryKey::SrcPath]);
    merge_entry_field(&mut existing.symbol_links, &incoming.symbol_links, &[EntryKey::TargetName]);

    if !incoming.extra.is_empty() {
        let ignored: Vec<&str> = incoming.extra.keys().map(String::as_str).collect();
        tracing::debug!(?ignored, "scope fields not merged");
    }
}

/// Merge the first scope of `incoming` into the first scope of `existing`.
///
/// Used for the single-element `app-base`/`app-resources` lists. An empty
/// `existing` list takes the incoming scope as is.
pub fn merge_scope_list(existing: &mut Field<Vec<Scope>>, incoming: &Field<Vec<Scope>>) {
    let Some(scope) = incoming.get().and_then(|list| list.first()) else {
        return;
    };
    let list = existing.get_or_insert_default();
    match list.first_mut() {
        Some(target) => merge_scope(target, scope),
        None => list.push(collapsed_scope(scope)),
    }
}

/// Merge an `individual`/`permission` mapping.
///
/// New keys are inserted as written, apart from repeated identity keys in
/// their rule lists; existing keys are merged scope by scope.
pub fn merge_scope_map(existing: &mut ScopeMap, incoming: &ScopeMap) {
    for (name, slot) in incoming {
        let Some(current) = existing.get_mut(name) else {
            tracing::debug!(%name, "adding sandbox scope");
            existing.insert(name.clone(), collapsed_slot(slot));
            continue;
        };
        current.merge(slot);
    }
}

/// Truthiness of a JSON value: not null, false, zero or empty.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

impl ScopeSlot {
    /// Merge another slot into this one. An empty slot takes `incoming`
    /// verbatim.
    pub fn merge(&mut self, incoming: &ScopeSlot) {
        match (self.first_mut(), incoming.first()) {
            (Some(target), Some(scope)) => merge_scope(target, scope),
            (None, Some(_)) => *self = collapsed_slot(incoming),
            (_, None) => {}
        }
    }
}

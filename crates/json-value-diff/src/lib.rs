//! Structural diff of two [`Value`] trees.
//!
//! [`compute_diff`] assumes `b` was produced by editing `a` and returns a tree
//! holding the values of both, each node tagged with what happened to it.
//! Removed members and elements are kept in the result, tagged
//! [`DiffState::Deleted`]. Arrays are compared by position only.
//!
//! ```
//! use json_value::json_value;
//! use json_value_diff::{compute_diff, DiffState};
//!
//! let before = json_value!({"name": "a", "tags": ["x"], "old": 1});
//! let after = json_value!({"name": "b", "tags": ["x", "y"], "new": true});
//!
//! let diff = compute_diff(&before, &after)?;
//! assert_eq!(diff.state(), DiffState::Updated);
//! assert_eq!(diff.get("old").map(|n| n.state()), Some(DiffState::Deleted));
//! assert_eq!(diff.get("new").map(|n| n.state()), Some(DiffState::Added));
//!
//! let changes: Vec<String> = diff
//!     .changes()
//!     .iter()
//!     .map(|(path, state)| format!("{path} {state}"))
//!     .collect();
//! assert_eq!(changes, ["/name updated", "/new added", "/old deleted", "/tags/1 added"]);
//! # Ok::<(), json_value::Error>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;

use json_value::{Map, Result, Value};
use json_value_pointer::Pointer;

// ── Types ─────────────────────────────────────────────────────────────────

/// What happened to a node between the two inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiffState {
    #[default]
    None,
    Added,
    Deleted,
    Updated,
}

impl fmt::Display for DiffState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiffState::None => "none",
            DiffState::Added => "added",
            DiffState::Deleted => "deleted",
            DiffState::Updated => "updated",
        })
    }
}

#[derive(Debug, Clone)]
pub enum DiffKind {
    Scalar(Value),
    Array(Vec<DiffNode>),
    Object(BTreeMap<String, DiffNode>),
}

/// One node of a diff result.
#[derive(Debug, Clone)]
pub struct DiffNode {
    state: DiffState,
    kind: DiffKind,
}

impl DiffNode {
    /// A copy of `value` with every node tagged `state`. Fails with
    /// `KeyNotFound` if `value` holds a placeholder.
    pub fn tagged(value: &Value, state: DiffState) -> Result<DiffNode> {
        value.ensure_present()?;
        let kind = if value.is_array() {
            DiffKind::Array(
                value
                    .elements()?
                    .map(|item| DiffNode::tagged(item, state))
                    .collect::<Result<_>>()?,
            )
        } else if value.is_object() {
            DiffKind::Object(
                value
                    .entries()?
                    .map(|(key, member)| {
                        DiffNode::tagged(member, state).map(|node| (key.clone(), node))
                    })
                    .collect::<Result<_>>()?,
            )
        } else {
            DiffKind::Scalar(value.clone())
        };
        Ok(DiffNode { state, kind })
    }

    pub fn state(&self) -> DiffState {
        self.state
    }

    pub fn kind(&self) -> &DiffKind {
        &self.kind
    }

    pub fn is_unchanged(&self) -> bool {
        self.state == DiffState::None
    }

    /// Child node of an Object result.
    pub fn get(&self, key: &str) -> Option<&DiffNode> {
        match &self.kind {
            DiffKind::Object(members) => members.get(key),
            _ => None,
        }
    }

    /// Child node of an Array result.
    pub fn get_index(&self, index: usize) -> Option<&DiffNode> {
        match &self.kind {
            DiffKind::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// Direct children: elements in order, members in key order.
    pub fn children(&self) -> Box<dyn Iterator<Item = &DiffNode> + '_> {
        match &self.kind {
            DiffKind::Scalar(_) => Box::new(std::iter::empty()),
            DiffKind::Array(items) => Box::new(items.iter()),
            DiffKind::Object(members) => Box::new(members.values()),
        }
    }

    /// The tree without its states. Deleted nodes are included.
    pub fn to_value(&self) -> Value {
        match &self.kind {
            DiffKind::Scalar(value) => value.clone(),
            DiffKind::Array(items) => items.iter().map(DiffNode::to_value).collect(),
            DiffKind::Object(members) => Value::Object(
                members
                    .iter()
                    .map(|(key, member)| (key.clone(), member.to_value()))
                    .collect::<Map>(),
            ),
        }
    }

    /// Every changed leaf, and every added, deleted or replaced subtree
    /// (reported once, at its root), in document order.
    pub fn changes(&self) -> Vec<(Pointer, DiffState)> {
        let mut out = Vec::new();
        collect_changes(self, &Pointer::root(), &mut out);
        out
    }
}

/// Overwrites the state of `node` and all of its descendants.
pub fn deep_tag(node: &mut DiffNode, state: DiffState) {
    node.state = state;
    match &mut node.kind {
        DiffKind::Scalar(_) => {}
        DiffKind::Array(items) => items.iter_mut().for_each(|item| deep_tag(item, state)),
        DiffKind::Object(members) => members
            .values_mut()
            .for_each(|member| deep_tag(member, state)),
    }
}

// ── Core recursive differ ─────────────────────────────────────────────────

/// Diffs `b` against `a`.
///
/// - Different kinds: `b`, tagged `Updated` at the root only.
/// - Equal scalars: `a`, tagged `None`.
/// - Objects: common members are diffed, members only in `a` are kept and
///   deep-tagged `Deleted`, members only in `b` are deep-tagged `Added`.
/// - Arrays: elements are diffed pairwise up to the shorter length; the
///   rest is deep-tagged `Deleted` (from `a`) or `Added` (from `b`).
/// - Different scalars of one kind: `b`, tagged `Updated`.
///
/// A container is `Updated` as soon as one child is not `None`. An
/// undetermined value counts as an empty Object. A placeholder in either
/// input fails with `KeyNotFound`.
pub fn compute_diff(a: &Value, b: &Value) -> Result<DiffNode> {
    let (kind_a, kind_b) = (a.kind()?, b.kind()?);
    if kind_a != kind_b {
        tracing::trace!(from = %kind_a, to = %kind_b, "kind changed");
        let mut node = DiffNode::tagged(b, DiffState::None)?;
        node.state = DiffState::Updated;
        return Ok(node);
    }
    if a == b {
        return DiffNode::tagged(a, DiffState::None);
    }
    if a.is_array() {
        diff_arrays(a.as_array()?, b.as_array()?)
    } else if a.is_object() {
        diff_objects(a.as_object()?, b.as_object()?)
    } else {
        DiffNode::tagged(b, DiffState::Updated)
    }
}

fn container_state(changed: bool) -> DiffState {
    if changed {
        DiffState::Updated
    } else {
        DiffState::None
    }
}

fn diff_objects(a: &Map, b: &Map) -> Result<DiffNode> {
    let mut members = BTreeMap::new();
    let mut changed = false;

    for (key, old) in a {
        let node = match b.get(key) {
            Some(new) => compute_diff(old, new)?,
            None => DiffNode::tagged(old, DiffState::Deleted)?,
        };
        changed |= !node.is_unchanged();
        members.insert(key.clone(), node);
    }
    for (key, new) in b {
        if !a.contains_key(key) {
            members.insert(key.clone(), DiffNode::tagged(new, DiffState::Added)?);
            changed = true;
        }
    }

    Ok(DiffNode {
        state: container_state(changed),
        kind: DiffKind::Object(members),
    })
}

fn diff_arrays(a: &[Value], b: &[Value]) -> Result<DiffNode> {
    let common = a.len().min(b.len());
    let mut items = Vec::with_capacity(a.len().max(b.len()));
    let mut changed = a.len() != b.len();

    for (old, new) in a.iter().zip(b) {
        let node = compute_diff(old, new)?;
        changed |= !node.is_unchanged();
        items.push(node);
    }
    for old in &a[common..] {
        items.push(DiffNode::tagged(old, DiffState::Deleted)?);
    }
    for new in &b[common..] {
        items.push(DiffNode::tagged(new, DiffState::Added)?);
    }

    Ok(DiffNode {
        state: container_state(changed),
        kind: DiffKind::Array(items),
    })
}

fn collect_changes(node: &DiffNode, path: &Pointer, out: &mut Vec<(Pointer, DiffState)>) {
    match node.state {
        DiffState::None => return,
        DiffState::Added | DiffState::Deleted => {
            out.push((path.clone(), node.state));
            return;
        }
        DiffState::Updated => {}
    }

    if node.children().all(DiffNode::is_unchanged) {
        out.push((path.clone(), node.state));
        return;
    }
    match &node.kind {
        DiffKind::Scalar(_) => {}
        DiffKind::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_changes(item, &path.join(index.to_string()), out);
            }
        }
        DiffKind::Object(members) => {
            for (key, member) in members {
                collect_changes(member, &path.join(key.as_str()), out);
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use json_value::json_value;

    fn states(node: &DiffNode) -> Vec<DiffState> {
        node.children().map(DiffNode::state).collect()
    }

    #[test]
    fn test_equal_scalars() {
        let diff = compute_diff(&Value::from(1), &Value::from(1)).unwrap();
        assert!(diff.is_unchanged());
        assert_eq!(diff.to_value(), 1i64);
    }

    #[test]
    fn test_changed_scalar_takes_new_value() {
        let diff = compute_diff(&Value::from("a"), &Value::from("b")).unwrap();
        assert_eq!(diff.state(), DiffState::Updated);
        assert_eq!(diff.to_value(), "b");
    }

    #[test]
    fn test_kind_change_tags_root_only() {
        let diff = compute_diff(&Value::from(1), &json_value!([1, 2])).unwrap();
        assert_eq!(diff.state(), DiffState::Updated);
        assert_eq!(states(&diff), [DiffState::None, DiffState::None]);

        let diff = compute_diff(&Value::from(1), &Value::from(1.0)).unwrap();
        assert_eq!(diff.state(), DiffState::Updated);
        assert!(diff.to_value().is_double());
    }

    #[test]
    fn test_identical_containers_are_unchanged() {
        let doc = json_value!({"a": [1, {"b": null}], "c": {}});
        let diff = compute_diff(&doc, &doc.clone()).unwrap();
        assert!(diff.is_unchanged());
        assert_eq!(diff.to_value().to_string(), doc.to_string());
    }

    #[test]
    fn test_object_members() {
        let a = json_value!({"keep": 1, "change": 1, "drop": {"x": [1]}});
        let b = json_value!({"keep": 1, "change": 2, "add": [true]});
        let diff = compute_diff(&a, &b).unwrap();

        assert_eq!(diff.state(), DiffState::Updated);
        assert!(diff.get("keep").unwrap().is_unchanged());
        assert_eq!(diff.get("change").unwrap().state(), DiffState::Updated);

        let dropped = diff.get("drop").unwrap();
        assert_eq!(dropped.state(), DiffState::Deleted);
        let inner = dropped.get("x").unwrap();
        assert_eq!(inner.state(), DiffState::Deleted);
        assert_eq!(inner.get_index(0).unwrap().state(), DiffState::Deleted);

        let added = diff.get("add").unwrap();
        assert_eq!(added.state(), DiffState::Added);
        assert_eq!(added.get_index(0).unwrap().state(), DiffState::Added);

        assert_eq!(
            diff.to_value().to_string(),
            r#"{"add":[true],"change":2,"drop":{"x":[1]},"keep":1}"#
        );
    }

    #[test]
    fn test_array_positions() {
        let diff = compute_diff(&json_value!([1, 2, 3]), &json_value!([1, 5])).unwrap();
        assert_eq!(
            states(&diff),
            [DiffState::None, DiffState::Updated, DiffState::Deleted]
        );
        assert_eq!(diff.to_value().to_string(), "[1,5,3]");

        let diff = compute_diff(&json_value!([1]), &json_value!([1, [2]])).unwrap();
        assert_eq!(diff.state(), DiffState::Updated);
        assert_eq!(states(&diff), [DiffState::None, DiffState::Added]);
        assert_eq!(
            diff.get_index(1).unwrap().get_index(0).unwrap().state(),
            DiffState::Added
        );
    }

    #[test]
    fn test_undetermined_is_an_empty_object() {
        let diff = compute_diff(&Value::new(), &json_value!({"a": 1})).unwrap();
        assert_eq!(diff.state(), DiffState::Updated);
        assert_eq!(diff.get("a").unwrap().state(), DiffState::Added);

        assert!(compute_diff(&Value::new(), &Value::object()).unwrap().is_unchanged());
    }

    #[test]
    fn test_placeholder_fails() {
        let mut a = Value::new();
        a.at_mut("ghost").unwrap();
        let b = json_value!({"ghost": 1});
        assert!(compute_diff(&a, &b).unwrap_err().is_key_not_found());
        assert!(compute_diff(&b, &a).unwrap_err().is_key_not_found());
    }

    #[test]
    fn test_deep_tag() {
        let mut node = DiffNode::tagged(&json_value!({"a": [1, {"b": 2}]}), DiffState::None).unwrap();
        deep_tag(&mut node, DiffState::Deleted);
        let inner = node.get("a").unwrap().get_index(1).unwrap().get("b").unwrap();
        assert_eq!(inner.state(), DiffState::Deleted);
        assert_eq!(node.state(), DiffState::Deleted);
    }

    #[test]
    fn test_changes_report_subtree_roots() {
        let a = json_value!({"list": [1, 2], "obj": {"x": 1}, "kind": [1]});
        let b = json_value!({"list": [1, 3, 4], "obj": {"x": 1, "y": {"z": 1}}, "kind": "s"});
        let changes: Vec<String> = compute_diff(&a, &b)
            .unwrap()
            .changes()
            .into_iter()
            .map(|(path, state)| format!("{path}={state}"))
            .collect();
        assert_eq!(
            changes,
            ["/kind=updated", "/list/1=updated", "/list/2=added", "/obj/y=added"]
        );
    }

    #[test]
    fn test_changes_escape_keys() {
        let diff = compute_diff(&json_value!({"a/b": 1}), &json_value!({"a/b": 2})).unwrap();
        let changes = diff.changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].0.to_string(), "/a~1b");
        assert_eq!(changes[0].0.tokens(), ["a/b"]);
    }

    #[test]
    fn test_children_of_scalar() {
        let node = DiffNode::tagged(&Value::from(true), DiffState::Added).unwrap();
        assert_eq!(node.children().count(), 0);
        assert!(node.get("x").is_none());
        assert!(node.get_index(0).is_none());
    }
}

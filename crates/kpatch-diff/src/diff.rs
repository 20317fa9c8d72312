//! Mapping diff: compute the patch that turns one mapping into another.
//!
//! Keys removed from the mapping are removed one by one, never by dropping
//! the whole object. Other parties may own keys in the same live map that we
//! never tracked, and a blanket removal would destroy them. The converse
//! does not hold: when nothing existed before, the whole new mapping is
//! added in a single operation.

use serde_json::Value;
use tracing::{debug, trace};

use kpatch_types::Mapping;

use crate::error::DiffResult;
use crate::operation::{PatchOperation, PatchOperations};
use crate::options::DiffOptions;
use crate::pointer;

/// Compute the patch from `old` to `new` under `prefix`.
///
/// Trailing slashes on `prefix` are stripped. An empty prefix yields
/// root-level paths such as `/port`.
///
/// # Examples
///
/// ```
/// use kpatch_diff::{diff_mappings, PatchOperation};
/// use kpatch_types::Mapping;
///
/// let old: Mapping = [("port", "80"), ("host", "x")].into_iter().collect();
/// let new: Mapping = [("host", "x")].into_iter().collect();
///
/// let ops = diff_mappings("", &old, &new);
/// assert_eq!(ops.as_slice(), &[PatchOperation::remove("/port")]);
/// ```
pub fn diff_mappings(prefix: &str, old: &Mapping, new: &Mapping) -> PatchOperations {
    compute(pointer::normalize_prefix(prefix), old, new, true)
}

/// Like [`diff_mappings`], with explicit [`DiffOptions`].
pub fn diff_with_options(
    prefix: &str,
    old: &Mapping,
    new: &Mapping,
    options: &DiffOptions,
) -> DiffResult<PatchOperations> {
    let prefix = options.check_prefix(prefix)?;
    Ok(compute(prefix, old, new, options.whole_map_add))
}

/// Diff two loosely typed JSON objects.
///
/// Both values must be objects (or `null`, meaning empty) whose values are
/// all strings; anything else fails with a type mismatch before any
/// operation is produced.
pub fn diff_json_objects(prefix: &str, old: &Value, new: &Value) -> DiffResult<PatchOperations> {
    let old = Mapping::from_json(old)?;
    let new = Mapping::from_json(new)?;
    Ok(diff_mappings(prefix, &old, &new))
}

fn compute(prefix: &str, old: &Mapping, new: &Mapping, whole_map_add: bool) -> PatchOperations {
    let mut ops = PatchOperations::new();

    if old.is_empty() && whole_map_add {
        trace!(prefix, keys = new.len(), "old mapping empty, adding whole object");
        ops.push(PatchOperation::add(prefix, new.to_json_value()));
        return ops;
    }

    // Removals first, then additions and replacements.
    for key in old.keys() {
        if !new.contains_key(key) {
            ops.push(PatchOperation::remove(pointer::join(prefix, key)));
        }
    }

    for (key, new_val) in new {
        match old.get(key) {
            Some(old_val) if old_val == new_val.as_str() => {}
            Some(_) => ops.push(PatchOperation::replace(
                pointer::join(prefix, key),
                new_val.as_str(),
            )),
            None => ops.push(PatchOperation::add(
                pointer::join(prefix, key),
                new_val.as_str(),
            )),
        }
    }

    debug!(
        prefix,
        removed = ops.removals(),
        added = ops.additions(),
        replaced = ops.replacements(),
        "computed mapping diff"
    );
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiffError;
    use crate::operation::ops_equal_unordered;
    use kpatch_types::TypeError;
    use serde_json::json;

    fn make_mapping(pairs: &[(&str, &str)]) -> Mapping {
        pairs.iter().copied().collect()
    }

    #[test]
    fn identical_mappings_no_ops() {
        let m = make_mapping(&[("a", "1"), ("b", "hello")]);
        let ops = diff_mappings("/metadata/labels", &m, &m);
        assert!(ops.is_empty());
    }

    #[test]
    fn empty_old_adds_whole_object() {
        let old = Mapping::new();
        let new = make_mapping(&[("x", "1"), ("y", "2")]);

        let ops = diff_mappings("/metadata/annotations", &old, &new);
        assert_eq!(
            ops.as_slice(),
            &[PatchOperation::add(
                "/metadata/annotations",
                json!({"x": "1", "y": "2"})
            )]
        );
    }

    #[test]
    fn empty_old_strips_trailing_slash_from_whole_object_path() {
        let new = make_mapping(&[("x", "1")]);
        let ops = diff_mappings("/spec/selector/", &Mapping::new(), &new);
        assert_eq!(ops.as_slice()[0].path(), "/spec/selector");
    }

    #[test]
    fn both_empty_still_adds_empty_object() {
        let ops = diff_mappings("/data", &Mapping::new(), &Mapping::new());
        assert_eq!(ops.as_slice(), &[PatchOperation::add("/data", json!({}))]);
    }

    #[test]
    fn empty_new_removes_each_key() {
        let old = make_mapping(&[("a", "1"), ("b", "2")]);
        let ops = diff_mappings("/labels", &old, &Mapping::new());
        assert!(ops_equal_unordered(
            ops.as_slice(),
            &[
                PatchOperation::remove("/labels/a"),
                PatchOperation::remove("/labels/b"),
            ]
        ));
        assert!(ops.iter().all(|op| op.path() != "/labels"));
    }

    #[test]
    fn removed_port_example() {
        let old = make_mapping(&[("port", "80"), ("host", "x")]);
        let new = make_mapping(&[("host", "x")]);
        let ops = diff_mappings("", &old, &new);
        assert_eq!(ops.as_slice(), &[PatchOperation::remove("/port")]);
    }

    #[test]
    fn mixed_changes() {
        let old = make_mapping(&[("keep", "same"), ("modify", "old"), ("drop", "x")]);
        let new = make_mapping(&[("keep", "same"), ("modify", "new"), ("added", "y")]);

        let ops = diff_mappings("/m", &old, &new);
        let expected = vec![
            PatchOperation::add("/m/added", "y"),
            PatchOperation::replace("/m/modify", "new"),
            PatchOperation::remove("/m/drop"),
        ];
        assert!(ops_equal_unordered(ops.as_slice(), &expected));
        assert_eq!(ops.additions(), 1);
        assert_eq!(ops.replacements(), 1);
        assert_eq!(ops.removals(), 1);
    }

    #[test]
    fn removals_come_before_additions() {
        let old = make_mapping(&[("z", "1"), ("b", "1")]);
        let new = make_mapping(&[("a", "1"), ("b", "2")]);
        let ops = diff_mappings("", &old, &new);
        let kinds: Vec<_> = ops.iter().map(PatchOperation::kind).collect();
        assert_eq!(kinds[0], crate::OpKind::Remove);
        assert_eq!(ops.len(), 3);
    }

    #[test]
    fn keys_are_escaped() {
        let old = make_mapping(&[("unrelated", "1")]);
        let new = make_mapping(&[("unrelated", "1"), ("a/b", "s"), ("a~b", "t"), ("a~1b", "u")]);
        let ops = diff_mappings("x", &old, &new);
        assert!(ops_equal_unordered(
            ops.as_slice(),
            &[
                PatchOperation::add("x/a~1b", "s"),
                PatchOperation::add("x/a~0b", "t"),
                PatchOperation::add("x/a~01b", "u"),
            ]
        ));
    }

    #[test]
    fn prefix_trailing_slash_does_not_double() {
        let old = make_mapping(&[("a", "1")]);
        let new = make_mapping(&[("a", "2")]);
        let ops = diff_mappings("/metadata/labels//", &old, &new);
        assert_eq!(
            ops.as_slice(),
            &[PatchOperation::replace("/metadata/labels/a", "2")]
        );
    }

    #[test]
    fn value_change_only_to_empty_string_is_replace() {
        let old = make_mapping(&[("a", "1")]);
        let new = make_mapping(&[("a", "")]);
        let ops = diff_mappings("", &old, &new);
        assert_eq!(ops.as_slice(), &[PatchOperation::replace("/a", "")]);
    }

    #[test]
    fn json_objects_reject_non_string_values() {
        let err = diff_json_objects("", &json!({"a": "1"}), &json!({"a": 1})).unwrap_err();
        assert_eq!(
            err,
            DiffError::Type(TypeError::TypeMismatch {
                key: "a".into(),
                found: "number",
            })
        );
    }

    #[test]
    fn json_objects_null_old_is_empty() {
        let ops = diff_json_objects("/data", &Value::Null, &json!({"k": "v"})).unwrap();
        assert_eq!(ops.as_slice(), &[PatchOperation::add("/data", json!({"k": "v"}))]);
    }

    #[test]
    fn options_per_key_add() {
        let opts = DiffOptions {
            whole_map_add: false,
            ..Default::default()
        };
        let new = make_mapping(&[("a", "1"), ("b", "2")]);
        let ops = diff_with_options("/l", &Mapping::new(), &new, &opts).unwrap();
        assert!(ops_equal_unordered(
            ops.as_slice(),
            &[PatchOperation::add("/l/a", "1"), PatchOperation::add("/l/b", "2")]
        ));
    }

    #[test]
    fn options_strict_prefix_rejects() {
        let m = make_mapping(&[("a", "1")]);
        let err = diff_with_options("/l/", &m, &m, &DiffOptions::strict()).unwrap_err();
        assert!(matches!(err, DiffError::MalformedPrefix { .. }));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let old = make_mapping(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let new = make_mapping(&[("b", "20"), ("c", "3"), ("d", "4")]);
        let first = diff_mappings("/p", &old, &new);
        for _ in 0..5 {
            assert_eq!(diff_mappings("/p", &old, &new), first);
        }
    }
}

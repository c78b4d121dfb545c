//! Path-addressed access to decoded value trees
//!
//! The tree is plain `serde_json::Value`: maps, arrays, and scalars exactly
//! as a YAML/JSON decoder hands them over. All functions here operate on the
//! decoded form; none of them parse or emit text.

use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::error::{Result, ValuesError};
use crate::path::{Path, Segment};

/// Write `value` at `path`, auto-creating intermediate maps and arrays.
///
/// Intermediate map keys are created on demand. An `IndexedKey` segment
/// creates or grows the addressed array, padding with nulls up to the
/// requested index; arrays are grown, never shrunk. When the final segment
/// is a plain key and both the existing and the new value are maps, the new
/// map is deep-merged into the existing one so successive writes can build
/// one composite object; in every other case the final slot is replaced
/// outright.
///
/// On error the tree may be left partially mutated: containers created while
/// walking toward the failing segment are kept. Callers that need
/// all-or-nothing semantics should [`deep_clone`] first and discard the
/// clone on failure.
pub fn set_value_at_path(root: &mut Value, path: &Path, value: Value) -> Result<()> {
    if root.is_null() {
        return Err(ValuesError::NilDataMap);
    }
    if path.is_empty() {
        return Err(ValuesError::EmptyPath);
    }

    let segments = path.segments();
    let map = match root {
        Value::Object(map) => map,
        other => {
            return Err(ValuesError::NonMapTraversal {
                segment: segments[0].to_string(),
                kind: value_kind(other),
            });
        }
    };

    let (walk, last) = segments.split_at(segments.len() - 1);

    let mut current: &mut Map<String, Value> = map;
    for segment in walk {
        current = match segment {
            Segment::Key(key) => {
                let next = current
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                match next {
                    Value::Object(next_map) => next_map,
                    other => {
                        return Err(ValuesError::NonMapTraversal {
                            segment: key.clone(),
                            kind: value_kind(other),
                        });
                    }
                }
            }
            Segment::IndexedKey(key, index) => {
                let slot = current
                    .entry(key.clone())
                    .or_insert_with(|| Value::Array(Vec::new()));
                let arr = match slot {
                    Value::Array(arr) => arr,
                    _ => return Err(ValuesError::NotAnArray { key: key.clone() }),
                };
                while arr.len() <= *index {
                    arr.push(Value::Null);
                }
                let elem = &mut arr[*index];
                if elem.is_null() {
                    *elem = Value::Object(Map::new());
                }
                match elem {
                    Value::Object(elem_map) => elem_map,
                    other => {
                        return Err(ValuesError::NonMapTraversal {
                            segment: format!("{key}[{index}]"),
                            kind: value_kind(other),
                        });
                    }
                }
            }
        };
    }

    match &last[0] {
        Segment::IndexedKey(key, index) => {
            let slot = current
                .entry(key.clone())
                .or_insert_with(|| Value::Array(Vec::new()));
            let arr = match slot {
                Value::Array(arr) => arr,
                _ => return Err(ValuesError::NotAnArray { key: key.clone() }),
            };
            while arr.len() <= *index {
                arr.push(Value::Null);
            }
            // Arrays are never merged element-wise
            arr[*index] = value;
        }
        Segment::Key(key) => match current.entry(key.clone()) {
            Entry::Occupied(mut existing) => {
                if existing.get().is_object() && value.is_object() {
                    merge_values(existing.get_mut(), &value);
                } else {
                    existing.insert(value);
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(value);
            }
        },
    }

    Ok(())
}

/// Read the value at `path` without mutating the tree.
///
/// An empty path returns the tree itself. When the walk stands on an array,
/// a plain key segment is also accepted as a positional index (`items.0`
/// reads the same element as `items[0]`).
pub fn get_value_at_path<'a>(root: &'a Value, path: &Path) -> Result<&'a Value> {
    if root.is_null() {
        return Err(ValuesError::NilDataMap);
    }

    let mut current = root;
    for (pos, segment) in path.segments().iter().enumerate() {
        match current {
            Value::Object(map) => match segment {
                Segment::Key(key) => {
                    current = map.get(key).ok_or_else(|| ValuesError::PathNotFound {
                        path: path.join_prefix(pos + 1),
                    })?;
                }
                Segment::IndexedKey(key, index) => {
                    let entry = map.get(key).ok_or_else(|| ValuesError::PathNotFound {
                        path: path.join_prefix(pos + 1),
                    })?;
                    let arr = entry
                        .as_array()
                        .ok_or_else(|| ValuesError::NotAnArray { key: key.clone() })?;
                    if *index >= arr.len() {
                        return Err(ValuesError::ArrayIndexOutOfBounds {
                            index: *index as i64,
                            length: arr.len(),
                        });
                    }
                    current = &arr[*index];
                }
            },
            Value::Array(items) => {
                let index: i64 = segment.name().parse().unwrap_or(-1);
                if index < 0 || index as usize >= items.len() {
                    return Err(ValuesError::ArrayIndexOutOfBounds {
                        index,
                        length: items.len(),
                    });
                }
                current = &items[index as usize];
            }
            _ => {
                return Err(ValuesError::NonMapOrArrayTraversal {
                    path: path.join_prefix(pos),
                });
            }
        }
    }

    Ok(current)
}

/// Deep-merge `src` into `dst`.
///
/// Keys present in both trees recurse when both sides are maps; every other
/// conflict is resolved by replacing the destination with a copy of the
/// source, arrays included (they are replaced wholesale, never merged by
/// index). A null `src` is a no-op.
pub fn merge_values(dst: &mut Value, src: &Value) {
    match (dst, src) {
        (_, Value::Null) => {}
        (Value::Object(dst_map), Value::Object(src_map)) => {
            for (key, src_val) in src_map {
                match dst_map.get_mut(key) {
                    Some(dst_val) if dst_val.is_object() && src_val.is_object() => {
                        merge_values(dst_val, src_val);
                    }
                    _ => {
                        dst_map.insert(key.clone(), src_val.clone());
                    }
                }
            }
        }
        (dst, src) => *dst = src.clone(),
    }
}

/// Recursively copy a tree into fresh containers.
///
/// The result is deeply equal to the input but shares no map or array with
/// it, at any depth, so mutating one side never shows through the other.
pub fn deep_clone(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, val) in map {
                out.insert(key.clone(), deep_clone(val));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(deep_clone).collect()),
        scalar => scalar.clone(),
    }
}

/// Runtime type name of a value, for error context.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(input: &str) -> Path {
        Path::parse(input).unwrap()
    }

    #[test]
    fn test_set_simple_key() {
        let mut root = json!({});
        set_value_at_path(&mut root, &path("key"), json!("value")).unwrap();
        assert_eq!(root, json!({"key": "value"}));
    }

    #[test]
    fn test_set_nested_path_creates_maps() {
        let mut root = json!({});
        set_value_at_path(&mut root, &path("outer.inner"), json!("value")).unwrap();
        assert_eq!(root, json!({"outer": {"inner": "value"}}));
    }

    #[test]
    fn test_set_array_index() {
        let mut root = json!({});
        set_value_at_path(&mut root, &path("items[0]"), json!("value")).unwrap();
        assert_eq!(root, json!({"items": ["value"]}));
    }

    #[test]
    fn test_set_array_auto_grow() {
        let mut root = json!({});
        set_value_at_path(&mut root, &path("items[3]"), json!("x")).unwrap();
        assert_eq!(root, json!({"items": [null, null, null, "x"]}));
    }

    #[test]
    fn test_set_nested_array_path() {
        let mut root = json!({});
        set_value_at_path(&mut root, &path("spec.containers[0].image"), json!("nginx:latest"))
            .unwrap();
        assert_eq!(
            root,
            json!({"spec": {"containers": [{"image": "nginx:latest"}]}})
        );
    }

    #[test]
    fn test_set_pads_skipped_container_indices() {
        let mut root = json!({});
        set_value_at_path(&mut root, &path("spec.containers[1].image"), json!("nginx:latest"))
            .unwrap();
        assert_eq!(
            root,
            json!({"spec": {"containers": [null, {"image": "nginx:latest"}]}})
        );
    }

    #[test]
    fn test_set_extends_existing_array() {
        let mut root = json!({"items": ["item1"]});
        set_value_at_path(&mut root, &path("items[1]"), json!("item2")).unwrap();
        assert_eq!(root, json!({"items": ["item1", "item2"]}));
    }

    #[test]
    fn test_set_replaces_array_element() {
        let mut root = json!({"items": [{"a": 1}, "b"]});
        set_value_at_path(&mut root, &path("items[0]"), json!({"c": 2})).unwrap();
        // no element-wise merge for arrays
        assert_eq!(root, json!({"items": [{"c": 2}, "b"]}));
    }

    #[test]
    fn test_set_overwrites_scalar() {
        let mut root = json!({"key": "old"});
        set_value_at_path(&mut root, &path("key"), json!("new")).unwrap();
        assert_eq!(root, json!({"key": "new"}));
    }

    #[test]
    fn test_set_overwrites_map_with_scalar() {
        let mut root = json!({"key": {"inner": "value"}});
        set_value_at_path(&mut root, &path("key"), json!("new")).unwrap();
        assert_eq!(root, json!({"key": "new"}));
    }

    #[test]
    fn test_set_overwrites_scalar_with_map() {
        let mut root = json!({"key": "old"});
        set_value_at_path(&mut root, &path("key"), json!({"inner": "value"})).unwrap();
        assert_eq!(root, json!({"key": {"inner": "value"}}));
    }

    #[test]
    fn test_set_merges_map_onto_map() {
        let mut root = json!({});
        set_value_at_path(&mut root, &path("image"), json!({"repository": "nginx"})).unwrap();
        set_value_at_path(&mut root, &path("image"), json!({"tag": "1.25"})).unwrap();
        assert_eq!(root, json!({"image": {"repository": "nginx", "tag": "1.25"}}));
    }

    #[test]
    fn test_set_empty_path() {
        let mut root = json!({});
        let err = set_value_at_path(&mut root, &Path::root(), json!("v")).unwrap_err();
        assert!(matches!(err, ValuesError::EmptyPath));
    }

    #[test]
    fn test_set_null_root() {
        let mut root = Value::Null;
        let err = set_value_at_path(&mut root, &path("key"), json!("v")).unwrap_err();
        assert!(matches!(err, ValuesError::NilDataMap));
    }

    #[test]
    fn test_set_through_scalar_fails() {
        let mut root = json!({"a": "scalar"});
        let err = set_value_at_path(&mut root, &path("a.b"), json!("v")).unwrap_err();
        assert!(matches!(err, ValuesError::NonMapTraversal { .. }));
    }

    #[test]
    fn test_set_indexed_on_non_array_fails() {
        let mut root = json!({"items": "scalar"});
        let err = set_value_at_path(&mut root, &path("items[0]"), json!("v")).unwrap_err();
        assert!(matches!(err, ValuesError::NotAnArray { .. }));
    }

    #[test]
    fn test_set_through_scalar_array_element_fails() {
        let mut root = json!({"items": ["scalar"]});
        let err = set_value_at_path(&mut root, &path("items[0].key"), json!("v")).unwrap_err();
        assert!(matches!(err, ValuesError::NonMapTraversal { .. }));
    }

    #[test]
    fn test_set_failure_keeps_siblings_intact() {
        // no rollback promise is made, but a failed write never touches data
        // outside the walked path
        let mut root = json!({"a": {"b": "scalar"}, "keep": [1, 2]});
        let err = set_value_at_path(&mut root, &path("a.b.c"), json!("v")).unwrap_err();
        assert!(matches!(err, ValuesError::NonMapTraversal { .. }));
        assert_eq!(root, json!({"a": {"b": "scalar"}, "keep": [1, 2]}));
    }

    #[test]
    fn test_set_get_round_trip() {
        let cases = [
            ("key", json!("value")),
            ("outer.inner", json!(42)),
            ("items[2]", json!("x")),
            ("spec.containers[1].image", json!("nginx:latest")),
            ("config", json!({"nested": {"deep": [1, 2, 3]}})),
        ];
        for (p, v) in cases {
            let mut root = json!({});
            let p = path(p);
            set_value_at_path(&mut root, &p, v.clone()).unwrap();
            assert_eq!(get_value_at_path(&root, &p).unwrap(), &v);
        }
    }

    #[test]
    fn test_get_empty_path_returns_root() {
        let root = json!({"a": 1});
        assert_eq!(get_value_at_path(&root, &Path::root()).unwrap(), &root);
    }

    #[test]
    fn test_get_null_root() {
        let err = get_value_at_path(&Value::Null, &path("a")).unwrap_err();
        assert!(matches!(err, ValuesError::NilDataMap));
    }

    #[test]
    fn test_get_missing_key() {
        let root = json!({"a": 1});
        let err = get_value_at_path(&root, &path("missing")).unwrap_err();
        assert!(matches!(err, ValuesError::PathNotFound { .. }));
    }

    #[test]
    fn test_get_missing_nested_key_reports_consumed_path() {
        let root = json!({"nested": {"a": 1}});
        let err = get_value_at_path(&root, &path("nested.missing")).unwrap_err();
        match err {
            ValuesError::PathNotFound { path } => assert_eq!(path, "nested.missing"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_get_indexed_key() {
        let root = json!({"array": ["item1", "item2", "item3"]});
        assert_eq!(
            get_value_at_path(&root, &path("array[1]")).unwrap(),
            &json!("item2")
        );
    }

    #[test]
    fn test_get_bare_numeric_segment_on_array() {
        let root = json!({"array": ["item1", "item2", "item3"]});
        assert_eq!(
            get_value_at_path(&root, &path("array.1")).unwrap(),
            &json!("item2")
        );
    }

    #[test]
    fn test_get_conventions_agree() {
        // the bracket form and the bare-numeric form must address the same
        // elements
        let root = json!({
            "mixed": ["string", 123, {"key": "value"}, ["nested-array"]],
            "nested": {"level1": {"array": ["a", {"key": "b"}]}},
        });
        for (bracketed, bare) in [
            ("mixed[0]", "mixed.0"),
            ("mixed[2].key", "mixed.2.key"),
            ("mixed[3].0", "mixed.3.0"),
            ("nested.level1.array[1].key", "nested.level1.array.1.key"),
        ] {
            assert_eq!(
                get_value_at_path(&root, &path(bracketed)).unwrap(),
                get_value_at_path(&root, &path(bare)).unwrap(),
                "conventions disagree for {bracketed} vs {bare}",
            );
        }
    }

    #[test]
    fn test_get_index_out_of_bounds() {
        let root = json!({"array": ["a", "b"]});
        let err = get_value_at_path(&root, &path("array[10]")).unwrap_err();
        match err {
            ValuesError::ArrayIndexOutOfBounds { index, length } => {
                assert_eq!(index, 10);
                assert_eq!(length, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_get_bare_negative_index() {
        let root = json!({"array": ["a", "b"]});
        let err = get_value_at_path(&root, &path("array.-1")).unwrap_err();
        assert!(matches!(err, ValuesError::ArrayIndexOutOfBounds { .. }));
    }

    #[test]
    fn test_get_bare_non_numeric_segment_on_array() {
        let root = json!({"array": ["a", "b"]});
        let err = get_value_at_path(&root, &path("array.first")).unwrap_err();
        assert!(matches!(err, ValuesError::ArrayIndexOutOfBounds { .. }));
    }

    #[test]
    fn test_get_indexed_on_non_array() {
        let root = json!({"number": 42});
        let err = get_value_at_path(&root, &path("number[0]")).unwrap_err();
        assert!(matches!(err, ValuesError::NotAnArray { .. }));
    }

    #[test]
    fn test_get_through_scalar() {
        let root = json!({"a": "scalar"});
        let err = get_value_at_path(&root, &path("a.deeper")).unwrap_err();
        match err {
            ValuesError::NonMapOrArrayTraversal { path } => assert_eq!(path, "a"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_merge_disjoint_keys() {
        let mut dst = json!({"a": "valueA", "b": "valueB"});
        merge_values(&mut dst, &json!({"c": "valueC"}));
        assert_eq!(dst, json!({"a": "valueA", "b": "valueB", "c": "valueC"}));
    }

    #[test]
    fn test_merge_overlapping_scalar_overwrites() {
        let mut dst = json!({"a": "valueA", "b": "valueB"});
        merge_values(&mut dst, &json!({"b": "newValueB"}));
        assert_eq!(dst, json!({"a": "valueA", "b": "newValueB"}));
    }

    #[test]
    fn test_merge_nested_maps_recurse() {
        let mut dst = json!({"a": {"x": 1}});
        merge_values(&mut dst, &json!({"a": {"y": 2}}));
        assert_eq!(dst, json!({"a": {"x": 1, "y": 2}}));
    }

    #[test]
    fn test_merge_scalar_replaces_map() {
        let mut dst = json!({"a": {"x": 1}});
        merge_values(&mut dst, &json!({"a": "primitive"}));
        assert_eq!(dst, json!({"a": "primitive"}));
    }

    #[test]
    fn test_merge_map_replaces_scalar() {
        let mut dst = json!({"a": 1});
        merge_values(&mut dst, &json!({"a": {"y": 2}}));
        assert_eq!(dst, json!({"a": {"y": 2}}));
    }

    #[test]
    fn test_merge_arrays_replaced_wholesale() {
        let mut dst = json!({"array": [1, 2, 3]});
        merge_values(&mut dst, &json!({"array": [4, 5]}));
        assert_eq!(dst, json!({"array": [4, 5]}));
    }

    #[test]
    fn test_merge_null_src_is_noop() {
        let mut dst = json!({"a": "valueA"});
        merge_values(&mut dst, &Value::Null);
        assert_eq!(dst, json!({"a": "valueA"}));
    }

    #[test]
    fn test_merge_null_value_under_key_overwrites() {
        let mut dst = json!({"a": "valueA"});
        merge_values(&mut dst, &json!({"a": null}));
        assert_eq!(dst, json!({"a": null}));
    }

    #[test]
    fn test_merge_deep_nesting() {
        let mut dst = json!({"l1": {"l2": {"l3": {"a": "valueA", "b": "valueB"}}}});
        merge_values(&mut dst, &json!({"l1": {"l2": {"l3": {"b": "newB", "c": "valueC"}}}}));
        assert_eq!(
            dst,
            json!({"l1": {"l2": {"l3": {"a": "valueA", "b": "newB", "c": "valueC"}}}})
        );
    }

    #[test]
    fn test_deep_clone_equal() {
        let src = json!({
            "spec": {
                "containers": [
                    {"image": "nginx:latest", "env": [{"name": "DEBUG", "value": "true"}]},
                    null,
                ],
            },
            "string": "value",
            "int": 42,
            "float": 3.14,
            "bool": true,
            "null": null,
        });
        assert_eq!(deep_clone(&src), src);
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let src = json!({"outer": {"inner": "value"}, "items": [{"a": 1}]});
        let mut cloned = deep_clone(&src);
        set_value_at_path(&mut cloned, &path("outer.inner"), json!("changed")).unwrap();
        set_value_at_path(&mut cloned, &path("items[0].a"), json!(2)).unwrap();
        assert_eq!(src, json!({"outer": {"inner": "value"}, "items": [{"a": 1}]}));
        assert_eq!(
            cloned,
            json!({"outer": {"inner": "changed"}, "items": [{"a": 2}]})
        );
    }

    #[test]
    fn test_negative_index_rejected_before_any_mutation() {
        // paths are parsed before traversal, so a bad index anywhere leaves
        // the tree untouched
        let mut root = json!({});
        let err = Path::parse("items[-1]").unwrap_err();
        assert!(matches!(err, ValuesError::NegativeArrayIndex { .. }));
        assert_eq!(root, json!({}));

        let err = Path::parse("a.b[-2].c").unwrap_err();
        assert!(matches!(err, ValuesError::NegativeArrayIndex { .. }));
        set_value_at_path(&mut root, &path("ok"), json!(1)).unwrap();
        assert_eq!(root, json!({"ok": 1}));
    }
}

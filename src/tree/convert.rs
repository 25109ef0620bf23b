//! Conversion of component-style element lists into plain [`NodeData`].
//!
//! An element looks like `{ "type": "TreeNode", "key": .., "props": { "children": .., .. } }`.
//! Its props become the node's fields and its children are converted recursively. Elements of
//! any other type are preserved as [`TreeEntry::Illegal`].

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::prelude::*;

/// Element type recognized as a tree node.
pub const TREE_NODE_TYPE: &str = "TreeNode";

/// A value that may arrive either alone or as a list, such as the checked keys of a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// Flattens an optional scalar-or-sequence into an ordered list.
pub fn normalize_to_array<T>(items: Option<OneOrMany<T>>) -> Vec<T> {
    items.map(OneOrMany::into_vec).unwrap_or_default()
}

/// Converts a single element, a list of elements, or `null` into tree entries.
pub fn convert_children<K: DeserializeOwned>(children: Value) -> Result<Vec<TreeEntry<K>>> {
    let elements = match children {
        Value::Null => Vec::new(),
        Value::Array(elements) => elements,
        element => vec![element],
    };

    elements.into_iter().map(convert_element).collect()
}

fn convert_element<K: DeserializeOwned>(element: Value) -> Result<TreeEntry<K>> {
    let mut element = match element {
        Value::Object(element) => element,
        other => {
            debug!("keeping non-object element as illegal entry");
            return Ok(TreeEntry::Illegal(other));
        }
    };

    match element.get("type") {
        None => {}
        Some(Value::String(kind)) if kind == TREE_NODE_TYPE => {}
        Some(kind) => {
            debug!(%kind, "keeping foreign element as illegal entry");
            return Ok(TreeEntry::Illegal(Value::Object(element)));
        }
    }

    let key = element
        .remove("key")
        .filter(|key| !key.is_null())
        .ok_or_else(|| Error::MalformedElement("element has no key".into()))?;

    let mut props = match element.remove("props") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(props)) => props,
        Some(other) => {
            return Err(Error::MalformedElement(format!(
                "props must be an object, got {other}"
            )))
        }
    };

    let children = props.remove("children").unwrap_or(Value::Null);
    props.remove("key");
    props.insert("key".into(), key);

    let mut node: NodeData<K> = serde_json::from_value(Value::Object(props))?;

    // Empty child lists are dropped rather than kept as an empty group.
    node.children = match children {
        Value::Array(ref elements) if elements.is_empty() => Vec::new(),
        children => convert_children(children)?,
    };

    Ok(TreeEntry::Node(node))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_normalize_to_array() {
        assert_eq!(normalize_to_array::<u32>(None), Vec::<u32>::new());
        assert_eq!(normalize_to_array(Some(OneOrMany::One(3))), vec![3]);
        assert_eq!(normalize_to_array(Some(OneOrMany::Many(vec![1, 2]))), vec![1, 2]);
    }

    #[test]
    fn test_one_or_many_from_json() {
        let one: Option<OneOrMany<String>> = serde_json::from_value(json!("a")).unwrap();
        let many: Option<OneOrMany<String>> = serde_json::from_value(json!(["a", "b"])).unwrap();
        let absent: Option<OneOrMany<String>> = serde_json::from_value(Value::Null).unwrap();

        assert_eq!(normalize_to_array(one), vec!["a"]);
        assert_eq!(normalize_to_array(many), vec!["a", "b"]);
        assert!(normalize_to_array(absent).is_empty());
    }

    #[test]
    fn test_converts_nested_elements() {
        let entries = convert_children::<String>(json!([
            {
                "type": "TreeNode",
                "key": "parent",
                "props": {
                    "label": "Parent",
                    "checkable": false,
                    "children": [
                        { "type": "TreeNode", "key": "child", "props": { "disabled": true } },
                    ],
                },
            },
        ]))
        .unwrap();

        let parent = entries[0].as_node().unwrap();
        assert_eq!(parent.key, "parent");
        assert!(!parent.checkable);
        assert_eq!(parent.extra.get("label"), Some(&json!("Parent")));

        let child = parent.children[0].as_node().unwrap();
        assert_eq!(child.key, "child");
        assert!(child.disabled);
        assert!(child.children.is_empty());
    }

    #[test]
    fn test_single_element_and_null() {
        let single = convert_children::<u32>(json!({ "key": 5, "props": {} })).unwrap();
        assert_eq!(single, vec![TreeEntry::Node(NodeData::new(5))]);

        assert!(convert_children::<u32>(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_foreign_elements_are_preserved() {
        let foreign = json!({ "type": "div", "key": "x", "props": {} });
        let entries = convert_children::<String>(json!([foreign.clone(), "text"])).unwrap();

        assert_eq!(
            entries,
            vec![TreeEntry::Illegal(foreign), TreeEntry::Illegal(json!("text"))]
        );
    }

    #[test]
    fn test_empty_children_are_dropped() {
        let entries =
            convert_children::<u32>(json!([{ "key": 1, "props": { "children": [] } }])).unwrap();

        assert!(entries[0].as_node().unwrap().children.is_empty());
    }

    #[test]
    fn test_malformed_elements() {
        assert!(matches!(
            convert_children::<u32>(json!([{ "type": "TreeNode", "props": {} }])),
            Err(Error::MalformedElement(_))
        ));
        assert!(matches!(
            convert_children::<u32>(json!([{ "key": 1, "props": 3 }])),
            Err(Error::MalformedElement(_))
        ));
        assert!(matches!(
            convert_children::<u32>(json!([{ "key": "not a number" }])),
            Err(Error::FailedDeserialization(_))
        ));
    }

    #[test]
    fn test_converted_tree_can_be_indexed() {
        let entries = convert_children::<u32>(json!([
            { "key": 1, "props": { "children": [{ "key": 2 }, { "type": "span" }, { "key": 3 }] } },
        ]))
        .unwrap();
        let index = TreeIndex::build(&entries).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index.by_key(&3).unwrap().pos.to_string(), "0-0-1");
    }
}

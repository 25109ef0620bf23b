use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::prelude::*;

/// Marker field wrapping an illegal entry when it is written out.
pub const ILLEGAL_FLAG: &str = "illegalFlag";

fn default_checkable() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// Plain tree data, as handed over by the component that owns the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "K: serde::de::DeserializeOwned")
)]
pub struct NodeData<K> {
    pub key: K,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub checkbox_disabled: bool,

    #[serde(default = "default_checkable", skip_serializing_if = "is_true")]
    pub checkable: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeEntry<K>>,

    /// Props this crate does not interpret, kept so the data can be handed back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<K> NodeData<K> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            disabled: false,
            checkbox_disabled: false,
            checkable: true,
            children: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn checkbox_disabled(mut self) -> Self {
        self.checkbox_disabled = true;
        self
    }

    pub fn uncheckable(mut self) -> Self {
        self.checkable = false;
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeData<K>>) -> Self {
        self.children = children.into_iter().map(TreeEntry::Node).collect();
        self
    }
}

/// One item of a child list: either a tree node or something that could not be read as one.
///
/// Illegal entries are carried along verbatim so older trees that mix in foreign elements keep
/// round-tripping, but they never take part in indexing or normalization. They are written as
/// `{ "illegalFlag": true, "node": .. }` and read back from that shape.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeEntry<K> {
    Node(NodeData<K>),
    Illegal(Value),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IllegalEntry<'a> {
    illegal_flag: bool,
    node: &'a Value,
}

impl<K: DeserializeOwned> TreeEntry<K> {
    /// Reads one child list item.
    ///
    /// Non-objects, objects of a foreign `type` and objects without a key become illegal
    /// entries. Anything else must decode as a node: a key of the wrong type is an error.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                debug!("keeping non-object child as illegal entry");
                return Ok(Self::Illegal(other));
            }
        };

        if object.get(ILLEGAL_FLAG) == Some(&Value::Bool(true)) {
            return Ok(Self::Illegal(object.remove("node").unwrap_or(Value::Null)));
        }

        let foreign = match object.get("type") {
            None => false,
            Some(Value::String(kind)) => kind != TREE_NODE_TYPE,
            Some(_) => true,
        };

        if foreign || object.get("key").map_or(true, Value::is_null) {
            debug!("keeping unreadable child as illegal entry");
            return Ok(Self::Illegal(Value::Object(object)));
        }

        Ok(Self::Node(serde_json::from_value(Value::Object(object))?))
    }
}

impl<K: Serialize> Serialize for TreeEntry<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Node(node) => node.serialize(serializer),
            Self::Illegal(node) => IllegalEntry {
                illegal_flag: true,
                node,
            }
            .serialize(serializer),
        }
    }
}

impl<'de, K: DeserializeOwned> Deserialize<'de> for TreeEntry<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl<K> TreeEntry<K> {
    pub fn as_node(&self) -> Option<&NodeData<K>> {
        match self {
            Self::Node(node) => Some(node),
            Self::Illegal(_) => None,
        }
    }

    pub fn is_illegal(&self) -> bool {
        matches!(self, Self::Illegal(_))
    }
}

impl<K> From<NodeData<K>> for TreeEntry<K> {
    fn from(node: NodeData<K>) -> Self {
        Self::Node(node)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// An indexed node. Children are ids into the owning [`TreeIndex`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node<K> {
    pub id: NodeId,
    pub key: K,
    pub pos: Pos,
    pub disabled: bool,
    pub checkbox_disabled: bool,
    pub checkable: bool,
    pub children: Vec<NodeId>,
}

impl<K> Node<K> {
    /// Either flavour of disabled: the checked state of such a node is fixed.
    pub fn is_disabled(&self) -> bool {
        self.disabled || self.checkbox_disabled
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

use std::collections::HashMap;

use tracing::debug;

use crate::prelude::*;

/// Arena of indexed nodes together with the key → node and position → node lookup tables.
///
/// Built once per tree structure and only read afterwards; every normalization call borrows it.
#[derive(Debug, Clone)]
pub struct TreeIndex<K: NodeKey> {
    nodes: Vec<Node<K>>,
    roots: Vec<NodeId>,
    by_key: HashMap<K, NodeId>,
    by_pos: HashMap<Pos, NodeId>,
}

impl<K: NodeKey> Default for TreeIndex<K> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            by_key: HashMap::new(),
            by_pos: HashMap::new(),
        }
    }
}

impl<K: NodeKey> TreeIndex<K> {
    /// Indexes a list of top-level entries. Illegal entries are skipped and take no position.
    pub fn build(entries: &[TreeEntry<K>]) -> Result<Self> {
        let mut index = Self::default();
        index.roots = index.insert_all(entries, &Pos::root())?;

        debug!(nodes = index.nodes.len(), "built tree index");

        Ok(index)
    }

    pub fn from_nodes(nodes: impl IntoIterator<Item = NodeData<K>>) -> Result<Self> {
        Self::build(&nodes.into_iter().map(TreeEntry::Node).collect::<Vec<_>>())
    }

    fn insert_all(&mut self, entries: &[TreeEntry<K>], parent: &Pos) -> Result<Vec<NodeId>> {
        let mut ids = Vec::with_capacity(entries.len());

        for data in entries.iter().filter_map(TreeEntry::as_node) {
            let pos = parent.child(ids.len() as u32);
            ids.push(self.insert(data, pos)?);
        }

        Ok(ids)
    }

    fn insert(&mut self, data: &NodeData<K>, pos: Pos) -> Result<NodeId> {
        if self.by_key.contains_key(&data.key) {
            return Err(Error::DuplicateKey(format!("{:?}", data.key)));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            key: data.key.clone(),
            pos: pos.clone(),
            disabled: data.disabled,
            checkbox_disabled: data.checkbox_disabled,
            checkable: data.checkable,
            children: Vec::new(),
        });
        self.by_key.insert(data.key.clone(), id);
        self.by_pos.insert(pos.clone(), id);

        let children = self.insert_all(&data.children, &pos)?;
        self.nodes[id.0].children = children;

        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node behind `id`, if `id` was handed out by this index.
    pub fn get(&self, id: NodeId) -> Option<&Node<K>> {
        self.nodes.get(id.0)
    }

    // Ids stored inside the arena always point into it.
    fn node(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id.0]
    }

    /// Key → node lookup.
    pub fn by_key(&self, key: &K) -> Option<&Node<K>> {
        self.by_key.get(key).map(|id| self.node(*id))
    }

    /// Position → node lookup.
    pub fn by_pos(&self, pos: &Pos) -> Option<&Node<K>> {
        self.by_pos.get(pos).map(|id| self.node(*id))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn roots(&self) -> impl Iterator<Item = &Node<K>> + '_ {
        self.roots.iter().map(|id| self.node(*id))
    }

    pub fn children<'a>(&'a self, node: &'a Node<K>) -> impl Iterator<Item = &'a Node<K>> + 'a {
        node.children.iter().map(|id| self.node(*id))
    }

    pub fn parent(&self, node: &Node<K>) -> Option<&Node<K>> {
        node.pos.parent().and_then(|pos| self.by_pos(&pos))
    }

    /// All nodes in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<K>> + '_ {
        self.nodes.iter()
    }
}

use crate::prelude::*;

/// Whether `node` counts as checked against `checked`.
///
/// Disabled nodes always count as checked, so they never keep a parent from collapsing. A
/// non-checkable node is checked when it has no children or all of its children are.
pub fn is_node_checked<K: NodeKey>(index: &TreeIndex<K>, node: &Node<K>, checked: &[K]) -> bool {
    if node.is_disabled() {
        return true;
    }

    if !node.checkable {
        return index
            .children(node)
            .all(|child| is_node_checked(index, child, checked));
    }

    checked.contains(&node.key)
}

/// Same shape as [`is_node_checked`], but only disabled state makes a node checked.
pub fn is_node_disabled_checked<K: NodeKey>(index: &TreeIndex<K>, node: &Node<K>) -> bool {
    if node.is_disabled() {
        return true;
    }

    if !node.checkable {
        return index
            .children(node)
            .all(|child| is_node_disabled_checked(index, child));
    }

    false
}

/// Visits `node` and its descendants in pre-order, never entering a disabled node.
pub fn for_each_enabled_node<'a, K, F>(index: &'a TreeIndex<K>, node: &'a Node<K>, f: &mut F)
where
    K: NodeKey,
    F: FnMut(&'a Node<K>),
{
    if node.is_disabled() {
        return;
    }

    f(node);

    for child in index.children(node) {
        for_each_enabled_node(index, child, f);
    }
}

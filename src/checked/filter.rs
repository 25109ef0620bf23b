use crate::prelude::*;

/// Drops keys already implied by their nearest checkable ancestor being in `keys`.
///
/// A key stays when it has no usable ancestor, when the ancestor found is not checkable or is
/// the node itself, or when the ancestor is not listed. Unknown keys are dropped.
pub fn filter_child_key<K: NodeKey>(keys: &[K], index: &TreeIndex<K>) -> Vec<K> {
    keys.iter()
        .filter(|key| {
            let Some(node) = index.by_key(key) else {
                return false;
            };

            match get_checkable_parent_node(index, node) {
                None => true,
                Some(parent) => {
                    !parent.checkable || parent.id == node.id || !keys.contains(&parent.key)
                }
            }
        })
        .cloned()
        .collect()
}

/// Keeps keys whose node is a leaf or has only disabled-checked children.
pub fn filter_parent_key<K: NodeKey>(keys: &[K], index: &TreeIndex<K>) -> Vec<K> {
    keys.iter()
        .filter(|key| {
            index.by_key(key).is_some_and(|node| {
                index
                    .children(node)
                    .all(|child| is_node_disabled_checked(index, child))
            })
        })
        .cloned()
        .collect()
}

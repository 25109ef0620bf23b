use itertools::Itertools;
use tracing::{debug, trace};

use crate::prelude::*;

/// Computes the canonical checked-key set for `checked`.
///
/// The keys first collapse upwards: whenever every child of a checkable, enabled node is
/// checked, the children give way to the parent. The collapsed set is then expanded again so
/// that every enabled, checkable node below a checked key is listed. Disabled keys pass
/// through untouched, and keys the index does not know are dropped.
///
/// The result holds no duplicates; its order carries no meaning.
pub fn get_all_checked_keys<K: NodeKey>(checked: &[K], index: &TreeIndex<K>) -> Vec<K> {
    let known = checked
        .iter()
        .filter(|key| index.contains_key(key))
        .cloned()
        .collect_vec();

    if known.len() < checked.len() {
        debug!(
            dropped = checked.len() - known.len(),
            "ignoring checked keys missing from the tree index"
        );
    }

    let is_disabled = |key: &K| index.by_key(key).is_some_and(Node::is_disabled);

    let mut flat = filter_child_key(&known, index)
        .into_iter()
        .filter(|key| !is_disabled(key))
        .chain(known.iter().filter(|&key| is_disabled(key)).cloned())
        .collect_vec();

    collapse(&mut flat, index);
    expand(&flat, index)
}

/// Replaces every fully checked sibling group with its nearest checkable, enabled parent.
fn collapse<K: NodeKey>(flat: &mut Vec<K>, index: &TreeIndex<K>) {
    for (i, key) in flat.clone().iter().enumerate() {
        let Some(node) = index.by_key(key) else {
            continue;
        };

        for pos in node.pos.ancestors() {
            let Some(parent) = index.by_pos(&pos) else {
                break;
            };

            if !parent.checkable || parent.is_disabled() {
                continue;
            }

            if !index
                .children(parent)
                .all(|child| is_node_checked(index, child, flat))
            {
                break;
            }

            trace!(parent = ?parent.key, "collapsing fully checked children");

            for child in index.children(parent) {
                remove_key(flat, child, index);
            }
            flat.insert(i.min(flat.len()), parent.key.clone());
        }
    }
}

/// Removes `node`'s key, or the keys of its checkable children when it is only a group.
fn remove_key<K: NodeKey>(flat: &mut Vec<K>, node: &Node<K>, index: &TreeIndex<K>) {
    if node.is_disabled() {
        return;
    }

    if !node.checkable && !node.is_leaf() {
        for child in index.children(node) {
            remove_key(flat, child, index);
        }
        return;
    }

    if let Some(at) = flat.iter().position(|key| *key == node.key) {
        flat.remove(at);
    }
}

/// Lists every enabled, checkable node reachable from the collapsed keys.
fn expand<K: NodeKey>(flat: &[K], index: &TreeIndex<K>) -> Vec<K> {
    let mut keys = Vec::new();

    for node in flat.iter().filter_map(|key| index.by_key(key)) {
        if node.is_disabled() {
            keys.push(node.key.clone());
            continue;
        }

        for_each_enabled_node(index, node, &mut |descendant| {
            if descendant.checkable {
                keys.push(descendant.key.clone());
            }
        });
    }

    keys.into_iter().unique().collect()
}

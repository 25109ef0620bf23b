use crate::prelude::*;

/// Nearest ancestor of `node` with an independent checked state.
///
/// Non-checkable ancestors are climbed through. A top-level node is its own checkable parent.
/// `None` means there is no usable ancestor: the climb reached a disabled node, or the index
/// has no entry for a parent position.
pub fn get_checkable_parent_node<'a, K: NodeKey>(
    index: &'a TreeIndex<K>,
    node: &'a Node<K>,
) -> Option<&'a Node<K>> {
    if node.pos.is_top_level() {
        return Some(node);
    }

    let parent = index.parent(node)?;

    if parent.is_disabled() {
        return None;
    }

    if !parent.checkable {
        return get_checkable_parent_node(index, parent);
    }

    Some(parent)
}

/// Keys of every node strictly between the implicit root and `pos`, root-most first.
///
/// Despite the name this is the ancestor chain of the node at `pos`; callers rely on that, so
/// the behaviour stays as is.
pub fn get_all_descendant_keys<K: NodeKey>(pos: &Pos, index: &TreeIndex<K>) -> Vec<K> {
    let mut keys = pos
        .ancestors()
        .filter_map(|ancestor| index.by_pos(&ancestor))
        .map(|node| node.key.clone())
        .collect::<Vec<_>>();

    keys.reverse();
    keys
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;
    use crate::testing::tree_index;

    // a { g(uncheckable) { b { c } } }, x(disabled) { y }, top
    fn sample() -> TreeIndex<&'static str> {
        TreeIndex::from_nodes([
            NodeData::new("a").with_children([NodeData::new("g")
                .uncheckable()
                .with_children([NodeData::new("b").with_children([NodeData::new("c")])])]),
            NodeData::new("x")
                .disabled()
                .with_children([NodeData::new("y")]),
            NodeData::new("top"),
        ])
        .unwrap()
    }

    fn parent_key(index: &TreeIndex<&'static str>, key: &'static str) -> Option<&'static str> {
        let node = index.by_key(&key).unwrap();
        get_checkable_parent_node(index, node).map(|n| n.key)
    }

    #[test]
    fn test_top_level_is_its_own_parent() {
        let index = sample();

        assert_eq!(parent_key(&index, "top"), Some("top"));
        assert_eq!(parent_key(&index, "a"), Some("a"));
    }

    #[test]
    fn test_uncheckable_parents_are_skipped() {
        let index = sample();

        assert_eq!(parent_key(&index, "b"), Some("a"));
        assert_eq!(parent_key(&index, "c"), Some("b"));
        assert_eq!(parent_key(&index, "g"), Some("a"));
    }

    #[test]
    fn test_disabled_parent_means_none() {
        let index = sample();

        assert_eq!(parent_key(&index, "y"), None);
    }

    #[test]
    fn test_descendant_keys_are_the_ancestor_chain() {
        let index = sample();
        let c = index.by_key(&"c").unwrap();

        assert_eq!(get_all_descendant_keys(&c.pos, &index), vec!["a", "g", "b"]);
        assert!(get_all_descendant_keys(&index.by_key(&"top").unwrap().pos, &index).is_empty());
    }

    #[proptest(fork = false)]
    fn test_ancestor_chain_matches_positions(
        #[strategy(tree_index(|n: u32| n))] index: TreeIndex<u32>,
    ) {
        for node in index.iter() {
            let chain = get_all_descendant_keys(&node.pos, &index);

            prop_assert_eq!(chain.len(), node.pos.len() - 2);
            for key in chain {
                let ancestor = index.by_key(&key).unwrap();
                prop_assert!(ancestor.pos.is_ancestor_or_self_of(&node.pos));
                prop_assert_ne!(ancestor.id, node.id);
            }
        }
    }

    #[proptest(fork = false)]
    fn test_checkable_parent_is_self_or_usable_ancestor(
        #[strategy(tree_index(|n: u32| n))] index: TreeIndex<u32>,
    ) {
        for node in index.iter() {
            match get_checkable_parent_node(&index, node) {
                Some(parent) if parent.id == node.id => {
                    prop_assert!(node.pos.is_top_level());
                }
                Some(parent) => {
                    // A non-checkable top-level ancestor ends the climb as-is.
                    prop_assert!(parent.checkable || parent.pos.is_top_level());
                    prop_assert!(!parent.is_disabled());
                    prop_assert!(parent.pos.is_ancestor_or_self_of(&node.pos));
                }
                None => {
                    let blocked = get_all_descendant_keys(&node.pos, &index)
                        .iter()
                        .any(|key| index.by_key(key).is_some_and(Node::is_disabled));
                    prop_assert!(blocked);
                }
            }
        }
    }
}

use itertools::Itertools;
use proptest::{collection::vec, prelude::*, sample::subsequence};

use crate::prelude::*;

/// Keys at or above this value are never handed out to generated nodes.
pub const STALE_KEY_OFFSET: u32 = 1_000_000;

/// A generated tree together with checked keys to normalize against it.
#[derive(Debug, Clone)]
pub struct TreeCase<K: NodeKey> {
    pub index: TreeIndex<K>,
    /// Keys of checkable or disabled nodes, in arbitrary order.
    pub checked: Vec<K>,
    /// Keys that no node of the tree carries.
    pub stale: Vec<K>,
}

#[derive(Debug, Clone)]
struct Shape {
    disabled: bool,
    checkbox_disabled: bool,
    checkable: bool,
    children: Vec<Shape>,
}

fn flags() -> impl Strategy<Value = (bool, bool, bool)> {
    (
        prop::bool::weighted(0.1),
        prop::bool::weighted(0.05),
        prop::bool::weighted(0.8),
    )
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = flags().prop_map(|(disabled, checkbox_disabled, checkable)| Shape {
        disabled,
        checkbox_disabled,
        checkable,
        children: Vec::new(),
    });

    leaf.prop_recursive(4, 48, 4, |inner| {
        (flags(), vec(inner, 1..4)).prop_map(
            |((disabled, checkbox_disabled, checkable), children)| Shape {
                disabled,
                checkbox_disabled,
                checkable,
                children,
            },
        )
    })
}

fn to_node_data<K>(shape: &Shape, make_key: fn(u32) -> K, next: &mut u32) -> NodeData<K> {
    let mut node = NodeData::new(make_key(*next));
    *next += 1;

    node.disabled = shape.disabled;
    node.checkbox_disabled = shape.checkbox_disabled;
    node.checkable = shape.checkable;
    node.children = shape
        .children
        .iter()
        .map(|child| TreeEntry::Node(to_node_data(child, make_key, next)))
        .collect();

    node
}

/// Top-level entries of a random tree, keyed by `make_key` applied to a running counter.
pub fn tree_entries<K: NodeKey + 'static>(make_key: fn(u32) -> K) -> impl Strategy<Value = Vec<TreeEntry<K>>> {
    vec(shape(), 1..4).prop_map(move |shapes| {
        let mut next = 0;

        shapes
            .iter()
            .map(|shape| TreeEntry::Node(to_node_data(shape, make_key, &mut next)))
            .collect_vec()
    })
}

pub fn tree_index<K: NodeKey + 'static>(make_key: fn(u32) -> K) -> impl Strategy<Value = TreeIndex<K>> {
    tree_entries(make_key)
        .prop_map(|entries| TreeIndex::build(&entries).expect("generated keys are unique"))
}

pub fn tree_cases<K: NodeKey + 'static>(make_key: fn(u32) -> K) -> impl Strategy<Value = TreeCase<K>> {
    tree_index(make_key)
        .prop_flat_map(move |index| {
            let valid = index
                .iter()
                .filter(|node| node.checkable || node.is_disabled())
                .map(|node| node.key.clone())
                .collect_vec();
            let len = valid.len();

            (
                Just(index),
                subsequence(valid, 0..=len).prop_shuffle(),
                vec(
                    (STALE_KEY_OFFSET..STALE_KEY_OFFSET + 100).prop_map(make_key),
                    0..3,
                ),
            )
        })
        .prop_map(|(index, checked, stale)| TreeCase {
            index,
            checked,
            stale,
        })
}

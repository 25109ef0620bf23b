mod error;

pub mod checked;
pub mod prelude;
pub mod testing;
pub mod tree;

#[doc(hidden)]
/// This is a hidden module to make the macros defined on this crate available for the users.
pub mod __dependencies {
    pub use itertools;
    pub use paste;
    pub use proptest;
    pub use test_strategy;
}

/// Stamps out a module of property tests for [`get_all_checked_keys`](crate::checked::get_all_checked_keys)
/// over trees whose keys are built by `$make_key` from a running `u32` counter.
#[macro_export]
macro_rules! test_normalizer_properties {
    ($name:ident, $key:ty, $make_key:expr) => {
        $crate::__dependencies::paste::paste! {
            mod [<test_normalizer_ $name:snake>] {
                use std::collections::HashSet;

                use $crate::__dependencies::{
                    itertools::Itertools,
                    proptest::prelude::*,
                    test_strategy,
                };
                use $crate::prelude::*;
                use $crate::testing::{tree_cases, TreeCase};

                fn cases() -> impl Strategy<Value = TreeCase<$key>> {
                    tree_cases($make_key)
                }

                fn key_set(keys: &[$key]) -> HashSet<$key> {
                    keys.iter().cloned().collect()
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_idempotence(#[strategy(cases())] case: TreeCase<$key>) {
                    let mut keys = get_all_checked_keys(&case.checked, &case.index);

                    $crate::prop_assert_does_not_change!(
                        keys = get_all_checked_keys(&keys, &case.index),
                        key_set(&keys)
                    );
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_output_has_no_duplicates(#[strategy(cases())] case: TreeCase<$key>) {
                    let keys = get_all_checked_keys(&case.checked, &case.index);

                    prop_assert_eq!(key_set(&keys).len(), keys.len());
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_stale_keys_are_ignored(#[strategy(cases())] case: TreeCase<$key>) {
                    let with_stale = case
                        .checked
                        .iter()
                        .interleave(&case.stale)
                        .cloned()
                        .collect_vec();

                    let keys = get_all_checked_keys(&with_stale, &case.index);

                    for key in &case.stale {
                        prop_assert!(!keys.contains(key));
                    }
                    prop_assert_eq!(
                        key_set(&keys),
                        key_set(&get_all_checked_keys(&case.checked, &case.index))
                    );
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_disabled_keys_are_kept(#[strategy(cases())] case: TreeCase<$key>) {
                    let keys = get_all_checked_keys(&case.checked, &case.index);

                    for key in &case.checked {
                        if case.index.by_key(key).is_some_and(Node::is_disabled) {
                            prop_assert!(keys.contains(key));
                        }
                    }
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_enabled_uncheckable_nodes_are_never_listed(
                    #[strategy(cases())] case: TreeCase<$key>,
                ) {
                    for key in get_all_checked_keys(&case.checked, &case.index) {
                        let node = case.index.by_key(&key).unwrap();
                        prop_assert!(node.checkable || node.is_disabled());
                    }
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_checked_keys_list_their_checkable_descendants(
                    #[strategy(cases())] case: TreeCase<$key>,
                ) {
                    let keys = key_set(&get_all_checked_keys(&case.checked, &case.index));

                    for key in &keys {
                        let node = case.index.by_key(key).unwrap();
                        let mut missing = Vec::new();

                        for_each_enabled_node(&case.index, node, &mut |descendant| {
                            if descendant.checkable && !keys.contains(&descendant.key) {
                                missing.push(descendant.key.clone());
                            }
                        });

                        prop_assert!(missing.is_empty(), "{:?} misses {:?}", key, missing);
                    }
                }

                #[cfg_attr(coverage_nightly, coverage(off))]
                #[test_strategy::proptest(fork = false)]
                fn test_fully_checked_leaf_groups_check_their_parent(
                    #[strategy(cases())] case: TreeCase<$key>,
                ) {
                    let keys = get_all_checked_keys(&case.checked, &case.index);

                    for node in case.index.iter() {
                        if !node.checkable || node.is_disabled() || node.is_leaf() {
                            continue;
                        }

                        let complete = case.index.children(node).all(|child| {
                            child.checkable
                                && !child.is_disabled()
                                && child.is_leaf()
                                && keys.contains(&child.key)
                        });

                        if complete {
                            prop_assert!(keys.contains(&node.key), "{:?} not collapsed", node.key);
                        }
                    }
                }
            }
        }
    };
}

#[macro_export]
macro_rules! prop_assert_changes {
    ($action: expr, $value: expr) => {
        let old_value = $value.clone();

        prop_assert_eq!($value, old_value);

        $action;

        prop_assert_ne!($value, old_value);
    };
}

#[macro_export]
macro_rules! prop_assert_does_not_change {
    ($action: expr, $value: expr) => {
        let old_value = $value.clone();

        $action;

        prop_assert_eq!($value, old_value);
    };
}

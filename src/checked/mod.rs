mod ancestors;
mod filter;
mod normalize;
mod predicates;

pub use {
    ancestors::{get_all_descendant_keys, get_checkable_parent_node},
    filter::{filter_child_key, filter_parent_key},
    normalize::get_all_checked_keys,
    predicates::{for_each_enabled_node, is_node_checked, is_node_disabled_checked},
};

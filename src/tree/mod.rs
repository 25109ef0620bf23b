mod convert;
mod index;
mod node;
pub mod pos;

pub use {
    convert::{convert_children, normalize_to_array, OneOrMany, TREE_NODE_TYPE},
    index::TreeIndex,
    node::{Node, NodeData, NodeId, TreeEntry},
    pos::Pos,
};

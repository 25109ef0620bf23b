use std::{fmt::Debug, hash::Hash};

pub use crate::{checked::*, error::*, tree::*};

/// Anything usable as a node key: strings and integers alike.
pub trait NodeKey: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> NodeKey for T {}

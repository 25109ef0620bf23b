use std::{fmt, str::FromStr};

use itertools::Itertools;

use crate::prelude::*;

/// Separator between the segments of a position path.
pub const SEPARATOR: char = '-';

/// Position of a node from the implicit root, such as `0-1-2`.
///
/// The implicit root lives at `0`, top-level nodes at `0-i`, and every child appends one more
/// segment to its parent's position. Positions let ancestor and sibling checks run as prefix
/// comparisons instead of tree walks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    segments: Vec<u32>,
}

impl Pos {
    pub fn root() -> Self {
        Self { segments: vec![0] }
    }

    pub fn child(&self, index: u32) -> Self {
        let mut segments = self.segments.clone();
        segments.push(index);
        Self { segments }
    }

    pub fn segments(&self) -> &[u32] {
        &self.segments
    }

    /// Number of segments, which is the depth plus one.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.segments.len() == 1
    }

    /// True for the direct children of the implicit root.
    pub fn is_top_level(&self) -> bool {
        self.segments.len() == 2
    }

    pub fn parent(&self) -> Option<Self> {
        (self.segments.len() > 1).then(|| Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Strict ancestors, nearest first, stopping before the implicit root.
    pub fn ancestors(&self) -> impl Iterator<Item = Pos> + '_ {
        (2..self.segments.len()).rev().map(|len| Self {
            segments: self.segments[..len].to_vec(),
        })
    }

    /// True when `other` is this position or lies below it.
    pub fn is_ancestor_or_self_of(&self, other: &Pos) -> bool {
        self.segments.len() <= other.segments.len()
            && self.segments.iter().zip(&other.segments).all(|(a, b)| a == b)
    }

    pub fn is_sibling_or_self_of(&self, other: &Pos) -> bool {
        fn parent(pos: &Pos) -> &[u32] {
            &pos.segments[..pos.segments.len().saturating_sub(1)]
        }

        parent(self) == parent(other)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.iter().join(&SEPARATOR.to_string()))
    }
}

impl FromStr for Pos {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(Error::InvalidPosition("empty position".into()));
        }

        let segments = input
            .split(SEPARATOR)
            .map(|segment| {
                segment
                    .parse::<u32>()
                    .map_err(|e| Error::InvalidPosition(format!("{input:?}: {e}")))
            })
            .try_collect()?;

        Ok(Self { segments })
    }
}

/// Returns true iff `target` is `current` or one of its descendants, comparing raw position
/// strings segment by segment. Empty positions are never related to anything.
pub fn is_descendant_or_self(current: &str, target: &str) -> bool {
    if current.is_empty() || target.is_empty() {
        return false;
    }

    let current = current.split(SEPARATOR).collect_vec();
    let target = target.split(SEPARATOR).collect_vec();

    current.len() <= target.len() && current.iter().zip(&target).all(|(a, b)| a == b)
}

/// Returns true iff both positions share the same parent path.
pub fn is_sibling_or_self(current: &str, target: &str) -> bool {
    fn parent(pos: &str) -> Vec<&str> {
        let mut segments = pos.split(SEPARATOR).collect_vec();
        segments.pop();
        segments
    }

    parent(current) == parent(target)
}

#[cfg(test)]
mod tests {
    use proptest::{collection::vec, prelude::*};
    use test_strategy::proptest;

    use super::*;

    fn pos(input: &str) -> Pos {
        input.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let p = pos("0-1-12");
        assert_eq!(p.segments(), &[0, 1, 12]);
        assert_eq!(p.to_string(), "0-1-12");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!("".parse::<Pos>(), Err(Error::InvalidPosition(_))));
        assert!(matches!("0--1".parse::<Pos>(), Err(Error::InvalidPosition(_))));
        assert!(matches!("0-a".parse::<Pos>(), Err(Error::InvalidPosition(_))));
    }

    #[test]
    fn test_ancestors_are_nearest_first_and_skip_root() {
        let ancestors = pos("0-1-2-3").ancestors().map(|p| p.to_string()).collect_vec();
        assert_eq!(ancestors, vec!["0-1-2", "0-1"]);
        assert_eq!(pos("0-4").ancestors().count(), 0);
    }

    #[test]
    fn test_parent_and_child() {
        assert_eq!(pos("0-1").child(3), pos("0-1-3"));
        assert_eq!(pos("0-1-3").parent(), Some(pos("0-1")));
        assert_eq!(Pos::root().parent(), None);
        assert!(pos("0-2").is_top_level());
    }

    #[test]
    fn test_descendant_or_self_on_strings() {
        assert!(is_descendant_or_self("0-1", "0-1"));
        assert!(is_descendant_or_self("0-1", "0-1-4"));
        assert!(!is_descendant_or_self("0-1-4", "0-1"));
        assert!(!is_descendant_or_self("0-1", "0-2-1"));
        assert!(!is_descendant_or_self("0-1", "0-10"));
        assert!(!is_descendant_or_self("", "0-1"));
        assert!(!is_descendant_or_self("0-1", ""));
    }

    #[test]
    fn test_sibling_or_self_on_strings() {
        assert!(is_sibling_or_self("0-1-2", "0-1-5"));
        assert!(is_sibling_or_self("0-1", "0-1"));
        assert!(!is_sibling_or_self("0-1-2", "0-2-2"));
        assert!(!is_sibling_or_self("0-1", "0-1-2"));
    }

    #[proptest(fork = false)]
    fn test_typed_and_string_checks_agree(
        #[strategy(vec(0..3u32, 1..5))] a: Vec<u32>,
        #[strategy(vec(0..3u32, 1..5))] b: Vec<u32>,
    ) {
        let a = Pos { segments: a };
        let b = Pos { segments: b };

        prop_assert_eq!(
            a.is_ancestor_or_self_of(&b),
            is_descendant_or_self(&a.to_string(), &b.to_string())
        );
        prop_assert_eq!(
            a.is_sibling_or_self_of(&b),
            is_sibling_or_self(&a.to_string(), &b.to_string())
        );
    }

    #[proptest(fork = false)]
    fn test_display_roundtrip(#[strategy(vec(any::<u32>(), 1..6))] segments: Vec<u32>) {
        let p = Pos { segments };
        prop_assert_eq!(p.to_string().parse::<Pos>()?, p);
    }

    #[proptest(fork = false)]
    fn test_every_ancestor_contains_the_position(
        #[strategy(vec(0..5u32, 1..6))] segments: Vec<u32>,
    ) {
        let p = Pos { segments };
        for ancestor in p.ancestors() {
            prop_assert!(ancestor.is_ancestor_or_self_of(&p));
            prop_assert!(ancestor.len() >= 2);
        }
    }
}

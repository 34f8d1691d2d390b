use std::collections::HashSet;
use std::hash::Hash;

use clitic_protocol::{ClausePosition, RelationToRegent};
use clitic_tree::TreeAccess;

use crate::clause::clause_nodes;
use crate::group::content_sequence;
use crate::policy::Policy;
use crate::predicate::ComplexPredicate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit<N> {
    /// The collapsed clitic group.
    Group,
    Token(N),
}

/// A clause's non-punctuation tokens with the clitic group folded into one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseUnits<N> {
    units: Vec<Unit<N>>,
    group_idx: Option<usize>,
}

impl<N: Copy + Eq + Hash> ClauseUnits<N> {
    /// `sequence` must already be punctuation-free and sorted by ord.
    pub fn build(sequence: &[N], group: &[N]) -> Self {
        let members: HashSet<N> = group.iter().copied().collect();
        let mut units = Vec::with_capacity(sequence.len());
        let mut group_idx = None;
        let mut in_group = false;

        for &node in sequence {
            if members.contains(&node) {
                if !in_group {
                    group_idx.get_or_insert(units.len());
                    units.push(Unit::Group);
                    in_group = true;
                }
            } else {
                units.push(Unit::Token(node));
                in_group = false;
            }
        }

        Self { units, group_idx }
    }

    pub fn units(&self) -> &[Unit<N>] {
        &self.units
    }

    pub fn group_index(&self) -> Option<usize> {
        self.group_idx
    }

    /// Index of the standalone unit holding `node`.
    pub fn index_of(&self, node: N) -> Option<usize> {
        self.units.iter().position(|u| *u == Unit::Token(node))
    }

    fn token_at(&self, idx: usize) -> Option<N> {
        match self.units.get(idx) {
            Some(Unit::Token(n)) => Some(*n),
            _ => None,
        }
    }

    fn is_token(&self, idx: usize, node: Option<N>) -> bool {
        node.is_some() && self.token_at(idx) == node
    }

    pub fn position(&self, predicate: Option<N>) -> Option<ClausePosition> {
        let idx = self.group_idx?;
        let len = self.units.len();

        let position = match idx {
            0 => ClausePosition::Initial,
            1 => ClausePosition::PostInitial,
            _ if idx + 1 == len && self.is_token(idx - 1, predicate) => ClausePosition::Final,
            _ if idx + 2 == len && self.is_token(idx + 1, predicate) => ClausePosition::PreFinal,
            _ => ClausePosition::Medial,
        };
        Some(position)
    }

    pub fn relation(&self, predicate: &ComplexPredicate<N>) -> Option<RelationToRegent> {
        let group_idx = self.group_idx?;
        let pred_idx = self.index_of(predicate.governor()?)?;

        if group_idx + 1 == pred_idx {
            return Some(RelationToRegent::ContactPreverbal);
        }
        if group_idx == pred_idx + 1 {
            return Some(RelationToRegent::ContactPostverbal);
        }

        let left = group_idx.checked_sub(1).and_then(|i| self.token_at(i));
        let right = self.token_at(group_idx + 1);
        if let (Some(left), Some(right)) = (left, right) {
            if predicate.contains(left) && predicate.contains(right) {
                return Some(RelationToRegent::ContactInterverbal);
            }
        }

        if group_idx < pred_idx {
            Some(RelationToRegent::Isolated)
        } else {
            Some(RelationToRegent::Other)
        }
    }
}

fn units_for<T: TreeAccess>(
    tree: &T,
    predicate: Option<T::Node>,
    group: &[T::Node],
    policy: &Policy,
) -> ClauseUnits<T::Node> {
    let clause = clause_nodes(tree, predicate, policy);
    ClauseUnits::build(&content_sequence(tree, &clause), group)
}

/// Where the clitic group sits among the units of the predicate's clause.
pub fn clause_position<T: TreeAccess>(
    tree: &T,
    predicate: &ComplexPredicate<T::Node>,
    group: &[T::Node],
    policy: &Policy,
) -> Option<ClausePosition> {
    units_for(tree, predicate.governor(), group, policy).position(predicate.governor())
}

/// How the clitic group is placed relative to its governing predicate.
pub fn relation_to_regent<T: TreeAccess>(
    tree: &T,
    predicate: &ComplexPredicate<T::Node>,
    group: &[T::Node],
    policy: &Policy,
) -> Option<RelationToRegent> {
    units_for(tree, predicate.governor(), group, policy).relation(predicate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_collapse_group() {
        let units = ClauseUnits::build(&[1, 2, 3, 4, 5], &[2, 3]);
        assert_eq!(units.units(), &[Unit::Token(1), Unit::Group, Unit::Token(4), Unit::Token(5)]);
        assert_eq!(units.group_index(), Some(1));
        assert_eq!(units.index_of(4), Some(2));
        assert_eq!(units.index_of(2), None);
    }

    #[test]
    fn test_missing_group_is_not_applicable() {
        let units = ClauseUnits::build(&[1, 2, 3], &[9]);
        assert_eq!(units.group_index(), None);
        assert_eq!(units.position(Some(1)), None);
    }

    #[test]
    fn test_final_needs_predicate_before_group() {
        assert_eq!(ClauseUnits::build(&[1, 2, 3, 4], &[4]).position(Some(3)), Some(ClausePosition::Final));
        assert_eq!(ClauseUnits::build(&[1, 2, 3, 4], &[4]).position(Some(1)), Some(ClausePosition::Medial));
        assert_eq!(ClauseUnits::build(&[1, 2, 3, 4], &[3]).position(Some(4)), Some(ClausePosition::PreFinal));
        assert_eq!(ClauseUnits::build(&[1, 2, 3, 4], &[3]).position(None), Some(ClausePosition::Medial));
    }
}

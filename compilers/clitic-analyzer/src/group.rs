use clitic_tree::TreeAccess;

use crate::clause::clause_nodes;
use crate::policy::{Policy, PUNCT};

/// Drops punctuation from an ord-sorted clause.
pub fn content_sequence<T: TreeAccess>(tree: &T, clause: &[T::Node]) -> Vec<T::Node> {
    clause.iter().copied().filter(|&n| tree.upos(n) != PUNCT).collect()
}

/// The run of clitics around `target` within `sequence`.
///
/// Falls back to `[target]` when the target is not part of the sequence.
pub fn group_in_sequence<T: TreeAccess>(
    tree: &T,
    sequence: &[T::Node],
    target: T::Node,
    policy: &Policy,
) -> Vec<T::Node> {
    let Some(pos) = sequence.iter().position(|&n| n == target) else {
        return vec![target];
    };
    let is_clitic = |n: T::Node| policy.is_clitic(tree.form(n), tree.upos(n));

    let mut start = pos;
    while start > 0 && is_clitic(sequence[start - 1]) {
        start -= 1;
    }
    let mut end = pos;
    while end + 1 < sequence.len() && is_clitic(sequence[end + 1]) {
        end += 1;
    }

    sequence[start..=end].to_vec()
}

/// Clitic group of `target` inside the clause of `predicate`, sorted by ord.
pub fn clitic_group<T: TreeAccess>(
    tree: &T,
    target: T::Node,
    predicate: Option<T::Node>,
    policy: &Policy,
) -> Vec<T::Node> {
    let clause = clause_nodes(tree, predicate, policy);
    let sequence = content_sequence(tree, &clause);
    group_in_sequence(tree, &sequence, target, policy)
}

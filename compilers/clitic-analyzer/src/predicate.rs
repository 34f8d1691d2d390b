use std::collections::HashSet;

use clitic_tree::TreeAccess;

use crate::policy::{Policy, XCOMP};

/// The verb cluster governing a clitic: governor, its auxiliaries/copulas and,
/// through an `xcomp` chain, every modal or phase verb above it together with
/// their own auxiliaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexPredicate<N> {
    governor: Option<N>,
    /// Sorted by ord, no duplicates.
    members: Vec<N>,
}

impl<N: Copy + Eq + std::hash::Hash> ComplexPredicate<N> {
    /// `governor` is the clitic's parent. A missing governor or the virtual
    /// root yields an empty predicate.
    pub fn resolve<T>(tree: &T, governor: Option<N>, policy: &Policy) -> Self
    where
        T: TreeAccess<Node = N>,
    {
        let Some(governor) = governor.filter(|g| !tree.is_root(*g)) else {
            return Self { governor: None, members: Vec::new() };
        };

        let mut members = Vec::new();
        let mut seen = HashSet::new();
        collect_verb(tree, governor, policy, &mut members, &mut seen);

        if policy.follows_xcomp_chain() {
            let mut visited = HashSet::from([governor]);
            let mut node = governor;
            while tree.base_relation(node) == XCOMP {
                let Some(head) = tree.real_parent(node) else { break };
                if !visited.insert(head) {
                    log::trace!("xcomp chain revisits ord {}, stopping", tree.ord(head));
                    break;
                }
                collect_verb(tree, head, policy, &mut members, &mut seen);
                node = head;
            }
        }

        members.sort_by_key(|&n| tree.ord(n));
        Self { governor: Some(governor), members }
    }

    /// The clitic's direct governor, unless it was missing or the root.
    pub fn governor(&self) -> Option<N> {
        self.governor
    }

    pub fn members(&self) -> &[N] {
        &self.members
    }

    pub fn contains(&self, node: N) -> bool {
        self.members.contains(&node)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member forms in reading order, space-joined.
    pub fn form<T>(&self, tree: &T) -> Option<String>
    where
        T: TreeAccess<Node = N>,
    {
        if self.is_empty() {
            return None;
        }
        let forms: Vec<&str> = self.members.iter().map(|&n| tree.form(n)).collect();
        Some(forms.join(" "))
    }
}

fn collect_verb<T: TreeAccess>(
    tree: &T,
    verb: T::Node,
    policy: &Policy,
    members: &mut Vec<T::Node>,
    seen: &mut HashSet<T::Node>,
) {
    if seen.insert(verb) {
        members.push(verb);
    }
    for child in tree.children(verb) {
        if policy.joins_predicate(tree.base_relation(child)) && seen.insert(child) {
            members.push(child);
        }
    }
}

/// Surface form of the complex predicate governed by `governor`.
pub fn predicate_form<T: TreeAccess>(tree: &T, governor: Option<T::Node>, policy: &Policy) -> Option<String> {
    ComplexPredicate::resolve(tree, governor, policy).form(tree)
}

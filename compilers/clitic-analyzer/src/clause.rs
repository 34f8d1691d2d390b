use std::collections::HashSet;

use clitic_protocol::ClauseType;
use clitic_tree::TreeAccess;

use crate::policy::{Policy, ROOT, XCOMP};

/// Main (`HV`) or dependent (`VV`) clause membership of a predicate.
///
/// Walks up from the predicate until a `root` relation, a subordinating
/// relation or the top of the tree is met. `xcomp` links are passed through
/// while the policy keeps them transparent. A parent cycle ends the walk with
/// `HV`.
pub fn clause_type<T: TreeAccess>(tree: &T, predicate: Option<T::Node>, policy: &Policy) -> Option<ClauseType> {
    let predicate = predicate.filter(|p| !tree.is_root(*p))?;

    let mut visited = HashSet::new();
    let mut node = predicate;
    loop {
        if !visited.insert(node) {
            log::debug!("parent cycle above ord {}, assuming main clause", tree.ord(predicate));
            return Some(ClauseType::Main);
        }

        let relation = tree.base_relation(node);
        if relation == ROOT {
            return Some(ClauseType::Main);
        }
        if policy.is_subordinating(relation) {
            return Some(ClauseType::Dependent);
        }

        match tree.real_parent(node) {
            Some(parent) => node = parent,
            None => return Some(ClauseType::Main),
        }
    }
}

/// Topmost node of the predicate's clause: climbs `xcomp` links as long as
/// they lead to a real, not yet visited parent.
pub fn clause_root<T: TreeAccess>(tree: &T, predicate: Option<T::Node>, policy: &Policy) -> Option<T::Node> {
    let predicate = predicate.filter(|p| !tree.is_root(*p))?;
    if !policy.xcomp_transparent {
        return Some(predicate);
    }

    let mut visited = HashSet::from([predicate]);
    let mut node = predicate;
    while tree.base_relation(node) == XCOMP {
        let Some(head) = tree.real_parent(node) else { break };
        if !visited.insert(head) {
            break;
        }
        node = head;
    }
    Some(node)
}

/// `root` and all its transitive dependents, sorted by ord.
pub fn subtree<T: TreeAccess>(tree: &T, root: T::Node) -> Vec<T::Node> {
    let mut visited = HashSet::from([root]);
    let mut stack = vec![root];
    let mut nodes = Vec::new();

    while let Some(node) = stack.pop() {
        nodes.push(node);
        for child in tree.children(node) {
            if visited.insert(child) {
                stack.push(child);
            }
        }
    }

    nodes.sort_by_key(|&n| tree.ord(n));
    nodes
}

/// Every token of the predicate's clause in reading order (punctuation included).
pub fn clause_nodes<T: TreeAccess>(tree: &T, predicate: Option<T::Node>, policy: &Policy) -> Vec<T::Node> {
    match clause_root(tree, predicate, policy) {
        Some(root) => subtree(tree, root),
        None => Vec::new(),
    }
}

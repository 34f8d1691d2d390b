use petgraph::algo::tarjan_scc;
use thiserror::Error;

use crate::SentenceTree;

/// Something structurally odd about a tree that still allows analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityIssue {
    #[error("parent links form a cycle through tokens {ords:?}")]
    ParentCycle { ords: Vec<u32> },
    #[error("token {ord} has no head")]
    MissingHead { ord: u32 },
    #[error("{count} tokens attach to the virtual root (expected 1)")]
    RootCount { count: usize },
}

pub fn check_integrity(tree: &SentenceTree) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    issues.extend(check_cycles(tree));
    issues.extend(check_heads(tree));

    issues
}

fn check_cycles(tree: &SentenceTree) -> Vec<IntegrityIssue> {
    let graph = tree.graph();
    let mut cycles: Vec<Vec<u32>> = Vec::new();

    // Every token has at most one head, so any strongly connected component
    // with more than one member (or a self-loop) is a parent cycle.
    for component in tarjan_scc(graph) {
        let is_cycle = component.len() > 1
            || component.iter().any(|&n| graph.contains_edge(n, n));
        if is_cycle {
            let mut ords: Vec<u32> = component.iter().map(|&n| graph[n].ord.0).collect();
            ords.sort_unstable();
            cycles.push(ords);
        }
    }

    cycles.sort();
    cycles.into_iter().map(|ords| IntegrityIssue::ParentCycle { ords }).collect()
}

fn check_heads(tree: &SentenceTree) -> Vec<IntegrityIssue> {
    let graph = tree.graph();
    let mut issues = Vec::new();

    let mut attached_to_root = 0;
    for node in tree.token_indices() {
        match tree.head_of(node) {
            None => issues.push(IntegrityIssue::MissingHead { ord: graph[node].ord.0 }),
            Some(head) if head == tree.root_index() => attached_to_root += 1,
            Some(_) => {}
        }
    }

    if attached_to_root != 1 {
        issues.push(IntegrityIssue::RootCount { count: attached_to_root });
    }
    issues
}

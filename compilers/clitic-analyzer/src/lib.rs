pub mod clause;
pub mod group;
pub mod policy;
pub mod position;
pub mod predicate;

use clitic_protocol::{CliticRecord, TokenId};
use clitic_tree::TreeAccess;

pub use clause::{clause_nodes, clause_root, clause_type, subtree};
pub use group::{clitic_group, content_sequence, group_in_sequence};
pub use policy::{Policy, PolicyError};
pub use position::{clause_position, relation_to_regent, ClauseUnits, Unit};
pub use predicate::{predicate_form, ComplexPredicate};

/// Extracts clitic features from parsed sentences.
#[derive(Debug, Clone, Default)]
pub struct CliticAnalyzer {
    policy: Policy,
}

impl CliticAnalyzer {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn qualifies<T: TreeAccess>(&self, tree: &T, node: T::Node) -> bool {
        !tree.is_root(node) && self.policy.is_target(tree.form(node), tree.upos(node))
    }

    /// One record per qualifying clitic, in sentence order.
    pub fn analyze<T: TreeAccess>(&self, tree: &T) -> Vec<CliticRecord> {
        tree.nodes()
            .into_iter()
            .filter_map(|node| self.analyze_node(tree, node))
            .collect()
    }

    /// Features of a single token, or `None` if it is not a qualifying clitic.
    pub fn analyze_node<T: TreeAccess>(&self, tree: &T, node: T::Node) -> Option<CliticRecord> {
        if !self.qualifies(tree, node) {
            return None;
        }
        let policy = &self.policy;
        let governor = tree.parent(node);

        // Resolved once; feeds both the predicate column and the interverbal test.
        let predicate = ComplexPredicate::resolve(tree, governor, policy);

        let clause = clause_nodes(tree, predicate.governor(), policy);
        let sequence = content_sequence(tree, &clause);
        let group = group_in_sequence(tree, &sequence, node, policy);
        let units = ClauseUnits::build(&sequence, &group);

        let record = CliticRecord {
            sent_id: tree.sent_id().unwrap_or_default().to_string(),
            ord: TokenId(tree.ord(node)),
            predicate_form: predicate.form(tree),
            clause_type: clause_type(tree, predicate.governor(), policy),
            clause_position: units.position(predicate.governor()),
            relation_to_regent: units.relation(&predicate),
            sentence_text: tree.sentence_text().to_string(),
        };

        log::debug!(
            "{} ord {}: group of {} in {} clause units -> {}",
            record.sent_id,
            record.ord,
            group.len(),
            units.units().len(),
            record.to_tsv_row()
        );
        Some(record)
    }
}

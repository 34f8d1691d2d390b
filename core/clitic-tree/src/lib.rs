pub mod access;
pub mod components;
pub mod integrity;

use std::collections::HashMap;

use clitic_protocol::{SentenceRecord, TokenId};
use petgraph::graph::{EdgeIndex, Graph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use thiserror::Error;

pub use access::{base_relation, TreeAccess};
pub use petgraph::graph::NodeIndex;
pub use components::TokenData;
pub use integrity::{check_integrity, IntegrityIssue};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("token {ord}: head {head} does not exist in the sentence")]
    DanglingHead { ord: u32, head: u32 },
    #[error("token id {0} appears more than once")]
    DuplicateId(u32),
    #[error("token id 0 is reserved for the virtual root")]
    ReservedId,
}

/// One dependency-parsed sentence. Edges run head -> dependent.
///
/// Nothing stops callers from wiring parent cycles; the analyzer is expected
/// to cope with them and [`SentenceTree::check_integrity`] reports them.
#[derive(Debug)]
pub struct SentenceTree {
    graph: Graph<TokenData, (), Directed>,
    root: NodeIndex,
    index_map: HashMap<TokenId, NodeIndex>,
    sent_id: Option<String>,
    text: String,
}

impl SentenceTree {
    pub fn new(sent_id: Option<String>, text: String) -> Self {
        let mut graph = Graph::new();
        let root = graph.add_node(TokenData::virtual_root());
        let mut index_map = HashMap::new();
        index_map.insert(TokenId::ROOT, root);

        Self { graph, root, index_map, sent_id, text }
    }

    /// Builds the tree of a parsed CoNLL-U sentence.
    pub fn from_record(record: &SentenceRecord) -> Result<Self, TreeError> {
        let mut tree = Self::new(record.sent_id.clone(), record.surface_text());

        for row in &record.tokens {
            if row.id.is_root() {
                return Err(TreeError::ReservedId);
            }
            if tree.index_map.contains_key(&row.id) {
                return Err(TreeError::DuplicateId(row.id.0));
            }
            tree.add_token(TokenData::from(row));
        }

        for row in &record.tokens {
            let Some(head) = row.head else {
                log::trace!("token {} has no head, left unattached", row.id);
                continue;
            };
            let head_idx = tree
                .index_of(head)
                .ok_or(TreeError::DanglingHead { ord: row.id.0, head: head.0 })?;
            let child_idx = tree.index_map[&row.id];
            tree.set_dependency(child_idx, head_idx);
        }

        Ok(tree)
    }

    /// Add a word to the sentence (unattached until [`Self::set_dependency`]).
    pub fn add_token(&mut self, data: TokenData) -> NodeIndex {
        let ord = data.ord;
        let idx = self.graph.add_node(data);
        self.index_map.insert(ord, idx);
        idx
    }

    /// Makes `head` the parent of `child`, replacing any previous head.
    pub fn set_dependency(&mut self, child: NodeIndex, head: NodeIndex) {
        let mut old: Vec<EdgeIndex> = self
            .graph
            .edges_directed(child, Direction::Incoming)
            .map(|e| e.id())
            .collect();
        // Graph::remove_edge swaps the last edge into the hole, so go from the top.
        old.sort_unstable_by(|a, b| b.cmp(a));
        for edge in old {
            self.graph.remove_edge(edge);
        }
        self.graph.add_edge(head, child, ());
    }

    pub fn index_of(&self, ord: TokenId) -> Option<NodeIndex> {
        self.index_map.get(&ord).copied()
    }

    pub fn token(&self, node: NodeIndex) -> &TokenData {
        &self.graph[node]
    }

    pub fn root_index(&self) -> NodeIndex {
        self.root
    }

    pub fn head_of(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.graph.neighbors_directed(node, Direction::Incoming).next()
    }

    /// Real tokens in insertion order.
    pub fn token_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices().filter(move |&n| n != self.root)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn check_integrity(&self) -> Vec<IntegrityIssue> {
        check_integrity(self)
    }

    pub(crate) fn graph(&self) -> &Graph<TokenData, (), Directed> {
        &self.graph
    }
}

impl TreeAccess for SentenceTree {
    type Node = NodeIndex;

    fn root(&self) -> NodeIndex {
        self.root
    }

    fn ord(&self, node: NodeIndex) -> u32 {
        self.token(node).ord.0
    }

    fn form(&self, node: NodeIndex) -> &str {
        &self.token(node).form
    }

    fn upos(&self, node: NodeIndex) -> &str {
        &self.token(node).upos
    }

    fn deprel(&self, node: NodeIndex) -> &str {
        &self.token(node).deprel
    }

    fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.head_of(node)
    }

    fn children(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.graph.neighbors_directed(node, Direction::Outgoing).collect()
    }

    fn nodes(&self) -> Vec<NodeIndex> {
        let mut nodes: Vec<NodeIndex> = self.token_indices().collect();
        nodes.sort_by_key(|&n| self.graph[n].ord);
        nodes
    }

    fn sent_id(&self) -> Option<&str> {
        self.sent_id.as_deref()
    }

    fn sentence_text(&self) -> &str {
        &self.text
    }
}

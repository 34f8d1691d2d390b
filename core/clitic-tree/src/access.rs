use std::fmt::Debug;
use std::hash::Hash;

/// Strips a `:subtype` suffix: `aux:pass` -> `aux`, `expl:pv` -> `expl`.
pub fn base_relation(deprel: &str) -> &str {
    match deprel.split_once(':') {
        Some((base, _)) => base,
        None => deprel,
    }
}

/// Read-only view of one parsed sentence.
///
/// The analyzer only ever talks to a tree through this trait, so any
/// representation that can answer these questions (including a malformed one
/// whose parent links form a cycle) can be analyzed.
pub trait TreeAccess {
    type Node: Copy + Eq + Hash + Debug;

    /// The virtual root (ord 0).
    fn root(&self) -> Self::Node;

    fn is_root(&self, node: Self::Node) -> bool {
        node == self.root()
    }

    fn ord(&self, node: Self::Node) -> u32;
    fn form(&self, node: Self::Node) -> &str;
    fn upos(&self, node: Self::Node) -> &str;
    fn deprel(&self, node: Self::Node) -> &str;

    /// `None` for the virtual root and for tokens whose HEAD was `_`.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Direct dependents, in no particular order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Every real token (root excluded), sorted by ord.
    fn nodes(&self) -> Vec<Self::Node>;

    fn sent_id(&self) -> Option<&str>;
    fn sentence_text(&self) -> &str;

    fn base_relation(&self, node: Self::Node) -> &str {
        base_relation(self.deprel(node))
    }

    /// Parent, unless it is missing or the virtual root.
    fn real_parent(&self, node: Self::Node) -> Option<Self::Node> {
        self.parent(node).filter(|p| !self.is_root(*p))
    }
}

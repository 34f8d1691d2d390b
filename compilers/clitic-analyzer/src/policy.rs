use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ROOT: &str = "root";
pub const XCOMP: &str = "xcomp";
pub const PUNCT: &str = "PUNCT";
const ADP: &str = "ADP";
/// The only clitic form that doubles as a preposition.
const PREPOSITION_SE: &str = "se";

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid policy file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("policy field '{0}' must not be empty")]
    Empty(&'static str),
}

/// Rule set of the analyzer.
///
/// The defaults treat `xcomp` as transparent and collect the whole `xcomp`
/// chain into the complex predicate. Setting `xcomp_transparent` to `false`
/// turns `xcomp` into a clause boundary instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Policy {
    /// Lowercased forms that get a feature row.
    pub target_forms: BTreeSet<String>,
    /// Lowercased forms that join a clitic group.
    pub clitic_forms: BTreeSet<String>,
    /// Base relations that open a dependent clause.
    pub subordinating_relations: BTreeSet<String>,
    /// Base relations of children folded into the predicate.
    pub predicate_relations: BTreeSet<String>,
    pub xcomp_transparent: bool,
    pub collect_xcomp_chain: bool,
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            target_forms: set(&["se", "si"]),
            clitic_forms: set(&["se", "mu", "ho", "bych", "jsem"]),
            subordinating_relations: set(&["ccomp", "advcl", "acl", "csubj"]),
            predicate_relations: set(&["aux", "cop"]),
            xcomp_transparent: true,
            collect_xcomp_chain: true,
        }
    }
}

impl Policy {
    /// Parse a JSON policy; missing fields keep their defaults.
    pub fn from_json(input: &str) -> Result<Self, PolicyError> {
        let mut policy: Policy = serde_json::from_str(input)?;
        policy.target_forms = lowercase(&policy.target_forms);
        policy.clitic_forms = lowercase(&policy.clitic_forms);

        if policy.target_forms.is_empty() {
            return Err(PolicyError::Empty("target_forms"));
        }
        Ok(policy)
    }

    /// A token gets a row when its form is a target and it is not a preposition.
    pub fn is_target(&self, form: &str, upos: &str) -> bool {
        upos != ADP && self.target_forms.contains(&form.to_lowercase())
    }

    pub fn is_clitic(&self, form: &str, upos: &str) -> bool {
        let form = form.to_lowercase();
        if form == PREPOSITION_SE && upos == ADP {
            return false;
        }
        self.clitic_forms.contains(&form)
    }

    pub fn is_subordinating(&self, base_relation: &str) -> bool {
        if base_relation == XCOMP {
            return !self.xcomp_transparent;
        }
        self.subordinating_relations.contains(base_relation)
    }

    pub fn joins_predicate(&self, base_relation: &str) -> bool {
        self.predicate_relations.contains(base_relation)
    }

    pub fn follows_xcomp_chain(&self) -> bool {
        self.xcomp_transparent && self.collect_xcomp_chain
    }
}

fn lowercase(forms: &BTreeSet<String>) -> BTreeSet<String> {
    forms.iter().map(|f| f.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = Policy::default();
        assert!(policy.is_target("Se", "PRON"));
        assert!(policy.is_target("si", "PRON"));
        assert!(!policy.is_target("se", "ADP"));
        assert!(policy.is_clitic("Jsem", "AUX"));
        assert!(!policy.is_clitic("se", "ADP"));
        assert!(!policy.is_clitic("mi", "PRON"));
        assert!(policy.is_subordinating("advcl"));
        assert!(!policy.is_subordinating("xcomp"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let policy = Policy::from_json(r#"{ "clitic_forms": ["SE", "Mi", "ho"], "xcomp_transparent": false }"#)
            .unwrap();

        assert!(policy.is_clitic("mi", "PRON"));
        assert!(!policy.is_clitic("jsem", "AUX"));
        assert!(policy.is_subordinating("xcomp"));
        assert!(!policy.follows_xcomp_chain());
        assert_eq!(policy.target_forms, Policy::default().target_forms);
    }

    #[test]
    fn test_rejects_bad_policies() {
        assert!(matches!(Policy::from_json(r#"{ "target_forms": [] }"#), Err(PolicyError::Empty(_))));
        assert!(matches!(Policy::from_json(r#"{ "clitics": [] }"#), Err(PolicyError::Json(_))));
    }
}

use clitic_protocol::{TokenId, TokenRow};

/// Per-node payload of a [`crate::SentenceTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    pub ord: TokenId,
    pub form: String,
    pub upos: String,
    pub deprel: String,
}

impl TokenData {
    pub fn new(ord: u32, form: &str, upos: &str, deprel: &str) -> Self {
        Self {
            ord: TokenId(ord),
            form: form.to_string(),
            upos: upos.to_string(),
            deprel: deprel.to_string(),
        }
    }

    /// Placeholder carried by the virtual root.
    pub fn virtual_root() -> Self {
        Self {
            ord: TokenId::ROOT,
            form: "<root>".to_string(),
            upos: "_".to_string(),
            deprel: String::new(),
        }
    }
}

impl From<&TokenRow> for TokenData {
    fn from(row: &TokenRow) -> Self {
        Self {
            ord: row.id,
            form: row.form.clone(),
            upos: row.upos.clone(),
            deprel: row.deprel.clone(),
        }
    }
}

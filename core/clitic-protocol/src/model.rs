use rkyv::{Archive, Deserialize, Serialize};
use crate::ids::{SentenceId, TokenId};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Bumped whenever the archived layout of [`Treebank`] changes.
pub const TREEBANK_VERSION: u32 = 2;

/// One word line of a CoNLL-U sentence. Unused columns are kept verbatim (`_` included).
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct TokenRow {
    pub id: TokenId,
    pub form: String,
    pub lemma: String,
    pub upos: String,
    pub xpos: String,
    pub feats: String,
    /// `None` when the HEAD column is `_`.
    pub head: Option<TokenId>,
    pub deprel: String,
    pub deps: String,
    pub misc: String,
}

impl TokenRow {
    /// `false` only when MISC carries `SpaceAfter=No`.
    pub fn space_after(&self) -> bool {
        !self.misc.split('|').any(|item| item == "SpaceAfter=No")
    }
}

/// A multiword token line (`2-3 abych`): the surface form covering words `first..=last`.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct MultiwordToken {
    pub first: TokenId,
    pub last: TokenId,
    pub form: String,
    pub misc: String,
}

impl MultiwordToken {
    pub fn space_after(&self) -> bool {
        !self.misc.split('|').any(|item| item == "SpaceAfter=No")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SentenceRecord {
    pub id: SentenceId,
    pub sent_id: Option<String>,
    pub text: Option<String>,
    pub tokens: Vec<TokenRow>,
    /// Surface tokens spanning several words; they never enter the tree.
    pub multiwords: Vec<MultiwordToken>,
}

impl SentenceRecord {
    /// The `# text` comment if present, otherwise the surface forms glued back
    /// together. A multiword token replaces the words it spans.
    pub fn surface_text(&self) -> String {
        if let Some(text) = &self.text {
            return text.clone();
        }

        let mut pieces: Vec<(&str, bool)> = Vec::with_capacity(self.tokens.len());
        let mut covered_until = None;
        for token in &self.tokens {
            if covered_until.map_or(false, |last| token.id <= last) {
                continue;
            }
            match self.multiwords.iter().find(|mw| mw.first == token.id) {
                Some(mw) => {
                    pieces.push((mw.form.as_str(), mw.space_after()));
                    covered_until = Some(mw.last);
                }
                None => pieces.push((token.form.as_str(), token.space_after())),
            }
        }

        let mut out = String::new();
        for (i, (form, space_after)) in pieces.iter().enumerate() {
            out.push_str(form);
            if *space_after && i + 1 < pieces.len() {
                out.push(' ');
            }
        }
        out
    }
}

/// A whole corpus, as stored by `treebank-compiler`.
#[derive(Debug, Clone, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Treebank {
    pub version: u32,
    pub sentences: Vec<SentenceRecord>,
}

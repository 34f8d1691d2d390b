use clitic_protocol::{MultiwordToken, TokenId, TokenRow};

/// Value of the CoNLL-U ID column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordId {
    /// A syntactic word: `7`
    Single(u32),
    /// A multiword token spanning words: `3-4`
    Range(u32, u32),
    /// An enhanced-graph empty node: `5.1`
    Empty(u32, u32),
}

/// One classified line of a CoNLL-U file.
#[derive(Debug, Clone, PartialEq)]
pub enum Line<'a> {
    Blank,
    /// `# key = value`
    Metadata { key: &'a str, value: &'a str },
    /// A comment without `=`
    Comment(&'a str),
    Word(TokenRow),
    /// Kept only for the surface text.
    Multiword(MultiwordToken),
    /// Empty nodes never reach the tree.
    Skipped(WordId),
}

pub(crate) fn word_row(id: u32, fields: &[&str], head: Option<TokenId>) -> TokenRow {
    TokenRow {
        id: TokenId(id),
        form: fields[1].to_string(),
        lemma: fields[2].to_string(),
        upos: fields[3].to_string(),
        xpos: fields[4].to_string(),
        feats: fields[5].to_string(),
        head,
        deprel: fields[7].to_string(),
        deps: fields[8].to_string(),
        misc: fields[9].to_string(),
    }
}

pub(crate) fn multiword(first: u32, last: u32, fields: &[&str]) -> MultiwordToken {
    MultiwordToken {
        first: TokenId(first),
        last: TokenId(last),
        form: fields[1].to_string(),
        misc: fields[9].to_string(),
    }
}

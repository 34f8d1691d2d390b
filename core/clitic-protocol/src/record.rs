use alloc::string::String;

use crate::ids::TokenId;
use crate::labels::{or_not_applicable, ClausePosition, ClauseType, RelationToRegent, NOT_APPLICABLE};

#[cfg(feature = "serde")]
use serde::Serialize as SerdeSerialize;

/// Column order of the feature table.
pub const TSV_HEADER: &str =
    "sent_id\tord\tpredicate_form\tclause_type\tclause_position\trelation_to_regent";

/// Features of one qualifying clitic token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeSerialize))]
pub struct CliticRecord {
    pub sent_id: String,
    pub ord: TokenId,
    pub predicate_form: Option<String>,
    pub clause_type: Option<ClauseType>,
    pub clause_position: Option<ClausePosition>,
    pub relation_to_regent: Option<RelationToRegent>,
    /// Companion line for human inspection; not part of the TSV row.
    pub sentence_text: String,
}

impl CliticRecord {
    /// One TSV data line, without the trailing newline.
    pub fn to_tsv_row(&self) -> String {
        let predicate = match &self.predicate_form {
            Some(form) => form.as_str(),
            None => NOT_APPLICABLE,
        };
        let sent_id = if self.sent_id.is_empty() { NOT_APPLICABLE } else { self.sent_id.as_str() };

        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            sent_id,
            self.ord,
            predicate,
            or_not_applicable(self.clause_type),
            or_not_applicable(self.clause_position),
            or_not_applicable(self.relation_to_regent),
        )
    }
}

#![no_std] // Shared by the WASM build

#[macro_use]
extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod labels;
pub mod model;
pub mod record;

pub use ids::{SentenceId, TokenId};
pub use labels::{ClausePosition, ClauseType, LabelError, RelationToRegent, NOT_APPLICABLE};
pub use model::*;
pub use record::{CliticRecord, TSV_HEADER};

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use rkyv::{from_bytes, to_bytes};

    fn row(id: u32, form: &str, head: Option<u32>, deprel: &str, misc: &str) -> TokenRow {
        TokenRow {
            id: TokenId(id),
            form: form.to_string(),
            lemma: "_".to_string(),
            upos: "X".to_string(),
            xpos: "_".to_string(),
            feats: "_".to_string(),
            head: head.map(TokenId),
            deprel: deprel.to_string(),
            deps: "_".to_string(),
            misc: misc.to_string(),
        }
    }

    #[test]
    fn test_treebank_archive() {
        let original = Treebank {
            version: TREEBANK_VERSION,
            sentences: vec![SentenceRecord {
                id: SentenceId(1),
                sent_id: Some("s1".to_string()),
                text: None,
                tokens: vec![row(1, "Směje", Some(0), "root", "_"), row(2, "se", Some(1), "expl:pv", "_")],
                multiwords: Vec::new(),
            }],
        };

        let bytes = to_bytes::<_, 256>(&original).expect("Failed to serialize Treebank");
        let restored: Treebank = from_bytes(&bytes).expect("Failed to deserialize Treebank");

        assert_eq!(restored.version, TREEBANK_VERSION);
        assert_eq!(restored.sentences, original.sentences);
    }

    #[test]
    fn test_surface_text_honours_space_after() {
        let sentence = SentenceRecord {
            id: SentenceId(1),
            sent_id: None,
            text: None,
            tokens: vec![
                row(1, "Četl", Some(0), "root", "_"),
                row(2, "ho", Some(1), "obj", "_"),
                row(3, "se", Some(1), "expl:pv", "SpaceAfter=No"),
                row(4, ".", Some(1), "punct", "SpaceAfter=No"),
            ],
            multiwords: Vec::new(),
        };
        assert_eq!(sentence.surface_text(), "Četl ho se.");

        let with_comment = SentenceRecord { text: Some("Četl ho se .".to_string()), ..sentence };
        assert_eq!(with_comment.surface_text(), "Četl ho se .");
    }

    #[test]
    fn test_surface_text_uses_multiword_forms() {
        let sentence = SentenceRecord {
            id: SentenceId(1),
            sent_id: None,
            text: None,
            tokens: vec![
                row(1, "Musí", Some(0), "root", "_"),
                row(2, "aby", Some(4), "mark", "_"),
                row(3, "bych", Some(4), "aux", "_"),
                row(4, "smál", Some(1), "ccomp", "SpaceAfter=No"),
                row(5, ".", Some(1), "punct", "_"),
            ],
            multiwords: vec![MultiwordToken {
                first: TokenId(2),
                last: TokenId(3),
                form: "abych".to_string(),
                misc: "_".to_string(),
            }],
        };
        assert_eq!(sentence.surface_text(), "Musí abych smál.");
    }

    #[test]
    fn test_labels_parse_their_own_rendering() {
        for position in ClausePosition::ALL {
            assert_eq!(position.as_str().parse::<ClausePosition>(), Ok(*position));
        }
        assert_eq!("VV".parse::<ClauseType>(), Ok(ClauseType::Dependent));
        assert!("kontaktní".parse::<RelationToRegent>().is_err());
    }

    #[test]
    fn test_record_row_uses_placeholders() {
        let record = CliticRecord {
            sent_id: String::new(),
            ord: TokenId(3),
            predicate_form: None,
            clause_type: None,
            clause_position: Some(ClausePosition::PostInitial),
            relation_to_regent: None,
            sentence_text: String::new(),
        };
        let row = record.to_tsv_row();
        let cols: Vec<&str> = row.split('\t').collect();

        assert_eq!(cols, ["_", "3", "_", "_", "postiniciální", "_"]);
        assert_eq!(TSV_HEADER.split('\t').count(), cols.len());
    }

    #[test]
    fn test_id_layout() {
        assert_eq!(core::mem::size_of::<TokenId>(), 4);
        assert!(TokenId::ROOT.is_root());
    }
}

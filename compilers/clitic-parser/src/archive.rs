use clitic_protocol::{Treebank, TREEBANK_VERSION};
use rkyv::{AlignedVec, Deserialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to serialize treebank: {0}")]
    Serialize(String),
    #[error("invalid treebank archive: {0}")]
    Invalid(String),
    #[error("treebank archive version {found} is not supported (expected {expected})")]
    Version { found: u32, expected: u32 },
}

/// Serialize a treebank into its binary form.
pub fn write_archive(treebank: &Treebank) -> Result<AlignedVec, ArchiveError> {
    rkyv::to_bytes::<_, 4096>(treebank).map_err(|e| ArchiveError::Serialize(e.to_string()))
}

/// Validate and load a treebank written by [`write_archive`].
///
/// `bytes` may come straight from `fs::read`; they are copied into an
/// aligned buffer before validation.
pub fn read_archive(bytes: &[u8]) -> Result<Treebank, ArchiveError> {
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);

    let archived = rkyv::check_archived_root::<Treebank>(&aligned[..])
        .map_err(|e| ArchiveError::Invalid(e.to_string()))?;
    let treebank: Treebank = archived
        .deserialize(&mut rkyv::Infallible)
        .unwrap_or_else(|never| match never {});

    if treebank.version != TREEBANK_VERSION {
        return Err(ArchiveError::Version { found: treebank.version, expected: TREEBANK_VERSION });
    }
    Ok(treebank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_str;

    #[test]
    fn test_archive_keeps_sentences() {
        let sentences = parse_str("# sent_id = a\n1\tSměje\tsmát\tVERB\t_\t_\t0\troot\t_\t_\n2\tse\tse\tPRON\t_\t_\t1\texpl:pv\t_\t_\n")
            .unwrap();
        let treebank = Treebank { version: TREEBANK_VERSION, sentences };

        let bytes = write_archive(&treebank).unwrap();
        let restored = read_archive(&bytes).unwrap();

        assert_eq!(restored.sentences, treebank.sentences);
    }

    #[test]
    fn test_rejects_garbage_and_old_versions() {
        assert!(matches!(read_archive(b"not an archive"), Err(ArchiveError::Invalid(_))));

        let old = Treebank { version: TREEBANK_VERSION + 1, sentences: Vec::new() };
        let bytes = write_archive(&old).unwrap();
        assert!(matches!(read_archive(&bytes), Err(ArchiveError::Version { .. })));
    }
}

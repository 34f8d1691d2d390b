pub mod archive;
pub mod parser;
pub mod token;

use std::io::BufRead;

use clitic_protocol::{SentenceId, SentenceRecord};
use thiserror::Error;

use crate::parser::{parse_line, LineError, COLUMN_COUNT};
use crate::token::Line;

pub use archive::{read_archive, write_archive, ArchiveError};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: expected {expected} tab-separated columns, found {found}")]
    ColumnCount { line: usize, expected: usize, found: usize },
    #[error("line {line}: invalid ID '{value}'")]
    InvalidId { line: usize, value: String },
    #[error("line {line}: invalid HEAD '{value}'")]
    InvalidHead { line: usize, value: String },
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    fn at(line: usize, err: LineError) -> Self {
        match err {
            LineError::ColumnCount(found) => ParseError::ColumnCount { line, expected: COLUMN_COUNT, found },
            LineError::BadId(value) => ParseError::InvalidId { line, value },
            LineError::BadHead(value) => ParseError::InvalidHead { line, value },
        }
    }
}

/// Streams sentences out of a CoNLL-U source, one at a time.
pub struct ConlluReader<R> {
    input: R,
    line_no: usize,
    next_id: u32,
    buf: String,
    done: bool,
}

impl<R: BufRead> ConlluReader<R> {
    pub fn new(input: R) -> Self {
        Self { input, line_no: 0, next_id: 1, buf: String::new(), done: false }
    }

    /// Number of lines consumed so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    fn read_sentence(&mut self) -> Result<Option<SentenceRecord>, ParseError> {
        let mut sentence = SentenceRecord {
            id: SentenceId(self.next_id),
            sent_id: None,
            text: None,
            tokens: Vec::new(),
            multiwords: Vec::new(),
        };
        let mut started = false;

        loop {
            self.buf.clear();
            if self.input.read_line(&mut self.buf)? == 0 {
                self.done = true;
                break;
            }
            self.line_no += 1;

            let line = parse_line(self.buf.trim_end_matches('\n'))
                .map_err(|e| ParseError::at(self.line_no, e))?;

            match line {
                Line::Blank if started => break,
                Line::Blank => continue,
                Line::Metadata { key, value } => {
                    started = true;
                    match key {
                        "sent_id" => sentence.sent_id = Some(value.to_string()),
                        "text" => sentence.text = Some(value.to_string()),
                        _ => {}
                    }
                }
                Line::Comment(_) => started = true,
                Line::Word(row) => {
                    started = true;
                    sentence.tokens.push(row);
                }
                Line::Multiword(mw) => {
                    started = true;
                    sentence.multiwords.push(mw);
                }
                Line::Skipped(id) => {
                    started = true;
                    log::trace!("line {}: skipping {:?}", self.line_no, id);
                }
            }
        }

        if !started {
            return Ok(None);
        }
        self.next_id += 1;
        Ok(Some(sentence))
    }
}

impl<R: BufRead> Iterator for ConlluReader<R> {
    type Item = Result<SentenceRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_sentence() {
            Ok(Some(sentence)) => Some(Ok(sentence)),
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Parse a whole CoNLL-U document held in memory.
pub fn parse_str(input: &str) -> Result<Vec<SentenceRecord>, ParseError> {
    ConlluReader::new(input.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clitic_protocol::TokenId;

    const SAMPLE: &str = "\
# newdoc id = doc1
# sent_id = s1
# text = Četl ho se.
1\tČetl\tčíst\tVERB\t_\t_\t0\troot\t_\t_
2\tho\ton\tPRON\t_\tVariant=Short\t1\tobj\t_\t_
3\tse\tse\tPRON\t_\tReflex=Yes\t1\texpl:pv\t_\tSpaceAfter=No
4\t.\t.\tPUNCT\t_\t_\t1\tpunct\t_\t_

# sent_id = s2
1\tMusí\tmuset\tVERB\t_\t_\t0\troot\t_\t_
2-3\tabych\t_\t_\t_\t_\t_\t_\t_\t_
2\taby\taby\tSCONJ\t_\t_\t4\tmark\t_\t_
3\tbych\tbýt\tAUX\t_\t_\t4\taux\t_\t_
3.1\tx\tx\tX\t_\t_\t_\t_\t_\t_
4\tsmál\tsmát\tVERB\t_\t_\t1\tccomp\t_\tSpaceAfter=No
";

    #[test]
    fn test_reads_sentences_and_metadata() {
        let sentences = parse_str(SAMPLE).unwrap();
        assert_eq!(sentences.len(), 2);

        let first = &sentences[0];
        assert_eq!(first.id, SentenceId(1));
        assert_eq!(first.sent_id.as_deref(), Some("s1"));
        assert_eq!(first.text.as_deref(), Some("Četl ho se."));
        assert_eq!(first.tokens.len(), 4);
        assert_eq!(first.tokens[2].head, Some(TokenId(1)));

        let second = &sentences[1];
        assert_eq!(second.id, SentenceId(2));
        assert_eq!(second.text, None);
        let ids: Vec<u32> = second.tokens.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(second.multiwords.len(), 1);
        assert_eq!(second.surface_text(), "Musí abych smál");
    }

    #[test]
    fn test_reports_line_of_broken_row() {
        let input = "# sent_id = s1\n1\tse\tse\tPRON\t_\t_\t0\troot\t_\t_\n2\tbroken\n";
        let err = parse_str(input).unwrap_err();

        match err {
            ParseError::ColumnCount { line, found, .. } => {
                assert_eq!(line, 3);
                assert_eq!(found, 2);
            }
            other => panic!("Expected ColumnCount, got {}", other),
        }
    }

    #[test]
    fn test_streaming_stops_after_error() {
        let input = "1\tse\tse\tPRON\t_\t_\tX\troot\t_\t_\n\n1\tse\tse\tPRON\t_\t_\t0\troot\t_\t_\n";
        let mut reader = ConlluReader::new(input.as_bytes());

        assert!(matches!(reader.next(), Some(Err(ParseError::InvalidHead { line: 1, .. }))));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_str("").unwrap().is_empty());
        assert!(parse_str("\n\n").unwrap().is_empty());
    }
}

use nom::{
    branch::alt,
    bytes::complete::{is_not, take_till},
    character::complete::{char, digit1, space0},
    combinator::{all_consuming, map, map_res, opt, rest},
    multi::separated_list1,
    sequence::{preceded, separated_pair, terminated, tuple},
    IResult,
};
use clitic_protocol::TokenId;

use crate::token::{multiword, word_row, Line, WordId};

/// Number of tab-separated columns on a CoNLL-U word line.
pub const COLUMN_COUNT: usize = 10;

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse::<u32>)(input)
}

/// `7`, `3-4` or `5.1`
pub fn word_id(input: &str) -> IResult<&str, WordId> {
    all_consuming(alt((
        map(separated_pair(number, char('-'), number), |(a, b)| WordId::Range(a, b)),
        map(separated_pair(number, char('.'), number), |(a, b)| WordId::Empty(a, b)),
        map(number, WordId::Single),
    )))(input)
}

/// HEAD column: `_` or a word index (`0` is the virtual root).
pub fn head(input: &str) -> IResult<&str, Option<TokenId>> {
    all_consuming(alt((
        map(char('_'), |_| None),
        map(number, |n| Some(TokenId(n))),
    )))(input)
}

/// Splits a word line on tabs. Empty columns are kept so the count stays honest.
fn columns(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char('\t'), take_till(|c| c == '\t'))(input)
}

/// `# sent_id = abc` -> `("sent_id", "abc")`
fn metadata(input: &str) -> IResult<&str, (&str, &str)> {
    preceded(
        tuple((char('#'), space0)),
        separated_pair(
            map(is_not("="), str::trim),
            terminated(char('='), space0),
            map(rest, str::trim_end),
        ),
    )(input)
}

/// Reasons a single line could not be classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    ColumnCount(usize),
    BadId(String),
    BadHead(String),
}

/// Classify one line (without its newline).
pub fn parse_line(line: &str) -> Result<Line<'_>, LineError> {
    let line = line.trim_end_matches('\r');

    if line.trim().is_empty() {
        return Ok(Line::Blank);
    }

    if let Some(comment) = line.strip_prefix('#') {
        return Ok(match metadata(line) {
            Ok((_, (key, value))) if !key.is_empty() => Line::Metadata { key, value },
            _ => Line::Comment(comment.trim()),
        });
    }

    let fields = match columns(line) {
        Ok((_, fields)) => fields,
        Err(_) => return Err(LineError::ColumnCount(0)),
    };
    if fields.len() != COLUMN_COUNT {
        return Err(LineError::ColumnCount(fields.len()));
    }

    let id = match word_id(fields[0]) {
        Ok((_, id)) => id,
        Err(_) => return Err(LineError::BadId(fields[0].to_string())),
    };

    match id {
        WordId::Single(n) => {
            let head = match head(fields[6]) {
                Ok((_, head)) => head,
                Err(_) => return Err(LineError::BadHead(fields[6].to_string())),
            };
            Ok(Line::Word(word_row(n, &fields, head)))
        }
        WordId::Range(first, last) => Ok(Line::Multiword(multiword(first, last, &fields))),
        other => Ok(Line::Skipped(other)),
    }
}

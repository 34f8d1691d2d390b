use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use clitic_protocol::{ClausePosition, ClauseType, LabelError, RelationToRegent, NOT_APPLICABLE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("cannot read {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("{0} has no header row")]
    MissingHeader(String),
    #[error("column '{column}' not found in {path}. Available: {available:?}")]
    UnknownColumn { column: String, path: String, available: Vec<String> },
    #[error("invalid row number '{0}' in skip list")]
    BadSkip(String),
}

/// A column picked by header name or by 0-based index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    Name(String),
    Index(usize),
}

impl FromStr for ColumnRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<usize>() {
            Ok(idx) => ColumnRef::Index(idx),
            Err(_) => ColumnRef::Name(s.to_string()),
        })
    }
}

/// `"1, 4,7"` -> {1, 4, 7}. Empty items are ignored.
pub fn parse_skip(list: &str) -> Result<BTreeSet<usize>, TableError> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.parse().map_err(|_| TableError::BadSkip(item.to_string())))
        .collect()
}

/// One column of a TSV table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Header of the column, `None` when an index points past the header.
    pub name: Option<String>,
    pub values: Vec<String>,
}

/// Values of one column of a TSV table with a header.
///
/// Data rows are numbered from 1; rows listed in `skip` are dropped.
/// Short rows yield an empty value.
pub fn column_values(text: &str, source: &str, column: &ColumnRef, skip: &BTreeSet<usize>) -> Result<Column, TableError> {
    let mut lines = text.lines();
    let header: Vec<&str> = lines
        .next()
        .ok_or_else(|| TableError::MissingHeader(source.to_string()))?
        .split('\t')
        .collect();

    let idx = match column {
        ColumnRef::Index(idx) => *idx,
        ColumnRef::Name(name) => header.iter().position(|h| *h == name.as_str()).ok_or_else(|| TableError::UnknownColumn {
            column: name.clone(),
            path: source.to_string(),
            available: header.iter().map(|h| h.to_string()).collect(),
        })?,
    };

    let values = lines
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(row, _)| !skip.contains(row))
        .map(|(_, line)| line.split('\t').nth(idx).unwrap_or("").trim().to_string())
        .collect();
    Ok(Column { name: header.get(idx).map(|h| h.to_string()), values })
}

pub fn load_column(path: &Path, column: &ColumnRef, skip: &BTreeSet<usize>) -> Result<Column, TableError> {
    let name = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| TableError::Io { path: name.clone(), source: e })?;
    column_values(&text, &name, column, skip)
}

/// Label set of a feature column written by `clitic-feats`.
pub fn known_labels(column: &str) -> Option<Vec<&'static str>> {
    fn names<L: Copy>(all: &[L], as_str: fn(L) -> &'static str) -> Vec<&'static str> {
        all.iter().map(|&l| as_str(l)).collect()
    }
    match column {
        "clause_type" => Some(names(ClauseType::ALL, ClauseType::as_str)),
        "clause_position" => Some(names(ClausePosition::ALL, ClausePosition::as_str)),
        "relation_to_regent" => Some(names(RelationToRegent::ALL, RelationToRegent::as_str)),
        _ => None,
    }
}

fn parse_failures<L: FromStr<Err = LabelError>>(values: &[String]) -> Vec<LabelError> {
    let mut seen = BTreeSet::new();
    values
        .iter()
        .filter(|v| !v.is_empty() && v.as_str() != NOT_APPLICABLE)
        .filter(|v| seen.insert(v.as_str()))
        .filter_map(|v| v.parse::<L>().err())
        .collect()
}

/// Distinct values of a feature column that are not one of its labels.
/// Empty cells and `_` are accepted; other columns are not checked.
pub fn unknown_labels(column: &Column) -> Vec<LabelError> {
    match column.name.as_deref() {
        Some("clause_type") => parse_failures::<ClauseType>(&column.values),
        Some("clause_position") => parse_failures::<ClausePosition>(&column.values),
        Some("relation_to_regent") => parse_failures::<RelationToRegent>(&column.values),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "sent_id\tord\tclause_type\ns1\t3\tHV\ns2\t1\tVV\ns3\t5\n";

    #[test]
    fn test_column_by_name_and_index() {
        let none = BTreeSet::new();
        let by_name = column_values(TABLE, "t", &"clause_type".parse().unwrap(), &none).unwrap();
        assert_eq!(by_name.values, ["HV", "VV", ""]);
        assert_eq!(by_name.name.as_deref(), Some("clause_type"));

        let by_index = column_values(TABLE, "t", &"0".parse().unwrap(), &none).unwrap();
        assert_eq!(by_index.values, ["s1", "s2", "s3"]);
        assert_eq!(by_index.name.as_deref(), Some("sent_id"));

        let past_header = column_values(TABLE, "t", &ColumnRef::Index(7), &none).unwrap();
        assert_eq!(past_header.name, None);
        assert_eq!(past_header.values, ["", "", ""]);
    }

    #[test]
    fn test_skip_rows_are_one_based() {
        let skip = parse_skip("1, 3,").unwrap();
        let column = column_values(TABLE, "t", &ColumnRef::Name("sent_id".into()), &skip).unwrap();
        assert_eq!(column.values, ["s2"]);
        assert!(parse_skip("1,x").is_err());
    }

    #[test]
    fn test_unknown_column() {
        let err = column_values(TABLE, "t", &ColumnRef::Name("nope".into()), &BTreeSet::new()).unwrap_err();
        assert!(err.to_string().contains("Available"));
        assert!(matches!(column_values("", "t", &ColumnRef::Index(0), &BTreeSet::new()), Err(TableError::MissingHeader(_))));
    }

    #[test]
    fn test_unknown_labels_are_reported_once() {
        let table = "clause_type\tclause_position\nHV\tpostiniciální\nhv\t_\nhv\tmediální\n\tX\n";
        let none = BTreeSet::new();

        let types = column_values(table, "t", &ColumnRef::Name("clause_type".into()), &none).unwrap();
        let errors = unknown_labels(&types);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].value, "hv");

        let positions = column_values(table, "t", &ColumnRef::Index(1), &none).unwrap();
        let errors = unknown_labels(&positions);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "unknown clause position label: 'X'");

        let plain = Column { name: Some("sent_id".to_string()), values: vec!["anything".to_string()] };
        assert!(unknown_labels(&plain).is_empty());
    }

    #[test]
    fn test_known_labels() {
        assert_eq!(known_labels("clause_type"), Some(vec!["HV", "VV"]));
        assert_eq!(known_labels("relation_to_regent").map(|l| l.len()), Some(5));
        assert_eq!(known_labels("ord"), None);
    }
}

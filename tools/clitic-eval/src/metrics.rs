use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("Row count mismatch after filtering: gold={gold}, pred={pred}. Check --skip-gold / --skip-pred.")]
    LengthMismatch { gold: usize, pred: usize },
    #[error("no examples remain after filtering empty gold labels")]
    NothingLeft,
}

/// Drops pairs whose gold label is empty. Returns the kept pairs and the number dropped.
pub fn drop_empty_gold(gold: Vec<String>, pred: Vec<String>) -> Result<(Vec<String>, Vec<String>, usize), EvalError> {
    if gold.len() != pred.len() {
        return Err(EvalError::LengthMismatch { gold: gold.len(), pred: pred.len() });
    }
    let before = gold.len();
    let (gold, pred): (Vec<String>, Vec<String>) = gold.into_iter().zip(pred).filter(|(g, _)| !g.is_empty()).unzip();
    if gold.is_empty() {
        return Err(EvalError::NothingLeft);
    }
    let dropped = before - gold.len();
    Ok((gold, pred, dropped))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassScores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Gold vs predicted labels, aligned pairwise.
#[derive(Debug, Clone)]
pub struct Evaluation {
    classes: Vec<String>,
    /// (gold, predicted) -> count
    confusion: BTreeMap<(String, String), usize>,
    total: usize,
    correct: usize,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den > 0 {
        num as f64 / den as f64
    } else {
        0.0
    }
}

impl Evaluation {
    pub fn new(gold: &[String], pred: &[String]) -> Result<Self, EvalError> {
        if gold.len() != pred.len() {
            return Err(EvalError::LengthMismatch { gold: gold.len(), pred: pred.len() });
        }

        let classes: BTreeSet<String> = gold.iter().chain(pred).cloned().collect();
        let mut confusion = BTreeMap::new();
        for (g, p) in gold.iter().zip(pred) {
            *confusion.entry((g.clone(), p.clone())).or_insert(0) += 1;
        }
        let correct = gold.iter().zip(pred).filter(|(g, p)| g == p).count();

        Ok(Self { classes: classes.into_iter().collect(), confusion, total: gold.len(), correct })
    }

    /// `None` when there is nothing to score.
    pub fn accuracy(&self) -> Option<f64> {
        (self.total > 0).then(|| self.correct as f64 / self.total as f64)
    }

    pub fn count(&self, gold: &str, pred: &str) -> usize {
        self.confusion.get(&(gold.to_string(), pred.to_string())).copied().unwrap_or(0)
    }

    pub fn scores(&self, class: &str) -> ClassScores {
        let tp = self.count(class, class);
        let fp: usize = self.classes.iter().filter(|g| *g != class).map(|g| self.count(g, class)).sum();
        let fn_: usize = self.classes.iter().filter(|p| *p != class).map(|p| self.count(class, p)).sum();

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 { 2.0 * precision * recall / (precision + recall) } else { 0.0 };
        ClassScores { precision, recall, f1 }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total pairs: {}", self.total)?;
        writeln!(f, "Correct:     {}", self.correct)?;
        match self.accuracy() {
            Some(acc) => writeln!(f, "Accuracy:    {:.4}", acc)?,
            None => writeln!(f, "Accuracy:    N/A")?,
        }

        writeln!(f)?;
        writeln!(f, "Confusion matrix (rows=gold, cols=pred):")?;
        writeln!(f, "\t{}", self.classes.join("\t"))?;
        for gold in &self.classes {
            let cells: Vec<String> = self.classes.iter().map(|pred| self.count(gold, pred).to_string()).collect();
            writeln!(f, "{}\t{}", gold, cells.join("\t"))?;
        }

        writeln!(f)?;
        writeln!(f, "Per-class metrics:")?;
        for class in &self.classes {
            let s = self.scores(class);
            writeln!(f, "  {}:  P={:.4}  R={:.4}  F1={:.4}", class, s.precision, s.recall, s.f1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scores_and_confusion() {
        let gold = labels(&["HV", "HV", "VV", "VV", "HV"]);
        let pred = labels(&["HV", "VV", "VV", "VV", "HV"]);
        let eval = Evaluation::new(&gold, &pred).unwrap();

        assert_eq!(eval.total, 5);
        assert_eq!(eval.correct, 4);
        assert_eq!(eval.classes, ["HV", "VV"]);
        assert_eq!(eval.accuracy(), Some(0.8));
        assert_eq!(eval.count("HV", "VV"), 1);
        assert_eq!(eval.count("VV", "HV"), 0);

        let hv = eval.scores("HV");
        assert_eq!(hv.precision, 1.0);
        assert!((hv.recall - 2.0 / 3.0).abs() < 1e-9);
        assert!((hv.f1 - 0.8).abs() < 1e-9);

        let vv = eval.scores("VV");
        assert!((vv.precision - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(vv.recall, 1.0);
    }

    #[test]
    fn test_report_layout() {
        let eval = Evaluation::new(&labels(&["HV", "VV"]), &labels(&["HV", "HV"])).unwrap();
        let report = eval.to_string();

        assert!(report.starts_with("Total pairs: 2\nCorrect:     1\nAccuracy:    0.5000\n"));
        assert!(report.contains("\tHV\tVV\nHV\t1\t0\nVV\t1\t0\n"));
        assert!(report.contains("  VV:  P=0.0000  R=0.0000  F1=0.0000"));
    }

    #[test]
    fn test_empty_and_mismatched_inputs() {
        let eval = Evaluation::new(&[], &[]).unwrap();
        assert_eq!(eval.accuracy(), None);
        assert!(eval.to_string().contains("Accuracy:    N/A"));

        let err = Evaluation::new(&labels(&["HV"]), &[]).unwrap_err();
        assert_eq!(err, EvalError::LengthMismatch { gold: 1, pred: 0 });
    }

    #[test]
    fn test_drop_empty_gold() {
        let (gold, pred, dropped) =
            drop_empty_gold(labels(&["HV", "", "VV", ""]), labels(&["HV", "VV", "HV", "HV"])).unwrap();
        assert_eq!(gold, ["HV", "VV"]);
        assert_eq!(pred, ["HV", "HV"]);
        assert_eq!(dropped, 2);

        let err = drop_empty_gold(labels(&["", ""]), labels(&["HV", "VV"])).unwrap_err();
        assert_eq!(err, EvalError::NothingLeft);
        assert_eq!(err.to_string(), "no examples remain after filtering empty gold labels");

        let err = drop_empty_gold(labels(&["HV"]), labels(&["HV", "VV"])).unwrap_err();
        assert_eq!(err, EvalError::LengthMismatch { gold: 1, pred: 2 });
    }
}

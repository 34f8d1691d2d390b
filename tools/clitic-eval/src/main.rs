mod metrics;
mod table;

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::metrics::{drop_empty_gold, Evaluation};
use crate::table::{known_labels, load_column, parse_skip, unknown_labels, Column, ColumnRef};

/// Evaluate predicted clitic features against gold annotations.
///
/// Both files are TSV with a header row. Data rows are counted from 1 (the
/// header does not count). Rows listed in --skip-gold / --skip-pred are removed
/// before alignment, so the two remaining lists must have the same length.
#[derive(Parser)]
#[command(author, version, about, long_about)]
struct Cli {
    /// Gold TSV file (with header)
    gold: PathBuf,

    /// Predicted features TSV file (with header)
    pred: PathBuf,

    /// Column name or 0-based index in the gold file
    #[arg(long, default_value = "clause_type")]
    gold_col: ColumnRef,

    /// Column name or 0-based index in the predicted file
    #[arg(long, default_value = "clause_type")]
    pred_col: ColumnRef,

    /// Comma-separated 1-based data row numbers to skip in the gold file
    #[arg(long, default_value = "")]
    skip_gold: String,

    /// Comma-separated 1-based data row numbers to skip in the predicted file
    #[arg(long, default_value = "")]
    skip_pred: String,

    /// Drop pairs whose gold label is empty
    #[arg(long)]
    ignore_empty_gold: bool,
}

fn warn_unknown_labels(path: &Path, column: &Column) {
    let Some(name) = column.name.as_deref() else { return };
    for err in unknown_labels(column) {
        log::warn!("{}: {} (expected one of {:?})", path.display(), err, known_labels(name).unwrap_or_default());
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let gold = load_column(&cli.gold, &cli.gold_col, &parse_skip(&cli.skip_gold)?)?;
    let pred = load_column(&cli.pred, &cli.pred_col, &parse_skip(&cli.skip_pred)?)?;
    warn_unknown_labels(&cli.gold, &gold);
    warn_unknown_labels(&cli.pred, &pred);

    let (gold, pred) = if cli.ignore_empty_gold {
        let (gold, pred, dropped) = drop_empty_gold(gold.values, pred.values)?;
        log::info!("Evaluating {} pairs ({} skipped due to empty gold labels)", gold.len(), dropped);
        (gold, pred)
    } else {
        (gold.values, pred.values)
    };

    let evaluation = Evaluation::new(&gold, &pred)?;
    print!("{}", evaluation);
    Ok(())
}

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clitic_analyzer::{CliticAnalyzer, Policy};
use clitic_parser::{read_archive, ConlluReader};
use clitic_protocol::{SentenceRecord, TSV_HEADER};
use clitic_tree::SentenceTree;

#[derive(Parser)]
#[command(author, version, about = "Extracts features of the Czech clitics se/si from parsed sentences")]
struct Cli {
    /// CoNLL-U file (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Treat the input as a treebank archive written by treebank-compiler
    #[arg(long, requires = "input")]
    archive: bool,

    /// Output TSV file (writes stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// JSON policy overriding the default rule set
    #[arg(short, long, value_name = "FILE")]
    policy: Option<PathBuf>,

    /// Print the sentence text after every row
    #[arg(long)]
    with_text: bool,
}

#[derive(Default)]
struct Stats {
    sentences: usize,
    skipped: usize,
    rows: usize,
}

struct FeatureWriter<W: Write> {
    out: W,
    analyzer: CliticAnalyzer,
    with_text: bool,
    stats: Stats,
}

impl<W: Write> FeatureWriter<W> {
    fn new(mut out: W, analyzer: CliticAnalyzer, with_text: bool) -> io::Result<Self> {
        writeln!(out, "{}", TSV_HEADER)?;
        Ok(Self { out, analyzer, with_text, stats: Stats::default() })
    }

    fn sentence(&mut self, sentence: &SentenceRecord) -> io::Result<()> {
        self.stats.sentences += 1;

        let tree = match SentenceTree::from_record(sentence) {
            Ok(tree) => tree,
            Err(e) => {
                log::warn!(
                    "sentence {} ({}): {}; skipped",
                    sentence.id,
                    sentence.sent_id.as_deref().unwrap_or("no sent_id"),
                    e
                );
                self.stats.skipped += 1;
                return Ok(());
            }
        };

        for issue in tree.check_integrity() {
            log::debug!("sentence {}: {}", sentence.id, issue);
        }

        for record in self.analyzer.analyze(&tree) {
            writeln!(self.out, "{}", record.to_tsv_row())?;
            if self.with_text {
                writeln!(self.out, "{}", record.sentence_text)?;
            }
            self.stats.rows += 1;
        }
        Ok(())
    }

    fn finish(mut self) -> io::Result<Stats> {
        self.out.flush()?;
        Ok(self.stats)
    }
}

fn load_policy(path: Option<&PathBuf>) -> anyhow::Result<Policy> {
    let Some(path) = path else {
        return Ok(Policy::default());
    };
    let json = fs::read_to_string(path).with_context(|| format!("reading policy {:?}", path))?;
    let policy = Policy::from_json(&json).with_context(|| format!("loading policy {:?}", path))?;
    log::info!("Loaded policy from {:?}", path);
    Ok(policy)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let analyzer = CliticAnalyzer::new(load_policy(cli.policy.as_ref())?);

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path).with_context(|| format!("creating {:?}", path))?),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = FeatureWriter::new(BufWriter::new(out), analyzer, cli.with_text)?;

    if cli.archive {
        let path = cli.input.as_ref().context("--archive needs an input file")?;
        let bytes = fs::read(path).with_context(|| format!("reading {:?}", path))?;
        let treebank = read_archive(&bytes)?;
        log::info!("Loaded {} sentences from archive {:?}", treebank.sentences.len(), path);

        for sentence in &treebank.sentences {
            writer.sentence(sentence)?;
        }
    } else {
        let input: Box<dyn BufRead> = match &cli.input {
            Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| format!("opening {:?}", path))?)),
            None => Box::new(io::stdin().lock()),
        };

        for sentence in ConlluReader::new(input) {
            writer.sentence(&sentence?)?;
        }
    }

    let stats = writer.finish()?;
    log::info!(
        "{} sentences read, {} skipped, {} clitic rows written",
        stats.sentences,
        stats.skipped,
        stats.rows
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_emits_header_rows_and_text() {
        let input = "\
# sent_id = s1
# text = Četl ho se.
1\tČetl\tčíst\tVERB\t_\t_\t0\troot\t_\t_
2\tho\ton\tPRON\t_\t_\t1\tobj\t_\t_
3\tse\tse\tPRON\t_\t_\t1\texpl:pv\t_\tSpaceAfter=No
4\t.\t.\tPUNCT\t_\t_\t1\tpunct\t_\t_

# sent_id = broken
1\tse\tse\tPRON\t_\t_\t9\texpl:pv\t_\t_
";
        let mut buf = Vec::new();
        let mut writer = FeatureWriter::new(&mut buf, CliticAnalyzer::default(), true).unwrap();
        for sentence in ConlluReader::new(input.as_bytes()) {
            writer.sentence(&sentence.unwrap()).unwrap();
        }
        let stats = writer.finish().unwrap();

        assert_eq!(stats.sentences, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.rows, 1);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [TSV_HEADER, "s1\t3\tČetl\tHV\tpostiniciální\tkontaktní postverbální", "Četl ho se."]
        );
    }
}

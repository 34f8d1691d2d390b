use clap::Parser;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clitic_parser::{write_archive, ConlluReader};
use clitic_protocol::{Treebank, TREEBANK_VERSION};

#[derive(Parser)]
#[command(author, version, about = "Compiles a CoNLL-U treebank to a binary archive")]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    log::info!("Reading CoNLL-U from {:?}...", cli.input);
    let file = File::open(&cli.input).with_context(|| format!("opening {:?}", cli.input))?;
    let mut reader = ConlluReader::new(BufReader::new(file));
    let sentences = reader
        .by_ref()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("parsing {:?}", cli.input))?;
    log::debug!("{} lines read", reader.line_no());

    let tokens: usize = sentences.iter().map(|s| s.tokens.len()).sum();
    log::info!("Compiling treebank version {} with {} sentences ({} tokens)...", TREEBANK_VERSION, sentences.len(), tokens);

    let treebank = Treebank { version: TREEBANK_VERSION, sentences };
    let bytes = write_archive(&treebank)?;

    fs::write(&cli.output, &bytes[..]).with_context(|| format!("writing {:?}", cli.output))?;

    log::info!("Archive of {} bytes written to {:?}", bytes.len(), cli.output);
    Ok(())
}

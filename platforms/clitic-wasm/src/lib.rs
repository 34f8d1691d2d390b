use clitic_analyzer::{CliticAnalyzer, Policy};
use clitic_parser::{parse_str, read_archive};
use clitic_protocol::{CliticRecord, SentenceRecord};
use clitic_tree::SentenceTree;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// The structured response sent back to JavaScript
#[derive(Debug, Default, Serialize)]
pub struct AnalysisReport {
    pub records: Vec<CliticRecord>,
    pub sentences: usize,
    /// Sentences whose tree could not be built (dangling HEAD, duplicate ids).
    pub skipped: Vec<String>,
}

impl AnalysisReport {
    pub fn tsv(&self) -> String {
        let mut out = String::from(clitic_protocol::TSV_HEADER);
        out.push('\n');
        for record in &self.records {
            out.push_str(&record.to_tsv_row());
            out.push('\n');
        }
        out
    }
}

/// Runs the analyzer over already parsed sentences.
pub fn analyze_sentences(analyzer: &CliticAnalyzer, sentences: &[SentenceRecord]) -> AnalysisReport {
    let mut report = AnalysisReport { sentences: sentences.len(), ..AnalysisReport::default() };
    for sentence in sentences {
        match SentenceTree::from_record(sentence) {
            Ok(tree) => report.records.extend(analyzer.analyze(&tree)),
            Err(e) => {
                let label = sentence.sent_id.clone().unwrap_or_else(|| sentence.id.to_string());
                log::warn!("sentence {}: {}", label, e);
                report.skipped.push(label);
            }
        }
    }
    report
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The engine instance running in the browser
#[wasm_bindgen]
pub struct CliticEngine {
    analyzer: CliticAnalyzer,
}

#[wasm_bindgen]
impl CliticEngine {
    /// `policy_json` overrides the default rule set; pass `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(policy_json: Option<String>) -> Result<CliticEngine, JsValue> {
        let policy = match policy_json {
            Some(json) => Policy::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Policy::default(),
        };
        Ok(Self { analyzer: CliticAnalyzer::new(policy) })
    }

    /// CoNLL-U text -> `AnalysisReport` as a JS object.
    pub fn analyze(&self, conllu: &str) -> Result<JsValue, JsValue> {
        to_js(&self.report(conllu)?)
    }

    /// CoNLL-U text -> TSV feature table, header included.
    #[wasm_bindgen(js_name = analyzeTsv)]
    pub fn analyze_tsv(&self, conllu: &str) -> Result<String, JsValue> {
        Ok(self.report(conllu)?.tsv())
    }

    /// Treebank archive bytes (fetched by JS) -> `AnalysisReport`.
    #[wasm_bindgen(js_name = analyzeArchive)]
    pub fn analyze_archive(&self, data: &[u8]) -> Result<JsValue, JsValue> {
        let treebank = read_archive(data).map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(&analyze_sentences(&self.analyzer, &treebank.sentences))
    }

    /// The effective policy, for display in the UI.
    pub fn policy(&self) -> Result<JsValue, JsValue> {
        to_js(self.analyzer.policy())
    }
}

impl CliticEngine {
    fn report(&self, conllu: &str) -> Result<AnalysisReport, JsValue> {
        let sentences = parse_str(conllu).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(analyze_sentences(&self.analyzer, &sentences))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# sent_id = w-1\n\
        1\tSmál\tsmát\tVERB\t_\t_\t0\troot\t_\t_\n\
        2\tse\tse\tPRON\t_\t_\t1\texpl:pv\t_\t_\n\
        \n\
        # sent_id = w-2\n\
        1\tOn\ton\tPRON\t_\t_\t7\tnsubj\t_\t_\n\
        \n";

    #[test]
    fn test_report_counts_records_and_skips() {
        let sentences = parse_str(SAMPLE).unwrap();
        let report = analyze_sentences(&CliticAnalyzer::default(), &sentences);

        assert_eq!(report.sentences, 2);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].to_tsv_row(), "w-1\t2\tSmál\tHV\tpostiniciální\tkontaktní postverbální");
        assert_eq!(report.skipped, vec!["w-2".to_string()]);
    }

    #[test]
    fn test_tsv_starts_with_header() {
        let sentences = parse_str(SAMPLE).unwrap();
        let tsv = analyze_sentences(&CliticAnalyzer::default(), &sentences).tsv();
        let mut lines = tsv.lines();
        assert_eq!(lines.next(), Some(clitic_protocol::TSV_HEADER));
        assert!(lines.next().unwrap().starts_with("w-1\t2\t"));
        assert_eq!(lines.next(), None);
    }
}

//! Command payloads and their renderings.
//!
//! Every payload serializes to JSON with `schema_version`, `run_id` and
//! `generated_at` at the top level. Markdown and one-line summaries are
//! produced from the same structs.

use chrono::{DateTime, Utc};
use nbs_common::{OutputFormat, SCHEMA_VERSION};
use nbs_config::ModelSnapshot;
use serde::Serialize;

use crate::ledger::EvidenceLedger;
use crate::polarity::Polarity;
use crate::scorer::Evaluation;

/// Formats a payload for humans.
pub trait Render: Serialize {
    fn to_markdown(&self) -> String;
    fn to_summary(&self) -> String;

    /// One JSON document per line. Defaults to the compact payload.
    fn to_jsonl(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Render a payload in `format`. `Exitcode` renders nothing.
pub fn render<T: Render>(payload: &T, format: OutputFormat) -> serde_json::Result<Option<String>> {
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(payload)?,
        OutputFormat::Jsonl => payload.to_jsonl()?,
        OutputFormat::Md => payload.to_markdown(),
        OutputFormat::Summary => payload.to_summary(),
        OutputFormat::Exitcode => return Ok(None),
    };
    Ok(Some(out))
}

/// Header fields shared by every payload.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub schema_version: &'static str,
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
}

impl Envelope {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            run_id: run_id.into(),
            generated_at: Utc::now(),
        }
    }
}

/// Result of `nbs score` for a single message.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub text: String,
    pub tokens: Vec<String>,
    pub score: f64,
    pub polarity: Polarity,
}

impl ScoreReport {
    pub fn new(envelope: Envelope, text: impl Into<String>, eval: Evaluation) -> Self {
        Self {
            envelope,
            model: None,
            text: text.into(),
            tokens: eval.tokens,
            score: eval.score,
            polarity: eval.polarity,
        }
    }

    pub fn with_model(mut self, name: Option<String>) -> Self {
        self.model = name;
        self
    }
}

impl Render for ScoreReport {
    fn to_markdown(&self) -> String {
        let mut out = String::from("# Sentiment\n\n");
        out.push_str(&format!("- **Text:** {}\n", self.text));
        out.push_str(&format!("- **Tokens:** {}\n", format_tokens(&self.tokens)));
        out.push_str(&format!("- **Score:** {:.6}\n", self.score));
        out.push_str(&format!("- **Polarity:** {}\n", self.polarity));
        out
    }

    fn to_summary(&self) -> String {
        format!("{} {:.6}", self.polarity, self.score)
    }
}

/// One line of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    /// 1-based input line number.
    pub line: usize,
    pub text: String,
    pub tokens: Vec<String>,
    pub score: f64,
    pub polarity: Polarity,
}

/// Result of `nbs score --stdin`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub count: usize,
    pub positive: usize,
    pub negative: usize,
    pub results: Vec<BatchItem>,
}

impl BatchReport {
    pub fn new(envelope: Envelope, results: Vec<BatchItem>) -> Self {
        let positive = results.iter().filter(|r| r.polarity.is_positive()).count();
        Self {
            envelope,
            count: results.len(),
            positive,
            negative: results.len() - positive,
            results,
        }
    }
}

impl Render for BatchReport {
    fn to_markdown(&self) -> String {
        let mut out = String::from("# Sentiment Batch\n\n");
        out.push_str(&format!(
            "{} messages: {} positive, {} negative\n\n",
            self.count, self.positive, self.negative
        ));
        out.push_str("| Line | Polarity | Score | Text |\n");
        out.push_str("|-----:|----------|------:|------|\n");
        for item in &self.results {
            out.push_str(&format!(
                "| {} | {} | {:.4} | {} |\n",
                item.line,
                item.polarity,
                item.score,
                item.text.replace('|', "\\|")
            ));
        }
        out
    }

    fn to_summary(&self) -> String {
        format!(
            "{} messages: {} positive, {} negative",
            self.count, self.positive, self.negative
        )
    }

    fn to_jsonl(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Line<'a> {
            schema_version: &'static str,
            run_id: &'a str,
            #[serde(flatten)]
            item: &'a BatchItem,
        }

        let lines = self
            .results
            .iter()
            .map(|item| {
                serde_json::to_string(&Line {
                    schema_version: self.envelope.schema_version,
                    run_id: &self.envelope.run_id,
                    item,
                })
            })
            .collect::<serde_json::Result<Vec<_>>>()?;
        Ok(lines.join("\n"))
    }
}

/// Result of `nbs explain`.
#[derive(Debug, Clone, Serialize)]
pub struct ExplainReport {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub text: String,
    pub tokens: Vec<String>,
    pub ledger: EvidenceLedger,
}

impl Render for ExplainReport {
    fn to_markdown(&self) -> String {
        let ledger = &self.ledger;
        let mut out = String::from("# Sentiment Explanation\n\n");
        out.push_str(&format!("{}\n\n", ledger.summary));
        out.push_str(&format!("- **Prior:** {:.6}\n", ledger.prior));
        out.push_str(&format!("- **Score:** {:.6}\n", ledger.score));
        out.push_str(&format!(
            "- **P(positive):** {:.4} (odds {:.3})\n",
            ledger.probability_positive, ledger.odds
        ));
        out.push_str(&format!("- **Strength:** {}\n\n", ledger.strength));

        if !ledger.entries.is_empty() {
            out.push_str("| Word | Count | Log-likelihood | Contribution | Bits | Direction |\n");
            out.push_str("|------|------:|---------------:|-------------:|-----:|-----------|\n");
            for e in &ledger.entries {
                out.push_str(&format!(
                    "| {} | {} | {:.4} | {:.4} | {:.2} | {} |\n",
                    e.word, e.count, e.log_likelihood, e.contribution, e.delta_bits, e.direction
                ));
            }
            out.push('\n');
        }
        if !ledger.unknown_tokens.is_empty() {
            out.push_str(&format!(
                "Unknown: {}\n",
                format_tokens(&ledger.unknown_tokens)
            ));
        }
        out
    }

    fn to_summary(&self) -> String {
        let mut line = self.ledger.summary.clone();
        if !self.ledger.top_evidence.is_empty() {
            line.push_str(" Top: ");
            line.push_str(&self.ledger.top_evidence.join("; "));
        }
        line
    }
}

/// Result of `nbs model show` and `nbs model validate`.
#[derive(Debug, Clone, Serialize)]
pub struct ModelReport {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub valid: bool,
    pub model: ModelSnapshot,
}

impl Render for ModelReport {
    fn to_markdown(&self) -> String {
        let m = &self.model;
        let mut out = String::from("# Model\n\n");
        if let Some(name) = &m.name {
            out.push_str(&format!("- **Name:** {}\n", name));
        }
        out.push_str(&format!("- **Source:** {}\n", m.source));
        if let Some(path) = &m.path {
            out.push_str(&format!("- **Path:** {}\n", path));
        }
        if let Some(sha) = &m.sha256 {
            out.push_str(&format!("- **SHA-256:** {}\n", sha));
        }
        out.push_str(&format!("- **Schema:** {}\n", m.schema_version));
        out.push_str(&format!("- **Prior:** {:.6}\n", m.prior));
        out.push_str(&format!(
            "- **Vocabulary:** {} ({} positive, {} negative, {} neutral)\n",
            m.vocabulary_size, m.positive_words, m.negative_words, m.neutral_words
        ));
        out.push_str(&format!("- **Stemmed:** {}\n", m.stemmed));
        out
    }

    fn to_summary(&self) -> String {
        format!(
            "{} model: prior {:.4}, {} words ({})",
            if self.valid { "valid" } else { "invalid" },
            self.model.prior,
            self.model.vocabulary_size,
            self.model.path.as_deref().unwrap_or(&self.model.source)
        )
    }
}

fn format_tokens(tokens: &[String]) -> String {
    if tokens.is_empty() {
        "(none)".to_string()
    } else {
        tokens
            .iter()
            .map(|t| format!("`{}`", t))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbs_config::Model;
    use std::collections::HashMap;

    fn eval(score: f64) -> Evaluation {
        Evaluation {
            tokens: vec!["good".into(), "day".into()],
            score,
            polarity: Polarity::from_score(score),
        }
    }

    #[test]
    fn score_json_has_envelope_fields() {
        let report = ScoreReport::new(Envelope::new("run-abc"), "good day", eval(1.4));
        let json = render(&report, OutputFormat::Json).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["schema_version"], SCHEMA_VERSION);
        assert_eq!(value["run_id"], "run-abc");
        assert!(value["generated_at"].is_string());
        assert_eq!(value["text"], "good day");
        assert_eq!(value["polarity"], "positive");
        assert_eq!(value["score"], 1.4);
        assert!(value.get("model").is_none());
    }

    #[test]
    fn exitcode_format_renders_nothing() {
        let report = ScoreReport::new(Envelope::new("run-abc"), "x", eval(-1.0));
        assert!(render(&report, OutputFormat::Exitcode).unwrap().is_none());
    }

    #[test]
    fn summary_is_polarity_and_score() {
        let report = ScoreReport::new(Envelope::new("run-abc"), "x", eval(-2.5));
        assert_eq!(
            render(&report, OutputFormat::Summary).unwrap().unwrap(),
            "negative -2.500000"
        );
    }

    #[test]
    fn batch_counts_and_jsonl_lines() {
        let items = vec![
            BatchItem {
                line: 1,
                text: "a".into(),
                tokens: vec![],
                score: 0.5,
                polarity: Polarity::Positive,
            },
            BatchItem {
                line: 2,
                text: "b".into(),
                tokens: vec![],
                score: 0.0,
                polarity: Polarity::Negative,
            },
        ];
        let report = BatchReport::new(Envelope::new("run-1"), items);
        assert_eq!((report.count, report.positive, report.negative), (2, 1, 1));

        let jsonl = render(&report, OutputFormat::Jsonl).unwrap().unwrap();
        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["line"], 2);
        assert_eq!(second["run_id"], "run-1");
        assert_eq!(second["polarity"], "negative");
    }

    #[test]
    fn batch_markdown_escapes_pipes() {
        let items = vec![BatchItem {
            line: 1,
            text: "a|b".into(),
            tokens: vec![],
            score: 1.0,
            polarity: Polarity::Positive,
        }];
        let md = BatchReport::new(Envelope::new("run-1"), items).to_markdown();
        assert!(md.contains("a\\|b"));
    }

    #[test]
    fn explain_markdown_lists_entries() {
        let mut likelihood = HashMap::new();
        likelihood.insert("good".to_string(), 1.2);
        let model = Model::new(0.5, likelihood);
        let tokens = vec!["good".to_string(), "zzz".to_string()];
        let report = ExplainReport {
            envelope: Envelope::new("run-1"),
            text: "good zzz".into(),
            ledger: EvidenceLedger::build(&tokens, &model),
            tokens,
        };
        let md = report.to_markdown();
        assert!(md.contains("| good | 1 |"));
        assert!(md.contains("Unknown: `zzz`"));
        assert!(report.to_summary().contains("Top: good x1"));
    }
}

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One aligned example: the same sentence in both corpus languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedPair {
    pub sides: [String; 2],
}

/// An ordered bilingual parallel corpus.
#[derive(Debug, Clone, Default)]
pub struct ParallelCorpus {
    examples: Vec<AlignedPair>,
}

/// One JSON Lines corpus record, e.g.
/// `{"translation": {"en": "Hello", "fr": "Bonjour"}}`.
#[derive(Debug, Deserialize)]
struct CorpusRecord {
    translation: HashMap<String, String>,
}

impl ParallelCorpus {
    /// Build a corpus from already-aligned pairs.
    pub fn from_pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        Self {
            examples: pairs
                .into_iter()
                .map(|(a, b)| AlignedPair {
                    sides: [a.into(), b.into()],
                })
                .collect(),
        }
    }

    /// Load a JSON Lines corpus keeping the `lang_a` and `lang_b` sides of
    /// each record, in file order. Blank lines are skipped; a record missing
    /// either language side is an error.
    pub fn from_jsonl(path: &Path, lang_a: &str, lang_b: &str) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("opening corpus {}", path.display()))?;

        let mut examples = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line_no = index + 1;
            let line = line.with_context(|| format!("reading corpus line {line_no}"))?;
            if line.trim().is_empty() {
                continue;
            }

            let record: CorpusRecord = serde_json::from_str(&line)
                .with_context(|| format!("parsing corpus line {line_no}"))?;
            let side = |lang: &str| {
                record
                    .translation
                    .get(lang)
                    .cloned()
                    .ok_or_else(|| anyhow!("corpus line {line_no} has no `{lang}` side"))
            };
            examples.push(AlignedPair {
                sides: [side(lang_a)?, side(lang_b)?],
            });
        }

        Ok(Self { examples })
    }

    /// Examples in corpus order.
    pub fn examples(&self) -> &[AlignedPair] {
        &self.examples
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

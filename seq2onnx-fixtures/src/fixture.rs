#[cfg(test)]
#[path = "../tests/unit/fixture_test.rs"]
mod fixture_test;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::corpus::ParallelCorpus;

/// Tokenizer operations the generator needs: encoding a source string and
/// decoding that encoding back.
pub trait RoundTrip {
    /// Encode `text` into token ids, including special tokens.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// Decode token ids back into text, keeping special tokens, so the
    /// stored entry freezes the exact reconstruction.
    fn decode(&self, ids: &[u32]) -> Result<String>;
}

/// Tokenizer parsed from a raw definition document.
pub struct DefinitionTokenizer(tokenizers::Tokenizer);

impl RoundTrip for DefinitionTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .0
            .encode(text, true)
            .map_err(|err| anyhow!("encode failed: {err}"))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        self.0
            .decode(ids, false)
            .map_err(|err| anyhow!("decode failed: {err}"))
    }
}

/// Parse a raw tokenizer definition document into a usable tokenizer.
pub fn tokenizer_from_definition(definition: &str) -> Result<DefinitionTokenizer> {
    let tokenizer = tokenizers::Tokenizer::from_bytes(definition.as_bytes())
        .map_err(|err| anyhow!("parsing tokenizer definition: {err}"))?;
    Ok(DefinitionTokenizer(tokenizer))
}

type FixtureTriple = (String, Vec<u32>, String);

/// One frozen tokenizer round-trip.
///
/// Serialized as the `[source, token_ids, decoded]` triple of the fixture
/// file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FixtureTriple", into = "FixtureTriple")]
pub struct FixtureEntry {
    pub source: String,
    pub token_ids: Vec<u32>,
    pub decoded: String,
}

impl From<FixtureTriple> for FixtureEntry {
    fn from((source, token_ids, decoded): FixtureTriple) -> Self {
        Self {
            source,
            token_ids,
            decoded,
        }
    }
}

impl From<FixtureEntry> for FixtureTriple {
    fn from(entry: FixtureEntry) -> Self {
        (entry.source, entry.token_ids, entry.decoded)
    }
}

/// Ordered fixture entries, no two sharing a source string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureSet {
    entries: Vec<FixtureEntry>,
}

impl FixtureSet {
    pub fn entries(&self) -> &[FixtureEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("serializing fixture set")
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parsing fixture set")
    }
}

/// Builds fixture sets from the front of a corpus.
#[derive(Debug, Clone, Copy)]
pub struct FixtureGenerator {
    num_tests: usize,
}

impl FixtureGenerator {
    /// Corpus prefix length used when none is configured.
    pub const DEFAULT_NUM_TESTS: usize = 1_000;

    /// `num_tests` bounds the number of corpus examples visited, not the
    /// number of entries produced (each example contributes up to two).
    pub fn new(num_tests: usize) -> Self {
        Self { num_tests }
    }

    /// Encode and decode both language sides of the first `num_tests`
    /// examples.
    ///
    /// The first occurrence of a source string wins; later repeats, whether
    /// across sides or across examples, are skipped, so no two entries share
    /// a source. Token ids are exactly what the tokenizer returns at
    /// generation time.
    pub fn generate(
        &self,
        tokenizer: &dyn RoundTrip,
        corpus: &ParallelCorpus,
    ) -> Result<FixtureSet> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut entries = Vec::new();

        for example in corpus.examples().iter().take(self.num_tests) {
            for source in &example.sides {
                if !seen.insert(source.clone()) {
                    continue;
                }
                let token_ids = tokenizer.encode(source)?;
                let decoded = tokenizer.decode(&token_ids)?;
                entries.push(FixtureEntry {
                    source: source.clone(),
                    token_ids,
                    decoded,
                });
            }
        }

        Ok(FixtureSet { entries })
    }
}

impl Default for FixtureGenerator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NUM_TESTS)
    }
}

use super::*;
use crate::corpus::ParallelCorpus;

/// Tokenizer that maps characters to code points and appends a sentinel id,
/// decoding it back as `</s>`.
struct CharTokenizer;

const SENTINEL: u32 = 1;

impl RoundTrip for CharTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let mut ids: Vec<u32> = text.chars().map(|ch| ch as u32 + 100).collect();
        ids.push(SENTINEL);
        Ok(ids)
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        let mut out = String::new();
        for &id in ids {
            if id == SENTINEL {
                out.push_str("</s>");
            } else {
                out.push(char::from_u32(id - 100).ok_or_else(|| anyhow!("bad id {id}"))?);
            }
        }
        Ok(out)
    }
}

#[test]
fn test_repeated_sources_are_deduplicated() {
    // English sides identical, French sides differ.
    let corpus = ParallelCorpus::from_pairs([("Hello", "Bonjour"), ("Hello", "Salut")]);
    let set = FixtureGenerator::new(2)
        .generate(&CharTokenizer, &corpus)
        .unwrap();

    let sources: Vec<_> = set.entries().iter().map(|e| e.source.as_str()).collect();
    assert_eq!(sources, vec!["Hello", "Bonjour", "Salut"]);
}

#[test]
fn test_entries_freeze_the_round_trip() {
    let corpus = ParallelCorpus::from_pairs([("Hi", "Ça")]);
    let set = FixtureGenerator::new(1)
        .generate(&CharTokenizer, &corpus)
        .unwrap();

    for entry in set.entries() {
        assert_eq!(CharTokenizer.encode(&entry.source).unwrap(), entry.token_ids);
        assert_eq!(
            CharTokenizer.decode(&entry.token_ids).unwrap(),
            entry.decoded
        );
        assert!(entry.decoded.ends_with("</s>"));
    }
}

#[test]
fn test_num_tests_bounds_the_corpus_prefix() {
    let corpus = ParallelCorpus::from_pairs([("a", "b"), ("c", "d"), ("e", "f")]);
    let set = FixtureGenerator::new(2)
        .generate(&CharTokenizer, &corpus)
        .unwrap();

    // Two examples visited, both sides each.
    assert_eq!(set.len(), 4);
    let sources: Vec<_> = set.entries().iter().map(|e| e.source.as_str()).collect();
    assert_eq!(sources, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_serializes_as_triples() {
    let corpus = ParallelCorpus::from_pairs([("Hi", "Yo")]);
    let set = FixtureGenerator::new(1)
        .generate(&CharTokenizer, &corpus)
        .unwrap();

    let json = set.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    // Top level is an array of [source, token_ids, decoded] triples.
    let triples = value.as_array().unwrap();
    assert_eq!(triples.len(), 2);
    let first = triples[0].as_array().unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(first[0], serde_json::json!("Hi"));
    assert!(first[1].is_array());
    assert_eq!(first[2], serde_json::json!("Hi</s>"));

    // And parses back to the same set.
    assert_eq!(FixtureSet::from_json(&json).unwrap(), set);
}

#[test]
fn test_empty_corpus_yields_empty_set() {
    let corpus = ParallelCorpus::default();
    let set = FixtureGenerator::default()
        .generate(&CharTokenizer, &corpus)
        .unwrap();
    assert!(set.is_empty());
}

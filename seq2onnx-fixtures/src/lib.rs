//! # seq2onnx-fixtures
//!
//! Builds the golden regression fixture that accompanies a converted model:
//! a frozen, deduplicated set of `(source, token_ids, decoded)` round-trips
//! over a bilingual parallel corpus, serialized next to the raw tokenizer
//! definition it was generated against.
//!
//! A future tokenizer implementation is correct for these inputs iff, for
//! every stored entry, `encode(source)` equals the stored ids and
//! `decode(encode(source))` equals the stored decoded text exactly. Fixture
//! sets are regenerated wholesale when the tokenizer or its vocabulary
//! changes; they are never patched in place.
//!
//! This pipeline shares no runtime state with the conversion pipeline in
//! `seq2onnx-convert`.

pub mod corpus;
pub mod fixture;
pub mod output;

pub use corpus::{AlignedPair, ParallelCorpus};
pub use fixture::{
    DefinitionTokenizer, FixtureEntry, FixtureGenerator, FixtureSet, RoundTrip,
    tokenizer_from_definition,
};
pub use output::{
    fetch_tokenizer_definition, fixture_filename, model_name, tokenizer_filename,
    write_fixture_files,
};

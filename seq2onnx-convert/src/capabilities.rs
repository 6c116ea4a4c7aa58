//! Interfaces of the external collaborators the pipeline orchestrates.
//!
//! Tokenization, graph tracing/export, quantization and beam-search decoding
//! are owned by heavy external tools; this crate consumes them only through
//! the narrow traits below. Production implementations live in
//! [`crate::backends`]; tests substitute their own.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::graphs::ExportedGraphSet;
use crate::publish::PublishedArtifacts;

/// A loaded tokenizer, narrowed to the operations the pipeline needs.
pub trait TokenizerHandle {
    /// Encode `text` into token ids, including special tokens.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// Decode token ids back into text.
    fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> Result<String>;

    /// Persist the raw tokenizer definition to `path`.
    ///
    /// Implementations must write the definition bytes exactly as obtained
    /// from their source, so repeated runs for the same model identifier
    /// produce byte-identical files.
    fn save_definition(&self, path: &Path) -> Result<()>;
}

/// Resolves a model identifier to a tokenizer.
pub trait TokenizerProvider {
    fn load(&self, model_id: &str) -> Result<Box<dyn TokenizerHandle>>;
}

/// The external graph tracing/export engine.
///
/// The engine owns model loading, tracing and graph serialization.
/// `export_graphs` must leave one ONNX file per role in the build directory
/// and report where each ended up.
pub trait GraphExporter {
    fn export_graphs(&self, model_id: &str, build_dir: &Path) -> Result<ExportedGraphSet>;

    /// Write a weight-quantized copy of `graph` and return its path.
    fn quantize(&self, graph: &Path) -> Result<PathBuf>;
}

/// Beam-search decode runner, used only for the post-publish smoke test.
pub trait DecodeRunner {
    fn generate(
        &self,
        artifacts: &PublishedArtifacts,
        input_ids: &[u32],
        attention_mask: &[u32],
        num_beams: usize,
    ) -> Result<Vec<u32>>;
}

//! # seq2onnx-convert
//!
//! A Rust library for converting a pretrained sequence-to-sequence model
//! into a deployable ONNX artifact set: an encoder graph, a first-step
//! decoder graph and a steady-state decoder graph, published together with
//! the tokenizer definition under stable, collision-free names.
//!
//! The heavy collaborators, meaning the tokenizer library, the graph
//! tracing/export engine and the beam-search decode runner, are consumed
//! through the narrow traits in [`capabilities`]. This crate owns only the
//! orchestration and the artifact lifecycle.
//!
//! ## Examples
//!
//! ### Converting a model
//!
//! ```rust,no_run
//! use seq2onnx_convert::backends::{
//!     CommandDecodeRunner, CommandGraphExporter, HubTokenizerProvider,
//! };
//! use seq2onnx_convert::{ConversionConfig, convert_model};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ConversionConfig::default();
//! let provider = HubTokenizerProvider::new();
//! let exporter = CommandGraphExporter::new("fastt5-export");
//! let runner = CommandDecodeRunner::new("fastt5-generate");
//!
//! let outcome = convert_model(&config, &provider, &exporter, &runner)?;
//! println!("encoder graph at {}", outcome.artifacts.encoder.display());
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod export;
pub mod graphs;
pub mod naming;
pub mod pipeline;
pub mod publish;
pub mod sync;

// Re-export main types for easy access
pub use config::{
    ConversionConfig, DEFAULT_MODEL_ID, DEFAULT_OUTPUT_DIR, DEFAULT_TEST_INPUT, parse_truthy,
};
pub use error::{ArtifactKind, ConvertError, Stage};
pub use export::GraphExportAdapter;
pub use graphs::ExportedGraphSet;
pub use naming::{GraphRole, graph_filename, tokenizer_filename};
pub use pipeline::{ConversionOutcome, ConversionPipeline, Verification};
pub use publish::{ArtifactPublisher, PublishedArtifacts};
pub use sync::{SyncedTokenizer, sync_tokenizer};

use anyhow::{Context, Result};

use capabilities::{DecodeRunner, GraphExporter, TokenizerProvider};

/// Convert a model end to end using a temporary build-intermediate
/// directory.
///
/// Convenience wrapper over [`ConversionPipeline`] for callers that do not
/// manage their own build directory. The intermediate directory is removed
/// when the call returns; only the published artifacts remain.
pub fn convert_model(
    config: &ConversionConfig,
    provider: &dyn TokenizerProvider,
    exporter: &dyn GraphExporter,
    runner: &dyn DecodeRunner,
) -> Result<ConversionOutcome> {
    let build_dir = tempfile::tempdir().context("creating build-intermediate directory")?;
    let pipeline = ConversionPipeline::new(config, provider, exporter, runner);
    let outcome = pipeline.run(build_dir.path())?;
    Ok(outcome)
}

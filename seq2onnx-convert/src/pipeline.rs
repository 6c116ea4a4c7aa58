use anyhow::Result;
use log::{info, warn};
use std::path::Path;

use crate::capabilities::{DecodeRunner, GraphExporter, TokenizerProvider};
use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::export::GraphExportAdapter;
use crate::publish::{ArtifactPublisher, PublishedArtifacts};
use crate::sync::{SyncedTokenizer, sync_tokenizer};

/// Beam width of the post-publish smoke test.
const SMOKE_TEST_BEAMS: usize = 2;

/// Outcome of the advisory verification stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// The smoke test decoded a non-empty string.
    Passed { output: String },
    /// The smoke test failed or decoded an empty string. Verification is
    /// advisory: the published artifacts stand.
    Warning { reason: String },
}

/// Result of a conversion run that reached the end of the pipeline.
#[derive(Debug)]
pub struct ConversionOutcome {
    pub artifacts: PublishedArtifacts,
    pub verification: Verification,
}

/// Orchestrates one conversion run.
///
/// Stages run strictly in sequence and none is re-entered:
/// tokenizer sync, graph export (with uniform quantization when requested),
/// artifact publishing, then one beam-search generation as a smoke test.
/// The first failing stage is terminal, except verification, whose failure
/// is reported as a [`Verification::Warning`] without undoing publication.
///
/// Everything is synchronous and single-threaded; each stage's output is a
/// hard input of the next. The build directory is reused across roles within
/// the run and must not be shared with a concurrent run (no locking is
/// provided).
pub struct ConversionPipeline<'a> {
    config: &'a ConversionConfig,
    provider: &'a dyn TokenizerProvider,
    exporter: &'a dyn GraphExporter,
    runner: &'a dyn DecodeRunner,
}

impl<'a> ConversionPipeline<'a> {
    pub fn new(
        config: &'a ConversionConfig,
        provider: &'a dyn TokenizerProvider,
        exporter: &'a dyn GraphExporter,
        runner: &'a dyn DecodeRunner,
    ) -> Self {
        Self {
            config,
            provider,
            exporter,
            runner,
        }
    }

    /// Run the pipeline using `build_dir` as the intermediate directory.
    pub fn run(&self, build_dir: &Path) -> Result<ConversionOutcome, ConvertError> {
        let config = self.config;
        info!(
            "🚀 Converting `{}` (quantized: {})",
            config.model_id, config.quantized
        );

        let synced = sync_tokenizer(self.provider, &config.model_id, build_dir)?;

        let graphs = GraphExportAdapter::new(self.exporter).export(
            &config.model_id,
            build_dir,
            config.quantized,
        )?;

        let artifacts = ArtifactPublisher::publish(config, &graphs, &synced.definition_path)?;

        let verification = self.verify(&synced, &artifacts);
        match &verification {
            Verification::Passed { output } => {
                info!("✅ Smoke test passed: {output}");
            }
            Verification::Warning { reason } => {
                warn!("Smoke test failed, published artifacts stand: {reason}");
            }
        }

        Ok(ConversionOutcome {
            artifacts,
            verification,
        })
    }

    /// Run one beam-search generation against the published graphs and
    /// report whether it produced text.
    fn verify(&self, synced: &SyncedTokenizer, artifacts: &PublishedArtifacts) -> Verification {
        match self.smoke_test(synced, artifacts) {
            Ok(output) if !output.trim().is_empty() => Verification::Passed { output },
            Ok(_) => Verification::Warning {
                reason: "decode produced an empty string".to_string(),
            },
            Err(err) => Verification::Warning {
                reason: format!("{err:#}"),
            },
        }
    }

    fn smoke_test(
        &self,
        synced: &SyncedTokenizer,
        artifacts: &PublishedArtifacts,
    ) -> Result<String> {
        let input_ids = synced.tokenizer.encode(&self.config.test_input)?;
        let attention_mask = vec![1u32; input_ids.len()];
        let output_ids =
            self.runner
                .generate(artifacts, &input_ids, &attention_mask, SMOKE_TEST_BEAMS)?;
        synced.tokenizer.decode(&output_ids, true)
    }
}

#[cfg(test)]
#[path = "../tests/unit/publisher_test.rs"]
mod publisher_test;

use anyhow::{Context, anyhow};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ConversionConfig;
use crate::error::{ArtifactKind, ConvertError};
use crate::graphs::ExportedGraphSet;
use crate::naming::{GraphRole, graph_filename, tokenizer_filename};

/// Final locations of one run's published artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedArtifacts {
    pub tokenizer: PathBuf,
    pub encoder: PathBuf,
    pub init_decoder: PathBuf,
    pub decoder: PathBuf,
}

/// Copies exported graphs and the tokenizer definition from the build
/// directory into the output directory under their canonical names.
pub struct ArtifactPublisher;

impl ArtifactPublisher {
    /// Publish all four artifacts of a run.
    ///
    /// Creates the output directory if absent. Publishing is all-or-nothing
    /// in intent: the first missing source file or failed copy aborts with
    /// an error naming the artifact, but files copied earlier in the same
    /// run are left in place. A failed publish requires a full re-run, not a
    /// partial fix-up.
    pub fn publish(
        config: &ConversionConfig,
        graphs: &ExportedGraphSet,
        tokenizer_definition: &Path,
    ) -> Result<PublishedArtifacts, ConvertError> {
        let out_dir = &config.output_dir;
        let model_name = config.model_name();

        fs::create_dir_all(out_dir)
            .with_context(|| format!("creating {}", out_dir.display()))
            .map_err(|cause| publish_error(config, ArtifactKind::OutputDir, cause))?;

        let tokenizer = copy_artifact(
            config,
            tokenizer_definition,
            &out_dir.join(tokenizer_filename(model_name)),
            ArtifactKind::Tokenizer,
        )?;

        let publish_graph = |role: GraphRole| {
            let dest = out_dir.join(graph_filename(model_name, role, config.quantized));
            copy_artifact(config, graphs.get(role), &dest, ArtifactKind::Graph(role))
        };
        let encoder = publish_graph(GraphRole::Encoder)?;
        let init_decoder = publish_graph(GraphRole::InitDecoder)?;
        let decoder = publish_graph(GraphRole::Decoder)?;

        info!("💾 Published 4 artifacts to {}", out_dir.display());

        Ok(PublishedArtifacts {
            tokenizer,
            encoder,
            init_decoder,
            decoder,
        })
    }
}

fn copy_artifact(
    config: &ConversionConfig,
    source: &Path,
    dest: &Path,
    kind: ArtifactKind,
) -> Result<PathBuf, ConvertError> {
    if !source.is_file() {
        return Err(publish_error(
            config,
            kind,
            anyhow!("expected intermediate file {} is missing", source.display()),
        ));
    }

    fs::copy(source, dest)
        .with_context(|| format!("copying {} to {}", source.display(), dest.display()))
        .map_err(|cause| publish_error(config, kind, cause))?;

    Ok(dest.to_path_buf())
}

fn publish_error(config: &ConversionConfig, artifact: ArtifactKind, cause: anyhow::Error) -> ConvertError {
    ConvertError::ArtifactPublish {
        model_id: config.model_id.clone(),
        artifact,
        cause,
    }
}

use std::fmt;
use thiserror::Error;

use crate::naming::GraphRole;

/// Stages of a conversion run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Configured,
    TokenizerReady,
    GraphsExported,
    Published,
    Verified,
}

/// Artifacts the publisher handles, used to name the failing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Graph(GraphRole),
    Tokenizer,
    OutputDir,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Graph(role) => write!(f, "{role} graph"),
            ArtifactKind::Tokenizer => f.write_str("tokenizer definition"),
            ArtifactKind::OutputDir => f.write_str("output directory"),
        }
    }
}

/// Fatal errors of the conversion pipeline.
///
/// Every variant aborts the remaining stages immediately. There is no retry
/// policy and no rollback: files already placed in the output directory by a
/// failed run stay there, and callers must treat the failure as requiring a
/// full re-run.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The tokenizer-loading capability could not resolve the model
    /// identifier, or persisting the definition failed.
    #[error("tokenizer sync failed for `{model_id}`: {cause}")]
    TokenizerLoad { model_id: String, cause: anyhow::Error },

    /// The export capability could not trace the model into its graphs.
    #[error("graph export failed for `{model_id}`: {cause}")]
    GraphExport { model_id: String, cause: anyhow::Error },

    /// An expected intermediate file was missing or a copy into the output
    /// directory failed.
    #[error("publishing the {artifact} for `{model_id}` failed: {cause}")]
    ArtifactPublish {
        model_id: String,
        artifact: ArtifactKind,
        cause: anyhow::Error,
    },
}

impl ConvertError {
    /// The stage the failed run could not complete.
    pub fn failed_stage(&self) -> Stage {
        match self {
            ConvertError::TokenizerLoad { .. } => Stage::TokenizerReady,
            ConvertError::GraphExport { .. } => Stage::GraphsExported,
            ConvertError::ArtifactPublish { .. } => Stage::Published,
        }
    }
}

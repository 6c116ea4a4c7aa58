use log::info;
use std::path::{Path, PathBuf};

use crate::capabilities::{TokenizerHandle, TokenizerProvider};
use crate::error::ConvertError;

/// Definition filename inside the build directory; the publisher renames it
/// to the canonical form on copy.
const BUILD_TOKENIZER_FILE: &str = "tokenizer.json";

/// A tokenizer obtained for one run, together with its persisted definition.
pub struct SyncedTokenizer {
    pub tokenizer: Box<dyn TokenizerHandle>,
    pub definition_path: PathBuf,
}

/// Load the tokenizer for `model_id` and persist its raw definition into the
/// build directory.
///
/// An unresolvable model identifier fails the run here, before anything has
/// been written to the output directory.
pub fn sync_tokenizer(
    provider: &dyn TokenizerProvider,
    model_id: &str,
    build_dir: &Path,
) -> Result<SyncedTokenizer, ConvertError> {
    let load_error = |cause| ConvertError::TokenizerLoad {
        model_id: model_id.to_string(),
        cause,
    };

    let tokenizer = provider.load(model_id).map_err(load_error)?;

    let definition_path = build_dir.join(BUILD_TOKENIZER_FILE);
    tokenizer
        .save_definition(&definition_path)
        .map_err(load_error)?;

    info!("🔤 Tokenizer for `{model_id}` ready");
    Ok(SyncedTokenizer {
        tokenizer,
        definition_path,
    })
}

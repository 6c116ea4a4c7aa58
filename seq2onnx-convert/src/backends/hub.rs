//! Tokenizer provider backed by a local model directory or the Hugging Face
//! hub.

use anyhow::{Context, Result, anyhow};
use log::info;
use std::fs;
use std::path::Path;
use tokenizers::Tokenizer;

use crate::capabilities::{TokenizerHandle, TokenizerProvider};

const HUB_BASE_URL: &str = "https://huggingface.co";
const TOKENIZER_FILE_NAME: &str = "tokenizer.json";

/// Loads tokenizers from a local model directory when one exists at the
/// model identifier, otherwise from the hub's raw definition endpoint.
#[derive(Debug)]
pub struct HubTokenizerProvider {
    base_url: String,
}

impl HubTokenizerProvider {
    pub fn new() -> Self {
        Self {
            base_url: HUB_BASE_URL.to_string(),
        }
    }

    /// Point the provider at a different hub endpoint (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Raw tokenizer definition endpoint for `model_id`.
    pub fn definition_url(&self, model_id: &str) -> String {
        format!("{}/{model_id}/raw/main/{TOKENIZER_FILE_NAME}", self.base_url)
    }

    fn fetch_definition(&self, model_id: &str) -> Result<String> {
        let url = self.definition_url(model_id);
        info!("🌐 Fetching tokenizer definition from {url}");
        let response = reqwest::blocking::get(&url)
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()
            .with_context(|| format!("hub rejected request for {url}"))?;
        response
            .text()
            .with_context(|| format!("reading tokenizer definition from {url}"))
    }
}

impl Default for HubTokenizerProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenizerProvider for HubTokenizerProvider {
    fn load(&self, model_id: &str) -> Result<Box<dyn TokenizerHandle>> {
        let local = Path::new(model_id).join(TOKENIZER_FILE_NAME);
        let definition = if local.is_file() {
            fs::read_to_string(&local)
                .with_context(|| format!("reading {}", local.display()))?
        } else {
            self.fetch_definition(model_id)?
        };

        let tokenizer = Tokenizer::from_bytes(definition.as_bytes())
            .map_err(|err| anyhow!("parsing tokenizer definition for `{model_id}`: {err}"))?;

        Ok(Box::new(HubTokenizer {
            tokenizer,
            definition,
        }))
    }
}

/// Keeps the raw definition text alongside the parsed tokenizer so
/// persistence is byte-identical across runs.
struct HubTokenizer {
    tokenizer: Tokenizer,
    definition: String,
}

impl TokenizerHandle for HubTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|err| anyhow!("encode failed: {err}"))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> Result<String> {
        self.tokenizer
            .decode(ids, skip_special_tokens)
            .map_err(|err| anyhow!("decode failed: {err}"))
    }

    fn save_definition(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.definition)
            .with_context(|| format!("writing {}", path.display()))
    }
}

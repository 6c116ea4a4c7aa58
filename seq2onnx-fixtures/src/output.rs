//! Fixture file placement and the independent tokenizer definition fetch.

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::fixture::FixtureSet;

const HUB_BASE_URL: &str = "https://huggingface.co";

/// Filename of the serialized fixture set for `model_name`.
pub fn fixture_filename(model_name: &str) -> String {
    format!("{model_name}-tests.json")
}

/// Filename of the raw tokenizer definition stored next to the fixtures.
pub fn tokenizer_filename(model_name: &str) -> String {
    format!("{model_name}-tokenizer.json")
}

/// Last path segment of a model identifier.
pub fn model_name(model_id: &str) -> &str {
    model_id.rsplit('/').next().unwrap_or(model_id)
}

/// Fetch the raw tokenizer definition for `model_id` straight from the hub.
///
/// Fetched here rather than taken from a conversion run, so the fixture set
/// and the definition it was generated against always travel together.
pub fn fetch_tokenizer_definition(model_id: &str) -> Result<String> {
    fetch_tokenizer_definition_from(HUB_BASE_URL, model_id)
}

/// Same as [`fetch_tokenizer_definition`] against a custom hub endpoint.
pub fn fetch_tokenizer_definition_from(base_url: &str, model_id: &str) -> Result<String> {
    let url = format!("{base_url}/{model_id}/raw/main/tokenizer.json");
    info!("🌐 Fetching tokenizer definition from {url}");
    let response = reqwest::blocking::get(&url)
        .with_context(|| format!("request to {url} failed"))?
        .error_for_status()
        .with_context(|| format!("hub rejected request for {url}"))?;
    response
        .text()
        .with_context(|| format!("reading tokenizer definition from {url}"))
}

/// Serialize `fixtures` and the tokenizer definition into `out_dir`, keyed
/// by the model name. Returns the fixture and tokenizer paths.
pub fn write_fixture_files(
    model_id: &str,
    fixtures: &FixtureSet,
    tokenizer_definition: &str,
    out_dir: &Path,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let name = model_name(model_id);

    let fixture_path = out_dir.join(fixture_filename(name));
    fs::write(&fixture_path, fixtures.to_json()?)
        .with_context(|| format!("writing {}", fixture_path.display()))?;

    let tokenizer_path = out_dir.join(tokenizer_filename(name));
    fs::write(&tokenizer_path, tokenizer_definition)
        .with_context(|| format!("writing {}", tokenizer_path.display()))?;

    info!(
        "💾 Wrote {} fixtures to {}",
        fixtures.len(),
        fixture_path.display()
    );
    Ok((fixture_path, tokenizer_path))
}

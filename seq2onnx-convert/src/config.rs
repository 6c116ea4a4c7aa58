#[cfg(test)]
#[path = "../tests/unit/config_test.rs"]
mod config_test;

use std::path::PathBuf;

/// Model identifier converted when none is given.
pub const DEFAULT_MODEL_ID: &str = "t5-small";

/// Directory receiving published artifacts when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "./models";

/// Prompt used for the post-publish smoke test when none is given.
pub const DEFAULT_TEST_INPUT: &str =
    "translate English to French: The universe is a dark forest.";

/// Configuration of one conversion run.
///
/// Constructed once at process entry and passed into the pipeline; the
/// pipeline never reads ambient state. Immutable for the duration of a run.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Model identifier: a hub id (`t5-small`, `google/flan-t5-small`) or a
    /// local model directory.
    pub model_id: String,
    /// Directory the artifacts are published into. Created if absent.
    pub output_dir: PathBuf,
    /// Quantize the weights of all three graphs before publishing. Partial
    /// quantization is not supported.
    pub quantized: bool,
    /// Input fed to the beam-search smoke test after publishing.
    pub test_input: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            quantized: true,
            test_input: DEFAULT_TEST_INPUT.to_string(),
        }
    }
}

impl ConversionConfig {
    /// Last path segment of the model identifier, used as the filename
    /// prefix for every published artifact.
    pub fn model_name(&self) -> &str {
        self.model_id
            .rsplit('/')
            .next()
            .unwrap_or(self.model_id.as_str())
    }
}

/// Parse the quantization flag from its command-line string form.
///
/// Accepted truthy values are `true`, `1` and `yes`, case-insensitive. Any
/// other string parses as `false`.
pub fn parse_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

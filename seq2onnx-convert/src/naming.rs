use std::fmt;

/// Role of an exported graph within the decomposed model.
///
/// The encoder runs once per input while the decoder runs once per generated
/// token, so the two are exported as separate graphs. The decoder is further
/// split into an init variant (first generation step, no cached decoder
/// state) and a steady-state variant that consumes cached state, letting a
/// serving system skip redundant work on the first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphRole {
    Encoder,
    InitDecoder,
    Decoder,
}

impl GraphRole {
    /// All roles, in publish order.
    pub const ALL: [GraphRole; 3] = [
        GraphRole::Encoder,
        GraphRole::InitDecoder,
        GraphRole::Decoder,
    ];

    /// Stable name used in artifact filenames.
    pub const fn as_str(&self) -> &'static str {
        match self {
            GraphRole::Encoder => "encoder",
            GraphRole::InitDecoder => "init-decoder",
            GraphRole::Decoder => "decoder",
        }
    }
}

impl fmt::Display for GraphRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filename of a published graph artifact.
///
/// Total and injective over `(role, quantized)` for a fixed model name: role
/// names are pairwise distinct and `-quantized` is inserted before the
/// extension, so no two artifacts of one run can collide in the output
/// directory.
pub fn graph_filename(model_name: &str, role: GraphRole, quantized: bool) -> String {
    let suffix = if quantized { "-quantized" } else { "" };
    format!("{model_name}-{}{suffix}.onnx", role.as_str())
}

/// Filename of the published tokenizer definition. Unaffected by the
/// quantization flag.
pub fn tokenizer_filename(model_name: &str) -> String {
    format!("{model_name}-tokenizer.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_graph_filenames() {
        assert_eq!(
            graph_filename("t5-small", GraphRole::Encoder, false),
            "t5-small-encoder.onnx"
        );
        assert_eq!(
            graph_filename("t5-small", GraphRole::InitDecoder, false),
            "t5-small-init-decoder.onnx"
        );
        assert_eq!(
            graph_filename("t5-small", GraphRole::Decoder, true),
            "t5-small-decoder-quantized.onnx"
        );
    }

    #[test]
    fn test_quantized_suffix_sits_before_extension() {
        for role in GraphRole::ALL {
            let name = graph_filename("t5-small", role, true);
            assert!(name.ends_with("-quantized.onnx"), "unexpected name {name}");
        }
    }

    #[test]
    fn test_naming_is_injective() {
        // Six graph names plus the tokenizer name must be pairwise distinct.
        let mut names: HashSet<String> = HashSet::new();
        for role in GraphRole::ALL {
            for quantized in [false, true] {
                names.insert(graph_filename("t5-small", role, quantized));
            }
        }
        names.insert(tokenizer_filename("t5-small"));
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_tokenizer_filename_ignores_quantization() {
        assert_eq!(tokenizer_filename("t5-small"), "t5-small-tokenizer.json");
    }
}

use super::*;
use crate::config::ConversionConfig;
use crate::error::Stage;
use crate::graphs::ExportedGraphSet;
use crate::naming::GraphRole;
use std::fs;
use tempfile::TempDir;

fn build_graph_set(build_dir: &std::path::Path) -> ExportedGraphSet {
    let write_graph = |name: &str| {
        let path = build_dir.join(name);
        fs::write(&path, format!("onnx:{name}")).unwrap();
        path
    };
    ExportedGraphSet::new(
        write_graph("encoder.onnx"),
        write_graph("init-decoder.onnx"),
        write_graph("decoder.onnx"),
    )
}

fn test_config(output_dir: &std::path::Path, quantized: bool) -> ConversionConfig {
    ConversionConfig {
        model_id: "t5-small".to_string(),
        output_dir: output_dir.to_path_buf(),
        quantized,
        test_input: String::new(),
    }
}

#[test]
fn test_publish_places_all_four_artifacts() {
    let build = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let graphs = build_graph_set(build.path());
    let tokenizer = build.path().join("tokenizer.json");
    fs::write(&tokenizer, "{}").unwrap();

    let config = test_config(&out.path().join("models"), false);
    let artifacts = ArtifactPublisher::publish(&config, &graphs, &tokenizer).unwrap();

    assert_eq!(
        artifacts.tokenizer,
        config.output_dir.join("t5-small-tokenizer.json")
    );
    assert_eq!(
        artifacts.encoder,
        config.output_dir.join("t5-small-encoder.onnx")
    );
    assert_eq!(
        artifacts.init_decoder,
        config.output_dir.join("t5-small-init-decoder.onnx")
    );
    assert_eq!(
        artifacts.decoder,
        config.output_dir.join("t5-small-decoder.onnx")
    );

    // Output directory was created and contains exactly the four artifacts.
    let mut names: Vec<_> = fs::read_dir(&config.output_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "t5-small-decoder.onnx",
            "t5-small-encoder.onnx",
            "t5-small-init-decoder.onnx",
            "t5-small-tokenizer.json",
        ]
    );

    // Contents survive the copy.
    let copied = fs::read_to_string(&artifacts.encoder).unwrap();
    assert_eq!(copied, "onnx:encoder.onnx");
}

#[test]
fn test_publish_uses_quantized_names() {
    let build = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let graphs = build_graph_set(build.path());
    let tokenizer = build.path().join("tokenizer.json");
    fs::write(&tokenizer, "{}").unwrap();

    let config = test_config(out.path(), true);
    let artifacts = ArtifactPublisher::publish(&config, &graphs, &tokenizer).unwrap();

    assert!(artifacts.encoder.ends_with("t5-small-encoder-quantized.onnx"));
    assert!(
        artifacts
            .init_decoder
            .ends_with("t5-small-init-decoder-quantized.onnx")
    );
    assert!(artifacts.decoder.ends_with("t5-small-decoder-quantized.onnx"));
    // The tokenizer filename is unaffected by the flag.
    assert!(artifacts.tokenizer.ends_with("t5-small-tokenizer.json"));
}

#[test]
fn test_missing_graph_names_the_role_and_keeps_earlier_copies() {
    let build = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let graphs = build_graph_set(build.path());
    let tokenizer = build.path().join("tokenizer.json");
    fs::write(&tokenizer, "{}").unwrap();

    // Export silently skipped the init-decoder role.
    fs::remove_file(build.path().join("init-decoder.onnx")).unwrap();

    let config = test_config(out.path(), false);
    let err = ArtifactPublisher::publish(&config, &graphs, &tokenizer).unwrap_err();

    match &err {
        ConvertError::ArtifactPublish { artifact, .. } => {
            assert_eq!(*artifact, ArtifactKind::Graph(GraphRole::InitDecoder));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(err.to_string().contains("init-decoder graph"));
    assert_eq!(err.failed_stage(), Stage::Published);

    // No rollback: artifacts copied before the failure stay in place.
    assert!(out.path().join("t5-small-tokenizer.json").is_file());
    assert!(out.path().join("t5-small-encoder.onnx").is_file());
    assert!(!out.path().join("t5-small-init-decoder.onnx").exists());
}

#[test]
fn test_publish_overwrites_existing_artifacts() {
    let build = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let graphs = build_graph_set(build.path());
    let tokenizer = build.path().join("tokenizer.json");
    fs::write(&tokenizer, "{\"version\": 2}").unwrap();

    let config = test_config(out.path(), false);
    fs::write(out.path().join("t5-small-tokenizer.json"), "stale").unwrap();

    let artifacts = ArtifactPublisher::publish(&config, &graphs, &tokenizer).unwrap();
    let content = fs::read_to_string(&artifacts.tokenizer).unwrap();
    assert_eq!(content, "{\"version\": 2}");
}

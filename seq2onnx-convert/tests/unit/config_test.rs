use super::*;
use std::path::PathBuf;

#[test]
fn test_defaults() {
    let config = ConversionConfig::default();

    assert_eq!(config.model_id, "t5-small");
    assert_eq!(config.output_dir, PathBuf::from("./models"));
    assert!(config.quantized);
    assert_eq!(
        config.test_input,
        "translate English to French: The universe is a dark forest."
    );
}

#[test]
fn test_model_name_is_last_path_segment() {
    let mut config = ConversionConfig::default();
    assert_eq!(config.model_name(), "t5-small");

    config.model_id = "google/flan-t5-small".to_string();
    assert_eq!(config.model_name(), "flan-t5-small");

    config.model_id = "org/team/custom-model".to_string();
    assert_eq!(config.model_name(), "custom-model");
}

#[test]
fn test_parse_truthy_accepted_values() {
    for value in ["true", "True", "TRUE", "1", "yes", "YES", "Yes"] {
        assert!(parse_truthy(value), "expected `{value}` to parse as true");
    }
}

#[test]
fn test_parse_truthy_falls_back_to_false() {
    for value in ["false", "0", "no", "", "on", "y", "quantized", " true"] {
        assert!(!parse_truthy(value), "expected `{value}` to parse as false");
    }
}

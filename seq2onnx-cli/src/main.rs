use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use log::{error, info, warn};
use seq2onnx_convert::backends::{CommandDecodeRunner, CommandGraphExporter, HubTokenizerProvider};
use seq2onnx_convert::{
    ConversionConfig, DEFAULT_MODEL_ID, DEFAULT_OUTPUT_DIR, DEFAULT_TEST_INPUT, Verification,
    convert_model, parse_truthy,
};
use seq2onnx_fixtures::{
    FixtureGenerator, ParallelCorpus, fetch_tokenizer_definition, tokenizer_from_definition,
    write_fixture_files,
};

/// Define the convert subcommand.
fn convert_subcommand() -> Command {
    Command::new("convert")
        .about("Convert a seq2seq model into encoder/init-decoder/decoder ONNX graphs")
        .arg(
            Arg::new("MODEL_ID")
                .help("Model identifier (hub id or local model directory)")
                .default_value(DEFAULT_MODEL_ID)
                .index(1),
        )
        .arg(
            Arg::new("OUTPUT_DIR")
                .help("Directory receiving the published artifacts")
                .default_value(DEFAULT_OUTPUT_DIR)
                .index(2),
        )
        .arg(
            Arg::new("QUANTIZED")
                .help("Quantize graph weights: true|1|yes (case-insensitive), anything else is false")
                .default_value("true")
                .index(3),
        )
        .arg(
            Arg::new("TEST_INPUT")
                .help("Input for the post-publish beam-search smoke test")
                .default_value(DEFAULT_TEST_INPUT)
                .index(4),
        )
        .arg(
            Arg::new("export-tool")
                .long("export-tool")
                .value_name("CMD")
                .help("External graph exporter command")
                .default_value("fastt5-export"),
        )
        .arg(
            Arg::new("decode-tool")
                .long("decode-tool")
                .value_name("CMD")
                .help("External beam-search runner command")
                .default_value("fastt5-generate"),
        )
}

/// Define the fixtures subcommand.
fn fixtures_subcommand() -> Command {
    Command::new("fixtures")
        .about("Generate a golden tokenizer regression fixture from a bilingual corpus")
        .arg(
            Arg::new("MODEL_ID")
                .help("Model identifier whose tokenizer is snapshotted")
                .default_value("t5-base")
                .index(1),
        )
        .arg(
            Arg::new("CORPUS")
                .help("JSON Lines parallel corpus ({\"translation\": {\"en\": ..., \"fr\": ...}})")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("OUTPUT_DIR")
                .help("Directory receiving the fixture files")
                .default_value(".")
                .index(3),
        )
        .arg(
            Arg::new("num-tests")
                .long("num-tests")
                .short('n')
                .value_name("INT")
                .help("Number of corpus examples to snapshot")
                .default_value("1000")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("lang-a")
                .long("lang-a")
                .value_name("LANG")
                .help("First language key of each corpus record")
                .default_value("en"),
        )
        .arg(
            Arg::new("lang-b")
                .long("lang-b")
                .value_name("LANG")
                .help("Second language key of each corpus record")
                .default_value("fr"),
        )
}

/// Run the convert command with the provided arguments.
fn run_convert_command(matches: &ArgMatches) -> Result<()> {
    let config = ConversionConfig {
        model_id: matches.get_one::<String>("MODEL_ID").unwrap().clone(),
        output_dir: PathBuf::from(matches.get_one::<String>("OUTPUT_DIR").unwrap()),
        quantized: parse_truthy(matches.get_one::<String>("QUANTIZED").unwrap()),
        test_input: matches.get_one::<String>("TEST_INPUT").unwrap().clone(),
    };

    let provider = HubTokenizerProvider::new();
    let exporter = CommandGraphExporter::new(matches.get_one::<String>("export-tool").unwrap());
    let runner = CommandDecodeRunner::new(matches.get_one::<String>("decode-tool").unwrap());

    let outcome = convert_model(&config, &provider, &exporter, &runner)?;

    match outcome.verification {
        Verification::Passed { output } => {
            info!("> {}", config.test_input);
            info!("< {output}");
        }
        Verification::Warning { reason } => {
            warn!("Smoke test did not confirm the export: {reason}");
        }
    }

    Ok(())
}

/// Run the fixtures command with the provided arguments.
fn run_fixtures_command(matches: &ArgMatches) -> Result<()> {
    let model_id = matches.get_one::<String>("MODEL_ID").unwrap();
    let corpus_path = PathBuf::from(matches.get_one::<String>("CORPUS").unwrap());
    let output_dir = PathBuf::from(matches.get_one::<String>("OUTPUT_DIR").unwrap());
    let num_tests = *matches.get_one::<usize>("num-tests").unwrap();
    let lang_a = matches.get_one::<String>("lang-a").unwrap();
    let lang_b = matches.get_one::<String>("lang-b").unwrap();

    let corpus = ParallelCorpus::from_jsonl(&corpus_path, lang_a, lang_b)?;
    info!("📚 Loaded {} corpus examples", corpus.len());

    let definition = fetch_tokenizer_definition(model_id)?;
    let tokenizer = tokenizer_from_definition(&definition)?;

    let fixtures = FixtureGenerator::new(num_tests).generate(&tokenizer, &corpus)?;
    write_fixture_files(model_id, &fixtures, &definition, &output_dir)?;

    Ok(())
}

fn execute_commands() -> Result<()> {
    // Initialize logger with clean format (no timestamp/module prefix)
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "{}", record.args())
        })
        .init();

    let matches = Command::new("seq2onnx")
        .about("seq2onnx CLI: convert seq2seq models to ONNX and snapshot tokenizer fixtures")
        .subcommand(convert_subcommand())
        .subcommand(fixtures_subcommand())
        .get_matches();

    match matches.subcommand() {
        Some(("convert", matches)) => run_convert_command(matches),
        Some(("fixtures", matches)) => run_fixtures_command(matches),
        _ => anyhow::bail!("No subcommand specified. Use -h to print help information."),
    }
}

fn main() {
    if let Err(e) = execute_commands() {
        error!("Error: {e}");
        std::process::exit(1);
    }
}

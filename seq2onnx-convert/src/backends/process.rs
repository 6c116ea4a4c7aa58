//! External-command implementations of the graph export and beam-search
//! decode capabilities.
//!
//! The tracing/export engine and the decode runner are heavy numerical tools
//! living outside this crate; these backends drive them as child processes
//! over a small file and JSON-stdio contract.

use anyhow::{Context, Result, anyhow, bail};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::capabilities::{DecodeRunner, GraphExporter};
use crate::graphs::ExportedGraphSet;
use crate::naming::GraphRole;
use crate::publish::PublishedArtifacts;

/// Graph exporter driving an external exporter command.
///
/// `<program> export <model_id> <build_dir>` must leave `encoder.onnx`,
/// `init-decoder.onnx` and `decoder.onnx` in the build directory, and
/// `<program> quantize <graph> <output>` must write a quantized copy.
#[derive(Debug, Clone)]
pub struct CommandGraphExporter {
    program: String,
}

impl CommandGraphExporter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl GraphExporter for CommandGraphExporter {
    fn export_graphs(&self, model_id: &str, build_dir: &Path) -> Result<ExportedGraphSet> {
        info!("⚙️ Running exporter `{}` for `{model_id}`", self.program);
        let status = Command::new(&self.program)
            .arg("export")
            .arg(model_id)
            .arg(build_dir)
            .status()
            .with_context(|| format!("failed to launch exporter `{}`", self.program))?;
        if !status.success() {
            bail!(
                "exporter `{}` exited with {status} for `{model_id}`",
                self.program
            );
        }

        let build_path = |role: GraphRole| build_dir.join(format!("{}.onnx", role.as_str()));
        for role in GraphRole::ALL {
            let path = build_path(role);
            if !path.is_file() {
                bail!(
                    "exporter did not produce the {role} graph at {}",
                    path.display()
                );
            }
        }

        Ok(ExportedGraphSet::new(
            build_path(GraphRole::Encoder),
            build_path(GraphRole::InitDecoder),
            build_path(GraphRole::Decoder),
        ))
    }

    fn quantize(&self, graph: &Path) -> Result<PathBuf> {
        let output = quantized_sibling(graph)?;
        let status = Command::new(&self.program)
            .arg("quantize")
            .arg(graph)
            .arg(&output)
            .status()
            .with_context(|| format!("failed to launch quantizer `{}`", self.program))?;
        if !status.success() {
            bail!(
                "quantizer `{}` exited with {status} for {}",
                self.program,
                graph.display()
            );
        }
        if !output.is_file() {
            bail!("quantizer did not write {}", output.display());
        }
        Ok(output)
    }
}

/// `foo.onnx` becomes `foo-quantized.onnx` next to the original.
fn quantized_sibling(graph: &Path) -> Result<PathBuf> {
    let stem = graph
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("graph path has no file stem: {}", graph.display()))?;
    Ok(graph.with_file_name(format!("{stem}-quantized.onnx")))
}

/// Request handed to the external runner on stdin.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    encoder: &'a Path,
    init_decoder: &'a Path,
    decoder: &'a Path,
    input_ids: &'a [u32],
    attention_mask: &'a [u32],
    num_beams: usize,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    output_ids: Vec<u32>,
}

/// Beam-search runner driving an external decode command over JSON stdio.
#[derive(Debug, Clone)]
pub struct CommandDecodeRunner {
    program: String,
}

impl CommandDecodeRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl DecodeRunner for CommandDecodeRunner {
    fn generate(
        &self,
        artifacts: &PublishedArtifacts,
        input_ids: &[u32],
        attention_mask: &[u32],
        num_beams: usize,
    ) -> Result<Vec<u32>> {
        let request = GenerateRequest {
            encoder: &artifacts.encoder,
            init_decoder: &artifacts.init_decoder,
            decoder: &artifacts.decoder,
            input_ids,
            attention_mask,
            num_beams,
        };

        let mut child = Command::new(&self.program)
            .arg("generate")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to launch runner `{}`", self.program))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("runner stdin unavailable"))?;
        serde_json::to_writer(stdin, &request).context("writing generate request")?;

        let output = child
            .wait_with_output()
            .with_context(|| format!("waiting for runner `{}`", self.program))?;
        if !output.status.success() {
            bail!("runner `{}` exited with {}", self.program, output.status);
        }

        let response: GenerateResponse =
            serde_json::from_slice(&output.stdout).context("parsing runner response")?;
        Ok(response.output_ids)
    }
}

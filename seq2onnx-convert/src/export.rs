use log::info;
use std::path::Path;

use crate::capabilities::GraphExporter;
use crate::error::ConvertError;
use crate::graphs::ExportedGraphSet;
use crate::naming::GraphRole;

/// Adapter over the external export engine that enforces the quantization
/// policy: either no graph is quantized or all three are.
pub struct GraphExportAdapter<'a> {
    exporter: &'a dyn GraphExporter,
}

impl<'a> GraphExportAdapter<'a> {
    pub fn new(exporter: &'a dyn GraphExporter) -> Self {
        Self { exporter }
    }

    /// Export the three graphs for `model_id` into the build directory,
    /// quantizing all of them when requested.
    ///
    /// Any export or quantization failure is fatal to the run; no partial
    /// graph set is ever handed to the publisher.
    pub fn export(
        &self,
        model_id: &str,
        build_dir: &Path,
        quantized: bool,
    ) -> Result<ExportedGraphSet, ConvertError> {
        let export_error = |cause| ConvertError::GraphExport {
            model_id: model_id.to_string(),
            cause,
        };

        let mut graphs = self
            .exporter
            .export_graphs(model_id, build_dir)
            .map_err(export_error)?;
        info!("📦 Exported encoder, init-decoder and decoder graphs");

        if quantized {
            for role in GraphRole::ALL {
                let quantized_path = self
                    .exporter
                    .quantize(graphs.get(role))
                    .map_err(export_error)?;
                graphs = graphs.with_path(role, quantized_path);
            }
            info!("🧮 Quantized weights of all three graphs");
        }

        Ok(graphs)
    }
}

use std::path::{Path, PathBuf};

use crate::naming::GraphRole;

/// The three computation graphs produced by one export run, keyed by role.
///
/// Paths point into the build-intermediate directory until the publisher
/// copies them into the output directory; after publishing the intermediate
/// copies may be discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedGraphSet {
    encoder: PathBuf,
    init_decoder: PathBuf,
    decoder: PathBuf,
}

impl ExportedGraphSet {
    pub fn new(encoder: PathBuf, init_decoder: PathBuf, decoder: PathBuf) -> Self {
        Self {
            encoder,
            init_decoder,
            decoder,
        }
    }

    pub fn get(&self, role: GraphRole) -> &Path {
        match role {
            GraphRole::Encoder => &self.encoder,
            GraphRole::InitDecoder => &self.init_decoder,
            GraphRole::Decoder => &self.decoder,
        }
    }

    /// Replace one role's path, e.g. after quantization rewrote the file.
    pub fn with_path(mut self, role: GraphRole, path: PathBuf) -> Self {
        match role {
            GraphRole::Encoder => self.encoder = path,
            GraphRole::InitDecoder => self.init_decoder = path,
            GraphRole::Decoder => self.decoder = path,
        }
        self
    }

    /// Roles with their current paths, in publish order.
    pub fn iter(&self) -> impl Iterator<Item = (GraphRole, &Path)> {
        GraphRole::ALL.into_iter().map(|role| (role, self.get(role)))
    }
}

//! Production implementations of the external capability interfaces.

mod hub;
mod process;

pub use hub::HubTokenizerProvider;
pub use process::{CommandDecodeRunner, CommandGraphExporter};

mod generator_client;
mod project_store;

pub use generator_client::{ArtifactKind, GeneratorClient};
pub use project_store::{ProjectStore, StoredProject};

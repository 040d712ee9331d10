pub mod assets;
pub mod generator_client_http;
pub mod project_store_filesystem;
pub mod zip_archive;

pub use generator_client_http::HttpGeneratorClient;
pub use project_store_filesystem::FilesystemProjectStore;

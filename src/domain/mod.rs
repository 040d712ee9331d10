pub mod bundle;
pub mod compose;
pub mod credentials;
pub mod descriptors;
pub mod error;
pub mod port_table;
pub mod project;
pub mod report;
pub mod site;

pub use bundle::{BundleFile, GeneratedBundle};
pub use compose::{ComposeManifest, ServiceBlock};
pub use credentials::CredentialGenerator;
pub use descriptors::{ProjectIdentity, Service};
pub use error::AppError;
pub use port_table::default_port;
pub use project::{Project, ProjectContext};
pub use report::{Credential, CredentialsReport, SENSITIVE_WARNING};
pub use site::{EnvInput, Profile, SiteSpec};

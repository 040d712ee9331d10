mod fake_generator_client;
mod memory_project_store;

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{CredentialGenerator, Project, ProjectIdentity, SiteSpec};

#[allow(unused_imports)]
pub use fake_generator_client::FakeGeneratorClient;
#[allow(unused_imports)]
pub use memory_project_store::MemoryProjectStore;

pub const ACME_ENV: &str = "SITE_TITLE=Acme\nSITE_URL=acme.example.com\n";

pub fn acme_site() -> SiteSpec {
    SiteSpec::new("Acme", "acme.example.com").unwrap()
}

/// Identity with a fixed slug so names are predictable in assertions.
pub fn identity() -> ProjectIdentity {
    ProjectIdentity::with_slug(&acme_site(), "acme-0011aabb".to_string())
}

/// Full-profile project built from a seeded generator.
pub fn acme_project() -> Project {
    Project::build_with_identity(acme_site(), identity(), &mut CredentialGenerator::seeded(7))
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

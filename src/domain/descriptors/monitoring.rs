use super::{ProjectIdentity, Service};
use crate::domain::compose::{Route, ServiceBlock};
use crate::domain::port_table::default_port;
use crate::domain::report::Credential;

const ROLE: &str = "monitoring";
const IMAGE: &str = "gcr.io/cadvisor/cadvisor:v0.39.0";
const HOST_PORT: u16 = 8888;

/// Host mounts cAdvisor needs to read container metrics.
const HOST_MOUNTS: &[(&str, &str, bool)] = &[
    ("/", "/rootfs", true),
    ("/var/run", "/var/run", false),
    ("/sys", "/sys", true),
    ("/var/lib/docker/", "/var/lib/docker", true),
    ("/dev/disk/", "/dev/disk", true),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monitoring {
    pub service_name: String,
    pub network: String,
    pub public_host: String,
    pub port: u16,
}

impl Monitoring {
    pub fn new(identity: &ProjectIdentity) -> Self {
        Self {
            service_name: identity.service_name(ROLE),
            network: identity.network.clone(),
            public_host: identity.subdomain(ROLE),
            port: default_port("cAdvisor"),
        }
    }
}

impl Service for Monitoring {
    fn role(&self) -> &'static str {
        ROLE
    }

    fn display_name(&self) -> &'static str {
        "Monitoring"
    }

    fn service_name(&self) -> &str {
        &self.service_name
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn block(&self) -> ServiceBlock {
        let block = HOST_MOUNTS.iter().fold(
            ServiceBlock::new(&self.service_name, IMAGE, &self.network).privileged(),
            |block, (source, target, read_only)| block.bind(source, target, *read_only),
        );
        block
            .env("TZ", "UTC")
            .port(HOST_PORT, self.port)
            .route(Route::to_port(&self.public_host, self.port))
    }

    fn credentials(&self) -> Vec<Credential> {
        vec![Credential::info("URL", format!("https://{}", self.public_host))]
    }
}

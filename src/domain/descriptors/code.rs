use rand::RngCore;

use super::{ProjectIdentity, Service};
use crate::domain::compose::{Route, ServiceBlock};
use crate::domain::credentials::CredentialGenerator;
use crate::domain::port_table::default_port;
use crate::domain::report::Credential;

const ROLE: &str = "code";
const IMAGE: &str = "codercom/code-server:latest";
const HOST_PORT: u16 = 9999;
const WORKSPACE: &str = "/home/coder/project";

/// Browser IDE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    pub service_name: String,
    pub network: String,
    pub volume: String,
    pub public_host: String,
    pub port: u16,
    pub password: String,
}

impl Code {
    pub fn new<R: RngCore>(
        identity: &ProjectIdentity,
        generator: &mut CredentialGenerator<R>,
    ) -> Self {
        Self {
            service_name: identity.service_name(ROLE),
            network: identity.network.clone(),
            volume: identity.volume_name(ROLE),
            public_host: identity.subdomain(ROLE),
            port: default_port("Code-server"),
            password: generator.generate_password(),
        }
    }
}

impl Service for Code {
    fn role(&self) -> &'static str {
        ROLE
    }

    fn display_name(&self) -> &'static str {
        "Code"
    }

    fn service_name(&self) -> &str {
        &self.service_name
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn block(&self) -> ServiceBlock {
        ServiceBlock::new(&self.service_name, IMAGE, &self.network)
            .env("PASSWORD", &self.password)
            .env("SUDO_PASSWORD", &self.password)
            .env("TZ", "UTC")
            .volume(&self.volume, WORKSPACE)
            .port(HOST_PORT, self.port)
            .route(Route::to_port(&self.public_host, self.port))
    }

    fn credentials(&self) -> Vec<Credential> {
        vec![
            Credential::info("URL", format!("https://{}", self.public_host)),
            Credential::secret("Password", &self.password),
        ]
    }
}

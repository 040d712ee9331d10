use rand::RngCore;

use super::{ProjectIdentity, Service};
use crate::domain::compose::{Command, Route, ServiceBlock};
use crate::domain::credentials::CredentialGenerator;
use crate::domain::port_table::default_port;
use crate::domain::report::Credential;

const ROLE: &str = "management";
const IMAGE: &str = "portainer/portainer-ce:latest";
const ADMIN_USER: &str = "admin";
const DOCKER_SOCKET: &str = "/var/run/docker.sock";

/// Portainer container management UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Management {
    pub service_name: String,
    pub network: String,
    pub volume: String,
    pub public_host: String,
    pub port: u16,
    pub password: String,
}

impl Management {
    pub fn new<R: RngCore>(
        identity: &ProjectIdentity,
        generator: &mut CredentialGenerator<R>,
    ) -> Self {
        Self {
            service_name: identity.service_name(ROLE),
            network: identity.network.clone(),
            volume: identity.volume_name(ROLE),
            public_host: identity.subdomain(ROLE),
            port: default_port("Portainer"),
            password: generator.generate_password(),
        }
    }
}

impl Service for Management {
    fn role(&self) -> &'static str {
        ROLE
    }

    fn display_name(&self) -> &'static str {
        "Management"
    }

    fn service_name(&self) -> &str {
        &self.service_name
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn block(&self) -> ServiceBlock {
        ServiceBlock::new(&self.service_name, IMAGE, &self.network)
            .command(Command::args([
                "-H".to_string(),
                format!("unix://{}", DOCKER_SOCKET),
                "--admin-password".to_string(),
                self.password.clone(),
            ]))
            .bind(DOCKER_SOCKET, DOCKER_SOCKET, true)
            .volume(&self.volume, "/data")
            .port(self.port, self.port)
            .route(Route::to_port(&self.public_host, self.port))
    }

    fn credentials(&self) -> Vec<Credential> {
        vec![
            Credential::info("URL", format!("https://{}", self.public_host)),
            Credential::info("Username", ADMIN_USER),
            Credential::secret("Password", &self.password),
        ]
    }
}

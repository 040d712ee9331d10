use rand::RngCore;

use super::{ProjectIdentity, Service};
use crate::domain::compose::{Command, ServiceBlock};
use crate::domain::credentials::CredentialGenerator;
use crate::domain::port_table::default_port;
use crate::domain::report::Credential;

const ROLE: &str = "cache";
const IMAGE: &str = "redis:latest";
const MAX_MEMORY: &str = "256mb";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cache {
    pub service_name: String,
    pub network: String,
    pub volume: String,
    pub port: u16,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLink {
    pub host: String,
    pub port: u16,
    pub password: String,
}

impl Cache {
    pub fn new<R: RngCore>(
        identity: &ProjectIdentity,
        generator: &mut CredentialGenerator<R>,
    ) -> Self {
        Self {
            service_name: identity.service_name(ROLE),
            network: identity.network.clone(),
            volume: identity.volume_name(ROLE),
            port: default_port("Redis"),
            password: generator.generate_password(),
        }
    }

    pub fn link(&self) -> CacheLink {
        CacheLink {
            host: self.service_name.clone(),
            port: self.port,
            password: self.password.clone(),
        }
    }
}

impl Service for Cache {
    fn role(&self) -> &'static str {
        ROLE
    }

    fn display_name(&self) -> &'static str {
        "Cache"
    }

    fn service_name(&self) -> &str {
        &self.service_name
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn block(&self) -> ServiceBlock {
        ServiceBlock::new(&self.service_name, IMAGE, &self.network)
            .command(Command::line(format!(
                "redis-server --requirepass {} --appendonly yes --maxmemory {} --maxmemory-policy allkeys-lru",
                self.password, MAX_MEMORY
            )))
            .volume(&self.volume, "/data")
            .port(self.port, self.port)
    }

    fn credentials(&self) -> Vec<Credential> {
        vec![Credential::secret("Password", &self.password)]
    }
}

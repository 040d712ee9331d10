use rand::RngCore;

use super::{ProjectIdentity, Service};
use crate::domain::compose::ServiceBlock;
use crate::domain::credentials::CredentialGenerator;
use crate::domain::port_table::default_port;
use crate::domain::report::Credential;

const ROLE: &str = "vault";
const IMAGE: &str = "hashicorp/vault:latest";

/// Secrets store in dev mode, unsealed with a generated root token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    pub service_name: String,
    pub network: String,
    pub volume: String,
    pub port: u16,
    pub root_token: String,
}

impl Vault {
    pub fn new<R: RngCore>(
        identity: &ProjectIdentity,
        generator: &mut CredentialGenerator<R>,
    ) -> Self {
        Self {
            service_name: identity.service_name(ROLE),
            network: identity.network.clone(),
            volume: identity.volume_name(ROLE),
            port: default_port("Vault"),
            root_token: generator.generate_password(),
        }
    }
}

impl Service for Vault {
    fn role(&self) -> &'static str {
        ROLE
    }

    fn display_name(&self) -> &'static str {
        "Vault"
    }

    fn service_name(&self) -> &str {
        &self.service_name
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn block(&self) -> ServiceBlock {
        ServiceBlock::new(&self.service_name, IMAGE, &self.network)
            .cap_add("IPC_LOCK")
            .env("VAULT_DEV_ROOT_TOKEN_ID", &self.root_token)
            .env("VAULT_DEV_LISTEN_ADDRESS", format!("0.0.0.0:{}", self.port))
            .volume(&self.volume, "/vault/file")
            .port(self.port, self.port)
    }

    fn credentials(&self) -> Vec<Credential> {
        vec![
            Credential::info("Address", format!("http://{}:{}", self.service_name, self.port)),
            Credential::secret("Password", &self.root_token),
        ]
    }
}

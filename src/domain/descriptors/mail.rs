use rand::RngCore;

use super::{ProjectIdentity, Service};
use crate::domain::compose::{Route, ServiceBlock};
use crate::domain::credentials::CredentialGenerator;
use crate::domain::port_table::default_port;
use crate::domain::report::Credential;

const ROLE: &str = "mail";
const IMAGE: &str = "mailhog/mailhog:latest";
const SMTP_PORT: u16 = 1025;
const MAILDIR: &str = "/maildir";

/// SMTP catcher with a web inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mail {
    pub service_name: String,
    pub network: String,
    pub volume: String,
    pub public_host: String,
    /// Web inbox port.
    pub port: u16,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
}

/// SMTP settings copied out of a [`Mail`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailLink {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl Mail {
    pub fn new<R: RngCore>(
        identity: &ProjectIdentity,
        generator: &mut CredentialGenerator<R>,
    ) -> Self {
        Self {
            service_name: identity.service_name(ROLE),
            network: identity.network.clone(),
            volume: identity.volume_name(ROLE),
            public_host: identity.subdomain(ROLE),
            port: default_port("Mailhog"),
            smtp_port: SMTP_PORT,
            username: generator.generate_username(),
            password: generator.generate_password(),
        }
    }

    pub fn link(&self) -> MailLink {
        MailLink {
            host: self.service_name.clone(),
            port: self.smtp_port,
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

impl Service for Mail {
    fn role(&self) -> &'static str {
        ROLE
    }

    fn display_name(&self) -> &'static str {
        "Mail"
    }

    fn service_name(&self) -> &str {
        &self.service_name
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn block(&self) -> ServiceBlock {
        ServiceBlock::new(&self.service_name, IMAGE, &self.network)
            .env("MH_SMTP_BIND_ADDR", format!("0.0.0.0:{}", self.smtp_port))
            .env("MH_UI_BIND_ADDR", format!("0.0.0.0:{}", self.port))
            .env("MH_API_BIND_ADDR", format!("0.0.0.0:{}", self.port))
            .env("MH_STORAGE", "maildir")
            .env("MH_MAILDIR_PATH", MAILDIR)
            .volume(&self.volume, MAILDIR)
            .port(self.port, self.port)
            .port(self.smtp_port, self.smtp_port)
            .route(Route::to_port(&self.public_host, self.port))
    }

    fn credentials(&self) -> Vec<Credential> {
        vec![
            Credential::info("URL", format!("https://{}", self.public_host)),
            Credential::info("SMTP Port", self.smtp_port.to_string()),
            Credential::info("Username", &self.username),
            Credential::secret("Password", &self.password),
        ]
    }
}

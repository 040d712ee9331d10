use super::{DatabaseLink, ProjectIdentity, Service};
use crate::domain::compose::{Route, ServiceBlock};
use crate::domain::port_table::default_port;
use crate::domain::report::Credential;

const ROLE: &str = "admin";
const IMAGE: &str = "phpmyadmin:latest";
const HOST_PORT: u16 = 3307;

/// phpMyAdmin bound to the project database. Uses the database credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub service_name: String,
    pub network: String,
    pub public_host: String,
    pub port: u16,
    pub database: DatabaseLink,
}

impl Admin {
    pub fn new(identity: &ProjectIdentity, database: DatabaseLink) -> Self {
        Self {
            service_name: identity.service_name(ROLE),
            network: identity.network.clone(),
            public_host: identity.subdomain(ROLE),
            port: default_port("Apache"),
            database,
        }
    }
}

impl Service for Admin {
    fn role(&self) -> &'static str {
        ROLE
    }

    fn display_name(&self) -> &'static str {
        "Admin"
    }

    fn service_name(&self) -> &str {
        &self.service_name
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn block(&self) -> ServiceBlock {
        ServiceBlock::new(&self.service_name, IMAGE, &self.network)
            .env("PMA_HOST", &self.database.host)
            .env("PMA_PORT", self.database.port.to_string())
            .env("PMA_USER", &self.database.user)
            .env("PMA_PASSWORD", &self.database.password)
            .env("UPLOAD_LIMIT", "64M")
            .port(HOST_PORT, self.port)
            .depends_on(&self.database.host)
            .route(Route::to_port(&self.public_host, self.port))
    }

    fn credentials(&self) -> Vec<Credential> {
        vec![Credential::info("URL", format!("https://{}", self.public_host))]
    }
}

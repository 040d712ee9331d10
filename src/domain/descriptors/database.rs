use rand::RngCore;

use super::{ProjectIdentity, Service};
use crate::domain::compose::{Command, Healthcheck, ServiceBlock};
use crate::domain::credentials::CredentialGenerator;
use crate::domain::port_table::default_port;
use crate::domain::report::Credential;

const ROLE: &str = "database";
const IMAGE: &str = "mariadb:latest";
const DATA_DIR: &str = "/var/lib/mysql";
const CHARACTER_SET: &str = "utf8mb4";
const TABLE_PREFIX: &str = "wpapp_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    pub service_name: String,
    pub network: String,
    pub volume: String,
    pub port: u16,
    pub database_name: String,
    pub user: String,
    pub password: String,
    pub root_password: String,
    pub character_set: String,
    pub table_prefix: String,
}

/// Connection details copied out of a [`Database`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseLink {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub table_prefix: String,
}

impl DatabaseLink {
    /// `host:port` as WordPress expects it.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Database {
    pub fn new<R: RngCore>(
        identity: &ProjectIdentity,
        generator: &mut CredentialGenerator<R>,
    ) -> Self {
        let database_name = format!("wp_{}", generator.generate_username());
        let user = generator.generate_username();
        Self {
            service_name: identity.service_name(ROLE),
            network: identity.network.clone(),
            volume: identity.volume_name(ROLE),
            port: default_port("MariaDB"),
            database_name,
            user,
            password: generator.generate_password(),
            root_password: generator.generate_password(),
            character_set: CHARACTER_SET.to_string(),
            table_prefix: TABLE_PREFIX.to_string(),
        }
    }

    pub fn link(&self) -> DatabaseLink {
        DatabaseLink {
            host: self.service_name.clone(),
            port: self.port,
            name: self.database_name.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            table_prefix: self.table_prefix.clone(),
        }
    }
}

impl Service for Database {
    fn role(&self) -> &'static str {
        ROLE
    }

    fn display_name(&self) -> &'static str {
        "Database"
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
                format!("--character-set-server={}", self.character_set),
                format!("--collation-server={}_unicode_ci", self.character_set),
            ]))
            .env("MARIADB_DATABASE", &self.database_name)
            .env("MARIADB_USER", &self.user)
            .env("MARIADB_PASSWORD", &self.password)
            .env("MARIADB_ROOT_PASSWORD", &self.root_password)
            .volume(&self.volume, DATA_DIR)
            .port(self.port, self.port)
            .healthcheck(Healthcheck {
                test: ["CMD", "healthcheck.sh", "--connect", "--innodb_initialized"]
                    .map(String::from)
                    .to_vec(),
                interval: "10s".to_string(),
                timeout: "5s".to_string(),
                retries: 5,
            })
    }

    fn credentials(&self) -> Vec<Credential> {
        vec![
            Credential::info("Database", &self.database_name),
            Credential::info("Username", &self.user),
            Credential::secret("Password", &self.password),
            Credential::secret("Root Password", &self.root_password),
            Credential::info("Table Prefix", &self.table_prefix),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::identity;

    #[test]
    fn block_carries_generated_secrets() {
        let db = Database::new(&identity(), &mut CredentialGenerator::seeded(1));
        let block = db.block();

        assert_eq!(block.environment.get("MARIADB_PASSWORD"), Some(db.password.as_str()));
        assert_eq!(block.environment.get("MARIADB_ROOT_PASSWORD"), Some(db.root_password.as_str()));
        assert_ne!(db.password, db.root_password);
        assert!(block.healthcheck.is_some());
        assert_eq!(block.ports[0].to_string(), "3306:3306");
    }

    #[test]
    fn link_is_a_snapshot() {
        let mut db = Database::new(&identity(), &mut CredentialGenerator::seeded(1));
        let link = db.link();
        let original = db.password.clone();

        db.password = "changed".to_string();
        assert_eq!(link.password, original);
        assert_eq!(link.address(), format!("{}:3306", db.service_name));
    }
}

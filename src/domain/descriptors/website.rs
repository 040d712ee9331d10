use rand::RngCore;

use super::{CacheLink, DatabaseLink, MailLink, ProjectIdentity, Service};
use crate::domain::compose::{Route, ServiceBlock};
use crate::domain::credentials::CredentialGenerator;
use crate::domain::port_table::default_port;
use crate::domain::report::Credential;

const ROLE: &str = "website";
const IMAGE: &str = "wordpress:latest";
const DOCROOT: &str = "/var/www/html";

/// WordPress front end. Holds snapshots of the database, mail and cache it talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Website {
    pub service_name: String,
    pub network: String,
    pub volume: String,
    pub port: u16,
    pub title: String,
    /// External host name, never the container host name.
    pub site_url: String,
    pub admin_username: String,
    pub admin_password: String,
    pub admin_email: String,
    /// Mount the certificate helper script from the project directory.
    pub setup_scripts: bool,
    pub database: DatabaseLink,
    pub mail: MailLink,
    pub cache: CacheLink,
}

/// Site and admin details copied out of a [`Website`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteLink {
    pub service_name: String,
    pub volume: String,
    pub title: String,
    pub site_url: String,
    pub admin_username: String,
    pub admin_password: String,
    pub admin_email: String,
}

impl Website {
    pub fn new<R: RngCore>(
        identity: &ProjectIdentity,
        generator: &mut CredentialGenerator<R>,
        database: DatabaseLink,
        mail: MailLink,
        cache: CacheLink,
    ) -> Self {
        Self {
            service_name: identity.service_name(ROLE),
            network: identity.network.clone(),
            volume: identity.volume_name(ROLE),
            port: default_port("WordPress"),
            title: identity.title.clone(),
            site_url: identity.host.clone(),
            admin_username: generator.generate_username(),
            admin_password: generator.generate_password(),
            admin_email: generator.generate_email(&identity.host, ROLE),
            setup_scripts: false,
            database,
            mail,
            cache,
        }
    }

    pub fn with_setup_scripts(mut self, enabled: bool) -> Self {
        self.setup_scripts = enabled;
        self
    }

    pub fn link(&self) -> WebsiteLink {
        WebsiteLink {
            service_name: self.service_name.clone(),
            volume: self.volume.clone(),
            title: self.title.clone(),
            site_url: self.site_url.clone(),
            admin_username: self.admin_username.clone(),
            admin_password: self.admin_password.clone(),
            admin_email: self.admin_email.clone(),
        }
    }
}

impl Service for Website {
    fn role(&self) -> &'static str {
        ROLE
    }

    fn display_name(&self) -> &'static str {
        "Website"
    }

    fn service_name(&self) -> &str {
        &self.service_name
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn block(&self) -> ServiceBlock {
        let mut block = ServiceBlock::new(&self.service_name, IMAGE, &self.network)
            .env("WORDPRESS_DB_HOST", self.database.address())
            .env("WORDPRESS_DB_NAME", &self.database.name)
            .env("WORDPRESS_DB_USER", &self.database.user)
            .env("WORDPRESS_DB_PASSWORD", &self.database.password)
            .env("WORDPRESS_TABLE_PREFIX", &self.database.table_prefix)
            .env("WORDPRESS_SITE_URL", format!("https://{}", self.site_url))
            .env("WORDPRESS_SITE_TITLE", &self.title)
            .env("WORDPRESS_ADMIN_USER", &self.admin_username)
            .env("WORDPRESS_ADMIN_PASSWORD", &self.admin_password)
            .env("WORDPRESS_ADMIN_EMAIL", &self.admin_email)
            .env("WORDPRESS_SMTP_HOST", &self.mail.host)
            .env("WORDPRESS_SMTP_PORT", self.mail.port.to_string())
            .env("WORDPRESS_SMTP_USER", &self.mail.username)
            .env("WORDPRESS_SMTP_PASSWORD", &self.mail.password)
            .env("WORDPRESS_REDIS_HOST", &self.cache.host)
            .env("WORDPRESS_REDIS_PORT", self.cache.port.to_string())
            .env("WORDPRESS_REDIS_PASSWORD", &self.cache.password)
            .volume(&self.volume, DOCROOT);

        if self.setup_scripts {
            block = block.bind("./cert.sh", "/usr/local/bin/cert.sh", true);
        }

        block
            .depends_on(&self.database.host)
            .depends_on(&self.cache.host)
            .depends_on(&self.mail.host)
            .route(Route::to_port(&self.site_url, self.port).also(format!("www.{}", self.site_url)))
    }

    fn credentials(&self) -> Vec<Credential> {
        vec![
            Credential::info("URL", format!("https://{}", self.site_url)),
            Credential::info("Admin URL", format!("https://{}/wp-admin", self.site_url)),
            Credential::info("Username", &self.admin_username),
            Credential::secret("Password", &self.admin_password),
            Credential::info("Email", &self.admin_email),
        ]
    }
}

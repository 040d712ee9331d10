use super::{DatabaseLink, ProjectIdentity, Service, WebsiteLink};
use crate::domain::compose::{Command, ServiceBlock};
use crate::domain::port_table::default_port;

const ROLE: &str = "wpcli";
const IMAGE: &str = "wordpress:cli";
const DOCROOT: &str = "/var/www/html";
const SETUP_SCRIPT: &str = "/scripts/woo.sh";

/// WP-CLI sidecar sharing the website document root. Runs `woo.sh` on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WpCli {
    pub service_name: String,
    pub network: String,
    pub port: u16,
    pub website: WebsiteLink,
    pub database: DatabaseLink,
}

impl WpCli {
    pub fn new(identity: &ProjectIdentity, website: WebsiteLink, database: DatabaseLink) -> Self {
        Self {
            service_name: identity.service_name(ROLE),
            network: identity.network.clone(),
            port: default_port("WordPress"),
            website,
            database,
        }
    }
}

impl Service for WpCli {
    fn role(&self) -> &'static str {
        ROLE
    }

    fn display_name(&self) -> &'static str {
        "WP-CLI"
    }

    fn service_name(&self) -> &str {
        &self.service_name
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn block(&self) -> ServiceBlock {
        ServiceBlock::new(&self.service_name, IMAGE, &self.network)
            .command(Command::args(["sleep", "infinity"]))
            .env("WORDPRESS_DB_HOST", self.database.address())
            .env("WORDPRESS_DB_NAME", &self.database.name)
            .env("WORDPRESS_DB_USER", &self.database.user)
            .env("WORDPRESS_DB_PASSWORD", &self.database.password)
            .env("WORDPRESS_SITE_URL", format!("https://{}", self.website.site_url))
            .env("WORDPRESS_SITE_TITLE", &self.website.title)
            .env("WORDPRESS_ADMIN_USER", &self.website.admin_username)
            .env("WORDPRESS_ADMIN_PASSWORD", &self.website.admin_password)
            .env("WORDPRESS_ADMIN_EMAIL", &self.website.admin_email)
            .volume(&self.website.volume, DOCROOT)
            .bind("./woo.sh", SETUP_SCRIPT, true)
            .depends_on(&self.website.service_name)
            .depends_on(&self.database.host)
    }
}

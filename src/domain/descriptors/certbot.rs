use super::{ProjectIdentity, Service};
use crate::domain::compose::{Command, ServiceBlock};
use crate::domain::port_table::default_port;

const ROLE: &str = "certbot";
const IMAGE: &str = "certbot/certbot:latest";
const RENEW_LOOP: &str = "trap exit TERM; while :; do certbot renew; sleep 12h & wait $${!}; done;";

/// Certificate renewal loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certbot {
    pub service_name: String,
    pub network: String,
    pub volume: String,
    pub port: u16,
}

impl Certbot {
    pub fn new(identity: &ProjectIdentity) -> Self {
        Self {
            service_name: identity.service_name(ROLE),
            network: identity.network.clone(),
            volume: identity.volume_name(ROLE),
            port: default_port("Certbot"),
        }
    }
}

impl Service for Certbot {
    fn role(&self) -> &'static str {
        ROLE
    }

    fn display_name(&self) -> &'static str {
        "Certbot"
    }

    fn service_name(&self) -> &str {
        &self.service_name
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn block(&self) -> ServiceBlock {
        ServiceBlock::new(&self.service_name, IMAGE, &self.network)
            .command(Command::args(["/bin/sh", "-c", RENEW_LOOP]))
            .volume(&self.volume, "/etc/letsencrypt")
    }
}

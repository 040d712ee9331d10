use super::{ProjectIdentity, Service};
use crate::domain::compose::{Command, RestartPolicy, ServiceBlock};
use crate::domain::port_table::default_port;

const ROLE: &str = "graphviz";
const IMAGE: &str = "pmsipilot/docker-compose-viz:latest";

/// One-shot diagram of the compose file itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphViz {
    pub service_name: String,
    pub network: String,
    pub volume: String,
    pub port: u16,
}

impl GraphViz {
    pub fn new(identity: &ProjectIdentity) -> Self {
        Self {
            service_name: identity.service_name(ROLE),
            network: identity.network.clone(),
            volume: identity.volume_name(ROLE),
            port: default_port("Graphviz"),
        }
    }
}

impl Service for GraphViz {
    fn role(&self) -> &'static str {
        ROLE
    }

    fn display_name(&self) -> &'static str {
        "GraphViz"
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
                "render",
                "-m",
                "image",
                "--force",
                "--output-file=/output/docker-compose.png",
                "/input/docker-compose.yml",
            ]))
            .bind("./docker-compose.yml", "/input/docker-compose.yml", true)
            .volume(&self.volume, "/output")
            .restart(RestartPolicy::No)
    }
}

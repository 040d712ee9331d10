use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

const LOG_DRIVER: &str = "json-file";
const LOG_MAX_SIZE: &str = "10m";
const LOG_MAX_FILE: &str = "5";
const ENTRYPOINT: &str = "websecure";
const CERT_RESOLVER: &str = "letsencrypt";

/// One service entry of a compose manifest.
///
/// Every descriptor renders into this structure; the shared fields
/// (names, network, restart, logging) are filled in by [`ServiceBlock::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceBlock {
    #[serde(skip)]
    pub name: String,
    pub image: String,
    pub container_name: String,
    pub hostname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Command>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub privileged: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cap_add: Vec<String>,
    #[serde(skip_serializing_if = "Environment::is_empty")]
    pub environment: Environment,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<VolumeMount>,
    pub networks: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<PortMapping>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthcheck: Option<Healthcheck>,
    pub restart: RestartPolicy,
    pub logging: Logging,
}

impl ServiceBlock {
    pub fn new(name: &str, image: &str, network: &str) -> Self {
        Self {
            name: name.to_string(),
            image: image.to_string(),
            container_name: name.to_string(),
            hostname: name.to_string(),
            command: None,
            privileged: false,
            cap_add: Vec::new(),
            environment: Environment::default(),
            volumes: Vec::new(),
            networks: vec![network.to_string()],
            ports: Vec::new(),
            depends_on: Vec::new(),
            labels: Vec::new(),
            healthcheck: None,
            restart: RestartPolicy::UnlessStopped,
            logging: Logging::default(),
        }
    }

    pub fn env(mut self, key: &str, value: impl Into<String>) -> Self {
        self.environment.insert(key, value);
        self
    }

    /// Mount a named volume declared at the manifest root.
    pub fn volume(mut self, volume: impl Into<String>, target: &str) -> Self {
        self.volumes.push(VolumeMount::Named { volume: volume.into(), target: target.to_string() });
        self
    }

    /// Mount a host path.
    pub fn bind(mut self, source: &str, target: &str, read_only: bool) -> Self {
        self.volumes.push(VolumeMount::Bind {
            source: source.to_string(),
            target: target.to_string(),
            read_only,
        });
        self
    }

    pub fn port(mut self, host: u16, container: u16) -> Self {
        self.ports.push(PortMapping { host, container });
        self
    }

    pub fn depends_on(mut self, service: impl Into<String>) -> Self {
        self.depends_on.push(service.into());
        self
    }

    pub fn command(mut self, command: Command) -> Self {
        self.command = Some(command);
        self
    }

    pub fn privileged(mut self) -> Self {
        self.privileged = true;
        self
    }

    pub fn cap_add(mut self, capability: &str) -> Self {
        self.cap_add.push(capability.to_string());
        self
    }

    pub fn healthcheck(mut self, healthcheck: Healthcheck) -> Self {
        self.healthcheck = Some(healthcheck);
        self
    }

    pub fn restart(mut self, restart: RestartPolicy) -> Self {
        self.restart = restart;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Expose the service through the reverse proxy.
    pub fn route(mut self, route: Route) -> Self {
        let router = &self.name;
        let rule = route
            .hosts
            .iter()
            .map(|host| format!("Host(`{}`)", host))
            .collect::<Vec<_>>()
            .join(" || ");

        if self.labels.is_empty() {
            self.labels.push("traefik.enable=true".to_string());
            if let Some(network) = self.networks.first() {
                self.labels.push(format!("traefik.docker.network={}", network));
            }
        }
        self.labels.push(format!("traefik.http.routers.{}.rule={}", router, rule));
        self.labels.push(format!("traefik.http.routers.{}.entrypoints={}", router, ENTRYPOINT));
        self.labels
            .push(format!("traefik.http.routers.{}.tls.certresolver={}", router, CERT_RESOLVER));
        match route.target {
            RouteTarget::Port(port) => self.labels.push(format!(
                "traefik.http.services.{}.loadbalancer.server.port={}",
                router, port
            )),
            RouteTarget::Internal(service) => {
                self.labels.push(format!("traefik.http.routers.{}.service={}", router, service))
            }
        }
        self
    }

    /// Names of the named volumes this service mounts.
    pub fn named_volumes(&self) -> impl Iterator<Item = &str> {
        self.volumes.iter().filter_map(|mount| match mount {
            VolumeMount::Named { volume, .. } => Some(volume.as_str()),
            VolumeMount::Bind { .. } => None,
        })
    }
}

/// Environment entries in insertion order; re-inserting a key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment(Vec<(String, String)>);

impl Environment {
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| existing == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(existing, _)| existing == key).map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl Serialize for Environment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Command {
    /// Single string handed to the image entrypoint.
    Line(String),
    /// Exec-form argument list.
    Args(Vec<String>),
}

impl Command {
    pub fn line(line: impl Into<String>) -> Self {
        Command::Line(line.into())
    }

    pub fn args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Command::Args(args.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolumeMount {
    Named { volume: String, target: String },
    Bind { source: String, target: String, read_only: bool },
}

impl fmt::Display for VolumeMount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeMount::Named { volume, target } => write!(f, "{}:{}", volume, target),
            VolumeMount::Bind { source, target, read_only } => {
                write!(f, "{}:{}", source, target)?;
                if *read_only {
                    write!(f, ":ro")?;
                }
                Ok(())
            }
        }
    }
}

impl Serialize for VolumeMount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMapping {
    pub host: u16,
    pub container: u16,
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.container)
    }
}

impl Serialize for PortMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Healthcheck {
    pub test: Vec<String>,
    pub interval: String,
    pub timeout: String,
    pub retries: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestartPolicy {
    #[serde(rename = "no")]
    No,
    Always,
    UnlessStopped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Logging {
    pub driver: String,
    pub options: LoggingOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggingOptions {
    #[serde(rename = "max-size")]
    pub max_size: String,
    #[serde(rename = "max-file")]
    pub max_file: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            driver: LOG_DRIVER.to_string(),
            options: LoggingOptions {
                max_size: LOG_MAX_SIZE.to_string(),
                max_file: LOG_MAX_FILE.to_string(),
            },
        }
    }
}

/// Reverse-proxy routing for one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub hosts: Vec<String>,
    pub target: RouteTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// Forward to this container port.
    Port(u16),
    /// Forward to a proxy-internal service such as `api@internal`.
    Internal(String),
}

impl Route {
    pub fn to_port(host: impl Into<String>, port: u16) -> Self {
        Self { hosts: vec![host.into()], target: RouteTarget::Port(port) }
    }

    pub fn internal(host: impl Into<String>, service: &str) -> Self {
        Self { hosts: vec![host.into()], target: RouteTarget::Internal(service.to_string()) }
    }

    pub fn also(mut self, host: impl Into<String>) -> Self {
        self.hosts.push(host.into());
        self
    }
}

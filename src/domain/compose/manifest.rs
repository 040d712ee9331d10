use std::collections::HashSet;

use serde::ser::{SerializeMap, SerializeStruct, Serializer};
use serde::Serialize;

use super::block::ServiceBlock;
use crate::domain::AppError;

/// A complete docker-compose document: one network, the volumes its services
/// mount, and the services in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeManifest {
    pub network: String,
    pub volumes: Vec<String>,
    pub services: Vec<ServiceBlock>,
}

impl ComposeManifest {
    /// Assemble a manifest, declaring every named volume the services mount.
    pub fn from_services(network: &str, services: Vec<ServiceBlock>) -> Self {
        let mut volumes = Vec::new();
        for service in &services {
            for volume in service.named_volumes() {
                if !volumes.iter().any(|existing| existing == volume) {
                    volumes.push(volume.to_string());
                }
            }
        }
        Self { network: network.to_string(), volumes, services }
    }

    pub fn service(&self, name: &str) -> Option<&ServiceBlock> {
        self.services.iter().find(|service| service.name == name)
    }

    /// Check the cross-references inside the manifest.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut names = HashSet::new();
        for service in &self.services {
            if !names.insert(service.name.as_str()) {
                return Err(AppError::InvalidManifest(format!(
                    "duplicate service name '{}'",
                    service.name
                )));
            }
        }

        let mut host_ports = HashSet::new();
        for service in &self.services {
            for network in &service.networks {
                if *network != self.network {
                    return Err(AppError::InvalidManifest(format!(
                        "service '{}' uses undeclared network '{}'",
                        service.name, network
                    )));
                }
            }
            for volume in service.named_volumes() {
                if !self.volumes.iter().any(|declared| declared == volume) {
                    return Err(AppError::InvalidManifest(format!(
                        "service '{}' mounts undeclared volume '{}'",
                        service.name, volume
                    )));
                }
            }
            for dependency in &service.depends_on {
                if !names.contains(dependency.as_str()) {
                    return Err(AppError::InvalidManifest(format!(
                        "service '{}' depends on unknown service '{}'",
                        service.name, dependency
                    )));
                }
            }
            for port in &service.ports {
                if !host_ports.insert(port.host) {
                    return Err(AppError::InvalidManifest(format!(
                        "host port {} is published twice",
                        port.host
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, AppError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Render one service as a standalone `name: {...}` YAML fragment.
pub fn render_fragment(block: &ServiceBlock) -> Result<String, AppError> {
    Ok(serde_yaml::to_string(&ServiceMap(std::slice::from_ref(block)))?)
}

impl Serialize for ComposeManifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut document = serializer.serialize_struct("ComposeManifest", 3)?;
        document.serialize_field("networks", &Networks(&self.network))?;
        document.serialize_field("volumes", &Volumes(&self.volumes))?;
        document.serialize_field("services", &ServiceMap(&self.services))?;
        document.end()
    }
}

struct Networks<'a>(&'a str);

#[derive(Serialize)]
struct NetworkSpec {
    driver: &'static str,
}

impl Serialize for Networks<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, &NetworkSpec { driver: "bridge" })?;
        map.end()
    }
}

struct Volumes<'a>(&'a [String]);

struct EmptyMapping;

impl Serialize for EmptyMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_map(Some(0))?.end()
    }
}

impl Serialize for Volumes<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for volume in self.0 {
            map.serialize_entry(volume, &EmptyMapping)?;
        }
        map.end()
    }
}

struct ServiceMap<'a>(&'a [ServiceBlock]);

impl Serialize for ServiceMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for service in self.0 {
            map.serialize_entry(&service.name, service)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::compose::Route;

    fn sample() -> ComposeManifest {
        let db = ServiceBlock::new("acme-db", "mariadb:latest", "acme-network")
            .volume("acme-db-vol", "/var/lib/mysql")
            .port(3306, 3306);
        let web = ServiceBlock::new("acme-web", "wordpress:latest", "acme-network")
            .volume("acme-web-vol", "/var/www/html")
            .depends_on("acme-db")
            .route(Route::to_port("acme.example.com", 80));
        ComposeManifest::from_services("acme-network", vec![db, web])
    }

    #[test]
    fn declares_mounted_volumes() {
        let manifest = sample();
        assert_eq!(manifest.volumes, vec!["acme-db-vol".to_string(), "acme-web-vol".to_string()]);
        manifest.validate().unwrap();
    }

    #[test]
    fn yaml_has_sections_in_order() {
        let yaml = sample().to_yaml().unwrap();

        let networks = yaml.find("networks:").unwrap();
        let volumes = yaml.find("\nvolumes:").unwrap();
        let services = yaml.find("\nservices:").unwrap();
        assert!(networks < volumes && volumes < services);
        assert!(yaml.find("acme-db:").unwrap() < yaml.find("acme-web:").unwrap());
    }

    #[test]
    fn yaml_parses_back_with_declared_references() {
        let yaml = sample().to_yaml().unwrap();
        let doc: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(doc["networks"]["acme-network"]["driver"].as_str(), Some("bridge"));
        assert!(doc["volumes"]["acme-db-vol"].is_mapping());
        assert_eq!(doc["services"]["acme-web"]["depends_on"][0].as_str(), Some("acme-db"));
        assert_eq!(doc["services"]["acme-db"]["ports"][0].as_str(), Some("3306:3306"));
    }

    #[test]
    fn rejects_unknown_dependency() {
        let mut manifest = sample();
        manifest.services[1].depends_on.push("acme-missing".to_string());

        let err = manifest.validate().unwrap_err();
        assert!(err.to_string().contains("acme-missing"));
    }

    #[test]
    fn rejects_undeclared_volume_and_network() {
        let mut manifest = sample();
        manifest.volumes.pop();
        assert!(matches!(manifest.validate(), Err(AppError::InvalidManifest(_))));

        let mut manifest = sample();
        manifest.services[0].networks = vec!["other".to_string()];
        assert!(matches!(manifest.validate(), Err(AppError::InvalidManifest(_))));
    }

    #[test]
    fn rejects_duplicate_names_and_ports() {
        let mut manifest = sample();
        let copy = manifest.services[0].clone();
        manifest.services.push(copy);
        assert!(manifest.validate().unwrap_err().to_string().contains("duplicate service"));

        let mut manifest = sample();
        manifest.services[1].ports.push(crate::domain::compose::PortMapping {
            host: 3306,
            container: 80,
        });
        assert!(manifest.validate().unwrap_err().to_string().contains("3306"));
    }

    #[test]
    fn fragment_is_keyed_by_service_name() {
        let manifest = sample();
        let fragment = render_fragment(&manifest.services[0]).unwrap();

        assert!(fragment.starts_with("acme-db:"));
        assert!(fragment.contains("image: mariadb:latest"));
    }
}

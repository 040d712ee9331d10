/// Well-known listening ports keyed by product name.
const DEFAULT_PORTS: &[(&str, u16)] = &[
    ("WordPress", 80),
    ("Shopify", 80),
    ("Joomla", 80),
    ("MySQL", 3306),
    ("MariaDB", 3306),
    ("Redis", 6379),
    ("Mailhog", 8025),
    ("Traefik", 8080),
    ("Prometheus", 9090),
    ("Grafana", 3000),
    ("Alertmanager", 9093),
    ("cAdvisor", 8080),
    ("Code-server", 8080),
    ("Jenkins", 8080),
    ("GitLab", 80),
    ("SonarQube", 9000),
    ("Portainer", 9000),
    ("Kibana", 5601),
    ("Elasticsearch", 9200),
    ("Logstash", 9600),
    ("Vault", 8200),
    ("Consul", 8500),
    ("Nomad", 4646),
    ("Packer", 8080),
    ("Terraform", 8080),
    ("Ansible", 80),
    ("Nginx", 80),
    ("Apache", 80),
    ("HAProxy", 80),
    ("Varnish", 80),
    ("Squid", 80),
    ("Postfix", 25),
    ("Dovecot", 143),
    ("OpenLDAP", 389),
    ("FreeIPA", 80),
    ("Keycloak", 8080),
    ("Gitea", 80),
    ("Graphviz", 9898),
    ("Certbot", 80),
];

const FALLBACK_PORT: u16 = 80;

/// Resolve the default port for a product, ignoring case. Unknown products get 80.
pub fn default_port(product: &str) -> u16 {
    DEFAULT_PORTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(product))
        .map(|(_, port)| *port)
        .unwrap_or(FALLBACK_PORT)
}

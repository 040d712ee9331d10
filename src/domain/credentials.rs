//! Random tokens for generated secrets and service names.

use rand::rngs::{StdRng, ThreadRng};
use rand::{RngCore, SeedableRng};

const PASSWORD_BYTES: usize = 16;
const USERNAME_BYTES: usize = 8;
const EMAIL_TOKEN_BYTES: usize = 8;
/// 32 bits of suffix: two projects with the same slug collide with
/// probability about n^2 / 2^33 over n projects.
const SERVICE_SUFFIX_BYTES: usize = 4;

/// Generates opaque credential values from a random source.
///
/// Tokens are lowercase hex so they are URL-safe and valid as container,
/// network, and volume names without further escaping.
#[derive(Debug)]
pub struct CredentialGenerator<R: RngCore = ThreadRng> {
    rng: R,
}

impl CredentialGenerator<ThreadRng> {
    /// Generator backed by the thread-local CSPRNG.
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for CredentialGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialGenerator<StdRng> {
    /// Deterministic generator for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl<R: RngCore> CredentialGenerator<R> {
    pub fn generate_password(&mut self) -> String {
        self.token(PASSWORD_BYTES)
    }

    pub fn generate_username(&mut self) -> String {
        self.token(USERNAME_BYTES)
    }

    /// `{service_name}-{token}@{domain}`.
    pub fn generate_email(&mut self, domain: &str, service_name: &str) -> String {
        let token = self.token(EMAIL_TOKEN_BYTES);
        format!("{}-{}@{}", service_name, token, domain)
    }

    /// `{prefix}-{suffix}` for container, network, and project names.
    pub fn generate_service_name(&mut self, prefix: &str) -> String {
        let suffix = self.token(SERVICE_SUFFIX_BYTES);
        format!("{}-{}", prefix, suffix)
    }

    fn token(&mut self, len: usize) -> String {
        let mut bytes = vec![0u8; len];
        self.rng.fill_bytes(&mut bytes);
        bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn password_has_sixteen_bytes_of_entropy() {
        let mut generator = CredentialGenerator::new();
        let password = generator.generate_password();

        assert_eq!(password.len(), 32);
        assert!(password.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn username_has_eight_bytes() {
        let mut generator = CredentialGenerator::new();
        assert_eq!(generator.generate_username().len(), 16);
    }

    #[test]
    fn email_combines_service_token_and_domain() {
        let mut generator = CredentialGenerator::seeded(7);
        let email = generator.generate_email("acme.example.com", "website");

        let (local, domain) = email.split_once('@').unwrap();
        assert_eq!(domain, "acme.example.com");
        assert!(local.starts_with("website-"));
        assert_eq!(local.len(), "website-".len() + 16);
    }

    #[test]
    fn service_name_appends_suffix_to_prefix() {
        let mut generator = CredentialGenerator::seeded(1);
        let name = generator.generate_service_name("acme");

        assert!(name.starts_with("acme-"));
        assert_eq!(name.len(), "acme-".len() + 8);
    }

    #[test]
    fn same_seed_yields_same_tokens() {
        let mut a = CredentialGenerator::seeded(42);
        let mut b = CredentialGenerator::seeded(42);

        assert_eq!(a.generate_password(), b.generate_password());
        assert_eq!(a.generate_service_name("x"), b.generate_service_name("x"));
    }

    #[test]
    fn random_tokens_do_not_repeat() {
        let mut generator = CredentialGenerator::new();
        let tokens: HashSet<String> = (0..1000).map(|_| generator.generate_password()).collect();

        assert_eq!(tokens.len(), 1000);
    }
}

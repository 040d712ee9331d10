//! Generator API client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::domain::AppError;
use crate::ports::{ArtifactKind, GeneratorClient};

const DEFAULT_STATUS_MESSAGE: &str = "Generator request failed";

/// Blocking HTTP transport for a woopy server. One request per call, no retries.
#[derive(Debug, Clone)]
pub struct HttpGeneratorClient {
    base_url: Url,
    client: Client,
}

impl HttpGeneratorClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            AppError::GeneratorApi {
                message: format!("Failed to create HTTP client: {}", e),
                status: None,
            }
        })?;

        Ok(Self { base_url, client })
    }

    fn endpoint(&self, kind: ArtifactKind) -> Result<Url, AppError> {
        self.base_url.join(kind.path()).map_err(|e| AppError::GeneratorApi {
            message: format!("Invalid server URL '{}': {}", self.base_url, e),
            status: None,
        })
    }
}

impl GeneratorClient for HttpGeneratorClient {
    fn generate(&self, env_text: &str, kind: ArtifactKind) -> Result<Vec<u8>, AppError> {
        let response = self
            .client
            .post(self.endpoint(kind)?)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(env_text.to_string())
            .send()
            .map_err(|e| AppError::GeneratorApi {
                message: format!("HTTP request failed: {}", e),
                status: None,
            })?;

        let status = response.status();
        let body = response.bytes().map_err(|e| AppError::GeneratorApi {
            message: format!("Failed to read response: {}", e),
            status: Some(status.as_u16()),
        })?;

        if status.is_success() {
            return Ok(body.to_vec());
        }

        let text = String::from_utf8_lossy(&body);
        let message = extract_error_message(&text).unwrap_or_else(|| {
            if !text.trim().is_empty() {
                text.trim().to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        Err(AppError::GeneratorApi { message, status: Some(status.as_u16()) })
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;
    parsed.get("error").and_then(|error| error.as_str()).map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(server: &mockito::Server) -> HttpGeneratorClient {
        HttpGeneratorClient::new(Url::parse(&server.url()).unwrap(), Duration::from_secs(2))
            .unwrap()
    }

    #[test]
    fn posts_env_text_to_manifest_endpoint() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/dc")
            .match_body("SITE_TITLE=Acme\nSITE_URL=acme.example.com\n")
            .with_status(200)
            .with_header("content-type", "application/yaml")
            .with_body("networks: {}\n")
            .expect(1)
            .create();

        let body = client(&server)
            .generate("SITE_TITLE=Acme\nSITE_URL=acme.example.com\n", ArtifactKind::Manifest)
            .unwrap();

        assert_eq!(body, b"networks: {}\n");
        mock.assert();
    }

    #[test]
    fn bundle_uses_root_endpoint() {
        let mut server = mockito::Server::new();
        let mock = server.mock("POST", "/").with_status(200).with_body("PK").expect(1).create();

        let body = client(&server).generate("SITE_TITLE=Acme", ArtifactKind::Bundle).unwrap();

        assert_eq!(body, b"PK");
        mock.assert();
    }

    #[test]
    fn surfaces_json_error_message() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/dc")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"Missing required key 'SITE_TITLE'"}"#)
            .create();

        let err = client(&server).generate("", ArtifactKind::Manifest).unwrap_err();
        match err {
            AppError::GeneratorApi { message, status } => {
                assert_eq!(status, Some(400));
                assert_eq!(message, "Missing required key 'SITE_TITLE'");
            }
            other => panic!("unexpected error variant: {}", other),
        }
    }

    #[test]
    fn empty_server_error_gets_generic_message() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("POST", "/report").with_status(503).create();

        let err = client(&server).generate("x=y", ArtifactKind::Report).unwrap_err();
        assert_eq!(err.to_string(), "Generator API error (503): Server error");
    }

    #[test]
    fn unreachable_server_has_no_status() {
        let client =
            HttpGeneratorClient::new(Url::parse("http://127.0.0.1:9").unwrap(), Duration::from_millis(200))
                .unwrap();

        let err = client.generate("x=y", ArtifactKind::Manifest).unwrap_err();
        assert!(matches!(err, AppError::GeneratorApi { status: None, .. }));
    }
}

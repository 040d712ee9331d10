use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::{ArtifactKind, GeneratorClient};

/// Records requests and answers every call with the same body.
#[derive(Clone)]
pub struct FakeGeneratorClient {
    pub requests: Arc<Mutex<Vec<(ArtifactKind, String)>>>,
    pub response: Result<Vec<u8>, (String, Option<u16>)>,
}

#[allow(dead_code)]
impl FakeGeneratorClient {
    pub fn returning(body: impl Into<Vec<u8>>) -> Self {
        Self { requests: Arc::new(Mutex::new(vec![])), response: Ok(body.into()) }
    }

    pub fn failing(message: &str, status: Option<u16>) -> Self {
        Self {
            requests: Arc::new(Mutex::new(vec![])),
            response: Err((message.to_string(), status)),
        }
    }

    pub fn recorded(&self) -> Vec<(ArtifactKind, String)> {
        self.requests.lock().unwrap().clone()
    }
}

impl GeneratorClient for FakeGeneratorClient {
    fn generate(&self, env_text: &str, kind: ArtifactKind) -> Result<Vec<u8>, AppError> {
        self.requests.lock().unwrap().push((kind, env_text.to_string()));
        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err((message, status)) => {
                Err(AppError::GeneratorApi { message: message.clone(), status: *status })
            }
        }
    }
}

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::{AppError, GeneratedBundle};
use crate::ports::{ProjectStore, StoredProject};

/// Keeps saved bundles in memory, keyed by project slug.
#[derive(Default)]
pub struct MemoryProjectStore {
    projects: Mutex<BTreeMap<String, GeneratedBundle>>,
}

#[allow(dead_code)]
impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slug: &str) -> Option<GeneratedBundle> {
        self.projects.lock().unwrap().get(slug).cloned()
    }

    pub fn len(&self) -> usize {
        self.projects.lock().unwrap().len()
    }
}

impl ProjectStore for MemoryProjectStore {
    fn save(&self, bundle: &GeneratedBundle) -> Result<StoredProject, AppError> {
        let mut projects = self.projects.lock().unwrap();
        if projects.contains_key(&bundle.project_slug) {
            return Err(AppError::ProjectExists(bundle.project_slug.clone()));
        }
        projects.insert(bundle.project_slug.clone(), bundle.clone());
        Ok(StoredProject {
            slug: bundle.project_slug.clone(),
            path: PathBuf::from("memory").join(&bundle.project_slug),
        })
    }
}

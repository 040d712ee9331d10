use sha2::{Digest, Sha256};

/// One generated file, relative to the project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFile {
    pub path: String,
    pub content: String,
    pub executable: bool,
}

impl BundleFile {
    pub fn new(path: &str, content: String) -> Self {
        Self { path: path.to_string(), content, executable: false }
    }

    pub fn executable(path: &str, content: String) -> Self {
        Self { path: path.to_string(), content, executable: true }
    }
}

/// All files generated for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBundle {
    pub project_slug: String,
    pub files: Vec<BundleFile>,
}

impl GeneratedBundle {
    pub fn new(project_slug: &str) -> Self {
        Self { project_slug: project_slug.to_string(), files: Vec::new() }
    }

    /// Add a file, replacing any earlier file at the same path.
    pub fn push(&mut self, file: BundleFile) {
        match self.files.iter_mut().find(|existing| existing.path == file.path) {
            Some(existing) => *existing = file,
            None => self.files.push(file),
        }
    }

    pub fn file(&self, path: &str) -> Option<&BundleFile> {
        self.files.iter().find(|file| file.path == path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|file| file.path.as_str())
    }
}

/// Lowercase hex SHA-256 of `content`.
pub fn sha256_hex(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    digest.iter().map(|byte| format!("{:02x}", byte)).collect()
}

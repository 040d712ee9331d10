//! Shared testing utilities for woopy CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ACME_ENV: &str = "SITE_TITLE=Acme\nSITE_URL=acme.example.com\n";

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir }
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub fn home(&self) -> &Path {
        self.root.path()
    }

    /// Path to the directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `woopy` binary within the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("woopy").expect("Failed to locate woopy binary");
        cmd.current_dir(self.work_dir())
            .env("HOME", self.home())
            .env_remove("WOOPY_HOME")
            .env_remove("WOOPY_SERVER_URL")
            .env_remove("WOOPY_LOG_LEVEL")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Create `<work>/<company>/.env` with the given content.
    pub fn write_company(&self, company: &str, env: &str) -> PathBuf {
        let dir = self.work_dir.join(company);
        fs::create_dir_all(&dir).expect("Failed to create company directory");
        fs::write(dir.join(".env"), env).expect("Failed to write .env");
        dir
    }

    /// Single project directory created under `parent`.
    pub fn only_project_in(&self, parent: &Path) -> PathBuf {
        let entries: Vec<PathBuf> = fs::read_dir(parent)
            .expect("Failed to read project parent directory")
            .map(|entry| entry.expect("Failed to read directory entry").path())
            .collect();
        assert_eq!(entries.len(), 1, "expected exactly one project in {}", parent.display());
        entries.into_iter().next().unwrap()
    }
}

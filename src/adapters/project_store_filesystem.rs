use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::domain::{AppError, BundleFile, GeneratedBundle};
use crate::ports::{ProjectStore, StoredProject};

const STAGING_PREFIX: &str = ".staging-";

/// Stores each project as a directory under a root such as `~/.woopy`.
///
/// Files are staged in a temporary sibling directory and renamed into place,
/// so a failed save leaves no partial project behind.
#[derive(Debug, Clone)]
pub struct FilesystemProjectStore {
    root: PathBuf,
}

impl FilesystemProjectStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn project_path(&self, slug: &str) -> Result<PathBuf, AppError> {
        validate_relative(slug)?;
        Ok(self.root.join(slug))
    }
}

impl ProjectStore for FilesystemProjectStore {
    fn save(&self, bundle: &GeneratedBundle) -> Result<StoredProject, AppError> {
        let target = self.project_path(&bundle.project_slug)?;
        if target.exists() {
            return Err(AppError::ProjectExists(bundle.project_slug.clone()));
        }

        fs::create_dir_all(&self.root)?;
        let staging = tempfile::Builder::new().prefix(STAGING_PREFIX).tempdir_in(&self.root)?;

        for file in &bundle.files {
            write_file(staging.path(), file)?;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(staging.path(), fs::Permissions::from_mode(0o755))?;
        }

        rename_into_place(staging.path(), &target, &bundle.project_slug)?;
        debug!(path = %target.display(), files = bundle.files.len(), "project stored");

        Ok(StoredProject { slug: bundle.project_slug.clone(), path: target })
    }
}

/// Move a staged project to its final path. A target that appeared since
/// staging began is a conflict, not an I/O failure.
fn rename_into_place(staging: &Path, target: &Path, slug: &str) -> Result<(), AppError> {
    fs::rename(staging, target).map_err(|err| match err.kind() {
        io::ErrorKind::AlreadyExists | io::ErrorKind::DirectoryNotEmpty => {
            AppError::ProjectExists(slug.to_string())
        }
        _ => AppError::Io(err),
    })
}

fn write_file(dir: &Path, file: &BundleFile) -> Result<(), AppError> {
    validate_relative(&file.path)?;
    let path = dir.join(&file.path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, &file.content)?;

    #[cfg(unix)]
    {
        if file.executable {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&path, perms)?;
        }
    }

    Ok(())
}

fn validate_relative(path: &str) -> Result<(), AppError> {
    let candidate = Path::new(path);
    let safe = !path.is_empty()
        && candidate.components().all(|component| matches!(component, Component::Normal(_)));
    if safe {
        Ok(())
    } else {
        Err(AppError::InternalError(format!("Refusing to write outside the project: '{}'", path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn bundle(slug: &str) -> GeneratedBundle {
        let mut bundle = GeneratedBundle::new(slug);
        bundle.push(BundleFile::new("docker-compose.yml", "services: {}\n".into()));
        bundle.push(BundleFile::executable("prerequisites.sh", "#!/bin/sh\n".into()));
        bundle
    }

    #[test]
    fn save_writes_all_files() {
        let dir = TempDir::new().unwrap();
        let store = FilesystemProjectStore::new(dir.path().join("projects"));

        let stored = store.save(&bundle("acme-1")).unwrap();

        assert_eq!(stored.path, dir.path().join("projects/acme-1"));
        assert_eq!(
            fs::read_to_string(stored.path.join("docker-compose.yml")).unwrap(),
            "services: {}\n"
        );
        assert!(stored.path.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn project_directory_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = FilesystemProjectStore::new(dir.path().to_path_buf());
        let stored = store.save(&bundle("acme-1")).unwrap();

        let mode = fs::metadata(&stored.path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn target_created_after_staging_is_a_conflict() {
        let dir = TempDir::new().unwrap();
        let staging = dir.path().join(".staging-x");
        fs::create_dir(&staging).unwrap();
        fs::write(staging.join("docker-compose.yml"), "services: {}\n").unwrap();
        let target = dir.path().join("acme-1");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("docker-compose.yml"), "services: {}\n").unwrap();

        let err = rename_into_place(&staging, &target, "acme-1").unwrap_err();
        assert!(matches!(err, AppError::ProjectExists(slug) if slug == "acme-1"));
        assert!(staging.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn scripts_are_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = FilesystemProjectStore::new(dir.path().to_path_buf());
        let stored = store.save(&bundle("acme-1")).unwrap();

        let mode = fs::metadata(stored.path.join("prerequisites.sh")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn existing_project_is_a_conflict() {
        let dir = TempDir::new().unwrap();
        let store = FilesystemProjectStore::new(dir.path().to_path_buf());
        store.save(&bundle("acme-1")).unwrap();

        let err = store.save(&bundle("acme-1")).unwrap_err();
        assert!(matches!(err, AppError::ProjectExists(slug) if slug == "acme-1"));
    }

    #[test]
    fn failed_save_leaves_nothing_behind() {
        let dir = TempDir::new().unwrap();
        let store = FilesystemProjectStore::new(dir.path().to_path_buf());
        let mut bad = bundle("acme-2");
        bad.push(BundleFile::new("../escape.txt", "x".into()));

        assert!(store.save(&bad).is_err());
        assert!(!dir.path().join("acme-2").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        assert!(!dir.path().parent().unwrap().join("escape.txt").exists());
    }

    #[test]
    fn slug_with_separators_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = FilesystemProjectStore::new(dir.path().to_path_buf());

        assert!(store.save(&bundle("../outside")).is_err());
        assert!(!dir.path().parent().unwrap().join("outside").exists());
    }
}

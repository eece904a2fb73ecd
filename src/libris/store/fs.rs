use super::{Collection, StorageBackend};
use crate::config::LibrisConfig;
use crate::error::{LibrisError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// One JSON file per collection inside a single data directory.
pub struct FsBackend {
    root: PathBuf,
    config: LibrisConfig,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: LibrisConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LibrisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn document_path(&self, collection: Collection) -> PathBuf {
        self.root.join(self.config.file_name(collection))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(LibrisError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_document(&self, collection: Collection) -> Result<Option<String>> {
        let path = self.document_path(collection);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no document yet, starting empty");
                Ok(None)
            }
            Err(e) => Err(LibrisError::Io(e)),
        }
    }

    fn write_document(&self, collection: Collection, contents: &str) -> Result<()> {
        self.ensure_dir()?;
        let target = self.document_path(collection);

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", collection, Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp, contents).and_then(|_| fs::rename(&tmp, &target)) {
            let _ = fs::remove_file(&tmp);
            return Err(LibrisError::Io(e));
        }

        debug!(path = %target.display(), bytes = contents.len(), "document written");
        Ok(())
    }
}

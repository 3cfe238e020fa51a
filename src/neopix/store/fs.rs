use super::ImageStore;
use crate::error::{NeopixError, Result};
use crate::model::{Bucket, WorkspaceLayout};
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileStore {
    layout: WorkspaceLayout,
}

impl FileStore {
    pub fn new(layout: WorkspaceLayout) -> Self {
        Self { layout }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.is_dir() {
            fs::create_dir_all(path).map_err(|e| NeopixError::workspace(path, e))?;
        }
        Ok(())
    }
}

impl ImageStore for FileStore {
    fn ensure_buckets(&mut self) -> Result<()> {
        for bucket in Bucket::ALL {
            self.ensure_dir(self.layout.dir(bucket))?;
        }
        Ok(())
    }

    fn contains(&self, bucket: Bucket, name: &str) -> bool {
        self.layout.file(bucket, name).is_file()
    }

    fn read(&self, bucket: Bucket, name: &str) -> Result<Vec<u8>> {
        let path = self.layout.file(bucket, name);
        fs::read(&path).map_err(|e| NeopixError::workspace(path, e))
    }

    fn write(&mut self, bucket: Bucket, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.layout.file(bucket, name);
        fs::write(&path, bytes).map_err(|e| NeopixError::workspace(path, e))
    }

    fn import(&mut self, source: &Path, bucket: Bucket, name: &str) -> Result<()> {
        let target = self.layout.file(bucket, name);
        if source == target {
            return Ok(());
        }
        fs::copy(source, &target).map_err(|e| NeopixError::workspace(source, e))?;
        Ok(())
    }

    fn copy(&mut self, from: Bucket, to: Bucket, name: &str) -> Result<()> {
        let source = self.layout.file(from, name);
        let target = self.layout.file(to, name);
        fs::copy(&source, &target).map_err(|e| NeopixError::workspace(source, e))?;
        Ok(())
    }

    fn location(&self, bucket: Bucket, name: &str) -> PathBuf {
        self.layout.file(bucket, name)
    }
}

use super::ImageStore;
use crate::error::{NeopixError, Result};
use crate::model::Bucket;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Map-backed store. `import` still reads the source file from disk.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    files: HashMap<(Bucket, String), Vec<u8>>,
    ensured: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a bucket directly, bypassing `import`.
    pub fn with_file(mut self, bucket: Bucket, name: &str, bytes: &[u8]) -> Self {
        self.files.insert((bucket, name.to_string()), bytes.to_vec());
        self
    }

    pub fn is_ensured(&self) -> bool {
        self.ensured
    }

    pub fn bucket_len(&self, bucket: Bucket) -> usize {
        self.files.keys().filter(|(b, _)| *b == bucket).count()
    }

    fn missing(&self, bucket: Bucket, name: &str) -> NeopixError {
        NeopixError::workspace(
            self.location(bucket, name),
            io::Error::new(io::ErrorKind::NotFound, "no such image"),
        )
    }
}

impl ImageStore for InMemoryStore {
    fn ensure_buckets(&mut self) -> Result<()> {
        self.ensured = true;
        Ok(())
    }

    fn contains(&self, bucket: Bucket, name: &str) -> bool {
        self.files.contains_key(&(bucket, name.to_string()))
    }

    fn read(&self, bucket: Bucket, name: &str) -> Result<Vec<u8>> {
        self.files
            .get(&(bucket, name.to_string()))
            .cloned()
            .ok_or_else(|| self.missing(bucket, name))
    }

    fn write(&mut self, bucket: Bucket, name: &str, bytes: &[u8]) -> Result<()> {
        self.files.insert((bucket, name.to_string()), bytes.to_vec());
        Ok(())
    }

    fn import(&mut self, source: &Path, bucket: Bucket, name: &str) -> Result<()> {
        let bytes = std::fs::read(source).map_err(|e| NeopixError::workspace(source, e))?;
        self.write(bucket, name, &bytes)
    }

    fn copy(&mut self, from: Bucket, to: Bucket, name: &str) -> Result<()> {
        let bytes = self.read(from, name)?;
        self.write(to, name, &bytes)
    }

    fn location(&self, bucket: Bucket, name: &str) -> PathBuf {
        PathBuf::from(format!("memory/{}/{}", bucket, name))
    }
}

use std::path::{Path, PathBuf};

use crate::foundation::error::{PolaroidError, PolaroidResult};

/// Receiver of an exported file: the host's download mechanism.
pub trait DownloadSink {
    /// Hand over one finished file.
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> PolaroidResult<()>;
}

/// Sink that keeps every delivered file in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemorySink {
    /// Delivered `(file_name, bytes)` pairs in delivery order.
    pub downloads: Vec<(String, Vec<u8>)>,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent delivery, if any.
    pub fn last(&self) -> Option<(&str, &[u8])> {
        self.downloads
            .last()
            .map(|(name, bytes)| (name.as_str(), bytes.as_slice()))
    }
}

impl DownloadSink for InMemorySink {
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> PolaroidResult<()> {
        self.downloads.push((file_name.to_owned(), bytes.to_vec()));
        Ok(())
    }
}

/// Sink that writes each file into a directory.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    overwrite: bool,
}

impl DirectorySink {
    /// Write into `dir`, replacing files that already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overwrite: true,
        }
    }

    /// Return a sink that refuses to replace existing files when `overwrite` is false.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    #[tracing::instrument(level = "debug", skip(self, bytes), fields(bytes = bytes.len()))]
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> PolaroidResult<()> {
        if file_name.is_empty()
            || file_name.contains(['/', '\\'])
            || file_name == "."
            || file_name == ".."
        {
            return Err(PolaroidError::validation(format!(
                "export file name must be a bare file name, got {file_name:?}"
            )));
        }

        std::fs::create_dir_all(&self.dir).map_err(|e| {
            PolaroidError::encode(format!("create dir {}: {e}", self.dir.display()))
        })?;
        let path = self.dir.join(file_name);
        if !self.overwrite && path.exists() {
            return Err(PolaroidError::encode(format!(
                "refusing to overwrite {}",
                path.display()
            )));
        }
        std::fs::write(&path, bytes)
            .map_err(|e| PolaroidError::encode(format!("write {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "export written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use tokio::io::AsyncWriteExt;

use crate::error::{Result, StorageError};

const CLIP_PREFIX: &str = "emotion_";
const TEMP_SUFFIX: &str = ".tmp";
const MAX_FILENAME_LEN: usize = 128;

/// A clip that has been fully written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredClip {
    /// File name relative to the store directory
    pub filename: String,
    /// Absolute or configured path of the file
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
}

/// Directory of synthesized clips
#[derive(Debug, Clone)]
pub struct AudioStore {
    directory: PathBuf,
}

impl AudioStore {
    /// Open the store, creating the directory if needed
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        std::fs::create_dir_all(&directory)?;

        tracing::debug!(directory = %directory.display(), "audio store ready");

        Ok(Self { directory })
    }

    /// Directory the clips live in
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Write `audio` under a fresh unique name
    ///
    /// The bytes go to a hidden temporary sibling first and are renamed into
    /// place after `fsync`, so the final name never refers to a partial file.
    pub async fn save(&self, audio: &[u8], extension: &str) -> Result<StoredClip> {
        if extension.is_empty() || !extension.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(StorageError::InvalidFilename(extension.to_owned()));
        }

        let filename = format!("{CLIP_PREFIX}{}.{extension}", uuid::Uuid::new_v4().simple());
        let path = self.directory.join(&filename);
        let temp_path = self.directory.join(format!(".{filename}{TEMP_SUFFIX}"));

        if let Err(e) = write_synced(&temp_path, audio).await {
            if let Err(cleanup) = tokio::fs::remove_file(&temp_path).await
                && cleanup.kind() != ErrorKind::NotFound
            {
                tracing::warn!(path = %temp_path.display(), error = %cleanup, "failed to remove partial clip");
            }
            return Err(e.into());
        }

        tokio::fs::rename(&temp_path, &path).await?;

        tracing::debug!(filename = %filename, bytes = audio.len(), "audio clip stored");

        Ok(StoredClip {
            filename,
            path,
            size: audio.len() as u64,
        })
    }

    /// Read a stored clip by file name
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>> {
        validate_filename(filename)?;

        match tokio::fs::read(self.directory.join(filename)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::IsADirectory) => {
                Err(StorageError::NotFound(filename.to_owned()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete clips (and abandoned temporary files) older than `retention`
    ///
    /// Files that do not look like clips are left alone. Returns the number
    /// of files removed.
    pub async fn sweep(&self, retention: Duration) -> Result<usize> {
        let now = SystemTime::now();
        let mut removed = 0;
        let mut entries = tokio::fs::read_dir(&self.directory).await?;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };

            if !is_managed(name) {
                continue;
            }

            let metadata = match entry.metadata().await {
                Ok(metadata) if metadata.is_file() => metadata,
                Ok(_) => continue,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            let age = metadata
                .modified()
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .unwrap_or_default();

            if age <= retention {
                continue;
            }

            match tokio::fs::remove_file(entry.path()).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(removed)
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

/// Clip files and their temporary siblings
fn is_managed(name: &str) -> bool {
    let name = name
        .strip_prefix('.')
        .and_then(|n| n.strip_suffix(TEMP_SUFFIX))
        .unwrap_or(name);

    name.starts_with(CLIP_PREFIX)
}

fn validate_filename(filename: &str) -> Result<()> {
    let valid = !filename.is_empty()
        && filename.len() <= MAX_FILENAME_LEN
        && !filename.starts_with('.')
        && filename
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidFilename(filename.to_owned()))
    }
}
